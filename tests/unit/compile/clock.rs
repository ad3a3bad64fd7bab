use super::*;

fn spec(half_period_minus_one: u32) -> ClockSpec {
    ClockSpec {
        half_period_minus_one,
        phase: 0.0,
    }
}

fn runs(s: &str) -> Vec<(char, usize)> {
    let mut out: Vec<(char, usize)> = Vec::new();
    for c in s.chars() {
        match out.last_mut() {
            Some((last, n)) if *last == c => *n += 1,
            _ => out.push((c, 1)),
        }
    }
    out
}

#[test]
fn unit_clock_alternates_every_character() {
    assert_eq!(clock_states(spec(0), 6), "^_^_^_^_");
}

#[test]
fn final_run_may_be_short() {
    // width 3 + period 4 = 7 characters.
    assert_eq!(clock_states(spec(1), 3), "^^__^^_");
}

#[test]
fn length_and_run_shape_hold_for_many_specs() {
    for h in 0..6u32 {
        for width in 0..20usize {
            let s = clock_states(spec(h), width);
            let half = h as usize + 1;
            assert_eq!(s.len(), width + 2 * half, "h={h} width={width}");
            assert!(s.starts_with('^'));

            let r = runs(&s);
            for (idx, (c, n)) in r.iter().enumerate() {
                assert!(*c == '^' || *c == '_');
                if idx + 1 < r.len() {
                    assert_eq!(*n, half);
                } else {
                    assert!(*n <= half && *n > 0);
                }
            }
        }
    }
}

#[test]
fn expand_clock_leaves_data_tracks_alone() {
    let mut data = Signal::data("d", "^_");
    expand_clock(&mut data, 10);
    assert_eq!(data.states, "^_");

    let mut clk = Signal::clock("clk", 1, 0.25);
    expand_clock(&mut clk, 4);
    assert_eq!(clk.states, "^^__^^__");
}

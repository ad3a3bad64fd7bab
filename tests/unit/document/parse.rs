use super::*;

#[test]
fn blank_line_is_not_a_signal() {
    assert_eq!(parse_line("t.wvy", 3, "").unwrap(), None);
    assert_eq!(parse_line("t.wvy", 3, "\r").unwrap(), None);
}

#[test]
fn data_line_with_labels() {
    let sig = parse_line("t.wvy", 1, "x<-->x<->x bus A,B,C")
        .unwrap()
        .unwrap();
    assert_eq!(sig.name, "bus");
    assert_eq!(sig.states, "x<-->x<->x");
    assert!(!sig.is_clock());
    assert_eq!(sig.labels, vec!["A", "B", "C"]);
}

#[test]
fn clock_line_without_phase_defaults_to_zero() {
    let sig = parse_line("t.wvy", 1, "+0 clk").unwrap().unwrap();
    assert!(sig.is_clock());
    assert_eq!(sig.states, "");
    let clock = sig.clock.unwrap();
    assert_eq!(clock.half_period_minus_one, 0);
    assert_eq!(clock.phase, 0.0);
    assert_eq!(clock.period(), 2);
}

#[test]
fn clock_line_with_fractional_phase() {
    let sig = parse_line("t.wvy", 1, "+1,.25 aclk").unwrap().unwrap();
    let clock = sig.clock.unwrap();
    assert_eq!(clock.half_period_minus_one, 1);
    assert_eq!(clock.phase, 0.25);
    assert_eq!(clock.half_period(), 2);
    assert_eq!(sig.name, "aclk");
}

#[test]
fn single_field_is_malformed() {
    let err = parse_line("in.wvy", 4, "abc").unwrap_err();
    match err {
        WavyError::MalformedLine {
            input,
            line,
            fields,
        } => {
            assert_eq!(input, "in.wvy");
            assert_eq!(line, 4);
            assert_eq!(fields, 1);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn bad_clock_specs_are_rejected() {
    for line in ["+x clk", "+ clk", "+-1 clk", "+1,abc clk", "+1,0.5,2 clk", "+1,NaN clk"] {
        let err = parse_line("c.wvy", 9, line).unwrap_err();
        assert!(
            matches!(err, WavyError::InvalidClockSpec { line: 9, .. }),
            "{line}: {err}"
        );
    }
}

#[test]
fn doubled_space_yields_unnamed_signal() {
    let sig = parse_line("t.wvy", 1, "^^__  name").unwrap().unwrap();
    assert!(!sig.is_named());
}

#[test]
fn document_drops_leading_blank_and_trailing_sentinel() {
    let doc = parse_document("\n+0 clk\n\n^^^___ a\n", "t.wvy").unwrap();
    assert_eq!(doc.rows.len(), 3);
    assert!(matches!(&doc.rows[0], Row::Track(s) if s.name == "clk"));
    assert!(doc.rows[1].is_spacer());
    assert!(matches!(&doc.rows[2], Row::Track(s) if s.name == "a"));
    assert_eq!(doc.track_count(), 2);
    assert_eq!(doc.spacer_count(), 1);
}

#[test]
fn only_one_trailing_spacer_is_dropped() {
    let doc = parse_document("^_ a\n\n", "t.wvy").unwrap();
    assert_eq!(doc.rows.len(), 2);
    assert!(doc.rows[1].is_spacer());
}

#[test]
fn trailing_unnamed_line_matches_plain_document() {
    let with = parse_document("^_ a\n__ b\n^^ ", "t.wvy").unwrap();
    let without = parse_document("^_ a\n__ b", "t.wvy").unwrap();
    assert_eq!(with, without);
}

#[test]
fn malformed_line_reports_one_based_line_number() {
    let err = parse_document("^_ a\nabc\n", "t.wvy").unwrap_err();
    assert_eq!(err.line(), Some(2));
}

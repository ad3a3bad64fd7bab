use super::*;

fn metrics(step: usize, width: usize, name_len: usize, tracks: usize, spacers: usize) -> DocumentMetrics {
    DocumentMetrics {
        step,
        width,
        name_len,
        tracks,
        spacers,
    }
}

#[test]
fn round_trip_scenario_dimensions() {
    // "+0 clk\n\n^^^___ a\n" at fs = 16.
    let layout = Layout::compute(&metrics(2, 6, 3, 2, 1), 16.0).unwrap();
    assert_eq!(layout.right, 48.0);
    assert_eq!(layout.full, 16.0);
    assert_eq!(layout.wide, 48.0 + 16.0 * 5.0);
    assert_eq!(layout.high, (1.8_f64 * 16.0 * 4.0).ceil());
    assert_eq!(
        layout.canvas(),
        Canvas {
            width: 128,
            height: 116
        }
    );
}

#[test]
fn layout_is_idempotent() {
    let m = metrics(3, 17, 5, 4, 3);
    let a = Layout::compute(&m, 12.5).unwrap();
    let b = Layout::compute(&m, 12.5).unwrap();
    assert_eq!(a, b);
}

#[test]
fn every_row_fits_inside_canvas() {
    for tracks in 1..6usize {
        for spacers in 0..6usize {
            let layout = Layout::compute(&metrics(1, 4, 2, tracks, spacers), 16.0).unwrap();
            // Worst case: all spacers before the last track.
            let last = (tracks - 1) as f64 + 0.5 * spacers as f64;
            let band = layout.row_band(last);
            assert!(
                band.bot <= layout.high,
                "tracks={tracks} spacers={spacers}: {} > {}",
                band.bot,
                layout.high
            );
        }
    }
}

#[test]
fn rejects_non_positive_font_size() {
    let m = DocumentMetrics::default();
    assert!(Layout::compute(&m, 0.0).is_err());
    assert!(Layout::compute(&m, f64::NAN).is_err());
}

#[test]
fn column_start_applies_phase_leftward() {
    let layout = Layout::compute(&metrics(4, 8, 4, 2, 0), 16.0).unwrap();
    assert_eq!(layout.full, 32.0);
    assert_eq!(layout.column_start(1, 0.0), layout.right);
    // "+1,.25": phase 0.25 * full * 2.
    let phase_px = 0.25 * layout.full * 2.0;
    assert_eq!(layout.column_start(3, phase_px), layout.right + 64.0 - 16.0);
}

#[test]
fn row_band_pitch() {
    let layout = Layout::compute(&DocumentMetrics::default(), 10.0).unwrap();
    let band = layout.row_band(0.0);
    assert!((band.bot - 45.0).abs() < 1e-9);
    assert!((band.top - 27.0).abs() < 1e-9);
    assert!((band.mid - 36.0).abs() < 1e-9);
}

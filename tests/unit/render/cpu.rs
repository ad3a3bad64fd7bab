use super::*;
use crate::compile::layout::Layout;
use crate::compile::metrics::DocumentMetrics;
use crate::foundation::core::Rect;
use kurbo::Shape as _;

fn blank_plan(width: u32, height: u32) -> WavePlan {
    WavePlan {
        canvas: Canvas { width, height },
        layout: Layout::compute(&DocumentMetrics::default(), 4.0).unwrap(),
        ops: vec![],
        diagnostics: vec![],
    }
}

fn backend_with_canvas(width: u32, height: u32) -> CpuBackend {
    let mut backend = CpuBackend::new(RenderSettings::default());
    backend.begin_canvas(Canvas { width, height }).unwrap();
    backend
}

#[test]
fn zero_sized_canvas_is_rejected() {
    let mut backend = CpuBackend::new(RenderSettings::default());
    let err = backend
        .begin_canvas(Canvas {
            width: 0,
            height: 8,
        })
        .unwrap_err();
    assert!(matches!(err, WavyError::Validation(_)));
}

#[test]
fn oversized_canvas_is_rejected() {
    let mut backend = CpuBackend::new(RenderSettings::default());
    let err = backend
        .begin_canvas(Canvas {
            width: 70_000,
            height: 8,
        })
        .unwrap_err();
    assert!(matches!(err, WavyError::Validation(_)));
}

#[test]
fn drawing_before_begin_canvas_fails() {
    let mut backend = CpuBackend::new(RenderSettings::default());
    let path = Rect::new(0.0, 0.0, 1.0, 1.0).to_path(0.1);
    assert!(backend.fill_path(&path, Rgba8Premul::BLACK).is_err());
    assert!(backend.readback_rgba8(&blank_plan(1, 1)).is_err());
}

#[test]
fn fill_covers_requested_pixels_only() {
    let mut backend = backend_with_canvas(8, 8);
    let path = Rect::new(0.0, 0.0, 4.0, 8.0).to_path(0.1);
    backend.fill_path(&path, Rgba8Premul::WHITE).unwrap();

    let frame = backend.readback_rgba8(&blank_plan(8, 8)).unwrap();
    assert_eq!(frame.data.len(), 8 * 8 * 4);
    assert_eq!(frame.pixel(1, 4), Some([255, 255, 255, 255]));
    assert_eq!(frame.pixel(6, 4), Some([0, 0, 0, 0]));
}

#[test]
fn stroke_paints_along_the_line() {
    let mut backend = backend_with_canvas(10, 10);
    let mut path = BezPath::new();
    path.move_to((0.0, 5.0));
    path.line_to((10.0, 5.0));
    backend
        .stroke_path(&path, Rgba8Premul::opaque(0, 0, 255), 2.0, None)
        .unwrap();

    let frame = backend.readback_rgba8(&blank_plan(10, 10)).unwrap();
    let on = frame.pixel(5, 5).unwrap();
    assert_eq!(on[2], 255);
    assert_eq!(on[3], 255);
    assert_eq!(frame.pixel(5, 1), Some([0, 0, 0, 0]));
}

#[test]
fn dashed_stroke_leaves_gaps() {
    let mut backend = backend_with_canvas(12, 4);
    let mut path = BezPath::new();
    path.move_to((0.0, 2.0));
    path.line_to((12.0, 2.0));
    backend
        .stroke_path(
            &path,
            Rgba8Premul::BLACK,
            2.0,
            Some(Dash { on: 3.0, off: 3.0 }),
        )
        .unwrap();

    let frame = backend.readback_rgba8(&blank_plan(12, 4)).unwrap();
    assert_eq!(frame.pixel(1, 2).unwrap()[3], 255);
    assert_eq!(frame.pixel(4, 2).unwrap()[3], 0);
    assert_eq!(frame.pixel(7, 2).unwrap()[3], 255);
}

#[test]
fn empty_text_is_a_no_op() {
    let mut backend = backend_with_canvas(4, 4);
    backend
        .draw_text(
            "",
            Point::new(1.0, 3.0),
            TextAlign::Center,
            12.0,
            Rgba8Premul::BLACK,
        )
        .unwrap();
    assert!(backend.text.is_none());
}

#[test]
fn missing_font_file_surfaces_an_error() {
    let settings = RenderSettings {
        font: FontSource::File("/definitely/not/a/font.ttf".into()),
    };
    let mut backend = CpuBackend::new(settings);
    backend
        .begin_canvas(Canvas {
            width: 8,
            height: 8,
        })
        .unwrap();
    let err = backend
        .draw_text(
            "clk",
            Point::new(1.0, 6.0),
            TextAlign::Start,
            8.0,
            Rgba8Premul::BLACK,
        )
        .unwrap_err();
    assert!(err.to_string().contains("font"));
}

#[test]
fn readback_consumes_the_surface() {
    let mut backend = backend_with_canvas(2, 2);
    backend.readback_rgba8(&blank_plan(2, 2)).unwrap();
    assert!(backend.readback_rgba8(&blank_plan(2, 2)).is_err());
}

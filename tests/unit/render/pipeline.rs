use super::*;
use crate::{
    compile::plan::{Dash, TextAlign},
    foundation::core::{BezPath, Canvas, Point, Rgba8Premul},
    foundation::error::WavyError,
    render::passes::OpBackend,
};

#[derive(Default)]
struct CountingBackend {
    canvases: usize,
    ops: usize,
}

impl OpBackend for CountingBackend {
    fn begin_canvas(&mut self, _canvas: Canvas) -> WavyResult<()> {
        self.canvases += 1;
        Ok(())
    }

    fn fill_path(&mut self, _path: &BezPath, _color: Rgba8Premul) -> WavyResult<()> {
        self.ops += 1;
        Ok(())
    }

    fn stroke_path(
        &mut self,
        _path: &BezPath,
        _color: Rgba8Premul,
        _width: f64,
        _dash: Option<Dash>,
    ) -> WavyResult<()> {
        self.ops += 1;
        Ok(())
    }

    fn draw_text(
        &mut self,
        _text: &str,
        _anchor: Point,
        _align: TextAlign,
        _size_px: f64,
        _color: Rgba8Premul,
    ) -> WavyResult<()> {
        self.ops += 1;
        Ok(())
    }

    fn readback_rgba8(&mut self, plan: &WavePlan) -> WavyResult<FrameRGBA> {
        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: vec![],
            premultiplied: true,
        })
    }
}

impl RenderBackend for CountingBackend {}

#[test]
fn compile_source_expands_clocks_before_layout() {
    let plan = compile_source("+0 clk\n\n^^^___ a\n", "t.wvy", &WaveOpts::default()).unwrap();
    assert_eq!(plan.layout.width, 6);
    assert_eq!(plan.layout.step, 2);
    assert_eq!(plan.canvas, Canvas { width: 128, height: 116 });
}

#[test]
fn compile_document_matches_compile_source() {
    let src = "+1,.25 aclk\n^^__x<-->x d A\n";
    let doc = parse_document(src, "t.wvy").unwrap();
    let a = compile_document(doc, &WaveOpts::default()).unwrap();
    let b = compile_source(src, "t.wvy", &WaveOpts::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn malformed_line_never_reaches_the_backend() {
    let mut backend = CountingBackend::default();
    let err = render_source("^^__ a\nabc\n", "bad.wvy", &WaveOpts::default(), &mut backend)
        .unwrap_err();
    assert!(matches!(err, WavyError::MalformedLine { line: 2, .. }));
    assert_eq!(backend.canvases, 0);
    assert_eq!(backend.ops, 0);
}

#[test]
fn invalid_font_size_is_rejected() {
    let opts = WaveOpts {
        font_size: 0.0,
        ..WaveOpts::default()
    };
    let err = compile_source("^^__ a\n", "t.wvy", &opts).unwrap_err();
    assert!(matches!(err, WavyError::Validation(_)));
}

#[test]
fn render_source_forwards_diagnostics() {
    let mut backend = CountingBackend::default();
    let out = render_source("^^?? a\n", "t.wvy", &WaveOpts::default(), &mut backend).unwrap();
    assert_eq!(backend.canvases, 1);
    assert!(backend.ops > 0);
    assert!(!out.diagnostics.is_empty());
    assert!(out.diagnostics.iter().all(|d| d.signal == "a"));
}

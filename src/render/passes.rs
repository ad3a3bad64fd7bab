use crate::{
    compile::plan::{Dash, DrawOp, TextAlign, WavePlan},
    foundation::core::{BezPath, Canvas, Point, Rgba8Premul},
    foundation::error::WavyResult,
    render::backend::FrameRGBA,
};

/// Primitive drawing surface a [`WavePlan`] is executed against.
pub trait OpBackend {
    fn begin_canvas(&mut self, canvas: Canvas) -> WavyResult<()>;

    fn fill_path(&mut self, path: &BezPath, color: Rgba8Premul) -> WavyResult<()>;

    fn stroke_path(
        &mut self,
        path: &BezPath,
        color: Rgba8Premul,
        width: f64,
        dash: Option<Dash>,
    ) -> WavyResult<()>;

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point,
        align: TextAlign,
        size_px: f64,
        color: Rgba8Premul,
    ) -> WavyResult<()>;

    fn readback_rgba8(&mut self, plan: &WavePlan) -> WavyResult<FrameRGBA>;
}

pub fn execute_plan<B: OpBackend + ?Sized>(
    backend: &mut B,
    plan: &WavePlan,
) -> WavyResult<FrameRGBA> {
    backend.begin_canvas(plan.canvas)?;

    for op in &plan.ops {
        match op {
            DrawOp::FillPath { path, color } => backend.fill_path(path, *color)?,
            DrawOp::StrokePath {
                path,
                color,
                width,
                dash,
            } => backend.stroke_path(path, *color, *width, *dash)?,
            DrawOp::Text {
                text,
                anchor,
                align,
                size_px,
                color,
            } => backend.draw_text(text, *anchor, *align, *size_px, *color)?,
        }
    }

    backend.readback_rgba8(plan)
}

#[cfg(test)]
#[path = "../../tests/unit/render/passes.rs"]
mod tests;

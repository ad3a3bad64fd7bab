use crate::{
    assets::font::{FontSource, TextBrushRgba8, TextLayoutEngine},
    compile::plan::{Dash, TextAlign, WavePlan},
    foundation::core::{BezPath, Canvas, Point, Rgba8Premul},
    foundation::error::{WavyError, WavyResult},
    render::backend::{FrameRGBA, RenderBackend, RenderSettings},
    render::passes::OpBackend,
};

/// Flattening tolerance for stroke outlines, in pixels.
const STROKE_TOLERANCE: f64 = 0.05;

pub struct CpuBackend {
    settings: RenderSettings,
    text: Option<CpuText>,
    surface: Option<CpuSurface>,
}

struct CpuSurface {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

struct CpuText {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl CpuText {
    fn load(source: &FontSource) -> WavyResult<Self> {
        let engine = TextLayoutEngine::new(source.load()?)?;
        let loaded = engine.font();
        let font = vello_cpu::peniko::FontData::new(
            vello_cpu::peniko::Blob::from(loaded.bytes.to_vec()),
            loaded.index,
        );
        tracing::debug!(family = engine.family_name(), "text engine ready");
        Ok(Self { engine, font })
    }
}

impl CpuBackend {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            text: None,
            surface: None,
        }
    }

    fn surface_mut(&mut self) -> WavyResult<&mut CpuSurface> {
        self.surface
            .as_mut()
            .ok_or_else(|| WavyError::render("drawing before begin_canvas"))
    }
}

impl OpBackend for CpuBackend {
    fn begin_canvas(&mut self, canvas: Canvas) -> WavyResult<()> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| WavyError::validation("canvas width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| WavyError::validation("canvas height exceeds u16"))?;
        if width == 0 || height == 0 {
            return Err(WavyError::validation("canvas must be at least 1x1"));
        }

        self.surface = Some(CpuSurface {
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
        });
        Ok(())
    }

    fn fill_path(&mut self, path: &BezPath, color: Rgba8Premul) -> WavyResult<()> {
        let surface = self.surface_mut()?;
        surface.ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        surface.ctx.set_paint(color_to_cpu(color));
        surface.ctx.fill_path(&bezpath_to_cpu(path));
        Ok(())
    }

    fn stroke_path(
        &mut self,
        path: &BezPath,
        color: Rgba8Premul,
        width: f64,
        dash: Option<Dash>,
    ) -> WavyResult<()> {
        let mut style = kurbo::Stroke::new(width).with_caps(kurbo::Cap::Butt);
        if let Some(d) = dash {
            style = style.with_dashes(0.0, [d.on, d.off]);
        }
        let outline = kurbo::stroke(
            path.iter(),
            &style,
            &kurbo::StrokeOpts::default(),
            STROKE_TOLERANCE,
        );
        self.fill_path(&outline, color)
    }

    fn draw_text(
        &mut self,
        text: &str,
        anchor: Point,
        align: TextAlign,
        size_px: f64,
        color: Rgba8Premul,
    ) -> WavyResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        if self.text.is_none() {
            self.text = Some(CpuText::load(&self.settings.font)?);
        }
        let Some(cpu_text) = self.text.as_mut() else {
            return Err(WavyError::render("text engine unavailable"));
        };
        let surface = self
            .surface
            .as_mut()
            .ok_or_else(|| WavyError::render("drawing before begin_canvas"))?;

        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: color.a,
        };
        let layout = cpu_text.engine.layout_line(text, size_px as f32, brush)?;

        let width = f64::from(layout.width());
        let baseline = layout
            .lines()
            .next()
            .map_or(0.0, |line| f64::from(line.metrics().baseline));
        let x = match align {
            TextAlign::Start => anchor.x,
            TextAlign::Center => anchor.x - 0.5 * width,
            TextAlign::End => anchor.x - width,
        };
        let ctx = &mut surface.ctx;
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((x, anchor.y - baseline)));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&cpu_text.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        Ok(())
    }

    fn readback_rgba8(&mut self, plan: &WavePlan) -> WavyResult<FrameRGBA> {
        let mut surface = self
            .surface
            .take()
            .ok_or_else(|| WavyError::render("readback before begin_canvas"))?;

        let mut pixmap = vello_cpu::Pixmap::new(surface.width, surface.height);
        surface.ctx.flush();
        surface.ctx.render_to_pixmap(&mut pixmap);

        Ok(FrameRGBA {
            width: plan.canvas.width,
            height: plan.canvas.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

impl RenderBackend for CpuBackend {}

fn color_to_cpu(c: Rgba8Premul) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;

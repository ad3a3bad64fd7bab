use crate::{
    assets::font::FontSource,
    compile::plan::WavePlan,
    foundation::error::WavyResult,
    render::passes::{OpBackend, execute_plan},
};

#[derive(Clone, Debug)]
/// Rendered diagram pixels in row-major RGBA8.
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Pixel at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

pub trait RenderBackend: OpBackend {
    fn render_plan(&mut self, plan: &WavePlan) -> WavyResult<FrameRGBA> {
        execute_plan(self, plan)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackendKind {
    #[default]
    Cpu,
}

#[derive(Clone, Debug, Default)]
pub struct RenderSettings {
    pub font: FontSource,
}

pub fn create_backend(
    kind: BackendKind,
    settings: &RenderSettings,
) -> WavyResult<Box<dyn RenderBackend>> {
    match kind {
        BackendKind::Cpu => Ok(Box::new(crate::render::cpu::CpuBackend::new(
            settings.clone(),
        ))),
    }
}

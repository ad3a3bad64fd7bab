use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::Context;

use crate::foundation::error::{WavyError, WavyResult};

/// Environment variable that points the default font source at a font file.
pub const FONT_ENV_VAR: &str = "WAVY_FONT";

/// Where the renderer gets its font from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FontSource {
    /// First monospace face found on the system, falling back to sans-serif and then to
    /// any installed face.
    #[default]
    System,
    /// A TrueType/OpenType file on disk.
    File(PathBuf),
}

impl FontSource {
    /// `File` when [`FONT_ENV_VAR`] is set and non-empty, `System` otherwise.
    pub fn from_env_or_system() -> Self {
        std::env::var_os(FONT_ENV_VAR)
            .filter(|v| !v.is_empty())
            .map(|v| Self::File(PathBuf::from(v)))
            .unwrap_or_default()
    }

    pub fn load(&self) -> WavyResult<LoadedFont> {
        match self {
            Self::System => load_system_font(),
            Self::File(path) => load_font_file(path),
        }
    }
}

/// Raw font data plus the face index within it.
#[derive(Clone)]
pub struct LoadedFont {
    pub bytes: Arc<Vec<u8>>,
    pub index: u32,
    /// Family name reported by the font database, if known up front.
    pub family: Option<String>,
}

impl std::fmt::Debug for LoadedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedFont")
            .field("bytes_len", &self.bytes.len())
            .field("index", &self.index)
            .field("family", &self.family)
            .finish()
    }
}

fn load_font_file(path: &Path) -> WavyResult<LoadedFont> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("read font file '{}'", path.display()))?;
    if bytes.is_empty() {
        return Err(WavyError::render(format!(
            "font file '{}' is empty",
            path.display()
        )));
    }
    Ok(LoadedFont {
        bytes: Arc::new(bytes),
        index: 0,
        family: None,
    })
}

fn load_system_font() -> WavyResult<LoadedFont> {
    use usvg::fontdb::{Database, Family, Query};

    let mut db = Database::new();
    db.load_system_fonts();

    let generic = [Family::Monospace, Family::SansSerif];
    let id = generic
        .iter()
        .find_map(|family| {
            let families = [family.clone()];
            db.query(&Query {
                families: &families,
                ..Query::default()
            })
        })
        .or_else(|| db.faces().next().map(|face| face.id))
        .ok_or_else(|| {
            WavyError::render("no system fonts found; set WAVY_FONT or pass a font file")
        })?;

    let family = db
        .face(id)
        .and_then(|face| face.families.first().map(|(name, _)| name.clone()));
    let (bytes, index) = db
        .with_face_data(id, |data, index| (data.to_vec(), index))
        .ok_or_else(|| WavyError::render("system font data could not be loaded"))?;

    tracing::debug!(?family, index, bytes = bytes.len(), "resolved system font");

    Ok(LoadedFont {
        bytes: Arc::new(bytes),
        index,
        family,
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Stateful helper for building single-line Parley layouts from one font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
    font: LoadedFont,
}

impl TextLayoutEngine {
    /// Register `font` with a fresh Parley font context.
    pub fn new(font: LoadedFont) -> WavyResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx.collection.register_fonts(
            parley::fontique::Blob::from(font.bytes.to_vec()),
            None,
        );
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            WavyError::render("no font families registered from font bytes")
        })?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| WavyError::render("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
            font,
        })
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn font(&self) -> &LoadedFont {
        &self.font
    }

    /// Shape `text` on a single unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> WavyResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(WavyError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;

use crate::{
    compile::metrics::DocumentMetrics,
    foundation::core::Canvas,
    foundation::error::{WavyError, WavyResult},
};

/// Row pitch in units of the font size.
pub const SPACER: f64 = 1.8;

/// Pixel geometry shared by every track of one diagram.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Layout {
    /// Font size unit `fs`.
    pub font_size: f64,
    /// Width of the name margin; traces start here.
    pub right: f64,
    /// Pixel width of one state column.
    pub full: f64,
    /// Canvas width before truncation to whole pixels.
    pub wide: f64,
    /// Canvas height (already rounded up).
    pub high: f64,
    /// Document-wide step used for `full`.
    pub step: usize,
    /// Document-wide data width in columns.
    pub width: usize,
}

/// Vertical extent of one track row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowBand {
    pub top: f64,
    pub mid: f64,
    pub bot: f64,
}

impl Layout {
    /// Size the diagram from document-wide maxima.
    ///
    /// Spacer rows count as half a track; the effective row count is rounded down.
    pub fn compute(metrics: &DocumentMetrics, font_size: f64) -> WavyResult<Self> {
        if !font_size.is_finite() || font_size <= 0.0 {
            return Err(WavyError::validation(
                "font size must be finite and > 0",
            ));
        }

        let right = metrics.name_len as f64 * font_size;
        let full = 0.5 * font_size * metrics.step as f64;
        let wide = right + full * (metrics.width as f64 - 1.0);
        let rows = metrics.tracks + metrics.spacers / 2;
        let high = (SPACER * font_size * (2 + rows) as f64).ceil();

        Ok(Self {
            font_size,
            right,
            full,
            wide,
            high,
            step: metrics.step,
            width: metrics.width,
        })
    }

    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.wide.max(0.0) as u32,
            height: self.high.max(0.0) as u32,
        }
    }

    /// Half a column.
    pub fn half(&self) -> f64 {
        0.5 * self.full
    }

    /// Distance from the mid rail to the high and low rails.
    pub fn demi(&self) -> f64 {
        0.5 * self.font_size
    }

    /// Band for a row that starts `row_offset` rows below the first track.
    pub fn row_band(&self, row_offset: f64) -> RowBand {
        let pitch = self.font_size * SPACER;
        let bot = pitch * (2.5 + row_offset);
        let top = bot - pitch;
        RowBand {
            top,
            mid: 0.5 * (top + bot),
            bot,
        }
    }

    /// Left edge of the column ending at state index `idx` (`idx >= 1`).
    pub fn column_start(&self, idx: usize, phase_px: f64) -> f64 {
        self.right + self.full * (idx as f64 - 1.0) - phase_px
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/layout.rs"]
mod tests;

use crate::document::model::{Document, Row, Signal};

/// Room reserved around a label for the two chevron glyphs and padding, in columns.
const LABEL_CHEVRON_ROOM: usize = 3;

/// Per-signal sizing requirements.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SignalMetrics {
    /// Minimum time units one rendered column must span.
    pub step: usize,
    /// Number of state characters (`0` for clocks).
    pub width: usize,
}

/// Compute the sizing requirements of one signal.
pub fn signal_metrics(sig: &Signal) -> SignalMetrics {
    if !sig.is_named() {
        return SignalMetrics::default();
    }
    if let Some(clock) = sig.clock {
        return SignalMetrics {
            step: clock.period(),
            width: 0,
        };
    }

    let states = sig.states.as_bytes();
    let mut step = 1;
    let mut i = 0;
    for label in &sig.labels {
        while i < states.len() && states[i] != b'<' {
            i += 1;
        }
        if i == states.len() {
            break;
        }
        let from = i;
        while i < states.len() && states[i] != b'>' {
            i += 1;
        }
        if i < states.len() {
            i += 1;
        }
        step = step.max(min_step_for(i - from, label.chars().count()));
    }

    SignalMetrics {
        step,
        width: states.len(),
    }
}

/// Smallest `d >= 1` with `d * segment >= LABEL_CHEVRON_ROOM + label_len`.
fn min_step_for(segment: usize, label_len: usize) -> usize {
    let need = LABEL_CHEVRON_ROOM + label_len;
    need.div_ceil(segment.max(1)).max(1)
}

/// Document-wide maxima that drive clock expansion and layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentMetrics {
    /// Largest per-signal step (at least 1).
    pub step: usize,
    /// Widest data track in characters (at least 1).
    pub width: usize,
    /// Longest signal name in characters (at least 1).
    pub name_len: usize,
    /// Number of clock and data tracks.
    pub tracks: usize,
    /// Number of spacer rows.
    pub spacers: usize,
}

impl Default for DocumentMetrics {
    fn default() -> Self {
        Self {
            step: 1,
            width: 1,
            name_len: 1,
            tracks: 0,
            spacers: 0,
        }
    }
}

impl DocumentMetrics {
    pub fn collect(doc: &Document) -> Self {
        let mut out = Self::default();
        for row in &doc.rows {
            match row {
                Row::Track(sig) => {
                    let m = signal_metrics(sig);
                    out.step = out.step.max(m.step);
                    out.width = out.width.max(m.width);
                    out.name_len = out.name_len.max(sig.name.chars().count());
                    out.tracks += 1;
                }
                Row::Spacer => out.spacers += 1,
            }
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/metrics.rs"]
mod tests;

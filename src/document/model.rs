/// Clock parameters parsed from a `+<half>[,<phase>]` field.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ClockSpec {
    /// Half period in minimum time steps, minus one.
    pub half_period_minus_one: u32,
    /// Leftward shift in units of one half period.
    pub phase: f64,
}

impl ClockSpec {
    /// Number of consecutive `^` (or `_`) states in one half period.
    pub fn half_period(self) -> usize {
        self.half_period_minus_one as usize + 1
    }

    /// Full clock period in minimum time steps.
    pub fn period(self) -> usize {
        2 * self.half_period()
    }
}

/// One track of the diagram.
///
/// Data tracks carry their authored `states`; clock tracks start with empty `states`
/// that are filled by [`expand_clock`](crate::expand_clock) once the document width is
/// known.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Signal {
    pub name: String,
    pub clock: Option<ClockSpec>,
    pub states: String,
    pub labels: Vec<String>,
}

impl Signal {
    pub fn data(name: impl Into<String>, states: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            states: states.into(),
            ..Self::default()
        }
    }

    pub fn clock(name: impl Into<String>, half_period_minus_one: u32, phase: f64) -> Self {
        Self {
            name: name.into(),
            clock: Some(ClockSpec {
                half_period_minus_one,
                phase,
            }),
            ..Self::default()
        }
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_clock(&self) -> bool {
        self.clock.is_some()
    }

    /// Clock phase, `0.0` for data tracks.
    pub fn phase(&self) -> f64 {
        self.clock.map_or(0.0, |c| c.phase)
    }

    /// An unnamed signal is a parser artifact and renders as a spacer.
    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }
}

/// One entry of a parsed document in source order.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Row {
    /// A clock or data track.
    Track(Signal),
    /// Half-height gap produced by a blank line.
    Spacer,
}

impl Row {
    pub fn signal(&self) -> Option<&Signal> {
        match self {
            Row::Track(s) => Some(s),
            Row::Spacer => None,
        }
    }

    pub fn is_spacer(&self) -> bool {
        matches!(self, Row::Spacer)
    }
}

/// A parsed waveform document.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Document {
    /// Identifier used in diagnostics (usually the input path).
    pub input: String,
    pub rows: Vec<Row>,
}

impl Document {
    pub fn signals(&self) -> impl Iterator<Item = &Signal> {
        self.rows.iter().filter_map(Row::signal)
    }

    pub fn signals_mut(&mut self) -> impl Iterator<Item = &mut Signal> {
        self.rows.iter_mut().filter_map(|row| match row {
            Row::Track(s) => Some(s),
            Row::Spacer => None,
        })
    }

    pub fn track_count(&self) -> usize {
        self.signals().count()
    }

    pub fn spacer_count(&self) -> usize {
        self.rows.iter().filter(|r| r.is_spacer()).count()
    }
}

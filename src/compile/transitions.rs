//! Closed rule table mapping consecutive state pairs to drawing rules.

/// One state character of a trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Level {
    /// `^`
    High,
    /// `_`
    Low,
    /// `/`
    Rise,
    /// `\`
    Fall,
    /// `z`
    HighZ,
    /// `x`
    Undefined,
    /// `<`
    BusOpen,
    /// `>`
    BusClose,
    /// `-`
    Busy,
    /// `%`
    Data,
}

impl Level {
    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '^' => Self::High,
            '_' => Self::Low,
            '/' => Self::Rise,
            '\\' => Self::Fall,
            'z' => Self::HighZ,
            'x' => Self::Undefined,
            '<' => Self::BusOpen,
            '>' => Self::BusClose,
            '-' => Self::Busy,
            '%' => Self::Data,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Self::High => '^',
            Self::Low => '_',
            Self::Rise => '/',
            Self::Fall => '\\',
            Self::HighZ => 'z',
            Self::Undefined => 'x',
            Self::BusOpen => '<',
            Self::BusClose => '>',
            Self::Busy => '-',
            Self::Data => '%',
        }
    }
}

/// Drawing rule selected for one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PairRule {
    SteadyHigh,
    SteadyLow,
    /// `_^`
    RisingEdge,
    /// `^_`
    FallingEdge,
    /// `_/`
    RampRise,
    /// `^\`
    RampFall,
    /// `><` (labelled) and `>>` (hold).
    BusCross { show_label: bool },
    /// `>x`
    BusClose,
    /// `x<`
    BusOpen,
    /// `^x`
    HighToUndefined,
    /// `_x`
    LowToUndefined,
    /// `x^`
    UndefinedToHigh,
    /// `x_`
    UndefinedToLow,
    /// Both rails for the full column.
    BothRails,
    /// `_z`
    LowToHighZ,
    /// `zx`
    HighZToUndefined,
    /// Dashed mid rail for the full column.
    HighZ,
    /// `%%`
    DataDiamond,
}

/// Effect a rule has on bus label placement, in pixels relative to the column start.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LabelEffect {
    /// The current segment ends here.
    pub segment_end: Option<f64>,
    /// The next segment starts here.
    pub next_start: Option<f64>,
    /// Draw the next pending label over the segment that just ended.
    pub show_label: bool,
}

impl PairRule {
    pub fn label_effect(self, half: f64) -> LabelEffect {
        match self {
            Self::BusCross { show_label } => LabelEffect {
                segment_end: Some(half),
                next_start: Some(half),
                show_label,
            },
            Self::BusClose => LabelEffect {
                segment_end: Some(half),
                next_start: None,
                show_label: true,
            },
            Self::BusOpen => LabelEffect {
                segment_end: None,
                next_start: Some(half),
                show_label: false,
            },
            _ => LabelEffect::default(),
        }
    }
}

/// Look up the rule for `prev` followed by `cur`. `None` marks a pair outside the table.
pub fn classify(prev: Level, cur: Level) -> Option<PairRule> {
    use Level::*;

    let rule = match (prev, cur) {
        (High, High) | (Rise, High) | (Data, High) | (High, Data) => PairRule::SteadyHigh,
        (Low, Low) | (Fall, Low) | (Data, Low) | (Low, Data) => PairRule::SteadyLow,
        (Low, High) => PairRule::RisingEdge,
        (High, Low) => PairRule::FallingEdge,
        (Low, Rise) => PairRule::RampRise,
        (High, Fall) => PairRule::RampFall,
        (BusClose, BusOpen) => PairRule::BusCross { show_label: true },
        (BusClose, BusClose) => PairRule::BusCross { show_label: false },
        (BusClose, Undefined) => PairRule::BusClose,
        (Undefined, BusOpen) => PairRule::BusOpen,
        (High, Undefined) => PairRule::HighToUndefined,
        (Low, Undefined) => PairRule::LowToUndefined,
        (Undefined, High) => PairRule::UndefinedToHigh,
        (Undefined, Low) => PairRule::UndefinedToLow,
        (Undefined, Undefined)
        | (BusOpen, Busy)
        | (Busy, BusClose)
        | (Busy, Busy)
        | (Undefined, Data)
        | (Data, Undefined)
        | (Busy, Data)
        | (Data, Busy) => PairRule::BothRails,
        (Low, HighZ) => PairRule::LowToHighZ,
        (HighZ, Undefined) => PairRule::HighZToUndefined,
        (HighZ, HighZ) | (HighZ, Data) | (Data, HighZ) => PairRule::HighZ,
        (Data, Data) => PairRule::DataDiamond,
        _ => return None,
    };
    Some(rule)
}

/// Classify a raw character pair, including characters outside the alphabet.
pub fn classify_chars(prev: char, cur: char) -> Option<PairRule> {
    classify(Level::from_char(prev)?, Level::from_char(cur)?)
}

#[cfg(test)]
#[path = "../../tests/unit/compile/transitions.rs"]
mod tests;

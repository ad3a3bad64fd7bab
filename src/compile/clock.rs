use crate::document::model::{ClockSpec, Document, Signal};

/// Build the idealized square wave for a clock.
///
/// The result is exactly `width + period` characters long: runs of `half_period`
/// `^` then `_`, alternating, starting high. The final run may be cut short. The extra
/// period of headroom lets a phase-shifted clock still cover the widest data track.
pub fn clock_states(clock: ClockSpec, width: usize) -> String {
    let total = width + clock.period();
    let half = clock.half_period();
    (0..total)
        .map(|i| if (i / half) % 2 == 0 { '^' } else { '_' })
        .collect()
}

/// Fill a clock signal's `states`. Data signals are left untouched.
pub fn expand_clock(sig: &mut Signal, width: usize) {
    if let Some(clock) = sig.clock {
        sig.states = clock_states(clock, width);
    }
}

/// Expand every clock in the document against the document-wide data width.
pub fn expand_clocks(doc: &mut Document, width: usize) {
    for sig in doc.signals_mut() {
        expand_clock(sig, width);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compile/clock.rs"]
mod tests;

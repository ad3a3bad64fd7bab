use crate::{
    document::model::{ClockSpec, Document, Row, Signal},
    foundation::error::{WavyError, WavyResult},
};

/// Parse one input line.
///
/// Returns `Ok(None)` for a blank line. `line_no` is 1-based and, together with
/// `input`, only feeds error messages.
///
/// Fields are separated by single spaces, so doubled spaces produce empty fields. A
/// line whose second field is empty yields an unnamed [`Signal`], which callers treat
/// as a spacer.
pub fn parse_line(input: &str, line_no: usize, line: &str) -> WavyResult<Option<Signal>> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split(' ').collect();
    if fields.len() < 2 {
        return Err(WavyError::MalformedLine {
            input: input.to_string(),
            line: line_no,
            fields: fields.len(),
        });
    }

    let mut sig = Signal {
        name: fields[1].to_string(),
        ..Signal::default()
    };

    match fields[0].strip_prefix('+') {
        Some(spec) => sig.clock = Some(parse_clock_spec(input, line_no, spec)?),
        None => sig.states = fields[0].to_string(),
    }

    if let Some(labels) = fields.get(2) {
        sig.labels = labels.split(',').map(str::to_string).collect();
    }

    Ok(Some(sig))
}

fn parse_clock_spec(input: &str, line_no: usize, spec: &str) -> WavyResult<ClockSpec> {
    let invalid = |reason: String| WavyError::InvalidClockSpec {
        input: input.to_string(),
        line: line_no,
        reason,
    };

    let parts: Vec<&str> = spec.split(',').collect();
    if parts.len() > 2 {
        return Err(invalid(format!(
            "expected +<half_period>[,<phase>], got {} comma-separated parts",
            parts.len()
        )));
    }

    let half_period_minus_one = parts[0]
        .parse::<u32>()
        .map_err(|e| invalid(format!("half period {:?}: {e}", parts[0])))?;

    let phase = match parts.get(1) {
        Some(raw) => {
            let phase = raw
                .parse::<f64>()
                .map_err(|e| invalid(format!("phase {raw:?}: {e}")))?;
            if !phase.is_finite() {
                return Err(invalid(format!("phase {raw:?} must be finite")));
            }
            phase
        }
        None => 0.0,
    };

    Ok(ClockSpec {
        half_period_minus_one,
        phase,
    })
}

/// Parse a whole document.
///
/// A blank first line is skipped. Blank lines and unnamed signals become
/// [`Row::Spacer`]. When the document has more than one row and the last one is a
/// spacer, it is the end-of-input artifact left by the final newline and is dropped.
pub fn parse_document(source: &str, input: &str) -> WavyResult<Document> {
    let mut rows = Vec::new();
    for (idx, line) in source.split('\n').enumerate() {
        if idx == 0 && line.is_empty() {
            continue;
        }
        let row = match parse_line(input, idx + 1, line)? {
            Some(sig) if sig.is_named() => Row::Track(sig),
            _ => Row::Spacer,
        };
        rows.push(row);
    }

    if rows.len() > 1 && rows.last().is_some_and(Row::is_spacer) {
        rows.pop();
    }

    Ok(Document {
        input: input.to_string(),
        rows,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/document/parse.rs"]
mod tests;

//! Timestamp parsing and range validation.

use crate::domain::error::ClipError;

/// Convert a time string (`HH:MM:SS`, `MM:SS` or `SS`) to seconds.
///
/// Components are not range-checked individually: `"99:99"` parses to 6039.
/// Range checking against the real video duration is the job of
/// [`validate_range`], which is also where a negative total is rejected.
pub fn parse_timestamp(text: &str) -> Result<i64, ClipError> {
    if text.is_empty() {
        return Err(ClipError::InvalidTimestamp(
            "Timestamp must be a non-empty string".to_string(),
        ));
    }

    let parts = text
        .split(':')
        .map(|part| {
            part.parse::<i64>().map_err(|_| {
                ClipError::InvalidTimestamp(
                    "Invalid time format. Use HH:MM:SS, MM:SS, or SS".to_string(),
                )
            })
        })
        .collect::<Result<Vec<i64>, ClipError>>()?;

    // Checked arithmetic: absurdly large components must become a parse
    // error, not an overflow panic inside a job task.
    let total = match parts.as_slice() {
        [hours, minutes, seconds] => hours
            .checked_mul(3600)
            .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
            .and_then(|hm| hm.checked_add(*seconds)),
        [minutes, seconds] => minutes
            .checked_mul(60)
            .and_then(|m| m.checked_add(*seconds)),
        [seconds] => Some(*seconds),
        _ => {
            return Err(ClipError::InvalidTimestamp(
                "Invalid time format".to_string(),
            ))
        }
    };

    total.ok_or_else(|| ClipError::InvalidTimestamp("Timestamp is out of range".to_string()))
}

/// Check that `start..end` is a legal, non-empty range within the video.
///
/// The reported duration is the only upper bound applied.
pub fn validate_range(start: i64, end: i64, duration: f64) -> Result<(), ClipError> {
    if start >= end {
        return Err(ClipError::TimestampRange(
            "End time must be greater than start time".to_string(),
        ));
    }

    if start < 0 {
        return Err(ClipError::TimestampRange(
            "Start time cannot be negative".to_string(),
        ));
    }

    if end as f64 > duration {
        return Err(ClipError::TimestampRange(format!(
            "End time ({}s) exceeds video duration ({}s)",
            end, duration
        )));
    }

    Ok(())
}

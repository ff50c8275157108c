//! Wall-clock time arithmetic
//!
//! Slot times travel as `HH:MM` strings and are compared as minutes since
//! midnight.

use super::error::{DomainError, Result};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse `HH:MM` into minutes since midnight.
///
/// Hour and minute are plain integers (`9:05` is accepted). Minutes must be
/// below 60 and the total may not exceed `24:00`, which is allowed so a day
/// can end at midnight.
pub fn parse_time(s: &str) -> Result<u32> {
    let invalid = || DomainError::InvalidTime(s.to_string());

    let (hour, minute) = s.split_once(':').ok_or_else(invalid)?;
    if hour.is_empty() || minute.is_empty() || minute.contains(':') {
        return Err(invalid());
    }

    let hour: u32 = hour.parse().map_err(|_| invalid())?;
    let minute: u32 = minute.parse().map_err(|_| invalid())?;
    if minute >= 60 {
        return Err(invalid());
    }

    let total = hour.checked_mul(60).and_then(|h| h.checked_add(minute)).ok_or_else(invalid)?;
    if total > MINUTES_PER_DAY {
        return Err(invalid());
    }
    Ok(total)
}

/// Format minutes since midnight as zero-padded `HH:MM`.
///
/// Only meaningful for `0..MINUTES_PER_DAY`; callers guard the range.
pub fn format_time(minutes: u32) -> String {
    debug_assert!(minutes < MINUTES_PER_DAY, "minutes out of range: {minutes}");
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

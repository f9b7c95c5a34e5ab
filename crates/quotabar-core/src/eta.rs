//! Compact "time until reset" strings such as `4h19m` or `2d03h`.

use chrono::{DateTime, Utc};

use crate::window::{ResetAt, WindowUsage};

/// Shown when a window has no reset timestamp.
pub const ABSENT: &str = "0′00″";
/// Shown when a reset timestamp cannot be interpreted.
pub const UNPARSEABLE: &str = "??′??″";
/// Label for windows that have neither usage nor a scheduled reset.
pub const NOT_STARTED: &str = "Not started";

const DAY: i64 = 86_400;
const HOUR: i64 = 3_600;
const MINUTE: i64 = 60;

/// A reset timestamp that could not be turned into an instant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EtaError {
    #[error("invalid ISO-8601 timestamp {0:?}")]
    InvalidIso(String),
    #[error("epoch seconds out of range: {0}")]
    InvalidEpoch(i64),
    #[error("empty reset timestamp")]
    Blank,
}

/// Resolves a reset timestamp to an absolute UTC instant.
///
/// A trailing `Z` is treated as `+00:00`. Strings without an offset are
/// rejected.
pub fn resolve(reset: &ResetAt) -> Result<DateTime<Utc>, EtaError> {
    match reset {
        ResetAt::Iso(raw) => {
            let normalized = match raw.strip_suffix('Z') {
                Some(stem) => format!("{stem}+00:00"),
                None => raw.clone(),
            };
            DateTime::parse_from_rfc3339(&normalized)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|_| EtaError::InvalidIso(raw.clone()))
        }
        ResetAt::Epoch(secs) => {
            DateTime::from_timestamp(*secs, 0).ok_or(EtaError::InvalidEpoch(*secs))
        }
        ResetAt::Blank => Err(EtaError::Blank),
    }
}

/// Whole seconds from `now` until `reset`, truncated toward zero.
pub fn seconds_until(reset: &ResetAt, now: DateTime<Utc>) -> Result<i64, EtaError> {
    Ok((resolve(reset)? - now).num_seconds())
}

/// Formats the time left until `reset` using the current time.
pub fn format_eta(reset: Option<&ResetAt>) -> String {
    format_eta_at(reset, Utc::now())
}

/// Formats the time left until `reset` relative to `now`, using the two
/// largest applicable units.
pub fn format_eta_at(reset: Option<&ResetAt>, now: DateTime<Utc>) -> String {
    let Some(reset) = reset.filter(|r| r.is_set()) else {
        return ABSENT.to_string();
    };
    match seconds_until(reset, now) {
        Ok(secs) => format_seconds(secs),
        Err(_) => UNPARSEABLE.to_string(),
    }
}

/// Formats a remaining duration in seconds.
pub fn format_seconds(secs: i64) -> String {
    if secs <= 0 {
        return "0m00s".to_string();
    }
    if secs >= DAY {
        return format!("{}d{:02}h", secs / DAY, (secs % DAY) / HOUR);
    }
    if secs >= HOUR {
        return format!("{}h{:02}m", secs / HOUR, (secs % HOUR) / MINUTE);
    }
    format!("{}m{:02}s", secs / MINUTE, secs % MINUTE)
}

/// The reset column shown for a window: [`NOT_STARTED`] when no reset is
/// scheduled (absent or blank), the ETA otherwise.
pub fn reset_label(window: &WindowUsage, now: DateTime<Utc>) -> String {
    match &window.resets_at {
        Some(reset) if reset.is_set() => format_eta_at(Some(reset), now),
        _ => NOT_STARTED.to_string(),
    }
}

//! Picks the window to display and the status label to show.
//!
//! The short window (5-hour / primary) is shown by default. The long
//! window (7-day / secondary) takes over once it passes 80%, and a long
//! window at 100% pauses everything.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::eta;
use crate::window::{UnusedRule, WindowSpec, WindowUsage};

/// Long-window utilization above which the long window is displayed.
pub const LONG_WINDOW_SWITCH_PCT: f64 = 80.0;
/// Long-window utilization at which the status becomes [`Status::Pause`].
pub const LONG_WINDOW_EXHAUSTED_PCT: f64 = 100.0;

/// Which of the two windows is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    Short,
    Long,
}

/// Status label shown instead of (or next to) the percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Normal in-progress usage.
    None,
    /// The active window is untouched.
    Ready,
    /// The long window is exhausted.
    Pause,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Ready => "Ready",
            Self::Pause => "Pause",
        }
    }
}

/// Styling tier for the displayed percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Low,
    Mid,
    High,
}

impl Severity {
    /// `< 50` is low, `< 80` is mid, anything else is high.
    pub fn from_pct(pct: i64) -> Self {
        if pct < 50 {
            Self::Low
        } else if pct < 80 {
            Self::Mid
        } else {
            Self::High
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Mid => "mid",
            Self::High => "high",
        }
    }
}

/// One window as seen by the classifier: the parsed usage, the raw JSON
/// it came from, and the [`WindowSpec`] used to parse it.
#[derive(Debug, Clone, Copy)]
pub struct WindowInput<'a> {
    pub usage: &'a WindowUsage,
    pub raw: Option<&'a Value>,
    pub spec: &'a WindowSpec,
}

/// Display names for the two windows (e.g. `5h` / `7d`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLabels {
    pub short: &'static str,
    pub long: &'static str,
}

/// Outcome of [`classify`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub active: WindowKind,
    /// Active window utilization rounded to the nearest integer.
    pub pct: i64,
    /// Active window reset label (ETA or "Not started").
    pub reset: String,
    /// Active window label.
    pub win: &'static str,
    pub status: Status,
    pub severity: Severity,
}

/// Rounds a utilization to a whole percentage, ties to even.
pub fn round_pct(utilization: f64) -> i64 {
    utilization.round_ties_even() as i64
}

/// Chooses the active window and derives its status.
///
/// `Pause` depends only on the long window, so forcing the short window
/// can display the short window while the status still reads `Pause`.
pub fn classify(
    short: WindowInput<'_>,
    long: WindowInput<'_>,
    labels: WindowLabels,
    force_short: bool,
    now: DateTime<Utc>,
) -> Classification {
    let long_exhausted = long.usage.utilization >= LONG_WINDOW_EXHAUSTED_PCT;

    let active = if force_short {
        WindowKind::Short
    } else if long_exhausted || long.usage.utilization > LONG_WINDOW_SWITCH_PCT {
        WindowKind::Long
    } else {
        WindowKind::Short
    };

    let (target, win) = match active {
        WindowKind::Short => (short, labels.short),
        WindowKind::Long => (long, labels.long),
    };

    let status = if long_exhausted {
        Status::Pause
    } else if is_unused(target, now) || target.usage.not_started() {
        Status::Ready
    } else {
        Status::None
    };

    let pct = round_pct(target.usage.utilization);
    Classification {
        active,
        pct,
        reset: eta::reset_label(target.usage, now),
        win,
        status,
        severity: Severity::from_pct(pct),
    }
}

/// True when a window with zero usage still has (within one second) its
/// full length left before resetting.
fn is_unused(window: WindowInput<'_>, now: DateTime<Utc>) -> bool {
    match window.spec.unused {
        UnusedRule::Nominal { length_secs } => {
            if window.usage.utilization != 0.0 {
                return false;
            }
            let Some(reset) = &window.usage.resets_at else {
                return false;
            };
            eta::seconds_until(reset, now).is_ok_and(|left| left >= length_secs - 1)
        }
        UnusedRule::RawFields {
            used_key,
            remaining_key,
            length_key,
        } => {
            let raw = window.raw.and_then(Value::as_object);
            // Missing keys default to zero; present but non-numeric ones
            // disqualify the window.
            let field = |key: &str| match raw.and_then(|o| o.get(key)) {
                None => Some(0.0),
                Some(v) => v.as_f64(),
            };
            let (Some(used), Some(left), Some(length)) =
                (field(used_key), field(remaining_key), field(length_key))
            else {
                return false;
            };
            used == 0.0 && left >= length - 1.0
        }
    }
}

//! Normalizes upstream usage windows into [`WindowUsage`].
//!
//! Claude reports `{"utilization": 42.0, "resets_at": "2025-..Z"}` while
//! ChatGPT reports `{"used_percent": 42, "reset_at": 1735689600, ...}`.
//! Both go through [`parse_window`], driven by a [`WindowSpec`] that names
//! the keys to read and how to tell an untouched window apart.

use serde_json::Value;

/// A reset timestamp exactly as the upstream sent it.
///
/// Interpreted only when formatted (see [`crate::eta`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResetAt {
    /// ISO-8601 string, optionally `Z`-suffixed.
    Iso(String),
    /// Seconds since the Unix epoch.
    Epoch(i64),
    /// Present but empty: `""`, `0` or `false`. The window still counts
    /// as started, yet there is nothing to count down to.
    Blank,
}

impl ResetAt {
    /// Reads a reset value from JSON. Only `null` is absent; empty values
    /// become [`ResetAt::Blank`].
    pub fn from_json(value: &Value) -> Option<Self> {
        let reset = match value {
            Value::Null => return None,
            Value::String(s) if s.is_empty() => Self::Blank,
            Value::String(s) => Self::Iso(s.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => Self::Blank,
            Value::Number(n) => {
                Self::Epoch(n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?)
            }
            Value::Bool(false) => Self::Blank,
            Value::Bool(true) => Self::Epoch(1),
            Value::Array(a) if a.is_empty() => Self::Blank,
            Value::Object(o) if o.is_empty() => Self::Blank,
            other => Self::Iso(other.to_string()),
        };
        Some(reset)
    }

    /// False for [`ResetAt::Blank`].
    pub fn is_set(&self) -> bool {
        !matches!(self, Self::Blank)
    }
}

/// Usage of one quota window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowUsage {
    /// Percentage used, nominally 0–100. Not clamped.
    pub utilization: f64,
    pub resets_at: Option<ResetAt>,
}

impl WindowUsage {
    /// A window with no usage and no reset scheduled.
    pub const EMPTY: Self = Self {
        utilization: 0.0,
        resets_at: None,
    };

    /// True when the window has never been touched: no usage and no reset.
    pub fn not_started(&self) -> bool {
        self.utilization == 0.0 && self.resets_at.is_none()
    }
}

/// How to decide that a window with zero usage has not been used since
/// its last full reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnusedRule {
    /// Compare the time left until reset with a fixed window length.
    Nominal { length_secs: i64 },
    /// Read the used percentage, seconds until reset and the window length
    /// straight from the raw window object.
    RawFields {
        used_key: &'static str,
        remaining_key: &'static str,
        length_key: &'static str,
    },
}

/// Keys and heuristics describing one upstream window shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSpec {
    pub utilization_key: &'static str,
    pub reset_key: &'static str,
    pub unused: UnusedRule,
}

impl WindowSpec {
    /// Windows reporting `utilization` as a 0–100 percentage with an
    /// ISO `resets_at`.
    pub const fn percent(length_secs: i64) -> Self {
        Self {
            utilization_key: "utilization",
            reset_key: "resets_at",
            unused: UnusedRule::Nominal { length_secs },
        }
    }

    /// Windows reporting `used_percent` directly with an epoch `reset_at`
    /// and their own window length.
    pub const fn direct() -> Self {
        Self {
            utilization_key: "used_percent",
            reset_key: "reset_at",
            unused: UnusedRule::RawFields {
                used_key: "used_percent",
                remaining_key: "reset_after_seconds",
                length_key: "limit_window_seconds",
            },
        }
    }
}

/// Parses one raw window. Never fails: missing or malformed fields fall
/// back to zero usage and no reset.
pub fn parse_window(raw: Option<&Value>, spec: &WindowSpec) -> WindowUsage {
    let Some(obj) = raw.and_then(Value::as_object) else {
        return WindowUsage::EMPTY;
    };

    let utilization = obj
        .get(spec.utilization_key)
        .and_then(numeric)
        .unwrap_or(0.0);
    let resets_at = obj.get(spec.reset_key).and_then(ResetAt::from_json);

    WindowUsage {
        utilization,
        resets_at,
    }
}

/// Reads a JSON number or numeric string as `f64`.
fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

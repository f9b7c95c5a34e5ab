//! Plain-text report for terminal use.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::eta;
use crate::provider::ProviderProfile;
use crate::window::{WindowUsage, parse_window};

/// How the two summary lines of [`plain_report`] are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStyle {
    /// `5-hour : 12.3%  (Reset in 1h30m)`. An untouched window reads
    /// "Not started".
    Parenthesized,
    /// `Primary   (Short):  12.3% | Reset in 1h30m`. A missing reset
    /// reads as the absent placeholder.
    Piped,
}

/// Pretty-printed upstream response followed by a two-line summary.
pub fn plain_report(usage: &Value, profile: &ProviderProfile, now: DateTime<Utc>) -> String {
    let raw = serde_json::to_string_pretty(usage).unwrap_or_else(|_| usage.to_string());
    let short = parse_window(profile.short_raw(usage), &profile.short_spec);
    let long = parse_window(profile.long_raw(usage), &profile.long_spec);

    let [short_label, long_label] = profile.summary_labels;
    format!(
        "{raw}\n{rule}\n{}\n{}",
        summary_line(profile.summary_style, short_label, &short, now),
        summary_line(profile.summary_style, long_label, &long, now),
        rule = "-".repeat(40),
    )
}

fn summary_line(style: SummaryStyle, label: &str, window: &WindowUsage, now: DateTime<Utc>) -> String {
    let eta = eta::format_eta_at(window.resets_at.as_ref(), now);
    match style {
        SummaryStyle::Parenthesized => {
            let reset = if window.not_started() {
                eta::NOT_STARTED.to_string()
            } else {
                eta
            };
            format!("{label}: {:.1}%  (Reset in {reset})", window.utilization)
        }
        SummaryStyle::Piped => format!("{label}: {:>5.1}% | Reset in {eta}", window.utilization),
    }
}

//! Waybar custom-module payloads.
//!
//! Waybar reads one JSON object per line from the module's stdout:
//! `{"text", "tooltip", "class", "alt", "percentage"}`.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::classify::{Classification, Status, WindowInput, classify, round_pct};
use crate::eta;
use crate::provider::{ProviderProfile, TIME_ICON};
use crate::template::{FieldValue, Fields, TemplateError, format_output};
use crate::window::parse_window;

/// Class used by the error card.
pub const ERROR_CLASS: &str = "critical";
const ERROR_COLOR: &str = "#ff5555";

/// User choices affecting the Waybar payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions<'a> {
    /// Template for `text`. Empty or `None` selects the built-in text.
    pub format: Option<&'a str>,
    /// Template for `tooltip`. Empty or `None` selects the built-in table.
    pub tooltip_format: Option<&'a str>,
    /// Always display the short window.
    pub show_short: bool,
}

/// A successful Waybar payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaybarOutput {
    pub text: String,
    pub tooltip: String,
    pub class: String,
    pub alt: String,
    pub percentage: i64,
}

/// Payload shown when fetching failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaybarError {
    pub text: String,
    pub tooltip: String,
    pub class: &'static str,
}

/// Template data plus the classification it was derived from.
#[derive(Debug, Clone)]
pub struct RenderData {
    pub fields: Fields,
    pub classification: Classification,
    short_utilization: f64,
    long_utilization: f64,
    short_reset: String,
    long_reset: String,
}

/// Parses both windows of an upstream response, classifies them and
/// builds the flat field mapping templates are expanded against.
pub fn build(
    usage: &Value,
    profile: &ProviderProfile,
    show_short: bool,
    now: DateTime<Utc>,
) -> RenderData {
    let short_raw = profile.short_raw(usage);
    let long_raw = profile.long_raw(usage);
    let short = parse_window(short_raw, &profile.short_spec);
    let long = parse_window(long_raw, &profile.long_spec);

    let classification = classify(
        WindowInput {
            usage: &short,
            raw: short_raw,
            spec: &profile.short_spec,
        },
        WindowInput {
            usage: &long,
            raw: long_raw,
            spec: &profile.long_spec,
        },
        profile.labels,
        show_short,
        now,
    );
    crate::log_debug!(
        "{}: active={:?} pct={} status={:?}",
        profile.key,
        classification.active,
        classification.pct,
        classification.status
    );

    let short_reset = eta::reset_label(&short, now);
    let long_reset = eta::reset_label(&long, now);

    let mut fields = Fields::new();
    let mut set = |key: &str, value: FieldValue| {
        fields.insert(key.to_string(), value);
    };
    set("5h_pct", round_pct(short.utilization).into());
    set("7d_pct", round_pct(long.utilization).into());
    set("5h_reset", short_reset.clone().into());
    set("7d_reset", long_reset.clone().into());
    set("icon", profile.styled(profile.icon).into());
    set("icon_plain", profile.icon.into());
    set("time_icon", profile.styled(TIME_ICON).into());
    set("time_icon_plain", TIME_ICON.into());
    set("status", classification.status.as_str().into());
    set("pct", classification.pct.into());
    set("reset", classification.reset.clone().into());
    set("win", classification.win.into());

    RenderData {
        fields,
        classification,
        short_utilization: short.utilization,
        long_utilization: long.utilization,
        short_reset,
        long_reset,
    }
}

/// Renders the Waybar payload for an upstream response.
///
/// Fails only when a user template references an unknown field.
pub fn render(
    usage: &Value,
    profile: &ProviderProfile,
    options: &RenderOptions<'_>,
    now: DateTime<Utc>,
) -> Result<WaybarOutput, TemplateError> {
    let data = build(usage, profile, options.show_short, now);
    let c = &data.classification;

    let text = match non_empty(options.format) {
        Some(format) => format_output(format, &data.fields)?,
        None => default_text(&data, profile),
    };
    let tooltip = match non_empty(options.tooltip_format) {
        Some(format) => format_output(format, &data.fields)?,
        None => default_tooltip(&data),
    };

    Ok(WaybarOutput {
        text,
        tooltip,
        class: format!("{}-{}", profile.key, c.severity.as_str()),
        alt: c.win.to_string(),
        percentage: c.pct,
    })
}

/// Builds the error card. Authentication failures get a distinct label.
pub fn error_card(profile: &ProviderProfile, message: &str, auth: bool) -> WaybarError {
    let short = if auth { "Auth Err" } else { "Net Err" };
    WaybarError {
        text: format!(
            "<span foreground='{ERROR_COLOR}'>{} {short}</span>",
            profile.icon
        ),
        tooltip: format!("{}:\n{message}", profile.error_heading),
        class: ERROR_CLASS,
    }
}

fn non_empty(format: Option<&str>) -> Option<&str> {
    format.filter(|f| !f.is_empty())
}

fn default_text(data: &RenderData, profile: &ProviderProfile) -> String {
    let icon = profile.styled(profile.icon);
    let c = &data.classification;
    match c.status {
        Status::Pause | Status::Ready => format!("{icon} {}", c.status.as_str()),
        Status::None => format!(
            "{icon} {}% {} {}",
            c.pct,
            profile.styled(TIME_ICON),
            c.reset
        ),
    }
}

fn default_tooltip(data: &RenderData) -> String {
    format!(
        "Window     Used    Reset\n\
         ━━━━━━━━━━━━━━━━━━━━━━━━\n\
         5-Hour     {:>3.0}%    {}\n\
         7-Day      {:>3.0}%    {}\n\
         \n\
         Click to Refresh",
        data.short_utilization, data.short_reset, data.long_utilization, data.long_reset
    )
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    use super::*;
    use crate::provider::Provider;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 9, 2, 18, 0, 0).unwrap()
    }

    fn iso_in(secs: i64) -> String {
        (now() + Duration::seconds(secs)).to_rfc3339()
    }

    #[test]
    fn high_long_window_drives_payload() {
        // Arrange
        let usage = json!({
            "five_hour": {"utilization": 0, "resets_at": null},
            "seven_day": {"utilization": 95.4, "resets_at": iso_in(18_000)},
        });
        let profile = Provider::Claude.profile();

        // Act
        let out = render(&usage, profile, &RenderOptions::default(), now()).unwrap();

        // Assert
        assert_eq!(out.class, "claude-high");
        assert_eq!(out.alt, "7d");
        assert_eq!(out.percentage, 95);
        assert_eq!(
            out.text,
            format!(
                "{} 95% {} 5h00m",
                profile.styled(profile.icon),
                profile.styled(TIME_ICON)
            )
        );
    }

    #[test]
    fn default_tooltip_lists_both_windows() {
        // Arrange
        let usage = json!({
            "five_hour": {"utilization": 7.6, "resets_at": iso_in(600)},
            "seven_day": null,
        });

        // Act
        let out = render(
            &usage,
            Provider::Claude.profile(),
            &RenderOptions::default(),
            now(),
        )
        .unwrap();

        // Assert
        assert_eq!(
            out.tooltip,
            "Window     Used    Reset\n\
             ━━━━━━━━━━━━━━━━━━━━━━━━\n\
             5-Hour       8%    10m00s\n\
             7-Day        0%    Not started\n\
             \n\
             Click to Refresh"
        );
    }

    #[test]
    fn ready_and_pause_replace_percentage_in_default_text() {
        let profile = Provider::Claude.profile();
        let icon = profile.styled(profile.icon);
        let ready = json!({"five_hour": {"utilization": 0}, "seven_day": {"utilization": 3}});
        let pause = json!({"five_hour": {"utilization": 3}, "seven_day": {"utilization": 100}});

        let ready = render(&ready, profile, &RenderOptions::default(), now()).unwrap();
        let pause = render(&pause, profile, &RenderOptions::default(), now()).unwrap();

        assert_eq!(ready.text, format!("{icon} Ready"));
        assert_eq!(pause.text, format!("{icon} Pause"));
    }

    #[test]
    fn custom_formats_use_field_mapping() {
        // Arrange
        let usage = json!({
            "rate_limit": {
                "primary_window": {"used_percent": 33, "reset_at": (now() + Duration::seconds(4_000)).timestamp()},
                "secondary_window": {"used_percent": 12, "reset_at": (now() + Duration::seconds(200_000)).timestamp()},
            }
        });
        let options = RenderOptions {
            format: Some("{icon_plain} {pct}% {win}"),
            tooltip_format: Some("{5h_pct}/{5h_reset} {7d_pct}/{7d_reset}{?status} {status}{/status}"),
            show_short: false,
        };

        // Act
        let out = render(&usage, Provider::Codex.profile(), &options, now()).unwrap();

        // Assert
        assert_eq!(out.text, "󰬫 33% Primary");
        assert_eq!(out.tooltip, "33/1h06m 12/2d07h");
        assert_eq!(out.class, "codex-low");
    }

    #[test]
    fn forced_short_window_reports_short_percentage_with_pause() {
        let usage = json!({
            "five_hour": {"utilization": 55.0, "resets_at": iso_in(900)},
            "seven_day": {"utilization": 100.0, "resets_at": iso_in(9_000)},
        });
        let options = RenderOptions {
            format: Some("{pct} {status}"),
            show_short: true,
            ..Default::default()
        };

        let out = render(&usage, Provider::Claude.profile(), &options, now()).unwrap();

        assert_eq!(out.text, "55 Pause");
        assert_eq!(out.alt, "5h");
        assert_eq!(out.percentage, 55);
        assert_eq!(out.class, "claude-mid");
    }

    #[test]
    fn empty_format_falls_back_to_default() {
        let usage = json!({"five_hour": {"utilization": 0}, "seven_day": {"utilization": 0}});
        let options = RenderOptions {
            format: Some(""),
            ..Default::default()
        };
        let profile = Provider::Claude.profile();

        let out = render(&usage, profile, &options, now()).unwrap();

        assert_eq!(out.text, format!("{} Ready", profile.styled(profile.icon)));
    }

    #[test]
    fn unknown_field_in_format_is_an_error() {
        let usage = json!({});
        let options = RenderOptions {
            format: Some("{five_hour}"),
            ..Default::default()
        };

        let err = render(&usage, Provider::Claude.profile(), &options, now()).unwrap_err();

        assert_eq!(err, TemplateError::UnknownField("five_hour".into()));
    }

    #[test]
    fn error_card_distinguishes_auth_failures() {
        // Arrange
        let profile = Provider::Codex.profile();

        // Act
        let auth = error_card(profile, "401 Unauthorized", true);
        let net = error_card(profile, "timed out", false);

        // Assert
        assert_eq!(auth.text, "<span foreground='#ff5555'>󰬫 Auth Err</span>");
        assert_eq!(net.text, "<span foreground='#ff5555'>󰬫 Net Err</span>");
        assert_eq!(net.tooltip, "Error:\ntimed out");
        assert_eq!(net.class, "critical");
    }

    #[test]
    fn error_headings_differ_per_provider() {
        // Act
        let claude = error_card(Provider::Claude.profile(), "boom", false);
        let codex = error_card(Provider::Codex.profile(), "boom", false);

        // Assert
        assert_eq!(claude.tooltip, "Error fetching Claude usage:\nboom");
        assert_eq!(codex.tooltip, "Error:\nboom");
    }

    #[test]
    fn payload_serializes_with_waybar_keys() {
        let out = WaybarOutput {
            text: "t".into(),
            tooltip: "tt".into(),
            class: "claude-low".into(),
            alt: "5h".into(),
            percentage: 4,
        };

        let json = serde_json::to_string(&out).unwrap();

        assert_eq!(
            json,
            r#"{"text":"t","tooltip":"tt","class":"claude-low","alt":"5h","percentage":4}"#
        );
    }
}

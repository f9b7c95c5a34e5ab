//! Static descriptions of the two supported upstreams.

use serde_json::Value;

use crate::classify::WindowLabels;
use crate::summary::SummaryStyle;
use crate::window::WindowSpec;

const FIVE_HOURS: i64 = 5 * 3_600;
const SEVEN_DAYS: i64 = 7 * 86_400;

/// A usage-quota upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    /// claude.ai
    Claude,
    /// chatgpt.com (Codex limits)
    Codex,
}

/// Everything about a provider that shapes parsing and rendering.
#[derive(Debug, Clone, Copy)]
pub struct ProviderProfile {
    /// Human name used in messages.
    pub name: &'static str,
    /// Config section and CSS class prefix.
    pub key: &'static str,
    /// Cookie domain.
    pub domain: &'static str,
    /// Nerd Font glyph for the service.
    pub icon: &'static str,
    /// Pango color for the icons.
    pub color: &'static str,
    pub labels: WindowLabels,
    /// Row labels used in the plain-text summary.
    pub summary_labels: [&'static str; 2],
    pub summary_style: SummaryStyle,
    /// JSON pointers to the short and long windows.
    pub short_pointer: &'static str,
    pub long_pointer: &'static str,
    pub short_spec: WindowSpec,
    pub long_spec: WindowSpec,
    /// First line of the Waybar error tooltip.
    pub error_heading: &'static str,
}

const CLAUDE: ProviderProfile = ProviderProfile {
    name: "Claude",
    key: "claude",
    domain: "claude.ai",
    icon: "󰜡",
    color: "#DE7356",
    labels: WindowLabels {
        short: "5h",
        long: "7d",
    },
    summary_labels: ["5-hour ", "7-day  "],
    summary_style: SummaryStyle::Parenthesized,
    short_pointer: "/five_hour",
    long_pointer: "/seven_day",
    short_spec: WindowSpec::percent(FIVE_HOURS),
    long_spec: WindowSpec::percent(SEVEN_DAYS),
    error_heading: "Error fetching Claude usage",
};

const CODEX: ProviderProfile = ProviderProfile {
    name: "Codex",
    key: "codex",
    domain: "chatgpt.com",
    icon: "󰬫",
    color: "#74AA9C",
    labels: WindowLabels {
        short: "Primary",
        long: "Secondary",
    },
    summary_labels: ["Primary   (Short)", "Secondary (Long) "],
    summary_style: SummaryStyle::Piped,
    short_pointer: "/rate_limit/primary_window",
    long_pointer: "/rate_limit/secondary_window",
    short_spec: WindowSpec::direct(),
    long_spec: WindowSpec::direct(),
    error_heading: "Error",
};

/// Shared clock glyph shown next to reset times.
pub const TIME_ICON: &str = "󰔚";

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::Claude, Provider::Codex];

    pub fn profile(self) -> &'static ProviderProfile {
        match self {
            Self::Claude => &CLAUDE,
            Self::Codex => &CODEX,
        }
    }
}

impl ProviderProfile {
    /// The raw short window in an upstream response, if present.
    pub fn short_raw<'a>(&self, usage: &'a Value) -> Option<&'a Value> {
        usage.pointer(self.short_pointer)
    }

    /// The raw long window in an upstream response, if present.
    pub fn long_raw<'a>(&self, usage: &'a Value) -> Option<&'a Value> {
        usage.pointer(self.long_pointer)
    }

    /// `<span>`-styled glyph for Waybar's Pango markup.
    pub fn styled(&self, glyph: &str) -> String {
        format!(
            "<span foreground='{}' size='large'>{glyph}</span>",
            self.color
        )
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn codex_windows_live_under_rate_limit() {
        // Arrange
        let usage = json!({"rate_limit": {"primary_window": {"used_percent": 4}}});
        let profile = Provider::Codex.profile();

        // Act / Assert
        assert_eq!(
            profile.short_raw(&usage),
            Some(&json!({"used_percent": 4}))
        );
        assert_eq!(profile.long_raw(&usage), None);
    }

    #[test]
    fn claude_windows_are_top_level() {
        let usage = json!({"five_hour": null, "seven_day": {"utilization": 1}});
        let profile = Provider::Claude.profile();

        assert_eq!(profile.short_raw(&usage), Some(&Value::Null));
        assert_eq!(profile.long_raw(&usage), Some(&json!({"utilization": 1})));
    }

    #[test]
    fn styled_icon_uses_provider_color() {
        let styled = Provider::Claude.profile().styled(TIME_ICON);

        assert_eq!(
            styled,
            "<span foreground='#DE7356' size='large'>󰔚</span>"
        );
    }
}

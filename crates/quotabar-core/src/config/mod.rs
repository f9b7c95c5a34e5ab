mod loader;
pub mod template;

use serde::{Deserialize, Serialize};

use crate::log::LogConfig;
use crate::provider::Provider;

pub use loader::{config_dir, config_path, load, try_load};

/// Top-level configuration for quotabar.
///
/// Loaded from `~/.config/quotabar/config.toml`. Missing sections
/// fall back to defaults thanks to `#[serde(default)]`. Command-line
/// flags take precedence over every value here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Browsers to read cookies from, in order. Empty = built-in order.
    pub browsers: Vec<String>,
    /// File logging.
    pub log: LogConfig,
    /// Claude widget defaults.
    pub claude: ProviderConfig,
    /// Codex widget defaults.
    pub codex: ProviderConfig,
}

/// Per-provider output defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Waybar text template. Empty = built-in text.
    pub format: String,
    /// Waybar tooltip template. Empty = built-in table.
    pub tooltip_format: String,
    /// Always show the short (5-hour) window.
    pub show_5h: bool,
}

impl Config {
    /// Normalizes user values: trims and lowercases browser names,
    /// drops blank ones, and clamps the log size to 1–100 MB.
    pub fn validate(&mut self) {
        self.browsers = self
            .browsers
            .iter()
            .map(|b| b.trim().to_ascii_lowercase())
            .filter(|b| !b.is_empty())
            .collect();
        self.log.max_file_mb = self.log.max_file_mb.clamp(1, 100);
    }

    /// Output defaults for one provider.
    pub fn provider(&self, provider: Provider) -> &ProviderConfig {
        match provider {
            Provider::Claude => &self.claude,
            Provider::Codex => &self.codex,
        }
    }
}

/// Generates the default `config.toml` contents with explanatory comments.
///
/// This is used by `quotabar init` to create a starter config file that
/// users can immediately edit.
pub fn generate_config() -> String {
    r##"# quotabar configuration
# Location: ~/.config/quotabar/config.toml
# Command-line flags override everything in this file.

# Browsers to read session cookies from, tried in order until one has
# cookies for the service. Leave empty for the built-in order:
# chrome, chromium, brave, edge, firefox
browsers = []

[log]
# Enable file logging to ~/.config/quotabar/logs/quotabar.log.
enabled = false
# Minimum log level: "debug", "info", "warn", or "error".
level = "info"
# Maximum log file size in MB before rotation.
max_file_mb = 10

# Waybar output for `quotabar claude --waybar`.
# Fields: {icon} {icon_plain} {time_icon} {time_icon_plain} {5h_pct}
# {7d_pct} {5h_reset} {7d_reset} {status} {pct} {reset} {win}
# Conditionals: {?5h_reset}...{/5h_reset} and {?5h_reset&7d_reset}...{/}
# show content only when every field is set and not "Not started".
# An empty string selects the built-in text or tooltip.
[claude]
format = ""
tooltip_format = ""
# Always show the 5-hour window instead of switching to 7-day above 80%.
show_5h = false

# Waybar output for `quotabar codex --waybar`. Same fields as above;
# {win} is "Primary" or "Secondary".
[codex]
format = ""
tooltip_format = ""
show_5h = false
"##
    .to_string()
}

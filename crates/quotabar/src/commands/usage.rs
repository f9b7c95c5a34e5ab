use chrono::Utc;
use clap::Args;
use serde_json::Value;

use quotabar_core::config::{self, ProviderConfig};
use quotabar_core::waybar::{self, RenderOptions};
use quotabar_core::{Provider, log, log_error, log_info, summary};
use quotabar_web::{FetchError, fetch_usage};

/// Arguments shared by the `claude` and `codex` subcommands.
#[derive(Args)]
pub struct UsageArgs {
    /// Print a Waybar custom-module JSON payload instead of a report
    #[arg(long)]
    waybar: bool,
    /// Browser to read cookies from; repeat to try several in order
    #[arg(long = "browser", value_name = "NAME")]
    browsers: Vec<String>,
    /// Template for the Waybar text, e.g. "{icon} {pct}%"
    #[arg(long, value_name = "STRING")]
    format: Option<String>,
    /// Template for the Waybar tooltip
    #[arg(long, value_name = "STRING")]
    tooltip_format: Option<String>,
    /// Always display the short (5-hour / primary) window
    #[arg(long = "show-5h")]
    show_5h: bool,
}

pub fn execute(provider: Provider, args: &UsageArgs) {
    let config = config::load();
    log::init(&config.log);

    let browsers = if args.browsers.is_empty() {
        &config.browsers
    } else {
        &args.browsers
    };
    let profile = provider.profile();
    log_info!(
        "{}: fetching (waybar={}, browsers={browsers:?})",
        profile.key,
        args.waybar
    );

    match fetch_usage(provider, browsers) {
        Ok(usage) if args.waybar => print_waybar(provider, &usage, args, config.provider(provider)),
        Ok(usage) => println!("{}", summary::plain_report(&usage, profile, Utc::now())),
        Err(e) => report_failure(provider, &e, args.waybar),
    }
}

fn print_waybar(provider: Provider, usage: &Value, args: &UsageArgs, defaults: &ProviderConfig) {
    let options = RenderOptions {
        format: Some(args.format.as_deref().unwrap_or(&defaults.format)),
        tooltip_format: Some(
            args.tooltip_format
                .as_deref()
                .unwrap_or(&defaults.tooltip_format),
        ),
        show_short: args.show_5h || defaults.show_5h,
    };

    let output = match waybar::render(usage, provider.profile(), &options, Utc::now()) {
        Ok(output) => output,
        Err(e) => critical(&e),
    };
    match serde_json::to_string(&output) {
        Ok(json) => println!("{json}"),
        Err(e) => critical(&e),
    }
}

/// Waybar mode keeps the module alive with an error card; plain mode
/// exits non-zero.
fn report_failure(provider: Provider, error: &FetchError, waybar_mode: bool) {
    log_error!("{}: {error}", provider.profile().key);
    if !waybar_mode {
        critical(error);
    }

    let card = waybar::error_card(provider.profile(), &error.to_string(), error.is_auth());
    match serde_json::to_string(&card) {
        Ok(json) => println!("{json}"),
        Err(e) => critical(&e),
    }
}

fn critical(error: &dyn std::fmt::Display) -> ! {
    eprintln!("[!] Critical Error: {error}");
    std::process::exit(1);
}

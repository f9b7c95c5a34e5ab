use quotabar_core::{Provider, config, log};
use quotabar_web::cookies::DEFAULT_BROWSERS;

/// ANSI escape helpers for doctor output.
const OK: &str = "\x1b[32m[ok]\x1b[0m";
const WARN: &str = "\x1b[33m[warn]\x1b[0m";
const FAIL: &str = "\x1b[31m[fail]\x1b[0m";

pub fn execute() {
    println!();
    check_config_dir();
    let config = check_config_file();
    check_logging(&config.log);
    check_browsers(&config.browsers);
    check_cookies();
    println!();
}

fn check_config_dir() {
    match config::config_dir() {
        Some(dir) if dir.is_dir() => {
            println!("  {OK} Config directory exists ({})", dir.display());
        }
        Some(dir) => {
            println!(
                "  {WARN} Config directory missing ({}); run `quotabar init`",
                dir.display()
            );
        }
        None => {
            println!("  {FAIL} Could not determine home directory");
        }
    }
}

fn check_config_file() -> config::Config {
    let Some(path) = config::config_path() else {
        println!("  {FAIL} Could not determine config path");
        return config::Config::default();
    };
    if !path.exists() {
        println!("  {WARN} config.toml not found (using defaults)");
        return config::Config::default();
    }
    match config::try_load() {
        Ok(config) => {
            println!("  {OK} config.toml is valid");
            config
        }
        Err(e) => {
            println!("  {FAIL} config.toml: {e}");
            config::Config::default()
        }
    }
}

fn check_logging(log_config: &log::LogConfig) {
    if !log_config.enabled {
        println!("  {OK} File logging disabled");
        return;
    }
    match log::log_path() {
        Some(path) => println!(
            "  {OK} Logging at level {} to {}",
            log_config.level,
            path.display()
        ),
        None => println!("  {WARN} Logging enabled but no log path could be determined"),
    }
}

fn check_browsers(names: &[String]) {
    if names.is_empty() {
        let order: Vec<&str> = DEFAULT_BROWSERS.iter().map(|b| b.name()).collect();
        println!("  {OK} Browser order: built-in ({})", order.join(", "));
        return;
    }
    let unknown: Vec<&str> = names
        .iter()
        .filter(|n| n.parse::<quotabar_web::Browser>().is_err())
        .map(String::as_str)
        .collect();
    if unknown.is_empty() {
        println!("  {OK} Browser order: {}", names.join(", "));
    } else {
        println!("  {FAIL} Unsupported browser(s) in config: {}", unknown.join(", "));
    }
}

/// Reports how many cookies each browser holds per provider domain.
/// Values are never printed.
fn check_cookies() {
    for browser in DEFAULT_BROWSERS {
        let source = browser.source();
        for provider in Provider::ALL {
            let domain = provider.profile().domain;
            match source.load(domain) {
                Ok(cookies) if cookies.is_empty() => {
                    println!("  {WARN} {browser}: no cookies for {domain}");
                }
                Ok(cookies) => {
                    println!("  {OK} {browser}: {} cookie(s) for {domain}", cookies.len());
                }
                Err(e) => println!("  {WARN} {browser}: {domain}: {e}"),
            }
        }
    }
}

//! Session cookies read from the user's own browser profiles.
//!
//! Each supported [`Browser`] maps to a [`CookieSource`]. Browsers are
//! tried in order and the first one that yields any cookie for the
//! domain wins; failures are collected into one diagnostic.

mod chromium;
mod crypto;
mod firefox;
mod sqlite;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use quotabar_core::{log_debug, log_info};

use crate::FetchError;

pub use chromium::ChromiumSource;
pub use firefox::FirefoxSource;

/// Cookie name to value.
pub type Cookies = BTreeMap<String, String>;

/// Something that can produce the cookies a browser holds for a domain.
pub trait CookieSource {
    /// Returns every cookie for `domain` and its subdomains. An empty map
    /// means the store was readable but had nothing for the domain.
    fn load(&self, domain: &str) -> Result<Cookies, String>;
}

/// Browsers with a cookie loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Browser {
    Chrome,
    Chromium,
    Brave,
    Edge,
    Firefox,
}

/// Search order when the user names no browser.
pub const DEFAULT_BROWSERS: [Browser; 5] = [
    Browser::Chrome,
    Browser::Chromium,
    Browser::Brave,
    Browser::Edge,
    Browser::Firefox,
];

impl Browser {
    pub fn name(self) -> &'static str {
        match self {
            Self::Chrome => "chrome",
            Self::Chromium => "chromium",
            Self::Brave => "brave",
            Self::Edge => "edge",
            Self::Firefox => "firefox",
        }
    }

    /// The loader for this browser's default profile location.
    pub fn source(self) -> Box<dyn CookieSource> {
        match self {
            Self::Chrome => Box::new(ChromiumSource::in_config_dir("google-chrome")),
            Self::Chromium => Box::new(ChromiumSource::in_config_dir("chromium")),
            Self::Brave => Box::new(ChromiumSource::in_config_dir("BraveSoftware/Brave-Browser")),
            Self::Edge => Box::new(ChromiumSource::in_config_dir("microsoft-edge")),
            Self::Firefox => Box::new(FirefoxSource::default_root()),
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Browser {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DEFAULT_BROWSERS
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("{s}: unsupported browser"))
    }
}

/// Loads cookies for `domain` from the first browser in `names` that has
/// any. An empty `names` list means [`DEFAULT_BROWSERS`].
pub fn load_cookies(domain: &str, names: &[String]) -> Result<(Cookies, Browser), FetchError> {
    load_cookies_with(domain, names, Browser::source)
}

/// Like [`load_cookies`] with a custom browser-to-source mapping.
pub fn load_cookies_with<F>(
    domain: &str,
    names: &[String],
    source_for: F,
) -> Result<(Cookies, Browser), FetchError>
where
    F: Fn(Browser) -> Box<dyn CookieSource>,
{
    let names: Vec<String> = if names.is_empty() {
        DEFAULT_BROWSERS.iter().map(|b| b.name().to_string()).collect()
    } else {
        names.to_vec()
    };

    let mut errors: Vec<String> = Vec::new();
    for name in &names {
        let browser = match name.parse::<Browser>() {
            Ok(b) => b,
            Err(e) => {
                errors.push(e);
                continue;
            }
        };

        log_debug!("reading {domain} cookies from {browser}");
        match source_for(browser).load(domain) {
            Ok(cookies) if !cookies.is_empty() => {
                log_info!("using {} {domain} cookies from {browser}", cookies.len());
                return Ok((cookies, browser));
            }
            Ok(_) => errors.push(format!("{browser}: no cookies found")),
            Err(e) => errors.push(format!("{browser}: {e}")),
        }
    }

    let detail = if errors.is_empty() {
        "no browsers provided".to_string()
    } else {
        errors.join("; ")
    };
    Err(FetchError::Cookies {
        domain: domain.to_string(),
        detail,
    })
}

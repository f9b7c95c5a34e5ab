//! Fetchers for the two upstream usage endpoints.

use quotabar_core::{Provider, log_debug};
use serde_json::Value;

use crate::FetchError;
use crate::cookies::{Cookies, load_cookies};
use crate::http::{client, get_json, with_retry};

const CLAUDE_ORG_COOKIE: &str = "lastActiveOrg";
const CLAUDE_ORG_HINT: &str = "Please refresh Claude page in browser or switch Organization.";
const CLAUDE_AUTH_HINT: &str = "Refresh the page in your browser to renew the session cookies.";
const CODEX_AUTH_HINT: &str = "Cloudflare blocked, check IP or refresh the page in your browser.";

/// Reads the provider's cookies from `browsers` and fetches its usage
/// report from the live endpoint.
pub fn fetch_usage(provider: Provider, browsers: &[String]) -> Result<Value, FetchError> {
    let profile = provider.profile();
    let (cookies, browser) = load_cookies(profile.domain, browsers)?;
    log_debug!("{}: {} cookies from {browser}", profile.key, cookies.len());

    let base = format!("https://{}", profile.domain);
    match provider {
        Provider::Claude => fetch_claude(&base, &cookies),
        Provider::Codex => fetch_codex(&base, &cookies),
    }
}

/// `GET {base}/api/organizations/{lastActiveOrg}/usage`.
pub fn fetch_claude(base: &str, cookies: &Cookies) -> Result<Value, FetchError> {
    let org = cookies
        .get(CLAUDE_ORG_COOKIE)
        .filter(|v| !v.is_empty())
        .ok_or(FetchError::MissingCookie {
            name: CLAUDE_ORG_COOKIE,
            hint: CLAUDE_ORG_HINT,
        })?;

    let url = format!("{base}/api/organizations/{org}/usage");
    let headers = [
        ("referer", "https://claude.ai/chats".to_string()),
        ("origin", "https://claude.ai".to_string()),
        ("accept", "application/json, text/plain, */*".to_string()),
    ];
    let client = client()?;
    with_retry("claude usage", || {
        get_json(&client, &url, cookies, &headers, CLAUDE_AUTH_HINT)
    })
}

/// Exchanges the session cookies for an access token, then
/// `GET {base}/backend-api/wham/usage` with it. Both requests are
/// repeated together on failure.
pub fn fetch_codex(base: &str, cookies: &Cookies) -> Result<Value, FetchError> {
    let session_url = format!("{base}/api/auth/session");
    let usage_url = format!("{base}/backend-api/wham/usage");
    let base_headers = [
        ("referer", "https://chatgpt.com/".to_string()),
        ("origin", "https://chatgpt.com".to_string()),
        ("accept", "*/*".to_string()),
    ];
    let client = client()?;

    with_retry("codex usage", || {
        let session = get_json(&client, &session_url, cookies, &base_headers, CODEX_AUTH_HINT)?;
        let token = session
            .get("accessToken")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty())
            .ok_or(FetchError::MissingToken)?;

        let mut headers = base_headers.to_vec();
        headers.push(("authorization", format!("Bearer {token}")));
        get_json(&client, &usage_url, cookies, &headers, CODEX_AUTH_HINT)
    })
}

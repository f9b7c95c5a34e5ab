//! Blocking HTTP helpers shared by the provider fetchers.
//!
//! With the default `impersonate` feature, requests go through `wreq` with
//! Chrome's TLS and HTTP/2 fingerprint, driven by a private current-thread
//! runtime. Without it, a plain blocking `reqwest` client is used.

use std::time::Duration;

use quotabar_core::log_warn;
use reqwest::StatusCode;
use reqwest::header::HeaderValue;
use serde_json::Value;

use crate::FetchError;
use crate::cookies::Cookies;

pub const TIMEOUT: Duration = Duration::from_secs(10);

#[cfg(not(feature = "impersonate"))]
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Attempts per fetch, including the first.
const ATTEMPTS: u32 = 2;

/// Status and body of a completed request.
struct Reply {
    status: StatusCode,
    body: String,
}

/// A client that presents itself like a desktop Chrome.
#[cfg(feature = "impersonate")]
pub struct HttpClient {
    client: wreq::Client,
    runtime: tokio::runtime::Runtime,
}

#[cfg(feature = "impersonate")]
impl HttpClient {
    fn get(&self, url: &str, headers: &[(&'static str, String)]) -> Result<Reply, FetchError> {
        self.runtime.block_on(async {
            let mut request = self.client.get(url);
            for (name, value) in headers {
                request = request.header(*name, value.as_str());
            }
            let resp = request.send().await?;
            let status = StatusCode::from_u16(resp.status().as_u16())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            let body = resp.text().await?;
            Ok::<_, FetchError>(Reply { status, body })
        })
    }
}

/// Builds the shared client.
#[cfg(feature = "impersonate")]
pub fn client() -> Result<HttpClient, FetchError> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(FetchError::Runtime)?;
    let client = wreq::Client::builder()
        .emulation(wreq_util::Emulation::Chrome131)
        .timeout(TIMEOUT)
        .build()?;
    Ok(HttpClient { client, runtime })
}

/// A client that presents itself like a desktop Chrome.
#[cfg(not(feature = "impersonate"))]
pub struct HttpClient {
    client: reqwest::blocking::Client,
}

#[cfg(not(feature = "impersonate"))]
impl HttpClient {
    fn get(&self, url: &str, headers: &[(&'static str, String)]) -> Result<Reply, FetchError> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, value.as_str());
        }
        let resp = request.send()?;
        let status = resp.status();
        let body = resp.text()?;
        Ok(Reply { status, body })
    }
}

/// Builds the shared client.
#[cfg(not(feature = "impersonate"))]
pub fn client() -> Result<HttpClient, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(HttpClient { client })
}

/// Renders a jar as a `Cookie` header value.
pub fn cookie_header(cookies: &Cookies) -> String {
    cookies
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// GETs `url` and decodes the body as JSON. Header names in `headers`
/// must be lowercase.
///
/// 401 and 403 become [`FetchError::Auth`] carrying `auth_hint`; any
/// other non-success status becomes [`FetchError::Status`].
pub fn get_json(
    client: &HttpClient,
    url: &str,
    cookies: &Cookies,
    headers: &[(&'static str, String)],
    auth_hint: &'static str,
) -> Result<Value, FetchError> {
    let mut sent = Vec::with_capacity(headers.len() + 1);
    if !cookies.is_empty() {
        sent.push(("cookie", cookie_header(cookies)));
    }
    sent.extend(headers.iter().cloned());
    sent.retain(|(_, value)| HeaderValue::from_str(value).is_ok());

    let reply = client.get(url, &sent)?;
    let status = reply.status;
    if status.as_u16() == 401 || status.as_u16() == 403 {
        return Err(FetchError::Auth {
            status,
            hint: auth_hint,
        });
    }
    if !status.is_success() {
        return Err(FetchError::Status {
            status,
            url: url.to_string(),
        });
    }

    Ok(serde_json::from_str(&reply.body)?)
}

/// Runs `f`, and once more if it fails. The second error is returned.
pub fn with_retry<T>(
    label: &str,
    mut f: impl FnMut() -> Result<T, FetchError>,
) -> Result<T, FetchError> {
    let mut attempt = 1;
    loop {
        match f() {
            Ok(v) => return Ok(v),
            Err(e) if attempt < ATTEMPTS => {
                log_warn!("{label} attempt {attempt} failed: {e}; retrying");
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

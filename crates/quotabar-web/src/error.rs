use reqwest::StatusCode;

/// Anything that can go wrong between reading cookies and decoding the
/// upstream usage report.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// No browser yielded cookies for the domain.
    #[error("Failed to read cookies for {domain}: {detail}")]
    Cookies { domain: String, detail: String },

    /// Cookies were found but a required one is missing.
    #[error("Missing '{name}' in cookies.\n{hint}")]
    MissingCookie {
        name: &'static str,
        hint: &'static str,
    },

    /// The session endpoint answered without an access token.
    #[error("accessToken not found in session response.")]
    MissingToken,

    /// HTTP 401 or 403.
    #[error("{status}: {hint}")]
    Auth {
        status: StatusCode,
        hint: &'static str,
    },

    /// Any other non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[cfg(feature = "impersonate")]
    #[error("Request failed: {0}")]
    Impersonated(#[from] wreq::Error),

    /// The runtime driving the impersonating client could not start.
    #[cfg(feature = "impersonate")]
    #[error("Cannot start HTTP runtime: {0}")]
    Runtime(std::io::Error),

    #[error("Invalid JSON response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// True for authentication failures, shown as "Auth Err" in Waybar.
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}

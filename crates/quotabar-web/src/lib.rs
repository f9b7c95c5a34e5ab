pub mod cookies;
mod error;
pub mod http;
pub mod provider;

#[cfg(test)]
mod test_server;

pub use cookies::{Browser, CookieSource, Cookies};
pub use error::FetchError;
pub use provider::fetch_usage;

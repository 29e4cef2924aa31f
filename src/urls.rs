//! URL construction for the local control server.
//!
//! The control server registers a wildcard DNS record: every
//! `*.spotilocal.com` name resolves to the loopback address. Clients are
//! expected to pick a fresh random subdomain so that browsers cannot
//! blanket-block the hostname. [`control_url`] reproduces that behavior
//! unless a fixed base URL is configured.

use url::Url;

use crate::{config::Config, error::Result};

/// Origin attached to every request and serving the OAuth token endpoint.
pub const DEFAULT_ORIGIN: &str = "https://open.spotify.com";

/// Port the local control server listens on.
pub const DEFAULT_PORT: u16 = 4381;

/// Number of random lowercase letters in a generated subdomain.
const SUBDOMAIN_LEN: usize = 10;

/// Generates a random `*.spotilocal.com` hostname.
#[must_use]
pub fn random_host() -> String {
    let sub: String = (0..SUBDOMAIN_LEN).map(|_| fastrand::lowercase()).collect();
    format!("{sub}.spotilocal.com")
}

/// Builds a control server URL for the given path fragment.
///
/// Uses the configured base URL when set, otherwise a freshly randomized
/// `*.spotilocal.com` host on the configured port.
///
/// # Errors
///
/// Returns [`Error::UrlParse`](crate::error::Error::UrlParse) if the
/// resulting URL is invalid.
pub fn control_url(config: &Config, path: &str) -> Result<Url> {
    let url = match &config.base_url {
        Some(base) => base.join(path)?,
        None => Url::parse(&format!(
            "http://{}:{}{path}",
            random_host(),
            config.port
        ))?,
    };

    Ok(url)
}

/// Builds the URL of the OAuth token endpoint on the configured origin.
///
/// # Errors
///
/// Returns [`Error::UrlParse`](crate::error::Error::UrlParse) if the
/// origin cannot be joined with the token path.
pub fn token_url(config: &Config) -> Result<Url> {
    config.origin.join("/token").map_err(Into::into)
}

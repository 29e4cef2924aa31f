use std::fmt;

use crate::error::{Error, Result};

/// The token pair obtained by the two-step connection handshake.
///
/// Holding a `Tokens` value is proof that both handshake calls succeeded;
/// the session stores `Option<Tokens>` and treats `Some` as connected.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tokens {
    oauth: String,
    csrf: String,
}

impl Tokens {
    /// Validates and stores the token pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidToken`] if either token is empty.
    pub fn new(oauth: &str, csrf: &str) -> Result<Self> {
        if oauth.is_empty() {
            return Err(Error::InvalidToken("oauth token is empty".to_string()));
        }
        if csrf.is_empty() {
            return Err(Error::InvalidToken("csrf token is empty".to_string()));
        }

        Ok(Self {
            oauth: oauth.to_owned(),
            csrf: csrf.to_owned(),
        })
    }

    #[must_use]
    pub fn oauth(&self) -> &str {
        &self.oauth
    }

    #[must_use]
    pub fn csrf(&self) -> &str {
        &self.csrf
    }

    /// The query parameters every authenticated control call carries.
    #[must_use]
    pub fn query_pairs(&self) -> [(&'static str, String); 2] {
        [
            ("oauth", self.oauth.clone()),
            ("csrf", self.csrf.clone()),
        ]
    }
}

impl fmt::Display for Tokens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "oauth={}; csrf={}", self.oauth, self.csrf)
    }
}

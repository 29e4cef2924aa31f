//! Wire formats of the local control server.
//!
//! Only the handshake endpoints have a stable shape worth typing. Status
//! and version payloads are forwarded as raw [`serde_json::Value`]s: the
//! server's status schema varies between client versions and downstream
//! consumers get the body verbatim.

use serde::Deserialize;

/// Response of `GET {origin}/token`.
#[derive(Clone, Debug, Deserialize)]
pub struct OauthToken {
    /// The token itself.
    pub t: String,
}

/// Response of `GET /simplecsrf/token.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct CsrfToken {
    pub token: String,
}

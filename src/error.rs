//! Error handling for spotilocal.
//!
//! Every fallible operation in this crate returns [`Result`]. The variants
//! mirror the failure modes of the local control server protocol:
//!
//! * [`Error::NotConnected`] - a control call was issued before the
//!   two-token handshake completed
//! * [`Error::Transport`] - any network-level failure
//! * [`Error::Decode`] - a response body that is not the JSON we expect
//!
//! No retries are performed anywhere: a failure propagates to the caller
//! (synchronous calls) or terminates the status poller (background calls,
//! observable at [`PollerHandle::join`](crate::poller::PollerHandle::join)).

use thiserror::Error;

/// Errors raised by session control calls and the status poller.
#[derive(Error, Debug)]
pub enum Error {
    /// A control call was issued before `connect()` succeeded.
    #[error("not connected: call connect() before issuing control calls")]
    NotConnected,

    /// Network-level failure while talking to the control server.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The control server returned a body that is not valid JSON.
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// A token endpoint returned an empty or otherwise unusable token.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// A generated or configured URL failed to parse.
    #[error("parsing url failed: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The poller task panicked or was aborted before completing.
    #[error("poller task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// The OS input-injection backend could not be initialized.
    #[error("input backend unavailable: {0}")]
    InputBackend(#[from] enigo::NewConError),

    /// Injecting a media key press failed.
    #[error("media key injection failed: {0}")]
    Input(#[from] enigo::InputError),
}

/// Standard result type for spotilocal operations.
pub type Result<T> = std::result::Result<T, Error>;

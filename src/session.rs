use serde_json::Value;
use url::Url;

use crate::{
    config::Config,
    error::{Error, Result},
    events::Dispatcher,
    http,
    keys::{self, MediaKey},
    poller::{PollerHandle, StatusPoller},
    protocol, tokens, urls,
};

/// A control session against the local Spotify client.
///
/// Construct with [`Session::new`], then call [`connect`](Session::connect)
/// before issuing control calls. Register status callbacks on
/// [`on_status_change`](Session::on_status_change) before starting
/// [`listen_for_events`](Session::listen_for_events), and tear everything
/// down with [`disconnect`](Session::disconnect).
pub struct Session {
    config: Config,
    client: http::Client,

    /// `Some` after a successful handshake; `None` means not connected.
    tokens: Option<tokens::Tokens>,

    poller: Option<PollerHandle>,

    /// Callbacks invoked for every status payload the poller receives.
    ///
    /// Register before calling `listen_for_events`; the poller takes
    /// ownership of the registered callbacks when it starts.
    pub on_status_change: Dispatcher,
}

impl Session {
    /// Creates a disconnected session.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be built.
    pub fn new(config: Config) -> Result<Self> {
        let client = http::Client::new(&config)?;

        Ok(Self {
            config,
            client,
            tokens: None,
            poller: None,
            on_status_change: Dispatcher::default(),
        })
    }

    /// Performs the two-step handshake: OAuth token, then CSRF token.
    ///
    /// No retries; a failure on either endpoint propagates and the session
    /// stays disconnected.
    ///
    /// # Errors
    ///
    /// Returns error on any transport or decode failure, or when either
    /// endpoint returns an empty token.
    pub async fn connect(&mut self) -> Result<()> {
        let oauth = self.oauth_token().await?;
        let csrf = self.csrf_token().await?;

        self.tokens = Some(tokens::Tokens::new(&oauth, &csrf)?);
        info!("connected to local control server");

        Ok(())
    }

    /// Stops the poller, if any, waits for it to terminate, and drops the
    /// token pair.
    ///
    /// # Errors
    ///
    /// Returns the error that terminated the poller task, if it failed.
    pub async fn disconnect(&mut self) -> Result<()> {
        let result = match self.poller.take() {
            Some(handle) => {
                handle.stop();
                handle.join().await
            }
            None => Ok(()),
        };

        self.tokens = None;
        debug!("disconnected");

        result
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.tokens.is_some()
    }

    /// The token pair from the handshake, if connected.
    #[must_use]
    pub fn tokens(&self) -> Option<&tokens::Tokens> {
        self.tokens.as_ref()
    }

    /// Whether a status poller has been started and not yet stopped.
    #[must_use]
    pub fn is_polling(&self) -> bool {
        self.poller.as_ref().is_some_and(PollerHandle::is_running)
    }

    /// Version information of the local client. Does not require a
    /// handshake.
    ///
    /// # Errors
    ///
    /// Returns error on any transport or decode failure.
    pub async fn version(&self) -> Result<Value> {
        let url = urls::control_url(&self.config, "/service/version.json")?;
        self.client
            .get_json(url, &[("service", "remote".to_string())])
            .await
    }

    /// Current state of the local client, returned verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before a successful handshake, or
    /// any transport/decode failure.
    pub async fn get_current_status(&self) -> Result<Value> {
        let (url, params) = self.control_call("/remote/status.json")?;
        self.client.get_json(url, &params).await
    }

    /// Pauses (`true`) or resumes (`false`) playback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before a successful handshake, or
    /// any transport/decode failure.
    pub async fn pause(&self, pause: bool) -> Result<()> {
        let (url, mut params) = self.control_call("/remote/pause.json")?;
        params.push(("pause", pause.to_string()));

        self.client.get_json(url, &params).await?;
        Ok(())
    }

    /// Resumes playback. Equivalent to `pause(false)`.
    ///
    /// # Errors
    ///
    /// See [`pause`](Session::pause).
    pub async fn unpause(&self) -> Result<()> {
        self.pause(false).await
    }

    /// Plays a Spotify URI, for example `spotify:track:5Yn8WCB4Dqm8snemB5Mu4K`.
    ///
    /// The URI doubles as its own playback context.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before a successful handshake, or
    /// any transport/decode failure.
    pub async fn play_uri(&self, uri: &str) -> Result<Value> {
        let (url, mut params) = self.control_call("/remote/play.json")?;
        params.push(("uri", uri.to_string()));
        params.push(("context", uri.to_string()));

        self.client.get_json(url, &params).await
    }

    /// Skips to the next track by injecting a media key press.
    ///
    /// # Errors
    ///
    /// Returns error if key injection fails.
    pub fn skip(&self) -> Result<()> {
        keys::send(MediaKey::NextTrack)
    }

    /// Returns to the beginning of the track, or to the previous track
    /// when pressed twice, by injecting a media key press.
    ///
    /// # Errors
    ///
    /// Returns error if key injection fails.
    pub fn previous(&self) -> Result<()> {
        keys::send(MediaKey::PreviousTrack)
    }

    /// Starts the background status poller. Non-blocking.
    ///
    /// Moves the session's registered callbacks into the poller task;
    /// callbacks registered after this call will not be invoked until a
    /// future poller is started with them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotConnected`] before a successful handshake, or
    /// an error if the poller could not be constructed.
    pub fn listen_for_events(&mut self, wait: Option<u64>) -> Result<()> {
        let (url, params) = self.control_call("/remote/status.json")?;

        let dispatcher = std::mem::take(&mut self.on_status_change);
        let wait = wait.unwrap_or(self.config.wait);

        let poller = StatusPoller::new(&self.config, url, params, wait, dispatcher)?;
        self.poller = Some(poller.start());

        Ok(())
    }

    /// Checks the connection and prepares URL plus authenticated query
    /// parameters for a control endpoint.
    fn control_call(&self, path: &str) -> Result<(Url, Vec<(&'static str, String)>)> {
        let tokens = self.tokens.as_ref().ok_or(Error::NotConnected)?;
        let url = urls::control_url(&self.config, path)?;

        Ok((url, tokens.query_pairs().to_vec()))
    }

    async fn oauth_token(&self) -> Result<String> {
        let url = urls::token_url(&self.config)?;
        let response = self.client.get_json(url, &[]).await?;
        let token: protocol::OauthToken = serde_json::from_value(response)?;

        Ok(token.t)
    }

    async fn csrf_token(&self) -> Result<String> {
        let url = urls::control_url(&self.config, "/simplecsrf/token.json")?;
        let response = self.client.get_json(url, &[]).await?;
        let token: protocol::CsrfToken = serde_json::from_value(response)?;

        Ok(token.token)
    }
}

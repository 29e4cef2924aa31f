//! Background long-polling of the status endpoint.
//!
//! The poller runs as its own tokio task and repeats one iteration until
//! told to stop: issue a long-poll GET against `/remote/status.json`,
//! decode the JSON body, hand it to every registered callback in order,
//! then re-check the running flag. The long poll blocks inside the task
//! for up to `wait` seconds per iteration and never blocks the caller.
//!
//! Cancellation is cooperative only: [`PollerHandle::stop`] does not
//! interrupt an in-flight request. The task observes the flag after the
//! current iteration's callbacks have run, so shutdown latency is bounded
//! by the long-poll timeout, not by when the flag was set.
//!
//! A transport or decode error in any iteration is not caught. It ends
//! the task, and [`PollerHandle::join`] is the only place the failure
//! surfaces. No automatic restart is attempted.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use url::Url;

use crate::{
    config::Config,
    error::Result,
    events::Dispatcher,
    http,
};

/// Transitions the status endpoint is asked to return on.
const RETURN_ON: &str = "login,logout,play,pause,error,ap";

/// A status poller, ready to be spawned.
///
/// Owns a private HTTP client: the poller's connections are never shared
/// with the control session that created it.
pub struct StatusPoller {
    client: http::Client,
    url: Url,
    params: Vec<(&'static str, String)>,
    wait: u64,
    dispatcher: Dispatcher,
}

/// Handle to a running poller task.
///
/// The owning session keeps this around to request shutdown and to await
/// task termination. Dropping the handle aborts the task without joining.
pub struct PollerHandle {
    running: Arc<AtomicBool>,
    task: tokio::task::JoinHandle<Result<()>>,
}

impl StatusPoller {
    /// Creates a poller for the given status URL and authentication
    /// parameters.
    ///
    /// # Errors
    ///
    /// Returns error if the poller's HTTP client cannot be built.
    pub fn new(
        config: &Config,
        url: Url,
        params: Vec<(&'static str, String)>,
        wait: u64,
        dispatcher: Dispatcher,
    ) -> Result<Self> {
        Ok(Self {
            client: http::Client::new(config)?,
            url,
            params,
            wait,
            dispatcher,
        })
    }

    /// Spawns the polling task and returns its handle.
    #[must_use]
    pub fn start(mut self) -> PollerHandle {
        let running = Arc::new(AtomicBool::new(true));
        let flag = Arc::clone(&running);

        debug!(
            "starting status poller: wait={}s, {} callback(s)",
            self.wait,
            self.dispatcher.len()
        );

        let task = tokio::spawn(async move {
            loop {
                let mut params = self.params.clone();
                params.push(("returnon", RETURN_ON.to_string()));
                params.push(("returnafter", self.wait.to_string()));

                // Errors terminate the task here; the owner sees them
                // when joining the handle.
                let payload = self.client.get_json(self.url.clone(), &params).await?;

                self.dispatcher.dispatch(&payload);

                // The flag is only consulted after the iteration's
                // callbacks have run, even if it was cleared mid-poll.
                if !flag.load(Ordering::Acquire) {
                    debug!("status poller stopping");
                    break;
                }
            }

            Ok(())
        });

        PollerHandle { running, task }
    }
}

impl PollerHandle {
    /// Requests cooperative shutdown.
    ///
    /// The in-flight long poll is not interrupted; the task exits after
    /// the current iteration completes and its callbacks have run.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Whether shutdown has been requested.
    ///
    /// This reflects the flag, not the task: the task may still be
    /// finishing its current iteration after this returns `false`.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    /// Waits for the poller task to terminate.
    ///
    /// # Errors
    ///
    /// Returns the error that terminated the task, if any, or
    /// [`Error::Join`](crate::error::Error::Join) if the task panicked.
    pub async fn join(mut self) -> Result<()> {
        (&mut self.task).await?
    }
}

impl Drop for PollerHandle {
    fn drop(&mut self) {
        // Best effort: a handle dropped without `join` should not leave
        // the task long-polling forever.
        if !self.task.is_finished() {
            self.task.abort();
        }
    }
}

//! Callback dispatch for poller-delivered status payloads.
//!
//! A [`Dispatcher`] holds an ordered list of callbacks and invokes every
//! one of them, in registration order, for each payload the status poller
//! receives. Registration reads like the original control clients:
//!
//! ```rust
//! use spotilocal::events::Dispatcher;
//!
//! let mut on_status_change = Dispatcher::default();
//! on_status_change += |status: &serde_json::Value| {
//!     println!("status: {status}");
//! };
//! ```
//!
//! # Thread affinity
//!
//! Register all callbacks before starting the poller. The poller takes
//! ownership of the dispatcher and invokes callbacks strictly sequentially
//! from its own task; no synchronization is provided for registering while
//! polling is active.

use std::{fmt, ops::AddAssign};

use serde_json::Value;

/// A registered status callback.
pub type Callback = Box<dyn FnMut(&Value) + Send>;

/// Ordered collection of status callbacks.
#[derive(Default)]
pub struct Dispatcher {
    callbacks: Vec<Callback>,
}

impl Dispatcher {
    /// Appends a callback. Callbacks run in registration order.
    pub fn register<F>(&mut self, callback: F)
    where
        F: FnMut(&Value) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Invokes every registered callback with the payload, in order.
    ///
    /// Heartbeat responses are not distinguished from genuine status
    /// changes; whatever the server returned is handed to each callback.
    pub fn dispatch(&mut self, payload: &Value) {
        for callback in &mut self.callbacks {
            callback(payload);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }
}

impl<F> AddAssign<F> for Dispatcher
where
    F: FnMut(&Value) + Send + 'static,
{
    fn add_assign(&mut self, callback: F) {
        self.register(callback);
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

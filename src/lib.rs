//! Client library for the local Spotify control server.
//!
//! Talks to the embedded HTTP control server every desktop client runs on
//! port 4381, reachable through randomized `*.spotilocal.com` hostnames.
//! Control calls require a two-step token handshake; status changes are
//! observed through a background long-polling worker that forwards every
//! decoded payload to registered callbacks.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

#[macro_use]
extern crate log;

pub mod config;
pub mod error;
pub mod events;
pub mod http;
pub mod keys;
pub mod poller;
pub mod protocol;
pub mod session;
pub mod tokens;
pub mod urls;

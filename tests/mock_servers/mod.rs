//! Mock local control server for integration testing.
//!
//! Simulates the embedded HTTP control server: token handshake endpoints,
//! control endpoints, and the long-polling status endpoint.

pub mod control;

pub use control::MockControlServer;

//! # wsrelay
//!
//! `wsrelay` is a minimal real-time message relay built on WebSockets.
//! Every text message a client sends is prefixed and rebroadcast to all
//! currently connected clients, the sender included. There is no
//! authentication, persistence or routing beyond "fan out to everyone".
//!
//! ## Core Modules
//!
//! - `registry`: The synchronized set of open connections.
//! - `broadcast`: Fans a message out to a snapshot of the registry.
//! - `transport`: HTTP routes, the `/ws` upgrade and the per-connection loop.
//! - `config`: Loads settings from an optional file and the environment.
//! - `utils`: Error type and logging setup.

pub mod broadcast;
pub mod config;
pub mod registry;
pub mod transport;
pub mod utils;

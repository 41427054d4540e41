//! The `broadcast` module fans a message out to every open connection.

pub mod broadcaster;
pub mod message;

pub use broadcaster::{BroadcastReport, Broadcaster};
pub use message::RelayMessage;

#[cfg(test)]
mod tests;

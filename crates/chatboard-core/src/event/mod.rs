//! Event bus for broadcasting server events to every connected socket.
//!
//! Provides an `EventBus` that distributes `ServerEvent` messages to all
//! subscribers via a `tokio::sync::broadcast` channel.

pub mod bus;

pub use bus::EventBus;

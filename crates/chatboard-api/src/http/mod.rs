//! HTTP and WebSocket layer for Chatboard.
//!
//! Axum-based REST API at `/api/v1/`, the socket endpoint at `/ws`, and
//! static serving of the web client.

pub mod error;
pub mod handlers;
pub mod response;
pub mod router;

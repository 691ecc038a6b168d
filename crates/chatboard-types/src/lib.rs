//! Shared domain types for Chatboard.
//!
//! This crate contains the domain types used across the comment board:
//! comments, socket events, the cached news payload, configuration, and
//! their associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod comment;
pub mod config;
pub mod error;
pub mod event;
pub mod news;

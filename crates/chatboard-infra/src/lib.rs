//! Infrastructure layer for Chatboard.
//!
//! Contains implementations of the ports defined in `chatboard-core`:
//! SQLite comment storage, the JSON news cache file, the GNews HTTP fetcher,
//! plus configuration loading and data-directory resolution.

pub mod config;
pub mod filesystem;
pub mod news;
pub mod sqlite;

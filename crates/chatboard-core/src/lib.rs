//! Business logic and repository trait definitions for Chatboard.
//!
//! This crate defines the "ports" (repository, cache, and fetcher traits) that
//! the infrastructure layer implements. It depends only on `chatboard-types` --
//! never on `chatboard-infra` or any database/IO crate.

pub mod comment;
pub mod event;
pub mod news;
pub mod presence;
pub mod repository;

//! HTTP request handlers for the REST API and the socket endpoint.

pub mod comment;
pub mod news;
pub mod ws;

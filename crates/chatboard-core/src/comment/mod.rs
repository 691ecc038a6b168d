//! Comment board logic: validated submission, tab queries, and the socket
//! event hub that ties comments, presence, and broadcasts together.

pub mod hub;
pub mod service;

#[cfg(test)]
pub(crate) mod mock;

pub use hub::CommentHub;
pub use service::CommentService;

//! Socket event types.
//!
//! Every frame on the WebSocket is a JSON object `{"event": <name>, "data": <payload>}`.
//! Incoming event names are accepted with either underscores or spaces
//! (`get_comments` and `get comments` are the same event). Outgoing frames use
//! the channel names browsers listen on (`new comment`, `old comments`, ...).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::comment::CommentView;
use crate::error::ValidationError;

/// Raw incoming frame before dispatch.
#[derive(Debug, Clone, Deserialize)]
pub struct SocketFrame {
    pub event: String,
    #[serde(default)]
    pub data: Value,
}

/// An event sent by a client.
///
/// Comment payloads stay as raw JSON here; they are validated by
/// `NewComment::from_payload` / `TabQuery::from_payload` when handled.
#[derive(Debug, Clone, PartialEq)]
pub enum ClientEvent {
    UserLogin { name: Option<String> },
    NewComment(Value),
    GetComments(Value),
    UserDisconnect,
    Ping,
}

impl ClientEvent {
    /// Parse a text frame into a client event.
    pub fn parse(text: &str) -> Result<Self, ValidationError> {
        let frame: SocketFrame =
            serde_json::from_str(text).map_err(|e| ValidationError::Malformed(e.to_string()))?;
        Self::from_frame(frame)
    }

    /// Dispatch a decoded frame on its event name.
    pub fn from_frame(frame: SocketFrame) -> Result<Self, ValidationError> {
        let name = frame.event.trim().replace(' ', "_");
        match name.as_str() {
            "user_login" => Ok(ClientEvent::UserLogin {
                name: frame
                    .data
                    .get("name")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
            }),
            "new_comment" => Ok(ClientEvent::NewComment(frame.data)),
            "get_comments" => Ok(ClientEvent::GetComments(frame.data)),
            "user_disconnect" => Ok(ClientEvent::UserDisconnect),
            "ping" => Ok(ClientEvent::Ping),
            _ => Err(ValidationError::UnknownEvent(frame.event)),
        }
    }

    /// Canonical event name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            ClientEvent::UserLogin { .. } => "user_login",
            ClientEvent::NewComment(_) => "new_comment",
            ClientEvent::GetComments(_) => "get_comments",
            ClientEvent::UserDisconnect => "user_disconnect",
            ClientEvent::Ping => "ping",
        }
    }
}

/// An event sent by the server, either to every client or to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerEvent {
    /// A newly stored comment, broadcast to all clients.
    #[serde(rename = "new comment")]
    NewComment(CommentView),

    /// Stored comments for one tab, sent to the requesting client.
    #[serde(rename = "old comments")]
    OldComments { comments: Vec<CommentView> },

    /// Number of connected, logged-in clients.
    #[serde(rename = "presence")]
    Presence { online: usize },

    /// A request from this client failed.
    #[serde(rename = "error")]
    Error { message: String },

    #[serde(rename = "pong")]
    Pong,
}

impl ServerEvent {
    /// The channel name this event is emitted on.
    pub fn channel(&self) -> &'static str {
        match self {
            ServerEvent::NewComment(_) => "new comment",
            ServerEvent::OldComments { .. } => "old comments",
            ServerEvent::Presence { .. } => "presence",
            ServerEvent::Error { .. } => "error",
            ServerEvent::Pong => "pong",
        }
    }
}

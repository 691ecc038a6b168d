//! Comment domain types and payload validation.
//!
//! Socket clients send loosely-typed JSON. `NewComment::from_payload` and
//! `TabQuery::from_payload` turn that JSON into typed values, rejecting
//! payloads whose `text` or `tab` are not strings. A missing or non-string
//! `name` is replaced by a default instead of failing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::ValidationError;

/// Display name used when a submission carries no usable `name`.
pub const DEFAULT_COMMENT_NAME: &str = "Anonymous";

/// A persisted comment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// UUIDv7 comment ID (time-sortable).
    pub id: Uuid,
    pub text: String,
    pub name: String,
    /// The tab (conversation partition) this comment belongs to.
    pub tab: String,
    /// Server-assigned creation time.
    pub time: DateTime<Utc>,
}

impl Comment {
    /// Build a comment from a validated submission, stamping id and time.
    pub fn from_new(new: NewComment, time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::now_v7(),
            text: new.text,
            name: new.name,
            tab: new.tab,
            time,
        }
    }

    /// The client-facing projection of this comment.
    pub fn view(&self) -> CommentView {
        CommentView {
            text: self.text.clone(),
            name: self.name.clone(),
            tab: self.tab.clone(),
            time: self.time,
        }
    }
}

/// Comment shape sent to socket and HTTP clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentView {
    pub text: String,
    pub name: String,
    pub tab: String,
    pub time: DateTime<Utc>,
}

/// A validated comment submission, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub text: String,
    pub name: String,
    pub tab: String,
}

impl NewComment {
    /// Validate a raw `{text, name?, tab}` payload.
    pub fn from_payload(payload: &Value, default_name: &str) -> Result<Self, ValidationError> {
        let obj = as_object(payload)?;
        let text = required_string(obj, "text")?;
        let tab = required_string(obj, "tab")?;
        let name = match obj.get("name") {
            Some(Value::String(name)) => name.clone(),
            _ => default_name.to_string(),
        };

        Ok(Self { text, name, tab })
    }
}

/// A validated `{tab}` lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabQuery {
    pub tab: String,
}

impl TabQuery {
    pub fn from_payload(payload: &Value) -> Result<Self, ValidationError> {
        let obj = as_object(payload)?;
        Ok(Self {
            tab: required_string(obj, "tab")?,
        })
    }
}

fn as_object(payload: &Value) -> Result<&Map<String, Value>, ValidationError> {
    payload.as_object().ok_or(ValidationError::NotAnObject)
}

fn required_string(obj: &Map<String, Value>, field: &'static str) -> Result<String, ValidationError> {
    match obj.get(field) {
        None => Err(ValidationError::MissingField(field)),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(ValidationError::InvalidType {
            field,
            expected: "string",
        }),
    }
}

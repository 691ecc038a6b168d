//! Socket event hub.
//!
//! `CommentHub::handle` is the event-name -> handler dispatch for one
//! connection. Events meant for every client (new comments, presence
//! changes) are published on the [`EventBus`]; a reply meant only for the
//! sender is returned to the caller.

use chatboard_types::comment::{Comment, NewComment};
use chatboard_types::error::CommentError;
use chatboard_types::event::{ClientEvent, ServerEvent};
use tracing::info;
use uuid::Uuid;

use crate::comment::service::CommentService;
use crate::event::EventBus;
use crate::presence::PresenceTracker;
use crate::repository::comment::CommentRepository;

pub struct CommentHub<R: CommentRepository> {
    comments: CommentService<R>,
    presence: PresenceTracker,
    bus: EventBus,
}

impl<R: CommentRepository> CommentHub<R> {
    pub fn new(comments: CommentService<R>, bus: EventBus) -> Self {
        Self {
            comments,
            presence: PresenceTracker::new(),
            bus,
        }
    }

    pub fn comments(&self) -> &CommentService<R> {
        &self.comments
    }

    pub fn presence(&self) -> &PresenceTracker {
        &self.presence
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Handle one event from `connection_id`.
    ///
    /// Returns the event to send back to that connection only, if any.
    pub async fn handle(
        &self,
        connection_id: Uuid,
        event: ClientEvent,
    ) -> Result<Option<ServerEvent>, CommentError> {
        match event {
            ClientEvent::UserLogin { name } => {
                let online = self.presence.login(connection_id, name.clone());
                info!(%connection_id, name = ?name, online, "User logged in");
                self.bus.publish(ServerEvent::Presence { online });
                Ok(None)
            }
            ClientEvent::NewComment(payload) => {
                let comment = self.comments.submit(&payload).await?;
                self.broadcast_comment(&comment);
                Ok(None)
            }
            ClientEvent::GetComments(payload) => {
                let comments = self.comments.comments_for(&payload).await?;
                Ok(Some(ServerEvent::OldComments {
                    comments: comments.iter().map(Comment::view).collect(),
                }))
            }
            ClientEvent::UserDisconnect => {
                self.disconnect(connection_id);
                Ok(None)
            }
            ClientEvent::Ping => Ok(Some(ServerEvent::Pong)),
        }
    }

    /// Store a comment that arrived outside the socket (e.g. over HTTP) and
    /// broadcast it like a socket submission.
    pub async fn post_comment(&self, new: NewComment) -> Result<Comment, CommentError> {
        let comment = self.comments.add(new).await?;
        self.broadcast_comment(&comment);
        Ok(comment)
    }

    /// Drop a connection from presence. Safe to call more than once.
    pub fn disconnect(&self, connection_id: Uuid) {
        if let Some(online) = self.presence.disconnect(&connection_id) {
            info!(%connection_id, online, "User disconnected");
            self.bus.publish(ServerEvent::Presence { online });
        }
    }

    fn broadcast_comment(&self, comment: &Comment) {
        self.bus.publish(ServerEvent::NewComment(comment.view()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comment::mock::MockCommentRepository;
    use serde_json::json;
    use tokio::sync::broadcast::error::TryRecvError;

    fn hub() -> CommentHub<MockCommentRepository> {
        CommentHub::new(
            CommentService::new(MockCommentRepository::default(), "Anonymous"),
            EventBus::new(64),
        )
    }

    #[tokio::test]
    async fn test_new_comment_broadcasts_same_text_and_tab() {
        let hub = hub();
        let mut rx = hub.bus().subscribe();
        let conn = Uuid::now_v7();

        let reply = hub
            .handle(
                conn,
                ClientEvent::NewComment(json!({"text": "Hello, I'm Joe", "name": "Joe", "tab": "Home"})),
            )
            .await
            .unwrap();
        assert!(reply.is_none());

        match rx.try_recv().unwrap() {
            ServerEvent::NewComment(view) => {
                assert_eq!(view.text, "Hello, I'm Joe");
                assert_eq!(view.name, "Joe");
                assert_eq!(view.tab, "Home");
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_comment_is_not_broadcast() {
        let hub = hub();
        let mut rx = hub.bus().subscribe();

        let result = hub
            .handle(Uuid::now_v7(), ClientEvent::NewComment(json!({"text": "Hello", "tab": 7})))
            .await;

        assert!(matches!(result, Err(CommentError::Validation(_))));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
        assert!(hub.comments().repo().stored().is_empty());
    }

    #[tokio::test]
    async fn test_get_comments_replies_to_sender_only() {
        let hub = hub();
        let conn = Uuid::now_v7();
        hub.handle(conn, ClientEvent::NewComment(json!({"text": "a", "tab": "Home"})))
            .await
            .unwrap();
        hub.handle(conn, ClientEvent::NewComment(json!({"text": "b", "tab": "Other"})))
            .await
            .unwrap();

        let mut rx = hub.bus().subscribe();
        let reply = hub
            .handle(conn, ClientEvent::GetComments(json!({"tab": "Home"})))
            .await
            .unwrap();

        match reply {
            Some(ServerEvent::OldComments { comments }) => {
                assert_eq!(comments.len(), 1);
                assert_eq!(comments[0].text, "a");
            }
            other => panic!("unexpected reply: {other:?}"),
        }
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_get_comments_without_tab_fails() {
        let hub = hub();
        for payload in [json!({}), json!({"t": "Home"})] {
            let result = hub
                .handle(Uuid::now_v7(), ClientEvent::GetComments(payload))
                .await;
            assert!(matches!(result, Err(CommentError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_login_and_disconnect_publish_presence() {
        let hub = hub();
        let mut rx = hub.bus().subscribe();
        let conn = Uuid::now_v7();

        hub.handle(conn, ClientEvent::UserLogin { name: None }).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), ServerEvent::Presence { online: 1 });

        hub.handle(conn, ClientEvent::UserDisconnect).await.unwrap();
        assert_eq!(rx.try_recv().unwrap(), ServerEvent::Presence { online: 0 });

        // Second disconnect (e.g. socket close after explicit disconnect) is silent.
        hub.disconnect(conn);
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_disconnect_without_login_is_silent() {
        let hub = hub();
        let mut rx = hub.bus().subscribe();
        hub.handle(Uuid::now_v7(), ClientEvent::UserDisconnect)
            .await
            .unwrap();
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_ping_replies_pong() {
        let hub = hub();
        let reply = hub.handle(Uuid::now_v7(), ClientEvent::Ping).await.unwrap();
        assert_eq!(reply, Some(ServerEvent::Pong));
    }

    #[tokio::test]
    async fn test_post_comment_broadcasts() {
        let hub = hub();
        let mut rx = hub.bus().subscribe();
        let comment = hub
            .post_comment(NewComment {
                text: "from http".to_string(),
                name: "Ann".to_string(),
                tab: "Home".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(rx.try_recv().unwrap(), ServerEvent::NewComment(comment.view()));
    }
}

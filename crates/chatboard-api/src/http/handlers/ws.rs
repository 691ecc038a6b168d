//! WebSocket handler for the comment board.
//!
//! The `/ws` endpoint upgrades an HTTP connection to a WebSocket. Once
//! connected, the handler:
//!
//! - **Forwards broadcasts:** Subscribes to the [`EventBus`] and pushes every
//!   `ServerEvent` (new comments, presence) to the client as a JSON text frame.
//! - **Handles client events:** Parses incoming text frames as
//!   [`ClientEvent`] and passes them to the [`CommentHub`]. Replies meant for
//!   this client only (old comments, errors, pong) are sent straight back.
//!
//! A failed event does not close the socket: the client gets an `error`
//! frame and can keep going. Closing the socket removes the connection from
//! presence.
//!
//! [`EventBus`]: chatboard_core::event::EventBus

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures_util::{Sink, SinkExt, StreamExt};
use tokio::sync::broadcast;
use uuid::Uuid;

use chatboard_core::comment::CommentHub;
use chatboard_core::repository::comment::CommentRepository;
use chatboard_types::error::CommentError;
use chatboard_types::event::{ClientEvent, ServerEvent};

use crate::state::AppState;

/// Upgrade an HTTP request to a WebSocket connection.
///
/// This is mounted at `/ws` in the router.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

/// Core WebSocket connection handler.
///
/// One `tokio::select!` loop multiplexes bus events, client frames, and
/// server shutdown, so a connection's events are handled one at a time.
async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let connection_id = Uuid::now_v7();
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let mut event_rx = state.hub.bus().subscribe();

    tracing::debug!(%connection_id, "WebSocket connected");

    loop {
        tokio::select! {
            _ = state.shutdown.cancelled() => {
                let _ = ws_sender.send(Message::Close(None)).await;
                break;
            }

            // --- Forward broadcasts to this client ---
            event_result = event_rx.recv() => {
                match event_result {
                    Ok(event) => {
                        if send_event(&mut ws_sender, &event).await.is_err() {
                            break;
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        tracing::warn!(
                            %connection_id,
                            skipped = n,
                            "WebSocket subscriber lagged, skipping {n} events"
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }

            // --- Handle events from this client ---
            msg_result = ws_receiver.next() => {
                match msg_result {
                    Some(Ok(Message::Text(text))) => {
                        if let Some(reply) = process_event(&text, connection_id, &state.hub).await {
                            if send_event(&mut ws_sender, &reply).await.is_err() {
                                break;
                            }
                        }
                    }
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Err(err)) => {
                        tracing::debug!(%connection_id, "WebSocket receive error: {err}");
                        break;
                    }
                    // Binary, ping, and pong frames are handled by axum/tungstenite
                    Some(Ok(_)) => {}
                }
            }
        }
    }

    state.hub.disconnect(connection_id);
    tracing::debug!(%connection_id, "WebSocket connection closed");
}

/// Parse and handle one text frame, returning the reply for the sender.
async fn process_event<R: CommentRepository>(
    text: &str,
    connection_id: Uuid,
    hub: &CommentHub<R>,
) -> Option<ServerEvent> {
    let event = match ClientEvent::parse(text) {
        Ok(event) => event,
        Err(err) => {
            tracing::warn!(
                %connection_id,
                len = text.len(),
                preview = %frame_preview(text),
                error = %err,
                "Ignoring malformed socket event"
            );
            return Some(ServerEvent::Error {
                message: err.to_string(),
            });
        }
    };

    let name = event.name();
    match hub.handle(connection_id, event).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::warn!(%connection_id, event = name, error = %err, "Socket event failed");
            let message = match err {
                CommentError::Validation(e) => e.to_string(),
                CommentError::Storage(_) => "failed to access comment storage".to_string(),
            };
            Some(ServerEvent::Error { message })
        }
    }
}

/// Longest prefix of a client frame that is written to the log.
const LOG_PREVIEW_BYTES: usize = 128;

fn frame_preview(text: &str) -> &str {
    if text.len() <= LOG_PREVIEW_BYTES {
        return text;
    }
    let mut end = LOG_PREVIEW_BYTES;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

async fn send_event(
    ws_sender: &mut (impl Sink<Message, Error = axum::Error> + Unpin),
    event: &ServerEvent,
) -> Result<(), axum::Error> {
    match serde_json::to_string(event) {
        Ok(json) => ws_sender.send(Message::Text(json.into())).await,
        Err(err) => {
            tracing::warn!(channel = event.channel(), "Failed to serialize ServerEvent: {err}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chatboard_core::comment::CommentService;
    use chatboard_core::event::EventBus;
    use chatboard_infra::sqlite::comment::SqliteCommentRepository;
    use chatboard_infra::sqlite::pool::{DatabasePool, database_url};
    use chatboard_types::config::GlobalConfig;
    use serde_json::Value;
    use std::time::Duration;
    use tokio::net::TcpStream;
    use tokio_tungstenite::tungstenite::Message as ClientMessage;
    use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

    type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

    async fn test_hub() -> CommentHub<SqliteCommentRepository> {
        let dir = tempfile::tempdir().unwrap();
        let url = database_url(dir.path());
        std::mem::forget(dir);
        let pool = DatabasePool::new(&url).await.unwrap();
        CommentHub::new(
            CommentService::new(SqliteCommentRepository::new(pool), "Anonymous"),
            EventBus::new(16),
        )
    }

    #[tokio::test]
    async fn new_comment_is_broadcast_not_replied() {
        let hub = test_hub().await;
        let mut rx = hub.bus().subscribe();
        let frame = r#"{"event":"new_comment","data":{"text":"Hello, I'm Joe","name":"Joe","tab":"Home"}}"#;

        let reply = process_event(frame, Uuid::now_v7(), &hub).await;
        assert!(reply.is_none());

        match rx.recv().await.unwrap() {
            ServerEvent::NewComment(view) => {
                assert_eq!(view.text, "Hello, I'm Joe");
                assert_eq!(view.tab, "Home");
            }
            other => panic!("unexpected broadcast: {other:?}"),
        }
    }

    #[tokio::test]
    async fn invalid_comment_replies_with_error() {
        let hub = test_hub().await;
        let frame = r#"{"event":"new_comment","data":{"text":9,"tab":"Home"}}"#;

        let reply = process_event(frame, Uuid::now_v7(), &hub).await;
        assert_eq!(
            reply,
            Some(ServerEvent::Error {
                message: "field 'text' must be a string".to_string()
            })
        );
        assert!(hub.comments().list_tab("Home").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn get_comments_with_space_name_replies_old_comments() {
        let hub = test_hub().await;
        let conn = Uuid::now_v7();
        process_event(
            r#"{"event":"new comment","data":{"text":"first","tab":"Home"}}"#,
            conn,
            &hub,
        )
        .await;

        let reply = process_event(r#"{"event":"get comments","data":{"tab":"Home"}}"#, conn, &hub).await;
        match reply {
            Some(ServerEvent::OldComments { comments }) => {
                assert_eq!(comments.len(), 1);
                assert_eq!(comments[0].text, "first");
                assert_eq!(comments[0].name, "Anonymous");
            }
            other => panic!("unexpected reply: {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_frame_replies_with_error() {
        let hub = test_hub().await;
        let reply = process_event("not json", Uuid::now_v7(), &hub).await;
        assert!(matches!(reply, Some(ServerEvent::Error { .. })));
    }

    #[tokio::test]
    async fn login_then_disconnect_frames() {
        let hub = test_hub().await;
        let conn = Uuid::now_v7();

        assert!(process_event(r#"{"event":"user_login"}"#, conn, &hub).await.is_none());
        assert_eq!(hub.presence().online_count(), 1);

        assert!(process_event(r#"{"event":"user_disconnect"}"#, conn, &hub).await.is_none());
        assert_eq!(hub.presence().online_count(), 0);
    }

    #[test]
    fn frame_preview_caps_length_on_char_boundary() {
        assert_eq!(frame_preview("short"), "short");

        let long = "é".repeat(100);
        let preview = frame_preview(&long);
        assert!(preview.len() <= LOG_PREVIEW_BYTES);
        assert!(preview.chars().all(|c| c == 'é'));
    }

    // --- Live socket tests ---

    async fn serve_app() -> (AppState, String) {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().to_path_buf();
        std::mem::forget(dir);
        let pool = DatabasePool::new(&database_url(&data_dir)).await.unwrap();
        let state = AppState::from_parts(GlobalConfig::default(), data_dir, pool).unwrap();

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let router = crate::http::router::build_router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        (state, format!("ws://{addr}/ws"))
    }

    async fn connect(url: &str) -> Client {
        let (client, _) = tokio_tungstenite::connect_async(url).await.unwrap();
        client
    }

    async fn send(client: &mut Client, frame: &str) {
        client.send(ClientMessage::text(frame.to_string())).await.unwrap();
    }

    /// Read frames until one on `channel` arrives.
    async fn next_on(client: &mut Client, channel: &str) -> Value {
        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                let msg = client.next().await.unwrap().unwrap();
                if let ClientMessage::Text(text) = msg {
                    let frame: Value = serde_json::from_str(&text).unwrap();
                    if frame["event"] == channel {
                        return frame;
                    }
                }
            }
        })
        .await
        .unwrap()
    }

    /// Round-trip a ping so every earlier frame on this socket is handled.
    async fn sync(client: &mut Client) {
        send(client, r#"{"event":"ping"}"#).await;
        next_on(client, "pong").await;
    }

    async fn wait_for_online(state: &AppState, expected: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while state.hub.presence().online_count() != expected {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn comment_from_one_socket_reaches_another() {
        let (_state, url) = serve_app().await;
        let mut a = connect(&url).await;
        let mut b = connect(&url).await;
        sync(&mut a).await;
        sync(&mut b).await;

        send(
            &mut a,
            r#"{"event":"new_comment","data":{"text":"Hello, I'm Joe","name":"Joe","tab":"Home"}}"#,
        )
        .await;

        let frame = next_on(&mut b, "new comment").await;
        assert_eq!(frame["data"]["text"], "Hello, I'm Joe");
        assert_eq!(frame["data"]["name"], "Joe");
        assert_eq!(frame["data"]["tab"], "Home");

        // The sender sees its own comment through the broadcast too.
        let own = next_on(&mut a, "new comment").await;
        assert_eq!(own["data"]["text"], "Hello, I'm Joe");
    }

    #[tokio::test]
    async fn dropping_a_socket_removes_it_from_presence() {
        let (state, url) = serve_app().await;
        let mut a = connect(&url).await;
        let mut b = connect(&url).await;
        send(&mut a, r#"{"event":"user_login","data":{"name":"Ann"}}"#).await;
        send(&mut b, r#"{"event":"user login","data":{"name":"Bob"}}"#).await;
        sync(&mut a).await;
        sync(&mut b).await;
        assert_eq!(state.hub.presence().online_count(), 2);

        drop(a);

        wait_for_online(&state, 1).await;
        loop {
            let frame = next_on(&mut b, "presence").await;
            if frame["data"]["online"] == 1 {
                break;
            }
        }
    }

    #[tokio::test]
    async fn shutdown_closes_open_sockets() {
        let (state, url) = serve_app().await;
        let mut a = connect(&url).await;
        send(&mut a, r#"{"event":"user_login"}"#).await;
        sync(&mut a).await;

        state.shutdown.cancel();

        let closed = tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                match a.next().await {
                    Some(Ok(ClientMessage::Close(_))) | None | Some(Err(_)) => return true,
                    Some(Ok(_)) => {}
                }
            }
        })
        .await
        .unwrap();
        assert!(closed);
        wait_for_online(&state, 0).await;
    }
}

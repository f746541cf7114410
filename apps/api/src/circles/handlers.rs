//! Axum route handlers for circle listing and the realtime room socket.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path, Query, State,
    },
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::auth::session::{Session, SessionStore};
use crate::auth::AuthSession;
use crate::circles::catalog::{find_circle, CircleSummary, LiveStatus, CIRCLES};
use crate::circles::room::{CircleMessage, MAX_MESSAGE_CHARS};
use crate::circles::slug::{is_slug, unslugify};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct CircleView {
    #[serde(flatten)]
    pub circle: CircleSummary,
    pub members_online: usize,
}

#[derive(Debug, Serialize)]
pub struct CircleDetail {
    pub id: String,
    pub title: String,
    pub description: Option<&'static str>,
    pub status: Option<LiveStatus>,
    pub members_online: usize,
    /// Chat delivery is at-most-once with no history; clients show this to users.
    pub delivery: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct SocketParams {
    pub token: String,
}

fn check_room_id(slug: &str) -> Result<(), AppError> {
    if is_slug(slug) {
        Ok(())
    } else {
        Err(AppError::Validation(format!("'{slug}' is not a valid circle id")))
    }
}

/// GET /api/v1/circles
pub async fn handle_list_circles(
    State(state): State<AppState>,
    AuthSession(_session): AuthSession,
) -> Json<Vec<CircleView>> {
    let mut views = Vec::with_capacity(CIRCLES.len());
    for circle in &CIRCLES {
        let summary = circle.summary();
        let members_online = state.rooms.member_count(&summary.id).await;
        views.push(CircleView {
            circle: summary,
            members_online,
        });
    }
    Json(views)
}

/// GET /api/v1/circles/:slug
///
/// Any well-formed slug names a room; catalog circles also carry a description.
pub async fn handle_get_circle(
    State(state): State<AppState>,
    AuthSession(_session): AuthSession,
    Path(slug): Path<String>,
) -> Result<Json<CircleDetail>, AppError> {
    check_room_id(&slug)?;
    let known = find_circle(&slug);
    Ok(Json(CircleDetail {
        title: known
            .map(|c| c.theme.to_string())
            .unwrap_or_else(|| unslugify(&slug)),
        description: known.map(|c| c.description),
        status: known.map(|c| c.status),
        members_online: state.rooms.member_count(&slug).await,
        delivery: "at-most-once",
        id: slug,
    }))
}

/// GET /api/v1/circles/:slug/ws?token=...
///
/// Browsers cannot set headers on a WebSocket handshake, so the session token
/// travels as a query parameter.
pub async fn handle_room_socket(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<SocketParams>,
) -> Result<Response, AppError> {
    check_room_id(&slug)?;
    let session = state
        .sessions
        .get(&params.token)
        .await?
        .ok_or(AppError::Unauthorized)?;
    Ok(ws.on_upgrade(move |socket| run_room_socket(socket, state, slug, session)))
}

/// Relays client text frames into the room and room traffic back to the client
/// until either side goes away or the session is signed out.
async fn run_room_socket(mut socket: WebSocket, state: AppState, room_id: String, session: Session) {
    let rooms = state.rooms.clone();
    let mut subscription = rooms.join(&room_id).await;
    let sender_name = session
        .identity
        .display_name
        .clone()
        .unwrap_or_else(|| "Anonymous".to_string());
    info!("User {} joined circle {room_id}", session.user_id());

    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Text(text))) => match chat_text(&text) {
                    Some(body) => {
                        if !session_is_live(state.sessions.as_ref(), &session.token).await {
                            info!("Circle {room_id}: session for user {} ended, closing socket", session.user_id());
                            let _ = socket.send(Message::Close(None)).await;
                            break;
                        }
                        let message = CircleMessage::new(&room_id, session.user_id(), &sender_name, body);
                        let delivered = rooms.emit(message).await;
                        debug!("Circle {room_id}: message delivered to {delivered} members");
                    }
                    None => debug!("Circle {room_id}: ignored empty or oversized message"),
                },
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!("Circle {room_id}: socket error: {e}");
                    break;
                }
            },
            outgoing = subscription.recv() => match outgoing {
                Some(message) => {
                    let payload = match serde_json::to_string(&message) {
                        Ok(p) => p,
                        Err(e) => {
                            debug!("Circle {room_id}: could not encode message: {e}");
                            continue;
                        }
                    };
                    if socket.send(Message::Text(payload)).await.is_err() {
                        break;
                    }
                }
                None => break,
            },
        }
    }

    rooms.leave(subscription).await;
    info!("User {} left circle {room_id}", session.user_id());
}

async fn session_is_live(sessions: &dyn SessionStore, token: &str) -> bool {
    match sessions.get(token).await {
        Ok(found) => found.is_some(),
        Err(e) => {
            warn!("Could not re-check session before posting: {e}");
            false
        }
    }
}

/// Trimmed message body, or `None` if it is empty or longer than the limit.
fn chat_text(raw: &str) -> Option<&str> {
    let body = raw.trim();
    if body.is_empty() || body.chars().count() > MAX_MESSAGE_CHARS {
        None
    } else {
        Some(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_text_trims() {
        assert_eq!(chat_text("  hello there \n"), Some("hello there"));
    }

    #[test]
    fn test_chat_text_rejects_blank_and_oversized() {
        assert_eq!(chat_text("   "), None);
        let long = "x".repeat(MAX_MESSAGE_CHARS + 1);
        assert_eq!(chat_text(&long), None);
    }

    mod socket {
        use std::time::Duration;

        use futures_util::{SinkExt, StreamExt};
        use tokio::net::{TcpListener, TcpStream};
        use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;
        use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};

        use crate::auth::session::SessionStore;
        use crate::circles::room::{CircleMessage, RoomHub};
        use crate::routes::build_router;
        use crate::testing::{StubOracle, TestApp};

        type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

        const ROOM: &str = "lonely-reflective";

        async fn serve(app: &TestApp) -> String {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let router = build_router(app.state.clone());
            tokio::spawn(async move {
                axum::serve(listener, router).await.unwrap();
            });
            format!("ws://{addr}/api/v1/circles")
        }

        async fn connect(base: &str, token: &str) -> Client {
            let (client, _) = connect_async(format!("{base}/{ROOM}/ws?token={token}"))
                .await
                .unwrap();
            client
        }

        async fn wait_for_members(rooms: &RoomHub, expected: usize) {
            tokio::time::timeout(Duration::from_secs(5), async {
                while rooms.member_count(ROOM).await != expected {
                    tokio::time::sleep(Duration::from_millis(10)).await;
                }
            })
            .await
            .expect("room membership never settled");
        }

        /// Next text frame, or `None` once the server closes the socket.
        async fn next_text(client: &mut Client) -> Option<String> {
            tokio::time::timeout(Duration::from_secs(5), async {
                while let Some(frame) = client.next().await {
                    match frame {
                        Ok(WsMessage::Text(text)) => return Some(text),
                        Ok(WsMessage::Close(_)) | Err(_) => return None,
                        Ok(_) => {}
                    }
                }
                None
            })
            .await
            .expect("no frame from server")
        }

        #[tokio::test]
        async fn test_unknown_token_is_rejected() {
            let app = TestApp::new(StubOracle::default());
            let base = serve(&app).await;
            let result = connect_async(format!("{base}/{ROOM}/ws?token=bogus")).await;
            assert!(result.is_err());
            assert_eq!(app.state.rooms.member_count(ROOM).await, 0);
        }

        #[tokio::test]
        async fn test_messages_relay_between_members_and_room_empties_on_close() {
            let app = TestApp::new(StubOracle::default());
            let base = serve(&app).await;
            let mut alice = connect(&base, &app.sign_in("alice").await).await;
            let mut bob = connect(&base, &app.sign_in("bob").await).await;
            wait_for_members(&app.state.rooms, 2).await;

            alice
                .send(WsMessage::Text("  anyone else up late?  ".to_string()))
                .await
                .unwrap();
            let raw = next_text(&mut bob).await.unwrap();
            let message: CircleMessage = serde_json::from_str(&raw).unwrap();
            assert_eq!(message.room_id, ROOM);
            assert_eq!(message.sender_id, "alice");
            assert_eq!(message.text, "anyone else up late?");

            alice.close(None).await.unwrap();
            bob.close(None).await.unwrap();
            wait_for_members(&app.state.rooms, 0).await;
        }

        #[tokio::test]
        async fn test_socket_closes_after_sign_out() {
            let app = TestApp::new(StubOracle::default());
            let base = serve(&app).await;
            let token = app.sign_in("alice").await;
            let mut alice = connect(&base, &token).await;
            wait_for_members(&app.state.rooms, 1).await;

            app.sessions.revoke(&token).await.unwrap();
            alice
                .send(WsMessage::Text("still here?".to_string()))
                .await
                .unwrap();
            assert_eq!(next_text(&mut alice).await, None);
            wait_for_members(&app.state.rooms, 0).await;
        }
    }

    #[test]
    fn test_room_id_validation() {
        assert!(check_room_id("lonely-reflective").is_ok());
        assert!(check_room_id("Lonely Reflective").is_err());
    }
}

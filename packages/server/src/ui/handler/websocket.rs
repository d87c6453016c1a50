//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, GameId},
    infrastructure::dto::{
        conversion::parse_player_role,
        websocket::{
            ClientEvent, GameJoinFailedMessage, GameJoinedMessage, GameUpdatedMessage, JoinGamePayload,
            MessageType, PlayFailedMessage, PlayPayload,
        },
    },
    ui::state::AppState,
};

use serde::Deserialize;

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub connection_id: String,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    let connection_id_str = query.connection_id;

    // Convert String -> ConnectionId (Domain Model)
    let connection_id = match ConnectionId::try_from(connection_id_str.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid connection_id format: '{}'", connection_id_str);
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Create a channel for this connection to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // Register the connection; a duplicate id means another socket is live
    if !state
        .room_pusher
        .register_connection(connection_id.clone(), tx)
        .await
    {
        tracing::warn!(
            "Connection with ID '{}' is already registered. Rejecting connection.",
            connection_id_str
        );
        return Err(StatusCode::CONFLICT);
    }

    tracing::info!("Connection '{}' registered", connection_id_str);
    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, connection_id, rx)))
}

/// Spawns a task that receives messages from the rx channel and pushes them to the WebSocket sender.
///
/// This function handles the outbound message flow: room broadcasts and direct
/// replies (via rx channel) are sent to this connection's WebSocket.
///
/// # Arguments
///
/// * `rx` - Channel receiver for messages addressed to this connection
/// * `sender` - WebSocket sink to send messages to this connection
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            // Send the message to this connection
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    connection_id: ConnectionId,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    let connection_id_for_recv = connection_id.clone();
    let state_clone = state.clone();

    // Spawn a task to receive events from this connection
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received text: {}", text);

                    // Parse the incoming event; unparseable frames are logged and skipped
                    let event = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => event,
                        Err(e) => {
                            tracing::warn!("Failed to parse event as JSON: {}", e);
                            continue;
                        }
                    };

                    match event {
                        ClientEvent::JoinGame(payload) => {
                            handle_join_game(&state_clone, &connection_id_for_recv, payload).await;
                        }
                        ClientEvent::Play(payload) => {
                            handle_play(&state_clone, &connection_id_for_recv, payload).await;
                        }
                    }
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!(
                        "Connection '{}' requested close",
                        connection_id_for_recv
                    );
                    break;
                }
                _ => {}
            }
        }
    });

    // Spawn a task to push room broadcasts and replies to this connection
    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    // Vacate the player slot (if any); board and turn survive the disconnect
    match state.disconnect_connection_usecase.execute(&connection_id).await {
        Some(game_id) => {
            tracing::info!(
                "Connection '{}' disconnected, slot in game '{}' vacated",
                connection_id,
                game_id
            );
        }
        None => {
            tracing::info!(
                "Connection '{}' disconnected (no active game)",
                connection_id
            );
        }
    }

    // Drop the channel and sweep remaining room memberships (spectators included)
    state.room_pusher.unregister_connection(&connection_id).await;
}

/// Handle a `join-game` event: create-or-join, then reply to the joiner only.
async fn handle_join_game(
    state: &Arc<AppState>,
    connection_id: &ConnectionId,
    payload: JoinGamePayload,
) {
    let usecase = &state.join_game_usecase;

    // Convert String -> Domain Models
    let game_id = match GameId::try_from(payload.game_id.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid game_id format: '{}'", payload.game_id);
            send_join_failed(state, connection_id, "invalid game id").await;
            return;
        }
    };
    let role = match parse_player_role(&payload.player_type) {
        Some(role) => role,
        None => {
            tracing::warn!("Invalid player_type: '{}'", payload.player_type);
            send_join_failed(state, connection_id, "invalid player type").await;
            return;
        }
    };

    match usecase
        .execute(
            game_id,
            role,
            payload.rows,
            payload.cols,
            connection_id.clone(),
        )
        .await
    {
        Ok((snapshot, granted_role)) => {
            let joined_msg = GameJoinedMessage {
                r#type: MessageType::GameJoined,
                game: snapshot.into(),
                player_type: granted_role.to_string(),
            };
            let joined_json = serde_json::to_string(&joined_msg).unwrap();
            if let Err(e) = usecase.notify_joiner(connection_id, &joined_json).await {
                tracing::warn!("Failed to send game-joined to '{}': {}", connection_id, e);
            }
        }
        Err(e) => {
            tracing::warn!("Connection '{}' failed to join: {}", connection_id, e);
            send_join_failed(state, connection_id, &e.to_string()).await;
        }
    }
}

async fn send_join_failed(state: &Arc<AppState>, connection_id: &ConnectionId, reason: &str) {
    let failed_msg = GameJoinFailedMessage {
        r#type: MessageType::GameJoinFailed,
        reason: reason.to_string(),
    };
    let failed_json = serde_json::to_string(&failed_msg).unwrap();
    if let Err(e) = state
        .join_game_usecase
        .notify_joiner(connection_id, &failed_json)
        .await
    {
        tracing::warn!(
            "Failed to send game-join-failed to '{}': {}",
            connection_id,
            e
        );
    }
}

/// Handle a `play` event: apply the move, then broadcast the updated snapshot
/// to the whole room. Failures go back to the requester only.
async fn handle_play(state: &Arc<AppState>, connection_id: &ConnectionId, payload: PlayPayload) {
    let usecase = &state.play_move_usecase;

    let game_id = match GameId::try_from(payload.game_id.clone()) {
        Ok(id) => id,
        Err(_) => {
            tracing::warn!("Invalid game_id format: '{}'", payload.game_id);
            send_play_failed(state, connection_id, "invalid game id").await;
            return;
        }
    };

    match usecase
        .execute(connection_id, &game_id, payload.row, payload.col)
        .await
    {
        Ok(snapshot) => {
            // The session lock is already released; broadcast from the snapshot
            let updated_msg = GameUpdatedMessage {
                r#type: MessageType::GameUpdated,
                game: snapshot.into(),
            };
            let updated_json = serde_json::to_string(&updated_msg).unwrap();
            if let Err(e) = usecase.broadcast_update(&game_id, &updated_json).await {
                tracing::warn!("Failed to broadcast game-updated: {}", e);
            }
        }
        Err(e) => {
            tracing::warn!("Connection '{}' play rejected: {}", connection_id, e);
            send_play_failed(state, connection_id, &e.to_string()).await;
        }
    }
}

async fn send_play_failed(state: &Arc<AppState>, connection_id: &ConnectionId, reason: &str) {
    let failed_msg = PlayFailedMessage {
        r#type: MessageType::PlayFailed,
        reason: reason.to_string(),
    };
    let failed_json = serde_json::to_string(&failed_msg).unwrap();
    if let Err(e) = state
        .play_move_usecase
        .notify_requester(connection_id, &failed_json)
        .await
    {
        tracing::warn!("Failed to send play-failed to '{}': {}", connection_id, e);
    }
}

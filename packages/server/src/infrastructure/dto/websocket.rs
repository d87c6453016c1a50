//! WebSocket event DTOs.
//!
//! Inbound events carry camelCase keys, outbound payloads snake_case —
//! both inherited from the browser frontend this server speaks to.

use serde::{Deserialize, Serialize};

/// Outbound event type tag
#[derive(Debug, Clone, Copy, Serialize)]
pub enum MessageType {
    #[serde(rename = "game-joined")]
    GameJoined,
    #[serde(rename = "game-join-failed")]
    GameJoinFailed,
    #[serde(rename = "game-updated")]
    GameUpdated,
    #[serde(rename = "play-failed")]
    PlayFailed,
}

/// Inbound events, tagged by `type`
#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum ClientEvent {
    #[serde(rename = "join-game")]
    JoinGame(JoinGamePayload),
    #[serde(rename = "play")]
    Play(PlayPayload),
}

/// Payload of `join-game`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGamePayload {
    pub game_id: String,
    /// "X" | "O" | "WATCH"
    pub player_type: String,
    pub rows: usize,
    pub cols: usize,
}

/// Payload of `play`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayPayload {
    pub game_id: String,
    pub row: usize,
    pub col: usize,
}

/// Session snapshot as sent over the wire
#[derive(Debug, Clone, Serialize)]
pub struct GameSnapshotDto {
    pub id: String,
    pub rows: usize,
    pub cols: usize,
    /// "X" | "O"
    pub active_player: String,
    pub player_x: Option<String>,
    pub player_o: Option<String>,
    /// Cells are "X", "O" or "" (empty)
    pub board: Vec<Vec<String>>,
}

/// `game-joined`: sent to the joining connection only
#[derive(Debug, Serialize)]
pub struct GameJoinedMessage {
    pub r#type: MessageType,
    #[serde(flatten)]
    pub game: GameSnapshotDto,
    /// The role this connection was granted ("X" | "O" | "WATCH")
    pub player_type: String,
}

/// `game-join-failed`: sent to the requesting connection only
#[derive(Debug, Serialize)]
pub struct GameJoinFailedMessage {
    pub r#type: MessageType,
    pub reason: String,
}

/// `game-updated`: broadcast to the whole room after a successful move
#[derive(Debug, Serialize)]
pub struct GameUpdatedMessage {
    pub r#type: MessageType,
    #[serde(flatten)]
    pub game: GameSnapshotDto,
}

/// `play-failed`: sent to the requesting connection only
#[derive(Debug, Serialize)]
pub struct PlayFailedMessage {
    pub r#type: MessageType,
    pub reason: String,
}

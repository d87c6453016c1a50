//! HTTP API response DTOs.

use serde::Serialize;

/// Summary of one game for the listing endpoint
#[derive(Debug, Serialize)]
pub struct GameSummaryDto {
    pub id: String,
    pub rows: usize,
    pub cols: usize,
    /// Connection ids currently holding a player slot
    pub players: Vec<String>,
    /// RFC 3339 (JST)
    pub created_at: String,
}

/// Full state of one game for the detail endpoint
#[derive(Debug, Serialize)]
pub struct GameDetailDto {
    pub id: String,
    pub rows: usize,
    pub cols: usize,
    pub active_player: String,
    pub player_x: Option<String>,
    pub player_o: Option<String>,
    pub board: Vec<Vec<String>>,
    /// RFC 3339 (JST)
    pub created_at: String,
}

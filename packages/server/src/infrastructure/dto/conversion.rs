//! Conversion logic between DTOs and domain types.

use crate::domain::{Cell, Mark, PlayerRole, SessionSnapshot};
use crate::infrastructure::dto::websocket as dto;

/// Parse a wire role string ("X" | "O" | "WATCH") into a PlayerRole
pub fn parse_player_role(value: &str) -> Option<PlayerRole> {
    match value {
        "X" => Some(PlayerRole::X),
        "O" => Some(PlayerRole::O),
        "WATCH" => Some(PlayerRole::Spectator),
        _ => None,
    }
}

fn cell_to_wire(cell: Cell) -> String {
    match cell {
        Cell::Empty => String::new(),
        Cell::X => "X".to_string(),
        Cell::O => "O".to_string(),
    }
}

fn mark_to_wire(mark: Mark) -> String {
    mark.to_string()
}

// ========================================
// Domain → DTO
// ========================================

impl From<SessionSnapshot> for dto::GameSnapshotDto {
    fn from(snapshot: SessionSnapshot) -> Self {
        Self {
            id: snapshot.id.into_string(),
            rows: snapshot.rows,
            cols: snapshot.cols,
            active_player: mark_to_wire(snapshot.active_mark),
            player_x: snapshot.slot_x.map(|c| c.into_string()),
            player_o: snapshot.slot_o.map(|c| c.into_string()),
            board: snapshot
                .board
                .into_iter()
                .map(|row| row.into_iter().map(cell_to_wire).collect())
                .collect(),
        }
    }
}

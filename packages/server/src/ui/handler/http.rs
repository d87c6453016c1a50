//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::{
    domain::{GameId, SessionError},
    infrastructure::dto::{
        http::{GameDetailDto, GameSummaryDto},
        websocket::GameSnapshotDto,
    },
    ui::state::AppState,
};
use goban_shared::time::timestamp_to_jst_rfc3339;

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Get list of games
pub async fn get_games(State(state): State<Arc<AppState>>) -> Json<Vec<GameSummaryDto>> {
    let snapshots = state.list_games_usecase.execute().await;

    // Domain Model から DTO への変換
    let game_summaries: Vec<GameSummaryDto> = snapshots
        .into_iter()
        .map(|snapshot| GameSummaryDto {
            id: snapshot.id.into_string(),
            rows: snapshot.rows,
            cols: snapshot.cols,
            players: snapshot
                .slot_x
                .into_iter()
                .chain(snapshot.slot_o)
                .map(|c| c.into_string())
                .collect(),
            created_at: timestamp_to_jst_rfc3339(snapshot.created_at.value()),
        })
        .collect();

    Json(game_summaries)
}

/// Get game detail by ID
pub async fn get_game_detail(
    State(state): State<Arc<AppState>>,
    Path(game_id): Path<String>,
) -> Result<Json<GameDetailDto>, StatusCode> {
    let game_id = GameId::try_from(game_id).map_err(|_| StatusCode::BAD_REQUEST)?;

    match state.get_game_usecase.execute(&game_id).await {
        Ok(snapshot) => {
            // Domain Model から DTO への変換
            let created_at = timestamp_to_jst_rfc3339(snapshot.created_at.value());
            let wire: GameSnapshotDto = snapshot.into();
            let game_detail = GameDetailDto {
                id: wire.id,
                rows: wire.rows,
                cols: wire.cols,
                active_player: wire.active_player,
                player_x: wire.player_x,
                player_o: wire.player_o,
                board: wire.board,
                created_at,
            };
            Ok(Json(game_detail))
        }
        Err(SessionError::NotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

//! Server state shared across handlers.

use std::sync::Arc;

use crate::{
    domain::RoomPusher,
    usecase::{
        DisconnectConnectionUseCase, GetGameUseCase, JoinGameUseCase, ListGamesUseCase,
        PlayMoveUseCase,
    },
};

/// Shared application state
pub struct AppState {
    /// JoinGameUseCase（ゲーム参加のユースケース）
    pub join_game_usecase: Arc<JoinGameUseCase>,
    /// PlayMoveUseCase（着手のユースケース）
    pub play_move_usecase: Arc<PlayMoveUseCase>,
    /// DisconnectConnectionUseCase（切断のユースケース）
    pub disconnect_connection_usecase: Arc<DisconnectConnectionUseCase>,
    /// GetGameUseCase（ゲーム詳細取得のユースケース）
    pub get_game_usecase: Arc<GetGameUseCase>,
    /// ListGamesUseCase（ゲーム一覧取得のユースケース）
    pub list_games_usecase: Arc<ListGamesUseCase>,
    /// RoomPusher（接続チャネルの登録・解除に使う）
    pub room_pusher: Arc<dyn RoomPusher>,
}

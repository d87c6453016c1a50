//! UseCase layer: one struct per transport-facing operation.

pub mod disconnect_connection;
pub mod error;
pub mod get_game;
pub mod join_game;
pub mod list_games;
pub mod play_move;

pub use disconnect_connection::DisconnectConnectionUseCase;
pub use error::{JoinGameError, PlayMoveError};
pub use get_game::GetGameUseCase;
pub use join_game::JoinGameUseCase;
pub use list_games::ListGamesUseCase;
pub use play_move::PlayMoveUseCase;

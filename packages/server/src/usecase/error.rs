//! UseCase 層のエラー定義
//!
//! いずれも要求元の接続に失敗イベントとして通知される回復可能なエラー。

use thiserror::Error;

use crate::domain::SessionError;

/// 参加処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum JoinGameError {
    #[error("cannot join game: {0}")]
    Rejected(#[from] SessionError),
}

/// 着手処理のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlayMoveError {
    /// 接続がどのゲームのスロットも占有していない
    #[error("not an active player connection")]
    NotActiveConnection,

    /// 指定されたゲームが接続の占有しているゲームと一致しない
    #[error("game id does not match the connection's active game")]
    GameMismatch,

    #[error("invalid move: {0}")]
    InvalidMove(#[from] SessionError),
}

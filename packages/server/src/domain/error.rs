//! ドメイン層のエラー定義

use thiserror::Error;

use super::value_object::PlayerRole;

/// Value Object の検証エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("invalid game id: '{0}'")]
    InvalidGameId(String),

    #[error("invalid connection id: '{0}'")]
    InvalidConnectionId(String),
}

/// セッション操作のエラー
///
/// SessionRegistry を経由する全ての状態変更が返しうるエラーの一覧。
/// いずれも回復可能で、要求元の接続に失敗イベントとして通知される。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("game '{0}' already exists")]
    AlreadyExists(String),

    #[error("game '{0}' not found")]
    NotFound(String),

    #[error("invalid board dimensions: {rows}x{cols}")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("slot '{0}' is already taken")]
    SlotTaken(PlayerRole),

    #[error("connection already occupies a slot in this game")]
    AlreadySeated,

    #[error("connection does not hold a slot in this game")]
    NotParticipant,

    #[error("it is not this player's turn")]
    NotYourTurn,

    #[error("cell ({row}, {col}) is out of bounds")]
    CellOutOfBounds { row: usize, col: usize },

    #[error("cell ({row}, {col}) is already occupied")]
    CellOccupied { row: usize, col: usize },
}

/// メッセージ送信のエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PushError {
    #[error("connection '{0}' not found")]
    ConnectionNotFound(String),

    #[error("failed to push message: {0}")]
    PushFailed(String),
}

//! Value Object 定義
//!
//! 不正な値を型レベルで排除するため、ID などの文字列はコンストラクタで
//! 検証してから保持します。

use std::fmt;

use super::error::ValueError;

/// ID 文字列の最大長
const MAX_ID_LENGTH: usize = 64;

/// ゲームセッションの ID（クライアントが指定する）
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameId(String);

impl GameId {
    /// 新しい GameId を作成（空文字・長すぎる文字列は拒否）
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.is_empty() || value.len() > MAX_ID_LENGTH {
            return Err(ValueError::InvalidGameId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for GameId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// トランスポート層が割り当てる接続の ID
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// 新しい ConnectionId を作成（空文字・長すぎる文字列は拒否）
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.is_empty() || value.len() > MAX_ID_LENGTH {
            return Err(ValueError::InvalidConnectionId(value));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for ConnectionId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// プレイヤーの印。X が先手。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// 相手の印を返す
    pub fn opponent(self) -> Mark {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// この印を置いたセルの状態
    pub fn cell(self) -> Cell {
        match self {
            Mark::X => Cell::X,
            Mark::O => Cell::O,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// 盤面の 1 マスの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    X,
    O,
}

/// 参加時に要求する役割。Spectator は盤面を観戦するだけでスロットを持たない。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerRole {
    X,
    O,
    Spectator,
}

impl PlayerRole {
    /// プレイヤー役割に対応する印（観戦者は None）
    pub fn mark(self) -> Option<Mark> {
        match self {
            PlayerRole::X => Some(Mark::X),
            PlayerRole::O => Some(Mark::O),
            PlayerRole::Spectator => None,
        }
    }
}

impl fmt::Display for PlayerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerRole::X => write!(f, "X"),
            PlayerRole::O => write!(f, "O"),
            PlayerRole::Spectator => write!(f, "WATCH"),
        }
    }
}

/// Unix タイムスタンプ（JST、ミリ秒）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

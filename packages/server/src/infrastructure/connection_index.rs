//! ConnectionIndex 実装
//!
//! アクティブな接続がどのゲームのスロットを占有しているかを引くための表。
//! スロットを占有したときだけエントリが作られる（観戦者は登録されない）。
//! 切断の解決と、追跡中のゲームと異なるゲームへの着手の拒否に使われる。

use std::collections::HashMap;

use tokio::sync::Mutex;

use crate::domain::{ConnectionId, GameId};

/// connectionId → gameId の表
///
/// 不変条件: 1 つの接続は同時に高々 1 つのゲームに紐づく。
pub struct ConnectionIndex {
    entries: Mutex<HashMap<ConnectionId, GameId>>,
}

impl ConnectionIndex {
    /// 空のインデックスを作成
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// 接続をゲームに紐づける（既存の紐づけは上書き）
    pub async fn bind(&self, connection_id: ConnectionId, game_id: GameId) {
        let mut entries = self.entries.lock().await;
        entries.insert(connection_id, game_id);
    }

    /// 接続が紐づいているゲームを引く
    pub async fn game_of(&self, connection_id: &ConnectionId) -> Option<GameId> {
        let entries = self.entries.lock().await;
        entries.get(connection_id).cloned()
    }

    /// 紐づけを解除する（存在しなくてもエラーにならない・冪等）
    pub async fn unbind(&self, connection_id: &ConnectionId) -> Option<GameId> {
        let mut entries = self.entries.lock().await;
        entries.remove(connection_id)
    }

    /// 登録されているエントリ数
    pub async fn count(&self) -> usize {
        let entries = self.entries.lock().await;
        entries.len()
    }
}

impl Default for ConnectionIndex {
    fn default() -> Self {
        Self::new()
    }
}

//! InMemory SessionRegistry 実装
//!
//! ドメイン層が定義する SessionRegistry trait の具体的な実装。
//! HashMap をインメモリのセッション表として使用します。
//!
//! ## ロック設計
//!
//! - 表そのものを守る構造ロック（`sessions` の Mutex）と、セッション
//!   ごとのロック（`Arc<Mutex<GameSession>>`）は別物。
//! - 構造ロックは Arc を取り出す・挿入する間だけ保持し、セッション
//!   ロックの取得を待つ間は決して保持しない。
//! - セッションの変更は全て `with_session` の同期クロージャ内で行う。
//!   クロージャが同期であることで、セッションロックを suspension point
//!   越しに保持できない（ロック中のネットワーク I/O も不可能）。
//!
//! ## リソースについて
//!
//! セッションは一度作られるとプロセス終了まで破棄されない。セッション数は
//! 単調増加する。TTL による回収は現時点では導入していない。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    ConnectionId, GameId, GameSession, PlayerRole, SessionError, SessionRegistry, SessionSnapshot,
    Timestamp,
};

/// インメモリ SessionRegistry 実装
///
/// 各セッションを専用の Mutex と同居させた `Arc<Mutex<GameSession>>` で
/// 保持する。ロックを ID で引く別の表は持たない（表と表の間の競合を排除）。
pub struct InMemorySessionRegistry {
    /// sessionId → セッション本体（ロックと同居）
    sessions: Mutex<HashMap<String, Arc<Mutex<GameSession>>>>,
}

impl InMemorySessionRegistry {
    /// 空のレジストリを作成
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// セッションのロックを取得して f を実行する
    ///
    /// セッションの状態変更が許される唯一の経路。ID が存在しなければ
    /// NotFound。ロックはこの関数を抜けるときに必ず解放される。
    async fn with_session<R>(
        &self,
        id: &GameId,
        f: impl FnOnce(&mut GameSession) -> R,
    ) -> Result<R, SessionError> {
        // 構造ロックは Arc の取り出しの間だけ保持する
        let session = {
            let sessions = self.sessions.lock().await;
            sessions
                .get(id.as_str())
                .cloned()
                .ok_or_else(|| SessionError::NotFound(id.as_str().to_string()))?
        };

        let mut session = session.lock().await;
        Ok(f(&mut session))
    }
}

impl Default for InMemorySessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionRegistry for InMemorySessionRegistry {
    async fn create(
        &self,
        id: GameId,
        rows: usize,
        cols: usize,
        created_at: Timestamp,
    ) -> Result<SessionSnapshot, SessionError> {
        let mut sessions = self.sessions.lock().await;

        // 既存 ID の判定が寸法の検証より先（既存ゲームへの join を妨げない）
        if sessions.contains_key(id.as_str()) {
            return Err(SessionError::AlreadyExists(id.as_str().to_string()));
        }

        let session = GameSession::new(id.clone(), rows, cols, created_at)?;
        let snapshot = session.snapshot();
        sessions.insert(id.as_str().to_string(), Arc::new(Mutex::new(session)));

        Ok(snapshot)
    }

    async fn snapshot(&self, id: &GameId) -> Result<SessionSnapshot, SessionError> {
        self.with_session(id, |session| session.snapshot()).await
    }

    async fn occupy_slot(
        &self,
        id: &GameId,
        role: PlayerRole,
        connection_id: ConnectionId,
    ) -> Result<SessionSnapshot, SessionError> {
        self.with_session(id, |session| {
            session.occupy_slot(role, connection_id)?;
            Ok(session.snapshot())
        })
        .await?
    }

    async fn apply_move(
        &self,
        id: &GameId,
        connection_id: &ConnectionId,
        row: usize,
        col: usize,
    ) -> Result<SessionSnapshot, SessionError> {
        self.with_session(id, |session| {
            session.apply_move(connection_id, row, col)?;
            Ok(session.snapshot())
        })
        .await?
    }

    async fn vacate_slots(
        &self,
        id: &GameId,
        connection_id: &ConnectionId,
    ) -> Result<(), SessionError> {
        self.with_session(id, |session| session.vacate_slots(connection_id))
            .await
    }

    async fn list(&self) -> Vec<SessionSnapshot> {
        // 構造ロックの下で Arc を集めてから、個々のセッションロックを順に取る
        let handles: Vec<Arc<Mutex<GameSession>>> = {
            let sessions = self.sessions.lock().await;
            sessions.values().cloned().collect()
        };

        let mut snapshots = Vec::with_capacity(handles.len());
        for handle in handles {
            let session = handle.lock().await;
            snapshots.push(session.snapshot());
        }
        snapshots.sort_by(|a, b| a.id.as_str().cmp(b.id.as_str()));
        snapshots
    }
}

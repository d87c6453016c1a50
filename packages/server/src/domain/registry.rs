//! SessionRegistry trait 定義
//!
//! ドメイン層が必要とするセッション表へのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! ## 排他制御の契約
//!
//! 状態を変更する操作（create / occupy_slot / apply_move / vacate_slots）は
//! 対象セッションのロックの下で read-modify-write 全体を実行しなければ
//! ならない。判断に使う状態をロック取得前に読んでキャッシュしてはいけない。
//! 呼び出し側が受け取るのは常に SessionSnapshot（不変コピー）であり、
//! 生きたセッションへの参照がロックの外に漏れることはない。

use async_trait::async_trait;

use super::{
    entity::SessionSnapshot,
    error::SessionError,
    value_object::{ConnectionId, GameId, PlayerRole, Timestamp},
};

/// ゲームセッション表
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装には
/// 依存しない。セッションはプロセスの生存期間中は破棄されない。
#[async_trait]
pub trait SessionRegistry: Send + Sync {
    /// 新しいセッションを作成する
    ///
    /// 同じ ID のセッションが既にある場合は AlreadyExists（状態は変更されない）。
    /// 同一 ID への並行した create はちょうど 1 つだけ成功する。
    async fn create(
        &self,
        id: GameId,
        rows: usize,
        cols: usize,
        created_at: Timestamp,
    ) -> Result<SessionSnapshot, SessionError>;

    /// 現在の状態の不変コピーを取得する
    async fn snapshot(&self, id: &GameId) -> Result<SessionSnapshot, SessionError>;

    /// 要求された役割のスロットに接続を割り当てる
    ///
    /// 成功時は変更後のスナップショットを返す。
    async fn occupy_slot(
        &self,
        id: &GameId,
        role: PlayerRole,
        connection_id: ConnectionId,
    ) -> Result<SessionSnapshot, SessionError>;

    /// 着手を検証・適用し、変更後のスナップショットを返す
    async fn apply_move(
        &self,
        id: &GameId,
        connection_id: &ConnectionId,
        row: usize,
        col: usize,
    ) -> Result<SessionSnapshot, SessionError>;

    /// 接続が占有しているスロットを空ける（盤面と手番は残る）
    async fn vacate_slots(
        &self,
        id: &GameId,
        connection_id: &ConnectionId,
    ) -> Result<(), SessionError>;

    /// 全セッションのスナップショットを取得する
    async fn list(&self) -> Vec<SessionSnapshot>;
}

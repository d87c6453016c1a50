//! RoomPusher trait 定義
//!
//! 「セッションが変化した」をルーム単位の配信に変換するゲートウェイの
//! インターフェース。WebSocket を使った具体的な実装は Infrastructure 層が
//! 提供します。
//!
//! ## ロックとの関係
//!
//! ここでの送信は全てセッションロックの外で行われる。UseCase 層は
//! ロックを解放してスナップショットを手にしてから配信を呼ぶ。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{
    error::PushError,
    value_object::{ConnectionId, GameId},
};

/// 接続ごとの送信チャンネル
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// ルーム単位のメッセージ配信
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomPusher: Send + Sync {
    /// 新しい接続を登録する
    ///
    /// 既に同じ ID の接続が登録済みの場合は false を返す（登録されない）。
    async fn register_connection(&self, connection_id: ConnectionId, sender: PusherChannel)
    -> bool;

    /// 接続を登録解除し、所属している全てのルームからも取り除く
    async fn unregister_connection(&self, connection_id: &ConnectionId);

    /// 接続をゲームのルームに入れる（以後このゲームの更新を受信する）
    async fn enter_room(&self, game_id: &GameId, connection_id: ConnectionId);

    /// 接続をゲームのルームから外す
    async fn leave_room(&self, game_id: &GameId, connection_id: &ConnectionId);

    /// 特定の接続にメッセージを送信する
    async fn push_to(&self, connection_id: &ConnectionId, content: &str)
    -> Result<(), PushError>;

    /// ルームの全メンバーにメッセージを配信する
    ///
    /// 一部の送信失敗は許容し、ログに残して続行する。
    async fn broadcast_room(&self, game_id: &GameId, content: &str) -> Result<(), PushError>;
}

//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectConnectionUseCase::execute() メソッド
//! - 切断処理（スロットの解放、ルームからの退出、索引の解除）
//!
//! ### なぜこのテストが必要か
//! - 切断後に同じスロットへ別の接続が参加できることを保証
//! - 切断処理が冪等であることを保証（二重切断でパニックしない）
//! - 盤面と手番が切断を越えて保持されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：プレイヤーの切断とスロット解放
//! - エッジケース：観戦者の切断（索引に無い）、未参加接続の切断、二重切断

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, GameId, RoomPusher, SessionRegistry},
    infrastructure::ConnectionIndex,
};

/// 切断のユースケース
pub struct DisconnectConnectionUseCase {
    /// SessionRegistry（セッション表の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// ConnectionIndex（接続 → ゲームの索引）
    connection_index: Arc<ConnectionIndex>,
    /// RoomPusher（ルーム配信の抽象化）
    room_pusher: Arc<dyn RoomPusher>,
}

impl DisconnectConnectionUseCase {
    /// 新しい DisconnectConnectionUseCase を作成
    pub fn new(
        registry: Arc<dyn SessionRegistry>,
        connection_index: Arc<ConnectionIndex>,
        room_pusher: Arc<dyn RoomPusher>,
    ) -> Self {
        Self {
            registry,
            connection_index,
            room_pusher,
        }
    }

    /// 切断を実行
    ///
    /// 索引に無い接続（観戦者・未参加）は何もせず None を返す。
    /// 観戦者のルーム退出は WebSocketRoomPusher::unregister_connection が
    /// 受け持つため、ここでは扱わない。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 切断した接続の ID
    ///
    /// # Returns
    ///
    /// * `Some(GameId)` - スロットを解放したゲームの ID
    /// * `None` - 接続はどのゲームのスロットも占有していなかった
    pub async fn execute(&self, connection_id: &ConnectionId) -> Option<GameId> {
        // 1. 索引から追跡中のゲームを引く
        let game_id = self.connection_index.game_of(connection_id).await?;

        // 2. セッションのスロットを解放する（盤面と手番は保持される）
        if let Err(e) = self.registry.vacate_slots(&game_id, connection_id).await {
            // セッションが先に消えていても切断自体は続行する
            tracing::warn!(
                "Failed to vacate slots for connection '{}' in game '{}': {}",
                connection_id,
                game_id,
                e
            );
        }

        // 3. ルームから退出させる
        self.room_pusher
            .leave_room(&game_id, connection_id)
            .await;

        // 4. 索引から外す
        self.connection_index.unbind(connection_id).await;

        Some(game_id)
    }
}

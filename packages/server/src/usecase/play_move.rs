//! UseCase: 着手処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PlayMoveUseCase::execute() メソッド
//! - 着手処理（接続の検証、ゲーム ID の照合、ターン進行）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：スロットを持たない接続の着手を防ぐ
//! - 追跡中のゲームと異なるゲームへの着手を防ぐ
//! - ターンの検証と盤面の更新がセッションロックの下で一貫して行われることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：交互の着手とスナップショットの返却
//! - 異常系：未登録接続、ゲーム ID 不一致、手番違反、埋まったマスへの着手
//! - エッジケース：観戦者による着手試行

use std::sync::Arc;

use crate::{
    domain::{ConnectionId, GameId, RoomPusher, SessionRegistry, SessionSnapshot},
    infrastructure::ConnectionIndex,
};

use super::error::PlayMoveError;

/// 着手のユースケース
pub struct PlayMoveUseCase {
    /// SessionRegistry（セッション表の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// ConnectionIndex（接続 → ゲームの索引）
    connection_index: Arc<ConnectionIndex>,
    /// RoomPusher（ルーム配信の抽象化）
    room_pusher: Arc<dyn RoomPusher>,
}

impl PlayMoveUseCase {
    /// 新しい PlayMoveUseCase を作成
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

    /// 着手を実行
    ///
    /// 接続がどの印を持つか・手番かどうかの判定は、ここではなく
    /// セッションロックの下（registry.apply_move）で行われる。
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 着手する接続の ID
    /// * `game_id` - 対象ゲームの ID
    /// * `row`, `col` - 着手するマス
    ///
    /// # Returns
    ///
    /// * `Ok(SessionSnapshot)` - 着手適用後のスナップショット
    /// * `Err(PlayMoveError)` - 着手失敗
    pub async fn execute(
        &self,
        connection_id: &ConnectionId,
        game_id: &GameId,
        row: usize,
        col: usize,
    ) -> Result<SessionSnapshot, PlayMoveError> {
        // 1. 接続がプレイヤーとして登録されているか
        let tracked_game = self
            .connection_index
            .game_of(connection_id)
            .await
            .ok_or(PlayMoveError::NotActiveConnection)?;

        // 2. 指定されたゲームが追跡中のゲームと一致するか
        if &tracked_game != game_id {
            return Err(PlayMoveError::GameMismatch);
        }

        // 3. セッションロックの下で着手を検証・適用する
        let snapshot = self
            .registry
            .apply_move(game_id, connection_id, row, col)
            .await?;

        Ok(snapshot)
    }

    /// 更新後のスナップショットをルーム全体に配信する
    ///
    /// セッションロックが解放された後に呼ぶこと（execute が返した
    /// スナップショットを使う限り自然にそうなる）。
    pub async fn broadcast_update(&self, game_id: &GameId, message: &str) -> Result<(), String> {
        self.room_pusher
            .broadcast_room(game_id, message)
            .await
            .map_err(|e| e.to_string())
    }

    /// 要求元の接続だけに失敗を通知する
    pub async fn notify_requester(
        &self,
        connection_id: &ConnectionId,
        message: &str,
    ) -> Result<(), String> {
        self.room_pusher
            .push_to(connection_id, message)
            .await
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Cell, Mark, PlayerRole, SessionError, Timestamp},
        infrastructure::{InMemorySessionRegistry, WebSocketRoomPusher},
    };

    fn game_id(value: &str) -> GameId {
        GameId::new(value.to_string()).unwrap()
    }

    fn conn(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    async fn create_test_usecase_with_game() -> (PlayMoveUseCase, Arc<ConnectionIndex>) {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let index = Arc::new(ConnectionIndex::new());
        let pusher = Arc::new(WebSocketRoomPusher::new());

        registry
            .create(game_id("g1"), 3, 3, Timestamp::new(1000))
            .await
            .unwrap();
        registry
            .occupy_slot(&game_id("g1"), PlayerRole::X, conn("c1"))
            .await
            .unwrap();
        registry
            .occupy_slot(&game_id("g1"), PlayerRole::O, conn("c2"))
            .await
            .unwrap();
        index.bind(conn("c1"), game_id("g1")).await;
        index.bind(conn("c2"), game_id("g1")).await;

        let usecase = PlayMoveUseCase::new(registry, index.clone(), pusher);
        (usecase, index)
    }

    #[tokio::test]
    async fn test_play_move_success_returns_updated_snapshot() {
        // テスト項目: 着手が成功し、更新後のスナップショットが返る
        // given (前提条件):
        let (usecase, _index) = create_test_usecase_with_game().await;

        // when (操作):
        let result = usecase.execute(&conn("c1"), &game_id("g1"), 0, 0).await;

        // then (期待する結果):
        let snapshot = result.unwrap();
        assert_eq!(snapshot.board[0][0], Cell::X);
        assert_eq!(snapshot.active_mark, Mark::O);
    }

    #[tokio::test]
    async fn test_alternating_moves() {
        // テスト項目: X と O が交互に着手できる
        // given (前提条件):
        let (usecase, _index) = create_test_usecase_with_game().await;

        // when (操作):
        usecase
            .execute(&conn("c1"), &game_id("g1"), 0, 0)
            .await
            .unwrap();
        let snapshot = usecase
            .execute(&conn("c2"), &game_id("g1"), 1, 1)
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(snapshot.board[0][0], Cell::X);
        assert_eq!(snapshot.board[1][1], Cell::O);
        assert_eq!(snapshot.active_mark, Mark::X);
    }

    #[tokio::test]
    async fn test_play_by_unregistered_connection() {
        // テスト項目: ConnectionIndex に無い接続の着手は NotActiveConnection
        // given (前提条件):
        let (usecase, _index) = create_test_usecase_with_game().await;

        // when (操作): 観戦者や未参加の接続が着手を試みる
        let result = usecase
            .execute(&conn("watcher"), &game_id("g1"), 0, 0)
            .await;

        // then (期待する結果):
        assert_eq!(result, Err(PlayMoveError::NotActiveConnection));
    }

    #[tokio::test]
    async fn test_play_with_mismatched_game_id() {
        // テスト項目: 追跡中のゲームと異なる ID への着手は GameMismatch
        // given (前提条件):
        let (usecase, _index) = create_test_usecase_with_game().await;

        // when (操作):
        let result = usecase.execute(&conn("c1"), &game_id("other"), 0, 0).await;

        // then (期待する結果):
        assert_eq!(result, Err(PlayMoveError::GameMismatch));
    }

    #[tokio::test]
    async fn test_play_out_of_turn() {
        // テスト項目: 手番でない接続の着手は NotYourTurn で失敗する
        // given (前提条件):
        let (usecase, _index) = create_test_usecase_with_game().await;
        usecase
            .execute(&conn("c1"), &game_id("g1"), 0, 0)
            .await
            .unwrap();

        // when (操作): X が続けて着手する
        let result = usecase.execute(&conn("c1"), &game_id("g1"), 1, 1).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(PlayMoveError::InvalidMove(SessionError::NotYourTurn))
        );
    }

    #[tokio::test]
    async fn test_play_on_occupied_cell_preserves_turn() {
        // テスト項目: 埋まったマスへの着手は拒否され、手番は消費されない
        // given (前提条件):
        let (usecase, _index) = create_test_usecase_with_game().await;
        usecase
            .execute(&conn("c1"), &game_id("g1"), 0, 0)
            .await
            .unwrap();

        // when (操作): O が同じマスに着手する
        let result = usecase.execute(&conn("c2"), &game_id("g1"), 0, 0).await;

        // then (期待する結果): 拒否され、O は別のマスに着手し直せる
        assert_eq!(
            result,
            Err(PlayMoveError::InvalidMove(SessionError::CellOccupied {
                row: 0,
                col: 0
            }))
        );
        let retry = usecase.execute(&conn("c2"), &game_id("g1"), 1, 0).await;
        assert!(retry.is_ok());
    }

    #[tokio::test]
    async fn test_play_out_of_bounds() {
        // テスト項目: 盤面の外への着手は CellOutOfBounds で失敗する
        // given (前提条件):
        let (usecase, _index) = create_test_usecase_with_game().await;

        // when (操作):
        let result = usecase.execute(&conn("c1"), &game_id("g1"), 3, 0).await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(PlayMoveError::InvalidMove(SessionError::CellOutOfBounds {
                row: 3,
                col: 0
            }))
        );
    }
}

//! UseCase: ゲーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinGameUseCase::execute() メソッド
//! - 参加処理（セッションの作成または既存セッションへの合流、スロット割り当て、
//!   ルームへの登録）
//!
//! ### なぜこのテストが必要か
//! - ビジネスロジックの検証：占有済みスロットへの参加を防ぐ
//! - プレイヤーだけが ConnectionIndex に登録されることを保証
//! - 観戦者もルームには登録されることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規ゲームの作成と参加、既存ゲームへの参加
//! - 異常系：占有済みスロットへの参加試行、不正な盤面サイズ
//! - エッジケース：観戦者の参加

use std::sync::Arc;

use goban_shared::time::get_jst_timestamp;

use crate::{
    domain::{
        ConnectionId, GameId, PlayerRole, RoomPusher, SessionError, SessionRegistry,
        SessionSnapshot, Timestamp,
    },
    infrastructure::ConnectionIndex,
};

use super::error::JoinGameError;

/// ゲーム参加のユースケース
pub struct JoinGameUseCase {
    /// SessionRegistry（セッション表の抽象化）
    registry: Arc<dyn SessionRegistry>,
    /// ConnectionIndex（接続 → ゲームの索引）
    connection_index: Arc<ConnectionIndex>,
    /// RoomPusher（ルーム配信の抽象化）
    room_pusher: Arc<dyn RoomPusher>,
}

impl JoinGameUseCase {
    /// 新しい JoinGameUseCase を作成
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

    /// ゲーム参加を実行
    ///
    /// 指定された ID のゲームが無ければ作成してから参加する（AlreadyExists は
    /// 「既存のゲームに合流する」を意味し、エラーではない）。
    ///
    /// 1 つの接続が占有できるスロットは全ゲームを通じて高々 1 つ。別の
    /// ゲームのスロットを持つ接続がプレイヤーとして参加した場合、元の
    /// スロットは明け渡される。同じゲーム内での役割の変更は
    /// AlreadySeated で拒否される。
    ///
    /// # Arguments
    ///
    /// * `game_id` - 参加するゲームの ID
    /// * `role` - 要求する役割（X / O / 観戦者）
    /// * `rows`, `cols` - ゲームを新規作成する場合の盤面サイズ
    /// * `connection_id` - 参加する接続の ID
    ///
    /// # Returns
    ///
    /// * `Ok((SessionSnapshot, PlayerRole))` - 参加後のスナップショットと付与された役割
    /// * `Err(JoinGameError)` - 参加失敗
    pub async fn execute(
        &self,
        game_id: GameId,
        role: PlayerRole,
        rows: usize,
        cols: usize,
        connection_id: ConnectionId,
    ) -> Result<(SessionSnapshot, PlayerRole), JoinGameError> {
        // 1. ゲームが無ければ作成する
        let created_at = Timestamp::new(get_jst_timestamp());
        match self
            .registry
            .create(game_id.clone(), rows, cols, created_at)
            .await
        {
            Ok(_) => {
                tracing::info!("Game '{}' created ({}x{})", game_id, rows, cols);
            }
            Err(SessionError::AlreadyExists(_)) => {
                tracing::debug!("Game '{}' already exists, joining", game_id);
            }
            Err(e) => return Err(JoinGameError::Rejected(e)),
        }

        // 2. スロットを割り当てる（観戦者はスロットに触れない）
        //    占有状況の判定はセッションロックの下で行われる
        let snapshot = self
            .registry
            .occupy_slot(&game_id, role, connection_id.clone())
            .await?;

        // 3. プレイヤーだけ ConnectionIndex に登録する
        //    別のゲームのスロットを占有していた場合は、新しいスロットの確保が
        //    成功した時点でそちらを明け渡す（1 接続 1 スロット）。失敗した
        //    参加は既存の占有に影響しない。
        if role.mark().is_some() {
            if let Some(previous) = self.connection_index.game_of(&connection_id).await {
                if previous != game_id {
                    if let Err(e) = self.registry.vacate_slots(&previous, &connection_id).await {
                        tracing::warn!(
                            "Failed to vacate slots for connection '{}' in game '{}': {}",
                            connection_id,
                            previous,
                            e
                        );
                    }
                    self.room_pusher.leave_room(&previous, &connection_id).await;
                    tracing::info!(
                        "Connection '{}' moved from game '{}' to game '{}'",
                        connection_id,
                        previous,
                        game_id
                    );
                }
            }
            self.connection_index
                .bind(connection_id.clone(), game_id.clone())
                .await;
        }

        // 4. ルームに入れる（プレイヤーも観戦者も以後の更新を受信する）
        self.room_pusher.enter_room(&game_id, connection_id).await;

        Ok((snapshot, role))
    }

    /// 参加した接続だけに結果を通知する
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加した接続の ID
    /// * `message` - 送信するメッセージ（JSON）
    pub async fn notify_joiner(
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
        domain::{Cell, Mark, pusher::MockRoomPusher},
        infrastructure::{InMemorySessionRegistry, WebSocketRoomPusher},
    };

    fn game_id(value: &str) -> GameId {
        GameId::new(value.to_string()).unwrap()
    }

    fn conn(value: &str) -> ConnectionId {
        ConnectionId::new(value.to_string()).unwrap()
    }

    fn create_test_usecase() -> (
        JoinGameUseCase,
        Arc<InMemorySessionRegistry>,
        Arc<ConnectionIndex>,
        Arc<WebSocketRoomPusher>,
    ) {
        let registry = Arc::new(InMemorySessionRegistry::new());
        let index = Arc::new(ConnectionIndex::new());
        let pusher = Arc::new(WebSocketRoomPusher::new());
        let usecase = JoinGameUseCase::new(registry.clone(), index.clone(), pusher.clone());
        (usecase, registry, index, pusher)
    }

    #[tokio::test]
    async fn test_join_creates_game_and_assigns_slot() {
        // テスト項目: 存在しないゲームへの参加で、作成とスロット割り当てが行われる
        // given (前提条件):
        let (usecase, registry, index, pusher) = create_test_usecase();

        // when (操作):
        let result = usecase
            .execute(game_id("g1"), PlayerRole::X, 3, 3, conn("c1"))
            .await;

        // then (期待する結果):
        let (snapshot, role) = result.unwrap();
        assert_eq!(role, PlayerRole::X);
        assert_eq!(snapshot.slot_x, Some(conn("c1")));
        assert_eq!(snapshot.active_mark, Mark::X);
        assert!(
            snapshot
                .board
                .iter()
                .all(|row| row.iter().all(|c| *c == Cell::Empty))
        );

        // レジストリ・インデックス・ルームの全てに反映されている
        assert!(registry.snapshot(&game_id("g1")).await.is_ok());
        assert_eq!(index.game_of(&conn("c1")).await, Some(game_id("g1")));
        assert_eq!(pusher.room_size(&game_id("g1")).await, 1);
    }

    #[tokio::test]
    async fn test_join_existing_game_inherits_state() {
        // テスト項目: 既存ゲームへの参加は盤面と手番を引き継ぐ
        // given (前提条件):
        let (usecase, registry, _index, _pusher) = create_test_usecase();
        usecase
            .execute(game_id("g1"), PlayerRole::X, 3, 3, conn("c1"))
            .await
            .unwrap();
        usecase
            .execute(game_id("g1"), PlayerRole::O, 3, 3, conn("c2"))
            .await
            .unwrap();
        registry
            .apply_move(&game_id("g1"), &conn("c1"), 0, 0)
            .await
            .unwrap();
        registry
            .vacate_slots(&game_id("g1"), &conn("c1"))
            .await
            .unwrap();

        // when (操作): 新しい接続が空いた X スロットに参加する
        let result = usecase
            .execute(game_id("g1"), PlayerRole::X, 9, 9, conn("c3"))
            .await;

        // then (期待する結果): 盤面サイズ・既着手・手番は元のまま
        let (snapshot, _role) = result.unwrap();
        assert_eq!(snapshot.rows, 3);
        assert_eq!(snapshot.cols, 3);
        assert_eq!(snapshot.board[0][0], Cell::X);
        assert_eq!(snapshot.active_mark, Mark::O);
        assert_eq!(snapshot.slot_x, Some(conn("c3")));
    }

    #[tokio::test]
    async fn test_join_second_game_releases_first_slot() {
        // テスト項目: 別のゲームに参加し直すと元のゲームのスロットが空く
        // given (前提条件):
        let (usecase, registry, index, pusher) = create_test_usecase();
        usecase
            .execute(game_id("g1"), PlayerRole::X, 3, 3, conn("c1"))
            .await
            .unwrap();

        // when (操作): 同じ接続が g2 に X として参加する
        let result = usecase
            .execute(game_id("g2"), PlayerRole::X, 3, 3, conn("c1"))
            .await;

        // then (期待する結果): 占有しているのは g2 のスロットだけ
        assert!(result.is_ok());
        let g1 = registry.snapshot(&game_id("g1")).await.unwrap();
        let g2 = registry.snapshot(&game_id("g2")).await.unwrap();
        assert!(g1.slot_x.is_none());
        assert_eq!(g2.slot_x, Some(conn("c1")));
        assert_eq!(index.game_of(&conn("c1")).await, Some(game_id("g2")));
        assert_eq!(pusher.room_size(&game_id("g1")).await, 0);
        assert_eq!(pusher.room_size(&game_id("g2")).await, 1);

        // 空いた g1 の X スロットは別の接続が取れる
        let retry = usecase
            .execute(game_id("g1"), PlayerRole::X, 3, 3, conn("c2"))
            .await;
        assert!(retry.is_ok());
    }

    #[tokio::test]
    async fn test_failed_join_to_other_game_keeps_original_slot() {
        // テスト項目: 移動先のスロットが取れなければ元のスロットは保持される
        // given (前提条件): g2 の X は既に別の接続が占有
        let (usecase, registry, index, _pusher) = create_test_usecase();
        usecase
            .execute(game_id("g1"), PlayerRole::X, 3, 3, conn("c1"))
            .await
            .unwrap();
        usecase
            .execute(game_id("g2"), PlayerRole::X, 3, 3, conn("c2"))
            .await
            .unwrap();

        // when (操作): c1 が g2 の X を要求する
        let result = usecase
            .execute(game_id("g2"), PlayerRole::X, 3, 3, conn("c1"))
            .await;

        // then (期待する結果): 失敗し、c1 は g1 の X を保持したまま
        assert_eq!(
            result,
            Err(JoinGameError::Rejected(SessionError::SlotTaken(
                PlayerRole::X
            )))
        );
        let g1 = registry.snapshot(&game_id("g1")).await.unwrap();
        assert_eq!(g1.slot_x, Some(conn("c1")));
        assert_eq!(index.game_of(&conn("c1")).await, Some(game_id("g1")));
    }

    #[tokio::test]
    async fn test_disconnect_after_moving_games_leaves_no_held_slot() {
        // テスト項目: ゲームを移った接続の切断後、どのスロットも残らない
        // given (前提条件):
        let (usecase, registry, index, pusher) = create_test_usecase();
        let disconnect = crate::usecase::DisconnectConnectionUseCase::new(
            registry.clone(),
            index.clone(),
            pusher.clone(),
        );
        usecase
            .execute(game_id("g1"), PlayerRole::X, 3, 3, conn("c1"))
            .await
            .unwrap();
        usecase
            .execute(game_id("g2"), PlayerRole::X, 3, 3, conn("c1"))
            .await
            .unwrap();

        // when (操作):
        let vacated = disconnect.execute(&conn("c1")).await;

        // then (期待する結果): g1 も g2 も X スロットは空
        assert_eq!(vacated, Some(game_id("g2")));
        let g1 = registry.snapshot(&game_id("g1")).await.unwrap();
        let g2 = registry.snapshot(&game_id("g2")).await.unwrap();
        assert!(g1.slot_x.is_none());
        assert!(g2.slot_x.is_none());
        assert_eq!(index.game_of(&conn("c1")).await, None);
    }

    #[tokio::test]
    async fn test_switch_role_in_same_game_is_rejected() {
        // テスト項目: 同じゲーム内での役割の変更は拒否される
        // given (前提条件):
        let (usecase, registry, index, _pusher) = create_test_usecase();
        usecase
            .execute(game_id("g1"), PlayerRole::X, 3, 3, conn("c1"))
            .await
            .unwrap();

        // when (操作): X を持つ接続が O スロットを要求する
        let result = usecase
            .execute(game_id("g1"), PlayerRole::O, 3, 3, conn("c1"))
            .await;

        // then (期待する結果): 拒否され、元の割り当てと索引はそのまま
        assert_eq!(
            result,
            Err(JoinGameError::Rejected(SessionError::AlreadySeated))
        );
        let snapshot = registry.snapshot(&game_id("g1")).await.unwrap();
        assert_eq!(snapshot.slot_x, Some(conn("c1")));
        assert!(snapshot.slot_o.is_none());
        assert_eq!(index.game_of(&conn("c1")).await, Some(game_id("g1")));
    }

    #[tokio::test]
    async fn test_join_taken_slot_fails() {
        // テスト項目: 占有済みスロットへの参加は SlotTaken で失敗する
        // given (前提条件):
        let (usecase, _registry, index, _pusher) = create_test_usecase();
        usecase
            .execute(game_id("g1"), PlayerRole::X, 3, 3, conn("c1"))
            .await
            .unwrap();

        // when (操作):
        let result = usecase
            .execute(game_id("g1"), PlayerRole::X, 3, 3, conn("c2"))
            .await;

        // then (期待する結果): 失敗し、c2 はどこにも登録されない
        assert_eq!(
            result,
            Err(JoinGameError::Rejected(SessionError::SlotTaken(
                PlayerRole::X
            )))
        );
        assert_eq!(index.game_of(&conn("c2")).await, None);
    }

    #[tokio::test]
    async fn test_join_with_invalid_dimensions_fails() {
        // テスト項目: 不正な盤面サイズでの新規ゲーム参加は失敗する
        // given (前提条件):
        let (usecase, registry, _index, _pusher) = create_test_usecase();

        // when (操作):
        let result = usecase
            .execute(game_id("g1"), PlayerRole::X, 0, 3, conn("c1"))
            .await;

        // then (期待する結果):
        assert_eq!(
            result,
            Err(JoinGameError::Rejected(SessionError::InvalidDimensions {
                rows: 0,
                cols: 3
            }))
        );
        assert!(registry.snapshot(&game_id("g1")).await.is_err());
    }

    #[tokio::test]
    async fn test_spectator_joins_room_but_not_index() {
        // テスト項目: 観戦者はルームに入るが ConnectionIndex には登録されない
        // given (前提条件):
        let (usecase, _registry, index, pusher) = create_test_usecase();
        usecase
            .execute(game_id("g1"), PlayerRole::X, 3, 3, conn("c1"))
            .await
            .unwrap();

        // when (操作):
        let result = usecase
            .execute(game_id("g1"), PlayerRole::Spectator, 3, 3, conn("watcher"))
            .await;

        // then (期待する結果):
        let (snapshot, role) = result.unwrap();
        assert_eq!(role, PlayerRole::Spectator);
        assert_eq!(snapshot.slot_x, Some(conn("c1")));
        assert!(snapshot.slot_o.is_none());
        assert_eq!(index.game_of(&conn("watcher")).await, None);
        assert_eq!(pusher.room_size(&game_id("g1")).await, 2);
    }

    #[tokio::test]
    async fn test_join_enrolls_connection_in_room() {
        // テスト項目: 参加に成功した接続がルームに登録される（mock で検証）
        // given (前提条件):
        let registry = Arc::new(InMemorySessionRegistry::new());
        let index = Arc::new(ConnectionIndex::new());
        let mut mock_pusher = MockRoomPusher::new();
        mock_pusher
            .expect_enter_room()
            .withf(|game_id, connection_id| {
                game_id.as_str() == "g1" && connection_id.as_str() == "c1"
            })
            .times(1)
            .returning(|_, _| ());
        let usecase = JoinGameUseCase::new(registry, index, Arc::new(mock_pusher));

        // when (操作):
        let result = usecase
            .execute(game_id("g1"), PlayerRole::X, 3, 3, conn("c1"))
            .await;

        // then (期待する結果): enter_room がちょうど 1 回呼ばれている
        assert!(result.is_ok());
    }
}

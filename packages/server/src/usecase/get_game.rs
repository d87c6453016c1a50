//! UseCase: ゲーム詳細取得処理

use std::sync::Arc;

use crate::domain::{GameId, SessionError, SessionRegistry, SessionSnapshot};

/// ゲーム詳細取得のユースケース
pub struct GetGameUseCase {
    /// SessionRegistry（セッション表の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl GetGameUseCase {
    /// 新しい GetGameUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// ゲームのスナップショットを取得
    ///
    /// # Arguments
    ///
    /// * `game_id` - 取得するゲームの ID
    pub async fn execute(&self, game_id: &GameId) -> Result<SessionSnapshot, SessionError> {
        self.registry.snapshot(game_id).await
    }
}

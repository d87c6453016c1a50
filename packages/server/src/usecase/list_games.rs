//! UseCase: ゲーム一覧取得処理

use std::sync::Arc;

use crate::domain::{SessionRegistry, SessionSnapshot};

/// ゲーム一覧取得のユースケース
pub struct ListGamesUseCase {
    /// SessionRegistry（セッション表の抽象化）
    registry: Arc<dyn SessionRegistry>,
}

impl ListGamesUseCase {
    /// 新しい ListGamesUseCase を作成
    pub fn new(registry: Arc<dyn SessionRegistry>) -> Self {
        Self { registry }
    }

    /// 全ゲームのスナップショットを ID 昇順で取得
    pub async fn execute(&self) -> Vec<SessionSnapshot> {
        self.registry.list().await
    }
}

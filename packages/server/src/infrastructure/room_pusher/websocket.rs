//! WebSocket を使った RoomPusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` の管理
//! - ルーム（ゲーム単位の配信グループ）のメンバー管理
//! - メッセージ送信（push_to, broadcast_room）
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に
//! 使用します。ルームのメンバーにはプレイヤーと観戦者の両方が含まれます。
//! 観戦者は ConnectionIndex に載らないため、切断時の掃除は
//! `unregister_connection` が全ルームを走査することで行います。

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, GameId, PushError, PusherChannel, RoomPusher};

/// WebSocket を使った RoomPusher 実装
pub struct WebSocketRoomPusher {
    /// 接続中のクライアントの sender
    ///
    /// Key: connection_id (String)
    /// Value: PusherChannel
    clients: Mutex<HashMap<String, PusherChannel>>,
    /// ルームのメンバー
    ///
    /// Key: game_id (String)
    /// Value: connection_id の集合
    rooms: Mutex<HashMap<String, HashSet<String>>>,
}

impl WebSocketRoomPusher {
    /// 空の WebSocketRoomPusher を作成
    pub fn new() -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
            rooms: Mutex::new(HashMap::new()),
        }
    }

    /// ルームの現在のメンバー数（テスト・観測用）
    pub async fn room_size(&self, game_id: &GameId) -> usize {
        let rooms = self.rooms.lock().await;
        rooms.get(game_id.as_str()).map_or(0, |members| members.len())
    }
}

impl Default for WebSocketRoomPusher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RoomPusher for WebSocketRoomPusher {
    async fn register_connection(
        &self,
        connection_id: ConnectionId,
        sender: PusherChannel,
    ) -> bool {
        let mut clients = self.clients.lock().await;
        if clients.contains_key(connection_id.as_str()) {
            return false;
        }
        clients.insert(connection_id.as_str().to_string(), sender);
        tracing::debug!("Connection '{}' registered to RoomPusher", connection_id);
        true
    }

    async fn unregister_connection(&self, connection_id: &ConnectionId) {
        {
            let mut clients = self.clients.lock().await;
            clients.remove(connection_id.as_str());
        }
        // 観戦者は ConnectionIndex に載らないので、ここで全ルームから掃除する
        {
            let mut rooms = self.rooms.lock().await;
            for members in rooms.values_mut() {
                members.remove(connection_id.as_str());
            }
        }
        tracing::debug!("Connection '{}' unregistered from RoomPusher", connection_id);
    }

    async fn enter_room(&self, game_id: &GameId, connection_id: ConnectionId) {
        let mut rooms = self.rooms.lock().await;
        rooms
            .entry(game_id.as_str().to_string())
            .or_default()
            .insert(connection_id.as_str().to_string());
        tracing::debug!("Connection '{}' entered room '{}'", connection_id, game_id);
    }

    async fn leave_room(&self, game_id: &GameId, connection_id: &ConnectionId) {
        let mut rooms = self.rooms.lock().await;
        if let Some(members) = rooms.get_mut(game_id.as_str()) {
            members.remove(connection_id.as_str());
        }
        tracing::debug!("Connection '{}' left room '{}'", connection_id, game_id);
    }

    async fn push_to(
        &self,
        connection_id: &ConnectionId,
        content: &str,
    ) -> Result<(), PushError> {
        let clients = self.clients.lock().await;

        if let Some(sender) = clients.get(connection_id.as_str()) {
            sender
                .send(content.to_string())
                .map_err(|e| PushError::PushFailed(e.to_string()))?;
            tracing::debug!("Pushed message to connection '{}'", connection_id);
            Ok(())
        } else {
            Err(PushError::ConnectionNotFound(
                connection_id.as_str().to_string(),
            ))
        }
    }

    async fn broadcast_room(&self, game_id: &GameId, content: &str) -> Result<(), PushError> {
        let members: Vec<String> = {
            let rooms = self.rooms.lock().await;
            rooms
                .get(game_id.as_str())
                .map(|members| members.iter().cloned().collect())
                .unwrap_or_default()
        };

        let clients = self.clients.lock().await;
        for member in members {
            if let Some(sender) = clients.get(&member) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!("Failed to push message to connection '{}': {}", member, e);
                } else {
                    tracing::debug!("Broadcasted message to connection '{}'", member);
                }
            } else {
                tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    member
                );
            }
        }

        Ok(())
    }
}

//! Server execution logic.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    domain::RoomPusher,
    usecase::{
        DisconnectConnectionUseCase, GetGameUseCase, JoinGameUseCase, ListGamesUseCase,
        PlayMoveUseCase,
    },
};

use super::{
    handler::{get_game_detail, get_games, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket game server
///
/// This struct encapsulates the server configuration and provides methods to run the server.
///
/// # Example
///
/// ```ignore
/// let server = Server::new(
///     join_game_usecase,
///     play_move_usecase,
///     disconnect_connection_usecase,
///     get_game_usecase,
///     list_games_usecase,
///     room_pusher,
/// );
/// server.run("127.0.0.1".to_string(), 8080).await?;
/// ```
pub struct Server {
    /// JoinGameUseCase（ゲーム参加のユースケース）
    join_game_usecase: Arc<JoinGameUseCase>,
    /// PlayMoveUseCase（着手のユースケース）
    play_move_usecase: Arc<PlayMoveUseCase>,
    /// DisconnectConnectionUseCase（切断のユースケース）
    disconnect_connection_usecase: Arc<DisconnectConnectionUseCase>,
    /// GetGameUseCase（ゲーム詳細取得のユースケース）
    get_game_usecase: Arc<GetGameUseCase>,
    /// ListGamesUseCase（ゲーム一覧取得のユースケース）
    list_games_usecase: Arc<ListGamesUseCase>,
    /// RoomPusher（接続チャネルの登録・解除に使う）
    room_pusher: Arc<dyn RoomPusher>,
}

impl Server {
    /// Create a new Server instance
    ///
    /// # Arguments
    ///
    /// * `join_game_usecase` - UseCase for joining a game
    /// * `play_move_usecase` - UseCase for playing a move
    /// * `disconnect_connection_usecase` - UseCase for connection teardown
    /// * `get_game_usecase` - UseCase for getting game detail
    /// * `list_games_usecase` - UseCase for listing games
    /// * `room_pusher` - Pusher used for connection channel registration
    pub fn new(
        join_game_usecase: Arc<JoinGameUseCase>,
        play_move_usecase: Arc<PlayMoveUseCase>,
        disconnect_connection_usecase: Arc<DisconnectConnectionUseCase>,
        get_game_usecase: Arc<GetGameUseCase>,
        list_games_usecase: Arc<ListGamesUseCase>,
        room_pusher: Arc<dyn RoomPusher>,
    ) -> Self {
        Self {
            join_game_usecase,
            play_move_usecase,
            disconnect_connection_usecase,
            get_game_usecase,
            list_games_usecase,
            room_pusher,
        }
    }

    /// Run the WebSocket game server
    ///
    /// # Arguments
    ///
    /// * `host` - The host address to bind to (e.g., "127.0.0.1")
    /// * `port` - The port number to bind to (e.g., 8080)
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let app_state = Arc::new(AppState {
            join_game_usecase: self.join_game_usecase,
            play_move_usecase: self.play_move_usecase,
            disconnect_connection_usecase: self.disconnect_connection_usecase,
            get_game_usecase: self.get_game_usecase,
            list_games_usecase: self.list_games_usecase,
            room_pusher: self.room_pusher,
        });

        // Define handlers
        let app = Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/games", get(get_games))
            .route("/api/games/{game_id}", get(get_game_detail))
            // ブラウザのフロントエンドから直接叩けるように全オリジンを許可
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(app_state);

        // Bind the server to the host and port
        let bind_addr = format!("{}:{}", host, port);
        let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

        // Start the server
        tracing::info!(
            "WebSocket game server listening on {}",
            listener.local_addr()?
        );
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        // Set up graceful shutdown signal handler
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

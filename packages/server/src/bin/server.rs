//! WebSocket game server for turn-based grid games.
//!
//! Hosts multiple sessions; players and spectators join over WebSocket and
//! every accepted move is broadcast to the session's room.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin goban-server
//! cargo run --bin goban-server -- --host 0.0.0.0 --port 3000
//! ```

use std::sync::Arc;

use clap::Parser;

use goban_server::{
    infrastructure::{ConnectionIndex, InMemorySessionRegistry, WebSocketRoomPusher},
    ui::Server,
    usecase::{
        DisconnectConnectionUseCase, GetGameUseCase, JoinGameUseCase, ListGamesUseCase,
        PlayMoveUseCase,
    },
};
use goban_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "goban-server")]
#[command(about = "WebSocket server for turn-based grid games", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    // Initialize dependencies in order:
    // 1. SessionRegistry
    // 2. ConnectionIndex
    // 3. RoomPusher
    // 4. UseCases
    // 5. Server

    // 1. Create SessionRegistry (in-memory session table)
    let registry = Arc::new(InMemorySessionRegistry::new());

    // 2. Create ConnectionIndex (connection -> game lookup)
    let connection_index = Arc::new(ConnectionIndex::new());

    // 3. Create RoomPusher (WebSocket implementation)
    let room_pusher = Arc::new(WebSocketRoomPusher::new());

    // 4. Create UseCases
    let join_game_usecase = Arc::new(JoinGameUseCase::new(
        registry.clone(),
        connection_index.clone(),
        room_pusher.clone(),
    ));
    let play_move_usecase = Arc::new(PlayMoveUseCase::new(
        registry.clone(),
        connection_index.clone(),
        room_pusher.clone(),
    ));
    let disconnect_connection_usecase = Arc::new(DisconnectConnectionUseCase::new(
        registry.clone(),
        connection_index.clone(),
        room_pusher.clone(),
    ));
    let get_game_usecase = Arc::new(GetGameUseCase::new(registry.clone()));
    let list_games_usecase = Arc::new(ListGamesUseCase::new(registry.clone()));

    // 5. Create and run the server
    let server = Server::new(
        join_game_usecase,
        play_move_usecase,
        disconnect_connection_usecase,
        get_game_usecase,
        list_games_usecase,
        room_pusher,
    );
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

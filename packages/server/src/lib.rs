//! Turn-based grid game server library.
//!
//! Two players share a grid board over persistent WebSocket connections,
//! taking alternating turns; spectators can watch a game room without
//! holding a player slot.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

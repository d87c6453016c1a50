//! Infrastructure layer: concrete implementations of the domain
//! interfaces plus wire-format DTOs.

pub mod connection_index;
pub mod dto;
pub mod registry;
pub mod room_pusher;

pub use connection_index::ConnectionIndex;
pub use registry::InMemorySessionRegistry;
pub use room_pusher::WebSocketRoomPusher;

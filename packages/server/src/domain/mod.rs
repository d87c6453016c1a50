//! Domain layer: game sessions, boards, and the interfaces the
//! UseCase layer depends on.

pub mod entity;
pub mod error;
pub mod pusher;
pub mod registry;
pub mod value_object;

pub use entity::{Board, GameSession, SessionSnapshot};
pub use error::{PushError, SessionError, ValueError};
pub use pusher::{PusherChannel, RoomPusher};
pub use registry::SessionRegistry;
pub use value_object::{Cell, ConnectionId, GameId, Mark, PlayerRole, Timestamp};

//! ドメインエンティティ定義

pub mod board;
pub mod session;

pub use board::Board;
pub use session::{GameSession, SessionSnapshot};

//! Shared utilities for the goban game server.
//!
//! Holds the pieces that are independent of the game domain:
//! logging setup and time helpers.

pub mod logger;
pub mod time;

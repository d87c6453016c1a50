//! SessionRegistry 実装

pub mod inmemory;

pub use inmemory::InMemorySessionRegistry;

//! Storage layer: the in-memory board and its persistence

pub mod board;
pub mod id_generator;
pub mod location;
pub mod persistence;
pub mod session;

pub use board::{Board, Snapshot};
pub use id_generator::IdGenerator;
pub use location::{DataLocation, LocationError};
pub use persistence::{
    FileKeyValueStore, KeyValueStore, MemoryKeyValueStore, Persistence, PersistenceError,
    STORAGE_KEY,
};
pub use session::Session;

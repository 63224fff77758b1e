//! Persistence layer: named blob containers over libSQL or memory.

pub mod container;
pub mod libsql_backend;
pub mod memory;
pub mod migrations;
pub mod traits;

pub use container::{Container, ContainerState};
pub use libsql_backend::LibSqlStore;
pub use memory::MemoryStore;
pub use traits::BlobStore;

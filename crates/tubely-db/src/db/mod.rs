//! Database repositories for data access layer
//
// Record store trait shared by every backend
mod store;
//
// Postgres-backed store
pub mod video;
//
// Map-backed store for tests and tooling
pub mod memory;

pub use memory::InMemoryVideoStore;
pub use store::VideoStore;
pub use video::PgVideoStore;

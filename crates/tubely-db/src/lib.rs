//! Tubely Database Library
//!
//! Persistence for video records. The upload pipeline only sees the [`VideoStore`] trait;
//! [`PgVideoStore`] backs it with Postgres and [`InMemoryVideoStore`] with a map for tests and
//! local tooling.

pub mod db;

pub use db::{InMemoryVideoStore, PgVideoStore, VideoStore};

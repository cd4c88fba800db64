//! Brandkit Redis Data Layer
//!
//! Async Redis persistence for generated design systems. Rows are stored as
//! JSON blobs; the domain mapping lives in `brandkit-core`.

pub mod client;
pub mod queries;

pub use client::{RedisError, RedisPool, RedisResult, init_pool, KEY_PREFIX};
pub use queries::design_systems;

//! Query modules for entities stored in Redis.

pub mod design_systems;

//! Brandkit Core Library
//!
//! Deterministic design-system generation: color-space math, brand analysis,
//! palette derivation, typography, spacing tokens, plus the persistence and
//! analytics seams used by the web and CLI front ends.

pub mod analytics;
pub mod color;
pub mod config;
pub mod design;
pub mod error;
pub mod palette;
pub mod spacing;
pub mod typography;

pub use config::BrandkitConfig;
pub use error::{BrandkitError, BrandkitResult};

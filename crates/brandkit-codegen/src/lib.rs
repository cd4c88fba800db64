//! # Brandkit Codegen
//!
//! Turns generated design tokens into artifacts: framework component code
//! (React, Vue, Svelte, HTML, CSS) rendered from tera templates, and token
//! exports (CSS, SCSS, Tailwind, JSON, markdown). Also hosts the
//! [`DesignEngine`] that runs the whole generation pipeline.

pub mod components;
pub mod error;
pub mod export;
pub mod pipeline;

pub use components::{
    generate_all_components_with_templates, ComponentKind, ComponentRenderer, ComponentTokens, Framework,
};
pub use error::{CodegenError, CodegenResult};
pub use export::{export_design_system, ExportFormat};
pub use pipeline::{DesignEngine, GenerateRequest, Generation};

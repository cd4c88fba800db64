//! Brand analysis and color palette generation.

pub mod analysis;
pub mod cache;
pub mod classifier;
pub mod generator;

pub use analysis::{analyze_locally, BrandAnalysis};
pub use cache::{CacheStats, MemoCache};
pub use classifier::{
    analyze_brand_description, analyze_with_report, AiError, AnalysisReport, AnalysisSource,
    BrandClassifier, ClaudeClassifier,
};
pub use generator::{
    generate_primary_color, generate_semantic_colors, ColorSource, ColorSystem,
    ComplementaryColors, ContrastCheck, PaletteCacheStats, PaletteGenerator, PrimaryColor,
    SemanticColors,
};

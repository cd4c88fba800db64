//! Full design system generation.

use anyhow::{Context, Result};
use brandkit_codegen::GenerateRequest;
use brandkit_core::design::{open_store, DesignSystem};
use brandkit_core::BrandkitConfig;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use super::{engine, print_json, DEFAULT_OWNER, OWNER_ENV};
use crate::output;

#[derive(Args)]
pub struct GenerateArgs {
    /// Brand description, e.g. "A playful fintech app for teenagers"
    pub description: String,

    /// Typography personality (modern, classic, playful, ...)
    #[arg(long)]
    pub personality: Option<String>,

    /// Override the detected industry
    #[arg(long)]
    pub industry: Option<String>,

    /// Save the result to the configured store
    #[arg(long)]
    pub save: bool,

    /// Name for the saved design system
    #[arg(long, requires = "save")]
    pub name: Option<String>,

    /// Owner of the saved design system
    #[arg(long, env = OWNER_ENV, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Print JSON instead of the terminal view
    #[arg(long)]
    pub json: bool,

    /// Skip the AI classifier and use keyword analysis only
    #[arg(long)]
    pub no_ai: bool,
}

pub async fn execute(args: GenerateArgs, config: &BrandkitConfig) -> Result<()> {
    let description = args.description.trim();
    if description.is_empty() {
        anyhow::bail!("Description must not be empty");
    }

    let engine = engine(config)?;
    let request = GenerateRequest {
        description: description.to_string(),
        personality: args.personality,
        industry: args.industry,
        skip_ai: args.no_ai,
    };
    let generation = engine.generate(&request).await?;

    let saved_id = if args.save {
        let store = open_store(config).await.context("Failed to open storage")?;
        let name = args
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| description.split_whitespace().take(4).collect::<Vec<_>>().join(" "));
        let design = DesignSystem::new(
            &args.owner,
            name.trim(),
            description,
            Some(generation.report.analysis.clone()),
            generation.data.clone(),
        );
        store.save(&design).await?;
        Some(design.id)
    } else {
        None
    };

    if args.json {
        return print_json(&json!({
            "id": saved_id,
            "analysis": generation.report.analysis,
            "colors": generation.data.colors,
            "typography": generation.data.typography,
            "spacing": generation.data.spacing,
            "components": generation.data.components,
        }));
    }

    output::print_analysis(&generation.report);
    println!();
    output::print_palette(&generation.data.colors);
    println!();
    output::print_typography(&generation.data.typography);
    println!();
    println!("{}", "Components".bold());
    output::print_components(&generation.data.components);

    if let Some(id) = saved_id {
        println!();
        println!("{} Saved design system (id: {})", "✓".green().bold(), output::short_id(&id));
    }
    Ok(())
}

//! Saved design system commands: export, list and delete.

use anyhow::{Context, Result};
use brandkit_codegen::{export_design_system, ExportFormat};
use brandkit_core::design::{open_store, DesignStore, DesignSystem};
use brandkit_core::BrandkitConfig;
use clap::Args;
use colored::Colorize;
use dialoguer::Confirm;
use std::path::PathBuf;

use super::{print_json, DEFAULT_OWNER, OWNER_ENV};
use crate::output;

#[derive(Args)]
pub struct ExportArgs {
    /// Design system id (a unique prefix is enough)
    pub id: String,

    /// Output format: css, scss, tailwind, json or markdown
    #[arg(long, default_value = "css")]
    pub format: String,

    /// Write to this path instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Owner of the design system
    #[arg(long, env = OWNER_ENV, default_value = DEFAULT_OWNER)]
    pub owner: String,
}

#[derive(Args)]
pub struct ListArgs {
    /// Owner whose design systems are listed
    #[arg(long, env = OWNER_ENV, default_value = DEFAULT_OWNER)]
    pub owner: String,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DeleteArgs {
    /// Design system id (a unique prefix is enough)
    pub id: String,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,

    /// Owner of the design system
    #[arg(long, env = OWNER_ENV, default_value = DEFAULT_OWNER)]
    pub owner: String,
}

/// Find a design system by full id or by unique id prefix.
async fn resolve(store: &dyn DesignStore, owner: &str, id: &str) -> Result<DesignSystem> {
    let designs = store.list(owner).await?;
    if let Some(design) = designs.iter().find(|d| d.id == id) {
        return Ok(design.clone());
    }
    let mut matches = designs.into_iter().filter(|d| d.id.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(design), None) => Ok(design),
        (Some(_), Some(_)) => anyhow::bail!("Ambiguous id prefix: {}", id),
        (None, _) => anyhow::bail!("Design system not found: {}", id),
    }
}

pub async fn export(args: ExportArgs, config: &BrandkitConfig) -> Result<()> {
    let format = ExportFormat::parse(&args.format)?;
    let store = open_store(config).await.context("Failed to open storage")?;
    let design = resolve(store.as_ref(), &args.owner, &args.id).await?;
    let body = export_design_system(&design.name, &design.data, format)?;

    match args.out {
        Some(path) => {
            std::fs::write(&path, body).with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "{} Exported {} as {} to {}",
                "✓".green().bold(),
                design.name.cyan(),
                format.as_str(),
                path.display()
            );
        }
        None => print!("{}", body),
    }
    Ok(())
}

pub async fn list(args: ListArgs, config: &BrandkitConfig) -> Result<()> {
    let store = open_store(config).await.context("Failed to open storage")?;
    let summaries: Vec<_> = store.list(&args.owner).await?.iter().map(DesignSystem::summary).collect();

    if args.json {
        return print_json(&summaries);
    }
    output::print_summaries_table(&summaries);
    Ok(())
}

pub async fn delete(args: DeleteArgs, config: &BrandkitConfig) -> Result<()> {
    let store = open_store(config).await.context("Failed to open storage")?;
    let design = resolve(store.as_ref(), &args.owner, &args.id).await?;

    if !args.yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete design system '{}' ({})?", design.name, output::short_id(&design.id)))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("{}", "Aborted.".dimmed());
            return Ok(());
        }
    }

    if store.delete(&args.owner, &design.id).await? {
        println!("{} Deleted design system {}", "✓".green().bold(), output::short_id(&design.id));
    } else {
        anyhow::bail!("Design system not found: {}", args.id);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandkit_codegen::DesignEngine;
    use brandkit_core::design::MemoryDesignStore;
    use brandkit_core::palette::BrandAnalysis;

    async fn saved(store: &MemoryDesignStore, id: &str) {
        let engine = DesignEngine::new(8).unwrap();
        let data = engine.generate_from_analysis(&BrandAnalysis::default(), None).unwrap();
        let mut design = DesignSystem::new("u1", "Sample", "sample", None, data);
        design.id = id.to_string();
        store.save(&design).await.unwrap();
    }

    #[tokio::test]
    async fn test_resolve_by_id_and_prefix() {
        let store = MemoryDesignStore::new();
        saved(&store, "abc123").await;
        saved(&store, "abd456").await;

        assert_eq!(resolve(&store, "u1", "abc123").await.unwrap().id, "abc123");
        assert_eq!(resolve(&store, "u1", "abd").await.unwrap().id, "abd456");
        assert!(resolve(&store, "u1", "ab").await.is_err());
        assert!(resolve(&store, "u1", "zzz").await.is_err());
        assert!(resolve(&store, "u2", "abc123").await.is_err());
    }
}

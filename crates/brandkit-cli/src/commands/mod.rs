//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use brandkit_codegen::DesignEngine;
use brandkit_core::BrandkitConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod color;
pub mod components;
pub mod generate;
pub mod library;
pub mod serve;
pub mod typography;

/// Environment variable naming the owner of saved design systems.
pub const OWNER_ENV: &str = "BRANDKIT_USER";

/// Owner used when neither `--owner` nor `BRANDKIT_USER` is given.
pub const DEFAULT_OWNER: &str = "local";

/// Brandkit - brand design systems from a description
#[derive(Parser)]
#[command(name = "brandkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a brandkit.toml (defaults to ./brandkit.toml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a complete design system from a brand description
    Generate(generate::GenerateArgs),

    /// Generate a color palette from a description or a primary color
    Palette(color::PaletteArgs),

    /// Print the ten shades of a color
    Shades(color::ShadesArgs),

    /// Check WCAG contrast between two colors
    Contrast(color::ContrastArgs),

    /// Pick a font pairing and type scale
    Typography(typography::TypographyArgs),

    /// Render UI components for a primary color
    Components(components::ComponentsArgs),

    /// Export a saved design system
    Export(library::ExportArgs),

    /// List saved design systems
    List(library::ListArgs),

    /// Delete a saved design system
    Delete(library::DeleteArgs),

    /// Start the HTTP API server
    Serve(serve::ServeArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = BrandkitConfig::load(self.config.as_deref()).context("Failed to load configuration")?;

        match self.command {
            Commands::Generate(args) => generate::execute(args, &config).await,
            Commands::Palette(args) => color::palette(args, &config).await,
            Commands::Shades(args) => color::shades(args),
            Commands::Contrast(args) => color::contrast(args),
            Commands::Typography(args) => typography::execute(args),
            Commands::Components(args) => components::execute(args, &config),
            Commands::Export(args) => library::export(args, &config).await,
            Commands::List(args) => library::list(args, &config).await,
            Commands::Delete(args) => library::delete(args, &config).await,
            Commands::Serve(args) => serve::execute(args, config).await,
        }
    }
}

/// Build the generation engine for `config`.
pub(crate) fn engine(config: &BrandkitConfig) -> Result<DesignEngine> {
    DesignEngine::from_config(config).context("Failed to build design engine")
}

/// Print `value` as pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_generate() {
        let cli = Cli::try_parse_from([
            "brandkit",
            "--verbose",
            "generate",
            "Organic tea shop",
            "--save",
            "--name",
            "Tea",
            "--no-ai",
        ])
        .unwrap();
        assert!(cli.verbose);
        let Commands::Generate(args) = cli.command else {
            panic!("expected generate");
        };
        assert_eq!(args.description, "Organic tea shop");
        assert!(args.save && args.no_ai);
        assert_eq!(args.name.as_deref(), Some("Tea"));
    }

    #[test]
    fn test_palette_needs_description_or_primary() {
        assert!(Cli::try_parse_from(["brandkit", "palette"]).is_err());
        assert!(Cli::try_parse_from(["brandkit", "palette", "--primary", "#123456"]).is_ok());
        assert!(Cli::try_parse_from(["brandkit", "palette", "a bakery", "--primary", "#123456"]).is_err());
    }

    #[test]
    fn test_generate_name_requires_save() {
        assert!(Cli::try_parse_from(["brandkit", "generate", "x", "--name", "X"]).is_err());
    }

    #[test]
    fn test_serve_log_path() {
        let cli = Cli::try_parse_from(["brandkit", "serve", "--log", "--port", "4000"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.port, Some(4000));
        assert_eq!(args.log_path(), PathBuf::from("logs/brandkit-serve.log"));
    }
}

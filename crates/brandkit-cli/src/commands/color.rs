//! Color commands: palette, shades and contrast.

use anyhow::Result;
use brandkit_core::color::{check_wcag, generate_color_shades, normalize_hex};
use brandkit_core::BrandkitConfig;
use clap::Args;
use serde_json::json;

use super::{engine, print_json};
use crate::output;

#[derive(Args)]
pub struct PaletteArgs {
    /// Brand description to derive the palette from
    #[arg(required_unless_present = "primary", conflicts_with = "primary")]
    pub description: Option<String>,

    /// Build the palette around this primary color instead
    #[arg(long)]
    pub primary: Option<String>,

    /// Skip the AI classifier and use keyword analysis only
    #[arg(long)]
    pub no_ai: bool,

    /// Print JSON instead of the terminal view
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ShadesArgs {
    /// Base color, e.g. #3B82F6
    pub hex: String,

    /// Print JSON instead of the terminal view
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ContrastArgs {
    /// Foreground (text) color
    pub foreground: String,

    /// Background color
    pub background: String,

    /// Print JSON instead of the terminal view
    #[arg(long)]
    pub json: bool,
}

pub async fn palette(args: PaletteArgs, config: &BrandkitConfig) -> Result<()> {
    let engine = engine(config)?;

    let (report, palette) = match (args.primary, args.description) {
        (Some(primary), _) => (None, engine.palette_from_primary(&primary)?),
        (None, Some(description)) => {
            let report = engine.analyze(&description, args.no_ai).await;
            let palette = engine.palette().generate_palette(&report.analysis)?;
            (Some(report), palette)
        }
        (None, None) => anyhow::bail!("Pass a description or --primary"),
    };

    if args.json {
        return print_json(&json!({
            "analysis": report.as_ref().map(|r| &r.analysis),
            "palette": palette,
        }));
    }

    if let Some(report) = &report {
        output::print_analysis(report);
        println!();
    }
    output::print_palette(&palette);
    Ok(())
}

pub fn shades(args: ShadesArgs) -> Result<()> {
    let shades = generate_color_shades(&args.hex)?;
    if args.json {
        return print_json(&shades);
    }
    output::print_shades(&normalize_hex(&args.hex)?, &shades);
    Ok(())
}

pub fn contrast(args: ContrastArgs) -> Result<()> {
    let result = check_wcag(&args.foreground, &args.background)?;
    if args.json {
        return print_json(&result);
    }
    output::print_accessibility(
        &normalize_hex(&args.foreground)?,
        &normalize_hex(&args.background)?,
        &result,
    );
    Ok(())
}

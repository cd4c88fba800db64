//! Component rendering command.

use anyhow::Result;
use brandkit_codegen::{ComponentKind, Framework};
use brandkit_core::BrandkitConfig;
use clap::Args;
use colored::Colorize;

use super::{engine, print_json};
use crate::output;

#[derive(Args)]
pub struct ComponentsArgs {
    /// Primary brand color, e.g. #6366F1
    pub primary: String,

    /// Only render one kind: button, card, input or alert
    #[arg(long)]
    pub kind: Option<String>,

    /// Print source for one target: react, vue, svelte, html or css
    #[arg(long)]
    pub format: Option<String>,

    /// Typography personality used for component fonts
    #[arg(long)]
    pub personality: Option<String>,

    /// Print JSON instead of the terminal view
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: ComponentsArgs, config: &BrandkitConfig) -> Result<()> {
    let kind = args
        .kind
        .as_deref()
        .map(|k| ComponentKind::parse(k).ok_or_else(|| anyhow::anyhow!("Unknown component kind: {}", k)))
        .transpose()?;
    let framework = args
        .format
        .as_deref()
        .map(|f| Framework::parse(f).ok_or_else(|| anyhow::anyhow!("Unknown component format: {}", f)))
        .transpose()?;

    let components = engine(config)?.components_from_primary(
        &args.primary,
        args.personality.as_deref(),
        None,
        kind,
    )?;

    if args.json {
        return print_json(&components);
    }

    let Some(framework) = framework else {
        output::print_components(&components);
        return Ok(());
    };

    for component in &components {
        println!(
            "{}",
            format!(
                "// {}-{}.{}",
                component.name.to_lowercase(),
                component.variant,
                framework.extension()
            )
            .dimmed()
        );
        println!("{}", framework.select(&component.code));
        println!();
    }
    Ok(())
}

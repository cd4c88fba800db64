//! Typography command.

use anyhow::Result;
use brandkit_core::typography::TypographyGenerator;
use clap::Args;

use super::print_json;
use crate::output;

#[derive(Args)]
pub struct TypographyArgs {
    /// Personality: modern, classic, playful, corporate, elegant, minimal, creative, technical
    pub personality: String,

    /// Industry used when the personality is not recognized
    #[arg(long)]
    pub industry: Option<String>,

    /// Seed for a reproducible font pairing
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print JSON instead of the terminal view
    #[arg(long)]
    pub json: bool,
}

pub fn execute(args: TypographyArgs) -> Result<()> {
    let generator = match args.seed {
        Some(seed) => TypographyGenerator::with_seed(seed),
        None => TypographyGenerator::new(),
    };
    let typography = generator.generate_typography_system(&args.personality, args.industry.as_deref());

    if args.json {
        return print_json(&typography);
    }
    output::print_typography(&typography);
    Ok(())
}

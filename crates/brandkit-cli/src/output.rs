//! Terminal output formatting.

use brandkit_core::color::{hex_to_rgb, AccessibilityResult, ColorShades};
use brandkit_core::design::{DesignSummary, GeneratedComponent};
use brandkit_core::palette::{AnalysisReport, AnalysisSource, ColorSystem, ContrastCheck};
use brandkit_core::typography::TypographySystem;
use colored::{ColoredString, Colorize};
use unicode_width::UnicodeWidthStr;

/// Width of a color swatch in cells.
const SWATCH_WIDTH: usize = 4;

/// A block of terminal cells filled with `hex`. Invalid colors render blank.
pub fn swatch(hex: &str) -> ColoredString {
    let block = " ".repeat(SWATCH_WIDTH);
    match hex_to_rgb(hex) {
        Ok(rgb) => block.on_truecolor(rgb.r, rgb.g, rgb.b),
        Err(_) => block.normal(),
    }
}

/// Green PASS or red FAIL.
fn pass_fail(ok: bool) -> ColoredString {
    if ok {
        "PASS".green().bold()
    } else {
        "FAIL".red().bold()
    }
}

/// Print the analysis that drove a generation.
pub fn print_analysis(report: &AnalysisReport) {
    let analysis = &report.analysis;
    let source = match report.source {
        AnalysisSource::Ai => "ai".cyan(),
        AnalysisSource::Local => "keywords".dimmed(),
    };
    println!("{} {}", "Brand analysis".bold(), format!("({})", source).dimmed());
    println!("  {:<10} {}", "Industry", analysis.industry);
    println!("  {:<10} {}", "Tone", analysis.tone);
    if !analysis.emotions.is_empty() {
        println!("  {:<10} {}", "Emotions", analysis.emotions.join(", "));
    }
    if !analysis.keywords.is_empty() {
        println!("  {:<10} {}", "Keywords", analysis.keywords.join(", "));
    }
    if let Some(err) = &report.ai_error {
        println!("  {} {}", "AI fallback:".yellow(), err);
    }
}

/// Print one row of shades, wrapping to two rows on narrow terminals.
pub fn print_shades(label: &str, shades: &ColorShades) {
    println!("{}", label.bold());
    let per_row = if term_width() >= 130 { 10 } else { 5 };
    let entries: Vec<(u16, &str)> = shades.iter().collect();
    for row in entries.chunks(per_row) {
        let line: Vec<String> = row
            .iter()
            .map(|(key, hex)| format!("{} {:>3} {}", swatch(hex), key, hex))
            .collect();
        println!("  {}", line.join("  "));
    }
}

/// Print a full color system.
pub fn print_palette(palette: &ColorSystem) {
    print_shades("Primary", &palette.primary);
    print_shades("Secondary", &palette.secondary);
    print_shades("Accent", &palette.accent);
    print_shades("Neutral", &palette.neutral);

    println!("{}", "Semantic".bold());
    let semantic = &palette.semantic;
    for (name, hex) in [
        ("success", &semantic.success),
        ("error", &semantic.error),
        ("warning", &semantic.warning),
        ("info", &semantic.info),
    ] {
        println!("  {} {:<8} {}", swatch(hex), name, hex);
    }

    if !palette.reasoning.is_empty() {
        println!();
        println!("{}", palette.reasoning.dimmed());
    }
    if !palette.accessibility.is_empty() {
        println!();
        print_contrast_checks(&palette.accessibility);
    }
}

/// Print a single contrast check result.
pub fn print_accessibility(foreground: &str, background: &str, result: &AccessibilityResult) {
    let sample = format!(" {} on {} ", foreground, background);
    let sample = match (hex_to_rgb(foreground), hex_to_rgb(background)) {
        (Ok(fg), Ok(bg)) => sample.truecolor(fg.r, fg.g, fg.b).on_truecolor(bg.r, bg.g, bg.b),
        _ => sample.normal(),
    };
    println!("{}", sample);
    println!("  {:<16} {:.2}:1", "Contrast ratio", result.ratio);
    println!("  {:<16} {}   {:<10} {}", "AA", pass_fail(result.wcag_aa), "AA large", pass_fail(result.wcag_aa_large));
    println!("  {:<16} {}   {:<10} {}", "AAA", pass_fail(result.wcag_aaa), "AAA large", pass_fail(result.wcag_aaa_large));
}

/// Print the contrast checks bundled with a palette.
pub fn print_contrast_checks(checks: &[ContrastCheck]) {
    println!("{}", "Accessibility".bold());
    let label_width = checks
        .iter()
        .map(|c| UnicodeWidthStr::width(c.label.as_str()))
        .max()
        .unwrap_or(0);
    for check in checks {
        println!(
            "  {}  {:>5.2}:1  AA {}  AAA {}",
            pad_right(&check.label, label_width),
            check.result.ratio,
            pass_fail(check.result.wcag_aa),
            pass_fail(check.result.wcag_aaa),
        );
    }
}

/// Print a typography system.
pub fn print_typography(typography: &TypographySystem) {
    println!("{} {}", "Typography".bold(), format!("({})", typography.personality).dimmed());
    println!("  {:<8} {}", "Heading", typography.fonts.heading.cyan());
    println!("  {:<8} {}", "Body", typography.fonts.body.cyan());
    println!("  {:<8} {}", "Mono", typography.fonts.mono.cyan());
    println!();
    println!("{}", "Scale".bold());
    for (name, value) in typography.scale.iter() {
        println!("  {:<5} {}", name, value);
    }
    println!();
    println!("{}", typography.google_fonts_url.dimmed());
}

/// Print generated components, one line per variant.
pub fn print_components(components: &[GeneratedComponent]) {
    if components.is_empty() {
        println!("{}", "No components generated.".dimmed());
        return;
    }
    let width = term_width().saturating_sub(32).max(20);
    for component in components {
        println!(
            "  {} {} {}",
            pad_right(&component.name, 8).bold(),
            pad_right(&component.variant, 10).cyan(),
            truncate_visual(&component.description, width).dimmed()
        );
    }
    println!();
    println!("{} component(s) total", components.len());
}

/// Print saved design systems as a table.
pub fn print_summaries_table(summaries: &[DesignSummary]) {
    if summaries.is_empty() {
        println!("{}", "No design systems found.".dimmed());
        return;
    }

    // id(10) + swatch + color(8) + font(18) + created(10) + gaps
    let fixed = 10 + SWATCH_WIDTH + 8 + 18 + 10 + 10;
    let name_width = term_width().saturating_sub(fixed).clamp(12, 40);

    println!(
        "{:<10} {} {} {:<18} {:<10}",
        "ID",
        pad_right("Name", name_width),
        pad_right("Primary", SWATCH_WIDTH + 9),
        "Heading font",
        "Created"
    );
    println!("{}", "─".repeat(fixed + name_width));

    for summary in summaries {
        println!(
            "{:<10} {} {} {:<8} {:<18} {:<10}",
            short_id(&summary.id),
            pad_right(&truncate_visual(&summary.name, name_width), name_width),
            swatch(&summary.primary_color),
            summary.primary_color,
            truncate_visual(&summary.heading_font, 18),
            summary.created_at.get(..10).unwrap_or(&summary.created_at)
        );
    }

    println!();
    println!("{} design system(s) total", summaries.len());
}

/// First eight characters of an id.
pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 2 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

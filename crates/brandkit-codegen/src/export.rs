//! Design token export.
//!
//! Renders a design system as CSS custom properties, SCSS variables, a
//! Tailwind theme extension, a flat JSON token file or a markdown reference.

use std::collections::BTreeMap;

use brandkit_core::color::ColorShades;
use brandkit_core::design::DesignSystemData;

use crate::error::{CodegenError, CodegenResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Css,
    Scss,
    Tailwind,
    Json,
    Markdown,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::Css,
        ExportFormat::Scss,
        ExportFormat::Tailwind,
        ExportFormat::Json,
        ExportFormat::Markdown,
    ];

    pub fn parse(s: &str) -> CodegenResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "css" => Ok(Self::Css),
            "scss" | "sass" => Ok(Self::Scss),
            "tailwind" => Ok(Self::Tailwind),
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            other => Err(CodegenError::UnknownFormat(other.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Tailwind => "tailwind",
            Self::Json => "json",
            Self::Markdown => "markdown",
        }
    }

    pub fn filename(&self) -> &'static str {
        match self {
            Self::Css => "design-tokens.css",
            Self::Scss => "_design-tokens.scss",
            Self::Tailwind => "tailwind.config.js",
            Self::Json => "design-tokens.json",
            Self::Markdown => "design-system.md",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Css => "css",
            Self::Scss => "scss",
            Self::Tailwind => "js",
            Self::Json => "json",
            Self::Markdown => "md",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Css => "text/css; charset=utf-8",
            Self::Scss => "text/x-scss; charset=utf-8",
            Self::Tailwind => "application/javascript; charset=utf-8",
            Self::Json => "application/json",
            Self::Markdown => "text/markdown; charset=utf-8",
        }
    }
}

/// Export `data` in `format`. `name` is used in headers and comments.
pub fn export_design_system(name: &str, data: &DesignSystemData, format: ExportFormat) -> CodegenResult<String> {
    Ok(match format {
        ExportFormat::Css => render_css(name, data),
        ExportFormat::Scss => render_scss(name, data),
        ExportFormat::Tailwind => render_tailwind(data),
        ExportFormat::Json => render_json(name, data)?,
        ExportFormat::Markdown => render_markdown(name, data),
    })
}

/// A named group of `(token, value)` pairs.
struct TokenGroup {
    title: &'static str,
    tokens: Vec<(String, String)>,
}

fn palette_groups(data: &DesignSystemData) -> [(&'static str, &ColorShades); 4] {
    let colors = &data.colors;
    [
        ("primary", &colors.primary),
        ("secondary", &colors.secondary),
        ("accent", &colors.accent),
        ("neutral", &colors.neutral),
    ]
}

/// Every token as `(name, value)`, grouped for commented output. Names are
/// valid CSS/SCSS identifiers.
fn token_groups(data: &DesignSystemData) -> Vec<TokenGroup> {
    let mut colors = Vec::new();
    for (family, shades) in palette_groups(data) {
        for (key, hex) in shades.iter() {
            colors.push((format!("color-{}-{}", family, key), hex.to_string()));
        }
    }
    let semantic = &data.colors.semantic;
    for (name, hex) in [
        ("success", &semantic.success),
        ("error", &semantic.error),
        ("warning", &semantic.warning),
        ("info", &semantic.info),
    ] {
        colors.push((format!("color-{}", name), hex.clone()));
    }

    let t = &data.typography;
    let mut typography = vec![
        ("font-heading".to_string(), font_stack(&t.fonts.heading, "sans-serif")),
        ("font-body".to_string(), font_stack(&t.fonts.body, "sans-serif")),
        ("font-mono".to_string(), font_stack(&t.fonts.mono, "monospace")),
    ];
    for (key, value) in t.scale.iter() {
        typography.push((format!("text-{}", key), value.to_string()));
    }
    for (name, weight) in [
        ("light", t.weights.light),
        ("regular", t.weights.regular),
        ("medium", t.weights.medium),
        ("semibold", t.weights.semibold),
        ("bold", t.weights.bold),
    ] {
        typography.push((format!("font-weight-{}", name), weight.to_string()));
    }
    for (name, value) in [
        ("tight", t.line_heights.tight),
        ("normal", t.line_heights.normal),
        ("relaxed", t.line_heights.relaxed),
    ] {
        typography.push((format!("leading-{}", name), value.to_string()));
    }
    for (name, value) in [
        ("tight", &t.letter_spacing.tight),
        ("normal", &t.letter_spacing.normal),
        ("wide", &t.letter_spacing.wide),
    ] {
        typography.push((format!("tracking-{}", name), value.clone()));
    }

    let s = &data.spacing;
    let spacing = s
        .scale
        .iter()
        .map(|t| (format!("space-{}", t.name.replace('.', "_")), t.value.clone()))
        .collect();
    let radius = s
        .radius
        .iter()
        .map(|t| (format!("radius-{}", t.name), t.value.clone()))
        .collect();
    let shadows = s
        .shadows
        .iter()
        .map(|t| (format!("shadow-{}", t.name), t.value.clone()))
        .collect();

    vec![
        TokenGroup { title: "Colors", tokens: colors },
        TokenGroup { title: "Typography", tokens: typography },
        TokenGroup { title: "Spacing", tokens: spacing },
        TokenGroup { title: "Border Radius", tokens: radius },
        TokenGroup { title: "Shadows", tokens: shadows },
    ]
}

/// `name` reduced to one line that cannot close a block comment.
fn comment_safe(name: &str) -> String {
    let mut safe: String = name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    while safe.contains("*/") {
        safe = safe.replace("*/", "");
    }
    safe.trim().to_string()
}

fn font_stack(family: &str, generic: &str) -> String {
    format!("'{}', {}", family, generic)
}

fn render_css(name: &str, data: &DesignSystemData) -> String {
    let mut css = String::new();
    css.push_str(&format!("/* {} design tokens, generated by brandkit */\n", comment_safe(name)));
    css.push_str(&format!("@import url('{}');\n\n", data.typography.google_fonts_url));
    css.push_str(":root {\n");
    for (i, group) in token_groups(data).iter().enumerate() {
        if i > 0 {
            css.push('\n');
        }
        css.push_str(&format!("  /* {} */\n", group.title));
        for (token, value) in &group.tokens {
            css.push_str(&format!("  --{}: {};\n", token, value));
        }
    }
    css.push_str("}\n");
    css
}

fn render_scss(name: &str, data: &DesignSystemData) -> String {
    let mut scss = String::new();
    scss.push_str(&format!("// {} design tokens, generated by brandkit\n", comment_safe(name)));
    for group in token_groups(data) {
        scss.push_str(&format!("\n// {}\n", group.title));
        for (token, value) in &group.tokens {
            scss.push_str(&format!("${}: {};\n", token, value));
        }
    }
    scss
}

fn js_object(indent: usize, entries: &[(String, String)]) -> String {
    let pad = " ".repeat(indent);
    let mut out = String::from("{\n");
    for (key, value) in entries {
        out.push_str(&format!("{}  '{}': {},\n", pad, key, value));
    }
    out.push_str(&format!("{}}}", pad));
    out
}

fn quoted(s: &str) -> String {
    format!("'{}'", s.replace('\'', "\\'"))
}

fn render_tailwind(data: &DesignSystemData) -> String {
    let t = &data.typography;
    let s = &data.spacing;

    let mut colors: Vec<(String, String)> = palette_groups(data)
        .iter()
        .map(|(family, shades)| {
            let entries: Vec<(String, String)> = shades
                .iter()
                .map(|(key, hex)| (key.to_string(), quoted(hex)))
                .collect();
            (family.to_string(), js_object(8, &entries))
        })
        .collect();
    let semantic = &data.colors.semantic;
    colors.push(("success".to_string(), quoted(&semantic.success)));
    colors.push(("error".to_string(), quoted(&semantic.error)));
    colors.push(("warning".to_string(), quoted(&semantic.warning)));
    colors.push(("info".to_string(), quoted(&semantic.info)));

    let font_family = vec![
        ("heading".to_string(), format!("[{}, 'sans-serif']", quoted(&t.fonts.heading))),
        ("body".to_string(), format!("[{}, 'sans-serif']", quoted(&t.fonts.body))),
        ("mono".to_string(), format!("[{}, 'monospace']", quoted(&t.fonts.mono))),
    ];
    let font_size: Vec<(String, String)> = t
        .scale
        .iter()
        .map(|(k, v)| (k.to_string(), quoted(v)))
        .collect();
    let radius: Vec<(String, String)> = s
        .radius
        .iter()
        .map(|tok| (tok.name.clone(), quoted(&tok.value)))
        .collect();
    let shadows: Vec<(String, String)> = s
        .shadows
        .iter()
        .map(|tok| (tok.name.clone(), quoted(&tok.value)))
        .collect();

    let mut js = String::new();
    js.push_str("/** @type {import('tailwindcss').Config} */\n");
    js.push_str("module.exports = {\n");
    js.push_str("  theme: {\n");
    js.push_str("    extend: {\n");
    js.push_str(&format!("      colors: {},\n", js_object(6, &colors)));
    js.push_str(&format!("      fontFamily: {},\n", js_object(6, &font_family)));
    js.push_str(&format!("      fontSize: {},\n", js_object(6, &font_size)));
    js.push_str(&format!("      borderRadius: {},\n", js_object(6, &radius)));
    js.push_str(&format!("      boxShadow: {},\n", js_object(6, &shadows)));
    js.push_str("    },\n");
    js.push_str("  },\n");
    js.push_str("};\n");
    js
}

fn render_json(name: &str, data: &DesignSystemData) -> CodegenResult<String> {
    let mut tokens = BTreeMap::new();
    for group in token_groups(data) {
        for (token, value) in group.tokens {
            tokens.insert(token, value);
        }
    }
    let doc = serde_json::json!({
        "name": name,
        "personality": data.typography.personality,
        "googleFontsUrl": data.typography.google_fonts_url,
        "tokens": tokens,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

fn render_markdown(name: &str, data: &DesignSystemData) -> String {
    let colors = &data.colors;
    let t = &data.typography;
    let mut md = String::new();

    md.push_str(&format!("# {} Design System\n\n", comment_safe(name)));
    if !colors.reasoning.is_empty() {
        md.push_str(&format!("> {}\n\n", colors.reasoning));
    }
    md.push_str("All UI implementation should use the design tokens defined below.\n\n");

    md.push_str("## Color Palette\n\n");
    md.push_str("| Shade | Primary | Secondary | Accent | Neutral |\n");
    md.push_str("|-------|---------|-----------|--------|---------|\n");
    for ((key, primary), (((_, secondary), (_, accent)), (_, neutral))) in colors.primary.iter().zip(
        colors
            .secondary
            .iter()
            .zip(colors.accent.iter())
            .zip(colors.neutral.iter()),
    ) {
        md.push_str(&format!(
            "| {} | `{}` | `{}` | `{}` | `{}` |\n",
            key, primary, secondary, accent, neutral
        ));
    }
    md.push('\n');

    md.push_str("### Semantic Colors\n\n");
    md.push_str(&format!("- **Success**: `{}`\n", colors.semantic.success));
    md.push_str(&format!("- **Error**: `{}`\n", colors.semantic.error));
    md.push_str(&format!("- **Warning**: `{}`\n", colors.semantic.warning));
    md.push_str(&format!("- **Info**: `{}`\n\n", colors.semantic.info));

    if !colors.accessibility.is_empty() {
        md.push_str("### Accessibility\n\n");
        md.push_str("| Pair | Foreground | Background | Ratio | AA | AAA |\n");
        md.push_str("|------|------------|------------|-------|----|-----|\n");
        for check in &colors.accessibility {
            md.push_str(&format!(
                "| {} | `{}` | `{}` | {:.2} | {} | {} |\n",
                check.label,
                check.foreground,
                check.background,
                check.result.ratio,
                pass(check.result.wcag_aa),
                pass(check.result.wcag_aaa)
            ));
        }
        md.push('\n');
    }

    md.push_str("## Typography\n\n");
    md.push_str(&format!("Personality: **{}**\n\n", t.personality));
    md.push_str(&format!("- **Heading**: {}\n", t.fonts.heading));
    md.push_str(&format!("- **Body**: {}\n", t.fonts.body));
    md.push_str(&format!("- **Mono**: {}\n\n", t.fonts.mono));
    md.push_str(&format!("Load with: `{}`\n\n", t.google_fonts_url));
    md.push_str("| Step | Size |\n|------|------|\n");
    for (key, value) in t.scale.iter() {
        md.push_str(&format!("| {} | {} |\n", key, value));
    }
    md.push('\n');

    md.push_str("## Spacing\n\n");
    md.push_str("| Token | Value |\n|-------|-------|\n");
    for token in &data.spacing.scale {
        md.push_str(&format!("| {} | {} |\n", token.name, token.value));
    }
    md.push('\n');

    if !data.components.is_empty() {
        md.push_str("## Components\n\n");
        for component in &data.components {
            md.push_str(&format!(
                "- **{}** ({}): {}\n",
                component.name, component.category, component.description
            ));
        }
        md.push('\n');
    }

    md.push_str("## CSS Custom Properties\n\n```css\n");
    md.push_str(&render_css(name, data));
    md.push_str("```\n");
    md
}

fn pass(ok: bool) -> &'static str {
    if ok {
        "pass"
    } else {
        "fail"
    }
}

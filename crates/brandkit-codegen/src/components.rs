//! Component code generation.
//!
//! Every (kind, framework) pair has a tera template under `templates/`. All
//! templates are registered when the renderer is built, so a broken template
//! fails construction instead of a later render. Templates only see a
//! [`ComponentTokens`] value computed here from the palette and typography.

use brandkit_core::color::{self, perceived_brightness};
use brandkit_core::design::{ComponentCode, GeneratedComponent};
use brandkit_core::palette::ColorSystem;
use brandkit_core::typography::TypographySystem;
use serde::Serialize;
use tera::{Context, Tera};
use tracing::debug;

use crate::error::{CodegenError, CodegenResult};

const FALLBACK_WHITE: &str = "#FFFFFF";
const FALLBACK_DARK_TEXT: &str = "#111827";
const FALLBACK_MUTED_TEXT: &str = "#4B5563";
const FALLBACK_BORDER: &str = "#E5E7EB";
const FALLBACK_SURFACE: &str = "#F3F4F6";
const FALLBACK_BRAND: &str = "#6366F1";

/// Card backgrounds must be at least this bright.
const LIGHT_ENOUGH: f64 = 200.0;
/// Card text must be at most this bright.
const DARK_ENOUGH: f64 = 100.0;

macro_rules! template {
    ($kind:literal, $framework:literal) => {
        (
            concat!($kind, "/", $framework, ".tera"),
            include_str!(concat!("../templates/", $kind, "/", $framework, ".tera")),
        )
    };
}

const TEMPLATES: [(&str, &str); 20] = [
    template!("button", "react"),
    template!("button", "vue"),
    template!("button", "svelte"),
    template!("button", "html"),
    template!("button", "css"),
    template!("card", "react"),
    template!("card", "vue"),
    template!("card", "svelte"),
    template!("card", "html"),
    template!("card", "css"),
    template!("input", "react"),
    template!("input", "vue"),
    template!("input", "svelte"),
    template!("input", "html"),
    template!("input", "css"),
    template!("alert", "react"),
    template!("alert", "vue"),
    template!("alert", "svelte"),
    template!("alert", "html"),
    template!("alert", "css"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Button,
    Card,
    Input,
    Alert,
}

impl ComponentKind {
    pub const ALL: [ComponentKind; 4] = [
        ComponentKind::Button,
        ComponentKind::Card,
        ComponentKind::Input,
        ComponentKind::Alert,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::Button => "button",
            ComponentKind::Card => "card",
            ComponentKind::Input => "input",
            ComponentKind::Alert => "alert",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|k| k.as_str() == s)
    }

    /// Display name, also the suffix of generated component names.
    pub fn title(&self) -> &'static str {
        match self {
            ComponentKind::Button => "Button",
            ComponentKind::Card => "Card",
            ComponentKind::Input => "Input",
            ComponentKind::Alert => "Alert",
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            ComponentKind::Button => "actions",
            ComponentKind::Card => "layout",
            ComponentKind::Input => "forms",
            ComponentKind::Alert => "feedback",
        }
    }

    pub fn variants(&self) -> &'static [&'static str] {
        match self {
            ComponentKind::Button => &["primary", "secondary", "outline", "ghost"],
            ComponentKind::Card => &["elevated", "outlined", "filled"],
            ComponentKind::Input => &["default", "filled", "error"],
            ComponentKind::Alert => &["success", "error", "warning", "info"],
        }
    }

    fn class_prefix(&self) -> &'static str {
        match self {
            ComponentKind::Button => "btn",
            ComponentKind::Card => "card",
            ComponentKind::Input => "input",
            ComponentKind::Alert => "alert",
        }
    }
}

/// Output target of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Framework {
    React,
    Vue,
    Svelte,
    Html,
    Css,
}

impl Framework {
    pub const ALL: [Framework; 5] = [
        Framework::React,
        Framework::Vue,
        Framework::Svelte,
        Framework::Html,
        Framework::Css,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Framework::React => "react",
            Framework::Vue => "vue",
            Framework::Svelte => "svelte",
            Framework::Html => "html",
            Framework::Css => "css",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "react" | "tsx" | "jsx" => Some(Framework::React),
            "vue" => Some(Framework::Vue),
            "svelte" => Some(Framework::Svelte),
            "html" => Some(Framework::Html),
            "css" => Some(Framework::Css),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Framework::React => "tsx",
            Framework::Vue => "vue",
            Framework::Svelte => "svelte",
            Framework::Html => "html",
            Framework::Css => "css",
        }
    }

    /// The code for this target within a rendered component.
    pub fn select<'a>(&self, code: &'a ComponentCode) -> &'a str {
        match self {
            Framework::React => &code.react,
            Framework::Vue => &code.vue,
            Framework::Svelte => &code.svelte,
            Framework::Html => &code.html,
            Framework::Css => &code.css,
        }
    }
}

/// Values a component template can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentTokens {
    /// PascalCase component name, e.g. `PrimaryButton`.
    pub name: String,
    pub variant: String,
    pub class_name: String,
    pub description: String,
    /// Default text content.
    pub label: String,
    /// ARIA role for feedback components.
    pub role: String,
    pub background: String,
    pub foreground: String,
    pub border_color: String,
    pub hover_background: String,
    /// Focus ring / emphasis color.
    pub accent: String,
    pub muted: String,
    pub radius: String,
    pub shadow: String,
    pub padding: String,
    pub font_family: String,
    pub heading_font: String,
    pub font_size: String,
    pub heading_size: String,
    pub font_weight: u16,
}

/// Normalized `hex`, or `fallback` when it is not a valid color.
fn shade_or(hex: &str, fallback: &str) -> String {
    color::normalize_hex(hex).unwrap_or_else(|_| fallback.to_string())
}

/// Card background: neutral-50 when it is light enough, else white.
pub fn card_background(neutral_50: &str) -> String {
    match perceived_brightness(neutral_50) {
        Ok(b) if b >= LIGHT_ENOUGH => shade_or(neutral_50, FALLBACK_WHITE),
        _ => FALLBACK_WHITE.to_string(),
    }
}

/// Card text: neutral-900 when it is dark enough, else a fixed near-black.
pub fn card_text(neutral_900: &str) -> String {
    match perceived_brightness(neutral_900) {
        Ok(b) if b <= DARK_ENOUGH => shade_or(neutral_900, FALLBACK_DARK_TEXT),
        _ => FALLBACK_DARK_TEXT.to_string(),
    }
}

/// White or near-black, whichever contrasts more with `background`.
pub fn readable_text_on(background: &str) -> String {
    let white = color::contrast_ratio(FALLBACK_WHITE, background);
    let dark = color::contrast_ratio(FALLBACK_DARK_TEXT, background);
    match (white, dark) {
        (Ok(w), Ok(d)) if d > w => FALLBACK_DARK_TEXT.to_string(),
        _ => FALLBACK_WHITE.to_string(),
    }
}

fn pascal_case(variant: &str) -> String {
    let mut chars = variant.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn describe(kind: ComponentKind, variant: &str) -> (&'static str, &'static str) {
    match (kind, variant) {
        (ComponentKind::Button, "primary") => ("Main call to action in the brand color", "Get started"),
        (ComponentKind::Button, "secondary") => ("Supporting action in the secondary color", "Learn more"),
        (ComponentKind::Button, "outline") => ("Bordered button for secondary actions", "View details"),
        (ComponentKind::Button, "ghost") => ("Low-emphasis text button", "Cancel"),
        (ComponentKind::Card, "elevated") => ("Raised surface with a soft shadow", "Elevated card"),
        (ComponentKind::Card, "outlined") => ("Flat surface with a subtle border", "Outlined card"),
        (ComponentKind::Card, "filled") => ("Tinted surface for grouped content", "Filled card"),
        (ComponentKind::Input, "default") => ("Standard text field", "you@example.com"),
        (ComponentKind::Input, "filled") => ("Text field on a tinted background", "you@example.com"),
        (ComponentKind::Input, "error") => ("Text field showing a validation error", "you@example.com"),
        (ComponentKind::Alert, "success") => ("Confirms a completed action", "Changes saved"),
        (ComponentKind::Alert, "error") => ("Reports a failure that needs attention", "Something went wrong"),
        (ComponentKind::Alert, "warning") => ("Warns about a potential problem", "Check your settings"),
        (ComponentKind::Alert, "info") => ("Neutral informational message", "Did you know?"),
        _ => ("Generated component", "Label"),
    }
}

/// Light background, dark text and the base color for a status color.
fn status_colors(hex: &str) -> (String, String, String) {
    match color::generate_color_shades(hex) {
        Ok(shades) => (shades.s50, shades.s800, shades.s500),
        Err(_) => (
            FALLBACK_SURFACE.to_string(),
            FALLBACK_DARK_TEXT.to_string(),
            FALLBACK_MUTED_TEXT.to_string(),
        ),
    }
}

/// Build the template context for one variant.
pub fn component_tokens(
    kind: ComponentKind,
    variant: &str,
    palette: &ColorSystem,
    typography: &TypographySystem,
) -> ComponentTokens {
    let (description, label) = describe(kind, variant);
    let primary = &palette.primary;
    let neutral = &palette.neutral;
    let brand = shade_or(&primary.s500, FALLBACK_BRAND);

    let mut tokens = ComponentTokens {
        name: format!("{}{}", pascal_case(variant), kind.title()),
        variant: variant.to_string(),
        class_name: format!("{}-{}", kind.class_prefix(), variant),
        description: description.to_string(),
        label: label.to_string(),
        role: String::new(),
        background: FALLBACK_WHITE.to_string(),
        foreground: card_text(&neutral.s900),
        border_color: shade_or(&neutral.s300, FALLBACK_BORDER),
        hover_background: FALLBACK_WHITE.to_string(),
        accent: brand.clone(),
        muted: shade_or(&neutral.s600, FALLBACK_MUTED_TEXT),
        radius: "0.375rem".to_string(),
        shadow: "none".to_string(),
        padding: "0.5rem 0.75rem".to_string(),
        font_family: typography.fonts.body.clone(),
        heading_font: typography.fonts.heading.clone(),
        font_size: typography.scale.base.clone(),
        heading_size: typography.scale.xl.clone(),
        font_weight: typography.weights.semibold,
    };

    match kind {
        ComponentKind::Button => {
            tokens.padding = "0.625rem 1.25rem".to_string();
            tokens.accent = shade_or(&primary.s300, &brand);
            match variant {
                "secondary" => {
                    let secondary = shade_or(&palette.secondary.s500, &brand);
                    tokens.foreground = readable_text_on(&secondary);
                    tokens.border_color = secondary.clone();
                    tokens.hover_background = shade_or(&palette.secondary.s600, &secondary);
                    tokens.accent = shade_or(&palette.secondary.s300, &secondary);
                    tokens.background = secondary;
                }
                "outline" | "ghost" => {
                    tokens.background = "transparent".to_string();
                    tokens.foreground = shade_or(&primary.s600, &brand);
                    tokens.hover_background = shade_or(&primary.s50, FALLBACK_SURFACE);
                    tokens.border_color = if variant == "outline" {
                        brand.clone()
                    } else {
                        "transparent".to_string()
                    };
                }
                _ => {
                    tokens.foreground = readable_text_on(&brand);
                    tokens.border_color = brand.clone();
                    tokens.hover_background = shade_or(&primary.s600, &brand);
                    tokens.shadow = "0 1px 2px 0 rgb(0 0 0 / 0.05)".to_string();
                    tokens.background = brand.clone();
                }
            }
        }
        ComponentKind::Card => {
            tokens.radius = "0.5rem".to_string();
            tokens.padding = "1.5rem".to_string();
            tokens.background = card_background(&neutral.s50);
            tokens.hover_background = tokens.background.clone();
            tokens.font_weight = typography.weights.bold;
            match variant {
                "outlined" => {
                    tokens.border_color = shade_or(&neutral.s200, FALLBACK_BORDER);
                }
                "filled" => {
                    tokens.background = shade_or(&neutral.s100, FALLBACK_SURFACE);
                    tokens.border_color = "transparent".to_string();
                }
                _ => {
                    tokens.border_color = "transparent".to_string();
                    tokens.shadow =
                        "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)".to_string();
                }
            }
        }
        ComponentKind::Input => {
            tokens.font_weight = typography.weights.medium;
            tokens.muted = shade_or(&neutral.s500, FALLBACK_MUTED_TEXT);
            match variant {
                "filled" => {
                    tokens.background = shade_or(&neutral.s100, FALLBACK_SURFACE);
                    tokens.border_color = "transparent".to_string();
                }
                "error" => {
                    let error = shade_or(&palette.semantic.error, "#EF4444");
                    tokens.border_color = error.clone();
                    tokens.accent = error.clone();
                    tokens.muted = error;
                }
                _ => {}
            }
            tokens.hover_background = tokens.background.clone();
        }
        ComponentKind::Alert => {
            tokens.padding = "1rem".to_string();
            tokens.font_size = typography.scale.sm.clone();
            let status = match variant {
                "success" => &palette.semantic.success,
                "error" => &palette.semantic.error,
                "warning" => &palette.semantic.warning,
                _ => &palette.semantic.info,
            };
            let (background, text, base) = status_colors(status);
            tokens.role = if matches!(variant, "error" | "warning") { "alert" } else { "status" }.to_string();
            tokens.hover_background = background.clone();
            tokens.background = background;
            tokens.foreground = text;
            tokens.border_color = base.clone();
            tokens.accent = base;
        }
    }

    tokens
}

/// Tera-backed component renderer.
pub struct ComponentRenderer {
    tera: Tera,
}

impl ComponentRenderer {
    /// Register every component template.
    pub fn new() -> CodegenResult<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES.to_vec())?;
        // Output is source code; nothing may be HTML-escaped.
        tera.autoescape_on(vec![]);
        debug!(templates = TEMPLATES.len(), "Registered component templates");
        Ok(Self { tera })
    }

    /// Render one target for a token set.
    pub fn render(&self, kind: ComponentKind, framework: Framework, tokens: &ComponentTokens) -> CodegenResult<String> {
        let name = format!("{}/{}.tera", kind.as_str(), framework.as_str());
        let context = Context::from_serialize(tokens)?;
        self.tera
            .render(&name, &context)
            .map_err(|e| CodegenError::Render { template: name, source: e })
    }

    /// Render all targets of one variant.
    pub fn render_variant(
        &self,
        kind: ComponentKind,
        variant: &str,
        palette: &ColorSystem,
        typography: &TypographySystem,
    ) -> CodegenResult<GeneratedComponent> {
        if !kind.variants().contains(&variant) {
            return Err(CodegenError::UnknownVariant {
                kind: kind.as_str().to_string(),
                variant: variant.to_string(),
            });
        }

        let tokens = component_tokens(kind, variant, palette, typography);
        Ok(GeneratedComponent {
            name: tokens.name.clone(),
            variant: variant.to_string(),
            description: tokens.description.clone(),
            category: kind.category().to_string(),
            code: ComponentCode {
                react: self.render(kind, Framework::React, &tokens)?,
                vue: self.render(kind, Framework::Vue, &tokens)?,
                svelte: self.render(kind, Framework::Svelte, &tokens)?,
                html: self.render(kind, Framework::Html, &tokens)?,
                css: self.render(kind, Framework::Css, &tokens)?,
            },
        })
    }

    /// Every variant of one kind.
    pub fn render_kind(
        &self,
        kind: ComponentKind,
        palette: &ColorSystem,
        typography: &TypographySystem,
    ) -> CodegenResult<Vec<GeneratedComponent>> {
        kind.variants()
            .iter()
            .map(|variant| self.render_variant(kind, variant, palette, typography))
            .collect()
    }

    /// Every variant of every kind.
    pub fn generate_all(&self, palette: &ColorSystem, typography: &TypographySystem) -> CodegenResult<Vec<GeneratedComponent>> {
        let mut components = Vec::new();
        for kind in ComponentKind::ALL {
            components.extend(self.render_kind(kind, palette, typography)?);
        }
        Ok(components)
    }
}

/// Render every component with a fresh renderer.
pub fn generate_all_components_with_templates(
    palette: &ColorSystem,
    typography: &TypographySystem,
) -> CodegenResult<Vec<GeneratedComponent>> {
    ComponentRenderer::new()?.generate_all(palette, typography)
}

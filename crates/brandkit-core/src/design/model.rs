//! Design system domain models.

use brandkit_redis::design_systems::DesignSystemRow;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::error::{BrandkitError, BrandkitResult};
use crate::palette::{BrandAnalysis, ColorSystem};
use crate::spacing::{generate_spacing, SpacingSystem};
use crate::typography::TypographySystem;

/// Source code of one component variant, per output target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentCode {
    pub react: String,
    pub vue: String,
    pub svelte: String,
    pub html: String,
    pub css: String,
}

/// A rendered component variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedComponent {
    pub name: String,
    pub variant: String,
    pub description: String,
    pub category: String,
    pub code: ComponentCode,
}

/// Everything generated for a brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignSystemData {
    pub colors: ColorSystem,
    pub typography: TypographySystem,
    #[serde(default = "generate_spacing")]
    pub spacing: SpacingSystem,
    #[serde(default)]
    pub components: Vec<GeneratedComponent>,
}

/// Characters that may not appear in a token value; every value is written
/// verbatim into CSS, SCSS and JavaScript exports.
const FORBIDDEN_TOKEN_CHARS: &[char] = &[';', '{', '}', '<', '>', '\'', '"', '`', '*', '\\'];

const GOOGLE_FONTS_PREFIX: &str = "https://fonts.googleapis.com/";

impl DesignSystemData {
    /// Check data supplied from outside the generators before it is stored.
    ///
    /// Every color must be a 6-digit hex color, font families are plain names,
    /// and no token value may contain characters that end a declaration, a
    /// block, a string or a comment.
    pub fn validate(&self) -> BrandkitResult<()> {
        let colors = &self.colors;
        for (family, shades) in [
            ("primary", &colors.primary),
            ("secondary", &colors.secondary),
            ("accent", &colors.accent),
            ("neutral", &colors.neutral),
        ] {
            for (key, hex) in shades.iter() {
                check_color(&format!("colors.{}.{}", family, key), hex)?;
            }
        }
        let semantic = &colors.semantic;
        check_color("colors.semantic.success", &semantic.success)?;
        check_color("colors.semantic.error", &semantic.error)?;
        check_color("colors.semantic.warning", &semantic.warning)?;
        check_color("colors.semantic.info", &semantic.info)?;
        for check in &colors.accessibility {
            check_color("colors.accessibility.foreground", &check.foreground)?;
            check_color("colors.accessibility.background", &check.background)?;
        }

        let t = &self.typography;
        for (role, family) in [
            ("heading", &t.fonts.heading),
            ("body", &t.fonts.body),
            ("mono", &t.fonts.mono),
        ] {
            let plain = family
                .chars()
                .all(|c| c.is_alphanumeric() || c == ' ' || c == '-');
            if family.trim().is_empty() || !plain {
                return Err(BrandkitError::validation(format!(
                    "Invalid font family for typography.fonts.{}: '{}'",
                    role, family
                )));
            }
        }
        for (key, value) in t.scale.iter() {
            check_token(&format!("typography.scale.{}", key), value)?;
        }
        check_token("typography.letterSpacing.tight", &t.letter_spacing.tight)?;
        check_token("typography.letterSpacing.normal", &t.letter_spacing.normal)?;
        check_token("typography.letterSpacing.wide", &t.letter_spacing.wide)?;
        let url = &t.google_fonts_url;
        if !url.starts_with(GOOGLE_FONTS_PREFIX)
            || url.chars().any(|c| c.is_whitespace() || matches!(c, '\'' | '"' | '(' | ')' | '\\'))
        {
            return Err(BrandkitError::validation(format!(
                "Invalid typography.googleFontsUrl: '{}'",
                url
            )));
        }

        for (group, tokens) in [
            ("spacing.scale", &self.spacing.scale),
            ("spacing.radius", &self.spacing.radius),
            ("spacing.shadows", &self.spacing.shadows),
        ] {
            for token in tokens {
                check_token(&format!("{}.name", group), &token.name)?;
                check_token(&format!("{}.{}", group, token.name), &token.value)?;
            }
        }
        Ok(())
    }
}

fn check_color(field: &str, value: &str) -> BrandkitResult<()> {
    if value.starts_with('#') && color::is_valid_hex(value) {
        Ok(())
    } else {
        Err(BrandkitError::validation(format!(
            "Invalid color for {}: '{}' (expected #RRGGBB)",
            field, value
        )))
    }
}

fn check_token(field: &str, value: &str) -> BrandkitResult<()> {
    let unsafe_char = value
        .chars()
        .any(|c| c.is_control() || FORBIDDEN_TOKEN_CHARS.contains(&c));
    if value.trim().is_empty() || unsafe_char {
        return Err(BrandkitError::validation(format!("Invalid token value for {}: '{}'", field, value)));
    }
    Ok(())
}

/// A saved design system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSystem {
    pub id: String,
    pub owner_id: String,
    pub name: String,
    pub description: String,
    pub analysis: Option<BrandAnalysis>,
    pub data: DesignSystemData,
    pub created_at: String,
}

/// List entry for a saved design system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub primary_color: String,
    pub heading_font: String,
    pub component_count: usize,
    pub created_at: String,
}

impl DesignSystem {
    /// Create a new design system with a fresh id and the current time.
    pub fn new(
        owner_id: &str,
        name: &str,
        description: &str,
        analysis: Option<BrandAnalysis>,
        data: DesignSystemData,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            analysis,
            data,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn summary(&self) -> DesignSummary {
        DesignSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            primary_color: self.data.colors.primary.s500.clone(),
            heading_font: self.data.typography.fonts.heading.clone(),
            component_count: self.data.components.len(),
            created_at: self.created_at.clone(),
        }
    }

    /// Create from a storage row. Colors and typography are required; a row
    /// without spacing or components gets the defaults.
    pub fn from_row(row: DesignSystemRow) -> BrandkitResult<Self> {
        let colors: ColorSystem = required_json(&row.colors_json, "colors", &row.id)?;
        let typography: TypographySystem = required_json(&row.typography_json, "typography", &row.id)?;

        let spacing = row
            .spacing_json
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_else(generate_spacing);

        let components: Vec<GeneratedComponent> = row
            .components_json
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok())
            .unwrap_or_default();

        let analysis: Option<BrandAnalysis> = row
            .analysis_json
            .as_ref()
            .and_then(|s| serde_json::from_str(s).ok());

        Ok(Self {
            id: row.id,
            owner_id: row.owner_id,
            name: row.name,
            description: row.description,
            analysis,
            data: DesignSystemData {
                colors,
                typography,
                spacing,
                components,
            },
            created_at: row.created_at,
        })
    }

    /// Convert to a storage row.
    pub fn to_row(&self) -> BrandkitResult<DesignSystemRow> {
        Ok(DesignSystemRow {
            id: self.id.clone(),
            owner_id: self.owner_id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            analysis_json: self.analysis.as_ref().map(serde_json::to_string).transpose()?,
            colors_json: Some(serde_json::to_string(&self.data.colors)?),
            typography_json: Some(serde_json::to_string(&self.data.typography)?),
            spacing_json: Some(serde_json::to_string(&self.data.spacing)?),
            components_json: Some(serde_json::to_string(&self.data.components)?),
            created_at: self.created_at.clone(),
        })
    }
}

fn required_json<T: serde::de::DeserializeOwned>(
    value: &Option<String>,
    field: &str,
    id: &str,
) -> BrandkitResult<T> {
    let json = value
        .as_deref()
        .ok_or_else(|| BrandkitError::validation(format!("Design system {} has no {}", id, field)))?;
    Ok(serde_json::from_str(json)?)
}

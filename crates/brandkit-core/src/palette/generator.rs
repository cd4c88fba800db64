//! Palette derivation from a brand analysis.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::analysis::BrandAnalysis;
use super::cache::{CacheStats, MemoCache};
use crate::color::{self, AccessibilityResult, ColorShades};
use crate::error::BrandkitResult;

/// Used when neither industry nor tone resolves to a color.
pub const DEFAULT_PRIMARY: &str = "#6366F1";

/// Replaces [`DEFAULT_PRIMARY`] for energetic brands.
pub const ENERGETIC_PRIMARY: &str = "#EC4899";

/// Default memo cache capacity.
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

/// Industry → (primary hex, rationale). Aliases map to the same entry.
const INDUSTRY_COLORS: &[(&[&str], &str, &str)] = &[
    (&["fintech", "finance", "banking"], "#1E40AF", "a deep blue that signals stability and security"),
    (&["technology", "tech", "software", "saas"], "#2563EB", "a confident blue associated with reliable technology"),
    (&["healthcare", "health", "medical"], "#0D9488", "a clinical teal that feels clean and caring"),
    (&["education", "edtech"], "#7C3AED", "a purple that suggests curiosity and wisdom"),
    (&["ecommerce", "retail"], "#EA580C", "an orange that encourages action and purchase"),
    (&["food", "restaurant"], "#DC2626", "a warm red that stimulates appetite"),
    (&["fashion", "beauty"], "#DB2777", "a rich pink with editorial character"),
    (&["design", "creative"], "#8B5CF6", "a vivid violet that reads as imaginative"),
    (&["engineering", "manufacturing"], "#475569", "a steel slate that conveys precision"),
    (&["realestate", "real estate"], "#0F766E", "a grounded teal that feels established"),
    (&["travel", "hospitality"], "#0891B2", "an ocean cyan that evokes open skies and water"),
    (&["fitness", "sports"], "#16A34A", "an energetic green tied to health and vitality"),
    (&["entertainment", "gaming", "media"], "#9333EA", "a saturated purple with a sense of play"),
    (&["environment", "sustainability"], "#15803D", "a natural green rooted in sustainability"),
    (&["nonprofit", "charity"], "#F59E0B", "a hopeful amber that feels warm and human"),
    (&["legal", "law"], "#1E3A8A", "a navy that communicates authority and trust"),
];

/// Tone → (primary hex, rationale).
const TONE_COLORS: &[(&str, &str, &str)] = &[
    ("playful", "#F97316", "a bright orange with a playful energy"),
    ("luxurious", "#A16207", "a burnished gold that feels premium"),
    ("elegant", "#831843", "a deep wine that reads as refined"),
    ("bold", "#DC2626", "a strong red that makes a statement"),
    ("calm", "#0EA5E9", "a soft sky blue that feels calm"),
    ("friendly", "#22C55E", "an approachable green"),
    ("minimal", "#334155", "a restrained slate that stays out of the way"),
    ("innovative", "#7C3AED", "an electric violet that feels forward-looking"),
    ("trustworthy", "#1D4ED8", "a dependable royal blue"),
];

/// Neutral lightness ladder.
const NEUTRAL_LIGHTNESS: [(u16, f64); 10] = [
    (50, 98.0),
    (100, 96.0),
    (200, 90.0),
    (300, 83.0),
    (400, 64.0),
    (500, 45.0),
    (600, 32.0),
    (700, 25.0),
    (800, 15.0),
    (900, 9.0),
];

const WARM_NEUTRAL_HUE: f64 = 30.0;
const COOL_NEUTRAL_HUE: f64 = 210.0;
const NEUTRAL_SATURATION: f64 = 10.0;
const LIGHT_NEUTRAL_SATURATION: f64 = 5.0;

/// How the primary color was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorSource {
    Industry,
    Tone,
    Emotion,
    Fallback,
}

/// The selected primary color and a human-readable rationale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrimaryColor {
    pub hex: String,
    pub reasoning: String,
    pub source: ColorSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplementaryColors {
    pub secondary: String,
    pub accent: String,
}

/// Fixed status colors, independent of the brand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticColors {
    pub success: String,
    pub error: String,
    pub warning: String,
    pub info: String,
}

/// One contrast check included with a palette.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContrastCheck {
    pub label: String,
    pub foreground: String,
    pub background: String,
    pub result: AccessibilityResult,
}

/// Complete color system for a brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorSystem {
    pub primary: ColorShades,
    pub secondary: ColorShades,
    pub accent: ColorShades,
    pub neutral: ColorShades,
    pub semantic: SemanticColors,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default)]
    pub accessibility: Vec<ContrastCheck>,
}

/// Cache counters for every memoized operation.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct PaletteCacheStats {
    pub shades: CacheStats,
    pub complementary: CacheStats,
    pub neutrals: CacheStats,
    pub accessibility: CacheStats,
}

/// Pick the primary color for an analysis: industry table, then tone table,
/// then the fallback (pink instead of indigo for energetic brands).
pub fn generate_primary_color(analysis: &BrandAnalysis) -> PrimaryColor {
    let industry = analysis.industry.trim().to_lowercase();
    let tone = analysis.tone.trim().to_lowercase();

    if let Some((_, hex, why)) = INDUSTRY_COLORS
        .iter()
        .find(|(names, _, _)| names.contains(&industry.as_str()))
    {
        return PrimaryColor {
            hex: hex.to_string(),
            reasoning: format!(
                "Selected {} for the {} industry: {}. Tone: {}.",
                hex, industry, why, tone
            ),
            source: ColorSource::Industry,
        };
    }

    if let Some((_, hex, why)) = TONE_COLORS.iter().find(|(name, _, _)| *name == tone) {
        return PrimaryColor {
            hex: hex.to_string(),
            reasoning: format!("Selected {} to match a {} tone: {}.", hex, tone, why),
            source: ColorSource::Tone,
        };
    }

    if analysis.has_emotion("energetic") {
        return PrimaryColor {
            hex: ENERGETIC_PRIMARY.to_string(),
            reasoning: format!(
                "Selected {}, a vibrant pink, because the brand reads as energetic and no industry or tone color applied.",
                ENERGETIC_PRIMARY
            ),
            source: ColorSource::Emotion,
        };
    }

    PrimaryColor {
        hex: DEFAULT_PRIMARY.to_string(),
        reasoning: format!(
            "Selected {}, a versatile indigo, because no industry or tone signal mapped to a specific color.",
            DEFAULT_PRIMARY
        ),
        source: ColorSource::Fallback,
    }
}

/// The four fixed semantic colors.
pub fn generate_semantic_colors() -> SemanticColors {
    SemanticColors {
        success: "#10B981".to_string(),
        error: "#EF4444".to_string(),
        warning: "#F59E0B".to_string(),
        info: "#3B82F6".to_string(),
    }
}

/// Palette generator with bounded memo caches for the derived colors.
///
/// Cache keys are normalized hex strings, so `#abcdef` and `#ABCDEF` share
/// an entry.
pub struct PaletteGenerator {
    shades: MemoCache<String, ColorShades>,
    complementary: MemoCache<String, ComplementaryColors>,
    neutrals: MemoCache<String, ColorShades>,
    accessibility: MemoCache<String, AccessibilityResult>,
}

impl Default for PaletteGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl PaletteGenerator {
    /// Create a generator whose caches each hold up to `cache_capacity` entries.
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            shades: MemoCache::new(cache_capacity),
            complementary: MemoCache::new(cache_capacity),
            neutrals: MemoCache::new(cache_capacity),
            accessibility: MemoCache::new(cache_capacity),
        }
    }

    pub fn generate_primary_color(&self, analysis: &BrandAnalysis) -> PrimaryColor {
        generate_primary_color(analysis)
    }

    pub fn generate_semantic_colors(&self) -> SemanticColors {
        generate_semantic_colors()
    }

    /// Ten shades of `hex`. See [`color::generate_color_shades`].
    pub fn generate_color_shades(&self, hex: &str) -> BrandkitResult<ColorShades> {
        let key = color::normalize_hex(hex)?;
        self.shades
            .get_or_try_insert(&key, || color::generate_color_shades(&key))
    }

    /// Secondary (hue +30°) and accent (hue +180°) colors for a primary.
    pub fn generate_complementary_colors(&self, primary: &str) -> BrandkitResult<ComplementaryColors> {
        let key = color::normalize_hex(primary)?;
        self.complementary.get_or_try_insert(&key, || {
            let hsl = color::hex_to_hsl(&key)?;
            Ok(ComplementaryColors {
                secondary: color::hsl_to_hex(
                    (hsl.h + 30.0) % 360.0,
                    (hsl.s * 1.1).min(100.0),
                    (hsl.l + 5.0).min(85.0),
                ),
                accent: color::hsl_to_hex(
                    (hsl.h + 180.0) % 360.0,
                    (hsl.s * 1.2).min(100.0),
                    (hsl.l + 10.0).min(80.0),
                ),
            })
        })
    }

    /// Neutral grays tinted warm (hue 30) or cool (hue 210) depending on
    /// whether the primary hue falls in 0-60° / 300-360°, both ends inclusive.
    pub fn generate_neutral_grays(&self, primary: &str) -> BrandkitResult<ColorShades> {
        let key = color::normalize_hex(primary)?;
        self.neutrals.get_or_try_insert(&key, || {
            let hsl = color::hex_to_hsl(&key)?;
            let warm = hsl.h <= 60.0 || hsl.h >= 300.0;
            let tint = if warm { WARM_NEUTRAL_HUE } else { COOL_NEUTRAL_HUE };

            Ok(ColorShades::from_fn(|shade| {
                let l = NEUTRAL_LIGHTNESS
                    .iter()
                    .find(|(k, _)| *k == shade)
                    .map(|(_, l)| *l)
                    .unwrap_or(50.0);
                let s = if l > 70.0 { LIGHT_NEUTRAL_SATURATION } else { NEUTRAL_SATURATION };
                color::hsl_to_hex(tint, s, l)
            }))
        })
    }

    /// WCAG check for a color pair. Cached under the sorted pair, so
    /// `(a, b)` and `(b, a)` share an entry.
    pub fn check_accessibility(&self, foreground: &str, background: &str) -> BrandkitResult<AccessibilityResult> {
        let fg = color::normalize_hex(foreground)?;
        let bg = color::normalize_hex(background)?;
        let key = accessibility_key(&fg, &bg);
        self.accessibility
            .get_or_try_insert(&key, || color::check_wcag(&fg, &bg))
    }

    /// Full color system for an analysis.
    pub fn generate_palette(&self, analysis: &BrandAnalysis) -> BrandkitResult<ColorSystem> {
        let primary = self.generate_primary_color(analysis);
        debug!(hex = %primary.hex, source = ?primary.source, "Selected primary color");
        self.palette_from_primary(&primary.hex, &primary.reasoning)
    }

    /// Full color system around a caller-chosen primary color.
    pub fn palette_from_primary(&self, primary: &str, reasoning: &str) -> BrandkitResult<ColorSystem> {
        let primary_shades = self.generate_color_shades(primary)?;
        let complementary = self.generate_complementary_colors(primary)?;
        let neutral = self.generate_neutral_grays(primary)?;

        let accessibility = vec![
            self.contrast_check("White text on primary", "#FFFFFF", &primary_shades.s500)?,
            self.contrast_check("Dark text on primary", &neutral.s900, &primary_shades.s500)?,
            self.contrast_check("Body text on page", &neutral.s900, &neutral.s50)?,
            self.contrast_check("Primary link on white", &primary_shades.s600, "#FFFFFF")?,
        ];

        Ok(ColorSystem {
            secondary: self.generate_color_shades(&complementary.secondary)?,
            accent: self.generate_color_shades(&complementary.accent)?,
            primary: primary_shades,
            neutral,
            semantic: self.generate_semantic_colors(),
            reasoning: reasoning.to_string(),
            accessibility,
        })
    }

    pub fn cache_stats(&self) -> PaletteCacheStats {
        PaletteCacheStats {
            shades: self.shades.stats(),
            complementary: self.complementary.stats(),
            neutrals: self.neutrals.stats(),
            accessibility: self.accessibility.stats(),
        }
    }

    fn contrast_check(&self, label: &str, fg: &str, bg: &str) -> BrandkitResult<ContrastCheck> {
        Ok(ContrastCheck {
            label: label.to_string(),
            foreground: fg.to_string(),
            background: bg.to_string(),
            result: self.check_accessibility(fg, bg)?,
        })
    }
}

fn accessibility_key(a: &str, b: &str) -> String {
    let mut pair = [a, b];
    pair.sort_unstable();
    pair.join(":")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::analysis::analyze_locally;
    use proptest::prelude::*;

    fn analysis(industry: &str, tone: &str, emotions: &[&str]) -> BrandAnalysis {
        BrandAnalysis {
            industry: industry.to_string(),
            tone: tone.to_string(),
            emotions: emotions.iter().map(|e| e.to_string()).collect(),
            keywords: vec![],
        }
    }

    #[test]
    fn test_fintech_scenario() {
        let analysis = analyze_locally("Modern fintech app for Gen Z");
        let primary = generate_primary_color(&analysis);
        assert_eq!(primary.hex, "#1E40AF");
        assert_eq!(primary.source, ColorSource::Industry);
        assert!(!primary.reasoning.is_empty());
    }

    #[test]
    fn test_industry_aliases() {
        assert_eq!(generate_primary_color(&analysis("finance", "bold", &[])).hex, "#1E40AF");
        assert_eq!(generate_primary_color(&analysis("Tech", "bold", &[])).hex, "#2563EB");
    }

    #[test]
    fn test_tone_used_when_industry_unknown() {
        let primary = generate_primary_color(&analysis("general", "calm", &["professional"]));
        assert_eq!(primary.hex, "#0EA5E9");
        assert_eq!(primary.source, ColorSource::Tone);
    }

    #[test]
    fn test_fallback_and_energetic_override() {
        let plain = generate_primary_color(&analysis("general", "professional", &["professional"]));
        assert_eq!(plain.hex, DEFAULT_PRIMARY);
        assert_eq!(plain.source, ColorSource::Fallback);

        let energetic = generate_primary_color(&analysis("general", "professional", &["energetic"]));
        assert_eq!(energetic.hex, ENERGETIC_PRIMARY);

        // The override only applies when nothing else resolved.
        let resolved = generate_primary_color(&analysis("food", "professional", &["energetic"]));
        assert_eq!(resolved.hex, "#DC2626");
    }

    #[test]
    fn test_neutral_temperature() {
        let generator = PaletteGenerator::default();
        let warm = generator.generate_neutral_grays("#DC2626").unwrap();
        let cool = generator.generate_neutral_grays("#2563EB").unwrap();

        let warm_hue = color::hex_to_hsl(&warm.s700).unwrap().h;
        let cool_hue = color::hex_to_hsl(&cool.s700).unwrap().h;
        assert!(color::hue_distance(warm_hue, WARM_NEUTRAL_HUE) < 15.0, "{}", warm_hue);
        assert!(color::hue_distance(cool_hue, COOL_NEUTRAL_HUE) < 15.0, "{}", cool_hue);

        let l50 = color::hex_to_hsl(&cool.s50).unwrap().l;
        let l900 = color::hex_to_hsl(&cool.s900).unwrap().l;
        assert!((l50 - 98.0).abs() < 0.5);
        assert!((l900 - 9.0).abs() < 0.5);
    }

    #[test]
    fn test_neutral_temperature_range_is_inclusive() {
        let generator = PaletteGenerator::default();
        let tint = |primary: &str| {
            let neutral = generator.generate_neutral_grays(primary).unwrap();
            color::hex_to_hsl(&neutral.s700).unwrap().h
        };

        // #FFFF00 sits exactly on 60°, #FF00FF exactly on 300°.
        for warm in ["#FFFF00", "#FF00FF", "#FF0000"] {
            assert!(color::hue_distance(tint(warm), WARM_NEUTRAL_HUE) < 15.0, "{}", warm);
        }
        for cool in ["#80FF00", "#00FF00", "#8000FF"] {
            assert!(color::hue_distance(tint(cool), COOL_NEUTRAL_HUE) < 15.0, "{}", cool);
        }
    }

    #[test]
    fn test_neutral_light_shades_are_less_saturated() {
        let generator = PaletteGenerator::default();
        let neutral = generator.generate_neutral_grays("#2563EB").unwrap();
        let light = color::hex_to_hsl(&neutral.s200).unwrap();
        let dark = color::hex_to_hsl(&neutral.s600).unwrap();
        assert!(light.s < dark.s, "{} vs {}", light.s, dark.s);
    }

    #[test]
    fn test_complementary_rotation() {
        let generator = PaletteGenerator::default();
        let colors = generator.generate_complementary_colors("#1E40AF").unwrap();
        let base = color::hex_to_hsl("#1E40AF").unwrap();
        let secondary = color::hex_to_hsl(&colors.secondary).unwrap();
        let accent = color::hex_to_hsl(&colors.accent).unwrap();
        assert!(color::hue_distance(secondary.h, base.h + 30.0) < 2.0);
        assert!(color::hue_distance(accent.h, base.h + 180.0) < 2.0);
    }

    #[test]
    fn test_caches_are_used() {
        let generator = PaletteGenerator::new(8);
        generator.generate_color_shades("#1e40af").unwrap();
        generator.generate_color_shades("#1E40AF").unwrap();
        let stats = generator.cache_stats();
        assert_eq!(stats.shades.len, 1);
        assert_eq!(stats.shades.hits, 1);
    }

    #[test]
    fn test_accessibility_cache_is_order_independent() {
        let generator = PaletteGenerator::new(8);
        let ab = generator.check_accessibility("#000000", "#FFFFFF").unwrap();
        let ba = generator.check_accessibility("#FFFFFF", "#000000").unwrap();
        assert_eq!(ab, ba);
        assert_eq!(generator.cache_stats().accessibility.len, 1);
        assert_eq!(accessibility_key("#FFFFFF", "#000000"), "#000000:#FFFFFF");
    }

    #[test]
    fn test_invalid_hex_is_rejected() {
        let generator = PaletteGenerator::default();
        assert!(generator.generate_color_shades("blue").is_err());
        assert!(generator.generate_complementary_colors("#12").is_err());
        assert!(generator.check_accessibility("#000000", "nope").is_err());
    }

    #[test]
    fn test_full_palette() {
        let generator = PaletteGenerator::default();
        let palette = generator
            .generate_palette(&analyze_locally("Modern fintech app for Gen Z"))
            .unwrap();
        assert_eq!(palette.primary.s500, "#1E40AF");
        assert_eq!(palette.semantic, generate_semantic_colors());
        assert_eq!(palette.accessibility.len(), 4);
        assert!(!palette.reasoning.is_empty());

        let json = serde_json::to_value(&palette).unwrap();
        assert_eq!(json["primary"]["500"], "#1E40AF");
        assert_eq!(json["semantic"]["success"], "#10B981");
    }

    proptest! {
        #[test]
        fn prop_complementary_colors_are_distinct(
            h in 0.0f64..360.0,
            s in 20.0f64..=100.0,
            l in 10.0f64..=75.0,
        ) {
            let primary = color::hsl_to_hex(h, s, l);
            let generator = PaletteGenerator::new(0);
            let colors = generator.generate_complementary_colors(&primary).unwrap();
            prop_assert_ne!(&colors.secondary, &primary);
            prop_assert_ne!(&colors.accent, &primary);
            prop_assert_ne!(&colors.secondary, &colors.accent);
        }
    }
}

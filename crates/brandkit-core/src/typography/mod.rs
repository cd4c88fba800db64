//! Typography generation: font pairing, modular type scale and Google Fonts URL.
//!
//! Font selection is randomized among the curated pairings of a personality.
//! The random source is injectable: [`select_font_pairing`] takes any
//! [`rand::Rng`], and [`TypographyGenerator::with_seed`] makes a generator
//! reproducible.

pub mod fonts;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

pub use fonts::{PairingSpec, Personality};

pub const BASE_FONT_SIZE_PX: f64 = 16.0;
pub const TYPE_SCALE_RATIO: f64 = 1.25;

const GOOGLE_FONTS_CSS_URL: &str = "https://fonts.googleapis.com/css2";
const HEADING_WEIGHTS: [u16; 2] = [600, 700];
const BODY_WEIGHTS: [u16; 2] = [400, 500];
const MONO_WEIGHTS: [u16; 2] = [400, 500];

/// Heading, body and monospace families.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontPairing {
    pub heading: String,
    pub body: String,
    pub mono: String,
}

impl From<&PairingSpec> for FontPairing {
    fn from(spec: &PairingSpec) -> Self {
        Self {
            heading: spec.heading.to_string(),
            body: spec.body.to_string(),
            mono: spec.mono.to_string(),
        }
    }
}

/// Ten-step modular scale, values rendered as `"<n>rem"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeScale {
    pub xs: String,
    pub sm: String,
    pub base: String,
    pub lg: String,
    pub xl: String,
    #[serde(rename = "2xl")]
    pub xl2: String,
    #[serde(rename = "3xl")]
    pub xl3: String,
    #[serde(rename = "4xl")]
    pub xl4: String,
    #[serde(rename = "5xl")]
    pub xl5: String,
    #[serde(rename = "6xl")]
    pub xl6: String,
}

/// Step names from smallest to largest.
pub const SCALE_KEYS: [&str; 10] = ["xs", "sm", "base", "lg", "xl", "2xl", "3xl", "4xl", "5xl", "6xl"];

impl TypeScale {
    /// `(name, value)` pairs from smallest to largest.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        let values = [
            &self.xs, &self.sm, &self.base, &self.lg, &self.xl, &self.xl2, &self.xl3, &self.xl4,
            &self.xl5, &self.xl6,
        ];
        SCALE_KEYS.into_iter().zip(values.map(String::as_str))
    }

    /// Numeric rem value of a step.
    pub fn rem(&self, key: &str) -> Option<f64> {
        self.iter()
            .find(|(k, _)| *k == key)
            .and_then(|(_, v)| v.trim_end_matches("rem").parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontWeights {
    pub light: u16,
    pub regular: u16,
    pub medium: u16,
    pub semibold: u16,
    pub bold: u16,
}

impl Default for FontWeights {
    fn default() -> Self {
        Self {
            light: 300,
            regular: 400,
            medium: 500,
            semibold: 600,
            bold: 700,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineHeights {
    pub tight: f64,
    pub normal: f64,
    pub relaxed: f64,
}

impl Default for LineHeights {
    fn default() -> Self {
        Self {
            tight: 1.25,
            normal: 1.5,
            relaxed: 1.75,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSpacing {
    pub tight: String,
    pub normal: String,
    pub wide: String,
}

impl Default for LetterSpacing {
    fn default() -> Self {
        Self {
            tight: "-0.025em".to_string(),
            normal: "0".to_string(),
            wide: "0.025em".to_string(),
        }
    }
}

/// Complete typography tokens for a brand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographySystem {
    pub fonts: FontPairing,
    pub scale: TypeScale,
    pub weights: FontWeights,
    pub line_heights: LineHeights,
    pub letter_spacing: LetterSpacing,
    pub google_fonts_url: String,
    pub personality: Personality,
}

/// Resolve the personality to use: the requested one when curated, else the
/// one implied by `industry`, else modern.
pub fn resolve_personality(personality: &str, industry: Option<&str>) -> Personality {
    Personality::parse(personality)
        .or_else(|| industry.and_then(Personality::for_industry))
        .unwrap_or(Personality::Modern)
}

/// Pick a pairing uniformly at random among the resolved personality's list.
pub fn select_font_pairing<R: Rng + ?Sized>(
    personality: &str,
    industry: Option<&str>,
    rng: &mut R,
) -> (Personality, FontPairing) {
    let resolved = resolve_personality(personality, industry);
    let pairings = resolved.pairings();
    let spec = pairings.choose(rng).unwrap_or(&pairings[0]);
    (resolved, FontPairing::from(spec))
}

/// Geometric scale `1.25^n` for n in -2..=7, relative to a 16px base.
pub fn generate_type_scale() -> TypeScale {
    let step = |n: i32| {
        let px = BASE_FONT_SIZE_PX * TYPE_SCALE_RATIO.powi(n);
        let rem = (px / BASE_FONT_SIZE_PX * 1000.0).round() / 1000.0;
        format!("{}rem", rem)
    };

    TypeScale {
        xs: step(-2),
        sm: step(-1),
        base: step(0),
        lg: step(1),
        xl: step(2),
        xl2: step(3),
        xl3: step(4),
        xl4: step(5),
        xl5: step(6),
        xl6: step(7),
    }
}

/// Google Fonts CSS2 URL loading every family in `fonts`. A family used in
/// more than one role is requested once with the union of the weights.
pub fn google_fonts_url(fonts: &FontPairing) -> String {
    let roles: [(&str, &[u16]); 3] = [
        (fonts.heading.as_str(), &HEADING_WEIGHTS[..]),
        (fonts.body.as_str(), &BODY_WEIGHTS[..]),
        (fonts.mono.as_str(), &MONO_WEIGHTS[..]),
    ];

    let mut families: Vec<(&str, Vec<u16>)> = Vec::new();
    for (family, weights) in roles {
        match families.iter_mut().find(|(name, _)| *name == family) {
            Some((_, existing)) => existing.extend_from_slice(weights),
            None => families.push((family, weights.to_vec())),
        }
    }

    let params: Vec<String> = families
        .into_iter()
        .map(|(family, mut weights)| {
            weights.sort_unstable();
            weights.dedup();
            let weights: Vec<String> = weights.iter().map(u16::to_string).collect();
            format!("family={}:wght@{}", family.trim().replace(' ', "+"), weights.join(";"))
        })
        .collect();

    format!("{}?{}&display=swap", GOOGLE_FONTS_CSS_URL, params.join("&"))
}

/// Typography generator owning its random source.
pub struct TypographyGenerator {
    rng: Mutex<StdRng>,
}

impl Default for TypographyGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TypographyGenerator {
    /// Generator seeded from OS entropy.
    pub fn new() -> Self {
        Self {
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Reproducible generator.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }

    pub fn select_font_pairing(&self, personality: &str, industry: Option<&str>) -> (Personality, FontPairing) {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        select_font_pairing(personality, industry, &mut *rng)
    }

    pub fn generate_typography_system(&self, personality: &str, industry: Option<&str>) -> TypographySystem {
        let (personality, fonts) = self.select_font_pairing(personality, industry);
        TypographySystem {
            google_fonts_url: google_fonts_url(&fonts),
            fonts,
            scale: generate_type_scale(),
            weights: FontWeights::default(),
            line_heights: LineHeights::default(),
            letter_spacing: LetterSpacing::default(),
            personality,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairing(heading: &str, body: &str, mono: &str) -> FontPairing {
        FontPairing {
            heading: heading.to_string(),
            body: body.to_string(),
            mono: mono.to_string(),
        }
    }

    #[test]
    fn test_type_scale_values() {
        let scale = generate_type_scale();
        assert_eq!(scale.xs, "0.64rem");
        assert_eq!(scale.sm, "0.8rem");
        assert_eq!(scale.base, "1rem");
        assert_eq!(scale.lg, "1.25rem");
        assert_eq!(scale.xl, "1.563rem");
        assert_eq!(scale.xl6, "4.768rem");
    }

    #[test]
    fn test_scale_ratio_for_every_personality() {
        let generator = TypographyGenerator::with_seed(7);
        for p in Personality::ALL {
            let system = generator.generate_typography_system(p.as_str(), None);
            assert_eq!(system.personality, p);
            let ratio = system.scale.rem("lg").unwrap() / system.scale.rem("base").unwrap();
            assert!((ratio - 1.25).abs() < 0.01);
        }
    }

    #[test]
    fn test_scale_is_strictly_increasing() {
        let scale = generate_type_scale();
        let values: Vec<f64> = SCALE_KEYS.iter().map(|k| scale.rem(k).unwrap()).collect();
        assert!(values.windows(2).all(|w| w[0] < w[1]), "{:?}", values);
    }

    #[test]
    fn test_unknown_personality_uses_industry() {
        let generator = TypographyGenerator::with_seed(1);
        let cases = [
            ("finance", Personality::Corporate),
            ("technology", Personality::Modern),
            ("design", Personality::Creative),
            ("fashion", Personality::Elegant),
            ("engineering", Personality::Technical),
        ];
        for (industry, expected) in cases {
            let system = generator.generate_typography_system("unknown", Some(industry));
            assert_eq!(system.personality, expected, "industry {}", industry);
        }
        let fallback = generator.generate_typography_system("unknown", Some("underwater basket weaving"));
        assert_eq!(fallback.personality, Personality::Modern);
    }

    #[test]
    fn test_seeded_selection_is_reproducible() {
        let a = TypographyGenerator::with_seed(42);
        let b = TypographyGenerator::with_seed(42);
        for _ in 0..10 {
            assert_eq!(a.select_font_pairing("playful", None), b.select_font_pairing("playful", None));
        }
    }

    #[test]
    fn test_selection_comes_from_curated_list() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let (p, fonts) = select_font_pairing("classic", None, &mut rng);
            assert_eq!(p, Personality::Classic);
            assert!(p.pairings().iter().any(|s| FontPairing::from(s) == fonts));
        }
    }

    #[test]
    fn test_google_fonts_url_merges_same_family() {
        let url = google_fonts_url(&pairing("Inter", "Inter", "JetBrains Mono"));
        assert_eq!(
            url,
            "https://fonts.googleapis.com/css2?family=Inter:wght@400;500;600;700&family=JetBrains+Mono:wght@400;500&display=swap"
        );
    }

    #[test]
    fn test_google_fonts_url_separate_families() {
        let url = google_fonts_url(&pairing("Playfair Display", "Lato", "IBM Plex Mono"));
        assert!(url.contains("family=Playfair+Display:wght@600;700"));
        assert!(url.contains("family=Lato:wght@400;500"));
        assert!(url.contains("family=IBM+Plex+Mono:wght@400;500"));
        assert!(url.ends_with("&display=swap"));
    }

    #[test]
    fn test_typography_system_json_shape() {
        let system = TypographyGenerator::with_seed(9).generate_typography_system("modern", None);
        let json = serde_json::to_value(&system).unwrap();
        assert_eq!(json["personality"], "modern");
        assert_eq!(json["scale"]["2xl"], "1.953rem");
        assert_eq!(json["lineHeights"]["normal"], 1.5);
        assert_eq!(json["letterSpacing"]["wide"], "0.025em");
        assert!(json["googleFontsUrl"].as_str().unwrap().starts_with("https://fonts.googleapis.com/css2?"));
    }
}

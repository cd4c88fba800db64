//! Curated font pairings and the industry → personality table.

use serde::{Deserialize, Serialize};

/// Typographic personality of a brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    Modern,
    Classic,
    Elegant,
    Playful,
    Technical,
    Corporate,
    Creative,
    Minimal,
}

impl Personality {
    pub const ALL: [Personality; 8] = [
        Personality::Modern,
        Personality::Classic,
        Personality::Elegant,
        Personality::Playful,
        Personality::Technical,
        Personality::Corporate,
        Personality::Creative,
        Personality::Minimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Personality::Modern => "modern",
            Personality::Classic => "classic",
            Personality::Elegant => "elegant",
            Personality::Playful => "playful",
            Personality::Technical => "technical",
            Personality::Corporate => "corporate",
            Personality::Creative => "creative",
            Personality::Minimal => "minimal",
        }
    }

    /// Parse a personality name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|p| p.as_str() == s)
    }

    /// Personality implied by an industry name, if the industry is known.
    pub fn for_industry(industry: &str) -> Option<Self> {
        let industry = industry.trim().to_lowercase();
        INDUSTRY_PERSONALITY
            .iter()
            .find(|(name, _)| *name == industry)
            .map(|(_, p)| *p)
    }

    /// The curated pairings for this personality. Never empty.
    pub fn pairings(&self) -> &'static [PairingSpec] {
        match self {
            Personality::Modern => MODERN,
            Personality::Classic => CLASSIC,
            Personality::Elegant => ELEGANT,
            Personality::Playful => PLAYFUL,
            Personality::Technical => TECHNICAL,
            Personality::Corporate => CORPORATE,
            Personality::Creative => CREATIVE,
            Personality::Minimal => MINIMAL,
        }
    }
}

impl std::fmt::Display for Personality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A static (heading, body, mono) entry of the curated tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairingSpec {
    pub heading: &'static str,
    pub body: &'static str,
    pub mono: &'static str,
}

const fn pairing(heading: &'static str, body: &'static str, mono: &'static str) -> PairingSpec {
    PairingSpec { heading, body, mono }
}

const MODERN: &[PairingSpec] = &[
    pairing("Inter", "Inter", "JetBrains Mono"),
    pairing("Manrope", "Inter", "Fira Code"),
    pairing("Plus Jakarta Sans", "DM Sans", "JetBrains Mono"),
];

const CLASSIC: &[PairingSpec] = &[
    pairing("Playfair Display", "Source Sans 3", "Source Code Pro"),
    pairing("Libre Baskerville", "Lato", "Source Code Pro"),
    pairing("Merriweather", "Open Sans", "Roboto Mono"),
];

const ELEGANT: &[PairingSpec] = &[
    pairing("Cormorant Garamond", "Montserrat", "IBM Plex Mono"),
    pairing("Playfair Display", "Lato", "IBM Plex Mono"),
    pairing("DM Serif Display", "DM Sans", "DM Mono"),
];

const PLAYFUL: &[PairingSpec] = &[
    pairing("Fredoka", "Nunito", "Space Mono"),
    pairing("Baloo 2", "Quicksand", "Fira Code"),
    pairing("Poppins", "Nunito", "Space Mono"),
];

const TECHNICAL: &[PairingSpec] = &[
    pairing("IBM Plex Sans", "IBM Plex Sans", "IBM Plex Mono"),
    pairing("Space Grotesk", "Inter", "JetBrains Mono"),
    pairing("Roboto", "Roboto", "Roboto Mono"),
];

const CORPORATE: &[PairingSpec] = &[
    pairing("Roboto", "Open Sans", "Roboto Mono"),
    pairing("Lato", "Source Sans 3", "Source Code Pro"),
    pairing("IBM Plex Sans", "IBM Plex Serif", "IBM Plex Mono"),
];

const CREATIVE: &[PairingSpec] = &[
    pairing("Space Grotesk", "Work Sans", "Space Mono"),
    pairing("Syne", "Inter", "Fira Code"),
    pairing("Archivo Black", "Archivo", "JetBrains Mono"),
];

const MINIMAL: &[PairingSpec] = &[
    pairing("Inter", "Inter", "IBM Plex Mono"),
    pairing("Work Sans", "Work Sans", "Fira Code"),
    pairing("DM Sans", "DM Sans", "DM Mono"),
];

/// Industry → personality, used when the requested personality is unknown.
const INDUSTRY_PERSONALITY: &[(&str, Personality)] = &[
    ("finance", Personality::Corporate),
    ("fintech", Personality::Corporate),
    ("banking", Personality::Corporate),
    ("insurance", Personality::Corporate),
    ("legal", Personality::Corporate),
    ("consulting", Personality::Corporate),
    ("technology", Personality::Modern),
    ("tech", Personality::Modern),
    ("software", Personality::Modern),
    ("saas", Personality::Modern),
    ("ecommerce", Personality::Modern),
    ("travel", Personality::Modern),
    ("fitness", Personality::Modern),
    ("design", Personality::Creative),
    ("creative", Personality::Creative),
    ("agency", Personality::Creative),
    ("media", Personality::Creative),
    ("fashion", Personality::Elegant),
    ("beauty", Personality::Elegant),
    ("luxury", Personality::Elegant),
    ("hospitality", Personality::Elegant),
    ("engineering", Personality::Technical),
    ("manufacturing", Personality::Technical),
    ("developer", Personality::Technical),
    ("education", Personality::Classic),
    ("realestate", Personality::Classic),
    ("nonprofit", Personality::Classic),
    ("publishing", Personality::Classic),
    ("food", Personality::Playful),
    ("entertainment", Personality::Playful),
    ("gaming", Personality::Playful),
    ("kids", Personality::Playful),
    ("healthcare", Personality::Minimal),
    ("environment", Personality::Minimal),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_personality_has_pairings() {
        for p in Personality::ALL {
            assert!(p.pairings().len() >= 2, "{} has too few pairings", p);
            assert_eq!(Personality::parse(p.as_str()), Some(p));
        }
    }

    #[test]
    fn test_parse_is_lenient() {
        assert_eq!(Personality::parse("  Elegant "), Some(Personality::Elegant));
        assert_eq!(Personality::parse("grumpy"), None);
    }

    #[test]
    fn test_industry_inference() {
        assert_eq!(Personality::for_industry("finance"), Some(Personality::Corporate));
        assert_eq!(Personality::for_industry("technology"), Some(Personality::Modern));
        assert_eq!(Personality::for_industry("design"), Some(Personality::Creative));
        assert_eq!(Personality::for_industry("Fashion"), Some(Personality::Elegant));
        assert_eq!(Personality::for_industry("engineering"), Some(Personality::Technical));
        assert_eq!(Personality::for_industry("general"), None);
    }
}

//! Rule-based brand analysis.
//!
//! Classifies a free-text brand description into industry, tone and emotions
//! using ordered keyword tables. Matching is a case-insensitive substring
//! search; for industry and tone the first category in table order wins.

use serde::{Deserialize, Serialize};

pub const DEFAULT_INDUSTRY: &str = "general";
pub const DEFAULT_TONE: &str = "professional";
pub const DEFAULT_EMOTION: &str = "professional";

/// Classification of a brand description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandAnalysis {
    pub industry: String,
    pub tone: String,
    #[serde(default)]
    pub emotions: Vec<String>,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl Default for BrandAnalysis {
    fn default() -> Self {
        Self {
            industry: DEFAULT_INDUSTRY.to_string(),
            tone: DEFAULT_TONE.to_string(),
            emotions: vec![DEFAULT_EMOTION.to_string()],
            keywords: Vec::new(),
        }
    }
}

impl BrandAnalysis {
    /// Lowercase and trim every field, drop empty entries and fill defaults.
    pub fn normalized(self) -> Self {
        let clean = |s: String| s.trim().to_lowercase();
        let clean_list = |v: Vec<String>| {
            let mut out: Vec<String> = Vec::new();
            for item in v.into_iter().map(clean).filter(|s| !s.is_empty()) {
                if !out.contains(&item) {
                    out.push(item);
                }
            }
            out
        };

        let industry = clean(self.industry);
        let tone = clean(self.tone);
        let mut emotions = clean_list(self.emotions);
        if emotions.is_empty() {
            emotions.push(DEFAULT_EMOTION.to_string());
        }

        Self {
            industry: if industry.is_empty() { DEFAULT_INDUSTRY.to_string() } else { industry },
            tone: if tone.is_empty() { DEFAULT_TONE.to_string() } else { tone },
            emotions,
            keywords: clean_list(self.keywords),
        }
    }

    pub fn has_emotion(&self, emotion: &str) -> bool {
        self.emotions.iter().any(|e| e.eq_ignore_ascii_case(emotion))
    }
}

type KeywordTable = &'static [(&'static str, &'static [&'static str])];

/// Industry categories. Order matters: specific industries come before the
/// broad `technology` bucket so "fintech app" resolves to fintech.
pub const INDUSTRY_KEYWORDS: KeywordTable = &[
    ("fintech", &["fintech", "finance", "financial", "banking", "payment", "crypto", "invest", "trading", "wallet", "insurance", "accounting"]),
    ("healthcare", &["health", "medical", "clinic", "hospital", "wellness", "pharma", "therapy", "dental"]),
    ("education", &["education", "learning", "school", "course", "university", "tutor", "edtech", "academy", "student"]),
    ("ecommerce", &["ecommerce", "e-commerce", "shop", "store", "retail", "marketplace"]),
    ("food", &["food", "restaurant", "cafe", "coffee", "bakery", "recipe", "kitchen", "meal", "dining"]),
    ("fashion", &["fashion", "clothing", "apparel", "boutique", "beauty", "cosmetic", "jewelry"]),
    ("design", &["design", "creative", "agency", "studio", "artist", "artwork", "gallery", "portfolio", "photography"]),
    ("engineering", &["engineering", "manufacturing", "construction", "industrial", "hardware", "robotics"]),
    ("realestate", &["real estate", "property", "realty", "housing", "mortgage"]),
    ("travel", &["travel", "hotel", "tourism", "airline", "vacation", "hospitality"]),
    ("fitness", &["fitness", "gym", "workout", "sport", "athletic", "yoga"]),
    ("entertainment", &["gaming", "game", "music", "entertainment", "streaming", "movie", "podcast"]),
    ("environment", &["sustainab", "eco-friendly", "ecology", "environment", "renewable", "climate", "solar"]),
    ("nonprofit", &["nonprofit", "non-profit", "charity", "foundation", "volunteer"]),
    ("legal", &["legal", "law firm", "lawyer", "attorney", "compliance"]),
    ("technology", &["tech", "software", "saas", "platform", "digital", "cloud", "startup", "developer", "app", "data", "cyber", "automation"]),
];

/// Tone categories, first match wins.
pub const TONE_KEYWORDS: KeywordTable = &[
    ("playful", &["playful", "whimsical", "quirky", "cheerful", "lighthearted"]),
    ("luxurious", &["luxury", "luxurious", "premium", "exclusive", "high-end", "opulent"]),
    ("elegant", &["elegant", "sophisticated", "refined", "graceful", "timeless"]),
    ("bold", &["bold", "daring", "edgy", "powerful", "disruptive"]),
    ("calm", &["calm", "serene", "peaceful", "relaxing", "mindful", "soothing"]),
    ("friendly", &["friendly", "welcoming", "approachable", "inclusive"]),
    ("minimal", &["minimal", "clean", "simple", "understated"]),
    ("innovative", &["innovative", "modern", "cutting-edge", "futuristic", "next-gen"]),
    ("trustworthy", &["trust", "reliable", "secure", "dependable", "established"]),
    ("professional", &["professional", "corporate", "business", "enterprise", "formal"]),
];

/// Emotion categories. Every matching category is collected.
pub const EMOTION_KEYWORDS: KeywordTable = &[
    ("trust", &["trust", "secure", "safe", "reliable", "dependable"]),
    ("energetic", &["energetic", "energy", "vibrant", "dynamic", "exciting", "active"]),
    ("calm", &["calm", "peace", "relax", "soothing", "serene"]),
    ("joy", &["joy", "happy", "cheerful", "delight", "playful"]),
    ("luxury", &["luxury", "exclusive", "premium", "elegant"]),
    ("growth", &["growth", "grow", "sustainab", "thrive", "progress"]),
    ("innovation", &["innovat", "future", "cutting-edge", "modern", "next-gen"]),
    ("warmth", &["warm", "cozy", "friendly", "welcoming", "community"]),
];

/// Keywords of `category` found in `text` (already lowercased).
fn matched_keywords(text: &str, keywords: &[&'static str]) -> Vec<&'static str> {
    keywords.iter().copied().filter(|k| text.contains(k)).collect()
}

/// First category with at least one keyword in `text`.
fn first_match(text: &str, table: KeywordTable) -> Option<(&'static str, Vec<&'static str>)> {
    table.iter().find_map(|(category, keywords)| {
        let hits = matched_keywords(text, keywords);
        (!hits.is_empty()).then_some((*category, hits))
    })
}

/// Classify a description with the keyword tables only.
pub fn analyze_locally(description: &str) -> BrandAnalysis {
    let text = description.to_lowercase();
    let mut keywords: Vec<String> = Vec::new();
    let mut push_keywords = |hits: &[&str]| {
        for hit in hits {
            if !keywords.iter().any(|k| k == hit) {
                keywords.push(hit.to_string());
            }
        }
    };

    let industry = match first_match(&text, INDUSTRY_KEYWORDS) {
        Some((category, hits)) => {
            push_keywords(&hits);
            category.to_string()
        }
        None => DEFAULT_INDUSTRY.to_string(),
    };

    let tone = match first_match(&text, TONE_KEYWORDS) {
        Some((category, hits)) => {
            push_keywords(&hits);
            category.to_string()
        }
        None => DEFAULT_TONE.to_string(),
    };

    let mut emotions = Vec::new();
    for (category, words) in EMOTION_KEYWORDS {
        let hits = matched_keywords(&text, words);
        if !hits.is_empty() {
            push_keywords(&hits);
            emotions.push(category.to_string());
        }
    }
    if emotions.is_empty() {
        emotions.push(DEFAULT_EMOTION.to_string());
    }

    BrandAnalysis {
        industry,
        tone,
        emotions,
        keywords,
    }
}

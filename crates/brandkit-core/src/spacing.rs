//! Spacing, radius and shadow tokens.
//!
//! These are constant: every generated design system gets the same 4px grid.

use serde::{Deserialize, Serialize};

/// Spacing scale keys in Tailwind notation, paired with their multiple of 4px.
/// `0` and `px` are prepended by [`generate_spacing`].
const SPACING_STEPS: &[(&str, f64)] = &[
    ("0.5", 0.5),
    ("1", 1.0),
    ("1.5", 1.5),
    ("2", 2.0),
    ("2.5", 2.5),
    ("3", 3.0),
    ("4", 4.0),
    ("5", 5.0),
    ("6", 6.0),
    ("8", 8.0),
    ("10", 10.0),
    ("12", 12.0),
    ("16", 16.0),
    ("20", 20.0),
    ("24", 24.0),
];

const GRID_PX: f64 = 4.0;

/// A named token and its CSS value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub name: String,
    pub value: String,
}

impl Token {
    fn new(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
        }
    }
}

/// Spacing, border radius and shadow tokens, each in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingSystem {
    pub base_unit_px: u16,
    pub scale: Vec<Token>,
    pub radius: Vec<Token>,
    pub shadows: Vec<Token>,
}

impl SpacingSystem {
    pub fn spacing(&self, name: &str) -> Option<&str> {
        lookup(&self.scale, name)
    }

    pub fn radius(&self, name: &str) -> Option<&str> {
        lookup(&self.radius, name)
    }

    pub fn shadow(&self, name: &str) -> Option<&str> {
        lookup(&self.shadows, name)
    }
}

fn lookup<'a>(tokens: &'a [Token], name: &str) -> Option<&'a str> {
    tokens.iter().find(|t| t.name == name).map(|t| t.value.as_str())
}

fn rem(px: f64) -> String {
    format!("{}rem", px / 16.0)
}

pub fn generate_spacing() -> SpacingSystem {
    let mut scale = vec![Token::new("0", "0"), Token::new("px", "1px")];
    scale.extend(
        SPACING_STEPS
            .iter()
            .map(|(name, steps)| Token::new(name, rem(steps * GRID_PX))),
    );

    SpacingSystem {
        base_unit_px: GRID_PX as u16,
        scale,
        radius: vec![
            Token::new("none", "0"),
            Token::new("sm", "0.125rem"),
            Token::new("md", "0.375rem"),
            Token::new("lg", "0.5rem"),
            Token::new("xl", "0.75rem"),
            Token::new("full", "9999px"),
        ],
        shadows: vec![
            Token::new("sm", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
            Token::new("md", "0 4px 6px -1px rgb(0 0 0 / 0.1), 0 2px 4px -2px rgb(0 0 0 / 0.1)"),
            Token::new("lg", "0 10px 15px -3px rgb(0 0 0 / 0.1), 0 4px 6px -4px rgb(0 0 0 / 0.1)"),
            Token::new("xl", "0 20px 25px -5px rgb(0 0 0 / 0.1), 0 8px 10px -6px rgb(0 0 0 / 0.1)"),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spacing_scale() {
        let spacing = generate_spacing();
        assert_eq!(spacing.scale[0].name, "0");
        assert_eq!(spacing.scale[1].name, "px");
        assert_eq!(spacing.spacing("0"), Some("0"));
        assert_eq!(spacing.spacing("1"), Some("0.25rem"));
        assert_eq!(spacing.spacing("4"), Some("1rem"));
        assert_eq!(spacing.spacing("24"), Some("6rem"));
        assert_eq!(spacing.spacing("7"), None);
    }

    #[test]
    fn test_shape_tokens() {
        let spacing = generate_spacing();
        assert_eq!(spacing.radius("md"), Some("0.375rem"));
        assert_eq!(spacing.radius("full"), Some("9999px"));
        assert_eq!(spacing.shadows.len(), 4);
        assert!(spacing.shadow("lg").is_some());
    }
}

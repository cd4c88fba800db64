//! Color-space utilities.
//!
//! Hex/RGB/HSL conversion, WCAG 2.1 contrast math and the fixed-lightness
//! shade table. Everything here is pure; malformed hex input is reported as
//! [`BrandkitError::InvalidHex`].

use serde::{Deserialize, Serialize};

use crate::error::{BrandkitError, BrandkitResult};

/// WCAG AA threshold for normal text.
pub const WCAG_AA_NORMAL: f64 = 4.5;
/// WCAG AAA threshold for normal text.
pub const WCAG_AAA_NORMAL: f64 = 7.0;
/// WCAG AA threshold for large text (>= 18pt, or 14pt bold).
pub const WCAG_AA_LARGE: f64 = 3.0;
/// WCAG AAA threshold for large text.
pub const WCAG_AAA_LARGE: f64 = 4.5;

/// Shade keys from lightest to darkest.
pub const SHADE_KEYS: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

/// Target lightness per shade key. 500 is the base color itself.
const SHADE_LIGHTNESS: [(u16, f64); 9] = [
    (50, 95.0),
    (100, 90.0),
    (200, 80.0),
    (300, 70.0),
    (400, 60.0),
    (600, 45.0),
    (700, 35.0),
    (800, 25.0),
    (900, 15.0),
];

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Hue in degrees `[0, 360)`, saturation and lightness in percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// Result of a WCAG contrast check. `wcag_aa`/`wcag_aaa` use the normal-text
/// thresholds; the `_large` fields use the large-text thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityResult {
    pub ratio: f64,
    #[serde(rename = "wcagAA")]
    pub wcag_aa: bool,
    #[serde(rename = "wcagAAA")]
    pub wcag_aaa: bool,
    #[serde(rename = "wcagAALarge")]
    pub wcag_aa_large: bool,
    #[serde(rename = "wcagAAALarge")]
    pub wcag_aaa_large: bool,
}

/// Ten lightness variants of one color, keyed `"50"` .. `"900"` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorShades {
    #[serde(rename = "50")]
    pub s50: String,
    #[serde(rename = "100")]
    pub s100: String,
    #[serde(rename = "200")]
    pub s200: String,
    #[serde(rename = "300")]
    pub s300: String,
    #[serde(rename = "400")]
    pub s400: String,
    #[serde(rename = "500")]
    pub s500: String,
    #[serde(rename = "600")]
    pub s600: String,
    #[serde(rename = "700")]
    pub s700: String,
    #[serde(rename = "800")]
    pub s800: String,
    #[serde(rename = "900")]
    pub s900: String,
}

impl ColorShades {
    /// Build from a function of the shade key, called in [`SHADE_KEYS`] order.
    pub fn from_fn<F: FnMut(u16) -> String>(mut f: F) -> Self {
        Self {
            s50: f(50),
            s100: f(100),
            s200: f(200),
            s300: f(300),
            s400: f(400),
            s500: f(500),
            s600: f(600),
            s700: f(700),
            s800: f(800),
            s900: f(900),
        }
    }

    /// Look up a shade by key.
    pub fn get(&self, key: u16) -> Option<&str> {
        let value = match key {
            50 => &self.s50,
            100 => &self.s100,
            200 => &self.s200,
            300 => &self.s300,
            400 => &self.s400,
            500 => &self.s500,
            600 => &self.s600,
            700 => &self.s700,
            800 => &self.s800,
            900 => &self.s900,
            _ => return None,
        };
        Some(value.as_str())
    }

    /// Iterate `(key, hex)` from lightest to darkest.
    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        SHADE_KEYS
            .iter()
            .filter_map(move |k| self.get(*k).map(|hex| (*k, hex)))
    }
}

/// Parse `#RRGGBB` or `RRGGBB` (any case).
pub fn hex_to_rgb(hex: &str) -> BrandkitResult<Rgb> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(BrandkitError::InvalidHex(hex.to_string()));
    }

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&digits[range], 16).map_err(|_| BrandkitError::InvalidHex(hex.to_string()))
    };
    Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Whether `hex` is a valid 6-digit hex color.
pub fn is_valid_hex(hex: &str) -> bool {
    hex_to_rgb(hex).is_ok()
}

/// Canonical uppercase `#RRGGBB`.
pub fn normalize_hex(hex: &str) -> BrandkitResult<String> {
    hex_to_rgb(hex).map(Rgb::to_hex)
}

/// Convert RGB to HSL.
pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl { h: 0.0, s: 0.0, l: l * 100.0 };
    }

    let d = max - min;
    let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
    let h = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: (h * 60.0) % 360.0,
        s: s * 100.0,
        l: l * 100.0,
    }
}

/// Parse a hex color into HSL.
pub fn hex_to_hsl(hex: &str) -> BrandkitResult<Hsl> {
    hex_to_rgb(hex).map(rgb_to_hsl)
}

/// Convert HSL to RGB. Hue wraps, saturation and lightness are clamped to
/// `[0, 100]`, channels are clamped to `[0, 255]`.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> Rgb {
    let h = h.rem_euclid(360.0) / 360.0;
    let s = s.clamp(0.0, 100.0) / 100.0;
    let l = l.clamp(0.0, 100.0) / 100.0;

    let to_channel = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;

    if s == 0.0 {
        let v = to_channel(l);
        return Rgb::new(v, v, v);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        to_channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
        to_channel(hue_to_rgb(p, q, h)),
        to_channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
    )
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// Convert HSL to an uppercase `#RRGGBB` string.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    hsl_to_rgb(h, s, l).to_hex()
}

/// WCAG relative luminance in `[0, 1]`.
/// See: https://www.w3.org/TR/WCAG21/#dfn-relative-luminance
pub fn relative_luminance(rgb: Rgb) -> f64 {
    fn channel(c: u8) -> f64 {
        let c = f64::from(c) / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    }
    0.2126 * channel(rgb.r) + 0.7152 * channel(rgb.g) + 0.0722 * channel(rgb.b)
}

/// WCAG contrast ratio in `[1, 21]`. Symmetric in its arguments.
pub fn contrast_ratio(c1: &str, c2: &str) -> BrandkitResult<f64> {
    let l1 = relative_luminance(hex_to_rgb(c1)?);
    let l2 = relative_luminance(hex_to_rgb(c2)?);
    let lighter = l1.max(l2);
    let darker = l1.min(l2);
    Ok((lighter + 0.05) / (darker + 0.05))
}

/// Check a foreground/background pair against the WCAG thresholds.
///
/// Thresholds are compared against the unrounded ratio; the reported `ratio`
/// is rounded to two decimals.
pub fn check_wcag(fg: &str, bg: &str) -> BrandkitResult<AccessibilityResult> {
    let ratio = contrast_ratio(fg, bg)?;
    Ok(AccessibilityResult {
        ratio: (ratio * 100.0).round() / 100.0,
        wcag_aa: ratio >= WCAG_AA_NORMAL,
        wcag_aaa: ratio >= WCAG_AAA_NORMAL,
        wcag_aa_large: ratio >= WCAG_AA_LARGE,
        wcag_aaa_large: ratio >= WCAG_AAA_LARGE,
    })
}

/// Perceived brightness `(r*299 + g*587 + b*114) / 1000`, in `[0, 255]`.
pub fn perceived_brightness(hex: &str) -> BrandkitResult<f64> {
    let rgb = hex_to_rgb(hex)?;
    Ok((f64::from(rgb.r) * 299.0 + f64::from(rgb.g) * 587.0 + f64::from(rgb.b) * 114.0) / 1000.0)
}

/// Generate the ten shades of `hex`.
///
/// Shade 500 is the normalized input. Other shades keep the base hue and
/// saturation and take their lightness from the fixed table; light-side
/// targets are raised to at least the base lightness and dark-side targets
/// lowered to at most it, so lightness never increases with the key.
pub fn generate_color_shades(hex: &str) -> BrandkitResult<ColorShades> {
    let base = normalize_hex(hex)?;
    let hsl = hex_to_hsl(&base)?;

    Ok(ColorShades::from_fn(|key| {
        if key == 500 {
            return base.clone();
        }
        let target = SHADE_LIGHTNESS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, l)| *l)
            .unwrap_or(hsl.l);
        let l = if key < 500 { target.max(hsl.l) } else { target.min(hsl.l) };
        hsl_to_hex(hsl.h, hsl.s, l)
    }))
}

/// Shortest angular distance between two hues, in degrees.
pub fn hue_distance(a: f64, b: f64) -> f64 {
    let d = (a - b).rem_euclid(360.0);
    d.min(360.0 - d)
}

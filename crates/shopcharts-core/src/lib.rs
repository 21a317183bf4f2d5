//! # shopcharts-core
//!
//! Core data types for the storefront admin charting engine.
//! Implements Strategy pattern for number formatting.

pub mod datum;
pub mod error;

pub use datum::*;
pub use error::*;

use serde::{Deserialize, Serialize};

// ============================================================================
// STRATEGY PATTERN: Formatters
// ============================================================================

/// Strategy trait for axis and tooltip number formatting
pub trait NumberFormatter: Send + Sync {
    fn format(&self, value: f64) -> String;
}

/// en-US style formatter: thousands grouping, bounded fractional digits,
/// trailing zeros dropped (`1234.56` -> `1,234.6`, `10.0` -> `10`)
#[derive(Debug, Clone)]
pub struct LocaleNumberFormatter {
    pub max_fraction_digits: usize,
}

impl Default for LocaleNumberFormatter {
    fn default() -> Self {
        Self {
            max_fraction_digits: 1,
        }
    }
}

/// Fractional digits printed before rounding. Any f64 of magnitude 1e-3 or
/// more has a terminating decimal expansion shorter than this.
const EXACT_FRACTION_DIGITS: usize = 80;

impl NumberFormatter for LocaleNumberFormatter {
    fn format(&self, value: f64) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "∞" } else { "-∞" }.to_string();
        }

        let digits = self.max_fraction_digits.min(EXACT_FRACTION_DIGITS - 1);
        let (int_part, frac_part) = round_half_expand(value.abs(), digits);
        let frac_part = frac_part.trim_end_matches('0');
        let is_zero = int_part == "0" && frac_part.is_empty();
        let sign = if value < 0.0 && !is_zero { "-" } else { "" };

        let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + frac_part.len() + 2);
        out.push_str(sign);
        out.push_str(&group_thousands(&int_part));
        if !frac_part.is_empty() {
            out.push('.');
            out.push_str(frac_part);
        }
        out
    }
}

/// Round the exact decimal expansion of `abs` to `digits` fractional digits,
/// ties away from zero. `1.45` is stored as `1.4499…` and rounds to `1.4`.
fn round_half_expand(abs: f64, digits: usize) -> (String, String) {
    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, abs);
    let (int_digits, frac_digits) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let round_up = frac_digits.as_bytes().get(digits).is_some_and(|d| *d >= b'5');

    let mut scaled: Vec<u8> = int_digits
        .bytes()
        .chain(frac_digits.bytes().take(digits))
        .collect();
    if round_up {
        let mut carry = true;
        for digit in scaled.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            scaled.insert(0, b'1');
        }
    }

    let split = scaled.len() - digits;
    let text = String::from_utf8_lossy(&scaled);
    (text[..split].to_string(), text[split..].to_string())
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Format a value for axis ticks and tooltips (max one fractional digit)
pub fn format_number(value: f64) -> String {
    LocaleNumberFormatter::default().format(value)
}

// ============================================================================
// CORE VALUE TYPES
// ============================================================================

/// Pixel dimensions of a chart canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Checked constructor for caller-supplied dimensions
    pub fn try_new(width: f64, height: f64) -> Result<Self> {
        for (axis, value) in [("width", width), ("height", height)] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidDimension { axis, value });
            }
        }
        Ok(Self { width, height })
    }
}

// ============================================================================
// COLOR PALETTE
// ============================================================================

/// Explicit colour palette passed into every render call.
///
/// Replaces ambient theme-variable lookups so colour resolution is a pure
/// function of the render inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorPalette {
    /// Line/bar/marker fallback
    pub primary: String,
    /// Pie slice fallback
    pub secondary: String,
    /// Line chart area fill fallback
    pub area_fill: String,
    pub grid: String,
    pub axis: String,
    pub text: String,
    pub slice_stroke: String,
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self {
            primary: colors::PRIMARY.to_string(),
            secondary: colors::SECONDARY.to_string(),
            area_fill: colors::primary_alpha(0.12),
            grid: colors::slate_alpha(0.25),
            axis: colors::slate_alpha(0.4),
            text: colors::CURRENT.to_string(),
            slice_stroke: colors::WHITE.to_string(),
        }
    }
}

impl ColorPalette {
    pub fn with_primary(mut self, color: impl Into<String>) -> Self {
        self.primary = color.into();
        self
    }

    pub fn with_secondary(mut self, color: impl Into<String>) -> Self {
        self.secondary = color.into();
        self
    }

    pub fn with_area_fill(mut self, color: impl Into<String>) -> Self {
        self.area_fill = color.into();
        self
    }
}

pub mod colors {
    pub const PRIMARY: &str = "#6366f1";
    pub const SECONDARY: &str = "#14b8a6";
    pub const WHITE: &str = "white";
    pub const CURRENT: &str = "currentColor";

    pub fn primary_alpha(alpha: f64) -> String {
        format!("rgba(99, 102, 241, {})", alpha)
    }

    pub fn slate_alpha(alpha: f64) -> String {
        format!("rgba(148, 163, 184, {})", alpha)
    }
}

//! Structured prices and price-range filtering.
//!
//! Entries carry an optional [`Price`] (numeric amount plus currency symbol).
//! Display strings such as `"₺89"` are mapped to a `Price` once, at the
//! boundary, by [`parse_price`]; everything downstream works on the amount.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Currency symbol assumed when a price string carries none.
pub const DEFAULT_CURRENCY: &str = "₺";

/// Lower bound used when a price range omits its minimum.
pub const PRICE_RANGE_DEFAULT_MIN: f64 = 0.0;

/// Upper bound used when a price range omits its maximum.
pub const PRICE_RANGE_DEFAULT_MAX: f64 = 9999.0;

/// A quick-select price bracket offered by the filter panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePreset {
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
}

/// Quick-select brackets, cheapest first. The open-ended bracket is capped
/// at [`PRICE_RANGE_DEFAULT_MAX`].
pub const PRICE_PRESETS: &[PricePreset] = &[
    PricePreset { label: "₺0-₺50", min: 0.0, max: 50.0 },
    PricePreset { label: "₺50-₺100", min: 50.0, max: 100.0 },
    PricePreset { label: "₺100-₺250", min: 100.0, max: 250.0 },
    PricePreset { label: "₺250+", min: 250.0, max: PRICE_RANGE_DEFAULT_MAX },
];

// ---------------------------------------------------------------------------
// Price
// ---------------------------------------------------------------------------

/// A non-negative amount in the major unit of `currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub amount: f64,
    pub currency: String,
}

impl Price {
    pub fn new(amount: f64, currency: impl Into<String>) -> Self {
        Self {
            amount,
            currency: currency.into(),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.amount.fract() == 0.0 {
            write!(f, "{}{:.0}", self.currency, self.amount)
        } else {
            write!(f, "{}{:.2}", self.currency, self.amount)
        }
    }
}

fn price_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^\s*(?P<prefix>\p{Sc}?)\s*(?P<whole>\d+)(?:[.,](?P<frac>\d{1,2}))?\s*(?P<suffix>\p{Sc}?)\s*$",
        )
        .expect("price pattern is valid")
    })
}

/// Parse a display price string into a [`Price`].
///
/// Accepts an optional currency sign (Unicode category `Sc`, e.g. `₺`, `€`,
/// `$`) before or after the number, and an
/// optional one- or two-digit fractional part separated by `.` or `,`.
/// Thousands separators and signs are rejected. A string without a symbol
/// gets [`DEFAULT_CURRENCY`].
///
/// # Examples
///
/// ```
/// use giftreco_core::price::parse_price;
/// assert_eq!(parse_price("₺89").unwrap().amount, 89.0);
/// assert_eq!(parse_price("12,50 €").unwrap().currency, "€");
/// assert!(parse_price("free").is_err());
/// ```
pub fn parse_price(raw: &str) -> Result<Price, CoreError> {
    let caps = price_pattern().captures(raw).ok_or_else(|| {
        CoreError::Validation(format!(
            "Invalid price '{raw}'. Expected an amount such as '₺89' or '12.50'"
        ))
    })?;

    let prefix = caps.name("prefix").map_or("", |m| m.as_str());
    let suffix = caps.name("suffix").map_or("", |m| m.as_str());
    if !prefix.is_empty() && !suffix.is_empty() {
        return Err(CoreError::Validation(format!(
            "Invalid price '{raw}'. Currency symbol must appear only once"
        )));
    }

    let whole = &caps["whole"];
    let number = match caps.name("frac") {
        Some(frac) => format!("{whole}.{}", frac.as_str()),
        None => whole.to_string(),
    };
    let amount: f64 = number
        .parse()
        .map_err(|_| CoreError::Validation(format!("Invalid price amount '{number}'")))?;

    let currency = match (prefix, suffix) {
        ("", "") => DEFAULT_CURRENCY,
        ("", s) => s,
        (p, _) => p,
    };

    Ok(Price::new(amount, currency))
}

// ---------------------------------------------------------------------------
// PriceRange
// ---------------------------------------------------------------------------

/// An inclusive price window. Missing bounds fall back to
/// [`PRICE_RANGE_DEFAULT_MIN`] / [`PRICE_RANGE_DEFAULT_MAX`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl PriceRange {
    pub fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Build a range from a quick-select preset.
    pub fn from_preset(preset: &PricePreset) -> Self {
        Self::new(Some(preset.min), Some(preset.max))
    }

    pub fn effective_min(&self) -> f64 {
        self.min.unwrap_or(PRICE_RANGE_DEFAULT_MIN)
    }

    pub fn effective_max(&self) -> f64 {
        self.max.unwrap_or(PRICE_RANGE_DEFAULT_MAX)
    }

    /// Whether `amount` lies within the window, bounds included.
    pub fn contains(&self, amount: f64) -> bool {
        self.effective_min() <= amount && amount <= self.effective_max()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

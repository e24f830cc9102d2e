//! Price representation and display formatting.
//!
//! Prices are stored as `f64` because that is what the persisted cart slot
//! holds: a JSON number per line item. Display goes through `rust_decimal`
//! so that rounding to two places is done on the exact binary value, half
//! away from zero.
//!
//! Price text coming from an add-to-cart control is never rejected. Text
//! without a numeric prefix becomes `NaN`, which serializes as JSON `null`,
//! sums to `NaN`, and displays as `$NaN`.

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Prefix used for every displayed amount.
pub const CURRENCY_SYMBOL: &str = "$";

/// Number of decimal places shown for amounts.
const DISPLAY_DECIMALS: u32 = 2;

/// Magnitude from which amounts display in exponent form.
const EXPONENT_THRESHOLD: f64 = 1e21;

/// A line item price or cart total.
///
/// ## Examples
///
/// ```
/// use saree_cart_core::Price;
///
/// assert_eq!(Price::parse("75.00").to_string(), "$75.00");
/// assert_eq!(Price::parse("19.999").to_string(), "$20.00");
/// assert_eq!(Price::parse("not a price").to_string(), "$NaN");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(f64);

impl Price {
    /// A zero amount.
    pub const ZERO: Self = Self(0.0);

    /// Create a price from a raw amount.
    #[must_use]
    pub const fn new(amount: f64) -> Self {
        Self(amount)
    }

    /// Parse price text the way a browser `parseFloat` would.
    ///
    /// See [`parse_price_text`].
    #[must_use]
    pub fn parse(text: &str) -> Self {
        Self(parse_price_text(text))
    }

    /// Returns the raw amount.
    #[must_use]
    pub const fn amount(self) -> f64 {
        self.0
    }

    /// Returns `true` if the amount is not a number.
    #[must_use]
    pub const fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    /// Format the amount with two decimals, without the currency prefix.
    #[must_use]
    pub fn format_amount(self) -> String {
        let amount = self.0;
        if amount.is_nan() {
            return "NaN".to_string();
        }
        if amount.is_infinite() {
            return if amount > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
        }

        // Exponent form from 1e21 up, as `toFixed` does
        if amount.abs() >= EXPONENT_THRESHOLD {
            return format!("{amount:e}").replacen('e', "e+", 1);
        }

        // from_f64_retain keeps the exact binary value so 1.005 stays below the midpoint
        let Some(exact) = Decimal::from_f64_retain(amount) else {
            return format!("{amount:.2}");
        };
        let mut rounded =
            exact.round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DISPLAY_DECIMALS);

        // Small negatives keep their sign once rounded to zero; -0 itself does not
        if rounded.is_zero() {
            rounded.set_sign_positive(true);
            if amount < 0.0 {
                return format!("-{rounded}");
            }
        }
        rounded.to_string()
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(self) -> String {
        format!("{CURRENCY_SYMBOL}{}", self.format_amount())
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<f64> for Price {
    fn from(amount: f64) -> Self {
        Self(amount)
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Self> for Price {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace.
///
/// Mirrors `parseFloat`: `"75.00"` is 75, `"  12abc"` is 12, `"-.5"` is -0.5,
/// `"Infinity"` is infinite, and text without a numeric prefix is `NaN`.
#[must_use]
pub fn parse_price_text(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let mut chars = trimmed.char_indices().peekable();
    let mut end = 0;
    let mut negative = false;

    if let Some(&(_, sign @ ('+' | '-'))) = chars.peek() {
        negative = sign == '-';
        chars.next();
        end = 1;
    }

    if trimmed.get(end..).is_some_and(|rest| rest.starts_with("Infinity")) {
        return if negative {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let mut seen_digit = false;
    while let Some(&(i, c)) = chars.peek() {
        if !c.is_ascii_digit() {
            break;
        }
        seen_digit = true;
        end = i + 1;
        chars.next();
    }

    if let Some(&(_, '.')) = chars.peek() {
        chars.next();
        while let Some(&(i, c)) = chars.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            seen_digit = true;
            end = i + 1;
            chars.next();
        }
    }

    if !seen_digit {
        return f64::NAN;
    }

    // An exponent only counts when at least one digit follows it.
    if let Some(&(_, 'e' | 'E')) = chars.peek() {
        let mut exponent = chars.clone();
        exponent.next();
        if let Some(&(_, '+' | '-')) = exponent.peek() {
            exponent.next();
        }
        while let Some(&(i, c)) = exponent.peek() {
            if !c.is_ascii_digit() {
                break;
            }
            end = i + 1;
            exponent.next();
        }
    }

    trimmed
        .get(..end)
        .and_then(|prefix| prefix.parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_decimal() {
        assert_eq!(parse_price_text("75.00"), 75.0);
        assert_eq!(parse_price_text("40"), 40.0);
        assert_eq!(parse_price_text("0.5"), 0.5);
    }

    #[test]
    fn test_parse_numeric_prefix() {
        assert_eq!(parse_price_text("  12abc"), 12.0);
        assert_eq!(parse_price_text("3.5.1"), 3.5);
        assert_eq!(parse_price_text("99 USD"), 99.0);
        assert_eq!(parse_price_text("5."), 5.0);
        assert_eq!(parse_price_text(".25"), 0.25);
    }

    #[test]
    fn test_parse_signs_and_exponents() {
        assert_eq!(parse_price_text("-.5"), -0.5);
        assert_eq!(parse_price_text("+7"), 7.0);
        assert_eq!(parse_price_text("1e2"), 100.0);
        assert_eq!(parse_price_text("1e"), 1.0);
        assert_eq!(parse_price_text("2E-1x"), 0.2);
    }

    #[test]
    fn test_parse_non_numeric_is_nan() {
        assert!(parse_price_text("").is_nan());
        assert!(parse_price_text("abc").is_nan());
        assert!(parse_price_text("$75.00").is_nan());
        assert!(parse_price_text(".").is_nan());
        assert!(parse_price_text("-").is_nan());
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(parse_price_text("Infinity"), f64::INFINITY);
        assert_eq!(parse_price_text("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(Price::new(75.0).to_string(), "$75.00");
        assert_eq!(Price::new(115.0).to_string(), "$115.00");
        assert_eq!(Price::new(0.1 + 0.2).to_string(), "$0.30");
        assert_eq!(Price::ZERO.to_string(), "$0.00");
    }

    #[test]
    fn test_display_rounds_half_away_from_zero() {
        assert_eq!(Price::new(0.125).to_string(), "$0.13");
        assert_eq!(Price::new(2.5).format_amount(), "2.50");
        // 1.005 is stored just below the midpoint
        assert_eq!(Price::new(1.005).to_string(), "$1.00");
    }

    #[test]
    fn test_display_negative_zero() {
        assert_eq!(Price::new(-0.001).to_string(), "$-0.00");
        assert_eq!(Price::new(-0.0).to_string(), "$0.00");
        assert_eq!(Price::new(-0.005).format_amount(), "-0.01");
    }

    #[test]
    fn test_display_huge_amounts_in_exponent_form() {
        assert_eq!(Price::new(1e21).to_string(), "$1e+21");
        assert_eq!(Price::new(-2.5e22).to_string(), "$-2.5e+22");
        assert_eq!(Price::new(1e20).to_string(), "$100000000000000000000.00");
    }

    #[test]
    fn test_display_non_finite() {
        assert_eq!(Price::new(f64::NAN).to_string(), "$NaN");
        assert_eq!(Price::new(f64::INFINITY).to_string(), "$Infinity");
        assert_eq!(Price::new(f64::NEG_INFINITY).to_string(), "$-Infinity");
    }

    #[test]
    fn test_sum() {
        let prices = [Price::new(75.0), Price::new(40.0)];
        let total: Price = prices.iter().sum();
        assert_eq!(total.to_string(), "$115.00");

        let empty: [Price; 0] = [];
        assert_eq!(empty.iter().sum::<Price>(), Price::ZERO);
    }

    #[test]
    fn test_nan_poisons_sum() {
        let prices = [Price::new(10.0), Price::parse("free")];
        let total: Price = prices.into_iter().sum();
        assert!(total.is_nan());
    }

    #[test]
    fn test_serializes_as_number() {
        assert_eq!(serde_json::to_string(&Price::new(75.0)).unwrap(), "75.0");
        assert_eq!(serde_json::to_string(&Price::new(f64::NAN)).unwrap(), "null");
    }
}

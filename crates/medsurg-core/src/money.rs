//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Pesewas                                          │
//! │    GHS 10.99 is stored as 1099 (i64)                                    │
//! │    Arithmetic is exact; only formatting produces "10.99"                │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The backing store keeps prices and totals as plain two-decimal strings
//! ("5.00"), so this module also owns the string codec: [`Money::parse`]
//! reads sheet cells leniently, [`Money::to_decimal_string`] writes them
//! back, and [`Money::grouped`] formats the grand total with thousands
//! separators for the printed document.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in pesewas, the minor unit of the Ghanaian cedi.
///
/// ## Design Decisions
/// - **i64 (signed)**: Stock races can drive derived values negative and we
///   want those states representable rather than panicking
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from pesewas (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use medsurg_core::money::Money;
    ///
    /// let price = Money::from_pesewas(1099); // GHS 10.99
    /// assert_eq!(price.pesewas(), 1099);
    /// ```
    #[inline]
    pub const fn from_pesewas(pesewas: i64) -> Self {
        Money(pesewas)
    }

    /// Creates a Money value from major and minor units (cedis and pesewas).
    ///
    /// For negative amounts, only the major unit should be negative:
    /// `from_major_minor(-5, 50)` = -5.50, not -4.50.
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in pesewas (smallest currency unit).
    #[inline]
    pub const fn pesewas(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (cedis) portion.
    #[inline]
    pub const fn cedis(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit portion (always 0-99).
    #[inline]
    pub const fn minor_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use medsurg_core::money::Money;
    ///
    /// let unit_price = Money::from_pesewas(500); // GHS 5.00
    /// let subtotal = unit_price.multiply_quantity(3);
    /// assert_eq!(subtotal.pesewas(), 1500); // GHS 15.00
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }

    /// Parses a two-decimal string from a sheet cell.
    ///
    /// ## Accepted Input
    /// - `"5"`, `"5.0"`, `"5.00"` → 500
    /// - `"1,234.50"` → 123450 (thousands separators stripped)
    /// - `"-2.25"` → -225
    ///
    /// Fraction digits beyond the second are dropped - the store never
    /// holds sub-pesewa precision.
    ///
    /// ## Returns
    /// `None` for anything that is not a number. Callers that read sheet
    /// rows coerce `None` to zero, matching the store's lenient policy.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim().replace(',', "");
        if text.is_empty() {
            return None;
        }

        let (sign, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (-1i64, rest),
            None => (1i64, text.as_str()),
        };

        let (major_str, minor_str) = match unsigned.split_once('.') {
            Some((maj, min)) => (maj, min),
            None => (unsigned, ""),
        };

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().ok()?
        };

        if !minor_str.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().ok()? * 10,
            // Truncate beyond two fraction digits
            _ => minor_str[..2].parse().ok()?,
        };

        // A cell holding an absurdly large number is junk, not a price;
        // overflow reads as unparseable rather than wrapping
        let pesewas = major.checked_mul(100).and_then(|p| p.checked_add(minor))?;
        Some(Money(sign * pesewas))
    }

    /// Formats as a plain two-decimal string ("15.00") for sheet cells.
    pub fn to_decimal_string(&self) -> String {
        format!("{}", self)
    }

    /// Formats with thousands grouping ("1,234.50") for the grand-total
    /// line of the printed invoice.
    pub fn grouped(&self) -> String {
        let cedis = self.cedis().abs();
        let mut digits = cedis.to_string();

        let mut insert_at = digits.len() as isize - 3;
        while insert_at > 0 {
            digits.insert(insert_at as usize, ',');
            insert_at -= 3;
        }

        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:02}", sign, digits, self.minor_part())
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display renders the plain two-decimal form with no currency symbol -
/// exactly what lands in sheet cells and table columns. The currency code
/// is a label on the document, not part of the value.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}{}.{:02}", sign, self.cedis().abs(), self.minor_part())
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pesewas() {
        let money = Money::from_pesewas(1099);
        assert_eq!(money.pesewas(), 1099);
        assert_eq!(money.cedis(), 10);
        assert_eq!(money.minor_part(), 99);
    }

    #[test]
    fn test_from_major_minor() {
        let money = Money::from_major_minor(10, 99);
        assert_eq!(money.pesewas(), 1099);

        let negative = Money::from_major_minor(-5, 50);
        assert_eq!(negative.pesewas(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_pesewas(1099)), "10.99");
        assert_eq!(format!("{}", Money::from_pesewas(500)), "5.00");
        assert_eq!(format!("{}", Money::from_pesewas(-550)), "-5.50");
        assert_eq!(format!("{}", Money::from_pesewas(0)), "0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_pesewas(1000);
        let b = Money::from_pesewas(500);

        assert_eq!((a + b).pesewas(), 1500);
        assert_eq!((a - b).pesewas(), 500);
        assert_eq!((a * 3).pesewas(), 3000);
    }

    #[test]
    fn test_multiply_quantity() {
        let unit_price = Money::from_pesewas(500);
        assert_eq!(unit_price.multiply_quantity(3).pesewas(), 1500);
    }

    #[test]
    fn test_parse_plain_forms() {
        assert_eq!(Money::parse("5"), Some(Money::from_pesewas(500)));
        assert_eq!(Money::parse("5.0"), Some(Money::from_pesewas(500)));
        assert_eq!(Money::parse("5.00"), Some(Money::from_pesewas(500)));
        assert_eq!(Money::parse("10.99"), Some(Money::from_pesewas(1099)));
        assert_eq!(Money::parse(" 2.25 "), Some(Money::from_pesewas(225)));
    }

    #[test]
    fn test_parse_grouped_and_negative() {
        assert_eq!(Money::parse("1,234.50"), Some(Money::from_pesewas(123450)));
        assert_eq!(Money::parse("-2.25"), Some(Money::from_pesewas(-225)));
    }

    #[test]
    fn test_parse_truncates_extra_fraction_digits() {
        assert_eq!(Money::parse("5.999"), Some(Money::from_pesewas(599)));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(Money::parse(""), None);
        assert_eq!(Money::parse("free"), None);
        assert_eq!(Money::parse("5.x0"), None);
    }

    #[test]
    fn test_parse_rejects_overflowing_values() {
        // A number too large to hold in pesewas is junk, never a wrap
        assert_eq!(Money::parse("9223372036854775807"), None);
        assert_eq!(Money::parse("-9223372036854775807.99"), None);
        assert_eq!(Money::parse("92233720368547758.07"), Some(Money::from_pesewas(i64::MAX)));
    }

    #[test]
    fn test_default_is_zero() {
        assert_eq!(Money::default(), Money::zero());
    }

    #[test]
    fn test_grouped() {
        assert_eq!(Money::from_pesewas(1500).grouped(), "15.00");
        assert_eq!(Money::from_pesewas(123450).grouped(), "1,234.50");
        assert_eq!(Money::from_pesewas(123456789).grouped(), "1,234,567.89");
        assert_eq!(Money::from_pesewas(-123450).grouped(), "-1,234.50");
    }

    #[test]
    fn test_parse_display_round_trip() {
        let original = Money::from_pesewas(1099);
        let parsed = Money::parse(&original.to_decimal_string()).unwrap();
        assert_eq!(parsed, original);
    }
}

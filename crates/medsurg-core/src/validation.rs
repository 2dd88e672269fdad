//! # Validation Module
//!
//! Input validation for operator-supplied values.
//!
//! Validation runs BEFORE any store round trip: a bad item name or a
//! non-positive quantity never reaches the backing store. These checks
//! cover shape only - stock sufficiency is a separate, advisory check in
//! the engine because it needs a fresh snapshot.

use crate::error::ValidationError;
use crate::money::Money;
use crate::WALK_IN_CUSTOMER;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates an inventory item name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Case-sensitive as given; no normalization beyond the trim
///
/// ## Returns
/// The trimmed name.
///
/// ## Example
/// ```rust
/// use medsurg_core::validation::validate_item_name;
///
/// assert_eq!(validate_item_name("  Gauze ").unwrap(), "Gauze");
/// assert!(validate_item_name("   ").is_err());
/// ```
pub fn validate_item_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "item name".to_string(),
        });
    }

    Ok(name.to_string())
}

/// Normalizes a customer name, substituting the walk-in placeholder for
/// blank input. Never fails - an anonymous customer is a valid sale.
pub fn normalize_customer_name(name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        WALK_IN_CUSTOMER.to_string()
    } else {
        name.to_string()
    }
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value (cart line qty or restock qty).
///
/// ## Rules
/// - Must be positive (>= 1)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative
/// - Zero is allowed (free items)
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::MustBeNonNegative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_item_name() {
        assert_eq!(validate_item_name("Gauze").unwrap(), "Gauze");
        assert_eq!(validate_item_name("  Surgical Tape  ").unwrap(), "Surgical Tape");

        assert!(validate_item_name("").is_err());
        assert!(validate_item_name("   ").is_err());
    }

    #[test]
    fn test_item_name_is_case_sensitive() {
        // "gauze" and "Gauze" are different keys; validation must not fold case
        assert_eq!(validate_item_name("gauze").unwrap(), "gauze");
    }

    #[test]
    fn test_normalize_customer_name() {
        assert_eq!(normalize_customer_name("Ama Mensah"), "Ama Mensah");
        assert_eq!(normalize_customer_name(""), "Walk-in");
        assert_eq!(normalize_customer_name("   "), "Walk-in");
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(100).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_pesewas(0)).is_ok());
        assert!(validate_price(Money::from_pesewas(1099)).is_ok());
        assert!(validate_price(Money::from_pesewas(-1)).is_err());
    }
}

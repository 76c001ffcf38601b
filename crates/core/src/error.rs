//! Argument validation errors.
//!
//! Every variant is raised before any mutation happens, so a failed
//! operation always leaves the cart exactly as it was.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::ProductId;

/// Invalid arguments supplied to a cart operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product ID is empty or whitespace-only.
    #[error("product id cannot be empty")]
    EmptyProductId,

    /// The unit price is below zero.
    #[error("unit price must not be negative (got {price})")]
    NegativePrice {
        /// The rejected price.
        price: Decimal,
    },

    /// The resulting quantity does not fit in a `u32`.
    #[error("quantity for {id} would overflow")]
    QuantityOverflow {
        /// The line item whose quantity overflowed.
        id: ProductId,
    },

    /// The cart total would no longer fit in a [`Decimal`].
    #[error("cart total would overflow after changing {id}")]
    TotalOverflow {
        /// The line item whose change was rejected.
        id: ProductId,
    },

    /// Two line items share the same product ID.
    #[error("duplicate line item for product {id}")]
    DuplicateProductId {
        /// The repeated product ID.
        id: ProductId,
    },

    /// A quantity delta is not an integer.
    #[error("quantity delta must be an integer (got {input:?})")]
    InvalidDelta {
        /// The raw delta as supplied by the caller.
        input: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_error_display() {
        assert_eq!(
            CartError::EmptyProductId.to_string(),
            "product id cannot be empty"
        );

        let err = CartError::NegativePrice {
            price: Decimal::new(-100, 2),
        };
        assert_eq!(err.to_string(), "unit price must not be negative (got -1.00)");

        let err = CartError::InvalidDelta {
            input: "1.5".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "quantity delta must be an integer (got \"1.5\")"
        );
    }
}

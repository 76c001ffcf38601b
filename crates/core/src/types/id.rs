//! Product identifier type.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::CartError;

/// A stable external product identifier.
///
/// Identifies a line item within the cart; at most one line item exists per
/// `ProductId`.
///
/// ## Constraints
///
/// - Must not be empty
/// - Must not consist only of whitespace
///
/// ## Examples
///
/// ```
/// use pineapple_cart_core::ProductId;
///
/// assert!(ProductId::parse("A1").is_ok());
/// assert!(ProductId::parse("").is_err());
/// assert!(ProductId::parse("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Parse a `ProductId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyProductId`] if the input is empty or
    /// whitespace-only.
    pub fn parse(s: &str) -> Result<Self, CartError> {
        if s.trim().is_empty() {
            return Err(CartError::EmptyProductId);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `ProductId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = CartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ProductId {
    type Error = CartError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        if s.trim().is_empty() {
            return Err(CartError::EmptyProductId);
        }
        Ok(Self(s))
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_ids() {
        assert!(ProductId::parse("A1").is_ok());
        assert!(ProductId::parse("sku-123").is_ok());
        assert!(ProductId::parse(" padded ").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(
            ProductId::parse(""),
            Err(CartError::EmptyProductId)
        ));
        assert!(matches!(
            ProductId::parse(" \t"),
            Err(CartError::EmptyProductId)
        ));
    }

    #[test]
    fn test_display() {
        let id = ProductId::parse("A1").unwrap();
        assert_eq!(format!("{id}"), "A1");
    }

    #[test]
    fn test_serde_rejects_empty() {
        let parsed: Result<ProductId, _> = serde_json::from_str("\"\"");
        assert!(parsed.is_err());

        let parsed: ProductId = serde_json::from_str("\"B1\"").unwrap();
        assert_eq!(parsed.as_str(), "B1");
        assert_eq!(serde_json::to_string(&parsed).unwrap(), "\"B1\"");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = ProductId::parse("A1").unwrap();
        let b = ProductId::parse("B1").unwrap();
        assert!(a < b);
    }
}

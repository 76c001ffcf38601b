//! Cart line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{ProductId, Quantity, UnitPrice};

/// One product entry in the cart with its quantity.
///
/// `id`, `name`, `unit_price` and `image_url` are fixed when the item is
/// first added; only the quantity changes afterwards.
///
/// Stored as `{"id", "name", "unitPrice", "quantity", "imageUrl"}`. Records
/// written by older versions of the page use `price` instead of `unitPrice`
/// and are still accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    id: ProductId,
    name: String,
    #[serde(alias = "price")]
    unit_price: UnitPrice,
    quantity: Quantity,
    image_url: String,
}

impl LineItem {
    /// Create a new line item with a quantity of one.
    #[must_use]
    pub fn new(
        id: ProductId,
        name: impl Into<String>,
        unit_price: UnitPrice,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity: Quantity::ONE,
            image_url: image_url.into(),
        }
    }

    /// Returns the same line item with a different quantity.
    #[must_use]
    pub fn with_quantity(self, quantity: Quantity) -> Self {
        Self { quantity, ..self }
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn unit_price(&self) -> UnitPrice {
        self.unit_price
    }

    #[must_use]
    pub const fn quantity(&self) -> Quantity {
        self.quantity
    }

    #[must_use]
    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// `unit_price × quantity`.
    ///
    /// Saturates at [`Decimal::MAX`]. Line items held in a
    /// [`CartState`](crate::CartState) never do, since the cart rejects any
    /// change whose total would not fit.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.checked_line_total().unwrap_or(Decimal::MAX)
    }

    /// `unit_price × quantity`, or `None` if it does not fit in a [`Decimal`].
    #[must_use]
    pub fn checked_line_total(&self) -> Option<Decimal> {
        self.unit_price
            .amount()
            .checked_mul(Decimal::from(self.quantity.get()))
    }
}

//! The authoritative cart snapshot.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{Adjusted, CartError, LineItem, ProductId, Quantity};

/// All line items in the cart, in the order they were first added.
///
/// ## Invariants
///
/// - At most one line item per [`ProductId`]
/// - Every quantity is positive (enforced by [`Quantity`])
/// - `total` and `item_count` are derived on every call, never cached
///
/// Serialized as a JSON array of [`LineItem`] records. Deserializing a list
/// that repeats a product ID fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LineItem>", into = "Vec<LineItem>")]
pub struct CartState {
    items: Vec<LineItem>,
}

/// Outcome of [`CartState::adjust_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// No line item with that ID; nothing changed.
    Missing,
    /// The line item now has this quantity.
    Updated(Quantity),
    /// The quantity dropped to zero or below and the item was removed.
    Removed,
}

impl CartState {
    /// An empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Build a cart from an ordered list of line items.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::DuplicateProductId`] if two items share an ID, or
    /// [`CartError::TotalOverflow`] if the items cannot be totalled.
    pub fn from_items(items: Vec<LineItem>) -> Result<Self, CartError> {
        let mut total = Decimal::ZERO;
        for (index, item) in items.iter().enumerate() {
            if items.iter().skip(index + 1).any(|other| other.id() == item.id()) {
                return Err(CartError::DuplicateProductId {
                    id: item.id().clone(),
                });
            }
            total = item
                .checked_line_total()
                .and_then(|line| total.checked_add(line))
                .ok_or_else(|| CartError::TotalOverflow {
                    id: item.id().clone(),
                })?;
        }
        Ok(Self { items })
    }

    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Product IDs in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = &ProductId> {
        self.items.iter().map(LineItem::id)
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ `unit_price × quantity` over all line items.
    ///
    /// Exact: every mutation and [`from_items`](Self::from_items) rejects a
    /// change whose total would not fit in a [`Decimal`].
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.items
            .iter()
            .map(LineItem::line_total)
            .fold(Decimal::ZERO, Decimal::saturating_add)
    }

    /// Σ `quantity` over all line items.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .map(|item| u64::from(item.quantity().get()))
            .sum()
    }

    /// Add one unit of a product.
    ///
    /// A new product is appended with quantity one. An existing product keeps
    /// its position and its original name, price and image; only its quantity
    /// goes up by one. Returns the resulting quantity.
    ///
    /// Mutates this snapshot only; the store decides when it is saved.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the quantity is already
    /// `u32::MAX`, or [`CartError::TotalOverflow`] if the cart total would no
    /// longer fit. The cart is unchanged in either case.
    pub fn add_one(&mut self, item: LineItem) -> Result<Quantity, CartError> {
        let updated = match self.get(item.id()) {
            Some(existing) => match existing.quantity().adjust(1) {
                Adjusted::To(quantity) => existing.clone().with_quantity(quantity),
                Adjusted::Depleted | Adjusted::Overflow => {
                    return Err(CartError::QuantityOverflow {
                        id: existing.id().clone(),
                    });
                }
            },
            None => item,
        };

        let quantity = updated.quantity();
        self.upsert(updated)?;
        Ok(quantity)
    }

    /// Remove a line item. Returns it if it was present.
    pub fn remove(&mut self, id: &ProductId) -> Option<LineItem> {
        let index = self.items.iter().position(|item| item.id() == id)?;
        Some(self.items.remove(index))
    }

    /// Change a line item's quantity by `delta`.
    ///
    /// The item is removed when the result is zero or below; the remaining
    /// items keep their order.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::QuantityOverflow`] if the result exceeds
    /// `u32::MAX`, or [`CartError::TotalOverflow`] if the cart total would no
    /// longer fit. The cart is unchanged in either case.
    pub fn adjust_quantity(
        &mut self,
        id: &ProductId,
        delta: i64,
    ) -> Result<QuantityChange, CartError> {
        let Some(existing) = self.get(id) else {
            return Ok(QuantityChange::Missing);
        };

        match existing.quantity().adjust(delta) {
            Adjusted::To(quantity) => {
                let updated = existing.clone().with_quantity(quantity);
                self.upsert(updated)?;
                Ok(QuantityChange::Updated(quantity))
            }
            Adjusted::Depleted => {
                self.remove(id);
                Ok(QuantityChange::Removed)
            }
            Adjusted::Overflow => Err(CartError::QuantityOverflow { id: id.clone() }),
        }
    }

    /// Remove every line item. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.items.len();
        self.items.clear();
        removed
    }

    /// Replace the line item with the same ID, or append it, provided the
    /// cart total stays representable.
    fn upsert(&mut self, item: LineItem) -> Result<(), CartError> {
        let total = self
            .items
            .iter()
            .filter(|other| other.id() != item.id())
            .try_fold(Decimal::ZERO, |sum, other| {
                other.checked_line_total().and_then(|line| sum.checked_add(line))
            })
            .zip(item.checked_line_total())
            .and_then(|(others, line)| others.checked_add(line));
        if total.is_none() {
            return Err(CartError::TotalOverflow {
                id: item.id().clone(),
            });
        }

        match self.items.iter_mut().find(|other| other.id() == item.id()) {
            Some(slot) => *slot = item,
            None => self.items.push(item),
        }
        Ok(())
    }
}

impl TryFrom<Vec<LineItem>> for CartState {
    type Error = CartError;

    fn try_from(items: Vec<LineItem>) -> Result<Self, Self::Error> {
        Self::from_items(items)
    }
}

impl From<CartState> for Vec<LineItem> {
    fn from(state: CartState) -> Self {
        state.items
    }
}

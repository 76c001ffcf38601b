//! Display data for the cart panel.
//!
//! The view layer renders rows, the subtotal and the header counters from a
//! [`CartView`]. Building one is cheap; rebuild it from `event.state` on every
//! [`CartChanged`](crate::CartChanged).

use pineapple_cart_core::{CartState, LineItem, format_money};
use serde::Serialize;

/// One rendered cart row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub quantity: u32,
    /// Unit price, e.g. `"$9.99"`.
    pub price: String,
    /// `price × quantity`, e.g. `"$19.98"`.
    pub line_price: String,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: "$0.00".to_string(),
            item_count: 0,
        }
    }

    /// Counter shown next to the header cart icon, with a leading space.
    #[must_use]
    pub fn header_badge(&self) -> String {
        format!(" {}", self.item_count)
    }

    /// Counter shown in the cart panel heading.
    #[must_use]
    pub fn header_label(&self) -> String {
        format!("Items: {}", self.item_count)
    }
}

impl Default for CartView {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<&CartState> for CartView {
    fn from(state: &CartState) -> Self {
        Self {
            items: state.items().iter().map(CartItemView::from).collect(),
            subtotal: format_money(state.total()),
            item_count: state.item_count(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(item: &LineItem) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.name().to_owned(),
            image_url: item.image_url().to_owned(),
            quantity: item.quantity().get(),
            price: item.unit_price().display(),
            line_price: format_money(item.line_total()),
        }
    }
}

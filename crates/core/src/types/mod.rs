//! Core types for the cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod line_item;
pub mod price;
pub mod quantity;
pub mod state;

pub use id::ProductId;
pub use line_item::LineItem;
pub use price::{UnitPrice, format_money};
pub use quantity::{Adjusted, Quantity};
pub use state::{CartState, QuantityChange};

//! Naked Pineapple Cart Core - Shared cart domain types.
//!
//! This crate provides the types shared by every cart component:
//! - `pineapple-cart` - Cart store, persistence adapter and button-state sync
//! - `pineapple-cart-cli` - Command-line driver for the cart engine
//!
//! # Architecture
//!
//! The core crate contains only types and their invariants - no I/O, no
//! storage access, no event plumbing. This keeps it lightweight and allows it
//! to be used anywhere a cart snapshot needs to be inspected.
//!
//! # Modules
//!
//! - [`types`] - Validated product IDs, prices, quantities, line items and cart state
//! - [`error`] - Argument validation errors

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod types;

pub use error::CartError;
pub use types::*;

//! Naked Pineapple Cart - Client-side cart state engine.
//!
//! Tracks the products a shopper has picked and their quantities, mirrors
//! the cart to durable key-value storage, and tells the page what to redraw.
//!
//! # Architecture
//!
//! ```text
//! user action -> CartStore mutation -> CartPersistence write-through
//!             -> CartChanged -> view re-render + button-state update
//! ```
//!
//! The store never touches markup. A view layer subscribes to
//! [`CartChanged`] and renders from [`CartView`] and [`buttons::disabled_ids`].
//! Everything runs on the caller's thread; operations take `&mut self`, so
//! writes for one cart are never interleaved.
//!
//! # Example
//!
//! ```
//! use pineapple_cart::persistence::{CartPersistence, MemoryStore};
//! use pineapple_cart::{CartStore, CartView, buttons};
//! use rust_decimal::Decimal;
//!
//! let mut store = CartStore::open(CartPersistence::new(MemoryStore::new()));
//! store.subscribe(|event| {
//!     let _view = CartView::from(&event.state);
//!     let _disabled = buttons::disabled_ids(&event.state);
//! });
//!
//! store.add_item("A1", "Widget", Decimal::new(999, 2), "/a1.png").unwrap();
//! let state = store.add_item("A1", "Widget", Decimal::new(999, 2), "/a1.png").unwrap();
//! assert_eq!(state.total(), Decimal::new(1998, 2));
//! ```
//!
//! # Modules
//!
//! - [`store`] - The cart store and its operations
//! - [`persistence`] - Key-value stores and the cart persistence adapter
//! - [`events`] - Change notifications
//! - [`buttons`] - Add-to-cart button state derived from the cart
//! - [`view`] - Display data for the cart panel

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod buttons;
pub mod events;
pub mod persistence;
pub mod store;
pub mod view;

pub use events::{CartAction, CartChanged, Listener, PersistenceStatus, SubscriptionId};
pub use pineapple_cart_core::{CartError, CartState, LineItem, ProductId, Quantity, UnitPrice};
pub use store::CartStore;
pub use view::{CartItemView, CartView};

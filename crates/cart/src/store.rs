//! The cart store.
//!
//! [`CartStore`] is the only owner of the cart. Each operation runs to
//! completion before the next can start (`&mut self`):
//!
//! 1. validate arguments, failing with [`CartError`] before anything changes
//! 2. apply the change to the in-memory [`CartState`]
//! 3. write the new state through to [`CartPersistence`]
//! 4. notify listeners with a [`CartChanged`]
//!
//! A failed write in step 3 does not undo step 2; it is logged and reported
//! to listeners as [`PersistenceStatus::Failed`].

use pineapple_cart_core::{CartError, CartState, LineItem, ProductId, QuantityChange, UnitPrice};
use rust_decimal::Decimal;
use tracing::{debug, error, info, instrument};

use crate::events::{CartAction, CartChanged, Listeners, PersistenceStatus, SubscriptionId};
use crate::persistence::{CartPersistence, KeyValueStore, LoadStatus};

/// Owns the cart state, its persistence and its listeners.
#[derive(Debug)]
pub struct CartStore<S> {
    state: CartState,
    persistence: CartPersistence<S>,
    hydration: LoadStatus,
    listeners: Listeners,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a store hydrated from `persistence`.
    ///
    /// Never fails: missing or corrupt stored data yields an empty cart, and
    /// the outcome is available from [`hydration_status`](Self::hydration_status).
    #[instrument(skip_all, fields(key = persistence.key()))]
    pub fn open(persistence: CartPersistence<S>) -> Self {
        let hydration = persistence.load();
        info!(
            items = hydration.state.len(),
            corrupt = hydration.status.is_corrupt(),
            "Cart store opened"
        );

        Self {
            state: hydration.state,
            persistence,
            hydration: hydration.status,
            listeners: Listeners::default(),
        }
    }

    /// The current cart, as left by the last successful operation.
    #[must_use]
    pub const fn snapshot(&self) -> &CartState {
        &self.state
    }

    /// How the cart was obtained when the store was opened.
    #[must_use]
    pub const fn hydration_status(&self) -> &LoadStatus {
        &self.hydration
    }

    #[must_use]
    pub const fn persistence(&self) -> &CartPersistence<S> {
        &self.persistence
    }

    /// Register a listener, called after every successful operation.
    pub fn subscribe(&mut self, listener: impl FnMut(&CartChanged) + 'static) -> SubscriptionId {
        let id = self.listeners.add(Box::new(listener));
        debug!(%id, listeners = self.listeners.len(), "Listener subscribed");
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let removed = self.listeners.remove(id);
        debug!(%id, removed, "Listener unsubscribed");
        removed
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart has its quantity raised by one and keeps
    /// its position; a new product is appended with quantity one.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] for an empty ID, a negative price, or a quantity
    /// or cart total that would overflow. The cart is unchanged.
    #[instrument(skip(self))]
    pub fn add_item(
        &mut self,
        id: &str,
        name: &str,
        unit_price: Decimal,
        image_url: &str,
    ) -> Result<&CartState, CartError> {
        let id = ProductId::parse(id)?;
        let unit_price = UnitPrice::new(unit_price)?;
        let item = LineItem::new(id.clone(), name, unit_price, image_url);

        let quantity = self.state.add_one(item)?;
        debug!(%id, %quantity, "Item added");
        Ok(self.commit(CartAction::Added { id, quantity }))
    }

    /// Remove a product entirely. Removing an absent product is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::EmptyProductId`] for an empty ID.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, id: &str) -> Result<&CartState, CartError> {
        let id = ProductId::parse(id)?;

        let action = match self.state.remove(&id) {
            Some(_) => {
                debug!(%id, "Item removed");
                CartAction::Removed { id }
            }
            None => CartAction::Unchanged,
        };
        Ok(self.commit(action))
    }

    /// Change a product's quantity by `delta`.
    ///
    /// The product is removed when its quantity would reach zero or below.
    /// Changing an absent product is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`CartError`] for an empty ID or a quantity or cart total
    /// that would overflow. The cart is unchanged.
    #[instrument(skip(self))]
    pub fn change_quantity(&mut self, id: &str, delta: i64) -> Result<&CartState, CartError> {
        let id = ProductId::parse(id)?;

        let action = match self.state.adjust_quantity(&id, delta)? {
            QuantityChange::Updated(quantity) => {
                debug!(%id, %quantity, "Quantity changed");
                CartAction::QuantityChanged { id, quantity }
            }
            QuantityChange::Removed => {
                debug!(%id, "Quantity reached zero, item removed");
                CartAction::Removed { id }
            }
            QuantityChange::Missing => CartAction::Unchanged,
        };
        Ok(self.commit(action))
    }

    /// [`change_quantity`](Self::change_quantity) with the delta as text, as
    /// read from a control's data attribute or a command line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidDelta`] if `delta` is not an integer,
    /// otherwise as [`change_quantity`](Self::change_quantity).
    pub fn change_quantity_str(&mut self, id: &str, delta: &str) -> Result<&CartState, CartError> {
        let parsed = delta
            .trim()
            .parse::<i64>()
            .map_err(|_| CartError::InvalidDelta {
                input: delta.to_owned(),
            })?;
        self.change_quantity(id, parsed)
    }

    /// Remove every line item.
    #[instrument(skip(self))]
    pub fn clear(&mut self) -> &CartState {
        let removed = self.state.clear();
        debug!(removed, "Cart cleared");
        self.commit(CartAction::Cleared { removed })
    }

    fn commit(&mut self, action: CartAction) -> &CartState {
        let persistence = if action == CartAction::Unchanged {
            PersistenceStatus::Skipped
        } else {
            match self.persistence.save(&self.state) {
                Ok(()) => PersistenceStatus::Saved,
                Err(e) => {
                    error!(
                        key = self.persistence.key(),
                        error = %e,
                        "Cart write-through failed, keeping in-memory change"
                    );
                    PersistenceStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            }
        };

        let event = CartChanged {
            action,
            state: self.state.clone(),
            persistence,
        };
        self.listeners.notify(&event);
        &self.state
    }
}

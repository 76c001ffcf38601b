//! Change notifications emitted by the cart store.
//!
//! Every successful store operation produces one [`CartChanged`], delivered
//! synchronously to each listener in registration order.

use core::fmt;

use pineapple_cart_core::{CartState, ProductId, Quantity};

/// What a store operation did to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    /// A unit was added; `quantity` is the item's new quantity.
    Added { id: ProductId, quantity: Quantity },
    /// The line item is gone, either removed directly or by its quantity
    /// dropping to zero.
    Removed { id: ProductId },
    /// The line item's quantity changed and it is still in the cart.
    QuantityChanged { id: ProductId, quantity: Quantity },
    /// All line items were removed.
    Cleared { removed: usize },
    /// The operation targeted an absent item; the cart is as it was.
    Unchanged,
}

/// Outcome of the write-through for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceStatus {
    /// The new state was written.
    Saved,
    /// Nothing changed, so nothing was written.
    Skipped,
    /// The store rejected the write. The in-memory change still stands.
    Failed { reason: String },
}

impl PersistenceStatus {
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

/// Notification sent after every successful store operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartChanged {
    pub action: CartAction,
    /// The cart as the operation left it.
    pub state: CartState,
    pub persistence: PersistenceStatus,
}

impl CartChanged {
    /// Whether the view should reveal the cart panel. The storefront opens
    /// it after every add.
    #[must_use]
    pub const fn opens_cart(&self) -> bool {
        matches!(self.action, CartAction::Added { .. })
    }
}

/// Handle returned by [`CartStore::subscribe`](crate::CartStore::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "subscription-{}", self.0)
    }
}

/// A change listener.
pub type Listener = Box<dyn FnMut(&CartChanged)>;

/// Registered listeners in registration order.
#[derive(Default)]
pub(crate) struct Listeners {
    next_id: u64,
    entries: Vec<(SubscriptionId, Listener)>,
}

impl Listeners {
    pub(crate) fn add(&mut self, listener: Listener) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, listener));
        id
    }

    pub(crate) fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, event: &CartChanged) {
        for (_, listener) in &mut self.entries {
            listener(event);
        }
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("next_id", &self.next_id)
            .field("count", &self.entries.len())
            .finish()
    }
}

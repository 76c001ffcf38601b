//! Add-to-cart button state.
//!
//! A product's add control is disabled exactly while the product is in the
//! cart:
//!
//! ```text
//! ENABLED --add--> DISABLED --remove / quantity to 0--> ENABLED
//! ```
//!
//! Everything here is derived from a [`CartState`] snapshot. Nothing is
//! remembered between calls, so recomputing after hydration or after any
//! [`CartChanged`](crate::CartChanged) always agrees with the cart.

use std::collections::BTreeSet;

use pineapple_cart_core::{CartState, ProductId};

/// Whether a product's add control accepts clicks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonState {
    Enabled,
    Disabled,
}

/// A control whose state differs between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonTransition {
    pub id: ProductId,
    pub state: ButtonState,
}

/// IDs whose add control must be disabled: exactly the IDs in the cart.
#[must_use]
pub fn disabled_ids(state: &CartState) -> BTreeSet<ProductId> {
    state.ids().cloned().collect()
}

#[must_use]
pub fn button_state(state: &CartState, id: &ProductId) -> ButtonState {
    if state.contains(id) {
        ButtonState::Disabled
    } else {
        ButtonState::Enabled
    }
}

/// Controls that flip between `previous` and `next`, ordered by ID.
#[must_use]
pub fn transitions(
    previous: &BTreeSet<ProductId>,
    next: &BTreeSet<ProductId>,
) -> Vec<ButtonTransition> {
    let enabled = previous.difference(next).map(|id| ButtonTransition {
        id: id.clone(),
        state: ButtonState::Enabled,
    });
    let disabled = next.difference(previous).map(|id| ButtonTransition {
        id: id.clone(),
        state: ButtonState::Disabled,
    });

    let mut changes: Vec<_> = enabled.chain(disabled).collect();
    changes.sort_by(|a, b| a.id.cmp(&b.id));
    changes
}

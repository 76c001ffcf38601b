//! Cart mutation commands.
//!
//! The CLI plays the page's part: it subscribes to the store the way the
//! view layer does, applies one action, then redraws from the resulting
//! [`CartChanged`] and reports which add-to-cart controls flipped.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::io::Write;
use std::rc::Rc;

use pineapple_cart::buttons::{self, ButtonState};
use pineapple_cart::{CartAction, CartChanged, CartView, PersistenceStatus, ProductId};
use rust_decimal::Decimal;
use tracing::{info, warn};

use super::show::render;
use super::{CommandResult, open_store};
use crate::config::CliConfig;

/// A single user action against the cart.
#[derive(Debug, Clone)]
pub enum Mutation {
    Add {
        id: String,
        name: String,
        price: Decimal,
        image_url: String,
    },
    Remove {
        id: String,
    },
    Change {
        id: String,
        delta: String,
    },
    Clear,
}

/// Apply `mutation` to the configured cart and print the result.
///
/// # Errors
///
/// Returns an error for invalid arguments (the cart is left unchanged), if
/// the store cannot be opened, or if output fails. A failed write to storage
/// is reported but is not an error.
pub fn apply(config: &CliConfig, mutation: Mutation, out: &mut impl Write) -> CommandResult {
    let mut store = open_store(config)?;
    let before = buttons::disabled_ids(store.snapshot());

    let last_event: Rc<RefCell<Option<CartChanged>>> = Rc::new(RefCell::new(None));
    let sink = Rc::clone(&last_event);
    store.subscribe(move |event| {
        *sink.borrow_mut() = Some(event.clone());
    });

    match mutation {
        Mutation::Add {
            id,
            name,
            price,
            image_url,
        } => {
            store.add_item(&id, &name, price, &image_url)?;
        }
        Mutation::Remove { id } => {
            store.remove_item(&id)?;
        }
        Mutation::Change { id, delta } => {
            store.change_quantity_str(&id, &delta)?;
        }
        Mutation::Clear => {
            store.clear();
        }
    }

    let Some(event) = last_event.borrow_mut().take() else {
        return Ok(());
    };
    report(&event, &before, out)
}

fn report(
    event: &CartChanged,
    before: &BTreeSet<ProductId>,
    out: &mut impl Write,
) -> CommandResult {
    match &event.action {
        CartAction::Unchanged => info!("Item not in cart, nothing changed"),
        action => info!(?action, "Cart updated"),
    }

    if let PersistenceStatus::Failed { reason } = &event.persistence {
        warn!(%reason, "Cart change applied but not saved");
        writeln!(out, "warning: cart not saved ({reason})")?;
    }

    let view = CartView::from(&event.state);
    if event.opens_cart() {
        render(&view, out)?;
    } else {
        writeln!(out, "{}  Subtotal: {}", view.header_label(), view.subtotal)?;
    }

    let after = buttons::disabled_ids(&event.state);
    for change in buttons::transitions(before, &after) {
        let state = match change.state {
            ButtonState::Enabled => "enabled",
            ButtonState::Disabled => "disabled",
        };
        writeln!(out, "add-to-cart {}: {state}", change.id)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::config::LogFormat;

    fn config(dir: &TempDir) -> CliConfig {
        CliConfig {
            store_dir: dir.path().join("store"),
            storage_key: "cart".to_string(),
            quota_bytes: None,
            log_format: LogFormat::Pretty,
        }
    }

    fn add(config: &CliConfig, id: &str, cents: i64) -> String {
        let mut out = Vec::new();
        apply(
            config,
            Mutation::Add {
                id: id.to_string(),
                name: format!("Product {id}"),
                price: Decimal::new(cents, 2),
                image_url: format!("/{id}.png"),
            },
            &mut out,
        )
        .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_add_renders_cart_and_disables_button() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        let output = add(&config, "A1", 999);

        assert!(output.starts_with("Items: 1\n"));
        assert!(output.contains("A1  Product A1  1 x $9.99  $9.99  [/A1.png]"));
        assert!(output.contains("Subtotal: $9.99"));
        assert!(output.ends_with("add-to-cart A1: disabled\n"));

        // Second add: no button change, quantity 2.
        let output = add(&config, "A1", 999);
        assert!(output.contains("2 x $9.99  $19.98"));
        assert!(!output.contains("add-to-cart"));
    }

    #[test]
    fn test_decrement_to_zero_reenables_button() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        add(&config, "B1", 500);

        let mut out = Vec::new();
        apply(
            &config,
            Mutation::Change {
                id: "B1".to_string(),
                delta: "-1".to_string(),
            },
            &mut out,
        )
        .unwrap();
        let output = String::from_utf8(out).unwrap();
        assert_eq!(
            output,
            "Items: 0  Subtotal: $0.00\nadd-to-cart B1: enabled\n"
        );
    }

    #[test]
    fn test_invalid_input_leaves_cart_unchanged() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        add(&config, "A1", 999);

        let mut out = Vec::new();
        let result = apply(
            &config,
            Mutation::Add {
                id: "D1".to_string(),
                name: "Broken".to_string(),
                price: Decimal::new(-100, 2),
                image_url: String::new(),
            },
            &mut out,
        );
        assert!(result.is_err());

        let result = apply(
            &config,
            Mutation::Change {
                id: "A1".to_string(),
                delta: "1.5".to_string(),
            },
            &mut out,
        );
        assert!(result.is_err());
        assert!(out.is_empty());

        let store = open_store(&config).unwrap();
        assert_eq!(store.snapshot().item_count(), 1);
    }
}

//! Read-only commands: render the cart, list disabled buttons, dump storage.

use std::io::{self, Write};

use pineapple_cart::{CartView, buttons};

use super::{CommandResult, open_store};
use crate::config::CliConfig;

/// Write the cart panel: heading, one line per row, subtotal.
///
/// # Errors
///
/// Returns an I/O error if writing fails.
pub fn render(view: &CartView, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "{}", view.header_label())?;
    if view.items.is_empty() {
        writeln!(out, "  (cart is empty)")?;
    }
    for row in &view.items {
        writeln!(
            out,
            "  {id}  {name}  {quantity} x {price}  {line_price}  [{image}]",
            id = row.id,
            name = row.name,
            quantity = row.quantity,
            price = row.price,
            line_price = row.line_price,
            image = row.image_url,
        )?;
    }
    writeln!(out, "Subtotal: {}", view.subtotal)
}

/// `np-cart show`
///
/// # Errors
///
/// Returns an error if the store cannot be opened or output fails.
pub fn show(config: &CliConfig, json: bool, out: &mut impl Write) -> CommandResult {
    let store = open_store(config)?;
    let view = CartView::from(store.snapshot());

    if json {
        serde_json::to_writer_pretty(&mut *out, &view)?;
        writeln!(out)?;
    } else {
        render(&view, out)?;
    }
    Ok(())
}

/// `np-cart buttons` - IDs whose add-to-cart control is disabled.
///
/// # Errors
///
/// Returns an error if the store cannot be opened or output fails.
pub fn disabled_buttons(config: &CliConfig, out: &mut impl Write) -> CommandResult {
    let store = open_store(config)?;
    for id in buttons::disabled_ids(store.snapshot()) {
        writeln!(out, "{id}")?;
    }
    Ok(())
}

/// `np-cart export` - the persisted value exactly as stored.
///
/// # Errors
///
/// Returns an error if the store cannot be read or output fails.
pub fn export(config: &CliConfig, out: &mut impl Write) -> CommandResult {
    let store = open_store(config)?;
    match store.persistence().raw()? {
        Some(raw) => writeln!(out, "{raw}")?,
        None => tracing::info!(key = %config.storage_key, "Nothing stored"),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pineapple_cart::CartState;

    use super::*;

    #[test]
    fn test_render_empty() {
        let mut out = Vec::new();
        render(&CartView::from(&CartState::new()), &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Items: 0\n  (cart is empty)\nSubtotal: $0.00\n"
        );
    }
}

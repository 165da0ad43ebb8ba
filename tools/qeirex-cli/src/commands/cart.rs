//! Cart session commands.

use std::path::Path;

use anyhow::{Context as _, Result};
use qeirex_commerce::prelude::*;
use serde::Serialize;
use tracing::{debug, info};

use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CartCommand::Run {
            actions,
            session,
            no_save,
        } => run_actions(&actions, session.as_deref(), no_save, ctx).await,
        CartCommand::Show { session } => show_cart(session.as_deref(), ctx).await,
        CartCommand::Clear { session } => clear_cart(session.as_deref(), ctx).await,
    }
}

/// Cart report printed in `--json` mode.
#[derive(Serialize)]
struct CartReport<'a> {
    session: &'a str,
    items: &'a [CartLineItem],
    summary: CartSummary,
}

async fn run_actions(
    path: &str,
    session: Option<&str>,
    no_save: bool,
    ctx: &Context,
) -> Result<()> {
    let actions = read_actions(&ctx.resolve_path(path)).await?;
    let key = ctx.session_key(session);
    let mut snapshots = ctx.snapshot_store();
    let rules = ctx.config.validation_rules();

    let mut store = load_cart(&snapshots, &key, &rules)?;
    ctx.output.debug(&format!(
        "{} action(s) against {} line(s)",
        actions.len(),
        store.line_count()
    ));

    let changed = replay(&mut store, actions, &rules)?;
    info!(session = %key, changed, lines = store.line_count(), "replayed cart actions");

    if no_save {
        ctx.output.debug("--no-save given, snapshot left untouched");
    } else {
        snapshots
            .save(&key, &store.snapshot())
            .with_context(|| format!("Failed to save cart for session {}", key))?;
    }

    print_cart(&key, &store, ctx);
    if !no_save {
        ctx.output.success(&format!(
            "Saved {} to {}",
            key,
            snapshots.path_for(&key).display()
        ));
    }
    Ok(())
}

async fn show_cart(session: Option<&str>, ctx: &Context) -> Result<()> {
    let key = ctx.session_key(session);
    let store = load_cart(&ctx.snapshot_store(), &key, &ctx.config.validation_rules())?;
    print_cart(&key, &store, ctx);
    Ok(())
}

async fn clear_cart(session: Option<&str>, ctx: &Context) -> Result<()> {
    let key = ctx.session_key(session);
    let removed = ctx
        .snapshot_store()
        .delete(&key)
        .with_context(|| format!("Failed to clear cart for session {}", key))?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "session": key, "removed": removed }));
    } else if removed {
        ctx.output.success(&format!("Cleared {}", key));
    } else {
        ctx.output.warn(&format!("No saved cart for {}", key));
    }
    Ok(())
}

/// Parse a JSON array of cart actions.
async fn read_actions(path: &Path) -> Result<Vec<CartAction>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read actions file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse actions file: {}", path.display()))
}

/// Load a saved cart, or an empty one if the session has none.
///
/// Saved items pass through the same validation as replayed actions.
fn load_cart(
    snapshots: &impl SnapshotStore,
    key: &str,
    rules: &ValidationRules,
) -> Result<CartStore> {
    let mut store = CartStore::new();
    let Some(snapshot) = snapshots
        .load(key)
        .with_context(|| format!("Failed to load cart for session {}", key))?
    else {
        debug!(session = key, "no saved cart, starting empty");
        return Ok(store);
    };

    snapshot.check_version()?;
    ValidatingCart::new(&mut store, rules.clone())
        .initialize(snapshot.items)
        .with_context(|| format!("Saved cart for session {} is invalid", key))?;
    Ok(store)
}

/// Apply actions through the validation boundary.
///
/// Stops at the first rejected action. Returns how many actions changed the cart.
fn replay(
    store: &mut CartStore,
    actions: Vec<CartAction>,
    rules: &ValidationRules,
) -> Result<usize> {
    let mut cart = ValidatingCart::new(store, rules.clone());
    let mut changed = 0;
    for (index, action) in actions.into_iter().enumerate() {
        let name = action.name();
        if cart
            .dispatch(action)
            .with_context(|| format!("Action #{} ({}) rejected", index + 1, name))?
        {
            changed += 1;
        }
    }
    Ok(changed)
}

fn print_cart(key: &str, store: &CartStore, ctx: &Context) {
    let summary = store.summary(ctx.config.store.free_shipping_threshold);

    if ctx.output.is_json() {
        ctx.output.json(&CartReport {
            session: key,
            items: store.items(),
            summary,
        });
        return;
    }

    ctx.output.header(&format!("Cart {}", key));
    if store.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [8, 24, 5, 9, 10];
    ctx.output.table_row(&["ID", "NAME", "QTY", "PRICE", "LINE"], &widths);
    for item in store.items() {
        let quantity = item.quantity.to_string();
        let price = item.price.display();
        let line_total = item.line_total().display();
        ctx.output.table_row(
            &[item.id.as_str(), &item.name, &quantity, &price, &line_total],
            &widths,
        );
    }
    ctx.output.cart_summary(&summary);
}

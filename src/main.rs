use actix::prelude::*;
use anyhow::Context as _;
use std::sync::Arc;

use order_cart::actors::{
    AddItem, CartActor, CartChanged, ClearCart, GetCategories, GetSummary, ListCatalog,
    RemoveItem, Subscribe,
};
use order_cart::config::AppConfig;
use order_cart::metrics::Metrics;
use order_cart::{default_items, telemetry, Catalog, ItemId};

// ============================================================================
// Change Logger - stands in for the view layer
// ============================================================================

struct ChangeLogger;

impl Actor for ChangeLogger {
    type Context = Context<Self>;
}

impl Handler<CartChanged> for ChangeLogger {
    type Result = ();

    fn handle(&mut self, msg: CartChanged, _: &mut Self::Context) -> Self::Result {
        tracing::info!(
            version = msg.version,
            event = ?msg.event,
            at = %msg.changed_at,
            "🔔 Cart changed, refreshing view"
        );
    }
}

#[actix::main]
async fn main() -> anyhow::Result<()> {
    // Default to ORDER_CART_LOG (or info,order_cart=debug), RUST_LOG overrides
    let config = AppConfig::from_env();
    telemetry::init_tracing(&config.log_filter)?;

    tracing::info!("🚀 Starting order cart demo");

    // === 1. Load catalog ===
    let catalog = match &config.catalog_path {
        Some(path) => Catalog::from_json_file(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::from_items(default_items()).context("Built-in catalog is invalid")?,
    };

    for item in catalog.all() {
        tracing::info!(id = %item.id, name = %item.name, price = item.price, "📦 Catalog item");
    }

    // === 2. Start cart actor with metrics ===
    let metrics = Arc::new(Metrics::new()?);
    let cart = CartActor::new(Arc::new(catalog))
        .with_metrics(metrics.clone())
        .start();

    let logger = ChangeLogger.start();
    cart.send(Subscribe(logger.recipient())).await?;

    let categories = cart.send(GetCategories).await?;
    tracing::info!(?categories, "Catalog categories");
    if let Some(first) = categories.first() {
        let items = cart
            .send(ListCatalog {
                category: Some(first.clone()),
            })
            .await?;
        tracing::info!(category = %first, items = items.len(), "Items in first category");
    }

    // === 3. Scripted session ===
    let all = cart.send(ListCatalog { category: None }).await?;
    let ids: Vec<ItemId> = all.iter().map(|item| item.id).collect();

    if let Some(&first) = ids.first() {
        cart.send(AddItem(first)).await?;
        cart.send(AddItem(first)).await?;
    }
    if let Some(&second) = ids.get(1) {
        cart.send(AddItem(second)).await?;
    }

    let highest = ids.iter().map(|id| id.value()).max().unwrap_or(0);
    if let Some(missing) = highest.checked_add(1).map(ItemId) {
        let changed = cart.send(AddItem(missing)).await?;
        tracing::info!(id = %missing, changed, "Tried to add an unknown item");
    }

    if let Some(&first) = ids.first() {
        cart.send(RemoveItem(first)).await?;
    }

    // === 4. Refresh view ===
    let summary = cart.send(GetSummary).await?;
    for line in &summary.line_items {
        tracing::info!(
            name = %line.name,
            quantity = line.quantity,
            line_total = line.line_total,
            "🛒 Line item"
        );
    }
    tracing::info!(
        item_count = summary.item_count,
        total_price = summary.total_price,
        "Cart totals"
    );
    tracing::debug!(summary = %serde_json::to_string(&summary)?, "Cart summary");

    cart.send(ClearCart).await?;
    let cleared_again = cart.send(ClearCart).await?;
    tracing::info!(cleared_again, "Cart cleared");

    tracing::info!("📊 Metrics\n{}", metrics.render()?);
    tracing::info!("🎉 Demo complete!");

    Ok(())
}

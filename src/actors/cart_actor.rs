use actix::prelude::*;
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::aggregation::Aggregate;
use crate::domain::cart::{CartCommand, CartEvent, CartSummary, OrderAggregator};
use crate::domain::catalog::{Catalog, CatalogError, CatalogItem, ItemId};
use crate::metrics::Metrics;

// ============================================================================
// Actor Messages
// ============================================================================

/// Reply is true when the selection changed
#[derive(Message)]
#[rtype(result = "bool")]
pub struct AddItem(pub ItemId);

#[derive(Message)]
#[rtype(result = "bool")]
pub struct RemoveItem(pub ItemId);

#[derive(Message)]
#[rtype(result = "bool")]
pub struct ClearCart;

/// Replace the catalog; the selection is left untouched
#[derive(Message)]
#[rtype(result = "Result<(), CatalogError>")]
pub struct LoadCatalog(pub Vec<CatalogItem>);

#[derive(Message)]
#[rtype(result = "CartSummary")]
pub struct GetSummary;

/// All items, or only the given category
#[derive(Message)]
#[rtype(result = "Vec<CatalogItem>")]
pub struct ListCatalog {
    pub category: Option<String>,
}

#[derive(Message)]
#[rtype(result = "Vec<String>")]
pub struct GetCategories;

#[derive(Message)]
#[rtype(result = "()")]
pub struct Subscribe(pub Recipient<CartChanged>);

/// Sent to subscribers once per effective cart mutation
#[derive(Message, Debug, Clone)]
#[rtype(result = "()")]
pub struct CartChanged {
    pub event: CartEvent,
    pub version: u64,
    pub changed_at: DateTime<Utc>,
}

// ============================================================================
// Cart Actor - Serializes access to catalog and cart
// ============================================================================
//
// The catalog and the aggregator live together inside one actor, so every
// command and query runs against a consistent pair without extra locking.
//
// ============================================================================

pub struct CartActor {
    cart: OrderAggregator,
    subscribers: Vec<Recipient<CartChanged>>,
    metrics: Option<Arc<Metrics>>,
}

impl CartActor {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            cart: OrderAggregator::new(catalog),
            subscribers: Vec::new(),
            metrics: None,
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        metrics.record_catalog_load(Some(self.cart.catalog().len()));
        metrics.observe_cart(self.cart.item_count(), self.cart.total_price());
        self.metrics = Some(metrics);
        self
    }

    fn run(&mut self, command: CartCommand) -> bool {
        let events = self.cart.execute(command);
        let applied = !events.is_empty();

        if let Some(metrics) = &self.metrics {
            metrics.record_command(command.name(), applied);
            if applied {
                metrics.observe_cart(self.cart.item_count(), self.cart.total_price());
            }
        }

        if applied {
            self.subscribers.retain(|recipient| recipient.connected());

            let version = self.cart.version();
            for event in events {
                let message = CartChanged {
                    event,
                    version,
                    changed_at: Utc::now(),
                };
                for recipient in &self.subscribers {
                    recipient.do_send(message.clone());
                }
            }
        }

        applied
    }
}

impl Actor for CartActor {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!(
            catalog_items = self.cart.catalog().len(),
            "CartActor started"
        );
    }
}

// ============================================================================
// Message Handlers
// ============================================================================

impl Handler<AddItem> for CartActor {
    type Result = MessageResult<AddItem>;

    fn handle(&mut self, msg: AddItem, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.run(CartCommand::Add(msg.0)))
    }
}

impl Handler<RemoveItem> for CartActor {
    type Result = MessageResult<RemoveItem>;

    fn handle(&mut self, msg: RemoveItem, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.run(CartCommand::Remove(msg.0)))
    }
}

impl Handler<ClearCart> for CartActor {
    type Result = MessageResult<ClearCart>;

    fn handle(&mut self, _: ClearCart, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.run(CartCommand::Clear))
    }
}

impl Handler<LoadCatalog> for CartActor {
    type Result = Result<(), CatalogError>;

    fn handle(&mut self, msg: LoadCatalog, _: &mut Self::Context) -> Self::Result {
        let result = Catalog::from_items(msg.0);

        if let Some(metrics) = &self.metrics {
            metrics.record_catalog_load(result.as_ref().ok().map(Catalog::len));
        }

        let catalog = result?;
        self.cart.replace_catalog(Arc::new(catalog));

        if let Some(metrics) = &self.metrics {
            metrics.observe_cart(self.cart.item_count(), self.cart.total_price());
        }

        Ok(())
    }
}

impl Handler<GetSummary> for CartActor {
    type Result = MessageResult<GetSummary>;

    fn handle(&mut self, _: GetSummary, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.cart.summary())
    }
}

impl Handler<ListCatalog> for CartActor {
    type Result = MessageResult<ListCatalog>;

    fn handle(&mut self, msg: ListCatalog, _: &mut Self::Context) -> Self::Result {
        let catalog = self.cart.catalog();
        let items = match msg.category {
            Some(category) => catalog.by_category(&category).into_iter().cloned().collect(),
            None => catalog.all().to_vec(),
        };
        MessageResult(items)
    }
}

impl Handler<GetCategories> for CartActor {
    type Result = MessageResult<GetCategories>;

    fn handle(&mut self, _: GetCategories, _: &mut Self::Context) -> Self::Result {
        MessageResult(self.cart.catalog().categories().to_vec())
    }
}

impl Handler<Subscribe> for CartActor {
    type Result = ();

    fn handle(&mut self, msg: Subscribe, _: &mut Self::Context) -> Self::Result {
        tracing::debug!(subscribers = self.subscribers.len() + 1, "Cart subscriber added");
        self.subscribers.push(msg.0);
    }
}

// ============================================================================
// Tests
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use crate::aggregation::{Aggregate, ChangeNotifier, DomainEvent, SubscriptionId};
use crate::domain::catalog::{Catalog, ItemId};
use super::commands::CartCommand;
use super::events::CartEvent;
use super::value_objects::{CartSummary, LineItem};

// ============================================================================
// Order Aggregator - Cart selection joined against a catalog
// ============================================================================
//
// Selection invariant: an id is present iff its quantity is >= 1.
//
// Every "nothing to do" case (unknown id, removing an unselected id,
// clearing an empty cart) is a silent no-op: no state change, no event,
// no observer call. An effective command emits exactly one event.
//
// Queries join the selection against the current catalog on every call.
// Ids the catalog no longer knows are skipped by `line_items` and
// `total_price` but still count towards `item_count`.
//
// ============================================================================

pub struct OrderAggregator {
    catalog: Arc<Catalog>,
    selection: BTreeMap<ItemId, u32>,
    version: u64,
    notifier: ChangeNotifier<CartEvent>,
}

impl OrderAggregator {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            selection: BTreeMap::new(),
            version: 0,
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    /// Point the cart at a reloaded catalog. The selection is kept as is.
    pub fn replace_catalog(&mut self, catalog: Arc<Catalog>) {
        let stale = self
            .selection
            .keys()
            .filter(|id| !catalog.contains(**id))
            .count();

        tracing::debug!(
            catalog_items = catalog.len(),
            stale_entries = stale,
            "Cart catalog replaced"
        );

        self.catalog = catalog;
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Handle a command and apply the resulting events, notifying observers
    /// once per event. Returns the applied events (empty for a no-op).
    pub fn execute(&mut self, command: CartCommand) -> Vec<CartEvent> {
        let events = self.handle_command(&command);

        if events.is_empty() {
            tracing::debug!(command = command.name(), ?command, "Cart command ignored");
            return events;
        }

        for event in &events {
            self.apply_event(event);
            tracing::debug!(
                event_type = event.event_type(),
                version = self.version,
                ?event,
                "Cart changed"
            );
            self.notifier.notify(event);
        }

        events
    }

    pub fn add(&mut self, id: ItemId) -> bool {
        !self.execute(CartCommand::Add(id)).is_empty()
    }

    pub fn remove(&mut self, id: ItemId) -> bool {
        !self.execute(CartCommand::Remove(id)).is_empty()
    }

    pub fn clear(&mut self) -> bool {
        !self.execute(CartCommand::Clear).is_empty()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: FnMut(&CartEvent) + Send + 'static,
    {
        self.notifier.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.notifier.unsubscribe(id)
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    /// Line items in ascending id order
    pub fn line_items(&self) -> Vec<LineItem> {
        self.selection
            .iter()
            .filter_map(|(id, &quantity)| {
                self.catalog
                    .find_by_id(*id)
                    .map(|item| LineItem::new(item, quantity))
            })
            .collect()
    }

    /// Total units selected, not distinct items
    pub fn item_count(&self) -> u64 {
        self.selection.values().map(|&quantity| u64::from(quantity)).sum()
    }

    pub fn total_price(&self) -> f64 {
        self.selection
            .iter()
            .filter_map(|(id, &quantity)| {
                self.catalog
                    .find_by_id(*id)
                    .map(|item| item.price * f64::from(quantity))
            })
            .sum()
    }

    pub fn summary(&self) -> CartSummary {
        CartSummary {
            line_items: self.line_items(),
            item_count: self.item_count(),
            total_price: self.total_price(),
        }
    }

    pub fn quantity_of(&self, id: ItemId) -> u32 {
        self.selection.get(&id).copied().unwrap_or(0)
    }

    pub fn distinct_items(&self) -> usize {
        self.selection.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selection.is_empty()
    }

    /// Zero deletes the entry; quantities are never stored as 0
    fn set_quantity(&mut self, id: ItemId, quantity: u32) {
        if quantity == 0 {
            self.selection.remove(&id);
        } else {
            self.selection.insert(id, quantity);
        }
    }
}

impl fmt::Debug for OrderAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderAggregator")
            .field("catalog_items", &self.catalog.len())
            .field("selection", &self.selection)
            .field("version", &self.version)
            .field("notifier", &self.notifier)
            .finish()
    }
}

// ============================================================================
// Aggregate Trait Implementation
// ============================================================================

impl Aggregate for OrderAggregator {
    type Event = CartEvent;
    type Command = CartCommand;

    fn handle_command(&self, command: &Self::Command) -> Vec<Self::Event> {
        match *command {
            CartCommand::Add(id) => {
                if !self.catalog.contains(id) {
                    return vec![];
                }

                match self.quantity_of(id).checked_add(1) {
                    Some(quantity) => vec![CartEvent::ItemAdded { id, quantity }],
                    None => vec![],
                }
            }

            CartCommand::Remove(id) => match self.selection.get(&id) {
                Some(&quantity) => vec![CartEvent::ItemRemoved {
                    id,
                    quantity: quantity.saturating_sub(1),
                }],
                None => vec![],
            },

            CartCommand::Clear => {
                if self.selection.is_empty() {
                    return vec![];
                }

                vec![CartEvent::Cleared {
                    units: self.item_count(),
                }]
            }
        }
    }

    fn apply_event(&mut self, event: &Self::Event) {
        match *event {
            CartEvent::ItemAdded { id, quantity } => {
                self.set_quantity(id, quantity);
            }
            CartEvent::ItemRemoved { id, quantity } => {
                // Removal never introduces an entry
                if self.selection.contains_key(&id) {
                    self.set_quantity(id, quantity);
                }
            }
            CartEvent::Cleared { .. } => {
                self.selection.clear();
            }
        }

        self.version += 1;
    }

    fn version(&self) -> u64 {
        self.version
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::CatalogItem;
    use std::sync::Mutex;

    fn furniture() -> Arc<Catalog> {
        Arc::new(
            Catalog::from_items(vec![
                CatalogItem::new(1, "Chair", 149.0),
                CatalogItem::new(2, "Desk", 299.0),
            ])
            .unwrap(),
        )
    }

    /// Aggregator plus a shared log of every event observers saw
    fn observed_cart() -> (OrderAggregator, Arc<Mutex<Vec<CartEvent>>>) {
        let mut cart = OrderAggregator::new(furniture());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        cart.subscribe(move |event| sink.lock().unwrap().push(event.clone()));
        (cart, seen)
    }

    #[test]
    fn test_add_twice_and_another() {
        let (mut cart, seen) = observed_cart();

        assert!(cart.add(ItemId(1)));
        assert!(cart.add(ItemId(1)));
        assert!(cart.add(ItemId(2)));

        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total_price(), 597.0);

        let lines = cart.line_items();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "Chair");
        assert_eq!(lines[0].quantity, 2);
        assert_eq!(lines[0].line_total, 298.0);
        assert_eq!(lines[1].name, "Desk");
        assert_eq!(lines[1].quantity, 1);
        assert_eq!(lines[1].line_total, 299.0);

        assert_eq!(seen.lock().unwrap().len(), 3);
        assert_eq!(cart.version(), 3);
    }

    #[test]
    fn test_add_unknown_id_is_silent_noop() {
        let (mut cart, seen) = observed_cart();

        assert!(!cart.add(ItemId(99)));

        assert!(cart.line_items().is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_price(), 0.0);
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(cart.version(), 0);
    }

    #[test]
    fn test_add_unknown_id_leaves_existing_selection() {
        let (mut cart, seen) = observed_cart();
        cart.add(ItemId(2));
        let before = cart.summary();

        assert!(!cart.add(ItemId(-5)));

        assert_eq!(cart.summary(), before);
        assert_eq!(seen.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_add_then_remove_restores_state() {
        let (mut cart, seen) = observed_cart();
        cart.add(ItemId(2));
        let before = cart.summary();

        assert!(cart.add(ItemId(1)));
        assert!(cart.remove(ItemId(1)));

        assert_eq!(cart.summary(), before);
        assert_eq!(cart.quantity_of(ItemId(1)), 0);
        assert_eq!(seen.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_remove_last_unit_deletes_entry() {
        let (mut cart, seen) = observed_cart();

        cart.add(ItemId(1));
        assert!(cart.remove(ItemId(1)));
        assert!(!cart.remove(ItemId(1)));

        assert!(cart.line_items().is_empty());
        assert!(cart.is_empty());
        assert_eq!(cart.distinct_items(), 0);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[1],
            CartEvent::ItemRemoved {
                id: ItemId(1),
                quantity: 0
            }
        );
    }

    #[test]
    fn test_remove_decrements_by_one() {
        let (mut cart, _) = observed_cart();
        cart.add(ItemId(1));
        cart.add(ItemId(1));
        cart.add(ItemId(1));

        cart.remove(ItemId(1));

        assert_eq!(cart.quantity_of(ItemId(1)), 2);
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_clear_notifies_once() {
        let (mut cart, seen) = observed_cart();
        cart.add(ItemId(1));
        cart.add(ItemId(2));
        cart.add(ItemId(2));

        assert!(cart.clear());
        assert!(!cart.clear());

        assert!(cart.line_items().is_empty());
        assert_eq!(cart.item_count(), 0);
        assert_eq!(cart.total_price(), 0.0);

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 4);
        assert_eq!(seen[3], CartEvent::Cleared { units: 3 });
    }

    #[test]
    fn test_clear_on_empty_cart_is_silent() {
        let (mut cart, seen) = observed_cart();

        assert!(!cart.clear());
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_line_items_ascending_by_id() {
        let (mut cart, _) = observed_cart();
        cart.add(ItemId(2));
        cart.add(ItemId(1));

        let ids: Vec<ItemId> = cart.line_items().iter().map(|line| line.id).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(2)]);
    }

    #[test]
    fn test_stale_ids_skipped_after_catalog_reload() {
        let (mut cart, seen) = observed_cart();
        cart.add(ItemId(1));
        cart.add(ItemId(2));
        cart.add(ItemId(2));

        let reloaded = Catalog::from_items(vec![CatalogItem::new(2, "Desk", 250.0)]).unwrap();
        cart.replace_catalog(Arc::new(reloaded));

        let lines = cart.line_items();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].name, "Desk");
        assert_eq!(lines[0].line_total, 500.0);
        assert_eq!(cart.total_price(), 500.0);
        assert_eq!(cart.item_count(), 3);

        // Replacing the catalog is not a selection change
        assert_eq!(seen.lock().unwrap().len(), 3);

        // The stale entry can still be removed, but not added to
        assert!(!cart.add(ItemId(1)));
        assert!(cart.remove(ItemId(1)));
        assert_eq!(cart.item_count(), 2);
    }

    #[test]
    fn test_unsubscribed_observer_not_called() {
        let mut cart = OrderAggregator::new(furniture());
        let calls = Arc::new(Mutex::new(0));
        let counter = calls.clone();
        let id = cart.subscribe(move |_| *counter.lock().unwrap() += 1);

        cart.add(ItemId(1));
        assert!(cart.unsubscribe(id));
        cart.add(ItemId(1));

        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[test]
    fn test_execute_returns_applied_events() {
        let mut cart = OrderAggregator::new(furniture());

        let events = cart.execute(CartCommand::Add(ItemId(2)));
        assert_eq!(
            events,
            vec![CartEvent::ItemAdded {
                id: ItemId(2),
                quantity: 1
            }]
        );

        assert!(cart.execute(CartCommand::Remove(ItemId(1))).is_empty());
    }

    #[test]
    fn test_replay_rebuilds_selection() {
        let mut source = OrderAggregator::new(furniture());
        let mut history = Vec::new();
        history.extend(source.execute(CartCommand::Add(ItemId(1))));
        history.extend(source.execute(CartCommand::Add(ItemId(2))));
        history.extend(source.execute(CartCommand::Add(ItemId(2))));
        history.extend(source.execute(CartCommand::Remove(ItemId(1))));

        let mut copy = OrderAggregator::new(furniture());
        copy.replay(&history);

        assert_eq!(copy.summary(), source.summary());
        assert_eq!(copy.version(), 4);
    }

    #[test]
    fn test_replay_zero_quantity_add_leaves_no_entry() {
        let mut cart = OrderAggregator::new(furniture());
        cart.replay(&[CartEvent::ItemAdded {
            id: ItemId(1),
            quantity: 0,
        }]);

        assert!(cart.is_empty());
        assert!(cart.line_items().is_empty());
        assert_eq!(cart.distinct_items(), 0);

        cart.replay(&[
            CartEvent::ItemAdded {
                id: ItemId(2),
                quantity: 2,
            },
            CartEvent::ItemAdded {
                id: ItemId(2),
                quantity: 0,
            },
        ]);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_replay_remove_of_unselected_id_is_ignored() {
        let mut cart = OrderAggregator::new(furniture());
        cart.replay(&[CartEvent::ItemRemoved {
            id: ItemId(2),
            quantity: 3,
        }]);

        assert!(cart.is_empty());
        assert_eq!(cart.quantity_of(ItemId(2)), 0);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_at_max_quantity_is_noop() {
        let (mut cart, seen) = observed_cart();
        cart.replay(&[CartEvent::ItemAdded {
            id: ItemId(1),
            quantity: u32::MAX,
        }]);
        let version = cart.version();

        assert!(!cart.add(ItemId(1)));

        assert_eq!(cart.quantity_of(ItemId(1)), u32::MAX);
        assert_eq!(cart.item_count(), u64::from(u32::MAX));
        assert_eq!(cart.version(), version);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_item_count_matches_sum_of_quantities() {
        let (mut cart, _) = observed_cart();
        for id in [1, 2, 2, 1, 1, 2] {
            cart.add(ItemId(id));
        }
        cart.remove(ItemId(2));

        let lines = cart.line_items();
        let summed: u64 = lines.iter().map(|line| u64::from(line.quantity)).sum();
        let priced: f64 = lines.iter().map(|line| line.line_total).sum();

        assert_eq!(cart.item_count(), summed);
        assert_eq!(cart.total_price(), priced);
        assert_eq!(cart.item_count(), 5);
    }
}

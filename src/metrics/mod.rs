use prometheus::{Encoder, Gauge, IntCounterVec, IntGauge, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus metrics for cart activity
// ============================================================================
//
// Provides metrics for:
// - Cart commands, split by whether they changed the selection
// - Current cart size and total
// - Catalog loads and size
//
// `render` produces the Prometheus text exposition format.
// ============================================================================

pub struct Metrics {
    registry: Registry,

    // Cart Metrics
    pub cart_commands: IntCounterVec,
    pub cart_item_count: IntGauge,
    pub cart_total_price: Gauge,

    // Catalog Metrics
    pub catalog_items: IntGauge,
    pub catalog_loads: IntCounterVec,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        // Cart Metrics
        let cart_commands = IntCounterVec::new(
            Opts::new("cart_commands_total", "Cart commands received"),
            &["command", "outcome"],
        )?;
        registry.register(Box::new(cart_commands.clone()))?;

        let cart_item_count = IntGauge::new("cart_item_count", "Units currently in the cart")?;
        registry.register(Box::new(cart_item_count.clone()))?;

        let cart_total_price = Gauge::new("cart_total_price", "Current cart total")?;
        registry.register(Box::new(cart_total_price.clone()))?;

        // Catalog Metrics
        let catalog_items = IntGauge::new("catalog_items", "Items in the loaded catalog")?;
        registry.register(Box::new(catalog_items.clone()))?;

        let catalog_loads = IntCounterVec::new(
            Opts::new("catalog_loads_total", "Catalog load attempts"),
            &["outcome"],
        )?;
        registry.register(Box::new(catalog_loads.clone()))?;

        Ok(Self {
            registry,
            cart_commands,
            cart_item_count,
            cart_total_price,
            catalog_items,
            catalog_loads,
        })
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Helper to record a cart command and whether it changed anything
    pub fn record_command(&self, command: &str, applied: bool) {
        let outcome = if applied { "applied" } else { "ignored" };
        self.cart_commands.with_label_values(&[command, outcome]).inc();
    }

    /// Helper to publish the current cart figures
    pub fn observe_cart(&self, item_count: u64, total_price: f64) {
        self.cart_item_count.set(i64::try_from(item_count).unwrap_or(i64::MAX));
        self.cart_total_price.set(total_price);
    }

    /// Helper to record a catalog load attempt
    pub fn record_catalog_load(&self, items: Option<usize>) {
        match items {
            Some(count) => {
                self.catalog_loads.with_label_values(&["loaded"]).inc();
                self.catalog_items.set(i64::try_from(count).unwrap_or(i64::MAX));
            }
            None => {
                self.catalog_loads.with_label_values(&["rejected"]).inc();
            }
        }
    }

    /// Encode every registered metric in the text exposition format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

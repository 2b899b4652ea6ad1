use contracts::dashboards::d410_ecommerce_overview::dto::MetricsSnapshot;
use contracts::shared::indicators::*;
use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::compute::ecommerce;
use super::metadata::ids;

type ComputeFn = fn(&MetricsSnapshot) -> IndicatorValue;

/// Shared registry instance; it holds only function pointers.
pub static REGISTRY: Lazy<IndicatorRegistry> = Lazy::new(IndicatorRegistry::new);

/// Central registry: maps `IndicatorId` to its compute function.
pub struct IndicatorRegistry {
    fns: HashMap<String, ComputeFn>,
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        let mut fns: HashMap<String, ComputeFn> = HashMap::new();

        fns.insert(ids::total_revenue().0, ecommerce::compute_total_revenue);
        fns.insert(ids::avg_ticket().0, ecommerce::compute_avg_ticket);
        fns.insert(ids::unique_customers().0, ecommerce::compute_unique_customers);
        fns.insert(ids::total_orders().0, ecommerce::compute_total_orders);
        fns.insert(
            ids::avg_orders_per_customer().0,
            ecommerce::compute_avg_orders_per_customer,
        );
        fns.insert(ids::conversion_rate().0, ecommerce::compute_conversion_rate);

        Self { fns }
    }

    /// Compute a batch of indicators in the requested order.
    pub fn compute(&self, ids: &[IndicatorId], metrics: &MetricsSnapshot) -> Vec<IndicatorValue> {
        let mut results = Vec::with_capacity(ids.len());

        for id in ids {
            if let Some(compute_fn) = self.fns.get(&id.0) {
                results.push(compute_fn(metrics));
            } else {
                tracing::warn!("indicator {} not found in registry", id.0);
            }
        }

        results
    }
}

impl Default for IndicatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

use contracts::dashboards::d410_ecommerce_overview::dto::MetricsSnapshot;
use std::collections::HashSet;

use super::filter::FilteredSubset;
use crate::shared::data::Dataset;

/// Sum of item revenue over the subset's lines, in dataset order.
pub fn total_revenue(subset: &FilteredSubset) -> f64 {
    subset
        .lines
        .iter()
        .fold(0.0, |acc, line| acc + line.revenue())
}

/// `numerator / denominator`, or 0 when there is nothing to divide by.
pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Compute the six KPIs of a filtered subset.
///
/// The conversion rate divides by every order in the dataset, not by the
/// filtered ones.
pub fn compute(
    dataset: &Dataset,
    subset: &FilteredSubset,
    delivered_status: &str,
) -> MetricsSnapshot {
    let total_revenue = total_revenue(subset);
    let total_orders = subset.orders.len() as u64;
    let unique_customers = subset
        .orders
        .iter()
        .map(|order| order.customer_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;
    let delivered = subset
        .orders
        .iter()
        .filter(|order| order.status == delivered_status)
        .count();

    MetricsSnapshot {
        total_revenue,
        unique_customers,
        total_orders,
        avg_ticket: ratio(total_revenue, total_orders as f64),
        avg_orders_per_customer: ratio(total_orders as f64, unique_customers as f64),
        conversion_rate: ratio(delivered as f64, dataset.orders().len() as f64) * 100.0,
    }
}

use contracts::dashboards::d410_ecommerce_overview::dto::MetricsSnapshot;
use contracts::shared::indicators::*;

use crate::shared::indicators::metadata::ids;

fn value(id: IndicatorId, v: f64) -> IndicatorValue {
    IndicatorValue {
        id,
        value: Some(v),
        subtitle: None,
    }
}

pub fn compute_total_revenue(m: &MetricsSnapshot) -> IndicatorValue {
    value(ids::total_revenue(), m.total_revenue)
}

pub fn compute_avg_ticket(m: &MetricsSnapshot) -> IndicatorValue {
    value(ids::avg_ticket(), m.avg_ticket)
}

pub fn compute_unique_customers(m: &MetricsSnapshot) -> IndicatorValue {
    value(ids::unique_customers(), m.unique_customers as f64)
}

pub fn compute_total_orders(m: &MetricsSnapshot) -> IndicatorValue {
    value(ids::total_orders(), m.total_orders as f64)
}

pub fn compute_avg_orders_per_customer(m: &MetricsSnapshot) -> IndicatorValue {
    value(ids::avg_orders_per_customer(), m.avg_orders_per_customer)
}

pub fn compute_conversion_rate(m: &MetricsSnapshot) -> IndicatorValue {
    IndicatorValue {
        subtitle: Some("of all orders in the dataset".into()),
        ..value(ids::conversion_rate(), m.conversion_rate)
    }
}

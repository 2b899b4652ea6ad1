use chrono::NaiveDate;
use contracts::dashboards::d410_ecommerce_overview::dto::{
    CategoryRevenueRow, MonthOverMonthRow, MonthlyCountRow, MonthlyRevenueRow,
    SegmentCountRow, StateCustomerCountRow, StateRevenueRow, StatusCountRow, TopProductRow,
};
use contracts::domain::ecommerce::month_key;
use contracts::enums::customer_segment::CustomerSegment;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::filter::{FilteredSubset, SaleLine};
use super::metrics::ratio;
use crate::shared::data::Dataset;

// ---------------------------------------------------------------------------
// Revenue series (fully filtered subset)
// ---------------------------------------------------------------------------

/// Sum line revenue per key. Keys come back sorted ascending.
fn revenue_by<'a, F>(subset: &FilteredSubset<'a>, key: F) -> BTreeMap<String, f64>
where
    F: Fn(&SaleLine<'a>) -> String,
{
    let mut totals: BTreeMap<String, f64> = BTreeMap::new();
    for line in &subset.lines {
        *totals.entry(key(line)).or_insert(0.0) += line.revenue();
    }
    totals
}

/// Revenue per "YYYY-MM". Months without lines are absent, not zero-filled.
pub fn revenue_by_month(subset: &FilteredSubset) -> Vec<MonthlyRevenueRow> {
    revenue_by(subset, |line| line.order.order_month())
        .into_iter()
        .map(|(month, revenue)| MonthlyRevenueRow { month, revenue })
        .collect()
}

/// Change against the previous row, for every row but the first.
/// `rows` must be sorted chronologically, as `revenue_by_month` returns them.
pub fn month_over_month_change(rows: &[MonthlyRevenueRow]) -> Vec<MonthOverMonthRow> {
    rows.windows(2)
        .map(|pair| {
            let (prev, cur) = (&pair[0], &pair[1]);
            let delta = cur.revenue - prev.revenue;
            let percent = if prev.revenue > 0.0 {
                delta / prev.revenue * 100.0
            } else {
                0.0
            };
            MonthOverMonthRow {
                month: cur.month.clone(),
                revenue: cur.revenue,
                previous_revenue: prev.revenue,
                delta,
                percent,
            }
        })
        .collect()
}

pub fn revenue_by_category(subset: &FilteredSubset) -> Vec<CategoryRevenueRow> {
    revenue_by(subset, |line| line.product.category.clone())
        .into_iter()
        .map(|(category, revenue)| CategoryRevenueRow { category, revenue })
        .collect()
}

pub fn revenue_by_state(subset: &FilteredSubset) -> Vec<StateRevenueRow> {
    revenue_by(subset, |line| line.customer.state.clone())
        .into_iter()
        .map(|(state, revenue)| StateRevenueRow { state, revenue })
        .collect()
}

// ---------------------------------------------------------------------------
// Category-agnostic views
// ---------------------------------------------------------------------------

/// Best selling `(product name, category)` pairs by revenue, highest first.
/// Ties keep the order in which the pairs were first met.
pub fn top_products(subset: &FilteredSubset, limit: usize) -> Vec<TopProductRow> {
    let mut rows: Vec<TopProductRow> = Vec::new();
    let mut positions: HashMap<(&str, &str), usize> = HashMap::new();

    for line in &subset.lines {
        let key = (line.product.name.as_str(), line.product.category.as_str());
        match positions.get(&key) {
            Some(&i) => rows[i].revenue += line.revenue(),
            None => {
                positions.insert(key, rows.len());
                rows.push(TopProductRow {
                    product_name: line.product.name.clone(),
                    category: line.product.category.clone(),
                    revenue: line.revenue(),
                });
            }
        }
    }

    // sort_by is stable
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
    rows.truncate(limit);
    rows
}

/// Order count per status with each status's share of the counted orders.
pub fn status_distribution(subset: &FilteredSubset) -> Vec<StatusCountRow> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for order in &subset.orders {
        *counts.entry(order.status.as_str()).or_insert(0) += 1;
    }
    let total = subset.orders.len() as f64;

    counts
        .into_iter()
        .map(|(status, orders)| StatusCountRow {
            status: status.to_string(),
            orders,
            share_percent: ratio(orders as f64, total) * 100.0,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Order counts (fully filtered subset)
// ---------------------------------------------------------------------------

pub fn unique_customers_by_month(subset: &FilteredSubset) -> Vec<MonthlyCountRow> {
    let mut customers: BTreeMap<String, HashSet<&str>> = BTreeMap::new();
    for order in &subset.orders {
        customers
            .entry(order.order_month())
            .or_default()
            .insert(order.customer_id.as_str());
    }
    customers
        .into_iter()
        .map(|(month, ids)| MonthlyCountRow {
            month,
            count: ids.len() as u64,
        })
        .collect()
}

pub fn orders_by_month(subset: &FilteredSubset) -> Vec<MonthlyCountRow> {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for order in &subset.orders {
        *counts.entry(order.order_month()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(month, count)| MonthlyCountRow { month, count })
        .collect()
}

// ---------------------------------------------------------------------------
// Global views (filters never apply)
// ---------------------------------------------------------------------------

/// Customers grouped by the month of their first order in the whole dataset.
/// Orders of unknown customers are ignored.
pub fn new_customers_by_month(dataset: &Dataset) -> Vec<MonthlyCountRow> {
    let mut first_order: HashMap<&str, NaiveDate> = HashMap::new();
    for order in dataset.orders() {
        if dataset.customer(&order.customer_id).is_none() {
            continue;
        }
        first_order
            .entry(order.customer_id.as_str())
            .and_modify(|date| {
                if order.order_date < *date {
                    *date = order.order_date;
                }
            })
            .or_insert(order.order_date);
    }

    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for date in first_order.values() {
        *counts.entry(month_key(*date)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(month, count)| MonthlyCountRow { month, count })
        .collect()
}

/// Customer records per state, a demographic view independent of orders.
pub fn customers_by_state(dataset: &Dataset) -> Vec<StateCustomerCountRow> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for customer in dataset.customers() {
        *counts.entry(customer.state.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(state, customers)| StateCustomerCountRow {
            state: state.to_string(),
            customers,
        })
        .collect()
}

/// RFM records per segment: all four segments in display order, or nothing
/// when the RFM table is empty.
pub fn segment_distribution(dataset: &Dataset) -> Vec<SegmentCountRow> {
    if dataset.rfm().is_empty() {
        return vec![];
    }
    CustomerSegment::all()
        .into_iter()
        .map(|segment| SegmentCountRow {
            segment,
            customers: dataset
                .rfm()
                .iter()
                .filter(|r| r.segment == segment)
                .count() as u64,
        })
        .collect()
}

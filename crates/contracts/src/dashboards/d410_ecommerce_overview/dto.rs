use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::enums::customer_segment::CustomerSegment;
use crate::shared::indicators::IndicatorValue;

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

/// Current filter selection of the dashboard.
///
/// Every field is an explicit set of accepted values. An empty set accepts
/// nothing for that dimension; "no filter" is expressed by listing every
/// available option (see `FilterOptions`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Months in format "YYYY-MM"
    pub months: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub statuses: BTreeSet<String>,
    /// Customer region codes
    pub states: BTreeSet<String>,
    pub segments: BTreeSet<CustomerSegment>,
}

/// Values available for each selector, derived from the dataset.
/// All lists are sorted ascending; segments follow display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub months: Vec<String>,
    pub categories: Vec<String>,
    pub statuses: Vec<String>,
    pub states: Vec<String>,
    pub segments: Vec<CustomerSegment>,
}

impl FilterOptions {
    /// Selection with every option ticked except statuses, which is limited to
    /// the single revenue-recognised status.
    pub fn default_filter(&self, delivered_status: &str) -> FilterSpec {
        FilterSpec {
            months: self.months.iter().cloned().collect(),
            categories: self.categories.iter().cloned().collect(),
            statuses: BTreeSet::from([delivered_status.to_string()]),
            states: self.states.iter().cloned().collect(),
            segments: self.segments.iter().copied().collect(),
        }
    }

    /// Selection with every option ticked, statuses included.
    pub fn select_all(&self) -> FilterSpec {
        FilterSpec {
            months: self.months.iter().cloned().collect(),
            categories: self.categories.iter().cloned().collect(),
            statuses: self.statuses.iter().cloned().collect(),
            states: self.states.iter().cloned().collect(),
            segments: self.segments.iter().copied().collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// KPIs
// ---------------------------------------------------------------------------

/// Scalar KPIs of one filtered subset. Every ratio is 0 when its denominator is 0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_revenue: f64,
    pub unique_customers: u64,
    pub total_orders: u64,
    pub avg_ticket: f64,
    pub avg_orders_per_customer: f64,
    /// Delivered retained orders as a percentage of all orders in the dataset
    pub conversion_rate: f64,
}

// ---------------------------------------------------------------------------
// Chart rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRevenueRow {
    pub month: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthOverMonthRow {
    pub month: String,
    pub revenue: f64,
    pub previous_revenue: f64,
    pub delta: f64,
    /// 0 when the previous month had no revenue
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopProductRow {
    pub product_name: String,
    pub category: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRevenueRow {
    pub category: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateRevenueRow {
    pub state: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusCountRow {
    pub status: String,
    pub orders: u64,
    /// Share of all counted orders, in percent
    pub share_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCountRow {
    pub month: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateCustomerCountRow {
    pub state: String,
    pub customers: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentCountRow {
    pub segment: CustomerSegment,
    pub customers: u64,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Everything the presentation layer needs for one filter selection.
///
/// `top_products` and `status_distribution` are computed from the
/// category-agnostic subset, so they may include rows whose category is not
/// selected. `new_customers_by_month`, `customers_by_state` and
/// `segment_distribution` ignore the filter entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardBundle {
    pub filter: FilterSpec,
    /// False when the fully filtered subset has no orders
    pub has_data: bool,
    pub metrics: MetricsSnapshot,
    /// The same KPIs in catalogue order, ready for card rendering
    pub indicators: Vec<IndicatorValue>,
    pub revenue_by_month: Vec<MonthlyRevenueRow>,
    pub month_over_month: Vec<MonthOverMonthRow>,
    pub top_products: Vec<TopProductRow>,
    pub revenue_by_category: Vec<CategoryRevenueRow>,
    pub revenue_by_state: Vec<StateRevenueRow>,
    pub status_distribution: Vec<StatusCountRow>,
    pub unique_customers_by_month: Vec<MonthlyCountRow>,
    pub orders_by_month: Vec<MonthlyCountRow>,
    pub new_customers_by_month: Vec<MonthlyCountRow>,
    pub customers_by_state: Vec<StateCustomerCountRow>,
    pub segment_distribution: Vec<SegmentCountRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplit::btreeset;

    fn options() -> FilterOptions {
        FilterOptions {
            months: vec!["2024-01".into(), "2024-02".into()],
            categories: vec!["Books".into(), "Toys".into()],
            statuses: vec!["Cancelled".into(), "Delivered".into()],
            states: vec!["RJ".into(), "SP".into()],
            segments: vec![CustomerSegment::Vip, CustomerSegment::Inativo],
        }
    }

    #[test]
    fn test_default_filter_limits_statuses() {
        let spec = options().default_filter("Delivered");
        assert_eq!(spec.statuses, btreeset! {"Delivered".to_string()});
        assert_eq!(spec.months.len(), 2);
        assert_eq!(spec.categories.len(), 2);
        assert_eq!(spec.states.len(), 2);
        assert_eq!(
            spec.segments,
            btreeset! {CustomerSegment::Vip, CustomerSegment::Inativo}
        );
    }

    #[test]
    fn test_select_all_keeps_every_status() {
        let spec = options().select_all();
        assert_eq!(
            spec.statuses,
            btreeset! {"Cancelled".to_string(), "Delivered".to_string()}
        );
    }

    #[test]
    fn test_filter_spec_is_a_usable_map_key() {
        let mut seen = std::collections::HashSet::new();
        seen.insert(options().default_filter("Delivered"));
        assert!(seen.contains(&options().default_filter("Delivered")));
        assert!(!seen.contains(&options().select_all()));
    }
}

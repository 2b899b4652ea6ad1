use contracts::dashboards::d410_ecommerce_overview::dto::FilterSpec;
use contracts::domain::ecommerce::{Customer, Order, OrderItem, Product};
use std::collections::{HashMap, HashSet};

use crate::shared::data::Dataset;

/// One order line joined to its order, product and customer.
#[derive(Debug, Clone, Copy)]
pub struct SaleLine<'a> {
    pub item: &'a OrderItem,
    pub order: &'a Order,
    pub product: &'a Product,
    pub customer: &'a Customer,
}

impl SaleLine<'_> {
    pub fn revenue(&self) -> f64 {
        self.item.revenue()
    }
}

/// A filtered view over the dataset. Rows keep dataset order.
#[derive(Debug, Clone, Default)]
pub struct FilteredSubset<'a> {
    pub orders: Vec<&'a Order>,
    pub lines: Vec<SaleLine<'a>>,
    pub products: Vec<&'a Product>,
}

impl<'a> FilteredSubset<'a> {
    pub fn order_items(&self) -> impl Iterator<Item = &'a OrderItem> + '_ {
        self.lines.iter().map(|line| line.item)
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

/// Both views produced by one filter pass.
#[derive(Debug, Clone, Default)]
pub struct FilterResult<'a> {
    /// Every filter applied; closed in both directions: each line belongs to a
    /// retained order and product, each order has at least one line.
    pub filtered: FilteredSubset<'a>,
    /// Every filter except category. Orders are not required to have a line,
    /// so status counts include orders whose items were all filtered away.
    pub category_agnostic: FilteredSubset<'a>,
}

/// Apply a filter selection to the dataset.
///
/// Orders are narrowed by month and status, then by customer state, then by
/// RFM segment; products by category; lines must join to both. Rows that
/// reference missing ids are dropped.
pub fn apply<'a>(dataset: &'a Dataset, spec: &FilterSpec) -> FilterResult<'a> {
    // Segment filtering only kicks in when at least one present segment is unticked
    let restrict_segments = !dataset.segments_present().is_subset(&spec.segments);

    let mut orphan_orders = 0usize;
    let mut base_orders: Vec<(&Order, &Customer)> = Vec::new();
    for order in dataset.orders() {
        if !spec.months.contains(&order.order_month()) || !spec.statuses.contains(&order.status) {
            continue;
        }
        let Some(customer) = dataset.customer(&order.customer_id) else {
            orphan_orders += 1;
            continue;
        };
        if !spec.states.contains(&customer.state) {
            continue;
        }
        if restrict_segments {
            match dataset.segment_of(&customer.id) {
                Some(segment) if spec.segments.contains(&segment) => {}
                _ => continue,
            }
        }
        base_orders.push((order, customer));
    }

    let retained_orders: HashMap<&str, (&Order, &Customer)> = base_orders
        .iter()
        .map(|&(order, customer)| (order.id.as_str(), (order, customer)))
        .collect();

    let retained_products: HashSet<&str> = dataset
        .products()
        .iter()
        .filter(|p| spec.categories.contains(&p.category))
        .map(|p| p.id.as_str())
        .collect();

    let mut orphan_items = 0usize;
    let mut agnostic_lines = Vec::new();
    for item in dataset.order_items() {
        let product = match dataset.product(&item.product_id) {
            Some(product) if dataset.order(&item.order_id).is_some() => product,
            _ => {
                orphan_items += 1;
                continue;
            }
        };
        if let Some(&(order, customer)) = retained_orders.get(item.order_id.as_str()) {
            agnostic_lines.push(SaleLine {
                item,
                order,
                product,
                customer,
            });
        }
    }

    let lines: Vec<SaleLine<'a>> = agnostic_lines
        .iter()
        .filter(|line| retained_products.contains(line.product.id.as_str()))
        .copied()
        .collect();

    let orders_with_lines: HashSet<&str> = lines.iter().map(|l| l.order.id.as_str()).collect();
    let orders: Vec<&Order> = base_orders
        .iter()
        .map(|&(order, _)| order)
        .filter(|order| orders_with_lines.contains(order.id.as_str()))
        .collect();

    let products: Vec<&Product> = dataset
        .products()
        .iter()
        .filter(|p| retained_products.contains(p.id.as_str()))
        .collect();

    if orphan_orders > 0 || orphan_items > 0 {
        tracing::debug!(
            "Dropped {} orders with unknown customers and {} items with unknown orders/products",
            orphan_orders,
            orphan_items
        );
    }
    tracing::debug!(
        "Filter applied: {} orders / {} lines (category-agnostic: {} orders / {} lines)",
        orders.len(),
        lines.len(),
        base_orders.len(),
        agnostic_lines.len()
    );

    FilterResult {
        filtered: FilteredSubset {
            orders,
            lines,
            products,
        },
        category_agnostic: FilteredSubset {
            orders: base_orders.into_iter().map(|(order, _)| order).collect(),
            lines: agnostic_lines,
            products: dataset.products().iter().collect(),
        },
    }
}

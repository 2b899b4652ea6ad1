use contracts::domain::ecommerce::{Customer, Order, OrderItem, Product, RfmRecord};
use contracts::enums::customer_segment::CustomerSegment;
use std::collections::{BTreeSet, HashMap, HashSet};

use super::provider::DatasetTables;

/// The five tables with lookup indexes. Immutable once built.
///
/// Customers, products and orders are unique by id: later duplicates are
/// dropped. The first RFM record of a customer wins.
#[derive(Debug)]
pub struct Dataset {
    customers: Vec<Customer>,
    products: Vec<Product>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    rfm: Vec<RfmRecord>,
    customer_idx: HashMap<String, usize>,
    product_idx: HashMap<String, usize>,
    order_idx: HashMap<String, usize>,
    segment_idx: HashMap<String, CustomerSegment>,
    segments_present: BTreeSet<CustomerSegment>,
}

impl Dataset {
    pub fn new(tables: DatasetTables) -> Self {
        let DatasetTables {
            customers,
            products,
            orders,
            order_items,
            rfm,
        } = tables;

        let customers = dedup_by_id(customers, "customers", |c| &c.id);
        let products = dedup_by_id(products, "products", |p| &p.id);
        let orders = dedup_by_id(orders, "orders", |o| &o.id);

        let customer_idx = index_by_id(&customers, |c| &c.id);
        let product_idx = index_by_id(&products, |p| &p.id);
        let order_idx = index_by_id(&orders, |o| &o.id);

        let mut segment_idx = HashMap::with_capacity(rfm.len());
        for record in &rfm {
            segment_idx
                .entry(record.customer_id.clone())
                .or_insert(record.segment);
        }
        let segments_present = rfm.iter().map(|r| r.segment).collect();

        Self {
            customers,
            products,
            orders,
            order_items,
            rfm,
            customer_idx,
            product_idx,
            order_idx,
            segment_idx,
            segments_present,
        }
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order_items(&self) -> &[OrderItem] {
        &self.order_items
    }

    pub fn rfm(&self) -> &[RfmRecord] {
        &self.rfm
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customer_idx.get(id).map(|&i| &self.customers[i])
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.product_idx.get(id).map(|&i| &self.products[i])
    }

    pub fn order(&self, id: &str) -> Option<&Order> {
        self.order_idx.get(id).map(|&i| &self.orders[i])
    }

    pub fn segment_of(&self, customer_id: &str) -> Option<CustomerSegment> {
        self.segment_idx.get(customer_id).copied()
    }

    /// Distinct segments found in the RFM table
    pub fn segments_present(&self) -> &BTreeSet<CustomerSegment> {
        &self.segments_present
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

fn dedup_by_id<T, F>(rows: Vec<T>, table: &str, id: F) -> Vec<T>
where
    F: Fn(&T) -> &String,
{
    let mut seen = HashSet::with_capacity(rows.len());
    let before = rows.len();
    let rows: Vec<T> = rows
        .into_iter()
        .filter(|row| seen.insert(id(row).clone()))
        .collect();
    if rows.len() < before {
        tracing::warn!(
            "{}: dropped {} rows with duplicate ids",
            table,
            before - rows.len()
        );
    }
    rows
}

fn index_by_id<T, F>(rows: &[T], id: F) -> HashMap<String, usize>
where
    F: Fn(&T) -> &String,
{
    rows.iter()
        .enumerate()
        .map(|(i, row)| (id(row).clone(), i))
        .collect()
}

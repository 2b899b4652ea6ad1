use chrono::NaiveDate;
use contracts::dashboards::d410_ecommerce_overview::dto::FilterSpec;
use contracts::domain::ecommerce::{Customer, Order, OrderItem, Product, RfmRecord};
use contracts::enums::customer_segment::CustomerSegment;

use crate::shared::data::{Dataset, DatasetTables};

pub fn customer(id: &str, state: &str) -> Customer {
    Customer {
        id: id.into(),
        name: format!("Customer {id}"),
        city: String::new(),
        state: state.into(),
    }
}

pub fn product(id: &str, name: &str, category: &str, price: f64) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        category: category.into(),
        unit_price: price,
    }
}

pub fn order(id: &str, customer_id: &str, date: (i32, u32, u32), status: &str) -> Order {
    Order {
        id: id.into(),
        customer_id: customer_id.into(),
        order_date: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        status: status.into(),
        total_amount: None,
    }
}

pub fn item(order_id: &str, product_id: &str, quantity: u32, unit_price: f64) -> OrderItem {
    OrderItem {
        order_id: order_id.into(),
        product_id: product_id.into(),
        quantity,
        unit_price,
    }
}

pub fn rfm(customer_id: &str, segment: CustomerSegment) -> RfmRecord {
    RfmRecord {
        customer_id: customer_id.into(),
        recency: 10,
        frequency: 1,
        monetary: 100.0,
        segment,
    }
}

/// Two customers, one book, one delivered and one cancelled order.
pub fn scenario_tables() -> DatasetTables {
    DatasetTables {
        customers: vec![customer("C1", "SP"), customer("C2", "RJ")],
        products: vec![product("P1", "Novel", "Books", 10.0)],
        orders: vec![
            order("O1", "C1", (2024, 1, 15), "Delivered"),
            order("O2", "C2", (2024, 2, 3), "Cancelled"),
        ],
        order_items: vec![item("O1", "P1", 2, 10.0), item("O2", "P1", 1, 10.0)],
        rfm: vec![
            rfm("C1", CustomerSegment::Vip),
            rfm("C2", CustomerSegment::Inativo),
        ],
    }
}

pub fn scenario_dataset() -> Dataset {
    Dataset::new(scenario_tables())
}

/// Three states, two categories, four statuses, orphaned rows and a
/// customer without an RFM record.
pub fn mixed_dataset() -> Dataset {
    Dataset::new(DatasetTables {
        customers: vec![
            customer("C1", "SP"),
            customer("C2", "RJ"),
            customer("C3", "MG"),
            customer("C4", "SP"),
        ],
        products: vec![
            product("P1", "Novel", "Books", 10.0),
            product("P2", "Puzzle", "Toys", 25.0),
            product("P3", "Atlas", "Books", 50.0),
            product("P4", "Kite", "Toys", 5.0),
        ],
        orders: vec![
            order("O1", "C1", (2024, 1, 5), "Delivered"),
            order("O2", "C2", (2024, 1, 20), "Delivered"),
            order("O3", "C1", (2024, 2, 11), "Delivered"),
            order("O4", "C3", (2024, 2, 12), "Pending"),
            order("O5", "C4", (2024, 3, 1), "Delivered"),
            order("O6", "C2", (2024, 3, 9), "Cancelled"),
            order("O7", "C9", (2024, 3, 10), "Delivered"),
            order("O8", "C3", (2023, 12, 30), "Delivered"),
        ],
        order_items: vec![
            item("O1", "P1", 2, 10.0),
            item("O1", "P2", 1, 20.0),
            item("O2", "P3", 1, 50.0),
            item("O3", "P2", 2, 25.0),
            item("O4", "P4", 4, 5.0),
            item("O5", "P1", 1, 12.0),
            item("O5", "P4", 2, 5.0),
            item("O6", "P3", 1, 50.0),
            item("O7", "P1", 3, 10.0),
            item("O8", "P2", 1, 25.0),
            item("O3", "P404", 1, 99.0),
            item("O404", "P1", 1, 10.0),
        ],
        rfm: vec![
            rfm("C1", CustomerSegment::Vip),
            rfm("C2", CustomerSegment::Regular),
            rfm("C3", CustomerSegment::Ocasional),
        ],
    })
}

/// Every option of the dataset ticked, statuses included.
pub fn select_all(dataset: &Dataset) -> FilterSpec {
    super::service::filter_options(dataset).select_all()
}

use contracts::domain::ecommerce::{Customer, Order, OrderItem, Product, RfmRecord};

use super::error::DatasetError;

/// The five source tables of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Customers,
    Products,
    Orders,
    OrderItems,
    RfmSegmentation,
}

impl Resource {
    pub fn all() -> [Resource; 5] {
        [
            Resource::Customers,
            Resource::Products,
            Resource::Orders,
            Resource::OrderItems,
            Resource::RfmSegmentation,
        ]
    }

    pub fn file_name(&self) -> &'static str {
        match self {
            Resource::Customers => "customers.csv",
            Resource::Products => "products.csv",
            Resource::Orders => "orders.csv",
            Resource::OrderItems => "order_items.csv",
            Resource::RfmSegmentation => "rfm_segmentation.csv",
        }
    }

    /// Columns that must be present in the header. Each entry lists the
    /// accepted spellings of one column.
    pub fn required_columns(&self) -> &'static [&'static [&'static str]] {
        match self {
            Resource::Customers => &[&["customer_id", "id"], &["state"]],
            Resource::Products => &[
                &["product_id", "id"],
                &["product_name", "name"],
                &["category"],
                &["price", "unit_price"],
            ],
            Resource::Orders => &[
                &["order_id", "id"],
                &["customer_id"],
                &["order_date"],
                &["status"],
            ],
            Resource::OrderItems => &[
                &["order_id"],
                &["product_id"],
                &["quantity"],
                &["unit_price"],
            ],
            Resource::RfmSegmentation => &[
                &["customer_id"],
                &["recency"],
                &["frequency"],
                &["monetary"],
                &["segment"],
            ],
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Resource::Customers => "customers",
            Resource::Products => "products",
            Resource::Orders => "orders",
            Resource::OrderItems => "order_items",
            Resource::RfmSegmentation => "rfm_segmentation",
        };
        f.write_str(name)
    }
}

/// Raw tables as delivered by a provider, before indexing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatasetTables {
    pub customers: Vec<Customer>,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub order_items: Vec<OrderItem>,
    pub rfm: Vec<RfmRecord>,
}

/// Supplies the five tables. Where they live is the provider's business.
pub trait DatasetProvider {
    /// Identity of the source, used as the memoisation key.
    fn source_id(&self) -> String;

    fn load(&self) -> Result<DatasetTables, DatasetError>;
}

/// Provider over tables that are already in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDatasetProvider {
    source_id: String,
    tables: DatasetTables,
}

impl InMemoryDatasetProvider {
    pub fn new(source_id: impl Into<String>, tables: DatasetTables) -> Self {
        Self {
            source_id: source_id.into(),
            tables,
        }
    }
}

impl DatasetProvider for InMemoryDatasetProvider {
    fn source_id(&self) -> String {
        self.source_id.clone()
    }

    fn load(&self) -> Result<DatasetTables, DatasetError> {
        Ok(self.tables.clone())
    }
}

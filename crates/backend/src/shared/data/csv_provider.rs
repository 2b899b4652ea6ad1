use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};

use super::error::DatasetError;
use super::provider::{DatasetProvider, DatasetTables, Resource};

/// Reads the five tables from CSV files in one directory.
#[derive(Debug, Clone)]
pub struct CsvDatasetProvider {
    dir: PathBuf,
}

impl CsvDatasetProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_of(&self, resource: Resource) -> PathBuf {
        self.dir.join(resource.file_name())
    }

    fn read<T: DeserializeOwned>(&self, resource: Resource) -> Result<Vec<T>, DatasetError> {
        let path = self.path_of(resource);
        let text = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DatasetError::MissingResource {
                resource,
                path: path.clone(),
            },
            _ => DatasetError::InvalidResource {
                resource,
                reason: format!("{}: {}", path.display(), e),
            },
        })?;
        parse_table(resource, &text)
    }
}

impl DatasetProvider for CsvDatasetProvider {
    fn source_id(&self) -> String {
        let dir = self.dir.canonicalize().unwrap_or_else(|_| self.dir.clone());
        format!("csv:{}", dir.display())
    }

    fn load(&self) -> Result<DatasetTables, DatasetError> {
        // Fail before parsing anything when a file is absent
        for resource in Resource::all() {
            let path = self.path_of(resource);
            if !path.is_file() {
                return Err(DatasetError::MissingResource { resource, path });
            }
        }

        tracing::info!("Loading dataset from {}", self.dir.display());
        let tables = DatasetTables {
            customers: self.read(Resource::Customers)?,
            products: self.read(Resource::Products)?,
            orders: self.read(Resource::Orders)?,
            order_items: self.read(Resource::OrderItems)?,
            rfm: self.read(Resource::RfmSegmentation)?,
        };
        tracing::info!(
            "Dataset loaded: {} customers, {} products, {} orders, {} order items, {} rfm records",
            tables.customers.len(),
            tables.products.len(),
            tables.orders.len(),
            tables.order_items.len(),
            tables.rfm.len()
        );
        Ok(tables)
    }
}

/// Parse one CSV table. Malformed records are skipped with a warning; a
/// header without a required column rejects the whole table.
pub fn parse_table<T: DeserializeOwned>(
    resource: Resource,
    csv_text: &str,
) -> Result<Vec<T>, DatasetError> {
    // Strip UTF-8 BOM if present
    let text = csv_text.trim_start_matches('\u{FEFF}');

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| DatasetError::InvalidResource {
            resource,
            reason: format!("failed to read CSV headers: {e}"),
        })?
        .clone();

    for accepted in resource.required_columns() {
        if !accepted.iter().any(|name| headers.iter().any(|h| h == *name)) {
            return Err(DatasetError::InvalidResource {
                resource,
                reason: format!("missing column '{}'", accepted.join("' or '")),
            });
        }
    }

    let mut rows = Vec::new();
    let mut skipped = 0usize;
    for result in reader.deserialize::<T>() {
        match result {
            Ok(row) => rows.push(row),
            Err(e) => {
                tracing::warn!("{}: skipping malformed CSV record: {}", resource, e);
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::warn!("{}: {} rows parsed, {} skipped", resource, rows.len(), skipped);
    } else {
        tracing::debug!("{}: {} rows parsed", resource, rows.len());
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::ecommerce::{Customer, Order, OrderItem, Product, RfmRecord};
    use contracts::enums::customer_segment::CustomerSegment;

    #[test]
    fn test_parse_customers_with_bom() {
        let text = "\u{FEFF}customer_id,customer_name,city,state\n1,Ana,Sao Paulo,SP\n2,Bruno,Rio,RJ\n";
        let rows: Vec<Customer> = parse_table(Resource::Customers, text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[0].name, "Ana");
        assert_eq!(rows[1].state, "RJ");
    }

    #[test]
    fn test_parse_products_accepts_price_column() {
        let text = "product_id,product_name,category,price\n10,Novel,Books,39.9\n";
        let rows: Vec<Product> = parse_table(Resource::Products, text).unwrap();
        assert_eq!(rows[0].unit_price, 39.9);
        assert_eq!(rows[0].category, "Books");
    }

    #[test]
    fn test_parse_orders_with_timestamps() {
        let text = "order_id,customer_id,order_date,status,total_amount\n\
                    100,1,2024-01-15 10:30:00,Delivered,79.8\n\
                    101,2,2024-02-01,Cancelled,\n";
        let rows: Vec<Order> = parse_table(Resource::Orders, text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].order_month(), "2024-01");
        assert_eq!(rows[0].total_amount, Some(79.8));
        assert_eq!(rows[1].total_amount, None);
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let text = "order_id,product_id,quantity,unit_price\n\
                    100,10,2,39.9\n\
                    101,10,two,39.9\n\
                    102,11,1,5\n";
        let rows: Vec<OrderItem> = parse_table(Resource::OrderItems, text).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].order_id, "102");
    }

    #[test]
    fn test_unknown_segment_is_skipped() {
        let text = "customer_id,recency,frequency,monetary,segment\n\
                    1,10,4,500.0,VIP\n\
                    2,90,1,20.0,Gold\n";
        let rows: Vec<RfmRecord> = parse_table(Resource::RfmSegmentation, text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].segment, CustomerSegment::Vip);
    }

    #[test]
    fn test_missing_column_rejects_table() {
        let text = "order_id,customer_id,status\n100,1,Delivered\n";
        let result: Result<Vec<Order>, _> = parse_table(Resource::Orders, text);
        assert!(matches!(
            result,
            Err(DatasetError::InvalidResource {
                resource: Resource::Orders,
                ..
            })
        ));
    }

    #[test]
    fn test_missing_directory_is_missing_resource() {
        let provider = CsvDatasetProvider::new("/nonexistent/ecommerce-dataset");
        match provider.load() {
            Err(DatasetError::MissingResource { resource, path }) => {
                assert_eq!(resource, Resource::Customers);
                assert!(path.ends_with("customers.csv"));
            }
            other => panic!("expected MissingResource, got {other:?}"),
        }
    }
}

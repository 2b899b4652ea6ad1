pub mod cache;
pub mod csv_provider;
pub mod dataset;
pub mod error;
pub mod provider;

pub use cache::DatasetCache;
pub use csv_provider::CsvDatasetProvider;
pub use dataset::Dataset;
pub use error::DatasetError;
pub use provider::{DatasetProvider, DatasetTables, InMemoryDatasetProvider, Resource};

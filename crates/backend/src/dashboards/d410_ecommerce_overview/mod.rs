pub mod aggregation;
pub mod filter;
pub mod metrics;
pub mod service;

#[cfg(test)]
pub(crate) mod test_support;

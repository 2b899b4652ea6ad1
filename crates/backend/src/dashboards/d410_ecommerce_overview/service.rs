use contracts::dashboards::d410_ecommerce_overview::dto::{
    DashboardBundle, FilterOptions, FilterSpec,
};
use contracts::enums::customer_segment::CustomerSegment;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use super::{aggregation, filter, metrics};
use crate::shared::config::DashboardConfig;
use crate::shared::data::{Dataset, DatasetCache, DatasetError, DatasetProvider};
use crate::shared::indicators::metadata::build_catalog;
use crate::shared::indicators::registry::REGISTRY;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardSettings {
    /// Status counted as a completed sale; also the default status filter
    pub delivered_status: String,
    pub top_products_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings::from(&DashboardConfig::default())
    }
}

impl From<&DashboardConfig> for DashboardSettings {
    fn from(config: &DashboardConfig) -> Self {
        Self {
            delivered_status: config.delivered_status.clone(),
            top_products_limit: config.top_products_limit,
        }
    }
}

/// Selector options derived from the dataset.
pub fn filter_options(dataset: &Dataset) -> FilterOptions {
    let months: BTreeSet<String> = dataset.orders().iter().map(|o| o.order_month()).collect();
    let categories: BTreeSet<&str> = dataset.products().iter().map(|p| p.category.as_str()).collect();
    let statuses: BTreeSet<&str> = dataset.orders().iter().map(|o| o.status.as_str()).collect();
    let states: BTreeSet<&str> = dataset.customers().iter().map(|c| c.state.as_str()).collect();

    FilterOptions {
        months: months.into_iter().collect(),
        categories: categories.into_iter().map(String::from).collect(),
        statuses: statuses.into_iter().map(String::from).collect(),
        states: states.into_iter().map(String::from).collect(),
        segments: CustomerSegment::all()
            .into_iter()
            .filter(|s| dataset.segments_present().contains(s))
            .collect(),
    }
}

/// Run the whole pipeline for one filter selection.
pub fn run_pipeline(
    dataset: &Dataset,
    spec: &FilterSpec,
    settings: &DashboardSettings,
) -> DashboardBundle {
    let result = filter::apply(dataset, spec);
    let filtered = &result.filtered;
    let agnostic = &result.category_agnostic;

    let metrics = metrics::compute(dataset, filtered, &settings.delivered_status);
    let catalog = build_catalog();
    let indicator_ids: Vec<_> = catalog
        .sets
        .iter()
        .flat_map(|set| set.indicators.iter().cloned())
        .collect();
    let indicators = REGISTRY.compute(&indicator_ids, &metrics);

    let revenue_by_month = aggregation::revenue_by_month(filtered);
    let month_over_month = aggregation::month_over_month_change(&revenue_by_month);

    DashboardBundle {
        filter: spec.clone(),
        has_data: !filtered.is_empty(),
        metrics,
        indicators,
        month_over_month,
        revenue_by_month,
        top_products: aggregation::top_products(agnostic, settings.top_products_limit),
        revenue_by_category: aggregation::revenue_by_category(filtered),
        revenue_by_state: aggregation::revenue_by_state(filtered),
        status_distribution: aggregation::status_distribution(agnostic),
        unique_customers_by_month: aggregation::unique_customers_by_month(filtered),
        orders_by_month: aggregation::orders_by_month(filtered),
        new_customers_by_month: aggregation::new_customers_by_month(dataset),
        customers_by_state: aggregation::customers_by_state(dataset),
        segment_distribution: aggregation::segment_distribution(dataset),
    }
}

/// One dashboard session over an immutable dataset.
///
/// Results are memoised per `(source id, filter)`; the dataset itself is
/// shared through `DatasetCache` and never reloaded.
pub struct DashboardSession {
    source_id: String,
    dataset: Arc<Dataset>,
    settings: DashboardSettings,
    options: FilterOptions,
    results: HashMap<(String, FilterSpec), Arc<DashboardBundle>>,
}

impl DashboardSession {
    pub fn new(source_id: String, dataset: Arc<Dataset>, settings: DashboardSettings) -> Self {
        let options = filter_options(&dataset);
        Self {
            source_id,
            dataset,
            settings,
            options,
            results: HashMap::new(),
        }
    }

    /// Obtain the dataset through the cache and start a session on it.
    pub fn open(
        cache: &mut DatasetCache,
        provider: &dyn DatasetProvider,
        settings: DashboardSettings,
    ) -> Result<Self, DatasetError> {
        let dataset = cache.get_or_load(provider)?;
        Ok(Self::new(provider.source_id(), dataset, settings))
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn default_filter(&self) -> FilterSpec {
        self.options.default_filter(&self.settings.delivered_status)
    }

    pub fn compute(&mut self, spec: &FilterSpec) -> Arc<DashboardBundle> {
        let key = (self.source_id.clone(), spec.clone());
        if let Some(bundle) = self.results.get(&key) {
            tracing::debug!("Dashboard cache hit for {}", self.source_id);
            return Arc::clone(bundle);
        }

        let bundle = Arc::new(run_pipeline(&self.dataset, spec, &self.settings));
        tracing::info!(
            "Dashboard computed: {} orders, revenue {:.2}",
            bundle.metrics.total_orders,
            bundle.metrics.total_revenue
        );
        self.results.insert(key, Arc::clone(&bundle));
        bundle
    }

    pub fn cached_results(&self) -> usize {
        self.results.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d410_ecommerce_overview::test_support::*;
    use crate::shared::data::InMemoryDatasetProvider;
    use crate::shared::indicators::metadata::ids;
    use maplit::btreeset;
    use std::collections::BTreeSet;

    fn session() -> DashboardSession {
        let provider = InMemoryDatasetProvider::new("scenario", scenario_tables());
        let mut cache = DatasetCache::new();
        DashboardSession::open(&mut cache, &provider, DashboardSettings::default()).unwrap()
    }

    #[test]
    fn test_filter_options() {
        let options = filter_options(&mixed_dataset());
        assert_eq!(options.months, vec!["2023-12", "2024-01", "2024-02", "2024-03"]);
        assert_eq!(options.categories, vec!["Books", "Toys"]);
        assert_eq!(options.statuses, vec!["Cancelled", "Delivered", "Pending"]);
        assert_eq!(options.states, vec!["MG", "RJ", "SP"]);
        assert_eq!(
            options.segments,
            vec![
                CustomerSegment::Vip,
                CustomerSegment::Regular,
                CustomerSegment::Ocasional
            ]
        );
    }

    #[test]
    fn test_default_filter_bundle() {
        let mut session = session();
        let spec = session.default_filter();
        assert_eq!(spec.statuses, btreeset! {"Delivered".to_string()});

        let bundle = session.compute(&spec);

        assert!(bundle.has_data);
        assert_eq!(bundle.metrics.total_revenue, 20.0);
        assert_eq!(bundle.metrics.total_orders, 1);
        assert_eq!(bundle.metrics.unique_customers, 1);
        assert_eq!(bundle.metrics.avg_ticket, 20.0);
        assert_eq!(bundle.indicators.len(), 6);
        assert_eq!(bundle.indicators[0].id, ids::total_revenue());
        assert_eq!(bundle.indicators[0].value, Some(20.0));
        assert_eq!(bundle.segment_distribution.len(), 4);
    }

    #[test]
    fn test_delivered_and_cancelled_bundle() {
        let mut session = session();
        let mut spec = session.default_filter();
        spec.statuses = btreeset! {"Delivered".to_string(), "Cancelled".to_string()};

        let bundle = session.compute(&spec);

        assert_eq!(bundle.metrics.total_revenue, 30.0);
        assert_eq!(bundle.metrics.total_orders, 2);
        assert_eq!(bundle.metrics.conversion_rate, 50.0);
        assert_eq!(bundle.revenue_by_month.len(), 2);
        assert_eq!(bundle.month_over_month.len(), 1);
        assert_eq!(bundle.month_over_month[0].delta, -10.0);
        assert_eq!(bundle.month_over_month[0].percent, -50.0);
    }

    #[test]
    fn test_empty_states_bundle_is_empty() {
        let mut session = session();
        let mut spec = session.default_filter();
        spec.states = BTreeSet::new();

        let bundle = session.compute(&spec);

        assert!(!bundle.has_data);
        assert_eq!(bundle.metrics.total_revenue, 0.0);
        assert_eq!(bundle.metrics.total_orders, 0);
        assert_eq!(bundle.metrics.avg_ticket, 0.0);
        assert_eq!(bundle.metrics.conversion_rate, 0.0);
        assert!(bundle.revenue_by_month.is_empty());
        assert!(bundle.month_over_month.is_empty());
        assert!(bundle.top_products.is_empty());
        assert!(bundle.revenue_by_category.is_empty());
        assert!(bundle.revenue_by_state.is_empty());
        assert!(bundle.status_distribution.is_empty());
        assert!(bundle.orders_by_month.is_empty());
        assert!(bundle.unique_customers_by_month.is_empty());
    }

    #[test]
    fn test_pipeline_is_idempotent() {
        let dataset = mixed_dataset();
        let spec = select_all(&dataset);
        let settings = DashboardSettings::default();

        let first = run_pipeline(&dataset, &spec, &settings);
        let second = run_pipeline(&dataset, &spec, &settings);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_results_are_memoised_per_filter() {
        let mut session = session();
        let spec = session.default_filter();

        let first = session.compute(&spec);
        let second = session.compute(&spec);
        assert!(Arc::ptr_eq(&first, &second));

        let all = session.options().select_all();
        session.compute(&all);
        assert_eq!(session.cached_results(), 2);
    }

    #[test]
    fn test_missing_resource_aborts_open() {
        let provider = crate::shared::data::CsvDatasetProvider::new("/nonexistent/dataset");
        let mut cache = DatasetCache::new();

        let result = DashboardSession::open(&mut cache, &provider, DashboardSettings::default());

        assert!(matches!(result, Err(DatasetError::MissingResource { .. })));
        assert!(cache.is_empty());
    }
}

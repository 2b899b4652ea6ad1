use anyhow::Context;
use backend::dashboards::d410_ecommerce_overview::service::{DashboardSession, DashboardSettings};
use backend::shared::config;
use backend::shared::data::{CsvDatasetProvider, DatasetCache};
use backend::shared::format::{format_number, format_value};
use backend::shared::indicators::metadata::build_catalog;
use backend::system;

/// Usage: `ecommerce-dashboard [DATASET_DIR]`
///
/// Loads the dataset, runs the overview dashboard with its default filter,
/// prints the KPI cards and then the full result bundle as JSON.
fn main() -> anyhow::Result<()> {
    system::tracing::initialize()?;

    let config = config::get_config()?;
    let dataset_dir = match std::env::args().nth(1) {
        Some(dir) => dir.into(),
        None => config::get_dataset_path(config),
    };

    let provider = CsvDatasetProvider::new(dataset_dir);
    let mut cache = DatasetCache::new();
    let mut session = DashboardSession::open(
        &mut cache,
        &provider,
        DashboardSettings::from(&config.dashboard),
    )
    .with_context(|| format!("dataset unavailable in {}", provider.dir().display()))?;

    let filter = session.default_filter();
    let bundle = session.compute(&filter);

    println!(
        "E-commerce overview: {} orders in dataset, {} months",
        format_number(session.dataset().orders().len() as u64),
        session.options().months.len()
    );
    if !bundle.has_data {
        println!("No data for the selected filters.");
    }

    let catalog = build_catalog();
    for value in &bundle.indicators {
        let Some(meta) = catalog.indicators.iter().find(|m| m.id == value.id) else {
            continue;
        };
        let text = value
            .value
            .map(|v| format_value(v, &meta.format))
            .unwrap_or_else(|| "-".to_string());
        println!("  {:<30} {}", meta.label, text);
    }

    println!("{}", serde_json::to_string_pretty(&*bundle)?);
    Ok(())
}

use contracts::shared::indicators::*;

/// Well-known indicator IDs (constants to avoid typos).
pub mod ids {
    use super::*;

    pub fn total_revenue() -> IndicatorId {
        IndicatorId::new("total_revenue")
    }
    pub fn avg_ticket() -> IndicatorId {
        IndicatorId::new("avg_ticket")
    }
    pub fn unique_customers() -> IndicatorId {
        IndicatorId::new("unique_customers")
    }
    pub fn total_orders() -> IndicatorId {
        IndicatorId::new("total_orders")
    }
    pub fn avg_orders_per_customer() -> IndicatorId {
        IndicatorId::new("avg_orders_per_customer")
    }
    pub fn conversion_rate() -> IndicatorId {
        IndicatorId::new("conversion_rate")
    }
}

pub const CURRENCY: &str = "R$";

/// Set rendered as the KPI card grid of the overview dashboard.
pub fn overview_set_id() -> IndicatorSetId {
    IndicatorSetId::new("ecommerce_overview")
}

/// Build the full catalogue of indicators + sets.
pub fn build_catalog() -> IndicatorCatalogResponse {
    let money = || ValueFormat::Money {
        currency: CURRENCY.into(),
    };

    let indicators = vec![
        IndicatorMeta {
            id: ids::total_revenue(),
            label: "Total revenue".into(),
            short_label: Some("Revenue".into()),
            format: money(),
            description: Some("Sum of quantity x unit price over the filtered order lines".into()),
        },
        IndicatorMeta {
            id: ids::avg_ticket(),
            label: "Average ticket".into(),
            short_label: Some("Avg. ticket".into()),
            format: money(),
            description: Some("Total revenue / Total orders".into()),
        },
        IndicatorMeta {
            id: ids::unique_customers(),
            label: "Unique customers".into(),
            short_label: None,
            format: ValueFormat::Integer,
            description: Some("Distinct customers among the filtered orders".into()),
        },
        IndicatorMeta {
            id: ids::total_orders(),
            label: "Total orders".into(),
            short_label: Some("Orders".into()),
            format: ValueFormat::Integer,
            description: None,
        },
        IndicatorMeta {
            id: ids::avg_orders_per_customer(),
            label: "Orders per customer".into(),
            short_label: None,
            format: ValueFormat::Number { decimals: 2 },
            description: Some("Total orders / Unique customers".into()),
        },
        IndicatorMeta {
            id: ids::conversion_rate(),
            label: "Conversion rate (delivered)".into(),
            short_label: Some("Conversion".into()),
            format: ValueFormat::Percent { decimals: 2 },
            description: Some(
                "Delivered filtered orders as a share of every order in the dataset".into(),
            ),
        },
    ];

    let sets = vec![IndicatorSetMeta {
        id: overview_set_id(),
        label: "Key performance indicators".into(),
        indicators: indicators.iter().map(|meta| meta.id.clone()).collect(),
        columns: 3,
    }];

    IndicatorCatalogResponse { indicators, sets }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique() {
        let catalog = build_catalog();
        let ids: HashSet<_> = catalog.indicators.iter().map(|m| m.id.clone()).collect();
        assert_eq!(ids.len(), 6);
        assert_eq!(catalog.sets[0].indicators.len(), 6);
        assert_eq!(catalog.sets[0].id, overview_set_id());
    }
}

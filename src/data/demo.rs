//! Fixed demo dataset.
//!
//! Served whenever no live feed is configured or the feed cannot be
//! reached. Three Swiss dealer groups with three promotions each.

use async_trait::async_trait;

use super::DataProvider;
use crate::types::{CompetitorDataset, CompetitorRecord, Offer};

/// Build the demo dataset.
pub fn demo_dataset() -> CompetitorDataset {
    [
        CompetitorRecord::new("Emil Frey")
            .with_offers(vec![
                Offer::new("VW Golf - Winteraktion", 29900.0, 15.0),
                Offer::new("Audi A3 - Leasing", 299.0, 0.0),
                Offer::new("Service-Paket", 199.0, 20.0),
            ])
            .with_summary(12, 15.5)
            .with_keywords(["winteraktion", "leasing", "service", "vw", "audi"]),
        CompetitorRecord::new("Garage Weiss")
            .with_offers(vec![
                Offer::new("Mercedes A-Klasse", 35500.0, 10.0),
                Offer::new("BMW 3er Business", 45900.0, 8.0),
                Offer::new("Winterreifen-Aktion", 599.0, 25.0),
            ])
            .with_summary(8, 12.3)
            .with_keywords(["mercedes", "bmw", "business", "winterreifen"]),
        CompetitorRecord::new("Auto Kunz")
            .with_offers(vec![
                Offer::new("Toyota Hybrid", 31900.0, 12.0),
                Offer::new("Mazda CX-5", 39900.0, 10.0),
                Offer::new("Gratis-Service", 0.0, 100.0),
            ])
            .with_summary(10, 14.8)
            .with_keywords(["hybrid", "toyota", "mazda", "gratis"]),
    ]
    .into_iter()
    .collect()
}

/// Provider that always returns the demo dataset.
#[derive(Debug, Default, Clone)]
pub struct DemoProvider;

impl DemoProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DataProvider for DemoProvider {
    async fn fetch(&self) -> CompetitorDataset {
        demo_dataset()
    }

    fn name(&self) -> &str {
        "demo"
    }
}

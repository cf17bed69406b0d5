//! Scripted data provider for integration testing.
//!
//! Returns a queue of known datasets, one per fetch, and records how many
//! fetches happened. All in-memory with no external dependencies.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use competitor_intel::data::DataProvider;
use competitor_intel::types::{CompetitorDataset, CompetitorRecord, Offer};

/// A provider that replays scripted datasets.
///
/// Once the script runs out, the last dataset is repeated.
#[derive(Clone)]
pub struct ScriptedProvider {
    script: Arc<Mutex<VecDeque<CompetitorDataset>>>,
    last: Arc<Mutex<CompetitorDataset>>,
    fetches: Arc<Mutex<u32>>,
}

impl ScriptedProvider {
    pub fn new(datasets: Vec<CompetitorDataset>) -> Self {
        Self {
            script: Arc::new(Mutex::new(datasets.into())),
            last: Arc::new(Mutex::new(CompetitorDataset::new())),
            fetches: Arc::new(Mutex::new(0)),
        }
    }

    pub fn fetch_count(&self) -> u32 {
        *self.fetches.lock().unwrap()
    }
}

#[async_trait]
impl DataProvider for ScriptedProvider {
    async fn fetch(&self) -> CompetitorDataset {
        *self.fetches.lock().unwrap() += 1;
        let mut last = self.last.lock().unwrap();
        if let Some(next) = self.script.lock().unwrap().pop_front() {
            *last = next;
        }
        last.clone()
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Spec-style dataset: three competitors with known summary figures.
pub fn scenario_dataset() -> CompetitorDataset {
    [
        CompetitorRecord::new("CompA")
            .with_offers(vec![
                Offer::new("Leasing special", 299.0, 5.0),
                Offer::new("Winter package", 899.0, 22.0),
            ])
            .with_summary(12, 15.5)
            .with_keywords(["leasing", "winter", "service"]),
        CompetitorRecord::new("CompB")
            .with_offers(vec![Offer::new("Business fleet", 45900.0, 8.0)])
            .with_summary(8, 12.3)
            .with_keywords(["business", "leasing"]),
        CompetitorRecord::new("CompC")
            .with_offers(vec![Offer::new("Free inspection", 0.0, 100.0)])
            .with_summary(10, 14.8)
            .with_keywords(["gratis", "service", "leasing"]),
    ]
    .into_iter()
    .collect()
}

/// A quiet market: nothing discounted enough to alert on.
pub fn quiet_dataset() -> CompetitorDataset {
    [CompetitorRecord::new("Calm Garage")
        .with_offers(vec![Offer::new("Oil change", 89.0, 10.0)])
        .with_summary(1, 10.0)
        .with_keywords(["service"])]
    .into_iter()
    .collect()
}

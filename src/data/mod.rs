//! Competitor data providers.
//!
//! Defines the `DataProvider` trait and its implementations: the fixed
//! demo dataset and the optional live JSON feed that falls back to it.

pub mod demo;
pub mod feed;

use async_trait::async_trait;

use crate::types::CompetitorDataset;

pub use demo::{demo_dataset, DemoProvider};
pub use feed::FeedProvider;

/// Abstraction over competitor data sources.
///
/// `fetch` never fails: implementations that talk to a live source absorb
/// their own errors and return the demo dataset instead.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataProvider: Send + Sync {
    /// Fetch the current competitor dataset.
    async fn fetch(&self) -> CompetitorDataset;

    /// Provider name for logging and identification.
    fn name(&self) -> &str;
}

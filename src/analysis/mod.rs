//! Aggregation over a competitor dataset.
//!
//! Every function here is pure: it reads a dataset (or rows derived from
//! one) and returns fresh values. Views call them on every render.

pub mod keywords;

use serde::Serialize;

use crate::types::CompetitorDataset;

pub use keywords::{keyword_frequency, KeywordCount};

/// Keywords shown per competitor in the overview table.
pub const OVERVIEW_KEYWORDS: usize = 3;

/// Default number of top deals highlighted on the prices view.
pub const DEFAULT_TOP_DEALS: usize = 3;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// One line of the overview table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewRow {
    pub name: String,
    pub total_offers: u64,
    pub avg_discount: f64,
    pub top_keywords: Vec<String>,
}

/// Headline figures across all competitors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct SummaryMetrics {
    pub total_offers: u64,
    /// Unweighted mean of the per-competitor averages.
    pub avg_discount: f64,
    pub competitor_count: usize,
    /// Raw keyword count, duplicates included.
    pub total_keywords: usize,
}

/// One (competitor, offer) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OfferRow {
    pub competitor: String,
    pub title: String,
    pub price: f64,
    pub discount: f64,
}

// ---------------------------------------------------------------------------
// Aggregations
// ---------------------------------------------------------------------------

pub fn overview_rows(dataset: &CompetitorDataset) -> Vec<OverviewRow> {
    dataset
        .iter()
        .map(|record| OverviewRow {
            name: record.name.clone(),
            total_offers: record.total_offers,
            avg_discount: record.avg_discount,
            top_keywords: record.keywords.iter().take(OVERVIEW_KEYWORDS).cloned().collect(),
        })
        .collect()
}

/// Totals and averages for the metric cards. An empty dataset yields zeros.
pub fn summary_metrics(dataset: &CompetitorDataset) -> SummaryMetrics {
    let competitor_count = dataset.len();
    if competitor_count == 0 {
        return SummaryMetrics::default();
    }

    // Summed in sorted order so the mean does not depend on insertion order.
    let mut discounts: Vec<f64> = dataset.iter().map(|r| r.avg_discount).collect();
    discounts.sort_by(f64::total_cmp);
    let discount_sum: f64 = discounts.iter().sum();

    SummaryMetrics {
        total_offers: dataset.iter().map(|r| r.total_offers).sum(),
        avg_discount: discount_sum / competitor_count as f64,
        competitor_count,
        total_keywords: dataset.iter().map(|r| r.keywords.len()).sum(),
    }
}

/// One row per offer, in dataset order then offer order.
pub fn flatten_offers(dataset: &CompetitorDataset) -> Vec<OfferRow> {
    dataset
        .iter()
        .flat_map(|record| {
            record.offers.iter().map(move |offer| OfferRow {
                competitor: record.name.clone(),
                title: offer.title.clone(),
                price: offer.price,
                discount: offer.discount,
            })
        })
        .collect()
}

/// The `n` rows with the largest discount. Ties keep their input order.
pub fn top_deals(rows: &[OfferRow], n: usize) -> Vec<OfferRow> {
    let mut ranked = rows.to_vec();
    // sort_by is stable
    ranked.sort_by(|a, b| b.discount.total_cmp(&a.discount));
    ranked.truncate(n);
    ranked
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

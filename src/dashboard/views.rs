//! Render pass for the four dashboard views.
//!
//! Each builder takes a snapshot and returns a serializable view. No
//! caching: views are recomputed on every request.

use serde::Serialize;

use crate::alerts::{generate_alerts, recommendations, Recommendations};
use crate::analysis::{
    flatten_offers, keyword_frequency, overview_rows, summary_metrics, top_deals, KeywordCount,
    OfferRow, OverviewRow, SummaryMetrics,
};
use crate::session::{PresentationSession, SessionPhase};
use crate::types::{Alert, Snapshot};

#[derive(Debug, Clone, Serialize)]
pub struct StatusView {
    pub session_id: String,
    pub phase: SessionPhase,
    pub last_update: Option<String>,
    pub competitors: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct OverviewView {
    pub last_update: String,
    pub metrics: SummaryMetrics,
    pub competitors: Vec<OverviewRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PricesView {
    pub offers: Vec<OfferRow>,
    pub top_deals: Vec<OfferRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AlertsView {
    pub threshold: f64,
    pub alerts: Vec<Alert>,
    pub recommendations: Recommendations,
}

#[derive(Debug, Clone, Serialize)]
pub struct KeywordsView {
    pub keywords: Vec<KeywordCount>,
}

pub fn status_view(session: &PresentationSession) -> StatusView {
    StatusView {
        session_id: session.id().to_string(),
        phase: session.phase(),
        last_update: session.last_update_label(),
        competitors: session.snapshot().map_or(0, |s| s.dataset.len()),
    }
}

pub fn overview_view(snapshot: &Snapshot) -> OverviewView {
    OverviewView {
        last_update: snapshot.last_update_label(),
        metrics: summary_metrics(&snapshot.dataset),
        competitors: overview_rows(&snapshot.dataset),
    }
}

pub fn prices_view(snapshot: &Snapshot, top_n: usize) -> PricesView {
    let offers = flatten_offers(&snapshot.dataset);
    let top_deals = top_deals(&offers, top_n);
    PricesView { offers, top_deals }
}

pub fn alerts_view(snapshot: &Snapshot, threshold: f64) -> AlertsView {
    AlertsView {
        threshold,
        alerts: generate_alerts(&snapshot.dataset, threshold),
        recommendations: recommendations(threshold),
    }
}

pub fn keywords_view(snapshot: &Snapshot) -> KeywordsView {
    KeywordsView {
        keywords: keyword_frequency(&snapshot.dataset),
    }
}

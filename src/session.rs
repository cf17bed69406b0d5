//! Presentation session.
//!
//! Owns the current snapshot of competitor data and the provider it came
//! from. The snapshot starts empty, is populated on first render or an
//! explicit refresh, and is replaced wholesale on every refresh.

use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::data::DataProvider;
use crate::types::{DashboardError, Snapshot};

/// Session lifecycle: `Empty → Loaded`, `Loaded → Loaded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SessionPhase {
    Empty,
    Loaded,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionPhase::Empty => write!(f, "EMPTY"),
            SessionPhase::Loaded => write!(f, "LOADED"),
        }
    }
}

/// A downloadable export of the current dataset.
#[derive(Debug, Clone)]
pub struct Export {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Snapshot state of one session.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    snapshot: Option<Arc<Snapshot>>,
}

pub struct PresentationSession {
    id: Uuid,
    provider: Arc<dyn DataProvider>,
    state: SessionState,
}

impl PresentationSession {
    pub fn new(provider: Arc<dyn DataProvider>) -> Self {
        Self {
            id: Uuid::new_v4(),
            provider,
            state: SessionState::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn phase(&self) -> SessionPhase {
        match self.state.snapshot {
            Some(_) => SessionPhase::Loaded,
            None => SessionPhase::Empty,
        }
    }

    /// The current snapshot. Readers keep the `Arc` they got even if a
    /// refresh swaps in a new one meanwhile.
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        self.state.snapshot.clone()
    }

    pub fn last_update_label(&self) -> Option<String> {
        self.state.snapshot.as_ref().map(|s| s.last_update_label())
    }

    /// Load data if the session is still empty. No-op once loaded.
    pub async fn initialize(&mut self) -> Arc<Snapshot> {
        match &self.state.snapshot {
            Some(snapshot) => snapshot.clone(),
            None => self.refresh().await,
        }
    }

    /// Fetch fresh data and replace the snapshot.
    pub async fn refresh(&mut self) -> Arc<Snapshot> {
        let previous = self.phase();
        let dataset = self.provider.fetch().await;
        let snapshot = Arc::new(Snapshot::new(dataset));
        self.state.snapshot = Some(snapshot.clone());

        info!(
            session = %self.id,
            provider = self.provider.name(),
            from = %previous,
            competitors = snapshot.dataset.len(),
            last_update = %snapshot.last_update_label(),
            "Snapshot loaded"
        );
        snapshot
    }

    /// Serialize the current dataset as pretty-printed JSON.
    pub fn export_snapshot(&self) -> Result<Export, DashboardError> {
        let Some(snapshot) = &self.state.snapshot else {
            warn!(session = %self.id, "Export requested with no data loaded");
            return Err(DashboardError::ExportUnavailable);
        };

        let json = snapshot.dataset.to_json_pretty()?;
        let filename = export_filename(Local::now());
        info!(session = %self.id, filename = %filename, bytes = json.len(), "Snapshot exported");

        Ok(Export {
            filename,
            bytes: json.into_bytes(),
        })
    }
}

/// `competitor_data_<YYYYMMDD>.json`, dated in local time.
pub fn export_filename(at: DateTime<Local>) -> String {
    format!("competitor_data_{}.json", at.format("%Y%m%d"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

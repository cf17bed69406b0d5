//! Shared types for the competitor dashboard.
//!
//! These types form the data model used across all modules: the
//! provider produces a `CompetitorDataset`, the analysis and alert
//! modules read it, and the session owns the current snapshot of it.

use chrono::{DateTime, Local};
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Offer
// ---------------------------------------------------------------------------

/// A single promotional item published by a competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub title: String,
    /// Price in CHF
    pub price: f64,
    /// Discount in percent (0–100)
    pub discount: f64,
}

impl Offer {
    pub fn new(title: impl Into<String>, price: f64, discount: f64) -> Self {
        Self {
            title: title.into(),
            price,
            discount,
        }
    }
}

impl fmt::Display for Offer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (CHF {:.0}, -{}%)", self.title, self.price, self.discount)
    }
}

// ---------------------------------------------------------------------------
// Competitor record
// ---------------------------------------------------------------------------

/// Everything known about one competitor.
///
/// `total_offers` and `avg_discount` are summary figures reported by the
/// provider. They are not derived from `offers` and may disagree with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitorRecord {
    #[serde(skip)]
    pub name: String,
    #[serde(default, alias = "aktionen")]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub total_offers: u64,
    #[serde(default)]
    pub avg_discount: f64,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl CompetitorRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            offers: Vec::new(),
            total_offers: 0,
            avg_discount: 0.0,
            keywords: Vec::new(),
        }
    }

    pub fn with_offers(mut self, offers: Vec<Offer>) -> Self {
        self.offers = offers;
        self
    }

    pub fn with_summary(mut self, total_offers: u64, avg_discount: f64) -> Self {
        self.total_offers = total_offers;
        self.avg_discount = avg_discount;
        self
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }
}

// ---------------------------------------------------------------------------
// Dataset
// ---------------------------------------------------------------------------

/// Competitor name → record, iterated in insertion order.
///
/// Serialized as a JSON object whose key order is the insertion order, so
/// an export can be parsed back into an identical dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompetitorDataset {
    records: Vec<CompetitorRecord>,
}

impl CompetitorDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record. An existing record with the same name is replaced
    /// in place and keeps its position.
    pub fn insert(&mut self, record: CompetitorRecord) {
        match self.records.iter_mut().find(|r| r.name == record.name) {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
    }

    pub fn get(&self, name: &str) -> Option<&CompetitorRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CompetitorRecord> {
        self.records.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|r| r.name.as_str())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Pretty-printed JSON, the format used for exports.
    pub fn to_json_pretty(&self) -> Result<String, DashboardError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a dataset from JSON bytes (exports and live feeds share the schema).
    pub fn from_json(bytes: &[u8]) -> Result<Self, DashboardError> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

impl FromIterator<CompetitorRecord> for CompetitorDataset {
    fn from_iter<T: IntoIterator<Item = CompetitorRecord>>(iter: T) -> Self {
        let mut dataset = Self::new();
        for record in iter {
            dataset.insert(record);
        }
        dataset
    }
}

impl<'a> IntoIterator for &'a CompetitorDataset {
    type Item = &'a CompetitorRecord;
    type IntoIter = std::slice::Iter<'a, CompetitorRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl Serialize for CompetitorDataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CompetitorDataset {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DatasetVisitor;

        impl<'de> Visitor<'de> for DatasetVisitor {
            type Value = CompetitorDataset;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of competitor name to competitor record")
            }

            // Entries arrive in document order, which becomes insertion order.
            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut dataset = CompetitorDataset::new();
                while let Some((name, mut record)) =
                    access.next_entry::<String, CompetitorRecord>()?
                {
                    record.name = name;
                    dataset.insert(record);
                }
                Ok(dataset)
            }
        }

        deserializer.deserialize_map(DatasetVisitor)
    }
}

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Warning,
    Ok,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "WARNING"),
            Severity::Ok => write!(f, "OK"),
        }
    }
}

/// A derived warning or all-clear message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub message: String,
    pub severity: Severity,
}

impl Alert {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Ok,
        }
    }

    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Alert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.severity, self.message)
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// The full dataset held by a session at one point in time.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub dataset: CompetitorDataset,
    /// Local wall-clock time of the fetch.
    pub last_update: DateTime<Local>,
}

impl Snapshot {
    pub fn new(dataset: CompetitorDataset) -> Self {
        Self::at(dataset, Local::now())
    }

    pub fn at(dataset: CompetitorDataset, last_update: DateTime<Local>) -> Self {
        Self { dataset, last_update }
    }

    /// Wall-clock label shown next to the refresh button.
    pub fn last_update_label(&self) -> String {
        self.last_update.format("%H:%M:%S").to_string()
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the dashboard.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("Data provider unavailable ({data_source}): {message}")]
    ProviderUnavailable { data_source: String, message: String },

    #[error("Export unavailable: no competitor data loaded, nothing to export")]
    ExportUnavailable,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Discount alerts.
//!
//! Flags every offer at or above the configured discount threshold and
//! carries the static action lists shown next to the alerts.

use serde::Serialize;
use tracing::debug;

use crate::types::{Alert, CompetitorDataset};

/// Default discount threshold in percent.
pub const DEFAULT_THRESHOLD_PCT: f64 = 20.0;

/// Message of the single OK alert emitted when nothing crosses the threshold.
pub const ALL_CLEAR_MESSAGE: &str = "No critical competitor activity";

/// Evaluate every offer against `threshold_pct`.
///
/// Warnings come in dataset order, then offer order. Never returns an
/// empty list: with no warnings the result is one OK alert.
pub fn generate_alerts(dataset: &CompetitorDataset, threshold_pct: f64) -> Vec<Alert> {
    let mut alerts: Vec<Alert> = dataset
        .iter()
        .flat_map(|record| {
            record
                .offers
                .iter()
                .filter(move |offer| offer.discount >= threshold_pct)
                .map(move |offer| {
                    Alert::warning(format!(
                        "{}: {}% discount on {}",
                        record.name, offer.discount, offer.title
                    ))
                })
        })
        .collect();

    debug!(threshold_pct, warnings = alerts.len(), "Alerts evaluated");

    if alerts.is_empty() {
        alerts.push(Alert::ok(ALL_CLEAR_MESSAGE));
    }
    alerts
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendations {
    pub immediate: Vec<String>,
    pub medium_term: Vec<String>,
}

/// Suggested responses to competitor activity.
pub fn recommendations(threshold_pct: f64) -> Recommendations {
    Recommendations {
        immediate: vec![
            format!("Review pricing where competitors discount more than {threshold_pct}%"),
            "Close content gaps".to_string(),
            "Match leasing offers".to_string(),
        ],
        medium_term: vec![
            "Weekly monitoring".to_string(),
            "Supplier negotiations".to_string(),
            "Digital campaigns".to_string(),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo_dataset;
    use crate::types::{CompetitorRecord, Offer, Severity};

    fn dataset(offers: Vec<(&str, Vec<Offer>)>) -> CompetitorDataset {
        offers
            .into_iter()
            .map(|(name, offers)| CompetitorRecord::new(name).with_offers(offers))
            .collect()
    }

    #[test]
    fn test_full_discount_warning() {
        let ds = dataset(vec![("CompName", vec![Offer::new("Free service", 0.0, 100.0)])]);
        let alerts = generate_alerts(&ds, DEFAULT_THRESHOLD_PCT);
        assert_eq!(alerts, vec![Alert::warning("CompName: 100% discount on Free service")]);
    }

    #[test]
    fn test_no_offer_over_threshold_gives_single_ok() {
        let ds = dataset(vec![
            ("A", vec![Offer::new("Small", 100.0, 5.0), Offer::new("Almost", 100.0, 19.9)]),
            ("B", vec![Offer::new("None", 100.0, 0.0)]),
        ]);
        let alerts = generate_alerts(&ds, 20.0);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].severity, Severity::Ok);
        assert_eq!(alerts[0].message, ALL_CLEAR_MESSAGE);
    }

    #[test]
    fn test_empty_dataset_gives_single_ok() {
        let alerts = generate_alerts(&CompetitorDataset::new(), 20.0);
        assert_eq!(alerts, vec![Alert::ok(ALL_CLEAR_MESSAGE)]);
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let ds = dataset(vec![("A", vec![Offer::new("Edge", 100.0, 20.0)])]);
        let alerts = generate_alerts(&ds, 20.0);
        assert!(alerts[0].is_warning());
        assert_eq!(alerts[0].message, "A: 20% discount on Edge");
    }

    #[test]
    fn test_fractional_discount_formatting() {
        let ds = dataset(vec![("A", vec![Offer::new("Odd", 100.0, 22.5)])]);
        assert_eq!(generate_alerts(&ds, 20.0)[0].message, "A: 22.5% discount on Odd");
    }

    #[test]
    fn test_demo_alerts_in_dataset_order() {
        let alerts = generate_alerts(&demo_dataset(), DEFAULT_THRESHOLD_PCT);
        let messages: Vec<&str> = alerts.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Emil Frey: 20% discount on Service-Paket",
                "Garage Weiss: 25% discount on Winterreifen-Aktion",
                "Auto Kunz: 100% discount on Gratis-Service",
            ]
        );
        assert!(alerts.iter().all(Alert::is_warning));
    }

    #[test]
    fn test_threshold_varies_result() {
        let demo = demo_dataset();
        assert_eq!(generate_alerts(&demo, 10.0).len(), 7);
        assert_eq!(generate_alerts(&demo, 50.0).len(), 1);
        assert!(generate_alerts(&demo, 50.0)[0].is_warning());
        assert!(!generate_alerts(&demo, 101.0)[0].is_warning());
    }

    #[test]
    fn test_never_empty() {
        for threshold in [0.0, 20.0, 100.0, 1000.0] {
            assert!(!generate_alerts(&demo_dataset(), threshold).is_empty());
        }
    }

    #[test]
    fn test_recommendations_mention_threshold() {
        let recs = recommendations(20.0);
        assert_eq!(recs.immediate.len(), 3);
        assert_eq!(recs.medium_term.len(), 3);
        assert!(recs.immediate[0].contains("20%"));
    }
}

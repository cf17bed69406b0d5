//! Keyword frequency across competitors.

use serde::Serialize;
use std::collections::{BTreeSet, HashMap};

use crate::types::CompetitorDataset;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeywordCount {
    pub keyword: String,
    /// Number of competitors listing the keyword.
    pub count: usize,
}

/// Count how many competitors list each keyword.
///
/// A competitor counts once per keyword even if it repeats it. Sorted by
/// count descending, then keyword ascending.
pub fn keyword_frequency(dataset: &CompetitorDataset) -> Vec<KeywordCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for record in dataset {
        let distinct: BTreeSet<&str> = record.keywords.iter().map(String::as_str).collect();
        for keyword in distinct {
            *counts.entry(keyword).or_insert(0) += 1;
        }
    }

    let mut table: Vec<KeywordCount> = counts
        .into_iter()
        .map(|(keyword, count)| KeywordCount {
            keyword: keyword.to_string(),
            count,
        })
        .collect();
    table.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
    table
}

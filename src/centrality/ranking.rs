// src/centrality/ranking.rs
//! Ordered ranking with power-of-ten bucket ceilings.

use serde::Serialize;

use super::MetricMap;
use crate::graph::NodeKey;

const FIRST_BUCKET: usize = 10;

/// One ranked entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedEntry {
    #[serde(serialize_with = "serialize_key")]
    pub key: NodeKey,
    pub score: f64,
    /// 1-based position.
    pub index: usize,
    /// Smallest power of ten (from 10) not below `index`: top-10, top-100, ...
    pub bucket: usize,
}

/// Sorts by score descending and annotates index and bucket ceiling.
///
/// The sort is stable: equal scores keep the metric map's enumeration order,
/// so rankings of consecutive months stay comparable.
#[must_use]
pub fn rank_and_bucket(metric: &MetricMap) -> Vec<RankedEntry> {
    let mut sorted: Vec<_> = metric.iter().collect();
    sorted.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut bucket = FIRST_BUCKET;
    sorted
        .into_iter()
        .enumerate()
        .map(|(i, (key, score))| {
            let index = i + 1;
            if index > bucket {
                bucket *= 10;
            }
            RankedEntry {
                key: key.clone(),
                score,
                index,
                bucket,
            }
        })
        .collect()
}

fn serialize_key<S: serde::Serializer>(key: &NodeKey, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(key)
}

use serde::Serialize;

use crate::record::Record;

/// Aggregate statistics over a record collection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    /// Number of records.
    pub count: usize,
    /// Total inventory value: Σ price × quantity.
    pub sum: f64,
    /// `sum / count` rounded to 2 decimal places, 0 for an empty set.
    pub avg: f64,
}

/// Compute count, total value and average over the given records.
pub fn summarize(records: &[Record]) -> Summary {
    let count = records.len();
    let sum: f64 = records.iter().map(|r| r.price * r.quantity as f64).sum();
    let avg = if count == 0 {
        0.0
    } else {
        round2(sum / count as f64)
    };

    Summary { count, sum, avg }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

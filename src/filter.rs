use serde::Deserialize;

use crate::error::FilterError;
use crate::record::Record;

/// Minimum-price filter value as it arrives over the wire.
///
/// The client may send either a JSON number or the raw text of a form
/// field, so both are accepted. A blank string means "no filter"; any
/// other non-numeric text is an explicit error rather than a silent pass.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MinPrice {
    Number(f64),
    Text(String),
}

impl MinPrice {
    /// Resolve to an effective threshold, or `None` when blank.
    pub fn threshold(&self) -> Result<Option<f64>, FilterError> {
        match self {
            MinPrice::Number(value) => Ok(Some(*value)),
            MinPrice::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Ok(None);
                }
                trimmed
                    .parse::<f64>()
                    .map(Some)
                    .map_err(|_| FilterError::InvalidValue(text.clone()))
            }
        }
    }
}

/// Apply the optional category and minimum-price predicates.
///
/// * `category` keeps records whose category contains the given text as a
///   case-insensitive substring; blank input is a no-op.
/// * `min_price` keeps records with `price >= threshold`.
///
/// Predicates are independent but applied category-then-price for
/// reproducibility. Relative order of the input is preserved.
pub fn apply(
    records: &[Record],
    category: Option<&str>,
    min_price: Option<&MinPrice>,
) -> Result<Vec<Record>, FilterError> {
    let mut result: Vec<Record> = records.to_vec();

    if let Some(category) = category {
        let needle = category.trim().to_lowercase();
        if !needle.is_empty() {
            result.retain(|r| r.category.to_lowercase().contains(&needle));
        }
    }

    if let Some(min_price) = min_price {
        if let Some(threshold) = min_price.threshold()? {
            result.retain(|r| r.price >= threshold);
        }
    }

    Ok(result)
}

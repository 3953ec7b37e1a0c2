use serde::{Deserialize, Serialize};

/// One inventory row.
///
/// The canonical JSON keys are the Russian column names the source files
/// use; the English spellings are accepted as aliases on input, so a file
/// exported by this program (or any ASCII test fixture) loads back
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "код", alias = "code")]
    pub code: i64,
    #[serde(rename = "наименование", alias = "name")]
    pub name: String,
    #[serde(rename = "категория", alias = "category")]
    pub category: String,
    #[serde(rename = "количество", alias = "quantity")]
    pub quantity: i64,
    #[serde(rename = "цена", alias = "price")]
    pub price: f64,
}

/// (canonical, alias) spellings for each required column.
pub const FIELD_CODE: (&str, &str) = ("код", "code");
pub const FIELD_NAME: (&str, &str) = ("наименование", "name");
pub const FIELD_CATEGORY: (&str, &str) = ("категория", "category");
pub const FIELD_QUANTITY: (&str, &str) = ("количество", "quantity");
pub const FIELD_PRICE: (&str, &str) = ("цена", "price");

/// All required columns in schema order. Presence is checked against the
/// first record of every upload.
pub const REQUIRED_FIELDS: [(&str, &str); 5] = [
    FIELD_CODE,
    FIELD_NAME,
    FIELD_CATEGORY,
    FIELD_QUANTITY,
    FIELD_PRICE,
];

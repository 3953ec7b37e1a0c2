use std::str::FromStr;

use crate::error::SortError;
use crate::record::Record;

/// The closed set of sortable fields.
///
/// Sorting goes through this enum instead of a by-name lookup into the
/// row, so a bad field name is caught before any comparison runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Code,
    Name,
    Category,
    Quantity,
    Price,
}

impl FromStr for SortField {
    type Err = SortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "код" | "code" => Ok(SortField::Code),
            "наименование" | "name" => Ok(SortField::Name),
            "категория" | "category" => Ok(SortField::Category),
            "количество" | "quantity" => Ok(SortField::Quantity),
            "цена" | "price" => Ok(SortField::Price),
            _ => Err(SortError::UnknownField(s.trim().to_string())),
        }
    }
}

/// Sort records ascending by the given field.
///
/// Numeric fields use numeric order (`total_cmp` for price), text fields
/// lexicographic order. `Vec::sort_by` is stable, so records with equal
/// keys keep their relative input order.
pub fn sort_records(mut records: Vec<Record>, field: SortField) -> Vec<Record> {
    match field {
        SortField::Code => records.sort_by(|a, b| a.code.cmp(&b.code)),
        SortField::Name => records.sort_by(|a, b| a.name.cmp(&b.name)),
        SortField::Category => records.sort_by(|a, b| a.category.cmp(&b.category)),
        SortField::Quantity => records.sort_by(|a, b| a.quantity.cmp(&b.quantity)),
        SortField::Price => records.sort_by(|a, b| a.price.total_cmp(&b.price)),
    }
    records
}

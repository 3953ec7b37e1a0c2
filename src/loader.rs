use std::path::Path;

use serde_json::{Map, Value};

use crate::error::LoadError;
use crate::record::{
    Record, FIELD_CATEGORY, FIELD_CODE, FIELD_NAME, FIELD_PRICE, FIELD_QUANTITY, REQUIRED_FIELDS,
};

/// Parse an uploaded file into typed records.
///
/// The format is chosen by file extension: `.csv` and `.txt` are read as
/// header-driven delimited text (first row = field names), `.json` as an
/// array of flat objects. Anything else is rejected.
///
/// Loading is all-or-nothing: every row must carry the five required
/// fields and coerce cleanly (`code`/`quantity` to integers, `price` to a
/// float) or the whole parse fails and nothing is accepted.
///
/// # Arguments
/// * `bytes` - Raw contents of the uploaded file
/// * `file_name` - Original file name, used only for format dispatch
///
/// # Returns
/// * `Result<Vec<Record>, LoadError>` - The parsed records or an error
pub fn parse_records(bytes: &[u8], file_name: &str) -> Result<Vec<Record>, LoadError> {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let raw = match extension.as_str() {
        "csv" | "txt" => parse_delimited(bytes)?,
        "json" => parse_json(bytes)?,
        "" => return Err(LoadError::UnsupportedFormat(file_name.to_string())),
        other => return Err(LoadError::UnsupportedFormat(other.to_string())),
    };

    if raw.is_empty() {
        return Err(LoadError::EmptyInput);
    }

    // Presence check against the first record only; later rows that drop a
    // key still fail below, during coercion.
    for keys in REQUIRED_FIELDS {
        if !raw[0].contains_key(keys.0) && !raw[0].contains_key(keys.1) {
            return Err(LoadError::MissingField(keys.0.to_string()));
        }
    }

    raw.iter()
        .enumerate()
        .map(|(index, row)| coerce_row(row, index))
        .collect()
}

/// Read delimited text into one string-valued map per data row.
fn parse_delimited(bytes: &[u8]) -> Result<Vec<Map<String, Value>>, LoadError> {
    let text = std::str::from_utf8(bytes).map_err(|_| LoadError::Encoding)?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|e| LoadError::Malformed(e.to_string()))?
        .clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let row = result.map_err(|e| LoadError::Malformed(e.to_string()))?;
        let mut map = Map::new();
        for (key, value) in headers.iter().zip(row.iter()) {
            map.insert(key.to_string(), Value::String(value.to_string()));
        }
        rows.push(map);
    }

    Ok(rows)
}

/// Read a JSON array of flat objects.
fn parse_json(bytes: &[u8]) -> Result<Vec<Map<String, Value>>, LoadError> {
    let root: Value =
        serde_json::from_slice(bytes).map_err(|e| LoadError::Malformed(e.to_string()))?;

    let rows = root
        .as_array()
        .ok_or_else(|| LoadError::Malformed("expected a top-level JSON array".to_string()))?;

    rows.iter()
        .map(|row| {
            row.as_object().cloned().ok_or_else(|| {
                LoadError::Malformed("expected an array of JSON objects".to_string())
            })
        })
        .collect()
}

fn coerce_row(row: &Map<String, Value>, index: usize) -> Result<Record, LoadError> {
    Ok(Record {
        code: int_field(row, index, FIELD_CODE)?,
        name: text_field(row, index, FIELD_NAME)?,
        category: text_field(row, index, FIELD_CATEGORY)?,
        quantity: int_field(row, index, FIELD_QUANTITY)?,
        price: float_field(row, index, FIELD_PRICE)?,
    })
}

fn field_value<'a>(
    row: &'a Map<String, Value>,
    keys: (&'static str, &'static str),
) -> Result<&'a Value, LoadError> {
    row.get(keys.0)
        .or_else(|| row.get(keys.1))
        .ok_or_else(|| LoadError::MissingField(keys.0.to_string()))
}

fn int_field(
    row: &Map<String, Value>,
    index: usize,
    keys: (&'static str, &'static str),
) -> Result<i64, LoadError> {
    let parsed = match field_value(row, keys)? {
        // A fractional JSON number truncates; a fractional string does not
        // parse as an integer and fails.
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };

    parsed.ok_or(LoadError::TypeCoercion {
        row: index + 1,
        field: keys.0,
    })
}

fn float_field(
    row: &Map<String, Value>,
    index: usize,
    keys: (&'static str, &'static str),
) -> Result<f64, LoadError> {
    let parsed = match field_value(row, keys)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    parsed.ok_or(LoadError::TypeCoercion {
        row: index + 1,
        field: keys.0,
    })
}

fn text_field(
    row: &Map<String, Value>,
    index: usize,
    keys: (&'static str, &'static str),
) -> Result<String, LoadError> {
    match field_value(row, keys)? {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(LoadError::TypeCoercion {
            row: index + 1,
            field: keys.0,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_RU: &str = "\
код,наименование,категория,количество,цена
1,Молоток,Инструменты,5,199.90
2,Отвертка,Инструменты,12,89.50
";

    #[test]
    fn csv_with_canonical_headers() {
        let records = parse_records(CSV_RU.as_bytes(), "inventory.csv").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].code, 1);
        assert_eq!(records[0].name, "Молоток");
        assert_eq!(records[0].quantity, 5);
        assert_eq!(records[0].price, 199.90);
    }

    #[test]
    fn csv_with_alias_headers() {
        let csv = "code,name,category,quantity,price\n7,Hammer,Tools,3,12.5\n";
        let records = parse_records(csv.as_bytes(), "inventory.csv").unwrap();
        assert_eq!(records[0].code, 7);
        assert_eq!(records[0].category, "Tools");
    }

    #[test]
    fn txt_extension_uses_delimited_parser() {
        let records = parse_records(CSV_RU.as_bytes(), "inventory.txt").unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn json_array_of_objects() {
        let json = r#"[
            {"код": 1, "наименование": "Дрель", "категория": "Электро", "количество": 2, "цена": 4500.0},
            {"код": 2, "наименование": "Пила", "категория": "Ручные", "количество": "4", "цена": "760.5"}
        ]"#;
        let records = parse_records(json.as_bytes(), "inventory.json").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].quantity, 4);
        assert_eq!(records[1].price, 760.5);
    }

    #[test]
    fn json_fractional_number_truncates_for_integer_field() {
        let json =
            r#"[{"code": 1.9, "name": "x", "category": "y", "quantity": 2.5, "price": 1.0}]"#;
        let records = parse_records(json.as_bytes(), "i.json").unwrap();
        assert_eq!(records[0].code, 1);
        assert_eq!(records[0].quantity, 2);
    }

    #[test]
    fn fractional_string_fails_integer_coercion() {
        let csv = "code,name,category,quantity,price\n1,x,y,2.5,1.0\n";
        let err = parse_records(csv.as_bytes(), "i.csv").unwrap_err();
        assert!(matches!(
            err,
            LoadError::TypeCoercion {
                row: 1,
                field: "количество"
            }
        ));
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let err = parse_records(b"whatever", "inventory.xml").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(ext) if ext == "xml"));
    }

    #[test]
    fn missing_extension_is_rejected() {
        let err = parse_records(b"whatever", "inventory").unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat(_)));
    }

    #[test]
    fn header_only_csv_is_empty_input() {
        let err = parse_records(b"code,name,category,quantity,price\n", "i.csv").unwrap_err();
        assert!(matches!(err, LoadError::EmptyInput));
    }

    #[test]
    fn empty_json_array_is_empty_input() {
        let err = parse_records(b"[]", "i.json").unwrap_err();
        assert!(matches!(err, LoadError::EmptyInput));
    }

    #[test]
    fn missing_price_column_names_the_field() {
        let csv = "код,наименование,категория,количество\n1,Молоток,Инструменты,5\n";
        let err = parse_records(csv.as_bytes(), "i.csv").unwrap_err();
        assert!(matches!(err, LoadError::MissingField(field) if field == "цена"));
    }

    #[test]
    fn bad_value_in_any_row_fails_the_whole_parse() {
        let csv = "code,name,category,quantity,price\n1,a,b,1,1.0\n2,c,d,1,oops\n";
        let err = parse_records(csv.as_bytes(), "i.csv").unwrap_err();
        assert!(matches!(
            err,
            LoadError::TypeCoercion {
                row: 2,
                field: "цена"
            }
        ));
    }

    #[test]
    fn non_utf8_input_is_an_encoding_error() {
        let err = parse_records(&[0xff, 0xfe, 0x00], "i.csv").unwrap_err();
        assert!(matches!(err, LoadError::Encoding));
    }
}

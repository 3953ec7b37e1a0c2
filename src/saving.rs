use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::record::Record;

/// Write records to disk as pretty-printed UTF-8 JSON.
///
/// The output is a flat array of record objects under their canonical
/// keys, so it round-trips through the loader unchanged. Non-Latin text is
/// written as-is, not ASCII-escaped.
pub fn write_records(path: &Path, records: &[Record]) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, records)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    writer.write_all(b"\n")?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_records;

    #[test]
    fn written_file_reloads_through_the_parser() {
        let records = vec![Record {
            code: 1,
            name: "Молоток".to_string(),
            category: "Инструменты".to_string(),
            quantity: 5,
            price: 199.9,
        }];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        write_records(&path, &records).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        // Cyrillic must survive verbatim, not as \u escapes.
        assert!(String::from_utf8(bytes.clone()).unwrap().contains("Молоток"));

        let reloaded = parse_records(&bytes, "result.json").unwrap();
        assert_eq!(reloaded, records);
    }
}

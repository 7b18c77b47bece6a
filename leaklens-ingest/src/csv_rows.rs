//! Delimited-text row source.

use crate::types::{IngestError, RawRow};

/// Decode comma-separated statement bytes into ordered raw rows.
///
/// UTF-8 is decoded best-effort (invalid sequences become replacement
/// characters and only ever feed substring matching downstream). The first
/// row is taken as headers; headers and cells are trimmed; rows whose cells
/// are all empty are discarded. Short rows pad with empty cells, extra
/// trailing cells are dropped.
pub fn parse_delimited(bytes: &[u8]) -> Result<Vec<RawRow>, IngestError> {
    if bytes.is_empty() {
        return Err(IngestError::EmptyInput);
    }

    let text = String::from_utf8_lossy(bytes);
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result?;

        let mut row = RawRow::new();
        for (i, header) in headers.iter().enumerate() {
            let value = record.get(i).unwrap_or("").trim();
            row.push(header, value);
        }
        if !row.all_values_empty() {
            rows.push(row);
        }
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_rows_keep_order() {
        let data = b"Date,Narration,Amount\n2024-08-15,UPI/X,450\n2024-08-16,UPI/Y,-100\n";
        let rows = parse_delimited(data).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("Narration"), Some("UPI/X"));
        assert_eq!(rows[1].get("Amount"), Some("-100"));
        let headers: Vec<&str> = rows[0].iter().map(|(h, _)| h).collect();
        assert_eq!(headers, ["Date", "Narration", "Amount"]);
    }

    #[test]
    fn test_cells_and_headers_are_trimmed() {
        let data = b" Date , Amount \n 2024-08-15 , 450 \n";
        let rows = parse_delimited(data).unwrap();
        assert_eq!(rows[0].get("Date"), Some("2024-08-15"));
        assert_eq!(rows[0].get("Amount"), Some("450"));
    }

    #[test]
    fn test_all_empty_rows_are_discarded() {
        let data = b"Date,Amount\n,,\n2024-08-15,450\n , \n";
        let rows = parse_delimited(data).unwrap();
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_short_rows_pad_with_empty() {
        let data = b"Date,Description,Amount\n2024-08-15,only-two\n";
        let rows = parse_delimited(data).unwrap();
        assert_eq!(rows[0].get("Amount"), Some(""));
        assert_eq!(rows[0].len(), 3);
    }

    #[test]
    fn test_empty_input_is_an_error() {
        assert!(matches!(parse_delimited(b""), Err(IngestError::EmptyInput)));
    }

    #[test]
    fn test_invalid_utf8_is_tolerated() {
        let data = b"Date,Amount\n2024-08-15,45\xff0\n";
        let rows = parse_delimited(data).unwrap();
        assert_eq!(rows.len(), 1);
    }
}

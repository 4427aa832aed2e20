use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context};
use serde_json::{json, Map, Number, Value};

/// Loads raw student records, picking the format from the file extension.
pub fn load_records(path: &Path) -> anyhow::Result<Vec<Value>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("json") => load_json(path),
        Some("csv") => load_csv(path),
        _ => bail!(
            "unsupported input file {} (expected .json or .csv)",
            path.display()
        ),
    }
}

/// Reads a JSON array; elements are returned untouched for the analyzer to validate.
pub fn load_json(path: &Path) -> anyhow::Result<Vec<Value>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let document: Value = serde_json::from_str(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    match document {
        Value::Array(records) => Ok(records),
        _ => bail!("{} must contain a JSON array of students", path.display()),
    }
}

pub fn load_csv(path: &Path) -> anyhow::Result<Vec<Value>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("failed to open {}", path.display()))?;
    read_csv(file).with_context(|| format!("failed to parse {}", path.display()))
}

/// Reads `name,grades` rows where `grades` is a `;`-separated list.
///
/// Unparseable grade tokens are kept as strings so the analyzer drops them the
/// same way it drops any other non-numeric grade.
pub fn read_csv<R: Read>(reader: R) -> anyhow::Result<Vec<Value>> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        name: String,
        #[serde(default)]
        grades: String,
    }

    let mut reader = csv::Reader::from_reader(reader);
    let mut records = Vec::new();

    for row in reader.deserialize::<CsvRow>() {
        let row = row?;
        let mut record = Map::new();

        let name = row.name.trim();
        if !name.is_empty() {
            record.insert("name".to_string(), json!(name));
        }
        record.insert("grades".to_string(), Value::Array(parse_grades(&row.grades)));

        records.push(Value::Object(record));
    }

    Ok(records)
}

fn parse_grades(cell: &str) -> Vec<Value> {
    cell.split(';')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .unwrap_or_else(|| json!(token))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn csv_rows_become_records() {
        let data = "name,grades\nAvery Lee,85;92.5; 78\nJules Moreno,\nKiara Patel,abc;70\n,90\n";
        let records = read_csv(data.as_bytes()).unwrap();

        assert_eq!(records.len(), 4);
        assert_eq!(records[0], json!({"name": "Avery Lee", "grades": [85.0, 92.5, 78.0]}));
        assert_eq!(records[1], json!({"name": "Jules Moreno", "grades": []}));
        assert_eq!(records[2], json!({"name": "Kiara Patel", "grades": ["abc", 70.0]}));
        assert_eq!(records[3], json!({"grades": [90.0]}));
    }

    #[test]
    fn csv_without_grades_column_yields_empty_lists() {
        let records = read_csv("name\nAvery Lee\n".as_bytes()).unwrap();
        assert_eq!(records, vec![json!({"name": "Avery Lee", "grades": []})]);
    }

    #[test]
    fn non_finite_tokens_stay_strings() {
        assert_eq!(parse_grades("NaN;inf;55"), vec![json!("NaN"), json!("inf"), json!(55.0)]);
    }

    #[test]
    fn json_array_is_loaded_verbatim() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"[{{"name": "Avery Lee", "grades": [80]}}, "stray"]"#).unwrap();

        let records = load_records(file.path()).unwrap();
        assert_eq!(records, vec![json!({"name": "Avery Lee", "grades": [80]}), json!("stray")]);
    }

    #[test]
    fn json_object_document_is_rejected() {
        let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(file, r#"{{"name": "Avery Lee"}}"#).unwrap();

        let err = load_json(file.path()).unwrap_err();
        assert!(err.to_string().contains("JSON array"));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        let file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(load_records(file.path()).is_err());
    }
}

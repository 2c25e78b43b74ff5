//! CSV encoding for table snapshots

use crate::domain::TableSnapshot;
use serde_json::Value;

const DELIMITER: char = ',';
const QUOTE: char = '"';

/// Encode a snapshot as CSV text: a header line of raw column names,
/// then one newline-terminated line per row.
pub fn encode_table(snapshot: &TableSnapshot) -> String {
    let mut out = String::new();
    out.push_str(&snapshot.columns.join(","));
    out.push('\n');

    for row in &snapshot.rows {
        let fields: Vec<String> = snapshot
            .columns
            .iter()
            .map(|col| encode_field(row.get(col).unwrap_or(&Value::Null)))
            .collect();
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

/// Encode a single cell value as a CSV field
pub fn encode_field(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quote_if_needed(s),
        // Arrays and objects keep their JSON text form; the string quoting
        // rule then applies to that text.
        Value::Array(_) | Value::Object(_) => quote_if_needed(&value.to_string()),
    }
}

fn quote_if_needed(field: &str) -> String {
    if field.contains(DELIMITER) || field.contains(QUOTE) || field.contains('\n') {
        format!("\"{}\"", field.replace(QUOTE, "\"\""))
    } else {
        field.to_string()
    }
}

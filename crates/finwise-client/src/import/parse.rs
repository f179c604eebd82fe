use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::import::{OPTIONAL_IMPORT_FIELDS, REQUIRED_IMPORT_FIELDS, expected_headers, invalid_input_error};
use crate::{ClientError, ClientResult};

/// One source row with every field still as text. `row` is 1-based.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParsedRow {
    pub(crate) row: i64,
    pub(crate) date: Option<String>,
    pub(crate) amount: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) category: Option<String>,
    pub(crate) is_income: Option<String>,
    pub(crate) is_recurring: Option<String>,
    pub(crate) recurrence: Option<String>,
}

pub(crate) fn parse_source(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(invalid_input_error("Import source is empty."));
    }

    if trimmed.starts_with('[') {
        return parse_json_array(trimmed);
    }

    if serde_json::from_str::<Value>(trimmed).is_ok() {
        return Err(ClientError::invalid_import_format(
            "JSON input must be a top-level array of transaction objects.",
            "json_non_array",
        ));
    }

    if looks_like_csv(trimmed) {
        return parse_csv(trimmed);
    }

    Err(ClientError::invalid_import_format(
        "Unsupported import format. Provide a JSON array or CSV with headers.",
        "unknown",
    ))
}

fn parse_json_array(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let parsed = serde_json::from_str::<Value>(content)
        .map_err(|_| invalid_input_error("Invalid JSON input. Provide a valid JSON array."))?;

    let Some(items) = parsed.as_array() else {
        return Err(invalid_input_error(
            "JSON input must be a top-level array of transaction objects.",
        ));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let object = item.as_object().ok_or_else(|| {
                invalid_input_error("JSON array entries must all be objects with transaction fields.")
            })?;
            Ok(ParsedRow {
                row: (index as i64) + 1,
                date: json_field(object, "date"),
                amount: json_field(object, "amount"),
                description: json_field(object, "description"),
                category: json_field(object, "category"),
                is_income: json_field(object, "is_income"),
                is_recurring: json_field(object, "is_recurring"),
                recurrence: json_field(object, "recurrence"),
            })
        })
        .collect()
}

fn parse_csv(content: &str) -> ClientResult<Vec<ParsedRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(content.as_bytes());

    let headers = reader
        .headers()
        .map_err(|_| invalid_input_error("CSV header row is missing or unreadable."))?
        .iter()
        .map(|value| value.trim().to_string())
        .collect::<Vec<String>>();

    if !headers_are_valid(&headers) {
        return Err(ClientError::import_schema_mismatch(
            expected_headers(),
            headers,
        ));
    }

    let index_by_name = headers
        .iter()
        .enumerate()
        .map(|(index, name)| (name.to_string(), index))
        .collect::<HashMap<String, usize>>();
    let field = |record: &csv::StringRecord, name: &str| -> Option<String> {
        let index = index_by_name.get(name)?;
        record.get(*index).map(str::to_string)
    };

    let mut rows = Vec::new();
    for (row_index, result_row) in reader.records().enumerate() {
        let record =
            result_row.map_err(|_| invalid_input_error("CSV rows are malformed or not UTF-8."))?;

        rows.push(ParsedRow {
            row: (row_index as i64) + 1,
            date: field(&record, "date"),
            amount: field(&record, "amount"),
            description: field(&record, "description"),
            category: field(&record, "category"),
            is_income: field(&record, "is_income"),
            is_recurring: field(&record, "is_recurring"),
            recurrence: field(&record, "recurrence"),
        });
    }

    Ok(rows)
}

/// Strings pass through; numbers and booleans keep their JSON spelling so
/// amounts are never routed through a float.
fn json_field(object: &Map<String, Value>, name: &str) -> Option<String> {
    match object.get(name)? {
        Value::Null => None,
        Value::String(value) => Some(value.clone()),
        other => Some(other.to_string()),
    }
}

fn looks_like_csv(content: &str) -> bool {
    content
        .lines()
        .find(|line| !line.trim().is_empty())
        .is_some_and(|first_line| first_line.contains(','))
}

fn headers_are_valid(actual_headers: &[String]) -> bool {
    let has_required = REQUIRED_IMPORT_FIELDS
        .iter()
        .all(|required| actual_headers.iter().any(|value| value == required));
    let all_known = actual_headers.iter().all(|header| {
        REQUIRED_IMPORT_FIELDS
            .iter()
            .chain(OPTIONAL_IMPORT_FIELDS.iter())
            .any(|known| known == header)
    });
    has_required && all_known
}

#[cfg(test)]
mod tests {
    use super::parse_source;

    #[test]
    fn csv_without_optional_headers_parses() {
        let parsed = parse_source("date,amount,description,category\n2023-04-02,85.42,Groceries,food\n");
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].row, 1);
            assert_eq!(rows[0].amount.as_deref(), Some("85.42"));
            assert_eq!(rows[0].is_income, None);
        }
    }

    #[test]
    fn unknown_csv_header_is_a_schema_mismatch() {
        let parsed = parse_source("date,amount,description,category,merchant\n");
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "import_schema_mismatch");
        }
    }

    #[test]
    fn json_numbers_and_booleans_keep_their_spelling() {
        let parsed = parse_source(
            r#"[{"date":"2023-04-05","amount":4500.10,"description":"Salary","category":"income","is_income":true}]"#,
        );
        assert!(parsed.is_ok());
        if let Ok(rows) = parsed {
            assert_eq!(rows[0].amount.as_deref(), Some("4500.1"));
            assert_eq!(rows[0].is_income.as_deref(), Some("true"));
        }
    }

    #[test]
    fn top_level_json_object_is_rejected() {
        let parsed = parse_source(r#"{"date":"2023-04-05"}"#);
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "invalid_argument");
        }
    }
}

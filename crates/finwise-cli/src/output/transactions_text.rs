use std::io;

use serde_json::Value;

use super::budget_text::{count_label, render_summary_section};
use super::format::{self, Align, Column, decimal_field, money, str_field};

pub fn render_transaction_add(data: &Value) -> io::Result<String> {
    let transaction = data
        .get("transaction")
        .ok_or_else(|| io::Error::other("transaction add output requires transaction"))?;

    let kind = if transaction
        .get("is_income")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        "income"
    } else {
        "expense"
    };
    let mut lines = vec![
        format!(
            "Recorded {kind} of {} in {} on {}.",
            money(decimal_field(transaction, "amount")),
            str_field(transaction, "category"),
            str_field(transaction, "date")
        ),
        format!("  Transaction ID:  {}", str_field(transaction, "id")),
    ];
    if let Some(recurrence) = transaction.get("recurrence").and_then(Value::as_str) {
        lines.push(format!("  Repeats:         {recurrence}"));
    }
    lines.push(String::new());
    lines.extend(render_summary_section(
        data.get("summary").unwrap_or(&Value::Null),
    ));
    Ok(lines.join("\n"))
}

pub fn render_transaction_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("transaction list output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No transactions yet.",
            "",
            "Record one, or import a file:",
            "  finwise transaction add --amount 85.42 --category food --description \"Groceries\"",
            "  finwise transaction import --help",
        ]
        .join("\n"));
    }

    let total = data
        .get("total")
        .and_then(Value::as_u64)
        .unwrap_or(rows.len() as u64);
    let mut lines = vec![if total as usize > rows.len() {
        format!("Showing the {} newest of {total} transactions.", rows.len())
    } else {
        count_label(rows.len(), "transaction")
    }];
    lines.push(String::new());
    lines.extend(render_transaction_table(rows));
    Ok(lines.join("\n"))
}

pub fn render_transaction_import(data: &Value) -> io::Result<String> {
    let dry_run = data
        .get("dry_run")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("import output requires summary"))?;

    let count = |key: &str| {
        summary
            .get(key)
            .and_then(Value::as_i64)
            .unwrap_or(0)
            .to_string()
    };

    let mut lines = vec![
        str_field(data, "message").to_string(),
        String::new(),
        "Summary:".to_string(),
    ];
    let mut entries = Vec::new();
    if let Some(import_id) = data.get("import_id").and_then(Value::as_str) {
        entries.push(("Import ID:", import_id.to_string()));
    }
    entries.push(("Source:", str_field(data, "source_kind").to_string()));
    entries.push(("Rows read:", count("rows_read")));
    entries.push(("Rows valid:", count("rows_valid")));
    entries.push(("Inserted:", count("inserted")));
    lines.extend(format::key_value_rows(&entries, 2));

    lines.push(String::new());
    if dry_run {
        lines.push("What to do next:".to_string());
        lines.push("  1. Run `finwise transaction import <path>` to write these rows.".to_string());
    } else if let Some(budget_summary) = data.get("budget_summary") {
        lines.extend(render_summary_section(budget_summary));
    }
    Ok(lines.join("\n"))
}

pub(super) fn render_transaction_table(rows: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Date",
            align: Align::Left,
        },
        Column {
            name: "Description",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Amount",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            let amount = money(decimal_field(row, "amount"));
            let signed = if row.get("is_income").and_then(Value::as_bool).unwrap_or(false) {
                format!("+{amount}")
            } else {
                amount
            };
            vec![
                str_field(row, "date").to_string(),
                str_field(row, "description").to_string(),
                str_field(row, "category").to_string(),
                signed,
            ]
        })
        .collect::<Vec<_>>();
    format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Transaction",
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{render_transaction_import, render_transaction_list};

    #[test]
    fn list_marks_income_with_a_plus_sign() {
        let rendered = render_transaction_list(&json!({
            "total": 2,
            "returned": 2,
            "rows": [
                {"id": "txn_2", "amount": 4500.0, "date": "2023-04-05", "description": "Salary deposit",
                 "category": "income", "is_income": true, "is_recurring": true, "recurrence": "monthly"},
                {"id": "txn_1", "amount": 85.42, "date": "2023-04-02", "description": "Grocery shopping",
                 "category": "food", "is_income": false, "is_recurring": false, "recurrence": null}
            ]
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("2 transactions found."));
            assert!(text.contains("+$4,500.00"));
            assert!(text.contains("$85.42"));
        }
    }

    #[test]
    fn limited_list_reports_the_total() {
        let rendered = render_transaction_list(&json!({
            "total": 7,
            "returned": 1,
            "rows": [
                {"id": "txn_7", "amount": 12.0, "date": "2023-04-09", "description": "Lunch",
                 "category": "food", "is_income": false}
            ]
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Showing the 1 newest of 7 transactions."));
        }
    }

    #[test]
    fn dry_run_import_points_at_the_real_import() {
        let rendered = render_transaction_import(&json!({
            "dry_run": true,
            "path": "april.csv",
            "message": "Validation passed. No rows were written.",
            "source_kind": "file",
            "summary": {"rows_read": 4, "rows_valid": 4, "rows_invalid": 0, "inserted": 0},
            "issues": []
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.starts_with("Validation passed."));
            assert!(text.contains("Rows read:"));
            assert!(text.contains("finwise transaction import <path>"));
            assert!(!text.contains("Import ID:"));
        }
    }
}

use std::io;

use serde_json::Value;

use super::format::{
    self, Align, Column, decimal_field, money, percent, rows_field, str_field, usage_band,
};

pub fn render_budget_create(data: &Value) -> io::Result<String> {
    let budget = data
        .get("budget")
        .ok_or_else(|| io::Error::other("budget create output requires budget"))?;

    let mut lines = vec![
        format!(
            "Created a {} budget of {} for {}.",
            str_field(budget, "period"),
            money(decimal_field(budget, "limit")),
            str_field(budget, "category")
        ),
        String::new(),
        format!("  Budget ID:  {}", str_field(budget, "id")),
        format!("  Starts:     {}", str_field(budget, "start_date")),
        String::new(),
    ];
    lines.extend(render_summary_section(data.get("summary").unwrap_or(&Value::Null)));
    Ok(lines.join("\n"))
}

pub fn render_budget_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("budget list output requires rows"))?;

    if rows.is_empty() {
        return Ok(no_budgets_message());
    }

    let columns = [
        Column {
            name: "Budget ID",
            align: Align::Left,
        },
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Period",
            align: Align::Left,
        },
        Column {
            name: "Limit",
            align: Align::Right,
        },
        Column {
            name: "Spent",
            align: Align::Right,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            vec![
                str_field(row, "id").to_string(),
                str_field(row, "category").to_string(),
                str_field(row, "period").to_string(),
                money(decimal_field(row, "limit")),
                money(decimal_field(row, "current_spent")),
            ]
        })
        .collect::<Vec<_>>();

    let mut lines = vec![count_label(rows.len(), "budget"), String::new()];
    lines.extend(format::render_table_or_blocks(
        &columns,
        &table_rows,
        format::terminal_width(),
        "Budget",
    ));
    Ok(lines.join("\n"))
}

pub fn render_budget_summary(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("budget summary output requires summary"))?;

    let mut lines = render_summary_section(summary);
    lines.push(String::new());
    lines.extend(render_cash_flow_section(
        data.get("cash_flow").unwrap_or(&Value::Null),
    ));
    Ok(lines.join("\n"))
}

pub(super) fn render_summary_section(summary: &Value) -> Vec<String> {
    let categories = rows_field(summary, "categories");
    if categories.is_empty() {
        return vec![no_budgets_message()];
    }

    let total_percent = decimal_field(summary, "percent_used");
    let mut lines = vec!["Budget summary:".to_string()];
    lines.extend(format::key_value_rows(
        &[
            ("Budgeted:", money(decimal_field(summary, "total_budget"))),
            ("Spent:", money(decimal_field(summary, "total_spent"))),
            ("Remaining:", money(decimal_field(summary, "remaining"))),
            (
                "Used:",
                format!("{} ({})", percent(total_percent), usage_band(total_percent)),
            ),
        ],
        2,
    ));
    lines.push(String::new());

    let columns = [
        Column {
            name: "Category",
            align: Align::Left,
        },
        Column {
            name: "Limit",
            align: Align::Right,
        },
        Column {
            name: "Spent",
            align: Align::Right,
        },
        Column {
            name: "Remaining",
            align: Align::Right,
        },
        Column {
            name: "Used",
            align: Align::Right,
        },
        Column {
            name: "Status",
            align: Align::Left,
        },
    ];
    let rows = categories
        .iter()
        .map(|row| {
            let used = decimal_field(row, "percent_used");
            vec![
                str_field(row, "category").to_string(),
                money(decimal_field(row, "limit")),
                money(decimal_field(row, "spent")),
                money(decimal_field(row, "remaining")),
                percent(used),
                usage_band(used).to_string(),
            ]
        })
        .collect::<Vec<_>>();
    lines.extend(format::render_table_or_blocks(
        &columns,
        &rows,
        format::terminal_width(),
        "Budget",
    ));
    lines
}

pub(super) fn render_cash_flow_section(cash_flow: &Value) -> Vec<String> {
    let mut lines = vec!["Cash flow:".to_string()];
    lines.extend(format::key_value_rows(
        &[
            ("Income:", money(decimal_field(cash_flow, "income"))),
            ("Expenses:", money(decimal_field(cash_flow, "expenses"))),
            ("Net:", money(decimal_field(cash_flow, "net"))),
        ],
        2,
    ));

    let spending = rows_field(cash_flow, "spending_by_category");
    if !spending.is_empty() {
        lines.push(String::new());
        lines.push("  Spending by category:".to_string());
        let entries = spending
            .iter()
            .map(|row| (str_field(row, "category"), money(decimal_field(row, "spent"))))
            .collect::<Vec<_>>();
        lines.extend(format::key_value_rows(&entries, 4));
    }
    lines
}

fn no_budgets_message() -> String {
    [
        "No budgets yet.",
        "",
        "Create one:",
        "  finwise budget create --category food --limit 600",
    ]
    .join("\n")
}

pub(super) fn count_label(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun} found.")
    } else {
        format!("{count} {noun}s found.")
    }
}

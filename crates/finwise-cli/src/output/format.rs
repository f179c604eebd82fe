use std::cmp;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    pub name: &'a str,
    pub align: Align,
}

const INDENT: usize = 2;
const COLUMN_GAP: usize = 2;

pub fn terminal_width() -> usize {
    let from_env = std::env::var("COLUMNS")
        .ok()
        .and_then(|value| value.parse::<usize>().ok())
        .unwrap_or(120);
    cmp::max(from_env, 40)
}

pub fn key_value_rows(entries: &[(&str, String)], indent: usize) -> Vec<String> {
    let label_width = entries
        .iter()
        .map(|(label, _)| label.len())
        .max()
        .unwrap_or(0);
    let padding = " ".repeat(indent);

    entries
        .iter()
        .map(|(label, value)| format!("{padding}{label:<label_width$}  {value}"))
        .collect()
}

/// Renders an aligned table, or one labelled block per row when the table
/// would not fit in `max_width`.
pub fn render_table_or_blocks(
    columns: &[Column<'_>],
    rows: &[Vec<String>],
    max_width: usize,
    block_label: &str,
) -> Vec<String> {
    if columns.is_empty() {
        return Vec::new();
    }

    let widths = column_widths(columns, rows);
    let table_width = INDENT + widths.iter().sum::<usize>() + COLUMN_GAP * (widths.len() - 1);
    if table_width > max_width {
        return render_blocks(columns, rows, block_label);
    }

    let header = columns
        .iter()
        .map(|column| column.name.to_string())
        .collect::<Vec<_>>();
    let mut output = vec![format_row(columns, &header, &widths)];
    output.extend(rows.iter().map(|row| format_row(columns, row, &widths)));
    output
}

fn column_widths(columns: &[Column<'_>], rows: &[Vec<String>]) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| {
            rows.iter()
                .filter_map(|row| row.get(index))
                .map(|cell| cell.chars().count())
                .fold(column.name.len(), cmp::max)
        })
        .collect()
}

fn format_row(columns: &[Column<'_>], cells: &[String], widths: &[usize]) -> String {
    let rendered = columns
        .iter()
        .zip(widths)
        .enumerate()
        .map(|(index, (column, width))| {
            let cell = cells.get(index).map(String::as_str).unwrap_or("");
            match column.align {
                Align::Left => format!("{cell:<width$}"),
                Align::Right => format!("{cell:>width$}"),
            }
        })
        .collect::<Vec<_>>()
        .join(&" ".repeat(COLUMN_GAP));
    format!("{}{}", " ".repeat(INDENT), rendered.trim_end())
}

fn render_blocks(columns: &[Column<'_>], rows: &[Vec<String>], block_label: &str) -> Vec<String> {
    let labels = columns
        .iter()
        .map(|column| format!("{}:", column.name))
        .collect::<Vec<String>>();
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);

    let mut output = Vec::new();
    for (row_index, row) in rows.iter().enumerate() {
        output.push(format!("  {block_label} {}:", row_index + 1));
        for (column_index, label) in labels.iter().enumerate() {
            let value = row.get(column_index).cloned().unwrap_or_default();
            output.push(format!("    {label:<label_width$}  {value}"));
        }
        if row_index + 1 < rows.len() {
            output.push(String::new());
        }
    }
    output
}

/// Reads a JSON number (or numeric string) as an exact decimal.
pub fn decimal_field(data: &Value, key: &str) -> Decimal {
    match data.get(key) {
        Some(Value::Number(number)) => {
            Decimal::from_str(&number.to_string())
                .or_else(|_| Decimal::from_scientific(&number.to_string()))
                .unwrap_or_default()
        }
        Some(Value::String(text)) => Decimal::from_str(text).unwrap_or_default(),
        _ => Decimal::ZERO,
    }
}

pub fn money(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    format!("{sign}${}.{cents}", group_thousands(whole))
}

pub fn percent(value: Decimal) -> String {
    format!("{:.1}%", value.round_dp(1))
}

/// Presentation-only label for how much of a budget is used.
pub fn usage_band(percent_used: Decimal) -> &'static str {
    if percent_used < Decimal::from(70) {
        "on track"
    } else if percent_used < Decimal::from(90) {
        "watch"
    } else {
        "at limit"
    }
}

pub fn str_field<'a>(data: &'a Value, key: &str) -> &'a str {
    data.get(key).and_then(Value::as_str).unwrap_or("")
}

pub fn rows_field<'a>(data: &'a Value, key: &str) -> &'a [Value] {
    data.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{
        Align, Column, decimal_field, key_value_rows, money, percent, render_table_or_blocks,
        usage_band,
    };

    #[test]
    fn key_value_rows_align_labels() {
        let rows = key_value_rows(
            &[
                ("Budgeted:", "$300.00".to_string()),
                ("Remaining:", "$150.00".to_string()),
            ],
            2,
        );

        assert_eq!(rows[0], "  Budgeted:   $300.00");
        assert_eq!(rows[1], "  Remaining:  $150.00");
    }

    #[test]
    fn table_aligns_amounts_to_the_right() {
        let columns = [
            Column {
                name: "Category",
                align: Align::Left,
            },
            Column {
                name: "Spent",
                align: Align::Right,
            },
        ];
        let rows = vec![
            vec!["food".to_string(), "$85.42".to_string()],
            vec!["housing".to_string(), "$1,200.00".to_string()],
        ];

        let rendered = render_table_or_blocks(&columns, &rows, 80, "Budget");
        assert_eq!(rendered[0], "  Category      Spent");
        assert_eq!(rendered[1], "  food         $85.42");
        assert_eq!(rendered[2], "  housing   $1,200.00");
    }

    #[test]
    fn narrow_width_falls_back_to_blocks() {
        let columns = [
            Column {
                name: "Description",
                align: Align::Left,
            },
            Column {
                name: "Amount",
                align: Align::Right,
            },
        ];
        let rows = vec![vec![
            "A very long grocery description".to_string(),
            "$85.42".to_string(),
        ]];

        let rendered = render_table_or_blocks(&columns, &rows, 20, "Transaction");
        assert_eq!(rendered[0], "  Transaction 1:");
        assert!(rendered[1].contains("Description:"));
    }

    #[test]
    fn money_groups_thousands_and_keeps_sign() {
        assert_eq!(money(Decimal::new(128542, 2)), "$1,285.42");
        assert_eq!(money(Decimal::from(-150)), "-$150.00");
        assert_eq!(money(Decimal::ZERO), "$0.00");
    }

    #[test]
    fn decimals_are_read_from_json_numbers() {
        let data = json!({ "spent": 85.42, "limit": "600" });
        assert_eq!(decimal_field(&data, "spent"), Decimal::new(8542, 2));
        assert_eq!(decimal_field(&data, "limit"), Decimal::from(600));
        assert_eq!(decimal_field(&data, "missing"), Decimal::ZERO);
    }

    #[test]
    fn usage_bands_follow_percent_thresholds() {
        assert_eq!(usage_band(Decimal::from(50)), "on track");
        assert_eq!(usage_band(Decimal::from(70)), "watch");
        assert_eq!(usage_band(Decimal::new(8999, 2)), "watch");
        assert_eq!(usage_band(Decimal::from(90)), "at limit");
        assert_eq!(percent(Decimal::new(8542, 2)), "85.4%");
    }
}

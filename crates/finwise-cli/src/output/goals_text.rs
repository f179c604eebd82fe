use std::io;

use serde_json::Value;

use super::budget_text::count_label;
use super::format::{self, Align, Column, decimal_field, money, percent, str_field};

pub fn render_goal_create(data: &Value) -> io::Result<String> {
    let goal = data
        .get("goal")
        .ok_or_else(|| io::Error::other("goal create output requires goal"))?;

    let mut entries = vec![
        ("Goal ID:", str_field(goal, "id").to_string()),
        ("Category:", str_field(goal, "category").to_string()),
        ("Priority:", str_field(goal, "priority").to_string()),
    ];
    if let Some(deadline) = goal.get("deadline").and_then(Value::as_str) {
        entries.push(("Deadline:", deadline.to_string()));
    }

    let mut lines = vec![
        format!(
            "Created goal \"{}\" with a target of {}.",
            str_field(goal, "name"),
            money(decimal_field(goal, "target_amount"))
        ),
        String::new(),
    ];
    lines.extend(format::key_value_rows(&entries, 2));
    lines.push(String::new());
    lines.push(format!(
        "Record progress with `finwise goal contribute {} <amount>`.",
        str_field(goal, "id")
    ));
    Ok(lines.join("\n"))
}

pub fn render_goal_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("goal list output requires rows"))?;

    if rows.is_empty() {
        return Ok([
            "No savings goals yet.",
            "",
            "Create one:",
            "  finwise goal create --name \"Emergency Fund\" --target 10000",
        ]
        .join("\n"));
    }

    let mut lines = vec![count_label(rows.len(), "goal"), String::new()];
    lines.extend(render_goal_table(rows));
    Ok(lines.join("\n"))
}

pub fn render_goal_update(data: &Value) -> io::Result<String> {
    let goal = data
        .get("goal")
        .ok_or_else(|| io::Error::other("goal update output requires goal"))?;
    let amount = money(decimal_field(data, "amount"));
    let name = str_field(goal, "name");

    let mut lines = vec![match str_field(data, "mode") {
        "set" => format!("Set \"{name}\" to {amount}."),
        _ => format!("Added {amount} to \"{name}\"."),
    }];
    lines.push(String::new());
    lines.extend(format::key_value_rows(
        &[
            ("Saved:", money(decimal_field(goal, "current_amount"))),
            ("Target:", money(decimal_field(goal, "target_amount"))),
            ("Remaining:", money(decimal_field(goal, "remaining_amount"))),
            ("Progress:", percent(decimal_field(goal, "progress_percent"))),
        ],
        2,
    ));

    if data
        .get("just_completed")
        .and_then(Value::as_bool)
        .unwrap_or(false)
    {
        lines.push(String::new());
        lines.push(format!("Goal reached! \"{name}\" is now complete."));
    }
    Ok(lines.join("\n"))
}

pub(super) fn render_goal_table(rows: &[Value]) -> Vec<String> {
    let columns = [
        Column {
            name: "Goal ID",
            align: Align::Left,
        },
        Column {
            name: "Name",
            align: Align::Left,
        },
        Column {
            name: "Saved",
            align: Align::Right,
        },
        Column {
            name: "Target",
            align: Align::Right,
        },
        Column {
            name: "Progress",
            align: Align::Right,
        },
        Column {
            name: "Status",
            align: Align::Left,
        },
    ];
    let table_rows = rows
        .iter()
        .map(|row| {
            let status = if row
                .get("is_completed")
                .and_then(Value::as_bool)
                .unwrap_or(false)
            {
                "completed".to_string()
            } else {
                match row.get("deadline").and_then(Value::as_str) {
                    Some(deadline) => format!("due {deadline}"),
                    None => "saving".to_string(),
                }
            };
            vec![
                str_field(row, "id").to_string(),
                str_field(row, "name").to_string(),
                money(decimal_field(row, "current_amount")),
                money(decimal_field(row, "target_amount")),
                percent(decimal_field(row, "progress_percent")),
                status,
            ]
        })
        .collect::<Vec<_>>();
    format::render_table_or_blocks(&columns, &table_rows, format::terminal_width(), "Goal")
}

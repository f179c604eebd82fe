use std::io;

use serde_json::Value;

use super::budget_text::{render_cash_flow_section, render_summary_section};
use super::format::rows_field;
use super::goals_text::render_goal_table;
use super::tips_text::render_tip;
use super::transactions_text::render_transaction_table;

pub fn render_overview(data: &Value) -> io::Result<String> {
    let summary = data
        .get("summary")
        .ok_or_else(|| io::Error::other("overview output requires summary"))?;

    let user_id = data.get("user_id").and_then(Value::as_str).unwrap_or("local");
    let mut lines = vec![format!("FinWise overview for {user_id}"), String::new()];

    lines.extend(render_summary_section(summary));
    lines.push(String::new());
    lines.extend(render_cash_flow_section(
        data.get("cash_flow").unwrap_or(&Value::Null),
    ));

    let recent = rows_field(data, "recent_transactions");
    lines.push(String::new());
    lines.push("Recent transactions:".to_string());
    if recent.is_empty() {
        lines.push("  None recorded yet.".to_string());
    } else {
        lines.extend(render_transaction_table(recent));
    }

    let goals = rows_field(data, "goals");
    lines.push(String::new());
    lines.push("Savings goals:".to_string());
    if goals.is_empty() {
        lines.push("  None yet.".to_string());
    } else {
        lines.extend(render_goal_table(goals));
    }

    let tips = rows_field(data, "unread_tips");
    if !tips.is_empty() {
        lines.push(String::new());
        lines.push("Tips:".to_string());
        for tip in tips {
            lines.extend(render_tip(tip));
        }
    }

    Ok(lines.join("\n"))
}

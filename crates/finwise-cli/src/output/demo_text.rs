use std::io;

use serde_json::Value;

use super::budget_text::render_summary_section;

pub fn render_demo_seed(data: &Value) -> io::Result<String> {
    let count = |key: &str| {
        data.get(key)
            .and_then(Value::as_u64)
            .ok_or_else(|| io::Error::other(format!("demo seed output requires {key}")))
    };

    let user_id = data.get("user_id").and_then(Value::as_str).unwrap_or("local");
    let mut lines = vec![
        format!("Seeded demo data for {user_id}."),
        String::new(),
        format!(
            "  {} transactions, {} budgets, {} goals, {} tip",
            count("transactions")?,
            count("budgets")?,
            count("goals")?,
            count("tips")?
        ),
        String::new(),
    ];
    lines.extend(render_summary_section(
        data.get("summary").unwrap_or(&Value::Null),
    ));
    lines.push(String::new());
    lines.push("What to do next:".to_string());
    lines.push("  1. Run `finwise overview` to explore the sample household.".to_string());
    lines.push("  2. Run `finwise goal list` to see goal progress.".to_string());
    Ok(lines.join("\n"))
}

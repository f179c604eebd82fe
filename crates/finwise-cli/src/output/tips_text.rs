use std::io;

use serde_json::Value;

use super::format::str_field;

pub fn render_tip_list(data: &Value) -> io::Result<String> {
    let rows = data
        .get("rows")
        .and_then(Value::as_array)
        .ok_or_else(|| io::Error::other("tip list output requires rows"))?;

    let unread_only = data
        .get("unread_only")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    if rows.is_empty() {
        return Ok(if unread_only {
            "No unread tips. You're all caught up.".to_string()
        } else {
            "No tips yet. Run `finwise demo seed` to see an example.".to_string()
        });
    }

    let mut lines = Vec::new();
    for (index, tip) in rows.iter().enumerate() {
        if index > 0 {
            lines.push(String::new());
        }
        lines.extend(render_tip(tip));
    }
    Ok(lines.join("\n"))
}

pub fn render_tip_read(data: &Value) -> io::Result<String> {
    let tip = data
        .get("tip")
        .ok_or_else(|| io::Error::other("tip read output requires tip"))?;
    Ok(format!("Marked tip {} as read.", str_field(tip, "id")))
}

pub(super) fn render_tip(tip: &Value) -> Vec<String> {
    let read_marker = if tip.get("is_read").and_then(Value::as_bool).unwrap_or(false) {
        ""
    } else {
        " (unread)"
    };
    let heading = match tip.get("category").and_then(Value::as_str) {
        Some(category) => format!("  [{category}] {}{read_marker}", str_field(tip, "id")),
        None => format!("  {}{read_marker}", str_field(tip, "id")),
    };
    vec![heading, format!("    {}", str_field(tip, "content"))]
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::render_tip_list;

    #[test]
    fn unread_tips_are_marked() {
        let rendered = render_tip_list(&json!({
            "unread_only": false,
            "rows": [{
                "id": "tip_1",
                "content": "Consider limiting non-essential activities.",
                "category": "budgeting",
                "created_at": "2023-04-20T00:00:00Z",
                "is_read": false,
                "relevance_score": 0.85
            }]
        }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("[budgeting] tip_1 (unread)"));
            assert!(text.contains("non-essential"));
        }
    }

    #[test]
    fn empty_unread_list_is_caught_up() {
        let rendered = render_tip_list(&json!({ "unread_only": true, "rows": [] }));
        assert!(rendered.is_ok());
        if let Ok(text) = rendered {
            assert!(text.contains("all caught up"));
        }
    }
}

use std::collections::HashSet;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::contracts::types::{ImportIssue, ImportSummary};
use crate::domain::date::parse_iso_date;
use crate::domain::kinds::spellings;
use crate::domain::validate::MAX_AMOUNT;
use crate::domain::{Category, NewTransaction, Period};
use crate::import::parse::ParsedRow;
use crate::{ClientError, ClientResult};

const MAX_AMOUNT_SCALE: u32 = 2;

#[derive(Debug, Clone)]
pub(crate) struct ValidatedRows {
    pub(crate) rows: Vec<NewTransaction>,
    pub(crate) summary: ImportSummary,
}

/// Validates every row and collects all issues. Any issue fails the batch.
pub(crate) fn validate_rows(parsed_rows: Vec<ParsedRow>) -> ClientResult<ValidatedRows> {
    let total_rows = parsed_rows.len();
    let mut rows = Vec::new();
    let mut issues = Vec::new();

    for raw in parsed_rows {
        let mut row_issues = Vec::new();
        let row = raw.row;

        let date = validate_date(row, raw.date, &mut row_issues);
        let amount = validate_amount(row, raw.amount, &mut row_issues);
        let description = validate_description(row, raw.description, &mut row_issues);
        let category = validate_category(row, raw.category, &mut row_issues);
        let is_income = validate_flag(row, "is_income", raw.is_income, &mut row_issues);
        let is_recurring = validate_flag(row, "is_recurring", raw.is_recurring, &mut row_issues);
        let recurrence = validate_recurrence(row, raw.recurrence, is_recurring, &mut row_issues);

        match (date, amount, description, category) {
            (Some(date), Some(amount), Some(description), Some(category))
                if row_issues.is_empty() =>
            {
                rows.push(NewTransaction {
                    amount,
                    date,
                    description,
                    category,
                    // Income rows are flagged explicitly or by category.
                    is_income: is_income.unwrap_or(category == Category::Income),
                    recurrence,
                });
            }
            _ => issues.extend(row_issues),
        }
    }

    let summary = ImportSummary {
        rows_read: total_rows as i64,
        rows_valid: rows.len() as i64,
        rows_invalid: issues
            .iter()
            .map(|issue| issue.row)
            .collect::<HashSet<i64>>()
            .len() as i64,
        inserted: 0,
    };

    if !issues.is_empty() {
        return Err(ClientError::import_validation_failed(summary, issues));
    }

    Ok(ValidatedRows { rows, summary })
}

fn issue(
    row: i64,
    field: &str,
    code: &str,
    description: String,
    expected: &str,
    received: &str,
) -> ImportIssue {
    ImportIssue {
        row,
        field: field.to_string(),
        code: code.to_string(),
        description,
        expected: Some(expected.to_string()),
        received: Some(received.to_string()),
    }
}

fn missing(row: i64, field: &str, expected: &str) -> ImportIssue {
    issue(
        row,
        field,
        "missing_required_field",
        format!("{field} must be present and non-empty."),
        expected,
        "",
    )
}

fn validate_date(row: i64, value: Option<String>, issues: &mut Vec<ImportIssue>) -> Option<NaiveDate> {
    let Some(candidate) = normalize_optional(value) else {
        issues.push(missing(row, "date", "YYYY-MM-DD"));
        return None;
    };

    let parsed = parse_iso_date(&candidate);
    if parsed.is_none() {
        issues.push(issue(
            row,
            "date",
            "invalid_date",
            format!("date must be a calendar date in YYYY-MM-DD form; got \"{candidate}\""),
            "YYYY-MM-DD",
            &candidate,
        ));
    }
    parsed
}

fn validate_amount(row: i64, value: Option<String>, issues: &mut Vec<ImportIssue>) -> Option<Decimal> {
    const EXPECTED: &str = "non-negative number with <= 2 decimal places (e.g. 85.42)";
    let Some(candidate) = normalize_optional(value) else {
        issues.push(missing(row, "amount", EXPECTED));
        return None;
    };

    let parsed = Decimal::from_str(&candidate).or_else(|_| Decimal::from_scientific(&candidate));
    let Ok(amount) = parsed else {
        issues.push(issue(
            row,
            "amount",
            "invalid_number",
            format!("amount must be numeric; got \"{candidate}\""),
            EXPECTED,
            &candidate,
        ));
        return None;
    };

    if amount.is_sign_negative() && !amount.is_zero() {
        issues.push(issue(
            row,
            "amount",
            "negative_amount",
            "amount must not be negative; mark inflows with is_income instead.".to_string(),
            EXPECTED,
            &candidate,
        ));
        return None;
    }

    if amount > MAX_AMOUNT {
        issues.push(issue(
            row,
            "amount",
            "amount_out_of_range",
            format!("amount must not exceed {MAX_AMOUNT}; got {candidate}."),
            EXPECTED,
            &candidate,
        ));
        return None;
    }

    let scale = amount.normalize().scale();
    if scale > MAX_AMOUNT_SCALE {
        issues.push(issue(
            row,
            "amount",
            "invalid_amount_scale",
            format!("amount must use at most 2 decimal places; got {scale} decimal places."),
            EXPECTED,
            &candidate,
        ));
        return None;
    }

    Some(amount)
}

fn validate_description(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<String> {
    let normalized = normalize_optional(value);
    if normalized.is_none() {
        issues.push(missing(row, "description", "non-empty string"));
    }
    normalized
}

fn validate_category(
    row: i64,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<Category> {
    let expected = spellings(&Category::ALL, Category::as_str);
    let Some(candidate) = normalize_optional(value) else {
        issues.push(missing(row, "category", &expected));
        return None;
    };

    let parsed = Category::parse(&candidate.to_ascii_lowercase());
    if parsed.is_none() {
        issues.push(issue(
            row,
            "category",
            "unknown_category",
            format!("category \"{candidate}\" is not a known category."),
            &expected,
            &candidate,
        ));
    }
    parsed
}

/// Absent flags stay `None` so callers can apply their own default.
fn validate_flag(
    row: i64,
    field: &str,
    value: Option<String>,
    issues: &mut Vec<ImportIssue>,
) -> Option<bool> {
    let candidate = normalize_optional(value)?;
    match candidate.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => {
            issues.push(issue(
                row,
                field,
                "invalid_boolean",
                format!("{field} must be true or false; got \"{candidate}\""),
                "true|false",
                &candidate,
            ));
            None
        }
    }
}

fn validate_recurrence(
    row: i64,
    value: Option<String>,
    is_recurring: Option<bool>,
    issues: &mut Vec<ImportIssue>,
) -> Option<Period> {
    let expected = spellings(&Period::ALL, Period::as_str);
    let recurrence = match normalize_optional(value) {
        None => None,
        Some(candidate) => {
            let parsed = Period::parse(&candidate.to_ascii_lowercase());
            if parsed.is_none() {
                issues.push(issue(
                    row,
                    "recurrence",
                    "unknown_recurrence",
                    format!("recurrence \"{candidate}\" is not a known period."),
                    &expected,
                    &candidate,
                ));
                return None;
            }
            parsed
        }
    };

    if is_recurring == Some(true) && recurrence.is_none() {
        issues.push(missing(row, "recurrence", &expected));
        return None;
    }
    if is_recurring == Some(false) && recurrence.is_some() {
        issues.push(issue(
            row,
            "recurrence",
            "unexpected_recurrence",
            "recurrence must be empty when is_recurring is false.".to_string(),
            "",
            recurrence.map(Period::as_str).unwrap_or_default(),
        ));
        return None;
    }
    recurrence
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    let raw = value?;
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::validate_rows;
    use crate::domain::{Category, Period};
    use crate::import::parse::ParsedRow;

    fn row(index: i64, amount: &str, category: &str) -> ParsedRow {
        ParsedRow {
            row: index,
            date: Some("2023-04-02".to_string()),
            amount: Some(amount.to_string()),
            description: Some("Grocery shopping".to_string()),
            category: Some(category.to_string()),
            ..ParsedRow::default()
        }
    }

    #[test]
    fn valid_rows_become_new_transactions() {
        let mut salary = row(2, "4500", "income");
        salary.recurrence = Some("Monthly".to_string());
        let validated = validate_rows(vec![row(1, "85.42", "food"), salary]);
        assert!(validated.is_ok());
        if let Ok(result) = validated {
            assert_eq!(result.rows.len(), 2);
            assert_eq!(result.rows[0].amount, Decimal::new(8542, 2));
            assert!(!result.rows[0].is_income);
            assert_eq!(result.rows[1].category, Category::Income);
            assert!(result.rows[1].is_income);
            assert_eq!(result.rows[1].recurrence, Some(Period::Monthly));
        }
    }

    #[test]
    fn every_bad_row_is_reported() {
        let validated = validate_rows(vec![
            row(1, "85.425", "food"),
            row(2, "-3", "food"),
            row(3, "12", "groceries"),
            row(4, "10", "food"),
        ]);
        assert!(validated.is_err());
        if let Err(error) = validated {
            assert_eq!(error.code, "import_validation_failed");
            let data = error.data.unwrap_or_default();
            assert_eq!(data["summary"]["rows_invalid"], 3);
            assert_eq!(data["issues"][0]["code"], "invalid_amount_scale");
            assert_eq!(data["issues"][1]["code"], "negative_amount");
            assert_eq!(data["issues"][2]["code"], "unknown_category");
        }
    }

    #[test]
    fn amounts_above_one_trillion_are_out_of_range() {
        let validated = validate_rows(vec![
            row(1, "1000000000000000000000000000", "food"),
            row(2, "1000000000000", "food"),
        ]);
        assert!(validated.is_err());
        if let Err(error) = validated {
            let data = error.data.unwrap_or_default();
            assert_eq!(data["summary"]["rows_invalid"], 1);
            assert_eq!(data["issues"][0]["row"], 1);
            assert_eq!(data["issues"][0]["code"], "amount_out_of_range");
        }
    }

    #[test]
    fn recurring_flag_requires_a_period() {
        let mut recurring = row(1, "1200", "housing");
        recurring.is_recurring = Some("true".to_string());
        let validated = validate_rows(vec![recurring]);
        assert!(validated.is_err());
    }
}

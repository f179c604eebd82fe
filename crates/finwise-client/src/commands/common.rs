use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::domain::date::parse_iso_date;
use crate::domain::kinds::spellings;
use crate::session::FinanceSession;
use crate::{ClientError, ClientResult};

pub(crate) fn open_session(
    home_override: Option<&Path>,
    user_override: Option<&str>,
) -> ClientResult<FinanceSession> {
    FinanceSession::open(home_override, user_override)
}

pub(crate) fn parse_amount(command: &str, flag: &str, raw: &str) -> ClientResult<Decimal> {
    Decimal::from_str(raw.trim()).map_err(|_| {
        ClientError::invalid_argument_for_command(
            &format!("`{flag}` must be a decimal number like 85.42; got `{raw}`."),
            Some(command),
        )
    })
}

pub(crate) fn parse_date(command: &str, flag: &str, raw: &str) -> ClientResult<NaiveDate> {
    parse_iso_date(raw.trim()).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!("`{flag}` must be a calendar date in YYYY-MM-DD form; got `{raw}`."),
            Some(command),
        )
    })
}

/// Parses a wire spelling with the enum's own `parse`, listing the accepted
/// spellings when it fails.
pub(crate) fn parse_choice<T: Copy>(
    command: &str,
    flag: &str,
    raw: &str,
    all: &[T],
    as_str: fn(T) -> &'static str,
    parse: fn(&str) -> Option<T>,
) -> ClientResult<T> {
    parse(raw.trim()).ok_or_else(|| {
        ClientError::invalid_argument_for_command(
            &format!(
                "`{flag}` must be one of: {}; got `{raw}`.",
                spellings(all, as_str)
            ),
            Some(command),
        )
    })
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::{parse_amount, parse_choice, parse_date};
    use crate::domain::Category;

    #[test]
    fn amount_parsing_keeps_exact_cents() {
        let parsed = parse_amount("goal contribute", "<amount>", " 60.10 ");
        assert_eq!(parsed.ok(), Some(Decimal::new(6010, 2)));
        assert!(parse_amount("goal contribute", "<amount>", "sixty").is_err());
    }

    #[test]
    fn choice_errors_list_every_spelling() {
        let parsed = parse_choice(
            "transaction add",
            "--category",
            "groceries",
            &Category::ALL,
            Category::as_str,
            Category::parse,
        );
        assert!(parsed.is_err());
        if let Err(error) = parsed {
            assert_eq!(error.code, "invalid_argument");
            assert!(error.message.contains("housing, food, transportation"));
        }
    }

    #[test]
    fn date_flags_require_iso_dates() {
        assert!(parse_date("budget create", "--start-date", "2023-04-01").is_ok());
        assert!(parse_date("budget create", "--start-date", "04/01/2023").is_err());
    }
}

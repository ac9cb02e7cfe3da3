//! Locale-formatted amount and date normalization shared by every bank layout.

use std::str::FromStr;
use std::sync::LazyLock;

use chrono::{Month, NaiveDate};
use regex::{Captures, Regex};
use rust_decimal::Decimal;

use crate::error::{AmountParseError, DateParseError};

const DAY_FIELD: &str = "day";
const MONTH_FIELD: &str = "month";
const YEAR_FIELD: &str = "year";

/// Two-digit years at or above this value land in the 1900s, the rest in the 2000s
/// (`69` is 1969, `68` is 2068), the same window POSIX `strptime` applies to `%y`.
const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

/// Parses a money column such as `"₦1,234.50"` into an exact decimal.
///
/// Everything except digits, the decimal point and a leading minus sign is dropped before
/// parsing, which gets rid of currency glyphs, spaces and thousands separators. The value is
/// never rounded: inputs carrying more precision than a [`Decimal`] can hold are rejected.
pub fn parse_amount(s: &str) -> Result<Decimal, AmountParseError> {
    static DECIMAL_LITERAL: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^-?(?:\d+(?:\.\d+)?|\.\d+)$").expect("regex"));

    let error = || AmountParseError {
        input: s.to_owned(),
    };

    let mut cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    if !DECIMAL_LITERAL.is_match(&cleaned) {
        return Err(error());
    }
    if let Some(point) = cleaned.find('.') {
        if point == 0 || &cleaned[..point] == "-" {
            cleaned.insert(point, '0');
        }
    }
    Decimal::from_str_exact(&cleaned).map_err(|_| error())
}

/// Parses a statement date, trying each supported layout in priority order:
///
/// 1. `DD/MM/YYYY`
/// 2. `DD-MM-YYYY`
/// 3. `YYYY-MM-DD`
/// 4. `DD/MM/YY`
/// 5. `DD-Mon-YYYY` (`05-Jan-2024`)
/// 6. `DD-Mon-YY` (`05-Jan-24`)
///
/// A layout only wins if the whole string matches it and it names a real calendar day;
/// otherwise the next one is tried. Year widths are strict, so `05-Jan-24` is never read as
/// year 24. Two-digit years are resolved with a pivot at 69.
pub fn parse_date(s: &str) -> Result<NaiveDate, DateParseError> {
    static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
        let day = format!(r"(?P<{DAY_FIELD}>\d{{1,2}})");
        let month = format!(r"(?P<{MONTH_FIELD}>\d{{1,2}})");
        let month_name = format!(r"(?P<{MONTH_FIELD}>[A-Za-z]{{3}})");
        let year = format!(r"(?P<{YEAR_FIELD}>\d{{4}})");
        let short_year = format!(r"(?P<{YEAR_FIELD}>\d{{2}})");
        [
            format!("^{day}/{month}/{year}$"),
            format!("^{day}-{month}-{year}$"),
            format!("^{year}-{month}-{day}$"),
            format!("^{day}/{month}/{short_year}$"),
            format!("^{day}-{month_name}-{year}$"),
            format!("^{day}-{month_name}-{short_year}$"),
        ]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("regex"))
        .collect()
    });

    let trimmed = s.trim();
    DATE_PATTERNS
        .iter()
        .filter_map(|pattern| pattern.captures(trimmed))
        .find_map(|groups| date_from_groups(&groups))
        .ok_or_else(|| DateParseError {
            input: s.to_owned(),
        })
}

fn date_from_groups(groups: &Captures<'_>) -> Option<NaiveDate> {
    let day: u32 = groups[DAY_FIELD].parse().ok()?;
    let month_token = &groups[MONTH_FIELD];
    let month = match month_token.parse::<u32>() {
        Ok(number) => number,
        Err(_) => Month::from_str(month_token).ok()?.number_from_month(),
    };
    let year_token = &groups[YEAR_FIELD];
    let mut year: i32 = year_token.parse().ok()?;
    if year_token.len() == 2 {
        year = expand_two_digit_year(year);
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn expand_two_digit_year(year: i32) -> i32 {
    if year >= TWO_DIGIT_YEAR_PIVOT {
        1900 + year
    } else {
        2000 + year
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn should_parse_grouped_amounts_exactly() {
        assert_eq!(Ok(dec!(1_234_567.89)), parse_amount("1,234,567.89"));
        assert_eq!(Ok(dec!(5_000.00)), parse_amount("5,000.00"));
        assert_eq!(Ok(dec!(0.10)), parse_amount("0.10"));
        assert_eq!(Ok(dec!(0.00)), parse_amount("0.00"));
    }

    #[test]
    fn should_strip_currency_glyphs_and_spaces() {
        assert_eq!(Ok(dec!(1_500.00)), parse_amount("₦1,500.00"));
        assert_eq!(Ok(dec!(1_500.00)), parse_amount(" ₦ 1,500.00 "));
        assert_eq!(Ok(dec!(250.75)), parse_amount("NGN250.75"));
    }

    #[test]
    fn should_keep_the_written_scale() {
        let amount = parse_amount("48,000.00").expect("amount");
        assert_eq!(2, amount.scale());
        assert_eq!("48000.00", amount.to_string());
    }

    #[test]
    fn should_keep_a_leading_minus_sign() {
        assert_eq!(Ok(dec!(-12.50)), parse_amount("-12.50"));
    }

    #[test]
    fn should_accept_a_missing_integer_part() {
        assert_eq!(Ok(dec!(0.00)), parse_amount(",.00"));
    }

    #[test]
    fn should_reject_strings_that_are_not_decimal_literals() {
        for input in ["", "₦", "1.2.3", "abc", "1-2", "--5", "."] {
            assert_eq!(
                Err(AmountParseError {
                    input: input.to_owned()
                }),
                parse_amount(input),
                "input {input:?}"
            );
        }
    }

    #[test]
    fn should_reject_amounts_that_do_not_fit_a_decimal() {
        assert!(parse_amount("92.17777777777777777777777777777777713").is_err());
    }

    #[test]
    fn should_parse_every_supported_date_layout() {
        assert_eq!(Ok(date(2024, 1, 5)), parse_date("05/01/2024"));
        assert_eq!(Ok(date(2024, 1, 5)), parse_date("05-01-2024"));
        assert_eq!(Ok(date(2024, 1, 5)), parse_date("2024-01-05"));
        assert_eq!(Ok(date(2024, 1, 5)), parse_date("05/01/24"));
        assert_eq!(Ok(date(2024, 1, 5)), parse_date("05-Jan-2024"));
        assert_eq!(Ok(date(2024, 1, 12)), parse_date("12-Jan-24"));
    }

    #[test]
    fn should_read_slashed_dates_day_first() {
        assert_eq!(Ok(date(2024, 2, 1)), parse_date("01/02/2024"));
        assert!(parse_date("12/31/2023").is_err());
    }

    #[test]
    fn should_accept_month_names_in_any_case_and_single_digit_days() {
        assert_eq!(Ok(date(2023, 9, 7)), parse_date("07-sep-2023"));
        assert_eq!(Ok(date(2023, 9, 7)), parse_date("7-SEP-2023"));
        assert_eq!(Ok(date(2023, 12, 31)), parse_date(" 31-Dec-23 "));
    }

    #[test]
    fn should_pivot_two_digit_years_at_69() {
        assert_eq!(Ok(date(1969, 12, 31)), parse_date("31/12/69"));
        assert_eq!(Ok(date(1999, 6, 1)), parse_date("01-Jun-99"));
        assert_eq!(Ok(date(2068, 1, 1)), parse_date("01/01/68"));
        assert_eq!(Ok(date(2000, 3, 15)), parse_date("15-Mar-00"));
    }

    #[test]
    fn should_not_read_a_short_year_as_a_full_year() {
        assert_ne!(Ok(date(24, 1, 12)), parse_date("12-Jan-24"));
        assert!(parse_date("12-Jan-024").is_err());
    }

    #[test]
    fn should_name_the_input_when_no_layout_matches() {
        for input in ["2024/01/12", "31-Feb-2024", "12-Foo-2024", "", "12 Jan 2024"] {
            let err = parse_date(input).expect_err("unparseable date");
            assert_eq!(input, err.input);
            assert_eq!(format!("Could not parse date: {input}"), err.to_string());
        }
    }
}

use chrono::NaiveDate;

/// Get the current local calendar date
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Get yesterday's local calendar date
pub fn yesterday() -> NaiveDate {
    previous_day(today())
}

/// The calendar day before `date`, crossing month and year boundaries
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    // pred_opt is only None at NaiveDate::MIN, which the wall clock never produces
    date.pred_opt().expect("date underflow")
}

/// Check whether a stored date is today's date
pub fn is_today(date: Option<NaiveDate>) -> bool {
    date == Some(today())
}

/// Check whether a stored date is yesterday's date
pub fn is_yesterday(date: Option<NaiveDate>) -> bool {
    date == Some(yesterday())
}

/// Parse a date string in ISO 8601 format (YYYY-MM-DD)
pub fn parse_date(date_str: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
}

/// Format a date as an ISO 8601 string (YYYY-MM-DD, zero-padded)
pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yesterday_is_one_day_before_today() {
        assert_eq!(yesterday().succ_opt().unwrap(), today());
    }

    #[test]
    fn test_previous_day_crosses_month_boundary() {
        let first_of_march = parse_date("2023-03-01").unwrap();
        assert_eq!(previous_day(first_of_march), parse_date("2023-02-28").unwrap());
    }

    #[test]
    fn test_previous_day_leap_year() {
        let first_of_march = parse_date("2024-03-01").unwrap();
        assert_eq!(previous_day(first_of_march), parse_date("2024-02-29").unwrap());
    }

    #[test]
    fn test_previous_day_crosses_year_boundary() {
        let new_years = parse_date("2025-01-01").unwrap();
        assert_eq!(previous_day(new_years), parse_date("2024-12-31").unwrap());
    }

    #[test]
    fn test_is_today() {
        assert!(is_today(Some(today())));
        assert!(!is_today(Some(yesterday())));
        assert!(!is_today(None));
    }

    #[test]
    fn test_is_yesterday() {
        assert!(is_yesterday(Some(yesterday())));
        assert!(!is_yesterday(Some(today())));
        assert!(!is_yesterday(None));
    }

    #[test]
    fn test_format_is_zero_padded() {
        let date = parse_date("2024-06-03").unwrap();
        assert_eq!(format_date(date), "2024-06-03");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("not-a-date").is_err());
        assert!(parse_date("2024-13-01").is_err());
    }
}

use time::{macros::format_description, Date};

use crate::error::ApiError;

/// Calendar dates travel as plain `YYYY-MM-DD` strings (they are the natural
/// key of meal plans). Writes reject anything that is not a real date; reads
/// treat unknown strings as dates with no records.
pub fn validate(date: &str) -> Result<(), ApiError> {
    Date::parse(date, format_description!("[year]-[month]-[day]"))
        .map(|_| ())
        .map_err(|_| ApiError::Validation(format!("invalid date: {date}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_calendar_dates() {
        assert!(validate("2024-01-01").is_ok());
        assert!(validate("2024-02-29").is_ok());
    }

    #[test]
    fn rejects_malformed_dates() {
        assert!(validate("2024-13-40").is_err());
        assert!(validate("2023-02-29").is_err());
        assert!(validate("yesterday").is_err());
        assert!(validate("").is_err());
    }
}

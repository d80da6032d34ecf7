// Utility functions
use chrono::{DateTime, NaiveDate, Utc};
use std::path::Path;
use std::time::SystemTime;

const DATE_TOKEN_LEN: usize = 10;

/// Finds the first `20YY[-_]MM[-_]DD` token in a file name and parses it.
///
/// Only the first syntactic match is considered: a name like
/// `eod_2024-13-40.csv` yields `None` even if a valid date follows later.
pub fn filename_date(name: &str) -> Option<NaiveDate> {
    let token = find_date_token(name)?;
    let normalized = token.replace('_', "-");
    NaiveDate::parse_from_str(&normalized, "%Y-%m-%d").ok()
}

/// Returns the raw date token as it appears in the name.
pub fn find_date_token(name: &str) -> Option<&str> {
    let bytes = name.as_bytes();
    if bytes.len() < DATE_TOKEN_LEN {
        return None;
    }
    (0..=bytes.len() - DATE_TOKEN_LEN)
        .find(|&i| is_date_token(&bytes[i..i + DATE_TOKEN_LEN]))
        .map(|i| &name[i..i + DATE_TOKEN_LEN])
}

// 20[0-9]{2}[-_][01][0-9][-_][0-3][0-9]
fn is_date_token(b: &[u8]) -> bool {
    let sep = |c: u8| c == b'-' || c == b'_';
    b[0] == b'2'
        && b[1] == b'0'
        && b[2].is_ascii_digit()
        && b[3].is_ascii_digit()
        && sep(b[4])
        && matches!(b[5], b'0' | b'1')
        && b[6].is_ascii_digit()
        && sep(b[7])
        && matches!(b[8], b'0'..=b'3')
        && b[9].is_ascii_digit()
}

/// Lowercased extension of a path, without the dot.
pub fn extension_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
}

pub fn to_utc(time: SystemTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dash_and_underscore_tokens() {
        assert_eq!(
            filename_date("eod_2024-02-10.csv"),
            NaiveDate::from_ymd_opt(2024, 2, 10)
        );
        assert_eq!(
            filename_date("eod_2024_02_10.csv"),
            NaiveDate::from_ymd_opt(2024, 2, 10)
        );
        assert_eq!(
            filename_date("2023-12_31-export.csv"),
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
    }

    #[test]
    fn invalid_calendar_date_is_none() {
        assert_eq!(find_date_token("eod_2024-13-40.csv"), None);
        assert_eq!(find_date_token("eod_2024-02-31.csv"), Some("2024-02-31"));
        assert_eq!(filename_date("eod_2024-02-31.csv"), None);
    }

    #[test]
    fn no_token() {
        assert_eq!(filename_date("latest_eod.csv"), None);
        assert_eq!(filename_date("RELI_20240105.pdf"), None);
        assert_eq!(filename_date(""), None);
    }

    #[test]
    fn non_ascii_names_do_not_panic() {
        assert_eq!(filename_date("₹₹₹₹_2024-01-05.csv"), NaiveDate::from_ymd_opt(2024, 1, 5));
    }

    #[test]
    fn extension_is_lowercased() {
        assert_eq!(extension_lower(Path::new("a/B.PDF")), Some("pdf".into()));
        assert_eq!(extension_lower(Path::new("noext")), None);
    }
}

//! core/tags/util.rs
//! Small parsing helpers shared by tag reading and filename normalization.

/// Parse strings like:
/// - "3" -> (Some(3), None)
/// - "3/12" -> (Some(3), Some(12))
/// - "03" -> (Some(3), None)
pub(crate) fn parse_slash_pair_u32(s: Option<&str>) -> (Option<u32>, Option<u32>) {
    let Some(s) = s else { return (None, None) };
    let s = s.trim();
    if s.is_empty() {
        return (None, None);
    }

    let mut parts = s.split('/');
    let a = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    let b = parts.next().and_then(|p| p.trim().parse::<u32>().ok());
    (a, b)
}

/// Pull the year out of a date-ish string ("1999", "1999-04-01", "1999-04").
pub(crate) fn parse_year(s: &str) -> Option<u32> {
    let s = s.trim();
    let digits: String = s.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.len() != 4 {
        return None;
    }
    digits.parse().ok()
}

/// Replace the leading year of `date`, keeping month/day:
/// `with_year("1999-04-01", 2001)` is `Some("2001-04-01")`.
///
/// `None` when `date` does not start with a year.
pub(crate) fn with_year(date: &str, year: u32) -> Option<String> {
    let date = date.trim();
    parse_year(date)?;
    Some(format!("{year:04}{}", &date[4..]))
}

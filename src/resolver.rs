// Header-name based field lookup over CSV rows with inconsistent headers.
use crate::model::Row;

/// Headers that identify the instrument symbol column.
pub const SYMBOL_HEADERS: &[&str] = &["symbol", "ticker", "securitycode", "security code", "scrip"];

/// Headers that identify the company name / description column.
pub const COMPANY_HEADERS: &[&str] = &[
    "description",
    "company",
    "companyname",
    "nameofthecompany",
    "name",
    "description of announcement",
];

fn header_key(header: &str) -> String {
    header.trim().to_lowercase()
}

/// Returns the value of the first candidate header present in the row.
///
/// Candidate order wins over column order. Header text is compared trimmed
/// and case-insensitively. A matched column whose value is missing yields
/// `None` without trying later candidates.
pub fn pick<'a>(row: &'a Row, candidates: &[&str]) -> Option<&'a str> {
    for candidate in candidates {
        let wanted = candidate.trim().to_lowercase();
        if let Some((_, value)) = row.entries().find(|(h, _)| header_key(h) == wanted) {
            return value.map(str::trim);
        }
    }
    None
}

/// Which column positions carry the symbol and the company name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnRoles {
    pub symbol: Option<usize>,
    pub company: Option<usize>,
}

impl ColumnRoles {
    /// Resolves roles from the header list. The first recognized header in
    /// column order wins; with no recognized header at all, the first column
    /// stands in for the symbol and the second for the company.
    pub fn from_headers<S: AsRef<str>>(headers: &[S]) -> Self {
        let find = |names: &[&str]| {
            headers.iter().position(|h| {
                let key = header_key(h.as_ref());
                names.iter().any(|n| *n == key)
            })
        };
        let symbol = find(SYMBOL_HEADERS).or((!headers.is_empty()).then_some(0));
        let company = find(COMPANY_HEADERS).or((headers.len() >= 2).then_some(1));
        Self { symbol, company }
    }

    pub fn from_row(row: &Row) -> Self {
        let headers: Vec<&str> = row.entries().map(|(h, _)| h).collect();
        Self::from_headers(&headers)
    }

    /// Symbol value of a row, trimmed, when present and non-empty.
    pub fn symbol<'a>(&self, row: &'a Row) -> Option<&'a str> {
        Self::cell(row, self.symbol)
    }

    /// Company value of a row, trimmed, when present and non-empty.
    pub fn company<'a>(&self, row: &'a Row) -> Option<&'a str> {
        Self::cell(row, self.company)
    }

    fn cell(row: &Row, index: Option<usize>) -> Option<&str> {
        let (_, value) = row.entries().nth(index?)?;
        value.map(str::trim).filter(|v| !v.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pick_is_case_and_whitespace_insensitive_on_headers() {
        let row = Row::from_pairs([(" PRICE ", "2500"), ("Beta", "1.1")]);
        assert_eq!(pick(&row, &["Price"]), Some("2500"));
        assert_eq!(pick(&row, &["beta"]), Some("1.1"));
        assert_eq!(pick(&row, &["Close"]), None);
    }

    #[test]
    fn pick_prefers_candidate_order_over_column_order() {
        let row = Row::from_pairs([("Close", "10"), ("Price", "20")]);
        assert_eq!(pick(&row, &["Price", "Close"]), Some("20"));
        assert_eq!(pick(&row, &["Close", "Price"]), Some("10"));
    }

    #[test]
    fn pick_trims_values_and_reports_missing_cells() {
        let row = Row::new(vec![
            ("Symbol".into(), Some("  TCS ".into())),
            ("Price".into(), None),
        ]);
        assert_eq!(pick(&row, &["symbol"]), Some("TCS"));
        assert_eq!(pick(&row, &["Price", "Symbol"]), None);
    }

    #[test]
    fn roles_use_recognized_headers() {
        let roles = ColumnRoles::from_headers(&["Rank", "Security Code", "Company"]);
        assert_eq!(roles.symbol, Some(1));
        assert_eq!(roles.company, Some(2));
    }

    #[test]
    fn roles_fall_back_to_column_position() {
        let roles = ColumnRoles::from_headers(&["Code", "Title", "Close"]);
        assert_eq!(roles, ColumnRoles { symbol: Some(0), company: Some(1) });

        let single = ColumnRoles::from_headers(&["Code"]);
        assert_eq!(single, ColumnRoles { symbol: Some(0), company: None });

        let none: [&str; 0] = [];
        assert_eq!(
            ColumnRoles::from_headers(&none),
            ColumnRoles { symbol: None, company: None }
        );
    }

    #[test]
    fn role_cells_skip_blank_values() {
        let row = Row::from_pairs([("Symbol", "  "), ("Description", "Infosys")]);
        let roles = ColumnRoles::from_row(&row);
        assert_eq!(roles.symbol(&row), None);
        assert_eq!(roles.company(&row), Some("Infosys"));
    }
}

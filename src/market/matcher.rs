use crate::model::Row;
use crate::normalizer::normalize_text;
use crate::resolver::ColumnRoles;

/// A user-supplied ticker or company string in the forms the tiers compare.
#[derive(Debug, Clone)]
pub struct TickerQuery {
    pub raw: String,
    pub upper: String,
    pub normalized: String,
    pub lower: String,
    pub tokens: Vec<String>,
}

impl TickerQuery {
    pub fn new(input: &str) -> Self {
        let raw = input.trim().to_string();
        let tokens = raw
            .split(|c: char| !c.is_ascii_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect();
        Self {
            upper: raw.to_uppercase(),
            normalized: normalize_text(&raw),
            lower: raw.to_lowercase(),
            tokens,
            raw,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }
}

/// One matching strategy; sees the row's symbol and company cells.
pub type Tier = fn(&TickerQuery, Option<&str>, Option<&str>) -> bool;

/// Tiers in the order they are tried.
pub const TIERS: [(&str, Tier); 5] = [
    ("exact", exact_symbol),
    ("normalized", normalized_symbol),
    ("symbol-substring", symbol_substring),
    ("company-substring", company_substring),
    ("company-token", company_token),
];

pub fn exact_symbol(q: &TickerQuery, symbol: Option<&str>, _company: Option<&str>) -> bool {
    symbol.is_some_and(|s| s.to_uppercase() == q.upper)
}

pub fn normalized_symbol(q: &TickerQuery, symbol: Option<&str>, _company: Option<&str>) -> bool {
    !q.normalized.is_empty() && symbol.is_some_and(|s| normalize_text(s) == q.normalized)
}

pub fn symbol_substring(q: &TickerQuery, symbol: Option<&str>, _company: Option<&str>) -> bool {
    symbol.is_some_and(|s| {
        s.to_uppercase().contains(&q.upper)
            || (!q.normalized.is_empty() && normalize_text(s).contains(&q.normalized))
    })
}

pub fn company_substring(q: &TickerQuery, _symbol: Option<&str>, company: Option<&str>) -> bool {
    company.is_some_and(|c| c.to_lowercase().contains(&q.lower))
}

pub fn company_token(q: &TickerQuery, _symbol: Option<&str>, company: Option<&str>) -> bool {
    company.is_some_and(|c| {
        let c = c.to_lowercase();
        q.tokens.iter().any(|t| c.contains(t.as_str()))
    })
}

/// Finds the row for `query`: the first tier with any hit wins, and within a
/// tier the earliest row in file order. Returns the row index and tier name.
pub fn find_row(rows: &[Row], query: &TickerQuery) -> Option<(usize, &'static str)> {
    if query.is_empty() {
        return None;
    }
    let roles = rows.first().map(ColumnRoles::from_row)?;
    let cells: Vec<_> = rows
        .iter()
        .map(|r| (roles.symbol(r), roles.company(r)))
        .collect();

    TIERS.iter().find_map(|(name, tier)| {
        cells
            .iter()
            .position(|(sym, comp)| tier(query, *sym, *comp))
            .map(|i| (i, *name))
    })
}

/// Convenience wrapper over [`find_row`] returning the row itself.
pub fn match_row<'a>(rows: &'a [Row], query: &TickerQuery) -> Option<&'a Row> {
    find_row(rows, query).map(|(i, _)| &rows[i])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Row> {
        vec![
            Row::from_pairs([("Symbol", "TCS"), ("Description", "Tata Consultancy")]),
            Row::from_pairs([("Symbol", "INFY"), ("Description", "Infosys")]),
        ]
    }

    fn lookup(rows: &[Row], q: &str) -> Option<(usize, &'static str)> {
        find_row(rows, &TickerQuery::new(q))
    }

    #[test]
    fn exact_symbol_matches_case_insensitively() {
        let rows = rows();
        assert_eq!(lookup(&rows, "TCS"), Some((0, "exact")));
        assert_eq!(lookup(&rows, "tcs"), Some((0, "exact")));
        assert_eq!(lookup(&rows, "  infy "), Some((1, "exact")));
    }

    #[test]
    fn company_substring_and_not_found() {
        let rows = rows();
        assert_eq!(lookup(&rows, "Tata"), Some((0, "company-substring")));
        assert_eq!(lookup(&rows, "xyz"), None);
    }

    #[test]
    fn normalized_tier_ignores_punctuation() {
        let rows = vec![
            Row::from_pairs([("Symbol", "M&M"), ("Description", "Mahindra")]),
            Row::from_pairs([("Symbol", "BAJAJ-AUTO"), ("Description", "Bajaj Auto")]),
        ];
        assert_eq!(lookup(&rows, "mm"), Some((0, "normalized")));
        assert_eq!(lookup(&rows, "BAJAJAUTO"), Some((1, "normalized")));
    }

    #[test]
    fn symbol_substring_tier() {
        let rows = vec![
            Row::from_pairs([("Symbol", "HDFCBANK"), ("Description", "HDFC Bank")]),
            Row::from_pairs([("Symbol", "HDFC"), ("Description", "Housing Dev")]),
        ];
        // exact beats an earlier substring hit
        assert_eq!(lookup(&rows, "hdfc"), Some((1, "exact")));
        assert_eq!(lookup(&rows, "BANK"), Some((0, "symbol-substring")));
    }

    #[test]
    fn symbol_substring_tier_on_normalized_forms() {
        let rows = vec![Row::from_pairs([("Symbol", "BAJAJ-AUTO"), ("Description", "Bajaj Auto")])];
        // only matches once the hyphen is stripped from the symbol
        assert_eq!(lookup(&rows, "JAJAU"), Some((0, "symbol-substring")));
    }

    #[test]
    fn token_tier_matches_any_word() {
        let rows = rows();
        assert_eq!(lookup(&rows, "infosys ltd"), Some((1, "company-token")));
        assert_eq!(lookup(&rows, "consultancy-services"), Some((0, "company-token")));
    }

    #[test]
    fn first_row_in_file_order_wins_within_a_tier() {
        let rows = vec![
            Row::from_pairs([("Symbol", "A1"), ("Description", "Alpha Steel")]),
            Row::from_pairs([("Symbol", "B1"), ("Description", "Beta Steel")]),
        ];
        assert_eq!(lookup(&rows, "steel"), Some((0, "company-substring")));
    }

    #[test]
    fn punctuation_only_query_does_not_match_everything() {
        let rows = rows();
        assert_eq!(lookup(&rows, "--"), None);
        assert_eq!(lookup(&rows, "   "), None);
    }

    #[test]
    fn unrecognized_headers_fall_back_to_first_two_columns() {
        let rows = vec![Row::from_pairs([("Code", "WIPRO"), ("Title", "Wipro Limited")])];
        assert_eq!(lookup(&rows, "wipro"), Some((0, "exact")));
        assert_eq!(lookup(&rows, "limited"), Some((0, "company-substring")));
    }

    #[test]
    fn empty_dataset_has_no_match() {
        assert!(match_row(&[], &TickerQuery::new("TCS")).is_none());
    }

    #[test]
    fn match_row_returns_the_row() {
        let rows = rows();
        let row = match_row(&rows, &TickerQuery::new("Infosys")).unwrap();
        assert_eq!(row, &rows[1]);
    }
}

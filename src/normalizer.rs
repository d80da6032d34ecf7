// Total coercions from raw CSV text to typed values. None of these fail;
// anything unparseable comes back as `None`.

/// Characters and markers stripped before numeric parsing.
/// `Cr` and `L` are removed wherever they occur, not only as suffixes.
const NUMBER_NOISE: [&str; 6] = [",", "%", "₹", "$", "Cr", "L"];

pub fn to_number(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    if raw.is_empty() {
        return None;
    }
    let cleaned = NUMBER_NOISE
        .iter()
        .fold(raw.to_string(), |acc, noise| acc.replace(noise, ""));
    let value: f64 = cleaned.trim().parse().ok()?;
    value.is_finite().then_some(value)
}

/// Parses only plain runs of decimal digits ("42", not "+42" or "4.2").
pub fn to_integer(raw: Option<&str>) -> Option<i64> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    trimmed.parse().ok()
}

/// Keeps ASCII letters and digits, uppercased. `"RELI-ANCE"` → `"RELIANCE"`.
pub fn normalize_text(raw: &str) -> String {
    raw.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

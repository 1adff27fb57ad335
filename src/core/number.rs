//! pt-BR currency/number parsing ("R$ 1.234,56" → 1234.56)

use crate::types::CellValue;

/// Parse a raw cell into a number, `None` when there is nothing numeric.
///
/// Text follows the Brazilian convention: `.` groups thousands and `,` is the
/// decimal separator. Numeric cells pass through unchanged; dates are never
/// amounts.
pub fn parse_number(cell: Option<&CellValue>) -> Option<f64> {
    match cell? {
        CellValue::Number(n) => Some(*n),
        CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        CellValue::Text(s) => parse_text(s),
        CellValue::DateTime(_) => None,
    }
}

/// Parse locale-formatted text such as `"R$ 1.234,56"` or `"-10,5"`
pub fn parse_text(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("none")
    {
        return None;
    }

    let normalized: String = trimmed
        .replace("R$", "")
        .replace("r$", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '%' && *c != '.')
        .map(|c| if c == ',' { '.' } else { c })
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    normalized.parse::<f64>().ok()
}

/// Absolute value rounded to cents, `None` when that rounds to zero.
///
/// This is the threshold that gates row inclusion: `-0.0049` is dropped while
/// `-0.005` becomes `0.01`.
pub fn to_positive_amount(cell: Option<&CellValue>) -> Option<f64> {
    let parsed = parse_number(cell)?;
    let amount = round_cents(parsed.abs());
    (amount.is_finite() && amount > 0.0).then_some(amount)
}

/// Round to 2 decimal places, ties to even on the exact binary value.
///
/// `10.125` (exactly representable) becomes `10.12`; `2.675` is stored just
/// below the tie and becomes `2.67`.
pub fn round_cents(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.2}", value).parse().unwrap_or(value)
}

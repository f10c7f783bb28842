//! Parsing of Steam's locale-formatted price strings

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_NUMERIC: Regex = Regex::new(r"[^0-9,.]").unwrap();
}

/// Parse a formatted price such as `"1,50 $"`, `"$0.03"` or `"12,34 pуб."`.
///
/// Everything except digits, commas and periods is dropped (currency
/// symbols, non-breaking spaces), commas become decimal points, and the
/// remainder is parsed. Empty or unparseable input yields `None`.
pub fn parse_price(raw: Option<&str>) -> Option<f64> {
    let raw = raw.filter(|s| !s.is_empty())?;
    let clean = NON_NUMERIC.replace_all(raw, "").replace(',', ".");
    // Abbreviated currency names ("pуб.") leave a trailing period behind
    let clean = clean.trim_end_matches('.');

    match clean.parse::<f64>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::debug!("Unparseable price string: {:?}", raw);
            None
        }
    }
}

/// Round to 2 decimal places for presentation
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

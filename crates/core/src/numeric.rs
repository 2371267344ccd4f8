//! Numeric-literal detection for body cells.

use regex::Regex;
use std::sync::OnceLock;

fn numeric_literal_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[+-]?(?:[0-9]+(?:\.[0-9]*)?|\.[0-9]+)(?:[eE][+-]?[0-9]+)?$")
            .expect("numeric literal regex is valid")
    })
}

/// Parse a trimmed string that is entirely a numeric literal.
///
/// Accepts an optional sign, digits with an optional decimal point, and an
/// optional exponent. Words like `inf`/`NaN`, thousands separators and
/// values that overflow `f64` are rejected.
#[must_use]
pub fn parse_numeric_literal(s: &str) -> Option<f64> {
    if !numeric_literal_regex().is_match(s) {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

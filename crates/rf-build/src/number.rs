//! # Number Parsing
//!
//! `number` fields store their value as text. Accepted forms: optional
//! surrounding whitespace, decimal or exponent notation (`42`, `-1.5`,
//! `.5`, `2e3`), and unsigned `0x`/`0o`/`0b` integers. Empty text is not a
//! number, and neither is anything non-finite, since the output value has
//! no representation for it.

use serde_json::Number;

/// Largest integer an `f64` represents exactly (2^53 - 1).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Parse field text into a JSON number.
///
/// Integral results within ±2^53 are returned as integers so that `"42"`
/// builds to `42` rather than `42.0`.
pub fn parse_number(raw: &str) -> Option<Number> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    let parsed = match radix_prefix(text) {
        Some((radix, digits)) => parse_radix(digits, radix)?,
        None => text.parse::<f64>().ok()?,
    };
    to_json_number(parsed)
}

fn radix_prefix(text: &str) -> Option<(u32, &str)> {
    let (prefix, digits) = (text.get(..2)?, text.get(2..)?);
    match prefix {
        "0x" | "0X" => Some((16, digits)),
        "0o" | "0O" => Some((8, digits)),
        "0b" | "0B" => Some((2, digits)),
        _ => None,
    }
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u128::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

fn to_json_number(value: f64) -> Option<Number> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 && value.abs() <= MAX_SAFE_INTEGER {
        return Some(Number::from(value as i64));
    }
    Number::from_f64(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(raw: &str) -> Option<serde_json::Value> {
        parse_number(raw).map(serde_json::Value::Number)
    }

    #[test]
    fn integers_stay_integral() {
        assert_eq!(parse("42"), Some(json!(42)));
        assert_eq!(parse("-7"), Some(json!(-7)));
        assert_eq!(parse("3.0"), Some(json!(3)));
        assert_eq!(parse("2e3"), Some(json!(2000)));
    }

    #[test]
    fn fractions_are_floats() {
        assert_eq!(parse("1.5"), Some(json!(1.5)));
        assert_eq!(parse(".25"), Some(json!(0.25)));
        assert_eq!(parse("-0.125"), Some(json!(-0.125)));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        assert_eq!(parse("  12\n"), Some(json!(12)));
    }

    #[test]
    fn empty_text_is_not_a_number() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn garbage_is_not_a_number() {
        for raw in ["abc", "12abc", "1,000", "1_000", "--1", "0x", "0xZZ", "+0x10", "."] {
            assert_eq!(parse(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn non_finite_values_are_rejected() {
        for raw in ["Infinity", "-Infinity", "inf", "NaN", "1e400"] {
            assert_eq!(parse(raw), None, "{raw:?} should not parse");
        }
    }

    #[test]
    fn radix_prefixes() {
        assert_eq!(parse("0x1F"), Some(json!(31)));
        assert_eq!(parse("0o17"), Some(json!(15)));
        assert_eq!(parse("0B101"), Some(json!(5)));
    }

    #[test]
    fn large_integers_become_floats() {
        let n = parse_number("9007199254740993").unwrap();
        assert!(n.is_f64());
        let n = parse_number("9007199254740991").unwrap();
        assert!(n.is_i64());
    }

    #[test]
    fn negative_zero_is_zero() {
        assert_eq!(parse("-0"), Some(json!(0)));
    }
}

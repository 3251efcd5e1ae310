/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 12/2/26
******************************************************************************/

//! Money parsing for YNAB milliunits
//!
//! YNAB represents amounts as milliunits (1/1000th of the currency unit)
//! rather than cents. Parsing is best-effort: malformed input degrades to 0
//! with a diagnostic note instead of failing the whole import.

use tracing::warn;

/// A value produced by a best-effort parser, optionally carrying a
/// diagnostic note when the input had to be degraded to a default.
///
/// Callers decide whether to surface the note or suppress it, so the
/// parsers themselves stay free of logging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    /// The parsed (or defaulted) value
    pub value: T,
    /// Present when the input could not be parsed cleanly
    pub note: Option<String>,
}

impl<T> Parsed<T> {
    /// Wraps a cleanly parsed value
    pub fn ok(value: T) -> Self {
        Self { value, note: None }
    }

    /// Wraps a degraded default together with a diagnostic note
    pub fn degraded(value: T, note: impl Into<String>) -> Self {
        Self {
            value,
            note: Some(note.into()),
        }
    }

    /// Whether the parser fell back to a default
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.note.is_some()
    }

    /// Unwraps the value, emitting the diagnostic note as a warning if present
    pub fn value_logged(self, context: &str) -> T {
        if let Some(note) = &self.note {
            warn!("{context}: {note}");
        }
        self.value
    }
}

/// Parses a human-formatted money string into milliunits.
///
/// Strips everything except digits, the decimal point and the minus sign,
/// so `"£1,234.56"` parses the same as `"1234.56"`. Without a decimal point
/// the value is whole units (`"12"` → 12000). With one, the first two
/// fractional digits are combined with the integer part; the sign of the
/// integer part governs the whole result (`"-0.05"` → -50). Fractions
/// shorter than two digits are right-padded with zeros, longer ones are
/// truncated.
///
/// Empty or unparseable input yields exactly 0; the latter carries a
/// diagnostic note in the returned [`Parsed`].
pub fn parse_money(text: &str) -> Parsed<i64> {
    let clean: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if text.trim().is_empty() {
        return Parsed::ok(0);
    }

    match try_parse_milliunits(&clean) {
        Some(value) => Parsed::ok(value),
        None => Parsed::degraded(0, format!("could not parse amount '{text}', using 0")),
    }
}

fn try_parse_milliunits(clean: &str) -> Option<i64> {
    match clean.rsplit_once('.') {
        Some((units, fraction)) => {
            let units_value = units.parse::<i64>().ok()?;
            // Right-pad to two digits, or truncate past the second.
            let mut cents_text: String = fraction.chars().take(2).collect();
            while cents_text.len() < 2 {
                cents_text.push('0');
            }
            let cents = cents_text.parse::<i64>().ok()?;
            let fraction_milliunits = cents.checked_mul(10)?;
            let base = units_value.checked_mul(1000)?;
            // The textual sign decides, so "-0.05" subtracts even though
            // the integer part parses to zero.
            if units.starts_with('-') {
                base.checked_sub(fraction_milliunits)
            } else {
                base.checked_add(fraction_milliunits)
            }
        }
        None => clean.parse::<i64>().ok()?.checked_mul(1000),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_units() {
        assert_eq!(parse_money("12").value, 12_000);
        assert_eq!(parse_money("-3").value, -3_000);
        assert_eq!(parse_money("0").value, 0);
    }

    #[test]
    fn test_two_fraction_digits() {
        assert_eq!(parse_money("1234.56").value, 1_234_560);
        assert_eq!(parse_money("0.50").value, 500);
        assert_eq!(parse_money("150.00").value, 150_000);
    }

    #[test]
    fn test_short_fraction_is_padded() {
        // ".5" means fifty cents, not five
        assert_eq!(parse_money("10.5").value, 10_500);
        assert_eq!(parse_money("-10.5").value, -10_500);
    }

    #[test]
    fn test_long_fraction_is_truncated() {
        assert_eq!(parse_money("1.999").value, 1_990);
    }

    #[test]
    fn test_negative_sign_applied_once() {
        assert_eq!(parse_money("-1234.56").value, -1_234_560);
        // Sign comes from the integer text, even when it parses to zero
        assert_eq!(parse_money("-0.05").value, -50);
    }

    #[test]
    fn test_currency_symbols_and_separators_stripped() {
        assert_eq!(parse_money("£1,234.56").value, 1_234_560);
        assert_eq!(parse_money("$-99.99").value, -99_990);
    }

    #[test]
    fn test_empty_input_is_zero_without_note() {
        let parsed = parse_money("");
        assert_eq!(parsed.value, 0);
        assert!(!parsed.is_degraded());
    }

    #[test]
    fn test_garbage_input_is_zero_with_note() {
        let parsed = parse_money("abc");
        assert_eq!(parsed.value, 0);
        assert!(parsed.is_degraded());

        // Two decimal points cannot be parsed either
        assert_eq!(parse_money("1.2.3").value, 0);
    }
}

//! Flow-rate unit conversion between the wire and display forms.
//!
//! The wire form is a signed integer of token smallest-units per second,
//! as recorded on-chain and in the ledger. The display form is a decimal
//! of whole tokens per 30-day month. The two are related by a fixed
//! factor of 2,592,000 seconds.
//!
//! [`per_second_wire`] floor-divides, so converting a monthly amount to
//! the wire and back loses up to one part in 2,592,000. That truncation
//! matches the deployed behavior and is kept as-is.

use alloy_primitives::utils::{parse_units, ParseUnits};
use alloy_primitives::U256;
use serde::Serialize;

use crate::constants::{MONTHLY_DISPLAY_DIGITS, SECONDS_PER_MONTH, TOKEN_DECIMALS};
use crate::error::RateError;

/// Smallest-unit step of one display digit (10^(18-9)).
const DISPLAY_STEP: u128 = 10u128.pow(TOKEN_DECIMALS as u32 - MONTHLY_DISPLAY_DIGITS);

/// 10^9, the number of display fractions per whole token.
const DISPLAY_FRACTIONS: u128 = 10u128.pow(MONTHLY_DISPLAY_DIGITS);

/// A per-second flow rate in token smallest-units, as signed wire integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct FlowRate(i128);

impl FlowRate {
    pub const ZERO: FlowRate = FlowRate(0);

    pub fn new(per_second: i128) -> Self {
        Self(per_second)
    }

    /// Parse the ledger's string-encoded wire integer.
    pub fn from_wire(wire: &str) -> Result<Self, RateError> {
        wire.trim()
            .parse::<i128>()
            .map(Self)
            .map_err(|_| RateError::InvalidAmount(wire.to_string()))
    }

    /// The string-encoded wire integer.
    pub fn as_wire(&self) -> String {
        self.0.to_string()
    }

    pub fn per_second(&self) -> i128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Tokens-per-month display form of this rate. See [`monthly_display`].
    pub fn monthly_display(&self) -> String {
        match self.0.checked_mul(SECONDS_PER_MONTH as i128) {
            Some(monthly) => format_tokens(monthly),
            None => "0".to_string(),
        }
    }
}

impl std::fmt::Display for FlowRate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Convert a wire flow rate to its tokens-per-month display form.
///
/// Fails closed: any input that does not parse as an integer (or whose
/// monthly total overflows) yields `"0"` rather than an error, so a bad
/// ledger row renders as a terminated stream instead of breaking the
/// page. The result is rounded half-up to 9 fractional digits with
/// trailing zeros stripped; a whole number has no decimal point.
pub fn monthly_display(wire: &str) -> String {
    match FlowRate::from_wire(wire) {
        Ok(rate) => rate.monthly_display(),
        Err(_) => "0".to_string(),
    }
}

/// Convert a human-entered tokens-per-month decimal to the wire form.
///
/// Scales to smallest units (up to 18 fractional digits) and then
/// floor-divides by 2,592,000. The truncation is intentional; see the
/// module docs.
pub fn per_second_wire(monthly_tokens: &str) -> Result<String, RateError> {
    let trimmed = monthly_tokens.trim();

    let parsed = parse_units(trimmed, TOKEN_DECIMALS)
        .map_err(|_| RateError::InvalidAmount(monthly_tokens.to_string()))?;

    let smallest_units: U256 = match parsed {
        ParseUnits::U256(v) => v,
        ParseUnits::I256(_) => return Err(RateError::Negative),
    };

    let rate = smallest_units / U256::from(SECONDS_PER_MONTH);
    Ok(rate.to_string())
}

/// Render a signed smallest-unit amount as a whole-token decimal,
/// rounded half-up to [`MONTHLY_DISPLAY_DIGITS`] fractional digits.
fn format_tokens(smallest_units: i128) -> String {
    let negative = smallest_units < 0;
    let abs = smallest_units.unsigned_abs();

    // Round to display precision; abs is bounded well below u128::MAX.
    let rounded = (abs + DISPLAY_STEP / 2) / DISPLAY_STEP;
    let whole = rounded / DISPLAY_FRACTIONS;
    let frac = rounded % DISPLAY_FRACTIONS;

    let sign = if negative && rounded > 0 { "-" } else { "" };

    if frac == 0 {
        return format!("{sign}{whole}");
    }

    let frac_digits = format!("{frac:09}");
    let frac_digits = frac_digits.trim_end_matches('0');
    format!("{sign}{whole}.{frac_digits}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_round_trips_exactly() {
        assert_eq!(per_second_wire("0").unwrap(), "0");
        assert_eq!(monthly_display("0"), "0");
    }

    #[test]
    fn test_non_numeric_display_fails_closed() {
        assert_eq!(monthly_display("not a number"), "0");
        assert_eq!(monthly_display(""), "0");
        assert_eq!(monthly_display("12.5"), "0");
    }

    #[test]
    fn test_wire_rejects_invalid_input() {
        assert!(per_second_wire("abc").is_err());
        assert!(per_second_wire("").is_err());
        assert!(per_second_wire("1.2.3").is_err());
        // More fractional digits than the token can represent.
        assert!(per_second_wire("0.0000000000000000001").is_err());
    }

    #[test]
    fn test_wire_rejects_negative_input() {
        assert_eq!(per_second_wire("-5"), Err(RateError::Negative));
    }

    #[test]
    fn test_wire_conversion_floors() {
        // 100 tokens/month = 1e20 / 2_592_000 = 38580246913580.24... per second
        assert_eq!(per_second_wire("100").unwrap(), "38580246913580");
        // 0.0000001 tokens/month = 1e11 / 2_592_000 = 38580.24...
        assert_eq!(per_second_wire("0.0000001").unwrap(), "38580");
    }

    #[test]
    fn test_display_rounds_to_nine_digits_and_strips_zeros() {
        // 38580246913580 * 2_592_000 = 99999999999999360000 units, i.e.
        // 99.99999999999936 tokens; half-up at 9 digits lands on 100
        // with no trailing decimal point.
        assert_eq!(monthly_display("38580246913580"), "100");
        assert_eq!(monthly_display("385802469135802469"), "1000000");

        // 1e9 units/sec is 0.002592 tokens/month; trailing zeros of the
        // 9-digit expansion are stripped.
        assert_eq!(monthly_display("1000000000"), "0.002592");

        // 385 units/sec is 0.00000000099792 tokens/month and rounds up
        // to the smallest display digit.
        assert_eq!(monthly_display("385"), "0.000000001");
    }

    #[test]
    fn test_display_of_tiny_rate_is_zero() {
        // 1 smallest-unit/sec is 2.592e-12 tokens/month, under display precision.
        assert_eq!(monthly_display("1"), "0");
    }

    #[test]
    fn test_display_of_negative_rate() {
        assert_eq!(monthly_display("-38580246913580"), "-100");
        assert_eq!(monthly_display("-1000000000"), "-0.002592");
    }

    #[test]
    fn test_round_trip_tolerance() {
        // display(wire(x)) must sit within 1e-9 * x plus one part in
        // 2_592_000 of x (floor-division loss).
        for x in ["1", "10", "100", "1234.5", "0.5", "42.000000001"] {
            let wire = per_second_wire(x).unwrap();
            let back: f64 = monthly_display(&wire).parse().unwrap();
            let orig: f64 = x.parse().unwrap();
            let tolerance = 1e-9 * orig + orig / SECONDS_PER_MONTH as f64;
            assert!(
                (back - orig).abs() <= tolerance,
                "{x}: {back} vs {orig} (tolerance {tolerance})"
            );
        }
    }

    #[test]
    fn test_flow_rate_wire_accessors() {
        let rate = FlowRate::from_wire("12345").unwrap();
        assert_eq!(rate.as_wire(), "12345");
        assert_eq!(rate.per_second(), 12345);
        assert!(!rate.is_zero());
        assert!(FlowRate::ZERO.is_zero());
    }
}

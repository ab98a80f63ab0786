//! Display rules for amounts.
//!
//! Amounts travel as plain `f64` because that is what the backend stores and
//! sends; the engine only sums and formats them.
//!
//! # Examples
//!
//! ```rust
//! use engine::{format_compact, format_grouped};
//!
//! assert_eq!(format_compact(999.0), "999");
//! assert_eq!(format_compact(9_999.0), "10.0K");
//! assert_eq!(format_compact(10_000.0), "10K");
//! assert_eq!(format_compact(2_500_000.0), "2.5M");
//! assert_eq!(format_grouped(1_234_567.891), "1,234,567.891");
//! ```

const MILLION: f64 = 1_000_000.0;
const TEN_THOUSAND: f64 = 10_000.0;
const THOUSAND: f64 = 1_000.0;

/// Placeholder for values that are not finite numbers.
const NOT_A_NUMBER: &str = "n/a";

const GROUPED_PLACES: usize = 3;

/// Scale-abbreviated rendering used by the summary cards.
///
/// Thresholds are checked top to bottom, first match wins:
/// - `>= 1,000,000`: millions with one decimal, `M` suffix
/// - `>= 10,000`: thousands rounded to an integer, `K` suffix
/// - `>= 1,000`: thousands with one decimal, `K` suffix
/// - otherwise: [`format_grouped`]
///
/// The jumps at the boundaries (`9,999 -> "10.0K"`, `10,000 -> "10K"`,
/// `999,999 -> "1000K"`) are part of the contract.
///
/// Negative amounts never reach a threshold and are rendered grouped.
#[must_use]
pub fn format_compact(amount: f64) -> String {
    if !amount.is_finite() {
        return NOT_A_NUMBER.to_string();
    }

    if amount >= MILLION {
        format!("{}M", fixed_one(amount / MILLION))
    } else if amount >= TEN_THOUSAND {
        format!("{:.0}K", (amount / THOUSAND).round())
    } else if amount >= THOUSAND {
        format!("{}K", fixed_one(amount / THOUSAND))
    } else {
        format_grouped(amount)
    }
}

/// Full rendering with `,` thousands separators and at most three fraction
/// digits (trailing zeros dropped).
///
/// Rounding works on the shortest decimal form of the amount, half away from
/// zero, so `0.0625` gives `"0.063"` and `1.0005` gives `"1.001"`.
#[must_use]
pub fn format_grouped(amount: f64) -> String {
    if !amount.is_finite() {
        return NOT_A_NUMBER.to_string();
    }

    let (int_part, frac_part) = round_half_expand(&amount.abs().to_string(), GROUPED_PLACES);
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3 + frac_part.len() + 2);
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac_part.is_empty();
    if amount.is_sign_negative() && !is_zero {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// One-decimal rendering where exact ties round away from zero.
///
/// `format!("{:.1}")` rounds ties to even; a tie at one decimal can only
/// happen when `value * 4` is an odd integer (`x.25`, `x.75`), which is
/// exact in binary, so those are rounded by hand.
fn fixed_one(value: f64) -> String {
    let quarters = value * 4.0;
    if quarters.fract() == 0.0 && quarters % 2.0 != 0.0 {
        return format!("{:.1}", (value * 10.0).round() / 10.0);
    }
    format!("{value:.1}")
}

/// Rounds a plain non-negative decimal string to `places` fraction digits,
/// ties away from zero. Returns the integer and fraction digits.
fn round_half_expand(decimal: &str, places: usize) -> (String, String) {
    let (int, frac) = decimal.split_once('.').unwrap_or((decimal, ""));
    if frac.len() <= places {
        return (int.to_string(), frac.to_string());
    }

    let mut kept: Vec<char> = int.chars().chain(frac.chars().take(places)).collect();
    if frac[places..].starts_with(['5', '6', '7', '8', '9']) {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == '9' {
                *digit = '0';
            } else {
                *digit = char::from(*digit as u8 + 1);
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, '1');
        }
    }

    let split = kept.len() - places;
    (
        kept[..split].iter().collect(),
        kept[split..].iter().collect(),
    )
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

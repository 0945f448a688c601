//! Text input normalization.
//!
//! Seeds and roll counts usually arrive as text typed by a person. This module
//! turns that text into validated values, or rejects it before any
//! computation starts.
//!
//! # Seeds
//!
//! [`parse_seed`] accepts:
//!
//! - decimal integers, optionally signed: `"12345"`, `"-1"`
//! - decimals with a fractional part, floored: `"7.9"` → 7, `"-1.5"` → -2
//! - hexadecimal with a `0x`/`0X` prefix: `"0xDEADBEEF"`
//!
//! The integer is then reduced modulo `2^32`, so `"-1"` is `4294967295` and
//! `"4294967296"` is `0`. A result of zero is coerced to 1.
//!
//! # Roll counts
//!
//! [`parse_roll_count`] accepts non-negative decimals (fractions floored) up to
//! [`RollCount::MAX`].
//!
//! ```
//! use seedstep::{parse_roll_count, parse_seed, SeedError};
//!
//! assert_eq!(parse_seed("0x10")?.get(), 16);
//! assert_eq!(parse_seed("0")?.get(), 1);
//! assert_eq!(parse_seed("-1")?.get(), u32::MAX);
//! assert_eq!(parse_roll_count("12")?.get(), 12);
//! assert!(matches!(parse_roll_count("-3"), Err(SeedError::NegativeRollCount { .. })));
//! # Ok::<(), SeedError>(())
//! ```

use crate::{RollCount, Seed, SeedError, SeedResult};

/// A number split into its pieces, before any range handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Numeral<'a> {
    negative: bool,
    radix: u32,
    digits: &'a str,
    has_fraction: bool,
}

fn non_numeric(input: &str) -> SeedError {
    SeedError::NonNumeric {
        input: input.to_owned(),
    }
}

/// Splits `input` into sign, radix, integer digits and whether a non-zero
/// fractional part follows.
fn split_numeral(input: &str) -> SeedResult<Numeral<'_>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(SeedError::Empty);
    }

    if let Some(hex) = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        if hex.is_empty() || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(non_numeric(input));
        }
        return Ok(Numeral {
            negative: false,
            radix: 16,
            digits: hex,
            has_fraction: false,
        });
    }

    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, trimmed.get(1..).unwrap_or_default()),
        Some(b'+') => (false, trimmed.get(1..).unwrap_or_default()),
        _ => (false, trimmed),
    };
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    let fraction_ok = fraction.map_or(true, all_digits);
    // "5." and ".5" are numbers, "." is not.
    let has_digits = !integer.is_empty() || fraction.is_some_and(|f| !f.is_empty());
    if !all_digits(integer) || !fraction_ok || !has_digits {
        return Err(non_numeric(input));
    }

    Ok(Numeral {
        negative,
        radix: 10,
        digits: integer,
        has_fraction: fraction.is_some_and(|f| f.bytes().any(|b| b != b'0')),
    })
}

/// Digit values of an already validated digit string.
fn digit_values(numeral: Numeral<'_>) -> impl Iterator<Item = u32> + '_ {
    numeral
        .digits
        .chars()
        .filter_map(move |c| c.to_digit(numeral.radix))
}

/// Parses seed text and normalizes it into `[1, 2^32 - 1]`.
///
/// See the [module documentation](self) for the accepted forms.
pub fn parse_seed(input: &str) -> SeedResult<Seed> {
    let numeral = split_numeral(input)?;

    // Accumulate modulo 2^32; wrapping arithmetic on u32 is exactly that.
    let mut magnitude: u32 = 0;
    for digit in digit_values(numeral) {
        magnitude = magnitude
            .wrapping_mul(numeral.radix)
            .wrapping_add(digit);
    }

    let value = if numeral.negative {
        // floor(-m.f) = -(m + 1) when the fraction is non-zero.
        let floored = if numeral.has_fraction {
            magnitude.wrapping_add(1)
        } else {
            magnitude
        };
        floored.wrapping_neg()
    } else {
        magnitude
    };

    Ok(Seed::normalize(value))
}

/// Parses a roll count.
///
/// Fractions are floored. Negative values (including `-0.5`, which floors to
/// -1) are rejected, as are values above [`RollCount::MAX`].
pub fn parse_roll_count(input: &str) -> SeedResult<RollCount> {
    let numeral = split_numeral(input)?;
    if numeral.radix != 10 {
        return Err(non_numeric(input));
    }

    let mut value: Option<u64> = Some(0);
    for digit in digit_values(numeral) {
        value = value
            .and_then(|v| v.checked_mul(10))
            .and_then(|v| v.checked_add(u64::from(digit)));
    }

    let is_zero = value == Some(0);
    if numeral.negative && !(is_zero && !numeral.has_fraction) {
        return Err(SeedError::NegativeRollCount {
            value: input.trim().to_owned(),
        });
    }

    match value {
        Some(rolls) => RollCount::new(rolls),
        None => Err(SeedError::RollCountTooLarge {
            value: input.trim().to_owned(),
            max: RollCount::MAX.get(),
        }),
    }
}

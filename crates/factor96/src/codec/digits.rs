//! Base-96 digit expansion of arbitrary-precision integers.
//!
//! ```text
//! n = a₀ + a₁·96 + a₂·96² + … + aₖ·96ᵏ      aᵢ ∈ [0, 96)
//! ```
//!
//! Digits are little-endian: `a₀` is the remainder of the first division
//! by 96. Zero expands to the single digit `[0]`. The expansion has no
//! leading (most-significant) zero digits except for that case, so
//! `to_digits` and `from_digits` are mutually inverse on canonical
//! sequences and `from_digits(to_digits(n)) == n` for every `n ≥ 0`.

use crate::core::constants::{BITS_PER_DIGIT, RING_ORDER};
use crate::core::element::RingElement;
use crate::error::{Error, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::Zero;

/// One base-96 digit.
pub type Digit = RingElement;

const RADIX: u32 = RING_ORDER as u32;

/// Little-endian base-96 digits of `n`; `[0]` for zero.
///
/// # Example
///
/// ```
/// use num_bigint::BigUint;
/// use uor_factor96::codec::{from_digits, to_digits};
///
/// let n = BigUint::from(9999u32);
/// let digits = to_digits(&n);
/// assert_eq!(digits.iter().map(|d| d.value()).collect::<Vec<_>>(), vec![15, 8, 1]);
/// assert_eq!(from_digits(&digits), n);
/// ```
#[must_use]
pub fn to_digits(n: &BigUint) -> Vec<Digit> {
    if n.is_zero() {
        return vec![RingElement::ZERO];
    }
    n.to_radix_le(RADIX)
        .into_iter()
        .map(|d| RingElement::reduce(u64::from(d)))
        .collect()
}

/// Little-endian base-96 digits of a machine integer, by repeated division.
#[must_use]
pub fn to_digits_u64(mut n: u64) -> Vec<Digit> {
    if n == 0 {
        return vec![RingElement::ZERO];
    }
    let mut digits = Vec::with_capacity(10);
    while n > 0 {
        digits.push(RingElement::reduce(n % RADIX as u64));
        n /= RADIX as u64;
    }
    digits
}

/// Digits of a signed integer.
///
/// # Errors
///
/// Returns [`Error::NegativeInput`] if `n < 0`.
pub fn to_digits_signed(n: &BigInt) -> Result<Vec<Digit>> {
    match n.sign() {
        Sign::Minus => Err(Error::NegativeInput(n.clone())),
        Sign::NoSign | Sign::Plus => Ok(to_digits(n.magnitude())),
    }
}

/// `Σ digitᵢ · 96ⁱ`; the empty sequence is zero.
#[must_use]
pub fn from_digits(digits: &[Digit]) -> BigUint {
    let raw: Vec<u8> = digits.iter().map(|d| d.value()).collect();
    // Every byte is below the radix, so the conversion cannot fail.
    BigUint::from_radix_le(&raw, RADIX).unwrap_or_else(BigUint::zero)
}

/// [`from_digits`] over raw bytes, rejecting values `≥ 96`.
///
/// # Errors
///
/// Returns [`Error::DigitOutOfRange`] naming the first bad position.
pub fn from_digits_checked(digits: &[u8]) -> Result<BigUint> {
    let checked = digits
        .iter()
        .enumerate()
        .map(|(position, &digit)| {
            RingElement::new(digit).map_err(|_| Error::DigitOutOfRange { position, digit })
        })
        .collect::<Result<Vec<_>>>()?;
    Ok(from_digits(&checked))
}

/// Number of base-96 digits of `n` (1 for zero).
#[must_use]
pub fn digit_count(n: &BigUint) -> usize {
    if n.is_zero() {
        return 1;
    }
    // Estimate from the bit length, then correct by at most one digit.
    let estimate = ((n.bits() as f64) / BITS_PER_DIGIT).ceil() as u32;
    let radix = BigUint::from(RADIX);
    let mut count = estimate.max(1);
    while count > 1 && radix.pow(count - 1) > *n {
        count -= 1;
    }
    while radix.pow(count) <= *n {
        count += 1;
    }
    count as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(digits: &[Digit]) -> Vec<u8> {
        digits.iter().map(|d| d.value()).collect()
    }

    #[test]
    fn zero_is_single_digit() {
        assert_eq!(values(&to_digits(&BigUint::zero())), vec![0]);
        assert_eq!(values(&to_digits_u64(0)), vec![0]);
        assert_eq!(from_digits(&[]), BigUint::zero());
    }

    #[test]
    fn boundary_values() {
        for n in [0u64, 1, 95, 96, 96 * 96 - 1, 96 * 96, 1000, 9999] {
            let big = BigUint::from(n);
            let digits = to_digits(&big);
            assert_eq!(digits, to_digits_u64(n), "{n}");
            assert_eq!(from_digits(&digits), big, "{n}");
            assert_eq!(digits.len(), digit_count(&big), "{n}");
        }
        assert_eq!(values(&to_digits_u64(96)), vec![0, 1]);
        assert_eq!(values(&to_digits_u64(96 * 96 - 1)), vec![95, 95]);
        assert_eq!(values(&to_digits_u64(1000)), vec![40, 10]);
    }

    #[test]
    fn u64_max_roundtrip() {
        let digits = to_digits_u64(u64::MAX);
        assert_eq!(from_digits(&digits), BigUint::from(u64::MAX));
    }

    #[test]
    fn no_leading_zero_digit() {
        let n = BigUint::from(96u32).pow(40);
        let digits = to_digits(&n);
        assert_eq!(digits.len(), 41);
        assert_eq!(digits.last().map(|d| d.value()), Some(1));
        assert!(digits[..40].iter().all(|d| *d == RingElement::ZERO));
    }

    #[test]
    fn negative_input_rejected() {
        let n = BigInt::from(-5);
        assert_eq!(to_digits_signed(&n), Err(Error::NegativeInput(n)));
        assert_eq!(
            values(&to_digits_signed(&BigInt::from(97)).unwrap()),
            vec![1, 1]
        );
    }

    #[test]
    fn checked_digits() {
        assert_eq!(from_digits_checked(&[15, 8, 1]).unwrap(), BigUint::from(9999u32));
        assert_eq!(
            from_digits_checked(&[1, 96]),
            Err(Error::DigitOutOfRange {
                position: 1,
                digit: 96
            })
        );
    }

    #[test]
    fn digit_count_tracks_powers() {
        let radix = BigUint::from(96u32);
        for k in 1..30u32 {
            let p = radix.pow(k);
            assert_eq!(digit_count(&p), k as usize + 1);
            assert_eq!(digit_count(&(p - 1u32)), k as usize);
        }
    }
}

//! Ring operations over residues mod 96.
//!
//! All operations are total on [`RingElement`] and run in O(1).

use super::constants::RING_ORDER;
use super::element::RingElement;

const N: u16 = RING_ORDER as u16;

/// Addition mod 96.
///
/// # Example
///
/// ```
/// use uor_factor96::{RingElement, ring::add};
///
/// let a = RingElement::new(90).unwrap();
/// let b = RingElement::new(10).unwrap();
/// assert_eq!(add(a, b).value(), 4);
/// ```
#[inline]
#[must_use]
pub const fn add(a: RingElement, b: RingElement) -> RingElement {
    RingElement::reduce(((a.value() as u16 + b.value() as u16) % N) as u64)
}

/// Subtraction mod 96.
#[inline]
#[must_use]
pub const fn sub(a: RingElement, b: RingElement) -> RingElement {
    RingElement::reduce(((a.value() as u16 + N - b.value() as u16) % N) as u64)
}

/// Additive inverse mod 96.
#[inline]
#[must_use]
pub const fn neg(a: RingElement) -> RingElement {
    sub(RingElement::ZERO, a)
}

/// Multiplication mod 96.
///
/// # Example
///
/// ```
/// use uor_factor96::{RingElement, ring::mul};
///
/// let a = RingElement::new(7).unwrap();
/// let b = RingElement::new(11).unwrap();
/// assert_eq!(mul(a, b).value(), 77);
/// assert_eq!(mul(b, b).value(), 25); // 121 mod 96
/// ```
#[inline]
#[must_use]
pub const fn mul(a: RingElement, b: RingElement) -> RingElement {
    RingElement::reduce(((a.value() as u16 * b.value() as u16) % N) as u64)
}

/// Power `a^exp` mod 96 by square-and-multiply.
///
/// `pow(a, 0)` is one for every `a`, zero included.
#[inline]
#[must_use]
pub const fn pow(base: RingElement, exp: u32) -> RingElement {
    let mut result = RingElement::ONE;
    let mut b = base;
    let mut e = exp;
    while e > 0 {
        if e & 1 == 1 {
            result = mul(result, b);
        }
        b = mul(b, b);
        e >>= 1;
    }
    result
}

/// Greatest common divisor (Euclid).
#[inline]
#[must_use]
pub const fn gcd(a: u64, b: u64) -> u64 {
    let mut a = a;
    let mut b = b;
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Returns true if `a` is a unit, i.e. `gcd(a, 96) == 1`.
#[inline]
#[must_use]
pub const fn is_unit(a: RingElement) -> bool {
    gcd(a.value() as u64, RING_ORDER as u64) == 1
}

/// Multiplicative inverse mod 96, if `a` is a unit.
///
/// The unit group has exponent 8, so `a⁻¹ = a⁷` for every unit.
///
/// # Example
///
/// ```
/// use uor_factor96::{RingElement, ring::{mul, mul_inverse}};
///
/// let a = RingElement::new(37).unwrap();
/// let inv = mul_inverse(a).unwrap();
/// assert_eq!(mul(a, inv), RingElement::ONE);
/// assert_eq!(mul_inverse(RingElement::new(2).unwrap()), None);
/// ```
#[inline]
#[must_use]
pub const fn mul_inverse(a: RingElement) -> Option<RingElement> {
    if is_unit(a) {
        Some(pow(a, 7))
    } else {
        None
    }
}

/// Ring product of a sequence (one for the empty sequence).
#[must_use]
pub fn product<I>(elements: I) -> RingElement
where
    I: IntoIterator<Item = RingElement>,
{
    elements.into_iter().fold(RingElement::ONE, mul)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(v: u8) -> RingElement {
        RingElement::new(v).unwrap()
    }

    #[test]
    fn add_sub_neg() {
        assert_eq!(add(r(95), r(1)), r(0));
        assert_eq!(sub(r(0), r(1)), r(95));
        for a in RingElement::all() {
            assert_eq!(add(a, neg(a)), RingElement::ZERO);
        }
    }

    #[test]
    fn mul_wraps() {
        assert_eq!(mul(r(95), r(95)), r(1)); // (-1)² = 1
        assert_eq!(mul(r(48), r(2)), r(0));
        assert_eq!(mul(r(12), r(8)), r(0));
    }

    #[test]
    fn pow_matches_repeated_mul() {
        for a in RingElement::all() {
            let mut acc = RingElement::ONE;
            for e in 0..10u32 {
                assert_eq!(pow(a, e), acc, "{a}^{e}");
                acc = mul(acc, a);
            }
        }
    }

    #[test]
    fn inverses_exist_exactly_for_units() {
        let mut units = 0;
        for a in RingElement::all() {
            match mul_inverse(a) {
                Some(inv) => {
                    units += 1;
                    assert_eq!(mul(a, inv), RingElement::ONE, "{a}");
                }
                None => assert!(!is_unit(a)),
            }
        }
        assert_eq!(units, crate::core::constants::UNIT_COUNT);
    }

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(12, 96), 12);
        assert_eq!(gcd(37, 96), 1);
        assert_eq!(gcd(0, 96), 96);
    }

    #[test]
    fn product_of_sequence() {
        assert_eq!(product([r(7), r(11)]), r(77));
        assert_eq!(product([]), RingElement::ONE);
        assert_eq!(product([r(2), r(3), r(16)]), r(0));
    }
}

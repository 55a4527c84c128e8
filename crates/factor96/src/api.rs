//! Flat functions over raw integers and the canonical tables.
//!
//! Inputs are checked: residues must lie in `[0, 96)` and digits in
//! `[0, 96)`. Out-of-range values are rejected with a precondition
//! error, never clamped.
//!
//! # Example
//!
//! ```
//! use num_bigint::BigUint;
//! use uor_factor96::api;
//!
//! assert_eq!(api::ring_add(50, 50).unwrap(), 4);
//! assert_eq!(api::apply_transform("G3", 8, 37).unwrap(), 37);
//!
//! let digits = api::to_base96(&BigUint::from(9999u32));
//! assert_eq!(digits, vec![15, 8, 1]);
//! assert_eq!(api::from_base96(&digits).unwrap(), BigUint::from(9999u32));
//! ```

use crate::codec::{from_digits_checked, to_digits, HierarchicalCodec, HierarchicalDecomposition};
use crate::core::element::RingElement;
use crate::core::ring;
use crate::error::Result;
use crate::factor::{FactorEntry, FactorizationTable};
use crate::orbit::{OrbitIndex, PathStep};
use crate::transform::Generator;
use num_bigint::BigUint;

/// `(a + b) mod 96`.
///
/// # Errors
///
/// Returns [`Error::ResidueOutOfRange`](crate::Error::ResidueOutOfRange)
/// if either operand is `≥ 96`.
pub fn ring_add(a: u8, b: u8) -> Result<u8> {
    Ok(ring::add(RingElement::new(a)?, RingElement::new(b)?).value())
}

/// `(a · b) mod 96`.
///
/// # Errors
///
/// Returns [`Error::ResidueOutOfRange`](crate::Error::ResidueOutOfRange)
/// if either operand is `≥ 96`.
pub fn ring_multiply(a: u8, b: u8) -> Result<u8> {
    Ok(ring::mul(RingElement::new(a)?, RingElement::new(b)?).value())
}

/// Applies the named generator `steps` times to `x`.
///
/// `name` is one of `G1`..`G4` or the aliases `R`, `D`, `T`, `M`.
/// Negative `steps` apply the inverse.
///
/// # Errors
///
/// Returns [`Error::UnknownGenerator`](crate::Error::UnknownGenerator) or
/// [`Error::ResidueOutOfRange`](crate::Error::ResidueOutOfRange).
pub fn apply_transform(name: &str, steps: i64, x: u8) -> Result<u8> {
    let generator: Generator = name.parse()?;
    Ok(generator.apply_steps(steps, RingElement::new(x)?).value())
}

/// Canonical orbit distance of `x` from residue 0.
///
/// # Errors
///
/// Returns a precondition error for `x ≥ 96`, or the cached structural
/// error if the canonical index failed to build.
pub fn orbit_distance(x: u8) -> Result<u8> {
    let x = RingElement::new(x)?;
    Ok(OrbitIndex::canonical()?.distance(x))
}

/// Canonical orbit path to `x`, root side first.
///
/// # Errors
///
/// As [`orbit_distance`].
pub fn orbit_path(x: u8) -> Result<Vec<PathStep>> {
    let x = RingElement::new(x)?;
    Ok(OrbitIndex::canonical()?.path(x))
}

/// Canonical classification of `x`.
///
/// # Errors
///
/// Returns a precondition error for `x ≥ 96`, or the cached structural
/// error if the canonical table failed to build.
pub fn classify(x: u8) -> Result<FactorEntry> {
    let x = RingElement::new(x)?;
    Ok(FactorizationTable::canonical()?.classify(x).clone())
}

/// Little-endian base-96 digits of `n`; `[0]` for zero.
#[must_use]
pub fn to_base96(n: &BigUint) -> Vec<u8> {
    to_digits(n).into_iter().map(RingElement::value).collect()
}

/// `Σ digitᵢ · 96ⁱ`.
///
/// # Errors
///
/// Returns [`Error::DigitOutOfRange`](crate::Error::DigitOutOfRange) for a
/// digit `≥ 96`.
pub fn from_base96(digits: &[u8]) -> Result<BigUint> {
    from_digits_checked(digits)
}

/// Full decomposition of `n` with the canonical codec.
///
/// # Errors
///
/// Returns the cached structural error if the canonical tables failed to
/// build.
pub fn decompose(n: &BigUint) -> Result<HierarchicalDecomposition> {
    Ok(HierarchicalCodec::canonical()?.decompose(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::factor::FactorKind;

    #[test]
    fn ring_operations_reject_out_of_range() {
        assert_eq!(ring_add(95, 1).unwrap(), 0);
        assert_eq!(ring_multiply(12, 8).unwrap(), 0);
        assert_eq!(ring_multiply(5, 77).unwrap(), 1);
        assert_eq!(ring_add(96, 0), Err(Error::ResidueOutOfRange(96)));
        assert_eq!(ring_multiply(0, 200), Err(Error::ResidueOutOfRange(200)));
    }

    #[test]
    fn transform_by_alias() {
        assert_eq!(apply_transform("R", 1, 0).unwrap(), 24);
        assert_eq!(apply_transform("G2", -1, 0).unwrap(), 16);
        assert_eq!(apply_transform("m", 1, 8).unwrap(), 16);
        assert!(matches!(
            apply_transform("G5", 1, 0),
            Err(Error::UnknownGenerator(_))
        ));
    }

    #[test]
    fn orbit_queries() {
        assert_eq!(orbit_distance(0).unwrap(), 0);
        assert_eq!(orbit_distance(95).unwrap(), 12);
        assert!(orbit_path(0).unwrap().is_empty());
        assert_eq!(orbit_path(16).unwrap().len(), 2);
        assert!(orbit_distance(96).is_err());
    }

    #[test]
    fn classify_scenario() {
        let e = classify(37).unwrap();
        assert_eq!(e.kind, FactorKind::Prime);
        assert_eq!(e.factors, vec![RingElement::new(37).unwrap()]);
        assert!(e.exact);
        assert_eq!(classify(0).unwrap().kind, FactorKind::Trivial);
        assert_eq!(classify(12).unwrap().kind, FactorKind::Composite);
    }

    #[test]
    fn base96_scenario() {
        let n = BigUint::from(9999u32);
        assert_eq!(from_base96(&to_base96(&n)).unwrap(), n);
        assert_eq!(to_base96(&BigUint::from(0u32)), vec![0]);
        assert!(from_base96(&[0, 96]).is_err());
    }

    #[test]
    fn decompose_zero() {
        let d = decompose(&BigUint::from(0u32)).unwrap();
        assert_eq!(d.num_digits(), 1);
        let rec = &d.digits()[0];
        assert_eq!(rec.digit.value(), 0);
        assert_eq!(rec.entry.kind, FactorKind::Trivial);
        assert_eq!(rec.distance, orbit_distance(0).unwrap());
        assert!(rec.path.is_empty());
    }
}

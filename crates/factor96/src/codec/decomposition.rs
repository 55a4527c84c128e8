//! Full hierarchical decomposition of an integer.
//!
//! Each base-96 digit is paired with its [`FactorEntry`], its orbit
//! distance and path, and its position. Records hold no bignums, so a
//! decomposition stays linear in the digit count; the positional scale
//! `96^position` is computed on demand by [`DigitRecord::scale`]. The
//! resulting [`HierarchicalDecomposition`] is immutable and owned by the
//! caller; [`HierarchicalDecomposition::reconstruct`] gives back the
//! original integer exactly.
//!
//! # Example
//!
//! ```
//! use num_bigint::BigUint;
//! use uor_factor96::{FactorKind, HierarchicalCodec};
//!
//! let codec = HierarchicalCodec::canonical().unwrap();
//! let d = codec.decompose(&BigUint::from(0u32));
//! assert_eq!(d.num_digits(), 1);
//! assert_eq!(d.digits()[0].entry.kind, FactorKind::Trivial);
//! assert!(d.digits()[0].path.is_empty());
//!
//! let n = BigUint::from(9999u32);
//! assert_eq!(codec.decompose(&n).reconstruct(), n);
//! ```

use super::digits::{from_digits, to_digits, Digit};
use crate::error::{Error, Result};
use crate::factor::{FactorEntry, FactorizationTable};
use crate::orbit::{OrbitIndex, PathCode, PathStep};
use num_bigint::BigUint;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Weight of the total factor count in [`HierarchicalDecomposition::complexity_score`].
pub const FACTOR_WEIGHT: f64 = 1.0;
/// Weight of the summed orbit distance.
pub const ORBIT_SUM_WEIGHT: f64 = 0.5;
/// Weight of the largest orbit distance.
pub const ORBIT_MAX_WEIGHT: f64 = 0.25;

/// One digit of a decomposition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DigitRecord {
    /// Digit value.
    pub digit: Digit,
    /// Little-endian position (0 = least significant).
    pub position: usize,
    /// Classification of the digit.
    pub entry: FactorEntry,
    /// Orbit distance of the digit from the root.
    pub distance: u8,
    /// Orbit path from the root to the digit.
    pub path: Vec<PathStep>,
}

impl DigitRecord {
    /// Positional scale, `96^position`.
    #[must_use]
    pub fn scale(&self) -> BigUint {
        BigUint::from(96u32).pow(self.position as u32)
    }

    /// Contribution of this digit to the integer, `digit · scale`.
    #[must_use]
    pub fn contribution(&self) -> BigUint {
        self.scale() * u32::from(self.digit.value())
    }

    /// Compact encoding of [`DigitRecord::path`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathTooLong`] for a path longer than
    /// [`PathCode::MAX_STEPS`]; records built by a codec never have one.
    pub fn path_code(&self) -> Result<PathCode> {
        PathCode::encode(self.path.iter().map(|s| s.generator))
    }
}

/// Ordered digit records of one integer, least significant first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HierarchicalDecomposition {
    original: BigUint,
    digits: Vec<DigitRecord>,
}

impl HierarchicalDecomposition {
    /// The integer that was decomposed.
    #[inline]
    #[must_use]
    pub fn original(&self) -> &BigUint {
        &self.original
    }

    /// Digit records, least significant first.
    #[inline]
    #[must_use]
    pub fn digits(&self) -> &[DigitRecord] {
        &self.digits
    }

    /// Number of base-96 digits.
    #[inline]
    #[must_use]
    pub fn num_digits(&self) -> usize {
        self.digits.len()
    }

    /// Bare digit sequence.
    #[must_use]
    pub fn to_base96(&self) -> Vec<Digit> {
        self.digits.iter().map(|r| r.digit).collect()
    }

    /// `Σ digitᵢ · 96ⁱ`, which equals [`HierarchicalDecomposition::original`].
    #[must_use]
    pub fn reconstruct(&self) -> BigUint {
        from_digits(&self.to_base96())
    }

    /// Total number of declared factors across all digits.
    #[must_use]
    pub fn total_factor_count(&self) -> usize {
        self.digits.iter().map(|r| r.entry.factor_count()).sum()
    }

    /// Sum of the digits' orbit distances.
    #[must_use]
    pub fn total_orbit_complexity(&self) -> usize {
        self.digits.iter().map(|r| r.distance as usize).sum()
    }

    /// Largest orbit distance among the digits.
    #[must_use]
    pub fn max_orbit_distance(&self) -> u8 {
        self.digits.iter().map(|r| r.distance).max().unwrap_or(0)
    }

    /// `1.0·|F| + 0.5·Σd + 0.25·max d` over factor count `|F|` and
    /// orbit distances `d`.
    #[must_use]
    pub fn complexity_score(&self) -> f64 {
        FACTOR_WEIGHT * self.total_factor_count() as f64
            + ORBIT_SUM_WEIGHT * self.total_orbit_complexity() as f64
            + ORBIT_MAX_WEIGHT * f64::from(self.max_orbit_distance())
    }

    /// True for a single-digit integer whose digit is prime.
    #[must_use]
    pub fn is_prime(&self) -> bool {
        matches!(self.digits.as_slice(), [only] if only.entry.is_prime())
    }

    /// True if every digit's factor list multiplies back to the digit.
    #[must_use]
    pub fn all_exact(&self) -> bool {
        self.digits.iter().all(|r| r.entry.exact)
    }

    /// Packed orbit path of each digit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PathTooLong`] if any record's path does not fit.
    pub fn path_codes(&self) -> Result<Vec<PathCode>> {
        self.digits.iter().map(DigitRecord::path_code).collect()
    }
}

/// Decomposes integers using a shared orbit index and factor table.
#[derive(Debug, Clone)]
pub struct HierarchicalCodec {
    orbit: Arc<OrbitIndex>,
    table: Arc<FactorizationTable>,
}

impl HierarchicalCodec {
    /// Creates a codec over explicit tables.
    #[must_use]
    pub fn new(orbit: Arc<OrbitIndex>, table: Arc<FactorizationTable>) -> Self {
        Self { orbit, table }
    }

    /// Creates a codec and runs
    /// [`conformance::verify_codec`](crate::conformance::verify_codec) on it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralInvariant`] listing every failed check.
    pub fn verified(orbit: Arc<OrbitIndex>, table: Arc<FactorizationTable>) -> Result<Self> {
        let codec = Self::new(orbit, table);
        crate::conformance::verify_codec(&codec)?;
        Ok(codec)
    }

    /// Codec over the canonical orbit index and factor table.
    ///
    /// Built once on first use and verified like the tables it wraps.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralInvariant`] if either canonical table
    /// or the codec itself failed to build or verify; the failure is cached.
    pub fn canonical() -> Result<Arc<Self>> {
        static CANONICAL: OnceLock<Result<Arc<HierarchicalCodec>>> = OnceLock::new();
        CANONICAL
            .get_or_init(|| {
                let built = OrbitIndex::canonical()
                    .and_then(|orbit| Ok((orbit, FactorizationTable::canonical()?)))
                    .and_then(|(orbit, table)| Self::verified(orbit, table));
                match built {
                    Ok(codec) => Ok(Arc::new(codec)),
                    Err(e) => {
                        tracing::error!(error = %e, "canonical_codec_rejected");
                        Err(e)
                    }
                }
            })
            .clone()
    }

    /// Orbit index in use.
    #[inline]
    #[must_use]
    pub fn orbit(&self) -> &Arc<OrbitIndex> {
        &self.orbit
    }

    /// Factor table in use.
    #[inline]
    #[must_use]
    pub fn table(&self) -> &Arc<FactorizationTable> {
        &self.table
    }

    /// Little-endian base-96 digits of `n`.
    #[must_use]
    pub fn to_digits(&self, n: &BigUint) -> Vec<Digit> {
        to_digits(n)
    }

    /// `Σ digitᵢ · 96ⁱ`.
    #[must_use]
    pub fn from_digits(&self, digits: &[Digit]) -> BigUint {
        from_digits(digits)
    }

    /// Decomposes `n` into classified, orbit-located digits.
    #[must_use]
    pub fn decompose(&self, n: &BigUint) -> HierarchicalDecomposition {
        let records: Vec<DigitRecord> = to_digits(n)
            .into_iter()
            .enumerate()
            .map(|(position, digit)| self.record(digit, position))
            .collect();
        tracing::trace!(digits = records.len(), bits = n.bits(), "decomposed");
        HierarchicalDecomposition {
            original: n.clone(),
            digits: records,
        }
    }

    /// [`HierarchicalCodec::decompose`], polling `cancel` before each digit.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Cancelled`] with the number of finished digits once
    /// `cancel` is observed set.
    pub fn decompose_cancellable(
        &self,
        n: &BigUint,
        cancel: &AtomicBool,
    ) -> Result<HierarchicalDecomposition> {
        let digits = to_digits(n);
        let mut records = Vec::with_capacity(digits.len());
        for (position, digit) in digits.into_iter().enumerate() {
            if cancel.load(Ordering::Relaxed) {
                tracing::debug!(completed = position, "decomposition_cancelled");
                return Err(Error::Cancelled {
                    completed: position,
                });
            }
            records.push(self.record(digit, position));
        }
        Ok(HierarchicalDecomposition {
            original: n.clone(),
            digits: records,
        })
    }

    fn record(&self, digit: Digit, position: usize) -> DigitRecord {
        DigitRecord {
            digit,
            position,
            entry: self.table.classify(digit).clone(),
            distance: self.orbit.distance(digit),
            path: self.orbit.path(digit),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factor::{FactorKind, FactorPolicy};
    use crate::RingElement;

    fn codec() -> Arc<HierarchicalCodec> {
        HierarchicalCodec::canonical().unwrap()
    }

    #[test]
    fn zero_decomposes_to_trivial_root() {
        let d = codec().decompose(&BigUint::from(0u32));
        assert_eq!(d.num_digits(), 1);
        let rec = &d.digits()[0];
        assert_eq!(rec.digit, RingElement::ZERO);
        assert_eq!(rec.entry.kind, FactorKind::Trivial);
        assert_eq!(rec.distance, 0);
        assert!(rec.path.is_empty());
        assert_eq!(rec.scale(), BigUint::from(1u32));
    }

    #[test]
    fn scales_are_powers_of_96() {
        let n = BigUint::from(96u32).pow(5) + 7u32;
        let d = codec().decompose(&n);
        for rec in d.digits() {
            assert_eq!(rec.scale(), BigUint::from(96u32).pow(rec.position as u32));
        }
        assert_eq!(d.reconstruct(), n);
        let summed: BigUint = d.digits().iter().map(DigitRecord::contribution).sum();
        assert_eq!(summed, n);
    }

    #[test]
    fn wide_inputs_retain_linear_state() {
        // 100_000 one bits: 15_187 digits.
        let n = (BigUint::from(1u32) << 100_000usize) - 1u32;
        let d = codec().decompose(&n);
        assert_eq!(d.num_digits(), crate::codec::digit_count(&n));
        assert_eq!(d.reconstruct(), n);

        let per_record = std::mem::size_of::<DigitRecord>()
            + PathCode::MAX_STEPS * std::mem::size_of::<PathStep>()
            + PathCode::MAX_STEPS * std::mem::size_of::<RingElement>();
        let retained: usize = d
            .digits()
            .iter()
            .map(|r| {
                std::mem::size_of::<DigitRecord>()
                    + r.path.capacity() * std::mem::size_of::<PathStep>()
                    + r.entry.factors.capacity() * std::mem::size_of::<RingElement>()
            })
            .sum();
        assert!(retained <= d.num_digits() * per_record, "{retained} bytes retained");
    }

    #[test]
    fn records_agree_with_tables() {
        let c = codec();
        let n = BigUint::parse_bytes(b"123456789012345678901234567890", 10).unwrap();
        let d = c.decompose(&n);
        for rec in d.digits() {
            assert_eq!(&rec.entry, c.table().classify(rec.digit));
            assert_eq!(rec.distance, c.orbit().distance(rec.digit));
            assert_eq!(rec.path, c.orbit().path(rec.digit));
            assert_eq!(rec.path_code().unwrap().replay(c.orbit().root()), rec.digit);
        }
        assert_eq!(d.to_base96(), c.to_digits(&n));
        assert_eq!(c.from_digits(&d.to_base96()), n);
    }

    #[test]
    fn prime_single_digit() {
        assert!(codec().decompose(&BigUint::from(37u32)).is_prime());
        assert!(!codec().decompose(&BigUint::from(12u32)).is_prime());
        assert!(!codec().decompose(&BigUint::from(37u32 * 96 + 37)).is_prime());
    }

    #[test]
    fn complexity_score_formula() {
        // 16 = (0, 2, 0): composite, distance 2, single factor.
        let d = codec().decompose(&BigUint::from(16u32));
        let expected = d.total_factor_count() as f64 + 0.5 * 2.0 + 0.25 * 2.0;
        assert!((d.complexity_score() - expected).abs() < 1e-12);
    }

    #[test]
    fn exactness_depends_on_policy() {
        let orbit = OrbitIndex::canonical().unwrap();
        let trial = Arc::new(FactorizationTable::build(FactorPolicy::TrialDivision, &orbit).unwrap());
        let c = HierarchicalCodec::new(orbit, trial);
        let n = BigUint::from(12u32);
        assert!(c.decompose(&n).all_exact());
        assert!(!codec().decompose(&n).all_exact());
    }

    #[test]
    fn canonical_codec_passes_its_own_checks() {
        let report = crate::conformance::check_codec(&codec());
        assert!(report.checks() > 0);
        assert!(report.is_conformant(), "{report}");
    }

    #[test]
    fn verified_codec_over_trial_division() {
        let orbit = OrbitIndex::canonical().unwrap();
        let trial = Arc::new(FactorizationTable::build(FactorPolicy::TrialDivision, &orbit).unwrap());
        let c = HierarchicalCodec::verified(orbit, trial).unwrap();
        assert_eq!(c.table().policy(), FactorPolicy::TrialDivision);
    }

    #[test]
    fn oversized_record_path_has_no_code() {
        let mut rec = codec().decompose(&BigUint::from(95u32)).digits()[0].clone();
        let step = rec.path[0];
        rec.path = vec![step; PathCode::MAX_STEPS + 1];
        assert!(matches!(rec.path_code(), Err(Error::PathTooLong { len: 15, .. })));
    }

    #[test]
    fn cancellation_between_digits() {
        let n = BigUint::from(96u32).pow(10);
        let cancel = AtomicBool::new(true);
        assert_eq!(
            codec().decompose_cancellable(&n, &cancel),
            Err(Error::Cancelled { completed: 0 })
        );
        cancel.store(false, Ordering::Relaxed);
        let d = codec().decompose_cancellable(&n, &cancel).unwrap();
        assert_eq!(d, codec().decompose(&n));
    }
}

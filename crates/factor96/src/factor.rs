//! Factorization table: one classification per residue.
//!
//! Every residue `r ∈ [0, 96)` gets exactly one [`FactorEntry`]:
//!
//! | Kind | Residues | Factors |
//! |------|----------|---------|
//! | Trivial | 0, 1 | `[r]` |
//! | Prime | `gcd(r, 96) = 1`, `r ≠ 1` (31 residues) | `[r]` |
//! | Composite | `gcd(r, 96) > 1`, `r ≥ 2` (63 residues) | chosen by the [`FactorPolicy`] |
//!
//! Trivial and prime entries are always exact. For composites the factor
//! list is whatever the policy declares, and `exact` records whether its
//! ring product gives back `r`. Callers must check `exact` before treating
//! `factors` as a factorization.
//!
//! # Policies
//!
//! - [`FactorPolicy::OrbitLinked`] (canonical): the prime residues met along
//!   the orbit path from the root to `r`, in path order; `[r]` if the path
//!   passes no prime. Usually inexact.
//! - [`FactorPolicy::TrialDivision`]: the integer prime factors of `r` in
//!   increasing order. Always exact.
//!
//! # Example
//!
//! ```
//! use uor_factor96::{FactorKind, FactorizationTable, RingElement};
//!
//! let table = FactorizationTable::canonical().unwrap();
//! let entry = table.classify(RingElement::new(37).unwrap());
//! assert_eq!(entry.kind, FactorKind::Prime);
//! assert_eq!(entry.factors, vec![RingElement::new(37).unwrap()]);
//! assert!(entry.exact);
//! ```

use crate::core::constants::{PRIME_COUNT, RING_ORDER};
use crate::core::element::RingElement;
use crate::core::ring::{is_unit, product};
use crate::error::{Error, Result};
use crate::orbit::OrbitIndex;
use core::fmt;
use std::sync::{Arc, OnceLock};

/// Classification of a residue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FactorKind {
    /// 0 or 1.
    Trivial,
    /// A unit other than 1.
    Prime,
    /// A non-unit other than 0.
    Composite,
}

impl FactorKind {
    /// Kind of `r`, independent of any policy.
    #[must_use]
    pub const fn of(r: RingElement) -> Self {
        match r.value() {
            0 | 1 => Self::Trivial,
            _ if is_unit(r) => Self::Prime,
            _ => Self::Composite,
        }
    }
}

impl fmt::Display for FactorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Trivial => write!(f, "trivial"),
            Self::Prime => write!(f, "prime"),
            Self::Composite => write!(f, "composite"),
        }
    }
}

/// Table entry for one residue.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactorEntry {
    /// Classified residue.
    pub element: RingElement,
    /// Classification.
    pub kind: FactorKind,
    /// Declared factor list, never empty.
    pub factors: Vec<RingElement>,
    /// True if the ring product of `factors` equals `element`.
    pub exact: bool,
}

impl FactorEntry {
    fn new(element: RingElement, kind: FactorKind, factors: Vec<RingElement>) -> Self {
        let exact = product(factors.iter().copied()) == element;
        Self {
            element,
            kind,
            factors,
            exact,
        }
    }

    /// Number of declared factors.
    #[inline]
    #[must_use]
    pub fn factor_count(&self) -> usize {
        self.factors.len()
    }

    /// True if `kind` is [`FactorKind::Prime`].
    #[inline]
    #[must_use]
    pub fn is_prime(&self) -> bool {
        self.kind == FactorKind::Prime
    }

    /// Factors, only when they multiply back to the element.
    #[must_use]
    pub fn exact_factors(&self) -> Option<&[RingElement]> {
        self.exact.then_some(self.factors.as_slice())
    }
}

/// Rule that assigns factor lists to composite residues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FactorPolicy {
    /// Prime residues along the orbit path from the root, or `[r]`.
    #[default]
    OrbitLinked,
    /// Integer prime factors of `r`.
    TrialDivision,
}

impl FactorPolicy {
    /// Short policy name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::OrbitLinked => "orbit-linked",
            Self::TrialDivision => "trial-division",
        }
    }

    fn composite_factors(self, r: RingElement, orbit: &OrbitIndex) -> Vec<RingElement> {
        match self {
            Self::OrbitLinked => {
                let linked: Vec<RingElement> = orbit
                    .path(r)
                    .into_iter()
                    .map(|step| step.target)
                    .filter(|&t| FactorKind::of(t) == FactorKind::Prime)
                    .collect();
                if linked.is_empty() {
                    vec![r]
                } else {
                    linked
                }
            }
            Self::TrialDivision => integer_prime_factors(r.value())
                .into_iter()
                .map(|p| RingElement::reduce(u64::from(p)))
                .collect(),
        }
    }
}

impl fmt::Display for FactorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counts of each kind in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KindCounts {
    /// Trivial entries.
    pub trivial: usize,
    /// Prime entries.
    pub prime: usize,
    /// Composite entries.
    pub composite: usize,
}

/// Classification of all 96 residues under one policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorizationTable {
    policy: FactorPolicy,
    entries: [FactorEntry; RING_ORDER],
}

impl FactorizationTable {
    /// Builds the table. The orbit index supplies paths for
    /// [`FactorPolicy::OrbitLinked`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralInvariant`] if an entry comes out with an
    /// empty factor list or an inexact trivial/prime entry.
    pub fn build(policy: FactorPolicy, orbit: &OrbitIndex) -> Result<Self> {
        let entries: [FactorEntry; RING_ORDER] = core::array::from_fn(|i| {
            let r = RingElement::reduce(i as u64);
            let kind = FactorKind::of(r);
            let factors = match kind {
                FactorKind::Trivial | FactorKind::Prime => vec![r],
                FactorKind::Composite => policy.composite_factors(r, orbit),
            };
            FactorEntry::new(r, kind, factors)
        });

        for e in &entries {
            if e.factors.is_empty() {
                return Err(Error::StructuralInvariant(format!(
                    "residue {} has an empty factor list",
                    e.element
                )));
            }
            if e.kind != FactorKind::Composite && !e.exact {
                return Err(Error::StructuralInvariant(format!(
                    "{} residue {} is not its own factor",
                    e.kind, e.element
                )));
            }
        }

        let table = Self { policy, entries };
        tracing::debug!(
            policy = policy.name(),
            exact = table.exact_count(),
            composite = table.kind_counts().composite,
            "factor_table_built"
        );
        Ok(table)
    }

    /// Shared canonical table: [`FactorPolicy::OrbitLinked`] over the
    /// canonical orbit index, verified before it is served.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StructuralInvariant`] if construction or
    /// verification failed; the failure is cached.
    pub fn canonical() -> Result<Arc<Self>> {
        static CANONICAL: OnceLock<Result<Arc<FactorizationTable>>> = OnceLock::new();
        CANONICAL
            .get_or_init(|| {
                let built = OrbitIndex::canonical()
                    .and_then(|orbit| Self::build(FactorPolicy::OrbitLinked, &orbit))
                    .and_then(|table| crate::conformance::verify_table(&table).map(|_| table));
                match built {
                    Ok(table) => Ok(Arc::new(table)),
                    Err(e) => {
                        tracing::error!(error = %e, "canonical_factor_table_rejected");
                        Err(e)
                    }
                }
            })
            .clone()
    }

    /// Entry for `r`, O(1).
    #[inline]
    #[must_use]
    pub fn classify(&self, r: RingElement) -> &FactorEntry {
        &self.entries[r.index()]
    }

    /// Policy the table was built with.
    #[inline]
    #[must_use]
    pub fn policy(&self) -> FactorPolicy {
        self.policy
    }

    /// All entries in residue order.
    #[inline]
    #[must_use]
    pub fn entries(&self) -> &[FactorEntry] {
        &self.entries
    }

    /// Number of entries whose factor list multiplies back to the residue.
    #[must_use]
    pub fn exact_count(&self) -> usize {
        self.entries.iter().filter(|e| e.exact).count()
    }

    /// Number of entries of each kind.
    #[must_use]
    pub fn kind_counts(&self) -> KindCounts {
        self.entries
            .iter()
            .fold(KindCounts::default(), |mut acc, e| {
                match e.kind {
                    FactorKind::Trivial => acc.trivial += 1,
                    FactorKind::Prime => acc.prime += 1,
                    FactorKind::Composite => acc.composite += 1,
                }
                acc
            })
    }
}

/// The 31 residues classified as prime, in increasing order.
#[must_use]
pub fn prime_classes() -> Vec<RingElement> {
    let primes: Vec<RingElement> = RingElement::all()
        .filter(|&r| FactorKind::of(r) == FactorKind::Prime)
        .collect();
    debug_assert_eq!(primes.len(), PRIME_COUNT);
    primes
}

fn integer_prime_factors(mut n: u8) -> Vec<u8> {
    let mut out = Vec::new();
    let mut p = 2u8;
    while u16::from(p) * u16::from(p) <= u16::from(n) {
        while n % p == 0 {
            out.push(p);
            n /= p;
        }
        p += 1;
    }
    if n > 1 {
        out.push(n);
    }
    out
}

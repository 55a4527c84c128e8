//! Structural conformance checks for the orbit index, the factorization
//! table, and the codec.
//!
//! Canonical instances are checked before they are served (see
//! [`OrbitIndex::canonical`], [`FactorizationTable::canonical`] and
//! [`HierarchicalCodec::canonical`]).
//! [`self_test`] runs every check against the canonical instances.
//!
//! # Checks
//!
//! | Check | Subject | Condition |
//! |-------|---------|-----------|
//! | `transform_order` | generators | `g^order(g) = id`, no smaller positive power is |
//! | `transform_bijection` | generators | each generator permutes the 96 residues |
//! | `single_orbit` | orbit index | all 96 residues reached, root at distance 0 |
//! | `tree_validity` | orbit index | each parent is one step closer and maps to its child |
//! | `path_length` | orbit index | `path(x)` has `distance(x)` steps and ends at `x` |
//! | `classification` | factor table | kind counts 2 / 31 / 63, kinds agree with residues |
//! | `factor_lists` | factor table | non-empty lists, `exact` agrees with the ring product |
//! | `digit_roundtrip` | codec | `from_digits(to_digits(n)) = n` on sample values |
//! | `reconstruction` | codec | decompositions reconstruct their input |
//! | `path_codes` | codec | every digit path packs into a `PathCode` |
//!
//! # Example
//!
//! ```
//! use uor_factor96::conformance;
//!
//! let report = conformance::self_test().unwrap();
//! assert!(report.is_conformant());
//! assert!(report.checks() > 0);
//! ```

use crate::codec::{from_digits, to_digits, HierarchicalCodec};
use crate::core::constants::{PRIME_COUNT, RING_ORDER};
use crate::core::element::RingElement;
use crate::core::ring::product;
use crate::error::{Error, Result};
use crate::factor::{FactorKind, FactorizationTable};
use crate::orbit::{OrbitIndex, PathCode};
use crate::transform::Generator;
use num_bigint::BigUint;
use num_traits::One;
use std::fmt;

/// One failed check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformanceViolation {
    /// Name of the failed check.
    pub check: &'static str,
    /// Description of the violation.
    pub message: String,
}

impl fmt::Display for ConformanceViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.check, self.message)
    }
}

/// Accumulated outcome of a set of checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConformanceReport {
    checks: usize,
    violations: Vec<ConformanceViolation>,
}

impl ConformanceReport {
    /// Empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one check; `message` is only built on failure.
    pub fn record<F>(&mut self, check: &'static str, passed: bool, message: F)
    where
        F: FnOnce() -> String,
    {
        self.checks += 1;
        if !passed {
            self.violations.push(ConformanceViolation {
                check,
                message: message(),
            });
        }
    }

    /// Appends another report's checks and violations.
    pub fn merge(&mut self, other: Self) {
        self.checks += other.checks;
        self.violations.extend(other.violations);
    }

    /// Number of checks run.
    #[must_use]
    pub fn checks(&self) -> usize {
        self.checks
    }

    /// Failed checks.
    #[must_use]
    pub fn violations(&self) -> &[ConformanceViolation] {
        &self.violations
    }

    /// Number of failed checks.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    /// True if no check failed.
    #[must_use]
    pub fn is_conformant(&self) -> bool {
        self.violations.is_empty()
    }

    /// Converts a failing report into [`Error::StructuralInvariant`].
    ///
    /// # Errors
    ///
    /// Returns the first violation, with the total count, if any check failed.
    pub fn into_result(self) -> Result<Self> {
        match self.violations.first() {
            None => Ok(self),
            Some(first) => Err(Error::StructuralInvariant(format!(
                "{first} ({} of {} checks failed)",
                self.violations.len(),
                self.checks
            ))),
        }
    }
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Conformance Report")?;
        writeln!(f, "==================")?;
        writeln!(
            f,
            "{} checks, {} violations",
            self.checks,
            self.violations.len()
        )?;
        for v in &self.violations {
            writeln!(f, "  - {v}")?;
        }
        Ok(())
    }
}

/// Generator order and bijection checks.
#[must_use]
pub fn check_generators() -> ConformanceReport {
    let mut report = ConformanceReport::new();
    for g in Generator::ALL {
        let order = g.order();
        let identity_at_order = RingElement::all().all(|x| g.apply_steps(i64::from(order), x) == x);
        report.record("transform_order", identity_at_order, || {
            format!("{g}^{order} is not the identity")
        });
        let smaller = (1..order).find(|&k| RingElement::all().all(|x| g.apply_steps(i64::from(k), x) == x));
        report.record("transform_order", smaller.is_none(), || {
            format!("{g} has order {smaller:?}, expected {order}")
        });

        let mut seen = [false; RING_ORDER];
        for x in RingElement::all() {
            seen[g.apply(x).index()] = true;
        }
        report.record("transform_bijection", seen.iter().all(|&s| s), || {
            format!("{g} is not a permutation of the ring")
        });
    }
    report
}

/// Reachability, tree, and path checks on an orbit index.
#[must_use]
pub fn check_orbit(orbit: &OrbitIndex) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let reached: usize = orbit.level_sizes().iter().sum();
    report.record("single_orbit", reached == RING_ORDER, || {
        format!("{reached} of {RING_ORDER} residues reached")
    });
    let root = orbit.root();
    report.record(
        "single_orbit",
        orbit.distance(root) == 0 && orbit.parent(root).is_none(),
        || format!("root {root} has a parent or non-zero distance"),
    );

    for (x, rec) in orbit.iter() {
        if x == root {
            continue;
        }
        let valid = rec.parent.is_some_and(|p| {
            p.generator.apply(p.from) == x && orbit.distance(p.from) + 1 == rec.distance
        });
        report.record("tree_validity", valid, || {
            format!("{x} has parent {:?} at distance {}", rec.parent, rec.distance)
        });

        let path = orbit.path(x);
        let end = path.iter().fold(root, |acc, s| s.generator.apply(acc));
        report.record(
            "path_length",
            path.len() == rec.distance as usize && end == x,
            || format!("path to {x} has {} steps and ends at {end}", path.len()),
        );
    }
    report
}

/// Classification checks on a factorization table.
#[must_use]
pub fn check_table(table: &FactorizationTable) -> ConformanceReport {
    let mut report = ConformanceReport::new();

    let counts = table.kind_counts();
    report.record(
        "classification",
        counts.trivial == 2 && counts.prime == PRIME_COUNT && counts.composite == 63,
        || format!("kind counts {counts:?}"),
    );

    for (i, entry) in table.entries().iter().enumerate() {
        let r = entry.element;
        report.record(
            "classification",
            r.index() == i && entry.kind == FactorKind::of(r),
            || format!("entry {i} holds {r} as {}", entry.kind),
        );
        let exact = product(entry.factors.iter().copied()) == r;
        report.record(
            "factor_lists",
            !entry.factors.is_empty() && entry.exact == exact,
            || format!("{r} declares {:?} with exact = {}", entry.factors, entry.exact),
        );
        if entry.kind != FactorKind::Composite {
            report.record("factor_lists", entry.factors == [r], || {
                format!("{} residue {r} declares {:?}", entry.kind, entry.factors)
            });
        }
    }
    report
}

/// Digit and decomposition round-trips over boundary and sample values.
#[must_use]
pub fn check_codec(codec: &HierarchicalCodec) -> ConformanceReport {
    let mut report = ConformanceReport::new();
    let radix = BigUint::from(RING_ORDER as u32);
    let mut samples: Vec<BigUint> = [0u64, 1, 95, 96, 97, 9215, 9216, 9999, u64::MAX]
        .into_iter()
        .map(BigUint::from)
        .collect();
    samples.push(radix.pow(64));
    samples.push(radix.pow(64) - BigUint::one());

    for n in &samples {
        let digits = to_digits(n);
        report.record("digit_roundtrip", from_digits(&digits) == *n, || {
            format!("{n} does not survive base-96 expansion")
        });
        let d = codec.decompose(n);
        report.record(
            "reconstruction",
            d.reconstruct() == *n && d.to_base96() == digits,
            || format!("decomposition of {n} does not reconstruct"),
        );
        report.record("path_codes", d.path_codes().is_ok(), || {
            format!("decomposition of {n} has a path beyond {} steps", PathCode::MAX_STEPS)
        });
    }
    report
}

/// Checks the generators and `orbit`.
///
/// # Errors
///
/// Returns [`Error::StructuralInvariant`] if any check fails.
pub fn verify_orbit(orbit: &OrbitIndex) -> Result<ConformanceReport> {
    let mut report = check_generators();
    report.merge(check_orbit(orbit));
    log_report("orbit", &report);
    report.into_result()
}

/// Checks `table`.
///
/// # Errors
///
/// Returns [`Error::StructuralInvariant`] if any check fails.
pub fn verify_table(table: &FactorizationTable) -> Result<ConformanceReport> {
    let report = check_table(table);
    log_report("table", &report);
    report.into_result()
}

/// Checks `codec`.
///
/// # Errors
///
/// Returns [`Error::StructuralInvariant`] if any check fails.
pub fn verify_codec(codec: &HierarchicalCodec) -> Result<ConformanceReport> {
    let report = check_codec(codec);
    log_report("codec", &report);
    report.into_result()
}

/// Runs every check against the canonical orbit index, table, and codec.
///
/// # Errors
///
/// Returns [`Error::StructuralInvariant`] if a canonical instance failed to
/// build or any check fails.
pub fn self_test() -> Result<ConformanceReport> {
    let codec = HierarchicalCodec::canonical()?;
    let mut report = check_generators();
    report.merge(check_orbit(codec.orbit()));
    report.merge(check_table(codec.table()));
    report.merge(check_codec(&codec));
    log_report("self_test", &report);
    report.into_result()
}

fn log_report(subject: &'static str, report: &ConformanceReport) {
    if report.is_conformant() {
        tracing::debug!(subject, checks = report.checks(), "conformance_passed");
    } else {
        for v in report.violations() {
            tracing::error!(subject, check = v.check, detail = %v.message, "conformance_violation");
        }
    }
}

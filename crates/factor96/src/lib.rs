//! UOR Factor96 - Hierarchical base-96 decomposition over a 96-element ring
//!
//! Every nonnegative integer is split bijectively into base-96 digits. Each
//! digit is a residue of the ring ℤ/96, which this crate equips with:
//!
//! - a coordinate split `r = 24q + 8d + c` (quadrant, modality, context)
//! - four generator transforms that together reach every residue
//! - a BFS orbit index giving each residue a distance and a canonical path
//! - a factorization table classifying each residue as trivial, prime or
//!   composite
//!
//! # Structure
//!
//! ```text
//! ring/element ─► algebra ─► transform ─► orbit ─► factor ─► codec
//!                                                      ▲        │
//!                                                      └─ conformance
//! ```
//!
//! # Residue Coordinates
//!
//! | Axis | Symbol | Range | Stride | Generator |
//! |------|--------|-------|--------|-----------|
//! | Quadrant | q | 0..4 | 24 | G1 (order 4) |
//! | Modality | d | 0..3 | 8 | G2 (order 3), G4 (order 2) |
//! | Context | c | 0..8 | 1 | G3 (order 8) |
//!
//! # Canonical Tables
//!
//! The orbit index is rooted at residue 0 and expands generators in the
//! order G1, G2, G3, G4; its diameter is 12. The canonical factor table
//! uses [`FactorPolicy::OrbitLinked`]. Composite factor lists are not
//! guaranteed to multiply back to their residue: check
//! [`FactorEntry::exact`] before relying on them.
//!
//! Canonical instances are built once, verified by [`conformance`], and
//! shared through `Arc`.
//!
//! # Example
//!
//! ```
//! use num_bigint::BigUint;
//! use uor_factor96::{FactorKind, HierarchicalCodec};
//!
//! let codec = HierarchicalCodec::canonical().unwrap();
//! let n = BigUint::from(9999u32);
//! let d = codec.decompose(&n);
//!
//! assert_eq!(d.to_base96().iter().map(|x| x.value()).collect::<Vec<_>>(), vec![15, 8, 1]);
//! assert_eq!(d.reconstruct(), n);
//! assert_eq!(d.digits()[0].entry.kind, FactorKind::Composite);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for residues, generators, paths,
//!   table entries, and decompositions.
//!
//! This crate does not factor integers. Digit classifications describe
//! residues mod 96 only.

#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic, missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

// Ring elements, constants, and arithmetic
mod core;

// Cyclic group algebras for G1 and G2
pub mod algebra;

// Generator transforms
pub mod transform;

// BFS orbit index
pub mod orbit;

// Residue classification
pub mod factor;

// Base-96 codec and decompositions
pub mod codec;

// Structural self-test
pub mod conformance;

// Flat functions over the canonical tables
pub mod api;

// Error types
pub mod error;

pub use crate::core::constants;
pub use crate::core::element;
pub use crate::core::ring;

pub use codec::{DigitRecord, HierarchicalCodec, HierarchicalDecomposition};
pub use conformance::{ConformanceReport, ConformanceViolation};
pub use crate::core::constants::{CANONICAL_ROOT, ORBIT_DIAMETER, RING_ORDER};
pub use crate::core::element::{Coordinates, RingElement};
pub use error::{Error, Result};
pub use factor::{prime_classes, FactorEntry, FactorKind, FactorPolicy, FactorizationTable};
pub use orbit::{distance_between, OrbitIndex, OrbitRecord, Parent, PathCode, PathStep};
pub use transform::Generator;

/// Prelude module for convenient imports.
///
/// ```
/// use uor_factor96::prelude::*;
///
/// let x = RingElement::new(37).unwrap();
/// assert_eq!(Generator::G3.apply(x).value(), 38);
/// ```
pub mod prelude {
    pub use crate::algebra::{Z3, Z4};
    pub use crate::codec::{
        from_digits, to_digits, DigitRecord, HierarchicalCodec, HierarchicalDecomposition,
    };
    pub use crate::core::constants::{CANONICAL_ROOT, RING_ORDER};
    pub use crate::core::element::{Coordinates, RingElement};
    pub use crate::core::ring::{add, mul};
    pub use crate::error::{Error, Result};
    pub use crate::factor::{FactorEntry, FactorKind, FactorPolicy, FactorizationTable};
    pub use crate::orbit::{OrbitIndex, PathCode, PathStep};
    pub use crate::transform::Generator;
}

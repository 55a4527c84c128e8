//! Hierarchical base-96 codec.
//!
//! - [`digits`]: bijective conversion between [`BigUint`](num_bigint::BigUint)
//!   and little-endian base-96 digit sequences
//! - [`decomposition`]: per-digit classification and orbit location,
//!   assembled into an immutable [`HierarchicalDecomposition`]

pub mod decomposition;
pub mod digits;

pub use decomposition::{DigitRecord, HierarchicalCodec, HierarchicalDecomposition};
pub use digits::{
    digit_count, from_digits, from_digits_checked, to_digits, to_digits_signed, to_digits_u64,
    Digit,
};

//! Error types for the 96-element ring, its orbit tables, and the codec.
//!
//! Errors fall into three groups:
//!
//! | Group | Variants | Raised by |
//! |-------|----------|-----------|
//! | Precondition | `ResidueOutOfRange`, `CoordinateOutOfRange`, `LengthMismatch`, `NegativeInput`, `DigitOutOfRange`, `UnknownGenerator`, `PathTooLong` | checked constructors and the facade |
//! | Structural | `StructuralInvariant` | table construction and the conformance self-test |
//! | Cancellation | `Cancelled` | [`HierarchicalCodec::decompose_cancellable`](crate::HierarchicalCodec::decompose_cancellable) |
//!
//! An inexact factor list (`FactorEntry::exact == false`) is not an error.

use num_bigint::BigInt;
use thiserror::Error;

/// Result type alias for ring, orbit, table, and codec operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors produced by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A residue was outside `[0, 96)`.
    #[error("residue {0} is outside the ring [0, 96)")]
    ResidueOutOfRange(u64),

    /// A coordinate was outside its axis bound.
    #[error("{axis} coordinate {value} is outside [0, {bound})")]
    CoordinateOutOfRange {
        /// Axis name (`quadrant`, `modality` or `context`).
        axis: &'static str,
        /// Offending value.
        value: u8,
        /// Exclusive upper bound of the axis.
        bound: u8,
    },

    /// Group-algebra operands had the wrong number of coefficients.
    #[error("coefficient vector length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Length required by the cyclic group order.
        expected: usize,
        /// Length supplied.
        actual: usize,
    },

    /// Base-96 expansion was requested for a negative integer.
    #[error("negative input {0} has no base-96 digit expansion")]
    NegativeInput(BigInt),

    /// A digit sequence contained a value outside `[0, 96)`.
    #[error("digit {digit} at position {position} is outside [0, 96)")]
    DigitOutOfRange {
        /// Little-endian position of the digit.
        position: usize,
        /// Offending digit value.
        digit: u8,
    },

    /// A generator name did not parse.
    #[error("unknown generator `{0}` (expected G1, G2, G3, G4 or R, D, T, M)")]
    UnknownGenerator(String),

    /// A generator sequence was too long to pack into a path code.
    #[error("path of {len} steps exceeds the {max}-step path code")]
    PathTooLong {
        /// Number of steps supplied.
        len: usize,
        /// Largest encodable number of steps.
        max: usize,
    },

    /// Table construction or the self-test found a broken invariant.
    #[error("structural invariant violated: {0}")]
    StructuralInvariant(String),

    /// Decomposition was cancelled between digits.
    #[error("decomposition cancelled after {completed} digits")]
    Cancelled {
        /// Number of digits fully processed before the flag was observed.
        completed: usize,
    },
}

impl Error {
    /// Returns true for caller-side precondition failures.
    #[must_use]
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::ResidueOutOfRange(_)
                | Self::CoordinateOutOfRange { .. }
                | Self::LengthMismatch { .. }
                | Self::NegativeInput(_)
                | Self::DigitOutOfRange { .. }
                | Self::UnknownGenerator(_)
                | Self::PathTooLong { .. }
        )
    }

    /// Returns true if a table or self-test invariant failed.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::StructuralInvariant(_))
    }
}

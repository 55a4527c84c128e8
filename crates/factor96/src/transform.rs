//! The four generator transforms of the ring.
//!
//! | Generator | Alias | Action on `(q, d, c)` | Order |
//! |-----------|-------|------------------------|-------|
//! | G1 | R (rotate) | `q → q + 1 mod 4` | 4 |
//! | G2 | D (triality) | `d → d + 1 mod 3` | 3 |
//! | G3 | T (twist) | `c → c + 1 mod 8` | 8 |
//! | G4 | M (mirror) | `d → -d mod 3` (1 ↔ 2, 0 fixed) | 2 |
//!
//! G1 and G2 rotate their coordinate by convolving basis vectors in the
//! group algebras [`Z4`] and [`Z3`]. Each generator is a bijection on
//! `[0, 96)` and together they act transitively: from any residue every
//! other residue is reachable.
//!
//! # Example
//!
//! ```
//! use uor_factor96::{Generator, RingElement};
//!
//! let x = RingElement::new(37).unwrap(); // (1, 1, 5)
//! assert_eq!(Generator::G1.apply(x).value(), 61); // (2, 1, 5)
//! assert_eq!(Generator::G4.apply(x).value(), 45); // (1, 2, 5)
//! assert_eq!(Generator::G3.apply_steps(8, x), x);
//! ```

use crate::algebra::{Z3, Z4};
use crate::core::constants::{CONTEXTS, MODALITIES, QUADRANTS};
use crate::core::element::{Coordinates, RingElement};
use crate::error::Error;
use core::fmt;
use core::str::FromStr;

/// One of the four generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Generator {
    /// Quadrant rotation, order 4.
    G1 = 0,
    /// Modality rotation, order 3.
    G2 = 1,
    /// Context rotation, order 8.
    G3 = 2,
    /// Modality reflection, order 2.
    G4 = 3,
}

impl Generator {
    /// All generators in BFS expansion order.
    pub const ALL: [Self; 4] = [Self::G1, Self::G2, Self::G3, Self::G4];

    /// Order of the generator as a permutation of the ring.
    #[inline]
    #[must_use]
    pub const fn order(self) -> u32 {
        match self {
            Self::G1 => QUADRANTS as u32,
            Self::G2 => MODALITIES as u32,
            Self::G3 => CONTEXTS as u32,
            Self::G4 => 2,
        }
    }

    /// Two-bit identifier used by path encoding.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Generator::id`] (only the low two bits are read).
    #[inline]
    #[must_use]
    pub const fn from_id(id: u8) -> Self {
        match id & 0b11 {
            0 => Self::G1,
            1 => Self::G2,
            2 => Self::G3,
            _ => Self::G4,
        }
    }

    /// Short name (`G1`..`G4`).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::G1 => "G1",
            Self::G2 => "G2",
            Self::G3 => "G3",
            Self::G4 => "G4",
        }
    }

    /// Applies the generator once.
    #[must_use]
    pub fn apply(self, x: RingElement) -> RingElement {
        let c = x.decompose();
        let (q, d, k) = (c.quadrant(), c.modality(), c.context());
        let (q, d, k) = match self {
            Self::G1 => (Z4::rotate_basis(q as usize, 1) as u8, d, k),
            Self::G2 => (q, Z3::rotate_basis(d as usize, 1) as u8, k),
            Self::G3 => (q, d, (k + 1) % CONTEXTS as u8),
            Self::G4 => (q, mirror(d), k),
        };
        Coordinates::from_valid(q, d, k).compose()
    }

    /// Applies the generator `steps` times; negative steps apply the inverse.
    ///
    /// Steps are reduced modulo the generator's order first.
    #[must_use]
    pub fn apply_steps(self, steps: i64, x: RingElement) -> RingElement {
        let n = steps.rem_euclid(self.order() as i64);
        (0..n).fold(x, |acc, _| self.apply(acc))
    }

    /// Applies the inverse generator once.
    #[must_use]
    pub fn inverse_apply(self, x: RingElement) -> RingElement {
        self.apply_steps(-1, x)
    }
}

impl fmt::Display for Generator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Generator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "G1" | "g1" | "R" | "r" => Ok(Self::G1),
            "G2" | "g2" | "D" | "d" => Ok(Self::G2),
            "G3" | "g3" | "T" | "t" => Ok(Self::G3),
            "G4" | "g4" | "M" | "m" => Ok(Self::G4),
            other => Err(Error::UnknownGenerator(other.to_string())),
        }
    }
}

#[inline]
const fn mirror(d: u8) -> u8 {
    (MODALITIES as u8 - d) % MODALITIES as u8
}

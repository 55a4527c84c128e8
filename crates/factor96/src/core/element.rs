//! Ring elements and their coordinate split.
//!
//! Every residue `r ∈ [0, 96)` splits uniquely as
//!
//! ```text
//! r = 24·q + 8·d + c      q ∈ [0, 4)  d ∈ [0, 3)  c ∈ [0, 8)
//! ```
//!
//! where `q` is the quadrant, `d` the modality and `c` the context.
//! [`RingElement::decompose`] and [`Coordinates::compose`] are mutually
//! inverse bijections.

use super::constants::{CONTEXTS, MODALITIES, MODALITY_STRIDE, QUADRANTS, QUADRANT_STRIDE, RING_ORDER};
use crate::error::{Error, Result};
use core::fmt;

/// A residue of the 96-element ring.
///
/// The wrapped value is always in `[0, 96)`. Checked construction goes
/// through [`RingElement::new`]; [`RingElement::reduce`] is the total
/// mod-96 constructor.
///
/// # Example
///
/// ```
/// use uor_factor96::RingElement;
///
/// let r = RingElement::new(37).unwrap();
/// assert_eq!(r.value(), 37);
/// assert!(RingElement::new(96).is_err());
/// assert_eq!(RingElement::reduce(100).value(), 4);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
#[repr(transparent)]
pub struct RingElement(u8);

impl RingElement {
    /// Additive identity.
    pub const ZERO: Self = Self(0);

    /// Multiplicative identity.
    pub const ONE: Self = Self(1);

    /// Largest residue.
    pub const MAX: Self = Self(RING_ORDER as u8 - 1);

    /// Creates an element, rejecting values outside `[0, 96)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ResidueOutOfRange`] if `value >= 96`.
    #[inline]
    pub const fn new(value: u8) -> Result<Self> {
        if (value as usize) < RING_ORDER {
            Ok(Self(value))
        } else {
            Err(Error::ResidueOutOfRange(value as u64))
        }
    }

    /// Creates an element from any integer by reducing mod 96.
    #[inline]
    #[must_use]
    pub const fn reduce(value: u64) -> Self {
        Self((value % RING_ORDER as u64) as u8)
    }

    /// Returns the residue.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Returns the residue as an array index.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Splits the residue into `(quadrant, modality, context)`.
    ///
    /// # Example
    ///
    /// ```
    /// use uor_factor96::{Coordinates, RingElement};
    ///
    /// let c = RingElement::new(37).unwrap().decompose();
    /// assert_eq!(c, Coordinates::new(1, 1, 5).unwrap());
    /// ```
    #[inline]
    #[must_use]
    pub const fn decompose(self) -> Coordinates {
        let rem = self.0 % QUADRANT_STRIDE;
        Coordinates {
            quadrant: self.0 / QUADRANT_STRIDE,
            modality: rem / MODALITY_STRIDE,
            context: rem % MODALITY_STRIDE,
        }
    }

    /// Iterates over all 96 residues in increasing order.
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..RING_ORDER as u8).map(Self)
    }
}

impl fmt::Debug for RingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RingElement({})", self.0)
    }
}

impl fmt::Display for RingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u8> for RingElement {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl TryFrom<u64> for RingElement {
    type Error = Error;

    fn try_from(value: u64) -> Result<Self> {
        if value < RING_ORDER as u64 {
            Ok(Self(value as u8))
        } else {
            Err(Error::ResidueOutOfRange(value))
        }
    }
}

impl From<RingElement> for u8 {
    fn from(r: RingElement) -> u8 {
        r.0
    }
}

/// The `(quadrant, modality, context)` coordinates of a residue.
///
/// Every value is in range: the only constructors are the checked
/// [`Coordinates::new`] and [`RingElement::decompose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(try_from = "(u8, u8, u8)", into = "(u8, u8, u8)")
)]
pub struct Coordinates {
    quadrant: u8,
    modality: u8,
    context: u8,
}

impl Coordinates {
    /// Creates checked coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CoordinateOutOfRange`] naming the first axis out of bounds.
    pub const fn new(quadrant: u8, modality: u8, context: u8) -> Result<Self> {
        if quadrant as usize >= QUADRANTS {
            return Err(Error::CoordinateOutOfRange {
                axis: "quadrant",
                value: quadrant,
                bound: QUADRANTS as u8,
            });
        }
        if modality as usize >= MODALITIES {
            return Err(Error::CoordinateOutOfRange {
                axis: "modality",
                value: modality,
                bound: MODALITIES as u8,
            });
        }
        if context as usize >= CONTEXTS {
            return Err(Error::CoordinateOutOfRange {
                axis: "context",
                value: context,
                bound: CONTEXTS as u8,
            });
        }
        Ok(Self {
            quadrant,
            modality,
            context,
        })
    }

    /// Coordinates already known to be in range.
    #[inline]
    pub(crate) const fn from_valid(quadrant: u8, modality: u8, context: u8) -> Self {
        debug_assert!((quadrant as usize) < QUADRANTS);
        debug_assert!((modality as usize) < MODALITIES);
        debug_assert!((context as usize) < CONTEXTS);
        Self {
            quadrant,
            modality,
            context,
        }
    }

    /// Quadrant `q ∈ [0, 4)`.
    #[inline]
    #[must_use]
    pub const fn quadrant(self) -> u8 {
        self.quadrant
    }

    /// Modality `d ∈ [0, 3)`.
    #[inline]
    #[must_use]
    pub const fn modality(self) -> u8 {
        self.modality
    }

    /// Context `c ∈ [0, 8)`.
    #[inline]
    #[must_use]
    pub const fn context(self) -> u8 {
        self.context
    }

    /// Recombines the coordinates into a residue, `24q + 8d + c`.
    #[inline]
    #[must_use]
    pub const fn compose(self) -> RingElement {
        RingElement(QUADRANT_STRIDE * self.quadrant + MODALITY_STRIDE * self.modality + self.context)
    }
}

impl TryFrom<(u8, u8, u8)> for Coordinates {
    type Error = Error;

    fn try_from((q, d, c): (u8, u8, u8)) -> Result<Self> {
        Self::new(q, d, c)
    }
}

impl From<Coordinates> for (u8, u8, u8) {
    fn from(c: Coordinates) -> Self {
        (c.quadrant, c.modality, c.context)
    }
}

/// Splits a raw residue into coordinates.
///
/// # Errors
///
/// Returns [`Error::ResidueOutOfRange`] if `n >= 96`.
pub fn decompose(n: u8) -> Result<(u8, u8, u8)> {
    Ok(RingElement::new(n)?.decompose().into())
}

/// Recombines raw coordinates into a residue.
///
/// # Errors
///
/// Returns [`Error::CoordinateOutOfRange`] if any coordinate is out of bounds.
pub fn compose(q: u8, d: u8, c: u8) -> Result<u8> {
    Ok(Coordinates::new(q, d, c)?.compose().value())
}

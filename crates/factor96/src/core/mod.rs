//! Core data types and constants.
//!
//! - [`element::RingElement`]: a residue in `[0, 96)`
//! - [`element::Coordinates`]: the `(quadrant, modality, context)` split of a residue
//! - [`constants`]: axis sizes and derived values
//! - [`ring`]: modular arithmetic over the ring

pub mod constants;
pub mod element;
pub mod ring;

//! Constants of the 96-element ring.
//!
//! The ring size factors as the product of the three coordinate axes:
//! quadrant (4) × modality (3) × context (8) = 96. Every other constant is
//! derived from these three.

/// Quadrant axis size (order of generator G1).
pub const QUADRANTS: usize = 4;

/// Modality axis size (order of generator G2).
pub const MODALITIES: usize = 3;

/// Context axis size (order of generator G3).
pub const CONTEXTS: usize = 8;

/// Ring size (96 = 4 × 3 × 8).
pub const RING_ORDER: usize = QUADRANTS * MODALITIES * CONTEXTS;

/// Stride of the quadrant coordinate in `element = 24q + 8d + c`.
pub const QUADRANT_STRIDE: u8 = (MODALITIES * CONTEXTS) as u8; // 24

/// Stride of the modality coordinate in `element = 24q + 8d + c`.
pub const MODALITY_STRIDE: u8 = CONTEXTS as u8; // 8

/// Number of units of the ring, φ(96) = 32.
pub const UNIT_COUNT: usize = 32;

/// Number of residues classified as prime (the units other than 1).
pub const PRIME_COUNT: usize = UNIT_COUNT - 1;

/// Canonical BFS root of the orbit index.
pub const CANONICAL_ROOT: u8 = 0;

/// Eccentricity of the canonical root in the orbit graph.
///
/// From `0 = (0, 0, 0)` the farthest element is `(3, 2, 7)`:
/// 3 quadrant steps + 2 modality steps + 7 context steps.
pub const ORBIT_DIAMETER: u8 = 12;

/// Bits per base-96 digit, log2(96).
pub const BITS_PER_DIGIT: f64 = 6.584_962_500_721_156;

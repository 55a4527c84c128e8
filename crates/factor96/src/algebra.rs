//! Group algebras of the cyclic groups ℤ₄ and ℤ₃.
//!
//! An element of ℝ[ℤₙ] is a length-`n` coefficient vector; multiplication
//! is cyclic convolution:
//!
//! ```text
//! (a ⋆ b)[k] = Σᵢ a[i] · b[(k - i) mod n]
//! ```
//!
//! The basis vector `eⱼ` stands for the group element `j`, and
//! `eᵢ ⋆ eⱼ = e₍ᵢ₊ⱼ₎ mod n`. Generators G1 and G2 are built on this identity.
//!
//! Coefficients are `i64` with wrapping arithmetic, so convolution stays
//! total, associative and commutative for any input.
//!
//! # Example
//!
//! ```
//! use uor_factor96::algebra::{multiply_order4, Z4};
//!
//! let a = [1, 2, 0, 0];
//! let b = [0, 1, 0, 0];
//! assert_eq!(multiply_order4(&a, &b).unwrap(), vec![0, 1, 2, 0]);
//!
//! assert_eq!(Z4::basis(3).multiply(&Z4::basis(2)), Z4::basis(1));
//! ```

use crate::error::{Error, Result};

/// Element of the group algebra of the cyclic group of order `N`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CyclicElement<const N: usize> {
    coeffs: [i64; N],
}

/// Group algebra of ℤ₄ (quadrant rotations).
pub type Z4 = CyclicElement<4>;

/// Group algebra of ℤ₃ (modality rotations).
pub type Z3 = CyclicElement<3>;

impl<const N: usize> CyclicElement<N> {
    /// Group order.
    pub const ORDER: usize = N;

    /// Wraps a coefficient array.
    #[inline]
    #[must_use]
    pub const fn new(coeffs: [i64; N]) -> Self {
        Self { coeffs }
    }

    /// Builds an element from a slice of exactly `N` coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LengthMismatch`] if `coeffs.len() != N`.
    pub fn from_slice(coeffs: &[i64]) -> Result<Self> {
        let coeffs: [i64; N] = coeffs.try_into().map_err(|_| Error::LengthMismatch {
            expected: N,
            actual: coeffs.len(),
        })?;
        Ok(Self { coeffs })
    }

    /// Multiplicative identity `e₀`.
    #[inline]
    #[must_use]
    pub const fn identity() -> Self {
        Self::basis(0)
    }

    /// Basis vector `e₍ⱼ mod N₎`.
    #[inline]
    #[must_use]
    pub const fn basis(j: usize) -> Self {
        let mut coeffs = [0i64; N];
        coeffs[j % N] = 1;
        Self { coeffs }
    }

    /// Coefficient vector.
    #[inline]
    #[must_use]
    pub const fn coeffs(&self) -> &[i64; N] {
        &self.coeffs
    }

    /// Cyclic convolution `self ⋆ other`.
    #[must_use]
    pub fn multiply(&self, other: &Self) -> Self {
        let mut out = [0i64; N];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                let k = (i + j) % N;
                out[k] = out[k].wrapping_add(a.wrapping_mul(b));
            }
        }
        Self { coeffs: out }
    }

    /// `self` convolved with itself `k - 1` times; `power(0)` is the identity.
    #[must_use]
    pub fn power(&self, k: u32) -> Self {
        if k == 0 {
            return Self::identity();
        }
        let mut acc = *self;
        for _ in 1..k {
            acc = acc.multiply(self);
        }
        acc
    }

    /// Index of the largest coefficient (first on ties).
    ///
    /// For a basis vector `eⱼ` this is `j`, which is how the generators
    /// read a rotated coordinate back out of the algebra.
    #[must_use]
    pub fn leading_index(&self) -> usize {
        let mut best = 0;
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c > self.coeffs[best] {
                best = i;
            }
        }
        best
    }

    /// Rotates the basis index `j` by `shift` steps through the algebra.
    ///
    /// `eⱼ · eₛ = e₍ⱼ₊ₛ₎ mod N`, so this always equals `(j + shift) % N`.
    #[inline]
    #[must_use]
    pub fn rotate_basis(j: usize, shift: usize) -> usize {
        Self::basis(j).multiply(&Self::basis(shift)).leading_index()
    }
}

impl<const N: usize> Default for CyclicElement<N> {
    fn default() -> Self {
        Self::identity()
    }
}

fn convolve_checked<const N: usize>(a: &[i64], b: &[i64]) -> Result<Vec<i64>> {
    let a = CyclicElement::<N>::from_slice(a)?;
    let b = CyclicElement::<N>::from_slice(b)?;
    Ok(a.multiply(&b).coeffs.to_vec())
}

/// Cyclic convolution of two length-4 vectors.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] unless both inputs have length 4.
pub fn multiply_order4(a: &[i64], b: &[i64]) -> Result<Vec<i64>> {
    convolve_checked::<4>(a, b)
}

/// Cyclic convolution of two length-3 vectors.
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] unless both inputs have length 3.
pub fn multiply_order3(a: &[i64], b: &[i64]) -> Result<Vec<i64>> {
    convolve_checked::<3>(a, b)
}

/// Power in the group algebra whose order is the input length (3 or 4).
///
/// # Errors
///
/// Returns [`Error::LengthMismatch`] for any other length.
pub fn power(a: &[i64], k: u32) -> Result<Vec<i64>> {
    match a.len() {
        4 => Ok(Z4::from_slice(a)?.power(k).coeffs.to_vec()),
        3 => Ok(Z3::from_slice(a)?.power(k).coeffs.to_vec()),
        actual => Err(Error::LengthMismatch {
            expected: 4,
            actual,
        }),
    }
}

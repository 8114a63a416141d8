//! Key matrices invertible modulo 26
//!
//! 26 = 2 × 13, so a matrix is invertible mod 26 exactly when it is
//! invertible over GF(2) and over GF(13). The inverse is computed in both
//! fields by Gauss-Jordan elimination and recombined with the CRT.

use crate::error::{CryptoError, CryptoResult};

/// Modulus of the matrix cipher arithmetic
pub const MODULUS: i64 = 26;

const PRIME_FACTORS: (i64, i64) = (2, 13);

/// A square key matrix, validated invertible modulo 26 at construction
///
/// Entries are stored reduced into `0..26`; this does not change any
/// product reduced mod 26.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMatrix {
    dimension: usize,
    entries: Vec<i64>,
    inverse: Vec<i64>,
    determinant: i64,
}

impl KeyMatrix {
    /// Validate a key matrix and precompute its inverse mod 26
    ///
    /// # Errors
    ///
    /// * `InvalidParameter` if the matrix is empty, not square, or has a
    ///   dimension of 26 or more (PKCS#7 pad bytes must stay below the
    ///   modulus to survive reduction)
    /// * `MatrixNotInvertibleError` if the determinant shares a factor with 26
    pub fn new(rows: Vec<Vec<i64>>) -> CryptoResult<Self> {
        let dimension = rows.len();
        if dimension == 0 {
            return Err(CryptoError::invalid_parameter(
                "key_matrix",
                "a non-empty square matrix",
                "0 rows",
            ));
        }
        if dimension >= MODULUS as usize {
            return Err(CryptoError::invalid_parameter(
                "key_matrix",
                "dimension below 26",
                &format!("dimension {}", dimension),
            ));
        }
        if let Some(row) = rows.iter().find(|row| row.len() != dimension) {
            return Err(CryptoError::invalid_parameter(
                "key_matrix",
                &format!("{} columns per row", dimension),
                &format!("{} columns", row.len()),
            ));
        }

        let entries: Vec<i64> = rows
            .iter()
            .flatten()
            .map(|value| value.rem_euclid(MODULUS))
            .collect();

        let (p, q) = PRIME_FACTORS;
        let (det_p, inverse_p) = invert_mod_prime(&entries, dimension, p);
        let (det_q, inverse_q) = invert_mod_prime(&entries, dimension, q);
        let determinant = crt(det_p, det_q);

        match (inverse_p, inverse_q) {
            (Some(inverse_p), Some(inverse_q)) => {
                let inverse = inverse_p
                    .iter()
                    .zip(&inverse_q)
                    .map(|(&a, &b)| crt(a, b))
                    .collect();

                Ok(Self {
                    dimension,
                    entries,
                    inverse,
                    determinant,
                })
            }
            _ => Err(CryptoError::matrix_not_invertible(determinant, MODULUS)),
        }
    }

    /// Convenience constructor from a fixed-size array
    pub fn from_array<const N: usize>(rows: [[i64; N]; N]) -> CryptoResult<Self> {
        Self::new(rows.iter().map(|row| row.to_vec()).collect())
    }

    /// Side length `n` of the matrix
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Determinant reduced mod 26
    pub fn determinant_mod(&self) -> i64 {
        self.determinant
    }

    /// Rows of the key matrix, reduced mod 26
    pub fn rows(&self) -> Vec<Vec<i64>> {
        self.entries.chunks(self.dimension).map(<[i64]>::to_vec).collect()
    }

    /// Rows of the inverse matrix mod 26
    pub fn inverse(&self) -> Vec<Vec<i64>> {
        self.inverse.chunks(self.dimension).map(<[i64]>::to_vec).collect()
    }

    pub(crate) fn forward_entries(&self) -> &[i64] {
        &self.entries
    }

    pub(crate) fn inverse_entries(&self) -> &[i64] {
        &self.inverse
    }
}

/// Combine residues mod 2 and mod 13 into a residue mod 26
fn crt(mod_two: i64, mod_thirteen: i64) -> i64 {
    // 13 ≡ 1 (mod 2)
    mod_thirteen + 13 * (mod_two - mod_thirteen).rem_euclid(2)
}

fn pow_mod(base: i64, mut exponent: i64, modulus: i64) -> i64 {
    let mut result = 1 % modulus;
    let mut base = base.rem_euclid(modulus);
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % modulus;
        }
        base = base * base % modulus;
        exponent >>= 1;
    }
    result
}

/// Gauss-Jordan elimination over GF(p)
///
/// Returns the determinant mod p and, when it is non-zero, the inverse in
/// row-major order.
fn invert_mod_prime(entries: &[i64], n: usize, p: i64) -> (i64, Option<Vec<i64>>) {
    let mut a: Vec<i64> = entries.iter().map(|value| value.rem_euclid(p)).collect();
    let mut inv = vec![0i64; n * n];
    for i in 0..n {
        inv[i * n + i] = 1;
    }
    let mut det = 1i64;

    for col in 0..n {
        let pivot_row = match (col..n).find(|&row| a[row * n + col] != 0) {
            Some(row) => row,
            None => return (0, None),
        };

        if pivot_row != col {
            for j in 0..n {
                a.swap(pivot_row * n + j, col * n + j);
                inv.swap(pivot_row * n + j, col * n + j);
            }
            det = (p - det) % p;
        }

        let pivot = a[col * n + col];
        det = det * pivot % p;

        // Fermat inverse, p is prime
        let pivot_inv = pow_mod(pivot, p - 2, p);
        for j in 0..n {
            a[col * n + j] = a[col * n + j] * pivot_inv % p;
            inv[col * n + j] = inv[col * n + j] * pivot_inv % p;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = a[row * n + col];
            if factor == 0 {
                continue;
            }
            for j in 0..n {
                a[row * n + j] = (a[row * n + j] - factor * a[col * n + j]).rem_euclid(p);
                inv[row * n + j] = (inv[row * n + j] - factor * inv[col * n + j]).rem_euclid(p);
            }
        }
    }

    (det, Some(inv))
}

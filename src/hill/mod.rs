/*!
 * Matrix substitution cipher
 *
 * A polygraphic substitution cipher using modular matrix multiplication
 * over a key matrix invertible mod 26. Independent of the hybrid envelope.
 */

mod hill;
mod matrix;

pub use hill::*;
pub use matrix::{KeyMatrix, MODULUS};

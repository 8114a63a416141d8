use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::hill::matrix::{KeyMatrix, MODULUS};
use crate::utils;

/// Byte-oriented Hill cipher over a fixed key matrix
///
/// Unlike the classical cipher, which works on alphabet indices 0-25, this
/// variant multiplies raw byte values and reduces mod 26. A byte `b`
/// therefore decrypts to `b mod 26`; only inputs whose bytes are all below
/// 26 survive a round trip unchanged.
///
/// # Examples
///
/// ```
/// use hycrypt::hill::HillCipher;
///
/// let cipher = HillCipher::new(vec![vec![3, 3], vec![2, 5]]).unwrap();
/// let ciphertext = cipher.encrypt("\u{7}\u{3}\u{13}");
/// assert_eq!(cipher.decrypt(&ciphertext).unwrap(), "\u{7}\u{3}\u{13}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HillCipher {
    key: KeyMatrix,
}

impl HillCipher {
    /// Validate `rows` as a key matrix and build a cipher around it
    pub fn new(rows: Vec<Vec<i64>>) -> CryptoResult<Self> {
        Ok(Self::from_key(KeyMatrix::new(rows)?))
    }

    /// Build a cipher around an already validated key matrix
    pub fn from_key(key: KeyMatrix) -> Self {
        Self { key }
    }

    /// The validated key matrix
    pub fn key(&self) -> &KeyMatrix {
        &self.key
    }

    /// Encrypt text, see [`matrix_encrypt`]
    pub fn encrypt(&self, plaintext: &str) -> String {
        matrix_encrypt(plaintext, &self.key)
    }

    /// Decrypt text produced by [`HillCipher::encrypt`], see [`matrix_decrypt`]
    pub fn decrypt(&self, ciphertext: &str) -> CryptoResult<String> {
        matrix_decrypt(ciphertext, &self.key)
    }
}

/// Encrypt text with the byte-oriented Hill cipher
///
/// PKCS#7-pads the UTF-8 bytes to a multiple of the matrix dimension,
/// multiplies each row vector by the key matrix mod 26 and base64-encodes
/// the result.
pub fn matrix_encrypt(plaintext: &str, key: &KeyMatrix) -> String {
    let n = key.dimension();
    let padded = utils::pkcs7_pad(plaintext.as_bytes(), n);
    let transformed = transform_rows(&padded, key.forward_entries(), n);
    base64::encode(transformed)
}

/// Decrypt text produced by [`matrix_encrypt`]
///
/// # Errors
///
/// * `DecodeError` if the input is not valid base64
/// * `InvalidParameter` if the decoded length is zero or not a multiple of
///   the matrix dimension
/// * `PaddingError` if the recovered PKCS#7 padding is malformed
pub fn matrix_decrypt(ciphertext: &str, key: &KeyMatrix) -> CryptoResult<String> {
    let n = key.dimension();
    let bytes = base64::decode(ciphertext.trim())
        .map_err(|e| CryptoError::decode_error("ciphertext", &e.to_string()))?;

    if bytes.is_empty() || bytes.len() % n != 0 {
        return Err(CryptoError::invalid_parameter(
            "ciphertext",
            &format!("a non-empty multiple of {} bytes", n),
            &format!("{} bytes", bytes.len()),
        ));
    }

    let transformed = transform_rows(&bytes, key.inverse_entries(), n);
    let unpadded = utils::pkcs7_unpad(&transformed, n).ok_or_else(|| {
        CryptoError::padding_error("matrix cipher PKCS#7 unpad", error_codes::MATRIX_PADDING_INVALID)
    })?;

    Ok(String::from_utf8_lossy(unpadded).into_owned())
}

/// Multiply each `n`-byte row vector by `matrix` (row-major) mod 26
fn transform_rows(bytes: &[u8], matrix: &[i64], n: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut row_out = vec![0u8; n];

    for row in bytes.chunks_exact(n) {
        for (j, cell) in row_out.iter_mut().enumerate() {
            let mut sum = 0i64;
            for (i, &byte) in row.iter().enumerate() {
                sum += i64::from(byte) * matrix[i * n + j];
            }
            *cell = sum.rem_euclid(MODULUS) as u8;
        }
        out.extend_from_slice(&row_out);
    }

    out
}

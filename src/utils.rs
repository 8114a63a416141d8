//! Utilities for cryptographic operations

use subtle::ConstantTimeEq;

use crate::error::CryptoResult;

/// Fill a buffer of the specified length from the operating system RNG
///
/// Fails only when the system randomness source is unavailable.
pub fn random_bytes(length: usize) -> CryptoResult<Vec<u8>> {
    let mut bytes = vec![0u8; length];
    getrandom::getrandom(&mut bytes)?;
    Ok(bytes)
}

/// Constant-time comparison of two byte slices to avoid timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Concatenate byte slices into a single vector
pub fn concat_bytes(slices: &[&[u8]]) -> Vec<u8> {
    let total = slices.iter().map(|s| s.len()).sum();
    let mut out = Vec::with_capacity(total);
    for slice in slices {
        out.extend_from_slice(slice);
    }
    out
}

/// Append PKCS#7 padding for an arbitrary block size (1..=255)
///
/// A full block of padding is appended when the input is already aligned.
pub fn pkcs7_pad(data: &[u8], block_size: usize) -> Vec<u8> {
    debug_assert!((1..=255).contains(&block_size));

    let pad_len = block_size - (data.len() % block_size);
    let mut padded = Vec::with_capacity(data.len() + pad_len);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad_len, pad_len as u8);
    padded
}

/// Strip PKCS#7 padding, returning `None` when the padding is malformed
pub fn pkcs7_unpad(data: &[u8], block_size: usize) -> Option<&[u8]> {
    if data.is_empty() || data.len() % block_size != 0 {
        return None;
    }

    let pad_len = data[data.len() - 1] as usize;
    if pad_len == 0 || pad_len > block_size || pad_len > data.len() {
        return None;
    }

    let (body, tail) = data.split_at(data.len() - pad_len);
    let expected = vec![pad_len as u8; pad_len];
    if constant_time_eq(tail, &expected) {
        Some(body)
    } else {
        None
    }
}

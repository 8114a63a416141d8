/*!
 * Hycrypt Cryptography Module
 *
 * This crate implements a hybrid encryption scheme: an RSA keypair is used
 * only to wrap a short-lived AES session key, while the payload itself is
 * encrypted symmetrically.
 *
 * The algorithms used are:
 *
 * - RSA-2048 with OAEP padding for session-key wrapping
 * - AES-128-CBC with PKCS#7 padding for bulk encryption
 * - Base64 for transporting the two binary envelope fields
 *
 * The scheme provides confidentiality only. There is no integrity tag, so
 * tampering is detected only by the OAEP and PKCS#7 padding checks.
 *
 * A byte-oriented Hill cipher is provided separately in [`hill`].
 */

/// AES-128-CBC implementation for symmetric encryption
pub mod aes;

/// RSA key generation, PEM handling and OAEP key wrapping
pub mod rsa_oaep;

/// Hybrid envelope encryption
pub mod hybrid;

/// Matrix substitution cipher over an invertible key matrix mod 26
pub mod hill;

/// Best-effort ASCII cleanup of decrypted text
pub mod sanitize;

/// Common error types for the cryptography module
pub mod error;

/// Utilities for cryptographic operations
pub mod utils;

// Re-export main types for convenience
pub use error::{CryptoError, CryptoResult};
pub use hill::{HillCipher, KeyMatrix};
pub use hybrid::{decrypt_hybrid, encrypt_hybrid, Envelope, HybridEncryptionParameters};
pub use rsa_oaep::{generate_keypair, OaepDigest, RsaKeyPair, RsaKeySize};
pub use sanitize::sanitize;

/// Initialize the cryptography module.
///
/// Checks that the operating system randomness source is usable. Key
/// generation and encryption would otherwise fail later with the same
/// error.
///
/// # Example
///
/// ```
/// use hycrypt::prelude::*;
///
/// fn main() -> Result<(), CryptoError> {
///     init()?;
///
///     let key_pair = generate_keypair()?;
///     let envelope = encrypt_hybrid("HELLO", key_pair.public_key())?;
///     assert_eq!(decrypt_hybrid(&envelope, key_pair.private_key())?, "HELLO");
///     Ok(())
/// }
/// ```
pub fn init() -> Result<(), CryptoError> {
    utils::random_bytes(1)?;
    log::debug!("hycrypt initialized");
    Ok(())
}

/// Provides a simplified interface to the most commonly used operations.
pub mod prelude {
    pub use crate::decrypt_hybrid;
    pub use crate::encrypt_hybrid;
    pub use crate::generate_keypair;
    pub use crate::hill::{matrix_decrypt, matrix_encrypt};
    pub use crate::init;
    pub use crate::CryptoError;
    pub use crate::CryptoResult;
    pub use crate::Envelope;
    pub use crate::HillCipher;
    pub use crate::HybridEncryptionParameters;
    pub use crate::KeyMatrix;
    pub use crate::OaepDigest;
    pub use crate::RsaKeyPair;
    pub use crate::RsaKeySize;
}

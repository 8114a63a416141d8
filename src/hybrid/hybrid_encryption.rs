//! Hybrid Encryption
//!
//! This module combines RSA-OAEP session-key wrapping with AES-128-CBC bulk
//! encryption to produce and consume [`Envelope`]s.

use serde::{Deserialize, Serialize};

use crate::aes::{self, SessionKey};
use crate::error::CryptoResult;
use crate::hybrid::envelope::Envelope;
use crate::rsa_oaep::{self, OaepDigest, RsaKeyPair, RsaKeySize, RsaPrivateKey, RsaPublicKey};
use crate::sanitize::sanitize;

/// Parameters for hybrid encryption
///
/// Both peers must agree on these out of band; they are not carried in the
/// envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HybridEncryptionParameters {
    /// RSA modulus size used when generating keypairs
    #[serde(default)]
    pub key_size: RsaKeySize,
    /// Digest for the OAEP key wrap
    #[serde(default)]
    pub oaep_digest: OaepDigest,
}

impl HybridEncryptionParameters {
    /// Load parameters from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> CryptoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Generate a keypair of the configured size
    pub fn generate_keypair(&self) -> CryptoResult<RsaKeyPair> {
        RsaKeyPair::generate_with_size(self.key_size)
    }
}

/// Encrypt a string for the holder of `public_key`
///
/// This function:
/// 1. Generates a fresh 16-byte session key
/// 2. Encrypts the UTF-8 plaintext with AES-128-CBC under a fresh IV
/// 3. Wraps the session key with RSA-OAEP
/// 4. Returns both results base64-encoded as an [`Envelope`]
///
/// # Examples
///
/// ```
/// use hycrypt::hybrid::{decrypt_hybrid, encrypt_hybrid};
/// use hycrypt::rsa_oaep::RsaKeyPair;
///
/// let key_pair = RsaKeyPair::generate().unwrap();
/// let envelope = encrypt_hybrid("HELLO", key_pair.public_key()).unwrap();
/// let plaintext = decrypt_hybrid(&envelope, key_pair.private_key()).unwrap();
/// assert_eq!(plaintext, "HELLO");
/// ```
pub fn encrypt_hybrid(plaintext: &str, public_key: &RsaPublicKey) -> CryptoResult<Envelope> {
    encrypt_hybrid_with_params(plaintext, public_key, &HybridEncryptionParameters::default())
}

/// Encrypt a string with explicit parameters
pub fn encrypt_hybrid_with_params(
    plaintext: &str,
    public_key: &RsaPublicKey,
    params: &HybridEncryptionParameters,
) -> CryptoResult<Envelope> {
    let session_key = SessionKey::generate()?;

    let sealed = aes::seal(plaintext.as_bytes(), &session_key)?;
    let wrapped_key = rsa_oaep::wrap_session_key_with(&session_key, public_key, params.oaep_digest)?;

    log::debug!(
        "Hybrid encrypt: {} plaintext bytes, {} ciphertext bytes, {} wrapped key bytes ({})",
        plaintext.len(),
        sealed.len(),
        wrapped_key.len(),
        params.oaep_digest
    );

    Ok(Envelope::from_binary(&sealed, &wrapped_key))
}

/// Decrypt an envelope with the recipient's private key
///
/// This function:
/// 1. Base64-decodes both envelope fields
/// 2. Unwraps the session key, which must be exactly 16 bytes
/// 3. Splits off the IV and decrypts with AES-128-CBC
/// 4. Decodes UTF-8 with replacement and strips non-ASCII characters
///
/// The last step is lossy: non-ASCII characters in the original plaintext
/// do not survive the round trip.
///
/// # Errors
///
/// `DecodeError`, `UnwrapError`, `KeyLengthError` or `PaddingError`, each
/// reported before any later step runs.
pub fn decrypt_hybrid(envelope: &Envelope, private_key: &RsaPrivateKey) -> CryptoResult<String> {
    decrypt_hybrid_with_params(envelope, private_key, &HybridEncryptionParameters::default())
}

/// Decrypt an envelope with explicit parameters
pub fn decrypt_hybrid_with_params(
    envelope: &Envelope,
    private_key: &RsaPrivateKey,
    params: &HybridEncryptionParameters,
) -> CryptoResult<String> {
    let (sealed, wrapped_key) = envelope.decode()?;

    let session_key = rsa_oaep::unwrap_session_key_with(&wrapped_key, private_key, params.oaep_digest)?;
    let plaintext = aes::open(&sealed, &session_key)?;

    log::debug!(
        "Hybrid decrypt: {} ciphertext bytes, {} plaintext bytes",
        sealed.len(),
        plaintext.len()
    );

    Ok(sanitize(&String::from_utf8_lossy(&plaintext)))
}

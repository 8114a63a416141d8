//! RSA key provider
//!
//! Generates the asymmetric keypair used to wrap session keys and moves key
//! material in and out of PEM.

use std::fmt::{self, Display};

use rand::rngs::OsRng;
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey, EncodeRsaPrivateKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey, EncodePublicKey, LineEnding};
use rsa::traits::PublicKeyParts;
use rsa::{RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::error::{error_codes, CryptoError, CryptoResult};

/// Supported RSA modulus sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RsaKeySize {
    /// RSA-2048
    #[default]
    Rsa2048,
    /// RSA-3072
    Rsa3072,
    /// RSA-4096
    Rsa4096,
}

impl RsaKeySize {
    /// Modulus size in bits
    pub fn bits(&self) -> usize {
        match self {
            RsaKeySize::Rsa2048 => 2048,
            RsaKeySize::Rsa3072 => 3072,
            RsaKeySize::Rsa4096 => 4096,
        }
    }
}

impl Display for RsaKeySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RSA-{}", self.bits())
    }
}

/// RSA keypair used to wrap and unwrap session keys
///
/// The keypair is an owned value produced by an explicit factory; it is
/// immutable after generation and can be shared read-only between threads.
/// The private half zeroizes itself on drop.
#[derive(Clone)]
pub struct RsaKeyPair {
    private_key: RsaPrivateKey,
    public_key: RsaPublicKey,
}

impl fmt::Debug for RsaKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RsaKeyPair")
            .field("bits", &self.key_size_bits())
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

impl RsaKeyPair {
    /// Generate a new 2048-bit keypair
    ///
    /// # Errors
    ///
    /// Returns `KeyManagementError` only if the system randomness source
    /// fails, which callers should treat as fatal.
    pub fn generate() -> CryptoResult<Self> {
        Self::generate_with_size(RsaKeySize::default())
    }

    /// Generate a new keypair with the given modulus size
    pub fn generate_with_size(size: RsaKeySize) -> CryptoResult<Self> {
        let private_key = RsaPrivateKey::new(&mut OsRng, size.bits()).map_err(|e| {
            CryptoError::key_management_error(
                "RSA key generation",
                &format!("Failed to generate RSA key: {}", e),
                "RSA",
                error_codes::RSA_KEY_GENERATION_FAILED,
            )
        })?;

        let key_pair = Self::from_private_key(private_key);
        log::info!(
            "Generated {} keypair ({})",
            size,
            key_pair.fingerprint().unwrap_or_else(|_| "no fingerprint".to_string())
        );
        Ok(key_pair)
    }

    /// Wrap an existing private key
    pub fn from_private_key(private_key: RsaPrivateKey) -> Self {
        let public_key = RsaPublicKey::from(&private_key);
        Self {
            private_key,
            public_key,
        }
    }

    /// Import a private key from PEM, accepting PKCS#1 or PKCS#8 encodings
    pub fn from_private_pem(pem: &str) -> CryptoResult<Self> {
        let private_key = RsaPrivateKey::from_pkcs1_pem(pem)
            .or_else(|_| RsaPrivateKey::from_pkcs8_pem(pem))
            .map_err(|e| {
                CryptoError::key_management_error(
                    "PEM import",
                    &format!("Failed to decode RSA private key: {}", e),
                    "RSA",
                    error_codes::PEM_DECODE_FAILED,
                )
            })?;
        Ok(Self::from_private_key(private_key))
    }

    /// The public half, used for wrapping
    pub fn public_key(&self) -> &RsaPublicKey {
        &self.public_key
    }

    /// The private half, used for unwrapping
    pub fn private_key(&self) -> &RsaPrivateKey {
        &self.private_key
    }

    /// Modulus size in bits
    pub fn key_size_bits(&self) -> usize {
        self.public_key.size() * 8
    }

    /// Export the private key as PKCS#1 PEM (`BEGIN RSA PRIVATE KEY`)
    pub fn private_key_pem(&self) -> CryptoResult<Zeroizing<String>> {
        self.private_key
            .to_pkcs1_pem(LineEnding::LF)
            .map_err(|e| {
                CryptoError::key_management_error(
                    "PEM export",
                    &format!("Failed to encode RSA private key: {}", e),
                    "RSA",
                    error_codes::PEM_ENCODE_FAILED,
                )
            })
    }

    /// Export the public key as SPKI PEM (`BEGIN PUBLIC KEY`)
    pub fn public_key_pem(&self) -> CryptoResult<String> {
        public_key_to_pem(&self.public_key)
    }

    /// Hex SHA-256 over the SPKI DER encoding of the public key
    pub fn fingerprint(&self) -> CryptoResult<String> {
        fingerprint(&self.public_key)
    }
}

/// Generate a fresh 2048-bit RSA keypair
pub fn generate_keypair() -> CryptoResult<RsaKeyPair> {
    RsaKeyPair::generate()
}

/// Export a public key as SPKI PEM
pub fn public_key_to_pem(public_key: &RsaPublicKey) -> CryptoResult<String> {
    public_key.to_public_key_pem(LineEnding::LF).map_err(|e| {
        CryptoError::key_management_error(
            "PEM export",
            &format!("Failed to encode RSA public key: {}", e),
            "RSA",
            error_codes::PEM_ENCODE_FAILED,
        )
    })
}

/// Import a public key from PEM, accepting SPKI or PKCS#1 encodings
pub fn public_key_from_pem(pem: &str) -> CryptoResult<RsaPublicKey> {
    RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| {
            CryptoError::key_management_error(
                "PEM import",
                &format!("Failed to decode RSA public key: {}", e),
                "RSA",
                error_codes::PEM_DECODE_FAILED,
            )
        })
}

/// Hex SHA-256 over the SPKI DER encoding of a public key
pub fn fingerprint(public_key: &RsaPublicKey) -> CryptoResult<String> {
    let spki = public_key.to_public_key_der().map_err(|e| {
        CryptoError::key_management_error(
            "fingerprint",
            &format!("Failed to encode RSA public key: {}", e),
            "RSA",
            error_codes::PEM_ENCODE_FAILED,
        )
    })?;
    Ok(hex::encode(Sha256::digest(spki.as_bytes())))
}

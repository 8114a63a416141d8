//! Hybrid RSA/AES Envelope Encryption
//!
//! This module wraps a per-message AES session key with RSA-OAEP and
//! encrypts the payload with AES-128-CBC. The scheme provides
//! confidentiality only: there is no authentication tag, and tampering is
//! detected solely by the OAEP and PKCS#7 padding checks.

mod envelope;
mod hybrid_encryption;
#[cfg(test)]
mod tests;

pub use envelope::Envelope;

pub use hybrid_encryption::{
    decrypt_hybrid,
    decrypt_hybrid_with_params,
    encrypt_hybrid,
    encrypt_hybrid_with_params,
    HybridEncryptionParameters,
};

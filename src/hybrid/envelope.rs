//! Envelope transport format
//!
//! Two base64 text fields that must always travel together:
//!
//! - `cipher_text`: `[iv:16][AES-128-CBC ciphertext]`
//! - `wrapped_key`: RSA-OAEP encryption of the 16-byte session key

use serde::{Deserialize, Serialize};

use crate::error::{CryptoError, CryptoResult};

/// Output of hybrid encryption, input to hybrid decryption
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    /// Base64 of the IV-prefixed symmetric ciphertext
    pub cipher_text: String,
    /// Base64 of the wrapped session key
    #[serde(alias = "encrypted_symmetric_key_rsa")]
    pub wrapped_key: String,
}

impl Envelope {
    /// Build an envelope from two base64 fields as received from a peer
    pub fn new(cipher_text: impl Into<String>, wrapped_key: impl Into<String>) -> Self {
        Self {
            cipher_text: cipher_text.into(),
            wrapped_key: wrapped_key.into(),
        }
    }

    pub(crate) fn from_binary(cipher_text: &[u8], wrapped_key: &[u8]) -> Self {
        Self {
            cipher_text: base64::encode(cipher_text),
            wrapped_key: base64::encode(wrapped_key),
        }
    }

    /// Decode both fields, returning `(cipher_text, wrapped_key)` bytes
    ///
    /// Surrounding whitespace is ignored so that copy-pasted values decode.
    ///
    /// # Errors
    ///
    /// Returns `DecodeError` naming the first field that is not valid base64
    pub fn decode(&self) -> CryptoResult<(Vec<u8>, Vec<u8>)> {
        let cipher_text = decode_field("cipher_text", &self.cipher_text)?;
        let wrapped_key = decode_field("wrapped_key", &self.wrapped_key)?;
        Ok((cipher_text, wrapped_key))
    }

    /// Serialize as a JSON object with `cipher_text` and `wrapped_key` keys
    pub fn to_json(&self) -> CryptoResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parse the JSON form written by [`Envelope::to_json`]
    pub fn from_json(json: &str) -> CryptoResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

fn decode_field(field: &str, value: &str) -> CryptoResult<Vec<u8>> {
    base64::decode(value.trim()).map_err(|e| CryptoError::decode_error(field, &e.to_string()))
}

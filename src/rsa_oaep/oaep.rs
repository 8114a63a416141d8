//! Session key wrapping with RSA-OAEP

use std::fmt::{self, Display};

use rand::rngs::OsRng;
use rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::aes::{SessionKey, SESSION_KEY_SIZE};
use crate::error::{error_codes, CryptoError, CryptoResult};

/// Digest used for both the OAEP label hash and MGF1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OaepDigest {
    /// SHA-1, the default OAEP parameterisation of most RSA toolkits
    #[default]
    Sha1,
    /// SHA-256
    Sha256,
}

impl OaepDigest {
    fn padding(&self) -> Oaep {
        match self {
            OaepDigest::Sha1 => Oaep::new::<sha1::Sha1>(),
            OaepDigest::Sha256 => Oaep::new::<sha2::Sha256>(),
        }
    }
}

impl Display for OaepDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OaepDigest::Sha1 => write!(f, "OAEP-SHA1"),
            OaepDigest::Sha256 => write!(f, "OAEP-SHA256"),
        }
    }
}

/// Wrap a session key under the recipient's public key (OAEP, SHA-1)
pub fn wrap_session_key(key: &SessionKey, public_key: &RsaPublicKey) -> CryptoResult<Vec<u8>> {
    wrap_session_key_with(key, public_key, OaepDigest::default())
}

/// Wrap a session key under the recipient's public key with an explicit digest
pub fn wrap_session_key_with(
    key: &SessionKey,
    public_key: &RsaPublicKey,
    digest: OaepDigest,
) -> CryptoResult<Vec<u8>> {
    public_key
        .encrypt(&mut OsRng, digest.padding(), key.as_bytes())
        .map_err(|e| CryptoError::KeyManagementError {
            operation: "session key wrap".to_string(),
            cause: e.to_string(),
            error_code: error_codes::SESSION_KEY_WRAP_FAILED,
            context: [("padding".to_string(), digest.to_string())].into(),
        })
}

/// Recover a session key wrapped by [`wrap_session_key`]
///
/// # Errors
///
/// * `UnwrapError` if OAEP decoding fails. The error is the same whatever
///   the underlying cause, so it cannot serve as a padding oracle.
/// * `KeyLengthError` if the recovered payload is not exactly 16 bytes.
pub fn unwrap_session_key(wrapped: &[u8], private_key: &RsaPrivateKey) -> CryptoResult<SessionKey> {
    unwrap_session_key_with(wrapped, private_key, OaepDigest::default())
}

/// Recover a wrapped session key with an explicit digest
pub fn unwrap_session_key_with(
    wrapped: &[u8],
    private_key: &RsaPrivateKey,
    digest: OaepDigest,
) -> CryptoResult<SessionKey> {
    let unwrapped = private_key
        .decrypt_blinded(&mut OsRng, digest.padding(), wrapped)
        .map(Zeroizing::new)
        .map_err(|_| {
            log::warn!("Session key unwrap failed");
            CryptoError::unwrap_error()
        })?;

    if unwrapped.len() != SESSION_KEY_SIZE {
        log::warn!(
            "Unwrapped session key has {} bytes, expected {}",
            unwrapped.len(),
            SESSION_KEY_SIZE
        );
        return Err(CryptoError::key_length_error(SESSION_KEY_SIZE, unwrapped.len()));
    }

    SessionKey::from_bytes(&unwrapped)
}

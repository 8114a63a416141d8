use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{error_codes, CryptoError, CryptoResult};
use crate::utils;

type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;
type Aes128CbcDec = cbc::Decryptor<aes::Aes128>;

/// Size of an AES-128 session key in bytes
pub const SESSION_KEY_SIZE: usize = 16;

/// AES block size in bytes
pub const AES_BLOCK_SIZE: usize = 16;

/// Size of the CBC initialization vector in bytes
pub const IV_SIZE: usize = 16;

/// A 16-byte AES-128 session key
///
/// Session keys are generated fresh for every hybrid encryption and are
/// zeroed when dropped. The `Debug` implementation never prints the key.
///
/// # Examples
///
/// ```
/// use hycrypt::aes::SessionKey;
///
/// let key = SessionKey::generate().unwrap();
/// assert_eq!(key.as_bytes().len(), 16);
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SessionKey([u8; SESSION_KEY_SIZE]);

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SessionKey").field(&"[REDACTED]").finish()
    }
}

impl SessionKey {
    /// Generate a session key from the operating system RNG
    pub fn generate() -> CryptoResult<Self> {
        let mut bytes = [0u8; SESSION_KEY_SIZE];
        getrandom::getrandom(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Build a session key from raw bytes
    ///
    /// # Errors
    ///
    /// Returns `KeyLengthError` unless `bytes` is exactly 16 bytes long
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let array: [u8; SESSION_KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| CryptoError::key_length_error(SESSION_KEY_SIZE, bytes.len()))?;
        Ok(Self(array))
    }

    /// Borrow the raw key bytes
    pub fn as_bytes(&self) -> &[u8; SESSION_KEY_SIZE] {
        &self.0
    }
}

/// A 16-byte CBC initialization vector
///
/// The IV is generated once per encryption and must be carried to the
/// decrypting party alongside the ciphertext.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Iv([u8; IV_SIZE]);

impl Iv {
    /// Generate a random IV from the operating system RNG
    pub fn generate() -> CryptoResult<Self> {
        let mut bytes = [0u8; IV_SIZE];
        getrandom::getrandom(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Build an IV from raw bytes
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` unless `bytes` is exactly 16 bytes long
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let array: [u8; IV_SIZE] = bytes.try_into().map_err(|_| {
            CryptoError::invalid_parameter("iv", "16 bytes", &format!("{} bytes", bytes.len()))
        })?;
        Ok(Self(array))
    }

    /// Borrow the raw IV bytes
    pub fn as_bytes(&self) -> &[u8; IV_SIZE] {
        &self.0
    }
}

/// AES-128-CBC cipher with PKCS#7 padding
///
/// Provides confidentiality only. There is no authentication tag, so a
/// tampered ciphertext is detected only when it corrupts the padding.
///
/// # Examples
///
/// ```
/// use hycrypt::aes::{AesCbc, Iv, SessionKey};
///
/// let key = SessionKey::generate().unwrap();
/// let cipher = AesCbc::new(&key);
/// let iv = Iv::generate().unwrap();
///
/// let ciphertext = cipher.encrypt(b"Secret message", &iv);
/// let decrypted = cipher.decrypt(&ciphertext, &iv).unwrap();
/// assert_eq!(decrypted, b"Secret message");
/// ```
#[derive(Clone)]
pub struct AesCbc {
    key: SessionKey,
}

impl std::fmt::Debug for AesCbc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AesCbc")
            .field("cipher", &"[AES-128-CBC Cipher]")
            .finish()
    }
}

impl AesCbc {
    /// Create a new AES-CBC cipher for the given session key
    pub fn new(key: &SessionKey) -> Self {
        Self { key: key.clone() }
    }

    /// Pad and encrypt `plaintext` under the given IV
    ///
    /// The output length is always a non-zero multiple of the block size,
    /// since PKCS#7 adds a full block when the input is already aligned.
    pub fn encrypt(&self, plaintext: &[u8], iv: &Iv) -> Vec<u8> {
        Aes128CbcEnc::new(self.key.as_bytes().into(), iv.as_bytes().into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext)
    }

    /// Decrypt `ciphertext` and strip its PKCS#7 padding
    ///
    /// # Errors
    ///
    /// Returns `PaddingError` if the ciphertext is empty, not a multiple of
    /// the block size, or ends in malformed padding. Malformed padding is the
    /// usual symptom of a wrong key or IV.
    pub fn decrypt(&self, ciphertext: &[u8], iv: &Iv) -> CryptoResult<Vec<u8>> {
        if ciphertext.is_empty() || ciphertext.len() % AES_BLOCK_SIZE != 0 {
            return Err(CryptoError::padding_error(
                "ciphertext is not block aligned",
                error_codes::AES_CIPHERTEXT_TRUNCATED,
            ));
        }

        Aes128CbcDec::new(self.key.as_bytes().into(), iv.as_bytes().into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| {
                log::warn!("AES-CBC padding check failed");
                CryptoError::padding_error("PKCS#7 unpad", error_codes::AES_PADDING_INVALID)
            })
    }
}

/// Encrypt data under a session key with a freshly generated IV
///
/// Returns the ciphertext together with the IV that was used. Both are
/// required for decryption.
///
/// # Examples
///
/// ```
/// use hycrypt::aes::{decrypt, encrypt, SessionKey};
///
/// let key = SessionKey::generate().unwrap();
/// let (ciphertext, iv) = encrypt(b"Top secret information", &key).unwrap();
/// let decrypted = decrypt(&ciphertext, &key, &iv).unwrap();
/// assert_eq!(decrypted, b"Top secret information");
/// ```
pub fn encrypt(plaintext: &[u8], key: &SessionKey) -> CryptoResult<(Vec<u8>, Iv)> {
    let iv = Iv::generate()?;
    let ciphertext = encrypt_with_iv(plaintext, key, &iv);
    Ok((ciphertext, iv))
}

/// Encrypt data under a session key with a caller-supplied IV
pub fn encrypt_with_iv(plaintext: &[u8], key: &SessionKey, iv: &Iv) -> Vec<u8> {
    AesCbc::new(key).encrypt(plaintext, iv)
}

/// Decrypt data produced by [`encrypt`] using the same key and IV
pub fn decrypt(ciphertext: &[u8], key: &SessionKey, iv: &Iv) -> CryptoResult<Vec<u8>> {
    AesCbc::new(key).decrypt(ciphertext, iv)
}

/// Encrypt and prefix the IV: `[iv:16][ciphertext]`
pub fn seal(plaintext: &[u8], key: &SessionKey) -> CryptoResult<Vec<u8>> {
    let (ciphertext, iv) = encrypt(plaintext, key)?;
    Ok(utils::concat_bytes(&[&iv.as_bytes()[..], &ciphertext[..]]))
}

/// Split the IV prefix written by [`seal`] and decrypt the remainder
///
/// # Errors
///
/// Returns `PaddingError` if the input is shorter than an IV plus one block,
/// or if the padding check fails.
pub fn open(sealed: &[u8], key: &SessionKey) -> CryptoResult<Vec<u8>> {
    if sealed.len() < IV_SIZE + AES_BLOCK_SIZE {
        return Err(CryptoError::padding_error(
            "sealed ciphertext shorter than IV plus one block",
            error_codes::AES_CIPHERTEXT_TRUNCATED,
        ));
    }

    let (iv, ciphertext) = sealed.split_at(IV_SIZE);
    decrypt(ciphertext, key, &Iv::from_bytes(iv)?)
}

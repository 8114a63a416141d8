//! Tests for the hybrid envelope

use std::sync::OnceLock;

use super::*;
use crate::error::CryptoError;
use crate::rsa_oaep::{unwrap_session_key, OaepDigest, RsaKeyPair, RsaKeySize};

fn recipient() -> &'static RsaKeyPair {
    static KEY_PAIR: OnceLock<RsaKeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(|| RsaKeyPair::generate().unwrap())
}

fn stranger() -> &'static RsaKeyPair {
    static KEY_PAIR: OnceLock<RsaKeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(|| RsaKeyPair::generate().unwrap())
}

fn flip_decoded_byte(field: &str, index: usize) -> String {
    let mut bytes = base64::decode(field).unwrap();
    let index = index % bytes.len();
    bytes[index] ^= 0x01;
    base64::encode(&bytes)
}

#[test]
fn test_hello_round_trip() {
    let key_pair = recipient();
    let envelope = encrypt_hybrid("HELLO", key_pair.public_key()).unwrap();
    let plaintext = decrypt_hybrid(&envelope, key_pair.private_key()).unwrap();
    assert_eq!(plaintext, "HELLO");
}

#[test]
fn test_round_trip_various_lengths() {
    let key_pair = recipient();
    for plaintext in ["", "a", "exactly sixteen!", "a somewhat longer message spanning blocks"] {
        let envelope = encrypt_hybrid(plaintext, key_pair.public_key()).unwrap();
        let decrypted = decrypt_hybrid(&envelope, key_pair.private_key()).unwrap();
        assert_eq!(decrypted, plaintext);
    }
}

#[test]
fn test_envelope_shape() {
    let key_pair = recipient();
    let envelope = encrypt_hybrid("HELLO", key_pair.public_key()).unwrap();
    let (cipher_text, wrapped_key) = envelope.decode().unwrap();

    // IV plus one padded block
    assert_eq!(cipher_text.len(), 32);
    assert_eq!(wrapped_key.len(), 256);

    let session_key = unwrap_session_key(&wrapped_key, key_pair.private_key()).unwrap();
    assert_eq!(session_key.as_bytes().len(), 16);
}

#[test]
fn test_fresh_session_key_per_message() {
    let key_pair = recipient();
    let envelope1 = encrypt_hybrid("HELLO", key_pair.public_key()).unwrap();
    let envelope2 = encrypt_hybrid("HELLO", key_pair.public_key()).unwrap();
    assert_ne!(envelope1.cipher_text, envelope2.cipher_text);
    assert_ne!(envelope1.wrapped_key, envelope2.wrapped_key);
}

#[test]
fn test_non_ascii_is_sanitized() {
    let key_pair = recipient();
    let envelope = encrypt_hybrid("na\u{ef}ve caf\u{e9}", key_pair.public_key()).unwrap();
    let plaintext = decrypt_hybrid(&envelope, key_pair.private_key()).unwrap();
    assert_eq!(plaintext, "nave caf");
}

#[test]
fn test_wrong_private_key() {
    let envelope = encrypt_hybrid("HELLO", recipient().public_key()).unwrap();
    let result = decrypt_hybrid(&envelope, stranger().private_key());
    assert!(matches!(
        result,
        Err(CryptoError::UnwrapError { .. }) | Err(CryptoError::KeyLengthError { .. })
    ));
}

#[test]
fn test_tampered_wrapped_key() {
    let key_pair = recipient();
    let envelope = encrypt_hybrid("HELLO", key_pair.public_key()).unwrap();

    for index in [0, 1, 64, 128, 255] {
        let tampered = Envelope::new(
            envelope.cipher_text.clone(),
            flip_decoded_byte(&envelope.wrapped_key, index),
        );
        let result = decrypt_hybrid(&tampered, key_pair.private_key());
        assert!(matches!(
            result,
            Err(CryptoError::UnwrapError { .. }) | Err(CryptoError::KeyLengthError { .. })
        ));
    }
}

#[test]
fn test_tampered_cipher_text_trips_padding() {
    let key_pair = recipient();
    let plaintext = "tamper detection is probabilistic";
    let envelope = encrypt_hybrid(plaintext, key_pair.public_key()).unwrap();
    let cipher_len = envelope.decode().unwrap().0.len();

    // Flipping a byte of the final block randomizes the padding
    let mut padding_errors = 0;
    for index in (cipher_len - 16)..cipher_len {
        let tampered = Envelope::new(
            flip_decoded_byte(&envelope.cipher_text, index),
            envelope.wrapped_key.clone(),
        );
        match decrypt_hybrid(&tampered, key_pair.private_key()) {
            Err(CryptoError::PaddingError { .. }) => padding_errors += 1,
            Ok(decrypted) => assert_ne!(decrypted, plaintext),
            Err(other) => panic!("unexpected error: {}", other),
        }
    }
    assert!(padding_errors >= 14, "only {} padding errors", padding_errors);
}

#[test]
fn test_tampered_iv_garbles_without_error() {
    let key_pair = recipient();
    let plaintext = "first block is garbled, rest is intact";
    let envelope = encrypt_hybrid(plaintext, key_pair.public_key()).unwrap();

    // The IV only feeds the first block, so padding still checks out
    let tampered = Envelope::new(
        flip_decoded_byte(&envelope.cipher_text, 0),
        envelope.wrapped_key.clone(),
    );
    let decrypted = decrypt_hybrid(&tampered, key_pair.private_key()).unwrap();
    assert_ne!(decrypted, plaintext);
    assert!(decrypted.ends_with(&plaintext[16..]));
}

#[test]
fn test_truncated_cipher_text() {
    let key_pair = recipient();
    let envelope = encrypt_hybrid("HELLO", key_pair.public_key()).unwrap();
    let (cipher_text, _) = envelope.decode().unwrap();

    let truncated = Envelope::new(base64::encode(&cipher_text[..20]), envelope.wrapped_key.clone());
    let result = decrypt_hybrid(&truncated, key_pair.private_key());
    assert!(matches!(result, Err(CryptoError::PaddingError { .. })));
}

#[test]
fn test_malformed_base64() {
    let key_pair = recipient();
    let envelope = encrypt_hybrid("HELLO", key_pair.public_key()).unwrap();

    let bad_cipher = Envelope::new("not*base64", envelope.wrapped_key.clone());
    match decrypt_hybrid(&bad_cipher, key_pair.private_key()) {
        Err(CryptoError::DecodeError { field, .. }) => assert_eq!(field, "cipher_text"),
        other => panic!("expected DecodeError, got {:?}", other),
    }

    let bad_key = Envelope::new(envelope.cipher_text.clone(), "%%%");
    match decrypt_hybrid(&bad_key, key_pair.private_key()) {
        Err(CryptoError::DecodeError { field, .. }) => assert_eq!(field, "wrapped_key"),
        other => panic!("expected DecodeError, got {:?}", other),
    }
}

#[test]
fn test_surrounding_whitespace_ignored() {
    let key_pair = recipient();
    let envelope = encrypt_hybrid("HELLO", key_pair.public_key()).unwrap();
    let pasted = Envelope::new(
        format!("  {}\n", envelope.cipher_text),
        format!("{}\r\n", envelope.wrapped_key),
    );
    assert_eq!(decrypt_hybrid(&pasted, key_pair.private_key()).unwrap(), "HELLO");
}

#[test]
fn test_envelope_json() {
    let key_pair = recipient();
    let envelope = encrypt_hybrid("HELLO", key_pair.public_key()).unwrap();

    let json = envelope.to_json().unwrap();
    assert!(json.contains("\"cipher_text\""));
    assert!(json.contains("\"wrapped_key\""));
    assert_eq!(Envelope::from_json(&json).unwrap(), envelope);

    let legacy = format!(
        r#"{{"cipher_text":"{}","encrypted_symmetric_key_rsa":"{}"}}"#,
        envelope.cipher_text, envelope.wrapped_key
    );
    let parsed = Envelope::from_json(&legacy).unwrap();
    assert_eq!(decrypt_hybrid(&parsed, key_pair.private_key()).unwrap(), "HELLO");

    assert!(matches!(
        Envelope::from_json("{\"cipher_text\":1}"),
        Err(CryptoError::SerializationError(_))
    ));
}

#[test]
fn test_params_sha256() {
    let key_pair = recipient();
    let params = HybridEncryptionParameters {
        key_size: RsaKeySize::Rsa2048,
        oaep_digest: OaepDigest::Sha256,
    };

    let envelope = encrypt_hybrid_with_params("HELLO", key_pair.public_key(), &params).unwrap();
    let plaintext = decrypt_hybrid_with_params(&envelope, key_pair.private_key(), &params).unwrap();
    assert_eq!(plaintext, "HELLO");

    // Default parameters use SHA-1 and cannot unwrap it
    assert!(matches!(
        decrypt_hybrid(&envelope, key_pair.private_key()),
        Err(CryptoError::UnwrapError { .. })
    ));
}

#[test]
fn test_params_from_json() {
    let params = HybridEncryptionParameters::from_json(r#"{"oaep_digest":"Sha256"}"#).unwrap();
    assert_eq!(params.oaep_digest, OaepDigest::Sha256);
    assert_eq!(params.key_size, RsaKeySize::Rsa2048);

    let defaults = HybridEncryptionParameters::from_json("{}").unwrap();
    assert_eq!(defaults, HybridEncryptionParameters::default());

    assert!(HybridEncryptionParameters::from_json(r#"{"key_size":"Rsa1024"}"#).is_err());
}

// Property tests for the hybrid envelope and the matrix cipher

use std::sync::OnceLock;

use hycrypt::hill::{matrix_decrypt, matrix_encrypt, KeyMatrix};
use hycrypt::hybrid::{decrypt_hybrid, encrypt_hybrid, Envelope};
use hycrypt::rsa_oaep::{unwrap_session_key, RsaKeyPair};
use hycrypt::CryptoError;
use proptest::prelude::*;

fn key_pair() -> &'static RsaKeyPair {
    static KEY_PAIR: OnceLock<RsaKeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(|| RsaKeyPair::generate().expect("RSA key generation"))
}

fn ascii_text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(0u8..128, 0..max_len)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

fn small_byte_text(max_len: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(0u8..26, 0..max_len)
        .prop_map(|bytes| bytes.into_iter().map(char::from).collect())
}

fn invertible_matrix() -> impl Strategy<Value = KeyMatrix> {
    (1usize..=4)
        .prop_flat_map(|n| prop::collection::vec(prop::collection::vec(-30i64..60, n), n))
        .prop_filter_map("matrix not invertible mod 26", |rows| KeyMatrix::new(rows).ok())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn hybrid_round_trip(plaintext in ascii_text(300)) {
        let key_pair = key_pair();
        let envelope = encrypt_hybrid(&plaintext, key_pair.public_key()).unwrap();
        let decrypted = decrypt_hybrid(&envelope, key_pair.private_key()).unwrap();
        prop_assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn unwrapped_session_key_is_sixteen_bytes(plaintext in ascii_text(64)) {
        let key_pair = key_pair();
        let envelope = encrypt_hybrid(&plaintext, key_pair.public_key()).unwrap();
        let (_, wrapped_key) = envelope.decode().unwrap();
        let session_key = unwrap_session_key(&wrapped_key, key_pair.private_key()).unwrap();
        prop_assert_eq!(session_key.as_bytes().len(), 16);
    }

    #[test]
    fn tampered_wrapped_key_is_rejected(index in 0usize..256, bit in 0u8..8) {
        let key_pair = key_pair();
        let envelope = encrypt_hybrid("HELLO", key_pair.public_key()).unwrap();
        let (_, mut wrapped_key) = envelope.decode().unwrap();
        wrapped_key[index] ^= 1 << bit;

        let tampered = Envelope::new(envelope.cipher_text.clone(), base64::encode(&wrapped_key));
        let result = decrypt_hybrid(&tampered, key_pair.private_key());
        let rejected = matches!(
            result,
            Err(CryptoError::UnwrapError { .. }) | Err(CryptoError::KeyLengthError { .. })
        );
        prop_assert!(rejected, "unexpected result: {:?}", result);
    }

    #[test]
    fn tampered_cipher_text_never_panics(plaintext in ascii_text(80), index in any::<usize>(), bit in 0u8..8) {
        let key_pair = key_pair();
        let envelope = encrypt_hybrid(&plaintext, key_pair.public_key()).unwrap();
        let (mut cipher_text, _) = envelope.decode().unwrap();
        let index = index % cipher_text.len();
        cipher_text[index] ^= 1 << bit;

        let tampered = Envelope::new(base64::encode(&cipher_text), envelope.wrapped_key.clone());
        match decrypt_hybrid(&tampered, key_pair.private_key()) {
            Ok(decrypted) => prop_assert_ne!(decrypted, plaintext),
            Err(err) => {
                let padding_failure = matches!(err, CryptoError::PaddingError { .. });
                prop_assert!(padding_failure, "unexpected error: {:?}", err);
            }
        }
    }
}

proptest! {
    #[test]
    fn matrix_round_trip(key in invertible_matrix(), plaintext in small_byte_text(100)) {
        let ciphertext = matrix_encrypt(&plaintext, &key);
        prop_assert_eq!(matrix_decrypt(&ciphertext, &key).unwrap(), plaintext);
    }

    #[test]
    fn matrix_decrypts_to_residues(key in invertible_matrix(), plaintext in ascii_text(100)) {
        let expected: String = plaintext.bytes().map(|b| char::from(b % 26)).collect();
        let ciphertext = matrix_encrypt(&plaintext, &key);
        prop_assert_eq!(matrix_decrypt(&ciphertext, &key).unwrap(), expected);
    }

    #[test]
    fn matrix_rejected_iff_determinant_shares_factor(
        rows in prop::collection::vec(prop::collection::vec(0i64..26, 2), 2)
    ) {
        let determinant = (rows[0][0] * rows[1][1] - rows[0][1] * rows[1][0]).rem_euclid(26);
        let invertible = determinant % 2 != 0 && determinant % 13 != 0;

        match KeyMatrix::new(rows) {
            Ok(key) => {
                prop_assert!(invertible);
                prop_assert_eq!(key.determinant_mod(), determinant);
            }
            Err(CryptoError::MatrixNotInvertibleError { determinant: reported, .. }) => {
                prop_assert!(!invertible);
                prop_assert_eq!(reported, determinant);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }
}

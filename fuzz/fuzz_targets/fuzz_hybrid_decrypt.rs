#![no_main]

use std::sync::OnceLock;

use arbitrary::Arbitrary;
use hycrypt::{decrypt_hybrid, encrypt_hybrid, Envelope, RsaKeyPair};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct HybridFuzzInput {
    message: String,
    cipher_text: String,
    wrapped_key: String,
    flip_index: usize,
}

fn recipient() -> &'static RsaKeyPair {
    static KEY_PAIR: OnceLock<RsaKeyPair> = OnceLock::new();
    KEY_PAIR.get_or_init(|| RsaKeyPair::generate().expect("key generation"))
}

fuzz_target!(|input: HybridFuzzInput| {
    let key_pair = recipient();

    // Arbitrary envelopes must fail cleanly, never panic
    let forged = Envelope::new(input.cipher_text, input.wrapped_key);
    let _ = decrypt_hybrid(&forged, key_pair.private_key());

    if let Ok(envelope) = encrypt_hybrid(&input.message, key_pair.public_key()) {
        let decrypted = decrypt_hybrid(&envelope, key_pair.private_key())
            .expect("genuine envelope must decrypt");
        let expected: String = input.message.chars().filter(char::is_ascii).collect();
        assert_eq!(decrypted, expected);

        // Single-byte corruption of the sealed payload
        if let Ok(mut sealed) = base64::decode(&envelope.cipher_text) {
            let index = input.flip_index % sealed.len();
            sealed[index] ^= 0x01;
            let tampered = Envelope::new(base64::encode(&sealed), envelope.wrapped_key.clone());
            let _ = decrypt_hybrid(&tampered, key_pair.private_key());
        }
    }
});

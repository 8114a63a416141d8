#![no_main]

use arbitrary::Arbitrary;
use hycrypt::aes::{self, SessionKey};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct AesCbcFuzzInput {
    plaintext: Vec<u8>,
    key: [u8; 16],
    ciphertext: Vec<u8>,
}

fuzz_target!(|input: AesCbcFuzzInput| {
    let key = match SessionKey::from_bytes(&input.key) {
        Ok(key) => key,
        Err(_) => return,
    };

    let sealed = aes::seal(&input.plaintext, &key).expect("seal");
    assert_eq!(aes::open(&sealed, &key).expect("open"), input.plaintext);

    let _ = aes::open(&input.ciphertext, &key);
});

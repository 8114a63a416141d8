#![no_main]

use arbitrary::Arbitrary;
use hycrypt::hill::{matrix_decrypt, matrix_encrypt, KeyMatrix};
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct MatrixFuzzInput {
    dimension: u8,
    entries: Vec<i8>,
    plaintext: Vec<u8>,
    ciphertext: String,
}

fuzz_target!(|input: MatrixFuzzInput| {
    let n = usize::from(input.dimension % 6) + 1;
    if input.entries.len() < n * n {
        return;
    }

    let rows = input.entries[..n * n]
        .chunks(n)
        .map(|row| row.iter().map(|&v| i64::from(v)).collect())
        .collect();

    // Construction either validates or rejects, never panics
    let key = match KeyMatrix::new(rows) {
        Ok(key) => key,
        Err(_) => return,
    };

    let residues: String = input.plaintext.iter().map(|b| char::from(b % 26)).collect();
    let ciphertext = matrix_encrypt(&residues, &key);
    assert_eq!(matrix_decrypt(&ciphertext, &key).expect("round trip"), residues);

    let _ = matrix_decrypt(&input.ciphertext, &key);
});

//! RSA keypairs and OAEP session-key wrapping
//!
//! The asymmetric half of the hybrid envelope. RSA is only ever applied to
//! 16-byte session keys; bulk data goes through [`crate::aes`].

mod keypair;
mod oaep;


pub use keypair::{
    fingerprint,
    generate_keypair,
    public_key_from_pem,
    public_key_to_pem,
    RsaKeyPair,
    RsaKeySize,
};

pub use oaep::{
    unwrap_session_key,
    unwrap_session_key_with,
    wrap_session_key,
    wrap_session_key_with,
    OaepDigest,
};

pub use rsa::{RsaPrivateKey, RsaPublicKey};

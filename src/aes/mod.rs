/*!
 * AES-128-CBC implementation for symmetric encryption
 *
 * This module implements the bulk-encryption half of the hybrid envelope:
 * AES-128 in CBC mode with PKCS#7 padding under a per-message session key.
 */

mod aes;

pub use aes::*;

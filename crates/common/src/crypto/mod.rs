//! Cryptographic primitives for boxkey
//!
//! Everything here is a thin layer over the NaCl "box" construction as implemented
//! by the `crypto_box` crate (`SalsaBox`):
//!
//! - **Key agreement**: X25519 between the recipient's private key and the sender's
//!   public key
//! - **Encryption**: XSalsa20-Poly1305 with a random 24-byte nonce per message
//!
//! # Key Encoding
//!
//! Keys travel as standard base64 (with padding) of their 32 raw bytes. This is the
//! same text a PyNaCl `Base64Encoder` produces, so key files are interchangeable
//! with tooling built on libsodium.
//!
//! # Ciphertext Format
//!
//! ```text
//! [ nonce: 24 bytes ][ ciphertext ][ tag: 16 bytes ]
//! ```
//!
//! This is the "combined" format libsodium and PyNaCl emit from `Box.encrypt`.
//! Nothing in this module generates or tracks nonces beyond drawing a fresh one
//! from the OS RNG for each sealed message.

mod keys;
mod sealed;

pub use keys::{
    key_to_str, str_to_private_key, str_to_public_key, EncodeKey, InvalidKeyKind, Key, KeyError,
    KeyKind, KeyPair, PrivateKey, PublicKey, KEY_SIZE,
};
pub use sealed::{decrypt_response_content, encrypt_content, BoxError, NONCE_SIZE, TAG_SIZE};

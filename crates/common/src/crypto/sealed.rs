//! Opening and sealing box ciphertext
//!
//! A box is addressed from one keypair to another. The recipient opens it with
//! their private key and the sender's public key; the sender seals it with their
//! private key and the recipient's public key. Both sides derive the same
//! XSalsa20-Poly1305 key from X25519.

use crypto_box::aead::generic_array::GenericArray;
use crypto_box::aead::{Aead, AeadCore, OsRng};
use crypto_box::SalsaBox;

use super::keys::{PrivateKey, PublicKey};

/// Size of the XSalsa20 nonce prefixed to every box
pub const NONCE_SIZE: usize = 24;
/// Size of the Poly1305 authentication tag
pub const TAG_SIZE: usize = 16;

/// Errors that can occur while opening or sealing a box
#[derive(Debug, thiserror::Error)]
pub enum BoxError {
    #[error("ciphertext too short: {len} bytes (minimum {min})")]
    Truncated { len: usize, min: usize },
    #[error("authentication failed: ciphertext was tampered with or keys do not match")]
    Authentication,
    #[error("encrypt error")]
    Encryption,
}

/// Decrypt a box sent by `public_key`'s owner to `private_key`'s owner.
///
/// Expects `nonce (24 bytes) || ciphertext || tag (16 bytes)`.
///
/// # Errors
///
/// Returns an error if:
/// - The input is too short to hold a nonce and a tag
/// - Tag verification fails (tampered data, truncated data or the wrong keys)
pub fn decrypt_response_content(
    ciphertext: &[u8],
    private_key: &PrivateKey,
    public_key: &PublicKey,
) -> Result<Vec<u8>, BoxError> {
    let min = NONCE_SIZE + TAG_SIZE;
    if ciphertext.len() < min {
        return Err(BoxError::Truncated {
            len: ciphertext.len(),
            min,
        });
    }

    let salsa_box = SalsaBox::new(public_key, private_key);
    let nonce = GenericArray::from_slice(&ciphertext[..NONCE_SIZE]);
    let plaintext = salsa_box
        .decrypt(nonce, &ciphertext[NONCE_SIZE..])
        .map_err(|_| BoxError::Authentication)?;

    tracing::debug!(
        ciphertext_len = ciphertext.len(),
        plaintext_len = plaintext.len(),
        "opened box"
    );
    Ok(plaintext)
}

/// Encrypt `plaintext` from `private_key`'s owner to `public_key`'s owner.
///
/// A fresh random nonce is drawn for every call and prefixed to the output, so
/// sealing the same plaintext twice yields different ciphertexts.
pub fn encrypt_content(
    plaintext: &[u8],
    private_key: &PrivateKey,
    public_key: &PublicKey,
) -> Result<Vec<u8>, BoxError> {
    let salsa_box = SalsaBox::new(public_key, private_key);
    let nonce = SalsaBox::generate_nonce(&mut OsRng);
    let ciphertext = salsa_box
        .encrypt(&nonce, plaintext)
        .map_err(|_| BoxError::Encryption)?;

    let mut out = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
    out.extend_from_slice(nonce.as_slice());
    out.extend_from_slice(&ciphertext);

    tracing::debug!(
        plaintext_len = plaintext.len(),
        ciphertext_len = out.len(),
        "sealed box"
    );
    Ok(out)
}

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use crypto_box::aead::OsRng;

/// Size of a curve25519 private or public key in bytes
pub const KEY_SIZE: usize = 32;

/// Errors that can occur while decoding key material
#[derive(Debug, thiserror::Error)]
pub enum KeyError {
    #[error("key base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("invalid key size, expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}

/// A key kind selector that was neither `private` nor `public`
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid key kind '{0}', expected 'private' or 'public'")]
pub struct InvalidKeyKind(pub String);

/// Which half of a keypair a key file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Private,
    Public,
}

impl KeyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyKind::Private => "private",
            KeyKind::Public => "public",
        }
    }
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeyKind {
    type Err = InvalidKeyKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "private" => Ok(KeyKind::Private),
            "public" => Ok(KeyKind::Public),
            other => Err(InvalidKeyKind(other.to_string())),
        }
    }
}

/// Anything that can be written out as raw key bytes.
///
/// The base64 form produced by [`EncodeKey::to_base64`] is the on-disk and
/// on-the-wire representation of every key in this crate.
pub trait EncodeKey {
    /// The kind of key, used to decide how a key file is written
    fn kind(&self) -> KeyKind;

    /// Raw key bytes
    fn to_bytes(&self) -> [u8; KEY_SIZE];

    /// Standard base64 (with padding) of the raw key bytes
    fn to_base64(&self) -> String {
        BASE64.encode(self.to_bytes())
    }
}

/// Encode a key as base64 text
pub fn key_to_str<K: EncodeKey + ?Sized>(key: &K) -> String {
    key.to_base64()
}

/// Decode a private key from base64 text
pub fn str_to_private_key(text: &str) -> Result<PrivateKey, KeyError> {
    PrivateKey::from_base64(text)
}

/// Decode a public key from base64 text
pub fn str_to_public_key(text: &str) -> Result<PublicKey, KeyError> {
    PublicKey::from_base64(text)
}

/// Decode base64 key text into exactly `KEY_SIZE` bytes.
///
/// Surrounding whitespace is ignored so that a key file saved by an
/// editor with a trailing newline still loads.
fn decode_key_bytes(text: &str) -> Result<[u8; KEY_SIZE], KeyError> {
    let bytes = BASE64.decode(text.trim())?;
    key_bytes_from_slice(&bytes)
}

fn key_bytes_from_slice(bytes: &[u8]) -> Result<[u8; KEY_SIZE], KeyError> {
    if bytes.len() != KEY_SIZE {
        return Err(KeyError::InvalidLength {
            expected: KEY_SIZE,
            actual: bytes.len(),
        });
    }
    let mut buff = [0; KEY_SIZE];
    buff.copy_from_slice(bytes);
    Ok(buff)
}

/// Public half of a box keypair
///
/// A thin wrapper around `crypto_box::PublicKey`. Safe to publish; the
/// counterparty uses it to seal data for us and to open data we sealed.
///
/// # Examples
///
/// ```ignore
/// let private_key = PrivateKey::generate();
/// let public_key = private_key.public_key();
///
/// let text = public_key.to_base64();
/// let recovered = PublicKey::from_base64(&text)?;
/// assert_eq!(public_key, recovered);
/// ```
#[derive(Clone)]
pub struct PublicKey(crypto_box::PublicKey);

impl Deref for PublicKey {
    type Target = crypto_box::PublicKey;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<crypto_box::PublicKey> for PublicKey {
    fn from(key: crypto_box::PublicKey) -> Self {
        PublicKey(key)
    }
}

impl From<[u8; KEY_SIZE]> for PublicKey {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        PublicKey(crypto_box::PublicKey::from(bytes))
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(key_bytes_from_slice(bytes)?.into())
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_bytes() == other.0.as_bytes()
    }
}

impl Eq for PublicKey {}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKey").field(&self.to_base64()).finish()
    }
}

impl FromStr for PublicKey {
    type Err = KeyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base64(s)
    }
}

impl EncodeKey for PublicKey {
    fn kind(&self) -> KeyKind {
        KeyKind::Public
    }

    fn to_bytes(&self) -> [u8; KEY_SIZE] {
        *self.0.as_bytes()
    }
}

impl PublicKey {
    /// Parse a public key from base64 text
    pub fn from_base64(text: &str) -> Result<Self, KeyError> {
        Ok(decode_key_bytes(text)?.into())
    }
}

/// Private half of a box keypair
///
/// A thin wrapper around `crypto_box::SecretKey`, which zeroizes its bytes on
/// drop. `Debug` prints the derived public key, never the secret scalar.
///
/// # Security Considerations
///
/// - Never transmit this key
/// - Key files written by [`crate::key_store::save_key_to_file`] are
///   restricted to the owner on Unix
#[derive(Clone)]
pub struct PrivateKey(crypto_box::SecretKey);

impl Deref for PrivateKey {
    type Target = crypto_box::SecretKey;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<crypto_box::SecretKey> for PrivateKey {
    fn from(key: crypto_box::SecretKey) -> Self {
        PrivateKey(key)
    }
}

impl From<[u8; KEY_SIZE]> for PrivateKey {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        PrivateKey(crypto_box::SecretKey::from(bytes))
    }
}

impl TryFrom<&[u8]> for PrivateKey {
    type Error = KeyError;
    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Ok(key_bytes_from_slice(bytes)?.into())
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bytes() == other.0.to_bytes()
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey")
            .field("public", &self.public_key().to_base64())
            .finish_non_exhaustive()
    }
}

impl FromStr for PrivateKey {
    type Err = KeyError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base64(s)
    }
}

impl EncodeKey for PrivateKey {
    fn kind(&self) -> KeyKind {
        KeyKind::Private
    }

    fn to_bytes(&self) -> [u8; KEY_SIZE] {
        self.0.to_bytes()
    }
}

impl PrivateKey {
    /// Generate a new random private key from the OS CSPRNG
    pub fn generate() -> Self {
        PrivateKey(crypto_box::SecretKey::generate(&mut OsRng))
    }

    /// Parse a private key from base64 text
    pub fn from_base64(text: &str) -> Result<Self, KeyError> {
        Ok(decode_key_bytes(text)?.into())
    }

    /// Derive the public key for this private key
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.0.public_key())
    }
}

/// A key loaded without knowing its kind at compile time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Private(PrivateKey),
    Public(PublicKey),
}

impl Key {
    /// Decode base64 text as the given kind of key
    pub fn from_base64(text: &str, kind: KeyKind) -> Result<Self, KeyError> {
        match kind {
            KeyKind::Private => PrivateKey::from_base64(text).map(Key::Private),
            KeyKind::Public => PublicKey::from_base64(text).map(Key::Public),
        }
    }

    pub fn into_private(self) -> Option<PrivateKey> {
        match self {
            Key::Private(key) => Some(key),
            Key::Public(_) => None,
        }
    }

    pub fn into_public(self) -> Option<PublicKey> {
        match self {
            Key::Public(key) => Some(key),
            Key::Private(_) => None,
        }
    }
}

impl EncodeKey for Key {
    fn kind(&self) -> KeyKind {
        match self {
            Key::Private(_) => KeyKind::Private,
            Key::Public(_) => KeyKind::Public,
        }
    }

    fn to_bytes(&self) -> [u8; KEY_SIZE] {
        match self {
            Key::Private(key) => key.to_bytes(),
            Key::Public(key) => key.to_bytes(),
        }
    }
}

/// A private key together with its derived public key
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyPair {
    pub private: PrivateKey,
    pub public: PublicKey,
}

impl KeyPair {
    /// Generate a fresh random keypair
    pub fn generate() -> Self {
        Self::from_private(PrivateKey::generate())
    }

    /// Build the pair for an existing private key
    pub fn from_private(private: PrivateKey) -> Self {
        let public = private.public_key();
        Self { private, public }
    }
}

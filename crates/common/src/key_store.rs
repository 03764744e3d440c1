//! Key files
//!
//! A key file holds exactly one base64 key and nothing else: no header, no
//! trailing newline. Generated pairs follow a fixed naming convention:
//!
//! ```text
//! <basename>.key      private key
//! <basename>.pub.key  public key
//! ```
//!
//! Writes go straight to the target path and overwrite whatever is there.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::crypto::{
    EncodeKey, InvalidKeyKind, Key, KeyError, KeyKind, KeyPair, PrivateKey, PublicKey,
};

/// Suffix appended to a basename for the private key file
pub const PRIVATE_KEY_SUFFIX: &str = ".key";
/// Suffix appended to a basename for the public key file
pub const PUBLIC_KEY_SUFFIX: &str = ".pub.key";

#[derive(Debug, thiserror::Error)]
pub enum KeyStoreError {
    #[error("key file IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid key in {path:?}: {source}")]
    Key {
        path: PathBuf,
        #[source]
        source: KeyError,
    },

    #[error(transparent)]
    InvalidKind(#[from] InvalidKeyKind),
}

impl KeyStoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        KeyStoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Path of the private key file for a basename (`<basename>.key`)
pub fn private_key_path(basename: impl AsRef<Path>) -> PathBuf {
    with_suffix(basename.as_ref(), PRIVATE_KEY_SUFFIX)
}

/// Path of the public key file for a basename (`<basename>.pub.key`)
pub fn public_key_path(basename: impl AsRef<Path>) -> PathBuf {
    with_suffix(basename.as_ref(), PUBLIC_KEY_SUFFIX)
}

// Appends to the final component as a string, so `alice.v2` becomes
// `alice.v2.key` rather than having its extension replaced.
fn with_suffix(basename: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(basename.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

/// Write the base64 text of `key` to `path`, overwriting any existing file.
///
/// Private keys are restricted to the owner (`0o600`) on Unix.
pub fn save_key_to_file<K: EncodeKey + ?Sized>(
    key: &K,
    path: impl AsRef<Path>,
) -> Result<(), KeyStoreError> {
    let path = path.as_ref();
    fs::write(path, key.to_base64()).map_err(|e| KeyStoreError::io(path, e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if key.kind() == KeyKind::Private {
            fs::set_permissions(path, fs::Permissions::from_mode(0o600))
                .map_err(|e| KeyStoreError::io(path, e))?;
        }
    }

    tracing::debug!(path = ?path, kind = %key.kind(), "saved key file");
    Ok(())
}

/// Read a key file and decode it as `kind`.
///
/// # Errors
///
/// Returns an error if:
/// - The file is missing or unreadable
/// - The content is not base64 of a 32-byte key
pub fn load_key_from_file(path: impl AsRef<Path>, kind: KeyKind) -> Result<Key, KeyStoreError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| KeyStoreError::io(path, e))?;
    let key = Key::from_base64(&text, kind).map_err(|source| KeyStoreError::Key {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = ?path, kind = %kind, "loaded key file");
    Ok(key)
}

/// Like [`load_key_from_file`], for callers holding the kind as a string.
///
/// The selector is checked before the file is opened, so an unknown kind is
/// reported as [`KeyStoreError::InvalidKind`] even when the file is missing.
pub fn load_key_from_file_str(path: impl AsRef<Path>, kind: &str) -> Result<Key, KeyStoreError> {
    let kind: KeyKind = kind.parse()?;
    load_key_from_file(path, kind)
}

/// Load a private key file
pub fn load_private_key(path: impl AsRef<Path>) -> Result<PrivateKey, KeyStoreError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| KeyStoreError::io(path, e))?;
    PrivateKey::from_base64(&text).map_err(|source| KeyStoreError::Key {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a public key file
pub fn load_public_key(path: impl AsRef<Path>) -> Result<PublicKey, KeyStoreError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| KeyStoreError::io(path, e))?;
    PublicKey::from_base64(&text).map_err(|source| KeyStoreError::Key {
        path: path.to_path_buf(),
        source,
    })
}

/// Generate a fresh keypair and write it to `<basename>.key` and
/// `<basename>.pub.key`, overwriting existing files.
///
/// Returns the generated pair.
pub fn create_keys_and_files(basename: impl AsRef<Path>) -> Result<KeyPair, KeyStoreError> {
    let basename = basename.as_ref();
    let keypair = KeyPair::generate();

    save_key_to_file(&keypair.private, private_key_path(basename))?;
    save_key_to_file(&keypair.public, public_key_path(basename))?;

    tracing::info!(
        basename = ?basename,
        public_key = %keypair.public.to_base64(),
        "generated keypair"
    );
    Ok(keypair)
}

#[cfg(test)]
mod test {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_key_paths() {
        assert_eq!(private_key_path("alice"), PathBuf::from("alice.key"));
        assert_eq!(public_key_path("alice"), PathBuf::from("alice.pub.key"));
        assert_eq!(
            private_key_path("keys/alice.v2"),
            PathBuf::from("keys/alice.v2.key")
        );
    }

    #[test]
    fn test_saved_file_is_bare_base64() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bob.pub.key");
        let public_key = PrivateKey::generate().public_key();

        save_key_to_file(&public_key, &path).unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, public_key.to_base64());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("k.key");
        fs::write(&path, "a much longer piece of stale content than any key would be").unwrap();

        let key = PrivateKey::generate();
        save_key_to_file(&key, &path).unwrap();
        assert_eq!(load_private_key(&path).unwrap(), key);
    }

    #[cfg(unix)]
    #[test]
    fn test_private_key_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let keypair = create_keys_and_files(dir.path().join("carol")).unwrap();
        let mode = fs::metadata(dir.path().join("carol.key"))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(keypair.public, keypair.private.public_key());
    }

    #[test]
    fn test_invalid_kind_checked_first() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.key");
        let result = load_key_from_file_str(&missing, "secret");
        assert!(matches!(result, Err(KeyStoreError::InvalidKind(_))));
    }

    #[test]
    fn test_unwritable_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("no/such/dir/k.key");
        let result = save_key_to_file(&PrivateKey::generate(), &path);
        match result {
            Err(KeyStoreError::Io { path: err_path, .. }) => assert_eq!(err_path, path),
            other => panic!("expected IO error, got {:?}", other),
        }
    }
}

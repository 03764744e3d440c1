//! Encrypted data files
//!
//! An encrypted file carries its box ciphertext as raw bytes, conventionally
//! under a name containing `.enc`. Decrypting writes the plaintext to the same
//! path with the **first** occurrence of the suffix removed, wherever it sits in
//! the path string:
//!
//! ```text
//! report.enc          -> report
//! a.enc.enc           -> a.enc
//! x.encrypted.enc     -> xrypted.enc
//! backups.enc/db.enc  -> backups/db.enc
//! ```
//!
//! Only the first match is removed, and it need not be at the end. Use
//! [`decrypted_path`] to see where a file will land before decrypting it.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::crypto::{decrypt_response_content, encrypt_content, BoxError, PrivateKey, PublicKey};

/// Conventional suffix of encrypted data files
pub const DEFAULT_ENC_SUFFIX: &str = ".enc";

#[derive(Debug, thiserror::Error)]
pub enum DataFileError {
    #[error("data file IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("box error on {path:?}: {source}")]
    Box {
        path: PathBuf,
        #[source]
        source: BoxError,
    },

    #[error("path is not valid UTF-8: {0:?}")]
    NonUtf8Path(PathBuf),
}

impl DataFileError {
    fn io(path: &Path, source: io::Error) -> Self {
        DataFileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The underlying box error, if decryption was what failed
    pub fn box_error(&self) -> Option<&BoxError> {
        match self {
            DataFileError::Box { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Where [`decrypt_data_file`] writes the plaintext for `path`.
///
/// Removes the first occurrence of `enc_suffix` anywhere in the path string.
/// If the suffix does not occur the path is returned unchanged.
pub fn decrypted_path(path: impl AsRef<Path>, enc_suffix: &str) -> Result<PathBuf, DataFileError> {
    let path = path.as_ref();
    let path_str = path
        .to_str()
        .ok_or_else(|| DataFileError::NonUtf8Path(path.to_path_buf()))?;
    Ok(PathBuf::from(path_str.replacen(enc_suffix, "", 1)))
}

/// Decrypt the box in `path` and write the plaintext next to it.
///
/// The output path comes from [`decrypted_path`] and is overwritten if it
/// exists. Returns the path written.
///
/// # Errors
///
/// Returns an error if:
/// - The input cannot be read or the output cannot be written
/// - The content fails to decrypt (see [`decrypt_response_content`])
/// - The path is not valid UTF-8
pub fn decrypt_data_file(
    path: impl AsRef<Path>,
    private_key: &PrivateKey,
    public_key: &PublicKey,
    enc_suffix: &str,
) -> Result<PathBuf, DataFileError> {
    let path = path.as_ref();
    let write_path = decrypted_path(path, enc_suffix)?;
    if write_path == path {
        tracing::warn!(
            path = ?path,
            suffix = enc_suffix,
            "suffix not found in file name, decrypted output will replace the input"
        );
    }

    let encrypted = fs::read(path).map_err(|e| DataFileError::io(path, e))?;
    let decrypted =
        decrypt_response_content(&encrypted, private_key, public_key).map_err(|source| {
            DataFileError::Box {
                path: path.to_path_buf(),
                source,
            }
        })?;
    fs::write(&write_path, &decrypted).map_err(|e| DataFileError::io(&write_path, e))?;

    tracing::info!(
        from = ?path,
        to = ?write_path,
        bytes = decrypted.len(),
        "decrypted data file"
    );
    Ok(write_path)
}

/// Encrypt the file at `path` and write the box to `path + enc_suffix`.
///
/// Returns the path written.
pub fn encrypt_data_file(
    path: impl AsRef<Path>,
    private_key: &PrivateKey,
    public_key: &PublicKey,
    enc_suffix: &str,
) -> Result<PathBuf, DataFileError> {
    let path = path.as_ref();
    let mut name = OsString::from(path.as_os_str());
    name.push(enc_suffix);
    let write_path = PathBuf::from(name);

    let plaintext = fs::read(path).map_err(|e| DataFileError::io(path, e))?;
    let encrypted =
        encrypt_content(&plaintext, private_key, public_key).map_err(|source| {
            DataFileError::Box {
                path: path.to_path_buf(),
                source,
            }
        })?;
    fs::write(&write_path, &encrypted).map_err(|e| DataFileError::io(&write_path, e))?;

    tracing::info!(
        from = ?path,
        to = ?write_path,
        bytes = encrypted.len(),
        "encrypted data file"
    );
    Ok(write_path)
}

use std::path::PathBuf;

use clap::Args;
use common::data_file::{encrypt_data_file, DataFileError};

use super::{load_keys, KeyArgsError};

/// Seal a data file to a recipient's public key
#[derive(Args, Debug, Clone)]
pub struct Encrypt {
    /// File to encrypt; the box is written to the same path plus the suffix
    pub file: PathBuf,

    /// Our private key file (defaults to private_key in config.toml)
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Recipient's public key file (defaults to peer_public_key in config.toml)
    #[arg(long)]
    pub recipient: Option<PathBuf>,

    /// Suffix to append (defaults to enc_suffix in config.toml, ".enc")
    #[arg(long)]
    pub suffix: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum EncryptError {
    #[error(transparent)]
    Keys(#[from] KeyArgsError),

    #[error("encrypt failed: {0}")]
    DataFile(#[from] DataFileError),
}

impl crate::cli::op::Op for Encrypt {
    type Error = EncryptError;
    type Output = String;

    fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (private_key, recipient_key) =
            load_keys(ctx, self.key.as_deref(), self.recipient.as_deref())?;
        let suffix = ctx.state.enc_suffix(self.suffix.as_deref());

        let written = encrypt_data_file(&self.file, &private_key, &recipient_key, suffix)?;
        Ok(written.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::cli::op::{Op, OpContext};
    use crate::cli::ops::Decrypt;
    use common::key_store::create_keys_and_files;
    use tempfile::TempDir;

    #[test]
    fn test_encrypt_then_decrypt() {
        let dir = TempDir::new().unwrap();
        let ctx = OpContext::new(Some(dir.path().to_path_buf())).unwrap();
        create_keys_and_files(dir.path().join("server")).unwrap();
        create_keys_and_files(dir.path().join("study")).unwrap();

        let original = dir.path().join("payload.json");
        fs::write(&original, br#"{"n":1}"#).unwrap();

        let sealed = Encrypt {
            file: original.clone(),
            key: Some(dir.path().join("server.key")),
            recipient: Some(dir.path().join("study.pub.key")),
            suffix: None,
        }
        .execute(&ctx)
        .unwrap();
        assert_eq!(sealed, dir.path().join("payload.json.enc").display().to_string());

        fs::remove_file(&original).unwrap();
        Decrypt {
            file: PathBuf::from(sealed),
            key: Some(dir.path().join("study.key")),
            sender: Some(dir.path().join("server.pub.key")),
            suffix: None,
        }
        .execute(&ctx)
        .unwrap();

        assert_eq!(fs::read(original).unwrap(), br#"{"n":1}"#);
    }

    #[test]
    fn test_encrypt_missing_recipient() {
        let dir = TempDir::new().unwrap();
        let ctx = OpContext::new(Some(dir.path().to_path_buf())).unwrap();
        create_keys_and_files(dir.path().join("server")).unwrap();

        let result = Encrypt {
            file: dir.path().join("payload.json"),
            key: Some(dir.path().join("server.key")),
            recipient: None,
            suffix: None,
        }
        .execute(&ctx);

        assert!(matches!(
            result,
            Err(EncryptError::Keys(KeyArgsError::MissingPeerKey))
        ));
    }
}

use std::path::PathBuf;

use clap::Args;
use common::data_file::{decrypt_data_file, DataFileError};

use super::{load_keys, KeyArgsError};

/// Decrypt a data file sealed to our private key
#[derive(Args, Debug, Clone)]
pub struct Decrypt {
    /// Encrypted file; plaintext is written to the same path with the first
    /// occurrence of the suffix removed
    pub file: PathBuf,

    /// Our private key file (defaults to private_key in config.toml)
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Sender's public key file (defaults to peer_public_key in config.toml)
    #[arg(long)]
    pub sender: Option<PathBuf>,

    /// Encrypted file suffix (defaults to enc_suffix in config.toml, ".enc")
    #[arg(long)]
    pub suffix: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DecryptError {
    #[error(transparent)]
    Keys(#[from] KeyArgsError),

    #[error("decrypt failed: {0}")]
    DataFile(#[from] DataFileError),
}

impl crate::cli::op::Op for Decrypt {
    type Error = DecryptError;
    type Output = String;

    fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let (private_key, sender_key) = load_keys(ctx, self.key.as_deref(), self.sender.as_deref())?;
        let suffix = ctx.state.enc_suffix(self.suffix.as_deref());

        let written = decrypt_data_file(&self.file, &private_key, &sender_key, suffix)?;
        Ok(written.display().to_string())
    }
}

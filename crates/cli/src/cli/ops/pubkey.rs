use std::path::PathBuf;

use clap::Args;
use common::crypto::EncodeKey;
use common::key_store::{load_private_key, KeyStoreError};

/// Print the public key belonging to a private key file
#[derive(Args, Debug, Clone)]
pub struct Pubkey {
    /// Private key file
    pub private_key: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum PubkeyError {
    #[error("pubkey failed: {0}")]
    KeyStore(#[from] KeyStoreError),
}

impl crate::cli::op::Op for Pubkey {
    type Error = PubkeyError;
    type Output = String;

    fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let private_key = load_private_key(&self.private_key)?;
        Ok(private_key.public_key().to_base64())
    }
}

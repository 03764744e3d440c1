use std::path::PathBuf;

use clap::Args;
use common::crypto::EncodeKey;
use common::key_store::{create_keys_and_files, private_key_path, public_key_path, KeyStoreError};

/// Generate a keypair and write both key files
#[derive(Args, Debug, Clone)]
pub struct Keygen {
    /// Basename of the key files; writes <BASENAME>.key and <BASENAME>.pub.key
    pub basename: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum KeygenError {
    #[error("keygen failed: {0}")]
    KeyStore(#[from] KeyStoreError),
}

impl crate::cli::op::Op for Keygen {
    type Error = KeygenError;
    type Output = String;

    fn execute(&self, _ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let keypair = create_keys_and_files(&self.basename)?;

        Ok(format!(
            "Generated keypair\n\
             - Private key: {}\n\
             - Public key:  {}\n\
             - Public key (base64): {}",
            private_key_path(&self.basename).display(),
            public_key_path(&self.basename).display(),
            keypair.public.to_base64(),
        ))
    }
}

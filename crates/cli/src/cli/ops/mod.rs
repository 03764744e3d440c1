pub mod decrypt;
pub mod encrypt;
pub mod init;
pub mod keygen;
pub mod pubkey;
pub mod version;

pub use decrypt::Decrypt;
pub use encrypt::Encrypt;
pub use init::Init;
pub use keygen::Keygen;
pub use pubkey::Pubkey;
pub use version::Version;

use std::path::Path;

use common::crypto::{PrivateKey, PublicKey};
use common::key_store::{load_private_key, load_public_key, KeyStoreError};

use crate::cli::op::OpContext;

#[derive(Debug, thiserror::Error)]
pub enum KeyArgsError {
    #[error("no private key given: pass --key or set private_key in config.toml")]
    MissingPrivateKey,

    #[error("no counterparty public key given: pass it as a flag or set peer_public_key in config.toml")]
    MissingPeerKey,

    #[error(transparent)]
    KeyStore(#[from] KeyStoreError),
}

/// Resolve our private key and the counterparty's public key from flags or
/// config, and load both.
pub(crate) fn load_keys(
    ctx: &OpContext,
    private_key: Option<&Path>,
    peer_public_key: Option<&Path>,
) -> Result<(PrivateKey, PublicKey), KeyArgsError> {
    let private_path = ctx
        .state
        .private_key_path(private_key)
        .ok_or(KeyArgsError::MissingPrivateKey)?;
    let peer_path = ctx
        .state
        .peer_public_key_path(peer_public_key)
        .ok_or(KeyArgsError::MissingPeerKey)?;

    let private = load_private_key(&private_path)?;
    let peer = load_public_key(&peer_path)?;
    Ok((private, peer))
}

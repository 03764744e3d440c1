//! Shared test utilities for key file and data file integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use common::crypto::{encrypt_content, KeyPair};
use tempfile::TempDir;

/// Route library logs through the test harness writer
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("debug")
        .try_init();
}

/// Set up a scratch directory plus a sender and a recipient keypair
pub fn setup_test_env() -> (TempDir, KeyPair, KeyPair) {
    init_tracing();
    let temp_dir = TempDir::new().unwrap();
    (temp_dir, KeyPair::generate(), KeyPair::generate())
}

/// Seal `plaintext` from `sender` to `recipient` and write it to `dir/name`
pub fn write_encrypted(
    dir: &Path,
    name: &str,
    plaintext: &[u8],
    sender: &KeyPair,
    recipient: &KeyPair,
) -> PathBuf {
    let path = dir.join(name);
    let ciphertext = encrypt_content(plaintext, &sender.private, &recipient.public).unwrap();
    fs::write(&path, ciphertext).unwrap();
    path
}

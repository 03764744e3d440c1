//! Integration tests for key generation and key file round-trips

mod common;

use std::fs;

use ::common::crypto::{key_to_str, EncodeKey, Key, KeyKind, PrivateKey};
use ::common::key_store::{
    create_keys_and_files, load_key_from_file, load_key_from_file_str, load_private_key,
    load_public_key, save_key_to_file, KeyStoreError,
};

#[test]
fn test_create_then_load() {
    let (temp, _, _) = common::setup_test_env();
    let basename = temp.path().join("alice");

    let keypair = create_keys_and_files(&basename).unwrap();

    let private = load_key_from_file(temp.path().join("alice.key"), KeyKind::Private).unwrap();
    assert_eq!(private, Key::Private(keypair.private.clone()));

    let public = load_key_from_file(temp.path().join("alice.pub.key"), KeyKind::Public).unwrap();
    assert_eq!(public, Key::Public(keypair.public.clone()));
}

#[test]
fn test_loaded_public_key_matches_derivation() {
    let (temp, _, _) = common::setup_test_env();
    create_keys_and_files(temp.path().join("bob")).unwrap();

    let private = load_private_key(temp.path().join("bob.key")).unwrap();
    let public = load_public_key(temp.path().join("bob.pub.key")).unwrap();
    assert_eq!(private.public_key(), public);
}

#[test]
fn test_create_overwrites_previous_pair() {
    let (temp, _, _) = common::setup_test_env();
    let basename = temp.path().join("carol");

    let first = create_keys_and_files(&basename).unwrap();
    let second = create_keys_and_files(&basename).unwrap();
    assert_ne!(first.private, second.private);

    let on_disk = load_private_key(temp.path().join("carol.key")).unwrap();
    assert_eq!(on_disk, second.private);
}

#[test]
fn test_string_kind_selector() {
    let (temp, sender, _) = common::setup_test_env();
    let path = temp.path().join("sender.pub.key");
    save_key_to_file(&sender.public, &path).unwrap();

    let key = load_key_from_file_str(&path, "public").unwrap();
    assert_eq!(key.into_public(), Some(sender.public.clone()));

    match load_key_from_file_str(&path, "secret") {
        Err(KeyStoreError::InvalidKind(kind)) => assert_eq!(kind.0, "secret"),
        other => panic!("expected invalid kind error, got {:?}", other),
    }
}

#[test]
fn test_missing_file_is_io_error() {
    let (temp, _, _) = common::setup_test_env();
    let result = load_key_from_file(temp.path().join("nobody.key"), KeyKind::Private);
    assert!(matches!(result, Err(KeyStoreError::Io { .. })));
}

#[test]
fn test_malformed_content_is_key_error() {
    let (temp, _, _) = common::setup_test_env();

    let garbage = temp.path().join("garbage.key");
    fs::write(&garbage, "@@@ definitely not base64 @@@").unwrap();
    assert!(matches!(
        load_key_from_file(&garbage, KeyKind::Private),
        Err(KeyStoreError::Key { .. })
    ));

    // Valid base64, wrong length
    let short = temp.path().join("short.pub.key");
    fs::write(&short, "AAECAwQFBgcICQoLDA0ODw==").unwrap();
    assert!(matches!(
        load_key_from_file(&short, KeyKind::Public),
        Err(KeyStoreError::Key { .. })
    ));
}

#[test]
fn test_private_file_loaded_as_public_is_a_different_key() {
    // Both kinds are 32 raw bytes; the selector decides the interpretation
    let (temp, sender, _) = common::setup_test_env();
    let path = temp.path().join("sender.key");
    save_key_to_file(&sender.private, &path).unwrap();

    let as_public = load_key_from_file(&path, KeyKind::Public).unwrap();
    assert_eq!(as_public.kind(), KeyKind::Public);
    assert_ne!(as_public, Key::Public(sender.public.clone()));
}

#[test]
fn test_trailing_newline_tolerated() {
    let (temp, _, _) = common::setup_test_env();
    let key = PrivateKey::generate();
    let path = temp.path().join("edited.key");
    fs::write(&path, format!("{}\n", key_to_str(&key))).unwrap();

    assert_eq!(load_private_key(&path).unwrap(), key);
}

#[test]
fn test_file_content_matches_codec() {
    let (temp, sender, _) = common::setup_test_env();
    let path = temp.path().join("sender.key");
    save_key_to_file(&sender.private, &path).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(content, key_to_str(&sender.private));
    assert_eq!(content, sender.private.to_base64());
}

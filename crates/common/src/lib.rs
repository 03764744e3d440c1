/**
 * Cryptographic types and operations.
 *  - Private and public box keys and their
 *    base64 text form
 *  - Opening (and sealing) box ciphertext
 */
pub mod crypto;
/**
 * Encrypted data files on disk.
 * Decrypts `<name>.enc` style files next to
 *  themselves, and the reverse.
 */
pub mod data_file;
/**
 * Key files on disk.
 * One base64 key per file, with the
 *  `<basename>.key` / `<basename>.pub.key`
 *  naming convention for generated pairs.
 */
pub mod key_store;

pub mod prelude {
    pub use crate::crypto::{
        decrypt_response_content, encrypt_content, key_to_str, str_to_private_key,
        str_to_public_key, BoxError, EncodeKey, Key, KeyError, KeyKind, KeyPair, PrivateKey,
        PublicKey,
    };
    pub use crate::data_file::{
        decrypt_data_file, decrypted_path, encrypt_data_file, DataFileError, DEFAULT_ENC_SUFFIX,
    };
    pub use crate::key_store::{
        create_keys_and_files, load_key_from_file, load_key_from_file_str, load_private_key,
        load_public_key, save_key_to_file, KeyStoreError,
    };
}

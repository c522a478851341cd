//! Cryptographic primitives for mums.
//!
//! This module provides:
//! - SHA-256 passphrase-to-key derivation (`kdf`)
//! - The IV/plaintext integrity digest (`integrity`)
//! - Chunked AES-256-CBC encryption and decryption (`encryption`)
//! - Reading the keyfile that supplies the passphrase (`keyfile`)

pub mod encryption;
pub mod integrity;
pub mod kdf;
pub mod keyfile;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{derive_key, compute_digest, ...};
pub use encryption::{decrypt_in_place, encrypt_in_place, generate_iv, DEFAULT_CHUNK_SIZE};
pub use integrity::{compute_digest, verify_digest};
pub use kdf::{derive_key, SymmetricKey};
pub use keyfile::{default_keyfile_path, load_passphrase};

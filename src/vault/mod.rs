//! Vault module: the encrypted name/value container.
//!
//! This module provides:
//! - The binary container format and `VaultCodec` (`format`)
//! - The decrypted `VaultMapping` and its JSON form (`mapping`)
//! - Advisory locking around read-modify-write (`lock`)
//! - High-level `VaultStore` for loading, mutating and persisting (`store`)

pub mod format;
pub mod lock;
pub mod mapping;
pub mod store;

// Re-export the most commonly used items.
pub use format::{ContainerHeader, VaultCodec, HEADER_LEN};
pub use lock::VaultLock;
pub use mapping::VaultMapping;
pub use store::VaultStore;

// Copyright (c) 2018-2022 The Botho Foundation

#![deny(unsafe_code)]
#![deny(missing_docs)]

//! A hierarchical deterministic keychain for confidential transactions.
//!
//! A [`Keychain`] is created from a seed and derives child blinding keys on
//! demand. Each derived key is named by its [`Identifier`], a short
//! fingerprint of its public key, and every operation that needs a blinding
//! key (commitments, range proofs, signatures) takes an identifier rather
//! than the key itself.
//!
//! [`BlindSum`] collects the signed blinding contributions of a transaction
//! being built; [`Keychain::blind_sum`] resolves it into a single
//! [`BlindingFactor`].

mod blind;
mod config;
mod error;
mod extended_key;
mod identifier;
mod keychain;
mod switch_commit;

pub use blind::{BlindSum, BlindingFactor};
pub use config::KeychainConfig;
pub use error::Error;
pub use extended_key::{ExtendedKey, EXTENDED_KEY_SIZE};
pub use identifier::{Identifier, IDENTIFIER_SIZE};
pub use keychain::Keychain;
pub use switch_commit::{SwitchCommitHash, SWITCH_COMMIT_HASH_SIZE};

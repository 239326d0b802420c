// Copyright (c) 2018-2022 The Botho Foundation

//! Hashes of switch commitments, stored in outputs.

use core::fmt;
use mw_crypto_hashes::{
    blake2b::{keyed_hash_160, keyed_hash_256},
    AsFixedBytes, Writeable, Writer,
};
use mw_crypto_secp256k1::{Commitment, SECRET_KEY_SIZE};

use crate::Error;

/// The length of a switch commitment hash in bytes.
pub const SWITCH_COMMIT_HASH_SIZE: usize = 20;

const SWITCH_KEY_TAG: &[u8] = b"mw_switch_commit_key";

/// Blake2b-160 of a switch commitment, keyed by a hash of the blinding key.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct SwitchCommitHash([u8; SWITCH_COMMIT_HASH_SIZE]);

impl SwitchCommitHash {
    /// Hash `switch_commit`, keyed by the key that blinds it.
    pub fn from_switch_commit(switch_commit: &Commitment, secret: &[u8; SECRET_KEY_SIZE]) -> Self {
        let key = keyed_hash_256(SWITCH_KEY_TAG, &[secret]);
        Self(keyed_hash_160(&key, &[&switch_commit.0]))
    }

    /// Copy a hash out of exactly 20 bytes.
    pub fn from_slice(src: &[u8]) -> Result<Self, Error> {
        <[u8; SWITCH_COMMIT_HASH_SIZE]>::try_from(src)
            .map(Self)
            .map_err(|_| Error::InvalidSliceSize(src.len(), SWITCH_COMMIT_HASH_SIZE))
    }

    /// The all-zero hash.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; SWITCH_COMMIT_HASH_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl AsRef<[u8]> for SwitchCommitHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsFixedBytes for SwitchCommitHash {
    const LEN: usize = SWITCH_COMMIT_HASH_SIZE;
}

impl Writeable for SwitchCommitHash {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_fixed_bytes(self)
    }
}

impl fmt::Debug for SwitchCommitHash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SwitchCommitHash({})", hex_fmt::HexFmt(&self.0))
    }
}

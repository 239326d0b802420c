// Copyright (c) 2018-2022 The Botho Foundation

//! Hierarchical deterministic key derivation.
//!
//! A root key is derived from a seed with Blake2b-512 keyed by
//! `"Mimble seed"`. The first half of the output is the secret key and the
//! second half is the chain code. Child `n` is derived from its parent as
//!
//! ```text
//! I = Blake2b-512(key = chain_code, data = secret ‖ be32(n))
//! child_secret = I[..32] + secret  (mod order)
//! child_chain_code = I[32..]
//! ```

use core::fmt;
use mw_crypto_hashes::blake2b::keyed_hash_512;
use mw_crypto_secp256k1::{
    scalar_in_range, secret_key_from_slice, Secp256k1, SecretKey, SECRET_KEY_SIZE,
};
use zeroize::{ZeroizeOnDrop, Zeroizing};

use crate::{Error, Identifier, IDENTIFIER_SIZE};

/// The length of a serialized [`ExtendedKey`].
pub const EXTENDED_KEY_SIZE: usize = 1 + IDENTIFIER_SIZE + 4 + 32 + SECRET_KEY_SIZE;

const SEED_KEY: &[u8] = b"Mimble seed";

/// A secret key together with the chain code used to derive its children.
#[derive(Clone, ZeroizeOnDrop)]
pub struct ExtendedKey {
    depth: u8,
    child_index: u32,
    #[zeroize(skip)]
    root_key_id: Identifier,
    chain_code: [u8; 32],
    // Zeroized by its own drop.
    #[zeroize(skip)]
    secret_key: SecretKey,
}

impl ExtendedKey {
    /// Derive the root key from a 16, 32 or 64 byte seed.
    pub fn from_seed(secp: &Secp256k1, seed: &[u8]) -> Result<Self, Error> {
        if !matches!(seed.len(), 16 | 32 | 64) {
            return Err(Error::InvalidSeedSize(seed.len()));
        }
        let material = Zeroizing::new(keyed_hash_512(SEED_KEY, &[seed]));
        let secret_key =
            secret_key_from_slice(&material[..32]).map_err(|_| Error::InvalidSecretKey)?;
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&material[32..]);

        let mut key = Self {
            depth: 0,
            child_index: 0,
            root_key_id: Identifier::zero(),
            chain_code,
            secret_key,
        };
        key.root_key_id = key.identifier(secp)?;
        Ok(key)
    }

    /// Derive child `n` of this key.
    ///
    /// Fails with [`Error::InvalidSecretKey`] in the negligible case where
    /// the tweak is not below the group order or the child secret is zero,
    /// and with [`Error::DepthOverflow`] below a key of depth 255.
    pub fn derive(&self, secp: &Secp256k1, n: u32) -> Result<Self, Error> {
        let depth = self.depth.checked_add(1).ok_or(Error::DepthOverflow)?;
        let secret_bytes = Zeroizing::new(self.secret_bytes());
        let material = Zeroizing::new(keyed_hash_512(
            &self.chain_code,
            &[secret_bytes.as_slice(), &n.to_be_bytes()],
        ));

        let mut tweak_bytes = Zeroizing::new([0u8; 32]);
        tweak_bytes.copy_from_slice(&material[..32]);
        if !scalar_in_range(&tweak_bytes) {
            return Err(Error::InvalidSecretKey);
        }
        let secret_key = secp.tweak_add(&self.secret_key, &tweak_bytes)?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&material[32..]);

        Ok(Self {
            depth,
            child_index: n,
            root_key_id: self.identifier(secp)?,
            chain_code,
            secret_key,
        })
    }

    /// The identifier of this key's public key.
    pub fn identifier(&self, secp: &Secp256k1) -> Result<Identifier, Error> {
        let pubkey = secp.public_key(&self.secret_key)?;
        Ok(Identifier::from_pubkey(&secp.serialize_pubkey(&pubkey)))
    }

    /// Distance from the root key.
    pub fn depth(&self) -> u8 {
        self.depth
    }

    /// The index this key was derived at; 0 for a root key.
    pub fn child_index(&self) -> u32 {
        self.child_index
    }

    /// Identifier of the parent key (of the key itself, for a root key).
    pub fn root_key_id(&self) -> Identifier {
        self.root_key_id
    }

    /// The chain code.
    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// The secret key.
    pub fn secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    fn secret_bytes(&self) -> [u8; SECRET_KEY_SIZE] {
        self.secret_key.0
    }

    /// `depth ‖ root_key_id ‖ be32(child_index) ‖ chain_code ‖ secret_key`.
    pub fn to_bytes(&self) -> [u8; EXTENDED_KEY_SIZE] {
        let mut bytes = [0u8; EXTENDED_KEY_SIZE];
        bytes[0] = self.depth;
        bytes[1..11].copy_from_slice(self.root_key_id.as_bytes());
        bytes[11..15].copy_from_slice(&self.child_index.to_be_bytes());
        bytes[15..47].copy_from_slice(&self.chain_code);
        let secret_bytes = Zeroizing::new(self.secret_bytes());
        bytes[47..].copy_from_slice(secret_bytes.as_slice());
        bytes
    }

    /// Parse the encoding produced by [`ExtendedKey::to_bytes`].
    pub fn from_bytes(src: &[u8]) -> Result<Self, Error> {
        if src.len() != EXTENDED_KEY_SIZE {
            return Err(Error::InvalidSliceSize(src.len(), EXTENDED_KEY_SIZE));
        }
        let secret_key =
            secret_key_from_slice(&src[47..]).map_err(|_| Error::InvalidSecretKey)?;
        let mut child_index = [0u8; 4];
        child_index.copy_from_slice(&src[11..15]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&src[15..47]);

        Ok(Self {
            depth: src[0],
            child_index: u32::from_be_bytes(child_index),
            root_key_id: Identifier::from_bytes(&src[1..11]),
            chain_code,
            secret_key,
        })
    }
}

impl fmt::Debug for ExtendedKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ExtendedKey")
            .field("depth", &self.depth)
            .field("child_index", &self.child_index)
            .field("root_key_id", &self.root_key_id)
            .finish_non_exhaustive()
    }
}

impl PartialEq for ExtendedKey {
    fn eq(&self, other: &Self) -> bool {
        self.depth == other.depth
            && self.child_index == other.child_index
            && self.root_key_id == other.root_key_id
            && self.chain_code == other.chain_code
            && self.secret_key == other.secret_key
    }
}

impl Eq for ExtendedKey {}

// Copyright (c) 2018-2022 The Botho Foundation

//! Blinding factors and the signed sums transactions accumulate.

use core::fmt;
use mw_crypto_secp256k1::{scalar_in_range, secret_key_from_slice, SecretKey, SECRET_KEY_SIZE};
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{Error, Identifier};

/// A 32-byte big-endian scalar below the group order. Zero is allowed.
#[derive(Clone, Default, Zeroize, ZeroizeOnDrop)]
pub struct BlindingFactor([u8; SECRET_KEY_SIZE]);

impl BlindingFactor {
    /// The zero blinding factor.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Copy a blinding factor out of exactly 32 bytes.
    pub fn from_slice(src: &[u8]) -> Result<Self, Error> {
        let bytes = <[u8; SECRET_KEY_SIZE]>::try_from(src)
            .map_err(|_| Error::InvalidSliceSize(src.len(), SECRET_KEY_SIZE))?;
        Self::from_bytes(bytes)
    }

    /// A blinding factor from 32 big-endian bytes below the curve order.
    pub fn from_bytes(bytes: [u8; SECRET_KEY_SIZE]) -> Result<Self, Error> {
        if !scalar_in_range(&bytes) {
            return Err(Error::InvalidSecretKey);
        }
        Ok(Self(bytes))
    }

    /// The blinding factor equal to a secret key.
    pub fn from_secret_key(secret: &SecretKey) -> Self {
        Self(secret.0)
    }

    /// Whether this is the zero blinding factor.
    pub fn is_zero(&self) -> bool {
        self.0.ct_eq(&[0u8; SECRET_KEY_SIZE]).into()
    }

    /// This blinding factor as a secret key, usable for signing.
    ///
    /// A zero blinding factor has no secret key.
    pub fn to_secret_key(&self) -> Result<SecretKey, Error> {
        secret_key_from_slice(&self.0).map_err(|_| Error::InvalidSecretKey)
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl PartialEq for BlindingFactor {
    fn eq(&self, other: &Self) -> bool {
        self.0.ct_eq(&other.0).into()
    }
}

impl Eq for BlindingFactor {}

impl fmt::Debug for BlindingFactor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("BlindingFactor(<redacted>)")
    }
}

/// Signed blinding contributions collected while building a transaction.
///
/// Outputs add their key ids, inputs subtract theirs, and finished blinding
/// factors (e.g. from a partial transaction) can be mixed in either way.
/// [`crate::Keychain::blind_sum`] turns the whole sum into one
/// [`BlindingFactor`].
#[derive(Debug, Default)]
pub struct BlindSum {
    /// Keys whose blinding factors are added.
    pub positive_key_ids: Vec<Identifier>,
    /// Keys whose blinding factors are subtracted.
    pub negative_key_ids: Vec<Identifier>,
    /// Blinding factors that are added.
    pub positive_blinding_factors: Vec<BlindingFactor>,
    /// Blinding factors that are subtracted.
    pub negative_blinding_factors: Vec<BlindingFactor>,
}

impl BlindSum {
    /// An empty sum.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the blinding factor of a key.
    pub fn add_key_id(mut self, key_id: Identifier) -> Self {
        self.positive_key_ids.push(key_id);
        self
    }

    /// Subtract the blinding factor of a key.
    pub fn sub_key_id(mut self, key_id: Identifier) -> Self {
        self.negative_key_ids.push(key_id);
        self
    }

    /// Add a blinding factor.
    pub fn add_blinding_factor(mut self, blind: BlindingFactor) -> Self {
        self.positive_blinding_factors.push(blind);
        self
    }

    /// Subtract a blinding factor.
    pub fn sub_blinding_factor(mut self, blind: BlindingFactor) -> Self {
        self.negative_blinding_factors.push(blind);
        self
    }
}

// Copyright (c) 2018-2022 The Botho Foundation

//! The curve context and the scalar operations done through it.

use core::fmt;
use secp256k1zkp::{rand::Rng, PublicKey, SecretKey};

use crate::{Error, COMPRESSED_PUBLIC_KEY_SIZE, CURVE_ORDER, SECRET_KEY_SIZE};

pub use secp256k1zkp::ContextFlag;

/// A curve context.
///
/// Wraps the library context, which carries the capabilities a caller may
/// use and the blinding applied to fixed-base multiplications. Inputs are
/// checked here before they reach the library.
#[derive(Clone)]
pub struct Secp256k1 {
    pub(crate) inner: secp256k1zkp::Secp256k1,
    caps: ContextFlag,
}

impl Secp256k1 {
    /// A context with every capability except commitments.
    pub fn new() -> Self {
        Self::with_caps(ContextFlag::Full)
    }

    /// A context with the given capabilities.
    pub fn with_caps(caps: ContextFlag) -> Self {
        Self {
            inner: secp256k1zkp::Secp256k1::with_caps(caps),
            caps,
        }
    }

    /// The capabilities of this context.
    pub fn caps(&self) -> ContextFlag {
        self.caps
    }

    /// Pick a fresh blinding for fixed-base multiplications. Results never
    /// depend on it.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        self.inner.randomize(rng);
    }

    /// The public key of a secret key.
    pub fn public_key(&self, secret: &SecretKey) -> Result<PublicKey, Error> {
        Ok(PublicKey::from_secret_key(&self.inner, secret)?)
    }

    /// The 33-byte compressed encoding of a public key.
    pub fn serialize_pubkey(&self, pubkey: &PublicKey) -> [u8; COMPRESSED_PUBLIC_KEY_SIZE] {
        let mut bytes = [0u8; COMPRESSED_PUBLIC_KEY_SIZE];
        bytes.copy_from_slice(&pubkey.serialize_vec(&self.inner, true));
        bytes
    }

    /// `secret + tweak` modulo the curve order.
    ///
    /// Fails when the tweak is not below the order or the sum is zero.
    pub fn tweak_add(
        &self,
        secret: &SecretKey,
        tweak: &[u8; SECRET_KEY_SIZE],
    ) -> Result<SecretKey, Error> {
        let mut sum = secret.clone();
        sum.add_assign(&self.inner, &SecretKey(*tweak))?;
        Ok(sum)
    }

    /// Sum of the positive secret keys minus the sum of the negative ones,
    /// as 32 big-endian bytes. The sum may be zero.
    pub fn blind_sum(
        &self,
        positive: &[SecretKey],
        negative: &[SecretKey],
    ) -> Result<[u8; SECRET_KEY_SIZE], Error> {
        if positive.is_empty() && negative.is_empty() {
            return Ok([0u8; SECRET_KEY_SIZE]);
        }
        match self.inner.blind_sum(positive.to_vec(), negative.to_vec()) {
            Ok(sum) => Ok(sum.0),
            // Keys passed in are valid, so the only invalid sum is zero.
            Err(secp256k1zkp::Error::InvalidSecretKey) => Ok([0u8; SECRET_KEY_SIZE]),
            Err(err) => Err(err.into()),
        }
    }
}

impl Default for Secp256k1 {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Secp256k1 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Secp256k1").field("caps", &self.caps()).finish()
    }
}

/// Whether 32 big-endian bytes are below the curve order. Zero is.
pub fn scalar_in_range(bytes: &[u8; SECRET_KEY_SIZE]) -> bool {
    bytes < &CURVE_ORDER
}

/// A secret key from exactly 32 bytes, nonzero and below the curve order.
pub fn secret_key_from_slice(src: &[u8]) -> Result<SecretKey, Error> {
    let bytes = <[u8; SECRET_KEY_SIZE]>::try_from(src)
        .map_err(|_| Error::LengthMismatch(src.len(), SECRET_KEY_SIZE))?;
    if bytes == [0u8; SECRET_KEY_SIZE] || !scalar_in_range(&bytes) {
        return Err(Error::InvalidSecretKey);
    }
    Ok(SecretKey(bytes))
}

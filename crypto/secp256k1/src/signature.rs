// Copyright (c) 2018-2022 The Botho Foundation

//! ECDSA over 32-byte messages.

use core::fmt;
use secp256k1zkp::{Message, PublicKey, SecretKey};

use crate::{scalar_in_range, Error, Secp256k1, COMPACT_SIGNATURE_SIZE, SECRET_KEY_SIZE};

/// A compact `r ‖ s` ECDSA signature.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Signature([u8; COMPACT_SIGNATURE_SIZE]);

impl Signature {
    /// Parse a 64-byte `r ‖ s` signature. Both halves must be nonzero and
    /// below the curve order.
    pub fn from_compact(src: &[u8]) -> Result<Self, Error> {
        let bytes =
            <[u8; COMPACT_SIGNATURE_SIZE]>::try_from(src).map_err(|_| Error::InvalidSignature)?;
        for half in bytes.chunks_exact(SECRET_KEY_SIZE) {
            let mut scalar = [0u8; SECRET_KEY_SIZE];
            scalar.copy_from_slice(half);
            if scalar == [0u8; SECRET_KEY_SIZE] || !scalar_in_range(&scalar) {
                return Err(Error::InvalidSignature);
            }
        }
        Ok(Self(bytes))
    }

    /// The 64-byte `r ‖ s` encoding.
    pub fn to_compact(&self) -> [u8; COMPACT_SIGNATURE_SIZE] {
        self.0
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Signature({})", hex_fmt::HexFmt(&self.0))
    }
}

impl Secp256k1 {
    /// Deterministically (RFC 6979) sign a message. The signature has a low
    /// `s` value.
    pub fn sign(&self, msg: &Message, secret: &SecretKey) -> Result<Signature, Error> {
        let signature = self.inner.sign(msg, secret)?;
        Ok(Signature(signature.serialize_compact(&self.inner)))
    }

    /// Check a signature against a message and public key.
    pub fn verify(
        &self,
        msg: &Message,
        signature: &Signature,
        pubkey: &PublicKey,
    ) -> Result<(), Error> {
        let signature = secp256k1zkp::Signature::from_compact(&self.inner, &signature.0)?;
        Ok(self.inner.verify(msg, &signature, pubkey)?)
    }
}

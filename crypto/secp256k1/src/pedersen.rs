// Copyright (c) 2018-2022 The Botho Foundation

//! Pedersen and switch commitments.
//!
//! Commitments are 33 bytes: a prefix of `0x08` or `0x09` and the x
//! coordinate of the committed point. The library trusts every commitment
//! it is handed, so each one is checked here first.

use secp256k1zkp::{pedersen::Commitment, PublicKey, SecretKey};

use crate::{
    ContextFlag, Error, Secp256k1, COMPRESSED_PUBLIC_KEY_SIZE, GENERATOR_J,
    PEDERSEN_COMMITMENT_SIZE,
};

impl Secp256k1 {
    /// Copy a commitment out of a 33-byte slice, checking that it encodes
    /// a curve point.
    pub fn parse_commitment(&self, src: &[u8]) -> Result<Commitment, Error> {
        let bytes = <[u8; PEDERSEN_COMMITMENT_SIZE]>::try_from(src)
            .map_err(|_| Error::LengthMismatch(src.len(), PEDERSEN_COMMITMENT_SIZE))?;
        let commit = Commitment(bytes);
        self.check_commitment(&commit)?;
        Ok(commit)
    }

    /// `value·H + blind·G`.
    pub fn commit(&self, value: u64, blind: &SecretKey) -> Result<Commitment, Error> {
        self.require_commit()?;
        Ok(self.inner.commit(value, blind.clone())?)
    }

    /// `value·H`, a commitment with a zero blinding factor. There is no
    /// commitment to zero with a zero blinding factor.
    pub fn commit_value(&self, value: u64) -> Result<Commitment, Error> {
        self.require_commit()?;
        if value == 0 {
            return Err(Error::PointAtInfinity);
        }
        Ok(self.inner.commit_value(value)?)
    }

    /// `blind·J`, binding a commitment's blinding factor to a second
    /// generator.
    pub fn switch_commit(&self, blind: &SecretKey) -> Result<Commitment, Error> {
        self.require_commit()?;
        let mut point = PublicKey::from_slice(&self.inner, &GENERATOR_J)?;
        point.mul_assign(&self.inner, blind)?;
        Ok(Commitment::from_pubkey(&self.inner, &point)?)
    }

    /// Sum of the positive commitments minus the sum of the negative ones.
    ///
    /// Fails with [`Error::PointAtInfinity`] when they cancel out.
    pub fn commit_sum(
        &self,
        positive: &[Commitment],
        negative: &[Commitment],
    ) -> Result<Commitment, Error> {
        self.require_commit()?;
        for commit in positive.iter().chain(negative) {
            self.check_commitment(commit)?;
        }
        Ok(self.inner.commit_sum(positive.to_vec(), negative.to_vec())?)
    }

    /// Whether the positive and negative commitments sum to the same point.
    pub fn verify_commit_sum(&self, positive: &[Commitment], negative: &[Commitment]) -> bool {
        self.caps() == ContextFlag::Commit
            && positive
                .iter()
                .chain(negative)
                .all(|commit| self.check_commitment(commit).is_ok())
            && self
                .inner
                .verify_commit_sum(positive.to_vec(), negative.to_vec())
    }

    /// Interpret a commitment as a public key, e.g. a transaction excess
    /// against which a signature is checked.
    pub fn commit_to_pubkey(&self, commit: &Commitment) -> Result<PublicKey, Error> {
        self.check_commitment(commit)
            .map_err(|_| Error::InvalidPublicKey)?;
        Ok(commit.to_pubkey(&self.inner)?)
    }

    pub(crate) fn check_commitment(&self, commit: &Commitment) -> Result<(), Error> {
        if commit.0[0] & 0xfe != 0x08 {
            return Err(Error::InvalidCommitment);
        }
        let mut point = [0u8; COMPRESSED_PUBLIC_KEY_SIZE];
        point[0] = 0x02;
        point[1..].copy_from_slice(&commit.0[1..]);
        PublicKey::from_slice(&self.inner, &point)
            .map(|_| ())
            .map_err(|_| Error::InvalidCommitment)
    }

    pub(crate) fn require_commit(&self) -> Result<(), Error> {
        if self.caps() == ContextFlag::Commit {
            Ok(())
        } else {
            Err(Error::IncapableContext)
        }
    }
}

// Copyright (c) 2018-2022 The Botho Foundation

//! Range proofs over Pedersen commitments.
//!
//! A proof shows that a commitment opens to a value in `[0, 2^64)`. The
//! blinding factor of the commitment doubles as the rewind nonce: whoever
//! holds it can read the value and the embedded message back out of the
//! proof. Changing any byte of a proof, message included, makes it fail
//! both verification and rewinding.

use secp256k1zkp::{
    pedersen::{Commitment, ProofMessage, ProofRange, RangeProof},
    SecretKey,
};

use crate::{Error, Secp256k1, MAX_PROOF_SIZE, PROOF_MSG_SIZE};

/// What rewinding a range proof revealed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ProofInfo {
    /// Whether the nonce matched the proof.
    pub success: bool,
    /// The committed value, or 0 on failure.
    pub value: u64,
    /// The embedded message, or empty on failure.
    ///
    /// Messages are zero-padded inside the proof, so trailing zero bytes
    /// do not come back.
    pub message: ProofMessage,
    /// Smallest provable value.
    pub min: u64,
    /// Largest provable value.
    pub max: u64,
}

impl ProofInfo {
    fn failed() -> Self {
        Self {
            success: false,
            value: 0,
            message: ProofMessage::empty(),
            min: 0,
            max: 0,
        }
    }
}

impl Secp256k1 {
    /// Prove that `commit = value·H + blind·G` holds a value in
    /// `[0, 2^64)`, embedding `message`. The blinding factor is also the
    /// rewind nonce.
    pub fn range_proof(
        &self,
        value: u64,
        blind: &SecretKey,
        commit: &Commitment,
        message: &ProofMessage,
    ) -> Result<RangeProof, Error> {
        self.require_commit()?;
        if message.len() > PROOF_MSG_SIZE {
            return Err(Error::ProofMessageTooLong(message.len()));
        }
        if self.commit(value, blind)? != *commit {
            return Err(Error::CommitmentMismatch);
        }
        Ok(self
            .inner
            .range_proof(0, value, blind.clone(), *commit, message.clone()))
    }

    /// Verify a range proof against a commitment.
    pub fn verify_range_proof(
        &self,
        commit: &Commitment,
        proof: &RangeProof,
    ) -> Result<ProofRange, Error> {
        self.require_commit()?;
        self.check_commitment(commit)?;
        check_length(proof)?;
        Ok(self.inner.verify_range_proof(*commit, *proof)?)
    }

    /// Read the value and message back out of a proof made with `nonce`.
    ///
    /// A proof made with another nonce, or one that does not verify, gives
    /// `success == false` rather than an error.
    pub fn rewind_range_proof(
        &self,
        commit: &Commitment,
        proof: &RangeProof,
        nonce: &SecretKey,
    ) -> Result<ProofInfo, Error> {
        self.require_commit()?;
        self.check_commitment(commit)?;
        check_length(proof)?;

        let info = self
            .inner
            .rewind_range_proof(*commit, *proof, nonce.clone());
        if !info.success {
            return Ok(ProofInfo::failed());
        }

        let recovered = &info.message.as_bytes()[..info.mlen.min(info.message.len())];
        let end = recovered
            .iter()
            .rposition(|byte| *byte != 0)
            .map_or(0, |last| last + 1);
        Ok(ProofInfo {
            success: true,
            value: info.value,
            message: ProofMessage::from_bytes(&recovered[..end]),
            min: info.min,
            max: info.max,
        })
    }
}

fn check_length(proof: &RangeProof) -> Result<(), Error> {
    if proof.plen == 0 || proof.plen > MAX_PROOF_SIZE {
        return Err(Error::InvalidRangeProof);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{secret_key_from_slice, ContextFlag};
    use proptest::prelude::*;

    fn secp() -> Secp256k1 {
        Secp256k1::with_caps(ContextFlag::Commit)
    }

    fn key(byte: u8) -> SecretKey {
        secret_key_from_slice(&[byte; 32]).unwrap()
    }

    fn prove(
        secp: &Secp256k1,
        value: u64,
        blind: &SecretKey,
        message: &[u8],
    ) -> (Commitment, RangeProof) {
        let commit = secp.commit(value, blind).unwrap();
        let proof = secp
            .range_proof(value, blind, &commit, &ProofMessage::from_bytes(message))
            .unwrap();
        (commit, proof)
    }

    #[test]
    fn boundary_values() {
        let secp = secp();
        for value in [0, 1, u64::MAX - 1, u64::MAX] {
            let (commit, proof) = prove(&secp, value, &key(3), b"");
            let range = secp.verify_range_proof(&commit, &proof).unwrap();
            assert_eq!((range.min, range.max), (0, u64::MAX));

            let info = secp.rewind_range_proof(&commit, &proof, &key(3)).unwrap();
            assert!(info.success);
            assert_eq!(info.value, value);
            assert_eq!(info.message, ProofMessage::empty());
        }
    }

    #[test]
    fn wrong_nonce_rewinds_nothing() {
        let secp = secp();
        let (commit, proof) = prove(&secp, 77, &key(4), b"secret memo");
        let info = secp.rewind_range_proof(&commit, &proof, &key(5)).unwrap();
        assert_eq!(info, ProofInfo::failed());
    }

    #[test]
    fn proof_is_bound_to_commitment() {
        let secp = secp();
        let (_, proof) = prove(&secp, 10, &key(6), b"");
        let (other, _) = prove(&secp, 10, &key(7), b"");
        assert_eq!(
            secp.verify_range_proof(&other, &proof).unwrap_err(),
            Error::InvalidRangeProof
        );
        assert!(!secp.rewind_range_proof(&other, &proof, &key(6)).unwrap().success);
    }

    #[test]
    fn tampered_proofs_fail_verify_and_rewind() {
        let secp = secp();
        let message = b"pay to the order of bob";
        let (commit, proof) = prove(&secp, 1000, &key(8), message);
        let info = secp.rewind_range_proof(&commit, &proof, &key(8)).unwrap();
        assert_eq!(info.message.as_bytes(), &message[..]);

        for position in [100, proof.plen / 2, proof.plen - 40, proof.plen - 1] {
            let mut tampered = proof;
            tampered.proof[position] ^= 0x01;
            assert_eq!(
                secp.verify_range_proof(&commit, &tampered).unwrap_err(),
                Error::InvalidRangeProof,
                "byte {position}"
            );
            assert_eq!(
                secp.rewind_range_proof(&commit, &tampered, &key(8)).unwrap(),
                ProofInfo::failed(),
                "byte {position}"
            );
        }

        let mut truncated = proof;
        truncated.plen -= 1;
        assert!(secp.verify_range_proof(&commit, &truncated).is_err());

        let mut overlong = proof;
        overlong.plen = MAX_PROOF_SIZE + 1;
        assert_eq!(
            secp.verify_range_proof(&commit, &overlong).unwrap_err(),
            Error::InvalidRangeProof
        );
    }

    #[test]
    fn commitment_must_open() {
        let secp = secp();
        let commit = secp.commit(5, &key(9)).unwrap();
        assert_eq!(
            secp.range_proof(6, &key(9), &commit, &ProofMessage::empty())
                .unwrap_err(),
            Error::CommitmentMismatch
        );
        assert_eq!(
            secp.range_proof(5, &key(10), &commit, &ProofMessage::empty())
                .unwrap_err(),
            Error::CommitmentMismatch
        );
    }

    #[test]
    fn message_limit() {
        let secp = secp();
        let commit = secp.commit(5, &key(11)).unwrap();
        let too_long = ProofMessage::from_bytes(&[1u8; PROOF_MSG_SIZE + 1]);
        assert_eq!(
            secp.range_proof(5, &key(11), &commit, &too_long).unwrap_err(),
            Error::ProofMessageTooLong(PROOF_MSG_SIZE + 1)
        );

        let longest = [0xa5u8; PROOF_MSG_SIZE];
        let (commit, proof) = prove(&secp, 5, &key(11), &longest);
        let info = secp.rewind_range_proof(&commit, &proof, &key(11)).unwrap();
        assert_eq!(info.message.as_bytes(), &longest[..]);
    }

    #[test]
    fn needs_commit_capability() {
        let secp = Secp256k1::new();
        let (commit, proof) = prove(&self::secp(), 5, &key(12), b"");
        assert_eq!(
            secp.verify_range_proof(&commit, &proof).unwrap_err(),
            Error::IncapableContext
        );
        assert_eq!(
            secp.rewind_range_proof(&commit, &proof, &key(12)).unwrap_err(),
            Error::IncapableContext
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(4))]

        #[test]
        fn prove_verify_rewind(
            value in any::<u64>(),
            byte in 1u8..0x7f,
            message in proptest::collection::vec(1u8..=255, 0..64),
        ) {
            let secp = secp();
            let (commit, proof) = prove(&secp, value, &key(byte), &message);
            prop_assert!(secp.verify_range_proof(&commit, &proof).is_ok());

            let info = secp.rewind_range_proof(&commit, &proof, &key(byte)).unwrap();
            prop_assert!(info.success);
            prop_assert_eq!(info.value, value);
            prop_assert_eq!(info.message.as_bytes(), &message[..]);
        }
    }
}

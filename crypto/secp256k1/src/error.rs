// Copyright (c) 2018-2022 The Botho Foundation

//! Errors which can occur in connection to commitments, range proofs and
//! signatures

use displaydoc::Display;
use secp256k1zkp::Error as LibError;

/// An error from the secp256k1 layer
#[derive(Clone, Copy, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Error {
    /// Secret key is zero or not below the curve order
    InvalidSecretKey,

    /// Public key is not a valid curve point
    InvalidPublicKey,

    /// Commitment does not encode a curve point
    InvalidCommitment,

    /// Commitment does not open to the given value and blinding factor
    CommitmentMismatch,

    /// Result is the point at infinity
    PointAtInfinity,

    /// Malformed signature
    InvalidSignature,

    /// Signature does not verify
    IncorrectSignature,

    /// Range proof is malformed or does not verify
    InvalidRangeProof,

    /// Message is not 32 bytes
    InvalidMessage,

    /// Proof message of `{0}` bytes exceeds the maximum
    ProofMessageTooLong(usize),

    /// Context lacks the capability for this operation
    IncapableContext,

    /// Incorrect length for array copy, provided `{0}`, required `{1}`.
    LengthMismatch(usize, usize),
}

impl std::error::Error for Error {}

impl From<LibError> for Error {
    fn from(src: LibError) -> Self {
        match src {
            LibError::IncapableContext => Self::IncapableContext,
            LibError::IncorrectSignature => Self::IncorrectSignature,
            LibError::InvalidMessage => Self::InvalidMessage,
            LibError::InvalidPublicKey => Self::InvalidPublicKey,
            LibError::InvalidCommit => Self::InvalidCommitment,
            LibError::InvalidSecretKey => Self::InvalidSecretKey,
            LibError::IncorrectCommitSum => Self::PointAtInfinity,
            LibError::InvalidRangeProof => Self::InvalidRangeProof,
            LibError::InvalidSignature
            | LibError::InvalidRecoveryId
            | LibError::PartialSigFailure
            | LibError::SigSubtractionFailure => Self::InvalidSignature,
        }
    }
}

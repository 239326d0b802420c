// Copyright (c) 2018-2022 The Botho Foundation

//! Errors which can occur when validating transactions

use displaydoc::Display;
use mw_crypto_secp256k1::Error as SecpError;
use mw_keychain::Error as KeychainError;

/// An error from transaction validation
#[derive(Clone, Debug, Display, PartialEq)]
pub enum Error {
    /// All range proofs in the transaction must be valid
    InvalidRangeProof,

    /// The transaction has no excess signature
    MissingSignature,

    /// Overage {0} does not fit in a value commitment
    OverageTooLarge(i128),

    /// Secp256k1: {0}
    Secp(SecpError),

    /// Keychain: {0}
    Keychain(KeychainError),
}

impl std::error::Error for Error {}

impl From<SecpError> for Error {
    fn from(src: SecpError) -> Self {
        match src {
            SecpError::InvalidRangeProof => Self::InvalidRangeProof,
            other => Self::Secp(other),
        }
    }
}

impl From<KeychainError> for Error {
    fn from(src: KeychainError) -> Self {
        Self::Keychain(src)
    }
}

// Copyright (c) 2018-2022 The Botho Foundation

//! Errors which can occur in connection to keychain operations

use displaydoc::Display;
use mw_crypto_secp256k1::Error as SecpError;

use crate::Identifier;

/// An error from the keychain
#[derive(Clone, Debug, Display, PartialEq)]
pub enum Error {
    /// Seed must be 16, 32 or 64 bytes, got `{0}`
    InvalidSeedSize(usize),

    /// Incorrect slice length, provided `{0}`, required `{1}`
    InvalidSliceSize(usize, usize),

    /// Secret key is zero or not below the curve order
    InvalidSecretKey,

    /// Invalid public key
    InvalidPublicKey,

    /// Key depth cannot go past 255
    DepthOverflow,

    /// Key id {0} is not known to this keychain
    UnknownKeyId(Identifier),

    /// Invalid hex: {0}
    InvalidHex(hex::FromHexError),

    /// Secp256k1: {0}
    Secp(SecpError),
}

impl std::error::Error for Error {}

impl From<SecpError> for Error {
    fn from(src: SecpError) -> Self {
        match src {
            SecpError::InvalidSecretKey => Self::InvalidSecretKey,
            SecpError::InvalidPublicKey => Self::InvalidPublicKey,
            other => Self::Secp(other),
        }
    }
}

impl From<hex::FromHexError> for Error {
    fn from(src: hex::FromHexError) -> Self {
        Self::InvalidHex(src)
    }
}

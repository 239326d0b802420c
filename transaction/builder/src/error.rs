// Copyright (c) 2018-2022 The Botho Foundation

use displaydoc::Display;
use mw_crypto_secp256k1::Error as SecpError;
use mw_keychain::Error as KeychainError;
use mw_transaction_core::Error as TransactionError;

/// An error that can occur when building a transaction
#[derive(Clone, Debug, Display, PartialEq)]
pub enum TxBuilderError {
    /// Keychain: {0}
    Keychain(KeychainError),

    /// Transaction: {0}
    Transaction(TransactionError),

    /// Secp256k1: {0}
    Secp(SecpError),
}

impl std::error::Error for TxBuilderError {}

impl From<KeychainError> for TxBuilderError {
    fn from(src: KeychainError) -> Self {
        TxBuilderError::Keychain(src)
    }
}

impl From<TransactionError> for TxBuilderError {
    fn from(src: TransactionError) -> Self {
        TxBuilderError::Transaction(src)
    }
}

impl From<SecpError> for TxBuilderError {
    fn from(src: SecpError) -> Self {
        TxBuilderError::Secp(src)
    }
}

// Copyright (c) 2018-2022 The Botho Foundation

//! Building balanced, signed transactions.
//!
//! A transaction is described as a list of [`Step`]s: inputs to spend,
//! outputs to create, a fee and so on. [`transaction`] folds the steps over
//! an empty transaction, keeping a running [`BlindSum`] of the blinding
//! keys involved, then signs the result with the net blinding factor.
//!
//! ```
//! use mw_keychain::Keychain;
//! use mw_transaction_builder::{input, output, transaction, with_fee};
//!
//! let keychain = Keychain::from_seed(&[0u8; 32]).unwrap();
//! let spent = keychain.derive_key_id(1).unwrap();
//! let change = keychain.derive_key_id(2).unwrap();
//!
//! let (tx, _blind) = transaction(
//!     vec![input(10, spent), output(8, change), with_fee(2)],
//!     &keychain,
//! )
//! .unwrap();
//! assert_eq!(tx.excess_sig.len(), 64);
//! ```
//!
//! [`BlindSum`]: mw_keychain::BlindSum

#![deny(missing_docs)]

mod build;
mod error;

pub use build::{
    initial_tx, input, output, transaction, with_excess, with_fee, with_lock_height, Append,
    Context, Step,
};
pub use error::TxBuilderError;

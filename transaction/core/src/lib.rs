// Copyright (c) 2018-2022 The Botho Foundation

//! Confidential transaction data types and balance validation.
//!
//! A [`Transaction`] spends [`Input`]s and creates [`Output`]s, all of them
//! Pedersen commitments, and pays an explicit fee. It balances when
//! `Σoutputs + fee·H − Σinputs` is a commitment to zero, i.e. a public key
//! `excess·G`. The excess signature proves knowledge of that key without
//! revealing any amount.
//!
//! [`Committed::sum_commitments`] computes the excess of anything made of
//! inputs, outputs and an explicit overage, after checking every output's
//! range proof.

#![deny(missing_docs)]

mod committed;
mod error;
mod tx;

pub use committed::Committed;
pub use error::Error;
pub use tx::{kernel_sig_msg, Input, Output, OutputFeatures, Transaction, TxKernel};

pub use mw_crypto_secp256k1::{Commitment, RangeProof};
pub use mw_keychain::SwitchCommitHash;

// Copyright (c) 2018-2022 The Botho Foundation

#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Confidential-transaction primitives over secp256k1.
//!
//! The curve arithmetic, Pedersen commitments, range proofs and ECDSA all
//! come from [`secp256k1zkp`]. This crate puts a checked, borrowing API in
//! front of it:
//!
//! * commitments are validated before the library sees them, and a sum
//!   that cancels out is an error rather than an unencodable point,
//! * range proofs refuse commitments that do not open to the given value,
//!   and rewinding trims the recovered message,
//! * switch commitments `r·J` use a nothing-up-my-sleeve generator `J`,
//! * signatures travel in their 64-byte compact form.
//!
//! ```
//! use mw_crypto_secp256k1::{secret_key_from_slice, ContextFlag, Secp256k1};
//!
//! let secp = Secp256k1::with_caps(ContextFlag::Commit);
//! let r1 = secret_key_from_slice(&[1u8; 32]).unwrap();
//! let r2 = secret_key_from_slice(&[2u8; 32]).unwrap();
//! let r3 = secret_key_from_slice(&[3u8; 32]).unwrap();
//!
//! let a = secp.commit(3, &r1).unwrap();
//! let b = secp.commit(4, &r2).unwrap();
//! let sum = secp.commit(7, &r3).unwrap();
//! assert!(secp.verify_commit_sum(&[a, b], &[sum]));
//! ```

pub use secp256k1zkp;
pub use secp256k1zkp::rand;

mod constants;
mod context;
mod error;
mod pedersen;
mod range_proof;
mod signature;

pub use constants::{
    COMPACT_SIGNATURE_SIZE, COMPRESSED_PUBLIC_KEY_SIZE, CURVE_ORDER, GENERATOR_J, MAX_PROOF_SIZE,
    MESSAGE_SIZE, PEDERSEN_COMMITMENT_SIZE, PROOF_MSG_SIZE, SECRET_KEY_SIZE,
};
pub use context::{scalar_in_range, secret_key_from_slice, ContextFlag, Secp256k1};
pub use error::Error;
pub use range_proof::ProofInfo;
pub use secp256k1zkp::{
    pedersen::{Commitment, ProofMessage, ProofRange, RangeProof},
    Message, PublicKey, SecretKey,
};
pub use signature::Signature;

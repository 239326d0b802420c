// Copyright (c) 2018-2022 The Botho Foundation

//! Canonical hashing for transaction objects.
//!
//! Every object that contributes to a content hash writes its fields, in a
//! fixed order, into a [`Writer`]. [`HashWriter`] folds those writes into an
//! unkeyed Blake2b-256 state, and the blanket [`Hashed`] impl turns any
//! [`Writeable`] into a [`Hash`].
//!
//! The keyed Blake2b helpers in [`blake2b`] are the primitives used for key
//! derivation, identifiers and switch commitment hashes.

#![no_std]
#![deny(missing_docs)]

extern crate alloc;

pub mod blake2b;
mod hash;
mod ser;

pub use hash::{Hash, HashWriter, Hashed, HASH_SIZE, ZERO_HASH};
pub use ser::{AsFixedBytes, Writeable, Writer};

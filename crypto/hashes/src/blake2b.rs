// Copyright (c) 2018-2022 The Botho Foundation

//! Keyed and short-output Blake2b helpers.
//!
//! Each helper hashes the concatenation of `parts`. Keys may be up to 64
//! bytes long.

use blake2::{
    digest::{
        consts::{U10, U20, U32},
        Digest, Mac,
    },
    Blake2b, Blake2bMac, Blake2bMac512,
};

/// Keyed Blake2b with a 64-byte output.
///
/// # Panics
///
/// If `key` is longer than 64 bytes.
pub fn keyed_hash_512(key: &[u8], parts: &[&[u8]]) -> [u8; 64] {
    let mut mac =
        <Blake2bMac512 as Mac>::new_from_slice(key).expect("Blake2b key longer than 64 bytes");
    for part in parts {
        Mac::update(&mut mac, part);
    }
    let mut out = [0u8; 64];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Keyed Blake2b with a 32-byte output.
///
/// # Panics
///
/// If `key` is longer than 64 bytes.
pub fn keyed_hash_256(key: &[u8], parts: &[&[u8]]) -> [u8; 32] {
    let mut mac = <Blake2bMac<U32> as Mac>::new_from_slice(key)
        .expect("Blake2b key longer than 64 bytes");
    for part in parts {
        Mac::update(&mut mac, part);
    }
    let mut out = [0u8; 32];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Keyed Blake2b with a 20-byte output.
///
/// # Panics
///
/// If `key` is longer than 64 bytes.
pub fn keyed_hash_160(key: &[u8], parts: &[&[u8]]) -> [u8; 20] {
    let mut mac = <Blake2bMac<U20> as Mac>::new_from_slice(key)
        .expect("Blake2b key longer than 64 bytes");
    for part in parts {
        Mac::update(&mut mac, part);
    }
    let mut out = [0u8; 20];
    out.copy_from_slice(&mac.finalize().into_bytes());
    out
}

/// Unkeyed Blake2b with a 10-byte output.
pub fn hash_80(parts: &[&[u8]]) -> [u8; 10] {
    let mut hasher = Blake2b::<U10>::new();
    for part in parts {
        Digest::update(&mut hasher, part);
    }
    let mut out = [0u8; 10];
    out.copy_from_slice(&hasher.finalize());
    out
}

// Copyright (c) 2018-2022 The Botho Foundation

//! Sizes and fixed generators.

pub use secp256k1zkp::constants::{
    COMPACT_SIGNATURE_SIZE, CURVE_ORDER, MAX_PROOF_SIZE, MESSAGE_SIZE, PEDERSEN_COMMITMENT_SIZE,
    PROOF_MSG_SIZE, SECRET_KEY_SIZE,
};

/// Size of a compressed public key.
pub const COMPRESSED_PUBLIC_KEY_SIZE: usize = 33;

/// Compressed switch commitment generator J: the first x coordinate on the
/// curve of the form Blake2b-256("mw switch commitment generator" ‖
/// be32(counter)), with even y.
pub const GENERATOR_J: [u8; COMPRESSED_PUBLIC_KEY_SIZE] = [
    0x02, 0x2f, 0xa4, 0x3a, 0xa4, 0x9c, 0x3e, 0x4e, 0x76, 0xa5, 0x80, 0xb0, 0x43, 0xfc, 0x1f, 0x0c,
    0xe0, 0xfa, 0x16, 0x97, 0x49, 0xc4, 0x3a, 0xa4, 0x12, 0x6b, 0x47, 0xdb, 0xf7, 0xe0, 0x5d, 0x34,
    0x73,
];

#[cfg(test)]
mod tests {
    use super::*;
    use mw_crypto_hashes::{HashWriter, Writer};
    use secp256k1zkp::{PublicKey, Secp256k1};

    const SWITCH_GENERATOR_TAG: &[u8] = b"mw switch commitment generator";

    #[test]
    fn j_is_first_hashed_point() {
        let secp = Secp256k1::without_caps();
        let found = (0u32..)
            .find_map(|counter| {
                let mut hasher = HashWriter::default();
                hasher.write_raw(SWITCH_GENERATOR_TAG);
                hasher.write_u32(counter);
                let mut candidate = [0u8; COMPRESSED_PUBLIC_KEY_SIZE];
                candidate[0] = 0x02;
                candidate[1..].copy_from_slice(hasher.finalize().as_bytes());
                PublicKey::from_slice(&secp, &candidate)
                    .ok()
                    .map(|_| candidate)
            })
            .unwrap();
        assert_eq!(found, GENERATOR_J);
    }

    #[test]
    fn library_sizes() {
        assert_eq!(PEDERSEN_COMMITMENT_SIZE, 33);
        assert_eq!(MAX_PROOF_SIZE, 5134);
        assert_eq!(PROOF_MSG_SIZE, 2048);
    }
}

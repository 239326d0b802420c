// Copyright (c) 2018-2022 The Botho Foundation

//! The canonical 32-byte content hash.

use alloc::string::String;
use blake2::{
    digest::{consts::U32, Digest},
    Blake2b,
};
use core::fmt;

use crate::{AsFixedBytes, Writeable, Writer};

/// Size in bytes of a [`Hash`].
pub const HASH_SIZE: usize = 32;

/// A 32-byte Blake2b-256 digest, compared by content.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Hash(pub [u8; HASH_SIZE]);

/// The all-zero hash, used as a sentinel for "no hash".
pub const ZERO_HASH: Hash = Hash([0u8; HASH_SIZE]);

impl Hash {
    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; HASH_SIZE] {
        &self.0
    }

    /// Lowercase hex encoding of the digest.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse a hash from exactly 64 hex characters.
    pub fn from_hex(src: &str) -> Result<Self, hex::FromHexError> {
        let mut bytes = [0u8; HASH_SIZE];
        hex::decode_to_slice(src, &mut bytes)?;
        Ok(Self(bytes))
    }
}

impl From<[u8; HASH_SIZE]> for Hash {
    fn from(src: [u8; HASH_SIZE]) -> Self {
        Self(src)
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsFixedBytes for Hash {
    const LEN: usize = HASH_SIZE;
}

impl Writeable for Hash {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_fixed_bytes(self)
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex_fmt::HexFmt(&self.0))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Hash({})", hex_fmt::HexFmt(&self.0))
    }
}

/// A [`Writer`] folding every write into an unkeyed Blake2b-256 state.
#[derive(Clone, Default)]
pub struct HashWriter {
    state: Blake2b<U32>,
}

impl HashWriter {
    /// Consume the writer, producing the digest of everything written.
    pub fn finalize(self) -> Hash {
        let mut bytes = [0u8; HASH_SIZE];
        bytes.copy_from_slice(&self.state.finalize());
        Hash(bytes)
    }
}

impl Writer for HashWriter {
    fn write_raw(&mut self, bytes: &[u8]) {
        Digest::update(&mut self.state, bytes);
    }
}

/// Content hashing for anything [`Writeable`].
pub trait Hashed {
    /// Hash of this object's fields.
    fn hash(&self) -> Hash;

    /// Hash of this object's fields followed by `other`'s fields.
    fn hash_with<T: Writeable>(&self, other: T) -> Hash;
}

impl<W: Writeable + ?Sized> Hashed for W {
    fn hash(&self) -> Hash {
        let mut hasher = HashWriter::default();
        self.write(&mut hasher);
        hasher.finalize()
    }

    fn hash_with<T: Writeable>(&self, other: T) -> Hash {
        let mut hasher = HashWriter::default();
        self.write(&mut hasher);
        other.write(&mut hasher);
        hasher.finalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use proptest::prelude::*;

    struct Truncated([u8; 3]);

    impl AsRef<[u8]> for Truncated {
        fn as_ref(&self) -> &[u8] {
            &self.0
        }
    }

    impl AsFixedBytes for Truncated {
        const LEN: usize = 4;
    }

    #[test]
    fn empty_writer_is_blake2b_256_of_nothing() {
        assert_eq!(
            HashWriter::default().finalize().to_hex(),
            "0e5751c026e543b2e8ab2eb06099daa1d1e5df47778f7787faab45cdf12fe3a8"
        );
    }

    #[test]
    fn zero_hash_displays_as_zeros() {
        assert_eq!(ZERO_HASH.to_hex(), "0".repeat(64));
        assert_eq!(format!("{ZERO_HASH}"), "0".repeat(64));
        assert_eq!(Hash::from_hex(&ZERO_HASH.to_hex()), Ok(ZERO_HASH));
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        assert!(Hash::from_hex("00ff").is_err());
    }

    #[test]
    fn hash_with_domain_separates() {
        let a = 7u64;
        assert_ne!(a.hash(), a.hash_with(0u64));
        assert_eq!(a.hash_with(0u64), a.hash_with(0u64));
    }

    #[test]
    #[should_panic(expected = "fixed-size write")]
    fn wrong_size_fixed_write_panics() {
        let mut hasher = HashWriter::default();
        hasher.write_fixed_bytes(&Truncated([1, 2, 3]));
    }

    proptest! {
        #[test]
        fn hashing_is_deterministic(values in proptest::collection::vec(any::<u64>(), 0..8)) {
            let first = values.as_slice().hash();
            let second = values.as_slice().hash();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn raw_writes_concatenate(a in any::<u64>(), b in any::<u64>()) {
            let mut split = HashWriter::default();
            split.write_u64(a);
            split.write_u64(b);

            let mut joined = HashWriter::default();
            let mut bytes = [0u8; 16];
            bytes[..8].copy_from_slice(&a.to_be_bytes());
            bytes[8..].copy_from_slice(&b.to_be_bytes());
            joined.write_raw(&bytes);

            prop_assert_eq!(split.finalize(), joined.finalize());
        }
    }
}

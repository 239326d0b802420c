// Copyright (c) 2018-2022 The Botho Foundation

//! Short public names for derived keys.

use core::fmt;
use mw_crypto_hashes::{blake2b::hash_80, AsFixedBytes, Writeable, Writer};
use mw_crypto_secp256k1::COMPRESSED_PUBLIC_KEY_SIZE;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::Error;

/// The length of an identifier in bytes.
pub const IDENTIFIER_SIZE: usize = 10;

/// A 10-byte fingerprint of a derived public key.
///
/// Identifiers are not secret. They cannot be turned back into the
/// derivation index of the key they name.
#[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Identifier([u8; IDENTIFIER_SIZE]);

impl Identifier {
    /// The all-zero identifier.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build an identifier from the first 10 bytes of `src`, zero-padding
    /// when it is shorter.
    pub fn from_bytes(src: &[u8]) -> Self {
        let mut bytes = [0u8; IDENTIFIER_SIZE];
        let len = src.len().min(IDENTIFIER_SIZE);
        bytes[..len].copy_from_slice(&src[..len]);
        Self(bytes)
    }

    /// The identifier of a public key: Blake2b-80 of its 33-byte compressed
    /// encoding.
    pub fn from_pubkey(compressed: &[u8; COMPRESSED_PUBLIC_KEY_SIZE]) -> Self {
        Self(hash_80(&[compressed]))
    }

    /// Parse a hex string, truncating or padding like
    /// [`Identifier::from_bytes`].
    pub fn from_hex(src: &str) -> Result<Self, Error> {
        let bytes = hex::decode(src)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// Lowercase hex encoding.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The raw bytes.
    pub fn as_bytes(&self) -> &[u8; IDENTIFIER_SIZE] {
        &self.0
    }
}

impl AsRef<[u8]> for Identifier {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl AsFixedBytes for Identifier {
    const LEN: usize = IDENTIFIER_SIZE;
}

impl Writeable for Identifier {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_fixed_bytes(self)
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex_fmt::HexFmt(&self.0))
    }
}

impl fmt::Debug for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Identifier({})", hex_fmt::HexFmt(&self.0))
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IdentifierVisitor;

        impl de::Visitor<'_> for IdentifierVisitor {
            type Value = Identifier;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a hex-encoded key identifier")
            }

            fn visit_str<E: de::Error>(self, value: &str) -> Result<Identifier, E> {
                Identifier::from_hex(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(IdentifierVisitor)
    }
}

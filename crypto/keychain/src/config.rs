// Copyright (c) 2018-2022 The Botho Foundation

//! Keychain configuration.

use serde::{Deserialize, Serialize};

/// Tunables for a [`crate::Keychain`], embeddable in a wallet's config file.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct KeychainConfig {
    /// How many child indices to derive when looking up a key id that has
    /// not been derived yet. Zero disables the search.
    pub key_search_limit: u32,
}

impl KeychainConfig {
    /// A config searching the first `limit` child indices for unknown ids.
    pub fn with_key_search_limit(limit: u32) -> Self {
        Self {
            key_search_limit: limit,
        }
    }
}

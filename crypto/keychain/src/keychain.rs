// Copyright (c) 2018-2022 The Botho Foundation

//! The keychain: derived blinding keys and everything done with them.

use mw_crypto_secp256k1::{
    rand::{thread_rng, Rng},
    Commitment, ContextFlag, Message, ProofInfo, ProofMessage, ProofRange, RangeProof, Secp256k1,
    SecretKey, Signature,
};
use rand_core::{OsRng, RngCore};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Mutex, MutexGuard, PoisonError},
};
use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::{
    BlindSum, BlindingFactor, Error, ExtendedKey, Identifier, KeychainConfig, SwitchCommitHash,
};

/// Child keys derived so far, by index and by identifier.
#[derive(Default)]
struct KeyCache {
    keys: HashMap<Identifier, ExtendedKey>,
    indices: BTreeMap<u32, Identifier>,
}

/// A root key and the child keys derived from it.
///
/// Callers refer to blinding keys by [`Identifier`]. A key must have been
/// derived with [`Keychain::derive_key_id`] before it can be used, unless
/// [`KeychainConfig::key_search_limit`] allows looking it up among the first
/// child indices.
///
/// The curve context and the key cache are each guarded by a mutex, so a
/// keychain can be shared between threads. When both are needed, the cache
/// is locked first.
pub struct Keychain {
    secp: Mutex<Secp256k1>,
    extkey: ExtendedKey,
    root_key_id: Identifier,
    config: KeychainConfig,
    cache: Mutex<KeyCache>,
}

impl Keychain {
    /// A keychain rooted at `seed`, with the default config.
    pub fn from_seed(seed: &[u8]) -> Result<Self, Error> {
        Self::from_seed_with_config(seed, KeychainConfig::default())
    }

    /// A keychain rooted at `seed`.
    pub fn from_seed_with_config(seed: &[u8], config: KeychainConfig) -> Result<Self, Error> {
        let secp = Secp256k1::with_caps(ContextFlag::Commit);
        let extkey = ExtendedKey::from_seed(&secp, seed)?;
        let root_key_id = extkey.root_key_id();
        debug!(
            "Created keychain {} (key search limit {})",
            root_key_id, config.key_search_limit
        );
        Ok(Self {
            secp: Mutex::new(secp),
            extkey,
            root_key_id,
            config,
            cache: Mutex::new(KeyCache::default()),
        })
    }

    /// A keychain rooted at 32 bytes of OS randomness, with a randomized
    /// curve context.
    pub fn from_random_seed() -> Result<Self, Error> {
        let mut seed = Zeroizing::new([0u8; 32]);
        OsRng.fill_bytes(seed.as_mut_slice());
        let keychain = Self::from_seed(seed.as_slice())?;
        keychain.rerandomize(&mut thread_rng());
        Ok(keychain)
    }

    /// The identifier of the root key.
    pub fn root_key_id(&self) -> Identifier {
        self.root_key_id
    }

    /// The config this keychain was created with.
    pub fn config(&self) -> &KeychainConfig {
        &self.config
    }

    /// Derive child `index` of the root key and return its identifier.
    pub fn derive_key_id(&self, index: u32) -> Result<Identifier, Error> {
        let mut cache = self.lock_cache();
        self.derive_cached(&mut cache, index)
    }

    /// `value·H + r·G`, where `r` is the key named by `key_id`.
    pub fn commit(&self, value: u64, key_id: &Identifier) -> Result<Commitment, Error> {
        let secret = self.derived_key(key_id)?;
        Ok(self.lock_secp().commit(value, &secret)?)
    }

    /// Like [`Keychain::commit`], with the key named by its child index.
    pub fn commit_with_key_index(&self, value: u64, index: u32) -> Result<Commitment, Error> {
        let key_id = self.derive_key_id(index)?;
        self.commit(value, &key_id)
    }

    /// `r·J`, where `r` is the key named by `key_id`.
    pub fn switch_commit(&self, key_id: &Identifier) -> Result<Commitment, Error> {
        let secret = self.derived_key(key_id)?;
        Ok(self.lock_secp().switch_commit(&secret)?)
    }

    /// The hash of the switch commitment of `key_id`, keyed by the key.
    pub fn switch_commit_hash(&self, key_id: &Identifier) -> Result<SwitchCommitHash, Error> {
        let secret = self.derived_key(key_id)?;
        let switch_commit = self.lock_secp().switch_commit(&secret)?;
        let secret_bytes = Zeroizing::new(secret.0);
        Ok(SwitchCommitHash::from_switch_commit(
            &switch_commit,
            &secret_bytes,
        ))
    }

    /// A range proof for `commit = value·H + r·G`, where `r` is the key
    /// named by `key_id`. The same key is the rewind nonce.
    pub fn range_proof(
        &self,
        value: u64,
        key_id: &Identifier,
        commit: &Commitment,
        message: &ProofMessage,
    ) -> Result<RangeProof, Error> {
        let secret = self.derived_key(key_id)?;
        Ok(self
            .lock_secp()
            .range_proof(value, &secret, commit, message)?)
    }

    /// Verify a range proof against a commitment.
    pub fn verify_range_proof(
        &self,
        commit: &Commitment,
        proof: &RangeProof,
    ) -> Result<ProofRange, Error> {
        Ok(self.lock_secp().verify_range_proof(commit, proof)?)
    }

    /// Read back the value and message of a range proof made with the key
    /// named by `key_id`.
    ///
    /// A proof made with another key gives `success == false` and
    /// `value == 0`. Rewinding takes a different amount of time on success
    /// and failure.
    pub fn rewind_range_proof(
        &self,
        key_id: &Identifier,
        commit: &Commitment,
        proof: &RangeProof,
    ) -> Result<ProofInfo, Error> {
        let secret = self.derived_key(key_id)?;
        Ok(self
            .lock_secp()
            .rewind_range_proof(commit, proof, &secret)?)
    }

    /// Sign a message with the key named by `key_id`.
    pub fn sign(&self, msg: &Message, key_id: &Identifier) -> Result<Signature, Error> {
        let secret = self.derived_key(key_id)?;
        Ok(self.lock_secp().sign(msg, &secret)?)
    }

    /// Sign a message with a blinding factor, e.g. a transaction's net
    /// blinding factor.
    pub fn sign_with_blinding(
        &self,
        msg: &Message,
        blinding: &BlindingFactor,
    ) -> Result<Signature, Error> {
        let secret = blinding.to_secret_key()?;
        Ok(self.lock_secp().sign(msg, &secret)?)
    }

    /// Resolve a blind sum into one blinding factor: the positive
    /// contributions minus the negative ones.
    pub fn blind_sum(&self, blind_sum: BlindSum) -> Result<BlindingFactor, Error> {
        let mut positive = Vec::with_capacity(
            blind_sum.positive_key_ids.len() + blind_sum.positive_blinding_factors.len(),
        );
        let mut negative = Vec::with_capacity(
            blind_sum.negative_key_ids.len() + blind_sum.negative_blinding_factors.len(),
        );

        for key_id in &blind_sum.positive_key_ids {
            positive.push(self.derived_key(key_id)?);
        }
        for key_id in &blind_sum.negative_key_ids {
            negative.push(self.derived_key(key_id)?);
        }
        // Zero contributes nothing and has no secret key.
        for blind in &blind_sum.positive_blinding_factors {
            if !blind.is_zero() {
                positive.push(blind.to_secret_key()?);
            }
        }
        for blind in &blind_sum.negative_blinding_factors {
            if !blind.is_zero() {
                negative.push(blind.to_secret_key()?);
            }
        }

        let sum = Zeroizing::new(self.lock_secp().blind_sum(&positive, &negative)?);
        BlindingFactor::from_bytes(*sum)
    }

    /// Pick a new generator blinding for the curve context.
    pub fn rerandomize<R: Rng>(&self, rng: &mut R) {
        self.lock_secp().randomize(rng);
    }

    /// The secret key named by `key_id`: the root key, a cached child, or
    /// (when searching is enabled) one of the first child indices.
    fn derived_key(&self, key_id: &Identifier) -> Result<SecretKey, Error> {
        if *key_id == self.root_key_id {
            return Ok(self.extkey.secret_key().clone());
        }

        let mut cache = self.lock_cache();
        if let Some(key) = cache.keys.get(key_id) {
            return Ok(key.secret_key().clone());
        }

        for index in 0..self.config.key_search_limit {
            if self.derive_cached(&mut cache, index)? == *key_id {
                debug!("Found key {} at index {}", key_id, index);
                return cache
                    .keys
                    .get(key_id)
                    .map(|key| key.secret_key().clone())
                    .ok_or(Error::UnknownKeyId(*key_id));
            }
        }

        warn!(
            "Key {} not found (searched {} indices)",
            key_id, self.config.key_search_limit
        );
        Err(Error::UnknownKeyId(*key_id))
    }

    fn derive_cached(&self, cache: &mut KeyCache, index: u32) -> Result<Identifier, Error> {
        if let Some(key_id) = cache.indices.get(&index) {
            return Ok(*key_id);
        }

        let (child, key_id) = {
            let secp = self.lock_secp();
            let child = self.extkey.derive(&secp, index)?;
            let key_id = child.identifier(&secp)?;
            (child, key_id)
        };
        trace!("Derived key {} at index {}", key_id, index);
        cache.indices.insert(index, key_id);
        cache.keys.insert(key_id, child);
        Ok(key_id)
    }

    fn lock_cache(&self) -> MutexGuard<'_, KeyCache> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_secp(&self) -> MutexGuard<'_, Secp256k1> {
        self.secp.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl core::fmt::Debug for Keychain {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Keychain")
            .field("root_key_id", &self.root_key_id)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keychain() -> Keychain {
        Keychain::from_seed(&[7u8; 32]).unwrap()
    }

    #[test]
    fn derive_key_id_is_cached_and_stable() {
        let keychain = keychain();
        let a = keychain.derive_key_id(3).unwrap();
        assert_eq!(keychain.derive_key_id(3).unwrap(), a);
        assert_ne!(keychain.derive_key_id(4).unwrap(), a);
        assert_eq!(keychain.lock_cache().keys.len(), 2);
        assert_eq!(
            Keychain::from_seed(&[7u8; 32])
                .unwrap()
                .derive_key_id(3)
                .unwrap(),
            a
        );
    }

    #[test]
    fn root_key_id_resolves() {
        let keychain = keychain();
        let root = keychain.root_key_id();
        let commit = keychain.commit(0, &root).unwrap();
        let secp = keychain.lock_secp();
        assert_eq!(
            secp.commit_to_pubkey(&commit).unwrap(),
            secp.public_key(keychain.extkey.secret_key()).unwrap()
        );
    }

    #[test]
    fn unknown_key_without_search() {
        let keychain = keychain();
        let stranger = Keychain::from_seed(&[8u8; 32])
            .unwrap()
            .derive_key_id(0)
            .unwrap();
        assert_eq!(
            keychain.commit(1, &stranger),
            Err(Error::UnknownKeyId(stranger))
        );
        assert!(keychain.lock_cache().keys.is_empty());
    }

    #[test]
    fn search_finds_underived_keys() {
        let key_id = keychain().derive_key_id(5).unwrap();

        let searching =
            Keychain::from_seed_with_config(&[7u8; 32], KeychainConfig::with_key_search_limit(10))
                .unwrap();
        assert_eq!(
            searching.commit(9, &key_id).unwrap(),
            keychain().commit_with_key_index(9, 5).unwrap()
        );
        assert_eq!(searching.lock_cache().keys.len(), 6);

        let short =
            Keychain::from_seed_with_config(&[7u8; 32], KeychainConfig::with_key_search_limit(5))
                .unwrap();
        assert_eq!(short.commit(9, &key_id), Err(Error::UnknownKeyId(key_id)));
    }

    #[test]
    fn blind_sum_of_nothing_is_zero() {
        assert_eq!(
            keychain().blind_sum(BlindSum::new()).unwrap(),
            BlindingFactor::zero()
        );
    }

    #[test]
    fn blind_sum_cancels_matching_keys() {
        let keychain = keychain();
        let a = keychain.derive_key_id(1).unwrap();
        let b = keychain.derive_key_id(2).unwrap();
        let sum = keychain
            .blind_sum(BlindSum::new().add_key_id(a).add_key_id(b).sub_key_id(a))
            .unwrap();
        let only_b = keychain.blind_sum(BlindSum::new().add_key_id(b)).unwrap();
        assert_eq!(sum, only_b);
    }

    #[test]
    fn blind_sum_skips_zero_factors() {
        let keychain = keychain();
        let a = keychain.derive_key_id(1).unwrap();
        let sum = keychain
            .blind_sum(
                BlindSum::new()
                    .add_key_id(a)
                    .add_blinding_factor(BlindingFactor::zero())
                    .sub_blinding_factor(BlindingFactor::zero()),
            )
            .unwrap();
        assert_eq!(sum, keychain.blind_sum(BlindSum::new().add_key_id(a)).unwrap());
    }

    #[test]
    fn sign_with_zero_blinding_fails() {
        let msg = Message::from([1u8; 32]);
        assert_eq!(
            keychain().sign_with_blinding(&msg, &BlindingFactor::zero()),
            Err(Error::InvalidSecretKey)
        );
    }

    #[test]
    fn debug_shows_only_public_data() {
        let keychain = keychain();
        let printed = format!("{keychain:?}");
        assert!(printed.contains(&keychain.root_key_id().to_hex()));
    }
}

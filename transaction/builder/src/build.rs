// Copyright (c) 2018-2022 The Botho Foundation

//! The build pipeline: steps folded over a context, then signed.

use mw_common::trace_time;
use mw_crypto_secp256k1::ProofMessage;
use mw_keychain::{BlindSum, BlindingFactor, Identifier, Keychain};
use mw_transaction_core::{Input, Output, OutputFeatures, Transaction};
use tracing::{debug, trace};

use crate::TxBuilderError;

/// The state a step works on: the transaction so far and the blinding
/// keys it involves.
#[derive(Debug)]
pub struct Context<'a> {
    /// Where blinding keys come from.
    pub keychain: &'a Keychain,
    /// The transaction built so far.
    pub tx: Transaction,
    /// The blinding contributions so far.
    pub sum: BlindSum,
}

/// What a step produces: the next transaction and blind sum.
#[derive(Debug)]
pub struct Append {
    /// The extended transaction.
    pub transaction: Transaction,
    /// The extended blind sum.
    pub blind_sum: BlindSum,
}

/// One step of building a transaction.
#[derive(Debug)]
pub enum Step {
    /// Spend the output committing to `value` under `key_id`.
    Input {
        /// The value of the spent output.
        value: u64,
        /// The key blinding the spent output.
        key_id: Identifier,
    },
    /// Create an output of `value` blinded by `key_id`.
    Output {
        /// The value of the new output.
        value: u64,
        /// The key blinding the new output.
        key_id: Identifier,
    },
    /// Set the fee.
    WithFee(u64),
    /// Set the lock height.
    WithLockHeight(u64),
    /// Replace the transaction so far, keeping the blind sum. Used to
    /// continue a transaction another party started.
    InitialTx(Transaction),
    /// Add a blinding factor that is already known, e.g. the excess of the
    /// part of a transaction built elsewhere.
    WithExcess(BlindingFactor),
}

impl Step {
    /// Apply this step to a context.
    pub fn append(self, ctx: Context<'_>) -> Result<Append, TxBuilderError> {
        let Context { keychain, tx, sum } = ctx;
        let append = match self {
            Step::Input { value, key_id } => {
                let commit = keychain.commit(value, &key_id)?;
                Append {
                    transaction: tx.with_input(Input::new(commit)),
                    blind_sum: sum.sub_key_id(key_id),
                }
            }
            Step::Output { value, key_id } => {
                let commit = keychain.commit(value, &key_id)?;
                let switch_commit_hash = keychain.switch_commit_hash(&key_id)?;
                let proof = keychain.range_proof(value, &key_id, &commit, &ProofMessage::empty())?;
                Append {
                    transaction: tx.with_output(Output {
                        features: OutputFeatures::Plain,
                        commit,
                        switch_commit_hash,
                        proof,
                    }),
                    blind_sum: sum.add_key_id(key_id),
                }
            }
            Step::WithFee(fee) => Append {
                transaction: tx.with_fee(fee),
                blind_sum: sum,
            },
            Step::WithLockHeight(lock_height) => Append {
                transaction: tx.with_lock_height(lock_height),
                blind_sum: sum,
            },
            Step::InitialTx(initial) => Append {
                transaction: initial,
                blind_sum: sum,
            },
            Step::WithExcess(excess) => Append {
                transaction: tx,
                blind_sum: sum.add_blinding_factor(excess),
            },
        };
        Ok(append)
    }

    fn name(&self) -> &'static str {
        match self {
            Step::Input { .. } => "input",
            Step::Output { .. } => "output",
            Step::WithFee(_) => "with_fee",
            Step::WithLockHeight(_) => "with_lock_height",
            Step::InitialTx(_) => "initial_tx",
            Step::WithExcess(_) => "with_excess",
        }
    }
}

/// Spend an output of `value` blinded by `key_id`.
pub fn input(value: u64, key_id: Identifier) -> Step {
    Step::Input { value, key_id }
}

/// Create an output of `value` blinded by `key_id`, with a range proof.
pub fn output(value: u64, key_id: Identifier) -> Step {
    Step::Output { value, key_id }
}

/// Set the fee.
pub fn with_fee(fee: u64) -> Step {
    Step::WithFee(fee)
}

/// Set the lock height.
pub fn with_lock_height(lock_height: u64) -> Step {
    Step::WithLockHeight(lock_height)
}

/// Start from an existing transaction.
pub fn initial_tx(tx: Transaction) -> Step {
    Step::InitialTx(tx)
}

/// Fold in a known blinding factor.
pub fn with_excess(excess: BlindingFactor) -> Step {
    Step::WithExcess(excess)
}

/// Build a transaction from `steps`, applied in order, and sign it.
///
/// Returns the signed transaction and its net blinding factor, the sum of
/// the output keys minus the input keys (plus any folded-in excess). Any
/// failing step aborts the whole build.
pub fn transaction<I>(
    steps: I,
    keychain: &Keychain,
) -> Result<(Transaction, BlindingFactor), TxBuilderError>
where
    I: IntoIterator<Item = Step>,
{
    trace_time!("built transaction");

    let mut ctx = Context {
        keychain,
        tx: Transaction::empty(),
        sum: BlindSum::new(),
    };
    for step in steps {
        trace!("Applying {} step", step.name());
        let Append {
            transaction,
            blind_sum,
        } = step.append(ctx)?;
        ctx = Context {
            keychain,
            tx: transaction,
            sum: blind_sum,
        };
    }

    let Context { tx, sum, .. } = ctx;
    let blind = keychain.blind_sum(sum)?;
    let sig = keychain.sign_with_blinding(&tx.msg_to_sign(), &blind)?;
    let tx = tx.with_excess_sig(&sig);

    debug!(
        "Built transaction with {} inputs, {} outputs, fee {}, lock height {}",
        tx.inputs.len(),
        tx.outputs.len(),
        tx.fee,
        tx.lock_height
    );
    Ok((tx, blind))
}

#[cfg(test)]
mod tests {
    use super::*;
    use mw_keychain::Error as KeychainError;

    fn keychain() -> Keychain {
        mw_common::logger::init_test_logging();
        Keychain::from_seed(&[2u8; 32]).unwrap()
    }

    fn context(keychain: &Keychain) -> Context<'_> {
        Context {
            keychain,
            tx: Transaction::empty(),
            sum: BlindSum::new(),
        }
    }

    #[test]
    fn input_step_subtracts_its_key() {
        let keychain = keychain();
        let key_id = keychain.derive_key_id(1).unwrap();
        let Append {
            transaction,
            blind_sum,
        } = input(5, key_id).append(context(&keychain)).unwrap();

        assert_eq!(
            transaction.inputs,
            vec![Input::new(keychain.commit(5, &key_id).unwrap())]
        );
        assert!(transaction.outputs.is_empty());
        assert_eq!(blind_sum.negative_key_ids, vec![key_id]);
        assert!(blind_sum.positive_key_ids.is_empty());
    }

    #[test]
    fn output_step_adds_a_proven_output() {
        let keychain = keychain();
        let key_id = keychain.derive_key_id(1).unwrap();
        let Append {
            transaction,
            blind_sum,
        } = output(5, key_id).append(context(&keychain)).unwrap();

        let out = &transaction.outputs[0];
        assert_eq!(out.features, OutputFeatures::Plain);
        assert_eq!(out.commit, keychain.commit(5, &key_id).unwrap());
        assert_eq!(
            out.switch_commit_hash,
            keychain.switch_commit_hash(&key_id).unwrap()
        );
        let info = keychain
            .rewind_range_proof(&key_id, &out.commit, &out.proof)
            .unwrap();
        assert!(info.success);
        assert_eq!(info.value, 5);
        assert!(info.message.as_bytes().is_empty());
        assert_eq!(blind_sum.positive_key_ids, vec![key_id]);
    }

    #[test]
    fn scalar_steps_replace_fields() {
        let keychain = keychain();
        let Append { transaction, .. } = with_fee(7).append(context(&keychain)).unwrap();
        assert_eq!(transaction.fee, 7);

        let ctx = Context {
            keychain: &keychain,
            tx: transaction,
            sum: BlindSum::new(),
        };
        let Append { transaction, .. } = with_lock_height(3).append(ctx).unwrap();
        assert_eq!((transaction.fee, transaction.lock_height), (7, 3));
    }

    #[test]
    fn initial_tx_keeps_the_running_sum() {
        let keychain = keychain();
        let key_id = keychain.derive_key_id(1).unwrap();
        let ctx = Context {
            keychain: &keychain,
            tx: Transaction::empty().with_fee(1),
            sum: BlindSum::new().add_key_id(key_id),
        };
        let seed = Transaction::empty().with_fee(9);
        let Append {
            transaction,
            blind_sum,
        } = initial_tx(seed.clone()).append(ctx).unwrap();
        assert_eq!(transaction, seed);
        assert_eq!(blind_sum.positive_key_ids, vec![key_id]);
    }

    #[test]
    fn with_excess_adds_a_blinding_factor() {
        let keychain = keychain();
        let excess = BlindingFactor::from_slice(&[4u8; 32]).unwrap();
        let Append { blind_sum, .. } = with_excess(excess.clone())
            .append(context(&keychain))
            .unwrap();
        assert_eq!(blind_sum.positive_blinding_factors, vec![excess]);
    }

    #[test]
    fn unknown_key_aborts_the_build() {
        let keychain = keychain();
        let known = keychain.derive_key_id(1).unwrap();
        let unknown = Keychain::from_seed(&[3u8; 32])
            .unwrap()
            .derive_key_id(1)
            .unwrap();

        assert_eq!(
            transaction(vec![input(10, known), output(9, unknown), with_fee(1)], &keychain)
                .unwrap_err(),
            TxBuilderError::Keychain(KeychainError::UnknownKeyId(unknown))
        );
    }

    #[test]
    fn nothing_to_sign_with() {
        let keychain = keychain();
        assert_eq!(
            transaction(vec![with_fee(1)], &keychain).unwrap_err(),
            TxBuilderError::Keychain(KeychainError::InvalidSecretKey)
        );
    }
}

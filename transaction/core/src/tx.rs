// Copyright (c) 2018-2022 The Botho Foundation

//! Transactions, their inputs and outputs, and the kernels they reduce to.

use core::fmt;
use mw_crypto_hashes::{Writeable, Writer};
use mw_crypto_secp256k1::{
    Commitment, Message, RangeProof, Secp256k1, Signature, MESSAGE_SIZE,
};
use mw_keychain::{Identifier, Keychain, SwitchCommitHash};
use tracing::trace;

use crate::{Committed, Error};

/// The message signed by a transaction's excess:
/// 16 zero bytes, then the fee and the lock height as big-endian u64s.
pub fn kernel_sig_msg(fee: u64, lock_height: u64) -> Message {
    let mut bytes = [0u8; MESSAGE_SIZE];
    bytes[16..24].copy_from_slice(&fee.to_be_bytes());
    bytes[24..].copy_from_slice(&lock_height.to_be_bytes());
    Message::from(bytes)
}

/// What kind of output this is.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[repr(u8)]
pub enum OutputFeatures {
    /// A regular output.
    #[default]
    Plain = 0,
    /// An output created by a block reward.
    Coinbase = 1,
}

impl Writeable for OutputFeatures {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_u8(*self as u8)
    }
}

/// A spent output, referenced by its commitment.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Input {
    /// The commitment of the output being spent.
    pub commit: Commitment,
}

impl Input {
    /// An input spending the output with this commitment.
    pub fn new(commit: Commitment) -> Self {
        Self { commit }
    }
}

impl Writeable for Input {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_fixed_bytes(&self.commit.0)
    }
}

/// A newly created output.
#[derive(Clone, Debug, PartialEq)]
pub struct Output {
    /// Plain or coinbase.
    pub features: OutputFeatures,
    /// `value·H + r·G`.
    pub commit: Commitment,
    /// Hash of the switch commitment `r·J`.
    pub switch_commit_hash: SwitchCommitHash,
    /// Proof that the committed value is in `[0, 2^64)`.
    pub proof: RangeProof,
}

impl Output {
    /// Check this output's range proof.
    pub fn verify_proof(&self, secp: &Secp256k1) -> Result<(), Error> {
        secp.verify_range_proof(&self.commit, &self.proof)
            .map(|_| ())
            .map_err(|_| Error::InvalidRangeProof)
    }

    /// The value of this output, if its range proof was made with the key
    /// named by `key_id`.
    pub fn recover_value(
        &self,
        keychain: &Keychain,
        key_id: &Identifier,
    ) -> Result<Option<u64>, Error> {
        let info = keychain.rewind_range_proof(key_id, &self.commit, &self.proof)?;
        Ok(info.success.then_some(info.value))
    }
}

/// Outputs hash over everything but the range proof, which can be pruned.
impl Writeable for Output {
    fn write<W: Writer>(&self, writer: &mut W) {
        self.features.write(writer);
        writer.write_fixed_bytes(&self.commit.0);
        self.switch_commit_hash.write(writer);
    }
}

/// The public proof that a transaction balances, which outlives its inputs
/// and outputs.
#[derive(Clone, Eq, PartialEq)]
pub struct TxKernel {
    /// The transaction's excess `Σoutputs + fee·H − Σinputs`.
    pub excess: Commitment,
    /// Compact signature of [`kernel_sig_msg`] by the excess.
    pub excess_sig: Vec<u8>,
    /// The fee paid.
    pub fee: u64,
    /// The height before which the transaction cannot be mined.
    pub lock_height: u64,
}

impl TxKernel {
    /// The message the excess signature covers.
    pub fn msg_to_sign(&self) -> Message {
        kernel_sig_msg(self.fee, self.lock_height)
    }

    /// Check the excess signature against the excess.
    pub fn verify(&self, secp: &Secp256k1) -> Result<(), Error> {
        let pubkey = secp.commit_to_pubkey(&self.excess)?;
        let sig = Signature::from_compact(&self.excess_sig)?;
        secp.verify(&self.msg_to_sign(), &sig, &pubkey)?;
        Ok(())
    }
}

impl Writeable for TxKernel {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_u64(self.fee);
        writer.write_u64(self.lock_height);
        writer.write_fixed_bytes(&self.excess.0);
        writer.write_bytes(&self.excess_sig);
    }
}

impl fmt::Debug for TxKernel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("TxKernel")
            .field("excess", &self.excess)
            .field("excess_sig", &hex_fmt::HexFmt(&self.excess_sig))
            .field("fee", &self.fee)
            .field("lock_height", &self.lock_height)
            .finish()
    }
}

/// A transaction: inputs, outputs, an explicit fee, and the signature by
/// its excess.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transaction {
    /// Outputs being spent.
    pub inputs: Vec<Input>,
    /// Outputs being created.
    pub outputs: Vec<Output>,
    /// The fee paid.
    pub fee: u64,
    /// The height before which the transaction cannot be mined.
    pub lock_height: u64,
    /// Compact excess signature, empty until the transaction is finalized.
    pub excess_sig: Vec<u8>,
}

impl Transaction {
    /// A transaction with no inputs, outputs or fee.
    pub fn empty() -> Self {
        Self::default()
    }

    /// An unsigned transaction.
    pub fn new(inputs: Vec<Input>, outputs: Vec<Output>, fee: u64, lock_height: u64) -> Self {
        Self {
            inputs,
            outputs,
            fee,
            lock_height,
            excess_sig: Vec::new(),
        }
    }

    /// This transaction with one more input.
    pub fn with_input(mut self, input: Input) -> Self {
        self.inputs.push(input);
        self
    }

    /// This transaction with one more output.
    pub fn with_output(mut self, output: Output) -> Self {
        self.outputs.push(output);
        self
    }

    /// This transaction with the given fee.
    pub fn with_fee(self, fee: u64) -> Self {
        Self { fee, ..self }
    }

    /// This transaction with the given lock height.
    pub fn with_lock_height(self, lock_height: u64) -> Self {
        Self {
            lock_height,
            ..self
        }
    }

    /// This transaction with the given excess signature.
    pub fn with_excess_sig(self, sig: &Signature) -> Self {
        Self {
            excess_sig: sig.to_compact().to_vec(),
            ..self
        }
    }

    /// The message the excess signature covers.
    pub fn msg_to_sign(&self) -> Message {
        kernel_sig_msg(self.fee, self.lock_height)
    }

    /// Check the range proofs and the excess signature, and return the
    /// kernel this transaction reduces to.
    pub fn verify_sig(&self, secp: &Secp256k1) -> Result<TxKernel, Error> {
        let excess = self.sum_commitments(secp)?;
        let kernel = TxKernel {
            excess,
            excess_sig: self.excess_sig.clone(),
            fee: self.fee,
            lock_height: self.lock_height,
        };
        kernel.verify(secp)?;
        trace!(
            "Verified kernel {:?} ({} inputs, {} outputs, fee {})",
            kernel.excess,
            self.inputs.len(),
            self.outputs.len(),
            self.fee
        );
        Ok(kernel)
    }

    /// Validate a finalized transaction.
    pub fn validate(&self, secp: &Secp256k1) -> Result<TxKernel, Error> {
        if self.excess_sig.is_empty() {
            return Err(Error::MissingSignature);
        }
        self.verify_sig(secp)
    }
}

impl Committed for Transaction {
    fn inputs_committed(&self) -> Vec<Commitment> {
        self.inputs.iter().map(|input| input.commit).collect()
    }

    fn outputs_committed(&self) -> Vec<Commitment> {
        self.outputs.iter().map(|output| output.commit).collect()
    }

    fn outputs_range_proofs(&self) -> Vec<(Commitment, &RangeProof)> {
        self.outputs
            .iter()
            .map(|output| (output.commit, &output.proof))
            .collect()
    }

    fn overage(&self) -> i128 {
        i128::from(self.fee)
    }
}

impl Writeable for Transaction {
    fn write<W: Writer>(&self, writer: &mut W) {
        writer.write_u64(self.fee);
        writer.write_u64(self.lock_height);
        writer.write_bytes(&self.excess_sig);
        self.inputs.as_slice().write(writer);
        self.outputs.as_slice().write(writer);
    }
}

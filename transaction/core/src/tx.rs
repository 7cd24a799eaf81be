// Copyright (c) 2024 Botho Foundation

//! Transaction, input and output types.

use core::fmt;

use scrooge_crypto_sig::{Keypair, PublicAddress};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{
    constants::{SIGNING_DOMAIN_TAG, TX_HASH_DOMAIN_TAG},
    TxError,
};

/// Content hash identifying a transaction.
pub type TxHash = [u8; 32];

/// A value in microcoins.
///
/// Signed so that a negative output can be expressed, and then rejected by
/// validation.
pub type Amount = i64;

/// Identifier for a UTXO (transaction hash + output index)
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UtxoId {
    /// Hash of the transaction that created the output.
    pub tx_hash: TxHash,
    /// Position of the output in that transaction.
    pub output_index: u32,
}

impl UtxoId {
    /// Name the `output_index`-th output of transaction `tx_hash`.
    pub fn new(tx_hash: TxHash, output_index: u32) -> Self {
        Self {
            tx_hash,
            output_index,
        }
    }
}

impl fmt::Display for UtxoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", hex::encode(&self.tx_hash[0..8]), self.output_index)
    }
}

impl fmt::Debug for UtxoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UtxoId({self})")
    }
}

/// A transaction output: a value claimable by the owner of `address`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxOutput {
    /// Amount in microcoins
    pub value: Amount,

    /// Owner allowed to spend this output
    pub address: PublicAddress,
}

impl TxOutput {
    /// Create an output paying `value` to `address`.
    pub fn new(value: Amount, address: PublicAddress) -> Self {
        Self { value, address }
    }
}

/// A reference to a previous output being spent
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TxInput {
    /// Hash of the transaction containing the output
    pub prev_tx_hash: TxHash,

    /// Index of the output in that transaction
    pub output_index: u32,

    /// Signature by the owner of the spent output, if signed yet
    pub signature: Option<Vec<u8>>,
}

impl TxInput {
    /// An unsigned input spending `utxo`.
    pub fn new(utxo: UtxoId) -> Self {
        Self {
            prev_tx_hash: utxo.tx_hash,
            output_index: utxo.output_index,
            signature: None,
        }
    }

    /// The UTXO this input claims.
    pub fn utxo_id(&self) -> UtxoId {
        UtxoId::new(self.prev_tx_hash, self.output_index)
    }
}

/// A complete transaction
///
/// The hash is computed once at construction. It covers input references
/// and outputs but not signatures, so attaching signatures never changes a
/// transaction's identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TransactionBody", into = "TransactionBody")]
pub struct Transaction {
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
    hash: TxHash,
}

/// Serialized form of a transaction; the hash is recomputed on decode.
#[derive(Serialize, Deserialize)]
struct TransactionBody {
    inputs: Vec<TxInput>,
    outputs: Vec<TxOutput>,
}

impl From<TransactionBody> for Transaction {
    fn from(body: TransactionBody) -> Self {
        Transaction::new(body.inputs, body.outputs)
    }
}

impl From<Transaction> for TransactionBody {
    fn from(tx: Transaction) -> Self {
        Self {
            inputs: tx.inputs,
            outputs: tx.outputs,
        }
    }
}

impl Transaction {
    /// Create a new transaction
    pub fn new(inputs: Vec<TxInput>, outputs: Vec<TxOutput>) -> Self {
        let hash = compute_hash(&inputs, &outputs);
        Self {
            inputs,
            outputs,
            hash,
        }
    }

    /// Create an input-less transaction, used to seed a ledger.
    pub fn coinbase(outputs: Vec<TxOutput>) -> Self {
        Self::new(Vec::new(), outputs)
    }

    /// The transaction hash.
    pub fn hash(&self) -> TxHash {
        self.hash
    }

    /// All inputs, in order.
    pub fn inputs(&self) -> &[TxInput] {
        &self.inputs
    }

    /// All outputs, in order.
    pub fn outputs(&self) -> &[TxOutput] {
        &self.outputs
    }

    /// Number of inputs.
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Number of outputs.
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }

    /// Sum of all output values.
    pub fn total_output_value(&self) -> i128 {
        self.outputs.iter().map(|o| o.value as i128).sum()
    }

    /// UTXOs claimed by this transaction's inputs, in input order.
    pub fn consumed_utxos(&self) -> impl Iterator<Item = UtxoId> + '_ {
        self.inputs.iter().map(TxInput::utxo_id)
    }

    /// UTXOs created by this transaction, keyed by its hash.
    pub fn produced_utxos(&self) -> impl Iterator<Item = (UtxoId, &TxOutput)> + '_ {
        self.outputs
            .iter()
            .enumerate()
            .map(move |(index, output)| (UtxoId::new(self.hash, index as u32), output))
    }

    /// The message the owner of input `index`'s UTXO must sign.
    ///
    /// It covers every input reference and every output, together with the
    /// signatures of the inputs before `index`. Signatures at and after
    /// `index` are stripped, so inputs must be signed in order. An index past
    /// the last input yields a message covering all signatures.
    pub fn signing_message(&self, index: usize) -> Vec<u8> {
        let mut message = Vec::with_capacity(
            SIGNING_DOMAIN_TAG.len() + 12 + self.inputs.len() * 104 + self.outputs.len() * 40,
        );

        // Domain separator for transaction signing
        message.extend_from_slice(SIGNING_DOMAIN_TAG);
        message.extend_from_slice(&(index as u32).to_le_bytes());

        message.extend_from_slice(&(self.inputs.len() as u32).to_le_bytes());
        for (position, input) in self.inputs.iter().enumerate() {
            message.extend_from_slice(&input.prev_tx_hash);
            message.extend_from_slice(&input.output_index.to_le_bytes());
            match input.signature.as_deref() {
                Some(signature) if position < index => {
                    message.extend_from_slice(&(signature.len() as u32).to_le_bytes());
                    message.extend_from_slice(signature);
                }
                _ => message.extend_from_slice(&0u32.to_le_bytes()),
            }
        }

        message.extend_from_slice(&(self.outputs.len() as u32).to_le_bytes());
        for output in &self.outputs {
            message.extend_from_slice(&output.value.to_le_bytes());
            message.extend_from_slice(output.address.as_bytes());
        }

        message
    }

    /// Attach a signature to input `index`.
    pub fn add_signature(&mut self, index: usize, signature: Vec<u8>) -> Result<(), TxError> {
        let num_inputs = self.inputs.len();
        let input = self
            .inputs
            .get_mut(index)
            .ok_or(TxError::InputIndexOutOfRange { index, num_inputs })?;
        input.signature = Some(signature);
        Ok(())
    }

    /// Sign input `index` with `keypair` and attach the signature.
    pub fn sign_input(&mut self, index: usize, keypair: &Keypair) -> Result<(), TxError> {
        if index >= self.inputs.len() {
            return Err(TxError::InputIndexOutOfRange {
                index,
                num_inputs: self.inputs.len(),
            });
        }
        let signature = keypair.sign(&self.signing_message(index));
        self.add_signature(index, signature)
    }
}

fn compute_hash(inputs: &[TxInput], outputs: &[TxOutput]) -> TxHash {
    let mut hasher = Sha256::new();
    hasher.update(TX_HASH_DOMAIN_TAG);

    hasher.update((inputs.len() as u32).to_le_bytes());
    for input in inputs {
        hasher.update(input.prev_tx_hash);
        hasher.update(input.output_index.to_le_bytes());
    }

    hasher.update((outputs.len() as u32).to_le_bytes());
    for output in outputs {
        hasher.update(output.value.to_le_bytes());
        hasher.update(output.address.as_bytes());
    }

    hasher.finalize().into()
}

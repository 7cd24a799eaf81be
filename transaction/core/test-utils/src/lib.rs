// Copyright (c) 2024 Botho Foundation

//! Helpers for building signed transactions in tests and benchmarks.

pub use scrooge_crypto_sig::{Ed25519Verifier, Keypair, PublicAddress};
pub use scrooge_transaction_core::{Amount, Transaction, TxHash, TxInput, TxOutput, UtxoId};

/// A deterministic keypair derived from a one-byte id.
pub fn test_keypair(id: u8) -> Keypair {
    let mut seed = [0u8; 32];
    seed[0] = id;
    seed[31] = 0x5c;
    Keypair::from_seed(seed)
}

/// Build an input-less transaction paying each `(value, address)` pair.
pub fn create_coinbase(outputs: &[(Amount, PublicAddress)]) -> Transaction {
    Transaction::coinbase(
        outputs
            .iter()
            .map(|(value, address)| TxOutput::new(*value, *address))
            .collect(),
    )
}

/// Build a transaction spending `inputs`, each signed by its keypair, and
/// paying each `(value, address)` pair.
///
/// Inputs are signed in order, so each signature covers the ones before it.
pub fn create_signed_tx(
    inputs: &[(UtxoId, &Keypair)],
    outputs: &[(Amount, PublicAddress)],
) -> Transaction {
    let mut tx = create_unsigned_tx(
        &inputs.iter().map(|(utxo, _)| *utxo).collect::<Vec<_>>(),
        outputs,
    );
    for (index, (_, keypair)) in inputs.iter().enumerate() {
        tx.sign_input(index, keypair)
            .expect("index is within the inputs just added");
    }
    tx
}

/// Build a transaction spending `inputs` with no signatures attached.
pub fn create_unsigned_tx(inputs: &[UtxoId], outputs: &[(Amount, PublicAddress)]) -> Transaction {
    Transaction::new(
        inputs.iter().copied().map(TxInput::new).collect(),
        outputs
            .iter()
            .map(|(value, address)| TxOutput::new(*value, *address))
            .collect(),
    )
}

/// Spend the single UTXO `utxo`, owned by `owner`, paying `value` to
/// `recipient`.
pub fn create_transfer(
    utxo: UtxoId,
    owner: &Keypair,
    value: Amount,
    recipient: PublicAddress,
) -> Transaction {
    create_signed_tx(&[(utxo, owner)], &[(value, recipient)])
}

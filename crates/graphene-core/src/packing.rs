//! JSON-friendly request/response boundary for building packed EOSIO
//! transactions.

use chain_eos::{
    build_transfer, chain_by_id, parse_chain_id, Action, CompressionType, PackedTransaction,
    Signature, Transaction,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::CoreError;

const DEFAULT_TOKEN_CONTRACT: &str = "eosio.token";

/// A token transfer described by its human-readable parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequest {
    /// Defaults to the chain's token contract, or `eosio.token`.
    #[serde(default)]
    pub token_contract: Option<String>,
    pub from: String,
    pub to: String,
    pub quantity: String,
    #[serde(default)]
    pub memo: String,
}

/// Everything needed to build, digest and pack one transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackRequest {
    /// Hex chain id.
    pub chain_id: String,
    /// Hex id of the reference block.
    pub reference_block_id: String,
    /// Reference block timestamp, unix seconds.
    pub reference_block_time: u32,
    #[serde(default)]
    pub expiry_seconds: Option<u32>,
    #[serde(default)]
    pub actions: Vec<Action>,
    #[serde(default)]
    pub transfers: Vec<TransferRequest>,
    #[serde(default)]
    pub context_free_actions: Vec<Action>,
    /// Hex context-free payload.
    #[serde(default)]
    pub context_free_data: String,
    #[serde(default)]
    pub signatures: Vec<Signature>,
    #[serde(default)]
    pub compression: CompressionType,
}

/// Outcome of [`pack_transaction`]: a packed transaction or one error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PackResult {
    Ok {
        packed: serde_json::Value,
        packed_hex: String,
        signing_digest: String,
        transaction_id: String,
    },
    Err {
        error: String,
    },
}

impl PackResult {
    pub fn is_ok(&self) -> bool {
        matches!(self, PackResult::Ok { .. })
    }
}

/// Assemble the transaction a request describes.
pub fn build_transaction(request: &PackRequest) -> Result<Transaction, CoreError> {
    let mut tx = Transaction::from_hex_reference(
        &request.reference_block_id,
        request.reference_block_time,
    )?;
    if let Some(seconds) = request.expiry_seconds {
        tx = tx.with_expiry_seconds(seconds);
    }

    for action in &request.context_free_actions {
        tx.add_context_free_action(action.clone());
    }
    for action in &request.actions {
        tx.add_action(action.clone());
    }

    let default_contract = chain_by_id(&request.chain_id)
        .map(|chain| chain.token_contract)
        .unwrap_or(DEFAULT_TOKEN_CONTRACT);
    for transfer in &request.transfers {
        let contract = transfer.token_contract.as_deref().unwrap_or(default_contract);
        tx.add_action(build_transfer(
            contract,
            &transfer.from,
            &transfer.to,
            &transfer.quantity,
            &transfer.memo,
        )?);
    }

    if !request.context_free_data.is_empty() {
        let data = hex::decode(request.context_free_data.trim_start_matches("0x"))
            .map_err(|e| CoreError::InvalidRequest(format!("context_free_data: {e}")))?;
        tx.set_context_free_data(data);
    }

    for signature in &request.signatures {
        tx.add_signature(*signature);
    }

    if !tx.is_valid() {
        return Err(CoreError::InvalidTransaction(
            "needs a reference block, at least one action and a sane net usage cap".into(),
        ));
    }
    Ok(tx)
}

fn try_pack(request: &PackRequest) -> Result<PackResult, CoreError> {
    let chain_id = parse_chain_id(&request.chain_id)?;
    let tx = build_transaction(request)?;

    debug!(
        chain = chain_by_id(&request.chain_id).map_or("unknown", |c| c.name),
        actions = tx.actions().len(),
        signatures = tx.signatures().len(),
        "packing transaction"
    );

    let signing_digest = tx.signing_digest(&chain_id)?;
    let packed = PackedTransaction::new(&tx, request.compression)?;

    Ok(PackResult::Ok {
        packed: packed.to_json(),
        packed_hex: hex::encode(packed.serialize()),
        signing_digest: hex::encode(signing_digest),
        transaction_id: hex::encode(packed.transaction_id()),
    })
}

/// Build and pack the requested transaction. Failures are reported in the
/// result, never by panicking.
pub fn pack_transaction(request: &PackRequest) -> PackResult {
    try_pack(request).unwrap_or_else(|err| {
        warn!(error = %err, "pack request rejected");
        PackResult::Err {
            error: err.to_string(),
        }
    })
}

/// [`pack_transaction`] over JSON text in and out.
pub fn pack_transaction_json(request: &str) -> String {
    let result = match serde_json::from_str::<PackRequest>(request) {
        Ok(request) => pack_transaction(&request),
        Err(err) => {
            warn!(error = %err, "malformed pack request");
            PackResult::Err {
                error: CoreError::InvalidRequest(err.to_string()).to_string(),
            }
        }
    };

    serde_json::to_string(&result).unwrap_or_else(|err| {
        serde_json::json!({ "status": "err", "error": err.to_string() }).to_string()
    })
}

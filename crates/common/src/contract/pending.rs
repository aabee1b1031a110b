use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, B256, U256};
use alloy_sol_types::SolEvent;

use super::abi::PasteCreated;
use super::ContractError;
use crate::rpc::{TransactionReceipt, Transport};

/// How often `confirmed` polls for a receipt unless configured otherwise
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// A submitted transaction that may not be mined yet
#[derive(Debug, Clone)]
pub struct PendingTransaction {
    hash: B256,
    label: &'static str,
    transport: Arc<dyn Transport>,
    poll_interval: Duration,
}

impl PendingTransaction {
    pub fn new(
        hash: B256,
        label: &'static str,
        transport: Arc<dyn Transport>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            hash,
            label,
            transport,
            poll_interval,
        }
    }

    pub fn hash(&self) -> B256 {
        self.hash
    }

    /// The operation that produced this transaction, e.g. `createPaste`
    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Wait for the receipt
    ///
    /// Polls until the transaction is mined; there is no timeout. A mined but
    /// reverted transaction is `ContractError::Reverted`.
    pub async fn confirmed(self) -> Result<TransactionReceipt, ContractError> {
        loop {
            match self.transport.transaction_receipt(self.hash).await? {
                Some(receipt) if receipt.succeeded() => {
                    tracing::info!(
                        tx = %self.hash,
                        block = ?receipt.block(),
                        "{} confirmed",
                        self.label
                    );
                    return Ok(receipt);
                }
                Some(_) => {
                    tracing::warn!(tx = %self.hash, "{} reverted", self.label);
                    return Err(ContractError::Reverted(format!(
                        "{} transaction {} reverted",
                        self.label, self.hash
                    )));
                }
                None => {
                    tracing::debug!(tx = %self.hash, "waiting for receipt");
                    tokio::time::sleep(self.poll_interval).await;
                }
            }
        }
    }
}

/// The paste id announced by a `PasteCreated` log from `contract`
pub fn created_paste_id(receipt: &TransactionReceipt, contract: Address) -> Option<U256> {
    receipt
        .logs
        .iter()
        .filter(|log| log.address == contract)
        .find_map(|log| PasteCreated::decode_log_data(&log.log_data(), true).ok())
        .map(|event| event.pasteId)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rpc::Log;

    fn receipt_with(logs: Vec<Log>) -> TransactionReceipt {
        TransactionReceipt {
            transaction_hash: B256::repeat_byte(1),
            block_number: None,
            status: None,
            logs,
        }
    }

    #[test]
    fn test_created_paste_id_from_log() {
        let contract = Address::repeat_byte(0xcc);
        let event = PasteCreated {
            pasteId: U256::from(17),
            creator: Address::repeat_byte(0xaa),
            pasteType: 2,
        };
        let data = event.encode_log_data();
        let log = Log {
            address: contract,
            topics: data.topics().to_vec(),
            data: data.data.clone(),
        };

        let receipt = receipt_with(vec![log.clone()]);
        assert_eq!(created_paste_id(&receipt, contract), Some(U256::from(17)));

        // Same event from another contract is ignored
        assert_eq!(created_paste_id(&receipt, Address::repeat_byte(0xdd)), None);
        assert_eq!(created_paste_id(&receipt_with(vec![]), contract), None);
    }
}

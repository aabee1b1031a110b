use alloy_primitives::{Address, Bytes, LogData, B256, U256, U64};
use serde::{Deserialize, Serialize};

/// A call or transaction as sent to `eth_call` / `eth_sendTransaction`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<U256>,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "input")]
    pub data: Option<Bytes>,
}

impl TransactionRequest {
    pub fn to(address: Address) -> Self {
        Self {
            to: Some(address),
            ..Default::default()
        }
    }

    pub fn from(mut self, from: Option<Address>) -> Self {
        self.from = from;
        self
    }

    pub fn data(mut self, data: impl Into<Bytes>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn value(mut self, value: U256) -> Self {
        self.value = (!value.is_zero()).then_some(value);
        self
    }
}

/// A log entry from a mined receipt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    pub address: Address,
    pub topics: Vec<B256>,
    pub data: Bytes,
}

impl Log {
    pub fn log_data(&self) -> LogData {
        LogData::new_unchecked(self.topics.clone(), self.data.clone())
    }
}

/// The subset of `eth_getTransactionReceipt` the client needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: B256,
    #[serde(default)]
    pub block_number: Option<U64>,
    /// `0x1` for success, `0x0` for a reverted transaction
    #[serde(default)]
    pub status: Option<U64>,
    #[serde(default)]
    pub logs: Vec<Log>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.is_some_and(|s| s == U64::from(1))
    }

    pub fn block(&self) -> Option<u64> {
        self.block_number.map(|n| n.to::<u64>())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_request_serialization_skips_empty_fields() {
        let request = TransactionRequest::to(Address::repeat_byte(1))
            .data(vec![0xde, 0xad])
            .value(U256::ZERO);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["data"], "0xdead");
        assert!(json.get("value").is_none());
        assert!(json.get("from").is_none());
    }

    #[test]
    fn test_receipt_from_node_json() {
        let json = serde_json::json!({
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "blockNumber": "0x10",
            "status": "0x1",
            "gasUsed": "0x5208",
            "logs": [{
                "address": "0x1111111111111111111111111111111111111111",
                "topics": [format!("0x{}", "01".repeat(32))],
                "data": "0x",
                "logIndex": "0x0"
            }]
        });
        let receipt: TransactionReceipt = serde_json::from_value(json).unwrap();
        assert!(receipt.succeeded());
        assert_eq!(receipt.block(), Some(16));
        assert_eq!(receipt.logs.len(), 1);
    }

    #[test]
    fn test_failed_receipt() {
        let json = serde_json::json!({
            "transactionHash": format!("0x{}", "ab".repeat(32)),
            "blockNumber": "0x10",
            "status": "0x0",
            "logs": []
        });
        let receipt: TransactionReceipt = serde_json::from_value(json).unwrap();
        assert!(!receipt.succeeded());
    }
}

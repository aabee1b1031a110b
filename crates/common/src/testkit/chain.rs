use std::collections::{BTreeMap, HashMap, HashSet};

use alloy_primitives::{hex, keccak256, Address, Bytes, B256, U256, U64};
use alloy_sol_types::{Revert, SolCall, SolError, SolEvent, SolInterface};
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::contract::abi::{
    consolidated::IPasteBin::{self, IPasteBinCalls},
    legacy::ILegacyPasteBin::{self, ILegacyPasteBinCalls},
    PasteCreated,
};
use crate::crypto::{generate_message_to_sign, verify_signature};
use crate::network::{ChainId, ContractAbi};
use crate::rpc::{Log, RpcError, TransactionReceipt, TransactionRequest, Transport};

const PUBLIC: u8 = 0;
const PAID: u8 = 1;
const PRIVATE: u8 = 2;

#[derive(Debug, Clone)]
struct StoredVersion {
    content: Bytes,
    updated_at: u64,
}

#[derive(Debug, Clone)]
struct StoredPaste {
    id: U256,
    creator: Address,
    title: String,
    creation_time: u64,
    expiration_time: u64,
    paste_type: u8,
    price: U256,
    public_key: String,
    allowed: Vec<Address>,
    versions: Vec<StoredVersion>,
}

impl StoredPaste {
    fn content(&self) -> Bytes {
        self.versions
            .last()
            .map(|v| v.content.clone())
            .unwrap_or_default()
    }

    fn current_version(&self) -> U256 {
        U256::from(self.versions.len())
    }
}

/// Contract-independent form of a decoded call
enum Call {
    Create {
        title: String,
        content: Bytes,
        expiration_time: U256,
        paste_type: u8,
        price: U256,
        public_key: String,
        allowed: Vec<Address>,
    },
    Update { id: U256, content: Bytes },
    Delete { id: U256 },
    Access { id: U256 },
    GetPaste { id: U256 },
    GetInfo { id: U256 },
    GetPublic { id: U256 },
    GetPrivate { id: U256 },
    GetContent { id: U256, signature: Bytes },
    GetVersion { id: U256, version: U256, signature: Bytes },
    PublicPastes { offset: U256, limit: U256 },
    UserPastes { user: Address },
    AccessiblePastes { user: Address },
    Record { id: U256 },
}

impl Call {
    fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::Create { .. } | Call::Update { .. } | Call::Delete { .. } | Call::Access { .. }
        )
    }
}

enum Output {
    Unit,
    Id(U256),
    Paste(StoredPaste, Bytes),
    Info(StoredPaste),
    Public(StoredPaste),
    Private(StoredPaste),
    Content(Bytes),
    Version(U256, StoredVersion),
    List(Vec<StoredPaste>),
    Ids(Vec<U256>),
    Record(Option<StoredPaste>),
}

#[derive(Debug)]
struct ChainState {
    pastes: BTreeMap<U256, StoredPaste>,
    next_id: u64,
    paid: HashSet<(U256, Address)>,
    balances: HashMap<Address, U256>,
    receipts: HashMap<B256, TransactionReceipt>,
    unmined: Vec<TransactionReceipt>,
    block: u64,
    nonce: u64,
    now: u64,
    auto_mine: bool,
    reject_next: bool,
}

/// An in-process chain hosting one pastebin contract
///
/// Speaks the JSON-RPC subset the client uses and enforces the contract's
/// access rules: creators and granted viewers only, payment before paid
/// reads, and on consolidated contracts a valid access signature from the
/// caller.
#[derive(Debug)]
pub struct TestChain {
    chain_id: ChainId,
    abi: ContractAbi,
    contract: Address,
    state: Mutex<ChainState>,
}

impl TestChain {
    pub fn new(chain_id: ChainId, abi: ContractAbi, contract: Address) -> Self {
        Self {
            chain_id,
            abi,
            contract,
            state: Mutex::new(ChainState {
                pastes: BTreeMap::new(),
                next_id: 1,
                paid: HashSet::new(),
                balances: HashMap::new(),
                receipts: HashMap::new(),
                unmined: Vec::new(),
                block: 1,
                nonce: 0,
                now: chrono::Utc::now().timestamp().max(0) as u64,
                auto_mine: true,
                reject_next: false,
            }),
        }
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn contract_address(&self) -> Address {
        self.contract
    }

    pub fn abi(&self) -> ContractAbi {
        self.abi
    }

    /// Current block timestamp
    pub fn now(&self) -> u64 {
        self.state.lock().now
    }

    pub fn set_time(&self, now: u64) {
        self.state.lock().now = now;
    }

    pub fn advance_time(&self, seconds: u64) {
        self.state.lock().now += seconds;
    }

    /// When disabled, transactions wait for [`TestChain::mine`]
    pub fn set_auto_mine(&self, auto_mine: bool) {
        self.state.lock().auto_mine = auto_mine;
    }

    /// Mine every pending transaction into one block
    pub fn mine(&self) -> usize {
        let mut state = self.state.lock();
        state.block += 1;
        let block = state.block;
        let pending = std::mem::take(&mut state.unmined);
        let count = pending.len();
        for mut receipt in pending {
            receipt.block_number = Some(U64::from(block));
            state.receipts.insert(receipt.transaction_hash, receipt);
        }
        count
    }

    /// Make the next `eth_sendTransaction` fail as a user rejection
    pub fn reject_next_transaction(&self) {
        self.state.lock().reject_next = true;
    }

    /// Wei received by `address` through payments and tips
    pub fn balance(&self, address: Address) -> U256 {
        self.state
            .lock()
            .balances
            .get(&address)
            .copied()
            .unwrap_or_default()
    }

    /// Raw stored content of a paste, as any chain observer could read it
    pub fn stored_content(&self, id: U256) -> Option<Bytes> {
        self.state.lock().pastes.get(&id).map(StoredPaste::content)
    }

    /// Store a public paste directly, bypassing transactions
    pub fn seed_public_paste(
        &self,
        creator: Address,
        title: &str,
        content: &str,
        expiration_time: u64,
    ) -> U256 {
        let mut state = self.state.lock();
        let id = U256::from(state.next_id);
        state.next_id += 1;
        let now = state.now;
        state.pastes.insert(
            id,
            StoredPaste {
                id,
                creator,
                title: title.to_string(),
                creation_time: now,
                expiration_time,
                paste_type: PUBLIC,
                price: U256::ZERO,
                public_key: String::new(),
                allowed: Vec::new(),
                versions: vec![StoredVersion {
                    content: Bytes::from(content.as_bytes().to_vec()),
                    updated_at: now,
                }],
            },
        );
        id
    }

    fn decode(&self, data: &[u8]) -> Result<Call, String> {
        match self.abi {
            ContractAbi::Legacy => {
                let call = ILegacyPasteBinCalls::abi_decode(data, true)
                    .map_err(|e| format!("unknown call: {}", e))?;
                Ok(match call {
                    ILegacyPasteBinCalls::createPublicPaste(c) => Call::Create {
                        title: c.title,
                        content: Bytes::from(c.content.into_bytes()),
                        expiration_time: c.expirationTime,
                        paste_type: PUBLIC,
                        price: U256::ZERO,
                        public_key: c.publicKey,
                        allowed: Vec::new(),
                    },
                    ILegacyPasteBinCalls::createPaidPaste(c) => Call::Create {
                        title: c.title,
                        content: c.content,
                        expiration_time: c.expirationTime,
                        paste_type: PAID,
                        price: c.price,
                        public_key: c.publicKey,
                        allowed: Vec::new(),
                    },
                    ILegacyPasteBinCalls::createPrivatePaste(c) => Call::Create {
                        title: c.title,
                        content: c.content,
                        expiration_time: c.expirationTime,
                        paste_type: PRIVATE,
                        price: U256::ZERO,
                        public_key: c.publicKey,
                        allowed: c.allowedAddresses,
                    },
                    ILegacyPasteBinCalls::updatePaste(c) => Call::Update {
                        id: c.pasteId,
                        content: c.content,
                    },
                    ILegacyPasteBinCalls::deletePaste(c) => Call::Delete { id: c.pasteId },
                    ILegacyPasteBinCalls::accessPaste(c) => Call::Access { id: c.pasteId },
                    ILegacyPasteBinCalls::getPaste(c) => Call::GetPaste { id: c.pasteId },
                    ILegacyPasteBinCalls::getPasteInfo(c) => Call::GetInfo { id: c.pasteId },
                    ILegacyPasteBinCalls::getPublicPaste(c) => Call::GetPublic { id: c.pasteId },
                    ILegacyPasteBinCalls::getPrivatePaste(c) => Call::GetPrivate { id: c.pasteId },
                    ILegacyPasteBinCalls::getPublicPastes(c) => Call::PublicPastes {
                        offset: c.offset,
                        limit: c.limit,
                    },
                    ILegacyPasteBinCalls::getUserPastes(c) => Call::UserPastes { user: c.user },
                    ILegacyPasteBinCalls::getAccessiblePastes(c) => {
                        Call::AccessiblePastes { user: c.user }
                    }
                    ILegacyPasteBinCalls::pastes(c) => Call::Record { id: c.pasteId },
                })
            }
            ContractAbi::Consolidated => {
                let call = IPasteBinCalls::abi_decode(data, true)
                    .map_err(|e| format!("unknown call: {}", e))?;
                Ok(match call {
                    IPasteBinCalls::createPaste(c) => Call::Create {
                        title: c.title,
                        content: c.content,
                        expiration_time: c.expirationTime,
                        paste_type: c.pasteType,
                        price: c.price,
                        public_key: c.publicKey,
                        allowed: c.allowedAddresses,
                    },
                    IPasteBinCalls::updatePaste(c) => Call::Update {
                        id: c.pasteId,
                        content: c.content,
                    },
                    IPasteBinCalls::deletePaste(c) => Call::Delete { id: c.pasteId },
                    IPasteBinCalls::accessPaste(c) => Call::Access { id: c.pasteId },
                    IPasteBinCalls::getPaste(c) => Call::GetPaste { id: c.pasteId },
                    IPasteBinCalls::getPasteInfo(c) => Call::GetInfo { id: c.pasteId },
                    IPasteBinCalls::getPasteContent(c) => Call::GetContent {
                        id: c.pasteId,
                        signature: c.signature,
                    },
                    IPasteBinCalls::getPasteVersion(c) => Call::GetVersion {
                        id: c.pasteId,
                        version: c.version,
                        signature: c.signature,
                    },
                    IPasteBinCalls::getPublicPastes(c) => Call::PublicPastes {
                        offset: c.offset,
                        limit: c.limit,
                    },
                    IPasteBinCalls::getUserPastes(c) => Call::UserPastes { user: c.user },
                    IPasteBinCalls::getAccessiblePastes(c) => {
                        Call::AccessiblePastes { user: c.user }
                    }
                    IPasteBinCalls::pastes(c) => Call::Record { id: c.pasteId },
                })
            }
        }
    }

    fn execute(
        state: &mut ChainState,
        call: Call,
        from: Address,
        value: U256,
        logs: &mut Vec<(U256, Address, u8)>,
    ) -> Result<Output, String> {
        let now = state.now;
        match call {
            Call::Create {
                title,
                content,
                expiration_time,
                paste_type,
                price,
                public_key,
                allowed,
            } => {
                if title.trim().is_empty() {
                    return Err("Title cannot be empty".to_string());
                }
                if paste_type > PRIVATE {
                    return Err("Invalid paste type".to_string());
                }
                let expiration_time = expiration_time.saturating_to::<u64>();
                if expiration_time != 0 && expiration_time <= now {
                    return Err("Invalid expiration time".to_string());
                }
                let id = U256::from(state.next_id);
                state.next_id += 1;
                state.pastes.insert(
                    id,
                    StoredPaste {
                        id,
                        creator: from,
                        title,
                        creation_time: now,
                        expiration_time,
                        paste_type,
                        price,
                        public_key,
                        allowed,
                        versions: vec![StoredVersion {
                            content,
                            updated_at: now,
                        }],
                    },
                );
                logs.push((id, from, paste_type));
                Ok(Output::Id(id))
            }
            Call::Update { id, content } => {
                let paste = live_mut(state, id)?;
                if paste.creator != from {
                    return Err("Only creator can update".to_string());
                }
                paste.versions.push(StoredVersion {
                    content,
                    updated_at: now,
                });
                Ok(Output::Unit)
            }
            Call::Delete { id } => {
                let creator = live(state, id)?.creator;
                if creator != from {
                    return Err("Only creator can delete".to_string());
                }
                state.pastes.remove(&id);
                Ok(Output::Unit)
            }
            Call::Access { id } => {
                let paste = live(state, id)?.clone();
                if paste.paste_type != PAID {
                    return Err("Paste is not a paid paste".to_string());
                }
                if value < paste.price {
                    return Err("Insufficient payment".to_string());
                }
                state.paid.insert((id, from));
                *state.balances.entry(paste.creator).or_default() += value;
                Ok(Output::Unit)
            }
            Call::GetPaste { id } => {
                let paste = live(state, id)?.clone();
                let content = if has_access(state, &paste, from) {
                    paste.content()
                } else {
                    Bytes::new()
                };
                Ok(Output::Paste(paste, content))
            }
            Call::GetInfo { id } => Ok(Output::Info(live(state, id)?.clone())),
            Call::GetPublic { id } => {
                let paste = live(state, id)?.clone();
                if paste.paste_type != PUBLIC {
                    return Err("Not a public paste".to_string());
                }
                Ok(Output::Public(paste))
            }
            Call::GetPrivate { id } => {
                let paste = live(state, id)?.clone();
                if !has_access(state, &paste, from) {
                    return Err("Access denied".to_string());
                }
                Ok(Output::Private(paste))
            }
            Call::GetContent { id, signature } => {
                let paste = live(state, id)?.clone();
                check_signed_access(state, &paste, from, &signature)?;
                Ok(Output::Content(paste.content()))
            }
            Call::GetVersion {
                id,
                version,
                signature,
            } => {
                let paste = live(state, id)?.clone();
                check_signed_access(state, &paste, from, &signature)?;
                let index = version.saturating_to::<usize>();
                let stored = index
                    .checked_sub(1)
                    .and_then(|i| paste.versions.get(i))
                    .cloned()
                    .ok_or_else(|| "Version does not exist".to_string())?;
                Ok(Output::Version(version, stored))
            }
            Call::PublicPastes { offset, limit } => {
                let offset = offset.saturating_to::<usize>();
                let limit = limit.saturating_to::<usize>();
                Ok(Output::List(
                    state
                        .pastes
                        .values()
                        .filter(|p| p.paste_type == PUBLIC)
                        .skip(offset)
                        .take(limit)
                        .cloned()
                        .collect(),
                ))
            }
            Call::UserPastes { user } => Ok(Output::Ids(
                state
                    .pastes
                    .values()
                    .filter(|p| p.creator == user)
                    .map(|p| p.id)
                    .collect(),
            )),
            Call::AccessiblePastes { user } => Ok(Output::Ids(
                state
                    .pastes
                    .values()
                    .filter(|p| {
                        p.creator != user
                            && (state.paid.contains(&(p.id, user)) || p.allowed.contains(&user))
                    })
                    .map(|p| p.id)
                    .collect(),
            )),
            Call::Record { id } => Ok(Output::Record(state.pastes.get(&id).cloned())),
        }
    }

    fn encode(&self, output: Output) -> Vec<u8> {
        match self.abi {
            ContractAbi::Legacy => encode_legacy(output),
            ContractAbi::Consolidated => encode_consolidated(output),
        }
    }

    fn eth_call(&self, tx: TransactionRequest) -> Result<Value, RpcError> {
        if tx.to != Some(self.contract) {
            return Ok(json!("0x"));
        }
        let data = tx.data.unwrap_or_default();
        let call = self.decode(&data).map_err(revert)?;
        if call.is_mutation() {
            return Err(revert("state-changing call sent through eth_call".to_string()));
        }

        let mut state = self.state.lock();
        let output = Self::execute(
            &mut state,
            call,
            tx.from.unwrap_or_default(),
            U256::ZERO,
            &mut Vec::new(),
        )
        .map_err(revert)?;
        drop(state);

        Ok(json!(hex::encode_prefixed(self.encode(output))))
    }

    fn send_transaction(&self, tx: TransactionRequest) -> Result<Value, RpcError> {
        let from = tx.from.ok_or_else(|| RpcError::Rpc {
            code: -32602,
            message: "missing from".to_string(),
            data: None,
        })?;
        let value = tx.value.unwrap_or_default();

        let mut state = self.state.lock();
        if std::mem::take(&mut state.reject_next) {
            return Err(RpcError::Rpc {
                code: 4001,
                message: "User denied transaction signature.".to_string(),
                data: None,
            });
        }

        let mut events = Vec::new();
        match tx.to {
            Some(to) if to == self.contract => {
                let data = tx.data.unwrap_or_default();
                let call = self.decode(&data).map_err(revert)?;
                if !call.is_mutation() {
                    return Err(revert("view call sent as a transaction".to_string()));
                }
                Self::execute(&mut state, call, from, value, &mut events).map_err(revert)?;
            }
            Some(to) => {
                *state.balances.entry(to).or_default() += value;
            }
            None => {
                return Err(RpcError::Rpc {
                    code: -32602,
                    message: "contract deployment not supported".to_string(),
                    data: None,
                })
            }
        }

        state.nonce += 1;
        let mut preimage = from.to_vec();
        preimage.extend_from_slice(&state.nonce.to_be_bytes());
        let hash = keccak256(preimage);

        let logs = events
            .into_iter()
            .map(|(id, creator, paste_type)| {
                let data = PasteCreated {
                    pasteId: id,
                    creator,
                    pasteType: paste_type,
                }
                .encode_log_data();
                Log {
                    address: self.contract,
                    topics: data.topics().to_vec(),
                    data: data.data,
                }
            })
            .collect();

        let receipt = TransactionReceipt {
            transaction_hash: hash,
            block_number: None,
            status: Some(U64::from(1)),
            logs,
        };
        state.unmined.push(receipt);
        let auto_mine = state.auto_mine;
        drop(state);

        if auto_mine {
            self.mine();
        }
        Ok(json!(hash))
    }
}

#[async_trait::async_trait]
impl Transport for TestChain {
    async fn request(&self, method: &str, params: Value) -> Result<Value, RpcError> {
        tracing::trace!(chain_id = %self.chain_id, method, "test chain request");
        match method {
            "eth_chainId" => Ok(json!(self.chain_id.to_string())),
            "eth_blockNumber" => Ok(json!(format!("{:#x}", self.state.lock().block))),
            "eth_call" => self.eth_call(first_param(params)?),
            "eth_sendTransaction" => self.send_transaction(first_param(params)?),
            "eth_getTransactionReceipt" => {
                let hash: B256 = first_param(params)?;
                let receipt = self.state.lock().receipts.get(&hash).cloned();
                Ok(serde_json::to_value(receipt).unwrap_or(Value::Null))
            }
            other => Err(RpcError::Rpc {
                code: -32601,
                message: format!("method {} not found", other),
                data: None,
            }),
        }
    }
}

fn first_param<T: serde::de::DeserializeOwned>(params: Value) -> Result<T, RpcError> {
    let first = match params {
        Value::Array(mut items) if !items.is_empty() => items.swap_remove(0),
        _ => {
            return Err(RpcError::Rpc {
                code: -32602,
                message: "missing params".to_string(),
                data: None,
            })
        }
    };
    serde_json::from_value(first).map_err(|e| RpcError::Rpc {
        code: -32602,
        message: format!("invalid params: {}", e),
        data: None,
    })
}

fn revert(reason: String) -> RpcError {
    let data = Revert {
        reason: reason.clone(),
    }
    .abi_encode();
    RpcError::Rpc {
        code: 3,
        message: format!("execution reverted: {}", reason),
        data: Some(json!(hex::encode_prefixed(data))),
    }
}

fn live(state: &ChainState, id: U256) -> Result<&StoredPaste, String> {
    state
        .pastes
        .get(&id)
        .ok_or_else(|| "Paste does not exist".to_string())
}

fn live_mut(state: &mut ChainState, id: U256) -> Result<&mut StoredPaste, String> {
    state
        .pastes
        .get_mut(&id)
        .ok_or_else(|| "Paste does not exist".to_string())
}

fn has_access(state: &ChainState, paste: &StoredPaste, viewer: Address) -> bool {
    match paste.paste_type {
        PUBLIC => true,
        _ if paste.creator == viewer => true,
        PAID => state.paid.contains(&(paste.id, viewer)),
        _ => paste.allowed.contains(&viewer),
    }
}

fn check_signed_access(
    state: &ChainState,
    paste: &StoredPaste,
    viewer: Address,
    signature: &[u8],
) -> Result<(), String> {
    if paste.paste_type == PUBLIC {
        return Ok(());
    }
    if !has_access(state, paste, viewer) {
        return Err("Access denied".to_string());
    }
    let message = generate_message_to_sign(paste.id, viewer);
    if !verify_signature(&message, signature, viewer) {
        return Err("Invalid signature".to_string());
    }
    Ok(())
}

fn legacy_info(p: &StoredPaste) -> ILegacyPasteBin::PasteInfo {
    ILegacyPasteBin::PasteInfo {
        id: p.id,
        creator: p.creator,
        title: p.title.clone(),
        creationTime: U256::from(p.creation_time),
        expirationTime: U256::from(p.expiration_time),
        pasteType: p.paste_type,
        price: p.price,
        publicKey: p.public_key.clone(),
    }
}

fn consolidated_info(p: &StoredPaste) -> IPasteBin::PasteInfo {
    IPasteBin::PasteInfo {
        id: p.id,
        creator: p.creator,
        title: p.title.clone(),
        creationTime: U256::from(p.creation_time),
        expirationTime: U256::from(p.expiration_time),
        pasteType: p.paste_type,
        price: p.price,
        publicKey: p.public_key.clone(),
        currentVersion: p.current_version(),
    }
}

fn encode_legacy(output: Output) -> Vec<u8> {
    match output {
        Output::Unit => Vec::new(),
        Output::Id(id) => ILegacyPasteBin::createPaidPasteCall::abi_encode_returns(&(id,)),
        Output::Paste(p, content) => {
            let paste = ILegacyPasteBin::Paste {
                id: p.id,
                creator: p.creator,
                title: p.title.clone(),
                content,
                creationTime: U256::from(p.creation_time),
                expirationTime: U256::from(p.expiration_time),
                pasteType: p.paste_type,
                price: p.price,
                publicKey: p.public_key.clone(),
            };
            ILegacyPasteBin::getPasteCall::abi_encode_returns(&(paste,))
        }
        Output::Info(p) => ILegacyPasteBin::getPasteInfoCall::abi_encode_returns(&(legacy_info(&p),)),
        Output::Public(p) => ILegacyPasteBin::getPublicPasteCall::abi_encode_returns(&(
            p.title.clone(),
            p.content(),
            p.creator,
        )),
        Output::Private(p) => ILegacyPasteBin::getPrivatePasteCall::abi_encode_returns(&(
            p.content(),
            p.public_key.clone(),
        )),
        Output::Content(content) => {
            ILegacyPasteBin::getPrivatePasteCall::abi_encode_returns(&(content, String::new()))
        }
        Output::Version(_, stored) => {
            ILegacyPasteBin::getPrivatePasteCall::abi_encode_returns(&(stored.content, String::new()))
        }
        Output::List(pastes) => ILegacyPasteBin::getPublicPastesCall::abi_encode_returns(&(
            pastes.iter().map(legacy_info).collect::<Vec<_>>(),
        )),
        Output::Ids(ids) => ILegacyPasteBin::getUserPastesCall::abi_encode_returns(&(ids,)),
        Output::Record(p) => {
            let info = p.as_ref().map(legacy_info).unwrap_or_else(|| ILegacyPasteBin::PasteInfo {
                id: U256::ZERO,
                creator: Address::ZERO,
                title: String::new(),
                creationTime: U256::ZERO,
                expirationTime: U256::ZERO,
                pasteType: 0,
                price: U256::ZERO,
                publicKey: String::new(),
            });
            ILegacyPasteBin::pastesCall::abi_encode_returns(&(
                info.id,
                info.creator,
                info.title,
                info.creationTime,
                info.expirationTime,
                info.pasteType,
                info.price,
                info.publicKey,
            ))
        }
    }
}

fn encode_consolidated(output: Output) -> Vec<u8> {
    match output {
        Output::Unit => Vec::new(),
        Output::Id(id) => IPasteBin::createPasteCall::abi_encode_returns(&(id,)),
        Output::Paste(p, content) => {
            let paste = IPasteBin::Paste {
                id: p.id,
                creator: p.creator,
                title: p.title.clone(),
                content,
                creationTime: U256::from(p.creation_time),
                expirationTime: U256::from(p.expiration_time),
                pasteType: p.paste_type,
                price: p.price,
                publicKey: p.public_key.clone(),
                currentVersion: p.current_version(),
            };
            IPasteBin::getPasteCall::abi_encode_returns(&(paste,))
        }
        Output::Info(p) => IPasteBin::getPasteInfoCall::abi_encode_returns(&(consolidated_info(&p),)),
        Output::Public(p) | Output::Private(p) => {
            IPasteBin::getPasteContentCall::abi_encode_returns(&(p.content(),))
        }
        Output::Content(content) => IPasteBin::getPasteContentCall::abi_encode_returns(&(content,)),
        Output::Version(version, stored) => {
            let version = IPasteBin::PasteVersion {
                version,
                content: stored.content,
                updatedAt: U256::from(stored.updated_at),
            };
            IPasteBin::getPasteVersionCall::abi_encode_returns(&(version,))
        }
        Output::List(pastes) => IPasteBin::getPublicPastesCall::abi_encode_returns(&(
            pastes.iter().map(consolidated_info).collect::<Vec<_>>(),
        )),
        Output::Ids(ids) => IPasteBin::getUserPastesCall::abi_encode_returns(&(ids,)),
        Output::Record(p) => {
            let info = p
                .as_ref()
                .map(consolidated_info)
                .unwrap_or_else(|| IPasteBin::PasteInfo {
                    id: U256::ZERO,
                    creator: Address::ZERO,
                    title: String::new(),
                    creationTime: U256::ZERO,
                    expirationTime: U256::ZERO,
                    pasteType: 0,
                    price: U256::ZERO,
                    publicKey: String::new(),
                    currentVersion: U256::ZERO,
                });
            IPasteBin::pastesCall::abi_encode_returns(&(
                info.id,
                info.creator,
                info.title,
                info.creationTime,
                info.expirationTime,
                info.pasteType,
                info.price,
                info.publicKey,
                info.currentVersion,
            ))
        }
    }
}

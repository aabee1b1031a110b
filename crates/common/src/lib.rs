/**
 * Bindings for the pastebin contract deployments.
 *  - ABI definitions for the legacy and consolidated contracts
 *  - A per-network facade over both generations
 *  - Pending and confirmed transaction tracking
 */
pub mod contract;
/**
 * Cryptographic types and operations.
 *  - Symmetric content keys and sealed payloads
 *  - Access messages and personal-message signatures
 */
pub mod crypto;
/**
 * The registry of networks the client may bind to,
 *  and the chain identifiers that key it.
 */
pub mod network;
/**
 * High level paste workflows: create, view,
 *  edit, delete, tip and explore.
 */
pub mod paste;
pub mod price;
/**
 * JSON-RPC transport and the Ethereum request
 *  and receipt types the client exchanges.
 */
pub mod rpc;
/**
 * Wallet connection state and provider selection.
 */
pub mod session;
pub mod testkit;
/**
 * Helper for setting build version information
 *  at compile time.
 */
pub mod version;
pub mod wallet;

pub mod prelude {
    pub use crate::contract::{ContractError, PasteContract, PasteInfo, PasteType};
    pub use crate::crypto::{AccessSignature, CryptoError, EncryptionKey, KeyScheme};
    pub use crate::network::{ChainId, NetworkConfig, NetworkRegistry};
    pub use crate::paste::{NewPaste, PasteClient, PasteError, ViewOptions};
    pub use crate::session::{Session, SessionState};
    pub use crate::version::build_info;
    pub use crate::wallet::{RpcWallet, Wallet, WalletError};
}

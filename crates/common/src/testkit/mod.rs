//! In-process chains and wallets for integration tests
//!
//! This module provides a simple way to run the full client stack against
//! simulated pastebin deployments, without requiring a node, a browser
//! wallet or any network access.
//!
//! # Example
//!
//! ```rust,ignore
//! use common::network::ChainId;
//! use common::paste::{NewPaste, ViewOptions};
//! use common::testkit::TestNetwork;
//!
//! #[tokio::test]
//! async fn test_public_paste() -> anyhow::Result<()> {
//!     let net = TestNetwork::new()?;
//!
//!     // Alice connects on the consolidated testnet deployment
//!     let alice = net.wallet(ChainId::ARBITRUM_SEPOLIA)?;
//!     let client = net.client(&alice).await?;
//!
//!     // Create and read back a public paste
//!     let created = client.create(&NewPaste::public("Greeting", "hello")).await?;
//!     let viewed = client.view(created.id, ViewOptions::default()).await?;
//!     assert_eq!(viewed.content, "hello");
//!     Ok(())
//! }
//! ```

mod chain;
mod network;
mod wallet;

pub use chain::TestChain;
pub use network::{TestConnector, TestNetwork, TEST_POLL_INTERVAL};
pub use wallet::TestWallet;

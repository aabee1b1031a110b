//! Shared test utilities for paste integration tests
#![allow(dead_code)]

use std::sync::Arc;

use alloy_primitives::U256;
use common::crypto::KeyScheme;
use common::network::ChainId;
use common::paste::{parse_ether, PasteClient, TxEvent, TxObserver};
use common::testkit::{TestNetwork, TestWallet};
use parking_lot::Mutex;

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A user of the network: their wallet and a client bound through it
pub struct User {
    pub wallet: Arc<TestWallet>,
    pub client: PasteClient,
}

impl User {
    pub fn address(&self) -> alloy_primitives::Address {
        self.wallet.address()
    }
}

/// Set up a network and connect a fresh user on `chain_id`
pub async fn setup(scheme: KeyScheme, chain_id: ChainId) -> (TestNetwork, User) {
    init_tracing();
    let net = TestNetwork::with_key_scheme(scheme).unwrap();
    let user = join(&net, chain_id).await;
    (net, user)
}

/// Connect another fresh user on `chain_id`
pub async fn join(net: &TestNetwork, chain_id: ChainId) -> User {
    let wallet = net.wallet(chain_id).unwrap();
    let client = net.client(&wallet).await.unwrap();
    User { wallet, client }
}

pub fn ether(amount: &str) -> U256 {
    parse_ether(amount).unwrap()
}

/// An observer that records every transaction event it sees
pub fn recorder() -> (TxObserver, Arc<Mutex<Vec<TxEvent>>>) {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();
    let observer: TxObserver = Arc::new(move |event: &TxEvent| sink.lock().push(event.clone()));
    (observer, events)
}

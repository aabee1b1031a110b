//! Integration tests for wallet sessions and provider selection

mod common;

use std::sync::Arc;

use ::common::contract::resolve_binding;
use ::common::network::ChainId;
use ::common::session::{ConnectError, SessionError, SessionState, SwitchError};
use ::common::testkit::TestNetwork;

const MAINNET: ChainId = ChainId::new(1);

#[tokio::test]
async fn test_connect_on_supported_network() {
    common::init_tracing();
    let net = TestNetwork::new().unwrap();
    let wallet = net.wallet(ChainId::ARBITRUM_SEPOLIA).unwrap();
    let session = net.session(Some(wallet.clone()));
    assert_eq!(session.state(), SessionState::Disconnected);

    let info = session.connect().await.unwrap();
    assert_eq!(info.address, wallet.address());
    assert_eq!(info.chain_id, ChainId::ARBITRUM_SEPOLIA);
    assert!(!info.chain_mismatch);
    assert!(info.switch_error.is_none());
    assert_eq!(
        session.state(),
        SessionState::Connected {
            address: wallet.address(),
            chain_id: ChainId::ARBITRUM_SEPOLIA,
        }
    );

    let provider = session.provider(ChainId::ARBITRUM_ONE).await.unwrap();
    assert_eq!(provider.signer, Some(wallet.address()));
    assert_eq!(provider.chain_id, ChainId::ARBITRUM_SEPOLIA);

    session.disconnect();
    assert_eq!(session.state(), SessionState::Disconnected);
    let provider = session.provider(ChainId::ARBITRUM_ONE).await.unwrap();
    assert!(provider.is_read_only());
    assert_eq!(provider.chain_id, ChainId::ARBITRUM_ONE);
}

#[tokio::test]
async fn test_connect_switches_away_from_unsupported_network() {
    let mut net = TestNetwork::new().unwrap();
    net.add_foreign_chain(MAINNET);
    let wallet = net.wallet(MAINNET).unwrap();
    let session = net.session(Some(wallet.clone()));

    let info = session.connect().await.unwrap();
    assert_eq!(info.chain_id, ChainId::ARBITRUM_ONE);
    assert!(!info.chain_mismatch);
    assert_eq!(wallet.current_chain().chain_id(), ChainId::ARBITRUM_ONE);
}

#[tokio::test]
async fn test_declined_switch_leaves_chain_mismatch() {
    let mut net = TestNetwork::new().unwrap();
    net.add_foreign_chain(MAINNET);
    let wallet = net.wallet(MAINNET).unwrap();
    wallet.reject_switch(true);
    let session = net.session(Some(wallet.clone()));

    let info = session.connect().await.unwrap();
    assert_eq!(info.chain_id, MAINNET);
    assert!(info.chain_mismatch);
    assert!(info.switch_error.is_some());
    assert!(session.chain_mismatch());

    // Reads fall back to the selected network
    let provider = session.provider(ChainId::ARBITRUM_SEPOLIA).await.unwrap();
    assert!(provider.is_read_only());
    assert_eq!(provider.chain_id, ChainId::ARBITRUM_SEPOLIA);

    // Writes have nothing to fall back to
    let result = session.signer_provider().await;
    assert!(matches!(result, Err(SessionError::UnsupportedNetwork(_))));

    let result = session.switch_network(ChainId::ARBITRUM_ONE).await;
    assert!(matches!(result, Err(SwitchError::Rejected)));
    assert!(session.chain_mismatch());

    wallet.reject_switch(false);
    session.switch_network(ChainId::ARBITRUM_ONE).await.unwrap();
    assert!(!session.chain_mismatch());
    assert!(!session.signer_provider().await.unwrap().is_read_only());
}

#[tokio::test]
async fn test_rejected_connection_returns_to_disconnected() {
    let net = TestNetwork::new().unwrap();
    let wallet = net.wallet(ChainId::ARBITRUM_ONE).unwrap();
    wallet.reject_accounts(true);
    let session = net.session(Some(wallet.clone()));

    let result = session.connect().await;
    assert!(matches!(result, Err(ConnectError::Rejected)));
    assert_eq!(session.state(), SessionState::Disconnected);

    wallet.reject_accounts(false);
    session.connect().await.unwrap();
    assert_eq!(session.address(), Some(wallet.address()));
}

#[tokio::test]
async fn test_connect_without_wallet() {
    let net = TestNetwork::new().unwrap();
    let session = net.session(None);

    let result = session.connect().await;
    assert!(matches!(result, Err(ConnectError::NoProvider(_))));
    assert_eq!(session.state(), SessionState::Disconnected);

    let result = session.switch_network(ChainId::ARBITRUM_ONE).await;
    assert!(matches!(result, Err(SwitchError::NotConnected)));
}

#[tokio::test]
async fn test_switch_to_unsupported_network_is_refused() {
    let mut net = TestNetwork::new().unwrap();
    net.add_foreign_chain(MAINNET);
    let wallet = net.wallet(ChainId::ARBITRUM_ONE).unwrap();
    let session = net.session(Some(wallet.clone()));
    session.connect().await.unwrap();

    let result = session.switch_network(MAINNET).await;
    assert!(matches!(result, Err(SwitchError::Unsupported(id)) if id == MAINNET));
    assert_eq!(session.chain_id(), Some(ChainId::ARBITRUM_ONE));

    session
        .switch_network(ChainId::ARBITRUM_SEPOLIA)
        .await
        .unwrap();
    assert_eq!(session.chain_id(), Some(ChainId::ARBITRUM_SEPOLIA));
    assert_eq!(wallet.current_chain().chain_id(), ChainId::ARBITRUM_SEPOLIA);
}

#[tokio::test]
async fn test_provider_follows_wallet_switched_elsewhere() {
    let net = TestNetwork::new().unwrap();
    let wallet = net.wallet(ChainId::ARBITRUM_ONE).unwrap();
    let session = net.session(Some(wallet.clone()));
    session.connect().await.unwrap();

    wallet.set_chain(ChainId::ARBITRUM_SEPOLIA).unwrap();
    let provider = session.provider(ChainId::ARBITRUM_ONE).await.unwrap();
    assert_eq!(provider.chain_id, ChainId::ARBITRUM_SEPOLIA);
    assert_eq!(session.chain_id(), Some(ChainId::ARBITRUM_SEPOLIA));
}

#[tokio::test]
async fn test_binding_matches_provider_chain() {
    let net = TestNetwork::new().unwrap();
    let registry = net.registry();
    let wallet = net.wallet(ChainId::ARBITRUM_SEPOLIA).unwrap();
    let session = net.session(Some(wallet));
    session.connect().await.unwrap();

    for selected in [ChainId::ARBITRUM_ONE, ChainId::ARBITRUM_SEPOLIA] {
        let provider = session.provider(selected).await.unwrap();
        let binding = resolve_binding(&registry, &provider).unwrap();
        let network = registry.get(provider.chain_id).unwrap();
        assert_eq!(binding.chain_id, provider.chain_id);
        assert_eq!(Some(binding.contract_address), network.contract_address);
        assert_eq!(binding.contract_abi, network.contract_abi);
        assert!(Arc::ptr_eq(&binding.transport, &provider.transport));
    }

    session.disconnect();
    let provider = session.provider(ChainId::ARBITRUM_ONE).await.unwrap();
    let binding = resolve_binding(&registry, &provider).unwrap();
    assert_eq!(
        Some(binding.contract_address),
        registry.get(ChainId::ARBITRUM_ONE).unwrap().contract_address
    );
}

#[tokio::test]
async fn test_unconfigured_network_cannot_be_bound() {
    let mut networks: Vec<_> = TestNetwork::new().unwrap().registry().iter().cloned().collect();
    networks[1].contract_address = None;
    let net = TestNetwork::from_networks(networks).unwrap();
    let session = net.session(None);

    let result = session.provider(ChainId::ARBITRUM_SEPOLIA).await;
    assert!(matches!(result, Err(SessionError::UnsupportedNetwork(_))));
}

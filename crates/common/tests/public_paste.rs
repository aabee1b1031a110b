//! Integration tests for public pastes and the explore listing

mod common;

use ::common::contract::{ContractError, PasteType};
use ::common::crypto::KeyScheme;
use ::common::network::ChainId;
use ::common::paste::{ExploreQuery, NewPaste, PasteError, ViewOptions};

#[tokio::test]
async fn test_public_paste_round_trip_on_both_contracts() {
    for chain_id in [ChainId::ARBITRUM_SEPOLIA, ChainId::ARBITRUM_ONE] {
        let (net, alice) = common::setup(KeyScheme::SignatureBound, chain_id).await;

        let created = alice
            .client
            .create(&NewPaste::public("Greeting", "hello"))
            .await
            .unwrap();
        assert_eq!(created.paste_type, PasteType::Public);
        assert!(created.key_scheme.is_none());

        // Anyone can read it, wallet or not
        let reader = net.read_only_client(chain_id).await.unwrap();
        let viewed = reader.view(created.id, ViewOptions::default()).await.unwrap();
        assert_eq!(viewed.content, "hello");
        assert_eq!(viewed.info.title, "Greeting");
        assert_eq!(viewed.info.creator, alice.address());
        assert_eq!(viewed.info.paste_type, PasteType::Public);
        assert!(viewed.info.public_key.is_empty());
    }
}

#[tokio::test]
async fn test_public_content_is_stored_verbatim() {
    let (net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_SEPOLIA).await;

    let created = alice
        .client
        .create(&NewPaste::public("Notes", "fn main() {}"))
        .await
        .unwrap();

    let chain = net.chain(ChainId::ARBITRUM_SEPOLIA).unwrap();
    let stored = chain.stored_content(created.id).unwrap();
    assert_eq!(stored.as_ref(), b"fn main() {}");
}

#[tokio::test]
async fn test_view_missing_paste() {
    let (_net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_ONE).await;

    let result = alice
        .client
        .view(alloy_primitives::U256::from(404), ViewOptions::default())
        .await;
    assert!(matches!(
        result,
        Err(PasteError::Contract(ContractError::NotFound(_)))
    ));
}

#[tokio::test]
async fn test_invalid_new_pastes_are_refused_before_submission() {
    let (net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_SEPOLIA).await;

    let result = alice.client.create(&NewPaste::public("   ", "body")).await;
    assert!(matches!(result, Err(PasteError::EmptyTitle)));

    let mut expired = NewPaste::public("Old", "body");
    expired.expiration_time = 1;
    let result = alice.client.create(&expired).await;
    assert!(matches!(result, Err(PasteError::InvalidExpiration(1))));

    let reader = net.read_only_client(ChainId::ARBITRUM_SEPOLIA).await.unwrap();
    assert!(reader.my_pastes().await.is_err());
    assert!(alice.client.my_pastes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_read_only_client_cannot_create() {
    let net = ::common::testkit::TestNetwork::new().unwrap();
    let reader = net.read_only_client(ChainId::ARBITRUM_ONE).await.unwrap();

    let result = reader.create(&NewPaste::public("Title", "body")).await;
    assert!(matches!(result, Err(PasteError::NotConnected)));
}

#[tokio::test]
async fn test_explore_filters_and_pages() {
    let (net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_SEPOLIA).await;
    let chain = net.chain(ChainId::ARBITRUM_SEPOLIA).unwrap();

    for title in ["Rust tips", "Solidity notes", "rusty nails"] {
        alice
            .client
            .create(&NewPaste::public(title, "body"))
            .await
            .unwrap();
    }
    // Sealed pastes never show up in the public listing
    alice
        .client
        .create(&NewPaste::private(
            "Rust secrets",
            "hidden",
            Default::default(),
        ))
        .await
        .unwrap();
    // Neither do expired ones
    let expired = chain.seed_public_paste(alice.address(), "Rust history", "old", chain.now() - 1);

    let reader = net.read_only_client(ChainId::ARBITRUM_SEPOLIA).await.unwrap();

    let all = reader.explore(&ExploreQuery::default()).await.unwrap();
    let titles: Vec<_> = all.pastes.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Rust tips", "Solidity notes", "rusty nails"]);
    assert!(!all.has_more);
    assert!(all.pastes.iter().all(|p| p.id != expired));

    let search = reader
        .explore(&ExploreQuery {
            search: Some("RUST".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    let titles: Vec<_> = search.pastes.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Rust tips", "rusty nails"]);

    let first_page = reader
        .explore(&ExploreQuery {
            page: 1,
            page_size: 2,
            search: None,
        })
        .await
        .unwrap();
    assert_eq!(first_page.pastes.len(), 2);
    assert!(first_page.has_more);

    let by_creator = reader
        .explore(&ExploreQuery {
            search: Some(alice.address().to_string().to_lowercase()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_creator.pastes.len(), 3);
}

#[tokio::test]
async fn test_user_pastes_include_sealed_ones() {
    let (net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_ONE).await;

    alice
        .client
        .create(&NewPaste::public("One", "1"))
        .await
        .unwrap();
    alice
        .client
        .create(&NewPaste::private("Two", "2", Default::default()))
        .await
        .unwrap();

    let mine = alice.client.my_pastes().await.unwrap();
    let types: Vec<_> = mine.iter().map(|p| p.paste_type).collect();
    assert_eq!(types, [PasteType::Public, PasteType::Private]);

    let reader = net.read_only_client(ChainId::ARBITRUM_ONE).await.unwrap();
    let listed = reader.user_pastes(alice.address()).await.unwrap();
    assert_eq!(listed, mine);
}

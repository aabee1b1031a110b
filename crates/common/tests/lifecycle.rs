//! Integration tests for editing, deleting, tipping and transaction progress

mod common;

use std::time::Duration;

use ::common::contract::ContractError;
use ::common::crypto::KeyScheme;
use ::common::network::ChainId;
use ::common::paste::{AddressList, NewPaste, PasteError, TxEvent, ViewOptions};

#[tokio::test]
async fn test_edit_public_paste() {
    for chain_id in [ChainId::ARBITRUM_SEPOLIA, ChainId::ARBITRUM_ONE] {
        let (net, alice) = common::setup(KeyScheme::SignatureBound, chain_id).await;
        let bob = common::join(&net, chain_id).await;

        let created = alice
            .client
            .create(&NewPaste::public("Draft", "v1"))
            .await
            .unwrap();
        alice.client.edit(created.id, "v2").await.unwrap();

        let viewed = bob
            .client
            .view(created.id, ViewOptions::default())
            .await
            .unwrap();
        assert_eq!(viewed.content, "v2");
        assert_eq!(viewed.info.title, "Draft");

        let result = bob.client.edit(created.id, "vandalised").await;
        assert!(matches!(result, Err(PasteError::NotCreator(id)) if id == created.id));
    }
}

#[tokio::test]
async fn test_edit_private_paste_reseals_content() {
    let (net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_SEPOLIA).await;
    let chain = net.chain(ChainId::ARBITRUM_SEPOLIA).unwrap();

    let created = alice
        .client
        .create(&NewPaste::private("Diary", "monday", AddressList::new()))
        .await
        .unwrap();
    let before = chain.stored_content(created.id).unwrap();

    alice.client.edit(created.id, "tuesday").await.unwrap();
    let after = chain.stored_content(created.id).unwrap();
    assert_ne!(before, after);

    let viewed = alice
        .client
        .view(created.id, ViewOptions::default())
        .await
        .unwrap();
    assert_eq!(viewed.content, "tuesday");
}

#[tokio::test]
async fn test_version_history() {
    let (_net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_SEPOLIA).await;

    let public = alice
        .client
        .create(&NewPaste::public("Draft", "v1"))
        .await
        .unwrap();
    alice.client.edit(public.id, "v2").await.unwrap();

    let info = alice.client.contract().get_paste_info(public.id).await.unwrap();
    assert_eq!(info.current_version, Some(2));
    assert_eq!(alice.client.view_version(public.id, 1).await.unwrap().content, "v1");
    assert_eq!(alice.client.view_version(public.id, 2).await.unwrap().content, "v2");

    let result = alice.client.view_version(public.id, 9).await;
    assert!(matches!(
        result,
        Err(PasteError::Contract(ContractError::NotFound(_)))
    ));

    // Sealed pastes start with an empty placeholder version
    let private = alice
        .client
        .create(&NewPaste::private("Diary", "monday", AddressList::new()))
        .await
        .unwrap();
    alice.client.edit(private.id, "tuesday").await.unwrap();
    assert_eq!(
        alice.client.view_version(private.id, 2).await.unwrap().content,
        "monday"
    );
    assert_eq!(
        alice.client.view_version(private.id, 3).await.unwrap().content,
        "tuesday"
    );
}

#[tokio::test]
async fn test_legacy_contract_has_no_history() {
    let (_net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_ONE).await;

    let created = alice
        .client
        .create(&NewPaste::public("Draft", "v1"))
        .await
        .unwrap();
    let info = alice.client.contract().get_paste_info(created.id).await.unwrap();
    assert_eq!(info.current_version, None);

    let result = alice.client.view_version(created.id, 1).await;
    assert!(matches!(
        result,
        Err(PasteError::Contract(ContractError::UnsupportedCall { .. }))
    ));
}

#[tokio::test]
async fn test_delete_paste() {
    let (net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_ONE).await;
    let bob = common::join(&net, ChainId::ARBITRUM_ONE).await;

    let created = alice
        .client
        .create(&NewPaste::public("Temporary", "gone soon"))
        .await
        .unwrap();

    let result = bob.client.delete(created.id).await;
    assert!(matches!(
        result,
        Err(PasteError::Contract(ContractError::Reverted(_)))
    ));

    alice.client.delete(created.id).await.unwrap();
    let result = bob.client.view(created.id, ViewOptions::default()).await;
    assert!(matches!(
        result,
        Err(PasteError::Contract(ContractError::NotFound(_)))
    ));
    assert!(alice.client.my_pastes().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_tip_creator() {
    let (net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_SEPOLIA).await;
    let bob = common::join(&net, ChainId::ARBITRUM_SEPOLIA).await;
    let chain = net.chain(ChainId::ARBITRUM_SEPOLIA).unwrap();

    let created = alice
        .client
        .create(&NewPaste::public("Useful", "thanks"))
        .await
        .unwrap();

    let result = bob.client.tip(created.id, alloy_primitives::U256::ZERO).await;
    assert!(matches!(result, Err(PasteError::InvalidAmount(_))));

    bob.client
        .tip(created.id, common::ether("0.002"))
        .await
        .unwrap();
    assert_eq!(chain.balance(alice.address()), common::ether("0.002"));
}

#[tokio::test]
async fn test_paste_record_matches_info() {
    for chain_id in [ChainId::ARBITRUM_SEPOLIA, ChainId::ARBITRUM_ONE] {
        let (net, alice) = common::setup(KeyScheme::SignatureBound, chain_id).await;
        let reader = net.read_only_client(chain_id).await.unwrap();

        let created = alice
            .client
            .create(&NewPaste::public("Record", "body"))
            .await
            .unwrap();
        let record = reader.contract().get_paste_record(created.id).await.unwrap();
        let info = reader.contract().get_paste_info(created.id).await.unwrap();
        assert_eq!(record, info);
        assert_eq!(record.creator, alice.address());

        let missing = alloy_primitives::U256::from(999);
        let result = reader.contract().get_paste_record(missing).await;
        assert!(matches!(result, Err(ContractError::NotFound(_))));

        // Tipping a missing paste fails before any value moves
        let result = alice.client.tip(missing, common::ether("0.001")).await;
        assert!(matches!(
            result,
            Err(PasteError::Contract(ContractError::NotFound(_)))
        ));
    }
}

#[tokio::test]
async fn test_events_report_submission_before_confirmation() {
    let (net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_SEPOLIA).await;
    let chain = net.chain(ChainId::ARBITRUM_SEPOLIA).unwrap();
    chain.set_auto_mine(false);

    let (observer, events) = common::recorder();
    let client = alice.client.clone().with_observer(observer);

    let task = tokio::spawn(async move { client.create(&NewPaste::public("Slow", "body")).await });

    let submitted = loop {
        if let Some(TxEvent::Submitted { hash, .. }) = events.lock().first().cloned() {
            break hash;
        }
        tokio::time::sleep(Duration::from_millis(2)).await;
    };
    // The hash is known while the transaction is still pending
    assert_eq!(events.lock().len(), 1);
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(events.lock().len(), 1);

    assert_eq!(chain.mine(), 1);
    let created = task.await.unwrap().unwrap();
    assert_eq!(created.tx_hash, submitted);

    let events = events.lock().clone();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[1],
        TxEvent::Confirmed { action: "createPaste", hash, block: Some(_) } if *hash == submitted
    ));
}

#[tokio::test]
async fn test_rejected_transaction() {
    let (net, alice) = common::setup(KeyScheme::SignatureBound, ChainId::ARBITRUM_ONE).await;
    let chain = net.chain(ChainId::ARBITRUM_ONE).unwrap();

    chain.reject_next_transaction();
    let result = alice.client.create(&NewPaste::public("Nope", "body")).await;
    assert!(matches!(
        result,
        Err(PasteError::Contract(ContractError::UserRejected))
    ));

    // Nothing was created, and the next attempt goes through
    assert!(alice.client.my_pastes().await.unwrap().is_empty());
    alice
        .client
        .create(&NewPaste::public("Yes", "body"))
        .await
        .unwrap();
}

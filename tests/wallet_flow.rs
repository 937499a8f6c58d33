// 지갑 생성 / Export / 잔액 조회 통합 테스트

mod common;
use common::*;

use wallet_bot::domains::wallet::models::GeneratedWallet;
use wallet_bot::shared::errors::ChainError;

#[tokio::test]
async fn test_generate_wallet_twice_returns_existing() {
    let harness = TestHarness::new();

    let first = harness.reply_text(callback(USER, "generate_wallet")).await;
    assert!(first.starts_with("🎉 Wallet generated"));

    let second = harness.reply_text(callback(USER, "generate_wallet")).await;
    assert!(second.starts_with("A wallet is already created with your account"));
    assert_eq!(harness.store.len(), 1);

    // 두 응답 모두 같은 Public Key
    let stored = harness.wallet_service.get_wallet(USER).await.unwrap();
    assert!(first.contains(&stored.public_key));
    assert!(second.contains(&stored.public_key));
}

#[tokio::test]
async fn test_concurrent_generation_creates_one_wallet() {
    let harness = TestHarness::new();

    let (a, b) = tokio::join!(
        harness.wallet_service.generate_wallet(USER),
        harness.wallet_service.generate_wallet(USER)
    );
    let (a, b) = (a.unwrap(), b.unwrap());

    assert_eq!(harness.store.len(), 1);
    assert_eq!(a.record().public_key, b.record().public_key);
    let created = [&a, &b]
        .iter()
        .filter(|w| matches!(w, GeneratedWallet::Created(_)))
        .count();
    assert_eq!(created, 1);
}

#[tokio::test]
async fn test_export_private_key() {
    let harness = TestHarness::new();
    assert_eq!(
        harness.reply_text(callback(USER, "export_private_key")).await,
        "You don't have any wallet"
    );

    let harness = harness.with_wallet().await;
    let stored = harness.wallet_service.get_wallet(USER).await.unwrap();
    let reply = harness.reply_text(callback(USER, "export_private_key")).await;
    assert_eq!(
        reply,
        format!("*Private Key*: _`{}`_ \\(Tap to copy\\)", stored.keypair)
    );
}

#[tokio::test]
async fn test_balance_with_usd_value() {
    let harness = TestHarness::new().with_wallet().await;
    *harness.chain.balance.lock() = Ok(1_500_000_000);

    let reply = harness.reply_text(callback(USER, "get_balance")).await;
    assert!(reply.starts_with("*Wallet Balance*"));
    assert!(reply.contains("Balance: 1\\.5 SOL  \\(💲225\\)"), "{}", reply);
}

#[tokio::test]
async fn test_unfunded_wallet_shows_zero() {
    let harness = TestHarness::new().with_wallet().await;

    let reply = harness.reply_text(callback(USER, "get_balance")).await;
    assert!(reply.contains("Balance: 0 SOL  \\(💲0\\)"), "{}", reply);
}

#[tokio::test]
async fn test_balance_unknown_when_rpc_fails() {
    let harness = TestHarness::new().with_wallet().await;
    *harness.chain.balance.lock() = Err(ChainError::RpcUnavailable("connection refused".into()));

    let reply = harness.reply_text(callback(USER, "get_balance")).await;
    assert!(reply.contains("Balance unknown"));
    assert!(!reply.contains("0 SOL"));
}

#[tokio::test]
async fn test_price_failure_keeps_sol_balance() {
    let harness = TestHarness::new().with_wallet().await;
    *harness.chain.balance.lock() = Ok(2_000_000_000);
    *harness.market.price.lock() = None;

    let reply = harness.reply_text(callback(USER, "get_balance")).await;
    assert!(reply.contains("Balance: 2 SOL  \\(💲unknown\\)"), "{}", reply);
}

#[tokio::test]
async fn test_balance_without_wallet() {
    let harness = TestHarness::new();
    assert_eq!(
        harness.reply_text(callback(USER, "get_balance")).await,
        "You don't have any wallet"
    );
}

// 대화 흐름 통합 테스트 (전송 / 매수 / 기타 입력)

mod common;
use common::*;

use solana_sdk::signer::Signer;
use wallet_bot::domains::bot::models::{buy_menu, main_menu, ConversationState, TradeFlow};
use wallet_bot::domains::wallet::services::WalletService;
use wallet_bot::shared::clients::{TokenInfo, TransactionStatus};
use wallet_bot::shared::errors::{ChainError, SwapError};

async fn state(harness: &TestHarness, chat_id: i64) -> ConversationState {
    harness.router.sessions().snapshot(chat_id).await.state
}

// ---------- 전송 ----------

#[tokio::test]
async fn test_transfer_flow_sends_lamports() {
    let harness = TestHarness::new().with_wallet().await;

    let prompt = harness.reply_text(callback(USER, "transfer_token")).await;
    assert!(prompt.starts_with("Enter receiver's public key"));
    assert_eq!(state(&harness, USER).await, ConversationState::AwaitingTransferAddress);

    let ask_amount = harness.reply_text(text(USER, RECEIVER)).await;
    assert!(ask_amount.contains(RECEIVER));
    assert_eq!(
        state(&harness, USER).await,
        ConversationState::AwaitingAmount {
            flow: TradeFlow::Transfer,
            address: RECEIVER.to_string(),
        }
    );

    let done = harness.reply_text(text(USER, "1.5")).await;
    assert_eq!(
        done,
        format!("[SOL](https://solscan.io/tx/{}?cluster=devnet) sent successfully", SIGNATURE)
    );
    assert_eq!(state(&harness, USER).await, ConversationState::Idle);

    let wallet = harness.wallet_service.get_wallet(USER).await.unwrap();
    let sender = WalletService::signing_keypair(&wallet).unwrap();
    let transfers = harness.chain.transfers.lock().clone();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].0, sender.pubkey());
    assert_eq!(transfers[0].1.to_string(), RECEIVER);
    assert_eq!(transfers[0].2, 1_500_000_000);
}

#[tokio::test]
async fn test_send_sol_button_starts_transfer_flow() {
    let harness = TestHarness::new().with_wallet().await;

    harness.reply_text(callback(USER, "send_sol")).await;
    assert_eq!(state(&harness, USER).await, ConversationState::AwaitingTransferAddress);

    harness.reply_text(callback(USER, "withdraw_sol")).await;
    assert_eq!(state(&harness, USER).await, ConversationState::AwaitingTransferAddress);
}

#[tokio::test]
async fn test_insufficient_funds_resets_to_idle() {
    let harness = TestHarness::new().with_wallet().await;
    *harness.chain.transfer_result.lock() = Err(ChainError::InsufficientFunds);

    harness.reply_text(callback(USER, "transfer_token")).await;
    harness.reply_text(text(USER, RECEIVER)).await;
    let reply = harness.reply_text(text(USER, "2")).await;

    assert_eq!(reply, "🔴 Insufficient Balance");
    assert_eq!(state(&harness, USER).await, ConversationState::Idle);
}

#[tokio::test]
async fn test_other_rejection_is_technical_issue() {
    let harness = TestHarness::new().with_wallet().await;
    *harness.chain.transfer_result.lock() = Err(ChainError::Rejected("Blockhash not found".into()));

    harness.reply_text(callback(USER, "transfer_token")).await;
    harness.reply_text(text(USER, RECEIVER)).await;
    let reply = harness.reply_text(text(USER, "0.1")).await;

    assert_eq!(reply, "There is some technical issue while sending SOL");
    assert_eq!(state(&harness, USER).await, ConversationState::Idle);
}

#[tokio::test]
async fn test_transfer_without_wallet() {
    let harness = TestHarness::new();

    harness.reply_text(callback(USER, "transfer_token")).await;
    harness.reply_text(text(USER, RECEIVER)).await;
    let reply = harness.reply_text(text(USER, "1")).await;

    assert_eq!(reply, "You don't have any wallet to send SOL");
    assert!(harness.chain.transfers.lock().is_empty());
}

#[tokio::test]
async fn test_zero_amount_keeps_waiting() {
    let harness = TestHarness::new().with_wallet().await;

    harness.reply_text(callback(USER, "transfer_token")).await;
    harness.reply_text(text(USER, RECEIVER)).await;
    let reply = harness.reply_text(text(USER, "0")).await;

    assert!(reply.contains("greater than zero"));
    assert!(harness.chain.transfers.lock().is_empty());
    assert_eq!(
        state(&harness, USER).await.pending_public_key(),
        Some(RECEIVER)
    );
}

#[tokio::test]
async fn test_amount_without_flow() {
    let harness = TestHarness::new().with_wallet().await;

    assert_eq!(
        harness.reply_text(text(USER, "1.5")).await,
        "You have not selected transaction type for the transaction"
    );

    harness.reply_text(callback(USER, "transfer_token")).await;
    assert_eq!(
        harness.reply_text(text(USER, "1.5")).await,
        "No public key has been setup for txn"
    );
    assert!(harness.chain.transfers.lock().is_empty());
}

#[tokio::test]
async fn test_public_key_without_flow() {
    let harness = TestHarness::new();

    let reply = harness.reply_text(text(USER, RECEIVER)).await;
    assert_eq!(
        reply,
        format!(
            "You have not selected transaction type for the specified pubkey: `{}`",
            RECEIVER
        )
    );
    assert_eq!(state(&harness, USER).await, ConversationState::Idle);
}

// ---------- 매수 ----------

#[tokio::test]
async fn test_buy_address_moves_to_amount_and_echoes_key() {
    let harness = TestHarness::new().with_wallet().await;

    let prompt = harness.reply_text(callback(USER, "buy_token")).await;
    assert_eq!(prompt, "Enter token address to continue:");
    assert_eq!(state(&harness, USER).await, ConversationState::AwaitingBuyAddress);

    let replies = harness.handle(text(USER, TOKEN_MINT)).await;
    assert_eq!(replies.len(), 1);
    assert_eq!(
        replies[0].text,
        format!("Enter amount to proceed for token: `{}`", TOKEN_MINT)
    );
    assert_eq!(replies[0].keyboard, Some(buy_menu()));
    assert_eq!(
        state(&harness, USER).await,
        ConversationState::AwaitingAmount {
            flow: TradeFlow::Buy,
            address: TOKEN_MINT.to_string(),
        }
    );
}

#[tokio::test]
async fn test_buy_address_shows_token_card() {
    let harness = TestHarness::new().with_wallet().await;
    *harness.market.token.lock() = Some(TokenInfo {
        name: "USD Coin".to_string(),
        symbol: "USDC".to_string(),
        price_usd: Some("1.0001".to_string()),
        liquidity_usd: Some(1_000_000.0),
        fdv: Some(5_000_000.0),
    });

    harness.reply_text(callback(USER, "buy_token")).await;
    let card = harness.reply_text(text(USER, TOKEN_MINT)).await;

    assert!(card.starts_with("USDC \\- USD Coin"));
    assert!(card.contains("1\\.0001"));
    assert!(card.ends_with(&format!("Enter amount to proceed for token: `{}`", TOKEN_MINT)));
}

#[tokio::test]
async fn test_typed_buy_amount() {
    let harness = TestHarness::new().with_wallet().await;

    harness.reply_text(callback(USER, "buy_token")).await;
    harness.reply_text(text(USER, TOKEN_MINT)).await;
    let reply = harness.reply_text(text(USER, "0.25")).await;

    assert!(reply.ends_with("buy successfully"));
    assert!(reply.contains(SIGNATURE));
    let swaps = harness.swap.swaps.lock().clone();
    assert_eq!(swaps.len(), 1);
    assert_eq!(swaps[0].1.to_string(), TOKEN_MINT);
    assert_eq!(swaps[0].2, 250_000_000);
    assert_eq!(swaps[0].3, 100);
    assert_eq!(state(&harness, USER).await, ConversationState::Idle);
}

#[tokio::test]
async fn test_quick_buy_button() {
    let harness = TestHarness::new().with_wallet().await;

    // 토큰 선택 전에는 매수하지 않음
    let early = harness.reply_text(callback(USER, "buy_0.5_sol")).await;
    assert!(early.starts_with("No token selected"));
    assert!(harness.swap.swaps.lock().is_empty());

    harness.reply_text(callback(USER, "buy_token")).await;
    harness.reply_text(text(USER, TOKEN_MINT)).await;
    let reply = harness.reply_text(callback(USER, "buy_0.5_sol")).await;

    assert!(reply.ends_with("buy successfully"));
    assert_eq!(harness.swap.swaps.lock()[0].2, 500_000_000);
    assert_eq!(state(&harness, USER).await, ConversationState::Idle);
}

#[tokio::test]
async fn test_buy_insufficient_funds() {
    let harness = TestHarness::new().with_wallet().await;
    *harness.swap.result.lock() = Some(SwapError::Submission(ChainError::InsufficientFunds));

    harness.reply_text(callback(USER, "buy_token")).await;
    harness.reply_text(text(USER, TOKEN_MINT)).await;

    assert_eq!(harness.reply_text(text(USER, "1")).await, "🔴 Insufficient Balance");
    assert_eq!(state(&harness, USER).await, ConversationState::Idle);
}

#[tokio::test]
async fn test_buy_quote_failure() {
    let harness = TestHarness::new().with_wallet().await;
    *harness.swap.result.lock() = Some(SwapError::Quote("no route".into()));

    harness.reply_text(callback(USER, "buy_token")).await;
    harness.reply_text(text(USER, TOKEN_MINT)).await;

    assert_eq!(
        harness.reply_text(text(USER, "1")).await,
        "There is some technical issue while buying the token"
    );
}

#[tokio::test]
async fn test_restart_flow_from_any_state() {
    let harness = TestHarness::new().with_wallet().await;

    harness.reply_text(callback(USER, "transfer_token")).await;
    harness.reply_text(text(USER, RECEIVER)).await;
    harness.reply_text(callback(USER, "buy_token")).await;

    assert_eq!(state(&harness, USER).await, ConversationState::AwaitingBuyAddress);
}

// ---------- 기타 입력 / 명령 ----------

#[tokio::test]
async fn test_start_command_shows_main_menu() {
    let harness = TestHarness::new();
    harness.reply_text(callback(USER, "buy_token")).await;

    let replies = harness.handle(command(USER, "start", "")).await;
    assert_eq!(replies.len(), 1);
    assert_eq!(replies[0].text, "Hello\\! This is Crypto Bot\\.");
    assert_eq!(replies[0].keyboard, Some(main_menu()));
    assert_eq!(state(&harness, USER).await, ConversationState::Idle);
}

#[tokio::test]
async fn test_wallet_button_edits_message() {
    let harness = TestHarness::new();

    let replies = harness.handle(callback(USER, "wallet")).await;
    assert_eq!(replies[0].text, "Manage Wallet");
    assert_eq!(replies[0].edit_message_id, Some(42));
}

#[tokio::test]
async fn test_private_text_echoed() {
    let harness = TestHarness::new();
    assert_eq!(harness.reply_text(text(USER, "hello bot!")).await, "hello bot\\!");
}

#[tokio::test]
async fn test_group_text_ignored() {
    let harness = TestHarness::new();
    assert!(harness.handle(text(GROUP_CHAT, "hello")).await.is_empty());
    assert!(harness.handle(text(GROUP_CHAT, "1.5")).await.is_empty());
}

#[tokio::test]
async fn test_percentage_acknowledged() {
    let harness = TestHarness::new();
    assert_eq!(
        harness.reply_text(text(USER, "25%")).await,
        "Percentage set to 25\\% SOL"
    );
}

#[tokio::test]
async fn test_sessions_are_isolated_per_chat() {
    let harness = TestHarness::new();
    harness.reply_text(callback(USER, "buy_token")).await;

    assert_eq!(state(&harness, USER).await, ConversationState::AwaitingBuyAddress);
    assert_eq!(state(&harness, USER + 1).await, ConversationState::Idle);
}

#[tokio::test]
async fn test_status_command() {
    let harness = TestHarness::new();

    assert!(harness
        .reply_text(command(USER, "status", ""))
        .await
        .starts_with("Usage"));
    assert!(harness
        .reply_text(command(USER, "status", "abc"))
        .await
        .contains("not a valid transaction signature"));
    assert!(harness
        .reply_text(command(USER, "status", SIGNATURE))
        .await
        .contains("not found yet"));

    *harness.chain.status.lock() = Ok(Some(TransactionStatus::Succeeded));
    assert_eq!(
        harness.reply_text(command(USER, "status", SIGNATURE)).await,
        "✅ Transaction confirmed"
    );
}

#[tokio::test]
async fn test_unknown_command_and_callback_ignored() {
    let harness = TestHarness::new();
    assert!(harness.handle(command(USER, "help", "")).await.is_empty());
    assert!(harness.handle(callback(USER, "sell_token")).await.is_empty());
}

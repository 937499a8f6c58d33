use crate::shared::utils::LAMPORTS_PER_SOL;

/// 인라인 버튼 액션 (callback_data 토큰과 1:1)
/// Closed set of inline-button actions, each with a stable callback token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    BuyToken,
    Positions,
    Wallet,
    Settings,
    TransferToken,
    GenerateWallet,
    ExportPrivateKey,
    GetBalance,
    WithdrawSol,
    SendSol,
    BackToMain,
    /// Fixed-amount buy from the token card
    QuickBuy(QuickBuyAmount),
    /// Prompt for a typed buy amount
    BuyCustomAmount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickBuyAmount {
    TenthSol,
    HalfSol,
    OneSol,
}

impl QuickBuyAmount {
    pub fn lamports(&self) -> u64 {
        match self {
            QuickBuyAmount::TenthSol => LAMPORTS_PER_SOL / 10,
            QuickBuyAmount::HalfSol => LAMPORTS_PER_SOL / 2,
            QuickBuyAmount::OneSol => LAMPORTS_PER_SOL,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QuickBuyAmount::TenthSol => "0.1 SOL",
            QuickBuyAmount::HalfSol => "0.5 SOL",
            QuickBuyAmount::OneSol => "1 SOL",
        }
    }
}

impl CallbackAction {
    pub const ALL: [CallbackAction; 15] = [
        CallbackAction::BuyToken,
        CallbackAction::Positions,
        CallbackAction::Wallet,
        CallbackAction::Settings,
        CallbackAction::TransferToken,
        CallbackAction::GenerateWallet,
        CallbackAction::ExportPrivateKey,
        CallbackAction::GetBalance,
        CallbackAction::WithdrawSol,
        CallbackAction::SendSol,
        CallbackAction::BackToMain,
        CallbackAction::QuickBuy(QuickBuyAmount::TenthSol),
        CallbackAction::QuickBuy(QuickBuyAmount::HalfSol),
        CallbackAction::QuickBuy(QuickBuyAmount::OneSol),
        CallbackAction::BuyCustomAmount,
    ];

    /// callback_data로 보내는 토큰
    pub fn token(&self) -> &'static str {
        match self {
            CallbackAction::BuyToken => "buy_token",
            CallbackAction::Positions => "positions",
            CallbackAction::Wallet => "wallet",
            CallbackAction::Settings => "settings",
            CallbackAction::TransferToken => "transfer_token",
            CallbackAction::GenerateWallet => "generate_wallet",
            CallbackAction::ExportPrivateKey => "export_private_key",
            CallbackAction::GetBalance => "get_balance",
            CallbackAction::WithdrawSol => "withdraw_sol",
            CallbackAction::SendSol => "send_sol",
            CallbackAction::BackToMain => "back_to_main",
            CallbackAction::QuickBuy(QuickBuyAmount::TenthSol) => "buy_0.1_sol",
            CallbackAction::QuickBuy(QuickBuyAmount::HalfSol) => "buy_0.5_sol",
            CallbackAction::QuickBuy(QuickBuyAmount::OneSol) => "buy_1_sol",
            CallbackAction::BuyCustomAmount => "buy_x_sol",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|action| action.token() == token)
    }
}

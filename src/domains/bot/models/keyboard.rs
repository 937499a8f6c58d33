use super::callback::{CallbackAction, QuickBuyAmount};
use super::telegram::{InlineKeyboardButton, InlineKeyboardMarkup};

fn button(label: &str, action: CallbackAction) -> InlineKeyboardButton {
    InlineKeyboardButton {
        text: label.to_string(),
        callback_data: action.token().to_string(),
    }
}

/// 메인 메뉴
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![
                button("Buy Tokens", CallbackAction::BuyToken),
                button("Positions", CallbackAction::Positions),
            ],
            vec![
                button("Wallet", CallbackAction::Wallet),
                button("Settings", CallbackAction::Settings),
            ],
            vec![button("Transfer Token", CallbackAction::TransferToken)],
        ],
    }
}

/// 지갑 서브메뉴
pub fn wallet_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![button("Generate Wallet", CallbackAction::GenerateWallet)],
            vec![
                button("Export Private Key", CallbackAction::ExportPrivateKey),
                button("Check Balance", CallbackAction::GetBalance),
            ],
            vec![
                button("Withdraw SOL", CallbackAction::WithdrawSol),
                button("Send SOL", CallbackAction::SendSol),
            ],
            vec![button("Back", CallbackAction::BackToMain)],
        ],
    }
}

/// 토큰 카드 아래 매수 버튼
pub fn buy_menu() -> InlineKeyboardMarkup {
    let quick = |amount: QuickBuyAmount| button(amount.label(), CallbackAction::QuickBuy(amount));
    InlineKeyboardMarkup {
        inline_keyboard: vec![
            vec![quick(QuickBuyAmount::TenthSol), quick(QuickBuyAmount::HalfSol)],
            vec![
                quick(QuickBuyAmount::OneSol),
                button("Buy with X SOL", CallbackAction::BuyCustomAmount),
            ],
        ],
    }
}

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};

/// 1 SOL = 1,000,000,000 lamports
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// 사용자 입력(SOL)을 lamports로 변환
/// Converts a decimal SOL amount typed by the user into lamports.
///
/// Digits past the ninth decimal place are truncated. Returns None when the
/// text is not a decimal number or the result does not fit in a u64.
pub fn sol_to_lamports(text: &str) -> Option<u64> {
    let text = text.trim();
    let normalized = if text.starts_with('.') {
        format!("0{}", text)
    } else {
        text.to_string()
    };

    let sol = Decimal::from_str(&normalized).ok()?;
    if sol.is_sign_negative() {
        return None;
    }
    let lamports = sol.checked_mul(Decimal::from(LAMPORTS_PER_SOL))?;
    lamports.trunc().to_u64()
}

/// lamports를 SOL로 변환 (소수점 둘째 자리 올림)
/// Balance in SOL, rounded up to two decimals for display
pub fn lamports_to_sol_display(lamports: u64) -> Decimal {
    let sol = Decimal::from(lamports) / Decimal::from(LAMPORTS_PER_SOL);
    round_up_cents(sol)
}

/// USD 환산 (소수점 둘째 자리 올림)
pub fn usd_value(sol: Decimal, usd_price: f64) -> Option<Decimal> {
    let price = Decimal::from_f64(usd_price)?;
    Some(round_up_cents(sol.checked_mul(price)?))
}

fn round_up_cents(value: Decimal) -> Decimal {
    value
        .round_dp_with_strategy(2, RoundingStrategy::AwayFromZero)
        .normalize()
}

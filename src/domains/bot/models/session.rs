/// 진행 중인 거래 흐름
/// Which multi-step flow an address/amount belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeFlow {
    /// SOL -> token swap
    Buy,
    /// Native SOL transfer
    Transfer,
}

/// 채팅별 대화 상태
/// Per-chat conversation state
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingBuyAddress,
    AwaitingTransferAddress,
    AwaitingAmount { flow: TradeFlow, address: String },
}

impl ConversationState {
    /// Flow selected by the user, if any.
    pub fn flow(&self) -> Option<TradeFlow> {
        match self {
            ConversationState::Idle => None,
            ConversationState::AwaitingBuyAddress => Some(TradeFlow::Buy),
            ConversationState::AwaitingTransferAddress => Some(TradeFlow::Transfer),
            ConversationState::AwaitingAmount { flow, .. } => Some(*flow),
        }
    }

    pub fn pending_public_key(&self) -> Option<&str> {
        match self {
            ConversationState::AwaitingAmount { address, .. } => Some(address),
            _ => None,
        }
    }
}

/// 채팅 세션 (메모리에만 존재, 재시작 시 초기화)
/// Transient session of one chat; lost on restart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatSession {
    pub state: ConversationState,
}

impl ChatSession {
    pub fn reset(&mut self) {
        self.state = ConversationState::Idle;
    }
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 單程票基本票價
pub const DEFAULT_TICKET_PRICE: f64 = 2.0;

pub const DEFAULT_DISCOUNT: f64 = 0.0;

/// 新卡的季票到期日，位於遙遠過去，代表「沒有有效季票」
pub const NO_SEASONAL_PASS: DateTime<Utc> = DateTime::<Utc>::UNIX_EPOCH;

/// Result of a single ride attempt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TicketOutcome {
    /// Covered by an active seasonal pass, nothing was charged.
    SeasonalPass,
    PaidFromBalance { price: f64, remaining: f64 },
    InsufficientFunds { price: f64, balance: f64 },
}

impl TicketOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, TicketOutcome::InsufficientFunds { .. })
    }
}

/// Point-in-time view of a card, used for reporting only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardSnapshot {
    pub balance: f64,
    pub discount: f64,
    pub basic_ticket_price: f64,
    pub actual_ticket_price: f64,
    pub seasonal_expiry: DateTime<Utc>,
    pub has_seasonal_pass: bool,
}

use crate::adapters::clock::SystemClock;
use crate::domain::model::{
    CardSnapshot, TicketOutcome, DEFAULT_DISCOUNT, DEFAULT_TICKET_PRICE, NO_SEASONAL_PASS,
};
use crate::domain::ports::{Clock, TravelCard};
use chrono::{DateTime, Duration, Utc};

/// A public-transport fare card holding a cash balance, a discount rate and
/// the expiry of its seasonal pass.
#[derive(Debug, Clone)]
pub struct FareCard<C: Clock = SystemClock> {
    balance: f64,
    basic_ticket_price: f64,
    discount: f64,
    seasonal_expiry: DateTime<Utc>,
    clock: C,
}

impl FareCard<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl Default for FareCard<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C: Clock> FareCard<C> {
    pub fn with_clock(clock: C) -> Self {
        Self {
            balance: 0.0,
            basic_ticket_price: DEFAULT_TICKET_PRICE,
            discount: DEFAULT_DISCOUNT,
            seasonal_expiry: NO_SEASONAL_PASS,
            clock,
        }
    }

    /// 設定基本票價，只能在建立時指定
    pub fn with_ticket_price(mut self, price: f64) -> Self {
        self.basic_ticket_price = price;
        self
    }

    pub fn basic_ticket_price(&self) -> f64 {
        self.basic_ticket_price
    }

    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Price of one value ticket after the discount. Also used as the price
    /// of one seasonal day.
    pub fn actual_ticket_price(&self) -> f64 {
        self.basic_ticket_price * (1.0 - self.discount)
    }

    pub fn has_valid_seasonal_ticket(&self) -> bool {
        self.seasonal_pass_active_at(self.clock.now())
    }

    fn seasonal_pass_active_at(&self, now: DateTime<Utc>) -> bool {
        self.seasonal_expiry > now
    }
}

/// now + days，超出 chrono 範圍時取極值
fn add_days(now: DateTime<Utc>, days: i32) -> DateTime<Utc> {
    now.checked_add_signed(Duration::days(i64::from(days)))
        .unwrap_or(if days < 0 {
            DateTime::<Utc>::MIN_UTC
        } else {
            DateTime::<Utc>::MAX_UTC
        })
}

impl<C: Clock> TravelCard for FareCard<C> {
    fn ride(&mut self) -> TicketOutcome {
        let now = self.clock.now();
        if self.seasonal_pass_active_at(now) {
            tracing::debug!("Ride covered by seasonal pass until {}", self.seasonal_expiry);
            return TicketOutcome::SeasonalPass;
        }

        let price = self.actual_ticket_price();
        if self.balance >= price {
            self.balance -= price;
            tracing::debug!("Ride paid: {:.2}, remaining balance {:.2}", price, self.balance);
            TicketOutcome::PaidFromBalance {
                price,
                remaining: self.balance,
            }
        } else {
            tracing::debug!(
                "Ride refused: price {:.2} exceeds balance {:.2}",
                price,
                self.balance
            );
            TicketOutcome::InsufficientFunds {
                price,
                balance: self.balance,
            }
        }
    }

    fn buy_seasonal_ticket_for_days(&mut self, for_days: i32) {
        // 不疊加：一律從現在重新計算
        self.seasonal_expiry = add_days(self.clock.now(), for_days);
        tracing::debug!(
            "Seasonal pass bought for {} days, expires {}",
            for_days,
            self.seasonal_expiry
        );
    }

    fn buy_seasonal_ticket_for_amount(&mut self, for_amount: f64) {
        // `as` truncates toward zero; NaN becomes 0 and infinities saturate
        let days = (for_amount / self.actual_ticket_price()) as i32;
        tracing::debug!("Amount {:.2} converts to {} seasonal days", for_amount, days);
        self.buy_seasonal_ticket_for_days(days);
    }

    fn seasonal_expiry_date(&self) -> DateTime<Utc> {
        self.seasonal_expiry
    }

    fn extend_balance(&mut self, with_amount: f64) {
        self.balance += with_amount;
        tracing::debug!("Balance extended by {:.2} to {:.2}", with_amount, self.balance);
    }

    fn balance(&self) -> f64 {
        self.balance
    }

    fn set_discount(&mut self, discount_value: f64) {
        if (0.0..=1.0).contains(&discount_value) {
            self.discount = discount_value;
            tracing::debug!("Discount set to {}", discount_value);
        } else {
            tracing::debug!("Ignoring out-of-range discount {}", discount_value);
        }
    }

    fn snapshot(&self) -> CardSnapshot {
        CardSnapshot {
            balance: self.balance,
            discount: self.discount,
            basic_ticket_price: self.basic_ticket_price,
            actual_ticket_price: self.actual_ticket_price(),
            seasonal_expiry: self.seasonal_expiry,
            has_seasonal_pass: self.has_valid_seasonal_ticket(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::{FixedClock, ManualClock};
    use chrono::TimeZone;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2016, 1, 30, 9, 15, 0).unwrap()
    }

    fn card() -> FareCard<FixedClock> {
        FareCard::with_clock(FixedClock::new(start()))
    }

    #[test]
    fn test_new_card_defaults() {
        let card = card();
        assert_eq!(card.balance(), 0.0);
        assert_eq!(card.discount(), 0.0);
        assert_eq!(card.basic_ticket_price(), 2.0);
        assert_eq!(card.seasonal_expiry_date(), NO_SEASONAL_PASS);
        assert!(!card.has_valid_seasonal_ticket());
    }

    #[test]
    fn test_ride_reports_outcome() {
        let mut card = card();
        assert_eq!(
            card.ride(),
            TicketOutcome::InsufficientFunds {
                price: 2.0,
                balance: 0.0
            }
        );

        card.extend_balance(3.0);
        assert_eq!(
            card.ride(),
            TicketOutcome::PaidFromBalance {
                price: 2.0,
                remaining: 1.0
            }
        );

        card.buy_seasonal_ticket_for_days(1);
        assert_eq!(card.ride(), TicketOutcome::SeasonalPass);
        assert_eq!(card.balance(), 1.0);
    }

    #[test]
    fn test_exact_balance_is_enough() {
        let mut card = card();
        card.extend_balance(2.0);
        assert!(card.buy_ticket());
        assert_eq!(card.balance(), 0.0);
    }

    #[test]
    fn test_seasonal_purchase_resets_instead_of_stacking() {
        let mut card = card();
        card.buy_seasonal_ticket_for_days(10);
        card.buy_seasonal_ticket_for_days(2);
        assert_eq!(card.seasonal_expiry_date(), start() + Duration::days(2));
    }

    #[test]
    fn test_negative_days_expire_pass() {
        let mut card = card();
        card.buy_seasonal_ticket_for_days(5);
        card.buy_seasonal_ticket_for_days(-1);
        assert_eq!(card.seasonal_expiry_date(), start() - Duration::days(1));
        assert!(!card.has_valid_seasonal_ticket());
        assert!(!card.buy_ticket());
    }

    #[test]
    fn test_zero_days_is_not_active() {
        let mut card = card();
        card.buy_seasonal_ticket_for_days(0);
        // expiry == now，必須嚴格晚於現在才算有效
        assert_eq!(card.seasonal_expiry_date(), start());
        assert!(!card.has_valid_seasonal_ticket());
    }

    #[test]
    fn test_pass_expires_as_time_moves() {
        let clock = ManualClock::new(start());
        let mut card = FareCard::with_clock(clock.clone());
        card.buy_seasonal_ticket_for_days(3);

        clock.advance(Duration::days(3) - Duration::seconds(1));
        assert!(card.buy_ticket());

        clock.advance(Duration::seconds(1));
        assert!(!card.buy_ticket());
    }

    #[test]
    fn test_amount_truncates_toward_zero() {
        let mut card = card();
        card.buy_seasonal_ticket_for_amount(5.9);
        assert_eq!(card.seasonal_expiry_date(), start() + Duration::days(2));

        card.buy_seasonal_ticket_for_amount(-3.9);
        assert_eq!(card.seasonal_expiry_date(), start() - Duration::days(1));
    }

    #[test]
    fn test_amount_uses_discounted_day_price() {
        let mut card = card();
        card.set_discount(0.5);
        card.buy_seasonal_ticket_for_amount(10.0);
        assert_eq!(card.seasonal_expiry_date(), start() + Duration::days(10));
    }

    #[test]
    fn test_full_discount_saturates_expiry() {
        let mut card = card();
        card.set_discount(1.0);
        assert_eq!(card.actual_ticket_price(), 0.0);
        assert!(card.buy_ticket());

        card.buy_seasonal_ticket_for_amount(1.0);
        assert_eq!(card.seasonal_expiry_date(), DateTime::<Utc>::MAX_UTC);

        // 0 / 0 為 NaN，轉成 0 天
        card.buy_seasonal_ticket_for_amount(0.0);
        assert_eq!(card.seasonal_expiry_date(), start());
    }

    #[test]
    fn test_set_discount_bounds() {
        let mut card = card();
        card.set_discount(0.25);
        card.set_discount(-0.1);
        card.set_discount(1.0001);
        card.set_discount(f64::NAN);
        assert_eq!(card.discount(), 0.25);

        card.set_discount(0.0);
        assert_eq!(card.discount(), 0.0);
        card.set_discount(1.0);
        assert_eq!(card.discount(), 1.0);
    }

    #[test]
    fn test_extend_balance_accepts_negative() {
        let mut card = card();
        card.extend_balance(-5.0);
        assert_eq!(card.balance(), -5.0);
        assert!(!card.buy_ticket());
        assert_eq!(card.balance(), -5.0);
    }

    #[test]
    fn test_custom_ticket_price() {
        let mut card = card().with_ticket_price(3.0);
        card.extend_balance(7.0);
        assert!(card.buy_ticket());
        assert!(card.buy_ticket());
        assert!(!card.buy_ticket());
        assert_eq!(card.balance(), 1.0);
    }

    #[test]
    fn test_snapshot() {
        let mut card = card();
        card.set_discount(0.5);
        card.extend_balance(4.0);
        card.buy_seasonal_ticket_for_days(1);

        let snapshot = card.snapshot();
        assert_eq!(snapshot.balance, 4.0);
        assert_eq!(snapshot.discount, 0.5);
        assert_eq!(snapshot.basic_ticket_price, 2.0);
        assert_eq!(snapshot.actual_ticket_price, 1.0);
        assert_eq!(snapshot.seasonal_expiry, start() + Duration::days(1));
        assert!(snapshot.has_seasonal_pass);
    }

    #[test]
    fn test_add_days_saturates() {
        assert_eq!(add_days(start(), i32::MAX), DateTime::<Utc>::MAX_UTC);
        assert_eq!(add_days(start(), i32::MIN), DateTime::<Utc>::MIN_UTC);
    }
}

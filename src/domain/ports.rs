use crate::domain::model::{CardSnapshot, TicketOutcome};
use chrono::{DateTime, Utc};

/// Source of the current moment.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Contract of a public-transport travel card.
///
/// Every operation is total: none of them fail. A ride that cannot be paid
/// for is reported through the return value, and an out-of-range discount is
/// ignored without notice.
pub trait TravelCard {
    /// Uses a ride. An active seasonal pass is always preferred over the balance.
    fn buy_ticket(&mut self) -> bool {
        self.ride().is_success()
    }

    /// Same as [`TravelCard::buy_ticket`], but reports how the ride was covered.
    fn ride(&mut self) -> TicketOutcome;

    /// Replaces the seasonal expiry with now + `for_days` days.
    fn buy_seasonal_ticket_for_days(&mut self, for_days: i32);

    /// Converts `for_amount` into whole days at the current ticket price.
    fn buy_seasonal_ticket_for_amount(&mut self, for_amount: f64);

    fn seasonal_expiry_date(&self) -> DateTime<Utc>;

    fn extend_balance(&mut self, with_amount: f64);

    fn balance(&self) -> f64;

    /// Accepts values in [0.0, 1.0]; anything else leaves the discount untouched.
    fn set_discount(&mut self, discount_value: f64);

    fn snapshot(&self) -> CardSnapshot;
}

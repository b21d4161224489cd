pub mod card;

pub use crate::domain::model::{CardSnapshot, TicketOutcome};
pub use crate::domain::ports::{Clock, TravelCard};
pub use crate::utils::error::Result;

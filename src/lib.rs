pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::clock::{FixedClock, ManualClock, SystemClock};
pub use app::session::{Command, CommandOutput, Session};
pub use config::toml_config::CardConfig;
pub use core::card::FareCard;
pub use domain::model::{CardSnapshot, TicketOutcome};
pub use domain::ports::{Clock, TravelCard};
pub use utils::error::{FareCardError, Result};

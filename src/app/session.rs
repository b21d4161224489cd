use crate::domain::model::{CardSnapshot, TicketOutcome};
use crate::domain::ports::TravelCard;
use crate::utils::error::{FareCardError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// One operation against a card, in the textual form the CLI accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Ticket,
    Balance,
    Expiry,
    Status,
    Extend(f64),
    Discount(f64),
    SeasonDays(i32),
    SeasonAmount(f64),
}

fn parse_arg<T: FromStr>(input: &str, arg: Option<&str>, what: &str) -> Result<T> {
    let arg = arg.ok_or_else(|| FareCardError::invalid_command(input, format!("missing {}", what)))?;
    arg.parse::<T>()
        .map_err(|_| FareCardError::invalid_command(input, format!("'{}' is not a valid {}", arg, what)))
}

impl FromStr for Command {
    type Err = FareCardError;

    fn from_str(input: &str) -> Result<Self> {
        let mut parts = input.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| FareCardError::invalid_command(input, "empty command"))?;
        let arg = parts.next();

        let command = match name.to_ascii_lowercase().as_str() {
            "ticket" | "ride" => Command::Ticket,
            "balance" => Command::Balance,
            "expiry" => Command::Expiry,
            "status" => Command::Status,
            "extend" => Command::Extend(parse_arg(input, arg, "amount")?),
            "discount" => Command::Discount(parse_arg(input, arg, "fraction")?),
            "season-days" => Command::SeasonDays(parse_arg(input, arg, "number of days")?),
            "season-amount" => Command::SeasonAmount(parse_arg(input, arg, "amount")?),
            other => {
                return Err(FareCardError::invalid_command(
                    input,
                    format!("unknown command '{}'", other),
                ))
            }
        };

        // 無參數的指令不接受多餘參數
        if parts.next().is_some()
            || (arg.is_some()
                && matches!(
                    command,
                    Command::Ticket | Command::Balance | Command::Expiry | Command::Status
                ))
        {
            return Err(FareCardError::invalid_command(input, "too many arguments"));
        }

        Ok(command)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutput {
    Ticket {
        accepted: bool,
        #[serde(flatten)]
        outcome: TicketOutcome,
    },
    Balance {
        balance: f64,
    },
    Expiry {
        seasonal_expiry: DateTime<Utc>,
    },
    Status(CardSnapshot),
    Done {
        command: String,
    },
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Ticket { outcome, .. } => match outcome {
                TicketOutcome::SeasonalPass => write!(f, "✅ Ticket accepted (seasonal pass)"),
                TicketOutcome::PaidFromBalance { price, remaining } => write!(
                    f,
                    "✅ Ticket accepted, paid {:.2}, balance {:.2}",
                    price, remaining
                ),
                TicketOutcome::InsufficientFunds { price, balance } => write!(
                    f,
                    "❌ Ticket refused, price {:.2} exceeds balance {:.2}",
                    price, balance
                ),
            },
            CommandOutput::Balance { balance } => write!(f, "💰 Balance: {:.2}", balance),
            CommandOutput::Expiry { seasonal_expiry } => {
                write!(f, "📅 Seasonal expiry: {}", seasonal_expiry.to_rfc3339())
            }
            CommandOutput::Status(s) => write!(
                f,
                "💳 Balance {:.2} | discount {} | ticket {:.2} (base {:.2}) | seasonal pass {} until {}",
                s.balance,
                s.discount,
                s.actual_ticket_price,
                s.basic_ticket_price,
                if s.has_seasonal_pass { "active" } else { "inactive" },
                s.seasonal_expiry.to_rfc3339()
            ),
            CommandOutput::Done { command } => write!(f, "✔ {}", command),
        }
    }
}

/// Runs commands one after another against a single card.
pub struct Session<T: TravelCard> {
    card: T,
}

impl<T: TravelCard> Session<T> {
    pub fn new(card: T) -> Self {
        Self { card }
    }

    pub fn card(&self) -> &T {
        &self.card
    }

    pub fn into_card(self) -> T {
        self.card
    }

    pub fn execute(&mut self, command: &Command) -> CommandOutput {
        tracing::debug!("Executing {:?}", command);

        match *command {
            Command::Ticket => {
                let outcome = self.card.ride();
                CommandOutput::Ticket {
                    accepted: outcome.is_success(),
                    outcome,
                }
            }
            Command::Balance => CommandOutput::Balance {
                balance: self.card.balance(),
            },
            Command::Expiry => CommandOutput::Expiry {
                seasonal_expiry: self.card.seasonal_expiry_date(),
            },
            Command::Status => CommandOutput::Status(self.card.snapshot()),
            Command::Extend(amount) => {
                self.card.extend_balance(amount);
                CommandOutput::Done {
                    command: format!("extend {}", amount),
                }
            }
            Command::Discount(value) => {
                // 超出範圍時卡片會靜默忽略
                self.card.set_discount(value);
                CommandOutput::Done {
                    command: format!("discount {}", value),
                }
            }
            Command::SeasonDays(days) => {
                self.card.buy_seasonal_ticket_for_days(days);
                CommandOutput::Done {
                    command: format!("season-days {}", days),
                }
            }
            Command::SeasonAmount(amount) => {
                self.card.buy_seasonal_ticket_for_amount(amount);
                CommandOutput::Done {
                    command: format!("season-amount {}", amount),
                }
            }
        }
    }

    /// Parses and executes each non-empty, non-comment line. Stops at the
    /// first line that does not parse.
    pub fn run_script<'a, I>(&mut self, lines: I) -> Result<Vec<CommandOutput>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut outputs = Vec::new();
        for line in lines {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let command: Command = line.parse()?;
            outputs.push(self.execute(&command));
        }
        tracing::info!("📊 Executed {} commands", outputs.len());
        Ok(outputs)
    }
}

use crate::core::card::FareCard;
use crate::domain::model::{DEFAULT_DISCOUNT, DEFAULT_TICKET_PRICE};
use crate::domain::ports::{Clock, TravelCard};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CardConfig {
    #[serde(default)]
    pub card: CardSection,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSection {
    #[serde(default = "default_ticket_price")]
    pub ticket_price: f64,
    #[serde(default)]
    pub initial_balance: f64,
    #[serde(default = "default_discount")]
    pub discount: f64,
}

impl Default for CardSection {
    fn default() -> Self {
        Self {
            ticket_price: DEFAULT_TICKET_PRICE,
            initial_balance: 0.0,
            discount: DEFAULT_DISCOUNT,
        }
    }
}

fn default_ticket_price() -> f64 {
    DEFAULT_TICKET_PRICE
}

fn default_discount() -> f64 {
    DEFAULT_DISCOUNT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl CardConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${CARD_DISCOUNT})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        // 使用正規表達式匹配 ${VAR_NAME} 格式
        let re = Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is valid");

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    /// 依配置建立一張卡片
    pub fn build_card<C: Clock>(&self, clock: C) -> FareCard<C> {
        let mut card = FareCard::with_clock(clock).with_ticket_price(self.card.ticket_price);
        card.set_discount(self.card.discount);
        if self.card.initial_balance != 0.0 {
            card.extend_balance(self.card.initial_balance);
        }
        card
    }
}

impl Validate for CardConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_positive_amount("card.ticket_price", self.card.ticket_price)?;
        validation::validate_finite("card.initial_balance", self.card.initial_balance)?;
        validation::validate_range("card.discount", self.card.discount, 0.0, 1.0)?;

        if let Some(level) = self.log_level() {
            validation::validate_log_level("logging.level", level)?;
        }

        Ok(())
    }
}

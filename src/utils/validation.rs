use crate::utils::error::{FareCardError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_finite(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(FareCardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_amount(field_name: &str, value: f64) -> Result<()> {
    validate_finite(field_name, value)?;
    if value <= 0.0 {
        return Err(FareCardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be greater than 0".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    // NaN 與任何值比較皆為 false，需用 !(..) 形式才會被擋下
    if !(value >= min && value <= max) {
        return Err(FareCardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_log_level(field_name: &str, level: &str) -> Result<()> {
    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&level) {
        return Err(FareCardError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: level.to_string(),
            reason: format!("Valid levels: {}", valid_levels.join(", ")),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount("card.ticket_price", 2.0).is_ok());
        assert!(validate_positive_amount("card.ticket_price", 0.0).is_err());
        assert!(validate_positive_amount("card.ticket_price", -1.0).is_err());
        assert!(validate_positive_amount("card.ticket_price", f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("card.discount", 0.0, 0.0, 1.0).is_ok());
        assert!(validate_range("card.discount", 1.0, 0.0, 1.0).is_ok());
        assert!(validate_range("card.discount", 1.5, 0.0, 1.0).is_err());
        assert!(validate_range("card.discount", f64::NAN, 0.0, 1.0).is_err());
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_log_level("logging.level", "debug").is_ok());
        assert!(validate_log_level("logging.level", "loud").is_err());
    }
}

use crate::utils::error::{MarketError, Result};
use chrono::NaiveDate;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(MarketError::InvalidFieldValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_amount(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(MarketError::InvalidFieldValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value must be a positive number".to_string(),
        });
    }
    Ok(())
}

pub fn validate_non_negative_amount(field_name: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(MarketError::InvalidFieldValue {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be negative".to_string(),
        });
    }
    Ok(())
}

/// Harvest must fall strictly after sowing.
pub fn validate_date_order(
    field_name: &str,
    earlier: NaiveDate,
    later: NaiveDate,
) -> Result<()> {
    if later <= earlier {
        return Err(MarketError::InvalidFieldValue {
            field: field_name.to_string(),
            value: later.to_string(),
            reason: format!("Date must be after {}", earlier),
        });
    }
    Ok(())
}

pub fn validate_uri(field_name: &str, uri: &str) -> Result<()> {
    match Url::parse(uri) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(MarketError::InvalidFieldValue {
                field: field_name.to_string(),
                value: uri.to_string(),
                reason: format!("Unsupported URI scheme: {}", scheme),
            }),
        },
        Err(e) => Err(MarketError::InvalidFieldValue {
            field: field_name.to_string(),
            value: uri.to_string(),
            reason: format!("Invalid URI format: {}", e),
        }),
    }
}

pub fn validate_uri_list(field_name: &str, uris: &[String], max_len: usize) -> Result<()> {
    if uris.len() > max_len {
        return Err(MarketError::InvalidFieldValue {
            field: field_name.to_string(),
            value: uris.len().to_string(),
            reason: format!("At most {} entries allowed", max_len),
        });
    }

    for uri in uris {
        validate_uri(field_name, uri)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("crop_name", "Rice").is_ok());
        assert!(validate_non_empty_string("crop_name", "").is_err());
        assert!(validate_non_empty_string("crop_name", "   ").is_err());
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount("price", 45000.0).is_ok());
        assert!(validate_positive_amount("price", 0.0).is_err());
        assert!(validate_positive_amount("price", -10.0).is_err());
        assert!(validate_positive_amount("price", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_non_negative_amount() {
        assert!(validate_non_negative_amount("wallet_balance", 0.0).is_ok());
        assert!(validate_non_negative_amount("wallet_balance", -1.0).is_err());
    }

    #[test]
    fn test_validate_date_order() {
        let seed = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let harvest = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(validate_date_order("expected_harvest", seed, harvest).is_ok());
        assert!(validate_date_order("expected_harvest", harvest, seed).is_err());
        assert!(validate_date_order("expected_harvest", seed, seed).is_err());
    }

    #[test]
    fn test_validate_uri_list() {
        let images = vec!["https://images.example.com/tomato.jpg".to_string()];
        assert!(validate_uri_list("images", &images, 5).is_ok());

        let invalid = vec!["not-a-uri".to_string()];
        assert!(validate_uri_list("images", &invalid, 5).is_err());

        let ftp = vec!["ftp://example.com/a.jpg".to_string()];
        assert!(validate_uri_list("images", &ftp, 5).is_err());

        let too_many: Vec<String> = (0..6)
            .map(|i| format!("https://images.example.com/{}.jpg", i))
            .collect();
        assert!(validate_uri_list("images", &too_many, 5).is_err());
    }
}

//! Shipping details and their validation.

use crate::config::DEFAULT_COUNTRY;
use crate::error::{ShippingField, ValidationError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::warn;

/// Where and to whom the order ships.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShippingInfo {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    #[serde(default = "default_country")]
    pub country: String,
}

fn default_country() -> String {
    DEFAULT_COUNTRY.to_string()
}

impl Default for ShippingInfo {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            zip_code: String::new(),
            country: default_country(),
        }
    }
}

impl ShippingInfo {
    /// Value of a required field.
    pub fn field(&self, field: ShippingField) -> &str {
        match field {
            ShippingField::FirstName => &self.first_name,
            ShippingField::LastName => &self.last_name,
            ShippingField::Email => &self.email,
            ShippingField::Phone => &self.phone,
            ShippingField::Address => &self.address,
            ShippingField::City => &self.city,
            ShippingField::State => &self.state,
            ShippingField::ZipCode => &self.zip_code,
        }
    }

    /// Required fields that are empty or whitespace-only, in form order.
    pub fn missing_fields(&self) -> Vec<ShippingField> {
        ShippingField::REQUIRED
            .into_iter()
            .filter(|f| self.field(*f).trim().is_empty())
            .collect()
    }

    /// Get full name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Phone with every non-digit stripped.
    pub fn phone_digits(&self) -> String {
        self.phone.chars().filter(char::is_ascii_digit).collect()
    }

    /// Format as multi-line address block.
    pub fn multi_line(&self) -> String {
        [
            self.full_name(),
            self.address.clone(),
            format!("{}, {} {}", self.city, self.state, self.zip_code),
            self.country.clone(),
        ]
        .join("\n")
    }
}

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

fn email_pattern() -> Option<&'static Regex> {
    static EMAIL: OnceLock<Option<Regex>> = OnceLock::new();
    EMAIL
        .get_or_init(|| {
            Regex::new(EMAIL_PATTERN)
                .map_err(|e| warn!(pattern = EMAIL_PATTERN, error = %e, "Invalid email pattern"))
                .ok()
        })
        .as_ref()
}

/// Check that the shipping form is complete and well-formed.
///
/// Reports every missing field at once; otherwise the first of email and
/// phone that fails.
pub fn validate_shipping(info: &ShippingInfo) -> Result<(), ValidationError> {
    let missing = info.missing_fields();
    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }

    if !email_pattern().is_some_and(|re| re.is_match(&info.email)) {
        return Err(ValidationError::InvalidEmail);
    }

    if info.phone_digits().len() != 10 {
        return Err(ValidationError::InvalidPhone);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> ShippingInfo {
        ShippingInfo {
            first_name: "Asha".into(),
            last_name: "Rao".into(),
            email: "asha@example.com".into(),
            phone: "(555) 123-4567".into(),
            address: "12 MG Road".into(),
            city: "Bengaluru".into(),
            state: "KA".into(),
            zip_code: "560001".into(),
            ..ShippingInfo::default()
        }
    }

    #[test]
    fn test_valid_shipping() {
        assert_eq!(validate_shipping(&valid()), Ok(()));
        assert_eq!(valid().country, "India");
    }

    #[test]
    fn test_missing_fields_enumerated() {
        let mut info = valid();
        info.last_name = "  ".into();
        info.city.clear();
        info.zip_code = "\t".into();
        info.country.clear();

        assert_eq!(
            validate_shipping(&info),
            Err(ValidationError::MissingFields(vec![
                ShippingField::LastName,
                ShippingField::City,
                ShippingField::ZipCode,
            ]))
        );
    }

    #[test]
    fn test_invalid_email() {
        for email in ["asha", "asha@example", "a sha@example.com", "@example.com", "asha@@x.io"] {
            let mut info = valid();
            info.email = email.into();
            assert_eq!(validate_shipping(&info), Err(ValidationError::InvalidEmail), "{email}");
        }
    }

    #[test]
    fn test_invalid_phone() {
        let mut info = valid();
        info.phone = "555-123".into();
        assert_eq!(validate_shipping(&info), Err(ValidationError::InvalidPhone));

        info.phone = "+1 555 123 4567".into();
        assert_eq!(validate_shipping(&info), Err(ValidationError::InvalidPhone));

        info.phone = "555.123.4567".into();
        assert_eq!(validate_shipping(&info), Ok(()));
    }

    #[test]
    fn test_missing_reported_before_format() {
        let mut info = valid();
        info.email = "bad".into();
        info.phone = "1".into();
        info.state.clear();
        assert_eq!(
            validate_shipping(&info),
            Err(ValidationError::MissingFields(vec![ShippingField::State]))
        );
    }

    #[test]
    fn test_formatting() {
        let info = valid();
        assert_eq!(info.full_name(), "Asha Rao");
        assert_eq!(info.phone_digits(), "5551234567");
        assert!(info.multi_line().contains("Bengaluru, KA 560001"));
    }

    #[test]
    fn test_default_country_matches_store() {
        assert!(email_pattern().is_some());
        assert_eq!(
            ShippingInfo::default().country,
            crate::config::StoreConfig::default().default_country
        );
        let parsed: ShippingInfo = serde_json::from_str(
            r#"{"firstName":"A","lastName":"B","email":"a@b.co","phone":"5551234567",
                "address":"x","city":"y","state":"z","zipCode":"1"}"#,
        )
        .unwrap();
        assert_eq!(parsed.country, DEFAULT_COUNTRY);
    }
}

//! Checkout form validation.
//!
//! Checkout is simulated: a complete form yields an [`OrderSummary`] whose
//! confirmation message is shown to the shopper, and nothing is recorded.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Fields that must be non-empty for checkout to proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RequiredField {
    FullName,
    Email,
    ShippingAddress,
    City,
    PostalCode,
    Country,
}

impl RequiredField {
    /// All required fields, in form order.
    pub const ALL: [Self; 6] = [
        Self::FullName,
        Self::Email,
        Self::ShippingAddress,
        Self::City,
        Self::PostalCode,
        Self::Country,
    ];

    /// Human-readable label for the field.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::FullName => "Full name",
            Self::Email => "Email",
            Self::ShippingAddress => "Shipping address",
            Self::City => "City",
            Self::PostalCode => "Postal code",
            Self::Country => "Country",
        }
    }
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that block checkout submission.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// One or more required fields were left empty.
    #[error("Please fill in all required fields.")]
    MissingFields(Vec<RequiredField>),
}

/// The checkout form as submitted.
///
/// Fields that are absent from the submission deserialize as empty strings
/// so they surface as validation errors rather than decode failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct CheckoutForm {
    pub full_name: String,
    pub email: String,
    pub shipping_address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    /// Simulated card number. Collected but never used.
    pub card_number: String,
}

impl CheckoutForm {
    fn value(&self, field: RequiredField) -> &str {
        match field {
            RequiredField::FullName => &self.full_name,
            RequiredField::Email => &self.email,
            RequiredField::ShippingAddress => &self.shipping_address,
            RequiredField::City => &self.city,
            RequiredField::PostalCode => &self.postal_code,
            RequiredField::Country => &self.country,
        }
    }

    /// Returns the required fields that are empty, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<RequiredField> {
        RequiredField::ALL
            .into_iter()
            .filter(|field| self.value(*field).is_empty())
            .collect()
    }

    /// Validate the form and produce the order summary.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::MissingFields`] if any required field is empty.
    pub fn validate(&self) -> Result<OrderSummary, CheckoutError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(CheckoutError::MissingFields(missing));
        }

        Ok(OrderSummary {
            full_name: self.full_name.clone(),
            email: self.email.clone(),
            shipping_address: self.shipping_address.clone(),
            city: self.city.clone(),
            postal_code: self.postal_code.clone(),
            country: self.country.clone(),
        })
    }
}

/// A validated, simulated order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSummary {
    pub full_name: String,
    pub email: String,
    pub shipping_address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl OrderSummary {
    /// The confirmation shown to the shopper once the order is placed.
    #[must_use]
    pub fn confirmation_message(&self) -> String {
        format!(
            "Thank you for your order, {}! Your order has been placed and will be shipped to: \
             {}, {}, {}, {}. A confirmation email will be sent to {}.",
            self.full_name,
            self.shipping_address,
            self.city,
            self.postal_code,
            self.country,
            self.email,
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn complete_form() -> CheckoutForm {
        CheckoutForm {
            full_name: "Asha Rao".to_string(),
            email: "asha@example.com".to_string(),
            shipping_address: "12 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            postal_code: "560001".to_string(),
            country: "India".to_string(),
            card_number: String::new(),
        }
    }

    #[test]
    fn test_complete_form_validates() {
        let summary = complete_form().validate().unwrap();
        assert_eq!(summary.full_name, "Asha Rao");
        assert_eq!(summary.country, "India");
    }

    #[test]
    fn test_missing_email() {
        let form = CheckoutForm {
            email: String::new(),
            ..complete_form()
        };
        let err = form.validate().unwrap_err();
        assert_eq!(err, CheckoutError::MissingFields(vec![RequiredField::Email]));
        assert_eq!(err.to_string(), "Please fill in all required fields.");
    }

    #[test]
    fn test_missing_fields_in_form_order() {
        let form = CheckoutForm {
            full_name: "Asha Rao".to_string(),
            city: "Bengaluru".to_string(),
            ..CheckoutForm::default()
        };
        assert_eq!(
            form.missing_fields(),
            vec![
                RequiredField::Email,
                RequiredField::ShippingAddress,
                RequiredField::PostalCode,
                RequiredField::Country,
            ]
        );
    }

    #[test]
    fn test_card_number_is_optional() {
        let form = complete_form();
        assert!(form.card_number.is_empty());
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_confirmation_message() {
        let message = complete_form().validate().unwrap().confirmation_message();
        assert_eq!(
            message,
            "Thank you for your order, Asha Rao! Your order has been placed and will be shipped \
             to: 12 MG Road, Bengaluru, 560001, India. A confirmation email will be sent to \
             asha@example.com."
        );
    }

    #[test]
    fn test_deserialize_kebab_case_with_absent_fields() {
        let form: CheckoutForm =
            serde_json::from_str(r#"{"full-name":"Asha Rao","postal-code":"560001"}"#).unwrap();
        assert_eq!(form.full_name, "Asha Rao");
        assert_eq!(form.postal_code, "560001");
        assert!(form.email.is_empty());
        assert_eq!(form.missing_fields().len(), 4);
    }

    #[test]
    fn test_field_labels() {
        assert_eq!(RequiredField::PostalCode.to_string(), "Postal code");
        assert_eq!(RequiredField::ALL.len(), 6);
    }
}

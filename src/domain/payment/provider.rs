//! Payment provider identities.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// The external provider that issued a payment's order or intent.
///
/// The core never branches on provider identity beyond selecting the
/// matching gateway adapter; provider quirks live in the adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentProvider {
    Razorpay,
    Stripe,
}

impl PaymentProvider {
    /// Returns the stable string form used in storage and transport.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentProvider::Razorpay => "razorpay",
            PaymentProvider::Stripe => "stripe",
        }
    }
}

impl fmt::Display for PaymentProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentProvider {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "razorpay" => Ok(PaymentProvider::Razorpay),
            "stripe" => Ok(PaymentProvider::Stripe),
            other => Err(ValidationError::invalid_format(
                "provider",
                format!("Unknown payment provider '{}'", other),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_providers() {
        assert_eq!(
            "razorpay".parse::<PaymentProvider>().unwrap(),
            PaymentProvider::Razorpay
        );
        assert_eq!(
            "stripe".parse::<PaymentProvider>().unwrap(),
            PaymentProvider::Stripe
        );
    }

    #[test]
    fn rejects_unknown_provider() {
        assert!("paypal".parse::<PaymentProvider>().is_err());
    }

    #[test]
    fn serializes_to_snake_case() {
        let json = serde_json::to_string(&PaymentProvider::Razorpay).unwrap();
        assert_eq!(json, "\"razorpay\"");
    }
}

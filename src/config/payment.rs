//! Payment configuration (Razorpay and Stripe)

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Payment configuration covering both providers.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Razorpay credentials
    pub razorpay: RazorpayConfig,

    /// Stripe credentials
    pub stripe: StripeConfig,

    /// Upper bound on provider order calls, in seconds
    #[serde(default = "default_provider_timeout")]
    pub provider_timeout_secs: u64,
}

/// Razorpay API credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct RazorpayConfig {
    /// Key id (public half of the basic-auth pair)
    pub key_id: String,

    /// Key secret
    pub key_secret: SecretString,

    /// Webhook signing secret
    pub webhook_secret: SecretString,
}

/// Stripe API credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeConfig {
    /// Stripe API key
    pub api_key: SecretString,

    /// Stripe webhook signing secret
    pub webhook_secret: SecretString,
}

impl PaymentConfig {
    /// Provider call timeout as a Duration
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.provider_timeout_secs)
    }

    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.razorpay.key_id.is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__RAZORPAY__KEY_ID"));
        }
        if self.razorpay.key_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__RAZORPAY__KEY_SECRET",
            ));
        }
        if self.razorpay.webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__RAZORPAY__WEBHOOK_SECRET",
            ));
        }
        if self.stripe.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("PAYMENT__STRIPE__API_KEY"));
        }
        if self.stripe.webhook_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired(
                "PAYMENT__STRIPE__WEBHOOK_SECRET",
            ));
        }
        if self.provider_timeout_secs == 0 {
            return Err(ValidationError::InvalidProviderTimeout);
        }
        Ok(())
    }
}

fn default_provider_timeout() -> u64 {
    10
}

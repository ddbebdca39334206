//! Authentication configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration.
///
/// The identity provider issues HS256 bearer tokens; this service only
/// verifies the signature and trusts the `sub` claim as the user id.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared secret for verifying bearer tokens
    pub jwt_secret: SecretString,

    /// Accept an `X-User-Id` header instead of a token (development only)
    #[serde(default)]
    pub allow_header_identity: bool,
}

impl AuthConfig {
    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__JWT_SECRET"));
        }
        if self.jwt_secret.expose_secret().len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        Ok(())
    }
}

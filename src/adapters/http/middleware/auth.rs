//! Bearer-token authentication middleware.
//!
//! The identity provider issues HS256 tokens; this middleware verifies the
//! signature and trusts the `sub` claim as the user id. In development the
//! `allow_header_identity` flag additionally accepts a plain `X-User-Id`
//! header.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use secrecy::ExposeSecret;
use serde::Deserialize;

use crate::adapters::http::error::ErrorResponse;
use crate::config::AuthConfig;
use crate::domain::foundation::UserId;

/// Authenticated user context extracted from the request.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection returned when authentication is missing or invalid.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

/// Claims carried by identity-provider tokens.
#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    #[allow(dead_code)]
    exp: usize,
}

/// Middleware validating the caller's identity and storing it as a request
/// extension for the [`AuthenticatedUser`] extractor.
pub async fn require_auth(
    State(auth): State<Arc<AuthConfig>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthenticationRequired> {
    let user_id = authenticate(&auth, &request).ok_or(AuthenticationRequired)?;
    request
        .extensions_mut()
        .insert(AuthenticatedUser { user_id });
    Ok(next.run(request).await)
}

fn authenticate(auth: &AuthConfig, request: &Request) -> Option<UserId> {
    if let Some(token) = bearer_token(request) {
        let key = DecodingKey::from_secret(auth.jwt_secret.expose_secret().as_bytes());
        let validation = Validation::new(Algorithm::HS256);
        if let Ok(data) = jsonwebtoken::decode::<Claims>(token, &key, &validation) {
            return UserId::new(data.claims.sub).ok();
        }
        return None;
    }

    if auth.allow_header_identity {
        return request
            .headers()
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| UserId::new(s).ok());
    }

    None
}

fn bearer_token(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or(AuthenticationRequired)
        })
    }
}

//! Stripe implementation of the PaymentGateway port.
//!
//! Orders are payment intents; webhook confirmations carry a
//! `Stripe-Signature` header of the form `t=<unix>,v1=<hex hmac>` computed
//! over `"{t}.{payload}"`. Verification uses a constant-time comparison and
//! bounds the event age to keep replayed deliveries out.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use serde::Deserialize;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::StripeConfig;
use crate::domain::payment::{PaymentOutcome, PaymentProvider};
use crate::ports::{
    Confirmation, CreateOrderRequest, GatewayError, PaymentGateway, ProviderOrder,
};

type HmacSha256 = Hmac<Sha256>;

const PAYMENT_INTENTS_URL: &str = "https://api.stripe.com/v1/payment_intents";

/// Maximum accepted age of a webhook event, in seconds.
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Stripe gateway adapter.
pub struct StripeGateway {
    config: StripeConfig,
    client: reqwest::Client,
}

/// Payment intent response, reduced to the fields the core needs.
#[derive(Debug, Deserialize)]
struct PaymentIntentResponse {
    id: String,
    client_secret: Option<String>,
}

/// Parsed `Stripe-Signature` header.
struct SignatureHeader {
    timestamp: i64,
    v1_signature: String,
}

impl SignatureHeader {
    fn parse(header: &str) -> Result<Self, GatewayError> {
        let mut timestamp = None;
        let mut v1_signature = None;

        for part in header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => {
                    timestamp = value.parse::<i64>().ok();
                }
                Some(("v1", value)) => {
                    v1_signature = Some(value.to_lowercase());
                }
                _ => {}
            }
        }

        match (timestamp, v1_signature) {
            (Some(timestamp), Some(v1_signature)) => Ok(Self {
                timestamp,
                v1_signature,
            }),
            _ => Err(GatewayError::invalid_signature(
                "Stripe-Signature header is missing t= or v1=",
            )),
        }
    }
}

impl StripeGateway {
    pub fn new(config: StripeConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn verify_signature(
        &self,
        payload: &[u8],
        header: &SignatureHeader,
    ) -> Result<(), GatewayError> {
        let age = chrono::Utc::now().timestamp() - header.timestamp;
        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                event_timestamp = header.timestamp,
                age_secs = age,
                "Stripe webhook event too old"
            );
            return Err(GatewayError::invalid_signature(format!(
                "Event too old ({} seconds)",
                age
            )));
        }

        let signed_payload = format!(
            "{}.{}",
            header.timestamp,
            String::from_utf8_lossy(payload)
        );
        let mut mac = HmacSha256::new_from_slice(
            self.config.webhook_secret.expose_secret().as_bytes(),
        )
        .expect("HMAC accepts any key length");
        mac.update(signed_payload.as_bytes());
        let expected = hex_encode(&mac.finalize().into_bytes());

        if expected
            .as_bytes()
            .ct_eq(header.v1_signature.as_bytes())
            .unwrap_u8()
            != 1
        {
            return Err(GatewayError::invalid_signature(
                "Stripe-Signature does not match payload",
            ));
        }
        Ok(())
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn map_request_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::timeout(format!("Stripe request timed out: {}", e))
    } else if e.is_connect() {
        GatewayError::network(format!("Stripe unreachable: {}", e))
    } else {
        GatewayError::provider(format!("Stripe request failed: {}", e))
    }
}

#[async_trait]
impl PaymentGateway for StripeGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Stripe
    }

    fn signature_header(&self) -> &'static str {
        "Stripe-Signature"
    }

    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ProviderOrder, GatewayError> {
        let mut form = vec![
            ("amount", request.amount.to_string()),
            ("currency", request.currency.to_lowercase()),
            (
                "metadata[user_id]",
                request.metadata.user_id.to_string(),
            ),
            (
                "metadata[community_id]",
                request.metadata.community_id.to_string(),
            ),
        ];
        if let Some(event_id) = request.metadata.event_id {
            form.push(("metadata[event_id]", event_id.to_string()));
        }

        let response = self
            .client
            .post(PAYMENT_INTENTS_URL)
            .bearer_auth(self.config.api_key.expose_secret())
            .form(&form)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::authentication("Stripe rejected the API key"));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::provider(format!(
                "Stripe returned {}: {}",
                status, text
            )));
        }

        let intent: PaymentIntentResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::provider(format!("Unparseable intent response: {}", e)))?;

        Ok(ProviderOrder {
            external_id: intent.id,
            client_secret: intent.client_secret,
        })
    }

    fn verify_confirmation(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<Confirmation, GatewayError> {
        let header = SignatureHeader::parse(signature)?;
        self.verify_signature(payload, &header)?;

        let event: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| GatewayError::malformed(format!("Unparseable webhook body: {}", e)))?;

        let event_type = event["type"].as_str().unwrap_or_default();
        let outcome = match event_type {
            "payment_intent.succeeded" => PaymentOutcome::Completed,
            "payment_intent.payment_failed" => PaymentOutcome::Failed,
            other => {
                return Err(GatewayError::malformed(format!(
                    "Unhandled Stripe event '{}'",
                    other
                )));
            }
        };

        let intent_id = event["data"]["object"]["id"]
            .as_str()
            .ok_or_else(|| GatewayError::malformed("Webhook carries no intent id"))?;

        Ok(Confirmation {
            transaction_id: intent_id.to_string(),
            outcome,
        })
    }
}

//! Razorpay implementation of the PaymentGateway port.
//!
//! Orders are created against the Orders API with basic auth; webhook
//! confirmations carry an HMAC-SHA256 hex signature of the raw payload in
//! `X-Razorpay-Signature`.

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use secrecy::ExposeSecret;
use serde::Deserialize;
use serde_json::json;
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::config::RazorpayConfig;
use crate::domain::payment::{PaymentOutcome, PaymentProvider};
use crate::ports::{
    Confirmation, CreateOrderRequest, GatewayError, PaymentGateway, ProviderOrder,
};

type HmacSha256 = Hmac<Sha256>;

const ORDERS_URL: &str = "https://api.razorpay.com/v1/orders";

/// Razorpay gateway adapter.
pub struct RazorpayGateway {
    config: RazorpayConfig,
    client: reqwest::Client,
}

/// Order creation response, reduced to the fields the core needs.
#[derive(Debug, Deserialize)]
struct OrderResponse {
    id: String,
}

impl RazorpayGateway {
    pub fn new(config: RazorpayConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn expected_signature(&self, payload: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(
            self.config.webhook_secret.expose_secret().as_bytes(),
        )
        .expect("HMAC accepts any key length");
        mac.update(payload);
        hex_encode(&mac.finalize().into_bytes())
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

fn map_request_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::timeout(format!("Razorpay request timed out: {}", e))
    } else if e.is_connect() {
        GatewayError::network(format!("Razorpay unreachable: {}", e))
    } else {
        GatewayError::provider(format!("Razorpay request failed: {}", e))
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    fn provider(&self) -> PaymentProvider {
        PaymentProvider::Razorpay
    }

    fn signature_header(&self) -> &'static str {
        "X-Razorpay-Signature"
    }

    async fn create_order(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ProviderOrder, GatewayError> {
        let body = json!({
            "amount": request.amount,
            "currency": request.currency,
            "receipt": format!("communa_{}", request.metadata.user_id),
            "notes": {
                "user_id": request.metadata.user_id.to_string(),
                "community_id": request.metadata.community_id.to_string(),
                "event_id": request.metadata.event_id.map(|id| id.to_string()),
            },
        });

        let response = self
            .client
            .post(ORDERS_URL)
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(GatewayError::authentication("Razorpay rejected the API key"));
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GatewayError::provider(format!(
                "Razorpay returned {}: {}",
                status, text
            )));
        }

        let order: OrderResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::provider(format!("Unparseable order response: {}", e)))?;

        Ok(ProviderOrder {
            external_id: order.id,
            client_secret: None,
        })
    }

    fn verify_confirmation(
        &self,
        payload: &[u8],
        signature: &str,
    ) -> Result<Confirmation, GatewayError> {
        let expected = self.expected_signature(payload);
        let provided = signature.trim().to_lowercase();
        if expected.as_bytes().ct_eq(provided.as_bytes()).unwrap_u8() != 1 {
            return Err(GatewayError::invalid_signature(
                "X-Razorpay-Signature does not match payload",
            ));
        }

        let event: serde_json::Value = serde_json::from_slice(payload)
            .map_err(|e| GatewayError::malformed(format!("Unparseable webhook body: {}", e)))?;

        let event_type = event["event"].as_str().unwrap_or_default();
        let outcome = match event_type {
            "payment.captured" => PaymentOutcome::Completed,
            "payment.failed" => PaymentOutcome::Failed,
            other => {
                return Err(GatewayError::malformed(format!(
                    "Unhandled Razorpay event '{}'",
                    other
                )));
            }
        };

        let order_id = event["payload"]["payment"]["entity"]["order_id"]
            .as_str()
            .ok_or_else(|| GatewayError::malformed("Webhook carries no order_id"))?;

        Ok(Confirmation {
            transaction_id: order_id.to_string(),
            outcome,
        })
    }
}

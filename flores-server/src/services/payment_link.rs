//! Payment-link provider client
//!
//! The provider uses OAuth2 client credentials: every operation first
//! exchanges the configured credentials for a bearer token, then calls the
//! payment-link API. Provider failures surface as [`AppError::Upstream`]
//! with the original message passed through.

use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::utils::AppError;
use shared::client::{PaymentLinkRequest, PaymentLinkResponse};

/// Payment provider configuration
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// OAuth2 token endpoint
    pub token_url: String,
    /// Payment API base URL
    pub api_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub audience: String,
    /// Where the provider redirects the customer after payment
    pub redirect_url: String,
}

impl PaymentConfig {
    pub fn from_env() -> Self {
        Self {
            token_url: std::env::var("WOMPI_TOKEN_URL")
                .unwrap_or_else(|_| "https://id.wompi.sv/connect/token".into()),
            api_url: std::env::var("WOMPI_API_URL")
                .unwrap_or_else(|_| "https://api.wompi.sv".into()),
            client_id: std::env::var("WOMPI_CLIENT_ID").unwrap_or_default(),
            client_secret: std::env::var("WOMPI_CLIENT_SECRET").unwrap_or_default(),
            audience: std::env::var("WOMPI_AUDIENCE").unwrap_or_else(|_| "wompi_api".into()),
            redirect_url: std::env::var("WOMPI_REDIRECT_URL").unwrap_or_default(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
}

/// Payment-link service
#[derive(Debug, Clone)]
pub struct PaymentLinkService {
    client: reqwest::Client,
    config: PaymentConfig,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Deserialize)]
struct LinkCreated {
    #[serde(default)]
    permalink: Option<String>,
    #[serde(default)]
    payment_url: Option<String>,
    #[serde(default)]
    id: Option<serde_json::Value>,
}

impl PaymentLinkService {
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Exchange client credentials for an access token
    async fn fetch_token(&self) -> Result<String, AppError> {
        if !self.config.is_configured() {
            return Err(AppError::upstream(
                "Payment provider credentials are not configured",
            ));
        }

        let params = [
            ("grant_type", "client_credentials"),
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("audience", self.config.audience.as_str()),
        ];

        let resp = self
            .client
            .post(&self.config.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Token request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(target: "payments", %status, %body, "Token endpoint returned error");
            return Err(AppError::upstream(format!(
                "Token endpoint returned {status}"
            )));
        }

        let token: TokenResponse = resp
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid token response: {e}")))?;
        Ok(token.access_token)
    }

    /// Round-trip check against the token endpoint
    pub async fn test_connection(&self) -> Result<(), AppError> {
        self.fetch_token().await.map(|_| ())
    }

    /// Create a payment link
    pub async fn create_link(
        &self,
        req: &PaymentLinkRequest,
    ) -> Result<PaymentLinkResponse, AppError> {
        let token = self.fetch_token().await?;

        let expires_at = req.expires_at.clone().unwrap_or_else(|| {
            (Utc::now() + Duration::hours(24)).to_rfc3339()
        });
        let identifier = format!("link_{}", uuid::Uuid::new_v4().simple());

        let body = serde_json::json!({
            "amount_in_cents": req.amount_in_cents,
            "currency": req.currency,
            "reference": req.reference,
            "customer_email": req.customer_email,
            "expires_at": expires_at,
            "redirect_url": self.config.redirect_url,
            "nombre": format!("Pedido {}", req.reference),
            "identificador": identifier,
        });

        let resp = self
            .client
            .post(format!("{}/EnlacePago", self.config.api_url))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Payment link request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(target: "payments", %status, %body, "Payment link creation failed");
            return Err(AppError::upstream(format!(
                "Payment provider returned {status}: {body}"
            )));
        }

        let created: LinkCreated = resp
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid payment link response: {e}")))?;

        let payment_url = created
            .permalink
            .or(created.payment_url)
            .ok_or_else(|| AppError::upstream("Payment provider returned no link URL"))?;

        tracing::info!(target: "payments", reference = %req.reference, "Payment link created");

        Ok(PaymentLinkResponse {
            success: true,
            payment_url,
            transaction_id: created.id.map(|v| match v.as_str() {
                Some(s) => s.to_string(),
                None => v.to_string(),
            }),
        })
    }
}

//! Payment-link API Handlers
//!
//! Thin wrappers over [`PaymentLinkService`]; provider failures arrive as
//! `AppError::Upstream` with the provider message passed through.
//!
//! [`PaymentLinkService`]: crate::services::PaymentLinkService

use axum::{Json, extract::State};
use serde::Serialize;

use crate::core::ServerState;
use crate::utils::{AppError, AppResult};
use shared::client::{PaymentLinkRequest, PaymentLinkResponse};

#[derive(Serialize)]
pub struct TestConnectionResponse {
    success: bool,
    message: &'static str,
    token_type: &'static str,
    expires_in: u32,
}

/// GET /api/wompi/test - provider token round trip
pub async fn test_connection(
    State(state): State<ServerState>,
) -> AppResult<Json<TestConnectionResponse>> {
    state.payments.test_connection().await?;
    Ok(Json(TestConnectionResponse {
        success: true,
        message: "Conexión con Wompi funcionando correctamente",
        token_type: "Bearer",
        expires_in: 3600,
    }))
}

/// POST /api/wompi/create-payment
pub async fn create_payment(
    State(state): State<ServerState>,
    Json(req): Json<PaymentLinkRequest>,
) -> AppResult<Json<PaymentLinkResponse>> {
    if req.amount_in_cents <= 0
        || req.currency.trim().is_empty()
        || req.reference.trim().is_empty()
        || req.customer_email.trim().is_empty()
    {
        return Err(AppError::validation(
            "Faltan datos requeridos: amount_in_cents, currency, reference, customer_email",
        ));
    }

    let response = state.payments.create_link(&req).await?;
    Ok(Json(response))
}

use super::AppState;
use crate::domain::order::{Order, OrderDraft};
use crate::error::StorefrontError;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header::AUTHORIZATION};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, warn};

/// Failure surface of the API. Internal detail never reaches the client;
/// full errors go to the log.
#[derive(Debug)]
pub enum ApiError {
    BadRequest,
    Unauthorized,
    GatewayUnavailable,
    Internal,
}

impl From<StorefrontError> for ApiError {
    fn from(e: StorefrontError) -> Self {
        match e {
            StorefrontError::Validation(_) => {
                warn!(error = %e, "rejected request");
                ApiError::BadRequest
            }
            StorefrontError::Gateway(_) => {
                error!(error = %e, "payment gateway call failed");
                ApiError::GatewayUnavailable
            }
            _ => {
                error!(error = %e, "request failed");
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest => (StatusCode::BAD_REQUEST, "Invalid request"),
            ApiError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized"),
            ApiError::GatewayUnavailable => {
                (StatusCode::BAD_GATEWAY, "Payment gateway unavailable")
            }
            ApiError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Request failed"),
        };
        (status, Json(json!({ "success": false, "message": message }))).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentRequest {
    pub amount: Decimal,
    pub currency: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIntentResponse {
    pub success: bool,
    pub id: String,
    pub amount: i64,
    pub currency: String,
    /// Gateway key id the client-side checkout widget needs.
    pub key: String,
}

pub async fn create_intent(
    State(state): State<AppState>,
    Json(request): Json<CreateIntentRequest>,
) -> Result<Json<CreateIntentResponse>, ApiError> {
    let currency = request.currency.unwrap_or_else(|| state.currency.clone());
    let intent = state.engine.create_intent(request.amount, &currency).await?;

    Ok(Json(CreateIntentResponse {
        success: true,
        id: intent.id,
        amount: intent.amount,
        currency: intent.currency,
        key: state.gateway_key_id.clone(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPaymentRequest {
    pub transaction_ref: String,
    pub payment_id: String,
    pub signature: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyPaymentResponse {
    pub verified: bool,
}

pub async fn verify_payment(
    State(state): State<AppState>,
    Json(request): Json<VerifyPaymentRequest>,
) -> Result<Json<VerifyPaymentResponse>, ApiError> {
    let verified = state.engine.verify_callback(
        &request.transaction_ref,
        &request.payment_id,
        &request.signature,
    )?;
    Ok(Json(VerifyPaymentResponse { verified }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveOrderResponse {
    pub success: bool,
    pub order_id: String,
}

pub async fn save_order(
    State(state): State<AppState>,
    Json(draft): Json<OrderDraft>,
) -> Result<Json<SaveOrderResponse>, ApiError> {
    let order = state.engine.place_order(draft).await?;
    Ok(Json(SaveOrderResponse {
        success: true,
        order_id: order.id,
    }))
}

pub async fn list_orders(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<Order>>, ApiError> {
    let token = bearer_token(&headers).ok_or(ApiError::Unauthorized)?;
    if !state.signer.validate(token, Utc::now()) {
        return Err(ApiError::Unauthorized);
    }

    let orders = state.engine.list_orders().await?;
    Ok(Json(orders))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
}

pub async fn admin_login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    if !state.admin.matches(&request.email, &request.password) {
        warn!(email = %request.email, "rejected admin login");
        return Err(ApiError::Unauthorized);
    }

    Ok(Json(LoginResponse {
        success: true,
        token: state.signer.issue(Utc::now()),
    }))
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

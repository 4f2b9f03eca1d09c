use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};

use crate::{
    dto::payments::{CreatePaymentRequest, PaymentCreated, PaymentHistory},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::payment_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/create/", post(create_payment))
        .route("/history/", get(payment_history))
}

#[utoipa::path(
    post,
    path = "/api/payments/create/",
    request_body = CreatePaymentRequest,
    responses(
        (status = 200, description = "Payment recorded", body = ApiResponse<PaymentCreated>),
        (status = 404, description = "Order not found"),
        (status = 409, description = "Order already has a payment")
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn create_payment(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreatePaymentRequest>,
) -> AppResult<Json<ApiResponse<PaymentCreated>>> {
    let resp = payment_service::create_payment(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/payments/history/",
    responses(
        (status = 200, description = "The caller's payments", body = ApiResponse<PaymentHistory>)
    ),
    security(("bearer_auth" = [])),
    tag = "Payments"
)]
pub async fn payment_history(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<PaymentHistory>>> {
    let resp = payment_service::list_payment_history(&state, &user).await?;
    Ok(Json(resp))
}

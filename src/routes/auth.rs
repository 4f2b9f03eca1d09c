use axum::{Json, Router, extract::State, routing::post};

use crate::{
    dto::auth::{AccessToken, LoginRequest, RefreshRequest, RegisterRequest, TokenPair},
    error::AppResult,
    models::User,
    response::ApiResponse,
    services::auth_service::{login_user, refresh_access_token, register_user},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register/", post(register))
        .route("/login/", post(login))
        .route("/refresh/", post(refresh))
}

#[utoipa::path(
    post,
    path = "/api/auth/register/",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Register user", body = ApiResponse<User>),
        (status = 400, description = "Invalid or duplicate fields")
    ),
    tag = "Auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> AppResult<Json<ApiResponse<User>>> {
    let resp = register_user(&state.pool, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/login/",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login user", body = ApiResponse<TokenPair>),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "Auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<TokenPair>>> {
    let resp = login_user(&state.pool, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/auth/refresh/",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New access token", body = ApiResponse<AccessToken>),
        (status = 401, description = "Invalid refresh token")
    ),
    tag = "Auth"
)]
pub async fn refresh(
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<ApiResponse<AccessToken>>> {
    let resp = refresh_access_token(payload)?;
    Ok(Json(resp))
}

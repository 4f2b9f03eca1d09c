use argon2::{
    Argon2, PasswordHasher,
    password_hash::{PasswordHash, PasswordVerifier, SaltString},
};
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use password_hash::rand_core::OsRng;
use uuid::Uuid;

use crate::dto::auth::{
    AccessToken, Claims, LoginRequest, RefreshRequest, RegisterRequest, TokenPair,
};
use crate::{
    audit::log_audit,
    db::DbPool,
    error::{AppError, AppResult},
    models::User,
    response::{ApiResponse, Meta},
};

const ACCESS_TOKEN_TTL_MINUTES: i64 = 30;
const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

pub async fn register_user(
    pool: &DbPool,
    payload: RegisterRequest,
) -> AppResult<ApiResponse<User>> {
    let RegisterRequest {
        email,
        username,
        password,
    } = payload;

    if email.is_empty() || username.is_empty() {
        return Err(AppError::Validation("email and username are required".into()));
    }
    if password.len() < 8 {
        return Err(AppError::Validation(
            "password must be at least 8 characters".into(),
        ));
    }

    let exist: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE email = $1 OR username = $2")
            .bind(email.as_str())
            .bind(username.as_str())
            .fetch_optional(pool)
            .await?;

    if exist.is_some() {
        return Err(AppError::Validation(
            "Email or username is already taken".to_string(),
        ));
    }

    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))?
        .to_string();

    let id = Uuid::new_v4();

    let user: User = sqlx::query_as(
        "INSERT INTO users (id, email, username, password_hash) VALUES ($1, $2, $3, $4) RETURNING *",
    )
    .bind(id)
    .bind(email.as_str())
    .bind(username.as_str())
    .bind(password_hash)
    .fetch_one(pool)
    .await?;

    if let Err(err) = log_audit(
        pool,
        Some(user.id),
        "user_register",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }
    Ok(ApiResponse::success("User created", user, None))
}

pub async fn login_user(
    pool: &DbPool,
    payload: LoginRequest,
) -> AppResult<ApiResponse<TokenPair>> {
    let LoginRequest { email, password } = payload;
    let user: Option<User> = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(email.as_str())
        .fetch_optional(pool)
        .await?;

    let user = match user {
        Some(u) => u,
        None => return Err(AppError::Unauthorized("Invalid email or password".into())),
    };

    let parsed_hash = PasswordHash::new(&user.password_hash)
        .map_err(|_| AppError::Internal(anyhow::anyhow!("Invalid password hash")))?;

    let argon2 = Argon2::default();
    if argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_err()
    {
        return Err(AppError::Unauthorized("Invalid email or password".into()));
    }

    if !user.is_active {
        return Err(AppError::Unauthorized("Account is disabled".into()));
    }

    let tokens = issue_token_pair(user.id)?;

    if let Err(err) = log_audit(
        pool,
        Some(user.id),
        "user_login",
        Some("users"),
        Some(serde_json::json!({ "user_id": user.id })),
    )
    .await
    {
        tracing::warn!(error = %err, "audit log failed");
    }

    Ok(ApiResponse::success("Logged in", tokens, Some(Meta::empty())))
}

pub fn refresh_access_token(payload: RefreshRequest) -> AppResult<ApiResponse<AccessToken>> {
    let claims = decode_token(&payload.refresh)
        .map_err(|_| AppError::Unauthorized("Invalid or expired refresh token".into()))?;

    if claims.token_type != "refresh" {
        return Err(AppError::Unauthorized("Not a refresh token".into()));
    }

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user id in token".into()))?;

    let access = issue_token(user_id, "access", Duration::minutes(ACCESS_TOKEN_TTL_MINUTES))?;

    Ok(ApiResponse::success(
        "Token refreshed",
        AccessToken { access },
        Some(Meta::empty()),
    ))
}

pub fn issue_token_pair(user_id: Uuid) -> AppResult<TokenPair> {
    let access = issue_token(user_id, "access", Duration::minutes(ACCESS_TOKEN_TTL_MINUTES))?;
    let refresh = issue_token(user_id, "refresh", Duration::days(REFRESH_TOKEN_TTL_DAYS))?;
    Ok(TokenPair { access, refresh })
}

pub fn issue_token(user_id: Uuid, token_type: &str, ttl: Duration) -> AppResult<String> {
    let secret = jwt_secret()?;

    let expiration = Utc::now()
        .checked_add_signed(ttl)
        .ok_or_else(|| AppError::Internal(anyhow::anyhow!("Failed to set expiration")))?;

    let claims = Claims {
        sub: user_id.to_string(),
        token_type: token_type.to_string(),
        exp: expiration.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!(e.to_string())))
}

pub fn decode_token(token: &str) -> AppResult<Claims> {
    let secret = jwt_secret()?;
    let decoded = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".into()))?;
    Ok(decoded.claims)
}

fn jwt_secret() -> AppResult<String> {
    std::env::var("JWT_SECRET")
        .map_err(|_| AppError::Internal(anyhow::anyhow!("JWT_SECRET is not set")))
}

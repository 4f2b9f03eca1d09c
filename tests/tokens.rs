use storefront_api::dto::auth::RefreshRequest;
use storefront_api::error::AppError;
use storefront_api::services::auth_service::{
    decode_token, issue_token_pair, refresh_access_token,
};
use uuid::Uuid;

fn set_secret() {
    // Tests in this file share one process; the same secret works for all.
    unsafe { std::env::set_var("JWT_SECRET", "test-secret") };
}

#[test]
fn token_pair_round_trips() {
    set_secret();
    let user_id = Uuid::new_v4();
    let pair = issue_token_pair(user_id).expect("token pair");

    let access = decode_token(&pair.access).expect("decode access");
    assert_eq!(access.sub, user_id.to_string());
    assert_eq!(access.token_type, "access");

    let refresh = decode_token(&pair.refresh).expect("decode refresh");
    assert_eq!(refresh.sub, user_id.to_string());
    assert_eq!(refresh.token_type, "refresh");
}

#[test]
fn refresh_issues_new_access_token() {
    set_secret();
    let user_id = Uuid::new_v4();
    let pair = issue_token_pair(user_id).expect("token pair");

    let resp = refresh_access_token(RefreshRequest {
        refresh: pair.refresh,
    })
    .expect("refresh");
    let access = resp.data.expect("access token");

    let claims = decode_token(&access.access).expect("decode");
    assert_eq!(claims.sub, user_id.to_string());
    assert_eq!(claims.token_type, "access");
}

#[test]
fn access_token_is_rejected_by_refresh() {
    set_secret();
    let pair = issue_token_pair(Uuid::new_v4()).expect("token pair");

    let err = refresh_access_token(RefreshRequest {
        refresh: pair.access,
    })
    .expect_err("access token must not refresh");
    assert!(matches!(err, AppError::Unauthorized(_)));
}

#[test]
fn garbage_token_is_rejected() {
    set_secret();
    let err = refresh_access_token(RefreshRequest {
        refresh: "not-a-jwt".into(),
    })
    .expect_err("garbage must not refresh");
    assert!(matches!(err, AppError::Unauthorized(_)));
}

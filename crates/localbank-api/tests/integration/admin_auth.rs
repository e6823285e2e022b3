//! Admin guard, login and logout.

use axum::http::StatusCode;
use localbank_auth::{MAX_FAILED_ATTEMPTS, SESSION_KEY_PREFIX};
use localbank_storage::LocalStore;

use crate::common::{ADMIN_EMAIL, ADMIN_PASSWORD, TestHarness};

#[tokio::test]
async fn test_guard_redirects_without_session() {
    let harness = TestHarness::new();
    for path in [
        "/admin",
        "/admin/dashboard",
        "/admin/notices",
        "/admin/inquiries",
        "/admin/settings",
    ] {
        let resp = harness.get(path).await;
        assert_eq!(resp.status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(resp.location.as_deref(), Some("/admin/login"), "{path}");
    }

    let resp = harness.post_form("/admin/notices", &[("title", "t")]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(harness.state.data.list_notices().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_login_page_is_public() {
    let resp = TestHarness::new().get("/admin/login").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("관리자 로그인"));
}

#[tokio::test]
async fn test_login_sets_session_cookie_and_opens_console() {
    let harness = TestHarness::new();
    harness.login().await;

    let token = harness.session_token().unwrap();
    let stored = harness
        .local
        .get(&format!("{SESSION_KEY_PREFIX}{token}"))
        .unwrap()
        .unwrap();
    assert!(stored.contains(ADMIN_EMAIL));

    let resp = harness.get("/admin/dashboard").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(ADMIN_EMAIL));

    let resp = harness.get("/admin").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/admin/dashboard"));
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let resp = TestHarness::new()
        .post_form(
            "/admin/login",
            &[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)],
        )
        .await;
    let cookie = resp.set_cookie.unwrap();
    assert!(cookie.starts_with("localbank_session="));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Lax"));
    assert!(cookie.contains("Path=/"));
}

#[tokio::test]
async fn test_other_client_is_not_signed_in() {
    let harness = TestHarness::new();
    harness.login().await;
    let before = harness.state.whitelabel.get_config().main_message;

    let resp = harness.get_anonymous("/admin/settings").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/admin/login"));

    let resp = harness
        .post_form_anonymous("/admin/settings", &[("main_message", "hijacked")])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/admin/login"));
    assert_eq!(harness.state.whitelabel.get_config().main_message, before);

    let resp = harness.get("/admin/settings?edited=1").await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_other_client_is_not_signed_in_with_live_session() {
    let harness = TestHarness::new().require_live_session();
    harness.login().await;

    let resp = harness.get_anonymous("/admin/dashboard").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/admin/login"));

    let resp = harness.get("/admin/dashboard").await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_token_is_redirected() {
    let harness = TestHarness::new();
    harness.local.set("admin-logged-in", "true").unwrap();
    harness.set_session_token(Some("0".repeat(64)));

    let resp = harness.get("/admin/dashboard").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/admin/login"));
}

#[tokio::test]
async fn test_wrong_password_message() {
    let harness = TestHarness::new();
    let resp = harness
        .post_form(
            "/admin/login",
            &[("email", ADMIN_EMAIL), ("password", "nope")],
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert!(resp.body.contains("비밀번호가 올바르지 않습니다"));
    assert!(resp.set_cookie.is_none());
}

#[tokio::test]
async fn test_unknown_user_message() {
    let resp = TestHarness::new()
        .post_form(
            "/admin/login",
            &[("email", "ghost@localbank.test"), ("password", "x")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert!(resp.body.contains("등록되지 않은 사용자입니다"));
}

#[tokio::test]
async fn test_invalid_email_message() {
    let resp = TestHarness::new()
        .post_form("/admin/login", &[("email", "not-an-email"), ("password", "x")])
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert!(resp.body.contains("유효하지 않은 이메일 형식입니다"));
}

#[tokio::test]
async fn test_blank_fields_are_422() {
    let harness = TestHarness::new();
    let resp = harness
        .post_form("/admin/login", &[("email", ""), ("password", "x")])
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("이메일을 입력하세요"));

    let resp = harness
        .post_form("/admin/login", &[("email", ADMIN_EMAIL), ("password", "")])
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("비밀번호를 입력하세요"));
}

#[tokio::test]
async fn test_lockout_message() {
    let harness = TestHarness::new();
    for _ in 0..MAX_FAILED_ATTEMPTS {
        harness
            .post_form(
                "/admin/login",
                &[("email", ADMIN_EMAIL), ("password", "nope")],
            )
            .await;
    }
    let resp = harness
        .post_form(
            "/admin/login",
            &[("email", ADMIN_EMAIL), ("password", ADMIN_PASSWORD)],
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert!(resp.body.contains("로그인 시도 횟수가 초과되었습니다"));
}

#[tokio::test]
async fn test_logout_ends_session() {
    let harness = TestHarness::new();
    harness.login().await;
    let token = harness.session_token().unwrap();

    let resp = harness.post_form("/admin/logout", &[]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/admin/login"));
    assert!(resp.set_cookie.unwrap().contains("Max-Age=0"));
    assert!(harness.state.sessions.get(&token).is_none());
    assert!(harness.state.auth.current_principal().is_none());

    let resp = harness.get("/admin/dashboard").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn test_logout_keeps_other_sessions() {
    let harness = TestHarness::new();
    harness.login().await;
    let first = harness.session_token();
    harness.login().await;
    assert_ne!(harness.session_token(), first);

    harness.post_form("/admin/logout", &[]).await;
    let resp = harness.get("/admin/dashboard").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);

    harness.set_session_token(first);
    let resp = harness.get("/admin/dashboard").await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_live_session_rejects_signed_out_provider() {
    let harness = TestHarness::new().require_live_session();
    harness.login().await;
    let token = harness.session_token().unwrap();
    harness.state.auth.logout().await.unwrap();

    let resp = harness.get("/admin/dashboard").await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/admin/login"));
    assert!(harness.state.sessions.get(&token).is_none());
}

#[tokio::test]
async fn test_live_session_passes_after_login() {
    let harness = TestHarness::new().require_live_session();
    harness.login().await;

    let resp = harness.get("/admin/settings?edited=1").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(ADMIN_EMAIL));
}

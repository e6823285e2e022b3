//! Public page rendering.

use axum::http::StatusCode;
use localbank_core::NewNotice;

use crate::common::TestHarness;

#[tokio::test]
async fn test_home_renders_brand() {
    let harness = TestHarness::new();
    let resp = harness.get("/").await;

    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("지역 주민을 위한 디지털 안내 창구"));
    assert!(resp.body.contains("--primary:#00843D"));
    assert!(resp.body.contains(r#"href="/inquiry">문의하기</a>"#));
    assert!(resp.body.contains(r#"href="/services">안내받기</a>"#));
}

#[tokio::test]
async fn test_services_catalog() {
    let resp = TestHarness::new().get("/services").await;
    assert_eq!(resp.status, StatusCode::OK);
    for category in ["예·적금", "대출", "카드", "보험"] {
        assert!(resp.body.contains(category), "missing {category}");
    }
}

#[tokio::test]
async fn test_about_uses_institution_name() {
    let resp = TestHarness::new().get("/about").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("LocalBank ONE을 소개합니다"));
    assert!(resp.body.contains("공공성과 안정성을 강조하는 공식적인 톤"));
}

#[tokio::test]
async fn test_notices_empty() {
    let resp = TestHarness::new().get("/notices").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("등록된 공지사항이 없습니다."));
}

#[tokio::test]
async fn test_notices_newest_first() {
    let harness = TestHarness::new();
    harness
        .state
        .data
        .create_notice(NewNotice::new("첫 번째 공지", "요약 1"))
        .await
        .unwrap();
    harness
        .state
        .data
        .create_notice(NewNotice::new("두 번째 공지", "요약 2").with_link("https://example.com/2"))
        .await
        .unwrap();

    let resp = harness.get("/notices").await;
    let first = resp.body.find("첫 번째 공지").unwrap();
    let second = resp.body.find("두 번째 공지").unwrap();
    assert!(second < first);
    assert!(resp.body.contains(r#"<a href="https://example.com/2">두 번째 공지</a>"#));
}

#[tokio::test]
async fn test_notices_offline_shows_banner() {
    let resp = TestHarness::offline().get("/notices").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("공지사항을 불러오는데 실패했습니다."));
    assert!(!resp.body.contains("offline"));
}

#[tokio::test]
async fn test_unknown_path_is_404_page() {
    let harness = TestHarness::new();
    let resp = harness.get("/no/such/page").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.contains("페이지를 찾을 수 없습니다"));

    let resp = harness.get("/admin/no-such-page").await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_config_json() {
    let resp = TestHarness::new().get("/api/config").await;
    assert_eq!(resp.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(json["institutionType"], "nonghyup");
    assert_eq!(json["colorTheme"]["primary"], "#00843D");
    assert_eq!(json["ctaButtons"]["primary"], "문의하기");
}

#[tokio::test]
async fn test_health() {
    let resp = TestHarness::new().get("/health").await;
    assert_eq!(resp.status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&resp.body).unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "localbank-api");
    assert_eq!(json["auth"], "memory");
}

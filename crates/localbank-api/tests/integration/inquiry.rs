//! Public inquiry submission.

use axum::http::StatusCode;
use localbank_core::InquiryStatus;

use crate::common::TestHarness;

#[tokio::test]
async fn test_submit_inquiry_stores_pending() {
    let harness = TestHarness::new();
    let resp = harness
        .post_form(
            "/inquiry",
            &[
                ("name", "홍길동"),
                ("contact", "010-1234-5678"),
                ("content", "적금 상품 문의드립니다"),
            ],
        )
        .await;

    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/inquiry?submitted=1"));

    let stored = harness.state.data.list_inquiries().await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, "홍길동");
    assert_eq!(stored[0].status, InquiryStatus::Pending);

    let page = harness.get("/inquiry?submitted=1").await;
    assert!(page.body.contains("문의가 성공적으로 접수되었습니다"));
}

#[tokio::test]
async fn test_missing_field_is_422_inline() {
    let harness = TestHarness::new();
    let resp = harness
        .post_form(
            "/inquiry",
            &[("name", "홍길동"), ("contact", "   "), ("content", "내용")],
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("연락처를 입력해주세요"));
    assert!(resp.body.contains(r#"value="홍길동""#));
    assert!(harness.state.data.list_inquiries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_absent_fields_are_validated_not_rejected() {
    let resp = TestHarness::new().post_form("/inquiry", &[]).await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("이름을 입력해주세요"));
}

#[tokio::test]
async fn test_offline_store_renders_error_page() {
    let resp = TestHarness::offline()
        .post_form(
            "/inquiry",
            &[("name", "a"), ("contact", "b"), ("content", "c")],
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_GATEWAY);
    assert!(resp.body.contains("잠시 후 다시 시도해주세요"));
    assert!(resp.body.contains(r#"href="/inquiry""#));
}

#[tokio::test]
async fn test_submitted_markup_is_escaped() {
    let harness = TestHarness::new();
    harness
        .post_form(
            "/inquiry",
            &[
                ("name", "<script>x</script>"),
                ("contact", "010"),
                ("content", "내용"),
            ],
        )
        .await;
    harness.login().await;
    let resp = harness.get("/admin/inquiries").await;
    assert!(!resp.body.contains("<script>x</script>"));
    assert!(resp.body.contains("&lt;script&gt;x&lt;/script&gt;"));
}

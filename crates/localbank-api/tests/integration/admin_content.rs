//! Notice and inquiry management, dashboard stats.

use axum::http::StatusCode;
use localbank_core::{InquiryStatus, NewInquiry, NewNotice};

use crate::common::TestHarness;

async fn seed_inquiries(harness: &TestHarness) -> Vec<String> {
    let mut ids = Vec::new();
    for name in ["가", "나", "다"] {
        ids.push(
            harness
                .state
                .data
                .create_inquiry(NewInquiry::new(name, "010", "문의"))
                .await
                .unwrap(),
        );
    }
    ids
}

#[tokio::test]
async fn test_create_notice_appears_publicly() {
    let harness = TestHarness::new();
    harness.login().await;

    let resp = harness
        .post_form(
            "/admin/notices",
            &[
                ("title", "설 연휴 휴무 안내"),
                ("summary", "연휴 기간 영업점 휴무"),
                ("link", ""),
            ],
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/admin/notices"));

    let notices = harness.state.data.list_notices().await.unwrap();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].link, None);

    let public = harness.get("/notices").await;
    assert!(public.body.contains("설 연휴 휴무 안내"));
}

#[tokio::test]
async fn test_invalid_notice_is_422() {
    let harness = TestHarness::new();
    harness.login().await;

    let resp = harness
        .post_form(
            "/admin/notices",
            &[("title", "제목"), ("summary", ""), ("link", "")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("요약을 입력하세요"));
    assert!(resp.body.contains(r#"value="제목""#));

    let resp = harness
        .post_form(
            "/admin/notices",
            &[("title", "제목"), ("summary", "요약"), ("link", "ftp://x")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("외부 페이지 링크만 가능합니다"));
    assert!(harness.state.data.list_notices().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_notice() {
    let harness = TestHarness::new();
    harness.login().await;
    let id = harness
        .state
        .data
        .create_notice(NewNotice::new("삭제 대상", "요약"))
        .await
        .unwrap();

    let resp = harness
        .post_form(&format!("/admin/notices/{id}/delete"), &[])
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert!(harness.state.data.list_notices().await.unwrap().is_empty());

    let resp = harness
        .post_form(&format!("/admin/notices/{id}/delete"), &[])
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert!(resp.body.contains("요청하신 항목을 찾을 수 없습니다."));
    assert!(resp.body.contains(r#"href="/admin/notices""#));
}

#[tokio::test]
async fn test_notice_list_offline_banner() {
    let harness = TestHarness::offline();
    harness.login().await;
    let resp = harness.get("/admin/notices").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("공지사항을 불러오는데 실패했습니다."));
}

#[tokio::test]
async fn test_inquiry_filter_and_status_change() {
    let harness = TestHarness::new();
    harness.login().await;
    let ids = seed_inquiries(&harness).await;

    let resp = harness
        .post_form(
            &format!("/admin/inquiries/{}/status", ids[1]),
            &[("status", "processing"), ("filter", "pending")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(
        resp.location.as_deref(),
        Some("/admin/inquiries?status=pending")
    );

    let processing = harness
        .state
        .data
        .list_inquiries_by_status(InquiryStatus::Processing)
        .await
        .unwrap();
    assert_eq!(processing.len(), 1);
    assert_eq!(processing[0].id, ids[1]);

    let resp = harness.get("/admin/inquiries?status=processing").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("<strong>나</strong>"));
    assert!(!resp.body.contains("<strong>가</strong>"));

    let resp = harness.get("/admin/inquiries?status=all").await;
    for name in ["가", "나", "다"] {
        assert!(resp.body.contains(&format!("<strong>{name}</strong>")));
    }
}

#[tokio::test]
async fn test_invalid_status_is_422() {
    let harness = TestHarness::new();
    harness.login().await;
    let ids = seed_inquiries(&harness).await;

    let resp = harness
        .post_form(
            &format!("/admin/inquiries/{}/status", ids[0]),
            &[("status", "archived")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        harness.state.data.list_inquiries_by_status(InquiryStatus::Pending).await.unwrap().len(),
        3
    );
}

#[tokio::test]
async fn test_status_change_on_missing_inquiry_is_404() {
    let harness = TestHarness::new();
    harness.login().await;
    let resp = harness
        .post_form("/admin/inquiries/missing/status", &[("status", "completed")])
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_dashboard_stats() {
    let harness = TestHarness::new();
    harness.login().await;
    let ids = seed_inquiries(&harness).await;
    harness
        .state
        .data
        .update_inquiry_status(&ids[0], InquiryStatus::Completed)
        .await
        .unwrap();
    harness
        .state
        .data
        .create_notice(NewNotice::new("새 공지", "요약"))
        .await
        .unwrap();

    let resp = harness.get("/admin/dashboard").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains(r#"<div>전체 문의</div><div class="value">3</div>"#));
    assert!(resp.body.contains(r#"<div>대기 중 문의</div><div class="value">2</div>"#));
    assert!(resp.body.contains(r#"<div>전체 공지</div><div class="value">1</div>"#));
    assert!(resp.body.contains(r#"<div>최근 7일 공지</div><div class="value">1</div>"#));
}

#[tokio::test]
async fn test_dashboard_offline_banner() {
    let harness = TestHarness::offline();
    harness.login().await;
    let resp = harness.get("/admin/dashboard").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert!(resp.body.contains("통계를 불러오는데 실패했습니다."));
}

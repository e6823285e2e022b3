//! White-label settings editor: in-place edits, institution switch, remote
//! load on entry and remote save.

use axum::http::StatusCode;
use localbank_core::{InstitutionType, WhiteLabelPatch, brand};
use localbank_storage::LocalStore;
use localbank_whitelabel::{LOCAL_CONFIG_KEY, merged};

use crate::common::TestHarness;

#[tokio::test]
async fn test_switch_institution_rebrands_every_page() {
    let harness = TestHarness::new();
    harness.login().await;

    let resp = harness
        .post_form(
            "/admin/settings/institution",
            &[("institution_type", "shinhyup")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/admin/settings?edited=1"));

    let config = harness.state.whitelabel.get_config();
    assert_eq!(config.institution_type, InstitutionType::Shinhyup);
    assert_eq!(config.color_theme, brand::color_theme(InstitutionType::Shinhyup));
    assert_eq!(config.institution_name, "LocalBank ONE");

    let home = harness.get("/").await;
    assert!(home.body.contains("--primary:#0066B3"));
    assert!(home.body.contains("조합원과 더 가까운 디지털 소통 창구"));
    assert!(home.body.contains(r#"href="/inquiry">상담 요청</a>"#));
}

#[tokio::test]
async fn test_unknown_institution_is_422() {
    let harness = TestHarness::new();
    harness.login().await;
    let resp = harness
        .post_form("/admin/settings/institution", &[("institution_type", "bank")])
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        harness.state.whitelabel.get_config().institution_type,
        InstitutionType::Nonghyup
    );
}

#[tokio::test]
async fn test_edits_persist_locally() {
    let harness = TestHarness::new();
    harness.login().await;

    harness
        .post_form(
            "/admin/settings",
            &[("institution_name", "행복농협"), ("main_message", "함께 여는 내일")],
        )
        .await;
    harness
        .post_form("/admin/settings", &[("cta_primary", "지금 상담")])
        .await;

    let config = harness.state.whitelabel.get_config();
    assert_eq!(config.institution_name, "행복농협");
    assert_eq!(config.main_message, "함께 여는 내일");
    assert_eq!(config.cta_buttons.primary, "지금 상담");
    assert_eq!(config.cta_buttons.secondary, "안내받기");

    let cached = harness.local.get(LOCAL_CONFIG_KEY).unwrap().unwrap();
    assert!(cached.contains("행복농협"));
    assert_eq!(harness.state.whitelabel.reload_from_local().get_config(), config);
}

#[tokio::test]
async fn test_script_logo_is_rejected() {
    let harness = TestHarness::new();
    harness.login().await;

    let resp = harness
        .post_form(
            "/admin/settings",
            &[("logo_url", "javascript:alert(1)"), ("main_message", "바뀌면 안 됨")],
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(resp.body.contains("로고는 http(s) 주소 또는 data:image 형식만 가능합니다"));

    let config = harness.state.whitelabel.get_config();
    assert_eq!(config.logo_url, None);
    assert_ne!(config.main_message, "바뀌면 안 됨");

    let home = harness.get("/").await;
    assert!(!home.body.contains("javascript:"));
}

#[tokio::test]
async fn test_data_image_logo_is_accepted() {
    let harness = TestHarness::new();
    harness.login().await;

    let logo = "data:image/png;base64,iVBORw0KGgo=";
    let resp = harness.post_form("/admin/settings", &[("logo_url", logo)]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(harness.state.whitelabel.get_config().logo_url.as_deref(), Some(logo));
}

#[tokio::test]
async fn test_logo_set_and_clear() {
    let harness = TestHarness::new();
    harness.login().await;

    harness
        .post_form(
            "/admin/settings",
            &[("logo_url", "https://cdn.example.com/logo.png")],
        )
        .await;
    let home = harness.get("/").await;
    assert!(home.body.contains(r#"<img src="https://cdn.example.com/logo.png""#));

    harness.post_form("/admin/settings", &[("logo_url", "")]).await;
    assert_eq!(harness.state.whitelabel.get_config().logo_url, None);
    let home = harness.get("/").await;
    assert!(home.body.contains(r#"<span class="initial">L</span>"#));
}

#[tokio::test]
async fn test_entering_settings_loads_remote() {
    let harness = TestHarness::new();
    harness.login().await;
    let stored = merged(
        &brand::default_config(),
        WhiteLabelPatch::for_institution(InstitutionType::Shinhyup)
            .with_institution_name("부산신협"),
    );
    harness.state.data.put_config_document(&stored).await.unwrap();

    let resp = harness.get("/admin/settings").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(harness.state.whitelabel.get_config(), stored);
    assert!(resp.body.contains(r#"value="부산신협""#));
}

#[tokio::test]
async fn test_edit_redirect_keeps_unsaved_edits() {
    let harness = TestHarness::new();
    harness.login().await;
    harness
        .state
        .data
        .put_config_document(&brand::default_config())
        .await
        .unwrap();

    harness
        .post_form("/admin/settings", &[("institution_name", "미저장 이름")])
        .await;
    let resp = harness.get("/admin/settings?edited=1").await;
    assert!(resp.body.contains(r#"value="미저장 이름""#));
    assert_eq!(
        harness.state.whitelabel.get_config().institution_name,
        "미저장 이름"
    );
}

#[tokio::test]
async fn test_no_remote_document_keeps_config() {
    let harness = TestHarness::new();
    harness.login().await;
    let before = harness.state.whitelabel.get_config();
    let resp = harness.get("/admin/settings").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(harness.state.whitelabel.get_config(), before);
}

#[tokio::test]
async fn test_save_writes_remote_document() {
    let harness = TestHarness::new();
    harness.login().await;
    harness
        .post_form(
            "/admin/settings/institution",
            &[("institution_type", "shinhyup")],
        )
        .await;

    let resp = harness.post_form("/admin/settings/save", &[]).await;
    assert_eq!(resp.status, StatusCode::SEE_OTHER);
    assert_eq!(resp.location.as_deref(), Some("/admin/settings?saved=1"));

    let doc = harness.state.data.get_config_document().await.unwrap().unwrap();
    assert_eq!(doc.institution_type, Some(InstitutionType::Shinhyup));

    let page = harness.get("/admin/settings?saved=1").await;
    assert!(page.body.contains("설정이 저장되었습니다."));
}

#[tokio::test]
async fn test_cleared_logo_is_cleared_remotely() {
    let harness = TestHarness::new();
    harness.login().await;
    harness
        .post_form("/admin/settings", &[("logo_url", "https://cdn.example.com/a.png")])
        .await;
    harness.post_form("/admin/settings/save", &[]).await;
    harness.post_form("/admin/settings", &[("logo_url", "")]).await;
    harness.post_form("/admin/settings/save", &[]).await;

    harness
        .post_form("/admin/settings", &[("logo_url", "https://cdn.example.com/b.png")])
        .await;
    harness.get("/admin/settings").await;
    assert_eq!(harness.state.whitelabel.get_config().logo_url, None);
}

#[tokio::test]
async fn test_offline_settings_load_is_logged_and_save_fails_visibly() {
    let harness = TestHarness::offline();
    harness.login().await;

    let resp = harness.get("/admin/settings").await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        harness.state.whitelabel.get_config(),
        brand::default_config()
    );

    let resp = harness.post_form("/admin/settings/save", &[]).await;
    assert_eq!(resp.status, StatusCode::BAD_GATEWAY);
    assert!(resp.body.contains("설정 저장에 실패했습니다."));
}

//! Admin console handlers.
//!
//! Everything except the login routes sits behind the admin guard, which
//! inserts the session's [`localbank_auth::Principal`] into request
//! extensions.

use std::convert::Infallible;

use axum::Form;
use axum::extract::{FromRequestParts, Path, Query, State};
use axum::http::request::Parts;
use axum::http::{HeaderMap, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Utc;
use localbank_auth::{email_from_parts, expired_session_cookie, session_cookie, session_token};
use localbank_core::{
    CtaButtons, DashboardStats, InquiryStatus, InstitutionType, NewNotice, WhiteLabelConfig,
    WhiteLabelPatch,
};
use serde::Deserialize;

use super::{failure, invalid_field, unprocessable};
use crate::error::Error;
use crate::state::AppState;
use crate::views;
use crate::views::admin::SettingsNotice;

/// Landing page after login.
pub const DASHBOARD_PATH: &str = "/admin/dashboard";
const NOTICES_PATH: &str = "/admin/notices";
const INQUIRIES_PATH: &str = "/admin/inquiries";
const SETTINGS_PATH: &str = "/admin/settings";

const STATS_LOAD_FAILED: &str = "통계를 불러오는데 실패했습니다.";
const NOTICES_LOAD_FAILED: &str = "공지사항을 불러오는데 실패했습니다.";
const INQUIRIES_LOAD_FAILED: &str = "문의를 불러오는데 실패했습니다.";
const SAVE_FAILED: &str = "설정 저장에 실패했습니다.";

/// Email of the signed-in administrator, or `admin` outside the guard.
#[derive(Debug, Clone)]
pub struct AdminEmail(pub String);

impl<S> FromRequestParts<S> for AdminEmail
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(email_from_parts(parts).to_string()))
    }
}

// ============================================================================
// Login / logout
// ============================================================================

/// `GET /admin/login`
pub async fn login_form(State(state): State<AppState>) -> Html<String> {
    views::admin::login(&state.whitelabel.get_config(), "", None)
}

/// Login form fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginForm {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

/// `POST /admin/login`
///
/// On success a session is started, its token is handed to the browser as a
/// cookie, and the browser is sent to the dashboard. Failures re-render the
/// form with the localized message.
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let config = state.whitelabel.get_config();
    let email = form.email.trim();
    if email.is_empty() {
        return unprocessable(views::admin::login(&config, "", Some("이메일을 입력하세요")));
    }
    if form.password.is_empty() {
        return unprocessable(views::admin::login(
            &config,
            email,
            Some("비밀번호를 입력하세요"),
        ));
    }

    let signed_in = match state.auth.login(email, &form.password).await {
        Ok(principal) => state.sessions.create(&principal).map(|token| (principal, token)),
        Err(e) => {
            tracing::warn!(code = %e.code(), gateway = state.auth.name(), "Admin sign-in failed");
            Err(e)
        }
    };
    match signed_in {
        Ok((principal, token)) => {
            tracing::info!(email = %principal.email, "Admin signed in");
            (
                [(header::SET_COOKIE, session_cookie(&token))],
                Redirect::to(DASHBOARD_PATH),
            )
                .into_response()
        }
        Err(e) => {
            let error = Error::from(e);
            if !error.status().is_client_error() {
                tracing::error!(error = %error, "Admin session could not be started");
            }
            let page = views::admin::login(&config, email, Some(&error.public_message()));
            (error.status(), page).into_response()
        }
    }
}

/// `POST /admin/logout`
///
/// Ends this client's session and expires its cookie. A provider sign-out
/// failure is logged; the local session is gone either way.
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = session_token(&headers) {
        state.sessions.remove(token);
    }
    match state.auth.logout().await {
        Ok(()) => tracing::info!("Admin signed out"),
        Err(e) => tracing::warn!(error = %e, "Auth provider sign-out failed"),
    }
    (
        [(header::SET_COOKIE, expired_session_cookie())],
        Redirect::to(&state.guard.login_path),
    )
        .into_response()
}

/// `GET /admin`
pub async fn root() -> Redirect {
    Redirect::to(DASHBOARD_PATH)
}

// ============================================================================
// Dashboard
// ============================================================================

/// `GET /admin/dashboard`
pub async fn dashboard(State(state): State<AppState>, AdminEmail(email): AdminEmail) -> Html<String> {
    let config = state.whitelabel.get_config();
    let (notices, inquiries) =
        tokio::join!(state.data.list_notices(), state.data.list_inquiries());
    let (stats, error) = match (notices, inquiries) {
        (Ok(notices), Ok(inquiries)) => {
            (DashboardStats::compute(&notices, &inquiries, Utc::now()), None)
        }
        (notices, inquiries) => {
            for e in [notices.err(), inquiries.err()].into_iter().flatten() {
                tracing::error!(error = %e, "Failed to load dashboard stats");
            }
            (DashboardStats::default(), Some(STATS_LOAD_FAILED))
        }
    };
    views::admin::dashboard(&config, &email, &stats, error)
}

// ============================================================================
// Notices
// ============================================================================

async fn render_notices(
    state: &AppState,
    email: &str,
    draft: &NewNotice,
    invalid: Option<(&str, &str)>,
) -> Html<String> {
    let config = state.whitelabel.get_config();
    match state.data.list_notices().await {
        Ok(notices) => views::admin::notices(&config, email, &notices, draft, invalid, None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load notices");
            views::admin::notices(&config, email, &[], draft, invalid, Some(NOTICES_LOAD_FAILED))
        }
    }
}

/// `GET /admin/notices`
pub async fn notices(State(state): State<AppState>, AdminEmail(email): AdminEmail) -> Html<String> {
    render_notices(&state, &email, &NewNotice::default(), None).await
}

/// Notice form fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NoticeForm {
    /// Headline.
    pub title: String,
    /// Short body.
    pub summary: String,
    /// Optional external link; blank means none.
    pub link: String,
}

/// `POST /admin/notices`
pub async fn create_notice(
    State(state): State<AppState>,
    AdminEmail(email): AdminEmail,
    Form(form): Form<NoticeForm>,
) -> Response {
    let draft = NewNotice::new(form.title, form.summary).with_link(form.link);
    match state.data.create_notice(draft.clone()).await {
        Ok(id) => {
            tracing::info!(%id, "Notice created");
            Redirect::to(NOTICES_PATH).into_response()
        }
        Err(e) => {
            let error = Error::from(e);
            match invalid_field(&error) {
                Some((field, message)) => unprocessable(
                    render_notices(
                        &state,
                        &email,
                        &draft,
                        Some((field.as_str(), message.as_str())),
                    )
                    .await,
                ),
                None => failure(&state, error, NOTICES_PATH),
            }
        }
    }
}

/// `POST /admin/notices/{id}/delete`
pub async fn delete_notice(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.data.delete_notice(&id).await {
        Ok(()) => {
            tracing::info!(%id, "Notice deleted");
            Redirect::to(NOTICES_PATH).into_response()
        }
        Err(e) => failure(&state, e.into(), NOTICES_PATH),
    }
}

// ============================================================================
// Inquiries
// ============================================================================

/// `?status=` filter for the inquiry list.
#[derive(Debug, Default, Deserialize)]
pub struct InquiryFilter {
    /// `all`, `pending`, `processing` or `completed`.
    pub status: Option<String>,
}

/// Parse a filter value. `all`, blank and unknown values show everything.
pub fn parse_filter(raw: Option<&str>) -> Option<InquiryStatus> {
    match raw.map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(value) => match value.parse() {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring inquiry filter");
                None
            }
        },
    }
}

fn inquiries_location(filter: Option<InquiryStatus>) -> String {
    match filter {
        Some(status) => format!("{INQUIRIES_PATH}?status={}", status.as_str()),
        None => INQUIRIES_PATH.to_string(),
    }
}

/// `GET /admin/inquiries`
pub async fn inquiries(
    State(state): State<AppState>,
    AdminEmail(email): AdminEmail,
    Query(query): Query<InquiryFilter>,
) -> Html<String> {
    let config = state.whitelabel.get_config();
    let filter = parse_filter(query.status.as_deref());
    let loaded = match filter {
        Some(status) => state.data.list_inquiries_by_status(status).await,
        None => state.data.list_inquiries().await,
    };
    let email = &email;
    match loaded {
        Ok(list) => views::admin::inquiries(&config, email, &list, filter, None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load inquiries");
            views::admin::inquiries(&config, email, &[], filter, Some(INQUIRIES_LOAD_FAILED))
        }
    }
}

/// Status change form fields.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StatusForm {
    /// Target status.
    pub status: String,
    /// Filter to return to.
    pub filter: Option<String>,
}

/// `POST /admin/inquiries/{id}/status`
pub async fn update_inquiry_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<StatusForm>,
) -> Response {
    let back = inquiries_location(parse_filter(form.filter.as_deref()));
    let status: InquiryStatus = match form.status.parse() {
        Ok(status) => status,
        Err(e) => return failure(&state, Error::from(e), &back),
    };
    match state.data.update_inquiry_status(&id, status).await {
        Ok(()) => {
            tracing::info!(%id, status = status.as_str(), "Inquiry status updated");
            Redirect::to(&back).into_response()
        }
        Err(e) => failure(&state, e.into(), &back),
    }
}

// ============================================================================
// White-label settings
// ============================================================================

/// Query flags for the settings page.
///
/// Either flag marks a return from an edit or save, which must not pull the
/// remote document over unsaved local edits.
#[derive(Debug, Default, Deserialize)]
pub struct SettingsQuery {
    /// Set after a successful save.
    pub saved: Option<u8>,
    /// Set after an in-place edit.
    pub edited: Option<u8>,
}

/// `GET /admin/settings`
///
/// Entering the page loads the stored configuration from the document
/// store. Load failures are logged and the current configuration is shown.
pub async fn settings(
    State(state): State<AppState>,
    AdminEmail(email): AdminEmail,
    Query(query): Query<SettingsQuery>,
) -> Html<String> {
    if query.saved.is_none() && query.edited.is_none() {
        match state.whitelabel.load_remote(&state.data).await {
            Ok(true) => tracing::debug!("Loaded stored white-label configuration"),
            Ok(false) => tracing::debug!("No stored white-label configuration"),
            Err(e) => tracing::warn!(error = %e, "Failed to load white-label configuration"),
        }
    }
    views::admin::settings(
        &state.whitelabel.get_config(),
        &email,
        SettingsNotice {
            saved: query.saved.is_some(),
            error: None,
        },
    )
}

/// Editor form fields. Only submitted fields change.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SettingsForm {
    /// Displayed institution name.
    pub institution_name: Option<String>,
    /// Logo URL; empty clears the logo.
    pub logo_url: Option<String>,
    /// Hero headline.
    pub main_message: Option<String>,
    /// Primary CTA label.
    pub cta_primary: Option<String>,
    /// Secondary CTA label.
    pub cta_secondary: Option<String>,
}

impl SettingsForm {
    /// Convert submitted fields into a patch.
    ///
    /// CTA labels travel as one object, so a lone label is paired with the
    /// current value of the other.
    pub fn into_patch(self, current: &WhiteLabelConfig) -> WhiteLabelPatch {
        let cta_buttons = match (self.cta_primary, self.cta_secondary) {
            (None, None) => None,
            (primary, secondary) => Some(CtaButtons::new(
                primary.unwrap_or_else(|| current.cta_buttons.primary.clone()),
                secondary.unwrap_or_else(|| current.cta_buttons.secondary.clone()),
            )),
        };
        WhiteLabelPatch {
            institution_name: self.institution_name,
            logo_url: self.logo_url.map(|url| url.trim().to_string()),
            main_message: self.main_message,
            cta_buttons,
            ..WhiteLabelPatch::new()
        }
    }
}

fn edited_location() -> String {
    format!("{SETTINGS_PATH}?edited=1")
}

/// `POST /admin/settings`
///
/// An invalid edit leaves the configuration untouched and re-renders the
/// editor with the message (422).
pub async fn update_settings(
    State(state): State<AppState>,
    AdminEmail(email): AdminEmail,
    Form(form): Form<SettingsForm>,
) -> Response {
    let current = state.whitelabel.get_config();
    let patch = form.into_patch(&current);
    if let Err(e) = patch.validate() {
        let error = Error::from(e);
        tracing::debug!(error = %error, "White-label edit rejected");
        let message = error.public_message();
        let page = views::admin::settings(
            &current,
            &email,
            SettingsNotice {
                saved: false,
                error: Some(message.as_str()),
            },
        );
        return unprocessable(page);
    }
    if !patch.is_empty() {
        state.whitelabel.update_config(patch);
        tracing::debug!("White-label configuration edited");
    }
    Redirect::to(&edited_location()).into_response()
}

/// Institution switch form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InstitutionForm {
    /// `nonghyup` or `shinhyup`.
    pub institution_type: String,
}

/// `POST /admin/settings/institution`
pub async fn switch_institution(
    State(state): State<AppState>,
    Form(form): Form<InstitutionForm>,
) -> Response {
    match form.institution_type.parse::<InstitutionType>() {
        Ok(institution_type) => {
            state.whitelabel.switch_institution(institution_type);
            tracing::info!(institution = %institution_type, "Institution type switched");
            Redirect::to(&edited_location()).into_response()
        }
        Err(e) => failure(&state, Error::from(e), SETTINGS_PATH),
    }
}

/// `POST /admin/settings/save`
///
/// Writes the current configuration to the document store. Failures are
/// shown on the settings page.
pub async fn save_settings(State(state): State<AppState>, AdminEmail(email): AdminEmail) -> Response {
    match state.whitelabel.save_remote(&state.data).await {
        Ok(()) => {
            tracing::info!("White-label configuration saved");
            Redirect::to(&format!("{SETTINGS_PATH}?saved=1")).into_response()
        }
        Err(e) => {
            let error = Error::from(e);
            tracing::error!(error = %error, "Failed to save white-label configuration");
            let page = views::admin::settings(
                &state.whitelabel.get_config(),
                &email,
                SettingsNotice {
                    saved: false,
                    error: Some(SAVE_FAILED),
                },
            );
            (error.status(), page).into_response()
        }
    }
}

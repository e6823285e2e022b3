//! Visitor-facing pages.

use axum::Form;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use localbank_core::NewInquiry;
use serde::Deserialize;

use super::{failure, invalid_field, unprocessable};
use crate::error::Error;
use crate::state::AppState;
use crate::views;

const NOTICES_LOAD_FAILED: &str = "공지사항을 불러오는데 실패했습니다.";

/// `GET /`
pub async fn home(State(state): State<AppState>) -> Html<String> {
    views::public::home(&state.whitelabel.get_config())
}

/// `GET /services`
pub async fn services(State(state): State<AppState>) -> Html<String> {
    views::public::services(&state.whitelabel.get_config())
}

/// `GET /notices`
pub async fn notices(State(state): State<AppState>) -> Html<String> {
    let config = state.whitelabel.get_config();
    match state.data.list_notices().await {
        Ok(notices) => views::public::notices(&config, &notices, None),
        Err(e) => {
            tracing::error!(error = %e, "Failed to load notices");
            views::public::notices(&config, &[], Some(NOTICES_LOAD_FAILED))
        }
    }
}

/// `GET /about`
pub async fn about(State(state): State<AppState>) -> Html<String> {
    views::public::about(&state.whitelabel.get_config())
}

/// Query flags for the inquiry page.
#[derive(Debug, Default, Deserialize)]
pub struct InquiryQuery {
    /// Set after a successful submission.
    pub submitted: Option<u8>,
}

/// `GET /inquiry`
pub async fn inquiry_form(
    State(state): State<AppState>,
    Query(query): Query<InquiryQuery>,
) -> Html<String> {
    views::public::inquiry(
        &state.whitelabel.get_config(),
        &NewInquiry::default(),
        query.submitted.is_some(),
        None,
    )
}

/// Inquiry form fields. Missing fields arrive empty and fail validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct InquiryForm {
    /// Visitor name.
    pub name: String,
    /// Phone or other contact.
    pub contact: String,
    /// Question text.
    pub content: String,
}

/// `POST /inquiry`
pub async fn submit_inquiry(
    State(state): State<AppState>,
    Form(form): Form<InquiryForm>,
) -> Response {
    let draft = NewInquiry::new(form.name, form.contact, form.content);
    match state.data.create_inquiry(draft.clone()).await {
        Ok(id) => {
            tracing::info!(%id, "Inquiry submitted");
            Redirect::to("/inquiry?submitted=1").into_response()
        }
        Err(e) => {
            let error = Error::from(e);
            match invalid_field(&error) {
                Some((field, message)) => unprocessable(views::public::inquiry(
                    &state.whitelabel.get_config(),
                    &draft,
                    false,
                    Some((field.as_str(), message.as_str())),
                )),
                None => failure(&state, error, "/inquiry"),
            }
        }
    }
}

/// Catch-all.
pub async fn not_found(State(state): State<AppState>) -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        views::layout::not_found_page(&state.whitelabel.get_config()),
    )
}

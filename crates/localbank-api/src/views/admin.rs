//! Admin console pages.

use axum::response::Html;
use localbank_core::{
    DashboardStats, Inquiry, InquiryStatus, InstitutionType, NewNotice, Notice, WhiteLabelConfig,
    brand,
};

use super::layout::{Banner, admin_page, banner, logo, page};
use super::{escape, format_date};

fn optional_banner(kind: Banner, message: Option<&str>) -> String {
    message.map(|m| banner(kind, m)).unwrap_or_default()
}

fn field_error(invalid: Option<(&str, &str)>, field: &str) -> String {
    match invalid {
        Some((f, message)) if f == field => {
            format!(r#"<p class="field-error">{}</p>"#, escape(message))
        }
        _ => String::new(),
    }
}

/// Login form. `error` is the localized auth failure, if any.
pub fn login(config: &WhiteLabelConfig, email: &str, error: Option<&str>) -> Html<String> {
    let body = format!(
        r#"<div class="container" style="max-width:440px"><h1 class="section-title">관리자 로그인</h1>
<p class="lead">LocalBank ONE 관리 시스템</p>{err}
<form class="stack card" method="post" action="/admin/login">
<label for="email">이메일</label><input id="email" name="email" type="email" value="{email}" placeholder="admin@example.com" required>
<label for="password">비밀번호</label><input id="password" name="password" type="password" required>
<p style="margin-top:1.5rem"><button class="btn btn-primary" type="submit" style="width:100%">로그인</button></p>
</form><p class="lead" style="margin-top:1rem">등록된 계정으로 로그인하세요</p>
<p style="text-align:center"><a href="/">메인 페이지로 돌아가기</a></p></div>"#,
        err = optional_banner(Banner::Error, error),
        email = escape(email),
    );
    page(config, "", "관리자 로그인", &body)
}

/// Dashboard with the four headline counts.
pub fn dashboard(
    config: &WhiteLabelConfig,
    email: &str,
    stats: &DashboardStats,
    error: Option<&str>,
) -> Html<String> {
    let cards = [
        ("전체 문의", stats.total_inquiries),
        ("대기 중 문의", stats.pending_inquiries),
        ("전체 공지", stats.total_notices),
        ("최근 7일 공지", stats.recent_notices),
    ]
    .iter()
    .map(|(label, value)| {
        format!(r#"<div class="stat"><div>{label}</div><div class="value">{value}</div></div>"#)
    })
    .collect::<String>();
    let body = format!(
        r#"{err}<div class="stats">{cards}</div>
<div class="cards"><div class="card"><h3>빠른 작업</h3>
<p><a href="/admin/notices">공지사항 작성</a></p>
<p><a href="/admin/inquiries?status=pending">대기 중 문의 확인</a></p>
<p><a href="/admin/settings">화이트라벨 설정</a></p></div>
<div class="card"><h3>시스템 안내</h3>
<p>현재 기관: {name} ({kind})</p>
<p>본 서비스는 금융 거래를 제공하지 않으며 정보 안내 및 상담 연결 목적입니다.</p></div></div>"#,
        err = optional_banner(Banner::Error, error),
        name = escape(&config.institution_name),
        kind = config.institution_type.display_name(),
    );
    admin_page(config, "/admin/dashboard", email, "대시보드", &body)
}

/// Notice management: create form and list with delete buttons.
pub fn notices(
    config: &WhiteLabelConfig,
    email: &str,
    notices: &[Notice],
    draft: &NewNotice,
    invalid: Option<(&str, &str)>,
    error: Option<&str>,
) -> Html<String> {
    let rows: String = notices
        .iter()
        .map(|n| {
            format!(
                r#"<tr><td><strong>{title}</strong><br>{summary}</td><td>{link}</td><td>{date}</td>
<td><form class="inline" method="post" action="/admin/notices/{id}/delete"><button class="btn btn-secondary btn-small" type="submit">삭제</button></form></td></tr>"#,
                title = escape(&n.title),
                summary = escape(&n.summary),
                link = n.link.as_deref().map(escape).unwrap_or_default(),
                date = format_date(&n.created_at),
                id = escape(&n.id),
            )
        })
        .collect();
    let list = if notices.is_empty() && error.is_none() {
        r#"<p>등록된 공지사항이 없습니다.</p>"#.to_string()
    } else {
        format!(
            r#"<table><thead><tr><th>제목 / 요약</th><th>링크</th><th>작성일</th><th></th></tr></thead><tbody>{rows}</tbody></table>"#
        )
    };
    let body = format!(
        r#"{err}<form class="stack card" method="post" action="/admin/notices"><h3>새 공지 작성</h3>
<label for="title">제목</label><input id="title" name="title" type="text" value="{title}" required>{title_err}
<label for="summary">요약</label><textarea id="summary" name="summary" rows="3" required>{summary}</textarea>{summary_err}
<label for="link">링크 (선택)</label><input id="link" name="link" type="url" value="{link}" placeholder="https://">{link_err}
<p style="margin-top:1rem"><button class="btn btn-primary" type="submit">공지 등록</button></p></form>
<div class="card" style="margin-top:1.5rem">{list}</div>"#,
        err = optional_banner(Banner::Error, error),
        title = escape(&draft.title),
        summary = escape(&draft.summary),
        link = draft.link.as_deref().map(escape).unwrap_or_default(),
        title_err = field_error(invalid, "title"),
        summary_err = field_error(invalid, "summary"),
        link_err = field_error(invalid, "link"),
    );
    admin_page(config, "/admin/notices", email, "공지 관리", &body)
}

fn filter_value(filter: Option<InquiryStatus>) -> &'static str {
    filter.map(|s| s.as_str()).unwrap_or("all")
}

/// Inquiry management with a status filter and per-row status buttons.
pub fn inquiries(
    config: &WhiteLabelConfig,
    email: &str,
    inquiries: &[Inquiry],
    filter: Option<InquiryStatus>,
    error: Option<&str>,
) -> Html<String> {
    let active = filter_value(filter);
    let tabs: String = std::iter::once(("all", "전체"))
        .chain(InquiryStatus::ALL.iter().map(|s| (s.as_str(), s.label())))
        .map(|(value, label)| {
            let class = if value == active {
                "btn btn-primary btn-small"
            } else {
                "btn btn-secondary btn-small"
            };
            format!(r#"<a class="{class}" href="/admin/inquiries?status={value}">{label}</a>"#)
        })
        .collect();
    let rows: String = inquiries
        .iter()
        .map(|i| {
            let buttons: String = InquiryStatus::ALL
                .iter()
                .map(|s| {
                    let disabled = if *s == i.status { " disabled" } else { "" };
                    format!(
                        r#"<form class="inline" method="post" action="/admin/inquiries/{id}/status"><input type="hidden" name="status" value="{value}"><input type="hidden" name="filter" value="{active}"><button class="btn btn-secondary btn-small" type="submit"{disabled}>{label}</button></form>"#,
                        id = escape(&i.id),
                        value = s.as_str(),
                        label = s.label(),
                    )
                })
                .collect();
            format!(
                r#"<tr><td><span class="badge badge-{status}">{label}</span></td><td><strong>{name}</strong><br>{contact}</td><td>{content}</td><td>{date}</td><td><div class="row">{buttons}</div></td></tr>"#,
                status = i.status.as_str(),
                label = i.status.label(),
                name = escape(&i.name),
                contact = escape(&i.contact),
                content = escape(&i.content),
                date = format_date(&i.created_at),
            )
        })
        .collect();
    let list = if inquiries.is_empty() && error.is_none() {
        r#"<p>해당하는 문의가 없습니다.</p>"#.to_string()
    } else {
        format!(
            r#"<table><thead><tr><th>상태</th><th>이름 / 연락처</th><th>내용</th><th>접수일</th><th>상태 변경</th></tr></thead><tbody>{rows}</tbody></table>"#
        )
    };
    let body = format!(
        r#"{err}<div class="row" style="margin-bottom:1rem">{tabs}</div><div class="card">{list}</div>"#,
        err = optional_banner(Banner::Error, error),
    );
    admin_page(config, "/admin/inquiries", email, "문의 관리", &body)
}

/// Messages shown on the settings page after a redirect or failure.
#[derive(Debug, Default, Clone, Copy)]
pub struct SettingsNotice<'a> {
    /// The configuration was written to the document store.
    pub saved: bool,
    /// Save or validation failure message.
    pub error: Option<&'a str>,
}

/// White-label editor.
pub fn settings(config: &WhiteLabelConfig, email: &str, notice: SettingsNotice<'_>) -> Html<String> {
    let t = config.institution_type;
    let types: String = InstitutionType::ALL
        .iter()
        .map(|candidate| {
            let (class, mark) = if *candidate == t {
                ("btn btn-primary", " ✓")
            } else {
                ("btn btn-secondary", "")
            };
            format!(
                r#"<form class="inline" method="post" action="/admin/settings/institution"><input type="hidden" name="institution_type" value="{value}"><button class="{class}" type="submit">{name}{mark}</button></form>"#,
                value = candidate.as_str(),
                name = candidate.display_name(),
            )
        })
        .collect();
    let messages: String = brand::main_messages(t)
        .iter()
        .map(|m| {
            let class = if *m == config.main_message {
                "btn btn-primary btn-small"
            } else {
                "btn btn-secondary btn-small"
            };
            format!(
                r#"<form class="inline" method="post" action="/admin/settings"><input type="hidden" name="main_message" value="{m}"><button class="{class}" type="submit">{m}</button></form>"#,
                m = escape(m),
            )
        })
        .collect();
    let ctas: String = brand::cta_templates(t)
        .iter()
        .map(|c| {
            let class = if c.primary == config.cta_buttons.primary {
                "btn btn-primary btn-small"
            } else {
                "btn btn-secondary btn-small"
            };
            format!(
                r#"<form class="inline" method="post" action="/admin/settings"><input type="hidden" name="cta_primary" value="{p}"><input type="hidden" name="cta_secondary" value="{s}"><button class="{class}" type="submit">{p} / {s}</button></form>"#,
                p = escape(c.primary),
                s = escape(c.secondary),
            )
        })
        .collect();
    let remove_logo = if config.logo_url.is_some() {
        r#"<form class="inline" method="post" action="/admin/settings"><input type="hidden" name="logo_url" value=""><button class="btn btn-secondary btn-small" type="submit">로고 제거</button></form>"#
    } else {
        ""
    };
    let saved = if notice.saved {
        banner(Banner::Success, "설정이 저장되었습니다.")
    } else {
        String::new()
    };
    let body = format!(
        r#"{saved}{err}
<div class="row"><form class="inline" method="post" action="/admin/settings/save"><button class="btn btn-primary" type="submit">설정 저장</button></form>
<a class="btn btn-secondary" href="/" target="_blank">미리보기</a></div>
{guide}
<div class="card"><h3>기관 유형</h3><div class="row">{types}</div><p>{tone}</p></div>
<div class="card"><h3>기관명</h3><form class="stack" method="post" action="/admin/settings">
<input name="institution_name" type="text" value="{name}" placeholder="예: 서울중앙농협, 부산신협"><p style="margin-top:.5rem"><button class="btn btn-secondary btn-small" type="submit">적용</button></p></form></div>
<div class="card"><h3>로고</h3><div class="row">{logo}{remove_logo}</div><form class="stack" method="post" action="/admin/settings">
<input name="logo_url" type="text" value="{logo_url}" placeholder="https:// 또는 data:image/..."><p style="margin-top:.5rem"><button class="btn btn-secondary btn-small" type="submit">적용</button></p></form>
<p>권장 크기: 200x200px, PNG 또는 JPG</p></div>
<div class="card"><h3>메인 메시지</h3><div class="row">{messages}</div><form class="stack" method="post" action="/admin/settings">
<label for="main_message">또는 직접 입력</label><input id="main_message" name="main_message" type="text" value="{message}" placeholder="사용자 정의 메시지 입력"><p style="margin-top:.5rem"><button class="btn btn-secondary btn-small" type="submit">적용</button></p></form></div>
<div class="card"><h3>CTA 버튼 문구</h3><div class="row">{ctas}</div><form class="stack" method="post" action="/admin/settings">
<label for="cta_primary">주 버튼</label><input id="cta_primary" name="cta_primary" type="text" value="{cta_primary}" placeholder="주 버튼 문구">
<label for="cta_secondary">부 버튼</label><input id="cta_secondary" name="cta_secondary" type="text" value="{cta_secondary}" placeholder="부 버튼 문구">
<p style="margin-top:.5rem"><button class="btn btn-secondary btn-small" type="submit">적용</button></p></form></div>"#,
        err = optional_banner(Banner::Error, notice.error),
        guide = banner(
            Banner::Info,
            "이 설정을 변경하면 전체 사이트가 즉시 반영됩니다. 원격 저장소에는 '설정 저장'을 눌러야 기록됩니다."
        ),
        tone = brand::tone_description(t),
        name = escape(&config.institution_name),
        logo = logo(config),
        logo_url = config.logo_url.as_deref().map(escape).unwrap_or_default(),
        message = escape(&config.main_message),
        cta_primary = escape(&config.cta_buttons.primary),
        cta_secondary = escape(&config.cta_buttons.secondary),
    );
    admin_page(config, "/admin/settings", email, "화이트라벨 설정", &body)
}

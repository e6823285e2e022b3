//! Public pages.

use axum::response::Html;
use localbank_core::{InstitutionType, NewInquiry, Notice, WhiteLabelConfig, brand};

use super::layout::{Banner, banner, logo, page};
use super::{escape, format_date};

/// Static service catalog: category and its products.
pub const SERVICE_CATALOG: [(&str, [&str; 3]); 4] = [
    ("예·적금", ["정기예금", "자유적금", "정기적금"]),
    ("대출", ["신용대출", "주택담보대출", "전세자금대출"]),
    ("카드", ["체크카드", "신용카드", "포인트 서비스"]),
    ("보험", ["생명보험", "손해보험", "연금보험"]),
];

const FEATURES: [(&str, &str, &str, &str); 3] = [
    ("서비스 안내", "다양한 금융 상품과 서비스를 쉽고 빠르게 확인하세요", "/services", "자세히 보기"),
    ("공지·소식", "최신 소식과 중요 공지사항을 확인하세요", "/notices", "공지 확인"),
    ("상담·문의", "궁금한 점을 언제든지 편하게 문의하세요", "/inquiry", "문의하기"),
];

const ASSURANCES: [(&str, &str); 4] = [
    ("개인정보 최소 수집", "서비스 이용에 필요한 최소한의 정보만 수집하며, 안전하게 보호합니다"),
    ("안내 및 상담 연결", "전문 상담원과의 빠른 연결을 지원하여 신속한 답변을 제공합니다"),
    ("최신 정보 제공", "최신 공지사항과 서비스 정보를 업데이트하여 제공합니다"),
    ("모바일 최적화", "언제 어디서나 모바일 기기로 편리하게 이용 가능합니다"),
];

/// Only absolute web links are rendered as anchors.
fn safe_link(link: Option<&str>) -> Option<&str> {
    link.filter(|l| l.starts_with("http://") || l.starts_with("https://"))
}

/// Home: hero with the headline and CTA buttons, then feature cards.
pub fn home(config: &WhiteLabelConfig) -> Html<String> {
    let features: String = FEATURES
        .iter()
        .map(|(title, text, href, link)| {
            format!(
                r#"<div class="card"><h3>{title}</h3><p>{text}</p><p><a href="{href}">{link} →</a></p></div>"#
            )
        })
        .collect();
    let assurances: String = ASSURANCES
        .iter()
        .map(|(title, text)| format!(r#"<div class="card"><h3>{title}</h3><p>{text}</p></div>"#))
        .collect();
    let body = format!(
        r#"<section class="hero"><p>신뢰할 수 있는 금융 파트너</p>
<h1>{message}</h1>
<p class="lead">{name}에서 제공하는 편리하고 안전한 정보 안내 서비스입니다</p>
<div class="row" style="justify-content:center">
<a class="btn btn-primary" href="/inquiry">{primary}</a>
<a class="btn btn-secondary" href="/services">{secondary}</a></div></section>
<section class="container"><h2 class="section-title">신뢰할 수 있는 금융 안내</h2>
<p class="lead">고객님의 금융 생활을 더욱 편리하게 만드는 다양한 서비스를 제공합니다</p>
<div class="cards">{features}</div></section>
<section class="container"><h2 class="section-title">안전하고 편리한 안내 서비스</h2>
<p class="lead">본 서비스는 금융 거래를 제공하지 않으며 단순 문의 및 안내 목적으로 운영됩니다</p>
<div class="cards">{assurances}</div></section>"#,
        message = escape(&config.main_message),
        name = escape(&config.institution_name),
        primary = escape(&config.cta_buttons.primary),
        secondary = escape(&config.cta_buttons.secondary),
    );
    page(config, "/", "홈", &body)
}

/// Services: the static four-category catalog.
pub fn services(config: &WhiteLabelConfig) -> Html<String> {
    let cards: String = SERVICE_CATALOG
        .iter()
        .map(|(category, items)| {
            let list: String = items.iter().map(|i| format!("<li>✓ {i}</li>")).collect();
            format!(r#"<div class="card"><h3>{category}</h3><ul style="list-style:none">{list}</ul></div>"#)
        })
        .collect();
    let body = format!(
        r#"<div class="container"><h1 class="section-title">서비스 안내</h1>
<p class="lead">{name}의 다양한 금융 상품과 서비스를 안내해 드립니다</p>
<div class="cards">{cards}</div>
{notice}</div>"#,
        name = escape(&config.institution_name),
        notice = banner(
            Banner::Info,
            "상품 가입 및 금융 거래는 가까운 영업점을 방문하시거나 상담·문의를 남겨주세요."
        ),
    );
    page(config, "/services", "서비스 안내", &body)
}

/// Notices list, or an error banner when the list could not be loaded.
pub fn notices(config: &WhiteLabelConfig, notices: &[Notice], error: Option<&str>) -> Html<String> {
    let list: String = notices
        .iter()
        .map(|n| {
            let title = escape(&n.title);
            let heading = match safe_link(n.link.as_deref()) {
                Some(link) => format!(r#"<a href="{}">{title}</a>"#, escape(link)),
                None => title,
            };
            format!(
                r#"<div class="card"><div class="row" style="justify-content:space-between"><h3>{heading}</h3><span>{date}</span></div><p>{summary}</p></div>"#,
                date = format_date(&n.created_at),
                summary = escape(&n.summary),
            )
        })
        .collect();
    let empty = if notices.is_empty() && error.is_none() {
        r#"<p class="lead">등록된 공지사항이 없습니다.</p>"#
    } else {
        ""
    };
    let body = format!(
        r#"<div class="container">{err}<h1 class="section-title">공지·소식</h1>
<p class="lead">{name}의 최신 소식과 공지사항을 확인하세요</p>
<div style="display:grid;gap:1rem">{list}</div>{empty}</div>"#,
        err = error.map(|m| banner(Banner::Error, m)).unwrap_or_default(),
        name = escape(&config.institution_name),
    );
    page(config, "/notices", "공지·소식", &body)
}

fn mission_and_vision(institution_type: InstitutionType) -> (&'static str, &'static str) {
    match institution_type {
        InstitutionType::Nonghyup => (
            "지역 주민과 농업인을 위한 신뢰할 수 있는 금융 파트너로서 지역 경제 발전에 기여합니다.",
            "디지털 혁신을 통한 농협 금융의 미래를 선도하고, 지역 주민 모두가 편리하게 이용할 수 있는 금융 서비스를 구현합니다.",
        ),
        InstitutionType::Shinhyup => (
            "조합원의 경제적·사회적 지위 향상을 위한 상호금융 서비스를 제공하고 지역 사회 발전에 이바지합니다.",
            "협동조합 정신을 바탕으로 조합원 중심의 혁신적인 금융 서비스를 제공하여 함께 성장하는 신협을 만들어갑니다.",
        ),
    }
}

/// About: institution identity, mission, vision and tone.
pub fn about(config: &WhiteLabelConfig) -> Html<String> {
    let t = config.institution_type;
    let heading = match t {
        InstitutionType::Nonghyup => "조합 소개",
        InstitutionType::Shinhyup => "기관 소개",
    };
    let (mission, vision) = mission_and_vision(t);
    let body = format!(
        r#"<div class="container"><h1 class="section-title">{heading}</h1>
<p class="lead">{name}을 소개합니다</p>
<div class="card row">{logo}<div><h2>{name}</h2><p>{message}</p></div></div>
<div class="cards"><div class="card" style="background:var(--background)"><h3>미션</h3><p>{mission}</p></div>
<div class="card" style="background:var(--background)"><h3>비전</h3><p>{vision}</p></div></div>
<p class="lead" style="margin-top:2rem">{tone}</p></div>"#,
        name = escape(&config.institution_name),
        logo = logo(config),
        message = escape(&config.main_message),
        tone = brand::tone_description(t),
    );
    page(config, "/about", heading, &body)
}

fn field_error(invalid: Option<(&str, &str)>, field: &str) -> String {
    match invalid {
        Some((f, message)) if f == field => {
            format!(r#"<p class="field-error">{}</p>"#, escape(message))
        }
        _ => String::new(),
    }
}

/// Inquiry form. `draft` refills the inputs after a rejected submission;
/// `invalid` names the failing field and its message.
pub fn inquiry(
    config: &WhiteLabelConfig,
    draft: &NewInquiry,
    submitted: bool,
    invalid: Option<(&str, &str)>,
) -> Html<String> {
    let success = if submitted {
        banner(
            Banner::Success,
            "문의가 성공적으로 접수되었습니다. 빠른 시일 내에 연락드리겠습니다.",
        )
    } else {
        String::new()
    };
    let body = format!(
        r#"<div class="container" style="max-width:720px"><h1 class="section-title">상담·문의</h1>
<p class="lead">궁금하신 점을 남겨주시면 빠르게 답변드리겠습니다</p>
{guide}{success}
<form class="stack card" method="post" action="/inquiry">
<label for="name">이름 <span class="required">*</span></label>
<input id="name" name="name" type="text" value="{name}" placeholder="이름을 입력해주세요" required>{name_err}
<label for="contact">연락처 <span class="required">*</span></label>
<input id="contact" name="contact" type="tel" value="{contact}" placeholder="연락받으실 전화번호를 입력해주세요" required>{contact_err}
<label for="content">문의 내용 <span class="required">*</span></label>
<textarea id="content" name="content" rows="6" placeholder="문의하실 내용을 자세히 작성해주세요" required>{content}</textarea>{content_err}
<p style="margin-top:1.5rem"><button class="btn btn-primary" type="submit" style="width:100%">문의하기</button></p>
</form>
<p class="lead" style="margin-top:2rem">상담 시간: 평일 09:00 ~ 18:00<br>주말 및 공휴일 접수 건은 익일 순차 처리됩니다</p></div>"#,
        guide = banner(
            Banner::Info,
            "본 서비스는 금융 거래를 제공하지 않으며 단순 문의 및 안내 목적입니다. 입력하신 정보는 상담 연결 목적으로만 사용됩니다."
        ),
        name = escape(&draft.name),
        contact = escape(&draft.contact),
        content = escape(&draft.content),
        name_err = field_error(invalid, "name"),
        contact_err = field_error(invalid, "contact"),
        content_err = field_error(invalid, "content"),
    );
    page(config, "/inquiry", "상담·문의", &body)
}

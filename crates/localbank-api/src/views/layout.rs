//! Page shells: public layout, admin layout, banners and error pages.

use axum::http::StatusCode;
use axum::response::Html;
use localbank_core::{ColorTheme, WhiteLabelConfig, is_allowed_logo_url};

use super::{css_color, escape};

const CSS: &str = r#"
*{box-sizing:border-box;margin:0;padding:0}
body{font-family:-apple-system,"Apple SD Gothic Neo","Noto Sans KR",sans-serif;color:var(--text);background:#fff;line-height:1.6}
a{color:var(--primary)}
.container{max-width:1080px;margin:0 auto;padding:2rem 1rem}
header.site{display:flex;align-items:center;justify-content:space-between;padding:1rem 2rem;border-bottom:1px solid #eee}
.brand{display:flex;align-items:center;gap:.75rem;text-decoration:none;color:var(--text);font-weight:700;font-size:1.2rem}
.brand img{width:40px;height:40px;object-fit:contain}
.initial{width:40px;height:40px;border-radius:10px;background:var(--primary);color:#fff;display:flex;align-items:center;justify-content:center;font-weight:700}
nav a{margin-left:1rem;text-decoration:none;color:var(--text);padding:.4rem .8rem;border-radius:8px}
nav a.active{background:var(--primary);color:#fff}
.hero{padding:5rem 1rem;text-align:center;background:var(--background)}
.hero h1{font-size:2.6rem;color:var(--primary);margin-bottom:1rem}
.btn{display:inline-block;padding:.8rem 1.6rem;border-radius:10px;border:none;font-weight:700;text-decoration:none;cursor:pointer;font-size:1rem}
.btn-primary{background:var(--primary);color:#fff}
.btn-secondary{background:#fff;color:var(--primary);border:2px solid var(--primary)}
.btn-small{padding:.3rem .8rem;font-size:.85rem}
.btn[disabled]{opacity:.4;cursor:not-allowed}
.cards{display:grid;grid-template-columns:repeat(auto-fit,minmax(240px,1fr));gap:1.5rem;margin-top:2rem}
.card{border:1px solid #eee;border-radius:14px;padding:1.5rem;background:#fff}
.card h3{color:var(--text);margin-bottom:.5rem}
.section-title{color:var(--primary);font-size:2rem;margin-bottom:.5rem;text-align:center}
.lead{color:#666;text-align:center;margin-bottom:2rem}
.banner{padding:1rem;border-radius:10px;margin:1rem 0}
.banner-success{background:var(--primary);color:#fff}
.banner-error{background:#fdecea;color:#8a1c1c;border:1px solid #f5c2c0}
.banner-info{background:var(--background);color:var(--text)}
form.stack label{display:block;font-weight:700;margin:1rem 0 .3rem}
form.stack input,form.stack textarea,form.stack select{width:100%;padding:.7rem;border:1px solid #ccc;border-radius:8px;font-size:1rem}
.field-error{color:#c62828;font-size:.9rem;margin-top:.3rem}
.required{color:#c62828}
table{width:100%;border-collapse:collapse}
th,td{padding:.6rem;border-bottom:1px solid #eee;text-align:left;vertical-align:top}
.badge{display:inline-block;padding:.1rem .6rem;border-radius:999px;font-size:.8rem;font-weight:700}
.badge-pending{background:#fff3e0;color:#e65100}
.badge-processing{background:#e3f2fd;color:#1565c0}
.badge-completed{background:#e8f5e9;color:#2e7d32}
.stats{display:grid;grid-template-columns:repeat(auto-fit,minmax(180px,1fr));gap:1rem}
.stat{border:1px solid #eee;border-radius:14px;padding:1.2rem}
.stat .value{font-size:2rem;font-weight:700;color:var(--primary)}
.admin{display:flex;min-height:80vh}
.admin aside{width:220px;border-right:1px solid #eee;padding:1rem}
.admin aside a{display:block;padding:.6rem .8rem;border-radius:8px;text-decoration:none;color:#333;margin-bottom:.3rem}
.admin aside a.active{background:#2563eb;color:#fff}
.admin main{flex:1;padding:2rem}
.inline{display:inline}
.row{display:flex;gap:.5rem;flex-wrap:wrap;align-items:center}
footer.site{margin-top:4rem;padding:2rem;border-top:1px solid #eee;color:#666;font-size:.9rem;text-align:center}
"#;

const PUBLIC_NAV: [(&str, &str); 5] = [
    ("/", "홈"),
    ("/services", "서비스 안내"),
    ("/notices", "공지·소식"),
    ("/about", "기관 소개"),
    ("/inquiry", "상담·문의"),
];

const ADMIN_NAV: [(&str, &str); 4] = [
    ("/admin/dashboard", "대시보드"),
    ("/admin/notices", "공지 관리"),
    ("/admin/inquiries", "문의 관리"),
    ("/admin/settings", "화이트라벨 설정"),
];

/// Banner flavors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// Completed action.
    Success,
    /// Failed load or write.
    Error,
    /// Neutral guidance.
    Info,
}

/// Render a banner block.
pub fn banner(kind: Banner, message: &str) -> String {
    let class = match kind {
        Banner::Success => "banner-success",
        Banner::Error => "banner-error",
        Banner::Info => "banner-info",
    };
    format!(
        r#"<div class="banner {class}" role="status">{}</div>"#,
        escape(message)
    )
}

fn theme_vars(theme: &ColorTheme) -> String {
    format!(
        ":root{{--primary:{};--secondary:{};--accent:{};--background:{};--text:{}}}",
        css_color(&theme.primary),
        css_color(&theme.secondary),
        css_color(&theme.accent),
        css_color(&theme.background),
        css_color(&theme.text),
    )
}

/// Logo image, or the first letter of the institution name on a
/// primary-colored tile when no usable logo is set.
pub fn logo(config: &WhiteLabelConfig) -> String {
    match config.logo_url.as_deref() {
        Some(url) if !url.is_empty() && is_allowed_logo_url(url) => format!(
            r#"<img src="{}" alt="{}">"#,
            escape(url),
            escape(&config.institution_name)
        ),
        _ => {
            let initial: String = config.institution_name.chars().take(1).collect();
            format!(r#"<span class="initial">{}</span>"#, escape(&initial))
        }
    }
}

fn document(config: &WhiteLabelConfig, title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html><html lang="ko"><head><meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title} | {name}</title><style>{vars}{CSS}</style></head>
<body>{body}</body></html>"#,
        title = escape(title),
        name = escape(&config.institution_name),
        vars = theme_vars(&config.color_theme),
    )
}

fn nav_links(items: &[(&str, &str)], active: &str) -> String {
    items
        .iter()
        .map(|(href, label)| {
            let class = if *href == active { r#" class="active""# } else { "" };
            format!(r#"<a href="{href}"{class}>{label}</a>"#)
        })
        .collect()
}

/// Wrap a public page body in the branded header, navigation and footer.
pub fn page(config: &WhiteLabelConfig, active: &str, title: &str, body: &str) -> Html<String> {
    let name = escape(&config.institution_name);
    let inner = format!(
        r#"<header class="site"><a class="brand" href="/">{logo}<span>{name}</span></a><nav>{nav}</nav></header>
<main>{body}</main>
<footer class="site"><p><strong>{name}</strong></p>
<p>지역 금융기관 디지털 안내 서비스 · 본 서비스는 금융 거래를 제공하지 않으며 정보 안내 및 상담 연결 목적입니다.</p>
<p>상담 시간: 평일 09:00 ~ 18:00</p>
<p>© {year} {name}. All rights reserved. · LocalBank ONE - Digital Service Platform</p></footer>"#,
        logo = logo(config),
        nav = nav_links(&PUBLIC_NAV, active),
        year = chrono::Utc::now().format("%Y"),
    );
    Html(document(config, title, &inner))
}

/// Wrap an admin page body in the console header and sidebar.
pub fn admin_page(
    config: &WhiteLabelConfig,
    active: &str,
    email: &str,
    title: &str,
    body: &str,
) -> Html<String> {
    let inner = format!(
        r#"<header class="site"><a class="brand" href="/admin/dashboard">LocalBank ONE 관리자</a>
<div class="row"><span>{email}</span><a href="/" target="_blank">사이트 보기</a>
<form class="inline" method="post" action="/admin/logout"><button class="btn btn-secondary btn-small" type="submit">로그아웃</button></form></div></header>
<div class="admin"><aside>{nav}</aside><main><h1>{title}</h1>{body}</main></div>"#,
        email = escape(email),
        nav = nav_links(&ADMIN_NAV, active),
        title = escape(title),
    );
    Html(document(config, title, &inner))
}

/// A failed write: static message plus a link back for a manual retry.
pub fn error_page(
    config: &WhiteLabelConfig,
    status: StatusCode,
    message: &str,
    back: &str,
) -> Html<String> {
    let body = format!(
        r#"<div class="container"><h1 class="section-title">{code}</h1>{banner}<p><a class="btn btn-primary" href="{back}">돌아가기</a></p></div>"#,
        code = status.as_u16(),
        banner = banner(Banner::Error, message),
        back = escape(back),
    );
    page(config, "", "오류", &body)
}

/// The catch-all page.
pub fn not_found_page(config: &WhiteLabelConfig) -> Html<String> {
    let body = r#"<div class="container" style="text-align:center"><h1 class="section-title" style="font-size:6rem">404</h1>
<h2>페이지를 찾을 수 없습니다</h2><p class="lead">요청하신 페이지가 존재하지 않거나 이동되었습니다.</p>
<p><a class="btn btn-primary" href="/">홈으로 돌아가기</a></p></div>"#;
    page(config, "", "페이지를 찾을 수 없습니다", body)
}

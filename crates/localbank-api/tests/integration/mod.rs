mod admin_auth;
mod admin_content;
mod inquiry;
mod public_pages;
mod settings;

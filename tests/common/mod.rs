//! Shared test utilities and fixtures
//!
//! Common infrastructure for integration tests: fragment fixtures, a
//! mock site to fetch them from, and helpers for driving a page to a
//! known state.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use vitrine_engine::{FieldEdit, Page, PageSettings, build_client};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const HEADER_FRAGMENT: &str = r##"
<header class="site-header">
  <nav>
    <a href="#about">About</a>
    <a href="#projects">Projects</a>
    <a href="#contact">Contact</a>
    <button id="mobile-menu-btn">Menu</button>
  </nav>
  <div id="mobile-menu" class="hidden">
    <a href="#about">About</a>
    <a href="#projects">Projects</a>
    <a href="#contact">Contact</a>
  </div>
</header>
"##;

pub const FOOTER_FRAGMENT: &str = r##"
<footer>
  <p>&copy; <span id="current-year"></span> Daniel Cazares</p>
</footer>
"##;

pub async fn mount_header(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/components/header.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(HEADER_FRAGMENT))
        .mount(server)
        .await;
}

pub async fn mount_footer(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/components/footer.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(FOOTER_FRAGMENT))
        .mount(server)
        .await;
}

/// A mock site serving both fragments.
pub async fn serve_fragments() -> MockServer {
    let server = MockServer::start().await;
    mount_header(&server).await;
    mount_footer(&server).await;
    server
}

pub fn settings_for(server: &MockServer) -> PageSettings {
    PageSettings {
        base_url: server.uri(),
        ..PageSettings::default()
    }
}

pub fn page_with(settings: PageSettings) -> Page {
    let client = build_client(&settings).expect("client should build");
    Page::new(settings, client)
}

pub fn page_for(server: &MockServer) -> Page {
    page_with(settings_for(server))
}

/// Tick the page with real timestamps until `done` holds.
pub async fn drive_until<F>(page: &mut Page, done: F)
where
    F: Fn(&Page) -> bool,
{
    for _ in 0..400 {
        page.tick(Instant::now());
        if done(page) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("page never reached the expected state");
}

/// A page whose fragments have already landed and bound.
pub async fn settled_page() -> (Page, MockServer) {
    let server = serve_fragments().await;
    let mut page = page_for(&server);
    page.start_loading();
    drive_until(&mut page, Page::is_settled).await;
    (page, server)
}

/// Type `text` into the currently focused form field.
pub fn type_text(page: &mut Page, text: &str) {
    for ch in text.chars() {
        page.edit_field(FieldEdit::Insert(ch));
    }
}

/// Fill all four contact fields with plausible values, in field order.
pub fn fill_contact_form(page: &mut Page) {
    page.focus_form();
    type_text(page, "Ada Lovelace");
    page.focus_next_field();
    type_text(page, "ada@example.com");
    page.focus_next_field();
    type_text(page, "Pipelines");
    page.focus_next_field();
    type_text(page, "Your deploy board gave me an idea.");
}

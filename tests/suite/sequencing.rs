//! Fragment load sequencing and the one-time binding pass.
//!
//! Header and footer load concurrently and fail independently. The
//! binding pass runs exactly once, after both outcomes are in, whatever
//! those outcomes were.

use std::time::{Duration, Instant};

use crate::common::{drive_until, mount_footer, mount_header, page_for, page_with, settled_page};
use vitrine_engine::{CellRect, FragmentKind, LayoutMap, Page, PageSettings, current_year};
use wiremock::MockServer;

#[tokio::test]
async fn both_fragments_bind_everything() {
    let (page, _server) = settled_page().await;

    assert!(page.is_settled());
    assert!(!page.is_loading());
    assert!(page.header().is_some());
    assert!(page.contact().is_some());
    assert!(page.typewriter_enabled());
    assert_eq!(page.reveals().pending(), 5);
}

#[tokio::test]
async fn missing_header_still_stamps_footer_and_binds_form() {
    let server = MockServer::start().await;
    mount_footer(&server).await;

    let mut page = page_for(&server);
    page.start_loading();
    drive_until(&mut page, Page::is_settled).await;

    assert!(page.header().is_none());
    assert!(page.contact().is_some());

    let doc = page.document();
    let mount = doc
        .element_by_dom_id(FragmentKind::Footer.mount_id())
        .expect("footer mount");
    let year = doc
        .descendant_by_dom_id(mount, "current-year")
        .expect("footer markup should have landed");
    assert_eq!(
        doc.get(year).map(|e| e.text.as_str()),
        Some(current_year().to_string().as_str())
    );
}

#[tokio::test]
async fn missing_footer_still_binds_header() {
    let server = MockServer::start().await;
    mount_header(&server).await;

    let mut page = page_for(&server);
    page.start_loading();
    drive_until(&mut page, Page::is_settled).await;

    assert!(page.header().is_some());
    assert!(page.contact().is_some());

    let doc = page.document();
    let mount = doc
        .element_by_dom_id(FragmentKind::Footer.mount_id())
        .expect("footer mount");
    assert!(
        doc.get(mount).is_some_and(|e| e.children.is_empty()),
        "failed fragment should leave its mount empty"
    );
}

#[tokio::test]
async fn both_fragments_failing_still_binds_the_base_page() {
    // No mounts at all; both fetches come back 404.
    let server = MockServer::start().await;

    let mut page = page_for(&server);
    page.start_loading();
    drive_until(&mut page, Page::is_settled).await;

    assert!(page.header().is_none());
    assert!(page.contact().is_some());
    assert!(page.typewriter_enabled());
    assert_eq!(page.reveals().pending(), 5);
}

#[tokio::test]
async fn unreachable_host_still_settles() {
    let settings = PageSettings {
        base_url: "http://127.0.0.1:9".to_string(),
        fetch_timeout: Duration::from_secs(1),
        ..PageSettings::default()
    };
    let mut page = page_with(settings);
    page.start_loading();
    drive_until(&mut page, Page::is_settled).await;

    assert!(page.header().is_none());
    assert!(page.contact().is_some());
}

#[tokio::test]
async fn binding_runs_once_not_on_every_tick() {
    let (mut page, _server) = settled_page().await;
    page.resized(40, 20);

    // Open the menu, then keep ticking. A second binding pass would
    // recreate the chrome with the menu closed.
    let button = page.header().expect("header chrome").menu_button();
    let mut layout = LayoutMap::new();
    layout.record(button, CellRect::new(0, 0, 6, 1));
    page.apply_layout(layout, 100);

    page.pointer_pressed(2, 0);
    assert!(page.header().is_some_and(|h| h.is_open()));

    for _ in 0..10 {
        page.tick(Instant::now());
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert!(page.is_settled());
    assert!(
        page.header().is_some_and(|h| h.is_open()),
        "a rebind would have closed the menu"
    );
}

#[tokio::test]
async fn repeated_start_loading_is_a_no_op() {
    let server = crate::common::serve_fragments().await;
    let mut page = page_for(&server);
    page.start_loading();
    page.start_loading();
    drive_until(&mut page, Page::is_settled).await;

    page.start_loading();
    assert!(!page.is_loading());
    assert!(page.is_settled());
}

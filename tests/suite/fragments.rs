//! Fragment fetching, parsing, and mount injection.

use crate::common::{HEADER_FRAGMENT, drive_until, page_for, settled_page};
use vitrine_engine::{FragmentKind, Page, Role, base_document, current_year, inject_fragment};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn header_markup_lands_under_its_mount() {
    let (page, _server) = settled_page().await;
    let doc = page.document();

    let mount = doc
        .element_by_dom_id(FragmentKind::Header.mount_id())
        .expect("header mount");
    assert!(doc.get(mount).is_some_and(|e| !e.children.is_empty()));

    // Three nav links plus three menu links.
    assert_eq!(doc.links_under(mount).len(), 6);
    assert!(
        doc.walk_from(mount)
            .into_iter()
            .any(|id| doc.get(id).is_some_and(|e| e.role == Role::Button)),
        "the menu button should come through as a button"
    );
}

#[tokio::test]
async fn footer_year_is_stamped_with_the_current_year() {
    let (page, _server) = settled_page().await;
    let doc = page.document();

    let mount = doc
        .element_by_dom_id(FragmentKind::Footer.mount_id())
        .expect("footer mount");
    let year = doc
        .descendant_by_dom_id(mount, "current-year")
        .expect("year span");
    assert_eq!(
        doc.get(year).map(|e| e.text.as_str()),
        Some(current_year().to_string().as_str())
    );
}

#[tokio::test]
async fn unterminated_markup_still_yields_usable_elements() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/components/header.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r##"<nav><a href="#about">About</a><button id="mobile-menu-btn">Menu</button><div id="mobile-menu"><a href="#contact">Contact</a></div>"##,
        ))
        .mount(&server)
        .await;

    let mut page = page_for(&server);
    page.start_loading();
    drive_until(&mut page, Page::is_settled).await;

    assert!(
        page.header().is_some(),
        "the parser should recover from unclosed tags"
    );
}

#[tokio::test]
async fn empty_fragment_body_binds_no_chrome() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/components/header.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;

    let mut page = page_for(&server);
    page.start_loading();
    drive_until(&mut page, Page::is_settled).await;

    assert!(page.header().is_none());
    assert!(page.contact().is_some());
}

#[test]
fn direct_injection_preserves_roles_ids_and_hrefs() {
    let mut doc = base_document();
    let mount = doc
        .element_by_dom_id(FragmentKind::Header.mount_id())
        .expect("header mount");

    inject_fragment(&mut doc, mount, HEADER_FRAGMENT);

    let menu = doc
        .descendant_by_dom_id(mount, "mobile-menu")
        .expect("menu container");
    assert_eq!(doc.links_under(menu).len(), 3);

    let about = doc
        .links_under(mount)
        .into_iter()
        .find(|id| {
            doc.get(*id)
                .is_some_and(|e| e.href.as_deref() == Some("#about"))
        })
        .expect("about link");
    assert_eq!(doc.get(about).map(|e| e.text.as_str()), Some("About"));
}

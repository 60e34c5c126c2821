//! Collapsed-menu behavior on the settled page.
//!
//! These tests hand the page a small layout by hand instead of running
//! the renderer, so the press coordinates are exact.

use crate::common::settled_page;
use vitrine_engine::{CellRect, FragmentKind, HeaderChrome, LayoutMap, Page};

fn menu_open(page: &Page) -> bool {
    page.header().is_some_and(HeaderChrome::is_open)
}

/// Narrow the page and lay out the menu button at a known spot.
fn narrow_with_button(page: &mut Page) -> CellRect {
    page.resized(40, 20);
    let button = page.header().expect("header chrome").menu_button();
    let rect = CellRect::new(0, 0, 6, 1);
    let mut layout = LayoutMap::new();
    layout.record(button, rect);
    page.apply_layout(layout, 40);
    rect
}

#[tokio::test]
async fn menu_button_press_toggles_the_menu() {
    let (mut page, _server) = settled_page().await;
    narrow_with_button(&mut page);
    assert!(!menu_open(&page));

    page.pointer_pressed(2, 0);
    assert!(menu_open(&page));
    page.pointer_pressed(2, 0);
    assert!(!menu_open(&page));
}

#[tokio::test]
async fn menu_link_press_closes_the_menu_but_a_nav_link_does_not() {
    let (mut page, _server) = settled_page().await;
    page.resized(40, 20);

    let (button, menu) = {
        let chrome = page.header().expect("header chrome");
        (chrome.menu_button(), chrome.menu())
    };
    let doc = page.document();
    let menu_links = doc.links_under(menu);
    let menu_link = menu_links[0];
    let mount = doc
        .element_by_dom_id(FragmentKind::Header.mount_id())
        .expect("header mount");
    let nav_link = doc
        .links_under(mount)
        .into_iter()
        .find(|id| !menu_links.contains(id))
        .expect("a nav link outside the menu");

    let mut layout = LayoutMap::new();
    layout.record(button, CellRect::new(0, 0, 6, 1));
    layout.record(nav_link, CellRect::new(12, 0, 8, 1));
    layout.record(menu_link, CellRect::new(0, 5, 10, 1));
    page.apply_layout(layout, 40);

    page.pointer_pressed(2, 0);
    assert!(menu_open(&page));
    page.pointer_pressed(14, 0);
    assert!(menu_open(&page), "nav links leave the menu alone");
    page.pointer_pressed(3, 5);
    assert!(!menu_open(&page), "menu links close it behind them");
}

#[tokio::test]
async fn growing_past_the_breakpoint_forces_the_menu_shut() {
    let (mut page, _server) = settled_page().await;
    narrow_with_button(&mut page);
    page.pointer_pressed(2, 0);
    assert!(menu_open(&page));

    page.resized(80, 30);
    assert!(!menu_open(&page));
    page.resized(40, 20);
    assert!(!menu_open(&page), "shrinking back does not reopen it");
}

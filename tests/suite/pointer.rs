//! Pointer effects driven through the page.

use std::time::{Duration, Instant};

use crate::common::settled_page;
use vitrine_engine::{CellRect, HoverFlavor, LayoutMap, Page, PointerState};

fn first_with_class(page: &Page, class: &str) -> vitrine_engine::ElementId {
    page.document().elements_with_class(class)[0]
}

#[tokio::test]
async fn hover_flavor_follows_the_markup() {
    let (mut page, _server) = settled_page().await;
    let trigger = first_with_class(&page, "hover-trigger");
    let card = first_with_class(&page, "card");
    let nav_link = {
        let doc = page.document();
        let menu = page.header().expect("header chrome").menu();
        let menu_links = doc.links_under(menu);
        doc.links_under(doc.root())
            .into_iter()
            .find(|id| !menu_links.contains(id))
            .expect("a link outside the menu")
    };

    let mut layout = LayoutMap::new();
    layout.record(trigger, CellRect::new(0, 0, 46, 8));
    layout.record(card, CellRect::new(0, 10, 20, 10));
    layout.record(nav_link, CellRect::new(50, 0, 8, 1));
    page.apply_layout(layout, 40);

    page.pointer_moved(5, 3);
    assert!(matches!(
        page.pointer().state(),
        PointerState::Hovering { flavor: HoverFlavor::Code, .. }
    ));

    page.pointer_moved(5, 12);
    assert!(matches!(
        page.pointer().state(),
        PointerState::Hovering { flavor: HoverFlavor::Link, .. }
    ));

    page.pointer_moved(52, 0);
    assert!(matches!(
        page.pointer().state(),
        PointerState::Hovering { flavor: HoverFlavor::Plain, .. }
    ));

    page.pointer_moved(70, 29);
    assert_eq!(*page.pointer().state(), PointerState::Idle);
}

#[tokio::test]
async fn card_tilt_tracks_then_settles_after_the_pointer_leaves() {
    let (mut page, _server) = settled_page().await;
    let card = first_with_class(&page, "card");

    let mut layout = LayoutMap::new();
    layout.record(card, CellRect::new(0, 10, 20, 10));
    page.apply_layout(layout, 40);

    page.pointer_moved(5, 12);
    assert!(!page.pointer().tilt(card).is_rest());

    // Leaving starts the release easing; the default release is 500ms.
    page.pointer_moved(60, 29);
    let t0 = Instant::now();
    page.tick(t0);
    page.tick(t0 + Duration::from_millis(250));
    assert!(!page.pointer().tilt(card).is_rest());
    page.tick(t0 + Duration::from_millis(600));
    assert!(page.pointer().tilt(card).is_rest());
}

#[tokio::test]
async fn magnet_pull_is_reserved_for_magnetic_elements() {
    let (mut page, _server) = settled_page().await;
    let cta = page.document().elements_with_class("magnetic")[0];
    let hero = page
        .document()
        .element_by_dom_id("hero")
        .expect("hero section");

    let mut layout = LayoutMap::new();
    layout.record(cta, CellRect::new(10, 20, 14, 1));
    layout.record(hero, CellRect::new(0, 0, 80, 25));
    page.apply_layout(layout, 40);

    // Rect center sits at x = 17; a pointer right of it pulls right.
    page.pointer_moved(20, 20);
    let (dx, _) = page.pointer().magnet_offset(cta);
    assert!(dx > 0.0);
    page.pointer_moved(17, 20);
    let (dx, _) = page.pointer().magnet_offset(cta);
    assert!(dx.abs() < f32::EPSILON);
    assert_eq!(page.pointer().magnet_offset(hero), (0.0, 0.0));

    page.pointer_moved(60, 5);
    let t0 = Instant::now();
    page.tick(t0);
    page.tick(t0 + Duration::from_millis(600));
    assert_eq!(page.pointer().magnet_offset(cta), (0.0, 0.0));
}

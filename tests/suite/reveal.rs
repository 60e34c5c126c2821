//! Scroll reveals driven by the page's layout and scroll band.

use std::time::{Duration, Instant};

use crate::common::settled_page;
use vitrine_engine::{CellRect, LayoutMap, RevealPhase};

#[tokio::test]
async fn below_the_fold_sections_stay_hidden() {
    let (mut page, _server) = settled_page().await;
    page.resized(80, 24);

    let about = page
        .document()
        .element_by_dom_id("about")
        .expect("about section");
    let mut layout = LayoutMap::new();
    layout.record(about, CellRect::new(0, 100, 80, 10));
    page.apply_layout(layout, 200);

    page.tick(Instant::now());
    assert!(page.reveals().is_watching(about));
    assert_eq!(page.reveals().progress(about), 0.0);
    assert_eq!(page.reveals().pending(), 5);
}

#[tokio::test]
async fn scrolling_into_view_fades_in_once_and_for_good() {
    let (mut page, _server) = settled_page().await;
    page.resized(80, 24);

    let about = page
        .document()
        .element_by_dom_id("about")
        .expect("about section");
    let mut layout = LayoutMap::new();
    layout.record(about, CellRect::new(0, 100, 80, 10));
    page.apply_layout(layout, 200);

    page.scrolled(90);
    let t0 = Instant::now();
    page.tick(t0);
    assert!(!page.reveals().is_watching(about));
    assert!(matches!(
        page.reveals().phase(about),
        Some(RevealPhase::Revealing(_))
    ));

    // Default fade is one second; halfway through it is in between.
    page.tick(t0 + Duration::from_millis(500));
    let mid = page.reveals().progress(about);
    assert!(mid > 0.0 && mid < 1.0, "mid-fade progress was {mid}");

    page.tick(t0 + Duration::from_millis(1500));
    assert!(matches!(
        page.reveals().phase(about),
        Some(RevealPhase::Revealed)
    ));

    // Scrolling away never re-hides a revealed element.
    page.scroll_to_top();
    page.tick(t0 + Duration::from_millis(1600));
    assert_eq!(page.reveals().progress(about), 1.0);
}

#[tokio::test]
async fn margin_rows_shave_the_bottom_of_the_band() {
    let (mut page, _server) = settled_page().await;
    page.resized(80, 24);

    let about = page
        .document()
        .element_by_dom_id("about")
        .expect("about section");

    // Default margin is two rows, so the effective band ends at row 22.
    // A section starting there is technically on screen but not counted.
    let mut layout = LayoutMap::new();
    layout.record(about, CellRect::new(0, 22, 80, 10));
    page.apply_layout(layout, 200);
    page.tick(Instant::now());
    assert!(page.reveals().is_watching(about));

    // One row inside the shaved band is a tenth of the section: enough.
    let mut layout = LayoutMap::new();
    layout.record(about, CellRect::new(0, 21, 80, 10));
    page.apply_layout(layout, 200);
    page.tick(Instant::now());
    assert!(!page.reveals().is_watching(about));
}

#[tokio::test]
async fn all_reveal_sections_fire_together_when_visible() {
    let (mut page, _server) = settled_page().await;
    page.resized(80, 40);

    let ids = page.document().elements_with_class("reveal");
    assert_eq!(ids.len(), 5);

    let mut layout = LayoutMap::new();
    for (i, id) in ids.iter().enumerate() {
        let y = u16::try_from(i).expect("few sections") * 6;
        layout.record(*id, CellRect::new(0, y, 80, 5));
    }
    page.apply_layout(layout, 60);

    let t0 = Instant::now();
    page.tick(t0);
    assert_eq!(page.reveals().pending(), 0);

    page.tick(t0 + Duration::from_secs(2));
    for id in ids {
        assert_eq!(page.reveals().progress(id), 1.0);
    }
}

//! Typewriter pacing through the page clock.

use std::time::{Duration, Instant};

use crate::common::{drive_until, page_with, serve_fragments, settings_for};
use vitrine_engine::{Page, TERMINAL_SCRIPT};

fn typed_chars(page: &Page) -> usize {
    page.typewriter().lines().iter().map(String::len).sum()
}

#[tokio::test]
async fn typing_starts_at_bind_and_paces_one_step_per_due_tick() {
    let server = serve_fragments().await;
    let mut settings = settings_for(&server);
    settings.type_char_delay = Duration::from_millis(10);
    settings.type_line_pause = Duration::from_millis(50);
    let mut page = page_with(settings);
    page.start_loading();
    drive_until(&mut page, Page::is_settled).await;

    // The binding tick types the first character immediately.
    assert_eq!(typed_chars(&page), 1);

    // Two ticks a millisecond apart can cross at most one deadline.
    let base = Instant::now();
    let before = typed_chars(&page);
    page.tick(base + Duration::from_millis(1));
    page.tick(base + Duration::from_millis(2));
    assert!(typed_chars(&page) - before <= 1);

    // Stepping every char-delay eventually plays out the whole script.
    for k in 1..2000u64 {
        page.tick(base + Duration::from_millis(k * 10));
        if page.typewriter().is_finished() {
            break;
        }
    }
    assert!(page.typewriter().is_finished());
    let lines = page.typewriter().lines();
    assert_eq!(lines.len(), TERMINAL_SCRIPT.len());
    for (line, expected) in lines.iter().zip(TERMINAL_SCRIPT) {
        assert_eq!(line, expected);
    }
}

#[tokio::test]
async fn reduced_motion_reveals_the_whole_script_at_bind() {
    let server = serve_fragments().await;
    let mut settings = settings_for(&server);
    settings.reduced_motion = true;
    let mut page = page_with(settings);
    page.start_loading();
    drive_until(&mut page, Page::is_settled).await;

    assert!(page.typewriter().is_finished());
    assert_eq!(page.typewriter().lines().len(), TERMINAL_SCRIPT.len());

    // Further ticks change nothing.
    let snapshot = typed_chars(&page);
    page.tick(Instant::now() + Duration::from_secs(5));
    assert_eq!(typed_chars(&page), snapshot);
}

//! Contact form submission driven through the live page.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{drive_until, fill_contact_form, page_with, serve_fragments, settings_for};
use vitrine_engine::{GENERIC_FAILURE, Page, SubmitPhase};

/// A settled page whose button restores quickly enough to test.
async fn settled_with_restore(restore: Duration) -> (Page, MockServer) {
    let server = serve_fragments().await;
    let mut settings = settings_for(&server);
    settings.restore_delay = restore;
    let mut page = page_with(settings);
    page.start_loading();
    drive_until(&mut page, Page::is_settled).await;
    (page, server)
}

fn sent(page: &Page) -> bool {
    page.contact()
        .is_some_and(|f| matches!(f.phase(), SubmitPhase::Sent { .. }))
}

fn failed(page: &Page) -> bool {
    page.contact()
        .is_some_and(|f| matches!(f.phase(), SubmitPhase::Failed { .. }))
}

fn idle(page: &Page) -> bool {
    page.contact().is_some_and(vitrine_engine::ContactForm::can_submit)
}

#[tokio::test]
async fn success_posts_the_drafts_clears_them_and_restores() {
    let (mut page, server) = settled_with_restore(Duration::from_millis(80)).await;
    Mock::given(method("POST"))
        .and(path("/api/send-email"))
        .and(body_partial_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "subject": "Pipelines",
            "message": "Your deploy board gave me an idea."
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    fill_contact_form(&mut page);
    assert!(page.submit_contact());
    assert_eq!(page.contact().expect("form").submit_label(), "Sending...");

    drive_until(&mut page, sent).await;
    let form = page.contact().expect("form");
    assert_eq!(form.submit_label(), "Message Sent!");
    assert!(form.fields().iter().all(|f| f.draft.is_empty()));

    drive_until(&mut page, idle).await;
    assert_eq!(page.contact().expect("form").submit_label(), "Send Message");
}

#[tokio::test]
async fn server_error_string_reaches_the_page() {
    let (mut page, server) = settled_with_restore(Duration::from_millis(80)).await;
    Mock::given(method("POST"))
        .and(path("/api/send-email"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": "Server configuration error: parameters missing"
        })))
        .mount(&server)
        .await;

    fill_contact_form(&mut page);
    assert!(page.submit_contact());
    drive_until(&mut page, failed).await;

    let form = page.contact().expect("form");
    assert_eq!(form.submit_label(), "Failed!");
    assert_eq!(
        form.failure_reason(),
        Some("Server configuration error: parameters missing")
    );
    // A failure keeps the drafts so the visitor can retry.
    assert_eq!(form.fields()[0].draft.text(), "Ada Lovelace");

    drive_until(&mut page, idle).await;
    assert_eq!(page.contact().expect("form").failure_reason(), None);
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_the_generic_reason() {
    let (mut page, server) = settled_with_restore(Duration::from_millis(80)).await;
    Mock::given(method("POST"))
        .and(path("/api/send-email"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    fill_contact_form(&mut page);
    assert!(page.submit_contact());
    drive_until(&mut page, failed).await;
    assert_eq!(
        page.contact().expect("form").failure_reason(),
        Some(GENERIC_FAILURE)
    );
}

#[tokio::test]
async fn unreachable_endpoint_fails_with_the_generic_reason() {
    let (mut page, server) = settled_with_restore(Duration::from_millis(80)).await;
    // Fragments are already in; losing the server now only breaks mail.
    drop(server);

    fill_contact_form(&mut page);
    assert!(page.submit_contact());
    drive_until(&mut page, failed).await;
    assert_eq!(
        page.contact().expect("form").failure_reason(),
        Some(GENERIC_FAILURE)
    );
}

#[tokio::test]
async fn empty_fields_are_the_servers_call_to_reject() {
    let (mut page, server) = settled_with_restore(Duration::from_millis(80)).await;
    Mock::given(method("POST"))
        .and(path("/api/send-email"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"error": "All fields are required"})),
        )
        .mount(&server)
        .await;

    // Submit without typing anything; the page sends what it has.
    assert!(page.submit_contact());
    drive_until(&mut page, failed).await;
    assert_eq!(
        page.contact().expect("form").failure_reason(),
        Some("All fields are required")
    );
}

#[tokio::test]
async fn a_submission_in_flight_blocks_another() {
    let (mut page, server) = settled_with_restore(Duration::from_millis(80)).await;
    Mock::given(method("POST"))
        .and(path("/api/send-email"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(1)
        .mount(&server)
        .await;

    fill_contact_form(&mut page);
    assert!(page.submit_contact());
    assert!(!page.submit_contact(), "double submit while sending");

    drive_until(&mut page, sent).await;
}

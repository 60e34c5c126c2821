//! Configuration parsing as a consumer sees it.

use std::time::Duration;

use vitrine_engine::{PageSettings, VitrineConfig};

fn resolve(text: &str) -> PageSettings {
    toml::from_str::<VitrineConfig>(text)
        .expect("config should parse")
        .resolve()
}

#[test]
fn a_full_file_resolves_every_section() {
    let settings = resolve(
        r#"
[site]
base_url = "http://localhost:5000"
footer_path = "/fragments/footer.html"
fetch_timeout_seconds = 3

[ui]
ascii_only = true
breakpoint_cols = 100

[motion]
type_line_ms = 80
reveal_margin_rows = 0
"#,
    );
    assert_eq!(settings.footer_url(), "http://localhost:5000/fragments/footer.html");
    assert_eq!(settings.fetch_timeout, Duration::from_secs(3));
    assert!(settings.ascii_only);
    assert_eq!(settings.breakpoint_cols, 100);
    assert_eq!(settings.type_line_pause, Duration::from_millis(80));
    assert_eq!(settings.reveal_margin_rows, 0);
    // Untouched knobs stay at their defaults.
    assert_eq!(settings.header_path, "/components/header.html");
    assert_eq!(settings.type_char_delay, Duration::from_millis(30));
    assert!(!settings.reduced_motion);
}

#[test]
fn unknown_keys_and_sections_are_tolerated() {
    let settings = resolve(
        r#"
theme = "dark"

[site]
base_url = "http://localhost:5000"
retries = 7

[plugins]
enabled = ["sparkles"]
"#,
    );
    assert_eq!(settings.base_url, "http://localhost:5000");
}

#[test]
fn url_joining_never_doubles_the_slash() {
    let mut settings = resolve("");
    settings.base_url = "http://localhost:5000/".to_string();
    assert_eq!(settings.header_url(), "http://localhost:5000/components/header.html");
    assert_eq!(settings.mail_url(), "http://localhost:5000/api/send-email");

    settings.mail_path = "send".to_string();
    assert_eq!(settings.mail_url(), "http://localhost:5000/send");
}

#[test]
fn default_settings_match_an_empty_file() {
    let from_empty = resolve("");
    let defaults = PageSettings::default();
    assert_eq!(defaults.base_url, from_empty.base_url);
    assert_eq!(defaults.mail_url(), from_empty.mail_url());
    assert_eq!(defaults.fetch_timeout, Duration::from_secs(10));
    assert_eq!(defaults.restore_delay, Duration::from_millis(3000));
}

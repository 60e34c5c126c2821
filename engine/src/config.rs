use serde::Deserialize;
use std::{env, path::PathBuf, time::Duration};

// Default value functions for serde (only non-zero defaults need one)
fn default_base_url() -> String {
    "https://danielcazares.dev".to_string()
}

fn default_header_path() -> String {
    "/components/header.html".to_string()
}

fn default_footer_path() -> String {
    "/components/footer.html".to_string()
}

fn default_mail_path() -> String {
    "/api/send-email".to_string()
}

const fn default_breakpoint_cols() -> u16 {
    80
}

const fn default_reveal_margin_rows() -> u16 {
    2
}

const fn default_type_char_ms() -> u64 {
    30
}

const fn default_type_line_ms() -> u64 {
    400
}

const fn default_reveal_ms() -> u64 {
    1000
}

const fn default_release_ms() -> u64 {
    500
}

const fn default_restore_ms() -> u64 {
    3000
}

const fn default_fetch_timeout_secs() -> u64 {
    10
}

/// On-disk configuration, `~/.vitrine/config.toml`.
///
/// Every section and field is optional; [`VitrineConfig::resolve`] folds the
/// file (or its absence) into concrete values.
#[derive(Debug, Default, Deserialize)]
pub struct VitrineConfig {
    pub site: Option<SiteConfig>,
    pub ui: Option<UiConfig>,
    pub motion: Option<MotionConfig>,
}

#[derive(Debug)]
pub enum ConfigError {
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Where the fragments and the mail endpoint live.
///
/// ```toml
/// [site]
/// base_url = "https://danielcazares.dev"
/// header_path = "/components/header.html"
/// footer_path = "/components/footer.html"
/// mail_path = "/api/send-email"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct SiteConfig {
    pub base_url: Option<String>,
    pub header_path: Option<String>,
    pub footer_path: Option<String>,
    pub mail_path: Option<String>,
    /// Fetch timeout in seconds for fragment and mail requests.
    pub fetch_timeout_seconds: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UiConfig {
    /// Use ASCII-only glyphs for the cursor and decorations.
    #[serde(default)]
    pub ascii_only: bool,
    /// Disable motion effects; reveals and the typewriter complete instantly.
    #[serde(default)]
    pub reduced_motion: bool,
    /// Viewport width at or above which the full nav replaces the menu button.
    pub breakpoint_cols: Option<u16>,
}

/// Timing knobs, all in milliseconds.
///
/// ```toml
/// [motion]
/// type_char_ms = 30
/// type_line_ms = 400
/// reveal_ms = 1000
/// release_ms = 500
/// restore_ms = 3000
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct MotionConfig {
    pub type_char_ms: Option<u64>,
    pub type_line_ms: Option<u64>,
    pub reveal_ms: Option<u64>,
    pub release_ms: Option<u64>,
    pub restore_ms: Option<u64>,
    /// Rows shaved off the bottom of the viewport when judging reveals.
    pub reveal_margin_rows: Option<u16>,
}

/// Fully resolved settings the page runs with.
#[derive(Debug, Clone)]
pub struct PageSettings {
    pub base_url: String,
    pub header_path: String,
    pub footer_path: String,
    pub mail_path: String,
    pub fetch_timeout: Duration,
    pub ascii_only: bool,
    pub reduced_motion: bool,
    pub breakpoint_cols: u16,
    pub reveal_margin_rows: u16,
    pub type_char_delay: Duration,
    pub type_line_pause: Duration,
    pub reveal_duration: Duration,
    pub release_duration: Duration,
    pub restore_delay: Duration,
}

impl PageSettings {
    #[must_use]
    pub fn header_url(&self) -> String {
        join_url(&self.base_url, &self.header_path)
    }

    #[must_use]
    pub fn footer_url(&self) -> String {
        join_url(&self.base_url, &self.footer_path)
    }

    #[must_use]
    pub fn mail_url(&self) -> String {
        join_url(&self.base_url, &self.mail_path)
    }
}

impl Default for PageSettings {
    fn default() -> Self {
        VitrineConfig::default().resolve()
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    if path.starts_with('/') {
        format!("{base}{path}")
    } else {
        format!("{base}/{path}")
    }
}

impl VitrineConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let path = match config_path() {
            Some(path) => path,
            None => return Ok(None),
        };
        if !path.exists() {
            return Ok(None);
        }

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read { path, source: err });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse { path, source: err })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Fold the optional file values into concrete settings.
    ///
    /// `VITRINE_BASE_URL` overrides the configured base URL when set, so a
    /// local fragment server can be pointed at without editing the file.
    #[must_use]
    pub fn resolve(&self) -> PageSettings {
        self.resolve_with(env::var("VITRINE_BASE_URL").ok())
    }

    fn resolve_with(&self, base_override: Option<String>) -> PageSettings {
        let site = self.site.as_ref();
        let ui = self.ui.as_ref();
        let motion = self.motion.as_ref();

        let base_url = base_override
            .filter(|v| !v.trim().is_empty())
            .or_else(|| site.and_then(|s| s.base_url.clone()))
            .unwrap_or_else(default_base_url);

        PageSettings {
            base_url,
            header_path: site
                .and_then(|s| s.header_path.clone())
                .unwrap_or_else(default_header_path),
            footer_path: site
                .and_then(|s| s.footer_path.clone())
                .unwrap_or_else(default_footer_path),
            mail_path: site
                .and_then(|s| s.mail_path.clone())
                .unwrap_or_else(default_mail_path),
            fetch_timeout: Duration::from_secs(
                site.and_then(|s| s.fetch_timeout_seconds)
                    .unwrap_or_else(default_fetch_timeout_secs),
            ),
            ascii_only: ui.is_some_and(|u| u.ascii_only),
            reduced_motion: ui.is_some_and(|u| u.reduced_motion),
            breakpoint_cols: ui
                .and_then(|u| u.breakpoint_cols)
                .unwrap_or_else(default_breakpoint_cols),
            reveal_margin_rows: motion
                .and_then(|m| m.reveal_margin_rows)
                .unwrap_or_else(default_reveal_margin_rows),
            type_char_delay: Duration::from_millis(
                motion
                    .and_then(|m| m.type_char_ms)
                    .unwrap_or_else(default_type_char_ms),
            ),
            type_line_pause: Duration::from_millis(
                motion
                    .and_then(|m| m.type_line_ms)
                    .unwrap_or_else(default_type_line_ms),
            ),
            reveal_duration: Duration::from_millis(
                motion
                    .and_then(|m| m.reveal_ms)
                    .unwrap_or_else(default_reveal_ms),
            ),
            release_duration: Duration::from_millis(
                motion
                    .and_then(|m| m.release_ms)
                    .unwrap_or_else(default_release_ms),
            ),
            restore_delay: Duration::from_millis(
                motion
                    .and_then(|m| m.restore_ms)
                    .unwrap_or_else(default_restore_ms),
            ),
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".vitrine").join("config.toml"))
}

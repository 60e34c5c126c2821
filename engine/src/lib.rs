//! Core engine for Vitrine - page state machine and orchestration.
//!
//! This crate contains the `Page` state machine without TUI dependencies.
//! The page owns the element tree, fetches the shared header and footer
//! fragments, and drives every timed behavior (typewriter, reveals,
//! pointer effects, form submission) from a single `tick`.

use std::time::{Duration, Instant};

use anyhow::Context as _;
use reqwest::Client;
use tokio::task::JoinHandle;

// Re-export from crates for public API
pub use vitrine_types::{
    CellRect, Document, Element, ElementId, HoverFlavor, PointerState, Role, TiltAngles, TypeStep,
    Typewriter,
};

mod base;
pub use base::{TERMINAL_SCRIPT, base_document};
mod chrome;
pub use chrome::{HeaderChrome, apply_footer_year, current_year};
mod config;
pub use config::{ConfigError, PageSettings, VitrineConfig, config_path};
mod contact;
pub use contact::{
    ContactForm, FieldDraft, FieldEdit, FormField, GENERIC_FAILURE, SendOutcome, SubmitPhase,
};
mod fragment;
pub use fragment::{FragmentError, FragmentKind, FragmentOutcome, build_client, load_fragments};
mod layout;
pub use layout::LayoutMap;
mod markup;
pub use markup::inject_fragment;
mod pointer;
pub use pointer::PointerCoordinator;
mod reveal;
pub use reveal::{REVEAL_THRESHOLD, RevealPhase, RevealWatcher};
mod scroll;
pub use scroll::ScrollState;

/// Load configuration and build the shared HTTP client.
///
/// A missing or broken config file falls back to defaults; `load` has
/// already logged the reason by the time we get here.
pub fn bootstrap() -> anyhow::Result<(PageSettings, Client)> {
    let settings = match VitrineConfig::load() {
        Ok(Some(config)) => config.resolve(),
        Ok(None) | Err(_) => PageSettings::default(),
    };
    let client = build_client(&settings).context("building HTTP client")?;
    Ok((settings, client))
}

// ============================================================================
// Load lifecycle
// ============================================================================

/// Fragment fetch lifecycle. Interactions bind exactly once, at the
/// `Loading` to `Settled` transition, however the fetches end.
#[derive(Debug)]
enum LoadState {
    Idle,
    Loading {
        task: JoinHandle<Vec<FragmentOutcome>>,
    },
    Settled,
}

/// Where keyboard input is routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageFocus {
    #[default]
    Browse,
    Form,
}

// ============================================================================
// Page - top-level state machine
// ============================================================================

/// Page state - the single source of truth for the terminal page.
#[derive(Debug)]
pub struct Page {
    settings: PageSettings,
    client: Client,
    doc: Document,
    load: LoadState,
    typewriter: Typewriter,
    typewriter_enabled: bool,
    next_type_at: Option<Instant>,
    header: Option<HeaderChrome>,
    contact: Option<ContactForm>,
    reveals: RevealWatcher,
    pointer: PointerCoordinator,
    scroll: ScrollState,
    layout: LayoutMap,
    viewport: (u16, u16),
    pointer_screen: Option<(u16, u16)>,
    focus: PageFocus,
    last_tick: Option<Instant>,
    should_quit: bool,
}

impl Page {
    #[must_use]
    pub fn new(settings: PageSettings, client: Client) -> Self {
        let script = TERMINAL_SCRIPT.iter().map(|line| (*line).to_string()).collect();
        let release = settings.release_duration;
        Self {
            settings,
            client,
            doc: base_document(),
            load: LoadState::Idle,
            typewriter: Typewriter::new(script),
            typewriter_enabled: false,
            next_type_at: None,
            header: None,
            contact: None,
            reveals: RevealWatcher::new(),
            pointer: PointerCoordinator::new(release),
            scroll: ScrollState::new(),
            layout: LayoutMap::new(),
            viewport: (0, 0),
            pointer_screen: None,
            focus: PageFocus::Browse,
            last_tick: None,
            should_quit: false,
        }
    }

    /// Kick off the header and footer fetches. Idempotent after the first call.
    pub fn start_loading(&mut self) {
        if !matches!(self.load, LoadState::Idle) {
            return;
        }
        let task = tokio::spawn(load_fragments(self.client.clone(), self.settings.clone()));
        self.load = LoadState::Loading { task };
    }

    /// Advance timers and poll background work for one frame.
    pub fn tick(&mut self, now: Instant) {
        let delta = self
            .last_tick
            .map_or(Duration::ZERO, |last| now.saturating_duration_since(last));
        self.last_tick = Some(now);

        self.poll_fragments(now);
        self.advance_typewriter(now);
        self.evaluate_reveals();
        self.reveals.advance(delta);
        self.pointer.advance(delta);
        if let Some(form) = &mut self.contact {
            form.poll(now, self.settings.restore_delay);
            form.advance_restore(now);
        }
    }

    fn poll_fragments(&mut self, now: Instant) {
        let finished = match &self.load {
            LoadState::Loading { task } => task.is_finished(),
            LoadState::Idle | LoadState::Settled => return,
        };
        if !finished {
            return;
        }

        let LoadState::Loading { mut task } = std::mem::replace(&mut self.load, LoadState::Settled)
        else {
            return;
        };

        use futures_util::future::FutureExt;
        match (&mut task).now_or_never() {
            Some(Ok(outcomes)) => {
                for outcome in outcomes {
                    let Ok(html) = &outcome.html else { continue };
                    let Some(mount) = self.doc.element_by_dom_id(outcome.kind.mount_id()) else {
                        continue;
                    };
                    inject_fragment(&mut self.doc, mount, html);
                    tracing::debug!("injected {} fragment", outcome.kind.label());
                }
            }
            Some(Err(err)) => {
                tracing::error!("fragment task panicked: {err}");
            }
            None => {
                // Edge-case: is_finished() was true but the join handle isn't
                // ready yet. Restore state and retry next tick.
                self.load = LoadState::Loading { task };
                return;
            }
        }

        self.bind_interactions(now);
    }

    /// One binding pass over whatever the fragment fetches delivered.
    ///
    /// Runs exactly once per page load. Pieces whose markup never arrived
    /// simply fail to bind and stay inert.
    fn bind_interactions(&mut self, now: Instant) {
        self.header = self
            .doc
            .element_by_dom_id(FragmentKind::Header.mount_id())
            .and_then(|mount| HeaderChrome::bind(&self.doc, mount));

        if let Some(mount) = self.doc.element_by_dom_id(FragmentKind::Footer.mount_id()) {
            apply_footer_year(&mut self.doc, mount, current_year());
        }

        self.contact = ContactForm::bind(&self.doc);

        for id in self.doc.elements_with_class("reveal") {
            self.reveals.observe(id);
        }

        self.pointer.bind(&self.doc);

        self.typewriter_enabled = self.doc.element_by_dom_id("terminal-typewriter").is_some();
        if self.typewriter_enabled {
            if self.settings.reduced_motion {
                while !matches!(self.typewriter.step(), TypeStep::Finished) {}
            } else {
                self.next_type_at = Some(now);
            }
        }
        tracing::debug!(
            header = self.header.is_some(),
            contact = self.contact.is_some(),
            reveals = self.reveals.pending(),
            "interactions bound"
        );
    }

    fn advance_typewriter(&mut self, now: Instant) {
        if !self.typewriter_enabled || self.typewriter.is_finished() {
            return;
        }
        let Some(ready_at) = self.next_type_at else {
            return;
        };
        if now < ready_at {
            return;
        }
        let delay = match self.typewriter.step() {
            TypeStep::Typed => Some(self.settings.type_char_delay),
            TypeStep::LineBreak => Some(self.settings.type_line_pause),
            TypeStep::Finished => None,
        };
        self.next_type_at = delay.map(|delay| now + delay);
    }

    fn evaluate_reveals(&mut self) {
        let (top, bottom) = self.scroll.band();
        let bottom = bottom
            .saturating_sub(self.settings.reveal_margin_rows)
            .max(top);
        let duration = self.settings.reveal_duration;
        let reduced = self.settings.reduced_motion;
        let layout = &self.layout;
        self.reveals
            .evaluate(|id| layout.visible_fraction(id, top, bottom), duration, reduced);
    }

    // ========================================================================
    // Input events
    // ========================================================================

    pub fn pointer_moved(&mut self, x: u16, y: u16) {
        self.pointer_screen = Some((x, y));
        self.refresh_pointer();
    }

    /// Press doubles as click; release is not tracked.
    pub fn pointer_pressed(&mut self, x: u16, y: u16) {
        self.pointer_moved(x, y);
        let content_y = y.saturating_add(self.scroll.offset());
        self.focus = PageFocus::Browse;

        // The menu button may overlap the open menu, so it wins outright.
        if let Some(header) = &mut self.header {
            let button = header.menu_button();
            if self
                .layout
                .get(button)
                .is_some_and(|rect| rect.contains(x, content_y))
            {
                header.toggle();
                return;
            }
        }

        let candidates: Vec<ElementId> = self
            .doc
            .walk()
            .into_iter()
            .filter(|&id| {
                self.doc.get(id).is_some_and(|element| {
                    matches!(element.role, Role::Link | Role::Button | Role::Field)
                })
            })
            .collect();
        let Some(hit) = self.layout.hit(candidates, x, content_y) else {
            return;
        };
        let (role, href) = {
            let Some(element) = self.doc.get(hit) else { return };
            (element.role, element.href.clone())
        };

        match role {
            Role::Link => {
                if let Some(header) = &mut self.header {
                    header.link_clicked(hit);
                }
                if let Some(href) = href {
                    self.follow_link(&href);
                }
            }
            Role::Button => {
                let is_submit = self
                    .contact
                    .as_ref()
                    .is_some_and(|form| form.submit_button() == Some(hit));
                if is_submit {
                    self.submit_contact();
                }
            }
            Role::Field => {
                if let Some(form) = &mut self.contact
                    && form.focus_field(hit)
                {
                    self.focus = PageFocus::Form;
                }
            }
            _ => {}
        }
    }

    fn follow_link(&mut self, href: &str) {
        let Some(anchor) = href.strip_prefix('#') else {
            tracing::debug!("external link: {href}");
            return;
        };
        if let Some(target) = self.doc.element_by_dom_id(anchor)
            && let Some(rect) = self.layout.get(target)
        {
            self.scroll.scroll_to(rect.y);
            self.refresh_pointer();
        }
    }

    pub fn scrolled(&mut self, delta: i32) {
        if self.scroll.scroll_by(delta) {
            self.refresh_pointer();
        }
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll.to_top();
        self.refresh_pointer();
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll.to_bottom();
        self.refresh_pointer();
    }

    pub fn resized(&mut self, cols: u16, rows: u16) {
        self.viewport = (cols, rows);
        self.scroll.set_viewport_rows(rows);
        if let Some(header) = &mut self.header {
            header.handle_resize(cols, self.settings.breakpoint_cols);
        }
        self.refresh_pointer();
    }

    /// Install the rects the renderer produced for the last frame.
    pub fn apply_layout(&mut self, layout: LayoutMap, content_rows: u16) {
        self.layout = layout;
        self.scroll.set_content_rows(content_rows);
        self.refresh_pointer();
    }

    /// Re-run hover hit-testing at the remembered screen position. Scrolling
    /// moves content under a stationary pointer, so hover state cannot wait
    /// for the next motion event.
    fn refresh_pointer(&mut self) {
        let Some((x, y)) = self.pointer_screen else {
            return;
        };
        let content_y = y.saturating_add(self.scroll.offset());
        self.pointer.update(x, content_y, &self.layout);
    }

    // ========================================================================
    // Contact form routing
    // ========================================================================

    pub fn edit_field(&mut self, edit: FieldEdit) {
        if self.focus != PageFocus::Form {
            return;
        }
        if let Some(field) = self.contact.as_mut().and_then(ContactForm::focused_mut) {
            field.draft.apply(edit);
        }
    }

    pub fn paste_into_field(&mut self, text: &str) {
        if self.focus != PageFocus::Form {
            return;
        }
        if let Some(field) = self.contact.as_mut().and_then(ContactForm::focused_mut) {
            field.draft.enter_text(text);
        }
    }

    pub fn focus_form(&mut self) {
        if self.contact.is_some() {
            self.focus = PageFocus::Form;
        }
    }

    pub fn blur_form(&mut self) {
        self.focus = PageFocus::Browse;
    }

    pub fn focus_next_field(&mut self) {
        if let Some(form) = &mut self.contact {
            form.focus_next();
        }
    }

    pub fn focus_prev_field(&mut self) {
        if let Some(form) = &mut self.contact {
            form.focus_prev();
        }
    }

    /// Start the mail submission if the form is bound and idle.
    pub fn submit_contact(&mut self) -> bool {
        let url = self.settings.mail_url();
        let client = self.client.clone();
        self.contact
            .as_mut()
            .is_some_and(|form| form.submit(&client, &url))
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn document(&self) -> &Document {
        &self.doc
    }

    #[must_use]
    pub fn settings(&self) -> &PageSettings {
        &self.settings
    }

    #[must_use]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    /// Whether the hero terminal is present and its script should render.
    #[must_use]
    pub fn typewriter_enabled(&self) -> bool {
        self.typewriter_enabled
    }

    #[must_use]
    pub fn header(&self) -> Option<&HeaderChrome> {
        self.header.as_ref()
    }

    #[must_use]
    pub fn contact(&self) -> Option<&ContactForm> {
        self.contact.as_ref()
    }

    #[must_use]
    pub fn reveals(&self) -> &RevealWatcher {
        &self.reveals
    }

    #[must_use]
    pub fn pointer(&self) -> &PointerCoordinator {
        &self.pointer
    }

    #[must_use]
    pub fn scroll(&self) -> &ScrollState {
        &self.scroll
    }

    #[must_use]
    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    /// Last pointer position in screen coordinates, for the cursor overlay.
    #[must_use]
    pub fn pointer_screen(&self) -> Option<(u16, u16)> {
        self.pointer_screen
    }

    #[must_use]
    pub fn focus(&self) -> PageFocus {
        self.focus
    }

    #[must_use]
    pub fn is_settled(&self) -> bool {
        matches!(self.load, LoadState::Settled)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.load, LoadState::Loading { .. })
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }
}

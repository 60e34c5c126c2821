//! Contact form state and mail submission.
//!
//! The form drafts live entirely on the page; submission POSTs them as
//! JSON to the mail endpoint from a background task. While the task is
//! in flight the submit action is disabled, and whatever the outcome,
//! the button returns to its idle label after a fixed delay.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;
use tokio::task::JoinHandle;
use unicode_segmentation::UnicodeSegmentation;

use vitrine_types::{Document, ElementId, Role};

/// Shown when the server gives no usable error string.
pub const GENERIC_FAILURE: &str = "Failed to send";

const IDLE_LABEL: &str = "Send Message";
const SENDING_LABEL: &str = "Sending...";
const SENT_LABEL: &str = "Message Sent!";
const FAILED_LABEL: &str = "Failed!";

// ---------------------------------------------------------------------------
// Field editing
// ---------------------------------------------------------------------------

/// A single editing action on the focused field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldEdit {
    Insert(char),
    Newline,
    Backspace,
    DeleteForward,
    WordBackspace,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
}

/// Editable text for one form field, cursor tracked in grapheme clusters.
#[derive(Debug, Default, Clone)]
pub struct FieldDraft {
    text: String,
    cursor: usize,
}

impl FieldDraft {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor.saturating_add(1);
        self.cursor = self.clamp_cursor(cursor_moved_right);
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor = self.grapheme_count();
    }

    pub fn enter_char(&mut self, new_char: char) {
        let index = self.byte_index();
        self.text.insert(index, new_char);
        self.move_cursor_right();
    }

    pub fn enter_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let index = self.byte_index();
        self.text.insert_str(index, text);
        let inserted = text.graphemes(true).count();
        self.cursor = self.clamp_cursor(self.cursor.saturating_add(inserted));
    }

    pub fn delete_char(&mut self) {
        if self.cursor == 0 {
            return;
        }

        let start = self.byte_index_at(self.cursor - 1);
        let end = self.byte_index_at(self.cursor);
        self.text.replace_range(start..end, "");
        self.move_cursor_left();
    }

    pub fn delete_char_forward(&mut self) {
        let grapheme_count = self.grapheme_count();
        if self.cursor >= grapheme_count {
            return;
        }

        let start = self.byte_index_at(self.cursor);
        let end = self.byte_index_at(self.cursor + 1);
        self.text.replace_range(start..end, "");
    }

    pub fn delete_word_backwards(&mut self) {
        while self.cursor > 0 {
            let idx = self.cursor - 1;
            if self.grapheme_is_whitespace(idx) {
                self.delete_char();
            } else {
                break;
            }
        }

        while self.cursor > 0 {
            let idx = self.cursor - 1;
            if self.grapheme_is_whitespace(idx) {
                break;
            }
            self.delete_char();
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn apply(&mut self, edit: FieldEdit) {
        match edit {
            FieldEdit::Insert(c) => self.enter_char(c),
            FieldEdit::Newline => self.enter_char('\n'),
            FieldEdit::Backspace => self.delete_char(),
            FieldEdit::DeleteForward => self.delete_char_forward(),
            FieldEdit::WordBackspace => self.delete_word_backwards(),
            FieldEdit::CursorLeft => self.move_cursor_left(),
            FieldEdit::CursorRight => self.move_cursor_right(),
            FieldEdit::CursorHome => self.move_cursor_home(),
            FieldEdit::CursorEnd => self.move_cursor_end(),
        }
    }

    #[must_use]
    pub fn grapheme_count(&self) -> usize {
        self.text.graphemes(true).count()
    }

    fn grapheme_is_whitespace(&self, index: usize) -> bool {
        self.text
            .graphemes(true)
            .nth(index)
            .is_some_and(|grapheme| grapheme.chars().all(char::is_whitespace))
    }

    #[must_use]
    pub fn byte_index(&self) -> usize {
        self.byte_index_at(self.cursor)
    }

    fn byte_index_at(&self, grapheme_index: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .nth(grapheme_index)
            .map_or(self.text.len(), |(i, _)| i)
    }

    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        let max = self.grapheme_count();
        new_cursor_pos.min(max)
    }
}

// ---------------------------------------------------------------------------
// Submission
// ---------------------------------------------------------------------------

/// What the mail endpoint said.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    Accepted,
    Rejected { reason: String },
}

#[derive(Debug, Deserialize)]
struct ServerError {
    #[serde(default)]
    error: String,
}

/// POSTs the drafted fields as JSON. Transport failures and non-success
/// statuses both come back as [`SendOutcome::Rejected`]; a rejection
/// carries the server's own error string when its body has one.
pub async fn send_message(
    client: &Client,
    url: &str,
    payload: &BTreeMap<String, String>,
) -> SendOutcome {
    let response = match client.post(url).json(payload).send().await {
        Ok(response) => response,
        Err(err) => {
            tracing::warn!("mail submission failed: {err}");
            return SendOutcome::Rejected {
                reason: GENERIC_FAILURE.to_string(),
            };
        }
    };

    if response.status().is_success() {
        return SendOutcome::Accepted;
    }

    let status = response.status().as_u16();
    let reason = match response.json::<ServerError>().await {
        Ok(body) if !body.error.is_empty() => body.error,
        _ => GENERIC_FAILURE.to_string(),
    };
    tracing::warn!("mail endpoint rejected submission with HTTP {status}: {reason}");
    SendOutcome::Rejected { reason }
}

/// Submission lifecycle for the form's single button.
///
/// `Sent` and `Failed` hold the button in its outcome label until the
/// restore deadline passes; only `Idle` accepts a new submission.
#[derive(Debug)]
pub enum SubmitPhase {
    Idle,
    Sending { task: JoinHandle<SendOutcome> },
    Sent { restore_at: Instant },
    Failed { reason: String, restore_at: Instant },
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct FormField {
    pub element: ElementId,
    pub name: String,
    pub draft: FieldDraft,
}

#[derive(Debug)]
pub struct ContactForm {
    form: ElementId,
    submit_button: Option<ElementId>,
    fields: Vec<FormField>,
    focus: usize,
    phase: SubmitPhase,
}

impl ContactForm {
    /// Binds to the `contact-form` element, drafting one field per named
    /// input under it. Pages without the form get no submission behavior.
    #[must_use]
    pub fn bind(doc: &Document) -> Option<Self> {
        let form = doc.element_by_dom_id("contact-form")?;
        let fields = doc
            .walk_from(form)
            .into_iter()
            .filter_map(|id| {
                let element = doc.get(id)?;
                if element.role != Role::Field {
                    return None;
                }
                let name = element.name.clone()?;
                Some(FormField {
                    element: id,
                    name,
                    draft: FieldDraft::default(),
                })
            })
            .collect::<Vec<_>>();
        let submit_button = doc
            .walk_from(form)
            .into_iter()
            .find(|id| doc.get(*id).is_some_and(|e| e.role == Role::Button));

        Some(Self {
            form,
            submit_button,
            fields,
            focus: 0,
            phase: SubmitPhase::Idle,
        })
    }

    #[must_use]
    pub fn form(&self) -> ElementId {
        self.form
    }

    #[must_use]
    pub fn submit_button(&self) -> Option<ElementId> {
        self.submit_button
    }

    #[must_use]
    pub fn fields(&self) -> &[FormField] {
        &self.fields
    }

    #[must_use]
    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    #[must_use]
    pub fn focus(&self) -> usize {
        self.focus
    }

    #[must_use]
    pub fn focused(&self) -> Option<&FormField> {
        self.fields.get(self.focus)
    }

    pub fn focused_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.focus)
    }

    pub fn focus_next(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + 1) % self.fields.len();
        }
    }

    pub fn focus_prev(&mut self) {
        if !self.fields.is_empty() {
            self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
        }
    }

    /// Moves focus to the field backed by `element`, if any.
    pub fn focus_field(&mut self, element: ElementId) -> bool {
        if let Some(index) = self.fields.iter().position(|f| f.element == element) {
            self.focus = index;
            true
        } else {
            false
        }
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        matches!(self.phase, SubmitPhase::Idle)
    }

    /// Button caption for the current phase.
    #[must_use]
    pub fn submit_label(&self) -> &str {
        match &self.phase {
            SubmitPhase::Idle => IDLE_LABEL,
            SubmitPhase::Sending { .. } => SENDING_LABEL,
            SubmitPhase::Sent { .. } => SENT_LABEL,
            SubmitPhase::Failed { .. } => FAILED_LABEL,
        }
    }

    /// Server or transport error behind a failed submission.
    #[must_use]
    pub fn failure_reason(&self) -> Option<&str> {
        match &self.phase {
            SubmitPhase::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }

    /// Starts a submission unless one is already underway or the button is
    /// still showing an outcome. Field contents are snapshotted here, so
    /// edits made while sending do not leak into the payload.
    pub fn submit(&mut self, client: &Client, url: &str) -> bool {
        if !self.can_submit() {
            return false;
        }

        let payload: BTreeMap<String, String> = self
            .fields
            .iter()
            .map(|field| (field.name.clone(), field.draft.text().to_string()))
            .collect();
        let client = client.clone();
        let url = url.to_string();
        let task = tokio::spawn(async move { send_message(&client, &url, &payload).await });
        self.phase = SubmitPhase::Sending { task };
        true
    }

    /// Polls the in-flight submission and applies its outcome. Success
    /// clears every field; any failure leaves drafts intact. Both paths
    /// arm the same restore deadline.
    pub fn poll(&mut self, now: Instant, restore_delay: Duration) {
        use futures_util::future::FutureExt;

        let finished = match &self.phase {
            SubmitPhase::Sending { task } => task.is_finished(),
            _ => return,
        };
        if !finished {
            return;
        }

        let SubmitPhase::Sending { mut task } =
            std::mem::replace(&mut self.phase, SubmitPhase::Idle)
        else {
            return;
        };

        match (&mut task).now_or_never() {
            Some(Ok(SendOutcome::Accepted)) => {
                for field in &mut self.fields {
                    field.draft.clear();
                }
                self.phase = SubmitPhase::Sent {
                    restore_at: now + restore_delay,
                };
            }
            Some(Ok(SendOutcome::Rejected { reason })) => {
                self.phase = SubmitPhase::Failed {
                    reason,
                    restore_at: now + restore_delay,
                };
            }
            Some(Err(err)) => {
                tracing::warn!("mail task panicked: {err}");
                self.phase = SubmitPhase::Failed {
                    reason: GENERIC_FAILURE.to_string(),
                    restore_at: now + restore_delay,
                };
            }
            None => {
                // Edge-case: is_finished() was true but the handle isn't
                // ready yet. Put it back and retry next tick.
                self.phase = SubmitPhase::Sending { task };
            }
        }
    }

    /// Returns the button to idle once the outcome has been shown long
    /// enough. Runs for success and failure alike.
    pub fn advance_restore(&mut self, now: Instant) {
        let ready = match &self.phase {
            SubmitPhase::Sent { restore_at } | SubmitPhase::Failed { restore_at, .. } => {
                *restore_at <= now
            }
            _ => return,
        };
        if ready {
            self.phase = SubmitPhase::Idle;
        }
    }
}

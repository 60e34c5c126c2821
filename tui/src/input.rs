//! Input handling for the Vitrine TUI.

use anyhow::{Result, anyhow};
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};
use tokio::sync::mpsc;
use tracing::debug;

use vitrine_engine::{ContactForm, FieldEdit, Page, PageFocus};

const INPUT_POLL_TIMEOUT: Duration = Duration::from_millis(25); // shutdown responsiveness
const INPUT_CHANNEL_CAPACITY: usize = 1024; // bounded: no OOM
const MAX_EVENTS_PER_FRAME: usize = 64; // never starve rendering

/// Rows moved per mouse wheel notch.
const SCROLL_STEP: i32 = 3;

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

enum InputMsg {
    Event(Event),
    Error(String),
}

/// Reads terminal events on a blocking thread and hands them to the frame loop.
pub struct InputPump {
    rx: mpsc::Receiver<InputMsg>,
    stop: Arc<AtomicBool>,
    join: Option<tokio::task::JoinHandle<()>>,
}

impl InputPump {
    #[must_use]
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel(INPUT_CHANNEL_CAPACITY);
        let stop = Arc::new(AtomicBool::new(false));
        let stop2 = stop.clone();

        let join = tokio::task::spawn_blocking(move || input_loop(stop2, tx));
        Self {
            rx,
            stop,
            join: Some(join),
        }
    }

    pub async fn shutdown(&mut self) {
        // Close the receiver first so the input thread unblocks if it is
        // currently backpressured on a send.
        self.rx.close();

        self.stop.store(true, Ordering::Release);
        if let Some(join) = self.join.take()
            && tokio::time::timeout(Duration::from_secs(2), join).await.is_err()
        {
            debug!("Input thread did not stop within 2s");
        }
    }
}

impl Default for InputPump {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for InputPump {
    fn drop(&mut self) {
        // Best-effort stop if caller exits early; do not block in Drop.
        self.rx.close();
        self.stop.store(true, Ordering::Release);
    }
}

fn input_loop(stop: Arc<AtomicBool>, tx: mpsc::Sender<InputMsg>) {
    while !stop.load(Ordering::Acquire) {
        match event::poll(INPUT_POLL_TIMEOUT) {
            Ok(true) => match event::read() {
                Ok(ev) => {
                    // Bounded queue: apply backpressure instead of dropping events.
                    if tx.blocking_send(InputMsg::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    debug!("Input read failed: {e}");
                    let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                    break;
                }
            },
            Ok(false) => {}
            Err(e) => {
                debug!("Input poll failed: {e}");
                let _ = tx.blocking_send(InputMsg::Error(e.to_string()));
                break;
            }
        }
    }
}

/// Drain pending events into the page. Returns `Ok(true)` when the app
/// should exit.
pub fn handle_events(page: &mut Page, input: &mut InputPump) -> Result<bool> {
    let mut processed = 0;
    while processed < MAX_EVENTS_PER_FRAME {
        let ev = match input.rx.try_recv() {
            Ok(InputMsg::Event(ev)) => ev,
            Ok(InputMsg::Error(msg)) => return Err(anyhow!("input error: {msg}")),
            Err(mpsc::error::TryRecvError::Empty) => break,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                return Err(anyhow!("input pump disconnected"));
            }
        };

        if apply_event(page, ev) {
            return Ok(true);
        }
        processed += 1;
    }
    Ok(page.should_quit())
}

fn apply_event(page: &mut Page, event: Event) -> bool {
    match event {
        Event::Key(key) => {
            // Handle press + repeat events (ignore releases)
            if matches!(key.kind, KeyEventKind::Release) {
                return page.should_quit();
            }

            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return true;
            }

            match page.focus() {
                PageFocus::Browse => handle_browse_keys(page, key),
                PageFocus::Form => handle_form_keys(page, key),
            }
        }
        Event::Mouse(mouse) => handle_mouse(page, mouse),
        Event::Resize(cols, rows) => page.resized(cols, rows),
        Event::Paste(text) => {
            let normalized = normalize_line_endings(&text);
            page.paste_into_field(&normalized);
        }
        _ => {}
    }
    page.should_quit()
}

fn handle_browse_keys(page: &mut Page, key: KeyEvent) {
    let half_page = i32::from(page.viewport().1 / 2).max(1);
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('d') => page.scrolled(half_page),
            KeyCode::Char('u') => page.scrolled(-half_page),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Char('q') => page.request_quit(),
        KeyCode::Char('j') | KeyCode::Down => page.scrolled(1),
        KeyCode::Char('k') | KeyCode::Up => page.scrolled(-1),
        KeyCode::Char(' ') | KeyCode::PageDown => page.scrolled(half_page),
        KeyCode::PageUp => page.scrolled(-half_page),
        KeyCode::Char('g') | KeyCode::Home => page.scroll_to_top(),
        KeyCode::Char('G') | KeyCode::End => page.scroll_to_bottom(),
        KeyCode::Tab | KeyCode::Char('i') => page.focus_form(),
        _ => {}
    }
}

fn handle_form_keys(page: &mut Page, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('w') => page.edit_field(FieldEdit::WordBackspace),
            KeyCode::Char('a') => page.edit_field(FieldEdit::CursorHome),
            KeyCode::Char('e') => page.edit_field(FieldEdit::CursorEnd),
            _ => {}
        }
        return;
    }
    match key.code {
        KeyCode::Esc => page.blur_form(),
        KeyCode::Tab => page.focus_next_field(),
        KeyCode::BackTab => page.focus_prev_field(),
        KeyCode::Enter => {
            // Enter inside the message body stays a newline; anywhere else it
            // submits, like implicit form submission in a browser.
            let in_message = page
                .contact()
                .and_then(ContactForm::focused)
                .is_some_and(|field| field.name == "message");
            if in_message {
                page.edit_field(FieldEdit::Newline);
            } else {
                page.submit_contact();
            }
        }
        KeyCode::Backspace if key.modifiers.contains(KeyModifiers::ALT) => {
            page.edit_field(FieldEdit::WordBackspace);
        }
        KeyCode::Backspace => page.edit_field(FieldEdit::Backspace),
        KeyCode::Delete => page.edit_field(FieldEdit::DeleteForward),
        KeyCode::Left => page.edit_field(FieldEdit::CursorLeft),
        KeyCode::Right => page.edit_field(FieldEdit::CursorRight),
        KeyCode::Home => page.edit_field(FieldEdit::CursorHome),
        KeyCode::End => page.edit_field(FieldEdit::CursorEnd),
        KeyCode::Char(c) => page.edit_field(FieldEdit::Insert(c)),
        _ => {}
    }
}

fn handle_mouse(page: &mut Page, mouse: MouseEvent) {
    match mouse.kind {
        MouseEventKind::Moved | MouseEventKind::Drag(_) => {
            page.pointer_moved(mouse.column, mouse.row);
        }
        MouseEventKind::Down(MouseButton::Left) => page.pointer_pressed(mouse.column, mouse.row),
        MouseEventKind::ScrollDown => page.scrolled(SCROLL_STEP),
        MouseEventKind::ScrollUp => page.scrolled(-SCROLL_STEP),
        _ => {}
    }
}

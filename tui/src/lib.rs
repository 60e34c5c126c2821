//! TUI rendering for Vitrine using ratatui.
//!
//! `draw` paints the page into the frame and returns the rects it gave
//! every element, in content coordinates. The engine feeds those rects
//! back into hit-testing and reveal visibility, so anything interactive
//! must be recorded here.

mod input;
mod theme;

pub use input::{InputPump, handle_events};
pub use theme::{Glyphs, Palette, glyphs, styles};

use ratatui::{
    Frame,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use vitrine_engine::{
    CellRect, ContactForm, ElementId, HeaderChrome, HoverFlavor, LayoutMap, Page, PageFocus,
    PointerState, Role, SubmitPhase,
};

/// Left and right content margin, in columns.
const PAD: u16 = 2;

/// Widest the hero terminal window gets.
const TERMINAL_MAX_WIDTH: u16 = 46;

/// Rows shown for the message body field.
const MESSAGE_ROWS: usize = 4;

/// What one frame produced: element rects and total content height.
#[derive(Debug)]
pub struct Rendered {
    pub layout: LayoutMap,
    pub content_rows: u16,
}

/// Main draw function.
pub fn draw(frame: &mut Frame, page: &Page) -> Rendered {
    let area = frame.area();
    let palette = Palette::standard();
    let glyphs = glyphs(page.settings().ascii_only);

    frame.render_widget(Block::default().style(Style::default().bg(palette.bg)), area);

    let mut content = Content::new(page, palette, glyphs, area.width);
    content.header();
    for id in ["hero", "about", "projects", "contact"] {
        content.section(id);
    }
    content.footer();

    let content_rows = content.row();
    let Content { lines, layout, .. } = content;
    let paragraph = Paragraph::new(lines).scroll((page.scroll().offset(), 0));
    frame.render_widget(paragraph, area);

    draw_hint_bar(frame, page, &palette);
    draw_cursor_overlay(frame, page, &palette, &glyphs);

    Rendered {
        layout,
        content_rows,
    }
}

fn draw_hint_bar(frame: &mut Frame, page: &Page, palette: &Palette) {
    let area = frame.area();
    if area.height == 0 {
        return;
    }
    let hints = match page.focus() {
        PageFocus::Browse => " q quit · j/k scroll · g/G jump · tab form · mouse to point ",
        PageFocus::Form => " esc leave form · tab next field · enter send · mouse to point ",
    };
    let line = Line::from(Span::styled(hints, styles::hint(palette)));
    let bar = ratatui::layout::Rect::new(0, area.height - 1, area.width, 1);
    frame.render_widget(Paragraph::new(line), bar);
}

fn draw_cursor_overlay(frame: &mut Frame, page: &Page, palette: &Palette, glyphs: &Glyphs) {
    if !page.pointer().has_cursor() {
        return;
    }
    let Some((x, y)) = page.pointer_screen() else {
        return;
    };
    let area = frame.area();
    if x >= area.width || y >= area.height {
        return;
    }
    let (glyph, style) = match *page.pointer().state() {
        PointerState::Hovering { flavor, .. } => match flavor {
            HoverFlavor::Code => (
                glyphs.cursor_code,
                Style::default()
                    .fg(palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            HoverFlavor::Link => (
                glyphs.cursor_link,
                Style::default()
                    .fg(palette.link)
                    .add_modifier(Modifier::BOLD),
            ),
            HoverFlavor::Plain => (
                glyphs.cursor,
                Style::default()
                    .fg(palette.text)
                    .add_modifier(Modifier::BOLD),
            ),
        },
        PointerState::Idle => (glyphs.cursor, Style::default().fg(palette.text_dim)),
    };
    let max = usize::from(area.width - x);
    frame.buffer_mut().set_stringn(x, y, glyph, max, style);
}

// ============================================================================
// Content assembly
// ============================================================================

struct Content<'a> {
    page: &'a Page,
    palette: Palette,
    glyphs: Glyphs,
    width: u16,
    text_width: u16,
    lines: Vec<Line<'static>>,
    layout: LayoutMap,
}

impl<'a> Content<'a> {
    fn new(page: &'a Page, palette: Palette, glyphs: Glyphs, width: u16) -> Self {
        Self {
            page,
            palette,
            glyphs,
            width,
            text_width: width.saturating_sub(PAD * 2),
            lines: Vec::new(),
            layout: LayoutMap::new(),
        }
    }

    fn row(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }

    fn push(&mut self, line: Line<'static>) {
        self.lines.push(line);
    }

    fn blank(&mut self) {
        self.lines.push(Line::default());
    }

    fn padded(&mut self, text: String, style: Style) {
        self.push(Line::from(vec![
            Span::raw(" ".repeat(usize::from(PAD))),
            Span::styled(text, style),
        ]));
    }

    fn text_block(&mut self, text: &str, style: Style) {
        for part in wrap(text, usize::from(self.text_width)) {
            self.padded(part, style);
        }
    }

    fn record_full_width(&mut self, id: ElementId, start: u16, end: u16) {
        let height = end.saturating_sub(start);
        if height > 0 {
            self.layout.record(id, CellRect::new(0, start, self.width, height));
        }
    }

    fn children_of(&self, id: ElementId) -> Vec<ElementId> {
        self.page
            .document()
            .get(id)
            .map(|e| e.children.clone())
            .unwrap_or_default()
    }

    fn text_of(&self, id: ElementId) -> String {
        self.page
            .document()
            .get(id)
            .map(|e| e.text.clone())
            .unwrap_or_default()
    }

    fn role_of(&self, id: ElementId) -> Option<Role> {
        self.page.document().get(id).map(|e| e.role)
    }

    fn link_style(&self, id: ElementId) -> Style {
        if self.page.pointer().state().target() == Some(id) {
            styles::link_hover(&self.palette)
        } else {
            styles::link(&self.palette)
        }
    }

    /// Render a block, then apply its reveal alpha over the produced rows.
    ///
    /// Rows are kept even while invisible so the element still occupies
    /// layout and can cross into view.
    fn reveal_block(&mut self, id: ElementId, f: impl FnOnce(&mut Self)) {
        let start = self.row();
        f(self);
        let end = self.row();

        let reveals = self.page.reveals();
        let progress = if reveals.is_watching(id) {
            0.0
        } else {
            reveals.progress(id)
        };
        if progress <= f32::EPSILON {
            for line in &mut self.lines[usize::from(start)..usize::from(end)] {
                *line = Line::default();
            }
        } else if progress < 0.999 {
            let fg = if progress < 0.5 {
                self.palette.text_faint
            } else {
                self.palette.text_dim
            };
            for line in &mut self.lines[usize::from(start)..usize::from(end)] {
                for span in &mut line.spans {
                    span.style = Style::default().fg(fg);
                }
            }
        }

        self.record_full_width(id, start, end);
    }

    // ------------------------------------------------------------------
    // Header and footer chrome
    // ------------------------------------------------------------------

    fn header(&mut self) {
        let doc = self.page.document();
        let Some(mount) = doc.element_by_dom_id("header-placeholder") else {
            return;
        };
        let Some(element) = doc.get(mount) else {
            return;
        };
        if element.children.is_empty() {
            // Nothing injected (yet); the row simply does not exist.
            return;
        }

        let chrome = self.page.header();
        let menu_links: Vec<ElementId> = chrome
            .map(|c| doc.links_under(c.menu()))
            .unwrap_or_default();
        let nav: Vec<ElementId> = doc
            .links_under(mount)
            .into_iter()
            .filter(|id| !menu_links.contains(id))
            .collect();
        let wide = self.page.viewport().0 >= self.page.settings().breakpoint_cols;

        let row = self.row();
        let mut spans = vec![Span::raw(" ".repeat(usize::from(PAD)))];
        let mut x = PAD;
        let brand = format!("{} DC", self.glyphs.prompt);
        x += width_of(&brand);
        spans.push(Span::styled(brand, styles::heading(&self.palette)));

        if wide {
            for id in &nav {
                spans.push(Span::raw("   "));
                x += 3;
                let label = self.text_of(*id);
                let w = width_of(&label);
                self.layout.record(*id, CellRect::new(x, row, w.max(1), 1));
                spans.push(Span::styled(label, self.link_style(*id)));
                x += w;
            }
        } else if let Some(chrome) = chrome {
            let button = format!("[{}]", self.glyphs.menu);
            let w = width_of(&button);
            let bx = self.width.saturating_sub(PAD + w);
            let gap = bx.saturating_sub(x);
            spans.push(Span::raw(" ".repeat(usize::from(gap))));
            self.layout
                .record(chrome.menu_button(), CellRect::new(bx, row, w.max(1), 1));
            spans.push(Span::styled(button, styles::link(&self.palette)));
        }
        self.push(Line::from(spans));

        if !wide && self.page.header().is_some_and(HeaderChrome::is_open) {
            for id in &menu_links {
                let row = self.row();
                let label = format!("{} {}", self.glyphs.bullet, self.text_of(*id));
                let w = width_of(&label);
                self.layout
                    .record(*id, CellRect::new(PAD, row, w.max(1), 1));
                self.padded(label, self.link_style(*id));
            }
        }
        self.blank();
    }

    fn footer(&mut self) {
        let doc = self.page.document();
        let Some(mount) = doc.element_by_dom_id("footer-placeholder") else {
            return;
        };
        let text = doc
            .walk_from(mount)
            .into_iter()
            .filter_map(|id| doc.get(id).map(|e| e.text.clone()))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if text.is_empty() {
            return;
        }
        self.blank();
        let w = width_of(&text);
        let x = self.width.saturating_sub(w) / 2;
        self.push(Line::from(vec![
            Span::raw(" ".repeat(usize::from(x))),
            Span::styled(text, styles::hint(&self.palette)),
        ]));
        self.blank();
    }

    // ------------------------------------------------------------------
    // Sections
    // ------------------------------------------------------------------

    fn section(&mut self, dom_id: &str) {
        let Some(id) = self.page.document().element_by_dom_id(dom_id) else {
            return;
        };
        let revealed = self
            .page
            .document()
            .get(id)
            .is_some_and(|e| e.has_class("reveal"));
        if revealed {
            self.reveal_block(id, |c| c.section_inner(id));
        } else {
            let start = self.row();
            self.section_inner(id);
            let end = self.row();
            self.record_full_width(id, start, end);
        }
        self.blank();
    }

    fn section_inner(&mut self, id: ElementId) {
        for kid in self.children_of(id) {
            match self.role_of(kid) {
                Some(Role::Heading) => {
                    let text = self.text_of(kid);
                    self.blank();
                    self.padded(text, styles::heading(&self.palette));
                    self.blank();
                }
                Some(Role::Text) => {
                    let text = self.text_of(kid);
                    self.text_block(&text, styles::body(&self.palette));
                }
                Some(Role::List) => {
                    for item in self.children_of(kid) {
                        let label = format!("{} {}", self.glyphs.bullet, self.text_of(item));
                        self.padded(label, styles::muted(&self.palette));
                    }
                }
                Some(Role::Form) => self.form(kid),
                Some(Role::Block) => {
                    let doc = self.page.document();
                    if doc.get(kid).is_some_and(|e| e.has_class("card")) {
                        self.card(kid);
                    } else if doc.descendant_by_dom_id(kid, "terminal-typewriter").is_some() {
                        self.terminal_box(kid);
                    } else if self
                        .children_of(kid)
                        .iter()
                        .any(|c| self.role_of(*c) == Some(Role::Link))
                    {
                        self.cta_row(kid);
                    }
                }
                _ => {}
            }
        }
    }

    /// The hero terminal: a fixed-size window the typewriter fills in.
    fn terminal_box(&mut self, trigger: ElementId) {
        let start = self.row();
        let g = self.glyphs;
        let box_w = usize::from(self.text_width.min(TERMINAL_MAX_WIDTH)).max(4);
        let inner = box_w - 2;
        let border = Style::default().fg(self.palette.bg_border);
        let text_style = styles::terminal_text(&self.palette);

        let title = " daniel@studio:~ ";
        let title = fit(title, inner.saturating_sub(2));
        let fill = inner.saturating_sub(2 + width_of_str(&title));
        self.padded(
            format!(
                "{}{}{title}{}{}",
                g.box_tl,
                g.box_h.repeat(2),
                g.box_h.repeat(fill),
                g.box_tr
            ),
            border,
        );

        let typewriter = self.page.typewriter();
        let shown = typewriter.lines();
        let script_rows = typewriter.script().len();
        for i in 0..script_rows {
            let mut text = shown.get(i).cloned().unwrap_or_default();
            if i + 1 == shown.len() && !typewriter.is_finished() {
                text.push_str(g.block_cursor);
            }
            let text = fit(&text, inner);
            let fill = inner.saturating_sub(width_of_str(&text));
            self.push(Line::from(vec![
                Span::raw(" ".repeat(usize::from(PAD))),
                Span::styled(g.box_v.to_string(), border),
                Span::styled(text, text_style),
                Span::raw(" ".repeat(fill)),
                Span::styled(g.box_v.to_string(), border),
            ]));
        }

        self.padded(
            format!("{}{}{}", g.box_bl, g.box_h.repeat(inner), g.box_br),
            border,
        );

        let end = self.row();
        let w = u16::try_from(box_w).unwrap_or(self.text_width);
        self.layout
            .record(trigger, CellRect::new(PAD, start, w, end - start));
    }

    /// The hero call-to-action links, rendered as magnetic buttons.
    fn cta_row(&mut self, actions: ElementId) {
        self.blank();
        let row = self.row();
        let mut spans = vec![];
        let mut x = 0u16;
        for (i, link) in self.children_of(actions).into_iter().enumerate() {
            if self.role_of(link) != Some(Role::Link) {
                continue;
            }
            let pad = if i == 0 { PAD } else { 3 };
            spans.push(Span::raw(" ".repeat(usize::from(pad))));
            x += pad;

            let (dx, _) = self.page.pointer().magnet_offset(link);
            let shift = magnet_shift(dx);
            if shift > 0 {
                spans.push(Span::raw(" ".repeat(usize::from(shift))));
            }
            x += shift;

            let label = format!("[ {} ]", self.text_of(link));
            let w = width_of(&label);
            self.layout.record(link, CellRect::new(x, row, w.max(1), 1));
            let style = if self.page.pointer().state().target() == Some(link) {
                styles::button(&self.palette).add_modifier(Modifier::UNDERLINED)
            } else {
                styles::button(&self.palette)
            };
            spans.push(Span::styled(label, style));
            x += w;
        }
        self.push(Line::from(spans));
        self.blank();
    }

    /// One project card: a bordered box that tilts toward the pointer.
    fn card(&mut self, card_id: ElementId) {
        self.reveal_block(card_id, |c| c.card_inner(card_id));
        self.blank();
    }

    fn card_inner(&mut self, card_id: ElementId) {
        let g = self.glyphs;
        let box_w = usize::from(self.text_width).max(4);
        let inner = box_w - 2;

        let tilt = self.page.pointer().tilt(card_id);
        let skew = tilt_shift(tilt.y_deg);
        let hot = tilt.scale > 1.01;
        let border = if hot {
            Style::default().fg(self.palette.accent)
        } else {
            Style::default().fg(self.palette.bg_border)
        };

        let top_pad = PAD.saturating_add_signed(skew);
        self.push(Line::from(vec![
            Span::raw(" ".repeat(usize::from(top_pad))),
            Span::styled(
                format!("{}{}{}", g.box_tl, g.box_h.repeat(inner), g.box_tr),
                border,
            ),
        ]));

        for kid in self.children_of(card_id) {
            match self.role_of(kid) {
                Some(Role::Heading) => {
                    let text = self.text_of(kid);
                    self.boxed_row(&text, styles::heading(&self.palette), border, inner);
                }
                Some(Role::Text) => {
                    let text = self.text_of(kid);
                    for part in wrap(&text, inner.saturating_sub(2)) {
                        self.boxed_row(&part, styles::muted(&self.palette), border, inner);
                    }
                }
                Some(Role::Link) => {
                    let row = self.row();
                    let label = format!("{} {}", self.text_of(kid), g.arrow);
                    let w = width_of(&label);
                    self.layout
                        .record(kid, CellRect::new(PAD + 2, row, w.max(1), 1));
                    self.boxed_row(&label, self.link_style(kid), border, inner);
                }
                _ => {}
            }
        }

        let bottom_pad = PAD.saturating_add_signed(-skew);
        self.push(Line::from(vec![
            Span::raw(" ".repeat(usize::from(bottom_pad))),
            Span::styled(
                format!("{}{}{}", g.box_bl, g.box_h.repeat(inner), g.box_br),
                border,
            ),
        ]));
    }

    fn boxed_row(&mut self, text: &str, style: Style, border: Style, inner: usize) {
        let g = self.glyphs;
        let text = fit(&format!(" {text}"), inner);
        let fill = inner.saturating_sub(width_of_str(&text));
        self.push(Line::from(vec![
            Span::raw(" ".repeat(usize::from(PAD))),
            Span::styled(g.box_v.to_string(), border),
            Span::styled(text, style),
            Span::raw(" ".repeat(fill)),
            Span::styled(g.box_v.to_string(), border),
        ]));
    }

    // ------------------------------------------------------------------
    // Contact form
    // ------------------------------------------------------------------

    fn form(&mut self, form_id: ElementId) {
        self.blank();
        for kid in self.children_of(form_id) {
            match self.role_of(kid) {
                Some(Role::Field) => self.field(kid),
                Some(Role::Button) => self.submit_row(kid),
                _ => {}
            }
        }
    }

    fn field(&mut self, field_id: ElementId) {
        let g = self.glyphs;
        let box_w = usize::from(self.text_width.min(60)).max(4);
        let inner = box_w - 2;
        let contact = self.page.contact();

        let bound = contact.and_then(|form| {
            form.fields().iter().find(|field| field.element == field_id)
        });
        let focused = self.page.focus() == PageFocus::Form
            && contact
                .and_then(ContactForm::focused)
                .is_some_and(|field| field.element == field_id);
        let is_message = self
            .page
            .document()
            .get(field_id)
            .and_then(|e| e.name.as_deref())
            == Some("message");
        let rows = if is_message { MESSAGE_ROWS } else { 1 };

        let label_style = if focused {
            styles::heading(&self.palette)
        } else {
            styles::field_label(&self.palette)
        };
        self.padded(self.text_of(field_id), label_style);

        let border = if focused {
            Style::default().fg(self.palette.accent)
        } else {
            Style::default().fg(self.palette.bg_border)
        };
        let start = self.row();
        self.padded(
            format!("{}{}{}", g.box_tl, g.box_h.repeat(inner), g.box_tr),
            border,
        );

        let text = bound.map(|field| field.draft.text().to_string()).unwrap_or_default();
        let caret_byte = bound.map_or(0, |field| field.draft.byte_index());
        self.field_rows(&text, caret_byte, focused, rows, inner, border);

        self.padded(
            format!("{}{}{}", g.box_bl, g.box_h.repeat(inner), g.box_br),
            border,
        );
        let end = self.row();
        let w = u16::try_from(box_w).unwrap_or(self.text_width);
        self.layout
            .record(field_id, CellRect::new(PAD, start, w, end - start));
        self.blank();
    }

    fn field_rows(
        &mut self,
        text: &str,
        caret_byte: usize,
        focused: bool,
        rows: usize,
        inner: usize,
        border: Style,
    ) {
        let lines: Vec<&str> = text.split('\n').collect();
        let (caret_line, caret_col) = caret_position(text, caret_byte);

        let first = if caret_line >= rows {
            caret_line + 1 - rows
        } else {
            0
        };
        for r in 0..rows {
            let idx = first + r;
            let line = lines.get(idx).copied().unwrap_or_default();
            if focused && idx == caret_line {
                self.caret_row(line, caret_col, inner, border);
            } else {
                let shown = fit(line, inner);
                let fill = inner.saturating_sub(width_of_str(&shown));
                self.push(Line::from(vec![
                    Span::raw(" ".repeat(usize::from(PAD))),
                    Span::styled(self.glyphs.box_v.to_string(), border),
                    Span::styled(shown, styles::body(&self.palette)),
                    Span::raw(" ".repeat(fill)),
                    Span::styled(self.glyphs.box_v.to_string(), border),
                ]));
            }
        }
    }

    fn caret_row(&mut self, line: &str, caret_col: usize, inner: usize, border: Style) {
        let (pre, post) = caret_window(line, caret_col, inner.saturating_sub(1));
        let used = width_of_str(&pre) + 1 + width_of_str(&post);
        let fill = inner.saturating_sub(used);
        self.push(Line::from(vec![
            Span::raw(" ".repeat(usize::from(PAD))),
            Span::styled(self.glyphs.box_v.to_string(), border),
            Span::styled(pre, styles::body(&self.palette)),
            Span::styled(
                self.glyphs.caret.to_string(),
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(post, styles::body(&self.palette)),
            Span::raw(" ".repeat(fill)),
            Span::styled(self.glyphs.box_v.to_string(), border),
        ]));
    }

    fn submit_row(&mut self, button_id: ElementId) {
        let contact = self.page.contact();
        let label = contact.map_or("Send Message", ContactForm::submit_label);
        let style = match contact.map(ContactForm::phase) {
            Some(SubmitPhase::Sending { .. }) => styles::button_busy(&self.palette),
            Some(SubmitPhase::Failed { .. }) => styles::button_failed(&self.palette),
            _ => styles::button(&self.palette),
        };

        let (dx, _) = self.page.pointer().magnet_offset(button_id);
        let shift = magnet_shift(dx);
        let x = PAD + shift;
        let row = self.row();
        let text = format!("[ {label} ]");
        let w = width_of(&text);
        self.layout
            .record(button_id, CellRect::new(x, row, w.max(1), 1));
        self.push(Line::from(vec![
            Span::raw(" ".repeat(usize::from(x))),
            Span::styled(text, style),
        ]));

        if let Some(reason) = contact.and_then(ContactForm::failure_reason) {
            let reason = reason.to_string();
            self.padded(reason, styles::error(&self.palette));
        }
    }
}

// ============================================================================
// Text measurement helpers
// ============================================================================

fn width_of(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

fn width_of_str(text: &str) -> usize {
    text.width()
}

/// Truncate to at most `width` display columns.
fn fit(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out
}

/// Greedy word wrap by display width. A word longer than the width gets a
/// line of its own rather than being split.
fn wrap(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let mut out = Vec::new();
    let mut current = String::new();
    let mut current_w = 0usize;
    for word in text.split_whitespace() {
        let w = word.width();
        if current_w == 0 {
            current.push_str(word);
            current_w = w;
        } else if current_w + 1 + w <= width {
            current.push(' ');
            current.push_str(word);
            current_w += 1 + w;
        } else {
            out.push(std::mem::take(&mut current));
            current.push_str(word);
            current_w = w;
        }
    }
    if !current.is_empty() || out.is_empty() {
        out.push(current);
    }
    out
}

/// Caret line index and char column within that line, from a byte index
/// into the draft. The column counts chars, not bytes, because
/// [`caret_window`] splits on char positions.
fn caret_position(text: &str, caret_byte: usize) -> (usize, usize) {
    let before = &text[..caret_byte.min(text.len())];
    let line = before.matches('\n').count();
    let start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[start..].chars().count())
}

/// Window a single line around the caret so the caret cell stays visible.
fn caret_window(line: &str, caret_col: usize, width: usize) -> (String, String) {
    let chars: Vec<char> = line.chars().collect();
    let caret = caret_col.min(chars.len());

    let mut pre = String::new();
    let mut used = 0usize;
    for &ch in chars[..caret].iter().rev() {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        pre.insert(0, ch);
        used += w;
    }
    let mut post = String::new();
    for &ch in &chars[caret..] {
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        post.push(ch);
        used += w;
    }
    (pre, post)
}

/// Horizontal pull toward the pointer, in columns.
fn magnet_shift(dx: f32) -> u16 {
    let cols = (dx / 4.0).round();
    if cols <= 0.0 { 0 } else { cols.min(2.0) as u16 }
}

/// Column skew for a card tilt, from the vertical-axis angle.
fn tilt_shift(y_deg: f32) -> i16 {
    ((y_deg / 5.0) * 2.0).round().clamp(-2.0, 2.0) as i16
}

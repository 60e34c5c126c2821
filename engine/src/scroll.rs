//! Vertical scroll position over the page content.

/// Clamped scroll offset in rows.
///
/// The renderer reports both the viewport height and the total content
/// height; the offset never exceeds their difference, so the page
/// cannot be scrolled past its end.
#[derive(Debug, Default, Clone, Copy)]
pub struct ScrollState {
    offset: u16,
    viewport_rows: u16,
    content_rows: u16,
}

impl ScrollState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn offset(&self) -> u16 {
        self.offset
    }

    #[must_use]
    pub fn viewport_rows(&self) -> u16 {
        self.viewport_rows
    }

    /// Rows of content currently on screen, as `[top, bottom)`.
    #[must_use]
    pub fn band(&self) -> (u16, u16) {
        (self.offset, self.offset.saturating_add(self.viewport_rows))
    }

    pub fn set_viewport_rows(&mut self, rows: u16) {
        self.viewport_rows = rows;
        self.clamp();
    }

    /// Total height of the laid-out page, reported after each draw.
    pub fn set_content_rows(&mut self, rows: u16) {
        self.content_rows = rows;
        self.clamp();
    }

    /// Scrolls by a signed number of rows. Returns whether the offset
    /// actually changed.
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let before = self.offset;
        let target = i64::from(self.offset) + i64::from(delta);
        let clamped = target.clamp(0, i64::from(self.max_offset()));
        self.offset = u16::try_from(clamped).unwrap_or(0);
        self.offset != before
    }

    pub fn scroll_to(&mut self, offset: u16) {
        self.offset = offset.min(self.max_offset());
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    fn max_offset(&self) -> u16 {
        self.content_rows.saturating_sub(self.viewport_rows)
    }

    fn clamp(&mut self) {
        self.offset = self.offset.min(self.max_offset());
    }
}

//! Screen-cell geometry shared between the engine and the renderer.
//!
//! Rects live in content coordinates: `y` counts virtual rows from the top
//! of the page, independent of the current scroll offset.

/// Axis-aligned rectangle measured in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl CellRect {
    #[must_use]
    pub fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// First column past the right edge.
    #[must_use]
    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// First row past the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    #[must_use]
    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (
            f32::from(self.x) + f32::from(self.width) / 2.0,
            f32::from(self.y) + f32::from(self.height) / 2.0,
        )
    }

    /// Position of `(x, y)` inside the rect as fractions in `[0, 1]`.
    ///
    /// Returns `None` when the point lies outside or the rect is degenerate.
    #[must_use]
    pub fn fraction_of(&self, x: u16, y: u16) -> Option<(f32, f32)> {
        if self.width == 0 || self.height == 0 || !self.contains(x, y) {
            return None;
        }
        Some((
            f32::from(x - self.x) / f32::from(self.width),
            f32::from(y - self.y) / f32::from(self.height),
        ))
    }

    /// Fraction of this rect's rows lying inside the row band `[top, bottom)`.
    ///
    /// A zero-height rect counts as fully visible when its `y` is in the band.
    #[must_use]
    pub fn visible_row_fraction(&self, top: u16, bottom: u16) -> f32 {
        if self.height == 0 {
            return if self.y >= top && self.y < bottom {
                1.0
            } else {
                0.0
            };
        }
        let overlap_top = self.y.max(top);
        let overlap_bottom = self.bottom().min(bottom);
        if overlap_bottom <= overlap_top {
            return 0.0;
        }
        f32::from(overlap_bottom - overlap_top) / f32::from(self.height)
    }
}

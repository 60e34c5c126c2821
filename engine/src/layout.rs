//! Layout feedback from the renderer.
//!
//! The renderer reports where each element landed after every draw.
//! Hit testing, reveal visibility, and the motion effects all read from
//! this map instead of guessing at geometry themselves. Elements that
//! were not drawn (off-screen or still hidden) simply have no rect.

use std::collections::HashMap;

use vitrine_types::{CellRect, ElementId};

/// Per-frame element rectangles in content coordinates.
#[derive(Debug, Default, Clone)]
pub struct LayoutMap {
    rects: HashMap<ElementId, CellRect>,
}

impl LayoutMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.rects.clear();
    }

    pub fn record(&mut self, id: ElementId, rect: CellRect) {
        self.rects.insert(id, rect);
    }

    #[must_use]
    pub fn get(&self, id: ElementId) -> Option<CellRect> {
        self.rects.get(&id).copied()
    }

    /// Fraction of the element's rows inside the band `[top, bottom)`.
    /// Elements without a rect report zero.
    #[must_use]
    pub fn visible_fraction(&self, id: ElementId, top: u16, bottom: u16) -> f32 {
        self.get(id)
            .map_or(0.0, |rect| rect.visible_row_fraction(top, bottom))
    }

    /// Innermost element of `candidates` whose rect contains the point.
    /// Later candidates win ties, so with document-ordered input a nested
    /// element beats its ancestors.
    #[must_use]
    pub fn hit<I>(&self, candidates: I, x: u16, y: u16) -> Option<ElementId>
    where
        I: IntoIterator<Item = ElementId>,
    {
        let mut best: Option<(u32, ElementId)> = None;
        for id in candidates {
            let Some(rect) = self.get(id) else { continue };
            if !rect.contains(x, y) {
                continue;
            }
            let area = u32::from(rect.width) * u32::from(rect.height);
            if best.is_none_or(|(best_area, _)| area <= best_area) {
                best = Some((area, id));
            }
        }
        best.map(|(_, id)| id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rects.is_empty()
    }
}

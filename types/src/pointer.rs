//! Pointer hover state.
//!
//! Exactly one coordinator owns a [`PointerState`]; behaviors ask it to
//! transition rather than flipping shared flags themselves.

use crate::dom::ElementId;

/// Hover styling requested by an element's cursor hint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HoverFlavor {
    /// Generic hover, no hint or an unrecognized one.
    #[default]
    Plain,
    Code,
    Link,
}

impl HoverFlavor {
    /// Maps a cursor-hint attribute value. Unknown values hover plainly.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "code" => Self::Code,
            "link" => Self::Link,
            _ => Self::Plain,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Code => "code",
            Self::Link => "link",
        }
    }
}

/// What the pointer is currently over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerState {
    #[default]
    Idle,
    Hovering {
        target: ElementId,
        flavor: HoverFlavor,
    },
}

impl PointerState {
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        matches!(self, Self::Hovering { .. })
    }

    #[must_use]
    pub fn target(&self) -> Option<ElementId> {
        match self {
            Self::Idle => None,
            Self::Hovering { target, .. } => Some(*target),
        }
    }

    #[must_use]
    pub fn flavor(&self) -> Option<HoverFlavor> {
        match self {
            Self::Idle => None,
            Self::Hovering { flavor, .. } => Some(*flavor),
        }
    }
}

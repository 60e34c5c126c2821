//! Pointer-driven presentation effects.
//!
//! One coordinator owns every pointer reaction: the custom cursor
//! glyph, hover flavor, the card tilt, and the magnetic pull on call-to-
//! action buttons. Hover styling only runs when the page has a
//! `custom-cursor` element; the tilt and magnet effects work either
//! way, mirroring how they are wired independently in the markup.

use std::collections::HashMap;
use std::time::Duration;

use vitrine_types::{
    Document, Element, ElementId, EffectTimer, HoverFlavor, PointerState, Role, TiltAngles, lerp,
    magnetic_offset, tilt_angles,
};

use crate::layout::LayoutMap;

/// Tilt lifecycle for one card.
#[derive(Debug, Clone)]
enum TiltMotion {
    Rest,
    /// Pointer is over the card; angles track it directly.
    Active(TiltAngles),
    /// Pointer left; easing back toward rest.
    Releasing { from: TiltAngles, timer: EffectTimer },
}

impl TiltMotion {
    fn current(&self) -> TiltAngles {
        match self {
            TiltMotion::Rest => TiltAngles::rest(),
            TiltMotion::Active(angles) => *angles,
            TiltMotion::Releasing { from, timer } => {
                from.toward(&TiltAngles::rest(), timer.progress())
            }
        }
    }
}

/// Pull lifecycle for one magnetic element.
#[derive(Debug, Clone)]
enum MagnetMotion {
    Rest,
    Active { offset: (f32, f32) },
    Releasing { from: (f32, f32), timer: EffectTimer },
}

impl MagnetMotion {
    fn current(&self) -> (f32, f32) {
        match self {
            MagnetMotion::Rest => (0.0, 0.0),
            MagnetMotion::Active { offset } => *offset,
            MagnetMotion::Releasing { from, timer } => {
                let t = timer.progress();
                (lerp(from.0, 0.0, t), lerp(from.1, 0.0, t))
            }
        }
    }
}

#[derive(Debug)]
pub struct PointerCoordinator {
    cursor: Option<ElementId>,
    /// Hover candidates in document order, each with its effective flavor.
    hover_targets: Vec<(ElementId, HoverFlavor)>,
    tilts: HashMap<ElementId, TiltMotion>,
    magnets: HashMap<ElementId, MagnetMotion>,
    state: PointerState,
    position: Option<(u16, u16)>,
    release: Duration,
}

impl PointerCoordinator {
    #[must_use]
    pub fn new(release: Duration) -> Self {
        Self {
            cursor: None,
            hover_targets: Vec::new(),
            tilts: HashMap::new(),
            magnets: HashMap::new(),
            state: PointerState::Idle,
            position: None,
            release,
        }
    }

    /// Re-queries every pointer-reactive element. Safe to call again after
    /// fragments land; elements that survive a rebind keep their in-flight
    /// motion state.
    pub fn bind(&mut self, doc: &Document) {
        self.cursor = doc.element_by_dom_id("custom-cursor");
        if self.cursor.is_none() {
            self.state = PointerState::Idle;
        }
        self.hover_targets = collect_hover_targets(doc);

        let mut tilts = HashMap::new();
        for id in doc.elements_with_class("card") {
            let motion = self.tilts.remove(&id).unwrap_or(TiltMotion::Rest);
            tilts.insert(id, motion);
        }
        self.tilts = tilts;

        let mut magnets = HashMap::new();
        for id in doc.elements_with_class("magnetic") {
            let motion = self.magnets.remove(&id).unwrap_or(MagnetMotion::Rest);
            magnets.insert(id, motion);
        }
        self.magnets = magnets;
    }

    /// Whether the page opted into the custom cursor at all.
    #[must_use]
    pub fn has_cursor(&self) -> bool {
        self.cursor.is_some()
    }

    #[must_use]
    pub fn state(&self) -> &PointerState {
        &self.state
    }

    /// Last known pointer cell in content coordinates.
    #[must_use]
    pub fn position(&self) -> Option<(u16, u16)> {
        self.position
    }

    #[must_use]
    pub fn tilt(&self, id: ElementId) -> TiltAngles {
        self.tilts.get(&id).map_or_else(TiltAngles::rest, TiltMotion::current)
    }

    #[must_use]
    pub fn magnet_offset(&self, id: ElementId) -> (f32, f32) {
        self.magnets.get(&id).map_or((0.0, 0.0), MagnetMotion::current)
    }

    /// Re-evaluates hover, tilt, and magnet targets for a pointer at
    /// `(x, y)` in content coordinates. Called on movement and again when
    /// scrolling shifts the content under a stationary pointer.
    pub fn update(&mut self, x: u16, y: u16, rects: &LayoutMap) {
        self.position = Some((x, y));

        if self.cursor.is_some() {
            let targets = self.hover_targets.iter().map(|(id, _)| *id);
            self.state = match rects.hit(targets, x, y) {
                Some(target) => {
                    let flavor = self
                        .hover_targets
                        .iter()
                        .find(|(id, _)| *id == target)
                        .map_or(HoverFlavor::Plain, |(_, flavor)| *flavor);
                    PointerState::Hovering { target, flavor }
                }
                None => PointerState::Idle,
            };
        }

        for (id, motion) in &mut self.tilts {
            match rects.get(*id).and_then(|rect| rect.fraction_of(x, y)) {
                Some((fx, fy)) => {
                    *motion = TiltMotion::Active(tilt_angles(fx, fy));
                }
                None => {
                    if let TiltMotion::Active(from) = *motion {
                        *motion = TiltMotion::Releasing {
                            from,
                            timer: EffectTimer::new(self.release),
                        };
                    }
                }
            }
        }

        for (id, motion) in &mut self.magnets {
            match rects.get(*id) {
                Some(rect) if rect.contains(x, y) => {
                    let offset = magnetic_offset((f32::from(x), f32::from(y)), rect.center());
                    *motion = MagnetMotion::Active { offset };
                }
                _ => {
                    if let MagnetMotion::Active { offset } = *motion {
                        *motion = MagnetMotion::Releasing {
                            from: offset,
                            timer: EffectTimer::new(self.release),
                        };
                    }
                }
            }
        }
    }

    /// Advances the release easings.
    pub fn advance(&mut self, delta: Duration) {
        for motion in self.tilts.values_mut() {
            if let TiltMotion::Releasing { timer, .. } = motion {
                timer.advance(delta);
                if timer.is_finished() {
                    *motion = TiltMotion::Rest;
                }
            }
        }
        for motion in self.magnets.values_mut() {
            if let MagnetMotion::Releasing { timer, .. } = motion {
                timer.advance(delta);
                if timer.is_finished() {
                    *motion = MagnetMotion::Rest;
                }
            }
        }
    }
}

fn is_hover_target(element: &Element) -> bool {
    matches!(element.role, Role::Link | Role::Button)
        || element.has_class("hover-trigger")
        || element.cursor_hint.is_some()
}

/// Walks the tree once, carrying the nearest ancestor's cursor hint so a
/// plain link inside a `code`-flavored region hovers with that flavor.
fn collect_hover_targets(doc: &Document) -> Vec<(ElementId, HoverFlavor)> {
    let mut targets = Vec::new();
    let mut stack = vec![(doc.root(), HoverFlavor::Plain)];
    while let Some((id, inherited)) = stack.pop() {
        let Some(element) = doc.get(id) else { continue };
        let flavor = element.cursor_hint.unwrap_or(inherited);
        if is_hover_target(element) {
            targets.push((id, flavor));
        }
        for child in element.children.iter().rev() {
            stack.push((*child, flavor));
        }
    }
    targets
}

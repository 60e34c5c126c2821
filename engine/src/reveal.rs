//! One-shot scroll reveals.
//!
//! Elements carrying the `reveal` marker start hidden and fade in the
//! first time enough of them scrolls into view. Each element reveals
//! exactly once; after that the watcher stops tracking it entirely, so
//! scrolling away and back never re-hides anything.

use std::collections::HashMap;
use std::time::Duration;

use vitrine_types::{EffectTimer, ElementId};

/// Fraction of an element's rows that must be visible to trigger it.
pub const REVEAL_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone)]
pub enum RevealPhase {
    Hidden,
    Revealing(EffectTimer),
    Revealed,
}

impl RevealPhase {
    /// 0.0 fully hidden, 1.0 fully shown.
    #[must_use]
    pub fn progress(&self) -> f32 {
        match self {
            RevealPhase::Hidden => 0.0,
            RevealPhase::Revealing(timer) => timer.progress(),
            RevealPhase::Revealed => 1.0,
        }
    }
}

#[derive(Debug, Default)]
pub struct RevealWatcher {
    /// Elements still waiting to cross the threshold.
    observed: Vec<ElementId>,
    phases: HashMap<ElementId, RevealPhase>,
}

impl RevealWatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts tracking `id` as hidden. Observing an element twice, or one
    /// that already revealed, changes nothing.
    pub fn observe(&mut self, id: ElementId) {
        if self.phases.contains_key(&id) {
            return;
        }
        self.phases.insert(id, RevealPhase::Hidden);
        self.observed.push(id);
    }

    /// Checks every still-watched element against the visibility oracle
    /// and starts its reveal once the threshold is met. A triggered
    /// element leaves the watch list immediately.
    pub fn evaluate<F>(&mut self, visible_fraction: F, duration: Duration, reduced_motion: bool)
    where
        F: Fn(ElementId) -> f32,
    {
        self.observed.retain(|id| {
            if visible_fraction(*id) < REVEAL_THRESHOLD {
                return true;
            }
            let phase = if reduced_motion || duration.is_zero() {
                RevealPhase::Revealed
            } else {
                RevealPhase::Revealing(EffectTimer::new(duration))
            };
            self.phases.insert(*id, phase);
            false
        });
    }

    /// Advances in-flight reveal timers.
    pub fn advance(&mut self, delta: Duration) {
        for phase in self.phases.values_mut() {
            if let RevealPhase::Revealing(timer) = phase {
                timer.advance(delta);
                if timer.is_finished() {
                    *phase = RevealPhase::Revealed;
                }
            }
        }
    }

    /// Phase for a tracked element. Untracked elements have no reveal
    /// styling and render at full strength.
    #[must_use]
    pub fn phase(&self, id: ElementId) -> Option<&RevealPhase> {
        self.phases.get(&id)
    }

    /// 0.0 hidden through 1.0 shown; 1.0 for elements never observed.
    #[must_use]
    pub fn progress(&self, id: ElementId) -> f32 {
        self.phases.get(&id).map_or(1.0, RevealPhase::progress)
    }

    #[must_use]
    pub fn is_watching(&self, id: ElementId) -> bool {
        self.observed.contains(&id)
    }

    /// Elements still hidden and waiting.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.observed.len()
    }
}

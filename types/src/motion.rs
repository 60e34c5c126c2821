//! Motion math for the cosmetic effects.
//!
//! All interpolation is linear. The renderer decides what a tilt or an
//! offset looks like in cells; this module only produces the numbers.

use std::time::Duration;

/// Maximum tilt in either axis, in degrees.
pub const TILT_MAX_DEG: f32 = 5.0;
/// Scale applied to a card while tilted.
pub const TILT_SCALE: f32 = 1.02;
/// Fraction of the pointer's displacement a magnetic control follows.
pub const MAGNET_FACTOR: f32 = 0.2;

#[must_use]
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t.clamp(0.0, 1.0)
}

#[must_use]
pub fn normalized_progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }

    let elapsed = elapsed.as_secs_f32();
    let total = duration.as_secs_f32();
    (elapsed / total).clamp(0.0, 1.0)
}

/// Tracks elapsed time against a fixed duration for one effect.
#[derive(Debug, Clone)]
pub struct EffectTimer {
    elapsed: Duration,
    duration: Duration,
}

impl EffectTimer {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration,
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        self.elapsed = self.elapsed.saturating_add(delta);
    }

    #[must_use]
    pub fn progress(&self) -> f32 {
        normalized_progress(self.elapsed, self.duration)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Orientation of a tilted card.
///
/// `x_deg` rotates about the horizontal axis (driven by the pointer's
/// vertical position), `y_deg` about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TiltAngles {
    pub x_deg: f32,
    pub y_deg: f32,
    pub scale: f32,
}

impl TiltAngles {
    #[must_use]
    pub fn rest() -> Self {
        Self {
            x_deg: 0.0,
            y_deg: 0.0,
            scale: 1.0,
        }
    }

    #[must_use]
    pub fn is_rest(&self) -> bool {
        self.x_deg == 0.0 && self.y_deg == 0.0
    }

    /// Linear blend toward another orientation.
    #[must_use]
    pub fn toward(&self, target: &TiltAngles, t: f32) -> Self {
        Self {
            x_deg: lerp(self.x_deg, target.x_deg, t),
            y_deg: lerp(self.y_deg, target.y_deg, t),
            scale: lerp(self.scale, target.scale, t),
        }
    }
}

/// Tilt for a pointer at `(x_pct, y_pct)` within the card, both in `[0, 1]`.
///
/// Centered pointer gives no tilt; each axis swings `TILT_MAX_DEG` at the
/// edges.
#[must_use]
pub fn tilt_angles(x_pct: f32, y_pct: f32) -> TiltAngles {
    TiltAngles {
        x_deg: (y_pct - 0.5) * 2.0 * TILT_MAX_DEG,
        y_deg: (0.5 - x_pct) * 2.0 * TILT_MAX_DEG,
        scale: TILT_SCALE,
    }
}

/// Offset a magnetic control moves by, given the pointer and the control's
/// center (both in cell coordinates).
#[must_use]
pub fn magnetic_offset(pointer: (f32, f32), center: (f32, f32)) -> (f32, f32) {
    (
        (pointer.0 - center.0) * MAGNET_FACTOR,
        (pointer.1 - center.1) * MAGNET_FACTOR,
    )
}

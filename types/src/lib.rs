//! Core domain types for Vitrine.
//!
//! This crate contains pure domain types with no IO, no async, and minimal dependencies.
//! Everything here can be used from any layer of the application.

// Pedantic lint configuration - these are intentional design choices
#![allow(clippy::missing_errors_doc)] // Result-returning functions are self-explanatory
#![allow(clippy::missing_panics_doc)] // Panics are documented in assertions

pub mod dom;
pub mod geom;
pub mod motion;
pub mod pointer;
pub mod typewriter;

pub use dom::{Document, Element, ElementId, Role};
pub use geom::CellRect;
pub use motion::{EffectTimer, TiltAngles, lerp, magnetic_offset, tilt_angles};
pub use pointer::{HoverFlavor, PointerState};
pub use typewriter::{TypeStep, Typewriter};

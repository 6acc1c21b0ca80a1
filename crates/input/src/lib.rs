//! Input mapping: platform events become [`Action`]s applied to the camera.
//!
//! # Invariants
//! - The camera consumes actions, never raw windowing events.
//! - Only the primary button drives rotation.
//! - A close request is sticky; nothing clears it.

pub mod action;
pub mod session;

pub use action::Action;
pub use session::{InputSession, PointerButton};

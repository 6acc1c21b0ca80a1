//! Camera Controller: pointer-driven rotation and scroll dolly.
//!
//! # Invariants
//! - Accumulated rotation only changes when the primary button is released.
//! - While the button is held, the displayed rotation is the accumulated
//!   rotation plus `ROTATION_SENSITIVITY` times the drag offset.
//! - Every operation is total; there is no error path.

mod state;

pub use state::{
    CUBE_SIZE, CUBE_STRETCH, CameraState, DOLLY_STEP, INITIAL_TRANSLATION, ROTATION_SENSITIVITY,
};

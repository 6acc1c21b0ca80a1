use crate::action::Action;
use colorcube_camera::CameraState;
use glam::Vec2;

/// Mouse buttons the session distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Other,
}

/// Per-window input bookkeeping.
///
/// Button events arrive without a position, so the last cursor position is
/// kept here and used as the drag anchor on press.
#[derive(Debug, Default)]
pub struct InputSession {
    cursor: Vec2,
    close_requested: bool,
}

impl InputSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    pub fn close_requested(&self) -> bool {
        self.close_requested
    }

    pub fn cursor_moved(&mut self, position: Vec2) -> Action {
        self.cursor = position;
        Action::PointerMoved(position)
    }

    pub fn button(&mut self, button: PointerButton, pressed: bool) -> Action {
        match (button, pressed) {
            (PointerButton::Primary, true) => Action::PointerPressed(self.cursor),
            (PointerButton::Primary, false) => Action::PointerReleased,
            (PointerButton::Other, _) => Action::Noop,
        }
    }

    pub fn wheel(&self, delta_y: f32) -> Action {
        if delta_y == 0.0 || delta_y.is_nan() {
            Action::Noop
        } else {
            Action::Scrolled(delta_y)
        }
    }

    pub fn escape_pressed(&self) -> Action {
        Action::RequestClose
    }

    /// Apply an action to the camera. Returns `true` once a close has been
    /// requested.
    pub fn apply(&mut self, action: Action, camera: &mut CameraState) -> bool {
        match action {
            Action::PointerPressed(p) => camera.on_pointer_down(p),
            Action::PointerReleased => camera.on_pointer_up(),
            Action::PointerMoved(p) => camera.on_pointer_move(p),
            Action::Scrolled(delta) => {
                camera.on_scroll(delta);
                tracing::debug!("dolly depth {:.2}", camera.translation.z);
            }
            Action::RequestClose => {
                if !self.close_requested {
                    tracing::info!("close requested");
                }
                self.close_requested = true;
            }
            Action::Noop => {}
        }
        self.close_requested
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorcube_camera::ROTATION_SENSITIVITY;

    fn feed(session: &mut InputSession, camera: &mut CameraState, action: Action) {
        session.apply(action, camera);
    }

    #[test]
    fn press_anchors_at_last_cursor() {
        let mut session = InputSession::new();
        let mut camera = CameraState::new();
        let a = session.cursor_moved(Vec2::new(100.0, 100.0));
        feed(&mut session, &mut camera, a);
        assert_eq!(session.cursor(), Vec2::new(100.0, 100.0));
        let a = session.button(PointerButton::Primary, true);
        assert_eq!(a, Action::PointerPressed(Vec2::new(100.0, 100.0)));
        feed(&mut session, &mut camera, a);
        assert_eq!(camera.pointer_anchor, Vec2::new(100.0, 100.0));
    }

    #[test]
    fn drag_through_session_rotates_camera() {
        let mut session = InputSession::new();
        let mut camera = CameraState::new();
        for action in [
            session.cursor_moved(Vec2::new(100.0, 100.0)),
            session.button(PointerButton::Primary, true),
            session.cursor_moved(Vec2::new(110.0, 100.0)),
        ] {
            feed(&mut session, &mut camera, action);
        }
        assert!((camera.rotation_pending.x - ROTATION_SENSITIVITY * 10.0).abs() < 1e-5);

        let a = session.button(PointerButton::Primary, false);
        feed(&mut session, &mut camera, a);
        assert_eq!(camera.rotation_accumulated, camera.rotation_pending);
    }

    #[test]
    fn hover_without_press_does_not_rotate() {
        let mut session = InputSession::new();
        let mut camera = CameraState::new();
        let a = session.cursor_moved(Vec2::new(300.0, 20.0));
        feed(&mut session, &mut camera, a);
        assert_eq!(camera.rotation_pending, Vec2::ZERO);
    }

    #[test]
    fn secondary_button_is_unbound() {
        let mut session = InputSession::new();
        assert_eq!(session.button(PointerButton::Other, true), Action::Noop);
        assert_eq!(session.button(PointerButton::Other, false), Action::Noop);
    }

    #[test]
    fn wheel_maps_to_scroll_ticks() {
        let mut session = InputSession::new();
        let mut camera = CameraState::new();
        let up = session.wheel(3.0);
        assert_eq!(up, Action::Scrolled(3.0));
        feed(&mut session, &mut camera, up);
        assert!((camera.translation.z - (-1.1)).abs() < 1e-6);
        assert_eq!(session.wheel(0.0), Action::Noop);
    }

    #[test]
    fn press_before_any_cursor_event_anchors_at_origin() {
        let mut session = InputSession::new();
        assert_eq!(
            session.button(PointerButton::Primary, true),
            Action::PointerPressed(Vec2::ZERO)
        );
    }

    #[test]
    fn mapping_wheel_and_escape_leaves_session_untouched() {
        let session = InputSession::new();
        assert_eq!(session.wheel(-1.0), Action::Scrolled(-1.0));
        assert_eq!(session.escape_pressed(), Action::RequestClose);
        assert!(!session.close_requested());
    }

    #[test]
    fn escape_requests_close() {
        let mut session = InputSession::new();
        let mut camera = CameraState::new();
        assert!(!session.close_requested());
        let a = session.escape_pressed();
        assert!(session.apply(a, &mut camera));
        assert!(session.close_requested());
        // Sticky.
        assert!(session.apply(Action::Noop, &mut camera));
        assert_eq!(camera, CameraState::new());
    }
}

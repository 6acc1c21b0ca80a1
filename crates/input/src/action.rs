use glam::Vec2;

/// A high-level input action.
///
/// Produced by [`crate::InputSession`] from raw events; the windowing layer
/// never touches camera state directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Primary button went down at the given pointer position.
    PointerPressed(Vec2),
    /// Primary button went up.
    PointerReleased,
    /// Pointer moved to the given position.
    PointerMoved(Vec2),
    /// One wheel tick; only the sign matters.
    Scrolled(f32),
    /// Leave the render loop.
    RequestClose,
    /// Input with no binding.
    Noop,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_actions_carry_position() {
        let a = Action::PointerPressed(Vec2::new(1.0, 2.0));
        assert!(matches!(a, Action::PointerPressed(p) if p == Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn actions_compare_by_value() {
        assert_eq!(Action::Scrolled(1.0), Action::Scrolled(1.0));
        assert_ne!(Action::RequestClose, Action::Noop);
    }
}

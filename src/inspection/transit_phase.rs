/// Where the conveyor is in the pass of a pizza through the camera view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitPhase {
    /// A pizza is entering or centered; counts are expected to grow or hold
    #[default]
    MovingIn,
    /// A pizza is leaving; waiting for the belt to clear
    MovingOut,
}

impl TransitPhase {
    /// The other phase.
    pub fn flipped(self) -> Self {
        match self {
            Self::MovingIn => Self::MovingOut,
            Self::MovingOut => Self::MovingIn,
        }
    }

    /// True for `MovingIn`.
    pub fn is_moving_in(self) -> bool {
        self == Self::MovingIn
    }
}

/// First-paint gate.
///
/// Until the host confirms a stable first frame, the aside renders an empty
/// shell with the same structure as the steady state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MountGate {
    #[default]
    NotReady,
    Ready,
}

impl MountGate {
    pub fn is_ready(self) -> bool {
        self == MountGate::Ready
    }

    /// Returns true on the `NotReady -> Ready` transition only.
    pub fn confirm(&mut self) -> bool {
        let was_ready = self.is_ready();
        *self = MountGate::Ready;
        !was_ready
    }
}

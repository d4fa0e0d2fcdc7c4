use std::fmt;

/// Token identifying one route-reset cycle.
///
/// Strictly increasing per navigator. Anything scheduled for a cycle carries
/// its generation and is discarded once a newer cycle has started.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gen#{}", self.0)
    }
}

/// Gate that suppresses `open` while a route reset is in flight.
#[derive(Debug, Clone, Default)]
pub struct AnimationLock {
    held_by: Option<Generation>,
}

impl AnimationLock {
    pub fn is_locked(&self) -> bool {
        self.held_by.is_some()
    }

    pub fn holder(&self) -> Option<Generation> {
        self.held_by
    }

    /// Lock on behalf of `generation`, taking over from any older holder.
    pub fn engage(&mut self, generation: Generation) {
        self.held_by = Some(generation);
    }

    /// Unlock if `generation` still holds the lock.
    pub fn release(&mut self, generation: Generation) -> bool {
        if self.held_by == Some(generation) {
            self.held_by = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_generation_cannot_release() {
        let first = Generation::default().next();
        let second = first.next();
        let mut lock = AnimationLock::default();

        lock.engage(first);
        lock.engage(second);
        assert!(!lock.release(first));
        assert!(lock.is_locked());
        assert!(lock.release(second));
        assert!(!lock.is_locked());
    }

    #[test]
    fn release_when_unlocked_is_noop() {
        let mut lock = AnimationLock::default();
        assert!(!lock.release(Generation::default()));
        assert_eq!(lock.holder(), None);
    }
}

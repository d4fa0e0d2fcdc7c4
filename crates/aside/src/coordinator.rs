//! Route-change reset protocol.
//!
//! ```text
//!   STABLE --route key changes--> RESETTING --main payload--> REBUILDING
//!     ^                               |  ^                        |
//!     |                               +--+ route changes again    |
//!     +------------------- settle(gen) for the live gen ---------+
//! ```
//!
//! Each reset starts a new [`Generation`]. The lock is engaged for that
//! generation and only a `settle` carrying the same generation may release
//! it, so a timer armed for an abandoned cycle can never unlock a newer one.

use std::fmt::Debug;
use std::time::Duration;

use tracing::{debug, info};

use crate::effects::SettleTicket;
use crate::lock::{AnimationLock, Generation};
use crate::stack::PageStack;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum ResetPhase {
    #[default]
    Stable,
    /// Stack cleared, waiting for the host to supply the new main payload.
    Resetting,
    /// Main page rebuilt, waiting for the settle delay to release the lock.
    Rebuilding,
}

/// Result of feeding a route key to the coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteObservation {
    /// First key ever seen; recorded without a reset.
    First,
    Unchanged,
    ResetStarted {
        generation: Generation,
        /// A previous cycle was still in flight and has been abandoned.
        superseded: bool,
    },
}

/// Result of supplying a main payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainSupply {
    /// First main page of an unseeded stack.
    Seeded,
    /// Main page rebuilt after a reset; the lock stays engaged until the
    /// ticket's settle fires.
    Rebuilt(SettleTicket),
    /// Upstream refresh: only the main payload changed.
    Replaced,
}

#[derive(Debug, Clone)]
pub struct RouteResetCoordinator<K> {
    phase: ResetPhase,
    last_route_key: Option<K>,
    generation: Generation,
    settle_delay: Duration,
}

impl<K> RouteResetCoordinator<K>
where
    K: Clone + PartialEq + Debug,
{
    pub fn new(settle_delay: Duration) -> Self {
        Self {
            phase: ResetPhase::Stable,
            last_route_key: None,
            generation: Generation::default(),
            settle_delay,
        }
    }

    pub fn phase(&self) -> ResetPhase {
        self.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn last_route_key(&self) -> Option<&K> {
        self.last_route_key.as_ref()
    }

    pub fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    pub fn observe<P>(
        &mut self,
        key: &K,
        stack: &mut PageStack<P>,
        lock: &mut AnimationLock,
    ) -> RouteObservation {
        match &self.last_route_key {
            None => {
                debug!(route = ?key, "coordinator: first route observed");
                self.last_route_key = Some(key.clone());
                RouteObservation::First
            }
            Some(last) if last == key => RouteObservation::Unchanged,
            Some(last) => {
                let superseded = self.phase != ResetPhase::Stable;
                self.generation = self.generation.next();
                info!(
                    from = ?last,
                    to = ?key,
                    generation = %self.generation,
                    superseded,
                    "coordinator: route changed, resetting aside"
                );
                self.last_route_key = Some(key.clone());
                self.phase = ResetPhase::Resetting;
                lock.engage(self.generation);
                stack.clear();
                RouteObservation::ResetStarted {
                    generation: self.generation,
                    superseded,
                }
            }
        }
    }

    pub fn supply_main<P>(&mut self, payload: P, stack: &mut PageStack<P>) -> MainSupply {
        if self.phase == ResetPhase::Resetting {
            stack.seed(payload);
            self.phase = ResetPhase::Rebuilding;
            debug!(generation = %self.generation, "coordinator: main page rebuilt");
            return MainSupply::Rebuilt(SettleTicket {
                generation: self.generation,
                delay: self.settle_delay,
            });
        }

        if stack.is_empty() {
            stack.seed(payload);
            debug!("coordinator: main page seeded");
            MainSupply::Seeded
        } else {
            stack.replace_main(payload);
            MainSupply::Replaced
        }
    }

    /// Finish the cycle identified by `generation`. Stale calls are ignored.
    pub fn settle(&mut self, generation: Generation, lock: &mut AnimationLock) -> bool {
        if generation != self.generation || self.phase != ResetPhase::Rebuilding {
            debug!(
                stale = %generation,
                live = %self.generation,
                phase = %self.phase,
                "coordinator: ignoring settle"
            );
            return false;
        }
        lock.release(generation);
        self.phase = ResetPhase::Stable;
        debug!(generation = %generation, "coordinator: settled");
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageKind;

    struct Fixture {
        coordinator: RouteResetCoordinator<&'static str>,
        stack: PageStack<u32>,
        lock: AnimationLock,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                coordinator: RouteResetCoordinator::new(Duration::from_millis(300)),
                stack: PageStack::unseeded(),
                lock: AnimationLock::default(),
            }
        }

        fn observe(&mut self, key: &'static str) -> RouteObservation {
            self.coordinator
                .observe(&key, &mut self.stack, &mut self.lock)
        }

        fn supply(&mut self, payload: u32) -> MainSupply {
            self.coordinator.supply_main(payload, &mut self.stack)
        }
    }

    #[test]
    fn first_observation_does_not_reset() {
        let mut fx = Fixture::new();
        fx.supply(1);
        fx.stack.push("customer".into(), 2, PageKind::Wrapped);

        assert_eq!(fx.observe("/reception"), RouteObservation::First);
        assert_eq!(fx.stack.len(), 2);
        assert!(!fx.lock.is_locked());
        assert_eq!(fx.coordinator.phase(), ResetPhase::Stable);
    }

    #[test]
    fn same_key_is_noop() {
        let mut fx = Fixture::new();
        fx.observe("/reception");
        assert_eq!(fx.observe("/reception"), RouteObservation::Unchanged);
        assert_eq!(fx.coordinator.generation(), Generation::default());
    }

    #[test]
    fn full_cycle_clears_rebuilds_and_settles() {
        let mut fx = Fixture::new();
        fx.observe("/reception");
        fx.supply(1);
        fx.stack.push("customer".into(), 2, PageKind::Wrapped);

        let RouteObservation::ResetStarted {
            generation,
            superseded,
        } = fx.observe("/clinic")
        else {
            panic!("expected a reset");
        };
        assert!(!superseded);
        assert!(fx.stack.is_empty());
        assert!(fx.lock.is_locked());
        assert_eq!(fx.coordinator.phase(), ResetPhase::Resetting);

        let MainSupply::Rebuilt(ticket) = fx.supply(10) else {
            panic!("expected a rebuild");
        };
        assert_eq!(ticket.generation, generation);
        assert_eq!(ticket.delay, Duration::from_millis(300));
        assert_eq!(fx.stack.len(), 1);
        assert_eq!(fx.stack.entries()[0].payload, 10);
        assert!(fx.lock.is_locked());

        assert!(fx.coordinator.settle(generation, &mut fx.lock));
        assert!(!fx.lock.is_locked());
        assert_eq!(fx.coordinator.phase(), ResetPhase::Stable);
    }

    #[test]
    fn refresh_while_stable_replaces_main_only() {
        let mut fx = Fixture::new();
        assert_eq!(fx.supply(1), MainSupply::Seeded);
        fx.stack.push("customer".into(), 2, PageKind::Wrapped);

        assert_eq!(fx.supply(5), MainSupply::Replaced);
        assert_eq!(fx.stack.current_index(), 1);
        assert_eq!(fx.stack.entries()[0].payload, 5);
        assert!(!fx.lock.is_locked());
    }

    #[test]
    fn rapid_route_changes_only_latest_cycle_settles() {
        let mut fx = Fixture::new();
        fx.observe("/a");
        fx.supply(1);

        fx.observe("/b");
        let MainSupply::Rebuilt(first) = fx.supply(2) else {
            panic!("expected a rebuild");
        };
        let RouteObservation::ResetStarted { superseded, .. } = fx.observe("/c") else {
            panic!("expected a reset");
        };
        assert!(superseded);

        assert!(!fx.coordinator.settle(first.generation, &mut fx.lock));
        assert!(fx.lock.is_locked());

        let MainSupply::Rebuilt(second) = fx.supply(3) else {
            panic!("expected a rebuild");
        };
        assert!(second.generation > first.generation);
        assert!(fx.coordinator.settle(second.generation, &mut fx.lock));
        assert!(!fx.lock.is_locked());
    }

    #[test]
    fn settle_before_rebuild_is_ignored() {
        let mut fx = Fixture::new();
        fx.observe("/a");
        fx.supply(1);
        let RouteObservation::ResetStarted { generation, .. } = fx.observe("/b") else {
            panic!("expected a reset");
        };
        assert!(!fx.coordinator.settle(generation, &mut fx.lock));
        assert_eq!(fx.coordinator.phase(), ResetPhase::Resetting);
    }
}

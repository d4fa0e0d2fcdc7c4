//! The navigator instance a host mounts and passes around.
//!
//! `NavigationController` owns the page stack, the animation lock, the
//! route-reset coordinator and the continuity buffer. It is the only thing
//! that mutates them; there is no shared global store.

use std::fmt::Debug;
use std::time::Duration;

use tracing::debug;

use crate::continuity::{RenderContinuityBuffer, ViewSource};
use crate::coordinator::{MainSupply, ResetPhase, RouteObservation, RouteResetCoordinator};
use crate::effects::Effect;
use crate::geometry::{PanelGeometry, project_pages};
use crate::hooks::NavigatorHooks;
use crate::lock::{AnimationLock, Generation};
use crate::mount::MountGate;
use crate::page::{Page, PageId, PageKind};
use crate::settings::AsideSettings;
use crate::stack::PageStack;

/// Why a navigation request was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum IgnoreReason {
    /// A route reset is in flight.
    Locked,
    /// `"main"` can only be replaced through `supply_main`.
    ReservedId,
    /// No main page has been supplied yet.
    NotSeeded,
    /// `go_back` at position 0.
    AtRoot,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    Applied { current: PageId },
    Ignored(IgnoreReason),
}

impl NavOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, NavOutcome::Applied { .. })
    }
}

#[derive(Debug)]
pub struct Panel<'a, P> {
    pub page: &'a Page<P>,
    pub geometry: PanelGeometry,
}

/// What the presentation layer should draw this frame.
#[derive(Debug)]
pub enum AsideView<'a, P> {
    /// Empty shell: not mounted yet, or nothing has ever been shown.
    Shell,
    Panels {
        panels: Vec<Panel<'a, P>>,
        current_index: usize,
        source: ViewSource,
    },
}

#[derive(Debug)]
pub struct NavigationController<P, K> {
    stack: PageStack<P>,
    lock: AnimationLock,
    coordinator: RouteResetCoordinator<K>,
    continuity: RenderContinuityBuffer<P>,
    mount: MountGate,
    hooks: NavigatorHooks,
    last_notified: Option<PageId>,
}

impl<P, K> NavigationController<P, K>
where
    P: Clone,
    K: Clone + PartialEq + Debug,
{
    /// A navigator without a main page; the host seeds it via `supply_main`.
    pub fn new(settle_delay: Duration, hooks: NavigatorHooks) -> Self {
        Self {
            stack: PageStack::unseeded(),
            lock: AnimationLock::default(),
            coordinator: RouteResetCoordinator::new(settle_delay),
            continuity: RenderContinuityBuffer::default(),
            mount: MountGate::default(),
            hooks,
            last_notified: None,
        }
    }

    pub fn from_settings(settings: &AsideSettings, hooks: NavigatorHooks) -> Self {
        Self::new(settings.settle_delay(), hooks)
    }

    /// A navigator already holding `main_payload` at position 0.
    pub fn with_main(main_payload: P, settle_delay: Duration, hooks: NavigatorHooks) -> Self {
        let mut controller = Self::new(settle_delay, hooks);
        controller.stack = PageStack::new(main_payload);
        controller.last_notified = Some(PageId::main());
        controller
    }

    pub fn stack(&self) -> &PageStack<P> {
        &self.stack
    }

    pub fn current_id(&self) -> Option<&PageId> {
        self.stack.current_id()
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn phase(&self) -> ResetPhase {
        self.coordinator.phase()
    }

    pub fn generation(&self) -> Generation {
        self.coordinator.generation()
    }

    pub fn route_key(&self) -> Option<&K> {
        self.coordinator.last_route_key()
    }

    /// Show `id`, reusing its slot if it is already on the stack.
    pub fn open(&mut self, id: impl Into<PageId>, payload: P, kind: PageKind) -> NavOutcome {
        let id = id.into();
        if self.lock.is_locked() {
            debug!(%id, "navigator: open ignored, locked");
            return NavOutcome::Ignored(IgnoreReason::Locked);
        }
        if id.is_main() {
            debug!("navigator: open ignored, main is reserved");
            return NavOutcome::Ignored(IgnoreReason::ReservedId);
        }
        if self.stack.is_empty() {
            debug!(%id, "navigator: open ignored, no main page yet");
            return NavOutcome::Ignored(IgnoreReason::NotSeeded);
        }

        self.stack.push(id, payload, kind);
        self.notify_if_changed();
        self.applied()
    }

    pub fn go_back(&mut self) -> NavOutcome {
        if self.stack.is_empty() {
            return NavOutcome::Ignored(IgnoreReason::NotSeeded);
        }
        if self.stack.pop().is_none() {
            return NavOutcome::Ignored(IgnoreReason::AtRoot);
        }
        self.notify_if_changed();
        self.applied()
    }

    /// Drop everything above the main page and announce `"main"`.
    pub fn reset_to_main(&mut self) {
        if self.stack.is_empty() {
            return;
        }
        self.stack.reset_to_main();
        let main = PageId::main();
        self.hooks.navigated(&main);
        self.last_notified = Some(main);
    }

    /// Feed the host's current route key. Call on every render.
    pub fn observe_route(&mut self, key: &K) -> Vec<Effect> {
        let changing = self
            .coordinator
            .last_route_key()
            .is_some_and(|last| last != key);
        if changing {
            self.continuity.capture(&self.stack);
        }

        match self
            .coordinator
            .observe(key, &mut self.stack, &mut self.lock)
        {
            RouteObservation::First | RouteObservation::Unchanged => Vec::new(),
            RouteObservation::ResetStarted { superseded, .. } => {
                self.hooks.handlers_reset();
                if superseded {
                    vec![Effect::CancelSettle]
                } else {
                    Vec::new()
                }
            }
        }
    }

    /// Feed the host's main payload. Safe to call repeatedly.
    pub fn supply_main(&mut self, payload: P) -> Vec<Effect> {
        let supply = self.coordinator.supply_main(payload, &mut self.stack);
        self.notify_if_changed();
        match supply {
            MainSupply::Rebuilt(ticket) => vec![Effect::ScheduleSettle(ticket)],
            MainSupply::Seeded | MainSupply::Replaced => Vec::new(),
        }
    }

    /// Settle timer callback. Returns false for a stale generation.
    pub fn settle(&mut self, generation: Generation) -> bool {
        self.coordinator.settle(generation, &mut self.lock)
    }

    /// Returns true the first time only.
    pub fn confirm_first_paint(&mut self) -> bool {
        self.mount.confirm()
    }

    pub fn view(&self) -> AsideView<'_, P> {
        if !self.mount.is_ready() {
            return AsideView::Shell;
        }
        match self.continuity.read(&self.stack) {
            None => AsideView::Shell,
            Some(view) => AsideView::Panels {
                panels: project_pages(view.pages, view.current_index)
                    .map(|(page, geometry)| Panel { page, geometry })
                    .collect(),
                current_index: view.current_index,
                source: view.source,
            },
        }
    }

    fn applied(&self) -> NavOutcome {
        match self.stack.current_id() {
            Some(current) => NavOutcome::Applied {
                current: current.clone(),
            },
            None => NavOutcome::Ignored(IgnoreReason::NotSeeded),
        }
    }

    fn notify_if_changed(&mut self) {
        let Some(current) = self.stack.current_id() else {
            return;
        };
        if self.last_notified.as_ref() == Some(current) {
            return;
        }
        let current = current.clone();
        debug!(%current, "navigator: current page changed");
        self.hooks.navigated(&current);
        self.last_notified = Some(current);
    }
}

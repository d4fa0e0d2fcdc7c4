//! Side-panel navigation stack.
//!
//! A [`NavigationController`] keeps an ordered stack of pages with a current
//! position, resets it to a fresh main page whenever the host's route changes,
//! and blocks navigation until the host's transition has settled. Rendering
//! is left to the host: [`NavigationController::view`] hands back each page
//! with its [`PanelGeometry`].

mod continuity;
mod controller;
mod coordinator;
mod effects;
mod geometry;
mod hooks;
mod lock;
mod mount;
mod page;
mod scheduler;
mod settings;
mod stack;

pub use continuity::{RenderContinuityBuffer, StackView, ViewSource};
pub use controller::{AsideView, IgnoreReason, NavOutcome, NavigationController, Panel};
pub use coordinator::{MainSupply, ResetPhase, RouteObservation, RouteResetCoordinator};
pub use effects::{Effect, SettleTicket};
pub use geometry::{PanelGeometry, place, project, project_pages};
pub use hooks::{HandlersResetHook, NavigateHook, NavigatorHooks};
pub use lock::{AnimationLock, Generation};
pub use mount::MountGate;
pub use page::{MAIN_PAGE_ID, Page, PageId, PageKind};
pub use scheduler::SettleScheduler;
pub use self::settings::AsideSettings;
pub use stack::{PageStack, PushOutcome};

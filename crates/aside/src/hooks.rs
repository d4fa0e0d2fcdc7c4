use std::fmt;

use crate::page::PageId;

pub type NavigateHook = Box<dyn FnMut(&PageId) + Send>;
pub type HandlersResetHook = Box<dyn FnMut() + Send>;

/// Host callbacks invoked synchronously by the controller.
#[derive(Default)]
pub struct NavigatorHooks {
    on_navigate: Option<NavigateHook>,
    on_handlers_reset: Option<HandlersResetHook>,
}

impl NavigatorHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called whenever the effective current page id changes.
    pub fn on_navigate<F>(mut self, f: F) -> Self
    where
        F: FnMut(&PageId) + Send + 'static,
    {
        self.on_navigate = Some(Box::new(f));
        self
    }

    /// Called once at the start of every route reset, so host-owned UI
    /// state (toolbar selection and the like) can clear in step.
    pub fn on_handlers_reset<F>(mut self, f: F) -> Self
    where
        F: FnMut() + Send + 'static,
    {
        self.on_handlers_reset = Some(Box::new(f));
        self
    }

    pub(crate) fn navigated(&mut self, id: &PageId) {
        if let Some(hook) = self.on_navigate.as_mut() {
            hook(id);
        }
    }

    pub(crate) fn handlers_reset(&mut self) {
        if let Some(hook) = self.on_handlers_reset.as_mut() {
            hook();
        }
    }
}

impl fmt::Debug for NavigatorHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavigatorHooks")
            .field("on_navigate", &self.on_navigate.is_some())
            .field("on_handlers_reset", &self.on_handlers_reset.is_some())
            .finish()
    }
}

//! Ordered page stack with a current-position pointer.
//!
//! Invariants once seeded:
//!   * at least one entry, and `entries[0]` is the main page
//!   * any non-main id appears at most once
//!   * `current < entries.len()`
//!
//! The stack is only empty before the first main page exists and for the
//! short window between a route reset's clear and its rebuild. Both windows
//! are guarded by the controller (navigation is refused while unseeded or
//! locked).

use tracing::debug;

use crate::page::{Page, PageId, PageKind};

/// What `PageStack::push` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushOutcome {
    /// The id was already on the stack; its payload was replaced in place.
    Jumped { index: usize },
    /// A new page was appended after dropping `discarded` forward entries.
    Appended { index: usize, discarded: usize },
    /// Nothing changed: the stack is unseeded or the id is the reserved main id.
    Rejected,
}

impl PushOutcome {
    pub fn index(&self) -> Option<usize> {
        match self {
            PushOutcome::Jumped { index } | PushOutcome::Appended { index, .. } => Some(*index),
            PushOutcome::Rejected => None,
        }
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, PushOutcome::Rejected)
    }
}

#[derive(Debug, Clone)]
pub struct PageStack<P> {
    entries: Vec<Page<P>>,
    current: usize,
}

impl<P> Default for PageStack<P> {
    fn default() -> Self {
        Self::unseeded()
    }
}

impl<P> PageStack<P> {
    /// A stack holding only the main page.
    pub fn new(main_payload: P) -> Self {
        Self {
            entries: vec![Page::main(main_payload)],
            current: 0,
        }
    }

    /// A stack with no main page yet.
    pub fn unseeded() -> Self {
        Self {
            entries: Vec::new(),
            current: 0,
        }
    }

    pub fn entries(&self) -> &[Page<P>] {
        &self.entries
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> Option<&Page<P>> {
        self.entries.get(self.current)
    }

    pub fn current_id(&self) -> Option<&PageId> {
        self.current().map(|page| &page.id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn position(&self, id: &PageId) -> Option<usize> {
        self.entries.iter().position(|page| &page.id == id)
    }

    pub fn contains(&self, id: &PageId) -> bool {
        self.position(id).is_some()
    }

    /// Open `id`: jump to it if present, otherwise append it.
    ///
    /// A jump replaces the payload and kind in place and keeps every entry
    /// after it. An append first drops the entries beyond the current
    /// position, so a new branch never keeps orphaned forward pages.
    ///
    /// Rejected on an unseeded stack and for the main id; the main page only
    /// changes through `replace_main`.
    pub fn push(&mut self, id: PageId, payload: P, kind: PageKind) -> PushOutcome {
        if self.entries.is_empty() || id.is_main() {
            debug!(%id, seeded = !self.entries.is_empty(), "stack: push rejected");
            return PushOutcome::Rejected;
        }

        if let Some(index) = self.position(&id) {
            let page = &mut self.entries[index];
            page.payload = payload;
            page.kind = kind;
            self.current = index;
            debug!(%id, index, "stack: jumped to existing page");
            return PushOutcome::Jumped { index };
        }

        let keep = (self.current + 1).min(self.entries.len());
        let discarded = self.entries.len() - keep;
        self.entries.truncate(keep);
        self.entries.push(Page::new(id.clone(), payload, kind));
        self.current = self.entries.len() - 1;
        debug!(%id, index = self.current, discarded, "stack: appended page");
        PushOutcome::Appended {
            index: self.current,
            discarded,
        }
    }

    /// Remove the last entry and step the pointer back by one.
    ///
    /// No-op at position 0. Popped pages are gone; there is no forward.
    pub fn pop(&mut self) -> Option<Page<P>> {
        if self.current == 0 || self.entries.len() <= 1 {
            return None;
        }
        let page = self.entries.pop();
        self.current -= 1;
        debug!(current = self.current, "stack: popped");
        page
    }

    /// Truncate to the main page. Returns how many entries were removed.
    pub fn reset_to_main(&mut self) -> usize {
        let removed = self.entries.len().saturating_sub(1);
        self.entries.truncate(1);
        self.current = 0;
        if removed > 0 {
            debug!(removed, "stack: reset to main");
        }
        removed
    }

    /// Overwrite the main page's payload. Returns false when unseeded.
    pub fn replace_main(&mut self, payload: P) -> bool {
        match self.entries.first_mut() {
            Some(main) => {
                main.payload = payload;
                true
            }
            None => false,
        }
    }

    /// Drop every entry, main included. Only a route reset does this.
    pub(crate) fn clear(&mut self) {
        self.entries.clear();
        self.current = 0;
    }

    /// Install a fresh main page as the only entry.
    pub(crate) fn seed(&mut self, payload: P) {
        self.entries.clear();
        self.entries.push(Page::main(payload));
        self.current = 0;
    }
}

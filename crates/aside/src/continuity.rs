use crate::page::Page;
use crate::stack::PageStack;

/// Where a [`StackView`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewSource {
    Live,
    /// Last non-empty stack, shown while the live one is mid-reset.
    Held,
}

/// Render-safe borrow of a page sequence plus its current position.
#[derive(Debug, Clone, Copy)]
pub struct StackView<'a, P> {
    pub pages: &'a [Page<P>],
    pub current_index: usize,
    pub source: ViewSource,
}

/// Cache of the last non-empty stack.
///
/// Once populated it never regresses to empty, so the presentation layer
/// cannot observe the one-frame gap between a reset's clear and rebuild.
/// The live stack only ever empties at the start of a reset, so capturing
/// right before that clear is equivalent to mirroring every non-empty state.
#[derive(Debug, Clone)]
pub struct RenderContinuityBuffer<P> {
    snapshot: Vec<Page<P>>,
    snapshot_index: usize,
}

impl<P> Default for RenderContinuityBuffer<P> {
    fn default() -> Self {
        Self {
            snapshot: Vec::new(),
            snapshot_index: 0,
        }
    }
}

impl<P: Clone> RenderContinuityBuffer<P> {
    /// Remember `stack` unless it is empty.
    pub fn capture(&mut self, stack: &PageStack<P>) {
        if stack.is_empty() {
            return;
        }
        self.snapshot.clear();
        self.snapshot.extend_from_slice(stack.entries());
        self.snapshot_index = stack.current_index();
    }
}

impl<P> RenderContinuityBuffer<P> {
    /// The live stack if non-empty, else the held snapshot, else `None`
    /// (nothing has ever been shown).
    pub fn read<'a>(&'a self, stack: &'a PageStack<P>) -> Option<StackView<'a, P>> {
        if !stack.is_empty() {
            return Some(StackView {
                pages: stack.entries(),
                current_index: stack.current_index(),
                source: ViewSource::Live,
            });
        }
        if self.snapshot.is_empty() {
            return None;
        }
        Some(StackView {
            pages: &self.snapshot,
            current_index: self.snapshot_index,
            source: ViewSource::Held,
        })
    }
}

//! Panel placement for the slide-in stack.
//!
//! Only offsets and stacking order are computed here. Shadows, opacity and
//! easing belong to whoever draws the panels.

use crate::page::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelGeometry {
    pub index: usize,
    /// Position relative to the current page (negative = behind it).
    pub offset: isize,
    /// Horizontal translation as a percentage of the panel width.
    pub translate_percent: i64,
    /// Higher draws on top. Earlier pages outrank later, off-screen ones.
    pub stack_order: usize,
}

impl PanelGeometry {
    pub fn is_current(&self) -> bool {
        self.offset == 0
    }
}

pub fn place(index: usize, len: usize, current_index: usize) -> PanelGeometry {
    let offset = index as isize - current_index as isize;
    PanelGeometry {
        index,
        offset,
        translate_percent: offset as i64 * 100,
        stack_order: len - index,
    }
}

pub fn project(len: usize, current_index: usize) -> Vec<PanelGeometry> {
    (0..len).map(|i| place(i, len, current_index)).collect()
}

/// Pair every page with its geometry.
pub fn project_pages<P>(
    pages: &[Page<P>],
    current_index: usize,
) -> impl Iterator<Item = (&Page<P>, PanelGeometry)> {
    let len = pages.len();
    pages
        .iter()
        .enumerate()
        .map(move |(i, page)| (page, place(i, len, current_index)))
}

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Id of the permanent page at stack position 0.
pub const MAIN_PAGE_ID: &str = "main";

/// Logical slot identifier of a page.
///
/// Callers keep ids stable: the same logical target must always use the same
/// id, because opening an id that is already on the stack jumps to it instead
/// of pushing a duplicate. The empty string is a normal, distinct id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageId(String);

impl PageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The reserved id of the main page.
    pub fn main() -> Self {
        Self(MAIN_PAGE_ID.to_string())
    }

    pub fn is_main(&self) -> bool {
        self.0 == MAIN_PAGE_ID
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PageId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PageId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl PartialEq<str> for PageId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for PageId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// How the presentation layer should wrap a page.
///
/// Supplied by whoever opens the page; the navigator never inspects the
/// payload to decide this.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PageKind {
    /// Rendered inside the standard detail frame (title bar, back hint).
    #[default]
    Wrapped,
    /// Rendered as-is. The main page is always raw.
    Raw,
}

/// One entry of the navigation stack.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<P> {
    pub id: PageId,
    pub payload: P,
    pub kind: PageKind,
    /// Diagnostic only.
    pub created_at: DateTime<Utc>,
}

impl<P> Page<P> {
    pub fn new(id: impl Into<PageId>, payload: P, kind: PageKind) -> Self {
        Self {
            id: id.into(),
            payload,
            kind,
            created_at: Utc::now(),
        }
    }

    /// A fresh main page carrying `payload`.
    pub fn main(payload: P) -> Self {
        Self::new(PageId::main(), payload, PageKind::Raw)
    }

    pub fn is_main(&self) -> bool {
        self.id.is_main()
    }
}

//! The document-analysis provider boundary.

use crate::error::{Error, Result};
use crate::model::Block;

/// Raw input for one page, as produced by the external page-rendering
/// service (which is out of scope here).
#[derive(Debug, Clone)]
pub struct PageInput {
    /// Page number (1-indexed)
    pub page_number: u32,

    /// Rendered page image bytes
    pub data: Vec<u8>,
}

impl PageInput {
    /// Create a page input.
    pub fn new(page_number: u32, data: Vec<u8>) -> Self {
        Self { page_number, data }
    }
}

/// What a provider implementation can extract.
///
/// One capability table per provider, no inheritance hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderCapabilities {
    /// Emits KEY_VALUE_SET blocks
    pub forms: bool,
    /// Emits TABLE/CELL blocks
    pub tables: bool,
    /// Emits SELECTION_ELEMENT blocks
    pub selection_marks: bool,
}

impl ProviderCapabilities {
    /// A provider that extracts everything this crate consumes.
    pub fn full() -> Self {
        Self {
            forms: true,
            tables: true,
            selection_marks: true,
        }
    }
}

/// A document-analysis provider producing one page's block graph.
///
/// Implementations are strategies behind a single interface. The
/// timeout in seconds is advisory: a synchronous trait cannot preempt
/// an implementation, so providers that can enforce a deadline should,
/// and a reported timeout is handled like any other per-page failure.
pub trait AnalysisProvider: Send + Sync {
    /// Provider name, recorded in analysis metadata.
    fn name(&self) -> &str;

    /// What this provider can extract.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Analyze one page into a block graph.
    fn analyze_page(&self, page: &PageInput, timeout_secs: u64) -> Result<Vec<Block>>;
}

/// A provider serving pre-fetched block graphs, one per page.
///
/// Used for offline analysis of exported provider responses and as the
/// test double for the pipeline.
pub struct StaticProvider {
    name: String,
    pages: Vec<Vec<Block>>,
}

impl StaticProvider {
    /// Create a provider from per-page block lists.
    pub fn new(name: impl Into<String>, pages: Vec<Vec<Block>>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }

    /// Number of pages held.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }
}

impl AnalysisProvider for StaticProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> ProviderCapabilities {
        ProviderCapabilities::full()
    }

    fn analyze_page(&self, page: &PageInput, _timeout_secs: u64) -> Result<Vec<Block>> {
        if page.page_number == 0 {
            return Err(Error::PageOutOfRange(0, self.page_count()));
        }
        self.pages
            .get((page.page_number - 1) as usize)
            .cloned()
            .ok_or(Error::PageOutOfRange(page.page_number, self.page_count()))
    }
}

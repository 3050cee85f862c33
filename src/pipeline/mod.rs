//! Document processing: sequential page analysis, multi-page
//! aggregation, and the interactive review session.

mod provider;

pub use provider::{AnalysisProvider, PageInput, ProviderCapabilities, StaticProvider};

use std::collections::BTreeMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{GroupingConfig, SynthesisConfig};
use crate::model::{FormElement, Table};
use crate::synth::{
    normalize_page, synthesize_page, GreedyRowClusterer, PageElements, PageSynthesis,
};
use crate::view::{hit_test, ViewTransform};

/// Options for document analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Document type label recorded in metadata (e.g. "intake_form")
    pub document_type: String,

    /// Per-page provider timeout in seconds
    pub page_timeout_secs: u64,

    /// Spatial thresholds
    pub grouping: GroupingConfig,

    /// Field synthesis configuration
    pub synthesis: SynthesisConfig,
}

impl AnalyzeOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document type label.
    pub fn with_document_type(mut self, document_type: impl Into<String>) -> Self {
        self.document_type = document_type.into();
        self
    }

    /// Set the per-page timeout.
    pub fn with_page_timeout(mut self, secs: u64) -> Self {
        self.page_timeout_secs = secs;
        self
    }

    /// Set the grouping configuration.
    pub fn with_grouping(mut self, grouping: GroupingConfig) -> Self {
        self.grouping = grouping;
        self
    }

    /// Set the synthesis configuration.
    pub fn with_synthesis(mut self, synthesis: SynthesisConfig) -> Self {
        self.synthesis = synthesis;
        self
    }
}

impl Default for AnalyzeOptions {
    fn default() -> Self {
        Self {
            document_type: "form".into(),
            page_timeout_secs: 60,
            grouping: GroupingConfig::default(),
            synthesis: SynthesisConfig::default(),
        }
    }
}

/// How one page's processing ended.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PageOutcome {
    /// The page was analyzed
    Processed {
        /// Page number (1-indexed)
        page: u32,
        /// Number of elements emitted
        element_count: usize,
    },
    /// The provider failed for this page; it was recorded empty
    Failed {
        /// Page number (1-indexed)
        page: u32,
        /// Failure description for the caller
        reason: String,
    },
}

impl PageOutcome {
    /// Check if the page failed.
    pub fn is_failed(&self) -> bool {
        matches!(self, PageOutcome::Failed { .. })
    }
}

/// Metadata describing one analysis run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisMetadata {
    /// Number of pages submitted
    pub page_count: u32,

    /// Wall-clock processing time in milliseconds
    pub processing_time_ms: u64,

    /// Provider name
    pub provider: String,

    /// Document type label
    pub document_type: String,

    /// Average element confidence across all pages
    pub confidence: f32,

    /// When the run finished
    pub processed_at: DateTime<Utc>,
}

/// Result of analyzing a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// All elements, page order
    pub elements: Vec<FormElement>,

    /// All reconstructed tables, page order
    pub tables: Vec<Table>,

    /// Run metadata
    pub metadata: AnalysisMetadata,

    /// Per-page element partition. Every submitted page has an entry,
    /// failed or empty pages included, so rendering never falls back to
    /// a neighboring page's elements.
    pub pages: BTreeMap<u32, Vec<FormElement>>,

    /// Per-page outcomes in submission order
    pub outcomes: Vec<PageOutcome>,
}

impl AnalysisResult {
    /// Elements of one page; empty when the page yielded nothing.
    pub fn page_elements(&self, page_number: u32) -> &[FormElement] {
        self.pages
            .get(&page_number)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Pages whose processing failed.
    pub fn failed_pages(&self) -> Vec<u32> {
        self.outcomes
            .iter()
            .filter_map(|o| match o {
                PageOutcome::Failed { page, .. } => Some(*page),
                PageOutcome::Processed { .. } => None,
            })
            .collect()
    }
}

/// Strictly sequential page-by-page analysis over one provider.
///
/// Pages are submitted one at a time; a failed page is caught, reported
/// in the outcomes, and recorded as an empty-element page so synthesis
/// proceeds for the remaining pages. No page is retried; the caller
/// must explicitly re-invoke processing.
pub struct DocumentPipeline<P: AnalysisProvider> {
    provider: P,
    options: AnalyzeOptions,
}

impl<P: AnalysisProvider> DocumentPipeline<P> {
    /// Create a pipeline over a provider.
    pub fn new(provider: P, options: AnalyzeOptions) -> Self {
        Self { provider, options }
    }

    /// The configured options.
    pub fn options(&self) -> &AnalyzeOptions {
        &self.options
    }

    /// Process all pages. Never fails wholesale: per-page failures
    /// degrade to empty pages and are reported in the outcomes.
    pub fn process(&self, inputs: &[PageInput]) -> AnalysisResult {
        let started = Instant::now();
        let mut pages: BTreeMap<u32, Vec<FormElement>> = BTreeMap::new();
        let mut outcomes = Vec::with_capacity(inputs.len());
        let mut elements = Vec::new();
        let mut tables = Vec::new();
        let mut confidence_sum = 0.0f32;
        let mut confidence_pages = 0u32;

        for input in inputs {
            let page = match self
                .provider
                .analyze_page(input, self.options.page_timeout_secs)
            {
                Ok(blocks) => normalize_page(&blocks, input.page_number),
                Err(err) => {
                    log::warn!("Page {} failed: {}", input.page_number, err);
                    outcomes.push(PageOutcome::Failed {
                        page: input.page_number,
                        reason: err.to_string(),
                    });
                    pages.insert(input.page_number, Vec::new());
                    continue;
                }
            };

            outcomes.push(PageOutcome::Processed {
                page: page.page_number,
                element_count: page.elements.len(),
            });
            if !page.elements.is_empty() {
                confidence_sum += page.average_confidence;
                confidence_pages += 1;
            }

            let PageElements {
                page_number,
                elements: page_elements,
                tables: page_tables,
                ..
            } = page;
            pages.insert(page_number, page_elements.clone());
            elements.extend(page_elements);
            tables.extend(page_tables);
        }

        let metadata = AnalysisMetadata {
            page_count: inputs.len() as u32,
            processing_time_ms: started.elapsed().as_millis() as u64,
            provider: self.provider.name().to_string(),
            document_type: self.options.document_type.clone(),
            confidence: if confidence_pages > 0 {
                confidence_sum / confidence_pages as f32
            } else {
                0.0
            },
            processed_at: Utc::now(),
        };

        AnalysisResult {
            elements,
            tables,
            metadata,
            pages,
            outcomes,
        }
    }

    /// Synthesize fields and sections for one processed page, using the
    /// pipeline's grouping and synthesis configuration. An unprocessed
    /// or failed page yields an empty synthesis.
    pub fn synthesize_page(&self, result: &AnalysisResult, page_number: u32) -> PageSynthesis {
        synthesize_page(
            result.page_elements(page_number),
            &GreedyRowClusterer,
            &self.options.grouping,
            &self.options.synthesis,
        )
    }
}

/// Interactive review state: the active page and the selected element.
///
/// Changing the active page clears any selection. Missing pages expose
/// an empty element list, never a neighboring page's elements.
#[derive(Debug, Clone, Default)]
pub struct ReviewSession {
    pages: BTreeMap<u32, Vec<FormElement>>,
    active_page: u32,
    selected_element_id: Option<String>,
}

impl ReviewSession {
    /// Create a session over an analysis result's page partition.
    pub fn new(result: &AnalysisResult) -> Self {
        Self {
            pages: result.pages.clone(),
            active_page: 1,
            selected_element_id: None,
        }
    }

    /// The active page number.
    pub fn active_page(&self) -> u32 {
        self.active_page
    }

    /// Elements of the active page.
    pub fn active_elements(&self) -> &[FormElement] {
        self.pages
            .get(&self.active_page)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The selected element id, if any.
    pub fn selected_element_id(&self) -> Option<&str> {
        self.selected_element_id.as_deref()
    }

    /// Switch pages, clearing the selection.
    pub fn set_active_page(&mut self, page_number: u32) {
        if page_number != self.active_page {
            self.active_page = page_number;
            self.selected_element_id = None;
        }
    }

    /// Resolve a click against the active page and update the
    /// selection. Returns the struck element id, or `None` (and clears
    /// the selection) when the point misses every element.
    pub fn select_at(&mut self, transform: &ViewTransform, mx: f32, my: f32) -> Option<String> {
        let hit = hit_test(self.active_elements(), transform, mx, my).map(|e| e.id.clone());
        self.selected_element_id = hit.clone();
        hit
    }
}

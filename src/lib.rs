//! # formsense
//!
//! Synthesizes a reviewed-ready model of a paper form from an OCR
//! provider's block graph: typed elements with geometry, reconstructed
//! tables, and best-effort structured form fields (name, type,
//! validation, PHI flags).
//!
//! ## Quick Start
//!
//! ```no_run
//! use formsense::{parse_blocks_file, Formsense, JsonFormat};
//!
//! fn main() -> formsense::Result<()> {
//!     // Load a provider's exported block graph
//!     let blocks = parse_blocks_file("page.json")?;
//!
//!     // Synthesize elements and fields for review
//!     let analysis = Formsense::new().analyze_blocks(&blocks)?;
//!     println!("{}", analysis.to_json(JsonFormat::Pretty)?);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! Raw blocks flow through an id-indexed resolver, three independent
//! extraction passes (key/value pairs, tables, selection marks), a
//! normalizer that merges them into ordered per-page elements, a
//! spatial grouping engine that clusters rows and pairs labels with
//! inputs, and a field synthesizer that emits [`GeneratedField`]s and
//! sections. A separate view transform maps normalized geometry to
//! display pixels for click-to-element resolution during review.

pub mod config;
pub mod error;
pub mod graph;
pub mod model;
pub mod pipeline;
pub mod synth;
pub mod view;

// Re-export commonly used types
pub use config::{GroupingConfig, PhiKeywords, SynthesisConfig, TranslationTable};
pub use error::{Error, Result};
pub use model::{
    Block, BlockKind, BoundingBox, ElementType, EntityType, FieldType, FormElement,
    GeneratedField, RelationshipKind, Section, SelectionStatus, Table, TableCell, ValidationRule,
};
pub use pipeline::{
    AnalysisMetadata, AnalysisProvider, AnalysisResult, AnalyzeOptions, DocumentPipeline,
    PageInput, PageOutcome, ProviderCapabilities, ReviewSession, StaticProvider,
};
pub use synth::{GreedyRowClusterer, PageElements, PageSynthesis, RowClustering};
pub use view::{hit_test, DisplayRect, ViewTransform, DEFAULT_FIT_FRACTION};

use serde::Deserialize;
use std::path::Path;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a value in the requested JSON format.
pub fn to_json<T: serde::Serialize>(value: &T, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(value),
        JsonFormat::Compact => serde_json::to_string(value),
    };
    result.map_err(|e| Error::Render(format!("JSON serialization error: {}", e)))
}

/// Parse a block-graph JSON document.
///
/// Accepts either a bare block array or the provider's response
/// envelope `{"Blocks": [...]}`.
pub fn parse_blocks_json(json: &str) -> Result<Vec<Block>> {
    #[derive(Deserialize)]
    struct Envelope {
        #[serde(rename = "Blocks")]
        blocks: Vec<Block>,
    }

    if let Ok(blocks) = serde_json::from_str::<Vec<Block>>(json) {
        return Ok(blocks);
    }
    let envelope: Envelope = serde_json::from_str(json)
        .map_err(|e| Error::InvalidBlockGraph(format!("neither a block array nor an envelope: {}", e)))?;
    Ok(envelope.blocks)
}

/// Parse a block-graph JSON file.
pub fn parse_blocks_file<P: AsRef<Path>>(path: P) -> Result<Vec<Block>> {
    let json = std::fs::read_to_string(path)?;
    parse_blocks_json(&json)
}

/// Normalize one page's blocks with default settings.
pub fn analyze_blocks(blocks: &[Block]) -> PageElements {
    synth::normalize_page(blocks, 1)
}

/// Builder for block-graph analysis.
///
/// # Example
///
/// ```no_run
/// use formsense::{Formsense, JsonFormat};
///
/// let json = std::fs::read_to_string("page.json").unwrap();
/// let output = Formsense::new()
///     .with_display_language("es")
///     .with_reference_page(1700.0, 2200.0)
///     .analyze_json(&json)?
///     .to_json(JsonFormat::Pretty)?;
/// # Ok::<(), formsense::Error>(())
/// ```
pub struct Formsense {
    grouping: GroupingConfig,
    synthesis: SynthesisConfig,
    page_number: u32,
}

impl Formsense {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            grouping: GroupingConfig::default(),
            synthesis: SynthesisConfig::default(),
            page_number: 1,
        }
    }

    /// Set the active display language for label translation.
    pub fn with_display_language(mut self, language: impl Into<String>) -> Self {
        self.synthesis = self.synthesis.with_display_language(language);
        self
    }

    /// Scale spatial thresholds against a pixel page size instead of
    /// comparing them directly to normalized coordinates.
    pub fn with_reference_page(mut self, width: f32, height: f32) -> Self {
        self.grouping = self.grouping.with_reference_page(width, height);
        self
    }

    /// Replace the grouping configuration.
    pub fn with_grouping(mut self, grouping: GroupingConfig) -> Self {
        self.grouping = grouping;
        self
    }

    /// Replace the synthesis configuration.
    pub fn with_synthesis(mut self, synthesis: SynthesisConfig) -> Self {
        self.synthesis = synthesis;
        self
    }

    /// Set the page number assigned to synthesized elements.
    pub fn with_page_number(mut self, page_number: u32) -> Self {
        self.page_number = page_number;
        self
    }

    /// Analyze an already-parsed block list.
    pub fn analyze_blocks(self, blocks: &[Block]) -> Result<FormsenseAnalysis> {
        let page = synth::normalize_page(blocks, self.page_number);
        let synthesis = synth::synthesize_page(
            &page.elements,
            &GreedyRowClusterer,
            &self.grouping,
            &self.synthesis,
        );
        Ok(FormsenseAnalysis { page, synthesis })
    }

    /// Analyze a block-graph JSON document.
    pub fn analyze_json(self, json: &str) -> Result<FormsenseAnalysis> {
        let blocks = parse_blocks_json(json)?;
        self.analyze_blocks(&blocks)
    }

    /// Analyze a block-graph JSON file.
    pub fn analyze_file<P: AsRef<Path>>(self, path: P) -> Result<FormsenseAnalysis> {
        let blocks = parse_blocks_file(path)?;
        self.analyze_blocks(&blocks)
    }
}

impl Default for Formsense {
    fn default() -> Self {
        Self::new()
    }
}

/// Result of analyzing one page's block graph.
pub struct FormsenseAnalysis {
    /// Normalized elements and tables
    pub page: PageElements,
    /// Synthesized fields and sections
    pub synthesis: PageSynthesis,
}

impl FormsenseAnalysis {
    /// The normalized elements.
    pub fn elements(&self) -> &[FormElement] {
        &self.page.elements
    }

    /// The reconstructed tables.
    pub fn tables(&self) -> &[Table] {
        &self.page.tables
    }

    /// The generated fields.
    pub fn fields(&self) -> &[GeneratedField] {
        &self.synthesis.fields
    }

    /// The derived sections.
    pub fn sections(&self) -> &[Section] {
        &self.synthesis.sections
    }

    /// Serialize the full analysis to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        #[derive(serde::Serialize)]
        struct Output<'a> {
            elements: &'a [FormElement],
            tables: &'a [Table],
            fields: &'a [GeneratedField],
            sections: &'a [Section],
            average_confidence: f32,
        }
        to_json(
            &Output {
                elements: self.elements(),
                tables: self.tables(),
                fields: self.fields(),
                sections: self.sections(),
                average_confidence: self.page.average_confidence,
            },
            format,
        )
    }
}

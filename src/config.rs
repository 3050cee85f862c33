//! Tuning and data configuration.
//!
//! The translation table and PHI keyword set are immutable data loaded
//! once at startup; built-in defaults cover the common English/Spanish
//! intake-form vocabulary. The spatial thresholds carry over from the
//! upstream pipeline unchanged, including its unit quirk (see
//! [`GroupingConfig::reference_page`]).

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Spatial thresholds for row clustering, label/input pairing, and
/// section splitting.
///
/// The three thresholds are expressed in pixel-flavored units inherited
/// from the upstream pipeline, while bounding boxes are normalized to
/// [0, 1]. `reference_page` selects the unit system: `None` compares
/// the thresholds directly against normalized coordinates, which is
/// faithful to the upstream behavior (and effectively collapses each
/// page into a single row group); `Some((width, height))` scales
/// coordinates into that pixel space first, making the thresholds
/// meaningful.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// Vertical tolerance for joining a row group
    pub row_tolerance: f32,

    /// Maximum label-to-input top-left corner distance for pairing
    pub pairing_distance: f32,

    /// Vertical gap between consecutive elements that starts a new section
    pub section_gap: f32,

    /// Page dimensions in pixels used to scale normalized coordinates
    /// before threshold comparison, or `None` for upstream-faithful
    /// direct comparison.
    pub reference_page: Option<(f32, f32)>,
}

impl GroupingConfig {
    /// Per-axis factors mapping normalized coordinates into the working
    /// unit system.
    pub fn working_scale(&self) -> (f32, f32) {
        self.reference_page.unwrap_or((1.0, 1.0))
    }

    /// Set the reference page size and return self.
    pub fn with_reference_page(mut self, width: f32, height: f32) -> Self {
        self.reference_page = Some((width, height));
        self
    }
}

impl Default for GroupingConfig {
    fn default() -> Self {
        Self {
            row_tolerance: 10.0,
            pairing_distance: 50.0,
            section_gap: 100.0,
            reference_page: None,
        }
    }
}

/// Static label translation table keyed by lowercased, trimmed source
/// phrase.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationTable {
    entries: HashMap<String, String>,
}

impl TranslationTable {
    /// Build a table from (source, translation) pairs. Keys are
    /// lowercased and trimmed on the way in.
    pub fn from_pairs<I, S, T>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let entries = pairs
            .into_iter()
            .map(|(k, v)| (k.into().trim().to_lowercase(), v.into()))
            .collect();
        Self { entries }
    }

    /// The built-in English-to-Spanish table for common intake-form labels.
    pub fn builtin_spanish() -> Self {
        Self::from_pairs([
            ("first name", "Nombre"),
            ("last name", "Apellido"),
            ("full name", "Nombre completo"),
            ("date of birth", "Fecha de nacimiento"),
            ("address", "Dirección"),
            ("phone", "Teléfono"),
            ("phone number", "Número de teléfono"),
            ("email", "Correo electrónico"),
            ("signature", "Firma"),
            ("date", "Fecha"),
            ("city", "Ciudad"),
            ("state", "Estado"),
            ("zip code", "Código postal"),
            ("insurance", "Seguro"),
            ("emergency contact", "Contacto de emergencia"),
        ])
    }

    /// Look up a translation for the given source text.
    ///
    /// The key is lowercased and trimmed of surrounding whitespace and
    /// trailing `:`/`*` decoration before lookup.
    pub fn lookup(&self, source: &str) -> Option<&str> {
        let key = source
            .trim()
            .trim_end_matches(['*', ':'])
            .trim()
            .to_lowercase();
        self.entries.get(&key).map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keyword set that classifies a field as protected health information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhiKeywords(Vec<String>);

impl PhiKeywords {
    /// Build a set from keywords (lowercased on the way in).
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(keywords.into_iter().map(|k| k.into().to_lowercase()).collect())
    }

    /// Check if any keyword occurs in the given text (case-insensitive).
    pub fn matches(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.0.iter().any(|k| lower.contains(k.as_str()))
    }
}

impl Default for PhiKeywords {
    fn default() -> Self {
        Self::new([
            "name",
            "dob",
            "birth",
            "ssn",
            "social",
            "address",
            "phone",
            "email",
            "mrn",
            "patient",
            "medical record",
        ])
    }
}

/// Configuration for the field synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Language the source document labels are written in
    pub source_language: String,

    /// Active display language; translations apply only when this
    /// differs from `source_language`
    pub display_language: String,

    /// Static label translation table
    pub translations: TranslationTable,

    /// PHI classification keywords
    pub phi_keywords: PhiKeywords,

    /// Confidence below which fields are flagged for review
    pub low_confidence_threshold: f32,
}

impl SynthesisConfig {
    /// Set the display language and return self.
    pub fn with_display_language(mut self, language: impl Into<String>) -> Self {
        self.display_language = language.into();
        self
    }

    /// Whether label translation is active.
    pub fn translation_active(&self) -> bool {
        self.display_language != self.source_language
    }
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            source_language: "en".into(),
            display_language: "en".into(),
            translations: TranslationTable::builtin_spanish(),
            phi_keywords: PhiKeywords::default(),
            low_confidence_threshold: 80.0,
        }
    }
}

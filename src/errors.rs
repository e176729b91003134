use thiserror::Error;

use crate::assembly::catalog::TemplateFamily;

/// Errors raised while assembling a deck.
///
/// Most variants are structural: the catalog and the host document disagree,
/// and the whole run should stop. `ContentShapeMismatch` is the one data-shape
/// error; see [`AssemblyError::is_data_shape`].
#[derive(Error, Debug)]
pub enum AssemblyError {
    /// The catalog has no entry for the requested template and variant.
    #[error("Template not found: {family} template '{template_id}' variant '{variant_key}'")]
    TemplateNotFound {
        family: TemplateFamily,
        template_id: String,
        variant_key: String,
    },

    /// A catalog entry points past the end of the host document's page list.
    #[error("Template page index {index} is out of range (document has {page_count} pages)")]
    TemplateIndexOutOfRange { index: usize, page_count: usize },

    /// A region is absent from a catalog entry, or has an address of the wrong kind.
    #[error("Region '{region}' is missing or unusable in template '{template_id}' variant '{variant_key}'")]
    MissingRegion {
        template_id: String,
        variant_key: String,
        region: String,
    },

    /// A region address does not resolve on the cloned page.
    #[error("Element not found on slide '{slide_id}': {detail}")]
    ElementNotFound { slide_id: String, detail: String },

    /// Tagged sequences that must line up have different lengths.
    #[error("Content shape mismatch in {context}: expected {expected} item(s), found {found}")]
    ContentShapeMismatch {
        context: String,
        expected: usize,
        found: usize,
    },

    /// No variant is mapped for a page holding `size` items.
    #[error("Template '{template_id}' has no variant for a page of {size} item(s)")]
    UnsupportedPageRemainder { template_id: String, size: usize },

    /// Image bytes could not be decoded.
    #[error("Image decode failure: {0}")]
    ImageDecodeFailure(String),

    /// The catalog violates one of its own invariants.
    #[error("Invalid template catalog: {0}")]
    InvalidCatalog(String),

    /// The content rewriter failed to produce tagged text.
    #[error("Content rewrite failed: {0}")]
    Rewrite(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON (de)serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl AssemblyError {
    /// True for errors caused by the shape of the content rather than by a
    /// catalog/document mismatch. Only these may be skipped per block.
    pub fn is_data_shape(&self) -> bool {
        matches!(self, AssemblyError::ContentShapeMismatch { .. })
    }

    pub(crate) fn mismatch(context: impl Into<String>, expected: usize, found: usize) -> Self {
        AssemblyError::ContentShapeMismatch {
            context: context.into(),
            expected,
            found,
        }
    }
}

/// A type alias for `Result<T, AssemblyError>`.
pub type Result<T> = std::result::Result<T, AssemblyError>;

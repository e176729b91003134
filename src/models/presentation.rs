use serde::{Deserialize, Serialize};

use crate::models::common::Size;
use crate::models::page::Page;

/// A presentation: the host document slides are assembled into.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    /// The ID of the presentation.
    pub presentation_id: String,
    /// The size of pages in the presentation.
    pub page_size: Option<Size>,
    /// Slides in display order.
    pub slides: Option<Vec<Page>>,
    /// The title of the presentation.
    pub title: Option<String>,
    /// The slide masters in the presentation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub masters: Option<Vec<Page>>,
    /// The layouts in the presentation. Slides keep pointing at these.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layouts: Option<Vec<Page>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    /// Output only. Read from the source, never bumped by assembly.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,
}

impl Presentation {
    pub fn slides(&self) -> &[Page] {
        self.slides.as_deref().unwrap_or_default()
    }

    pub fn slide_count(&self) -> usize {
        self.slides().len()
    }

    /// Every page of the document: slides, layouts, then masters.
    pub fn all_pages(&self) -> impl Iterator<Item = &Page> {
        self.slides
            .iter()
            .chain(self.layouts.iter())
            .chain(self.masters.iter())
            .flatten()
    }
}

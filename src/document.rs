//! The host document as an arena of pages and elements addressed by object id.

use std::collections::HashSet;

use log::debug;

use crate::errors::{AssemblyError, Result};
use crate::models::page::Page;
use crate::models::presentation::Presentation;

/// Names a page appended to the host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideHandle {
    pub object_id: String,
    /// Position in the slide list at the time the page was appended.
    pub index: usize,
}

/// The authoring pages present before assembly started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldMarker {
    pub count: usize,
    pub ids: Vec<String>,
}

/// A cloned page that is not attached to the document yet.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftSlide {
    pub(crate) page: Page,
}

impl DraftSlide {
    pub fn object_id(&self) -> &str {
        &self.page.object_id
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }
}

/// Hands out object ids that do not collide with any id already in the document.
#[derive(Debug, Clone)]
struct IdAllocator {
    prefix: String,
    next: u64,
    used: HashSet<String>,
}

impl IdAllocator {
    fn seeded(prefix: &str, presentation: &Presentation) -> Self {
        let mut used = HashSet::new();
        for page in presentation.all_pages() {
            used.insert(page.object_id.clone());
            for element in page.elements() {
                element.walk(&mut |e| {
                    used.insert(e.object_id.clone());
                });
            }
        }
        Self {
            prefix: prefix.to_string(),
            next: 1,
            used,
        }
    }

    fn allocate(&mut self) -> String {
        loop {
            let candidate = format!("{}_{}", self.prefix, self.next);
            self.next += 1;
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// Owns the presentation being assembled.
///
/// All structural edits go through object ids, so a page or element keeps its
/// identity however the lists around it are renumbered.
#[derive(Debug, Clone)]
pub struct HostDocument {
    presentation: Presentation,
    ids: IdAllocator,
}

impl HostDocument {
    pub fn new(presentation: Presentation, id_prefix: &str) -> Self {
        let ids = IdAllocator::seeded(id_prefix, &presentation);
        Self { presentation, ids }
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn into_presentation(self) -> Presentation {
        self.presentation
    }

    pub fn page_count(&self) -> usize {
        self.presentation.slide_count()
    }

    /// The slide at `index`, or `TemplateIndexOutOfRange`.
    pub fn page(&self, index: usize) -> Result<&Page> {
        self.presentation
            .slides()
            .get(index)
            .ok_or(AssemblyError::TemplateIndexOutOfRange {
                index,
                page_count: self.page_count(),
            })
    }

    pub fn slide_ids(&self) -> Vec<String> {
        self.presentation
            .slides()
            .iter()
            .map(|page| page.object_id.clone())
            .collect()
    }

    /// A fresh object id, unique across pages and elements.
    pub fn next_id(&mut self) -> String {
        self.ids.allocate()
    }

    pub fn scaffold_marker(&self) -> ScaffoldMarker {
        let ids = self.slide_ids();
        ScaffoldMarker {
            count: ids.len(),
            ids,
        }
    }

    /// Attaches a finished draft at the end of the slide list.
    pub fn append(&mut self, draft: DraftSlide) -> SlideHandle {
        let slides = self.presentation.slides.get_or_insert_with(Vec::new);
        let handle = SlideHandle {
            object_id: draft.page.object_id.clone(),
            index: slides.len(),
        };
        slides.push(draft.page);
        debug!("Appended slide '{}' at {}", handle.object_id, handle.index);
        handle
    }

    /// Removes a slide by object id. Returns false when no slide has that id.
    pub fn remove_slide(&mut self, object_id: &str) -> bool {
        let Some(slides) = self.presentation.slides.as_mut() else {
            return false;
        };
        match slides.iter().position(|page| page.object_id == object_id) {
            Some(position) => {
                slides.remove(position);
                true
            }
            None => false,
        }
    }

    /// Deletes every page recorded by `marker`, in the order it recorded them.
    /// Returns how many were removed.
    pub fn remove_scaffold(&mut self, marker: ScaffoldMarker) -> usize {
        let mut removed = 0;
        for id in &marker.ids {
            if self.remove_slide(id) {
                removed += 1;
            } else {
                debug!("Scaffold slide '{}' was already gone", id);
            }
        }
        removed
    }

    /// Serializes the presentation as JSON bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(&self.presentation)?)
    }
}

//! Duplicates a template page into a detached draft.

use log::debug;

use crate::document::{DraftSlide, HostDocument};
use crate::errors::Result;
use crate::models::elements::{PageElement, PageElementKind};
use crate::models::image::Image;
use crate::models::page::{Page, PageType, SlideProperties};

/// Clones the slide at `source_index` with fresh object ids.
///
/// The draft keeps the source's layout and master. Free-standing embedded
/// pictures are re-embedded from their bytes at the same size and position;
/// every other element is deep-copied. The page's extension list is not copied.
pub fn clone_page(doc: &mut HostDocument, source_index: usize) -> Result<DraftSlide> {
    let source = doc.page(source_index)?.clone();
    let object_id = doc.next_id();

    let elements = source
        .page_elements
        .unwrap_or_default()
        .into_iter()
        .map(|element| clone_element(doc, element))
        .collect::<Vec<_>>();

    let slide_properties = source.slide_properties.map(|props| SlideProperties {
        layout_object_id: props.layout_object_id,
        master_object_id: props.master_object_id,
        is_skipped: None,
    });

    debug!(
        "Cloned template page {} ('{}') as '{}' with {} element(s)",
        source_index,
        source.object_id,
        object_id,
        elements.len()
    );

    Ok(DraftSlide {
        page: Page {
            object_id,
            page_type: Some(PageType::Slide),
            page_elements: Some(elements),
            slide_properties,
            ..Default::default()
        },
    })
}

fn clone_element(doc: &mut HostDocument, element: PageElement) -> PageElement {
    match element.element_kind {
        PageElementKind::Image(image) if image.is_embedded_picture() => PageElement {
            object_id: doc.next_id(),
            size: element.size,
            transform: element.transform,
            title: None,
            description: None,
            element_kind: PageElementKind::Image(Image {
                embedded: image.embedded,
                ..Default::default()
            }),
        },
        kind => {
            let mut copy = PageElement {
                element_kind: kind,
                ..element
            };
            assign_fresh_ids(doc, &mut copy);
            copy
        }
    }
}

fn assign_fresh_ids(doc: &mut HostDocument, element: &mut PageElement) {
    element.object_id = doc.next_id();
    if let PageElementKind::ElementGroup(group) = &mut element.element_kind {
        for child in &mut group.children {
            assign_fresh_ids(doc, child);
        }
    }
}

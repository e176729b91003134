// src/models/page.rs

use serde::{Deserialize, Serialize};

use crate::models::elements::PageElement;
use crate::models::shape::SolidFill;

/// The type of the page.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageType
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PageType {
    #[default]
    PageTypeUnspecified,
    Slide,
    Master,
    Layout,
    Notes,
}

/// The background fill of a page.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageBackgroundFill
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBackgroundFill {
    /// Solid color fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solid_fill: Option<SolidFill>,
}

/// The properties of the Page. Unset values inherit from the parent page.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageProperties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageProperties {
    /// The background fill of the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_background_fill: Option<PageBackgroundFill>,
}

/// Properties of a page with type `SLIDE`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#SlideProperties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideProperties {
    /// The layout this slide is based on.
    pub layout_object_id: Option<String>,
    /// The master this slide's layout is based on.
    pub master_object_id: Option<String>,
    /// Whether the slide is skipped in presentation mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_skipped: Option<bool>,
}

/// Properties of a page with type `LAYOUT`.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#LayoutProperties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutProperties {
    /// The master this layout is based on.
    pub master_object_id: Option<String>,
    /// The name of the layout.
    pub name: Option<String>,
    /// The human-readable name of the layout.
    pub display_name: Option<String>,
}

/// One entry of a page's extension list: authoring-tool metadata that is
/// never rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Extension {
    /// Identifies the authoring tool that wrote the entry.
    pub uri: String,
    /// Opaque tool data.
    #[serde(default)]
    pub payload: serde_json::Value,
}

/// A page in a presentation.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// The object ID for this page, unique among pages and page elements.
    pub object_id: String,
    /// The type of the page.
    #[serde(default)]
    pub page_type: Option<PageType>,
    /// Rendered elements in z-order. Template regions address them by position.
    pub page_elements: Option<Vec<PageElement>>,
    /// The revision ID of the presentation this page was read from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_id: Option<String>,
    /// The properties of the page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_properties: Option<PageProperties>,
    /// Slide specific properties. Only set if page_type = SLIDE.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slide_properties: Option<SlideProperties>,
    /// Layout specific properties. Only set if page_type = LAYOUT.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_properties: Option<LayoutProperties>,
    /// Authoring metadata. Never copied onto generated pages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_list: Option<Vec<Extension>>,
}

impl Page {
    pub fn elements(&self) -> &[PageElement] {
        self.page_elements.as_deref().unwrap_or_default()
    }

    pub fn elements_mut(&mut self) -> &mut [PageElement] {
        self.page_elements.as_deref_mut().unwrap_or_default()
    }

    pub fn element_count(&self) -> usize {
        self.elements().len()
    }

    pub fn element_at(&self, index: usize) -> Option<&PageElement> {
        self.elements().get(index)
    }

    pub fn element_at_mut(&mut self, index: usize) -> Option<&mut PageElement> {
        self.page_elements.as_mut()?.get_mut(index)
    }

    /// Position of the placeholder element with the given placeholder index.
    pub fn placeholder_position(&self, index: i32) -> Option<usize> {
        self.elements()
            .iter()
            .position(|e| e.placeholder_index() == Some(index))
    }

    pub fn position_of(&self, object_id: &str) -> Option<usize> {
        self.elements().iter().position(|e| e.object_id == object_id)
    }

    pub fn element_by_id_mut(&mut self, object_id: &str) -> Option<&mut PageElement> {
        self.page_elements
            .as_mut()?
            .iter_mut()
            .find(|e| e.object_id == object_id)
    }

    /// Removes a top-level element by object id.
    pub fn remove_element(&mut self, object_id: &str) -> Option<PageElement> {
        let position = self.position_of(object_id)?;
        self.page_elements.as_mut().map(|elements| elements.remove(position))
    }

    pub fn layout_object_id(&self) -> Option<&str> {
        self.slide_properties.as_ref()?.layout_object_id.as_deref()
    }
}

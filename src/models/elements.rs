// src/models/elements.rs

use serde::{Deserialize, Serialize};

use crate::models::common::{AffineTransform, Size};
use crate::models::image::Image;
use crate::models::placeholder::Placeholder;
use crate::models::shape::Shape;
use crate::models::table::Table;

/// A collection of page elements joined as a single unit.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#Group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// The elements in the group. At least two.
    pub children: Vec<PageElement>,
}

/// A connector or decorative line. Its styling is carried through unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    /// The type of the line.
    pub line_type: Option<String>,
    pub line_category: Option<String>,
    pub line_properties: Option<serde_json::Value>,
}

/// The specific kind of PageElement. The JSON representation uses the field
/// name as the key (e.g. `"shape": {...}`, `"image": {...}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PageElementKind {
    ElementGroup(Group),
    Shape(Shape),
    Image(Image),
    Line(Line),
    Table(Table),
}

/// A visual element rendered on a page.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#PageElement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageElement {
    /// Object ids of pages and page elements share one namespace.
    pub object_id: String,
    /// The size of the page element.
    pub size: Option<Size>,
    /// The transform of the page element.
    pub transform: Option<AffineTransform>,
    /// The title of the page element, used as alt text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(flatten)]
    pub element_kind: PageElementKind,
}

impl PageElement {
    pub fn placeholder(&self) -> Option<&Placeholder> {
        match &self.element_kind {
            PageElementKind::Shape(shape) => shape.placeholder.as_ref(),
            PageElementKind::Image(image) => image.placeholder.as_ref(),
            _ => None,
        }
    }

    pub fn placeholder_index(&self) -> Option<i32> {
        self.placeholder().and_then(|p| p.index)
    }

    pub fn as_shape_mut(&mut self) -> Option<&mut Shape> {
        match &mut self.element_kind {
            PageElementKind::Shape(shape) => Some(shape),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&Table> {
        match &self.element_kind {
            PageElementKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_table_mut(&mut self) -> Option<&mut Table> {
        match &mut self.element_kind {
            PageElementKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match &self.element_kind {
            PageElementKind::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Visits this element and every nested group child, depth first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a PageElement)) {
        visit(self);
        if let PageElementKind::ElementGroup(group) = &self.element_kind {
            for child in &group.children {
                child.walk(visit);
            }
        }
    }
}

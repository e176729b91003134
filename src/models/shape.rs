use serde::{Deserialize, Serialize};

use crate::models::colors::OpaqueColor;
use crate::models::placeholder::Placeholder;
use crate::models::text::TextContent;

/// The geometry of a shape. Only the kinds found on authored templates are listed.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/shapes#Type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShapeType {
    TypeUnspecified,
    TextBox,
    Rectangle,
    RoundRectangle,
    Ellipse,
    Chevron,
    HomePlate,
    RightArrow,
    DownArrow,
    Pentagon,
    Custom,
}

/// The autofit type of a shape.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/shapes#AutofitType
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutofitType {
    #[default]
    AutofitTypeUnspecified,
    None,
    /// Shrink text on overflow.
    TextAutofit,
    /// Resize the shape to fit the text.
    ShapeAutofit,
}

/// The autofit properties of a Shape.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/shapes#Autofit
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Autofit {
    /// The autofit type of the shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autofit_type: Option<AutofitType>,
    /// The font scale applied to the shape. Read-only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_scale: Option<f64>,
}

/// A solid color fill.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/other#SolidFill
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SolidFill {
    /// The color value of the solid fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<OpaqueColor>,
    /// The fraction of this color applied to the pixel, 0.0 to 1.0.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha: Option<f32>,
}

/// The shape background fill.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/shapes#ShapeBackgroundFill
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeBackgroundFill {
    /// Solid color fill.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solid_fill: Option<SolidFill>,
}

/// The properties of a Shape element.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/shapes#ShapeProperties
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(default)]
pub struct ShapeProperties {
    /// The background fill of the shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_background_fill: Option<ShapeBackgroundFill>,
    /// The autofit properties of the shape.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autofit: Option<Autofit>,
}

/// A page element kind holding geometry, optional text and placeholder info.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/shapes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shape {
    /// The type of the shape.
    pub shape_type: Option<ShapeType>,
    /// The text content of the shape.
    pub text: Option<TextContent>,
    /// The properties of the shape.
    pub shape_properties: Option<ShapeProperties>,
    /// Set when the shape is a placeholder inheriting from the layout.
    pub placeholder: Option<Placeholder>,
}

impl Shape {
    /// Switches the shape to shrink-text-on-overflow.
    pub fn set_text_autofit(&mut self) {
        let properties = self.shape_properties.get_or_insert_with(Default::default);
        properties.autofit = Some(Autofit {
            autofit_type: Some(AutofitType::TextAutofit),
            font_scale: None,
        });
    }
}

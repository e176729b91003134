// src/models/properties.rs

use serde::{Deserialize, Serialize};

use crate::models::colors::{OptionalColor, RgbColor};
use crate::models::common::Dimension;
use crate::models::link::Link;

/// Styling applied to a TextRun. Unset properties are inherited from the
/// paragraph or the parent placeholder.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#TextStyle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// The background color of the text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<OptionalColor>,
    /// The color of the text itself.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<OptionalColor>,
    /// The latin font family.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    /// The font used for East Asian characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub east_asian_font_family: Option<String>,
    /// The size of the text's font, in points.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<Dimension>,
    /// Whether or not the text is rendered as bold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    /// Whether or not the text is italicized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    /// Whether or not the text is underlined.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<bool>,
    /// Whether or not the text is struck through.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strikethrough: Option<bool>,
    /// Links are not inherited from parent text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<Link>,
}

impl TextStyle {
    /// The foreground color, when it is an explicit RGB value.
    pub fn rgb_foreground(&self) -> Option<&RgbColor> {
        self.foreground_color.as_ref().and_then(OptionalColor::as_rgb)
    }
}

/// The text alignment for a paragraph.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#Alignment
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Alignment {
    AlignmentUnspecified,
    Start,
    Center,
    End,
    Justified,
}

/// Styles that apply to a whole paragraph.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#ParagraphStyle
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphStyle {
    /// The text alignment for this paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
    /// Line spacing as a percentage of normal (100.0 is single spacing).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line_spacing: Option<f32>,
    /// The amount of extra space above the paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_above: Option<Dimension>,
    /// The amount of extra space below the paragraph.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space_below: Option<Dimension>,
}

use serde::{Deserialize, Serialize};

/// The type of placeholder.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#Type_4
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlaceholderType {
    None,
    Body,
    Chart,
    CenteredTitle,
    Object,
    Picture,
    SlideNumber,
    Subtitle,
    Table,
    Title,
}

/// Identifies a placeholder shape. Template regions address placeholders by
/// `index`, which is unique per page.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/other#Placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placeholder {
    /// The type of the placeholder.
    #[serde(rename = "type")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder_type: Option<PlaceholderType>,
    /// The index of the placeholder.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<i32>,
    /// The layout or master placeholder this one inherits from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_object_id: Option<String>,
}

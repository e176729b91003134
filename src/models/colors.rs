use serde::{Deserialize, Serialize};

/// An RGB color with components from 0.0 to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RgbColor {
    pub red: Option<f32>,
    pub green: Option<f32>,
    pub blue: Option<f32>,
}

impl RgbColor {
    pub fn new(red: f32, green: f32, blue: f32) -> Self {
        Self {
            red: Some(red),
            green: Some(green),
            blue: Some(blue),
        }
    }

    pub fn black() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    pub fn blue() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }
}

/// Theme color types, resolved through the page's color scheme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThemeColorType {
    ThemeColorTypeUnspecified,
    Dark1,
    Light1,
    Dark2,
    Light2,
    Accent1,
    Accent2,
    Accent3,
    Accent4,
    Accent5,
    Accent6,
    Hyperlink,
    FollowedHyperlink,
    Text1,
    Background1,
    Text2,
    Background2,
}

/// Either an RGB color or a theme color, keyed by JSON field name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OpaqueColorContent {
    RgbColor(RgbColor),
    ThemeColor(ThemeColorType),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpaqueColor {
    #[serde(flatten)]
    pub color_kind: OpaqueColorContent,
}

impl OpaqueColor {
    /// The RGB value, if this is not a theme color.
    pub fn as_rgb(&self) -> Option<&RgbColor> {
        match &self.color_kind {
            OpaqueColorContent::RgbColor(rgb) => Some(rgb),
            OpaqueColorContent::ThemeColor(_) => None,
        }
    }
}

/// A color that is opaque when `opaque_color` is set and transparent otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionalColor {
    pub opaque_color: Option<OpaqueColor>,
}

impl OptionalColor {
    pub fn rgb(color: RgbColor) -> Self {
        Self {
            opaque_color: Some(OpaqueColor {
                color_kind: OpaqueColorContent::RgbColor(color),
            }),
        }
    }

    pub fn as_rgb(&self) -> Option<&RgbColor> {
        self.opaque_color.as_ref().and_then(OpaqueColor::as_rgb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_colors_have_no_rgb_value() {
        let json = r#"{ "opaqueColor": { "themeColor": "ACCENT1" } }"#;
        let color: OptionalColor = serde_json::from_str(json).unwrap();
        assert!(color.as_rgb().is_none());

        let json = r#"{ "opaqueColor": { "rgbColor": { "red": 1.0 } } }"#;
        let color: OptionalColor = serde_json::from_str(json).unwrap();
        assert_eq!(color.as_rgb().and_then(|c| c.red), Some(1.0));
    }
}

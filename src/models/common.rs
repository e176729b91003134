use serde::{Deserialize, Serialize};

/// Number of English Metric Units in one point.
pub const EMU_PER_PT: f64 = 12_700.0;

/// Specifies a unit of length.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Dimension#Unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Unit {
    /// The units are unknown.
    #[serde(rename = "UNIT_UNSPECIFIED")]
    UnitUnspecified,
    /// An English Metric Unit (EMU). 1 EMU = 1/914400 inch = 1/360000 cm.
    Emu,
    /// A point (pt). 1 pt = 1/72 inch.
    Pt,
}

/// A magnitude in a specific unit.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    /// The magnitude.
    pub magnitude: Option<f64>,
    /// The units for magnitude.
    pub unit: Option<Unit>,
}

impl Dimension {
    /// A dimension measured in points.
    pub fn pt(magnitude: f64) -> Self {
        Self {
            magnitude: Some(magnitude),
            unit: Some(Unit::Pt),
        }
    }

    /// A dimension measured in EMU.
    pub fn emu(magnitude: f64) -> Self {
        Self {
            magnitude: Some(magnitude),
            unit: Some(Unit::Emu),
        }
    }

    /// Converts the dimension to points, or `None` when the unit is unknown.
    pub fn to_pt(&self) -> Option<f64> {
        let magnitude = self.magnitude?;
        match self.unit? {
            Unit::Pt => Some(magnitude),
            Unit::Emu => Some(magnitude / EMU_PER_PT),
            Unit::UnitUnspecified => None,
        }
    }
}

/// A width and height.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/Size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    /// The width of the object.
    pub width: Option<Dimension>,
    /// The height of the object.
    pub height: Option<Dimension>,
}

/// AffineTransform uses a 3x3 matrix with an implied last row of [ 0 0 1 ]
/// to transform source coordinates (x,y) into destination coordinates (x', y').
///
/// x' = scaleX * x + shearX * y + translateX;
/// y' = shearY * x + scaleY * y + translateY;
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages#AffineTransform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffineTransform {
    /// The X coordinate scaling element.
    pub scale_x: Option<f64>,
    /// The Y coordinate scaling element.
    pub scale_y: Option<f64>,
    /// The X coordinate shearing element.
    pub shear_x: Option<f64>,
    /// The Y coordinate shearing element.
    pub shear_y: Option<f64>,
    /// The X coordinate translation element.
    pub translate_x: Option<f64>,
    /// The Y coordinate translation element. Outlines sort elements by it.
    pub translate_y: Option<f64>,
    /// The units for the translation elements.
    pub unit: Option<Unit>,
}

impl AffineTransform {
    /// A pure translation, in EMU.
    pub fn translation(x: f64, y: f64) -> Self {
        Self {
            scale_x: Some(1.0),
            scale_y: Some(1.0),
            shear_x: None,
            shear_y: None,
            translate_x: Some(x),
            translate_y: Some(y),
            unit: Some(Unit::Emu),
        }
    }
}

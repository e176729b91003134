//! Tunables for deck assembly. Every field has a default, so a partial JSON
//! document (or none at all) is a valid configuration.

use serde::{Deserialize, Serialize};

use crate::errors::Result;
use crate::models::colors::RgbColor;

/// What to do when a content block's tagged fields do not line up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedBlockPolicy {
    /// Stop the run with the error.
    #[default]
    Abort,
    /// Log a warning and continue with the next block.
    Skip,
}

/// Face used when a text region has no run to inherit from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct FontDefaults {
    pub family: String,
    pub size_pt: f64,
    pub color: RgbColor,
}

impl Default for FontDefaults {
    fn default() -> Self {
        Self {
            family: "Meiryo UI".to_string(),
            size_pt: 18.0,
            color: RgbColor::black(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", default)]
pub struct AssemblyConfig {
    pub references_per_page: usize,
    pub list_rows_per_page: usize,
    pub table_rows_per_page: usize,
    pub table_max_columns: usize,
    /// Narrative blocks longer than this many characters are split across pages.
    pub narrative_split_threshold: usize,
    /// Marker in generated text that stands for a paragraph break.
    pub line_break_marker: String,
    pub default_font: FontDefaults,
    pub east_asian_font: String,
    pub hyperlink_color: RgbColor,
    /// Prefix for object ids of generated pages and elements.
    pub object_id_prefix: String,
    pub malformed_block_policy: MalformedBlockPolicy,
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            references_per_page: 11,
            list_rows_per_page: 11,
            table_rows_per_page: 10,
            table_max_columns: 5,
            narrative_split_threshold: 350,
            line_break_marker: "<br>".to_string(),
            default_font: FontDefaults::default(),
            east_asian_font: "Meiryo UI".to_string(),
            hyperlink_color: RgbColor::blue(),
            object_id_prefix: "gen".to_string(),
            malformed_block_policy: MalformedBlockPolicy::Abort,
        }
    }
}

impl AssemblyConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

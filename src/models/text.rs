// src/models/text.rs

use serde::{Deserialize, Serialize};

use crate::models::properties::{ParagraphStyle, TextStyle};

/// A segment of text with consistent styling. The last run of a paragraph
/// carries the paragraph's trailing `'\n'`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRun {
    /// The text of this run.
    pub content: Option<String>,
    /// The styling applied to this run.
    pub style: Option<TextStyle>,
}

/// Marks the beginning of a paragraph in the text element stream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParagraphMarker {
    /// The paragraph's style.
    pub style: Option<ParagraphStyle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AutoTextType {
    TypeUnspecified,
    SlideNumber,
}

/// Text replaced dynamically, such as the slide number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoText {
    #[serde(rename = "type")]
    pub auto_text_type: Option<AutoTextType>,
    pub content: Option<String>,
    pub style: Option<TextStyle>,
}

/// A single element of the text stream of a Shape or TableCell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextElement {
    TextRun(TextRun),
    ParagraphMarker(ParagraphMarker),
    AutoText(AutoText),
}

/// The textual content of a Shape or TableCell.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/text#TextContent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextContent {
    /// The text contents broken down into its component parts.
    pub text_elements: Option<Vec<TextElement>>,
}

impl TextContent {
    /// Builds paragraphs from `'\n'`-separated text, every run carrying `style`.
    pub fn from_paragraphs(text: &str, style: Option<TextStyle>) -> Self {
        let mut elements = Vec::new();
        for line in text.split('\n') {
            elements.push(TextElement::ParagraphMarker(ParagraphMarker::default()));
            elements.push(TextElement::TextRun(TextRun {
                content: Some(format!("{line}\n")),
                style: style.clone(),
            }));
        }
        Self {
            text_elements: Some(elements),
        }
    }

    /// The first text run of the first paragraph, if that paragraph has one.
    pub fn first_run(&self) -> Option<&TextRun> {
        let elements = self.text_elements.as_deref()?;
        let mut seen_marker = false;
        for element in elements {
            match element {
                TextElement::ParagraphMarker(_) if seen_marker => return None,
                TextElement::ParagraphMarker(_) => seen_marker = true,
                TextElement::TextRun(run) => return Some(run),
                TextElement::AutoText(_) => {}
            }
        }
        None
    }

    /// Concatenated run content, including paragraph newlines.
    pub fn plain_text(&self) -> String {
        let mut text = String::new();
        for element in self.text_elements.iter().flatten() {
            match element {
                TextElement::TextRun(run) => {
                    if let Some(content) = &run.content {
                        text.push_str(content);
                    }
                }
                TextElement::AutoText(auto) => {
                    if let Some(content) = &auto.content {
                        text.push_str(content);
                    }
                }
                TextElement::ParagraphMarker(_) => {}
            }
        }
        text
    }

    /// Iterates over every text run.
    pub fn runs(&self) -> impl Iterator<Item = &TextRun> {
        self.text_elements.iter().flatten().filter_map(|e| match e {
            TextElement::TextRun(run) => Some(run),
            _ => None,
        })
    }
}

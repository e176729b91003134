//! Writing text and pictures into the regions of a cloned page.

use crate::config::AssemblyConfig;
use crate::models::colors::OptionalColor;
use crate::models::common::Dimension;
use crate::models::elements::{PageElement, PageElementKind};
use crate::models::image::{EmbeddedImage, Image};
use crate::models::link::Link;
use crate::models::properties::TextStyle;
use crate::models::text::TextContent;

/// Unstyled paragraphs, one per `'\n'`-separated line. Styling comes from the
/// placeholder the text lands in.
pub fn plain_text(text: &str) -> TextContent {
    TextContent::from_paragraphs(text, None)
}

/// The run style new text adopts from the text it replaces.
///
/// Copies the face, size, weight, slant and RGB colour of the first run of
/// the first paragraph. Without such a run the configured default face is used.
pub fn inherited_style(existing: Option<&TextContent>, config: &AssemblyConfig) -> TextStyle {
    let mut style = match existing.and_then(TextContent::first_run) {
        Some(run) => {
            let base = run.style.clone().unwrap_or_default();
            TextStyle {
                foreground_color: base.rgb_foreground().cloned().map(OptionalColor::rgb),
                font_family: base.font_family,
                font_size: base.font_size,
                bold: base.bold,
                italic: base.italic,
                ..Default::default()
            }
        }
        None => TextStyle {
            foreground_color: Some(OptionalColor::rgb(config.default_font.color.clone())),
            font_family: Some(config.default_font.family.clone()),
            font_size: Some(Dimension::pt(config.default_font.size_pt)),
            bold: Some(false),
            italic: Some(false),
            ..Default::default()
        },
    };
    style.east_asian_font_family = Some(config.east_asian_font.clone());
    style
}

/// Replacement text styled after `existing`.
///
/// The configured line-break marker becomes a paragraph break. A hyperlink
/// makes every run a link, coloured and underlined.
pub fn inherited_text(
    existing: Option<&TextContent>,
    raw: &str,
    hyperlink: Option<&str>,
    config: &AssemblyConfig,
) -> TextContent {
    let mut style = inherited_style(existing, config);
    if let Some(address) = hyperlink {
        style.link = Some(Link::url(address));
        style.foreground_color = Some(OptionalColor::rgb(config.hyperlink_color.clone()));
        style.underline = Some(true);
    }
    let text = raw.replace(config.line_break_marker.as_str(), "\n");
    TextContent::from_paragraphs(&text, Some(style))
}

/// Turns a picture placeholder into an embedded image.
///
/// The element keeps its object id, size, transform and placeholder link, so
/// the region stays addressable afterwards.
pub fn fill_picture(element: &mut PageElement, image: EmbeddedImage) {
    let placeholder = element.placeholder().cloned();
    element.element_kind = PageElementKind::Image(Image {
        embedded: Some(image),
        placeholder,
        ..Default::default()
    });
}

use crate::models::{
    common::AffineTransform,
    elements::{PageElement, PageElementKind},
    page::Page,
    presentation::Presentation,
    table::Table,
    text::TextContent,
};
use std::cmp::Ordering;
use std::fmt::Write;

/// Vertical position of an element; elements without one sort last.
fn get_translate_y(element: &PageElement) -> f64 {
    element
        .transform
        .as_ref()
        .and_then(|t: &AffineTransform| t.translate_y)
        .unwrap_or(f64::MAX)
}

fn compare_elements_by_y(a: &PageElement, b: &PageElement) -> Ordering {
    get_translate_y(a)
        .partial_cmp(&get_translate_y(b))
        .unwrap_or(Ordering::Equal)
}

fn trimmed(text_content: &TextContent) -> Option<String> {
    let text = text_content.plain_text();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Table rows as markdown pipe rows, header separated from the data rows.
fn table_outline(table: &Table) -> Option<String> {
    let rows: Vec<Vec<String>> = table
        .table_rows
        .iter()
        .flatten()
        .map(|row| {
            row.table_cells
                .iter()
                .flatten()
                .map(|cell| {
                    cell.text
                        .as_ref()
                        .and_then(trimmed)
                        .unwrap_or_default()
                        .replace('\n', " ")
                })
                .collect()
        })
        .collect();
    if rows.iter().flatten().all(String::is_empty) {
        return None;
    }

    let mut out = String::new();
    for (index, row) in rows.iter().enumerate() {
        let _ = writeln!(out, "| {} |", row.join(" | "));
        if index == 0 {
            let _ = writeln!(out, "|{}", " --- |".repeat(row.len()));
        }
    }
    Some(out.trim_end().to_string())
}

fn element_outline(element: &PageElement, parts: &mut Vec<String>) {
    match &element.element_kind {
        PageElementKind::Shape(shape) => {
            if let Some(text) = shape.text.as_ref().and_then(trimmed) {
                parts.push(text);
            }
        }
        PageElementKind::Table(table) => {
            if let Some(text) = table_outline(table) {
                parts.push(text);
            }
        }
        PageElementKind::ElementGroup(group) => {
            let mut children: Vec<&PageElement> = group.children.iter().collect();
            children.sort_by(|a, b| compare_elements_by_y(a, b));
            for child in children {
                element_outline(child, parts);
            }
        }
        PageElementKind::Image(image) if image.embedded.is_some() => parts.push("[image]".to_string()),
        _ => {}
    }
}

fn slide_outline(slide: &Page) -> Option<String> {
    let mut sorted: Vec<&PageElement> = slide.elements().iter().collect();
    sorted.sort_by(|a, b| compare_elements_by_y(a, b));

    let mut parts = Vec::new();
    for element in sorted {
        element_outline(element, &mut parts);
    }
    (!parts.is_empty()).then(|| parts.join("\n"))
}

/// Renders the text of every slide as Markdown, top to bottom within a slide.
///
/// Useful for reviewing an assembled deck without opening it: each slide with
/// text becomes a `## Slide n` section, tables become pipe tables and
/// embedded pictures show as `[image]`.
pub fn render_outline(presentation: &Presentation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "# {}\n",
        presentation.title.as_deref().unwrap_or("Presentation")
    );

    let mut first_slide = true;
    for (index, slide) in presentation.slides().iter().enumerate() {
        let Some(content) = slide_outline(slide) else {
            continue;
        };
        if !first_slide {
            let _ = writeln!(out, "\n---\n");
        }
        first_slide = false;
        let _ = writeln!(out, "## Slide {}\n", index + 1);
        let _ = writeln!(out, "{content}");
    }
    out
}

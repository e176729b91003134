//! Builds one finished page from a catalog entry and the content meant for it.

use log::debug;

use crate::assembly::catalog::{RegionAddress, TemplateCatalog, TemplateEntry, TemplateFamily};
use crate::assembly::trimmer::{self, PageTrimmer};
use crate::assembly::{cloner, text};
use crate::config::AssemblyConfig;
use crate::document::{DraftSlide, HostDocument, SlideHandle};
use crate::errors::{AssemblyError, Result};
use crate::models::image::EmbeddedImage;
use crate::models::page::Page;

/// Which part of a region a fill targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// A single-shape or single-placeholder region.
    Whole,
    /// Slot `i` of a list region.
    Item(usize),
    /// A cell of a table region.
    Cell { row: usize, column: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillStyle {
    /// Text takes its look from the placeholder.
    Plain,
    /// Text copies the style of the run it replaces and shrinks to fit.
    Inherited,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegionFill {
    Text {
        region: String,
        slot: Slot,
        text: String,
        style: FillStyle,
        hyperlink: Option<String>,
    },
    Picture {
        region: String,
        slot: Slot,
        image: EmbeddedImage,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegionTrim {
    /// Keep the first `keep` slots (or table data rows).
    Keep { region: String, keep: usize },
    /// Keep the first `keep` columns of a table.
    Columns { region: String, keep: usize },
    /// Remove the listed shape groups.
    DropGroups { region: String, groups: Vec<usize> },
}

/// Everything written into one page, applied fills first, then trims.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageContent {
    pub fills: Vec<RegionFill>,
    pub trims: Vec<RegionTrim>,
}

impl PageContent {
    pub fn new() -> Self {
        Self::default()
    }

    fn text(mut self, region: &str, slot: Slot, text: &str, style: FillStyle, hyperlink: Option<&str>) -> Self {
        self.fills.push(RegionFill::Text {
            region: region.to_string(),
            slot,
            text: text.to_string(),
            style,
            hyperlink: hyperlink.map(str::to_string),
        });
        self
    }

    pub fn plain(self, region: &str, text: &str) -> Self {
        self.text(region, Slot::Whole, text, FillStyle::Plain, None)
    }

    pub fn inherited(self, region: &str, text: &str) -> Self {
        self.text(region, Slot::Whole, text, FillStyle::Inherited, None)
    }

    pub fn item(self, region: &str, index: usize, text: &str) -> Self {
        self.text(region, Slot::Item(index), text, FillStyle::Inherited, None)
    }

    pub fn cell(self, region: &str, row: usize, column: usize, text: &str) -> Self {
        self.text(region, Slot::Cell { row, column }, text, FillStyle::Inherited, None)
    }

    pub fn linked_cell(self, region: &str, row: usize, column: usize, text: &str, link: Option<&str>) -> Self {
        self.text(region, Slot::Cell { row, column }, text, FillStyle::Inherited, link)
    }

    pub fn picture(mut self, region: &str, index: usize, image: EmbeddedImage) -> Self {
        self.fills.push(RegionFill::Picture {
            region: region.to_string(),
            slot: Slot::Item(index),
            image,
        });
        self
    }

    pub fn keep(mut self, region: &str, keep: usize) -> Self {
        self.trims.push(RegionTrim::Keep {
            region: region.to_string(),
            keep,
        });
        self
    }

    pub fn keep_columns(mut self, region: &str, keep: usize) -> Self {
        self.trims.push(RegionTrim::Columns {
            region: region.to_string(),
            keep,
        });
        self
    }

    /// Every region the fills and trims name, in first-use order.
    pub fn region_names(&self) -> Vec<&str> {
        let fills = self.fills.iter().map(|fill| match fill {
            RegionFill::Text { region, .. } | RegionFill::Picture { region, .. } => region.as_str(),
        });
        let trims = self.trims.iter().map(|trim| match trim {
            RegionTrim::Keep { region, .. }
            | RegionTrim::Columns { region, .. }
            | RegionTrim::DropGroups { region, .. } => region.as_str(),
        });
        let mut names: Vec<&str> = Vec::new();
        for name in fills.chain(trims) {
            if !names.contains(&name) {
                names.push(name);
            }
        }
        names
    }

    pub fn drop_groups(mut self, region: &str, groups: Vec<usize>) -> Self {
        if !groups.is_empty() {
            self.trims.push(RegionTrim::DropGroups {
                region: region.to_string(),
                groups,
            });
        }
        self
    }
}

#[derive(Clone, Copy)]
enum Target {
    Element(usize),
    Cell { element: usize, row: usize, column: usize },
}

pub struct SlideMaterializer<'a> {
    catalog: &'a TemplateCatalog,
    config: &'a AssemblyConfig,
}

impl<'a> SlideMaterializer<'a> {
    pub fn new(catalog: &'a TemplateCatalog, config: &'a AssemblyConfig) -> Self {
        Self { catalog, config }
    }

    /// Clones the entry's page, writes `content` into it, trims it and appends it.
    ///
    /// The page is built detached from the document, so a failure leaves no page behind.
    pub fn materialize(
        &self,
        doc: &mut HostDocument,
        family: TemplateFamily,
        template_id: &str,
        variant_key: &str,
        content: &PageContent,
    ) -> Result<SlideHandle> {
        let entry = self.catalog.resolve(family, template_id, variant_key)?;
        let mut draft = cloner::clone_page(doc, entry.source_page_index)?;
        self.apply(&mut draft, entry, content)?;
        debug!(
            "Materialized {} template '{}' variant '{}' as '{}'",
            family,
            template_id,
            variant_key,
            draft.object_id()
        );
        Ok(doc.append(draft))
    }

    fn apply(&self, draft: &mut DraftSlide, entry: &TemplateEntry, content: &PageContent) -> Result<()> {
        let page = draft.page_mut();
        for fill in &content.fills {
            self.fill(page, entry, fill)?;
        }
        let mut trimmer = PageTrimmer::new(page);
        for trim in &content.trims {
            apply_trim(&mut trimmer, entry, trim)?;
        }
        Ok(())
    }

    fn fill(&self, page: &mut Page, entry: &TemplateEntry, fill: &RegionFill) -> Result<()> {
        match fill {
            RegionFill::Text {
                region,
                slot,
                text: body,
                style,
                hyperlink,
            } => {
                let target = locate(page, entry, region, *slot)?;
                let slide_id = page.object_id.clone();
                let existing = match target {
                    Target::Element(position) => page
                        .element_at_mut(position)
                        .and_then(|element| element.as_shape_mut())
                        .map(|shape| &mut shape.text),
                    Target::Cell { element, row, column } => page
                        .element_at_mut(element)
                        .and_then(|element| element.as_table_mut())
                        .and_then(|table| table.cell_mut(row, column))
                        .map(|cell| &mut cell.text),
                };
                let Some(slot_text) = existing else {
                    return Err(AssemblyError::ElementNotFound {
                        slide_id,
                        detail: format!("region '{region}' slot {slot:?} holds no text"),
                    });
                };
                *slot_text = Some(match style {
                    FillStyle::Plain => text::plain_text(body),
                    FillStyle::Inherited => text::inherited_text(
                        slot_text.as_ref(),
                        body,
                        hyperlink.as_deref(),
                        self.config,
                    ),
                });
                if let (FillStyle::Inherited, Target::Element(position)) = (style, target) {
                    if let Some(shape) = page.element_at_mut(position).and_then(|e| e.as_shape_mut()) {
                        shape.set_text_autofit();
                    }
                }
                Ok(())
            }
            RegionFill::Picture { region, slot, image } => {
                let Target::Element(position) = locate(page, entry, region, *slot)? else {
                    return Err(entry.missing_region(region));
                };
                let slide_id = page.object_id.clone();
                let element = page
                    .element_at_mut(position)
                    .ok_or(AssemblyError::ElementNotFound {
                        slide_id,
                        detail: format!("element {position}"),
                    })?;
                text::fill_picture(element, image.clone());
                Ok(())
            }
        }
    }
}

fn locate(page: &Page, entry: &TemplateEntry, region: &str, slot: Slot) -> Result<Target> {
    let address = entry.region(region)?;
    let not_found = |detail: String| AssemblyError::ElementNotFound {
        slide_id: page.object_id.clone(),
        detail,
    };
    let slot_of = |len: usize, index: usize| {
        if index < len {
            Ok(index)
        } else {
            Err(AssemblyError::mismatch(format!("region '{region}'"), len, index + 1))
        }
    };
    let position = |position: usize| {
        if position < page.element_count() {
            Ok(Target::Element(position))
        } else {
            Err(not_found(format!("element {position} for region '{region}'")))
        }
    };
    let placeholder = |number: i32| {
        page.placeholder_position(number)
            .map(Target::Element)
            .ok_or_else(|| not_found(format!("placeholder {number} for region '{region}'")))
    };
    match (address, slot) {
        (RegionAddress::Placeholder(number), Slot::Whole) => placeholder(*number),
        (RegionAddress::Shape(index), Slot::Whole) => position(*index),
        (RegionAddress::Placeholders(list), Slot::Item(i)) => placeholder(list[slot_of(list.len(), i)?]),
        (RegionAddress::Shapes(list), Slot::Item(i)) => position(list[slot_of(list.len(), i)?]),
        (RegionAddress::Table(index), Slot::Cell { row, column }) => {
            let table = trimmer::table_at(page, *index)?;
            if table.cell(row, column).is_none() {
                return Err(not_found(format!("cell ({row}, {column}) of region '{region}'")));
            }
            Ok(Target::Cell {
                element: *index,
                row,
                column,
            })
        }
        _ => Err(entry.missing_region(region)),
    }
}

fn apply_trim(trimmer: &mut PageTrimmer<'_>, entry: &TemplateEntry, trim: &RegionTrim) -> Result<()> {
    match trim {
        RegionTrim::Keep { region, keep } => {
            trimmer.keep(entry.region(region)?, *keep)?;
        }
        RegionTrim::Columns { region, keep } => {
            trimmer.keep_columns(entry.region(region)?, *keep)?;
        }
        RegionTrim::DropGroups { region, groups } => match entry.region(region)? {
            RegionAddress::ShapeGroups(all) => {
                trimmer.drop_groups(all, groups)?;
            }
            _ => return Err(entry.missing_region(region)),
        },
    }
    Ok(())
}

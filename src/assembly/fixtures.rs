//! In-memory template deck and catalog shared by the unit tests.

use indexmap::IndexMap;

use crate::assembly::catalog::{RegionAddress, TemplateCatalog, TemplateEntry, TemplateFamily};
use crate::models::colors::{OptionalColor, RgbColor};
use crate::models::common::{AffineTransform, Dimension, Size};
use crate::models::elements::{PageElement, PageElementKind};
use crate::models::image::{EmbeddedImage, Image};
use crate::models::page::{Page, PageType, SlideProperties};
use crate::models::placeholder::{Placeholder, PlaceholderType};
use crate::models::presentation::Presentation;
use crate::models::properties::TextStyle;
use crate::models::shape::{Shape, ShapeType};
use crate::models::table::{
    Table, TableBorderCell, TableBorderRow, TableCell, TableCellLocation, TableColumnProperties,
    TableRow,
};
use crate::models::text::TextContent;

pub(crate) fn template_style() -> TextStyle {
    TextStyle {
        font_family: Some("Arial".into()),
        font_size: Some(Dimension::pt(24.0)),
        bold: Some(true),
        italic: Some(false),
        foreground_color: Some(OptionalColor::rgb(RgbColor::new(0.2, 0.4, 0.6))),
        ..Default::default()
    }
}

fn element(id: &str, kind: PageElementKind) -> PageElement {
    PageElement {
        object_id: id.to_string(),
        size: Some(Size {
            width: Some(Dimension::emu(3_000_000.0)),
            height: Some(Dimension::emu(500_000.0)),
        }),
        transform: None,
        title: None,
        description: None,
        element_kind: kind,
    }
}

pub(crate) fn page(id: &str, elements: Vec<PageElement>) -> Page {
    Page {
        object_id: id.to_string(),
        page_type: Some(PageType::Slide),
        page_elements: Some(elements),
        slide_properties: Some(SlideProperties {
            layout_object_id: Some("layout_blank".into()),
            master_object_id: Some("master".into()),
            is_skipped: None,
        }),
        ..Default::default()
    }
}

pub(crate) fn text_box(id: &str, text: &str, style: Option<TextStyle>) -> PageElement {
    element(
        id,
        PageElementKind::Shape(Shape {
            shape_type: Some(ShapeType::TextBox),
            text: Some(TextContent::from_paragraphs(text, style)),
            ..Default::default()
        }),
    )
}

pub(crate) fn placeholder(id: &str, index: i32, kind: PlaceholderType) -> PageElement {
    element(
        id,
        PageElementKind::Shape(Shape {
            shape_type: Some(ShapeType::TextBox),
            placeholder: Some(Placeholder {
                placeholder_type: Some(kind),
                index: Some(index),
                parent_object_id: None,
            }),
            ..Default::default()
        }),
    )
}

pub(crate) fn picture(id: &str, bytes: &[u8]) -> PageElement {
    element(
        id,
        PageElementKind::Image(Image {
            embedded: Some(EmbeddedImage {
                mime_type: "image/png".into(),
                data: bytes.to_vec(),
            }),
            ..Default::default()
        }),
    )
}

pub(crate) fn table(id: &str, rows: usize, columns: usize) -> PageElement {
    let location = |row: usize, column: usize| TableCellLocation {
        row_index: Some(row as i32),
        column_index: Some(column as i32),
    };
    let border_row = |cells: usize, row: usize| TableBorderRow {
        table_border_cells: Some(
            (0..cells)
                .map(|column| TableBorderCell {
                    location: Some(location(row, column)),
                    table_border_properties: None,
                })
                .collect(),
        ),
    };
    let table = Table {
        rows: rows as i32,
        columns: columns as i32,
        table_columns: Some(
            (0..columns)
                .map(|_| TableColumnProperties {
                    column_width: Some(Dimension::emu(1_000_000.0)),
                })
                .collect(),
        ),
        table_rows: Some(
            (0..rows)
                .map(|row| TableRow {
                    row_height: Some(Dimension::emu(300_000.0)),
                    table_cells: Some(
                        (0..columns)
                            .map(|column| TableCell {
                                location: Some(location(row, column)),
                                row_span: Some(1),
                                column_span: Some(1),
                                text: Some(TextContent::from_paragraphs(
                                    &format!("r{row}c{column}"),
                                    Some(template_style()),
                                )),
                            })
                            .collect(),
                    ),
                })
                .collect(),
        ),
        horizontal_border_rows: Some((0..=rows).map(|row| border_row(columns, row)).collect()),
        vertical_border_rows: Some((0..rows).map(|row| border_row(columns + 1, row)).collect()),
    };
    element(id, PageElementKind::Table(table))
}

/// A template deck whose pages cover every catalog entry, plus that catalog.
pub(crate) struct Fixture {
    pub presentation: Presentation,
    pub catalog: TemplateCatalog,
}

struct Builder {
    slides: Vec<Page>,
    catalog: TemplateCatalog,
}

impl Builder {
    fn add(
        &mut self,
        family: TemplateFamily,
        template_id: &str,
        variant_key: &str,
        capacity: usize,
        primary_region: Option<&str>,
        elements: Vec<PageElement>,
        regions: Vec<(&str, RegionAddress)>,
    ) -> &mut TemplateEntry {
        let index = self.slides.len();
        let elements = elements
            .into_iter()
            .enumerate()
            .map(|(position, mut e)| {
                e.object_id = format!("s{index}_e{position}");
                e.transform = Some(AffineTransform::translation(0.0, position as f64 * 100_000.0));
                e
            })
            .collect();
        self.slides.push(page(&format!("scaffold_{index}"), elements));

        let table = match family {
            TemplateFamily::Title => &mut self.catalog.title,
            TemplateFamily::Chart => &mut self.catalog.chart,
            TemplateFamily::Reference => &mut self.catalog.reference,
            TemplateFamily::Normal => &mut self.catalog.normal,
        };
        let entry = TemplateEntry {
            template_id: template_id.to_string(),
            variant_key: variant_key.to_string(),
            source_page_index: index,
            capacity,
            primary_region: primary_region.map(str::to_string),
            regions: regions
                .into_iter()
                .map(|(name, address)| (name.to_string(), address))
                .collect::<IndexMap<_, _>>(),
            tag_groups: Vec::new(),
        };
        table
            .entry(template_id.to_string())
            .or_default()
            .entry(variant_key.to_string())
            .or_insert(entry)
    }

    /// Title placeholder, then `slots` styled shapes for each of `lists`.
    fn slotted(
        &mut self,
        family: TemplateFamily,
        template_id: &str,
        variant_key: &str,
        slots: usize,
        lists: &[&str],
    ) {
        let mut elements = vec![placeholder("", 0, PlaceholderType::Title)];
        let mut regions = vec![("title", RegionAddress::Placeholder(0))];
        for name in lists {
            let start = elements.len();
            for slot in 0..slots {
                elements.push(text_box("", &format!("{name} {slot}"), Some(template_style())));
            }
            regions.push((*name, RegionAddress::Shapes((start..start + slots).collect())));
        }
        self.add(
            family,
            template_id,
            variant_key,
            slots,
            lists.first().copied(),
            elements,
            regions,
        );
    }

    fn tabular(&mut self, family: TemplateFamily, template_id: &str, region: &str, rows: usize, columns: usize) {
        self.add(
            family,
            template_id,
            "main",
            rows - 1,
            None,
            vec![
                placeholder("", 0, PlaceholderType::Title),
                table("", rows, columns),
            ],
            vec![
                ("title", RegionAddress::Placeholder(0)),
                (region, RegionAddress::Table(1)),
            ],
        );
    }

    fn chart(&mut self, layout: &str, slots: usize, explanation: bool) {
        let mut elements = vec![placeholder("", 0, PlaceholderType::Title)];
        let mut numbers = Vec::new();
        for slot in 0..slots {
            let index = 10 + slot as i32;
            elements.push(placeholder("", index, PlaceholderType::Picture));
            numbers.push(index);
        }
        let titles_start = elements.len();
        for slot in 0..slots {
            elements.push(text_box("", &format!("chart {slot}"), Some(template_style())));
        }
        let mut regions = vec![
            ("title", RegionAddress::Placeholder(0)),
            ("chart", RegionAddress::Placeholders(numbers)),
            (
                "chart_title",
                RegionAddress::Shapes((titles_start..titles_start + slots).collect()),
            ),
        ];
        if explanation {
            regions.push(("explanation", RegionAddress::Shape(elements.len())));
            elements.push(text_box("", "explanation", Some(template_style())));
        }
        self.add(TemplateFamily::Chart, layout, "main", slots, Some("chart"), elements, regions);
    }
}

pub(crate) fn fixture() -> Fixture {
    use TemplateFamily::*;

    let mut b = Builder {
        slides: Vec::new(),
        catalog: TemplateCatalog::default(),
    };

    b.add(
        Title,
        "1",
        "main",
        0,
        None,
        vec![
            placeholder("", 0, PlaceholderType::CenteredTitle),
            placeholder("", 1, PlaceholderType::Subtitle),
        ],
        vec![
            ("title", RegionAddress::Placeholder(0)),
            ("subtitle", RegionAddress::Placeholder(1)),
        ],
    );

    b.chart("1p", 1, true);
    b.chart("2p", 2, true);
    b.chart("4p", 4, false);

    b.tabular(Reference, "1", "table", 12, 2);

    for (variant, with_logo) in [("mainA", true), ("mainB", false)] {
        let mut elements = vec![
            placeholder("", 0, PlaceholderType::Title),
            text_box("", "subtitle", Some(template_style())),
            text_box("", "body", None),
        ];
        if with_logo {
            elements.push(picture("", &[0x89, b'P', b'N', b'G']));
        }
        b.add(
            Normal,
            "1",
            variant,
            1,
            None,
            elements,
            vec![
                ("title", RegionAddress::Placeholder(0)),
                ("subtitle", RegionAddress::Shape(1)),
                ("body", RegionAddress::Shape(2)),
            ],
        );
    }

    for (variant, slots) in [("main", 4), ("sub1", 3), ("spc", 5)] {
        b.slotted(Normal, "2", variant, slots, &["step_mark", "step_content"]);
    }

    let agenda = ["agenda_summary", "agenda_content"];
    b.slotted(Normal, "3", "main", 8, &agenda);
    b.slotted(Normal, "3", "sub7", 1, &agenda);
    for k in 1..=6 {
        b.slotted(Normal, "3", &format!("sub{k}"), k + 1, &agenda);
    }
    for k in 1..=7 {
        b.slotted(Normal, "3", &format!("subsub{k}"), 8 - k, &agenda);
    }

    b.tabular(Normal, "4", "list", 12, 2);

    for (variant, slots) in [
        ("mainA", 5),
        ("mainB", 4),
        ("subA1", 4),
        ("subA2", 3),
        ("subA3", 2),
        ("subA4", 1),
        ("subB1", 3),
        ("subB2", 2),
        ("subC1", 4),
        ("subC2", 3),
        ("subC3", 2),
    ] {
        b.slotted(Normal, "5", variant, slots, &agenda);
    }

    let mut elements = vec![placeholder("", 0, PlaceholderType::Title)];
    for area in ["east", "centre", "west"] {
        elements.push(text_box("", area, Some(template_style())));
    }
    for label in ["E", "C", "W"] {
        elements.push(text_box("", label, None));
    }
    let regional = b.add(
        Normal,
        "6",
        "main",
        3,
        Some("content"),
        elements,
        vec![
            ("title", RegionAddress::Placeholder(0)),
            ("content", RegionAddress::Shapes(vec![1, 2, 3])),
            (
                "groups",
                RegionAddress::ShapeGroups(vec![vec![1, 4], vec![2, 5], vec![3, 6]]),
            ),
        ],
    );
    regional.tag_groups = vec![
        vec!["TOKYO".into(), "CHIBA".into()],
        vec!["NAGOYA".into()],
        vec!["OSAKA".into()],
    ];

    b.tabular(Normal, "7", "table", 11, 5);

    let presentation = Presentation {
        presentation_id: "template_deck".into(),
        title: Some("Template deck".into()),
        slides: Some(b.slides),
        ..Default::default()
    };
    b.catalog.fill_keys();
    if let Err(err) = b.catalog.validate() {
        panic!("fixture catalog is invalid: {err}");
    }
    Fixture {
        presentation,
        catalog: b.catalog,
    }
}

/// Index of the scaffold page that backs a catalog entry.
pub(crate) fn source_index(fixture: &Fixture, family: TemplateFamily, template_id: &str, variant: &str) -> usize {
    match fixture.catalog.resolve(family, template_id, variant) {
        Ok(entry) => entry.source_page_index,
        Err(err) => panic!("{err}"),
    }
}

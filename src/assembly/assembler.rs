//! Drives page creation for a whole deck and removes the authoring pages afterwards.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::assembly::blocks::{layout_block, ContentBlock, ContentRewriter};
use crate::assembly::catalog::{TemplateCatalog, TemplateFamily};
use crate::assembly::materializer::{PageContent, SlideMaterializer};
use crate::assembly::pagination::PaginationScheme;
use crate::assembly::selector::VariantSelector;
use crate::assembly::tags::{extract, first};
use crate::config::{AssemblyConfig, MalformedBlockPolicy};
use crate::document::{HostDocument, ScaffoldMarker, SlideHandle};
use crate::errors::{AssemblyError, Result};
use crate::models::image::EmbeddedImage;
use crate::models::presentation::Presentation;

const TITLE_TEMPLATE: &str = "1";
const REFERENCE_TEMPLATE: &str = "1";

/// A chart page: its title, tagged `[TITLE]`/`[EXPLANATION]` text and one to four images.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSlide {
    pub title: String,
    pub content: String,
    pub images: Vec<EmbeddedImage>,
}

/// A chart page whose images are still base64 text, optionally as `data:` URIs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedChart {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
}

impl EncodedChart {
    pub fn decode(&self) -> Result<ChartSlide> {
        let images = self
            .images
            .iter()
            .map(|encoded| decode_image(encoded))
            .collect::<Result<Vec<_>>>()?;
        Ok(ChartSlide {
            title: self.title.clone(),
            content: self.content.clone(),
            images,
        })
    }
}

fn decode_image(encoded: &str) -> Result<EmbeddedImage> {
    let (mime_type, payload) = match encoded.strip_prefix("data:") {
        Some(uri) => {
            let (header, payload) = uri.split_once(',').ok_or_else(|| {
                AssemblyError::ImageDecodeFailure("data URI has no payload".to_string())
            })?;
            let mime = header.strip_suffix(";base64").unwrap_or(header);
            (mime.to_string(), payload)
        }
        None => ("image/png".to_string(), encoded),
    };
    let data = STANDARD
        .decode(payload.trim())
        .map_err(|e| AssemblyError::ImageDecodeFailure(e.to_string()))?;
    Ok(EmbeddedImage { mime_type, data })
}

/// One bibliography entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    #[serde(default)]
    pub link: Option<String>,
}

fn default_reference_title() -> String {
    "References".to_string()
}

/// Everything needed to assemble a deck in one call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckRequest {
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub charts: Vec<EncodedChart>,
    #[serde(default)]
    pub blocks: Vec<ContentBlock>,
    #[serde(default = "default_reference_title")]
    pub reference_title: String,
    #[serde(default)]
    pub references: Vec<Reference>,
}

/// The serialized deck and how many pages were generated.
#[derive(Debug, Clone, PartialEq)]
pub struct AssembledDeck {
    pub bytes: Vec<u8>,
    pub pages_added: usize,
}

/// Appends generated pages to a template deck.
///
/// Pages are added in call order. Pages appended before an error stay in the
/// document, so callers that need all-or-nothing should discard the assembler
/// on any error.
pub struct DeckAssembler<'c, R = StdRng> {
    document: HostDocument,
    catalog: &'c TemplateCatalog,
    config: AssemblyConfig,
    selector: VariantSelector<R>,
    scaffold: ScaffoldMarker,
    pages_added: usize,
}

impl<'c> DeckAssembler<'c, StdRng> {
    pub fn new(presentation: Presentation, catalog: &'c TemplateCatalog, config: AssemblyConfig) -> Self {
        let document = HostDocument::new(presentation, &config.object_id_prefix);
        let scaffold = document.scaffold_marker();
        info!(
            "Starting assembly on '{}' with {} template page(s)",
            document.presentation().presentation_id,
            scaffold.count
        );
        Self {
            document,
            catalog,
            config,
            selector: VariantSelector::from_entropy(),
            scaffold,
            pages_added: 0,
        }
    }
}

impl<'c, R: Rng> DeckAssembler<'c, R> {
    /// Replaces the variant selector's random source, e.g. with a seeded one.
    pub fn with_rng<R2: Rng>(self, rng: R2) -> DeckAssembler<'c, R2> {
        DeckAssembler {
            document: self.document,
            catalog: self.catalog,
            config: self.config,
            selector: VariantSelector::new(rng),
            scaffold: self.scaffold,
            pages_added: self.pages_added,
        }
    }

    pub fn pages_added(&self) -> usize {
        self.pages_added
    }

    pub fn document(&self) -> &HostDocument {
        &self.document
    }

    pub fn config(&self) -> &AssemblyConfig {
        &self.config
    }

    fn materialize(
        &mut self,
        family: TemplateFamily,
        template_id: &str,
        variant_key: &str,
        content: &PageContent,
    ) -> Result<SlideHandle> {
        let materializer = SlideMaterializer::new(self.catalog, &self.config);
        let handle = materializer.materialize(&mut self.document, family, template_id, variant_key, content)?;
        self.pages_added += 1;
        Ok(handle)
    }

    pub fn add_title_page(&mut self, title: &str, subtitle: &str) -> Result<SlideHandle> {
        info!("Adding title page '{}'", title);
        let content = PageContent::new()
            .plain("title", title)
            .plain("subtitle", subtitle);
        self.materialize(TemplateFamily::Title, TITLE_TEMPLATE, "main", &content)
    }

    /// One page per chart slide, laid out by image count.
    pub fn add_chart_pages(&mut self, charts: &[ChartSlide]) -> Result<Vec<SlideHandle>> {
        if charts.is_empty() {
            warn!("No charts supplied; skipping chart pages");
            return Ok(Vec::new());
        }
        info!("Adding {} chart page(s)", charts.len());
        let mut handles = Vec::with_capacity(charts.len());
        for chart in charts {
            let (layout, content) = chart_page(chart)?;
            handles.push(self.materialize(TemplateFamily::Chart, layout, "main", &content)?);
        }
        Ok(handles)
    }

    /// Pages for one content block.
    ///
    /// The block is rewritten, parsed and planned before its first page is
    /// built, and every planned page's regions must resolve in the catalog, so
    /// a block never ends up half-built. A `ContentShapeMismatch` either aborts
    /// or skips the block, per [`MalformedBlockPolicy`].
    pub fn add_content_pages<W>(&mut self, block: &ContentBlock, rewriter: &W) -> Result<Vec<SlideHandle>>
    where
        W: ContentRewriter + ?Sized,
    {
        info!("Adding content block '{}' ({:?})", block.title, block.kind);
        let planned = match layout_block(block, rewriter, self.catalog, &self.config, &mut self.selector) {
            Ok(planned) => planned,
            Err(err) if err.is_data_shape() && self.config.malformed_block_policy == MalformedBlockPolicy::Skip => {
                warn!("Skipping block '{}': {}", block.title, err);
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };
        let template_id = block.kind.template_id();
        for page in &planned {
            let entry = self
                .catalog
                .resolve(TemplateFamily::Normal, template_id, &page.variant_key)?;
            for region in page.content.region_names() {
                entry.region(region)?;
            }
        }
        planned
            .iter()
            .map(|page| self.materialize(TemplateFamily::Normal, template_id, &page.variant_key, &page.content))
            .collect()
    }

    /// Bibliography pages, a fixed number of rows per page.
    pub fn add_reference_pages(&mut self, title: &str, references: &[Reference]) -> Result<Vec<SlideHandle>> {
        if references.is_empty() {
            info!("No references; skipping reference pages");
            return Ok(Vec::new());
        }
        let scheme = PaginationScheme::fixed_rows(self.config.references_per_page, "main");
        let plan = scheme.plan(REFERENCE_TEMPLATE, references.len(), &mut self.selector)?;
        info!(
            "Adding {} reference(s) over {} page(s)",
            references.len(),
            plan.page_count()
        );
        let mut handles = Vec::with_capacity(plan.page_count());
        for page in plan.pages {
            let rows = &references[page.item_range.clone()];
            let mut content = PageContent::new()
                .inherited("title", title)
                .cell("table", 0, 1, title);
            for (row, reference) in rows.iter().enumerate() {
                content = content.linked_cell("table", row + 1, 1, &reference.title, reference.link.as_deref());
            }
            content = content.keep("table", rows.len());
            handles.push(self.materialize(
                TemplateFamily::Reference,
                REFERENCE_TEMPLATE,
                &page.variant_key,
                &content,
            )?);
        }
        Ok(handles)
    }

    /// Removes the template pages and returns the remaining document.
    pub fn finalize_document(mut self) -> Presentation {
        let removed = self.document.remove_scaffold(self.scaffold);
        info!(
            "Assembly finished: {} page(s) added, {} template page(s) removed",
            self.pages_added, removed
        );
        self.document.into_presentation()
    }

    /// Removes the template pages and serializes the deck.
    pub fn finalize(self) -> Result<AssembledDeck> {
        let pages_added = self.pages_added;
        let presentation = self.finalize_document();
        let bytes = serde_json::to_vec_pretty(&presentation)?;
        Ok(AssembledDeck { bytes, pages_added })
    }
}

fn chart_page(chart: &ChartSlide) -> Result<(&'static str, PageContent)> {
    let count = chart.images.len();
    let layout = match count {
        1 => "1p",
        2 => "2p",
        3 | 4 => "4p",
        _ => {
            return Err(AssemblyError::mismatch(
                format!("chart images of '{}'", chart.title),
                4,
                count,
            ))
        }
    };
    let titles = extract("TITLE", &chart.content)?;
    if titles.len() < count {
        return Err(AssemblyError::mismatch(
            format!("[TITLE] of chart '{}'", chart.title),
            count,
            titles.len(),
        ));
    }
    let mut content = PageContent::new().inherited("title", &chart.title);
    if layout != "4p" {
        content = content.inherited("explanation", &first("EXPLANATION", &chart.content)?);
    }
    for (slot, (image, caption)) in chart.images.iter().zip(&titles).enumerate() {
        content = content
            .picture("chart", slot, image.clone())
            .item("chart_title", slot, caption);
    }
    Ok((layout, content.keep("chart", count).keep("chart_title", count)))
}

/// Builds a complete deck from a template presentation and a request.
pub fn assemble<R, W>(
    presentation: Presentation,
    catalog: &TemplateCatalog,
    config: AssemblyConfig,
    request: &DeckRequest,
    rewriter: &W,
    rng: R,
) -> Result<AssembledDeck>
where
    R: Rng,
    W: ContentRewriter + ?Sized,
{
    let charts = request
        .charts
        .iter()
        .map(EncodedChart::decode)
        .collect::<Result<Vec<_>>>()?;

    let mut assembler = DeckAssembler::new(presentation, catalog, config).with_rng(rng);
    assembler.add_title_page(&request.title, &request.subtitle)?;
    assembler.add_chart_pages(&charts)?;
    for block in &request.blocks {
        assembler.add_content_pages(block, rewriter)?;
    }
    assembler.add_reference_pages(&request.reference_title, &request.references)?;
    assembler.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::blocks::{BlockKind, PreTagged};
    use crate::assembly::fixtures::{fixture, source_index};
    use crate::models::elements::PageElementKind;
    use crate::models::link::Link;
    use crate::models::page::Page;
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;

    fn assembler(fx: &crate::assembly::fixtures::Fixture, config: AssemblyConfig) -> DeckAssembler<'_, StdRng> {
        DeckAssembler::new(fx.presentation.clone(), &fx.catalog, config).with_rng(StdRng::seed_from_u64(11))
    }

    fn table(page: &Page) -> &crate::models::table::Table {
        page.elements()
            .iter()
            .find_map(|e| e.as_table())
            .expect("page has a table")
    }

    fn agenda(n: usize) -> String {
        (0..n)
            .map(|i| {
                format!("[AGENDA_SUMMARY]s{i}[/AGENDA_SUMMARY][AGENDA_CONTENT]c{i}[/AGENDA_CONTENT]")
            })
            .collect()
    }

    fn png() -> EmbeddedImage {
        EmbeddedImage {
            mime_type: "image/png".into(),
            data: vec![0x89, b'P', b'N', b'G'],
        }
    }

    #[test]
    fn twenty_three_references_fill_three_pages() {
        let fx = fixture();
        let mut deck = assembler(&fx, AssemblyConfig::default());
        let references: Vec<Reference> = (0..23)
            .map(|i| Reference {
                title: format!("Source {i}"),
                link: Some(format!("https://example.org/{i}")),
            })
            .collect();
        let handles = deck.add_reference_pages("References", &references).unwrap();
        assert_eq!(handles.len(), 3);

        let doc = deck.document();
        let rows: Vec<usize> = handles
            .iter()
            .map(|h| table(doc.page(h.index).unwrap()).row_count())
            .collect();
        assert_eq!(rows, vec![12, 12, 2]);

        let last = table(doc.page(handles[2].index).unwrap());
        let cell = last.cell(1, 1).unwrap().text.as_ref().unwrap();
        assert_eq!(cell.plain_text(), "Source 22\n");
        let style = cell.first_run().and_then(|r| r.style.as_ref()).unwrap();
        assert_eq!(style.link, Some(Link::url("https://example.org/22")));
        assert_eq!(style.underline, Some(true));
        assert_eq!(
            last.cell(0, 1).unwrap().text.as_ref().unwrap().plain_text(),
            "References\n"
        );
    }

    #[test]
    fn nine_agenda_items_overflow_onto_a_second_page() {
        let fx = fixture();
        let mut deck = assembler(&fx, AssemblyConfig::default());
        let block = ContentBlock {
            kind: BlockKind::Agenda,
            title: "Agenda".into(),
            content: agenda(9),
        };
        let handles = deck.add_content_pages(&block, &PreTagged).unwrap();
        assert_eq!(handles.len(), 2);

        let doc = deck.document();
        let first = doc.page(handles[0].index).unwrap();
        let second = doc.page(handles[1].index).unwrap();
        let main = doc.page(source_index(&fx, TemplateFamily::Normal, "3", "main")).unwrap();
        let tail = doc.page(source_index(&fx, TemplateFamily::Normal, "3", "subsub7")).unwrap();
        assert_eq!(first.element_count(), main.element_count());
        assert_eq!(second.element_count(), tail.element_count());
        assert_eq!(second.element_count(), 3);
    }

    #[test]
    fn tied_variants_never_repeat_three_times() {
        for seed in 0..20 {
            let fx = fixture();
            let mut deck = DeckAssembler::new(fx.presentation.clone(), &fx.catalog, AssemblyConfig::default())
                .with_rng(StdRng::seed_from_u64(seed));
            let block = ContentBlock {
                kind: BlockKind::CompactAgenda,
                title: "Topics".into(),
                content: agenda(4),
            };
            let mut layouts = Vec::new();
            for _ in 0..3 {
                let handles = deck.add_content_pages(&block, &PreTagged).unwrap();
                assert_eq!(handles.len(), 1);
                let history: Vec<String> = deck.selector.history().map(str::to_string).collect();
                layouts.push(history.last().cloned().unwrap());
            }
            assert!(
                !(layouts[0] == layouts[1] && layouts[1] == layouts[2]),
                "seed {seed}: {layouts:?}"
            );
            for key in &layouts {
                assert!(key == "subA1" || key == "mainB");
            }
        }
    }

    #[test]
    fn malformed_block_is_skipped_or_aborts_per_policy() {
        let fx = fixture();
        let block = ContentBlock {
            kind: BlockKind::Steps,
            title: "Steps".into(),
            content: "[STEP_MARK]1[/STEP_MARK]".into(),
        };

        let mut deck = assembler(&fx, AssemblyConfig::default());
        assert!(deck.add_content_pages(&block, &PreTagged).unwrap_err().is_data_shape());
        assert_eq!(deck.pages_added(), 0);

        let config = AssemblyConfig {
            malformed_block_policy: MalformedBlockPolicy::Skip,
            ..Default::default()
        };
        let mut deck = assembler(&fx, config);
        assert!(deck.add_content_pages(&block, &PreTagged).unwrap().is_empty());
        assert_eq!(deck.pages_added(), 0);
    }

    #[test]
    fn region_missing_from_a_later_variant_adds_no_pages_of_the_block() {
        let mut fx = fixture();
        fx.catalog
            .normal
            .get_mut("3")
            .and_then(|variants| variants.get_mut("subsub7"))
            .unwrap()
            .regions
            .shift_remove("agenda_content");

        let mut deck = assembler(&fx, AssemblyConfig::default());
        let block = ContentBlock {
            kind: BlockKind::Agenda,
            title: "Agenda".into(),
            content: agenda(9),
        };
        let err = deck.add_content_pages(&block, &PreTagged).unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::MissingRegion { ref variant_key, ref region, .. }
                if variant_key == "subsub7" && region == "agenda_content"
        ));
        assert_eq!(deck.pages_added(), 0);
        assert_eq!(deck.document().page_count(), fx.presentation.slide_count());
    }

    #[test]
    fn four_up_chart_with_three_images_drops_the_spare_slot() {
        let fx = fixture();
        let mut deck = assembler(&fx, AssemblyConfig::default());
        let chart = ChartSlide {
            title: "Sales".into(),
            content: "[TITLE]a[/TITLE][TITLE]b[/TITLE][TITLE]c[/TITLE]".into(),
            images: vec![png(), png(), png()],
        };
        let handles = deck.add_chart_pages(&[chart]).unwrap();
        let page = deck.document().page(handles[0].index).unwrap();
        // title placeholder + 3 charts + 3 captions
        assert_eq!(page.element_count(), 7);
        let pictures = page
            .elements()
            .iter()
            .filter(|e| matches!(&e.element_kind, PageElementKind::Image(i) if i.embedded.is_some()))
            .count();
        assert_eq!(pictures, 3);
    }

    #[test]
    fn chart_with_too_many_images_is_rejected() {
        let fx = fixture();
        let mut deck = assembler(&fx, AssemblyConfig::default());
        let chart = ChartSlide {
            title: "Too many".into(),
            content: String::new(),
            images: vec![png(); 5],
        };
        assert!(deck.add_chart_pages(&[chart]).unwrap_err().is_data_shape());
        assert_eq!(deck.pages_added(), 0);
    }

    #[test]
    fn bad_base64_is_an_image_decode_failure() {
        let chart = EncodedChart {
            title: "t".into(),
            content: String::new(),
            images: vec!["data:image/png;base64,@@@".into()],
        };
        assert!(matches!(chart.decode(), Err(AssemblyError::ImageDecodeFailure(_))));

        let chart = EncodedChart {
            images: vec!["data:image/jpeg;base64,iVBORw==".into()],
            ..chart
        };
        let decoded = chart.decode().unwrap();
        assert_eq!(decoded.images[0].mime_type, "image/jpeg");
        assert_eq!(decoded.images[0].data, vec![0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn full_request_keeps_only_generated_pages() {
        let fx = fixture();
        let request: DeckRequest = serde_json::from_value(serde_json::json!({
            "title": "Quarterly review",
            "subtitle": "Operations",
            "charts": [{
                "title": "Revenue",
                "content": "[TITLE]By month[/TITLE][EXPLANATION]Up 4%[/EXPLANATION]",
                "images": ["iVBORw=="]
            }],
            "blocks": [
                { "template": "4", "title": "Actions", "content": "[LIST_CONTENT]Hire[/LIST_CONTENT]" }
            ],
            "references": [{ "title": "Annual report", "link": "https://example.org/ar" }]
        }))
        .unwrap();

        let deck = assemble(
            fx.presentation.clone(),
            &fx.catalog,
            AssemblyConfig::default(),
            &request,
            &PreTagged,
            StdRng::seed_from_u64(5),
        )
        .unwrap();
        assert_eq!(deck.pages_added, 4);

        let presentation: Presentation = serde_json::from_slice(&deck.bytes).unwrap();
        assert_eq!(presentation.slide_count(), 4);
        for page in presentation.slides() {
            assert!(page.object_id.starts_with("gen_"));
        }
        let title_page = &presentation.slides()[0];
        let PageElementKind::Shape(shape) = &title_page.elements()[0].element_kind else {
            panic!("expected a title shape");
        };
        assert_eq!(shape.text.as_ref().unwrap().plain_text(), "Quarterly review\n");
    }
}

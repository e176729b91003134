//! The seven kinds of free-text content block and how each is laid out over pages.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::assembly::catalog::{TemplateCatalog, TemplateFamily};
use crate::assembly::materializer::PageContent;
use crate::assembly::pagination::{CapacityTable, PaginationPlan, PaginationScheme};
use crate::assembly::selector::VariantSelector;
use crate::assembly::tags::{extract, zip_tags};
use crate::config::AssemblyConfig;
use crate::errors::{AssemblyError, Result};

/// A normal-content template. Serialized as its template id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    /// Subtitle and body, split over several pages when the text is long.
    #[serde(rename = "1")]
    Narrative,
    /// Three to five numbered steps on one page.
    #[serde(rename = "2")]
    Steps,
    /// Up to eight agenda items per page.
    #[serde(rename = "3")]
    Agenda,
    /// A one-column table of list items.
    #[serde(rename = "4")]
    List,
    /// Up to five agenda items per page.
    #[serde(rename = "5")]
    CompactAgenda,
    /// Items grouped by area tags, one text box per group.
    #[serde(rename = "6")]
    Regional,
    /// A markdown pipe table.
    #[serde(rename = "7")]
    Table,
}

impl BlockKind {
    pub const ALL: [BlockKind; 7] = [
        BlockKind::Narrative,
        BlockKind::Steps,
        BlockKind::Agenda,
        BlockKind::List,
        BlockKind::CompactAgenda,
        BlockKind::Regional,
        BlockKind::Table,
    ];

    pub fn template_id(self) -> &'static str {
        match self {
            BlockKind::Narrative => "1",
            BlockKind::Steps => "2",
            BlockKind::Agenda => "3",
            BlockKind::List => "4",
            BlockKind::CompactAgenda => "5",
            BlockKind::Regional => "6",
            BlockKind::Table => "7",
        }
    }

    pub fn from_template_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.template_id() == id)
    }

    /// Paging rules of the kind. `Regional` always fills exactly one page.
    pub fn scheme(self, config: &AssemblyConfig) -> Option<PaginationScheme> {
        let scheme = match self {
            BlockKind::Narrative => PaginationScheme::RemainderOnLast {
                capacity: 1,
                table: CapacityTable::new().with(1, &["mainA", "mainB"]),
            },
            BlockKind::Steps => PaginationScheme::SinglePage {
                table: CapacityTable::new()
                    .with(4, &["main"])
                    .with(3, &["sub1"])
                    .with(5, &["spc"]),
            },
            BlockKind::Agenda => PaginationScheme::SplitTail {
                capacity: 8,
                full: "main".into(),
                single_page: CapacityTable::new()
                    .with(1, &["sub7"])
                    .with(2, &["sub1"])
                    .with(3, &["sub2"])
                    .with(4, &["sub3"])
                    .with(5, &["sub4"])
                    .with(6, &["sub5"])
                    .with(7, &["sub6"]),
                multi_page: CapacityTable::new()
                    .with(1, &["subsub7"])
                    .with(2, &["subsub6"])
                    .with(3, &["subsub5"])
                    .with(4, &["subsub4"])
                    .with(5, &["subsub3"])
                    .with(6, &["subsub2"])
                    .with(7, &["subsub1"]),
            },
            BlockKind::List => PaginationScheme::fixed_rows(config.list_rows_per_page, "main"),
            BlockKind::CompactAgenda => PaginationScheme::SplitTail {
                capacity: 5,
                full: "mainA".into(),
                single_page: CapacityTable::new()
                    .with(4, &["subA1", "mainB"])
                    .with(3, &["subA2", "subB1"])
                    .with(2, &["subA3", "subB2"])
                    .with(1, &["subA4"]),
                multi_page: CapacityTable::new()
                    .with(4, &["subC1"])
                    .with(3, &["subC2"])
                    .with(2, &["subC3"])
                    .with(1, &["subA4"]),
            },
            BlockKind::Regional => return None,
            BlockKind::Table => PaginationScheme::fixed_rows(config.table_rows_per_page, "main"),
        };
        Some(scheme)
    }
}

/// One normal-content request: a kind, a page title and raw source text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "template")]
    pub kind: BlockKind,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RewriteMode {
    /// Fit the content on one page.
    Single,
    /// Break long content into several tagged sections.
    Split,
}

/// Turns raw block content into tagged text, e.g. by prompting a language model.
pub trait ContentRewriter {
    fn rewrite(&self, kind: BlockKind, mode: RewriteMode, raw: &str) -> Result<String>;
}

/// For content that already carries its tags.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreTagged;

impl ContentRewriter for PreTagged {
    fn rewrite(&self, _kind: BlockKind, _mode: RewriteMode, raw: &str) -> Result<String> {
        Ok(raw.to_string())
    }
}

impl<F> ContentRewriter for F
where
    F: Fn(BlockKind, RewriteMode, &str) -> Result<String>,
{
    fn rewrite(&self, kind: BlockKind, mode: RewriteMode, raw: &str) -> Result<String> {
        self(kind, mode, raw)
    }
}

/// A page of a block, ready to materialize.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedPage {
    pub variant_key: String,
    pub content: PageContent,
}

/// `①` to `⑳`, then the parenthesized `⑴` to `⒇` for 21 to 40, then `(41)` and up.
pub fn circled_number(n: usize) -> String {
    match n {
        1..=40 => char::from_u32(0x245F + n as u32)
            .map(String::from)
            .unwrap_or_else(|| format!("({n})")),
        _ => format!("({n})"),
    }
}

/// Splits pipe-table text into its header and data rows.
///
/// Row 0 is the header and row 1 the separator. Cells are trimmed and empty
/// cells are dropped.
pub fn parse_pipe_table(text: &str) -> (Vec<String>, Vec<Vec<String>>) {
    let mut rows = text.trim().lines().map(|line| {
        line.trim()
            .split('|')
            .map(str::trim)
            .filter(|cell| !cell.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>()
    });
    let header = rows.next().unwrap_or_default();
    let data = rows.skip(1).collect();
    (header, data)
}

/// Rewrites, parses and plans a whole block before any page is built.
pub fn layout_block<R, W>(
    block: &ContentBlock,
    rewriter: &W,
    catalog: &TemplateCatalog,
    config: &AssemblyConfig,
    selector: &mut VariantSelector<R>,
) -> Result<Vec<PlannedPage>>
where
    R: Rng,
    W: ContentRewriter + ?Sized,
{
    let kind = block.kind;
    let template_id = kind.template_id();
    let split = kind == BlockKind::Narrative
        && block.content.chars().count() > config.narrative_split_threshold;
    let mode = if split {
        RewriteMode::Split
    } else {
        RewriteMode::Single
    };
    let tagged = rewriter.rewrite(kind, mode, &block.content)?;
    debug!("Block '{}' ({:?}) rewritten in {:?} mode", block.title, kind, mode);

    let plan = |total: usize, selector: &mut VariantSelector<R>| -> Result<PaginationPlan> {
        match kind.scheme(config) {
            Some(scheme) => scheme.plan(template_id, total, selector),
            None => Ok(PaginationPlan::default()),
        }
    };

    let pages = match kind {
        BlockKind::Narrative => {
            let mut pairs = zip_tags("SUBTITLE", "BODY", &tagged)?;
            if !split {
                if pairs.is_empty() {
                    return Err(AssemblyError::mismatch("[SUBTITLE]/[BODY]", 1, 0));
                }
                pairs.truncate(1);
            }
            plan(pairs.len(), selector)?
                .pages
                .into_iter()
                .enumerate()
                .map(|(i, page)| {
                    let (subtitle, body) = &pairs[page.item_range.start];
                    let title = if split {
                        format!("{} {}", block.title, circled_number(i + 1))
                    } else {
                        block.title.clone()
                    };
                    PlannedPage {
                        variant_key: page.variant_key,
                        content: PageContent::new()
                            .plain("title", &title)
                            .inherited("subtitle", subtitle)
                            .inherited("body", body),
                    }
                })
                .collect()
        }
        BlockKind::Steps => {
            let pairs = zip_tags("STEP_MARK", "STEP_CONTENT", &tagged)?;
            paired_pages(&block.title, &pairs, plan(pairs.len(), selector)?, "step_mark", "step_content")
        }
        BlockKind::Agenda | BlockKind::CompactAgenda => {
            let pairs = zip_tags("AGENDA_SUMMARY", "AGENDA_CONTENT", &tagged)?;
            paired_pages(
                &block.title,
                &pairs,
                plan(pairs.len(), selector)?,
                "agenda_summary",
                "agenda_content",
            )
        }
        BlockKind::List => {
            let items = extract("LIST_CONTENT", &tagged)?;
            plan(items.len(), selector)?
                .pages
                .into_iter()
                .map(|page| {
                    let rows = &items[page.item_range.clone()];
                    let mut content = PageContent::new()
                        .inherited("title", &block.title)
                        .cell("list", 0, 1, &block.title);
                    for (row, item) in rows.iter().enumerate() {
                        content = content.cell("list", row + 1, 1, item);
                    }
                    PlannedPage {
                        variant_key: page.variant_key,
                        content: content.keep("list", rows.len()),
                    }
                })
                .collect()
        }
        BlockKind::Regional => {
            let entry = catalog.resolve(TemplateFamily::Normal, template_id, "main")?;
            if entry.tag_groups.is_empty() {
                return Err(AssemblyError::InvalidCatalog(format!(
                    "template '{template_id}' variant 'main' lists no tag groups"
                )));
            }
            let mut content = PageContent::new().inherited("title", &block.title);
            let mut empty = Vec::new();
            for (slot, group) in entry.tag_groups.iter().enumerate() {
                let mut lines = Vec::new();
                for tag in group {
                    for item in extract(tag, &tagged)? {
                        lines.push(format!("[{tag}] {item}"));
                    }
                }
                if lines.is_empty() {
                    empty.push(slot);
                } else {
                    content = content.item("content", slot, &lines.join("\n\n"));
                }
            }
            vec![PlannedPage {
                variant_key: "main".into(),
                content: content.drop_groups("groups", empty),
            }]
        }
        BlockKind::Table => {
            let (header, data) = parse_pipe_table(&tagged);
            if header.is_empty() {
                return Err(AssemblyError::mismatch("pipe table header", 1, 0));
            }
            let max_columns = config.table_max_columns;
            let widest = data.iter().map(Vec::len).max().unwrap_or(0);
            let used_columns = header.len().max(widest).min(max_columns);
            plan(data.len(), selector)?
                .pages
                .into_iter()
                .map(|page| {
                    let rows = &data[page.item_range.clone()];
                    let mut content = PageContent::new().inherited("title", &block.title);
                    for (column, name) in header.iter().take(max_columns).enumerate() {
                        content = content.cell("table", 0, column, name);
                    }
                    for (row, cells) in rows.iter().enumerate() {
                        for (column, value) in cells.iter().take(max_columns).enumerate() {
                            content = content.cell("table", row + 1, column, value);
                        }
                    }
                    PlannedPage {
                        variant_key: page.variant_key,
                        content: content
                            .keep("table", rows.len())
                            .keep_columns("table", used_columns),
                    }
                })
                .collect()
        }
    };

    if pages.is_empty() {
        warn!("Block '{}' ({:?}) produced no items; no pages added", block.title, kind);
    }
    Ok(pages)
}

fn paired_pages(
    title: &str,
    pairs: &[(String, String)],
    plan: PaginationPlan,
    left: &str,
    right: &str,
) -> Vec<PlannedPage> {
    plan.pages
        .into_iter()
        .map(|page| {
            let mut content = PageContent::new().plain("title", title);
            for (slot, (a, b)) in pairs[page.item_range.clone()].iter().enumerate() {
                content = content.item(left, slot, a).item(right, slot, b);
            }
            PlannedPage {
                variant_key: page.variant_key,
                content,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assembly::fixtures::fixture;
    use crate::assembly::materializer::{RegionFill, RegionTrim};
    use pretty_assertions::assert_eq;

    fn block(kind: BlockKind, content: &str) -> ContentBlock {
        ContentBlock {
            kind,
            title: "Heading".into(),
            content: content.into(),
        }
    }

    fn layout(block: &ContentBlock) -> Result<Vec<PlannedPage>> {
        let fx = fixture();
        let mut selector = VariantSelector::seeded(3);
        layout_block(block, &PreTagged, &fx.catalog, &AssemblyConfig::default(), &mut selector)
    }

    fn texts(page: &PlannedPage) -> Vec<(&str, &str)> {
        page.content
            .fills
            .iter()
            .filter_map(|fill| match fill {
                RegionFill::Text { region, text, .. } => Some((region.as_str(), text.as_str())),
                RegionFill::Picture { .. } => None,
            })
            .collect()
    }

    #[test]
    fn block_kinds_use_template_ids_on_the_wire() {
        let json = r#"{ "template": "5", "title": "t", "content": "c" }"#;
        let block: ContentBlock = serde_json::from_str(json).unwrap();
        assert_eq!(block.kind, BlockKind::CompactAgenda);
        assert_eq!(BlockKind::from_template_id("7"), Some(BlockKind::Table));
        assert_eq!(BlockKind::from_template_id("8"), None);
    }

    #[test]
    fn circled_numbers() {
        assert_eq!(circled_number(1), "①");
        assert_eq!(circled_number(3), "③");
        assert_eq!(circled_number(20), "⑳");
        assert_eq!(circled_number(21), "⑴");
        assert_eq!(circled_number(40), "⒇");
        assert_eq!(circled_number(41), "(41)");
    }

    #[test]
    fn short_narrative_uses_first_pair_only() {
        let pages = layout(&block(
            BlockKind::Narrative,
            "[SUBTITLE]s1[/SUBTITLE][BODY]b1[/BODY][SUBTITLE]s2[/SUBTITLE][BODY]b2[/BODY]",
        ))
        .unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(
            texts(&pages[0]),
            vec![("title", "Heading"), ("subtitle", "s1"), ("body", "b1")]
        );
    }

    #[test]
    fn long_narrative_is_split_with_numbered_titles() {
        let mut content = String::new();
        for i in 0..3 {
            content.push_str(&format!("[SUBTITLE]s{i}[/SUBTITLE][BODY]{}[/BODY]", "x".repeat(150)));
        }
        let modes = std::cell::RefCell::new(Vec::new());
        let rewriter = |_: BlockKind, mode: RewriteMode, raw: &str| -> Result<String> {
            modes.borrow_mut().push(mode);
            Ok(raw.to_string())
        };
        let fx = fixture();
        let mut selector = VariantSelector::seeded(3);
        let pages = layout_block(
            &block(BlockKind::Narrative, &content),
            &rewriter,
            &fx.catalog,
            &AssemblyConfig::default(),
            &mut selector,
        )
        .unwrap();
        assert_eq!(modes.into_inner(), vec![RewriteMode::Split]);
        let titles: Vec<_> = pages.iter().map(|p| texts(p)[0].1.to_string()).collect();
        assert_eq!(titles, vec!["Heading ①", "Heading ②", "Heading ③"]);
        for page in &pages {
            assert!(["mainA", "mainB"].contains(&page.variant_key.as_str()));
        }
    }

    #[test]
    fn steps_pick_variant_by_count() {
        let pages = layout(&block(
            BlockKind::Steps,
            "[STEP_MARK]1[/STEP_MARK][STEP_CONTENT]a[/STEP_CONTENT]\
             [STEP_MARK]2[/STEP_MARK][STEP_CONTENT]b[/STEP_CONTENT]\
             [STEP_MARK]3[/STEP_MARK][STEP_CONTENT]c[/STEP_CONTENT]",
        ))
        .unwrap();
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].variant_key, "sub1");
    }

    #[test]
    fn steps_without_tagged_steps_are_an_unsupported_size() {
        let err = layout(&block(BlockKind::Steps, "no tags here")).unwrap_err();
        assert!(matches!(
            err,
            AssemblyError::UnsupportedPageRemainder { ref template_id, size: 0 } if template_id == "2"
        ));
    }

    fn planned_keys(kind: BlockKind, total: usize, seed: u64) -> Result<Vec<String>> {
        let scheme = kind.scheme(&AssemblyConfig::default()).unwrap();
        let mut selector = VariantSelector::seeded(seed);
        let plan = scheme.plan(kind.template_id(), total, &mut selector)?;
        Ok(plan.pages.into_iter().map(|page| page.variant_key).collect())
    }

    #[test]
    fn agenda_variants_follow_the_authored_tables() {
        let cases: &[(usize, &[&str])] = &[
            (1, &["sub7"]),
            (2, &["sub1"]),
            (3, &["sub2"]),
            (7, &["sub6"]),
            (8, &["main"]),
            (9, &["main", "subsub7"]),
            (14, &["main", "subsub2"]),
            (15, &["main", "subsub1"]),
            (16, &["main", "main"]),
            (17, &["main", "main", "subsub7"]),
        ];
        for (total, expected) in cases {
            assert_eq!(planned_keys(BlockKind::Agenda, *total, 0).unwrap(), *expected, "{total} items");
        }
    }

    #[test]
    fn compact_agenda_variants_follow_the_authored_tables() {
        let cases: &[(usize, &[&str])] = &[
            (1, &["subA4"]),
            (5, &["mainA"]),
            (6, &["mainA", "subA4"]),
            (7, &["mainA", "subC3"]),
            (8, &["mainA", "subC2"]),
            (9, &["mainA", "subC1"]),
            (10, &["mainA", "mainA"]),
        ];
        for (total, expected) in cases {
            assert_eq!(
                planned_keys(BlockKind::CompactAgenda, *total, 0).unwrap(),
                *expected,
                "{total} items"
            );
        }
        let tied: &[(usize, &[&str])] = &[(2, &["subA3", "subB2"]), (3, &["subA2", "subB1"]), (4, &["subA1", "mainB"])];
        for (total, candidates) in tied {
            for seed in 0..10 {
                let keys = planned_keys(BlockKind::CompactAgenda, *total, seed).unwrap();
                assert_eq!(keys.len(), 1);
                assert!(candidates.contains(&keys[0].as_str()), "{total} items: {keys:?}");
            }
        }
    }

    #[test]
    fn steps_variants_follow_the_authored_table() {
        assert_eq!(planned_keys(BlockKind::Steps, 3, 0).unwrap(), vec!["sub1"]);
        assert_eq!(planned_keys(BlockKind::Steps, 4, 0).unwrap(), vec!["main"]);
        assert_eq!(planned_keys(BlockKind::Steps, 5, 0).unwrap(), vec!["spc"]);
        for total in [2, 6] {
            assert!(matches!(
                planned_keys(BlockKind::Steps, total, 0),
                Err(AssemblyError::UnsupportedPageRemainder { size, .. }) if size == total
            ));
        }
    }

    #[test]
    fn row_based_kinds_page_by_configured_rows() {
        assert_eq!(planned_keys(BlockKind::List, 23, 0).unwrap(), vec!["main"; 3]);
        assert_eq!(planned_keys(BlockKind::Table, 10, 0).unwrap(), vec!["main"]);
        assert_eq!(planned_keys(BlockKind::Table, 11, 0).unwrap(), vec!["main"; 2]);
        assert!(BlockKind::Regional.scheme(&AssemblyConfig::default()).is_none());
    }

    #[test]
    fn mismatched_agenda_tags_are_rejected() {
        let err = layout(&block(
            BlockKind::Agenda,
            "[AGENDA_SUMMARY]a[/AGENDA_SUMMARY][AGENDA_SUMMARY]b[/AGENDA_SUMMARY]\
             [AGENDA_CONTENT]only one[/AGENDA_CONTENT]",
        ))
        .unwrap_err();
        assert!(err.is_data_shape());
    }

    #[test]
    fn regional_groups_join_tagged_items_and_drop_empty_groups() {
        let pages = layout(&block(
            BlockKind::Regional,
            "[TOKYO]Shibuya[/TOKYO][OSAKA]Umeda[/OSAKA][CHIBA]Makuhari[/CHIBA][TOKYO]Ueno[/TOKYO]",
        ))
        .unwrap();
        let page = &pages[0];
        assert_eq!(
            texts(page),
            vec![
                ("title", "Heading"),
                ("content", "[TOKYO] Shibuya\n\n[TOKYO] Ueno\n\n[CHIBA] Makuhari"),
                ("content", "[OSAKA] Umeda"),
            ]
        );
        assert_eq!(
            page.content.trims,
            vec![RegionTrim::DropGroups {
                region: "groups".into(),
                groups: vec![1],
            }]
        );
    }

    #[test]
    fn pipe_table_parsing_drops_separator_and_empty_cells() {
        let (header, data) = parse_pipe_table(
            "| Name | Score |\n|------|-------|\n| a | 1 |\n| b |  |\n",
        );
        assert_eq!(header, vec!["Name", "Score"]);
        assert_eq!(data, vec![vec!["a", "1"], vec!["b"]]);
    }

    #[test]
    fn table_pages_trim_rows_and_columns() {
        let mut text = String::from("| A | B | C |\n|---|---|---|\n");
        for i in 0..12 {
            text.push_str(&format!("| {i} | x | y |\n"));
        }
        let pages = layout(&block(BlockKind::Table, &text)).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(
            pages[1].content.trims,
            vec![
                RegionTrim::Keep {
                    region: "table".into(),
                    keep: 2,
                },
                RegionTrim::Columns {
                    region: "table".into(),
                    keep: 3,
                },
            ]
        );
    }

    #[test]
    fn list_pages_carry_header_and_rows() {
        let text: String = (0..13)
            .map(|i| format!("[LIST_CONTENT]item {i}[/LIST_CONTENT]"))
            .collect();
        let pages = layout(&block(BlockKind::List, &text)).unwrap();
        assert_eq!(pages.len(), 2);
        let second = texts(&pages[1]);
        assert_eq!(second[1], ("list", "Heading"));
        assert_eq!(second[2], ("list", "item 11"));
        assert_eq!(second.len(), 4);
    }

    #[test]
    fn empty_block_plans_no_pages() {
        assert!(layout(&block(BlockKind::List, "nothing tagged")).unwrap().is_empty());
    }
}

//! Splits a run of content items into pages and picks a variant for each page.

use std::collections::BTreeMap;
use std::ops::Range;

use log::debug;
use rand::Rng;

use crate::assembly::selector::VariantSelector;
use crate::errors::{AssemblyError, Result};

/// Page size to the variant keys authored for that size, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapacityTable {
    sizes: BTreeMap<usize, Vec<String>>,
}

impl CapacityTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps every size from 1 to `capacity` to the same variant.
    pub fn uniform(capacity: usize, variant_key: &str) -> Self {
        let mut table = Self::new();
        for size in 1..=capacity {
            table = table.with(size, &[variant_key]);
        }
        table
    }

    pub fn with(mut self, size: usize, candidates: &[&str]) -> Self {
        self.sizes
            .insert(size, candidates.iter().map(|c| c.to_string()).collect());
        self
    }

    pub fn candidates(&self, size: usize) -> Option<&[String]> {
        self.sizes
            .get(&size)
            .map(Vec::as_slice)
            .filter(|c| !c.is_empty())
    }

    pub fn max_size(&self) -> Option<usize> {
        self.sizes.keys().next_back().copied()
    }
}

/// One physical page of a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSpec {
    pub variant_key: String,
    pub item_range: Range<usize>,
    /// Last page holding fewer items than the full capacity.
    pub is_final_partial: bool,
}

impl PageSpec {
    pub fn len(&self) -> usize {
        self.item_range.len()
    }

    pub fn is_empty(&self) -> bool {
        self.item_range.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationPlan {
    pub pages: Vec<PageSpec>,
}

impl PaginationPlan {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn total_items(&self) -> usize {
        self.pages.iter().map(PageSpec::len).sum()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.pages.iter().map(PageSpec::len).collect()
    }
}

/// How a template spreads items over pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaginationScheme {
    /// Every page but the last is full; the last page's variant is looked up
    /// by its item count. An exact multiple ends on a full page.
    RemainderOnLast {
        capacity: usize,
        table: CapacityTable,
    },
    /// Full pages use `full`. The short final page takes its variant from
    /// `single_page` when it is the only page and from `multi_page` otherwise.
    SplitTail {
        capacity: usize,
        full: String,
        single_page: CapacityTable,
        multi_page: CapacityTable,
    },
    /// All items on one page, variant chosen by the exact item count.
    SinglePage { table: CapacityTable },
}

impl PaginationScheme {
    /// Fixed rows per page, one variant for every page.
    pub fn fixed_rows(rows_per_page: usize, variant_key: &str) -> Self {
        PaginationScheme::RemainderOnLast {
            capacity: rows_per_page,
            table: CapacityTable::uniform(rows_per_page, variant_key),
        }
    }

    pub fn capacity(&self) -> usize {
        match self {
            PaginationScheme::RemainderOnLast { capacity, .. }
            | PaginationScheme::SplitTail { capacity, .. } => *capacity,
            PaginationScheme::SinglePage { table } => table.max_size().unwrap_or(0),
        }
    }

    /// Plans `total_items` items. Ties between variants of one size go to `selector`.
    ///
    /// Paging schemes plan no pages for zero items. A single-page scheme looks
    /// the count up like any other, so an empty page is an unsupported size.
    pub fn plan<R: Rng>(
        &self,
        template_id: &str,
        total_items: usize,
        selector: &mut VariantSelector<R>,
    ) -> Result<PaginationPlan> {
        if total_items == 0 && !matches!(self, PaginationScheme::SinglePage { .. }) {
            return Ok(PaginationPlan::default());
        }
        let plan = match self {
            PaginationScheme::RemainderOnLast { capacity, table } => {
                let capacity = checked_capacity(template_id, *capacity)?;
                let page_count = total_items.div_ceil(capacity);
                let mut pages = Vec::with_capacity(page_count);
                for page in 0..page_count {
                    let start = page * capacity;
                    let size = capacity.min(total_items - start);
                    let variant_key = pick(template_id, table, size, selector)?;
                    pages.push(PageSpec {
                        variant_key,
                        item_range: start..start + size,
                        is_final_partial: size < capacity,
                    });
                }
                PaginationPlan { pages }
            }
            PaginationScheme::SplitTail {
                capacity,
                full,
                single_page,
                multi_page,
            } => {
                let capacity = checked_capacity(template_id, *capacity)?;
                let page_count = total_items.div_ceil(capacity);
                let mut pages = Vec::with_capacity(page_count);
                for page in 0..page_count {
                    let start = page * capacity;
                    let remaining = total_items as isize - ((page + 1) * capacity) as isize;
                    let (size, variant_key) = if remaining < 0 {
                        let size = (capacity as isize + remaining) as usize;
                        let table = if page_count == 1 {
                            single_page
                        } else {
                            multi_page
                        };
                        (size, pick(template_id, table, size, selector)?)
                    } else {
                        (capacity, full.clone())
                    };
                    pages.push(PageSpec {
                        variant_key,
                        item_range: start..start + size,
                        is_final_partial: size < capacity,
                    });
                }
                PaginationPlan { pages }
            }
            PaginationScheme::SinglePage { table } => {
                let variant_key = pick(template_id, table, total_items, selector)?;
                PaginationPlan {
                    pages: vec![PageSpec {
                        variant_key,
                        item_range: 0..total_items,
                        is_final_partial: false,
                    }],
                }
            }
        };
        debug!(
            "Template '{}': {} item(s) planned as {:?}",
            template_id,
            total_items,
            plan.sizes()
        );
        Ok(plan)
    }
}

fn checked_capacity(template_id: &str, capacity: usize) -> Result<usize> {
    if capacity == 0 {
        return Err(AssemblyError::UnsupportedPageRemainder {
            template_id: template_id.to_string(),
            size: 0,
        });
    }
    Ok(capacity)
}

fn pick<R: Rng>(
    template_id: &str,
    table: &CapacityTable,
    size: usize,
    selector: &mut VariantSelector<R>,
) -> Result<String> {
    let unsupported = || AssemblyError::UnsupportedPageRemainder {
        template_id: template_id.to_string(),
        size,
    };
    let candidates = table.candidates(size).ok_or_else(unsupported)?;
    match candidates {
        [only] => Ok(only.clone()),
        _ => selector.choose(candidates).ok_or_else(unsupported),
    }
}

//! Shrinks fixed-capacity regions of a page down to the number of slots in use.
//!
//! Region addresses are positions in the page as cloned from its template.
//! A [`PageTrimmer`] records the element ids at those positions before any
//! trim runs, so removing one region never shifts the next region's slots.

use log::debug;

use crate::assembly::catalog::RegionAddress;
use crate::errors::{AssemblyError, Result};
use crate::models::page::Page;
use crate::models::table::Table;

pub struct PageTrimmer<'p> {
    page: &'p mut Page,
    layout: Vec<String>,
    placeholders: Vec<(i32, String)>,
}

impl<'p> PageTrimmer<'p> {
    pub fn new(page: &'p mut Page) -> Self {
        let layout = page.elements().iter().map(|e| e.object_id.clone()).collect();
        let placeholders = page
            .elements()
            .iter()
            .filter_map(|e| Some((e.placeholder_index()?, e.object_id.clone())))
            .collect();
        Self {
            page,
            layout,
            placeholders,
        }
    }

    /// Capacity of a region: slot count for list regions, data rows (header
    /// excluded) for tables, 1 for a single shape.
    pub fn capacity(&self, address: &RegionAddress) -> Result<usize> {
        match address {
            RegionAddress::Table(index) => Ok(self.table(*index)?.row_count().saturating_sub(1)),
            RegionAddress::Placeholder(_) | RegionAddress::Shape(_) => Ok(1),
            list => Ok(list.slot_count().unwrap_or(0)),
        }
    }

    /// Keeps the first `keep` slots of a region and removes the rest.
    ///
    /// List regions lose the shapes of slots `keep..`. Table regions keep the
    /// header row plus `keep` data rows. Nothing happens when `keep` covers the
    /// whole region. Returns the number of shapes or rows removed.
    pub fn keep(&mut self, address: &RegionAddress, keep: usize) -> Result<usize> {
        let capacity = self.capacity(address)?;
        if keep >= capacity {
            return Ok(0);
        }
        let ids = match address {
            RegionAddress::Table(index) => {
                let slide_id = self.page.object_id.clone();
                let table = self.table_mut(*index)?;
                let mut removed = 0;
                for row in (keep + 1..=capacity).rev() {
                    table.remove_row(row);
                    removed += 1;
                }
                debug!("Trimmed {} row(s) from table on '{}'", removed, slide_id);
                return Ok(removed);
            }
            RegionAddress::Shapes(list) => list
                .iter()
                .skip(keep)
                .map(|position| self.id_at(*position))
                .collect::<Result<Vec<_>>>()?,
            RegionAddress::Placeholders(list) => list
                .iter()
                .skip(keep)
                .map(|number| self.placeholder_id(*number))
                .collect::<Result<Vec<_>>>()?,
            RegionAddress::ShapeGroups(groups) => groups
                .iter()
                .skip(keep)
                .flatten()
                .map(|position| self.id_at(*position))
                .collect::<Result<Vec<_>>>()?,
            RegionAddress::Shape(position) => vec![self.id_at(*position)?],
            RegionAddress::Placeholder(number) => vec![self.placeholder_id(*number)?],
        };
        Ok(self.remove(ids))
    }

    /// Keeps the first `keep` columns of a table region.
    pub fn keep_columns(&mut self, address: &RegionAddress, keep: usize) -> Result<usize> {
        let RegionAddress::Table(index) = address else {
            return Err(self.not_found(format!("column trimming needs a table region, got {address:?}")));
        };
        let table = self.table_mut(*index)?;
        let columns = table.column_count();
        if keep >= columns {
            return Ok(0);
        }
        for column in (keep..columns).rev() {
            table.remove_column(column);
        }
        Ok(columns - keep)
    }

    /// Removes every shape of the listed groups, e.g. slots left without content.
    pub fn drop_groups(&mut self, groups: &[Vec<usize>], which: &[usize]) -> Result<usize> {
        let mut ids = Vec::new();
        for &group in which {
            let members = groups
                .get(group)
                .ok_or_else(|| self.not_found(format!("shape group {group} of {}", groups.len())))?;
            for position in members {
                ids.push(self.id_at(*position)?);
            }
        }
        Ok(self.remove(ids))
    }

    fn remove(&mut self, mut ids: Vec<String>) -> usize {
        ids.sort_unstable();
        ids.dedup();
        let removed = ids
            .iter()
            .filter(|id| self.page.remove_element(id).is_some())
            .count();
        debug!("Removed {} element(s) from '{}'", removed, self.page.object_id);
        removed
    }

    fn id_at(&self, position: usize) -> Result<String> {
        self.layout
            .get(position)
            .cloned()
            .ok_or_else(|| self.not_found(format!("element {position}")))
    }

    fn placeholder_id(&self, number: i32) -> Result<String> {
        self.placeholders
            .iter()
            .find(|(index, _)| *index == number)
            .map(|(_, id)| id.clone())
            .ok_or_else(|| self.not_found(format!("placeholder {number}")))
    }

    fn table(&self, index: usize) -> Result<&Table> {
        let id = self.id_at(index)?;
        self.page
            .position_of(&id)
            .and_then(|position| self.page.element_at(position))
            .and_then(|element| element.as_table())
            .ok_or_else(|| self.not_found(format!("table at element {index}")))
    }

    fn table_mut(&mut self, index: usize) -> Result<&mut Table> {
        let id = self.id_at(index)?;
        let err = self.not_found(format!("table at element {index}"));
        self.page
            .element_by_id_mut(&id)
            .and_then(|element| element.as_table_mut())
            .ok_or(err)
    }

    fn not_found(&self, detail: String) -> AssemblyError {
        AssemblyError::ElementNotFound {
            slide_id: self.page.object_id.clone(),
            detail,
        }
    }
}

/// The table at element `index` of an untrimmed page.
pub(crate) fn table_at(page: &Page, index: usize) -> Result<&Table> {
    page.element_at(index)
        .and_then(|element| element.as_table())
        .ok_or_else(|| AssemblyError::ElementNotFound {
            slide_id: page.object_id.clone(),
            detail: format!("table at element {index}"),
        })
}

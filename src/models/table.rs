use serde::{Deserialize, Serialize};

use crate::models::common::Dimension;
use crate::models::text::TextContent;

/// A location of a single table cell within a table.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableCellLocation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCellLocation {
    /// The 0-based row index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_index: Option<i32>,
    /// The 0-based column index.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_index: Option<i32>,
}

/// Properties and contents of each cell.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableCell
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableCell {
    /// The location of the cell within the table. Not renumbered when rows or
    /// columns are removed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<TableCellLocation>,
    /// Row span of the cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_span: Option<i32>,
    /// Column span of the cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_span: Option<i32>,
    /// The text content of the cell.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
}

/// Properties and contents of each row in a table.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableRow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableRow {
    /// Height of the row.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_height: Option<Dimension>,
    /// Properties and contents of each cell, left to right.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_cells: Option<Vec<TableCell>>,
}

/// The grid definition of one column.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableColumnProperties
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumnProperties {
    /// Width of the column.
    pub column_width: Option<Dimension>,
}

/// A border cell, positioned within the border grid.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableBorderCell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBorderCell {
    /// The location of the border within the border table.
    pub location: Option<TableCellLocation>,
    /// Border fill, weight and dash style, carried through unchanged.
    pub table_border_properties: Option<serde_json::Value>,
}

/// Contents of each border row in a table.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#TableBorderRow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableBorderRow {
    /// Border cells, one per border position in the row.
    pub table_border_cells: Option<Vec<TableBorderCell>>,
}

/// A page element kind representing a table.
/// Derived from: https://developers.google.com/slides/api/reference/rest/v1/presentations.pages/tables#Table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    /// Number of rows in the table.
    pub rows: i32,
    /// Number of columns in the table.
    pub columns: i32,
    /// Column grid definitions, one per column.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_columns: Option<Vec<TableColumnProperties>>,
    /// Properties and contents of each row, top to bottom.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_rows: Option<Vec<TableRow>>,
    /// `rows + 1` horizontal border rows.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_border_rows: Option<Vec<TableBorderRow>>,
    /// `rows` vertical border rows of `columns + 1` cells.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_border_rows: Option<Vec<TableBorderRow>>,
}

impl Table {
    pub fn row_count(&self) -> usize {
        self.table_rows.as_ref().map_or(0, Vec::len)
    }

    pub fn column_count(&self) -> usize {
        self.table_columns.as_ref().map_or(0, Vec::len)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&TableCell> {
        self.table_rows
            .as_ref()?
            .get(row)?
            .table_cells
            .as_ref()?
            .get(column)
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut TableCell> {
        self.table_rows
            .as_mut()?
            .get_mut(row)?
            .table_cells
            .as_mut()?
            .get_mut(column)
    }

    /// Removes row `index` and keeps the border grid and the row count in step.
    pub(crate) fn remove_row(&mut self, index: usize) {
        if let Some(rows) = self.table_rows.as_mut() {
            if index < rows.len() {
                rows.remove(index);
            }
        }
        let row_count = self.row_count();
        if let Some(borders) = self.horizontal_border_rows.as_mut() {
            borders.truncate(row_count + 1);
        }
        if let Some(borders) = self.vertical_border_rows.as_mut() {
            borders.truncate(row_count);
        }
        self.rows = row_count as i32;
    }

    /// Removes column `index` from the grid and the matching cell from every row.
    pub(crate) fn remove_column(&mut self, index: usize) {
        if let Some(columns) = self.table_columns.as_mut() {
            if index < columns.len() {
                columns.remove(index);
            }
        }
        for row in self.table_rows.iter_mut().flatten() {
            if let Some(cells) = row.table_cells.as_mut() {
                if index < cells.len() {
                    cells.remove(index);
                }
            }
        }
        let column_count = self.column_count();
        retain_border_columns(self.horizontal_border_rows.as_mut(), column_count);
        retain_border_columns(self.vertical_border_rows.as_mut(), column_count + 1);
        self.columns = column_count as i32;
    }
}

fn retain_border_columns(rows: Option<&mut Vec<TableBorderRow>>, limit: usize) {
    for row in rows.into_iter().flatten() {
        if let Some(cells) = row.table_border_cells.as_mut() {
            cells.retain(|cell| {
                cell.location
                    .as_ref()
                    .and_then(|l| l.column_index)
                    .map_or(true, |column| (column as usize) < limit)
            });
        }
    }
}

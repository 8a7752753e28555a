use crate::spreadsheet::cell::Cell;
use crate::spreadsheet::range::Range;

/// A worksheet read from a spreadsheet file.
#[derive(Debug)]
pub struct Sheet {
    /// Source file name
    pub file_name: String,
    /// Sheet name
    pub name: String,
    /// Non-empty cells, sorted by (row, col) once the sheet is finished
    pub cells: Vec<Cell>,
    /// Requested range
    range: Range,
    /// Actual data range (determined from cell data)
    pub row_lower_bound: Option<usize>,
    pub row_upper_bound: Option<usize>,
    pub col_lower_bound: Option<usize>,
    pub col_upper_bound: Option<usize>,
}

impl Sheet {
    pub(crate) fn new(file_name: &str, name: &str, range: Option<Range>) -> Self {
        Self {
            file_name: file_name.to_owned(),
            name: name.to_owned(),
            cells: Vec::new(),
            range: range.unwrap_or_default(),
            row_lower_bound: None,
            row_upper_bound: None,
            col_lower_bound: None,
            col_upper_bound: None,
        }
    }

    /// Returns true if the sheet contains no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub(crate) fn before_row_lower_bound(&self, row: usize) -> bool {
        self.range.row_lower_bound
            .map(|row_lower_bound| row < row_lower_bound)
            .unwrap_or(false)
    }

    pub(crate) fn after_row_upper_bound(&self, row: usize) -> bool {
        self.range.row_upper_bound
            .map(|row_upper_bound| row_upper_bound < row)
            .unwrap_or(false)
    }

    pub(crate) fn before_col_lower_bound(&self, col: usize) -> bool {
        self.range.col_lower_bound
            .map(|col_lower_bound| col < col_lower_bound)
            .unwrap_or(false)
    }

    pub(crate) fn after_col_upper_bound(&self, col: usize) -> bool {
        self.range.col_upper_bound
            .map(|col_upper_bound| col_upper_bound < col)
            .unwrap_or(false)
    }

    /// Checks if a cell at (row, col) is within the requested range.
    pub(crate) fn contains(&self, row: usize, col: usize) -> bool {
        !self.before_row_lower_bound(row)
            && !self.after_row_upper_bound(row)
            && !self.before_col_lower_bound(col)
            && !self.after_col_upper_bound(col)
    }

    /// Adds a cell, widening the data range.
    pub(crate) fn push(&mut self, cell: Cell) {
        self.update_bound(cell.row, cell.col);
        self.cells.push(cell);
    }

    fn update_bound(&mut self, row: usize, col: usize) {
        let widen = |bound: Option<usize>, value: usize, lower: bool| match bound {
            Some(bound) if lower => Some(bound.min(value)),
            Some(bound) => Some(bound.max(value)),
            None => Some(value),
        };
        self.row_lower_bound = widen(self.row_lower_bound, row, true);
        self.row_upper_bound = widen(self.row_upper_bound, row, false);
        self.col_lower_bound = widen(self.col_lower_bound, col, true);
        self.col_upper_bound = widen(self.col_upper_bound, col, false);
    }

    /// Sorts cells into row-major order. Writers usually emit them sorted already.
    pub(crate) fn finish(&mut self) {
        self.cells.sort_by_key(|cell| (cell.row, cell.col));
    }

    /// Lays the cells out as a dense table of rows, `None` for empty cells.
    /// Columns span the requested range, or the data range where the request is open.
    pub fn rows(&self, skip_empty_rows: bool) -> Vec<Vec<Option<&Cell>>> {
        let (Some(row_lower), Some(row_upper)) = (self.row_lower_bound, self.row_upper_bound) else {
            return Vec::new();
        };
        let col_lower = self.range.col_lower_bound.or(self.col_lower_bound).unwrap_or(0);
        let col_upper = self.range.col_upper_bound.or(self.col_upper_bound).unwrap_or(0);

        let mut index = 0usize;
        let mut table = Vec::<Vec<Option<&Cell>>>::new();
        for row in row_lower..=row_upper {
            let mut record = Vec::<Option<&Cell>>::with_capacity((col_upper + 1).saturating_sub(col_lower));
            while index < self.cells.len() && self.cells[index].row == row && self.cells[index].col < col_lower {
                index += 1;
            }
            for col in col_lower..=col_upper {
                match self.cells.get(index) {
                    Some(cell) if cell.row == row && cell.col == col => {
                        record.push(Some(cell));
                        index += 1;
                    }
                    _ => record.push(None),
                }
            }
            while index < self.cells.len() && self.cells[index].row == row {
                index += 1;
            }
            if !skip_empty_rows || record.iter().any(Option::is_some) {
                table.push(record);
            }
        }
        table
    }
}

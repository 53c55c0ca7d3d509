use crate::grid::{Cell, LetterGrid};

/// A straight run of cells picked by the player, from the cell where the drag
/// started to the cell where it ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Selection {
    pub start: Cell,
    pub end: Cell,
}

impl Selection {
    pub fn new(start_row: usize, start_col: usize, end_row: usize, end_col: usize) -> Self {
        Self {
            start: (start_row, start_col),
            end: (end_row, end_col),
        }
    }

    /// A selection covering only `cell`.
    pub fn single(cell: Cell) -> Self {
        Self {
            start: cell,
            end: cell,
        }
    }

    /// The same endpoints, traversed the other way.
    pub fn reversed(self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }

    /// Both endpoints lie inside the puzzle grid.
    pub fn in_bounds(&self) -> bool {
        LetterGrid::contains(self.start.0, self.start.1) && LetterGrid::contains(self.end.0, self.end.1)
    }

    /// The cells covered by this selection, from `start` to `end` inclusive.
    ///
    /// Only rows, columns, and 45° diagonals (in either orientation) trace a
    /// line; any other pair of endpoints, or one that leaves the grid, covers
    /// nothing and yields `None`.
    pub fn cells(&self) -> Option<Vec<Cell>> {
        let (row_step, col_step, steps) = self.line()?;
        let (row, col) = (self.start.0 as isize, self.start.1 as isize);
        Some(
            (0..=steps)
                .map(|i| ((row + i * row_step) as usize, (col + i * col_step) as usize))
                .collect(),
        )
    }

    /// `true` if `(row, col)` lies on the line this selection traces.
    pub fn contains(&self, row: usize, col: usize) -> bool {
        let Some((row_step, col_step, steps)) = self.line() else {
            return false;
        };
        if !LetterGrid::contains(row, col) {
            return false;
        }
        let row_offset = row as isize - self.start.0 as isize;
        let col_offset = col as isize - self.start.1 as isize;
        // distance along the line, taken from whichever axis moves
        let i = if row_step != 0 {
            row_offset * row_step
        } else {
            col_offset * col_step
        };
        (0..=steps).contains(&i) && row_offset == i * row_step && col_offset == i * col_step
    }

    /// Unit step per axis and number of steps, for an in-bounds straight line.
    fn line(&self) -> Option<(isize, isize, isize)> {
        if !self.in_bounds() {
            return None;
        }
        // both endpoints are inside the grid, so these casts cannot overflow
        let row_delta = self.end.0 as isize - self.start.0 as isize;
        let col_delta = self.end.1 as isize - self.start.1 as isize;
        if row_delta != 0 && col_delta != 0 && row_delta.abs() != col_delta.abs() {
            return None;
        }
        let steps = row_delta.abs().max(col_delta.abs());
        Some((row_delta.signum(), col_delta.signum(), steps))
    }
}

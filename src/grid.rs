use std::{
    fmt,
    ops::{Index, IndexMut},
};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Side length of every puzzle grid.
pub const GRID_SIZE: usize = 15;

/// A `(row, col)` coordinate.
pub type Cell = (usize, usize);

/// The finished letter grid of a puzzle.
pub type LetterGrid = Grid<char, GRID_SIZE, GRID_SIZE>;

/// A representation of a 2d grid, stored row-major.
///
/// For indexing operations on this grid, `(0, 0)` is the top left corner and
/// coordinates are given as `(row, col)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T, const WIDTH: usize, const HEIGHT: usize>(Vec<T>);

impl<T, const WIDTH: usize, const HEIGHT: usize> Grid<T, WIDTH, HEIGHT>
where
    T: Default + Clone,
{
    pub fn new() -> Self {
        Grid(vec![T::default(); WIDTH * HEIGHT])
    }
}

impl<T, const WIDTH: usize, const HEIGHT: usize> Default for Grid<T, WIDTH, HEIGHT>
where
    T: Default + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const WIDTH: usize, const HEIGHT: usize> Grid<T, WIDTH, HEIGHT> {
    /// Build a grid from its cells in row-major order.
    ///
    /// Returns `None` unless exactly `WIDTH * HEIGHT` cells are provided.
    pub fn from_cells(cells: Vec<T>) -> Option<Self> {
        (cells.len() == WIDTH * HEIGHT).then_some(Grid(cells))
    }

    /// Get the internal index where the desired value is stored,
    /// or `None` if it is out of bounds.
    pub fn idx(row: usize, col: usize) -> Option<usize> {
        (row < HEIGHT && col < WIDTH).then_some((row * WIDTH) + col)
    }

    /// `true` when `(row, col)` lies inside the grid.
    pub fn contains(row: usize, col: usize) -> bool {
        Self::idx(row, col).is_some()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        Self::idx(row, col).map(|idx| &self.0[idx])
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Option<&mut T> {
        Self::idx(row, col).map(|idx| &mut self.0[idx])
    }

    /// Iterate over the rows of the grid, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[T]> {
        self.0.chunks(WIDTH)
    }

    /// Iterate over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    /// Transform every cell, keeping the layout.
    ///
    /// Cells are visited in row-major order.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Grid<U, WIDTH, HEIGHT> {
        Grid(self.0.into_iter().map(f).collect())
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> Grid<char, WIDTH, HEIGHT> {
    /// Concatenate every row into a single string.
    pub fn flatten(&self) -> String {
        self.0.iter().collect()
    }

    /// Inverse of [`flatten`][Self::flatten]: slice `letters` back into rows of `WIDTH`.
    pub fn from_flat(letters: &str) -> Option<Self> {
        Self::from_cells(letters.chars().collect())
    }
}

impl<T, const WIDTH: usize, const HEIGHT: usize> Index<Cell> for Grid<T, WIDTH, HEIGHT> {
    type Output = T;

    fn index(&self, (row, col): Cell) -> &Self::Output {
        self.get(row, col).unwrap()
    }
}

impl<T, const WIDTH: usize, const HEIGHT: usize> IndexMut<Cell> for Grid<T, WIDTH, HEIGHT> {
    fn index_mut(&mut self, (row, col): Cell) -> &mut Self::Output {
        self.get_mut(row, col).unwrap()
    }
}

impl<const WIDTH: usize, const HEIGHT: usize> fmt::Display for Grid<char, WIDTH, HEIGHT> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.rows().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            for (col, letter) in row.iter().enumerate() {
                if col > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{letter}")?;
            }
        }
        Ok(())
    }
}

// Persisted as one string per row.
impl<const WIDTH: usize, const HEIGHT: usize> Serialize for Grid<char, WIDTH, HEIGHT> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.rows().map(|row| row.iter().collect::<String>()))
    }
}

impl<'de, const WIDTH: usize, const HEIGHT: usize> Deserialize<'de> for Grid<char, WIDTH, HEIGHT> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<String>::deserialize(deserializer)?;
        if rows.len() != HEIGHT {
            return Err(de::Error::invalid_length(rows.len(), &"one string per grid row"));
        }
        let mut cells = Vec::with_capacity(WIDTH * HEIGHT);
        for row in &rows {
            let before = cells.len();
            cells.extend(row.chars());
            if cells.len() - before != WIDTH {
                return Err(de::Error::invalid_value(
                    de::Unexpected::Str(row),
                    &"a row with one letter per column",
                ));
            }
        }
        Ok(Grid(cells))
    }
}

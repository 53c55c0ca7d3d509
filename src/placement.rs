use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    grid::{Cell, LetterGrid, GRID_SIZE},
    selection::Selection,
};

/// The orientation a word was planted in.
///
/// Words always read left to right, top to bottom, or down and to the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Horizontal,
    Vertical,
    Diagonal,
}

impl Direction {
    /// Pick a direction: horizontal and vertical each 40% of the time, diagonal 20%.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.gen_range(0..5) {
            0 | 1 => Direction::Horizontal,
            2 | 3 => Direction::Vertical,
            _ => Direction::Diagonal,
        }
    }

    /// `(row, col)` offset between consecutive letters.
    pub fn step(self) -> (usize, usize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::Diagonal => (1, 1),
        }
    }

    /// Number of candidate start rows and start columns for a word of `len`
    /// letters, or `None` if the word cannot fit at all.
    pub(crate) fn start_ranges(self, len: usize) -> Option<(usize, usize)> {
        let narrowed = GRID_SIZE.checked_sub(len)? + 1;
        Some(match self {
            Direction::Horizontal => (GRID_SIZE, narrowed),
            Direction::Vertical => (narrowed, GRID_SIZE),
            Direction::Diagonal => (narrowed, narrowed),
        })
    }
}

/// Where a word was planted in the grid.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Placement {
    pub word: String,
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
    pub direction: Direction,
}

impl Placement {
    /// Lay `word` out from `start` along `direction`.
    pub(crate) fn new(word: &str, (start_row, start_col): Cell, direction: Direction) -> Self {
        let span = word.chars().count().saturating_sub(1);
        let (row_step, col_step) = direction.step();
        Self {
            word: word.to_owned(),
            start_row,
            start_col,
            end_row: start_row + span * row_step,
            end_col: start_col + span * col_step,
            direction,
        }
    }

    pub fn start(&self) -> Cell {
        (self.start_row, self.start_col)
    }

    pub fn end(&self) -> Cell {
        (self.end_row, self.end_col)
    }

    /// The endpoints of this placement as a player would select them.
    pub fn selection(&self) -> Selection {
        Selection {
            start: self.start(),
            end: self.end(),
        }
    }

    /// Cells occupied by the word, one per letter, in reading order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let (row_step, col_step) = self.direction.step();
        (0..self.word.chars().count())
            .map(move |i| (self.start_row + i * row_step, self.start_col + i * col_step))
    }

    /// Read the letters under this placement, or `None` if it leaves the grid.
    pub fn trace(&self, grid: &LetterGrid) -> Option<String> {
        self.cells()
            .map(|(row, col)| grid.get(row, col).copied())
            .collect()
    }

    /// `true` when the recorded endpoints agree with the word and direction,
    /// and the grid spells the word along them.
    pub(crate) fn is_planted_in(&self, grid: &LetterGrid) -> bool {
        !self.word.is_empty()
            && LetterGrid::contains(self.start_row, self.start_col)
            && *self == Placement::new(&self.word, self.start(), self.direction)
            && self.trace(grid).as_deref() == Some(self.word.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Direction::Horizontal, 3, Some((15, 13)))]
    #[case(Direction::Vertical, 3, Some((13, 15)))]
    #[case(Direction::Diagonal, 15, Some((1, 1)))]
    #[case(Direction::Diagonal, 16, None)]
    #[case(Direction::Horizontal, 20, None)]
    fn start_ranges_leave_room(
        #[case] direction: Direction,
        #[case] len: usize,
        #[case] expect: Option<(usize, usize)>,
    ) {
        assert_eq!(direction.start_ranges(len), expect);
    }

    #[test]
    fn direction_weights_are_roughly_two_two_one() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut counts = [0_u32; 3];
        for _ in 0..10_000 {
            match Direction::random(&mut rng) {
                Direction::Horizontal => counts[0] += 1,
                Direction::Vertical => counts[1] += 1,
                Direction::Diagonal => counts[2] += 1,
            }
        }
        assert!((3_600..4_400).contains(&counts[0]), "{counts:?}");
        assert!((3_600..4_400).contains(&counts[1]), "{counts:?}");
        assert!((1_600..2_400).contains(&counts[2]), "{counts:?}");
    }

    #[test]
    fn new_computes_end() {
        let placement = Placement::new("CAT", (4, 5), Direction::Diagonal);
        assert_eq!(placement.end(), (6, 7));
        assert_eq!(
            placement.cells().collect::<Vec<_>>(),
            vec![(4, 5), (5, 6), (6, 7)]
        );
    }

    #[test]
    fn serializes_with_short_field_names() {
        let placement = Placement::new("DOG", (1, 2), Direction::Vertical);
        let json = serde_json::to_string(&placement).unwrap();
        assert_eq!(
            json,
            r#"{"word":"DOG","startRow":1,"startCol":2,"endRow":3,"endCol":2,"direction":"vertical"}"#
        );
    }

    #[test]
    fn planted_requires_matching_letters_and_geometry() {
        let mut letters = vec!['X'; GRID_SIZE * GRID_SIZE];
        letters[..3].copy_from_slice(&['C', 'A', 'T']);
        let grid = LetterGrid::from_cells(letters).unwrap();

        let cat = Placement::new("CAT", (0, 0), Direction::Horizontal);
        assert!(cat.is_planted_in(&grid));

        let wrong_word = Placement::new("COT", (0, 0), Direction::Horizontal);
        assert!(!wrong_word.is_planted_in(&grid));

        let mut wrong_end = cat.clone();
        wrong_end.end_col = 5;
        assert!(!wrong_end.is_planted_in(&grid));

        let off_grid = Placement::new("CAT", (0, 14), Direction::Horizontal);
        assert!(!off_grid.is_planted_in(&grid));
    }
}

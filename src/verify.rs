use crate::{placement::Placement, puzzle::Puzzle, selection::Selection};

/// The word planted exactly between the two endpoints, in either direction.
///
/// Only whole placements count: a selection one cell short or one cell long
/// never matches, even if the letters under it happen to spell a word.
pub fn check_match(
    puzzle: &Puzzle,
    start_row: usize,
    start_col: usize,
    end_row: usize,
    end_col: usize,
) -> Option<&str> {
    puzzle.check_match(Selection::new(start_row, start_col, end_row, end_col))
}

/// The first placement whose endpoints equal `selection` or its reverse.
pub fn find_placement(placements: &[Placement], selection: Selection) -> Option<&Placement> {
    let reversed = selection.reversed();
    placements.iter().find(|placement| {
        let planted = placement.selection();
        planted == selection || planted == reversed
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::{
        grid::{LetterGrid, GRID_SIZE},
        placement::Direction,
        puzzle::PuzzleId,
    };

    fn cat_puzzle() -> Puzzle {
        let mut letters = vec!['Q'; GRID_SIZE * GRID_SIZE];
        letters[..3].copy_from_slice(&['C', 'A', 'T']);
        // a second, unplanted CAT on row 5
        letters[5 * GRID_SIZE..5 * GRID_SIZE + 3].copy_from_slice(&['C', 'A', 'T']);
        Puzzle {
            id: PuzzleId::from("cat"),
            title: "Pets".to_owned(),
            words: vec!["CAT".to_owned(), "DOG".to_owned()],
            success_message: None,
            grid: LetterGrid::from_cells(letters).unwrap(),
            word_positions: vec![Placement::new("CAT", (0, 0), Direction::Horizontal)],
            created_at: 0,
        }
    }

    #[rstest]
    #[case::forward(Selection::new(0, 0, 0, 2), Some("CAT"))]
    #[case::reversed(Selection::new(0, 2, 0, 0), Some("CAT"))]
    #[case::one_short(Selection::new(0, 0, 0, 1), None)]
    #[case::one_beyond(Selection::new(0, 0, 0, 3), None)]
    #[case::shifted(Selection::new(0, 1, 0, 3), None)]
    #[case::coincidental_copy(Selection::new(5, 0, 5, 2), None)]
    fn matches_only_exact_endpoints(
        #[case] selection: Selection,
        #[case] expect: Option<&str>,
    ) {
        let puzzle = cat_puzzle();
        let (start_row, start_col) = selection.start;
        let (end_row, end_col) = selection.end;
        assert_eq!(
            check_match(&puzzle, start_row, start_col, end_row, end_col),
            expect
        );
    }

    #[test]
    fn first_placement_wins() {
        let first = Placement::new("CAT", (0, 0), Direction::Horizontal);
        let mut second = first.clone();
        second.word = "ACT".to_owned();
        let placements = [first, second];

        let found = find_placement(&placements, Selection::new(0, 2, 0, 0)).unwrap();
        assert_eq!(found.word, "CAT");
    }

    #[test]
    fn repeated_checks_are_stateless() {
        let puzzle = cat_puzzle();
        assert_eq!(check_match(&puzzle, 0, 0, 0, 2), Some("CAT"));
        assert_eq!(check_match(&puzzle, 0, 0, 0, 2), Some("CAT"));
    }
}

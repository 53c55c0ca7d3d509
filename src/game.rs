use crate::{puzzle::Puzzle, selection::Selection};

/// A word the player has found, and where they found it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FoundWord {
    pub word: String,
    pub selection: Selection,
}

/// One play-through of a puzzle: found words and the timer.
///
/// Times are milliseconds since the Unix epoch, supplied by the caller.
#[derive(Debug, Clone)]
pub struct Game<'a> {
    puzzle: &'a Puzzle,
    found: Vec<FoundWord>,
    started_at: Option<u64>,
    finished_at: Option<u64>,
}

impl<'a> Game<'a> {
    pub fn new(puzzle: &'a Puzzle) -> Self {
        Self {
            puzzle,
            found: Vec::new(),
            started_at: None,
            finished_at: None,
        }
    }

    pub fn puzzle(&self) -> &'a Puzzle {
        self.puzzle
    }

    /// Start (or restart) the game, clearing anything found so far.
    pub fn start(&mut self, now: u64) {
        self.found.clear();
        self.started_at = Some(now);
        self.finished_at = None;
    }

    pub fn is_playing(&self) -> bool {
        self.started_at.is_some() && self.finished_at.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.finished_at.is_some()
    }

    /// Submit the player's selection.
    ///
    /// On a match the word is recorded; once every placed word has been found
    /// the game completes and the timer stops at `now`.
    pub fn submit(&mut self, selection: Selection, now: u64) -> Result<&FoundWord, Error> {
        if self.is_complete() {
            return Err(Error::AlreadyComplete);
        }
        if !self.is_playing() {
            return Err(Error::NotPlaying);
        }
        if !selection.in_bounds() {
            return Err(Error::OutOfBounds { selection });
        }

        let puzzle = self.puzzle;
        let word = puzzle
            .check_match(selection)
            .ok_or(Error::NoMatch { selection })?;
        if self.is_found(word) {
            return Err(Error::AlreadyFound(word.to_owned()));
        }

        self.found.push(FoundWord {
            word: word.to_owned(),
            selection,
        });
        if self.remaining() == 0 {
            self.finished_at = Some(now);
        }

        Ok(&self.found[self.found.len() - 1])
    }

    pub fn found_words(&self) -> &[FoundWord] {
        &self.found
    }

    pub fn is_found(&self, word: &str) -> bool {
        self.found.iter().any(|found| found.word == word)
    }

    /// How many placed words are still hidden.
    pub fn remaining(&self) -> usize {
        self.puzzle
            .placed_words()
            .into_iter()
            .filter(|word| !self.is_found(word))
            .count()
    }

    /// `true` if the cell belongs to any word found so far.
    pub fn is_cell_found(&self, row: usize, col: usize) -> bool {
        self.found
            .iter()
            .any(|found| found.selection.contains(row, col))
    }

    /// Whole seconds on the clock; frozen once the game completes.
    pub fn elapsed_secs(&self, now: u64) -> u64 {
        match self.started_at {
            Some(started) => self.finished_at.unwrap_or(now).saturating_sub(started) / 1000,
            None => 0,
        }
    }
}

/// Render seconds as `MM:SS`.
pub fn format_time(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    #[error("the game has not been started")]
    NotPlaying,
    #[error("every word has already been found")]
    AlreadyComplete,
    #[error("the selection {selection:?} leaves the grid")]
    OutOfBounds { selection: Selection },
    #[error("no word lies exactly between {:?} and {:?}", .selection.start, .selection.end)]
    NoMatch { selection: Selection },
    #[error("\"{0}\" has already been found")]
    AlreadyFound(String),
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;

    use super::*;
    use crate::generator::generate_with_rng;

    fn pets() -> Puzzle {
        let mut rng = StdRng::seed_from_u64(0);
        let puzzle = generate_with_rng(&mut rng, "Pets", ["cat", "dog"], Some("Done!"));
        assert_eq!(puzzle.word_positions().len(), 2);
        puzzle
    }

    #[test]
    fn must_start_before_submitting() {
        let puzzle = pets();
        let mut game = Game::new(&puzzle);
        let selection = puzzle.word_positions()[0].selection();
        assert_eq!(game.submit(selection, 0), Err(Error::NotPlaying));
    }

    #[test]
    fn finds_each_word_once_and_completes() {
        let puzzle = pets();
        let mut game = Game::new(&puzzle);
        game.start(1_000);

        let cat = puzzle.word_positions()[0].selection();
        let dog = puzzle.word_positions()[1].selection();

        assert_eq!(game.submit(cat.reversed(), 2_000).unwrap().word, "CAT");
        assert_eq!(game.submit(cat, 3_000), Err(Error::AlreadyFound("CAT".into())));
        assert_eq!(game.remaining(), 1);
        assert!(!game.is_complete());

        assert_eq!(game.submit(dog, 66_000).unwrap().word, "DOG");
        assert!(game.is_complete());
        assert!(!game.is_playing());
        assert_eq!(game.elapsed_secs(500_000), 65);
        assert_eq!(game.submit(dog, 67_000), Err(Error::AlreadyComplete));
    }

    #[test]
    fn misses_are_reported() {
        let puzzle = pets();
        let mut game = Game::new(&puzzle);
        game.start(0);

        let placement = &puzzle.word_positions()[0];
        let short = Selection {
            start: placement.start(),
            end: placement.cells().nth(1).unwrap(),
        };
        assert_eq!(game.submit(short, 1), Err(Error::NoMatch { selection: short }));

        let outside = Selection::new(0, 0, 0, 20);
        assert_eq!(
            game.submit(outside, 1),
            Err(Error::OutOfBounds { selection: outside })
        );
        assert!(game.found_words().is_empty());
    }

    #[test]
    fn restart_clears_progress() {
        let puzzle = pets();
        let mut game = Game::new(&puzzle);
        game.start(0);
        game.submit(puzzle.word_positions()[0].selection(), 10).unwrap();
        assert!(game.is_found("CAT"));

        game.start(5_000);
        assert!(game.found_words().is_empty());
        assert_eq!(game.elapsed_secs(7_500), 2);
    }

    #[test]
    fn found_cells_follow_the_word() {
        let puzzle = pets();
        let mut game = Game::new(&puzzle);
        game.start(0);
        let placement = &puzzle.word_positions()[0];
        game.submit(placement.selection(), 1).unwrap();

        for (row, col) in placement.cells() {
            assert!(game.is_cell_found(row, col));
        }
        let marked = (0..15)
            .flat_map(|row| (0..15).map(move |col| (row, col)))
            .filter(|&(row, col)| game.is_cell_found(row, col))
            .count();
        assert_eq!(marked, placement.cells().count());
    }

    #[test]
    fn clock_is_zero_before_start() {
        let puzzle = pets();
        let game = Game::new(&puzzle);
        assert_eq!(game.elapsed_secs(123_456), 0);
    }

    #[rstest]
    #[case(0, "00:00")]
    #[case(59, "00:59")]
    #[case(61, "01:01")]
    #[case(3_600, "60:00")]
    fn formats_time(#[case] secs: u64, #[case] expect: &str) {
        assert_eq!(format_time(secs), expect);
    }
}

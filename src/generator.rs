use log::debug;
use rand::Rng;

use crate::{
    grid::{Grid, GRID_SIZE},
    placement::{Direction, Placement},
    puzzle::{normalize_word, now_millis, Puzzle, PuzzleId},
};

/// Placement attempts per word before it is skipped.
pub const MAX_ATTEMPTS: usize = 100;

const FILLER_LETTERS: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// The grid while words are being planted: `None` marks an unclaimed cell.
type PlacementGrid = Grid<Option<char>, GRID_SIZE, GRID_SIZE>;

/// Generate a puzzle using the thread-local random source.
///
/// See [`generate_with_rng`].
pub fn generate<Words, Word>(title: &str, words: Words, success_message: Option<&str>) -> Puzzle
where
    Words: IntoIterator<Item = Word>,
    Word: AsRef<str>,
{
    generate_with_rng(&mut rand::thread_rng(), title, words, success_message)
}

/// Plant `words` into a fresh grid and fill the rest with random letters.
///
/// Words are normalized first (see [`normalize_word`]) and blank entries are
/// dropped. Each word gets up to [`MAX_ATTEMPTS`] random tries; a word that
/// never fits is left out of the placements but stays in the word list.
pub fn generate_with_rng<R, Words, Word>(
    rng: &mut R,
    title: &str,
    words: Words,
    success_message: Option<&str>,
) -> Puzzle
where
    R: Rng + ?Sized,
    Words: IntoIterator<Item = Word>,
    Word: AsRef<str>,
{
    let words: Vec<String> = words
        .into_iter()
        .filter_map(|word| normalize_word(word.as_ref()))
        .collect();

    let mut grid = PlacementGrid::new();
    let mut word_positions = Vec::with_capacity(words.len());
    for word in &words {
        match place_word(rng, &mut grid, word) {
            Some(placement) => {
                debug!(
                    "placed {word:?} {:?} from {:?} to {:?}",
                    placement.direction,
                    placement.start(),
                    placement.end()
                );
                word_positions.push(placement);
            }
            None => debug!("could not place {word:?} after {MAX_ATTEMPTS} attempts; skipping it"),
        }
    }

    // filler goes in only once every word has had its chance
    let grid = grid.map(|cell| cell.unwrap_or_else(|| random_letter(rng)));

    let created_at = now_millis();
    Puzzle {
        id: PuzzleId::generate(rng, created_at),
        title: title.to_owned(),
        words,
        success_message: success_message
            .filter(|message| !message.is_empty())
            .map(str::to_owned),
        grid,
        word_positions,
        created_at,
    }
}

fn place_word<R: Rng + ?Sized>(rng: &mut R, grid: &mut PlacementGrid, word: &str) -> Option<Placement> {
    let letters: Vec<char> = word.chars().collect();
    for _ in 0..MAX_ATTEMPTS {
        let direction = Direction::random(rng);
        let Some((rows, cols)) = direction.start_ranges(letters.len()) else {
            continue;
        };
        let start = (rng.gen_range(0..rows), rng.gen_range(0..cols));
        let placement = Placement::new(word, start, direction);

        if fits(grid, &placement, &letters) {
            for (cell, &letter) in placement.cells().zip(&letters) {
                grid[cell] = Some(letter);
            }
            return Some(placement);
        }
    }
    None
}

/// Every cell under `placement` is either unclaimed or already holds the letter we need.
fn fits(grid: &PlacementGrid, placement: &Placement, letters: &[char]) -> bool {
    placement
        .cells()
        .zip(letters)
        .all(|((row, col), &letter)| match grid.get(row, col) {
            Some(None) => true,
            Some(Some(existing)) => *existing == letter,
            None => false,
        })
}

fn random_letter<R: Rng + ?Sized>(rng: &mut R) -> char {
    char::from(FILLER_LETTERS[rng.gen_range(0..FILLER_LETTERS.len())])
}

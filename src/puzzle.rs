use std::{
    borrow::Borrow,
    collections::BTreeSet,
    fmt,
    time::{SystemTime, UNIX_EPOCH},
};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{generator, grid::LetterGrid, placement::Placement, selection::Selection, verify};

const ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_RANDOM_LEN: usize = 7;

/// Identifies a puzzle in the store.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PuzzleId(String);

impl PuzzleId {
    const SHARED: &'static str = "shared";

    /// A fresh id: random base-36 characters followed by the creation time in base 36.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, created_at: u64) -> Self {
        let mut id: String = (0..ID_RANDOM_LEN)
            .map(|_| char::from(ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())]))
            .collect();
        id.push_str(&to_base36(created_at));
        Self(id)
    }

    /// The placeholder carried by puzzles rebuilt from a share token.
    pub fn shared() -> Self {
        Self(Self::SHARED.to_owned())
    }

    pub fn is_shared(&self) -> bool {
        self.0 == Self::SHARED
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PuzzleId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl Borrow<str> for PuzzleId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut value: u64) -> String {
    let mut digits = Vec::new();
    loop {
        digits.push(char::from(ID_ALPHABET[(value % 36) as usize]));
        value /= 36;
        if value == 0 {
            break;
        }
    }
    digits.iter().rev().collect()
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}

/// Uppercase `word` and strip all whitespace from it.
///
/// Returns `None` when nothing is left.
pub fn normalize_word(word: &str) -> Option<String> {
    let normalized: String = word
        .trim()
        .to_uppercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    (!normalized.is_empty()).then_some(normalized)
}

/// A generated word search.
///
/// Puzzles never change once built; [`regenerate`][Self::regenerate] produces
/// a new one instead.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Puzzle {
    pub(crate) id: PuzzleId,
    pub(crate) title: String,
    pub(crate) words: Vec<String>,
    #[serde(default)]
    pub(crate) success_message: Option<String>,
    pub(crate) grid: LetterGrid,
    pub(crate) word_positions: Vec<Placement>,
    pub(crate) created_at: u64,
}

impl Puzzle {
    pub fn id(&self) -> &PuzzleId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Every requested word, normalized, including any that could not be placed.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success_message.as_deref()
    }

    pub fn grid(&self) -> &LetterGrid {
        &self.grid
    }

    pub fn word_positions(&self) -> &[Placement] {
        &self.word_positions
    }

    /// Creation time in milliseconds since the Unix epoch.
    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    /// The distinct words that actually made it into the grid.
    pub fn placed_words(&self) -> BTreeSet<&str> {
        self.word_positions
            .iter()
            .map(|placement| placement.word.as_str())
            .collect()
    }

    /// The planted word whose endpoints are exactly `selection`, in either direction.
    pub fn check_match(&self, selection: Selection) -> Option<&str> {
        verify::find_placement(&self.word_positions, selection).map(|placement| placement.word.as_str())
    }

    /// Build a brand-new puzzle from the same title, words and message.
    pub fn regenerate(&self) -> Puzzle {
        self.regenerate_with_rng(&mut rand::thread_rng())
    }

    pub fn regenerate_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Puzzle {
        generator::generate_with_rng(
            rng,
            &self.title,
            &self.words,
            self.success_message.as_deref(),
        )
    }

    /// Give a puzzle that arrived through a share link an id of its own so it
    /// can be saved. The grid is kept as-is.
    pub fn adopt(self) -> Puzzle {
        self.adopt_with_rng(&mut rand::thread_rng())
    }

    pub fn adopt_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Puzzle {
        let created_at = now_millis();
        Puzzle {
            id: PuzzleId::generate(rng, created_at),
            created_at,
            ..self
        }
    }
}

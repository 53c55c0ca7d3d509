//! Word-search puzzles: generation, share tokens, and checking a player's picks.

pub mod codec;
mod config;
mod game;
mod generator;
mod grid;
pub mod logging;
mod placement;
mod puzzle;
mod selection;
pub mod store;
mod verify;

pub use config::{Config, Error as ConfigError};
pub use game::{format_time, Error as GameError, FoundWord, Game};
pub use generator::{generate, generate_with_rng, MAX_ATTEMPTS};
pub use grid::{Cell, Grid, LetterGrid, GRID_SIZE};
pub use placement::{Direction, Placement};
pub use puzzle::{normalize_word, now_millis, Puzzle, PuzzleId};
pub use selection::Selection;
pub use store::{FileKeyValue, KeyValue, MemoryKeyValue, PuzzleStore};
pub use verify::{check_match, find_placement};

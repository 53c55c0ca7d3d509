//! Self-contained share tokens.
//!
//! A token carries the whole puzzle, so a shared link needs no storage behind
//! it. The payload is a small JSON record:
//!
//! | field | contents                                        |
//! |-------|-------------------------------------------------|
//! | `t`   | title                                           |
//! | `w`   | word list                                       |
//! | `m`   | success message (`""` when there is none)       |
//! | `g`   | the grid, rows concatenated top to bottom       |
//! | `p`   | placements                                      |
//!
//! The JSON is then base64-encoded with the URL-safe alphabet and no padding.
//! Tokens from older links used the standard padded alphabet; those still
//! decode.

use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD},
    Engine as _,
};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::{
    grid::{LetterGrid, GRID_SIZE},
    placement::Placement,
    puzzle::{now_millis, Puzzle, PuzzleId},
};

#[derive(Serialize)]
struct OutgoingRecord<'a> {
    t: &'a str,
    w: &'a [String],
    m: &'a str,
    g: String,
    p: &'a [Placement],
}

#[derive(Deserialize)]
struct IncomingRecord {
    t: String,
    w: Vec<String>,
    #[serde(default)]
    m: Option<String>,
    g: String,
    p: Vec<Placement>,
}

/// Encode `puzzle` into a URL-safe token. The id and creation time are not included.
pub fn encode(puzzle: &Puzzle) -> String {
    let record = OutgoingRecord {
        t: &puzzle.title,
        w: &puzzle.words,
        m: puzzle.success_message.as_deref().unwrap_or_default(),
        g: puzzle.grid.flatten(),
        p: &puzzle.word_positions,
    };
    let json = serde_json::to_vec(&record).expect("share record serialization never fails");
    URL_SAFE_NO_PAD.encode(json)
}

/// The link a player opens to play `puzzle`: `<origin>/play/<token>`.
pub fn share_url(origin: &str, puzzle: &Puzzle) -> String {
    format!("{}/play/{}", origin.trim_end_matches('/'), encode(puzzle))
}

/// Rebuild a puzzle from a share token, or `None` if the token is malformed.
///
/// The result carries the shared placeholder id and is stamped with the
/// current time.
pub fn decode(token: &str) -> Option<Puzzle> {
    match try_decode(token) {
        Ok(puzzle) => Some(puzzle),
        Err(err) => {
            warn!("failed to decode share token: {err}");
            None
        }
    }
}

/// As [`decode`], but reports why a token was rejected.
pub fn try_decode(token: &str) -> Result<Puzzle, Error> {
    let token = token.trim();
    if token.is_empty() {
        return Err(Error::Empty);
    }

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .or_else(|_| STANDARD.decode(token))?;
    let record: IncomingRecord = serde_json::from_slice(&bytes)?;

    let grid = LetterGrid::from_flat(&record.g).ok_or_else(|| Error::GridLength {
        found: record.g.chars().count(),
    })?;
    if let Some(bad) = record.p.iter().find(|placement| !placement.is_planted_in(&grid)) {
        return Err(Error::Placement {
            word: bad.word.clone(),
        });
    }

    Ok(Puzzle {
        id: PuzzleId::shared(),
        title: record.t,
        words: record.w,
        success_message: record.m.filter(|message| !message.is_empty()),
        grid,
        word_positions: record.p,
        created_at: now_millis(),
    })
}

/// Reasons a share token could not be turned back into a puzzle.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("share token is empty")]
    Empty,
    #[error("share token is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("share token payload is malformed: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("grid holds {found} letters, expected {}", GRID_SIZE * GRID_SIZE)]
    GridLength { found: usize },
    #[error("placement of {word:?} does not match the grid")]
    Placement { word: String },
}

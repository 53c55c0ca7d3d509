//! Saved puzzles.
//!
//! All puzzles live together as one JSON object, keyed by id, under the
//! [`PUZZLES_KEY`] entry of a [`KeyValue`] backend.

use std::{
    collections::{BTreeMap, HashMap},
    fs, io,
    path::{Path, PathBuf},
};

use log::{debug, warn};

use crate::{
    codec,
    puzzle::{Puzzle, PuzzleId},
};

/// Backend entry holding the puzzle collection.
pub const PUZZLES_KEY: &str = "puzzles";

/// Every saved puzzle, by id.
pub type Puzzles = BTreeMap<PuzzleId, Puzzle>;

/// A string key-value store.
pub trait KeyValue {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error>;
    fn set_item(&mut self, key: &str, value: String) -> Result<(), Error>;
}

/// Keeps entries in memory only.
#[derive(Debug, Default, Clone)]
pub struct MemoryKeyValue(HashMap<String, String>);

impl MemoryKeyValue {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValue for MemoryKeyValue {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.0.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), Error> {
        self.0.insert(key.to_owned(), value);
        Ok(())
    }
}

/// Stores each entry as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileKeyValue {
    dir: PathBuf,
}

impl FileKeyValue {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValue for FileKeyValue {
    fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        let path = self.path(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(Error::Io { path, source }),
        }
    }

    fn set_item(&mut self, key: &str, value: String) -> Result<(), Error> {
        fs::create_dir_all(&self.dir).map_err(|source| Error::Io {
            path: self.dir.clone(),
            source,
        })?;
        // write beside the target, then swap it in so a crash never leaves half a file
        let staging = self.dir.join(format!("{key}.json.tmp"));
        fs::write(&staging, value).map_err(|source| Error::Io {
            path: staging.clone(),
            source,
        })?;
        let path = self.path(key);
        fs::rename(&staging, &path).map_err(|source| Error::Io { path, source })
    }
}

/// Saved puzzles on top of a [`KeyValue`] backend.
#[derive(Debug, Clone)]
pub struct PuzzleStore<K> {
    backend: K,
}

impl<K: KeyValue> PuzzleStore<K> {
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    pub fn get_all(&self) -> Result<Puzzles, Error> {
        match self.backend.get_item(PUZZLES_KEY)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Puzzles::new()),
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<Puzzle>, Error> {
        Ok(self.get_all()?.remove(id))
    }

    /// Save `puzzle` under its id, replacing any puzzle already stored there.
    ///
    /// Puzzles opened from a share link must be [adopted](Puzzle::adopt) first.
    pub fn put(&mut self, puzzle: &Puzzle) -> Result<(), Error> {
        if puzzle.id().is_shared() {
            return Err(Error::Unadopted);
        }
        let mut puzzles = self.get_all()?;
        puzzles.insert(puzzle.id().clone(), puzzle.clone());
        self.save_all(&puzzles)?;
        debug!("saved puzzle {}", puzzle.id());
        Ok(())
    }

    /// Remove a puzzle. Returns whether it was there.
    pub fn delete(&mut self, id: &str) -> Result<bool, Error> {
        let mut puzzles = self.get_all()?;
        if puzzles.remove(id).is_none() {
            return Ok(false);
        }
        self.save_all(&puzzles)?;
        debug!("deleted puzzle {id}");
        Ok(true)
    }

    /// Look `id_or_token` up as a saved puzzle id, then try it as a share token.
    ///
    /// Both kinds of miss look the same to the caller.
    pub fn resolve(&self, id_or_token: &str) -> Option<Puzzle> {
        match self.get(id_or_token) {
            Ok(Some(puzzle)) => return Some(puzzle),
            Ok(None) => (),
            Err(err) => warn!("could not read saved puzzles: {err}"),
        }
        codec::decode(id_or_token)
    }

    fn save_all(&mut self, puzzles: &Puzzles) -> Result<(), Error> {
        let json = serde_json::to_string(puzzles).map_err(Error::Serialize)?;
        self.backend.set_item(PUZZLES_KEY, json)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not access `{}`: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("saved puzzles are corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("could not serialize puzzles for saving: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("shared puzzles must be adopted before they are saved")]
    Unadopted,
}

//! Persistent transposition cache
//!
//! Maps a position hash to the move chosen for that position. Entries are
//! never replaced by age or evicted, so the cache grows with every new
//! position the engine searches. It is loaded in full at startup and
//! written back in full at shutdown.
//!
//! # Example
//!
//! ```
//! use isolation::board::Pos;
//! use isolation::search::{HashScheme, TranspositionCache};
//!
//! let mut cache = TranspositionCache::new(HashScheme::default());
//! assert_eq!(cache.lookup(0xDEAD_BEEF), None);
//!
//! cache.store(0xDEAD_BEEF, Pos::new(2, 3));
//! assert_eq!(cache.lookup(0xDEAD_BEEF), Some(Pos::new(2, 3)));
//! ```
//!
//! # File format
//!
//! Versioned JSON, entries sorted by hash:
//!
//! ```text
//! {
//!   "version": 1,
//!   "scheme": { "seed": 1311768467463790320, "include_side_to_move": false },
//!   "entries": [ { "hash": 42, "row": 0, "col": 3 } ]
//! }
//! ```

use std::collections::HashMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::board::{Pos, BOARD_SIZE};
use crate::error::{IsolationError, IsolationResult};

use super::HashScheme;

/// Current on-disk format version
pub const FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct CacheFile {
    version: u32,
    scheme: HashScheme,
    entries: Vec<CacheRecord>,
}

#[derive(Serialize, Deserialize)]
struct CacheRecord {
    hash: u64,
    row: u8,
    col: u8,
}

/// Read before the full parse so a future layout fails with a clear error
#[derive(Deserialize)]
struct VersionProbe {
    version: u32,
}

/// Hash → best move table for one [`HashScheme`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranspositionCache {
    scheme: HashScheme,
    entries: HashMap<u64, Pos>,
}

impl TranspositionCache {
    /// Empty cache for hashes produced under `scheme`.
    #[must_use]
    pub fn new(scheme: HashScheme) -> Self {
        Self {
            scheme,
            entries: HashMap::new(),
        }
    }

    #[inline]
    pub fn scheme(&self) -> HashScheme {
        self.scheme
    }

    /// Move stored for `hash`, if any.
    ///
    /// No collision check is made: two positions sharing a hash share an entry.
    #[inline]
    #[must_use]
    pub fn lookup(&self, hash: u64) -> Option<Pos> {
        self.entries.get(&hash).copied()
    }

    /// Record `best_move` for `hash`, replacing any previous entry.
    #[inline]
    pub fn store(&mut self, hash: u64, best_move: Pos) {
        self.entries.insert(hash, best_move);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Read a cache file, failing on any problem.
    ///
    /// The returned cache carries the scheme recorded in the file, which may
    /// differ from the caller's.
    pub fn read(path: &Path) -> IsolationResult<Self> {
        let text = fs::read_to_string(path).map_err(|source| IsolationError::CacheLoad {
            path: path.to_path_buf(),
            source,
        })?;

        let probe: VersionProbe = serde_json::from_str(&text)?;
        if probe.version != FORMAT_VERSION {
            return Err(IsolationError::CacheVersion(probe.version));
        }

        let file: CacheFile = serde_json::from_str(&text)?;
        let mut cache = Self::new(file.scheme);
        let mut skipped = 0usize;
        for record in file.entries {
            if (record.row as usize) < BOARD_SIZE && (record.col as usize) < BOARD_SIZE {
                cache.store(record.hash, Pos::new(record.row, record.col));
            } else {
                skipped += 1;
            }
        }
        if skipped > 0 {
            warn!("skipped {skipped} out-of-range entries in {}", path.display());
        }
        Ok(cache)
    }

    /// Load the cache for `scheme` from `path`.
    ///
    /// Never fails: a missing, unreadable, malformed or foreign-scheme file
    /// yields an empty cache.
    pub fn load_or_empty(path: &Path, scheme: HashScheme) -> Self {
        match Self::read(path) {
            Ok(cache) if cache.scheme == scheme => {
                info!("loaded {} cached positions from {}", cache.len(), path.display());
                cache
            }
            Ok(cache) => {
                warn!(
                    "ignoring {}: written for {:?}, engine uses {:?}",
                    path.display(),
                    cache.scheme,
                    scheme
                );
                Self::new(scheme)
            }
            Err(IsolationError::CacheLoad { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!("no transposition cache at {}, starting empty", path.display());
                Self::new(scheme)
            }
            Err(err) => {
                warn!("{err}; starting with an empty cache");
                Self::new(scheme)
            }
        }
    }

    /// Write the whole cache to `path`, replacing the previous file.
    ///
    /// Data goes to a sibling temp file first and is renamed into place.
    pub fn save(&self, path: &Path) -> IsolationResult<()> {
        let mut entries: Vec<CacheRecord> = self
            .entries
            .iter()
            .map(|(&hash, pos)| CacheRecord {
                hash,
                row: pos.row,
                col: pos.col,
            })
            .collect();
        entries.sort_unstable_by_key(|record| record.hash);

        let file = CacheFile {
            version: FORMAT_VERSION,
            scheme: self.scheme,
            entries,
        };
        let text = serde_json::to_string_pretty(&file)?;

        let persist_err = |source| IsolationError::CachePersist {
            path: path.to_path_buf(),
            source,
        };
        let tmp = temp_path(path);
        if let Err(source) = fs::write(&tmp, text).and_then(|()| fs::rename(&tmp, path)) {
            // A failed write or rename leaves no temp file behind
            if let Err(err) = fs::remove_file(&tmp) {
                if err.kind() != io::ErrorKind::NotFound {
                    warn!("could not remove {}: {err}", tmp.display());
                }
            }
            return Err(persist_err(source));
        }

        info!("saved {} cached positions to {}", self.len(), path.display());
        Ok(())
    }
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

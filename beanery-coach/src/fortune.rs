//! Fortune providers - the capability the coach depends on. Two
//! implementations exist, so injection requires a qualifier: one backed by a
//! fortune file read at construction, one backed by a fixed in-memory list.

use beanery_di::bean::BeanPtr;
use rand::seq::SliceRandom;
use rand::thread_rng;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// Capability: provides a fortune string. Each call picks uniformly at
/// random, so two calls may return different results.
pub trait FortuneService {
    fn fortune(&self) -> String;
}

impl std::fmt::Debug for dyn FortuneService + Send + Sync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn FortuneService")
    }
}

pub type FortuneServicePtr = BeanPtr<dyn FortuneService + Send + Sync>;

/// Collaborator construction failures, e.g. a missing fortune file.
#[derive(Error, Debug)]
pub enum ConfigurationError {
    #[error("Cannot read fortune data from '{path}': {source}")]
    UnreadableFortuneFile { path: PathBuf, source: io::Error },
    #[error("Fortune file '{path}' contains no fortunes")]
    EmptyFortuneFile { path: PathBuf },
}

/// Fortune provider backed by a UTF-8 text file with one fortune per
/// non-empty line. The file is read once at construction and not held open.
#[derive(Debug)]
pub struct FileFortuneService {
    fortunes: Vec<String>,
}

impl FileFortuneService {
    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let contents = fs::read_to_string(path).map_err(|source| {
            ConfigurationError::UnreadableFortuneFile {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let fortunes = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();

        if fortunes.is_empty() {
            return Err(ConfigurationError::EmptyFortuneFile {
                path: path.to_path_buf(),
            });
        }

        debug!(
            "Loaded {} fortune(s) from: {}",
            fortunes.len(),
            path.display()
        );

        Ok(Self { fortunes })
    }

    pub fn fortunes(&self) -> &[String] {
        &self.fortunes
    }
}

impl FortuneService for FileFortuneService {
    fn fortune(&self) -> String {
        // the list is non-empty by construction
        self.fortunes
            .choose(&mut thread_rng())
            .cloned()
            .unwrap_or_default()
    }
}

/// The fixed list served by [FixedFortuneService].
pub const FIXED_FORTUNES: [&str; 3] = [
    "Beware of the wolf in sheep's clothing",
    "The journey is the reward",
    "Fortune favors the bold",
];

/// Fortune provider serving a small fixed set of fortunes.
#[derive(Default)]
pub struct FixedFortuneService;

impl FortuneService for FixedFortuneService {
    fn fortune(&self) -> String {
        FIXED_FORTUNES
            .choose(&mut thread_rng())
            .map(|fortune| fortune.to_string())
            .unwrap_or_default()
    }
}

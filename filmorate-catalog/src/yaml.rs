//! YAML loading for the genre and rating reference tables.
//!
//! A reference directory holds up to two files, each a YAML sequence:
//! ```text
//! reference_dir/
//!   genres.yaml
//!   ratings.yaml
//! ```
//! A missing file falls back to the standard set for that table.

use std::collections::BTreeSet;
use std::path::Path;

use thiserror::Error;

use crate::types::{Genre, Rating};

#[derive(Debug, Error)]
pub enum YamlError {
    #[error("I/O error reading {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("YAML parse error in {path}: {source}")]
    Parse {
        path: String,
        source: serde_yml::Error,
    },
    #[error("Directory not found: {0}")]
    DirNotFound(String),
    #[error("Duplicate {table} id {id} in {path}")]
    DuplicateId {
        table: &'static str,
        id: i64,
        path: String,
    },
}

/// The immutable lookup tables films reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceData {
    pub genres: Vec<Genre>,
    pub ratings: Vec<Rating>,
}

impl ReferenceData {
    /// The reference set every new catalog starts with.
    pub fn standard() -> Self {
        Self {
            genres: standard_genres(),
            ratings: standard_ratings(),
        }
    }
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::standard()
    }
}

pub fn standard_genres() -> Vec<Genre> {
    ["Comedy", "Drama", "Animation", "Thriller", "Documentary", "Action"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Genre::new(id, name))
        .collect()
}

pub fn standard_ratings() -> Vec<Rating> {
    ["G", "PG", "PG-13", "R", "NC-17"]
        .into_iter()
        .zip(1..)
        .map(|(name, id)| Rating::new(id, name))
        .collect()
}

/// Load genres and ratings from a reference directory.
pub fn load_reference(dir: &Path) -> Result<ReferenceData, YamlError> {
    if !dir.is_dir() {
        return Err(YamlError::DirNotFound(dir.display().to_string()));
    }

    let genres_path = dir.join("genres.yaml");
    let genres = match load_table::<Genre>(&genres_path)? {
        Some(genres) => {
            check_unique("genre", &genres_path, genres.iter().map(|g| g.id))?;
            genres
        }
        None => standard_genres(),
    };

    let ratings_path = dir.join("ratings.yaml");
    let ratings = match load_table::<Rating>(&ratings_path)? {
        Some(ratings) => {
            check_unique("rating", &ratings_path, ratings.iter().map(|r| r.id))?;
            ratings
        }
        None => standard_ratings(),
    };

    Ok(ReferenceData { genres, ratings })
}

/// Read one YAML sequence file, or `None` if it does not exist.
fn load_table<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Option<Vec<T>>, YamlError> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(path).map_err(|e| YamlError::Io {
        path: path.display().to_string(),
        source: e,
    })?;
    let items: Vec<T> = serde_yml::from_str(&contents).map_err(|e| YamlError::Parse {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(Some(items))
}

fn check_unique(
    table: &'static str,
    path: &Path,
    ids: impl Iterator<Item = i64>,
) -> Result<(), YamlError> {
    let mut seen = BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(YamlError::DuplicateId {
                table,
                id,
                path: path.display().to_string(),
            });
        }
    }
    Ok(())
}

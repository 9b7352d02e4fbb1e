//! Data model types for the film catalog.
//!
//! These types represent the persistent catalog schema: films, users,
//! directors, the genre/rating reference tables, and friendship edges.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Entity Kinds ────────────────────────────────────────────────────────────

/// The kind of record a lookup or mutation refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entity {
    Film,
    User,
    Director,
    Genre,
    Rating,
    Friendship,
    Like,
}

impl Entity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Film => "film",
            Self::User => "user",
            Self::Director => "director",
            Self::Genre => "genre",
            Self::Rating => "rating",
            Self::Friendship => "friendship",
            Self::Like => "like",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Reference Data ──────────────────────────────────────────────────────────

/// A genre tag. Films carry any number of distinct genres.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    /// Empty when the genre came in as a bare id reference.
    #[serde(default)]
    pub name: String,
}

impl Genre {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// A reference by id only, to be resolved against the genre table.
    pub fn reference(id: i64) -> Self {
        Self::new(id, "")
    }
}

/// A content rating (MPA classification). Exactly one per film.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rating {
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

impl Rating {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn reference(id: i64) -> Self {
        Self::new(id, "")
    }
}

// ── Director ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Director {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
}

impl Director {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
        }
    }

    pub fn reference(id: i64) -> Self {
        Self {
            id,
            name: String::new(),
        }
    }
}

// ── Film ────────────────────────────────────────────────────────────────────

/// A film with its resolved references and the ids of users who like it.
///
/// `id` is assigned by the storage backend on creation; any value passed to
/// `create` is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub release_date: NaiveDate,
    /// Running time in minutes.
    pub duration: i32,
    #[serde(rename = "mpa")]
    pub rating: Rating,
    /// Distinct by id, ordered by id once stored.
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub likes: BTreeSet<i64>,
    /// Caller order is preserved.
    #[serde(default)]
    pub directors: Vec<Director>,
}

impl Film {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        release_date: NaiveDate,
        duration: i32,
        rating: Rating,
    ) -> Self {
        Self {
            id: 0,
            name: name.into(),
            description: description.into(),
            release_date,
            duration,
            rating,
            genres: Vec::new(),
            likes: BTreeSet::new(),
            directors: Vec::new(),
        }
    }

    pub fn with_genres(mut self, genres: impl IntoIterator<Item = Genre>) -> Self {
        self.genres = genres.into_iter().collect();
        self
    }

    pub fn with_directors(mut self, directors: impl IntoIterator<Item = Director>) -> Self {
        self.directors = directors.into_iter().collect();
        self
    }

    /// Popularity: the number of distinct users who currently like the film.
    pub fn like_count(&self) -> usize {
        self.likes.len()
    }

    pub fn has_director(&self, director_id: i64) -> bool {
        self.directors.iter().any(|d| d.id == director_id)
    }

    /// Sort genres by id and drop repeated ids, keeping the first occurrence.
    pub fn normalize_genres(&mut self) {
        let mut seen = BTreeSet::new();
        self.genres.retain(|g| seen.insert(g.id));
        self.genres.sort_by_key(|g| g.id);
    }

    /// Drop repeated director ids, keeping the first occurrence in place.
    pub fn dedup_directors(&mut self) {
        let mut seen = BTreeSet::new();
        self.directors.retain(|d| seen.insert(d.id));
    }
}

// ── User ────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub email: String,
    pub login: String,
    /// Display name. Falls back to `login` when left blank.
    #[serde(default)]
    pub name: String,
    pub birthday: NaiveDate,
}

impl User {
    pub fn new(
        email: impl Into<String>,
        login: impl Into<String>,
        name: impl Into<String>,
        birthday: NaiveDate,
    ) -> Self {
        Self {
            id: 0,
            email: email.into(),
            login: login.into(),
            name: name.into(),
            birthday,
        }
    }

    /// The name shown to other users.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.login
        } else {
            &self.name
        }
    }
}

// ── Friendship ──────────────────────────────────────────────────────────────

/// A directed friendship edge from `user_id` to `friend_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Friendship {
    pub user_id: i64,
    pub friend_id: i64,
    pub status: FriendshipStatus,
}

/// Status of a friendship edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FriendshipStatus {
    Pending,
    #[default]
    Confirmed,
}

impl FriendshipStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Confirmed => "CONFIRMED",
        }
    }

    pub fn from_str_loose(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "PENDING" | "UNCONFIRMED" => Self::Pending,
            _ => Self::Confirmed,
        }
    }
}

// ── Director Filmography ────────────────────────────────────────────────────

/// Ordering for a director's filmography.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectorSort {
    /// Most liked first.
    #[default]
    Likes,
    /// Oldest release first.
    Year,
}

impl DirectorSort {
    /// Parse a sort key, falling back to [`DirectorSort::Likes`] for anything
    /// other than `year`.
    pub fn from_str_loose(s: &str) -> Self {
        if s.eq_ignore_ascii_case("year") {
            Self::Year
        } else {
            Self::Likes
        }
    }
}

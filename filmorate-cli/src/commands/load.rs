//! Bulk load of users, directors, films, likes, and friendships from a JSON
//! fixture.
//!
//! Ids inside the fixture are local to it: records are created through the
//! services, which assign fresh ids, and every cross reference (film
//! directors, likes, friendships) is rewritten to the stored id before use.
//! A reference to an id the fixture never defined aborts the load.

use std::collections::HashMap;
use std::path::Path;

use filmorate_catalog::{Director, Entity, Film, User};
use filmorate_service::Services;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use serde::Deserialize;

use crate::CliError;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct Fixture {
    pub(crate) users: Vec<User>,
    pub(crate) directors: Vec<Director>,
    pub(crate) films: Vec<Film>,
    pub(crate) likes: Vec<LikeEntry>,
    pub(crate) friendships: Vec<FriendEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct LikeEntry {
    pub(crate) film: i64,
    pub(crate) user: i64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct FriendEntry {
    pub(crate) user: i64,
    pub(crate) friend: i64,
}

/// Counts of records created by a load.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct LoadStats {
    pub(crate) users: usize,
    pub(crate) directors: usize,
    pub(crate) films: usize,
    pub(crate) likes: usize,
    pub(crate) friendships: usize,
}

/// Fixture id to stored id.
type IdMap = HashMap<i64, i64>;

fn remap(ids: &IdMap, entity: Entity, id: i64) -> Result<i64, CliError> {
    ids.get(&id)
        .copied()
        .ok_or(CliError::UnknownFixtureId { entity, id })
}

pub(crate) fn run_load(svc: &Services, file: &Path) -> Result<(), CliError> {
    let text = std::fs::read_to_string(file)?;
    let fixture: Fixture = serde_json::from_str(&text)?;
    let stats = load_fixture(svc, &fixture)?;

    log::info!(
        "{} {}",
        "Loaded".if_supports_color(Stdout, |t| t.green()),
        file.display(),
    );
    log::info!("  Users:        {:>6}", stats.users);
    log::info!("  Directors:    {:>6}", stats.directors);
    log::info!("  Films:        {:>6}", stats.films);
    log::info!("  Likes:        {:>6}", stats.likes);
    log::info!("  Friendships:  {:>6}", stats.friendships);
    Ok(())
}

/// Create every record in the fixture. Stops at the first rejected record.
pub(crate) fn load_fixture(svc: &Services, fixture: &Fixture) -> Result<LoadStats, CliError> {
    let mut stats = LoadStats::default();

    let mut users = IdMap::new();
    for user in &fixture.users {
        let stored = svc.users.add_user(user)?;
        users.insert(user.id, stored.id);
        stats.users += 1;
    }

    let mut directors = IdMap::new();
    for director in &fixture.directors {
        let stored = svc.directors.add_director(director)?;
        directors.insert(director.id, stored.id);
        stats.directors += 1;
    }

    let mut films = IdMap::new();
    for film in &fixture.films {
        let mut film = film.clone();
        for director in &mut film.directors {
            director.id = remap(&directors, Entity::Director, director.id)?;
        }
        let stored = svc.films.add_film(&film)?;
        films.insert(film.id, stored.id);
        stats.films += 1;
    }

    for like in &fixture.likes {
        svc.films.add_like(
            remap(&films, Entity::Film, like.film)?,
            remap(&users, Entity::User, like.user)?,
        )?;
        stats.likes += 1;
    }

    for edge in &fixture.friendships {
        svc.friends.add_friend(
            remap(&users, Entity::User, edge.user)?,
            remap(&users, Entity::User, edge.friend)?,
        )?;
        stats.friendships += 1;
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use filmorate_db::MemoryStore;

    use super::*;

    const FIXTURE: &str = r#"{
        "users": [
            {"id": 10, "email": "neo@zion.io", "login": "neo", "birthday": "1971-09-13"},
            {"id": 20, "email": "trin@zion.io", "login": "trinity", "name": "Trinity", "birthday": "1970-01-01"}
        ],
        "directors": [{"id": 5, "name": "Lana Wachowski"}],
        "films": [
            {"id": 100, "name": "Matrix", "description": "sci-fi", "release_date": "1999-03-31",
             "duration": 136, "mpa": {"id": 3}, "genres": [{"id": 4}, {"id": 6}],
             "directors": [{"id": 5}]},
            {"id": 200, "name": "Matrix Reloaded", "release_date": "2003-05-15",
             "duration": 138, "mpa": {"id": 4}}
        ],
        "likes": [{"film": 100, "user": 10}, {"film": 100, "user": 20}, {"film": 200, "user": 20}],
        "friendships": [{"user": 10, "friend": 20}]
    }"#;

    #[test]
    fn loads_and_remaps_ids() {
        let svc = Services::new(Arc::new(MemoryStore::new()));
        let fixture: Fixture = serde_json::from_str(FIXTURE).unwrap();

        let stats = load_fixture(&svc, &fixture).unwrap();
        assert_eq!(
            stats,
            LoadStats {
                users: 2,
                directors: 1,
                films: 2,
                likes: 3,
                friendships: 1,
            }
        );

        let top = svc.films.popular(1).unwrap();
        assert_eq!(top[0].name, "Matrix");
        assert_eq!(top[0].rating.name, "PG-13");
        assert_eq!(top[0].directors[0].name, "Lana Wachowski");
        assert_eq!(svc.users.user(1).unwrap().name, "neo");
        assert_eq!(svc.friends.friends(2).unwrap()[0].login, "neo");
    }

    #[test]
    fn rejected_record_stops_the_load() {
        let svc = Services::new(Arc::new(MemoryStore::new()));
        let fixture: Fixture = serde_json::from_str(
            r#"{"films": [{"name": "Too early", "release_date": "1800-01-01",
                           "duration": 10, "mpa": {"id": 1}}]}"#,
        )
        .unwrap();

        assert!(matches!(
            load_fixture(&svc, &fixture),
            Err(CliError::Service(e)) if e.is_validation()
        ));
        assert!(svc.films.films().unwrap().is_empty());
    }

    #[test]
    fn undefined_fixture_ids_are_rejected() {
        let svc = Services::new(Arc::new(MemoryStore::new()));
        let first: Fixture = serde_json::from_str(
            r#"{"users": [{"id": 1, "email": "a@b.io", "login": "a", "birthday": "1990-01-01"}],
                "films": [{"id": 1, "name": "Stored", "release_date": "2000-01-01",
                           "duration": 90, "mpa": {"id": 1}}]}"#,
        )
        .unwrap();
        load_fixture(&svc, &first).unwrap();

        // Film 1 and user 1 exist in storage, but this fixture never defines them.
        let second: Fixture = serde_json::from_str(
            r#"{"users": [{"id": 7, "email": "b@b.io", "login": "b", "birthday": "1990-01-01"}],
                "likes": [{"film": 1, "user": 7}]}"#,
        )
        .unwrap();
        assert!(matches!(
            load_fixture(&svc, &second),
            Err(CliError::UnknownFixtureId { entity: Entity::Film, id: 1 })
        ));
        assert!(svc.films.film(1).unwrap().likes.is_empty());

        let dangling_friend: Fixture = serde_json::from_str(
            r#"{"users": [{"id": 3, "email": "c@b.io", "login": "c", "birthday": "1990-01-01"}],
                "friendships": [{"user": 3, "friend": 1}]}"#,
        )
        .unwrap();
        assert!(matches!(
            load_fixture(&svc, &dangling_friend),
            Err(CliError::UnknownFixtureId { entity: Entity::User, id: 1 })
        ));
        assert!(svc.friends.friends(1).unwrap().is_empty());
    }
}

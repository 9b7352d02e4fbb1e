use chrono::NaiveDate;
use filmorate_catalog::*;
use filmorate_db::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn test_film() -> Film {
    Film::new("Alien", "in space", date(1979, 5, 25), 117, Rating::reference(4))
}

fn count(store: &SqliteStore, sql: &str) -> i64 {
    store
        .connection()
        .unwrap()
        .query_row(sql, [], |row| row.get(0))
        .unwrap()
}

#[test]
fn failed_film_write_rolls_back_links() {
    let store = SqliteStore::open_memory().unwrap();
    let film = test_film()
        .with_genres([Genre::reference(1), Genre::reference(2)])
        .with_directors([Director::reference(99)]);

    let err = store.create_film(&film).unwrap_err();
    assert!(err.is_not_found(Entity::Director));

    assert_eq!(count(&store, "SELECT COUNT(*) FROM films"), 0);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM film_genres"), 0);
}

#[test]
fn failed_film_update_keeps_old_links() {
    let store = SqliteStore::open_memory().unwrap();
    let created = store
        .create_film(&test_film().with_genres([Genre::reference(3)]))
        .unwrap();

    let mut changed = created.clone();
    changed.name = "Aliens".to_string();
    changed.genres = vec![Genre::reference(1), Genre::reference(42)];
    assert!(store.update_film(&changed).unwrap_err().is_not_found(Entity::Genre));

    assert_eq!(store.find_film(created.id).unwrap(), Some(created));
}

#[test]
fn director_positions_recorded() {
    let store = SqliteStore::open_memory().unwrap();
    let a = store.create_director(&Director::new("A")).unwrap();
    let b = store.create_director(&Director::new("B")).unwrap();
    let film = store
        .create_film(&test_film().with_directors([
            Director::reference(b.id),
            Director::reference(a.id),
            Director::reference(b.id),
        ]))
        .unwrap();

    assert_eq!(film.directors, vec![b.clone(), a.clone()]);
    let position: i64 = store
        .connection()
        .unwrap()
        .query_row(
            "SELECT position FROM film_directors WHERE film_id = ?1 AND director_id = ?2",
            [film.id, a.id],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(position, 1);
}

#[test]
fn deleting_director_keeps_film_row() {
    let store = SqliteStore::open_memory().unwrap();
    let d = store.create_director(&Director::new("Scott")).unwrap();
    store
        .create_film(&test_film().with_directors([Director::reference(d.id)]))
        .unwrap();

    store.delete_director(d.id).unwrap();

    assert_eq!(count(&store, "SELECT COUNT(*) FROM films"), 1);
    assert_eq!(count(&store, "SELECT COUNT(*) FROM film_directors"), 0);
}

#[test]
fn mutual_friendship_is_two_rows() {
    let store = SqliteStore::open_memory().unwrap();
    let birthday = date(1990, 1, 1);
    let a = store.create_user(&User::new("a@x.io", "a", "", birthday)).unwrap();
    let b = store.create_user(&User::new("b@x.io", "b", "", birthday)).unwrap();

    store.add_friendship(a.id, b.id).unwrap();
    assert_eq!(
        count(&store, "SELECT COUNT(*) FROM friendships WHERE status = 'CONFIRMED'"),
        2
    );

    store.remove_friendship(a.id, b.id).unwrap();
    assert_eq!(count(&store, "SELECT COUNT(*) FROM friendships"), 0);
}

#[test]
fn stats_count_rows() {
    let store = SqliteStore::open_memory().unwrap();
    let user = store
        .create_user(&User::new("a@x.io", "a", "", date(1990, 1, 1)))
        .unwrap();
    let film = store.create_film(&test_film()).unwrap();
    store.add_like(film.id, user.id).unwrap();

    let stats = store.stats().unwrap();
    assert_eq!(stats.films, 1);
    assert_eq!(stats.users, 1);
    assert_eq!(stats.likes, 1);
    assert_eq!(stats.genres, 6);
    assert_eq!(stats.ratings, 5);
    assert_eq!(stats.directors, 0);
    assert_eq!(stats.friendships, 0);
}

#[test]
fn custom_reference_set_is_seeded() {
    let reference = ReferenceData {
        genres: vec![Genre::new(10, "Western")],
        ratings: vec![Rating::new(1, "U")],
    };
    let store = SqliteStore::open_memory_with(&reference).unwrap();
    assert_eq!(store.all_genres().unwrap(), vec![Genre::new(10, "Western")]);
    assert_eq!(store.find_rating(1).unwrap(), Some(Rating::new(1, "U")));
}

#[test]
fn file_store_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("filmorate.db");
    let reference = ReferenceData::standard();

    let id = {
        let store = SqliteStore::open(&path, &reference).unwrap();
        store.create_film(&test_film()).unwrap().id
    };

    let store = SqliteStore::open(&path, &reference).unwrap();
    let film = store.find_film(id).unwrap().unwrap();
    assert_eq!(film.name, "Alien");
    assert_eq!(film.rating, Rating::new(4, "R"));
    assert_eq!(store.stats().unwrap().genres, 6);
}

#[test]
fn seed_reference_is_idempotent() {
    let conn = open_memory().unwrap();
    let data = ReferenceData::standard();
    let first = seed_reference(&conn, &data).unwrap();
    let second = seed_reference(&conn, &data).unwrap();
    assert_eq!(first.genres, 6);
    assert_eq!(second.ratings, 5);

    let stats = catalog_stats(&conn).unwrap();
    assert_eq!(stats.genres, 6);
    assert_eq!(stats.ratings, 5);
}

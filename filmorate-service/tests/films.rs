#[macro_use]
mod common;

use common::*;
use filmorate_catalog::*;
use filmorate_service::{ServiceError, Services};

backends!(
    matrix_scenario,
    round_trip_resolves_references,
    invalid_films_never_written,
    boundary_values_accepted,
    unknown_references_rejected,
    update_unknown_film,
    update_validates_before_lookup,
    update_keeps_likes,
    duplicate_like_conflicts_once,
    likes_need_known_film_and_user,
    relike_is_a_fresh_event,
    popular_orders_by_likes_then_id,
    popular_bounds,
    unliked_top_film_is_demoted,
    director_filmography,
    director_filmography_unknown_director,
    deleted_director_leaves_films,
    common_films_intersect_likes,
    common_films_need_known_users,
);

fn matrix_scenario(svc: &Services) {
    let matrix = Film::new(
        "Matrix",
        "sci-fi",
        date(1999, 3, 31),
        136,
        Rating::reference(3),
    );
    let created = svc.films.add_film(&matrix).unwrap();
    assert_eq!(created.id, 1);

    let users: Vec<User> = (1..=7).map(|i| add_user(svc, &format!("user{i}"))).collect();
    assert_eq!(users[6].id, 7);

    svc.films.add_like(1, 7).unwrap();
    assert_eq!(ids(&svc.films.popular(1).unwrap(), |f| f.id), vec![1]);

    svc.films.remove_like(1, 7).unwrap();
    let err = svc.films.remove_like(1, 7).unwrap_err();
    assert!(err.is_not_found(Entity::Like), "{err}");
}

fn round_trip_resolves_references(svc: &Services) {
    let input = Film::new("Up", "balloons", date(2009, 5, 29), 96, Rating::reference(2))
        .with_genres([
            Genre::reference(3),
            Genre::reference(1),
            Genre::reference(3),
        ]);
    let created = svc.films.add_film(&input).unwrap();
    let found = svc.films.film(created.id).unwrap();

    assert_eq!(found.name, input.name);
    assert_eq!(found.description, input.description);
    assert_eq!(found.release_date, input.release_date);
    assert_eq!(found.duration, input.duration);
    assert_eq!(found.rating, Rating::new(2, "PG"));
    assert_eq!(
        found.genres,
        vec![Genre::new(1, "Comedy"), Genre::new(3, "Animation")]
    );
    assert_eq!(svc.films.films().unwrap(), vec![found]);
}

fn invalid_films_never_written(svc: &Services) {
    let base = film("Ok", date(2000, 1, 1));

    let mut blank = base.clone();
    blank.name = "   ".to_string();
    let mut wordy = base.clone();
    wordy.description = "x".repeat(MAX_DESCRIPTION_LEN + 1);
    let mut early = base.clone();
    early.release_date = date(1895, 12, 27);
    let mut empty = base.clone();
    empty.duration = 0;
    let mut negative = base.clone();
    negative.duration = -5;

    for bad in [blank, wordy, early, empty, negative] {
        let err = svc.films.add_film(&bad).unwrap_err();
        assert!(err.is_validation(), "{err}");
    }
    assert!(svc.films.films().unwrap().is_empty());
}

fn boundary_values_accepted(svc: &Services) {
    let mut edge = film("First", EARLIEST_RELEASE_DATE);
    edge.description = "x".repeat(MAX_DESCRIPTION_LEN);
    edge.duration = 1;
    let created = svc.films.add_film(&edge).unwrap();
    assert_eq!(created.release_date, date(1895, 12, 28));
    assert_eq!(created.description.chars().count(), 200);
}

fn unknown_references_rejected(svc: &Services) {
    let mut bad_rating = film("A", date(2000, 1, 1));
    bad_rating.rating = Rating::reference(42);
    assert!(svc.films.add_film(&bad_rating).unwrap_err().is_not_found(Entity::Rating));

    let bad_genre = film("B", date(2000, 1, 1)).with_genres([Genre::reference(42)]);
    assert!(svc.films.add_film(&bad_genre).unwrap_err().is_not_found(Entity::Genre));

    let bad_director = film("C", date(2000, 1, 1)).with_directors([Director::reference(42)]);
    assert!(
        svc.films
            .add_film(&bad_director)
            .unwrap_err()
            .is_not_found(Entity::Director)
    );

    assert!(svc.films.films().unwrap().is_empty());
}

fn update_unknown_film(svc: &Services) {
    let mut ghost = film("Ghost", date(2000, 1, 1));
    ghost.id = 9;
    assert!(svc.films.update_film(&ghost).unwrap_err().is_not_found(Entity::Film));
    assert!(svc.films.film(9).unwrap_err().is_not_found(Entity::Film));
}

fn update_validates_before_lookup(svc: &Services) {
    let mut ghost = film("", date(2000, 1, 1));
    ghost.id = 9;
    assert!(matches!(
        svc.films.update_film(&ghost),
        Err(ServiceError::Validation(ValidationError::BlankFilmName))
    ));
}

fn update_keeps_likes(svc: &Services) {
    let created = add_film(svc, "Old", 2000);
    let fan = add_user(svc, "fan");
    svc.films.add_like(created.id, fan.id).unwrap();

    let mut changed = created.clone();
    changed.name = "New".to_string();
    changed.genres = vec![Genre::reference(2)];
    let updated = svc.films.update_film(&changed).unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "New");
    assert_eq!(updated.genres, vec![Genre::new(2, "Drama")]);
    assert!(updated.likes.contains(&fan.id));
}

fn duplicate_like_conflicts_once(svc: &Services) {
    let f = add_film(svc, "Liked", 2000);
    let u = add_user(svc, "fan");

    svc.films.add_like(f.id, u.id).unwrap();
    let err = svc.films.add_like(f.id, u.id).unwrap_err();
    assert!(err.is_conflict(), "{err}");
    assert_eq!(svc.films.film(f.id).unwrap().like_count(), 1);
}

fn likes_need_known_film_and_user(svc: &Services) {
    let f = add_film(svc, "Liked", 2000);
    let u = add_user(svc, "fan");

    assert!(svc.films.add_like(99, u.id).unwrap_err().is_not_found(Entity::Film));
    assert!(svc.films.add_like(f.id, 99).unwrap_err().is_not_found(Entity::User));
    assert!(svc.films.remove_like(99, u.id).unwrap_err().is_not_found(Entity::Film));
    assert!(svc.films.remove_like(f.id, 99).unwrap_err().is_not_found(Entity::User));
}

fn relike_is_a_fresh_event(svc: &Services) {
    let f = add_film(svc, "Again", 2000);
    let u = add_user(svc, "fan");

    // Removing first is an error, and leaves nothing that blocks a like.
    assert!(svc.films.remove_like(f.id, u.id).unwrap_err().is_not_found(Entity::Like));
    svc.films.add_like(f.id, u.id).unwrap();

    svc.films.remove_like(f.id, u.id).unwrap();
    svc.films.add_like(f.id, u.id).unwrap();
    assert_eq!(svc.films.film(f.id).unwrap().like_count(), 1);
}

fn popular_orders_by_likes_then_id(svc: &Services) {
    let films: Vec<Film> = (1..=4).map(|i| add_film(svc, &format!("F{i}"), 2000)).collect();
    let a = add_user(svc, "a");
    let b = add_user(svc, "b");

    svc.films.add_like(films[2].id, a.id).unwrap();
    svc.films.add_like(films[2].id, b.id).unwrap();
    svc.films.add_like(films[1].id, a.id).unwrap();
    svc.films.add_like(films[0].id, b.id).unwrap();

    let ranked = svc.films.popular(10).unwrap();
    assert_eq!(ids(&ranked, |f| f.id), vec![3, 1, 2, 4]);
    assert_eq!(ids(&svc.films.popular(2).unwrap(), |f| f.id), vec![3, 1]);
}

fn popular_bounds(svc: &Services) {
    assert!(svc.films.popular(10).unwrap().is_empty());
    add_film(svc, "Only", 2000);
    assert!(svc.films.popular(0).unwrap().is_empty());
    assert_eq!(svc.films.popular(5).unwrap().len(), 1);
}

fn unliked_top_film_is_demoted(svc: &Services) {
    let top = add_film(svc, "Top", 2000);
    let mid = add_film(svc, "Mid", 2001);
    let low = add_film(svc, "Low", 2002);
    let users: Vec<User> = (0..3).map(|i| add_user(svc, &format!("u{i}"))).collect();

    for u in &users {
        svc.films.add_like(top.id, u.id).unwrap();
    }
    svc.films.add_like(mid.id, users[0].id).unwrap();
    svc.films.add_like(low.id, users[1].id).unwrap();
    assert_eq!(svc.films.popular(1).unwrap()[0].id, top.id);

    for u in &users {
        svc.films.remove_like(top.id, u.id).unwrap();
    }
    let ranked = ids(&svc.films.popular(3).unwrap(), |f| f.id);
    assert_eq!(ranked, vec![mid.id, low.id, top.id]);
}

fn director_filmography(svc: &Services) {
    let nolan = svc.directors.add_director(&Director::new("Nolan")).unwrap();
    let other = svc.directors.add_director(&Director::new("Other")).unwrap();
    let fan = add_user(svc, "fan");

    let by = |name: &str, year: i32, director: &Director| {
        svc.films
            .add_film(
                &film(name, date(year, 6, 1)).with_directors([Director::reference(director.id)]),
            )
            .unwrap()
    };
    let inception = by("Inception", 2010, &nolan);
    let memento = by("Memento", 2000, &nolan);
    by("Elsewhere", 2005, &other);
    svc.films.add_like(inception.id, fan.id).unwrap();

    let by_likes = svc.films.films_by_director(nolan.id, DirectorSort::Likes).unwrap();
    assert_eq!(ids(&by_likes, |f| f.id), vec![inception.id, memento.id]);

    let by_year = svc.films.films_by_director(nolan.id, DirectorSort::Year).unwrap();
    assert_eq!(ids(&by_year, |f| f.id), vec![memento.id, inception.id]);
    assert_eq!(by_year[0].directors, vec![nolan]);
}

fn director_filmography_unknown_director(svc: &Services) {
    let err = svc
        .films
        .films_by_director(5, DirectorSort::default())
        .unwrap_err();
    assert!(err.is_not_found(Entity::Director), "{err}");
}

fn deleted_director_leaves_films(svc: &Services) {
    let d = svc.directors.add_director(&Director::new("Gone")).unwrap();
    let f = svc
        .films
        .add_film(&film("Orphan", date(2000, 1, 1)).with_directors([Director::reference(d.id)]))
        .unwrap();

    svc.directors.delete_director(d.id).unwrap();

    assert!(svc.films.film(f.id).unwrap().directors.is_empty());
    assert!(
        svc.films
            .films_by_director(d.id, DirectorSort::Likes)
            .unwrap_err()
            .is_not_found(Entity::Director)
    );
}

fn common_films_intersect_likes(svc: &Services) {
    let films: Vec<Film> = (1..=3).map(|i| add_film(svc, &format!("F{i}"), 2000)).collect();
    let a = add_user(svc, "a");
    let b = add_user(svc, "b");
    let c = add_user(svc, "c");

    for f in &films {
        svc.films.add_like(f.id, a.id).unwrap();
    }
    svc.films.add_like(films[0].id, b.id).unwrap();
    svc.films.add_like(films[2].id, b.id).unwrap();
    svc.films.add_like(films[2].id, c.id).unwrap();

    let ab = svc.films.common_films(a.id, b.id).unwrap();
    let ba = svc.films.common_films(b.id, a.id).unwrap();
    assert_eq!(ids(&ab, |f| f.id), vec![films[2].id, films[0].id]);
    assert_eq!(ab, ba);
    assert!(svc.films.common_films(b.id, c.id).unwrap().len() == 1);
}

fn common_films_need_known_users(svc: &Services) {
    let a = add_user(svc, "a");
    assert!(svc.films.common_films(a.id, 42).unwrap_err().is_not_found(Entity::User));
    assert!(svc.films.common_films(42, a.id).unwrap_err().is_not_found(Entity::User));
}

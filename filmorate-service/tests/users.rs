#[macro_use]
mod common;

use common::*;
use filmorate_catalog::*;
use filmorate_db::StorageError;
use filmorate_service::{ServiceError, Services};

backends!(
    blank_name_defaults_to_login,
    invalid_users_rejected,
    update_user_checks,
    unknown_user_not_found,
    director_lifecycle,
    blank_director_rejected,
    reference_lookups,
);

fn new_user(email: &str, login: &str, name: &str) -> User {
    User::new(email, login, name, date(1990, 1, 1))
}

fn blank_name_defaults_to_login(svc: &Services) {
    let created = svc.users.add_user(&new_user("a@b.c", "neo", "  ")).unwrap();
    assert_eq!(created.name, "neo");

    let named = svc
        .users
        .add_user(&new_user("t@b.c", "trinity", "Trinity"))
        .unwrap();
    assert_eq!(named.name, "Trinity");
    assert_eq!(svc.users.users().unwrap(), vec![created, named]);
}

fn invalid_users_rejected(svc: &Services) {
    let tomorrow = chrono::Local::now()
        .date_naive()
        .succ_opt()
        .unwrap();
    let mut unborn = new_user("a@b.c", "unborn", "");
    unborn.birthday = tomorrow;

    let cases = [
        new_user("", "neo", ""),
        new_user("no-at-sign", "neo", ""),
        new_user("a@b.c", "", ""),
        new_user("a@b.c", "two words", ""),
        unborn,
    ];
    for bad in cases {
        let err = svc.users.add_user(&bad).unwrap_err();
        assert!(err.is_validation(), "{err}");
    }
    assert!(svc.users.users().unwrap().is_empty());
}

fn update_user_checks(svc: &Services) {
    let created = svc.users.add_user(&new_user("a@b.c", "neo", "")).unwrap();

    let mut renamed = created.clone();
    renamed.name = String::new();
    renamed.login = "theone".to_string();
    let updated = svc.users.update_user(&renamed).unwrap();
    assert_eq!(updated.name, "theone");
    assert_eq!(svc.users.user(created.id).unwrap(), updated);

    let mut bad = updated.clone();
    bad.email = "nope".to_string();
    assert!(svc.users.update_user(&bad).unwrap_err().is_validation());

    let mut ghost = updated;
    ghost.id = 404;
    assert!(svc.users.update_user(&ghost).unwrap_err().is_not_found(Entity::User));
}

fn unknown_user_not_found(svc: &Services) {
    assert!(svc.users.user(1).unwrap_err().is_not_found(Entity::User));
}

fn director_lifecycle(svc: &Services) {
    let d = svc.directors.add_director(&Director::new("Kubrick")).unwrap();
    assert_eq!(svc.directors.director(d.id).unwrap(), d);

    let renamed = Director {
        id: d.id,
        name: "Stanley Kubrick".to_string(),
    };
    assert_eq!(svc.directors.update_director(&renamed).unwrap(), renamed);
    assert_eq!(svc.directors.directors().unwrap(), vec![renamed]);

    svc.directors.delete_director(d.id).unwrap();
    assert!(svc.directors.director(d.id).unwrap_err().is_not_found(Entity::Director));
    assert!(
        svc.directors
            .delete_director(d.id)
            .unwrap_err()
            .is_not_found(Entity::Director)
    );

    let ghost = Director {
        id: 31,
        name: "Nobody".to_string(),
    };
    assert!(
        svc.directors
            .update_director(&ghost)
            .unwrap_err()
            .is_not_found(Entity::Director)
    );
}

fn blank_director_rejected(svc: &Services) {
    assert!(matches!(
        svc.directors.add_director(&Director::new(" ")),
        Err(ServiceError::Validation(ValidationError::BlankDirectorName))
    ));
    assert!(svc.directors.directors().unwrap().is_empty());
}

fn reference_lookups(svc: &Services) {
    assert_eq!(svc.reference.genres().unwrap().len(), 6);
    assert_eq!(svc.reference.ratings().unwrap().len(), 5);
    assert_eq!(svc.reference.genre(6).unwrap(), Genre::new(6, "Action"));
    assert_eq!(svc.reference.rating(3).unwrap(), Rating::new(3, "PG-13"));
    assert!(svc.reference.genre(99).unwrap_err().is_not_found(Entity::Genre));
    assert!(svc.reference.rating(99).unwrap_err().is_not_found(Entity::Rating));
}

#[test]
fn storage_errors_map_onto_service_taxonomy() {
    let not_found: ServiceError = StorageError::not_found(Entity::Film, 3).into();
    assert!(not_found.is_not_found(Entity::Film));
    assert_eq!(not_found.to_string(), "film with id=3 not found");

    let conflict: ServiceError = StorageError::conflict("dup").into();
    assert!(conflict.is_conflict());

    let selfish: ServiceError = StorageError::SelfFriendship(4).into();
    assert!(selfish.is_validation());

    let poisoned: ServiceError = StorageError::LockPoisoned.into();
    assert!(matches!(poisoned, ServiceError::Internal(_)));
}

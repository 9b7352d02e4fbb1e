#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use filmorate_catalog::{Film, Rating, User};
use filmorate_db::{MemoryStore, SqliteStore};
use filmorate_service::Services;

/// Run each named case once per backend.
macro_rules! backends {
    ($($case:ident),* $(,)?) => {
        mod memory {
            $(
                #[test]
                fn $case() {
                    super::$case(&crate::common::memory());
                }
            )*
        }

        mod sqlite {
            $(
                #[test]
                fn $case() {
                    super::$case(&crate::common::sqlite());
                }
            )*
        }
    };
}

pub fn memory() -> Services {
    Services::new(Arc::new(MemoryStore::new()))
}

pub fn sqlite() -> Services {
    Services::new(Arc::new(SqliteStore::open_memory().unwrap()))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn film(name: &str, released: NaiveDate) -> Film {
    Film::new(name, "", released, 100, Rating::reference(1))
}

pub fn add_film(svc: &Services, name: &str, year: i32) -> Film {
    svc.films.add_film(&film(name, date(year, 1, 1))).unwrap()
}

pub fn add_user(svc: &Services, login: &str) -> User {
    svc.users
        .add_user(&User::new(
            format!("{login}@example.com"),
            login,
            "",
            date(1990, 1, 1),
        ))
        .unwrap()
}

pub fn ids<T>(items: &[T], id: impl Fn(&T) -> i64) -> Vec<i64> {
    items.iter().map(id).collect()
}

//! Film catalog data model types, validation rules, and reference-data YAML I/O.
//!
//! This crate defines the domain model without any storage dependencies.
//! Consumers pass these types to `filmorate-db` for persistence and to
//! `filmorate-service` for the aggregation logic.

pub mod types;
pub mod validate;
pub mod yaml;

pub use types::*;
pub use validate::{
    EARLIEST_RELEASE_DATE, MAX_DESCRIPTION_LEN, ValidationError, validate_director,
    validate_film, validate_friendship, validate_user, validate_user_at,
};
pub use yaml::{ReferenceData, YamlError, load_reference, standard_genres, standard_ratings};

use serde::{Deserialize, Serialize};
use url::Url;

/// A character record. `homeworld` and `films` are unresolved resource
/// references; following them is a separate fetch.
///
/// `height` and `mass` stay strings because the API answers "unknown" for
/// some characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub birth_year: String,
    pub height: String,
    pub mass: String,
    pub gender: String,
    pub homeworld: Url,
    pub films: Vec<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub opening_crawl: String,
    pub release_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub population: String,
}

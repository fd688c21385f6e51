use std::{fmt, str::FromStr};

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};
use tabled::Tabled;

use crate::view::pagination::DEFAULT_PAGE_SIZE;

/// Physical media formats accepted by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Format {
    #[serde(rename = "VHS")]
    Vhs,
    #[serde(rename = "DVD")]
    Dvd,
    #[serde(rename = "Blu-Ray")]
    BluRay,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Vhs, Format::Dvd, Format::BluRay];

    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Vhs => "VHS",
            Format::Dvd => "DVD",
            Format::BluRay => "Blu-Ray",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Format::ALL
            .into_iter()
            .find(|format| format.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown format '{}'", wanted))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub year: i32,
    pub format: Format,
    #[serde(default, deserialize_with = "actor_names")]
    pub actors: Vec<String>,
}

/// The backend answers with actor records on reads and accepts plain names on writes.
#[derive(Deserialize)]
#[serde(untagged)]
enum ActorEntry {
    Name(String),
    Record { name: String },
}

fn actor_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<ActorEntry>>::deserialize(deserializer)?;
    Ok(entries
        .unwrap_or_default()
        .into_iter()
        .map(|entry| match entry {
            ActorEntry::Name(name) | ActorEntry::Record { name } => name,
        })
        .collect())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub format: Format,
    pub actors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MoviePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actors: Option<Vec<String>>,
}

impl From<NewMovie> for MoviePatch {
    fn from(movie: NewMovie) -> Self {
        Self {
            title: Some(movie.title),
            year: Some(movie.year),
            format: Some(movie.format),
            actors: Some(movie.actors),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Meta {
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub data: Vec<Movie>,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieResponse {
    #[serde(default)]
    pub data: Option<Movie>,
    #[serde(default)]
    pub meta: Meta,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportMeta {
    #[serde(default)]
    pub imported: u64,
    #[serde(default)]
    pub total: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImportResponse {
    #[serde(default)]
    pub data: Vec<Movie>,
    #[serde(default)]
    pub meta: ImportMeta,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Registration {
    pub email: String,
    pub name: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub status: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum SortField {
    Id,
    Title,
    #[default]
    Year,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Year => "year",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn flip(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

/// Query parameters of the movie listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub sort: SortField,
    pub order: SortOrder,
    pub limit: u64,
    pub offset: u64,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            sort: SortField::Year,
            order: SortOrder::Desc,
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
        }
    }
}

#[derive(Tabled)]
pub struct MovieTableRow {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub format: String,
    pub actors: String,
}

impl From<&Movie> for MovieTableRow {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id.map(|id| id.to_string()).unwrap_or_default(),
            title: movie.title.clone(),
            year: movie.year,
            format: movie.format.to_string(),
            actors: if movie.actors.is_empty() {
                "No actors listed".to_string()
            } else {
                movie.actors.join(", ")
            },
        }
    }
}

#[derive(Tabled)]
pub struct MovieDetailRow {
    pub field: String,
    pub value: String,
}

use crate::{
    api::ApiClient,
    forms::{Field, FormErrors, MAX_YEAR, MIN_YEAR, SubmitError},
    types::{Format, Movie, MoviePatch, NewMovie},
};

const MSG_ADD_FAILED: &str = "Failed to add movie.";
const MSG_UPDATE_FAILED: &str = "Failed to update movie.";

/// Parses a year typed by the user; accepts integers in `1900..=2021` only.
pub fn parse_year(input: &str) -> Result<i32, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Year is required.".to_string());
    }

    match trimmed.parse::<i32>() {
        Ok(year) if (MIN_YEAR..=MAX_YEAR).contains(&year) => Ok(year),
        _ => Err(format!(
            "Year must be a number between {} and {}.",
            MIN_YEAR, MAX_YEAR
        )),
    }
}

/// Manual movie entry, used for both creating and editing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MovieForm {
    pub title: String,
    pub year: String,
    pub format: String,
    pub actor_input: String,
    actors: Vec<String>,
    errors: FormErrors,
}

impl MovieForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-fills the form with a stored movie for editing.
    pub fn from_movie(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year.to_string(),
            format: movie.format.to_string(),
            actors: movie.actors.clone(),
            ..Self::default()
        }
    }

    pub fn actors(&self) -> &[String] {
        &self.actors
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Moves the trimmed `actor_input` into the actor list.
    ///
    /// Blank input and names already listed are ignored. Returns whether an
    /// actor was added.
    pub fn add_actor(&mut self) -> bool {
        let name = self.actor_input.trim();
        if name.is_empty() || self.actors.iter().any(|actor| actor == name) {
            return false;
        }

        self.actors.push(name.to_string());
        self.actor_input.clear();
        true
    }

    pub fn push_actor(&mut self, name: &str) -> bool {
        self.actor_input = name.to_string();
        let added = self.add_actor();
        self.actor_input.clear();
        added
    }

    pub fn remove_actor(&mut self, index: usize) -> Option<String> {
        if index < self.actors.len() {
            Some(self.actors.remove(index))
        } else {
            None
        }
    }

    /// Checks every field at once and records the errors on the form.
    pub fn validate(&mut self) -> Result<NewMovie, FormErrors> {
        let mut errors = FormErrors::new();

        let title = self.title.trim();
        if title.is_empty() {
            errors.set(Field::Title, "Title is required.");
        }

        let year = parse_year(&self.year)
            .map_err(|message| errors.set(Field::Year, message))
            .ok();

        let format = if self.format.trim().is_empty() {
            errors.set(Field::Format, "Format is required.");
            None
        } else {
            self.format
                .parse::<Format>()
                .map_err(|_| {
                    errors.set(Field::Format, "Format must be one of VHS, DVD, Blu-Ray.")
                })
                .ok()
        };

        if self.actors.is_empty() {
            errors.set(Field::Actors, "At least one actor is required.");
        }

        self.errors = errors.clone();
        match (year, format) {
            (Some(year), Some(format)) if errors.is_empty() => Ok(NewMovie {
                title: title.to_string(),
                year,
                format,
                actors: self.actors.clone(),
            }),
            _ => Err(errors),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Validates and creates the movie. The form is cleared on success.
    pub async fn submit_create(&mut self, client: &ApiClient) -> Result<Option<Movie>, SubmitError> {
        let movie = self.validate().map_err(SubmitError::Invalid)?;

        match client.create_movie(&movie).await {
            Ok(created) => {
                self.clear();
                Ok(created)
            }
            Err(cause) => {
                tracing::debug!(error = %cause, "create movie failed");
                self.errors.set(Field::Title, MSG_ADD_FAILED);
                Err(SubmitError::rejected(MSG_ADD_FAILED, cause))
            }
        }
    }

    /// Validates and patches the movie with the given id. Input is kept either way.
    pub async fn submit_edit(
        &mut self,
        client: &ApiClient,
        id: u64,
    ) -> Result<Option<Movie>, SubmitError> {
        let movie = self.validate().map_err(SubmitError::Invalid)?;

        client
            .edit_movie(id, &MoviePatch::from(movie))
            .await
            .map_err(|cause| {
                tracing::debug!(error = %cause, id, "edit movie failed");
                self.errors.set(Field::Title, MSG_UPDATE_FAILED);
                SubmitError::rejected(MSG_UPDATE_FAILED, cause)
            })
    }
}

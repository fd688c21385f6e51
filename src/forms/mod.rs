//! # Forms Module
//!
//! Input collection and validation for everything the user submits: movies
//! (manual entry and file import), login and registration.
//!
//! Each form keeps the raw text the user typed, validates it on submit and only
//! then talks to the backend. Validation failures never reach the network.
//! Request failures are reduced to one generic message per form, stored in the
//! form's error state while the input stays in place for a retry.

mod import;
mod login;
mod movie;
mod register;

pub use import::ImportForm;
pub use login::LoginForm;
pub use movie::MovieForm;
pub use movie::parse_year;
pub use register::RegisterForm;

use std::{collections::BTreeMap, fmt};

use crate::api::ApiError;

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 2021;
pub const MIN_PASSWORD_LEN: usize = 6;

pub const MSG_FILL_ALL: &str = "Please fill in all fields.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    Year,
    Format,
    Actors,
    File,
    Name,
    Email,
    Password,
    ConfirmPassword,
    /// Messages that belong to the whole form rather than one input.
    Form,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Title => "title",
            Field::Year => "year",
            Field::Format => "format",
            Field::Actors => "actors",
            Field::File => "file",
            Field::Name => "name",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirm password",
            Field::Form => "form",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<Field, String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: Field, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn has(&self, field: Field) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.fields.iter().map(|(field, message)| (*field, message.as_str()))
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.fields.values().map(String::as_str).collect();
        f.write_str(&messages.join(" "))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("{0}")]
    Invalid(FormErrors),
    #[error("{message}")]
    Rejected {
        message: String,
        #[source]
        cause: ApiError,
    },
}

impl SubmitError {
    pub fn rejected(message: impl Into<String>, cause: ApiError) -> Self {
        SubmitError::Rejected {
            message: message.into(),
            cause,
        }
    }

    pub fn cause(&self) -> Option<&ApiError> {
        match self {
            SubmitError::Invalid(_) => None,
            SubmitError::Rejected { cause, .. } => Some(cause),
        }
    }
}

use std::path::{Path, PathBuf};

use crate::{
    api::ApiClient,
    forms::{Field, FormErrors, SubmitError},
    types::ImportResponse,
};

const MSG_IMPORT_FAILED: &str = "Failed to import movies.";

/// Bulk import from a plain-text file. Only the file name is checked here;
/// the backend parses the content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportForm {
    pub file: Option<PathBuf>,
    errors: FormErrors,
}

impl ImportForm {
    pub fn new(file: Option<PathBuf>) -> Self {
        Self {
            file,
            errors: FormErrors::new(),
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn validate(&mut self) -> Result<PathBuf, FormErrors> {
        let mut errors = FormErrors::new();
        match &self.file {
            None => errors.set(Field::File, "File is required."),
            Some(path) if !is_text_file(path) => {
                errors.set(Field::File, "Only .txt files are supported.")
            }
            Some(_) => {}
        }

        self.errors = errors.clone();
        match &self.file {
            Some(path) if errors.is_empty() => Ok(path.clone()),
            _ => Err(errors),
        }
    }

    pub async fn submit(&mut self, client: &ApiClient) -> Result<ImportResponse, SubmitError> {
        let path = self.validate().map_err(SubmitError::Invalid)?;

        match client.import_movies(&path).await {
            Ok(result) => {
                self.file = None;
                self.errors = FormErrors::new();
                Ok(result)
            }
            Err(cause) => {
                tracing::debug!(error = %cause, path = %path.display(), "import failed");
                self.errors.set(Field::File, MSG_IMPORT_FAILED);
                Err(SubmitError::rejected(MSG_IMPORT_FAILED, cause))
            }
        }
    }
}

fn is_text_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(".txt"))
}

use crate::{
    api::{ApiClient, ApiError},
    forms::{Field, FormErrors, MSG_FILL_ALL, SubmitError},
    management::{session, state::Store},
    route::Route,
    types::{AuthResponse, Credentials},
};

const MSG_BAD_CREDENTIALS: &str = "Incorrect email or password.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    errors: FormErrors,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            errors: FormErrors::new(),
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn validate(&mut self) -> Result<Credentials, FormErrors> {
        let email = self.email.trim();

        let mut errors = FormErrors::new();
        if email.is_empty() {
            errors.set(Field::Email, "Email is required.");
        }
        if self.password.trim().is_empty() {
            errors.set(Field::Password, "Password is required.");
        }
        if !errors.is_empty() {
            errors.set(Field::Form, MSG_FILL_ALL);
        }

        self.errors = errors.clone();
        if errors.is_empty() {
            Ok(Credentials {
                email: email.to_string(),
                password: self.password.clone(),
            })
        } else {
            Err(errors)
        }
    }

    /// Logs in and stores the session. Returns the route to navigate to.
    pub async fn submit(&mut self, store: &mut Store, client: &ApiClient) -> Result<Route, SubmitError> {
        let credentials = self.validate().map_err(SubmitError::Invalid)?;

        let token = match client.login(&credentials).await {
            Ok(AuthResponse {
                token: Some(token), ..
            }) if !token.is_empty() => token,
            Ok(_) => return Err(self.reject(ApiError::Unauthorized)),
            Err(cause) => return Err(self.reject(cause)),
        };

        session::establish(store, client, &token).await;
        Ok(Route::Home)
    }

    fn reject(&mut self, cause: ApiError) -> SubmitError {
        tracing::debug!(error = %cause, "login rejected");
        self.errors.set(Field::Form, MSG_BAD_CREDENTIALS);
        SubmitError::rejected(MSG_BAD_CREDENTIALS, cause)
    }
}

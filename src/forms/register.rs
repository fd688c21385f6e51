use crate::{
    api::{ApiClient, ApiError},
    forms::{Field, FormErrors, MIN_PASSWORD_LEN, MSG_FILL_ALL, SubmitError},
    management::{session, state::Store},
    route::Route,
    types::{AuthResponse, Registration},
};

const MSG_REGISTRATION_FAILED: &str = "Registration failed.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    errors: FormErrors,
}

impl RegisterForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            errors: FormErrors::new(),
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    /// Checks, in order: all fields present, password length, passwords match.
    /// The first failing check wins.
    pub fn validate(&mut self) -> Result<Registration, FormErrors> {
        let name = self.name.trim();
        let email = self.email.trim();

        let mut errors = FormErrors::new();
        if name.is_empty()
            || email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            errors.set(Field::Form, MSG_FILL_ALL);
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.set(
                Field::Password,
                format!(
                    "Password must be at least {} characters long.",
                    MIN_PASSWORD_LEN
                ),
            );
        } else if self.password != self.confirm_password {
            errors.set(Field::ConfirmPassword, "Passwords do not match.");
        }

        self.errors = errors.clone();
        if errors.is_empty() {
            Ok(Registration {
                email: email.to_string(),
                name: name.to_string(),
                password: self.password.clone(),
                confirm_password: self.confirm_password.clone(),
            })
        } else {
            Err(errors)
        }
    }

    /// Registers and stores the session. Returns the route to navigate to.
    pub async fn submit(&mut self, store: &mut Store, client: &ApiClient) -> Result<Route, SubmitError> {
        let registration = self.validate().map_err(SubmitError::Invalid)?;

        let token = match client.register(&registration).await {
            Ok(AuthResponse {
                token: Some(token), ..
            }) if !token.is_empty() => token,
            Ok(_) => return Err(self.reject(ApiError::Server("no token issued".to_string()))),
            Err(cause) => return Err(self.reject(cause)),
        };

        session::establish(store, client, &token).await;
        Ok(Route::Home)
    }

    fn reject(&mut self, cause: ApiError) -> SubmitError {
        tracing::debug!(error = %cause, "registration rejected");
        let message = cause
            .server_message()
            .unwrap_or(MSG_REGISTRATION_FAILED)
            .to_string();
        self.errors.set(Field::Form, message.clone());
        SubmitError::rejected(message, cause)
    }
}

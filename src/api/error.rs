use reqwest::StatusCode;
use serde_json::Value;

/// Every way a request to the catalog backend can fail.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request rejected: {0}")]
    Validation(String),
    #[error("not authorized, please log in")]
    Unauthorized,
    #[error("not found")]
    NotFound,
    #[error("network failure: {0}")]
    Network(String),
    #[error("server failure: {0}")]
    Server(String),
}

impl ApiError {
    /// Maps a non-success HTTP status and its body to an error kind.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound,
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation(body_message(body).unwrap_or_else(|| status.to_string()))
            }
            _ => match body_message(body) {
                Some(message) => ApiError::Server(format!("{} (status {})", message, status)),
                None => ApiError::Server(format!("request failed with status {}", status)),
            },
        }
    }

    /// Maps a `{ "status": 0, "error": { "code": .. } }` body to an error kind.
    pub fn from_envelope(error: &Value) -> Self {
        let code = error
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or("UNKNOWN_ERROR");

        match code {
            "MOVIE_NOT_FOUND" | "NOT_FOUND" => ApiError::NotFound,
            "AUTHENTICATION_FAILED" | "WRONG_TOKEN" | "FORBIDDEN" | "UNAUTHORIZED" => {
                ApiError::Unauthorized
            }
            _ => ApiError::Validation(describe_code(code, error.get("fields"))),
        }
    }

    /// Detail supplied by the backend for a rejected request.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Validation(message) if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    pub(crate) fn malformed(err: serde_json::Error) -> Self {
        ApiError::Server(format!("malformed response: {}", err))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return ApiError::Server(format!("malformed response: {}", err));
        }

        if let Some(status) = err.status() {
            return ApiError::from_status(status, "");
        }

        ApiError::Network(err.to_string())
    }
}

fn body_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }

    match serde_json::from_str::<Value>(trimmed) {
        Ok(json) => json
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .or_else(|| {
                json.get("error").map(|error| match error.as_str() {
                    Some(text) => text.to_string(),
                    None => describe_code(
                        error
                            .get("code")
                            .and_then(Value::as_str)
                            .unwrap_or("UNKNOWN_ERROR"),
                        error.get("fields"),
                    ),
                })
            }),
        Err(_) => Some(trimmed.to_string()),
    }
}

fn describe_code(code: &str, fields: Option<&Value>) -> String {
    let details: Vec<String> = fields
        .and_then(Value::as_object)
        .map(|fields| {
            fields
                .iter()
                .map(|(field, reason)| match reason.as_str() {
                    Some(reason) => format!("{}: {}", field, reason),
                    None => format!("{}: {}", field, reason),
                })
                .collect()
        })
        .unwrap_or_default();

    if details.is_empty() {
        code.to_string()
    } else {
        format!("{} ({})", code, details.join(", "))
    }
}

use serde::{Deserialize, Serialize};

/// One entry of a backend `errorSources` list.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct FieldError {
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ApiErrorKind {
    Network,
    Unauthorized,
    Http,
    Rejected,
    Parse,
}

/// Every way a backend call can fail, after envelope normalization.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub(crate) enum ApiError {
    /// The request never produced a response.
    #[error("Network error: {0}")]
    Network(String),

    /// 401/403; the stored token is missing, expired or lacks the role.
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Any other non-2xx status.
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },

    /// The backend answered with `success: false`.
    #[error("{message}")]
    Rejected {
        message: String,
        fields: Vec<FieldError>,
    },

    /// The body was not the JSON shape the caller expected.
    #[error("Unexpected response: {0}")]
    Parse(String),
}

pub(crate) type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn kind(&self) -> ApiErrorKind {
        match self {
            ApiError::Network(_) => ApiErrorKind::Network,
            ApiError::Unauthorized { .. } => ApiErrorKind::Unauthorized,
            ApiError::Http { .. } => ApiErrorKind::Http,
            ApiError::Rejected { .. } => ApiErrorKind::Rejected,
            ApiError::Parse(_) => ApiErrorKind::Parse,
        }
    }

    pub(crate) fn network(e: reqwest::Error) -> Self {
        ApiError::Network(e.to_string())
    }

    pub(crate) fn parse(e: impl std::fmt::Display) -> Self {
        ApiError::Parse(e.to_string())
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ApiErrorKind::Unauthorized
    }

    /// Text for an inline banner: the message followed by field errors.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Rejected { message, fields } if !fields.is_empty() => {
                let details: Vec<String> = fields
                    .iter()
                    .map(|f| {
                        if f.path.is_empty() {
                            f.message.clone()
                        } else {
                            format!("{}: {}", f.path, f.message)
                        }
                    })
                    .collect();
                format!("{message} ({})", details.join("; "))
            }
            other => other.to_string(),
        }
    }
}

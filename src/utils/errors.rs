use thiserror::Error;

/// Errors raised while building, storing or retrieving a chart.
///
/// Every variant is recovered into a `{"Message": ...}` body by the handlers;
/// the underlying cause is only logged.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Malformed JSON: {0}")]
    MalformedJson(String),
    #[error("Schema violation: {0}")]
    SchemaViolation(String),
    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),
    #[error("Artifact not found: {0}")]
    ArtifactNotFound(String),
    #[error("I/O failure (errorcode {code}): {source}")]
    Io {
        code: u16,
        #[source]
        source: std::io::Error,
    },
    #[error("Artifact is empty: {0}")]
    EmptyArtifact(String),
    #[error("Rendering failed: {0}")]
    Render(String),
    #[error("Worker pool failure: {0}")]
    WorkerPool(String),
}

/// Error codes shown to clients for internal failures
pub const ERRORCODE_OPEN: u16 = 100;
pub const ERRORCODE_EMPTY: u16 = 101;
pub const ERRORCODE_WRITE: u16 = 102;
pub const ERRORCODE_RENDER: u16 = 200;
pub const ERRORCODE_WORKER: u16 = 201;

impl ChartError {
    /// Whether the error was caused by the client rather than by the service
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ChartError::MalformedJson(_)
                | ChartError::SchemaViolation(_)
                | ChartError::InvalidIdentifier(_)
                | ChartError::ArtifactNotFound(_)
        )
    }

    /// Build the stable, human-readable message sent back in the `Message` field
    pub fn user_message(&self, support_email: &str) -> String {
        match self {
            ChartError::MalformedJson(_) => {
                "Invalid data sent. The request body is not a JSON document. Please send a valid JSON-Object.".to_string()
            }
            ChartError::SchemaViolation(diagnostic) => diagnostic.clone(),
            ChartError::InvalidIdentifier(_) => {
                "The submitted argument is not an UUID. Please send a valid UUID.".to_string()
            }
            ChartError::ArtifactNotFound(_) => format!(
                "The submitted UUID is either not linked to any chart or already expired. Please contact our support via our e-mail {} .",
                support_email
            ),
            ChartError::Io { code, .. } => internal_error_message(*code, support_email),
            ChartError::EmptyArtifact(_) => internal_error_message(ERRORCODE_EMPTY, support_email),
            ChartError::Render(_) => internal_error_message(ERRORCODE_RENDER, support_email),
            ChartError::WorkerPool(_) => internal_error_message(ERRORCODE_WORKER, support_email),
        }
    }
}

fn internal_error_message(code: u16, support_email: &str) -> String {
    format!(
        "An internal error (errorcode {}) has occurred. Please contact our support via our e-mail {} .",
        code, support_email
    )
}

use miette::Diagnostic;
use thiserror::Error;

/// Message reported whenever no OpenAI credential is configured
pub const MISSING_CREDENTIAL_MESSAGE: &str =
    "OpenAI API key not configured. Set OPENAI_API_KEY environment variable.";

/// Main error type for the application
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Environment error: {0}")]
    #[diagnostic(code(event_extractor::environment))]
    Environment(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(event_extractor::config))]
    Config(String),

    #[error("Server error: {0}")]
    #[diagnostic(code(event_extractor::server))]
    Server(String),

    #[error("Template error: {0}")]
    #[diagnostic(code(event_extractor::template))]
    Template(#[from] askama::Error),

    #[error(transparent)]
    #[diagnostic(code(event_extractor::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(event_extractor::serialization))]
    Serialization(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type AppResult<T> = Result<T, Error>;

/// Failure of a single extraction call
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// No credential for the completion service; nothing was sent
    #[error("{0}")]
    #[diagnostic(code(event_extractor::extraction::configuration))]
    Configuration(String),

    /// The completion call failed or its result did not fit the schema
    #[error("{0}")]
    #[diagnostic(code(event_extractor::extraction::failed))]
    Extraction(String),
}

impl ExtractionError {
    pub fn missing_credential() -> Self {
        ExtractionError::Configuration(MISSING_CREDENTIAL_MESSAGE.to_string())
    }

    /// The preserved description of the failure
    pub fn description(&self) -> &str {
        match self {
            ExtractionError::Configuration(msg) | ExtractionError::Extraction(msg) => msg,
        }
    }
}

/// Errors raised by a structured completion backend
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CompletionError {
    /// Connection failed or timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response, rate limit, invalid request
    #[error("API error: {0}")]
    Api(String),

    /// The model declined to produce the requested structure
    #[error("Model refused to answer: {0}")]
    Refusal(String),

    /// Invalid JSON or unexpected response format
    #[error("Parse error: {0}")]
    Parse(String),
}

impl CompletionError {
    /// Short failure category, for log fields
    pub fn kind(&self) -> &'static str {
        match self {
            CompletionError::Network(_) => "network",
            CompletionError::Api(_) => "api",
            CompletionError::Refusal(_) => "refusal",
            CompletionError::Parse(_) => "parse",
        }
    }

    /// The service's own description, without the category prefix
    pub fn into_message(self) -> String {
        match self {
            CompletionError::Network(msg)
            | CompletionError::Api(msg)
            | CompletionError::Refusal(msg)
            | CompletionError::Parse(msg) => msg,
        }
    }
}

impl From<CompletionError> for ExtractionError {
    fn from(err: CompletionError) -> Self {
        ExtractionError::Extraction(err.into_message())
    }
}

/// Helper to create environment errors
pub fn env_error(var: &str) -> Error {
    Error::Environment(format!("Invalid value for environment variable: {}", var))
}

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for plan normalization
#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("Unknown guest status label: {0:?}")]
    #[diagnostic(
        code(plansync::unknown_guest_status),
        help("expected one of INVITED, GOING, DECLINED")
    )]
    UnknownGuestStatusLabel(String),

    #[error("Missing required field `{field}` in {shape} payload")]
    #[diagnostic(code(plansync::missing_field))]
    MissingRequiredField { shape: &'static str, field: &'static str },

    #[error("Invalid field `{field}` in {shape} payload: {reason}")]
    #[diagnostic(code(plansync::invalid_field))]
    InvalidField {
        shape: &'static str,
        field: &'static str,
        reason: String,
    },

    #[error("Malformed guest list payload: {0}")]
    #[diagnostic(code(plansync::malformed_guest_list))]
    MalformedGuestListPayload(String),

    #[error("Configuration error: {0}")]
    #[diagnostic(code(plansync::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(plansync::io))]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    #[diagnostic(code(plansync::serialization))]
    Serialization(String),

    #[error("Other error: {0}")]
    #[diagnostic(code(plansync::other))]
    Other(String),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialization(err.to_string())
    }
}

/// Type alias for Result with our Error type
pub type PlanResult<T> = Result<T, Error>;

/// Helper to create configuration errors
pub fn config_error(message: &str) -> Error {
    Error::Config(message.to_string())
}

/// Helper to create missing field errors
pub fn missing_field(shape: &'static str, field: &'static str) -> Error {
    Error::MissingRequiredField { shape, field }
}

/// Helper to create invalid field errors
pub fn invalid_field(shape: &'static str, field: &'static str, reason: impl Into<String>) -> Error {
    Error::InvalidField {
        shape,
        field,
        reason: reason.into(),
    }
}

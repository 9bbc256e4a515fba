use thiserror::Error;

/// Failures below the application protocol: the request never completed or
/// the body could not be decoded as JSON.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {path} failed: {source}")]
    Request {
        path: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("response from {path} was not valid JSON: {source}")]
    Decode {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The server answered but its application status field signalled failure.
    #[error("server reported failure: {0}")]
    Application(String),
    /// A form field could not be coerced to its wire type. Range and
    /// business-rule checks stay on the server.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
}

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("endpoint is required")]
    MissingEndpoint,

    #[error("failed to serialize request body: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {status}")]
    Api { status: StatusCode },

    #[error("failed to decode records response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid IP address '{value}' in record '{name}'")]
    InvalidValue {
        name: String,
        value: String,
        #[source]
        source: std::net::AddrParseError,
    },
}

/// Failures talking to the catalog API.
///
/// The UI never distinguishes between these; they exist so the log says
/// what actually went wrong.
#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("unexpected status {status} for {url}")]
    Status { status: u16, url: String },
    #[error("response parse error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("missing field: {0}")]
    MissingField(&'static str),
    #[error("sprite decode error: {0}")]
    Sprite(String),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("{name} must be an http(s) url, got {value:?}")]
    InvalidUrl { name: &'static str, value: String },
    #[error("invalid log level {0:?}")]
    InvalidLogLevel(String),
}

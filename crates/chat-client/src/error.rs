use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("authentication rejected by provider ({status}): {message}")]
    Auth { status: u16, message: String },

    #[error("provider returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Failed to parse completion response: {source}\n  body: {body}")]
    Parse {
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("completion response contained no message content")]
    EmptyResponse,

    #[error("invalid client configuration: {0}")]
    Config(String),
}

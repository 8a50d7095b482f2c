use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Root element '#{0}' not found in document")]
    RootNotFound(String),

    #[error("Invariant violated: {0}")]
    Invariant(String),

    #[error("Deck error: {0}")]
    Deck(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Builds a fatal invariant error, logging it at the raise site.
///
/// These signal programmer or configuration mistakes; callers are expected
/// to propagate them, not recover.
pub fn invariant(msg: impl Into<String>) -> Error {
    let msg = msg.into();
    tracing::error!("invariant violated: {msg}");
    Error::Invariant(msg)
}

use thiserror;

/// The Result type for term48.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("io error")]
    StdIOError(#[from] std::io::Error),

    #[error("malformed json")]
    JsonError(#[from] serde_json::Error),
}

use thiserror::Error;

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Another user already registered with the same email and password.
    #[error("user already exists")]
    UserAlreadyExists,

    /// The user already liked this thread.
    #[error("user {0} already liked the thread")]
    AlreadyLiked(String),

    #[error("thread not found: {0}")]
    ThreadNotFound(String),
}

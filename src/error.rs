use anyhow::Result;
use thiserror::Error;

pub type Maybe<T> = Result<T>;

#[derive(Debug, Error)]
pub enum RemoveError {
    #[error("{0}")]
    Configuration(String),
    #[error("could not run `git {args}`: {source}")]
    Command {
        args: String,
        #[source]
        source: std::io::Error,
    },
    #[error("aborted: {0}")]
    UserAbort(String),
}

pub fn config_error<T>(message: impl Into<String>) -> Maybe<T> {
    Err(RemoveError::Configuration(message.into()).into())
}

pub fn abort<T>(message: impl Into<String>) -> Maybe<T> {
    Err(RemoveError::UserAbort(message.into()).into())
}

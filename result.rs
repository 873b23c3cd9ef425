use crate::*;

/// Basic Result alias with [`enum@ptol::Error`](Error)
pub type Result<T = (), E = Error> = std::result::Result<T, E>;

use thiserror::Error;
/// Error type used across the crate
#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid page name: {0:?}")]
    InvalidPage(String),
    #[error("HTTP error! status: {0}")]
    Status(StatusCode),
    #[error("network error: {0}")]
    Network(String),
    #[error("element not found: {0}")]
    MissingElement(&'static str),
    #[error(transparent)]
    SerdeJson(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] toml::de::Error),
    #[error("{0}")]
    Js(String),
}

/// Shorthand to create formatted [`Error::Js`] values like `e!("{x:?}")`
#[macro_export]
macro_rules! e {
    ($($tokens:tt),+) => {
        $crate::Error::Js(format!($($tokens),+))
    };
}

//! Error type for the glyph CLI.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("{0} file(s) failed to check")]
    ChecksFailed(usize),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("engine error: {0:?}")]
    Engine(glyph_util::ErrorKind),
}

impl From<glyph_util::ErrorKind> for CliError {
    fn from(kind: glyph_util::ErrorKind) -> Self {
        CliError::Engine(kind)
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

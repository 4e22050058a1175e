use thiserror::Error;

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid size parameter: {size}. Must be a positive integer or WIDTHxHEIGHT")]
    InvalidSize { size: String },

    #[error("Size must be greater than 0, got: {size}")]
    ZeroSize { size: String },

    #[error("Invalid target: {target}. Expected PLATFORM=DIR or PLATFORM=DIR/FILENAME.png")]
    InvalidTarget { target: String },

    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error(transparent)]
    Library(#[from] iconprep::Error),
}

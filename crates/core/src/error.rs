use thiserror::Error;

/// Rejection of user input before anything reaches the network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a YouTube URL")]
    EmptyInput,

    #[error("Invalid YouTube URL")]
    InvalidUrl,
}

#[derive(Error, Debug)]
pub enum FactlensError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, FactlensError>;

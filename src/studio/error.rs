//! Errors surfaced by studio actions.

use crate::banner::BannerError;

/// Errors from studio actions that are not turned into on-screen messages.
#[derive(Debug, thiserror::Error)]
pub enum StudioError {
    #[error("Please generate a banner image first.")]
    NoImage,

    #[error("Select an API key to generate video.")]
    KeyNotSelected,

    #[error("A generation is already in progress.")]
    Busy,

    #[error(transparent)]
    Banner(#[from] BannerError),

    #[error("Key selection failed: {0}")]
    KeySelection(#[from] std::io::Error),
}

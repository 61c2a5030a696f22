//! Orchestration of banner and video generation.
//!
//! [`Studio`] sequences user actions against a [`GenerationBackend`]: it
//! owns the form state and overlay editor, tracks loading and error flags,
//! and runs video generation as a cancellable background [`VideoJob`].
//!
//! [`GenerationBackend`]: crate::genai::GenerationBackend

mod command;
mod error;
mod keys;
mod session;
mod video;

pub use command::{SessionCommand, SESSION_HELP};
pub use error::StudioError;
pub use keys::{KeySelector, LineSource, PromptKeySelector};
pub use session::{GenerationResult, Studio, DEFAULT_CONTAINER};
pub use video::{
    run_video_pipeline, VideoJob, VideoSettings, VideoState, DEFAULT_POLL_INTERVAL,
    INVALID_KEY_SUFFIX,
};

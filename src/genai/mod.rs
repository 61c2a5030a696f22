//! Generative AI integration.
//!
//! Wraps the Google Generative Language REST API: banner image generation
//! (Imagen), logo background removal (Gemini image editing), and
//! long-running video generation (Veo) with its operation-status endpoint.
//! Video generation only starts an operation; polling it to completion is
//! the caller's job.

mod backend;
mod client;
mod data_uri;
mod error;
mod key;
mod operation;
mod prompt;
mod wire;

pub use backend::GenerationBackend;
pub use client::{
    GenAiClient, DEFAULT_EDIT_MODEL, DEFAULT_IMAGE_MODEL, DEFAULT_VIDEO_MODEL,
    GENAI_API_BASE_URL,
};
pub use data_uri::DataUri;
pub use error::GenAiError;
pub(crate) use error::message_suggests_invalid_key;
pub use key::{KeySource, SharedKey, API_KEY_ENV};
pub use operation::{OperationError, VideoOperation};
pub use prompt::{banner_image_prompt, BACKGROUND_REMOVAL_INSTRUCTION, VIDEO_ANIMATION_PROMPT};

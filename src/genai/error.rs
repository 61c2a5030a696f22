//! Errors from the generative AI endpoints.

/// Phrase in an error message that hints at a bad or unknown API key.
const INVALID_KEY_HINT: &str = "not found";

/// Errors that can occur while calling the generation endpoints.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("Invalid base64 image URL format.")]
    InvalidDataUri,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Image generation failed, no image bytes returned.")]
    NoImageReturned,

    #[error("Background removal failed, no image data returned.")]
    NoInlineImage,

    #[error("Video generation failed: {message}")]
    OperationFailed {
        code: Option<i64>,
        message: String,
    },

    #[error("Video generation failed: No download link found.")]
    NoDownloadUri,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl GenAiError {
    /// Whether the error suggests the API key is missing, invalid or unknown.
    pub fn suggests_invalid_key(&self) -> bool {
        matches!(self, GenAiError::MissingApiKey)
            || message_suggests_invalid_key(&self.to_string())
    }
}

/// Same heuristic for raw message text.
pub(crate) fn message_suggests_invalid_key(message: &str) -> bool {
    message.contains(INVALID_KEY_HINT)
}

//! The seam between orchestration and the remote generation service.

use std::future::Future;
use std::path::{Path, PathBuf};

use super::{GenAiError, VideoOperation};

/// Remote generation capabilities used by the studio.
///
/// [`GenAiClient`](super::GenAiClient) is the production implementation.
pub trait GenerationBackend: Send + Sync + 'static {
    /// Generate a banner background for `festival_name`. Returns a `data:` URI.
    fn generate_banner_image(
        &self,
        festival_name: &str,
    ) -> impl Future<Output = Result<String, GenAiError>> + Send;

    /// Strip the background from a logo `data:` URI. Returns a PNG `data:` URI.
    fn remove_logo_background(
        &self,
        logo: &str,
    ) -> impl Future<Output = Result<String, GenAiError>> + Send;

    /// Start animating a banner image. Returns the (usually pending) operation.
    fn generate_banner_video(
        &self,
        image: &str,
    ) -> impl Future<Output = Result<VideoOperation, GenAiError>> + Send;

    /// Query an operation's status once.
    fn get_video_operation(
        &self,
        operation: &VideoOperation,
    ) -> impl Future<Output = Result<VideoOperation, GenAiError>> + Send;

    /// Fetch a finished video into `dest`.
    fn download_video(
        &self,
        uri: &str,
        dest: &Path,
    ) -> impl Future<Output = Result<PathBuf, GenAiError>> + Send;
}

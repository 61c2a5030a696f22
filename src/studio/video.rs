//! Video generation job: request, poll until done, download.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::genai::{message_suggests_invalid_key, GenAiError, GenerationBackend, VideoOperation};

/// Default delay between operation status checks (10 seconds).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(10);

/// Appended to failure messages when the error hints at a bad key.
pub const INVALID_KEY_SUFFIX: &str = " Your API key might be invalid. Please re-select it.";

const START_FAILED_MESSAGE: &str = "Failed to start video generation.";
const GENERATION_FAILED_MESSAGE: &str = "Video generation failed.";
const NO_DOWNLOAD_LINK_MESSAGE: &str = "Video generation failed: No download link found.";
const CANCELLED_MESSAGE: &str = "Video generation was cancelled.";

/// Where a video job is in its lifecycle.
#[derive(Debug, Clone, PartialEq)]
pub enum VideoState {
    /// Nothing requested yet.
    Idle,
    /// Initial generation request in flight.
    Requesting,
    /// Waiting on the remote operation.
    Polling {
        /// Status checks performed so far.
        checks: u32,
    },
    /// Video downloaded and ready for playback.
    Succeeded { video: PathBuf },
    Failed {
        message: String,
        /// The error hinted at an invalid key; the user should re-select one.
        reset_key: bool,
    },
}

impl VideoState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, VideoState::Succeeded { .. } | VideoState::Failed { .. })
    }
}

/// Settings for a video job.
#[derive(Debug, Clone)]
pub struct VideoSettings {
    pub poll_interval: Duration,
    /// Directory downloaded videos are written to.
    pub output_dir: PathBuf,
}

impl Default for VideoSettings {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            output_dir: std::env::temp_dir().join("festive-banner"),
        }
    }
}

/// Run the video state machine to a terminal state.
///
/// Every transition is published on `state`. Polling has no retry limit or
/// deadline; it runs until the remote operation reports done.
pub async fn run_video_pipeline<B: GenerationBackend>(
    backend: &B,
    image: &str,
    settings: &VideoSettings,
    state: &watch::Sender<VideoState>,
) -> VideoState {
    state.send_replace(VideoState::Requesting);

    let operation = match backend.generate_banner_video(image).await {
        Ok(operation) => operation,
        Err(e) => {
            log::error!("Failed to start video generation: {}", e);
            return finish(state, failure(START_FAILED_MESSAGE, &e));
        }
    };

    let outcome = match poll_until_done(backend, operation, settings, state).await {
        Ok(operation) => resolve(backend, &operation, settings).await,
        Err(e) => Err(e),
    };

    let final_state = match outcome {
        Ok(final_state) => final_state,
        Err(e) => {
            log::error!("Video generation error: {}", e);
            failure(GENERATION_FAILED_MESSAGE, &e)
        }
    };
    finish(state, final_state)
}

async fn poll_until_done<B: GenerationBackend>(
    backend: &B,
    mut operation: VideoOperation,
    settings: &VideoSettings,
    state: &watch::Sender<VideoState>,
) -> Result<VideoOperation, GenAiError> {
    let mut checks = 0u32;
    while !operation.done {
        state.send_replace(VideoState::Polling { checks });
        tokio::time::sleep(settings.poll_interval).await;

        operation = backend.get_video_operation(&operation).await?;
        checks += 1;
        log::info!(
            "Video operation {} check {}: done={}",
            operation.name,
            checks,
            operation.done
        );
    }
    Ok(operation)
}

/// Map a finished operation to a terminal state, downloading on success.
async fn resolve<B: GenerationBackend>(
    backend: &B,
    operation: &VideoOperation,
    settings: &VideoSettings,
) -> Result<VideoState, GenAiError> {
    if let Some(uri) = operation.download_uri() {
        let dest = settings.output_dir.join(video_file_name(&operation.name));
        let video = backend.download_video(uri, &dest).await?;
        log::info!("Video ready: {}", video.display());
        return Ok(VideoState::Succeeded { video });
    }

    if let Some(error) = &operation.error {
        let err = GenAiError::OperationFailed {
            code: error.code,
            message: error.message.clone(),
        };
        log::error!("{}", err);
        let reset_key = message_suggests_invalid_key(&error.message);
        let mut message = GENERATION_FAILED_MESSAGE.to_string();
        if reset_key {
            message.push_str(INVALID_KEY_SUFFIX);
        }
        return Ok(VideoState::Failed { message, reset_key });
    }

    Ok(VideoState::Failed {
        message: NO_DOWNLOAD_LINK_MESSAGE.to_string(),
        reset_key: false,
    })
}

fn failure(base: &str, error: &GenAiError) -> VideoState {
    let reset_key = error.suggests_invalid_key();
    let mut message = base.to_string();
    if reset_key {
        message.push_str(INVALID_KEY_SUFFIX);
    }
    VideoState::Failed { message, reset_key }
}

fn finish(state: &watch::Sender<VideoState>, final_state: VideoState) -> VideoState {
    state.send_replace(final_state.clone());
    final_state
}

/// File name for a downloaded video, derived from the operation id.
fn video_file_name(operation_name: &str) -> String {
    let id: String = operation_name
        .rsplit('/')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
        .collect();
    if id.is_empty() {
        "banner-video.mp4".to_string()
    } else {
        format!("banner-video-{}.mp4", id)
    }
}

/// A video generation running in the background.
///
/// The job is cancelled when dropped, so a replaced or abandoned job does
/// not keep polling.
pub struct VideoJob {
    state: watch::Receiver<VideoState>,
    handle: JoinHandle<()>,
}

impl VideoJob {
    /// Spawn the pipeline on the current tokio runtime.
    pub fn spawn<B: GenerationBackend>(
        backend: Arc<B>,
        image: String,
        settings: VideoSettings,
    ) -> Self {
        let (tx, rx) = watch::channel(VideoState::Requesting);
        let handle = tokio::spawn(async move {
            run_video_pipeline(backend.as_ref(), &image, &settings, &tx).await;
        });
        Self { state: rx, handle }
    }

    /// Latest published state.
    pub fn state(&self) -> VideoState {
        self.state.borrow().clone()
    }

    /// Wait for a terminal state.
    ///
    /// A job cancelled before finishing reports a failure.
    pub async fn wait(&mut self) -> VideoState {
        loop {
            let current = self.state.borrow_and_update().clone();
            if current.is_terminal() {
                return current;
            }
            if self.state.changed().await.is_err() {
                let last = self.state.borrow().clone();
                if last.is_terminal() {
                    return last;
                }
                return VideoState::Failed {
                    message: CANCELLED_MESSAGE.to_string(),
                    reset_key: false,
                };
            }
        }
    }

    /// Stop polling. The state stays at whatever was last published.
    pub fn cancel(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for VideoJob {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_file_name() {
        assert_eq!(
            video_file_name("models/veo-3.1/operations/abc-123"),
            "banner-video-abc-123.mp4"
        );
        assert_eq!(video_file_name(""), "banner-video.mp4");
        assert_eq!(video_file_name("ops/../.."), "banner-video.mp4");
    }

    #[test]
    fn test_terminal_states() {
        assert!(!VideoState::Idle.is_terminal());
        assert!(!VideoState::Requesting.is_terminal());
        assert!(!VideoState::Polling { checks: 2 }.is_terminal());
        assert!(VideoState::Succeeded {
            video: PathBuf::from("v.mp4")
        }
        .is_terminal());
        assert!(VideoState::Failed {
            message: String::new(),
            reset_key: false
        }
        .is_terminal());
    }

    #[test]
    fn test_failure_applies_key_heuristic() {
        let state = failure(
            START_FAILED_MESSAGE,
            &GenAiError::ApiError {
                status: 404,
                message: "Requested entity was not found.".to_string(),
            },
        );
        assert_eq!(
            state,
            VideoState::Failed {
                message: format!("{}{}", START_FAILED_MESSAGE, INVALID_KEY_SUFFIX),
                reset_key: true,
            }
        );

        let state = failure(START_FAILED_MESSAGE, &GenAiError::MissingApiKey);
        assert_eq!(
            state,
            VideoState::Failed {
                message: format!("{}{}", START_FAILED_MESSAGE, INVALID_KEY_SUFFIX),
                reset_key: true,
            }
        );

        let state = failure(START_FAILED_MESSAGE, &GenAiError::NoImageReturned);
        assert_eq!(
            state,
            VideoState::Failed {
                message: START_FAILED_MESSAGE.to_string(),
                reset_key: false,
            }
        );
    }
}

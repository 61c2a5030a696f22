//! Studio - one banner editing session.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::banner::{load_logo, BannerConfig, BannerError, BannerField, CustomTextList};
use crate::editor::{render_banner_html, BannerMedia, BannerView, OverlayEditor, PointerEvent, Rect};
use crate::genai::GenerationBackend;

use super::keys::KeySelector;
use super::video::{VideoJob, VideoSettings, VideoState};
use super::StudioError;

/// Banner container used when no layout information is available (3:4).
pub const DEFAULT_CONTAINER: Rect = Rect::new(0.0, 0.0, 600.0, 800.0);

const EMPTY_FESTIVAL_MESSAGE: &str = "Please enter a festival name.";
const IMAGE_FAILED_MESSAGE: &str = "Failed to generate banner image. Please try again.";
const LOGO_FAILED_MESSAGE: &str = "Failed to remove background. Please try another image.";

/// Generated media plus the loading and error flags of both pipelines.
///
/// The image and video flags are independent of each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GenerationResult {
    /// Generated image as a `data:` URI.
    pub image: Option<String>,
    /// Downloaded video; shown instead of the image when present.
    pub video: Option<PathBuf>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub is_generating_video: bool,
    pub video_error: Option<String>,
}

/// One editing session: form state, overlays, generated media.
///
/// Nothing here is persisted; a new session starts from defaults.
pub struct Studio<B, K> {
    backend: Arc<B>,
    keys: K,
    config: BannerConfig,
    texts: CustomTextList,
    editor: OverlayEditor,
    result: GenerationResult,
    key_ready: bool,
    is_removing_background: bool,
    logo_error: Option<String>,
    video_settings: VideoSettings,
    video_job: Option<VideoJob>,
}

impl<B: GenerationBackend, K: KeySelector> Studio<B, K> {
    pub fn new(backend: Arc<B>, keys: K, video_settings: VideoSettings) -> Self {
        let key_ready = keys.has_selected_key();
        Self {
            backend,
            keys,
            config: BannerConfig::default(),
            texts: CustomTextList::new(),
            editor: OverlayEditor::new(),
            result: GenerationResult::default(),
            key_ready,
            is_removing_background: false,
            logo_error: None,
            video_settings,
            video_job: None,
        }
    }

    /// Start from `config` instead of the built-in defaults.
    pub fn with_config(mut self, config: BannerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &BannerConfig {
        &self.config
    }

    pub fn texts(&self) -> &CustomTextList {
        &self.texts
    }

    pub fn editor(&self) -> &OverlayEditor {
        &self.editor
    }

    pub fn result(&self) -> &GenerationResult {
        &self.result
    }

    pub fn key_ready(&self) -> bool {
        self.key_ready
    }

    pub fn is_removing_background(&self) -> bool {
        self.is_removing_background
    }

    pub fn logo_error(&self) -> Option<&str> {
        self.logo_error.as_deref()
    }

    pub fn video_settings(&self) -> &VideoSettings {
        &self.video_settings
    }

    /// Update one form field.
    pub fn update(&mut self, field: BannerField) -> Result<(), BannerError> {
        self.config.apply(field)
    }

    /// Load a logo image file. Returns false if the file was not an image.
    pub fn load_logo_file(&mut self, path: &Path) -> Result<bool, BannerError> {
        match load_logo(path)? {
            Some(uri) => {
                self.config.apply(BannerField::Logo(Some(uri)))?;
                self.logo_error = None;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn add_custom_text(&mut self, text: &str) -> Option<u64> {
        self.texts.add(text)
    }

    pub fn remove_custom_text(&mut self, id: u64) -> bool {
        self.texts.remove(id)
    }

    /// Forward a pointer gesture to the overlay editor.
    ///
    /// Gestures only apply while a banner is on display.
    pub fn handle_pointer(&mut self, event: PointerEvent, container: Rect) -> bool {
        if !matches!(self.view(), BannerView::Banner(_)) {
            return false;
        }
        self.editor.handle(event, container, &mut self.texts)
    }

    /// Generate the banner background image.
    ///
    /// Clears any previous image and video first. Does not cancel a video job
    /// that is still running.
    pub async fn generate_banner(&mut self) {
        if self.config.festival_name.is_empty() {
            self.result.error = Some(EMPTY_FESTIVAL_MESSAGE.to_string());
            return;
        }

        self.result.is_loading = true;
        self.result.error = None;
        self.result.image = None;
        self.result.video = None;

        match self
            .backend
            .generate_banner_image(&self.config.festival_name)
            .await
        {
            Ok(image) => {
                log::info!("Banner image generated for {}", self.config.festival_name);
                self.result.image = Some(image);
            }
            Err(e) => {
                log::error!("Banner image generation failed: {}", e);
                self.result.error = Some(IMAGE_FAILED_MESSAGE.to_string());
            }
        }

        self.result.is_loading = false;
    }

    /// Replace the logo with a background-free version.
    pub async fn remove_logo_background(&mut self) {
        let Some(logo) = self.config.logo.clone() else {
            return;
        };

        self.is_removing_background = true;
        self.logo_error = None;

        match self.backend.remove_logo_background(&logo).await {
            Ok(cleaned) => self.config.logo = Some(cleaned),
            Err(e) => {
                log::error!("Background removal failed: {}", e);
                self.logo_error = Some(LOGO_FAILED_MESSAGE.to_string());
            }
        }

        self.is_removing_background = false;
    }

    /// Open the key selection flow, then re-check whether a key is selected.
    ///
    /// Any prompt the selector shows is written to `prompt`.
    pub fn select_api_key(&mut self, prompt: &mut dyn Write) -> Result<bool, StudioError> {
        self.keys.open_select_key(prompt)?;
        self.key_ready = self.keys.has_selected_key();
        Ok(self.key_ready)
    }

    /// Whether video generation can be started right now.
    pub fn can_generate_video(&self) -> bool {
        self.key_ready
            && self.result.image.is_some()
            && !self.result.is_generating_video
            && !self.result.is_loading
    }

    /// Start animating the current banner image in the background.
    ///
    /// Must be called within a tokio runtime. A previous job is replaced
    /// and cancelled.
    pub fn start_video(&mut self) -> Result<(), StudioError> {
        self.refresh_video();
        if !self.key_ready {
            return Err(StudioError::KeyNotSelected);
        }
        if self.result.is_generating_video || self.result.is_loading {
            return Err(StudioError::Busy);
        }
        let Some(image) = self.result.image.clone() else {
            self.result.video_error = Some(StudioError::NoImage.to_string());
            return Err(StudioError::NoImage);
        };

        self.result.is_generating_video = true;
        self.result.video_error = None;
        self.result.video = None;

        log::info!("Starting video generation");
        self.video_job = Some(VideoJob::spawn(
            Arc::clone(&self.backend),
            image,
            self.video_settings.clone(),
        ));
        Ok(())
    }

    /// Current video state without waiting.
    ///
    /// A terminal state is applied to the session and the job released.
    pub fn refresh_video(&mut self) -> VideoState {
        let Some(job) = &self.video_job else {
            return VideoState::Idle;
        };
        let state = job.state();
        if state.is_terminal() {
            self.apply_video_state(&state);
            self.video_job = None;
        }
        state
    }

    /// Wait for the running video job, if any, and apply its outcome.
    pub async fn wait_for_video(&mut self) -> Option<VideoState> {
        let job = self.video_job.as_mut()?;
        let state = job.wait().await;
        self.apply_video_state(&state);
        self.video_job = None;
        Some(state)
    }

    /// Stop the running video job.
    pub fn cancel_video(&mut self) -> bool {
        match self.video_job.take() {
            Some(job) => {
                job.cancel();
                self.result.is_generating_video = false;
                log::info!("Video generation cancelled");
                true
            }
            None => false,
        }
    }

    fn apply_video_state(&mut self, state: &VideoState) {
        match state {
            VideoState::Succeeded { video } => {
                self.result.video = Some(video.clone());
                self.result.is_generating_video = false;
            }
            VideoState::Failed { message, reset_key } => {
                self.result.video_error = Some(message.clone());
                self.result.is_generating_video = false;
                if *reset_key {
                    self.key_ready = false;
                }
            }
            _ => {}
        }
    }

    /// What the banner panel shows, by priority.
    pub fn view(&self) -> BannerView<'_> {
        let result = &self.result;
        if result.is_loading {
            return BannerView::Loading;
        }
        if result.is_generating_video {
            return BannerView::GeneratingVideo;
        }
        if let Some(error) = result.error.as_deref().or(result.video_error.as_deref()) {
            return BannerView::Error(error);
        }
        if let Some(video) = &result.video {
            return BannerView::Banner(BannerMedia::Video(video));
        }
        match &result.image {
            Some(image) => BannerView::Banner(BannerMedia::Image(image)),
            None => BannerView::Empty,
        }
    }

    /// Compose the banner panel as HTML.
    pub fn render_html(&self) -> String {
        render_banner_html(&self.view(), &self.config, &self.texts, &self.editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{DragTarget, Point, SizeTarget};
    use crate::genai::{GenAiError, VideoOperation};
    use std::io;
    use std::sync::Mutex;

    /// Backend returning canned results.
    #[derive(Default)]
    struct CannedBackend {
        image: Option<String>,
        logo: Option<String>,
        festivals: Mutex<Vec<String>>,
    }

    impl GenerationBackend for CannedBackend {
        async fn generate_banner_image(&self, festival_name: &str) -> Result<String, GenAiError> {
            self.festivals
                .lock()
                .unwrap()
                .push(festival_name.to_string());
            self.image.clone().ok_or(GenAiError::NoImageReturned)
        }

        async fn remove_logo_background(&self, _logo: &str) -> Result<String, GenAiError> {
            self.logo.clone().ok_or(GenAiError::NoInlineImage)
        }

        async fn generate_banner_video(&self, _image: &str) -> Result<VideoOperation, GenAiError> {
            Ok(VideoOperation::failed("op", "quota"))
        }

        async fn get_video_operation(
            &self,
            operation: &VideoOperation,
        ) -> Result<VideoOperation, GenAiError> {
            Ok(operation.clone())
        }

        async fn download_video(&self, _uri: &str, dest: &Path) -> Result<PathBuf, GenAiError> {
            Ok(dest.to_path_buf())
        }
    }

    struct StaticKeys(bool);

    impl KeySelector for StaticKeys {
        fn has_selected_key(&self) -> bool {
            self.0
        }

        fn open_select_key(&mut self, _prompt: &mut dyn Write) -> io::Result<()> {
            self.0 = true;
            Ok(())
        }
    }

    fn studio(backend: CannedBackend, key: bool) -> Studio<CannedBackend, StaticKeys> {
        Studio::new(Arc::new(backend), StaticKeys(key), VideoSettings::default())
    }

    #[tokio::test]
    async fn test_generate_banner_success() {
        let mut studio = studio(
            CannedBackend {
                image: Some("data:image/jpeg;base64,AAAA".to_string()),
                ..Default::default()
            },
            true,
        );

        studio.generate_banner().await;

        assert_eq!(
            studio.result().image.as_deref(),
            Some("data:image/jpeg;base64,AAAA")
        );
        assert!(!studio.result().is_loading);
        assert!(studio.result().error.is_none());
        assert!(matches!(studio.view(), BannerView::Banner(BannerMedia::Image(_))));
    }

    #[tokio::test]
    async fn test_generate_banner_failure_shows_generic_message() {
        let mut studio = studio(CannedBackend::default(), true);

        studio.generate_banner().await;

        assert!(studio.result().image.is_none());
        assert_eq!(studio.result().error.as_deref(), Some(IMAGE_FAILED_MESSAGE));
        assert_eq!(studio.view(), BannerView::Error(IMAGE_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_generate_banner_requires_festival_name() {
        let backend = Arc::new(CannedBackend::default());
        let mut studio = Studio::new(Arc::clone(&backend), StaticKeys(true), VideoSettings::default());
        studio
            .update(BannerField::FestivalName(String::new()))
            .unwrap();

        studio.generate_banner().await;

        assert_eq!(studio.result().error.as_deref(), Some(EMPTY_FESTIVAL_MESSAGE));
        assert!(backend.festivals.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_logo_background() {
        let mut studio = studio(
            CannedBackend {
                logo: Some("data:image/png;base64,CLEAN".to_string()),
                ..Default::default()
            },
            true,
        );
        studio
            .update(BannerField::Logo(Some("data:image/png;base64,RAW".to_string())))
            .unwrap();

        studio.remove_logo_background().await;

        assert_eq!(
            studio.config().logo.as_deref(),
            Some("data:image/png;base64,CLEAN")
        );
        assert!(studio.logo_error().is_none());
        assert!(!studio.is_removing_background());
    }

    #[tokio::test]
    async fn test_remove_logo_background_failure_keeps_logo() {
        let mut studio = studio(CannedBackend::default(), true);
        studio
            .update(BannerField::Logo(Some("data:image/png;base64,RAW".to_string())))
            .unwrap();

        studio.remove_logo_background().await;

        assert_eq!(studio.config().logo.as_deref(), Some("data:image/png;base64,RAW"));
        assert_eq!(studio.logo_error(), Some(LOGO_FAILED_MESSAGE));
    }

    #[tokio::test]
    async fn test_start_video_without_image_sets_error() {
        let mut studio = studio(CannedBackend::default(), true);
        let result = studio.start_video();
        assert!(matches!(result, Err(StudioError::NoImage)));
        assert_eq!(
            studio.result().video_error.as_deref(),
            Some("Please generate a banner image first.")
        );
        assert!(!studio.result().is_generating_video);
    }

    #[tokio::test]
    async fn test_start_video_requires_key() {
        let mut studio = studio(CannedBackend::default(), false);
        assert!(!studio.key_ready());
        assert!(matches!(studio.start_video(), Err(StudioError::KeyNotSelected)));

        assert!(studio.select_api_key(&mut io::sink()).unwrap());
        assert!(studio.key_ready());
    }

    #[tokio::test]
    async fn test_video_operation_error_surfaces_message() {
        let mut studio = studio(
            CannedBackend {
                image: Some("data:image/jpeg;base64,AAAA".to_string()),
                ..Default::default()
            },
            true,
        );
        studio.generate_banner().await;
        studio.start_video().unwrap();
        assert!(studio.result().is_generating_video);
        assert_eq!(studio.view(), BannerView::GeneratingVideo);

        let state = studio.wait_for_video().await.unwrap();

        assert!(matches!(state, VideoState::Failed { reset_key: false, .. }));
        assert_eq!(
            studio.result().video_error.as_deref(),
            Some("Video generation failed.")
        );
        assert!(studio.key_ready());
        assert!(!studio.result().is_generating_video);
    }

    #[tokio::test]
    async fn test_pointer_gestures_need_a_banner() {
        let mut studio = studio(
            CannedBackend {
                image: Some("data:image/jpeg;base64,AAAA".to_string()),
                ..Default::default()
            },
            true,
        );
        let down = PointerEvent::Down {
            target: DragTarget::Footer,
            at: Point::new(10.0, 10.0),
        };
        assert!(!studio.handle_pointer(down, DEFAULT_CONTAINER));

        studio.generate_banner().await;
        assert!(studio.handle_pointer(down, DEFAULT_CONTAINER));
        assert!(studio.handle_pointer(
            PointerEvent::Move {
                at: Point::new(15.0, 30.0)
            },
            DEFAULT_CONTAINER
        ));
        assert!(studio.handle_pointer(PointerEvent::Up, DEFAULT_CONTAINER));
        assert_eq!(studio.editor().footer_position(), Point::new(5.0, 20.0));

        assert!(studio.handle_pointer(
            PointerEvent::Click {
                target: SizeTarget::Greeting
            },
            DEFAULT_CONTAINER
        ));
        assert_eq!(studio.editor().greeting_size().rem(), 6.25);
    }

    #[test]
    fn test_view_priority() {
        let mut studio = studio(CannedBackend::default(), true);
        assert_eq!(studio.view(), BannerView::Empty);

        studio.result.image = Some("data:image/jpeg;base64,A".to_string());
        studio.result.video = Some(PathBuf::from("v.mp4"));
        assert_eq!(
            studio.view(),
            BannerView::Banner(BannerMedia::Video(Path::new("v.mp4")))
        );

        studio.result.video_error = Some("bad".to_string());
        assert_eq!(studio.view(), BannerView::Error("bad"));

        studio.result.error = Some("worse".to_string());
        assert_eq!(studio.view(), BannerView::Error("worse"));

        studio.result.is_generating_video = true;
        assert_eq!(studio.view(), BannerView::GeneratingVideo);

        studio.result.is_loading = true;
        assert_eq!(studio.view(), BannerView::Loading);
    }

    #[test]
    fn test_custom_text_add_remove() {
        let mut studio = studio(CannedBackend::default(), true);
        let id = studio.add_custom_text("Free gift").unwrap();
        assert_eq!(studio.texts().len(), 1);
        assert!(studio.remove_custom_text(id));
        assert!(studio.texts().is_empty());
    }
}

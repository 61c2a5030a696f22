//! GenAiClient - handles communication with the Generative Language API.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::io::AsyncWriteExt;

use super::backend::GenerationBackend;
use super::prompt::{banner_image_prompt, BACKGROUND_REMOVAL_INSTRUCTION, VIDEO_ANIMATION_PROMPT};
use super::wire::{
    Content, GenerateContentRequest, GenerateContentResponse, GenerationConfig, ImageInstance,
    ImageParameters, InlineData, InlineImage, OutputOptions, Part, PredictRequest,
    PredictResponse, VideoInstance, VideoParameters,
};
use super::{DataUri, GenAiError, KeySource, VideoOperation};

/// Default base URL for the Generative Language API.
pub const GENAI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model for banner backgrounds.
pub const DEFAULT_IMAGE_MODEL: &str = "imagen-4.0-generate-001";

/// Default model for logo background removal.
pub const DEFAULT_EDIT_MODEL: &str = "gemini-2.5-flash-image";

/// Default model for banner animation.
pub const DEFAULT_VIDEO_MODEL: &str = "veo-3.1-fast-generate-preview";

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Header carrying the API key.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Banner frame shape shared by image and video generation.
const BANNER_ASPECT_RATIO: &str = "3:4";

const BANNER_IMAGE_MIME: &str = "image/jpeg";
const VIDEO_RESOLUTION: &str = "720p";

/// Client for the image, image-edit and video generation endpoints.
pub struct GenAiClient {
    key_source: KeySource,
    base_url: String,
    image_model: String,
    edit_model: String,
    video_model: String,
    http_client: reqwest::Client,
}

impl GenAiClient {
    /// Create a client that reads the key from the `API_KEY` environment
    /// variable at every call.
    pub fn new() -> Result<Self, GenAiError> {
        Self::with_key_source(KeySource::default())
    }

    /// Create a client with an explicit API key.
    ///
    /// # Errors
    ///
    /// Returns `GenAiError::MissingApiKey` if the key is empty.
    pub fn with_api_key(api_key: String) -> Result<Self, GenAiError> {
        if api_key.is_empty() {
            return Err(GenAiError::MissingApiKey);
        }
        Self::with_key_source(KeySource::Fixed(api_key))
    }

    /// Create a client resolving its key from `key_source`.
    pub fn with_key_source(key_source: KeySource) -> Result<Self, GenAiError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            key_source,
            base_url: GENAI_API_BASE_URL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            edit_model: DEFAULT_EDIT_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
            http_client,
        })
    }

    /// Point the client at a different API root (useful for a mock server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = model.into();
        self
    }

    pub fn with_edit_model(mut self, model: impl Into<String>) -> Self {
        self.edit_model = model.into();
        self
    }

    pub fn with_video_model(mut self, model: impl Into<String>) -> Self {
        self.video_model = model.into();
        self
    }

    pub fn key_source(&self) -> &KeySource {
        &self.key_source
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn image_model(&self) -> &str {
        &self.image_model
    }

    pub fn edit_model(&self) -> &str {
        &self.edit_model
    }

    pub fn video_model(&self) -> &str {
        &self.video_model
    }

    fn model_url(&self, model: &str, method: &str) -> String {
        format!("{}/models/{}:{}", self.base_url, model, method)
    }

    /// Generate one 3:4 JPEG banner background for a festival.
    ///
    /// # Errors
    ///
    /// Returns `GenAiError::MissingApiKey` if no key is configured,
    /// `GenAiError::NoImageReturned` if the response carries no image bytes,
    /// or `GenAiError::ApiError` / `GenAiError::HttpError` if the call fails.
    pub async fn generate_banner_image(&self, festival_name: &str) -> Result<String, GenAiError> {
        let api_key = self.key_source.resolve()?;
        let url = self.model_url(&self.image_model, "predict");

        let request = PredictRequest {
            instances: vec![ImageInstance {
                prompt: banner_image_prompt(festival_name),
            }],
            parameters: ImageParameters {
                sample_count: 1,
                aspect_ratio: BANNER_ASPECT_RATIO,
                output_options: OutputOptions {
                    mime_type: BANNER_IMAGE_MIME,
                },
            },
        };

        log::info!("Requesting banner image for festival: {}", festival_name);
        let response: PredictResponse = self.post_json(&url, &api_key, &request).await?;

        let prediction = response
            .predictions
            .into_iter()
            .next()
            .ok_or(GenAiError::NoImageReturned)?;
        let bytes = prediction
            .bytes_base64_encoded
            .filter(|b| !b.is_empty())
            .ok_or(GenAiError::NoImageReturned)?;
        let mime_type = prediction
            .mime_type
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| BANNER_IMAGE_MIME.to_string());

        Ok(DataUri::format(&mime_type, &bytes))
    }

    /// Ask the image-edit model to make a logo's background transparent.
    ///
    /// # Errors
    ///
    /// Returns `GenAiError::InvalidDataUri` if `logo` is not an image
    /// `data:` URI, `GenAiError::NoInlineImage` if the model returns no image
    /// part, plus the usual key and transport errors.
    pub async fn remove_logo_background(&self, logo: &str) -> Result<String, GenAiError> {
        let api_key = self.key_source.resolve()?;
        let parsed = DataUri::parse(logo)?;
        let url = self.model_url(&self.edit_model, "generateContent");

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: parsed.mime_type.to_string(),
                            data: parsed.data.to_string(),
                        },
                    },
                    Part::Text {
                        text: BACKGROUND_REMOVAL_INSTRUCTION.to_string(),
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_modalities: vec!["IMAGE"],
            },
        };

        log::info!("Requesting logo background removal ({})", parsed.mime_type);
        let response: GenerateContentResponse = self.post_json(&url, &api_key, &request).await?;

        let image = response
            .first_inline_image()
            .filter(|image| !image.data.is_empty())
            .ok_or(GenAiError::NoInlineImage)?;

        Ok(DataUri::format("image/png", &image.data))
    }

    /// Submit a banner image for animation.
    ///
    /// Returns the operation handle; it is normally not done yet.
    pub async fn generate_banner_video(&self, image: &str) -> Result<VideoOperation, GenAiError> {
        let api_key = self.key_source.resolve()?;
        let parsed = DataUri::parse(image)?;
        let url = self.model_url(&self.video_model, "predictLongRunning");

        let request = PredictRequest {
            instances: vec![VideoInstance {
                prompt: VIDEO_ANIMATION_PROMPT,
                image: InlineImage {
                    bytes_base64_encoded: parsed.data.to_string(),
                    mime_type: parsed.mime_type.to_string(),
                },
            }],
            parameters: VideoParameters {
                sample_count: 1,
                resolution: VIDEO_RESOLUTION,
                aspect_ratio: BANNER_ASPECT_RATIO,
            },
        };

        log::info!("Submitting banner video generation");
        let operation: VideoOperation = self.post_json(&url, &api_key, &request).await?;
        log::info!("Video operation started: {}", operation.name);
        Ok(operation)
    }

    /// Re-query an operation's status once. Does not loop.
    pub async fn get_video_operation(
        &self,
        operation: &VideoOperation,
    ) -> Result<VideoOperation, GenAiError> {
        let api_key = self.key_source.resolve()?;
        let url = format!("{}/{}", self.base_url, operation.name.trim_start_matches('/'));

        let response = self
            .http_client
            .get(&url)
            .header(API_KEY_HEADER, &api_key)
            .send()
            .await?;

        let updated: VideoOperation = Self::read_json(response, "Status check").await?;
        log::debug!("Operation {} done={}", updated.name, updated.done);
        Ok(updated)
    }

    /// Download a finished video to disk.
    ///
    /// The API key is appended as a `key` query parameter. The body is
    /// streamed to `dest`; parent directories are created as needed.
    pub async fn download_video(&self, uri: &str, dest: &Path) -> Result<PathBuf, GenAiError> {
        let api_key = self.key_source.resolve()?;

        if let Some(parent) = dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let response = self
            .http_client
            .get(uri)
            .query(&[("key", api_key.as_str())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(GenAiError::ApiError {
                status: status.as_u16(),
                message: format!("Video download failed: {}", error_text),
            });
        }

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();

        use futures_util::StreamExt;
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            file.write_all(&chunk).await?;
        }

        file.flush().await?;
        log::info!("Video downloaded to: {}", dest.display());

        Ok(dest.to_path_buf())
    }

    async fn post_json<B, R>(&self, url: &str, api_key: &str, body: &B) -> Result<R, GenAiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .http_client
            .post(url)
            .header(API_KEY_HEADER, api_key)
            .json(body)
            .send()
            .await?;

        Self::read_json(response, "API request").await
    }

    async fn read_json<R: DeserializeOwned>(
        response: reqwest::Response,
        what: &str,
    ) -> Result<R, GenAiError> {
        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = extract_error_message(&error_text).unwrap_or(error_text);
            log::warn!("{} failed with status {}: {}", what, status, message);
            return Err(GenAiError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

/// Pull `error.message` out of a Google API error body.
fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

impl GenerationBackend for GenAiClient {
    async fn generate_banner_image(&self, festival_name: &str) -> Result<String, GenAiError> {
        GenAiClient::generate_banner_image(self, festival_name).await
    }

    async fn remove_logo_background(&self, logo: &str) -> Result<String, GenAiError> {
        GenAiClient::remove_logo_background(self, logo).await
    }

    async fn generate_banner_video(&self, image: &str) -> Result<VideoOperation, GenAiError> {
        GenAiClient::generate_banner_video(self, image).await
    }

    async fn get_video_operation(
        &self,
        operation: &VideoOperation,
    ) -> Result<VideoOperation, GenAiError> {
        GenAiClient::get_video_operation(self, operation).await
    }

    async fn download_video(&self, uri: &str, dest: &Path) -> Result<PathBuf, GenAiError> {
        GenAiClient::download_video(self, uri, dest).await
    }
}

//! Configuration file handling for festive-banner.
//!
//! Loads configuration from `~/.config/festive-banner/config.toml` or a custom path.

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::banner::{BannerConfig, BannerError, BannerField};
use crate::genai::{
    GenAiClient, GenAiError, KeySource, API_KEY_ENV, DEFAULT_EDIT_MODEL, DEFAULT_IMAGE_MODEL,
    DEFAULT_VIDEO_MODEL, GENAI_API_BASE_URL,
};
use crate::studio::{VideoSettings, DEFAULT_POLL_INTERVAL};

/// Allowed video status poll interval, in seconds.
pub const POLL_INTERVAL_SECS_RANGE: RangeInclusive<u64> = 1..=600;

/// Configuration file structure for festive-banner.
/// Loaded from ~/.config/festive-banner/config.toml (or custom path via --config).
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub banner: BannerDefaults,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub video: VideoConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Starting values for the banner form. Unset fields keep the built-in defaults.
#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct BannerDefaults {
    pub festival_name: Option<String>,
    pub offers: Option<String>,
    pub accent_color: Option<String>,
    pub shop_name: Option<String>,
    pub address: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub mobile_number: Option<String>,
    pub alt_mobile_number: Option<String>,
    pub instagram_handle: Option<String>,
    pub facebook_handle: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_edit_model")]
    pub edit_model: String,
    #[serde(default = "default_video_model")]
    pub video_model: String,
    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            image_model: default_image_model(),
            edit_model: default_edit_model(),
            video_model: default_video_model(),
            api_key_env: default_api_key_env(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct VideoConfig {
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Default, PartialEq)]
pub struct OutputConfig {
    /// Directory for downloaded videos. Defaults to a temp directory.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

fn default_base_url() -> String {
    GENAI_API_BASE_URL.to_string()
}

fn default_image_model() -> String {
    DEFAULT_IMAGE_MODEL.to_string()
}

fn default_edit_model() -> String {
    DEFAULT_EDIT_MODEL.to_string()
}

fn default_video_model() -> String {
    DEFAULT_VIDEO_MODEL.to_string()
}

fn default_api_key_env() -> String {
    API_KEY_ENV.to_string()
}

fn default_poll_interval_secs() -> u64 {
    DEFAULT_POLL_INTERVAL.as_secs()
}

impl Config {
    /// Load configuration from a file path.
    /// Returns default config if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = path.map(PathBuf::from).unwrap_or_else(default_path);

        if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::IoError {
                path: path.clone(),
                source: e,
            })?;
            let config: Config = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.clone(),
                source: e,
            })?;
            config
                .validate()
                .map_err(|message| ConfigError::InvalidValue {
                    path: path.clone(),
                    message,
                })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    fn validate(&self) -> Result<(), String> {
        let secs = self.video.poll_interval_secs;
        if !POLL_INTERVAL_SECS_RANGE.contains(&secs) {
            return Err(format!(
                "video.poll_interval_secs must be between {} and {} seconds, got {}",
                POLL_INTERVAL_SECS_RANGE.start(),
                POLL_INTERVAL_SECS_RANGE.end(),
                secs
            ));
        }
        Ok(())
    }

    /// Serialize as TOML, e.g. for `config init`.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::SerializeError)
    }

    /// Banner form state with the configured overrides applied.
    pub fn banner_config(&self) -> Result<BannerConfig, BannerError> {
        let mut config = BannerConfig::default();
        let b = &self.banner;
        let overrides = [
            b.festival_name.clone().map(BannerField::FestivalName),
            b.offers.clone().map(BannerField::Offers),
            b.accent_color.clone().map(BannerField::AccentColor),
            b.shop_name.clone().map(BannerField::ShopName),
            b.address.clone().map(BannerField::Address),
            b.email.clone().map(BannerField::Email),
            b.website.clone().map(BannerField::Website),
            b.mobile_number.clone().map(BannerField::MobileNumber),
            b.alt_mobile_number.clone().map(BannerField::AltMobileNumber),
            b.instagram_handle.clone().map(BannerField::InstagramHandle),
            b.facebook_handle.clone().map(BannerField::FacebookHandle),
        ];
        for field in overrides.into_iter().flatten() {
            config.apply(field)?;
        }
        Ok(config)
    }

    /// Client for the configured endpoint and models with its key from `keys`.
    pub fn client(&self, keys: KeySource) -> Result<GenAiClient, GenAiError> {
        Ok(GenAiClient::with_key_source(keys)?
            .with_base_url(&self.api.base_url)
            .with_image_model(&self.api.image_model)
            .with_edit_model(&self.api.edit_model)
            .with_video_model(&self.api.video_model))
    }

    pub fn video_settings(&self) -> VideoSettings {
        let mut settings = VideoSettings {
            poll_interval: Duration::from_secs(self.video.poll_interval_secs.clamp(
                *POLL_INTERVAL_SECS_RANGE.start(),
                *POLL_INTERVAL_SECS_RANGE.end(),
            )),
            ..VideoSettings::default()
        };
        if let Some(dir) = &self.output.dir {
            settings.output_dir = dir.clone();
        }
        settings
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug)]
pub enum ConfigError {
    IoError {
        path: PathBuf,
        source: std::io::Error,
    },
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    InvalidValue {
        path: PathBuf,
        message: String,
    },
    SerializeError(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError { path, source } => {
                write!(
                    f,
                    "Failed to read config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::ParseError { path, source } => {
                write!(
                    f,
                    "Failed to parse config file '{}': {}",
                    path.display(),
                    source
                )
            }
            ConfigError::InvalidValue { path, message } => {
                write!(f, "Invalid config file '{}': {}", path.display(), message)
            }
            ConfigError::SerializeError(source) => {
                write!(f, "Failed to serialize config: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError { source, .. } => Some(source),
            ConfigError::ParseError { source, .. } => Some(source),
            ConfigError::InvalidValue { .. } => None,
            ConfigError::SerializeError(source) => Some(source),
        }
    }
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("festive-banner").join("config.toml"))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config/festive-banner/config.toml")
        })
}

//! Long-running video generation operations.

use serde::{Deserialize, Serialize};

/// Handle for a remote video generation job.
///
/// Returned by the video endpoint and refreshed by polling the operation
/// status endpoint until `done` is set.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoOperation {
    /// Operation resource name, e.g. `models/veo/operations/abc123`.
    pub name: String,
    #[serde(default)]
    pub done: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response: Option<VideoResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,
}

/// Failure reported by the remote service for a finished operation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OperationError {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

/// Result payload of a finished operation.
///
/// The REST API nests samples under `generateVideoResponse`; the SDK-shaped
/// `generatedVideos` list is accepted too.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generate_video_response: Option<GenerateVideoResponse>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_videos: Option<Vec<GeneratedVideo>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateVideoResponse {
    #[serde(default)]
    pub generated_samples: Vec<GeneratedVideo>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct GeneratedVideo {
    #[serde(default)]
    pub video: Option<VideoFile>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VideoFile {
    #[serde(default)]
    pub uri: Option<String>,
}

impl VideoOperation {
    /// An operation that has not finished yet.
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// A finished operation with a downloadable video.
    pub fn completed(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            response: Some(VideoResponse {
                generate_video_response: Some(GenerateVideoResponse {
                    generated_samples: vec![GeneratedVideo {
                        video: Some(VideoFile {
                            uri: Some(uri.into()),
                        }),
                    }],
                }),
                generated_videos: None,
            }),
            error: None,
        }
    }

    /// A finished operation carrying an error.
    pub fn failed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            done: true,
            response: None,
            error: Some(OperationError {
                code: None,
                message: message.into(),
            }),
        }
    }

    /// URI of the first generated video, if any.
    pub fn download_uri(&self) -> Option<&str> {
        let response = self.response.as_ref()?;
        let samples = response
            .generate_video_response
            .as_ref()
            .map(|r| r.generated_samples.as_slice())
            .or(response.generated_videos.as_deref())?;

        samples
            .first()?
            .video
            .as_ref()?
            .uri
            .as_deref()
            .filter(|uri| !uri.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pending_operation() {
        let op: VideoOperation = serde_json::from_value(serde_json::json!({
            "name": "models/veo/operations/abc"
        }))
        .unwrap();
        assert!(!op.done);
        assert_eq!(op.download_uri(), None);
    }

    #[test]
    fn test_parse_rest_completed_operation() {
        let op: VideoOperation = serde_json::from_value(serde_json::json!({
            "name": "models/veo/operations/abc",
            "done": true,
            "response": {
                "@type": "type.googleapis.com/google.ai.generativelanguage.v1beta.PredictLongRunningResponse",
                "generateVideoResponse": {
                    "generatedSamples": [{"video": {"uri": "https://files.example/v.mp4?alt=media"}}]
                }
            }
        }))
        .unwrap();
        assert!(op.done);
        assert_eq!(op.download_uri(), Some("https://files.example/v.mp4?alt=media"));
    }

    #[test]
    fn test_parse_sdk_shaped_operation() {
        let op: VideoOperation = serde_json::from_value(serde_json::json!({
            "name": "op",
            "done": true,
            "response": {"generatedVideos": [{"video": {"uri": "https://x/v.mp4"}}]}
        }))
        .unwrap();
        assert_eq!(op.download_uri(), Some("https://x/v.mp4"));
    }

    #[test]
    fn test_parse_failed_operation() {
        let op: VideoOperation = serde_json::from_value(serde_json::json!({
            "name": "op",
            "done": true,
            "error": {"code": 404, "message": "Requested entity was not found."}
        }))
        .unwrap();
        let error = op.error.unwrap();
        assert_eq!(error.code, Some(404));
        assert_eq!(error.message, "Requested entity was not found.");
    }

    #[test]
    fn test_empty_uri_is_not_downloadable() {
        let op = VideoOperation::completed("op", "");
        assert_eq!(op.download_uri(), None);
    }

    #[test]
    fn test_constructors() {
        assert!(!VideoOperation::pending("a").done);
        assert_eq!(VideoOperation::completed("a", "u").download_uri(), Some("u"));
        assert!(VideoOperation::failed("a", "boom").error.is_some());
    }
}

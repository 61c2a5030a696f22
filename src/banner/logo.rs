//! Logo file loading into `data:` URIs.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::BannerError;

/// Guess an image MIME type from a file extension.
///
/// Returns `None` for anything that is not a recognised image type.
pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "bmp" => Some("image/bmp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Read an image file and encode it as a `data:` URI.
///
/// Non-image files are skipped with `Ok(None)`.
pub fn load_logo(path: &Path) -> Result<Option<String>, BannerError> {
    let Some(mime) = mime_type_for_path(path) else {
        log::warn!("Ignoring non-image logo file: {}", path.display());
        return Ok(None);
    };

    let bytes = std::fs::read(path).map_err(|e| BannerError::LogoRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    Ok(Some(format!("data:{};base64,{}", mime, STANDARD.encode(bytes))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_type_for_path() {
        assert_eq!(mime_type_for_path(Path::new("logo.PNG")), Some("image/png"));
        assert_eq!(mime_type_for_path(Path::new("a/b.jpeg")), Some("image/jpeg"));
        assert_eq!(mime_type_for_path(Path::new("notes.txt")), None);
        assert_eq!(mime_type_for_path(Path::new("noext")), None);
    }

    #[test]
    fn test_load_logo_encodes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logo.png");
        std::fs::write(&path, b"abc").unwrap();

        let uri = load_logo(&path).unwrap().unwrap();
        assert_eq!(uri, "data:image/png;base64,YWJj");
    }

    #[test]
    fn test_load_logo_skips_non_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("readme.txt");
        std::fs::write(&path, b"hello").unwrap();

        assert_eq!(load_logo(&path).unwrap(), None);
    }

    #[test]
    fn test_load_logo_missing_file_errors() {
        let result = load_logo(Path::new("/definitely/not/here.png"));
        assert!(matches!(result, Err(BannerError::LogoRead { .. })));
    }
}

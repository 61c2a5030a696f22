//! Parsing of base64 image `data:` URIs.

use std::sync::OnceLock;

use regex::Regex;

use super::GenAiError;

fn data_uri_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^data:(image/[a-z]+);base64,(.*)$").expect("data URI pattern is valid")
    })
}

/// A parsed image `data:` URI.
#[derive(Debug, Clone, PartialEq)]
pub struct DataUri<'a> {
    pub mime_type: &'a str,
    /// Base64 payload, not decoded.
    pub data: &'a str,
}

impl<'a> DataUri<'a> {
    /// Split `data:image/<type>;base64,<payload>` into MIME type and payload.
    pub fn parse(uri: &'a str) -> Result<Self, GenAiError> {
        let captures = data_uri_pattern()
            .captures(uri)
            .ok_or(GenAiError::InvalidDataUri)?;
        match (captures.get(1), captures.get(2)) {
            (Some(mime), Some(data)) => Ok(Self {
                mime_type: mime.as_str(),
                data: data.as_str(),
            }),
            _ => Err(GenAiError::InvalidDataUri),
        }
    }

    /// Build a `data:` URI string from parts.
    pub fn format(mime_type: &str, data: &str) -> String {
        format!("data:{};base64,{}", mime_type, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_jpeg() {
        let uri = DataUri::parse("data:image/jpeg;base64,/9j/4AAQ").unwrap();
        assert_eq!(uri.mime_type, "image/jpeg");
        assert_eq!(uri.data, "/9j/4AAQ");
    }

    #[test]
    fn test_parse_rejects_non_image() {
        assert!(matches!(
            DataUri::parse("data:text/plain;base64,aGk="),
            Err(GenAiError::InvalidDataUri)
        ));
    }

    #[test]
    fn test_parse_rejects_non_base64() {
        assert!(DataUri::parse("data:image/png,raw").is_err());
        assert!(DataUri::parse("https://example.com/a.png").is_err());
    }

    #[test]
    fn test_parse_rejects_compound_subtype() {
        // Subtypes with symbols (svg+xml) do not match the pattern.
        assert!(DataUri::parse("data:image/svg+xml;base64,PHN2Zz4=").is_err());
    }

    #[test]
    fn test_format() {
        assert_eq!(DataUri::format("image/png", "AAA"), "data:image/png;base64,AAA");
    }
}

use crate::error::ConvertError;
use std::fmt;
use std::str::FromStr;

/// How the source bytes handed to `convert` are encoded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// UTF-8 text, e.g. Markdown
    PlainText,
    /// UTF-8 JSON, e.g. a serialized document AST
    Json,
    /// Binary input such as docx, sent base64-encoded
    OctetStream,
}

impl ContentType {
    pub const ALL: &'static [ContentType] = &[
        ContentType::PlainText,
        ContentType::Json,
        ContentType::OctetStream,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::PlainText => "text/plain",
            ContentType::Json => "application/json",
            ContentType::OctetStream => "application/octet-stream",
        }
    }

    /// Whether the source must be base64-encoded before it is sent
    pub fn is_binary(&self) -> bool {
        matches!(self, ContentType::OctetStream)
    }
}

impl FromStr for ContentType {
    type Err = ConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text/plain" => Ok(ContentType::PlainText),
            "application/json" => Ok(ContentType::Json),
            "application/octet-stream" => Ok(ContentType::OctetStream),
            other => Err(ConvertError::UnsupportedContentType(other.to_string())),
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::QrCraftError;

/// Semantic category of a record's content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Url,
    Text,
    Email,
    Phone,
}

impl ContentKind {
    pub const ALL: [ContentKind; 4] = [
        ContentKind::Url,
        ContentKind::Text,
        ContentKind::Email,
        ContentKind::Phone,
    ];

    /// Classify decoded text by its scheme marker. Total: every input maps
    /// to exactly one kind.
    pub fn classify(content: &str) -> Self {
        if content.starts_with("http://") || content.starts_with("https://") {
            ContentKind::Url
        } else if content.starts_with("mailto:") {
            ContentKind::Email
        } else if content.starts_with("tel:") {
            ContentKind::Phone
        } else {
            ContentKind::Text
        }
    }

    /// Turn raw user input into the final encoded payload for this kind.
    /// Email and phone content gains its scheme prefix unless already there.
    pub fn normalize(&self, raw: &str) -> String {
        match self {
            ContentKind::Email if !raw.starts_with("mailto:") => format!("mailto:{}", raw),
            ContentKind::Phone if !raw.starts_with("tel:") => format!("tel:{}", raw),
            _ => raw.to_string(),
        }
    }

    /// Strip the scheme prefix back off for display.
    pub fn display_content<'a>(&self, content: &'a str) -> &'a str {
        match self {
            ContentKind::Email => content.strip_prefix("mailto:").unwrap_or(content),
            ContentKind::Phone => content.strip_prefix("tel:").unwrap_or(content),
            _ => content,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContentKind::Url => "url",
            ContentKind::Text => "text",
            ContentKind::Email => "email",
            ContentKind::Phone => "phone",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for ContentKind {
    type Err = QrCraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "url" => Ok(ContentKind::Url),
            "text" => Ok(ContentKind::Text),
            "email" => Ok(ContentKind::Email),
            "phone" => Ok(ContentKind::Phone),
            other => Err(QrCraftError::Api(format!(
                "Unknown content kind '{}' (expected url, text, email or phone)",
                other
            ))),
        }
    }
}

/// Named rendering variant. Each style is a fixed foreground/background
/// color pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QrStyle {
    #[serde(rename = "default")]
    Classic,
    Rounded,
    Dots,
    Elegant,
}

impl QrStyle {
    /// (dark, light) RGB pair used when rendering.
    pub fn palette(&self) -> ([u8; 3], [u8; 3]) {
        match self {
            QrStyle::Classic => ([0x00, 0x00, 0x00], [0xFF, 0xFF, 0xFF]),
            QrStyle::Rounded => ([0x05, 0x96, 0x69], [0xF0, 0xFD, 0xF4]),
            QrStyle::Dots => ([0x08, 0x91, 0xB2], [0xF0, 0xF9, 0xFF]),
            QrStyle::Elegant => ([0x7C, 0x3A, 0xED], [0xFA, 0xF5, 0xFF]),
        }
    }
}

impl fmt::Display for QrStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QrStyle::Classic => "default",
            QrStyle::Rounded => "rounded",
            QrStyle::Dots => "dots",
            QrStyle::Elegant => "elegant",
        };
        write!(f, "{}", label)
    }
}

impl FromStr for QrStyle {
    type Err = QrCraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "default" | "classic" => Ok(QrStyle::Classic),
            "rounded" => Ok(QrStyle::Rounded),
            "dots" => Ok(QrStyle::Dots),
            "elegant" => Ok(QrStyle::Elegant),
            other => Err(QrCraftError::Api(format!(
                "Unknown style '{}' (expected default, rounded, dots or elegant)",
                other
            ))),
        }
    }
}

/// Everything the caller supplies when creating a code. The store fills in
/// id, timestamp and the download counter.
#[derive(Debug, Clone)]
pub struct CodeDraft {
    pub name: String,
    pub content: String,
    pub kind: ContentKind,
    pub style: QrStyle,
}

impl CodeDraft {
    pub fn new(name: String, raw_content: String, kind: ContentKind, style: QrStyle) -> Self {
        let content = kind.normalize(&raw_content);
        Self {
            name,
            content,
            kind,
            style,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QrRecord {
    pub id: Uuid,
    pub name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub style: QrStyle,
    pub created_at: DateTime<Utc>,
    pub download_count: u32,
}

impl QrRecord {
    pub fn new(draft: CodeDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: draft.name,
            content: draft.content,
            kind: draft.kind,
            style: draft.style,
            created_at: Utc::now(),
            download_count: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanRecord {
    pub content: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub scanned_at: DateTime<Utc>,
}

impl ScanRecord {
    pub fn new(content: String, kind: ContentKind) -> Self {
        Self {
            content,
            kind,
            scanned_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_by_scheme_marker() {
        assert_eq!(ContentKind::classify("https://a.b"), ContentKind::Url);
        assert_eq!(ContentKind::classify("http://a.b"), ContentKind::Url);
        assert_eq!(ContentKind::classify("mailto:a@b.c"), ContentKind::Email);
        assert_eq!(ContentKind::classify("tel:+1234567"), ContentKind::Phone);
        assert_eq!(ContentKind::classify("hello"), ContentKind::Text);
    }

    #[test]
    fn normalize_prefixes_email_and_phone() {
        assert_eq!(ContentKind::Email.normalize("a@b.c"), "mailto:a@b.c");
        assert_eq!(ContentKind::Phone.normalize("+1234567"), "tel:+1234567");
        assert_eq!(ContentKind::Url.normalize("https://a.b"), "https://a.b");
        assert_eq!(ContentKind::Text.normalize("hello"), "hello");
    }

    #[test]
    fn normalize_does_not_double_prefix() {
        assert_eq!(ContentKind::Email.normalize("mailto:a@b.c"), "mailto:a@b.c");
        assert_eq!(ContentKind::Phone.normalize("tel:+1"), "tel:+1");
    }

    #[test]
    fn display_content_strips_prefix() {
        assert_eq!(ContentKind::Email.display_content("mailto:a@b.c"), "a@b.c");
        assert_eq!(ContentKind::Phone.display_content("tel:+1234567"), "+1234567");
        assert_eq!(
            ContentKind::Url.display_content("https://a.b"),
            "https://a.b"
        );
    }

    #[test]
    fn style_parses_both_spellings() {
        assert_eq!("default".parse::<QrStyle>().unwrap(), QrStyle::Classic);
        assert_eq!("classic".parse::<QrStyle>().unwrap(), QrStyle::Classic);
        assert_eq!("elegant".parse::<QrStyle>().unwrap(), QrStyle::Elegant);
        assert!("fancy".parse::<QrStyle>().is_err());
    }

    #[test]
    fn record_serializes_with_wire_field_names() {
        let record = QrRecord::new(CodeDraft::new(
            "Site".into(),
            "https://example.com".into(),
            ContentKind::Url,
            QrStyle::Classic,
        ));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"type\":\"url\""));
        assert!(json.contains("\"style\":\"default\""));
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"downloadCount\":0"));
    }

    #[test]
    fn new_record_starts_at_zero_downloads() {
        let record = QrRecord::new(CodeDraft::new(
            "X".into(),
            "a@b.c".into(),
            ContentKind::Email,
            QrStyle::Dots,
        ));
        assert_eq!(record.download_count, 0);
        assert_eq!(record.content, "mailto:a@b.c");
    }
}

// ABOUTME: Per-call configuration for distillation: ContentType, Options and OptionsBuilder.
// ABOUTME: Options deserialize from JSON with defaults, and unknown keys are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DistillError;

/// The content type format for rendered output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    Html,
    #[serde(alias = "md")]
    Markdown,
    #[serde(alias = "txt")]
    Text,
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ContentType::Html => "html",
            ContentType::Markdown => "markdown",
            ContentType::Text => "text",
        };
        write!(f, "{}", s)
    }
}

impl From<&str> for ContentType {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => ContentType::Markdown,
            "text" | "txt" => ContentType::Text,
            _ => ContentType::Html,
        }
    }
}

/// Options controlling a single distillation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Run the cleaner over the selected content.
    pub clean: bool,
    /// Keep images (and nodes holding them) that the cleaner would drop as empty.
    pub images: bool,
    pub content_type: ContentType,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            clean: true,
            images: false,
            content_type: ContentType::Html,
        }
    }
}

impl Options {
    pub fn builder() -> OptionsBuilder {
        OptionsBuilder::new()
    }

    /// Parse options from a JSON object. Missing keys take their defaults.
    pub fn from_json(json: &str) -> Result<Self, DistillError> {
        serde_json::from_str(json).map_err(|e| DistillError::options("parse options", Some(e.into())))
    }
}

/// Builder for constructing Options with custom settings.
#[derive(Debug, Clone)]
pub struct OptionsBuilder {
    opts: Options,
}

impl OptionsBuilder {
    /// Create a new OptionsBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
        }
    }

    /// Enable or disable the cleaning stage.
    pub fn clean(mut self, clean: bool) -> Self {
        self.opts.clean = clean;
        self
    }

    /// Keep image-bearing nodes during cleaning.
    pub fn images(mut self, images: bool) -> Self {
        self.opts.images = images;
        self
    }

    /// Set the content type for rendered output.
    pub fn content_type(mut self, content_type: ContentType) -> Self {
        self.opts.content_type = content_type;
        self
    }

    pub fn build(self) -> Options {
        self.opts
    }
}

impl Default for OptionsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_clean_without_images() {
        let opts = Options::default();
        assert!(opts.clean);
        assert!(!opts.images);
        assert_eq!(opts.content_type, ContentType::Html);
    }

    #[test]
    fn builder_overrides_defaults() {
        let opts = Options::builder()
            .clean(false)
            .images(true)
            .content_type(ContentType::Text)
            .build();
        assert_eq!(
            opts,
            Options {
                clean: false,
                images: true,
                content_type: ContentType::Text,
            }
        );
    }

    #[test]
    fn from_json_fills_missing_keys_and_ignores_unknown_ones() {
        let opts = Options::from_json(r#"{"images": true, "debug": true, "threshold": 100}"#)
            .unwrap();
        assert_eq!(
            opts,
            Options {
                clean: true,
                images: true,
                content_type: ContentType::Html,
            }
        );
    }

    #[test]
    fn from_json_accepts_content_type_aliases() {
        let opts = Options::from_json(r#"{"content_type": "md"}"#).unwrap();
        assert_eq!(opts.content_type, ContentType::Markdown);
    }

    #[test]
    fn from_json_rejects_malformed_input() {
        let err = Options::from_json("{clean: nope").unwrap_err();
        assert!(err.is_options());
    }

    #[test]
    fn content_type_from_str_is_lenient() {
        assert_eq!(ContentType::from("MD"), ContentType::Markdown);
        assert_eq!(ContentType::from("txt"), ContentType::Text);
        assert_eq!(ContentType::from("anything"), ContentType::Html);
        assert_eq!(ContentType::Markdown.to_string(), "markdown");
    }
}

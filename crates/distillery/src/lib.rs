// ABOUTME: Main library entry point for the Distillery content extractor.
// ABOUTME: Re-exports the public API: Document, Options, DistillResult, DistillError, Resource and the DOM seam.

//! Distillery - heuristic extraction of the main content from an HTML page.
//!
//! A document is pruned of boilerplate, every paragraph-like element is
//! scored by its text, the best scoring element and its related siblings
//! are kept, and the kept subtree is cleaned and rendered as HTML,
//! Markdown or plain text.
//!
//! # Example
//!
//! ```
//! use distillery::{distill, ContentType, Options};
//!
//! let html = r#"<div><div class="story">one, two, three, four, five, six</div></div>"#;
//! let options = Options::builder().content_type(ContentType::Text).build();
//! let text = distill(html, &options).unwrap();
//! assert_eq!(text, "one, two, three, four, five, six");
//! ```

pub mod constants;
pub mod document;
pub mod dom;
pub mod error;
pub mod formats;
pub mod options;
pub mod resource;
pub mod result;

pub use crate::document::Document;
pub use crate::dom::{DomTree, ScraperTree};
pub use crate::error::{DistillError, ErrorCode};
pub use crate::options::{ContentType, Options, OptionsBuilder};
pub use crate::resource::Resource;
pub use crate::result::DistillResult;

/// Extract the main content of `html` in one call.
pub fn distill(html: &str, options: &Options) -> Result<String, DistillError> {
    Document::new(html).distill(options)
}

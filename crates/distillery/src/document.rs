// ABOUTME: Document orchestrator that runs preprocess, score, select and clean in order.
// ABOUTME: Renders the selected roots as HTML, Markdown or text according to Options.

use tracing::debug;

use crate::constants::IRRELEVANT_TAGS;
use crate::dom::cleaners::clean;
use crate::dom::preprocess::{remove_irrelevant, remove_unlikely};
use crate::dom::scoring::score_content;
use crate::dom::select::{select, Selection};
use crate::dom::{DomTree, ScraperTree};
use crate::error::DistillError;
use crate::formats::{extract_excerpt, extract_title, html_to_markdown, html_to_text};
use crate::options::{ContentType, Options};
use crate::resource::Resource;
use crate::result::{word_count, DistillResult};

/// An HTML document awaiting distillation.
///
/// Distilling consumes the document: the pipeline prunes the tree in place.
#[derive(Debug, Clone)]
pub struct Document<T: DomTree = ScraperTree> {
    tree: T,
    title: Option<String>,
}

impl Document<ScraperTree> {
    /// Parse an HTML document. Malformed markup is repaired, never rejected.
    pub fn new(html: &str) -> Self {
        Self::from_tree(ScraperTree::parse(html))
    }

    pub fn from_resource(resource: &Resource) -> Self {
        Self::new(resource.text())
    }
}

impl<T: DomTree> Document<T> {
    /// Wrap an already parsed tree.
    pub fn from_tree(tree: T) -> Self {
        let title = extract_title(&tree);
        Self { tree, title }
    }

    /// The document title, captured before `head` is stripped.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Run the pipeline and render the main content.
    pub fn distill(self, options: &Options) -> Result<String, DistillError> {
        self.extract(options).map(|result| result.content)
    }

    /// Run the pipeline and report the content with details of the selection.
    pub fn extract(mut self, options: &Options) -> Result<DistillResult, DistillError> {
        let selection = self.run(options);
        let html = self.inner_html(&selection.roots);
        let content = render(&html, options.content_type)?;

        Ok(DistillResult {
            title: self.title.take().unwrap_or_default(),
            excerpt: extract_excerpt(&html),
            word_count: word_count(&html_to_text(&html)),
            content,
            content_type: options.content_type,
            top_candidate: self.tree.path(selection.winner.node),
            top_score: selection.winner.score,
            selected: selection.roots.len(),
        })
    }

    fn run(&mut self, options: &Options) -> Selection<T::Handle> {
        remove_irrelevant(&mut self.tree, IRRELEVANT_TAGS);
        remove_unlikely(&mut self.tree);

        let mut scores = score_content(&self.tree);
        let selection = select(&self.tree, &mut scores);

        if options.clean {
            clean(&mut self.tree, &selection.roots, options.images);
        } else {
            debug!("cleaning disabled");
        }
        selection
    }

    fn inner_html(&self, roots: &[T::Handle]) -> String {
        roots
            .iter()
            .map(|&root| self.tree.inner_html(root))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn render(html: &str, content_type: ContentType) -> Result<String, DistillError> {
    match content_type {
        ContentType::Html => Ok(html.to_string()),
        ContentType::Markdown => html_to_markdown(html),
        ContentType::Text => Ok(html_to_text(html)),
    }
}

// ABOUTME: Heuristic tables shared by the preprocessing, scoring, selection and cleaning stages.
// ABOUTME: Tag sets, identifier regexes and tuning ratios live here so they can be tuned in one place.

use once_cell::sync::Lazy;
use regex::Regex;

/// Tags stripped from the whole document before anything else runs.
pub const IRRELEVANT_TAGS: &[&str] = &["head", "script", "link", "meta", "style", "noscript"];

/// Tags never removed by the unlikely-identifier rule.
pub const REMOVAL_WHITELIST: &[&str] = &["a", "body"];

/// Paragraph-like leaf tags that are always scorable.
pub const PARAGRAPH_TAGS: &[&str] = &["p", "pre"];

/// Container tags that become scorable when they look like a content block.
pub const CONTAINER_TAGS: &[&str] = &["div", "article", "section"];

/// Children with these tags mean a container is structural rather than a text block.
pub const BLOCK_ELEMENTS: &[&str] = &[
    "a",
    "blockquote",
    "dl",
    "div",
    "img",
    "ol",
    "p",
    "pre",
    "table",
    "ul",
];

/// Tags the cleaner drops from the selection outright.
pub const UNRELATED_TAGS: &[&str] = &["iframe", "form", "object"];

/// Tags the content-likelihood predicate is allowed to remove.
pub const CONDITIONAL_TAGS: &[&str] = &["table", "ul", "div"];

/// Elements whose class or id match are removed before scoring.
pub static UNLIKELY_IDENTIFIERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)combx|comment|community|disqus|extra|foot|header|menu|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|nav|widget").unwrap()
});

pub static POSITIVE_IDENTIFIERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)article|body|content|entry|hentry|page|pagination|post|text").unwrap()
});

pub static NEGATIVE_IDENTIFIERS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)combx|comment|contact|foot|footer|footnote|link|media|meta|promo|related|scroll|shoutbox|sponsor|tags|widget").unwrap()
});

/// Upper bound on the length bonus, in 100-character buckets.
pub const MAX_LENGTH_BUCKETS: usize = 3;

/// Characters per length bucket.
pub const LENGTH_BUCKET_CHARS: usize = 100;

/// Share of the winner's score a sibling must exceed to be merged.
pub const RELATED_SIBLING_RATIO: f64 = 0.25;

/// Share of the winner's score an identically styled sibling must exceed.
pub const SAME_STYLE_SIBLING_RATIO: f64 = 0.027;

/// Weight contributed by a positive or negative identifier match.
pub const IDENTIFIER_WEIGHT: i32 = 25;

/// Elements with at least this many commas are never conditionally removed.
pub const MIN_CONTENT_COMMAS: usize = 2;

/// Non-anchor elements whose untrimmed text is shorter than this are treated
/// as fragments.
pub const MIN_CONTENT_CHARS: usize = 15;

/// Link density above which low-weight elements are dropped.
pub const LINK_DENSITY_LIMIT: f64 = 0.2;

/// Link density above which even positively weighted elements are dropped.
pub const WEIGHTED_LINK_DENSITY_LIMIT: f64 = 0.5;

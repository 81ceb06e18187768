//! HTML to markdown conversion with `wcag://` link rewriting.
//!
//! Conversion is delegated to [`htmd`]; the pass afterwards rewrites
//! markdown link targets that point back into the corpus so that every
//! internal reference stays addressable. Targets it cannot place are left
//! untouched.

use std::sync::LazyLock;

use htmd::{
    options::{BulletListMarker, CodeBlockFence, CodeBlockStyle, HeadingStyle, Options},
    HtmlToMarkdown,
};
use regex::{Captures, Regex};

use crate::domain::DocumentKind;

/// Markdown link targets. Targets with whitespace or nested parentheses
/// are not corpus-relative paths and can be skipped outright.
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\]\(([^()\s]+)\)").expect("this must never fail"));

/// The underlying markdown conversion failed.
#[derive(Debug, thiserror::Error)]
#[error("markdown conversion failed: {0}")]
pub struct ConvertError(String);

/// Converts corpus HTML to markdown, rewriting internal links to
/// `wcag://` addresses.
///
/// `kind` is the kind of the document being converted; it decides how
/// bare sibling references like `name.html` are rewritten.
///
/// # Errors
///
/// Returns [`ConvertError`] if the HTML cannot be converted.
pub fn to_markdown(kind: DocumentKind, html: &str) -> Result<String, ConvertError> {
    let converter = HtmlToMarkdown::builder()
        .options(Options {
            heading_style: HeadingStyle::Atx,
            code_block_style: CodeBlockStyle::Fenced,
            code_block_fence: CodeBlockFence::Backticks,
            bullet_list_marker: BulletListMarker::Dash,
            ..Options::default()
        })
        .skip_tags(vec!["script", "style", "head", "nav"])
        .build();
    let markdown = converter
        .convert(html)
        .map_err(|error| ConvertError(error.to_string()))?;
    Ok(rewrite_links(kind, &markdown))
}

fn rewrite_links(kind: DocumentKind, markdown: &str) -> String {
    LINK.replace_all(markdown, |captures: &Captures| {
        let target = &captures[1];
        rewrite_target(kind, target)
            .map_or_else(|| captures[0].to_string(), |address| format!("]({address})"))
    })
    .into_owned()
}

/// Rewrites a single link target to a `wcag://` address, or returns
/// `None` to leave it as-is.
fn rewrite_target(kind: DocumentKind, target: &str) -> Option<String> {
    if target.contains("://") || target.starts_with('#') || target.starts_with("mailto:") {
        return None;
    }
    // Fragments and query strings do not survive the rewrite.
    let path = target.split(['#', '?']).next().unwrap_or(target);
    let segments: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty() && *segment != "." && *segment != "..")
        .collect();

    if let Some(i) = segments.iter().position(|s| *s == "techniques") {
        // techniques/<technology>/<file>.html
        if segments.len() == i + 3 {
            return Some(format!("wcag://technique/{}", stem(segments[i + 2])));
        }
        return None;
    }
    if let Some(i) = segments.iter().position(|s| *s == "understanding") {
        // understanding/<file>.html or understanding/<version>/<file>.html
        if segments.len() == i + 2 || segments.len() == i + 3 {
            let file = segments.last().expect("this must never fail");
            return Some(format!("wcag://understanding/{}", stem(file)));
        }
        return None;
    }
    if let Some(i) = segments.iter().position(|s| *s == "guidelines") {
        // guidelines/sc/<version>/<file>.html
        if segments.get(i + 1) == Some(&"sc") && segments.len() == i + 4 {
            return Some(format!("wcag://criterion/{}", stem(segments[i + 3])));
        }
        // guidelines/index.html
        if segments.get(i + 1) == Some(&"index.html") && segments.len() == i + 2 {
            return Some("wcag://guidelines".to_string());
        }
        return None;
    }

    // A bare `name.html` refers to a sibling, so it stays within the kind
    // of the current document.
    if !path.contains('/') {
        if let Some(name) = path.strip_suffix(".html").filter(|name| !name.is_empty()) {
            let shape = match kind {
                DocumentKind::Criterion => "criterion",
                DocumentKind::Understanding => "understanding",
                DocumentKind::Technique => "technique",
                DocumentKind::Outline => return None,
            };
            return Some(format!("wcag://{shape}/{name}"));
        }
    }
    None
}

fn stem(file: &str) -> &str {
    file.strip_suffix(".html").unwrap_or(file)
}

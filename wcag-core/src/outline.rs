//! Structural extraction of the guidelines outline.
//!
//! Turns the guidelines index HTML into a typed hierarchy of principles,
//! guidelines and criterion references, then renders that hierarchy as a
//! markdown outline with stable 1-based numbering. Numbers are assigned by
//! document position, never parsed out of headings, so a skipped node can
//! never leave a gap.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static PRINCIPLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section.principle").expect("this must never fail"));

static GUIDELINE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section.guideline").expect("this must never fail"));

static CRITERION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("section.sc, [data-include]").expect("this must never fail"));

static HEADING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").expect("this must never fail"));

static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("this must never fail"));

/// A top-level principle and the guidelines beneath it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principle {
    /// Heading text, with whitespace normalized.
    pub title: String,
    /// Introductory paragraph, if the principle has one.
    pub description: Option<String>,
    /// Guidelines in document order.
    pub guidelines: Vec<Guideline>,
}

/// A guideline and the success criteria it groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Guideline {
    /// Heading text, with whitespace normalized.
    pub title: String,
    /// Introductory paragraph, if the guideline has one.
    pub description: Option<String>,
    /// Criterion references in document order.
    pub criteria: Vec<CriterionRef>,
}

/// A reference to a success criterion found in the outline.
///
/// Carries only the identifier and whatever title text was inline; the
/// renderer fills missing titles from elsewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CriterionRef {
    /// The criterion slug.
    pub id: String,
    /// Inline heading text, when the outline embeds the criterion body.
    pub title: Option<String>,
}

/// Extracts the principle hierarchy from guidelines index HTML.
///
/// Nodes that carry neither an `id` nor a usable `data-include` are skipped
/// without consuming a number.
#[must_use]
pub fn extract(html: &str) -> Vec<Principle> {
    let document = Html::parse_document(html);
    document
        .select(&PRINCIPLE)
        .map(|principle| Principle {
            title: direct_heading(principle).unwrap_or_default(),
            description: direct_paragraph(principle),
            guidelines: principle
                .select(&GUIDELINE)
                .map(|guideline| Guideline {
                    title: direct_heading(guideline).unwrap_or_default(),
                    description: direct_paragraph(guideline),
                    criteria: criteria_of(guideline),
                })
                .collect(),
        })
        .collect()
}

fn criteria_of(guideline: ElementRef) -> Vec<CriterionRef> {
    guideline
        .select(&CRITERION)
        .filter_map(|criterion| {
            let Some(id) = criterion_id(criterion) else {
                tracing::debug!("Skipping outline node with no usable identifier");
                return None;
            };
            let title = direct_heading(criterion).filter(|text| !text.is_empty());
            Some(CriterionRef { id, title })
        })
        .collect()
}

/// The identifier of a criterion node: its `id` attribute, or failing that
/// the stem of its `data-include` path.
fn criterion_id(element: ElementRef) -> Option<String> {
    if let Some(id) = element.value().id() {
        if !id.is_empty() {
            return Some(id.to_string());
        }
    }
    element
        .value()
        .attr("data-include")
        .and_then(include_stem)
        .map(str::to_string)
}

/// The final path segment of an include path, with its last extension
/// removed. Returns `None` when nothing usable remains.
fn include_stem(path: &str) -> Option<&str> {
    let file = path.rsplit('/').next()?;
    let stem = file.rsplit_once('.').map_or(file, |(stem, _)| stem);
    (!stem.is_empty()).then_some(stem)
}

/// Text of the first heading that is a direct child of `element`.
///
/// Descendant headings belong to nested sections and must not leak upward,
/// so this walks children only.
fn direct_heading(element: ElementRef) -> Option<String> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| HEADING.matches(child))
        .map(normalized_text)
}

fn direct_paragraph(element: ElementRef) -> Option<String> {
    element
        .children()
        .filter_map(ElementRef::wrap)
        .find(|child| PARAGRAPH.matches(child))
        .map(normalized_text)
        .filter(|text| !text.is_empty())
}

/// Concatenated text of an element with runs of whitespace collapsed to
/// single spaces.
pub(crate) fn normalized_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text of the first non-empty heading anywhere in the document.
#[must_use]
pub fn first_heading_text(html: &str) -> Option<String> {
    first_heading_of(&Html::parse_document(html))
}

pub(crate) fn first_heading_of(document: &Html) -> Option<String> {
    document
        .select(&HEADING)
        .map(normalized_text)
        .find(|text| !text.is_empty())
}

/// Renders the extracted hierarchy as a markdown outline.
///
/// `criterion_title` supplies the display title for each criterion
/// reference; when it returns an empty string the link label degrades to
/// the number alone. An empty hierarchy renders as a one-line diagnostic
/// rather than an empty document.
pub fn render(
    principles: &[Principle],
    mut criterion_title: impl FnMut(&CriterionRef) -> String,
) -> String {
    if principles.is_empty() {
        return "No principles could be extracted from the guidelines document.\n".to_string();
    }

    let mut blocks = vec!["# WCAG Guidelines".to_string()];
    for (p, principle) in numbered(principles) {
        blocks.push(format!("## {p}. {}", principle.title).trim_end().to_string());
        if let Some(description) = &principle.description {
            blocks.push(description.clone());
        }
        for (g, guideline) in numbered(&principle.guidelines) {
            blocks.push(format!("### {p}.{g} {}", guideline.title).trim_end().to_string());
            if let Some(description) = &guideline.description {
                blocks.push(description.clone());
            }
            let criteria = guideline
                .criteria
                .iter()
                .zip(1..)
                .map(|(criterion, c)| {
                    let title = criterion_title(criterion);
                    let label = if title.is_empty() {
                        format!("{p}.{g}.{c}")
                    } else {
                        format!("{p}.{g}.{c} {title}")
                    };
                    format!("- [{label}](wcag://criterion/{})", criterion.id)
                })
                .collect::<Vec<_>>();
            if !criteria.is_empty() {
                blocks.push(criteria.join("\n"));
            }
        }
    }
    blocks.join("\n\n") + "\n"
}

fn numbered<T>(items: &[T]) -> impl Iterator<Item = (usize, &T)> {
    items.iter().enumerate().map(|(index, item)| (index + 1, item))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_PRINCIPLES: &str = r#"
        <html><body>
        <section class="principle">
            <h2>Perceivable</h2>
            <p>Information must be presentable in ways users can perceive.</p>
            <section class="guideline">
                <h3>Text Alternatives</h3>
                <p>Provide text alternatives   for non-text content.</p>
                <section class="sc" id="non-text-content">
                    <h4>Non-text Content</h4>
                </section>
            </section>
            <section class="guideline">
                <h3>Time-based Media</h3>
                <div data-include="../sc/20/audio-only-and-video-only-prerecorded.html"></div>
            </section>
        </section>
        <section class="principle">
            <h2>Operable</h2>
            <section class="guideline">
                <h3>Keyboard Accessible</h3>
                <section class="sc" id="keyboard"></section>
            </section>
        </section>
        </body></html>
    "#;

    #[test]
    fn extracts_hierarchy_in_document_order() {
        let principles = extract(TWO_PRINCIPLES);

        assert_eq!(principles.len(), 2);
        assert_eq!(principles[0].title, "Perceivable");
        assert_eq!(
            principles[0].description.as_deref(),
            Some("Information must be presentable in ways users can perceive.")
        );
        assert_eq!(principles[0].guidelines.len(), 2);
        assert_eq!(principles[0].guidelines[0].title, "Text Alternatives");
        assert_eq!(
            principles[0].guidelines[0].description.as_deref(),
            Some("Provide text alternatives for non-text content.")
        );
        assert_eq!(principles[1].title, "Operable");
        assert_eq!(principles[1].description, None);
    }

    #[test]
    fn inline_criterion_keeps_its_heading() {
        let principles = extract(TWO_PRINCIPLES);
        let criterion = &principles[0].guidelines[0].criteria[0];

        assert_eq!(criterion.id, "non-text-content");
        assert_eq!(criterion.title.as_deref(), Some("Non-text Content"));
    }

    #[test]
    fn include_reference_uses_path_stem_as_id() {
        let principles = extract(TWO_PRINCIPLES);
        let criterion = &principles[0].guidelines[1].criteria[0];

        assert_eq!(criterion.id, "audio-only-and-video-only-prerecorded");
        assert_eq!(criterion.title, None);
    }

    #[test]
    fn inline_criterion_without_heading_has_no_title() {
        let principles = extract(TWO_PRINCIPLES);
        let criterion = &principles[1].guidelines[0].criteria[0];

        assert_eq!(criterion.id, "keyboard");
        assert_eq!(criterion.title, None);
    }

    #[test]
    fn node_without_identifier_is_skipped_without_a_gap() {
        let html = r#"
            <section class="principle"><h2>P</h2>
            <section class="guideline"><h3>G</h3>
                <section class="sc"><h4>No id here</h4></section>
                <section class="sc" id="kept"><h4>Kept</h4></section>
            </section></section>
        "#;
        let principles = extract(html);
        let criteria = &principles[0].guidelines[0].criteria;

        assert_eq!(criteria.len(), 1);
        assert_eq!(criteria[0].id, "kept");
        let rendered = render(&principles, |c| c.title.clone().unwrap_or_default());
        assert!(rendered.contains("[1.1.1 Kept](wcag://criterion/kept)"));
    }

    #[test]
    fn nested_heading_does_not_leak_into_parent_title() {
        let html = r#"
            <section class="principle">
            <section class="guideline"><h3>Inner</h3></section>
            </section>
        "#;
        let principles = extract(html);

        assert_eq!(principles[0].title, "");
        assert_eq!(principles[0].guidelines[0].title, "Inner");
    }

    #[test]
    fn renders_expected_markdown() {
        let principles = extract(TWO_PRINCIPLES);
        let rendered = render(&principles, |criterion| {
            criterion.title.clone().unwrap_or_else(|| "Filled In".to_string())
        });

        let expected = "\
# WCAG Guidelines

## 1. Perceivable

Information must be presentable in ways users can perceive.

### 1.1 Text Alternatives

Provide text alternatives for non-text content.

- [1.1.1 Non-text Content](wcag://criterion/non-text-content)

### 1.2 Time-based Media

- [1.2.1 Filled In](wcag://criterion/audio-only-and-video-only-prerecorded)

## 2. Operable

### 2.1 Keyboard Accessible

- [2.1.1 Filled In](wcag://criterion/keyboard)
";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn principle_without_guidelines_renders_as_bare_block() {
        let html = r#"
            <section class="principle"><h2>First</h2>
            <section class="guideline"><h3>Only</h3>
                <section class="sc" id="one"><h4>One</h4></section>
                <section class="sc" id="two"><h4>Two</h4></section>
            </section></section>
            <section class="principle"><h2>Second</h2></section>
        "#;
        let rendered = render(&extract(html), |c| c.title.clone().unwrap_or_default());

        assert!(rendered.contains("- [1.1.1 One](wcag://criterion/one)"));
        assert!(rendered.contains("- [1.1.2 Two](wcag://criterion/two)"));
        assert!(rendered.ends_with("## 2. Second\n"));
        assert!(!rendered.contains("2.1"));
    }

    #[test]
    fn empty_title_degrades_label_to_number() {
        let principles = extract(TWO_PRINCIPLES);
        let rendered = render(&principles, |_| String::new());

        assert!(rendered.contains("- [1.1.1](wcag://criterion/non-text-content)"));
    }

    #[test]
    fn empty_document_renders_diagnostic_line() {
        let rendered = render(&[], |_| String::new());

        assert_eq!(
            rendered,
            "No principles could be extracted from the guidelines document.\n"
        );
    }

    #[test]
    fn first_heading_skips_empty_headings() {
        let html = "<h1>  </h1><h2>Real   Title</h2>";

        assert_eq!(first_heading_text(html).as_deref(), Some("Real Title"));
    }

    #[test]
    fn first_heading_of_headingless_document_is_none() {
        assert_eq!(first_heading_text("<p>no headings</p>"), None);
    }
}

//! Text-only rendering of rich-text descriptions.
//!
//! Descriptions come from a rich-text editor and may hold arbitrary markup.
//! The shell never interprets it: markup is parsed with `scraper` and only
//! text nodes reach the terminal.

use scraper::{ElementRef, Html, Node};

/// Elements whose whole subtree is dropped.
const SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template", "iframe", "object", "svg"];

/// Elements rendered on their own lines.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "li", "ul", "ol", "h1", "h2", "h3", "h4", "h5", "h6", "blockquote", "pre", "tr", "table",
];

/// Convert description markup into plain display text.
///
/// Block elements and `<br>` become line breaks, list items get a `- `
/// bullet, whitespace inside a line collapses and blank lines are dropped.
pub fn markup_to_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let mut raw = String::with_capacity(markup.len());
    collect_text(fragment.root_element(), &mut raw);
    clean_lines(&raw)
}

/// Whether markup carries no visible text (e.g. `<p><br></p>` from an emptied editor).
pub fn is_blank(markup: &str) -> bool {
    markup_to_text(markup).is_empty()
}

fn collect_text(element: ElementRef, out: &mut String) {
    let tag_name = element.value().name();
    if SKIP_TAGS.contains(&tag_name) {
        return;
    }
    if tag_name == "br" {
        out.push('\n');
        return;
    }

    let block = BLOCK_TAGS.contains(&tag_name);
    if block {
        out.push('\n');
    }
    if tag_name == "li" {
        out.push_str("- ");
    }

    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(&**text),
            Node::Element(_) => {
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                }
            }
            _ => {}
        }
    }

    if block {
        out.push('\n');
    }
}

fn clean_lines(text: &str) -> String {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

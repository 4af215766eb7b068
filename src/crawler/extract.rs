//! Visible-text extraction from HTML
//!
//! Navigation boilerplate (`<header>`, `<nav>`, `<footer>`) and non-visible
//! content (`<script>`, `<style>`, `<noscript>`, `<template>`) are dropped
//! before the remaining text nodes are joined with single spaces.

use scraper::{Html, Node};

/// Elements whose entire subtree is excluded from extracted text
const SKIPPED_ELEMENTS: &[&str] = &[
    "header", "nav", "footer", "script", "style", "noscript", "template",
];

/// Why a static fetch did not produce usable text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderReason {
    /// The server answered with a non-success status
    HttpStatus(u16),
    /// The page parsed but carried fewer words than the threshold
    TooFewWords(usize),
}

/// Decision taken after the static HTML pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaticExtraction {
    /// Enough text was found; no rendering needed
    Extracted { text: String },
    /// The page must be rendered in a browser; `text` is whatever the static pass found
    NeedsRender { text: String, reason: RenderReason },
}

/// Extracts visible text from an HTML document
///
/// # Examples
///
/// ```
/// use sitemap_scraper::crawler::extract_visible_text;
///
/// let html = "<html><body><nav>Home | About</nav><p>Hello   <b>World</b></p></body></html>";
/// assert_eq!(extract_visible_text(html, false), "Hello World");
/// assert_eq!(extract_visible_text(html, true), "hello world");
/// ```
pub fn extract_visible_text(html: &str, lowercase: bool) -> String {
    let document = Html::parse_document(html);
    let mut parts: Vec<&str> = Vec::new();

    for node in document.tree.root().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| SKIPPED_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        // Inner whitespace is collapsed too, so the result is single-spaced.
        parts.extend(text.split_whitespace());
    }

    let joined = parts.join(" ");
    if lowercase {
        joined.to_lowercase()
    } else {
        joined
    }
}

/// Counts whitespace-delimited words
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Decides whether statically extracted text is enough
///
/// ```
/// use sitemap_scraper::crawler::{assess_static, StaticExtraction, RenderReason};
///
/// let decision = assess_static("just a few words".to_string(), 50);
/// assert!(matches!(
///     decision,
///     StaticExtraction::NeedsRender { reason: RenderReason::TooFewWords(4), .. }
/// ));
/// ```
pub fn assess_static(text: String, min_words: usize) -> StaticExtraction {
    let words = count_words(&text);
    if words >= min_words {
        StaticExtraction::Extracted { text }
    } else {
        StaticExtraction::NeedsRender {
            text,
            reason: RenderReason::TooFewWords(words),
        }
    }
}

/// Collapses whitespace in already-plain text (PDF output) to single spaces
pub fn normalize_plain_text(text: &str, lowercase: bool) -> String {
    let joined = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if lowercase {
        joined.to_lowercase()
    } else {
        joined
    }
}

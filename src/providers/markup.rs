//! Markup extraction over data-driven selector rules
//!
//! Each lyrics site is described by an ordered list of [`SelectorRule`]s:
//! a CSS selector, a minimum accepted text length and exclusion filters for
//! boilerplate pages. Sites are added or retired by editing their rule
//! table, never the orchestration code.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

/// A substring filter applied to candidate text
#[derive(Debug, Clone, Copy)]
pub enum Exclusion {
    /// Reject when the needle occurs anywhere in the text
    Anywhere(&'static str),
    /// Reject when the needle occurs within the first `n` characters
    WithinPrefix(&'static str, usize),
}

impl Exclusion {
    fn rejects(&self, text: &str) -> bool {
        match *self {
            Exclusion::Anywhere(needle) => text.contains(needle),
            Exclusion::WithinPrefix(needle, window) => {
                let end = text
                    .char_indices()
                    .nth(window)
                    .map(|(i, _)| i)
                    .unwrap_or(text.len());
                text[..end].contains(needle)
            }
        }
    }
}

/// One markup pattern tried against a lyrics page
#[derive(Debug, Clone, Copy)]
pub struct SelectorRule {
    pub selector: &'static str,
    pub min_len: usize,
    pub exclude: &'static [Exclusion],
}

impl SelectorRule {
    fn accepts(&self, text: &str) -> bool {
        text.len() > self.min_len && !self.exclude.iter().any(|e| e.rejects(text))
    }
}

/// Apply rules in order, joining the text of every element matched by a
/// rule's selector. Returns the first joined text passing the rule's filter.
///
/// Used for sites that split lyrics across sibling containers.
pub fn extract_joined(html: &str, rules: &[SelectorRule]) -> Option<String> {
    let document = Html::parse_document(html);

    for rule in rules {
        let Ok(selector) = Selector::parse(rule.selector) else {
            debug!("skipping unparsable selector {:?}", rule.selector);
            continue;
        };

        let joined = document
            .select(&selector)
            .map(|el| element_text(el))
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        if rule.accepts(&joined) {
            return Some(joined);
        }
    }

    None
}

/// Apply rules in order, checking each matched element on its own. Returns
/// the text of the first element passing its rule's filter.
///
/// Used for sites where the lyrics live in one container among many
/// lookalike elements.
pub fn extract_per_element(html: &str, rules: &[SelectorRule]) -> Option<String> {
    let document = Html::parse_document(html);

    for rule in rules {
        let Ok(selector) = Selector::parse(rule.selector) else {
            debug!("skipping unparsable selector {:?}", rule.selector);
            continue;
        };

        for element in document.select(&selector) {
            let text = element_text(element);
            if rule.accepts(&text) {
                return Some(text);
            }
        }
    }

    None
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

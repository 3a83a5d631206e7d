//! Directive extraction
//!
//! Finds embedded `<#...>` directives in clipboard text and splits them
//! from the surrounding content.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

/// Default maximum directive length accepted by [`validate_directive`].
pub const MAX_DIRECTIVE_LEN: usize = 100;

/// Characters never allowed inside a directive.
const DISALLOWED_CHARS: &[char] = &['<', '>', '{', '}', '|', '&', ';', '$', '`'];

lazy_static! {
    static ref DIRECTIVE_RE: Regex =
        Regex::new(r"(?i)<#([^>]+)>").expect("directive pattern is valid");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("whitespace pattern is valid");
}

/// Result of splitting raw clipboard text into content and directive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Text with directive markers removed (or the original text when no
    /// valid directive was found)
    pub content: String,
    /// The effective directive, trimmed (empty when none was found)
    pub directive: String,
    /// Whether a valid directive was found
    pub has_directive: bool,
}

/// Extracts `<#...>` directives from clipboard content
#[derive(Debug, Default)]
pub struct DirectiveExtractor;

impl DirectiveExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Split text into clean content and directive.
    ///
    /// When at least one marker with non-empty inner text exists, every
    /// marker occurrence is removed, whitespace runs are collapsed and the
    /// rightmost valid directive is returned. When none exists the text
    /// comes back byte-for-byte unchanged so plain clipboard content is
    /// never rewritten.
    pub fn extract(&self, text: &str) -> Extraction {
        if text.is_empty() {
            return Extraction {
                content: String::new(),
                directive: String::new(),
                has_directive: false,
            };
        }

        match self.find_directive(text) {
            Some(directive) => {
                debug!("Found directive: '{}'", directive);
                Extraction {
                    content: self.clean_content(text),
                    directive,
                    has_directive: true,
                }
            }
            None => Extraction {
                content: text.to_string(),
                directive: String::new(),
                has_directive: false,
            },
        }
    }

    /// Find the effective directive: the last marker whose inner text is
    /// non-empty after trimming. Whitespace-only markers do not count.
    pub fn find_directive(&self, text: &str) -> Option<String> {
        DIRECTIVE_RE
            .captures_iter(text)
            .filter_map(|cap| {
                let inner = cap[1].trim();
                (!inner.is_empty()).then(|| inner.to_string())
            })
            .last()
    }

    /// Check whether text contains a valid directive
    pub fn has_directive(&self, text: &str) -> bool {
        self.find_directive(text).is_some()
    }

    /// All valid directives in left-to-right order, trimmed
    pub fn extract_all(&self, text: &str) -> Vec<String> {
        DIRECTIVE_RE
            .captures_iter(text)
            .filter_map(|cap| {
                let inner = cap[1].trim();
                (!inner.is_empty()).then(|| inner.to_string())
            })
            .collect()
    }

    /// Remove every marker occurrence and normalize whitespace
    fn clean_content(&self, text: &str) -> String {
        let stripped = DIRECTIVE_RE.replace_all(text, "");
        WHITESPACE_RE
            .replace_all(stripped.trim(), " ")
            .into_owned()
    }
}

/// Validate a directive for length and a fixed disallowed character set.
///
/// Used by callers that surface directives to the user before processing;
/// extraction itself never rejects a directive.
pub fn validate_directive(directive: &str, max_len: usize) -> bool {
    let directive = directive.trim();

    if directive.is_empty() || directive.chars().count() > max_len {
        return false;
    }

    !directive.chars().any(|c| DISALLOWED_CHARS.contains(&c))
}

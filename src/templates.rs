//! Prompt templates and directive categorization
//!
//! Core templates are hardcoded and can never be changed by configuration
//! or clipboard input. Only the default template (used for text without a
//! directive) is replaceable at startup.

use tracing::debug;

/// Built-in default template, used when no directive is present.
pub const DEFAULT_TEMPLATE: &str =
    "Fix the syntax and typos text:\n\n{content}\n\nThe correct string is:";

/// Suffix appended to a custom default template that lacks `{content}`,
/// so substitution can never drop the clipboard text.
const CONTENT_SUFFIX: &str = "\n\nCONTEXT:\n{content}";

/// Directive category, resolved from the first word of a directive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Translate,
    Elaborate,
    Explain,
    Fix,
    Complete,
    Summarize,
    /// Any directive without a dedicated template
    Generic,
}

impl Category {
    /// Categorize a directive by its first whitespace-separated token,
    /// case-insensitively. Unknown or empty directives are Generic.
    pub fn categorize(directive: &str) -> Self {
        let first_word = match directive.split_whitespace().next() {
            Some(word) => word.to_lowercase(),
            None => return Category::Generic,
        };

        match first_word.as_str() {
            "translate" => Category::Translate,
            "elaborate" => Category::Elaborate,
            "explain" => Category::Explain,
            "fix" => Category::Fix,
            "complete" => Category::Complete,
            "summarize" => Category::Summarize,
            _ => Category::Generic,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Translate => "translate",
            Category::Elaborate => "elaborate",
            Category::Explain => "explain",
            Category::Fix => "fix",
            Category::Complete => "complete",
            Category::Summarize => "summarize",
            Category::Generic => "generic",
        }
    }

    /// All categories, in the order shown in help text
    pub fn all() -> &'static [Category] {
        &[
            Category::Translate,
            Category::Elaborate,
            Category::Explain,
            Category::Fix,
            Category::Complete,
            Category::Summarize,
            Category::Generic,
        ]
    }
}

/// Holds one hardcoded template per category plus the configurable default
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    default_template: String,
}

impl TemplateRegistry {
    /// Registry with the built-in default template
    pub fn new() -> Self {
        Self {
            default_template: DEFAULT_TEMPLATE.to_string(),
        }
    }

    /// Registry with an optional custom default template. A custom template
    /// missing the `{content}` placeholder gets a fixed context suffix
    /// appended.
    pub fn with_default(custom_default: Option<String>) -> Self {
        match custom_default {
            Some(mut template) => {
                if !template.contains("{content}") {
                    debug!("Custom default template lacks {{content}}, appending context block");
                    template.push_str(CONTENT_SUFFIX);
                }
                Self {
                    default_template: template,
                }
            }
            None => Self::new(),
        }
    }

    /// Template for a directive category. Total over the closed enum.
    pub fn get(&self, category: Category) -> &'static str {
        match category {
            Category::Translate => {
                "Translate the following text {directive}:\n\n{content}\n\nTranslation:"
            }
            Category::Elaborate => {
                "Elaborate and expand on the following text with more detail ({directive}):\n\n{content}\n\nElaborated version:"
            }
            Category::Explain => {
                "Explain the following text in clear, simple terms ({directive}):\n\n{content}\n\nExplanation:"
            }
            Category::Fix => {
                "Fix any errors or issues in the following ({directive}):\n\n{content}\n\nFixed version:"
            }
            Category::Complete => {
                "Complete the following incomplete content ({directive}):\n\n{content}\n\nCompleted version:"
            }
            Category::Summarize => {
                "Summarize the following text concisely ({directive}):\n\n{content}\n\nSummary:"
            }
            Category::Generic => {
                "Process the following text according to this instruction: {directive}\n\n{content}\n\nResult:"
            }
        }
    }

    /// The default template (used when no directive is present)
    pub fn default_template(&self) -> &str {
        &self.default_template
    }

    /// Known template keys, for introspection and help text
    pub fn list_categories(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Category::all().iter().map(|c| c.as_str()).collect();
        names.push("default");
        names
    }

    /// Whether a template name refers to a hardcoded core template
    pub fn is_core(&self, name: &str) -> bool {
        Category::all().iter().any(|c| c.as_str() == name)
    }
}

impl Default for TemplateRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Substitute `{content}` and `{directive}` in a template.
///
/// Plain two-token replacement: other literal braces are left untouched and
/// substitution cannot fail.
pub fn build_prompt(template: &str, content: &str, directive: &str) -> String {
    template
        .replace("{content}", content)
        .replace("{directive}", directive)
}

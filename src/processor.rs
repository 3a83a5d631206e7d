//! Clipboard Processor
//!
//! Orchestrates the pipeline: extract directive, pick a template, build the
//! prompt, call the model and clean up the output. Every failure degrades to
//! a simpler path; the caller always gets usable text back.

use crate::extractor::{DirectiveExtractor, MAX_DIRECTIVE_LEN};
use crate::llm::ModelInvoker;
use crate::templates::{build_prompt, Category, TemplateRegistry};
use std::sync::Arc;
use tracing::{debug, warn};

/// Which branch of the pipeline produced the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Directive template was used
    Directive(Category),
    /// Default template was used (no directive, or directive branch failed)
    Default,
    /// Model unavailable, input returned without processing
    Passthrough,
}

/// Result of one pipeline run
#[derive(Debug, Clone)]
pub struct Outcome {
    /// Text to write back to the clipboard
    pub text: String,
    pub route: Route,
    /// Non-fatal warnings recorded while falling back
    pub warnings: Vec<String>,
}

pub struct Processor {
    extractor: DirectiveExtractor,
    registry: TemplateRegistry,
    model: Arc<dyn ModelInvoker>,
}

impl Processor {
    pub fn new(registry: TemplateRegistry, model: Arc<dyn ModelInvoker>) -> Self {
        Self {
            extractor: DirectiveExtractor::new(),
            registry,
            model,
        }
    }

    /// Process raw clipboard text.
    ///
    /// Directive branch first when a `<#...>` marker is present; on model
    /// failure it degrades to the default branch, and the default branch
    /// degrades to returning the directive-stripped content. Never errors.
    pub async fn process(&self, raw: &str) -> Outcome {
        if raw.is_empty() {
            return Outcome {
                text: String::new(),
                route: Route::Passthrough,
                warnings: Vec::new(),
            };
        }

        let extraction = self.extractor.extract(raw);
        let mut warnings = Vec::new();

        if extraction.has_directive {
            let category = Category::categorize(&extraction.directive);
            debug!(
                "Processing with directive '{}' as {}",
                extraction.directive,
                category.as_str()
            );

            let prompt = build_prompt(
                self.registry.get(category),
                &extraction.content,
                &extraction.directive,
            );

            match self.model.generate(&prompt).await {
                Ok(output) => {
                    return Outcome {
                        text: cleanup_output(&output),
                        route: Route::Directive(category),
                        warnings,
                    };
                }
                Err(e) => {
                    warn!(
                        "Directive processing failed for '{}': {}. Falling back to default.",
                        extraction.directive, e
                    );
                    warnings.push(format!(
                        "directive processing failed for '{}': {e}",
                        extraction.directive
                    ));
                }
            }
        }

        let prompt = build_prompt(self.registry.default_template(), &extraction.content, "");

        match self.model.generate(&prompt).await {
            Ok(output) => Outcome {
                text: cleanup_output(&output),
                route: Route::Default,
                warnings,
            },
            Err(e) => {
                warn!("Default processing failed: {}. Returning content unchanged.", e);
                warnings.push(format!("default processing failed: {e}"));
                Outcome {
                    text: extraction.content,
                    route: Route::Passthrough,
                    warnings,
                }
            }
        }
    }

    /// The prompt that would be sent for this content, without calling the
    /// model
    pub fn preview_prompt(&self, content: &str, directive: Option<&str>) -> String {
        match directive {
            Some(directive) => {
                let category = Category::categorize(directive);
                build_prompt(self.registry.get(category), content, directive)
            }
            None => build_prompt(self.registry.default_template(), content, ""),
        }
    }

    /// Whether a directive resolves to a dedicated template (not generic)
    pub fn is_directive_supported(&self, directive: &str) -> bool {
        Category::categorize(directive) != Category::Generic
    }

    /// Whether a directive passes length and character validation
    pub fn validate_directive(&self, directive: &str) -> bool {
        crate::extractor::validate_directive(directive, MAX_DIRECTIVE_LEN)
    }

    /// Known template names, for help output
    pub fn available_commands(&self) -> Vec<&'static str> {
        self.registry.list_categories()
    }
}

/// Clean up raw model output: trim, strip quote characters from both ends
/// (double quotes first, then single), then trim again.
pub fn cleanup_output(raw: &str) -> String {
    raw.trim()
        .trim_matches('"')
        .trim_matches('\'')
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClipError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted model double recording every prompt it receives
    struct ScriptedModel {
        response: Option<String>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn ok(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Some(response.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                response: None,
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().expect("prompt log").clone()
        }
    }

    #[async_trait]
    impl ModelInvoker for ScriptedModel {
        async fn generate(&self, prompt: &str) -> Result<String, ClipError> {
            self.prompts.lock().expect("prompt log").push(prompt.to_string());
            match &self.response {
                Some(text) => Ok(text.clone()),
                None => Err(ClipError::Model("scripted failure".to_string())),
            }
        }
    }

    fn processor(model: Arc<ScriptedModel>) -> Processor {
        Processor::new(TemplateRegistry::new(), model)
    }

    #[tokio::test]
    async fn test_directive_route() {
        let model = ScriptedModel::ok("Hola mundo");
        let outcome = processor(model.clone())
            .process("Hello world <#translate to spanish>")
            .await;

        assert_eq!(outcome.text, "Hola mundo");
        assert_eq!(outcome.route, Route::Directive(Category::Translate));
        assert!(outcome.warnings.is_empty());

        let prompts = model.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Hello world"));
        assert!(prompts[0].contains("translate to spanish"));
        assert!(prompts[0].contains("Translation:"));
    }

    #[tokio::test]
    async fn test_default_route_without_directive() {
        let model = ScriptedModel::ok("Fixed text");
        let outcome = processor(model.clone()).process("sum text wit typos").await;

        assert_eq!(outcome.text, "Fixed text");
        assert_eq!(outcome.route, Route::Default);

        let prompts = model.prompts();
        assert!(prompts[0].contains("Fix the syntax and typos"));
        assert!(prompts[0].contains("sum text wit typos"));
    }

    #[tokio::test]
    async fn test_unknown_directive_uses_generic_template() {
        let model = ScriptedModel::ok("done");
        let outcome = processor(model.clone())
            .process("code <#optimize performance>")
            .await;

        assert_eq!(outcome.route, Route::Directive(Category::Generic));
        let prompts = model.prompts();
        assert!(prompts[0].contains("according to this instruction: optimize performance"));
    }

    #[tokio::test]
    async fn test_total_failure_returns_stripped_content() {
        let model = ScriptedModel::failing();
        let outcome = processor(model.clone()).process("Hi <#explain>").await;

        assert_eq!(outcome.text, "Hi");
        assert_eq!(outcome.route, Route::Passthrough);
        // One warning per failed branch
        assert_eq!(outcome.warnings.len(), 2);
        // Both branches were attempted
        assert_eq!(model.prompts().len(), 2);
    }

    #[tokio::test]
    async fn test_default_failure_returns_input_unchanged() {
        let model = ScriptedModel::failing();
        let outcome = processor(model).process("plain text").await;

        assert_eq!(outcome.text, "plain text");
        assert_eq!(outcome.route, Route::Passthrough);
        assert_eq!(outcome.warnings.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_input_short_circuits() {
        let model = ScriptedModel::ok("should not be called");
        let outcome = processor(model.clone()).process("").await;

        assert_eq!(outcome.text, "");
        assert_eq!(outcome.route, Route::Passthrough);
        assert!(model.prompts().is_empty());
    }

    #[tokio::test]
    async fn test_model_output_cleaned() {
        let model = ScriptedModel::ok("\"  Hola mundo  \"");
        let outcome = processor(model).process("hola mundo <#fix>").await;
        assert_eq!(outcome.text, "Hola mundo");
    }

    #[test]
    fn test_cleanup_output() {
        assert_eq!(cleanup_output("\"  Hola mundo  \""), "Hola mundo");
        assert_eq!(cleanup_output("  plain  "), "plain");
        assert_eq!(cleanup_output("'quoted'"), "quoted");
        assert_eq!(cleanup_output("\"\"double\"\""), "double");
        assert_eq!(cleanup_output(""), "");
        // Interior quotes survive
        assert_eq!(cleanup_output("say \"hi\" now"), "say \"hi\" now");
    }

    #[test]
    fn test_preview_prompt() {
        let processor = processor(ScriptedModel::ok("x"));
        let with_directive = processor.preview_prompt("Hola", Some("translate to english"));
        assert!(with_directive.contains("Hola"));
        assert!(with_directive.contains("Translation:"));

        let without = processor.preview_prompt("Hola", None);
        assert!(without.contains("Fix the syntax and typos"));
    }

    #[test]
    fn test_is_directive_supported() {
        let processor = processor(ScriptedModel::ok("x"));
        assert!(processor.is_directive_supported("translate to french"));
        assert!(!processor.is_directive_supported("optimize performance"));
    }

    #[test]
    fn test_available_commands() {
        let processor = processor(ScriptedModel::ok("x"));
        let commands = processor.available_commands();
        assert!(commands.contains(&"translate"));
        assert!(commands.contains(&"default"));
    }
}

//! Query templating.
//!
//! Queries are minijinja templates with strict undefined handling. Sloth-style
//! Go template references (`{{.window}}`, `{{ .options.job }}`) are accepted
//! and normalized to minijinja syntax (`{{ window }}`, `{{ options.job }}`)
//! before compilation.

use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Value substituted for `window` when checking that a query references it.
const WINDOW_MARKER: &str = "__slo_window_marker__";

/// Errors that can occur during template operations.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Template syntax is invalid.
    #[error("template syntax error: {0}")]
    Syntax(#[source] minijinja::Error),

    /// Template rendering failed (undefined variable, bad filter, ...).
    #[error("template render error: {0}")]
    Render(#[source] minijinja::Error),
}

/// Template engine for SLI queries.
pub struct QueryTemplates {
    env: Environment<'static>,
}

impl fmt::Debug for QueryTemplates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryTemplates").finish_non_exhaustive()
    }
}

impl Default for QueryTemplates {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryTemplates {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self { env }
    }

    /// Render a query template with the given context.
    pub fn render<S: Serialize>(&self, template: &str, ctx: S) -> Result<String, TemplateError> {
        let normalized = normalize_go_references(template);
        check_syntax(&normalized)?;
        self.env
            .render_str(&normalized, ctx)
            .map_err(TemplateError::Render)
    }

    /// Render a query for a single rate window.
    pub fn render_window(&self, template: &str, window: &str) -> Result<String, TemplateError> {
        self.render(template, minijinja::context! { window => window })
    }

    /// Check template syntax without rendering.
    pub fn validate(&self, template: &str) -> Result<(), TemplateError> {
        check_syntax(&normalize_go_references(template))
    }

    /// Whether the query uses the `window` variable.
    ///
    /// Rendering fails (and this returns `false`) when the query needs any
    /// other variable.
    pub fn references_window(&self, template: &str) -> bool {
        self.render_window(template, WINDOW_MARKER)
            .map(|rendered| rendered.contains(WINDOW_MARKER))
            .unwrap_or(false)
    }
}

/// Parse without rendering. A scratch environment can borrow non-static text.
fn check_syntax(template: &str) -> Result<(), TemplateError> {
    let env = Environment::new();
    env.template_from_str(template)
        .map(|_| ())
        .map_err(TemplateError::Syntax)
}

/// Drop the leading `.` Go templates put in front of field references.
///
/// Only the first token after `{{` (and an optional `-` trim marker) is
/// touched; everything else is copied verbatim.
fn normalize_go_references(template: &str) -> String {
    let mut result = String::with_capacity(template.len());
    let mut remaining = template;

    while let Some(start) = remaining.find("{{") {
        result.push_str(&remaining[..start + 2]);
        remaining = &remaining[start + 2..];

        let mut chars = remaining.char_indices().peekable();
        let mut skip_to = 0;
        while let Some(&(idx, ch)) = chars.peek() {
            if ch == '-' && idx == 0 || ch.is_whitespace() {
                chars.next();
                skip_to = idx + ch.len_utf8();
                continue;
            }
            break;
        }
        result.push_str(&remaining[..skip_to]);
        remaining = &remaining[skip_to..];

        // `{{.}}` has no minijinja equivalent; leave it for the parser to reject.
        if let Some(rest) = remaining.strip_prefix('.') {
            if rest.starts_with(|c: char| c.is_alphabetic() || c == '_') {
                remaining = rest;
            }
        }
    }

    result.push_str(remaining);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_normalize_go_references() {
        assert_eq!(normalize_go_references("[{{.window}}]"), "[{{window}}]");
        assert_eq!(normalize_go_references("[{{ .window }}]"), "[{{ window }}]");
        assert_eq!(
            normalize_go_references("{{- .options.job -}}"),
            "{{- options.job -}}"
        );
        assert_eq!(normalize_go_references("{{ window }}"), "{{ window }}");
        assert_eq!(normalize_go_references("no templates"), "no templates");
    }

    #[test]
    fn test_render_window() {
        let templates = QueryTemplates::new();
        let rendered = templates
            .render_window(r#"sum(rate(http_requests_total{code=~"5.."}[{{.window}}]))"#, "5m")
            .unwrap();
        assert_eq!(rendered, r#"sum(rate(http_requests_total{code=~"5.."}[5m]))"#);
    }

    #[test]
    fn test_render_nested_options() {
        let templates = QueryTemplates::new();
        let mut options = BTreeMap::new();
        options.insert("job", "api");
        let rendered = templates
            .render(
                r#"rate(errors{job="{{ .options.job }}"}[{{ .window }}])"#,
                minijinja::context! { window => "1h", options => options },
            )
            .unwrap();
        assert_eq!(rendered, r#"rate(errors{job="api"}[1h])"#);
    }

    #[test]
    fn test_render_undefined_is_error() {
        let templates = QueryTemplates::new();
        let err = templates
            .render_window("rate(x[{{ .windw }}])", "5m")
            .unwrap_err();
        assert!(matches!(err, TemplateError::Render(_)));
    }

    #[test]
    fn test_validate_syntax() {
        let templates = QueryTemplates::new();
        assert!(templates.validate("rate(x[{{.window}}])").is_ok());
        assert!(matches!(
            templates.validate("rate(x[{{ window ]"),
            Err(TemplateError::Syntax(_))
        ));
    }

    #[test]
    fn test_references_window() {
        let templates = QueryTemplates::new();
        assert!(templates.references_window("rate(x[{{.window}}])"));
        assert!(!templates.references_window("rate(x[5m])"));
        assert!(!templates.references_window("rate(x[{{ .other }}])"));
    }
}

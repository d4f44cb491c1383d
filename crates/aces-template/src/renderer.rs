//! Constrained-template rendering
//!
//! A [`ConstrainedTemplate`] pairs a template text with a flat data context
//! and renders final analysis-input text by placeholder substitution.
//! Placeholders take the form `{{ name }}` where `name` matches
//! `[a-zA-Z_][a-zA-Z0-9_]*`. Rendering is only permitted once both a template
//! and a data context have been bound; a placeholder with no bound value
//! fails the render rather than emitting a blank.
//!
//! Block-control tokens (`{% ... %}`) are removed from the output with
//! conventional trim-block/lstrip-block whitespace control: leading
//! whitespace before a line-leading token is stripped and the newline after
//! the token is consumed, keeping generated files well-formatted.

use crate::context::{DataContext, StructuredContext};
use crate::error::TemplateError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

static PLACEHOLDER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\s*([a-zA-Z_][a-zA-Z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// Line-leading block token, including the surrounding whitespace and the
/// trailing newline that trim-block/lstrip-block semantics consume.
static BLOCK_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^[ \t]*\{%.*?%\}[ \t]*\r?\n?").expect("block-line pattern is valid")
});

static BLOCK_INLINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{%.*?%\}").expect("block pattern is valid"));

/// Template plus data context with explicit readiness tracking
///
/// The template and the context are bound independently; `can_render` is true
/// only once both are present. Binding either again replaces it wholesale.
#[derive(Debug, Default)]
pub struct ConstrainedTemplate {
    template: Option<String>,
    context: Option<DataContext>,
}

impl ConstrainedTemplate {
    /// Create a template holder with nothing bound
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the template from a file, replacing any previous template
    ///
    /// # Errors
    /// - `TemplateError::Load` if the file cannot be read
    pub fn load_template_file(&mut self, path: impl AsRef<Path>) -> Result<(), TemplateError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| TemplateError::Load {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = text.len(), "template loaded");
        self.template = Some(text);
        Ok(())
    }

    /// Load the template from a literal string, replacing any previous one
    pub fn load_template_str(&mut self, text: impl Into<String>) {
        self.template = Some(text.into());
    }

    /// Bind a fully flattened name -> value mapping, replacing the context
    pub fn bind_flat(&mut self, values: BTreeMap<String, Value>) {
        self.context = Some(DataContext::from_flat(values));
    }

    /// Bind a structured category -> parameter -> value mapping
    ///
    /// The structure is flattened per [`DataContext::flatten`]; units are
    /// dropped and later categories win on name collision.
    pub fn bind_structured(&mut self, structured: &StructuredContext) {
        self.context = Some(DataContext::flatten(structured));
    }

    /// Clear the context to an empty-but-present state
    ///
    /// The renderer still counts as having data; any placeholder left in the
    /// template will fail the render as unresolved.
    pub fn clear_data(&mut self) {
        self.context = Some(DataContext::new());
    }

    /// Whether a template has been bound
    #[inline]
    #[must_use]
    pub fn has_template(&self) -> bool {
        self.template.is_some()
    }

    /// Whether a data context has been bound (possibly empty)
    #[inline]
    #[must_use]
    pub fn has_data(&self) -> bool {
        self.context.is_some()
    }

    /// True iff both a template and a data context are bound
    #[inline]
    #[must_use]
    pub fn can_render(&self) -> bool {
        self.has_template() && self.has_data()
    }

    /// The raw template text, if one is bound
    #[inline]
    #[must_use]
    pub fn template_text(&self) -> Option<&str> {
        self.template.as_deref()
    }

    /// Render the template against the bound context
    ///
    /// # Errors
    /// - `TemplateError::NotReady` if `can_render()` is false
    /// - `TemplateError::UnresolvedPlaceholder` if the template references a
    ///   name absent from the context
    pub fn render(&self) -> Result<String, TemplateError> {
        let (template, context) = match (&self.template, &self.context) {
            (Some(t), Some(c)) => (t, c),
            _ => return Err(TemplateError::NotReady),
        };

        let stripped = strip_block_tokens(template);
        substitute(&stripped, context)
    }

    /// Render and split on line boundaries
    ///
    /// Line count follows the rendered text exactly; no lines are merged.
    ///
    /// # Errors
    /// Same failure modes as [`render`](Self::render).
    pub fn render_lines(&self) -> Result<Vec<String>, TemplateError> {
        let rendered = self.render()?;
        Ok(rendered.split('\n').map(str::to_string).collect())
    }
}

/// Remove block-control tokens with trim-block/lstrip-block whitespace control
fn strip_block_tokens(text: &str) -> String {
    let pass1 = BLOCK_LINE_RE.replace_all(text, "");
    BLOCK_INLINE_RE.replace_all(&pass1, "").into_owned()
}

/// Substitute every placeholder, failing on the first unresolved name
fn substitute(text: &str, context: &DataContext) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for token in PLACEHOLDER_RE.find_iter(text) {
        let name = token
            .as_str()
            .trim_start_matches("{{")
            .trim_end_matches("}}")
            .trim();
        let value = context
            .get(name)
            .ok_or_else(|| TemplateError::UnresolvedPlaceholder {
                name: name.to_string(),
            })?;

        out.push_str(&text[last..token.start()]);
        out.push_str(&render_value(value));
        last = token.end();
    }
    out.push_str(&text[last..]);

    Ok(out)
}

/// Scalar display form: strings render bare, everything else as JSON
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ParamValue;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::io::Write;

    fn flat(pairs: &[(&str, Value)]) -> BTreeMap<String, Value> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn render_substitutes_placeholders() {
        let mut ct = ConstrainedTemplate::new();
        ct.load_template_str("Pressure: {{ P_T }}");
        ct.bind_flat(flat(&[("P_T", json!(14.7))]));

        assert_eq!(ct.render().unwrap(), "Pressure: 14.7");
    }

    #[test]
    fn render_leaves_no_placeholder_syntax() {
        let mut ct = ConstrainedTemplate::new();
        ct.load_template_str("{{ a }} plus {{ b }} is {{ total }}\n");
        ct.bind_flat(flat(&[
            ("a", json!(1)),
            ("b", json!(2)),
            ("total", json!(3)),
        ]));

        let rendered = ct.render().unwrap();
        assert!(!rendered.contains("{{"));
        assert!(!rendered.contains("}}"));
        assert_eq!(rendered, "1 plus 2 is 3\n");
    }

    #[test]
    fn render_strings_are_bare() {
        let mut ct = ConstrainedTemplate::new();
        ct.load_template_str("MODEL={{ name }}");
        ct.bind_flat(flat(&[("name", json!("frame7"))]));

        assert_eq!(ct.render().unwrap(), "MODEL=frame7");
    }

    #[test]
    fn unresolved_placeholder_fails() {
        let mut ct = ConstrainedTemplate::new();
        ct.load_template_str("Pressure: {{ P_T }}");
        ct.bind_flat(flat(&[("T_T", json!(450.0))]));

        match ct.render() {
            Err(TemplateError::UnresolvedPlaceholder { name }) => assert_eq!(name, "P_T"),
            other => panic!("expected unresolved placeholder, got {other:?}"),
        }
    }

    #[test]
    fn cleared_data_renders_but_fails_on_placeholders() {
        let mut ct = ConstrainedTemplate::new();
        ct.load_template_str("no placeholders here");
        ct.clear_data();
        assert_eq!(ct.render().unwrap(), "no placeholders here");

        ct.load_template_str("{{ missing }}");
        assert!(matches!(
            ct.render(),
            Err(TemplateError::UnresolvedPlaceholder { .. })
        ));
    }

    #[test]
    fn readiness_requires_both_bindings() {
        let mut ct = ConstrainedTemplate::new();
        assert!(!ct.can_render());
        assert!(matches!(ct.render(), Err(TemplateError::NotReady)));

        ct.load_template_str("text");
        assert!(!ct.can_render());

        ct.clear_data();
        assert!(ct.can_render());

        // Stays ready across any number of clear/bind cycles
        ct.clear_data();
        ct.bind_flat(BTreeMap::new());
        ct.clear_data();
        assert!(ct.can_render());
    }

    #[test]
    fn bind_structured_flattens() {
        let mut inlet = BTreeMap::new();
        inlet.insert("P_T".to_string(), ParamValue::new(json!(14.7), "bar"));
        let mut structured = StructuredContext::new();
        structured.insert("inlet".to_string(), inlet);

        let mut ct = ConstrainedTemplate::new();
        ct.load_template_str("Pressure: {{ P_T }}");
        ct.bind_structured(&structured);

        assert_eq!(ct.render().unwrap(), "Pressure: 14.7");
    }

    #[test]
    fn render_lines_preserves_line_count() {
        let mut ct = ConstrainedTemplate::new();
        ct.load_template_str("a: {{ a }}\nb: {{ b }}\n");
        ct.bind_flat(flat(&[("a", json!(1)), ("b", json!(2))]));

        let lines = ct.render_lines().unwrap();
        assert_eq!(lines, vec!["a: 1", "b: 2", ""]);
    }

    #[test]
    fn block_tokens_are_trimmed() {
        let mut ct = ConstrainedTemplate::new();
        ct.load_template_str("{% if stage %}\n  value: {{ v }}\n  {% endif %}\n");
        ct.bind_flat(flat(&[("v", json!(1))]));

        // Block-only lines disappear entirely, including their newline
        assert_eq!(ct.render().unwrap(), "  value: 1\n");
    }

    #[test]
    fn inline_block_token_is_removed() {
        let mut ct = ConstrainedTemplate::new();
        ct.load_template_str("head {% set x = 1 %}tail");
        ct.clear_data();

        assert_eq!(ct.render().unwrap(), "head tail");
    }

    #[test]
    fn reload_replaces_template() {
        let mut ct = ConstrainedTemplate::new();
        ct.load_template_str("first {{ a }}");
        ct.bind_flat(flat(&[("b", json!(2))]));
        assert!(ct.render().is_err());

        ct.load_template_str("second {{ b }}");
        assert_eq!(ct.render().unwrap(), "second 2");
    }

    #[test]
    fn load_template_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Pressure: {{{{ P_T }}}}").unwrap();

        let mut ct = ConstrainedTemplate::new();
        ct.load_template_file(file.path()).unwrap();
        ct.bind_flat(flat(&[("P_T", json!(14.7))]));

        assert_eq!(ct.render().unwrap(), "Pressure: 14.7");
    }

    #[test]
    fn load_template_missing_file_fails() {
        let mut ct = ConstrainedTemplate::new();
        let result = ct.load_template_file("/nonexistent/template.inp");
        assert!(matches!(result, Err(TemplateError::Load { .. })));
        assert!(!ct.has_template());
    }
}

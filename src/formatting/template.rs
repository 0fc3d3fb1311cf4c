// src/formatting/template.rs
//! Compiles message templates and renders announcements from them.
//!
//! A template is a Handlebars source that references exactly one field,
//! `message`. Rendering is strict: any other reference is a template error.
//! The engine's own escaping is switched off and the final text is escaped
//! once, unconditionally, by [`escape_html`].

use crate::constants::{ANNOUNCEMENT_TEMPLATE_NAME, DEFAULT_MESSAGE_TEMPLATE, MESSAGE_FIELD};
use crate::error::AppError;
use crate::formatting::escape::escape_html;
use crate::types::{RenderedAnnouncement, ValidationError};
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::json;

/// Matches `{{message}}`, `{{ message }}` and `{{{message}}}`.
static MESSAGE_PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{\{\{?~?\s*message\s*~?\}?\}\}").expect("placeholder pattern is valid")
});

/// A compiled message template.
#[derive(Debug)]
pub struct MessageTemplate {
    source: String,
    registry: Handlebars<'static>,
}

impl MessageTemplate {
    /// Compiles a template source, falling back to the default template when
    /// `source` is absent or empty.
    ///
    /// The placeholder check runs on the raw source before compilation. A
    /// probe render then surfaces unresolved names at configuration time.
    pub fn compile(source: Option<&str>) -> Result<Self, AppError> {
        let source = match source {
            Some(s) if !s.is_empty() => s,
            _ => DEFAULT_MESSAGE_TEMPLATE,
        };

        if !has_message_placeholder(source) {
            return Err(ValidationError::MissingPlaceholder.into());
        }

        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry.register_template_string(ANNOUNCEMENT_TEMPLATE_NAME, source)?;

        let template = Self {
            source: source.to_string(),
            registry,
        };
        template.render_unescaped("")?;

        log::debug!("Message template compiled: {:?}", template.source);
        Ok(template)
    }

    /// The template source this was compiled from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Renders `message` into the template and HTML-escapes the result.
    pub fn render(&self, message: &str) -> Result<RenderedAnnouncement, AppError> {
        let rendered = self.render_unescaped(message)?;
        Ok(RenderedAnnouncement::new(escape_html(&rendered)))
    }

    fn render_unescaped(&self, message: &str) -> Result<String, AppError> {
        let data = json!({ MESSAGE_FIELD: message });
        Ok(self.registry.render(ANNOUNCEMENT_TEMPLATE_NAME, &data)?)
    }
}

/// Compiles `template_source` and renders `message` with it in one step.
pub fn render_announcement(
    template_source: Option<&str>,
    message: &str,
) -> Result<RenderedAnnouncement, AppError> {
    MessageTemplate::compile(template_source)?.render(message)
}

fn has_message_placeholder(source: &str) -> bool {
    MESSAGE_PLACEHOLDER.is_match(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_renders_message_into_template() {
        let rendered = render_announcement(Some("TEST {{message}} TEST"), "hej svejs").unwrap();
        assert_eq!(rendered.as_str(), "TEST hej svejs TEST");
    }

    #[test]
    fn test_default_template() {
        assert_eq!(
            render_announcement(None, "deploy done").unwrap().as_str(),
            "📣 deploy done"
        );
        assert_eq!(
            render_announcement(Some(""), "deploy done").unwrap().as_str(),
            "📣 deploy done"
        );
    }

    #[test]
    fn test_output_is_escaped_once() {
        let rendered = render_announcement(Some("{{message}}"), "<script>&</script>").unwrap();
        assert_eq!(rendered.as_str(), "&lt;script&gt;&amp;&lt;/script&gt;");

        let rendered = render_announcement(Some("<b>{{message}}</b>"), "hi").unwrap();
        assert_eq!(rendered.as_str(), "&lt;b&gt;hi&lt;/b&gt;");
    }

    #[test]
    fn test_placeholder_spellings() {
        assert!(MessageTemplate::compile(Some("{{ message }}")).is_ok());
        assert!(MessageTemplate::compile(Some("{{{message}}}")).is_ok());
        assert!(MessageTemplate::compile(Some("a {{message}} b {{message}}")).is_ok());
    }

    #[test]
    fn test_missing_placeholder_is_configuration_error() {
        for source in ["TEST {{WrongThing}} TEST", "no fields at all", "message"] {
            let err = MessageTemplate::compile(Some(source)).unwrap_err();
            assert!(err.is_configuration_error(), "{source}: {err}");
        }
    }

    #[test]
    fn test_malformed_template_is_template_error() {
        let err = MessageTemplate::compile(Some("{{message}} {{#if}}")).unwrap_err();
        assert!(matches!(err, AppError::Template { .. }), "{err}");
    }

    #[test]
    fn test_unresolved_name_is_template_error() {
        let err = MessageTemplate::compile(Some("{{message}} by {{author}}")).unwrap_err();
        assert!(matches!(err, AppError::Template { .. }), "{err}");
    }

    #[test]
    fn test_compiled_template_is_reusable() {
        let template = MessageTemplate::compile(Some("[{{message}}]")).unwrap();
        assert_eq!(template.source(), "[{{message}}]");
        assert_eq!(template.render("one").unwrap().as_str(), "[one]");
        assert_eq!(template.render("two").unwrap().as_str(), "[two]");
    }
}

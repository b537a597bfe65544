//! Jinja template rendering for outgoing emails.
//!
//! Templates live under the configured template directory (default
//! `templates/`) and are addressed by their relative path, e.g.
//! `emails/workshop_registration.html.jinja`. Anything with `.html` in its
//! name is auto-escaped.

use std::path::Path;

use minijinja::{AutoEscape, Environment};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur during template operations
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Template '{0}' not found")]
    NotFound(String),

    #[error("Failed to render template: {0}")]
    RenderError(String),
}

/// Loaded template set
pub struct TemplateRenderer {
    env: Environment<'static>,
}

impl TemplateRenderer {
    /// Renderer with no templates; every render reports `NotFound`
    pub fn empty() -> Self {
        Self { env: new_environment() }
    }

    /// Load every `.jinja` file below `dir`. A missing directory yields an
    /// empty renderer.
    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let mut env = new_environment();
        let base = dir.as_ref();

        if base.exists() {
            load_templates_recursive(&mut env, base, base);
        } else {
            tracing::warn!("Template directory {} does not exist", base.display());
        }

        Self { env }
    }

    /// Build a renderer from in-memory `(name, source)` pairs
    #[cfg(test)]
    pub fn from_sources<I, N, S>(sources: I) -> Result<Self, TemplateError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: Into<String>,
    {
        let mut env = new_environment();
        for (name, source) in sources {
            env.add_template_owned(name.into(), source.into())
                .map_err(|e| TemplateError::RenderError(e.to_string()))?;
        }
        Ok(Self { env })
    }

    /// Render `name` with a serializable context
    pub fn render<C: Serialize>(&self, name: &str, ctx: C) -> Result<String, TemplateError> {
        let template = self
            .env
            .get_template(name)
            .map_err(|_| TemplateError::NotFound(name.to_string()))?;

        template
            .render(ctx)
            .map_err(|e| TemplateError::RenderError(e.to_string()))
    }

    #[cfg(test)]
    pub fn exists(&self, name: &str) -> bool {
        self.env.get_template(name).is_ok()
    }

    /// Names of all loaded templates, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .env
            .templates()
            .map(|(name, _)| name.to_string())
            .collect();
        names.sort();
        names
    }
}

fn new_environment() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_auto_escape_callback(|name| {
        if name.contains(".html") {
            AutoEscape::Html
        } else {
            AutoEscape::None
        }
    });
    env
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    let Ok(entries) = std::fs::read_dir(current_path) else {
        return;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            load_templates_recursive(env, base_path, &path);
            continue;
        }
        if !path.extension().is_some_and(|ext| ext == "jinja") {
            continue;
        }

        let Ok(relative) = path.strip_prefix(base_path) else {
            continue;
        };
        // Template names always use forward slashes
        let template_name = relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");

        match std::fs::read_to_string(&path) {
            Ok(content) => {
                if let Err(e) = env.add_template_owned(template_name.clone(), content) {
                    tracing::warn!("Failed to load template {}: {}", template_name, e);
                } else {
                    tracing::debug!("Loaded template: {}", template_name);
                }
            }
            Err(e) => tracing::warn!("Failed to read template {}: {}", path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_template_is_not_found() {
        let renderer = TemplateRenderer::empty();
        assert!(!renderer.exists("emails/nope.txt.jinja"));
        assert!(matches!(
            renderer.render("emails/nope.txt.jinja", json!({})),
            Err(TemplateError::NotFound(_))
        ));
    }

    #[test]
    fn test_html_templates_are_escaped() {
        let renderer = TemplateRenderer::from_sources([
            ("greeting.html.jinja", "<p>Hi {{ name }}</p>"),
            ("greeting.txt.jinja", "Hi {{ name }}"),
        ])
        .unwrap();

        let html = renderer
            .render("greeting.html.jinja", json!({ "name": "<Ada>" }))
            .unwrap();
        assert_eq!(html, "<p>Hi &lt;Ada&gt;</p>");

        let text = renderer
            .render("greeting.txt.jinja", json!({ "name": "<Ada>" }))
            .unwrap();
        assert_eq!(text, "Hi <Ada>");
        assert_eq!(
            renderer.names(),
            vec!["greeting.html.jinja", "greeting.txt.jinja"]
        );
    }

    #[test]
    fn test_render_error_on_bad_expression() {
        let renderer =
            TemplateRenderer::from_sources([("broken.txt.jinja", "{{ items | nosuchfilter }}")]);
        // Unknown filters are reported when the template is parsed or rendered
        match renderer {
            Err(TemplateError::RenderError(_)) => {}
            Ok(r) => assert!(matches!(
                r.render("broken.txt.jinja", json!({ "items": [] })),
                Err(TemplateError::RenderError(_))
            )),
            Err(other) => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_loads_bundled_email_templates() {
        let renderer = TemplateRenderer::from_dir("templates");
        assert!(renderer.exists("emails/workshop_registration.html.jinja"));
        assert!(renderer.exists("emails/workshop_registration.txt.jinja"));
        assert!(renderer.exists("emails/workshop_announcement.html.jinja"));
        assert!(renderer.exists("emails/workshop_announcement.txt.jinja"));
    }
}

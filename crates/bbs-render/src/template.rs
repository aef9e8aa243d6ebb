//! Registry of configured frame templates.

use std::collections::HashMap;

use bbs_render_core::{Error, RenderConfig, Result, TemplateDefinition};

/// Read-only mapping of template id to definition.
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: HashMap<String, TemplateDefinition>,
}

impl TemplateRegistry {
    /// Build a registry, validating every definition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a duplicate id or a definition that
    /// fails [`TemplateDefinition::validate`].
    pub fn new(definitions: impl IntoIterator<Item = TemplateDefinition>) -> Result<Self> {
        let mut templates = HashMap::new();
        for definition in definitions {
            definition.validate()?;
            if templates.contains_key(&definition.id) {
                return Err(Error::Config(format!(
                    "duplicate template id '{}'",
                    definition.id
                )));
            }
            templates.insert(definition.id.clone(), definition);
        }
        Ok(Self { templates })
    }

    /// Build a registry from the templates of a loaded configuration.
    pub fn from_config(config: &RenderConfig) -> Result<Self> {
        Self::new(config.templates.iter().cloned())
    }

    /// Look up a template.
    pub fn get(&self, id: &str) -> Result<&TemplateDefinition> {
        self.templates
            .get(id)
            .ok_or_else(|| Error::UnknownTemplate(id.to_string()))
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.templates.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbs_render_core::FrameOptions;

    fn definition(id: &str, text: &str, vars: &[&str]) -> TemplateDefinition {
        TemplateDefinition {
            id: id.to_string(),
            frame: FrameOptions::new(20).line(text),
            variable_names: vars.iter().map(|v| v.to_string()).collect(),
        }
    }

    #[test]
    fn test_registry_lookup() {
        let registry = TemplateRegistry::new(vec![
            definition("goodbye", "Bye {{user}}", &["user"]),
            definition("welcome", "Hi {{user}}", &["user"]),
        ])
        .unwrap();

        assert_eq!(registry.ids(), vec!["goodbye", "welcome"]);
        assert_eq!(registry.get("goodbye").unwrap().id, "goodbye");
    }

    #[test]
    fn test_registry_unknown_template() {
        let registry = TemplateRegistry::default();
        assert!(registry.ids().is_empty());
        let err = registry.get("missing").unwrap_err();
        assert!(matches!(err, Error::UnknownTemplate(id) if id == "missing"));
    }

    #[test]
    fn test_registry_rejects_duplicates() {
        let result = TemplateRegistry::new(vec![
            definition("menu", "a", &[]),
            definition("menu", "b", &[]),
        ]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_registry_rejects_undeclared_placeholder() {
        let result = TemplateRegistry::new(vec![definition("menu", "{{who}}", &[])]);
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_registry_from_config() {
        let config = RenderConfig::from_yaml(
            r#"
templates:
  - id: banner
    frame: { width: 12, content_lines: [{ text: "BBS" }] }
"#,
        )
        .unwrap();
        let registry = TemplateRegistry::from_config(&config).unwrap();
        assert_eq!(registry.ids(), vec!["banner"]);
    }
}

//! Configuration loaded from a YAML file: logging, extra contexts, templates.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{Error, RenderContext, Result, TemplateDefinition};

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Renderer configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct RenderConfig {
    /// Logging settings
    pub logging: LoggingSettings,
    /// Additional named contexts; builtins are always available
    pub contexts: BTreeMap<String, RenderContext>,
    /// Template definitions
    pub templates: Vec<TemplateDefinition>,
}

impl RenderConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: RenderConfig =
            serde_yaml::from_str(yaml).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(Error::Config(format!(
                "logging.level must be one of {}, got '{}'",
                LOG_LEVELS.join(", "),
                self.logging.level
            )));
        }

        for (name, ctx) in &self.contexts {
            if ctx.width < crate::MIN_FRAME_WIDTH {
                return Err(Error::Config(format!(
                    "context '{}' width {} is below the minimum of {}",
                    name,
                    ctx.width,
                    crate::MIN_FRAME_WIDTH
                )));
            }
        }

        let mut seen = HashSet::new();
        for template in &self.templates {
            template.validate()?;
            if !seen.insert(template.id.as_str()) {
                return Err(Error::Config(format!(
                    "duplicate template id '{}'",
                    template.id
                )));
            }
        }

        Ok(())
    }

    /// Resolve a context by name: builtins first, then configured contexts.
    pub fn context(&self, name: &str) -> Option<RenderContext> {
        RenderContext::builtin(name).or_else(|| self.contexts.get(name).copied())
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

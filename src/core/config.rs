//! `logmigrate.json` configuration.
//!
//! Every field is optional. CLI flags override file values, file values
//! override the rule set's defaults. The file is either passed with
//! `--config` or discovered as `logmigrate.json` in the working directory.

use serde::Deserialize;
use std::path::Path;

use crate::error::{Error, Result};
use crate::io;
use crate::rewrite::{QuoteStyle, RewriteOptions, RuleSet};

pub const CONFIG_FILE_NAME: &str = "logmigrate.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Config {
    /// Module the `{ log, logError }` import points at.
    pub import_path: Option<String>,
    /// Value for the `component` metadata field.
    pub component: Option<String>,
    pub quote: Option<QuoteStyle>,
    pub rules: Option<RuleSet>,
}

impl Config {
    /// Parse config JSON; `source` names the origin in error details.
    pub fn parse(content: &str, source: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::config_invalid_json(source, e))
    }

    /// Load an explicit config file. A path that does not exist is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::file_not_found(path.display().to_string())
                .with_hint("Check the --config path"));
        }

        let source = path.display().to_string();
        let content = io::read_file(path, &format!("read config {}", source))?;
        log_status!("config", "Loaded {}", source);
        Self::parse(&content, &source)
    }

    /// Load `logmigrate.json` from `dir` when present.
    pub fn discover(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.is_file() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Build rewrite options, with `rules_override` taking precedence over the
    /// configured rule set.
    pub fn resolve(&self, rules_override: Option<RuleSet>) -> Result<RewriteOptions> {
        let rules = rules_override.or(self.rules).unwrap_or_default();
        let mut options = RewriteOptions::for_rules(rules);

        if let Some(import_path) = &self.import_path {
            if import_path.trim().is_empty() {
                return Err(Error::config_invalid_value(
                    "importPath",
                    Some(import_path.clone()),
                    "must not be empty",
                ));
            }
            options.import_path = import_path.trim().to_string();
        }

        if let Some(component) = &self.component {
            if component.trim().is_empty() {
                return Err(Error::config_invalid_value(
                    "component",
                    Some(component.clone()),
                    "must not be empty",
                ));
            }
            options.component = component.clone();
        }

        if let Some(quote) = self.quote {
            options.quote = quote;
        }

        Ok(options)
    }
}

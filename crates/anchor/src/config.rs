use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::AnchorError;
use crate::rules::ReplacementRule;

/// Which hosting platform's anchor convention to reproduce.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AnchorStyle {
    /// Hosted-git renderers: strip pictographs, lowercase, delete
    /// punctuation outright, collapse whitespace/hyphen runs.
    #[default]
    Github,
    /// The Python-Markdown toc extension used by MkDocs: NFKD-fold to
    /// ASCII before the same strip/collapse steps.
    Mkdocs,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(default)]
pub struct AnchorConfig {
    pub version: String,
    pub base_dir: String,
    /// Glob patterns naming the docs to process, resolved against `base_dir`.
    /// A pattern without wildcards names one file that is expected to exist.
    pub docs: Vec<String>,
    pub anchor_style: AnchorStyle,
    /// Hand-authored rewrites applied before any derived fix.
    pub rules: Vec<ReplacementRule>,
}

impl Default for AnchorConfig {
    fn default() -> Self {
        let base_path = std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .display()
            .to_string();

        Self {
            version: "1".into(),
            base_dir: base_path,
            docs: vec!["**/*.md".into()],
            anchor_style: AnchorStyle::default(),
            rules: vec![],
        }
    }
}

impl AnchorConfig {
    /// Reads `anchorage.toml` from the base path. There is zero requirement
    /// for a config file at all, defaults cover everything, however a config
    /// file that exists and fails to parse is an error, not a silent reset.
    pub fn new_from_path(base_path: &Path) -> Result<Self, AnchorError> {
        let config_path = base_path.join("anchorage.toml");

        let Ok(contents) = std::fs::read_to_string(&config_path) else {
            return Ok(Self {
                base_dir: base_path.display().to_string(),
                ..Self::default()
            });
        };

        let user_supplied_config: AnchorConfig =
            toml::from_str(&contents).map_err(|source| AnchorError::Config {
                path: config_path,
                source,
            })?;

        Ok(Self {
            base_dir: base_path.display().to_string(),
            ..user_supplied_config
        })
    }

    /// Doc globs resolved against the base directory.
    pub fn doc_patterns(&self) -> Vec<String> {
        self.docs
            .iter()
            .map(|pattern| format!("{}/{}", self.base_dir, pattern))
            .collect()
    }

    /// The hand-authored rules that apply to one document.
    pub fn rules_for(&self, path: &Path) -> Vec<&ReplacementRule> {
        self.rules.iter().filter(|rule| rule.applies_to(path)).collect()
    }
}

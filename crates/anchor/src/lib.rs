use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use glob::glob;
use thiserror::Error;

use audit::AnchorIndex;
use config::AnchorConfig;
use document::Document;
use report::{FileReport, RunReport};

/// Anchor is the library that powers anchorage, as in somewhere safe to moor.
/// It does nothing but compute the anchors a markdown host generates for each
/// heading and repair the in-document references that drifted off them.
/// There is zero requirement for a config file at all, defaults are used,
/// however which files count as docs varies from repo to repo so afford
/// people the opportunity to say so.
pub mod audit;
pub mod config;
pub mod document;
pub mod report;
pub mod rules;
pub mod slug;

#[derive(Debug, Error)]
pub enum AnchorError {
    #[error("could not read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("bad doc pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    #[error("could not walk docs: {0}")]
    Glob(#[from] glob::GlobError),
}

pub struct Anchorage {
    pub config: AnchorConfig,
    pub documents: Vec<Document>,
    pub skipped: Vec<PathBuf>,
}

impl Anchorage {
    pub fn new(base_path: &Path) -> Result<Self, AnchorError> {
        Ok(Self {
            config: AnchorConfig::new_from_path(base_path)?,
            documents: vec![],
            skipped: vec![],
        })
    }

    /// Loads every document the config's patterns name. A pattern with no
    /// glob metacharacters names one exact file, and that file being absent
    /// is worth reporting rather than a silently empty match.
    pub fn scan_docs(&mut self) -> Result<&mut Self, AnchorError> {
        let mut seen = BTreeSet::new();

        for pattern in self.config.doc_patterns() {
            if !pattern.contains(['*', '?', '[']) && !Path::new(&pattern).exists() {
                self.skipped.push(PathBuf::from(&pattern));
                continue;
            }

            for entry in glob(&pattern)? {
                let path = entry?;
                if path.is_dir() || !seen.insert(path.clone()) {
                    continue;
                }
                self.documents.push(Document::new_from_path(&path)?);
            }
        }

        Ok(self)
    }

    /// Works out what `fix` would do without touching the filesystem.
    pub fn audit(&self) -> RunReport {
        let mut files = self.missing_reports();

        for document in &self.documents {
            let repair = audit::repair_document(document, &self.config);
            files.push(FileReport {
                path: document.at_path.clone(),
                missing: false,
                modified: repair.contents != document.contents,
                replacements: repair.replacements,
                remaining_issues: repair.remaining_issues,
            });
        }

        RunReport::new(files)
    }

    /// Repairs every scanned document in place. Files whose repaired text is
    /// byte-identical to what is on disk are not rewritten.
    pub fn fix(&mut self) -> Result<RunReport, AnchorError> {
        let mut files = self.missing_reports();

        for document in &mut self.documents {
            let repair = audit::repair_document(document, &self.config);
            let modified = repair.contents != document.contents;

            if modified {
                fs::write(&document.at_path, &repair.contents).map_err(|source| {
                    AnchorError::Io {
                        path: document.at_path.clone(),
                        source,
                    }
                })?;
                document.contents = repair.contents;
            }

            files.push(FileReport {
                path: document.at_path.clone(),
                missing: false,
                modified,
                replacements: repair.replacements,
                remaining_issues: repair.remaining_issues,
            });
        }

        Ok(RunReport::new(files))
    }

    /// The heading → anchor listing for every scanned document.
    pub fn anchor_index(&self) -> Vec<AnchorIndex> {
        self.documents
            .iter()
            .map(|document| audit::index_document(document, self.config.anchor_style))
            .collect()
    }

    fn missing_reports(&self) -> Vec<FileReport> {
        self.skipped
            .iter()
            .map(|path| FileReport::missing(path.clone()))
            .collect()
    }
}

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::rules::ReplacementRule;

/// What one processing pass did (or, for a check, would do) to one document.
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    /// An explicitly configured file that was not on disk. Skipped, never
    /// fatal; the rest of the pass continues.
    pub missing: bool,
    /// The contents changed, or would change.
    pub modified: bool,
    /// Every rule that matched, hand-authored and derived alike.
    pub replacements: Vec<ReplacementRule>,
    /// References that match no generated heading anchor and could not be
    /// repaired, with their source lines.
    pub remaining_issues: Vec<String>,
}

impl FileReport {
    pub fn missing(path: PathBuf) -> Self {
        Self {
            path,
            missing: true,
            modified: false,
            replacements: vec![],
            remaining_issues: vec![],
        }
    }

    /// How many rules matched this document.
    pub fn rules_applied(&self) -> usize {
        self.replacements.len()
    }

    pub fn is_clean(&self) -> bool {
        !self.missing && !self.modified && self.remaining_issues.is_empty()
    }
}

/// One whole pass over the configured docs.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub files: Vec<FileReport>,
}

impl RunReport {
    pub fn new(files: Vec<FileReport>) -> Self {
        Self {
            generated_at: Utc::now(),
            files,
        }
    }

    pub fn files_scanned(&self) -> usize {
        self.files.iter().filter(|file| !file.missing).count()
    }

    pub fn files_missing(&self) -> usize {
        self.files.iter().filter(|file| file.missing).count()
    }

    pub fn files_modified(&self) -> usize {
        self.files.iter().filter(|file| file.modified).count()
    }

    pub fn total_fixes(&self) -> usize {
        self.files.iter().map(FileReport::rules_applied).sum()
    }

    pub fn total_issues(&self) -> usize {
        self.files.iter().map(|file| file.remaining_issues.len()).sum()
    }

    /// Nothing to do across the whole pass: every file was found and no
    /// reference needs rewriting or remains unresolved.
    pub fn is_clean(&self) -> bool {
        self.files.iter().all(FileReport::is_clean)
    }
}

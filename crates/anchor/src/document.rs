use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::AnchorError;

/// A `(#fragment)` occurrence in body text, the shape markdown links use for
/// same-document targets.
static ANCHOR_REF: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\(#([^)]*)\)").unwrap());

/// One markdown file, read fully into memory.
#[derive(Debug)]
pub struct Document {
    pub at_path: PathBuf,
    pub contents: String,
}

/// A heading parsed out of a document, markers stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    pub depth: usize,
    pub title: String,
    /// 1-indexed source line.
    pub line: usize,
}

/// A same-document anchor reference found in body text, `#` and parentheses
/// stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorRef {
    pub fragment: String,
    /// 1-indexed source line.
    pub line: usize,
}

enum FenceKind {
    Backticks,
    Tildes,
}

impl Document {
    pub fn new_from_path(path: &Path) -> Result<Self, AnchorError> {
        let contents = fs::read_to_string(path).map_err(|source| AnchorError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self {
            at_path: path.to_path_buf(),
            contents,
        })
    }

    /// Every heading outside fenced code blocks.
    pub fn headings(&self) -> Vec<Heading> {
        let mut headings = vec![];
        self.scan_visible(|line_no, line| {
            if let Some(heading) = parse_heading(line_no, line) {
                headings.push(heading);
            }
        });
        headings
    }

    /// Every `(#…)` reference outside fenced code blocks.
    pub fn anchor_refs(&self) -> Vec<AnchorRef> {
        let mut refs = vec![];
        self.scan_visible(|line_no, line| {
            for capture in ANCHOR_REF.captures_iter(line) {
                refs.push(AnchorRef {
                    fragment: capture[1].to_string(),
                    line: line_no,
                });
            }
        });
        refs
    }

    /// Walks the document line by line, visiting only lines outside fenced
    /// code blocks. A fence opened with backticks only closes on backticks,
    /// and likewise for tildes.
    fn scan_visible<F: FnMut(usize, &str)>(&self, mut visit: F) {
        let mut fence: Option<FenceKind> = None;
        for (idx, line) in self.contents.lines().enumerate() {
            match &fence {
                None => {
                    if line.starts_with("```") {
                        fence = Some(FenceKind::Backticks);
                    } else if line.starts_with("~~~") {
                        fence = Some(FenceKind::Tildes);
                    } else {
                        visit(idx + 1, line);
                    }
                }
                Some(kind) => match kind {
                    FenceKind::Backticks if line.starts_with("```") => {
                        fence = None;
                    }
                    FenceKind::Tildes if line.starts_with("~~~") => {
                        fence = None;
                    }
                    _ => {}
                },
            }
        }
    }
}

fn parse_heading(line_no: usize, line: &str) -> Option<Heading> {
    let trimmed = line.trim_end();
    let depth = trimmed.chars().take_while(|c| *c == '#').count();
    if depth == 0 || depth > 6 {
        return None;
    }

    // ATX headings need whitespace between the markers and the title;
    // a bare marker run ("##") is an empty heading.
    let rest = &trimmed[depth..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    Some(Heading {
        depth,
        title: rest.trim_start().to_owned(),
        line: line_no,
    })
}

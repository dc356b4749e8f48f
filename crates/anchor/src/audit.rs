use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::Serialize;

use crate::config::{AnchorConfig, AnchorStyle};
use crate::document::Document;
use crate::rules::{self, ReplacementRule};
use crate::slug;

/// What the diff worked out for one document: the anchor set its headings
/// generate, plus the repairs and leftover issues found by checking every
/// reference against that set.
#[derive(Debug)]
pub struct DocAudit {
    pub anchors: BTreeSet<String>,
    pub fixes: Vec<ReplacementRule>,
    pub issues: Vec<String>,
}

/// Diffs a document's `(#…)` references against the anchors generated from
/// its headings. A stale fragment is repairable when renormalising it lands
/// on a generated anchor, which covers doubled hyphens left by deleted
/// punctuation as well as pictographs and case drift in the fragment.
pub fn audit_document(document: &Document, style: AnchorStyle) -> DocAudit {
    let anchors: BTreeSet<String> = document
        .headings()
        .iter()
        .map(|heading| slug::slug_for_title_style(&heading.title, style))
        .collect();

    let mut fixes: Vec<ReplacementRule> = vec![];
    let mut repaired = BTreeSet::new();

    let mut issues = vec![];

    for anchor_ref in document.anchor_refs() {
        if anchors.contains(&anchor_ref.fragment) {
            continue;
        }

        let renormalized = slug::slug_for_title_style(&anchor_ref.fragment, style);
        if renormalized != anchor_ref.fragment && anchors.contains(&renormalized) {
            // One rule per unique fragment; replacement covers every occurrence.
            if repaired.insert(anchor_ref.fragment.clone()) {
                fixes.push(ReplacementRule::new(
                    format!("(#{})", anchor_ref.fragment),
                    format!("(#{renormalized})"),
                ));
            }
        } else {
            issues.push(format!(
                "line {}: (#{}) does not match any heading anchor",
                anchor_ref.line, anchor_ref.fragment
            ));
        }
    }

    DocAudit { anchors, fixes, issues }
}

/// Outcome of running the hand-authored table and the derived fixes over one
/// document's text. `contents` is the repaired text; nothing is written here.
#[derive(Debug)]
pub struct Repair {
    pub contents: String,
    pub replacements: Vec<ReplacementRule>,
    pub remaining_issues: Vec<String>,
}

/// Applies the configured table first, then audits what the table left and
/// applies the derived fixes, so `remaining_issues` describes the document
/// as it ends up, not as it started.
pub fn repair_document(document: &Document, config: &AnchorConfig) -> Repair {
    let table = config.rules_for(&document.at_path);
    let (contents, mut replacements) = rules::apply_rules(&document.contents, table);

    let tabled = Document {
        at_path: document.at_path.clone(),
        contents,
    };
    let audit = audit_document(&tabled, config.anchor_style);
    let (contents, derived) = rules::apply_rules(&tabled.contents, audit.fixes.iter());
    replacements.extend(derived);

    Repair {
        contents,
        replacements,
        remaining_issues: audit.issues,
    }
}

/// One document's heading → anchor listing.
#[derive(Debug, Serialize)]
pub struct AnchorIndex {
    pub path: PathBuf,
    pub entries: Vec<IndexEntry>,
}

#[derive(Debug, Serialize)]
pub struct IndexEntry {
    pub depth: usize,
    pub line: usize,
    pub title: String,
    pub anchor: String,
}

pub fn index_document(document: &Document, style: AnchorStyle) -> AnchorIndex {
    let entries = document
        .headings()
        .into_iter()
        .map(|heading| IndexEntry {
            depth: heading.depth,
            line: heading.line,
            anchor: format!("#{}", slug::slug_for_title_style(&heading.title, style)),
            title: heading.title,
        })
        .collect();

    AnchorIndex {
        path: document.at_path.clone(),
        entries,
    }
}

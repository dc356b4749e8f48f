use std::path::Path;

use serde::{Deserialize, Serialize};

/// A literal link rewrite, `(#…)` syntax included on both sides so plain
/// prose mentioning a slug is never touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementRule {
    /// Restrict the rule to documents whose path ends with this value.
    /// Absent means the rule applies to every document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    pub stale: String,
    pub corrected: String,
}

impl ReplacementRule {
    pub fn new(stale: impl Into<String>, corrected: impl Into<String>) -> Self {
        Self {
            file: None,
            stale: stale.into(),
            corrected: corrected.into(),
        }
    }

    pub fn applies_to(&self, path: &Path) -> bool {
        match &self.file {
            Some(name) => path.ends_with(name),
            None => true,
        }
    }
}

/// Applies rules in order as literal whole-content replacements. Every
/// occurrence of a matching rule's stale string is replaced; the returned
/// list holds each rule that matched, once, regardless of occurrence count.
pub fn apply_rules<'a>(
    contents: &str,
    rules: impl IntoIterator<Item = &'a ReplacementRule>,
) -> (String, Vec<ReplacementRule>) {
    let mut out = contents.to_owned();
    let mut matched = vec![];

    for rule in rules {
        if out.contains(&rule.stale) {
            out = out.replace(&rule.stale, &rule.corrected);
            matched.push(rule.clone());
        }
    }

    (out, matched)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_replaces_every_occurrence_but_counts_the_rule_once() {
        let rule = ReplacementRule::new("(#a--b)", "(#a-b)");
        let (out, matched) = apply_rules("see (#a--b) and again (#a--b)", [&rule]);

        assert_eq!(out, "see (#a-b) and again (#a-b)");
        assert_eq!(matched, vec![rule]);
    }

    #[test]
    fn test_unmatched_rules_are_not_counted() {
        let rules = [
            ReplacementRule::new("(#present)", "(#fixed)"),
            ReplacementRule::new("(#absent)", "(#whatever)"),
        ];
        let (out, matched) = apply_rules("link (#present)", rules.iter());

        assert_eq!(out, "link (#fixed)");
        assert_eq!(matched, vec![rules[0].clone()]);
    }

    #[test]
    fn test_rules_apply_in_order_over_prior_output() {
        let rules = [
            ReplacementRule::new("(#one)", "(#two)"),
            ReplacementRule::new("(#two)", "(#three)"),
        ];
        let (out, matched) = apply_rules("go to (#one)", rules.iter());

        assert_eq!(out, "go to (#three)");
        assert_eq!(matched.len(), 2);
    }

    #[test]
    fn test_identity_rule_matches_without_changing_anything() {
        let rule = ReplacementRule::new("(#overview)", "(#overview)");
        let (out, matched) = apply_rules("see (#overview)", [&rule]);

        assert_eq!(out, "see (#overview)");
        assert_eq!(matched.len(), 1);
    }

    #[test]
    fn test_file_scoping() {
        let scoped = ReplacementRule {
            file: Some("ENTERPRISE_GUIDE.md".into()),
            stale: "(#a--b)".into(),
            corrected: "(#a-b)".into(),
        };

        assert!(scoped.applies_to(Path::new("docs/ENTERPRISE_GUIDE.md")));
        assert!(!scoped.applies_to(Path::new("docs/README.md")));
        assert!(ReplacementRule::new("(#x)", "(#y)").applies_to(Path::new("docs/README.md")));
    }
}

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use crate::config::AnchorStyle;

/// Leading run of `#` markers plus the whitespace immediately after it.
static HEADER_MARKER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^#+\s*").unwrap());

/// Anything that is not a word character, whitespace, or a hyphen.
static NON_WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());

/// A maximal run of hyphens and/or whitespace.
static SEPARATOR_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[-\s]+").unwrap());

/// Converts a markdown header line into the anchor a hosting renderer would
/// generate for it, `#` prefix included.
///
/// Example: `## 🚀 Quick Start` → `#quick-start`
pub fn anchor_for(header_line: &str) -> String {
    anchor_for_style(header_line, AnchorStyle::Github)
}

pub fn anchor_for_style(header_line: &str, style: AnchorStyle) -> String {
    let title = HEADER_MARKER.replace(header_line, "");
    format!("#{}", slug_for_title_style(&title, style))
}

/// Derives the bare slug (no `#` prefix) for a header title, or renormalises
/// an existing anchor fragment. Total over all inputs and idempotent: feeding
/// a generated slug back in reproduces it unchanged.
pub fn slug_for_title(title: &str) -> String {
    slug_for_title_style(title, AnchorStyle::Github)
}

pub fn slug_for_title_style(title: &str, style: AnchorStyle) -> String {
    match style {
        AnchorStyle::Github => github_slug(title),
        AnchorStyle::Mkdocs => mkdocs_slug(title),
    }
}

/// Hosted-git convention: strip pictographs, lowercase, delete punctuation
/// outright, collapse separators. Punctuation never becomes a hyphen, so
/// `CI/CD` slugs to `cicd`, not `ci-cd`.
fn github_slug(title: &str) -> String {
    let text: String = title.chars().filter(|c| !is_pictograph(*c)).collect();
    let text = text.to_lowercase();
    let text = NON_WORD.replace_all(&text, "");
    let text = SEPARATOR_RUN.replace_all(&text, "-");
    text.trim_matches('-').to_string()
}

/// The Python-Markdown toc convention used by MkDocs: NFKD-normalise, drop
/// everything outside ASCII, strip punctuation, lowercase, trim surrounding
/// whitespace, collapse separators. That pipeline has no hyphen trim, so a
/// hyphen-bracketed title keeps its bracketing hyphens in the id.
fn mkdocs_slug(title: &str) -> String {
    let normalized: String = title.nfkd().filter(char::is_ascii).collect();
    let text = NON_WORD.replace_all(&normalized, "");
    let text = text.to_lowercase();
    SEPARATOR_RUN.replace_all(text.trim(), "-").into_owned()
}

/// Pictographic and emoji ranges stripped from titles before slugging.
fn is_pictograph(c: char) -> bool {
    matches!(
        c,
        '\u{1F600}'..='\u{1F64F}'
            | '\u{1F300}'..='\u{1F5FF}'
            | '\u{1F680}'..='\u{1F6FF}'
            | '\u{1F1E0}'..='\u{1F1FF}'
            | '\u{2600}'..='\u{26FF}'
            | '\u{2700}'..='\u{27BF}'
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_emoji_is_stripped() {
        assert_eq!(anchor_for("## 🚀 Quick Start"), "#quick-start");
        assert_eq!(anchor_for("## 🔒 Security Best Practices"), "#security-best-practices");
    }

    #[test]
    fn test_ampersand_is_deleted_not_hyphenated() {
        assert_eq!(anchor_for("## Monitoring & Alerting"), "#monitoring-alerting");
        assert_eq!(anchor_for("## Compliance & Auditing"), "#compliance-auditing");
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(anchor_for("## Step   By    Step Guide"), "#step-by-step-guide");
    }

    #[test]
    fn test_symbol_only_title_yields_bare_hash() {
        assert_eq!(anchor_for("## 🎉🎉"), "#");
        assert_eq!(anchor_for("##"), "#");
    }

    #[test]
    fn test_slash_is_deleted_outright() {
        assert_eq!(anchor_for("## CI/CD Integration"), "#cicd-integration");
    }

    #[test]
    fn test_marker_depth_does_not_matter() {
        assert_eq!(anchor_for("# Overview"), "#overview");
        assert_eq!(anchor_for("#### Deeply Nested Topic"), "#deeply-nested-topic");
    }

    #[test]
    fn test_underscores_survive() {
        assert_eq!(anchor_for("## snake_case names"), "#snake_case-names");
    }

    #[test]
    fn test_regional_indicators_are_pictographs() {
        assert_eq!(anchor_for("## 🇩🇪 Regional Setup"), "#regional-setup");
    }

    #[test]
    fn test_trailing_closing_markers_wash_out() {
        assert_eq!(anchor_for("## Closing Style ##"), "#closing-style");
    }

    #[test]
    fn test_fragment_renormalisation_is_idempotent() {
        for header in [
            "## 🚀 Quick Start",
            "## Monitoring & Alerting",
            "## Step   By    Step Guide",
            "## CI/CD Integration",
            "### run `anchorage fix`",
        ] {
            let slug = slug_for_title(header.trim_start_matches(['#', ' ']));
            assert_eq!(slug_for_title(&slug), slug);
        }
    }

    #[test]
    fn test_ascii_titles_keep_the_slug_charset() {
        for header in [
            "## Monitoring & Alerting",
            "##   Padded   Title ",
            "## Mixed: punctuation, (parens) and [brackets]!",
            "## --- leading and trailing ---",
        ] {
            let anchor = anchor_for(header);
            assert!(anchor.starts_with('#'));
            let slug = &anchor[1..];
            assert!(
                slug.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_'),
                "unexpected character in {slug:?}"
            );
            assert!(!slug.starts_with('-') && !slug.ends_with('-'));
            assert!(!slug.contains("--"));
        }
    }

    #[test]
    fn test_accented_letters_are_preserved_by_default() {
        assert_eq!(anchor_for("## Présentation Générale"), "#présentation-générale");
    }

    #[test]
    fn test_mkdocs_style_folds_accents_to_ascii() {
        assert_eq!(slug_for_title_style("Crème Brûlée", AnchorStyle::Mkdocs), "creme-brulee");
        assert_eq!(
            slug_for_title_style("Cross-references to other projects / inventories", AnchorStyle::Mkdocs),
            "cross-references-to-other-projects-inventories"
        );
        assert_eq!(
            anchor_for_style("## Présentation Générale", AnchorStyle::Mkdocs),
            "#presentation-generale"
        );
    }

    #[test]
    fn test_mkdocs_style_keeps_bracketing_hyphens() {
        assert_eq!(slug_for_title_style("- Intro -", AnchorStyle::Mkdocs), "-intro-");
        assert_eq!(anchor_for_style("## - Intro -", AnchorStyle::Mkdocs), "#-intro-");
        assert_eq!(slug_for_title("- Intro -"), "intro");
    }
}

use anchor_lib::audit::AnchorIndex;
use anchor_lib::report::{FileReport, RunReport};
use owo_colors::OwoColorize;

fn render_missing(file: &FileReport) {
    eprintln!(
        "{}",
        format!(
            "{} is named in the config but does not exist",
            file.path.display()
        )
        .red()
    );
}

pub fn render_check(report: &RunReport) {
    for file in &report.files {
        if file.missing {
            render_missing(file);
            continue;
        }

        if file.is_clean() {
            continue;
        }

        println!("{}", file.path.display().bold());
        for rule in &file.replacements {
            println!(
                "  would rewrite {} as {}",
                rule.stale,
                rule.corrected.green()
            );
        }
        for issue in &file.remaining_issues {
            println!("  {}", issue.yellow());
        }
    }

    println!(
        "{} files checked, {} would change, {} unresolved references",
        report.files_scanned(),
        report.files_modified(),
        report.total_issues()
    );

    if report.is_clean() {
        println!("{}", "Every anchor reference resolves".green());
    }
}

pub fn render_fix(report: &RunReport) {
    for file in &report.files {
        if file.missing {
            render_missing(file);
            continue;
        }

        if file.replacements.is_empty() && file.remaining_issues.is_empty() {
            continue;
        }

        println!("{}", file.path.display().bold());
        for rule in &file.replacements {
            println!(
                "  rewrote {} as {}",
                rule.stale,
                rule.corrected.green()
            );
        }
        for issue in &file.remaining_issues {
            println!("  {}", issue.yellow());
        }
    }

    println!(
        "{} files scanned, {} rewritten, {} fixes applied, {} references still unresolved",
        report.files_scanned(),
        report.files_modified(),
        report.total_fixes(),
        report.total_issues()
    );
}

pub fn render_anchors(indexes: &[AnchorIndex]) {
    for index in indexes {
        println!("{}", index.path.display().bold());
        for entry in &index.entries {
            println!(
                "  {:>4}  {}  {}",
                entry.line,
                entry.anchor.green(),
                entry.title
            );
        }
    }
}

use std::{fs, path::PathBuf};

use anchor_lib::Anchorage;
use clap::{Parser, Subcommand};
use console::{render_anchors, render_check, render_fix};
use resolve_path::PathResolveExt;

pub mod console;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Report every stale anchor reference without touching a file.
    Check {
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        #[arg(long)]
        json: bool,
    },
    /// Rewrite stale anchor references in place.
    Fix {
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        #[arg(long)]
        json: bool,
    },
    /// Print the anchor every heading generates.
    Anchors {
        #[arg(short, long, default_value = ".")]
        path: PathBuf,

        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match args.cmd {
        Commands::Check { path, json } => {
            let mut instance = Anchorage::new(&fs::canonicalize(path.resolve())?)?;
            let report = instance.scan_docs()?.audit();

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                render_check(&report);
            }

            if !report.is_clean() {
                std::process::exit(1);
            }
        }
        Commands::Fix { path, json } => {
            let mut instance = Anchorage::new(&fs::canonicalize(path.resolve())?)?;
            let report = instance.scan_docs()?.fix()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                render_fix(&report);
            }

            if report.total_issues() > 0 || report.files_missing() > 0 {
                std::process::exit(1);
            }
        }
        Commands::Anchors { path, json } => {
            let mut instance = Anchorage::new(&fs::canonicalize(path.resolve())?)?;
            instance.scan_docs()?;
            let indexes = instance.anchor_index();

            if json {
                println!("{}", serde_json::to_string_pretty(&indexes)?);
            } else {
                render_anchors(&indexes);
            }
        }
    }

    Ok(())
}

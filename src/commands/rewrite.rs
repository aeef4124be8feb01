use clap::Args;
use std::path::{Path, PathBuf};

use logmigrate::config::{Config, CONFIG_FILE_NAME};
use logmigrate::io::display_name;
use logmigrate::rewrite::{self, RewriteOptions, RuleSet};
use logmigrate::{ErrorCode, RunSummary};

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args, Debug, Default)]
pub struct RewriteArgs {
    /// Source files to rewrite in place
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Report what would change without writing files
    #[arg(long)]
    pub dry_run: bool,

    /// Rule set: console, icons (default: console, or the config value)
    #[arg(long, value_name = "SET")]
    pub rules: Option<String>,

    /// Config file (default: ./logmigrate.json when present)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

pub fn run(args: &RewriteArgs, global: &GlobalArgs) -> CmdResult<RunSummary> {
    let rules = args
        .rules
        .as_deref()
        .map(str::parse::<RuleSet>)
        .transpose()?;
    let options = match &args.config {
        Some(path) => Config::load(path)?.resolve(rules)?,
        None => discovered_options(Path::new("."), rules),
    };

    let mut summary = RunSummary::new(options.rules.as_str(), args.dry_run);
    let human = !global.json;

    for path in &args.files {
        match rewrite::rewrite_file(path, &options, args.dry_run) {
            Ok(report) => {
                if human {
                    println!(
                        "✓ {}: {} statements converted",
                        report.name, report.replacements
                    );
                }
                summary.record_success(report);
            }
            Err(err) if err.code == ErrorCode::FileNotFound => {
                if human {
                    eprintln!("File not found: {}", path.display());
                }
                summary.record_failure(path.display().to_string(), &err);
            }
            Err(err) => {
                if human {
                    eprintln!("Error refactoring {}: {}", path.display(), err.describe());
                    eprintln!("✗ {}: Failed", display_name(path));
                }
                summary.record_failure(path.display().to_string(), &err);
            }
        }
    }

    if human {
        print_summary(&summary);
    }

    Ok((summary, 0))
}

/// Options from `logmigrate.json` in `dir`, if there is one. A discovered
/// file that fails to load or resolve is reported on stderr and the
/// defaults are used instead.
fn discovered_options(dir: &Path, rules: Option<RuleSet>) -> RewriteOptions {
    Config::discover(dir)
        .and_then(|config| config.unwrap_or_default().resolve(rules))
        .unwrap_or_else(|err| {
            eprintln!("Ignoring {}: {}", CONFIG_FILE_NAME, err.describe());
            RewriteOptions::for_rules(rules.unwrap_or_default())
        })
}

fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    for report in &summary.files {
        println!("  {}: {} statements", report.name, report.replacements);
    }
    println!("Total files: {}", summary.total_files);
    println!("Total statements: {}", summary.total_replacements);
    if summary.dry_run {
        println!("Dry run: no files were written");
    }
}

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::pending_tags::{self, PendingTagsOptions};
use crate::commands::rollup::{self, RollupOptions};
use crate::commands::verify::{self, VerifyOptions};
use crate::commands::{CommandReport, status};
use crate::logging;

/// Roll scraped watch-history day entries into a week/day/category treemap.
#[derive(Parser, Debug)]
#[command(name = "watch-rollup", version, about, long_about = None)]
struct Cli {
    /// Print the command report as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the treemap hierarchy and write it to the output file
    Rollup(RollupArgs),
    /// Check category metadata and input date labels
    Verify(VerifyArgs),
    /// List titles that still need a tag from the external tagger
    PendingTags(PendingTagsArgs),
    /// Show resolved paths and effective configuration
    Status,
}

#[derive(Args, Debug)]
struct RollupArgs {
    /// Scraped day entries (JSON array)
    #[arg(long)]
    input: Option<PathBuf>,
    /// Category metadata (JSON or JSON5)
    #[arg(long)]
    metadata: Option<PathBuf>,
    /// Title-to-tag store merged onto untagged videos
    #[arg(long)]
    tags: Option<PathBuf>,
    /// Where to write the hierarchy
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Reference date (YYYY-MM-DD) for relative labels such as `hoy`
    #[arg(long)]
    today: Option<String>,
}

#[derive(Args, Debug)]
struct VerifyArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    metadata: Option<PathBuf>,
    #[arg(long)]
    today: Option<String>,
    /// Treat unresolvable date labels as issues
    #[arg(long)]
    strict: bool,
}

#[derive(Args, Debug)]
struct PendingTagsArgs {
    #[arg(long)]
    input: Option<PathBuf>,
    #[arg(long)]
    tags: Option<PathBuf>,
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    let state = if report.ok { "ok" } else { "issues" };
    println!("{}: {state}", report.command);
    for detail in &report.details {
        println!("  - {detail}");
    }
    if !report.issues.is_empty() {
        println!("issues:");
        for issue in &report.issues {
            println!("  - {issue}");
        }
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init();

    let report = match cli.command {
        Command::Rollup(args) => rollup::run(&RollupOptions {
            input: args.input,
            metadata: args.metadata,
            tags: args.tags,
            output: args.output,
            today: args.today,
        })?,
        Command::Verify(args) => verify::run(&VerifyOptions {
            input: args.input,
            metadata: args.metadata,
            today: args.today,
            strict: args.strict,
        })?,
        Command::PendingTags(args) => pending_tags::run(&PendingTagsOptions {
            input: args.input,
            tags: args.tags,
        })?,
        Command::Status => status::run()?,
    };

    print_report(&report, cli.json)?;
    if !report.ok {
        anyhow::bail!(
            "{} reported {} issue(s)",
            report.command,
            report.issues.len()
        );
    }
    Ok(())
}

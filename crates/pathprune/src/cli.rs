//! Command-line surface for the `pathprune` binary.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use crate::app::manifest;
use crate::app::prune::{MatchMode, Pruner};
use crate::app::report::{self, ReportFormat};
use crate::domain::model::PathSet;
use crate::infra::config::Config;
use crate::infra::fs::FsClassifier;

#[derive(Debug, Parser)]
#[command(
    name = "pathprune",
    author,
    version,
    about = "Reduce directory and file lists to a minimal covering set",
    long_about = None
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Drop every entry already covered by a listed directory and print the rest
    Prune(PruneArgs),
    /// Print shell completions to stdout
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Debug, Args)]
pub struct PruneArgs {
    /// Directory to include; repeatable
    #[arg(short = 'd', long = "dir", value_name = "PATH")]
    pub directories: Vec<String>,
    /// File to include; repeatable
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub files: Vec<String>,
    /// JSON manifest with `directories` and `files` lists, merged ahead of --dir/--file
    #[arg(short, long, value_name = "FILE")]
    pub manifest: Option<PathBuf>,
    /// Prefix stripped from every entry after pruning
    #[arg(long, value_name = "PREFIX")]
    pub root: Option<String>,
    #[arg(long, value_enum)]
    pub format: Option<ReportFormat>,
    #[arg(long, value_enum)]
    pub match_mode: Option<MatchMode>,
    /// Write the report here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Prune(args) => {
            let config = Config::load()?;
            run_prune(args, &config)
        }
        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "pathprune", &mut io::stdout());
            Ok(())
        }
    }
}

fn run_prune(args: PruneArgs, config: &Config) -> Result<()> {
    let mut set = match &args.manifest {
        Some(path) => manifest::load(path)?,
        None => PathSet::new(),
    };
    set.set_directories(append(set.directories(), args.directories));
    set.set_files(append(set.files(), args.files));

    if set.is_empty() {
        tracing::warn!("no directories or files given; the report will be empty");
    }

    let pruner = Pruner::new(args.match_mode.unwrap_or_else(|| config.prune.match_mode()));
    pruner
        .prune(&mut set, &FsClassifier)
        .context("failed to prune path set")?;

    if let Some(root) = args.root.as_deref().or(config.display.root()) {
        set.trim_root(root);
    }

    let format = args.format.unwrap_or_else(|| config.display.format());
    tracing::debug!(
        mode = pruner.mode().as_str(),
        format = format.as_str(),
        "rendering report"
    );
    let rendered = report::render(&set, format)?;

    match &args.output {
        Some(path) => fs::write(path, &rendered)
            .with_context(|| format!("failed to write report to {}", path.display()))?,
        None => io::stdout()
            .write_all(rendered.as_bytes())
            .context("failed to write report to stdout")?,
    }
    Ok(())
}

fn append(existing: &[String], extra: Vec<String>) -> Vec<String> {
    existing.iter().cloned().chain(extra).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_repeated_paths_and_options() {
        let cli = Cli::try_parse_from([
            "pathprune",
            "-v",
            "prune",
            "--dir",
            "/a",
            "-d",
            "/b",
            "--file",
            "/a/x.txt",
            "--match-mode",
            "segment",
            "--format",
            "json",
        ])
        .expect("valid arguments");

        assert_eq!(cli.verbose, 1);
        let Commands::Prune(args) = cli.command else {
            panic!("expected prune subcommand");
        };
        assert_eq!(args.directories, ["/a", "/b"]);
        assert_eq!(args.files, ["/a/x.txt"]);
        assert_eq!(args.match_mode, Some(MatchMode::Segment));
        assert_eq!(args.format, Some(ReportFormat::Json));
    }

    #[test]
    fn run_prune_writes_trimmed_report() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let root = temp.path();
        fs::create_dir_all(root.join("dist/styles/css"))?;
        fs::write(root.join("dist/styles/app.css"), b"body{}")?;
        fs::write(root.join("dist/manifest.json"), b"{}")?;

        let root_str = root.display().to_string();
        let output = root.join("report.txt");
        let args = PruneArgs {
            directories: vec![
                format!("{root_str}/dist/styles/css"),
                format!("{root_str}/dist/styles"),
            ],
            files: vec![
                format!("{root_str}/dist/styles/app.css"),
                format!("{root_str}/dist/manifest.json"),
            ],
            manifest: None,
            root: Some(root_str),
            format: Some(ReportFormat::Plain),
            match_mode: None,
            output: Some(output.clone()),
        };

        run_prune(args, &Config::default())?;

        let written = fs::read_to_string(output)?;
        assert_eq!(
            written,
            "directories:\n  /dist/styles\nfiles:\n  /dist/manifest.json\n"
        );
        Ok(())
    }

    #[test]
    fn run_prune_with_no_entries_writes_empty_report() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let output = temp.path().join("report.json");
        let args = PruneArgs {
            directories: Vec::new(),
            files: Vec::new(),
            manifest: None,
            root: None,
            format: Some(ReportFormat::Json),
            match_mode: Some(MatchMode::Segment),
            output: Some(output.clone()),
        };

        run_prune(args, &Config::default())?;

        let written: PathSet = serde_json::from_str(&fs::read_to_string(output)?)?;
        assert!(written.is_empty());
        Ok(())
    }
}

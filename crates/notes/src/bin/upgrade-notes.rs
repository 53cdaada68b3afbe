// ABOUTME: CLI binary for trimming GKE release notes and Kubernetes changelogs.
// ABOUTME: Reads documents from files or stdin and writes the retained text to stdout or a file.

use std::fs;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use upgrade_notes::decode::charset_from_content_type;
use upgrade_notes::{
    decode_body, load_builtin_rules, render_upgrade_risk_report, ChangelogFilter, Html,
    MinorVersion, ReleaseNotesExtractor, Rules, UpgradeRiskReportArgs,
};

#[derive(Parser, Debug)]
#[command(name = "upgrade-notes")]
#[command(about = "Keep only the upgrade-relevant parts of release notes and changelogs")]
struct Args {
    /// JSON rules file overriding the builtin rules
    #[arg(long = "rules", global = true)]
    rules: Option<PathBuf>,

    /// Output file path (default: stdout)
    #[arg(short = 'o', long = "output", global = true)]
    output: Option<PathBuf>,

    /// Print elapsed time in ms to stderr
    #[arg(long = "timing", global = true)]
    timing: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract release blocks from an HTML release notes page
    ReleaseNotes {
        /// HTML file (default: stdin)
        input: Option<PathBuf>,

        /// Content-Type of the input as served, used for its charset
        #[arg(long = "content-type")]
        content_type: Option<String>,
    },

    /// Keep only the version sections of a Markdown changelog
    Changelog {
        /// Changelog file (default: stdin)
        input: Option<PathBuf>,
    },

    /// Render the upgrade risk report prompt
    RiskPrompt {
        #[arg(long = "cluster-name")]
        cluster_name: String,

        #[arg(long = "cluster-location")]
        cluster_location: String,

        #[arg(long = "target-version")]
        target_version: Option<String>,

        /// Output the full prompt result as JSON
        #[arg(long = "json")]
        json_output: bool,
    },

    /// Print the upstream changelog URL for a Kubernetes minor version
    ChangelogUrl {
        /// Minor version, e.g. 1.33
        version: String,
    },
}

fn read_input(path: Option<&Path>) -> Result<Vec<u8>> {
    match path {
        Some(p) if p != Path::new("-") => {
            fs::read(p).with_context(|| format!("error reading file {:?}", p))
        }
        _ => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("error reading stdin")?;
            Ok(buf)
        }
    }
}

fn load_rules(path: Option<&Path>) -> Result<Rules> {
    match path {
        Some(p) => Rules::from_path(p).with_context(|| format!("error loading rules {:?}", p)),
        None => Ok(load_builtin_rules()),
    }
}

fn run(args: &Args) -> Result<String> {
    match &args.command {
        Command::ReleaseNotes {
            input,
            content_type,
        } => {
            let rules = load_rules(args.rules.as_deref())?;
            let extractor = ReleaseNotesExtractor::new(&rules.release_notes)?;
            let bytes = read_input(input.as_deref())?;
            let charset = content_type.as_deref().and_then(charset_from_content_type);
            let html = decode_body(&bytes, charset.as_deref());
            let mut doc = Html::parse_document(&html);
            Ok(extractor.extract(&mut doc))
        }
        Command::Changelog { input } => {
            let rules = load_rules(args.rules.as_deref())?;
            let filter = ChangelogFilter::new(&rules.changelog)?;
            let bytes = read_input(input.as_deref())?;
            Ok(filter.filter(&decode_body(&bytes, Some("utf-8"))))
        }
        Command::RiskPrompt {
            cluster_name,
            cluster_location,
            target_version,
            json_output,
        } => {
            let result = render_upgrade_risk_report(&UpgradeRiskReportArgs {
                cluster_name: cluster_name.clone(),
                cluster_location: cluster_location.clone(),
                target_version: target_version.clone(),
            })?;
            if *json_output {
                Ok(serde_json::to_string_pretty(&result)?)
            } else {
                Ok(result
                    .messages
                    .iter()
                    .map(|m| m.text.as_str())
                    .collect::<Vec<_>>()
                    .join("\n\n"))
            }
        }
        Command::ChangelogUrl { version } => {
            let version = MinorVersion::parse(version)?;
            Ok(format!("{}\n", version.changelog_url()))
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let start = Instant::now();

    let output = match run(&args) {
        Ok(output) => output,
        Err(e) => {
            eprintln!("error: {:#}", e);
            return ExitCode::from(1);
        }
    };

    let elapsed = start.elapsed();
    let mut had_error = false;

    if let Some(output_path) = &args.output {
        if let Err(e) = fs::write(output_path, &output) {
            eprintln!("error writing to {:?}: {}", output_path, e);
            had_error = true;
        }
    } else {
        let mut stdout = io::stdout().lock();
        if let Err(e) = stdout.write_all(output.as_bytes()) {
            eprintln!("error writing to stdout: {}", e);
            had_error = true;
        }
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", elapsed.as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

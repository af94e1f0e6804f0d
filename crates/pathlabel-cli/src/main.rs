//! CLI entry point for pathlabel.
//!
//! This module is intentionally thin: it handles argument parsing, I/O, and exit codes.
//! All business logic lives in the `pathlabel-app` crate.

mod logging;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Args, Parser, Subcommand};
use pathlabel_app::{
    LabelInput, LabelSink, PullRequestFiles, PullRequestLabels, StaticPaths, error_report,
    format_explanation, is_config_error, outcome_exit_code, parse_path_list, parse_report_json,
    pull_request_number_from_event, render_annotations, render_markdown, run_explain, run_label,
    run_validate, serialize_report, to_renderable,
};
use pathlabel_github::{ClientConfig, DEFAULT_API_URL, GitHubClient, Repository};
use pathlabel_settings::ConfigFormat;
use pathlabel_types::{LabelReport, SourceKind, SourceMeta};
use std::io::Read;
use std::process::Command;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

/// Exit code for unparsable or invalid label configuration.
const EXIT_CONFIG: i32 = 2;
/// Exit code for every other failure (I/O, network, git).
const EXIT_RUNTIME: i32 = 1;

#[derive(Parser, Debug)]
#[command(
    name = "pathlabel",
    version,
    about = "Label pull requests by the paths they change"
)]
struct Cli {
    /// Repository root; the config path is resolved against it.
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Path to the label config (TOML, or YAML for .yml/.yaml).
    #[arg(long, default_value = "pathlabel.toml")]
    config: Utf8PathBuf,

    /// Default log filter when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines.
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Args, Debug, Clone)]
struct ReportArgs {
    /// Where to write the JSON report.
    #[arg(long, default_value = "artifacts/pathlabel/report.json")]
    report_out: Utf8PathBuf,

    /// Write a Markdown summary alongside the JSON.
    #[arg(long)]
    write_markdown: bool,

    /// Where to write the Markdown summary (if enabled).
    #[arg(long, default_value = "artifacts/pathlabel/comment.md")]
    markdown_out: Utf8PathBuf,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Label a GitHub pull request from its changed files.
    Label {
        /// Repository as owner/name.
        #[arg(long, env = "GITHUB_REPOSITORY")]
        repository: Option<String>,

        /// Pull request number (falls back to the event payload).
        #[arg(long, env = "PATHLABEL_PR")]
        pr: Option<u64>,

        /// GitHub Actions event payload used to discover the pull request number.
        #[arg(long, env = "GITHUB_EVENT_PATH")]
        event_path: Option<Utf8PathBuf>,

        /// API token.
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// REST API base URL.
        #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
        api_url: String,

        /// Compute labels without submitting them.
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Compute labels for a local change set and print them, one per line.
    Match {
        /// Newline-separated list of changed paths ("-" reads stdin).
        #[arg(long, conflicts_with_all = ["base", "head"])]
        files: Option<Utf8PathBuf>,

        /// Git base revision (e.g. origin/main).
        #[arg(long, requires = "head")]
        base: Option<String>,

        /// Git head revision (e.g. HEAD).
        #[arg(long, requires = "base")]
        head: Option<String>,

        #[command(flatten)]
        report: ReportArgs,
    },

    /// Parse and validate the label config.
    Validate,

    /// Show which labels each path would receive, and through which prefix.
    Explain {
        /// Paths to explain.
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Render markdown from an existing JSON report.
    Md {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/pathlabel/report.json")]
        report: Utf8PathBuf,

        /// Where to write the Markdown output (if not specified, prints to stdout).
        #[arg(long, short)]
        output: Option<Utf8PathBuf>,
    },

    /// Render GitHub Actions annotations from an existing JSON report.
    Annotations {
        /// Path to the JSON report file.
        #[arg(long, default_value = "artifacts/pathlabel/report.json")]
        report: Utf8PathBuf,

        /// Maximum number of annotations to emit.
        #[arg(long, default_value = "10")]
        max: usize,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_tracing(cli.log_json, &cli.log_level);

    match &cli.cmd {
        Commands::Label {
            repository,
            pr,
            event_path,
            token,
            api_url,
            dry_run,
            report,
        } => cmd_label(
            &cli,
            LabelTarget {
                repository: repository.clone(),
                pr: *pr,
                event_path: event_path.clone(),
                token: token.clone(),
                api_url: api_url.clone(),
            },
            *dry_run,
            report,
        ),
        Commands::Match {
            files,
            base,
            head,
            report,
        } => cmd_match(&cli, files.as_deref(), base.as_deref(), head.as_deref(), report),
        Commands::Validate => cmd_validate(&cli),
        Commands::Explain { paths } => cmd_explain(&cli, paths),
        Commands::Md { report, output } => cmd_md(report, output.as_deref()),
        Commands::Annotations { report, max } => cmd_annotations(report, *max),
    }
}

struct LabelTarget {
    repository: Option<String>,
    pr: Option<u64>,
    event_path: Option<Utf8PathBuf>,
    token: Option<String>,
    api_url: String,
}

fn cmd_label(
    cli: &Cli,
    target: LabelTarget,
    dry_run: bool,
    outputs: &ReportArgs,
) -> anyhow::Result<()> {
    let started_at = OffsetDateTime::now_utc();
    let mut meta = SourceMeta::new(SourceKind::Github);
    meta.repository = target.repository.clone();
    meta.pull_request = target.pr;

    let result = (|| -> anyhow::Result<LabelReport> {
        let (config_text, config_format) = read_config(cli)?;

        let repository: Repository = target
            .repository
            .as_deref()
            .context("a repository is required (--repository or GITHUB_REPOSITORY)")?
            .parse()?;
        let number = match target.pr {
            Some(n) => n,
            None => pr_number_from_event_file(target.event_path.as_deref())?,
        };
        let token = target
            .token
            .context("a token is required (--token or GITHUB_TOKEN)")?;

        let mut config = ClientConfig::new(token, repository);
        config.api_url = target.api_url;
        let client = GitHubClient::new(config).context("build GitHub client")?;
        info!(repository = %client.repository(), pull_request = number, "labeling pull request");

        let source = PullRequestFiles::new(&client, number);
        let pr_labels = PullRequestLabels::new(&client, number);
        let sink: Option<&dyn LabelSink> = if dry_run {
            info!("dry run: labels will not be submitted");
            None
        } else {
            Some(&pr_labels)
        };

        let output = run_label(LabelInput {
            config_text: &config_text,
            config_format,
            source: &source,
            sink,
        })?;
        Ok(output.report)
    })();

    finish_report(started_at, meta, result, outputs, false)
}

fn cmd_match(
    cli: &Cli,
    files: Option<&Utf8Path>,
    base: Option<&str>,
    head: Option<&str>,
    outputs: &ReportArgs,
) -> anyhow::Result<()> {
    let started_at = OffsetDateTime::now_utc();
    let kind = if files.is_some() {
        SourceKind::Files
    } else {
        SourceKind::Git
    };

    let result = (|| -> anyhow::Result<LabelReport> {
        let (config_text, config_format) = read_config(cli)?;

        let paths = match (files, base, head) {
            (Some(list), _, _) => read_path_list(list)?,
            (None, Some(base), Some(head)) => {
                git_changed_files(&cli.repo_root, base, head).context("git diff --name-only failed")?
            }
            _ => anyhow::bail!("match requires --files or --base/--head"),
        };
        let source = StaticPaths::new(kind, paths);

        let output = run_label(LabelInput {
            config_text: &config_text,
            config_format,
            source: &source,
            sink: None,
        })?;
        Ok(output.report)
    })();

    finish_report(started_at, SourceMeta::new(kind), result, outputs, true)
}

/// Write the report (an error report on failure) and exit with the matching code.
fn finish_report(
    started_at: OffsetDateTime,
    meta: SourceMeta,
    result: anyhow::Result<LabelReport>,
    outputs: &ReportArgs,
    print_labels: bool,
) -> anyhow::Result<()> {
    match result {
        Ok(report) => {
            write_report_file(&outputs.report_out, &report).context("write report json")?;
            if outputs.write_markdown {
                let md = render_markdown(&to_renderable(&report));
                write_text_file(&outputs.markdown_out, &md).context("write markdown")?;
            }
            if print_labels {
                for label in report.labels.iter() {
                    println!("{}", label);
                }
            }

            let code = outcome_exit_code(report.outcome);
            if code != 0 {
                std::process::exit(code);
            }
            Ok(())
        }
        Err(err) => {
            let report = error_report(started_at, meta, &err);
            if let Err(e) = write_report_file(&outputs.report_out, &report) {
                warn!(error = %e, "failed to write error report");
            }
            eprintln!("pathlabel error: {err:#}");
            std::process::exit(error_exit_code(&err));
        }
    }
}

fn cmd_validate(cli: &Cli) -> anyhow::Result<()> {
    let result = read_config(cli).and_then(|(text, format)| run_validate(&text, format));
    match result {
        Ok(out) => {
            println!(
                "ok: {} labels, {} patterns",
                out.labels.len(),
                out.pattern_count()
            );
            for (label, patterns) in &out.labels {
                println!("  {}: {}", label, patterns);
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("pathlabel error: {err:#}");
            std::process::exit(error_exit_code(&err));
        }
    }
}

fn cmd_explain(cli: &Cli, paths: &[String]) -> anyhow::Result<()> {
    let result = read_config(cli).and_then(|(text, format)| run_explain(&text, format, paths));
    match result {
        Ok(out) => {
            print!("{}", format_explanation(&out));
            Ok(())
        }
        Err(err) => {
            eprintln!("pathlabel error: {err:#}");
            std::process::exit(error_exit_code(&err));
        }
    }
}

fn cmd_md(report_path: &Utf8Path, output: Option<&Utf8Path>) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let md = render_markdown(&to_renderable(&report));

    if let Some(out_path) = output {
        write_text_file(out_path, &md).context("write markdown output")?;
    } else {
        print!("{}", md);
    }

    Ok(())
}

fn cmd_annotations(report_path: &Utf8Path, max: usize) -> anyhow::Result<()> {
    let report_text = std::fs::read_to_string(report_path)
        .with_context(|| format!("read report: {}", report_path))?;
    let report = parse_report_json(&report_text)?;
    let annotations = render_annotations(&to_renderable(&report), max);

    for annotation in annotations {
        println!("{}", annotation);
    }

    Ok(())
}

fn error_exit_code(err: &anyhow::Error) -> i32 {
    if is_config_error(err) {
        EXIT_CONFIG
    } else {
        EXIT_RUNTIME
    }
}

fn read_config(cli: &Cli) -> anyhow::Result<(String, ConfigFormat)> {
    let path = cli.repo_root.join(&cli.config);
    let text =
        std::fs::read_to_string(&path).with_context(|| format!("read config: {}", path))?;
    debug!(config = %path, "read label config");
    Ok((text, ConfigFormat::from_path(path.as_str())))
}

fn read_path_list(list: &Utf8Path) -> anyhow::Result<Vec<String>> {
    let text = if list.as_str() == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("read changed paths from stdin")?;
        buf
    } else {
        std::fs::read_to_string(list).with_context(|| format!("read changed paths: {}", list))?
    };
    Ok(parse_path_list(&text))
}

fn pr_number_from_event_file(event_path: Option<&Utf8Path>) -> anyhow::Result<u64> {
    let path = event_path
        .context("a pull request number is required (--pr, PATHLABEL_PR, or GITHUB_EVENT_PATH)")?;
    let text =
        std::fs::read_to_string(path).with_context(|| format!("read event payload: {}", path))?;
    pull_request_number_from_event(&text)
}

/// Paths changed on `head` since it forked from `base` (merge-base diff, like a PR file list).
fn git_changed_files(repo_root: &Utf8Path, base: &str, head: &str) -> anyhow::Result<Vec<String>> {
    let output = Command::new("git")
        .current_dir(repo_root)
        .args(["-c", "core.quotePath=false", "diff", "--name-only", "-z"])
        .arg(format!("{base}...{head}"))
        .output()
        .context("spawn git")?;

    if !output.status.success() {
        anyhow::bail!(
            "git diff returned non-zero exit status: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    split_nul_paths(&output.stdout)
}

/// Split `git diff -z` output. Paths are taken verbatim; they must be UTF-8.
fn split_nul_paths(stdout: &[u8]) -> anyhow::Result<Vec<String>> {
    stdout
        .split(|b| *b == 0)
        .filter(|raw| !raw.is_empty())
        .map(|raw| {
            String::from_utf8(raw.to_vec()).context("git reported a path that is not valid UTF-8")
        })
        .collect()
}

fn write_report_file(path: &Utf8Path, report: &LabelReport) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    let data = serialize_report(report).context("serialize report")?;
    std::fs::write(path, data).with_context(|| format!("write report: {}", path))?;
    Ok(())
}

fn write_text_file(path: &Utf8Path, text: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create directory: {}", parent))?;
    }
    std::fs::write(path, text).with_context(|| format!("write text: {}", path))?;
    Ok(())
}

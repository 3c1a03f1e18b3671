//! pdoc-post — rewrite `:param`/`:type`/`:returns` directives into markup.
//!
//! Supports two modes:
//!
//! - **stdin mode**: `pdoc-post < module.txt > module.out`
//! - **file mode**: `pdoc-post -o docs/out docs/html/*.html`
//!
//! `--check` validates the directives without writing anything.

use anyhow::{Context, Result};
use clap::Parser;
use pdoc_post::{Config, Format};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pdoc-post",
    version,
    about = "Rewrite param/type/return/rtype/raises doc directives into inline markup"
)]
struct Cli {
    /// Input files (glob patterns and directories supported). If omitted, reads from stdin.
    files: Vec<String>,

    /// Output directory (required when files are given, unless --check)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Character that opens a directive, e.g. ':' or '@'
    #[arg(short = 'd', long, default_value_t = ':')]
    delimiter: char,

    /// Allow parameters without a type directive
    #[arg(long)]
    no_force_type: bool,

    /// Markup to substitute: markdown (default) or html
    #[arg(short = 'f', long, default_value = "markdown")]
    format: Format,

    /// Only validate directives; write nothing
    #[arg(long)]
    check: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(short = 'v', long)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> Config {
        Config {
            delimiter: self.delimiter,
            force_type_spec: !self.no_force_type,
            format: self.format,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.files.is_empty() {
        return stdin_mode(&cli);
    }

    file_mode(&cli)
}

/// Log to stderr: stdout carries the rendered document in stdin mode.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// stdin mode: read stdin, write the rewritten document to stdout.
fn stdin_mode(cli: &Cli) -> Result<()> {
    let config = cli.config();

    if cli.check {
        let input = io::read_to_string(io::stdin()).context("failed to read stdin")?;
        pdoc_post::check_str(&input, &config).context("validation failed")?;
        return Ok(());
    }

    pdoc_post::process(io::stdin().lock(), io::stdout().lock(), &config)
        .context("failed to process stdin")
}

/// file mode: process every input file, writing results to the output directory.
///
/// Every file is attempted; failures are reported one by one and summarized.
fn file_mode(cli: &Cli) -> Result<()> {
    let config = cli.config();
    // Surface a bad delimiter once rather than once per file.
    pdoc_post::parser::Classifier::new(config.delimiter)?;

    let output_dir = if cli.check {
        None
    } else {
        let dir = cli
            .output
            .as_deref()
            .context("--output is required when files are given")?;
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create output directory: {}", dir.display()))?;
        Some(dir)
    };

    let inputs = expand_inputs(&cli.files)?;
    let mut failed = 0usize;

    for input in &inputs {
        if let Err(e) = process_file(input, &config, output_dir) {
            eprintln!("error: {}: {:#}", input.path.display(), e);
            failed += 1;
        }
    }

    if failed > 0 {
        anyhow::bail!("{} of {} file(s) failed", failed, inputs.len());
    }
    Ok(())
}

/// A file to process and its path relative to the output directory.
#[derive(Debug, PartialEq, Eq)]
struct Input {
    path: PathBuf,
    relative: PathBuf,
}

impl Input {
    /// Input named on the command line or matched by a glob: lands flat.
    fn flat(path: PathBuf) -> Self {
        let relative = path
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| path.clone());
        Self { path, relative }
    }
}

/// Rewrite (or, without an output directory, just validate) one file.
fn process_file(input: &Input, config: &Config, output_dir: Option<&Path>) -> Result<()> {
    let content = fs::read_to_string(&input.path).context("failed to read")?;

    let Some(dir) = output_dir else {
        pdoc_post::check_str(&content, config)?;
        tracing::debug!(input = %input.path.display(), "directives valid");
        return Ok(());
    };

    let rendered = pdoc_post::process_str(&content, config)?;
    let out_path = dir.join(&input.relative);
    if let Some(parent) = out_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(&out_path, rendered)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    tracing::debug!(input = %input.path.display(), output = %out_path.display(), "rewrote file");
    Ok(())
}

/// File extensions picked up when a directory is given.
const SUPPORTED_EXTENSIONS: &[&str] = &["py", "txt", "md", "html"];

/// Resolve files, directories and glob patterns into inputs.
///
/// Directories are walked recursively for [`SUPPORTED_EXTENSIONS`] and keep
/// their layout below the output directory; everything else lands flat.
fn expand_inputs(patterns: &[String]) -> Result<Vec<Input>> {
    let mut inputs = Vec::new();
    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            inputs.push(Input::flat(path.to_path_buf()));
        } else if path.is_dir() {
            inputs.extend(scan_dir(path)?);
        } else {
            let matches: Vec<_> = glob::glob(pattern)
                .with_context(|| format!("invalid glob pattern: {}", pattern))?
                .filter_map(|r| r.ok())
                .filter(|p| p.is_file())
                .collect();
            if matches.is_empty() {
                eprintln!("warning: no files matched: {}", pattern);
            }
            inputs.extend(matches.into_iter().map(Input::flat));
        }
    }
    inputs.sort_by(|a, b| a.path.cmp(&b.path));
    inputs.dedup_by(|a, b| a.path == b.path);
    Ok(inputs)
}

fn scan_dir(root: &Path) -> Result<Vec<Input>> {
    let escaped = glob::Pattern::escape(&root.to_string_lossy());
    let mut inputs = Vec::new();
    for ext in SUPPORTED_EXTENSIONS {
        let pattern = format!("{}/**/*.{}", escaped.trim_end_matches('/'), ext);
        let entries = glob::glob(&pattern)
            .with_context(|| format!("failed to scan directory: {}", root.display()))?;
        for path in entries.filter_map(|r| r.ok()).filter(|p| p.is_file()) {
            let relative = path.strip_prefix(root).map(Path::to_path_buf);
            match relative {
                Ok(relative) => inputs.push(Input { path, relative }),
                Err(_) => inputs.push(Input::flat(path)),
            }
        }
    }
    tracing::debug!(root = %root.display(), files = inputs.len(), "scanned directory");
    Ok(inputs)
}

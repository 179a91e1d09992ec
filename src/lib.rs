//! mediadex - content-addressed photo and video index
//!
//! Walks a directory tree, records a content digest for every supported
//! photo and video in a SQLite index, recognises files that were moved since
//! the last run, and reports copies of the same content grouped by the two
//! folders they live in.
//!
//! The library entry point is [`engine::update_index`]; [`run_app`] drives
//! the `mediadex` binary.

pub mod actions;
pub mod cli;
pub mod config;
pub mod duplicates;
pub mod engine;
pub mod error;
pub mod index;
pub mod logging;
pub mod output;
pub mod reporter;
pub mod scanner;

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};

use actions::{delete_group_side, Choice, DeleteConfig};
use cli::{Cli, Commands, ConfigArgs, HashArgs, IndexArgs, LookupArgs, OutputFormat};
use config::Config;
use duplicates::DuplicateGroup;
use engine::{Indexer, IndexerConfig};
use error::ExitCode;
use output::{write_delete_prompt, write_group, JsonOutput, TextOutput};
use reporter::{LogReporter, NullReporter};
use scanner::{Digest, Hasher, MediaKind};

/// Run the command described by `cli` and return the process exit code.
///
/// # Errors
///
/// Returns an error for fatal failures: the index cannot be opened, a root
/// cannot be resolved, or output cannot be written.
pub fn run_app(cli: Cli) -> Result<ExitCode> {
    logging::init_logging(cli.verbose, cli.quiet);
    if cli.no_color {
        yansi::disable();
    }

    let config = Config::load();
    log::debug!("Loaded config: {:?}", config);

    match cli.command {
        Commands::Index(args) => run_index(args, &config),
        Commands::Lookup(args) => run_lookup(args, &config),
        Commands::Hash(args) => run_hash(&args),
        Commands::Config(args) => run_config(&args, &config),
    }
}

fn store_root(db: Option<PathBuf>, config: &Config) -> Result<PathBuf> {
    match db.or_else(|| config.store_root.clone()) {
        Some(root) => Ok(root),
        None => std::env::current_dir().context("Failed to determine the current directory"),
    }
}

fn run_index(args: IndexArgs, config: &Config) -> Result<ExitCode> {
    let store_root = store_root(args.db, config)?;
    let walk_root = args.dir.unwrap_or_else(|| store_root.clone());
    let format = args.output.unwrap_or(config.output);

    let indexer_config = IndexerConfig::default()
        .with_progress_interval(config.progress_interval)
        .with_follow_symlinks(args.follow_symlinks || config.follow_symlinks);

    let indexer = Indexer::open(&store_root, Arc::new(LogReporter::new()))
        .with_context(|| format!("Failed to open index in {}", store_root.display()))?
        .with_config(indexer_config);
    let (groups, summary) = indexer
        .run(&walk_root)
        .with_context(|| format!("Failed to index {}", walk_root.display()))?;
    let resolved_root = indexer.store_root().to_path_buf();
    indexer.close().context("Failed to close index")?;

    let exit_code = ExitCode::for_run(groups.len(), summary.errors);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match format {
        OutputFormat::Json => {
            if args.delete {
                log::warn!("--delete is ignored with JSON output");
            }
            JsonOutput::new(&groups, &summary, exit_code).write_to(&mut out, true)?;
        }
        OutputFormat::Text if args.delete => {
            let delete_config = if args.permanent {
                DeleteConfig::permanent()
            } else {
                DeleteConfig::trash()
            };
            let stdin = io::stdin();
            review_groups(
                &groups,
                &resolved_root,
                &delete_config,
                &mut stdin.lock(),
                &mut out,
            )?;
            TextOutput::new(&groups, &summary).write_summary(&mut out)?;
        }
        OutputFormat::Text => TextOutput::new(&groups, &summary).write_to(&mut out)?,
    }

    Ok(exit_code)
}

/// Show each group and delete the side the operator picks.
///
/// An empty or unreadable answer skips the group.
///
/// # Errors
///
/// Returns an error if writing the report fails.
pub fn review_groups<R: BufRead, W: Write>(
    groups: &[DuplicateGroup],
    store_root: &Path,
    config: &DeleteConfig,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    for group in groups {
        write_group(output, group)?;
        write_delete_prompt(output)?;

        let mut answer = String::new();
        if let Err(e) = input.read_line(&mut answer) {
            log::warn!("Failed to read answer, skipping: {}", e);
        }

        match Choice::from_input(&answer).side() {
            Some(side) => {
                let result = delete_group_side(store_root, group, side, config);
                writeln!(output, "{}", result.summary())?;
            }
            None => writeln!(output, "Skipping...")?,
        }
    }
    Ok(())
}

fn run_lookup(args: LookupArgs, config: &Config) -> Result<ExitCode> {
    let store_root = store_root(args.db, config)?;
    let indexer = Indexer::open(&store_root, Arc::new(NullReporter))
        .with_context(|| format!("Failed to open index in {}", store_root.display()))?;

    let found = if let Some(path) = args.path {
        let key = indexer
            .key_for(&path)
            .with_context(|| format!("Failed to normalize {}", path.display()))?;
        indexer
            .store()
            .digest_for_path(&key)?
            .map(|digest| format!("{key}\t{digest}"))
    } else if let Some(digest) = args.digest {
        let digest = Digest::from_encoded(digest.trim().to_ascii_uppercase());
        indexer
            .store()
            .path_for_digest(&digest)?
            .map(|path| format!("{digest}\t{path}"))
    } else {
        bail!("Either --path or --digest is required");
    };
    indexer.close()?;

    match found {
        Some(line) => println!("{line}"),
        None => println!("not indexed"),
    }
    Ok(ExitCode::Success)
}

fn run_hash(args: &HashArgs) -> Result<ExitCode> {
    let Some(kind) = MediaKind::from_path(&args.file) else {
        bail!(
            "{} is not a supported photo or video (supported: {}, {})",
            args.file.display(),
            MediaKind::Picture.extensions().join(", "),
            MediaKind::Video.extensions().join(", ")
        );
    };

    let digest = Hasher::new()
        .hash(&args.file, kind)
        .with_context(|| format!("Failed to hash {}", args.file.display()))?;
    println!("{digest}\t{}", args.file.display());
    Ok(ExitCode::Success)
}

fn run_config(args: &ConfigArgs, config: &Config) -> Result<ExitCode> {
    if args.init {
        let path = Config::config_path()?;
        write_config_file(config, &path, args.force)?;
        println!("Wrote {}", path.display());
    } else {
        print!("{}", config.to_toml()?);
    }
    Ok(ExitCode::Success)
}

/// Write `config` to `path`, refusing to replace an existing file unless
/// `force` is set.
///
/// # Errors
///
/// Returns an error if the file exists without `force`, or cannot be written.
pub fn write_config_file(config: &Config, path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }
    config
        .save_to_path(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}

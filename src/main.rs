use clap::Parser;
use mangle_rs::files::expand_patterns;
use mangle_rs::{RenameConfig, Renamer};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "mangle")]
#[command(version = VERSION)]
#[command(about = "Rename trailing-underscore identifiers to short names across files")]
struct Cli {
    /// Files or glob patterns to rewrite
    #[arg(required = true)]
    patterns: Vec<String>,

    /// Character group for generated names; repeat for later positions
    #[arg(short, long = "alphabet", value_name = "GROUP")]
    alphabet: Vec<String>,

    /// Extra word that must never be generated
    #[arg(short, long = "reserved", value_name = "WORD")]
    reserved: Vec<String>,

    /// TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the replacement table without writing any file
    #[arg(long)]
    dry_run: bool,

    /// Log every assignment
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

/// Level used when `RUST_LOG` is unset.
fn default_level(cli: &Cli) -> &'static str {
    if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    }
}

fn init_tracing(cli: &Cli) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level(cli)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn build_config(cli: &Cli) -> mangle_rs::Result<RenameConfig> {
    let mut config = match &cli.config {
        Some(path) => RenameConfig::load(path)?,
        None => RenameConfig::default(),
    };
    if !cli.alphabet.is_empty() {
        config = config.with_alphabet(cli.alphabet.iter().cloned());
    }
    Ok(config.with_reserved(cli.reserved.iter().cloned()))
}

fn run(cli: &Cli) -> mangle_rs::Result<()> {
    let renamer = Renamer::new(build_config(cli)?);
    let paths = expand_patterns(&cli.patterns)?;

    if cli.dry_run {
        let buffers = mangle_rs::files::read_all(&paths)?;
        let plan = renamer.plan(&buffers)?;
        for entry in plan.entries() {
            println!("{}\t{}\t{}", entry.original, entry.replacement, entry.frequency);
        }
        return Ok(());
    }

    let stats = renamer.rename_files(&paths)?;
    tracing::info!(
        "renamed {} words in {} files, saved {} bytes ({:.1}%)",
        stats.targets,
        stats.files,
        stats.bytes_saved(),
        stats.savings_ratio()
    );
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

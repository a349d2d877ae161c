use anyhow::Result;
use chrono::Local;
use clap::{Parser, Subcommand};
use doc_check::{generate_example, run_reference_check, DocCheckConfig, ValidationMode};
use std::io::Write;
use std::path::PathBuf;
use std::process::exit;

#[derive(Parser)]
#[command(version, about = "Check markdown references and build programs from code samples")]
struct Cli {
    /// Log progress at info level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that every link in the given markdown files resolves
    Refs {
        /// Stop at the first broken reference
        #[arg(long)]
        fail_fast: bool,

        /// Markdown files to check
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Extract code samples from a markdown file into a source file
    Example {
        /// TOML configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Fence tag to extract, replacing the configured markers
        #[arg(long)]
        language: Option<String>,

        /// Markdown file to process
        input: PathBuf,

        /// Generated source file
        output: PathBuf,
    },
}

pub fn main() {
    let cli = Cli::parse();
    init_logger(cli.verbose);

    if let Err(e) = run(cli.command) {
        log::error!("{:#}", e);
        exit(1);
    }
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} [{}] ({}): {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Refs { fail_fast, files } => {
            let mode = if fail_fast {
                ValidationMode::FailFast
            } else {
                ValidationMode::Collect
            };
            run_reference_check(&files, mode)
        }
        Command::Example {
            config,
            language,
            input,
            output,
        } => {
            let mut config = DocCheckConfig::load(config.as_deref())?.example;
            if let Some(language) = language {
                config.fence_markers = vec![language];
            }
            generate_example(&input, &output, &config)?;
            Ok(())
        }
    }
}

//! qzipctl - hardware compression probe and qzip/tar front end

mod logging;
mod output;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use qzipctl_core::application::{
    ArchiveRunner, CapabilityProbe, CompressionService, ProbeOptions,
};
use qzipctl_core::domain::{Algorithm, ArchiveJob, HeaderFormat, JobSpec, Mode};
use qzipctl_core::port::id_provider::UuidProvider;
use qzipctl_core::port::time_provider::SystemTimeProvider;
use qzipctl_core::{QzipConfig, QzipError, VERSION};
use qzipctl_infra_system::{FsScratchSpace, ProcessEnv, ProcessWorkingDirectory, SubprocessExecutor};

#[derive(Parser)]
#[command(name = "qzipctl")]
#[command(about = "QAT hardware compression probe and qzip/tar front end", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Kill external tools that run longer than this many seconds
    #[arg(long, global = true, env = "QZIPCTL_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check whether hardware compression is usable on this host
    Probe {
        /// Skip the compress/decompress round trip
        #[arg(long, env = "QZIPCTL_SKIP_SMOKE_TEST")]
        skip_smoke_test: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },

    /// Compress files or directories with qzip
    Compress(JobArgs),

    /// Decompress files or directories with qzip
    Decompress(JobArgs),

    /// Create a .tar.gz archive compressed through qzip
    Archive {
        /// Files or directories to bundle (should share a parent directory)
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Archive to create
        #[arg(short = 'f', long)]
        archive: PathBuf,
    },

    /// Extract a .tar.gz/.tgz archive through qzip
    Extract {
        archive: PathBuf,

        /// Directory to extract into
        #[arg(short = 'C', long)]
        destination: Option<PathBuf>,

        /// Leading path segments to drop from member names
        #[arg(long, default_value = "0")]
        strip_components: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Args)]
struct JobArgs {
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (ignored with --dir)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Inputs are directories
    #[arg(long)]
    dir: bool,

    /// Descend into subdirectories (requires --dir)
    #[arg(short = 'R', long)]
    recursive: bool,

    /// Remove the source files after success
    #[arg(long)]
    no_keep: bool,

    /// Ask the driver to busy-poll for completions
    #[arg(long)]
    busy_poll: bool,

    /// Compression algorithm: default, gzip, gzipext, lz4, lz4s
    #[arg(short = 'A', long, default_value = "default")]
    algorithm: Algorithm,

    /// Output header format: default, gzip, gzipext, lz4, lz4s
    #[arg(short = 'O', long, default_value = "default")]
    header: HeaderFormat,

    /// Compression level 1-9; anything else falls back to 5
    #[arg(short = 'L', long, default_value = "5", allow_negative_numbers = true)]
    level: i32,

    /// Worker threads (0 = tool default)
    #[arg(short = 'r', long, default_value = "0")]
    concurrency: u32,
}

impl JobArgs {
    fn into_spec(self, mode: Mode) -> JobSpec {
        JobSpec {
            output: self.output,
            directory: self.dir,
            recursive: self.recursive,
            keep_source: !self.no_keep,
            busy_poll: self.busy_poll,
            concurrency: self.concurrency,
            algorithm: self.algorithm,
            level: self.level,
            header: self.header,
            ..JobSpec::new(mode, self.inputs)
        }
    }
}

fn load_config() -> Result<QzipConfig> {
    let mut config = QzipConfig::from_env(&ProcessEnv).context("Invalid configuration")?;
    let expanded = shellexpand::tilde(&config.scratch_dir.to_string_lossy()).into_owned();
    config.scratch_dir = PathBuf::from(expanded);
    Ok(config)
}

fn main() -> Result<ExitCode> {
    logging::init_logging()?;
    let cli = Cli::parse();

    info!("qzipctl v{} starting", VERSION);

    let config = load_config()?;

    // DI wiring
    let time_provider = Arc::new(SystemTimeProvider);
    let id_provider = Arc::new(UuidProvider);
    let mut executor = SubprocessExecutor::new(time_provider);
    if let Some(secs) = cli.timeout_secs {
        executor = executor.with_timeout(Duration::from_secs(secs));
    }
    let runner = Arc::new(executor);

    let result = match cli.command {
        Commands::Probe {
            skip_smoke_test,
            format,
        } => {
            let scratch = Arc::new(FsScratchSpace::new(
                config.scratch_dir.clone(),
                id_provider.clone(),
            ));
            let (available, snapshot) =
                CapabilityProbe::new(Arc::new(ProcessEnv), runner, config)
                    .with_scratch(scratch)
                    .with_options(ProbeOptions {
                        smoke_test: !skip_smoke_test,
                    })
                    .probe();

            match format {
                OutputFormat::Json => output::print_probe_json(available, &snapshot)?,
                OutputFormat::Table => output::print_probe_table(available, &snapshot),
            }
            return Ok(if available {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            });
        }

        Commands::Compress(args) => {
            run_job(runner, id_provider, &config, args.into_spec(Mode::Compress))
        }
        Commands::Decompress(args) => {
            run_job(runner, id_provider, &config, args.into_spec(Mode::Decompress))
        }

        Commands::Archive { inputs, archive } => {
            run_archive(runner, &config, ArchiveJob::compress(inputs, archive), "Archive created")
        }

        Commands::Extract {
            archive,
            destination,
            strip_components,
        } => run_archive(
            runner,
            &config,
            ArchiveJob::extract(archive, destination, strip_components),
            "Archive extracted",
        ),
    };

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            report_failure(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn run_job(
    runner: Arc<SubprocessExecutor>,
    id_provider: Arc<UuidProvider>,
    config: &QzipConfig,
    spec: JobSpec,
) -> std::result::Result<(), QzipError> {
    let message = match spec.mode {
        Mode::Compress => "Compression finished",
        Mode::Decompress => "Decompression finished",
    };
    let outcome = CompressionService::new(runner, id_provider, config).run(&spec)?;
    output::print_success(
        message,
        &format!("{} {}", config.qzip_program, outcome.command),
        &outcome.output,
    );
    Ok(())
}

fn run_archive(
    runner: Arc<SubprocessExecutor>,
    config: &QzipConfig,
    job: ArchiveJob,
    message: &str,
) -> std::result::Result<(), QzipError> {
    let archive_runner = ArchiveRunner::new(runner, Arc::new(ProcessWorkingDirectory), config);
    let output = archive_runner.run(&job)?;
    output::print_success(
        message,
        &format!("{} ({})", config.tar_program, job.archive.display()),
        &output,
    );
    Ok(())
}

fn report_failure(err: &QzipError) {
    error!(error = %err, "Command failed");
    eprintln!("{} {}", "✗".red(), err);
    if let Some(tool_output) = err.tool_output() {
        eprintln!();
        eprintln!("{}", tool_output.trim_end());
    }
}

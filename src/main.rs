use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rozklad::config::Config;

mod commands;

#[derive(Parser)]
#[command(
    name = "rozklad",
    version,
    about = "Converts university timetable documents into per-group and per-teacher JSON schedules",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true)]
    log_format: Option<String>,

    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert timetable documents into group schedules
    Parse(ParseArgs),

    /// Build teacher schedules from existing group schedules
    Teachers {
        /// Directory with group schedules
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory for teacher schedules
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse documents, then build teacher schedules
    Run {
        #[command(flatten)]
        parse: ParseArgs,

        /// Directory for teacher schedules
        #[arg(short, long)]
        teachers_output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct ParseArgs {
    /// Directory with timetable documents
    #[arg(short, long)]
    word_schedules: Option<PathBuf>,

    /// Batch group schedules into groupN folders
    #[arg(short, long)]
    group_into_folders: bool,

    /// Group schedules per folder
    #[arg(short = 'n', long)]
    schedules_per_folder: Option<usize>,

    /// Directory for group schedules
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl ParseArgs {
    fn apply(self, config: &mut Config) {
        if let Some(dir) = self.word_schedules {
            config.input.documents_dir = dir;
        }
        if self.group_into_folders {
            config.output.group_into_folders = true;
        }
        if let Some(size) = self.schedules_per_folder {
            config.output.schedules_per_folder = size;
        }
        if let Some(dir) = self.output {
            config.output.groups_dir = dir;
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }

    // Initialize tracing/logging
    setup_tracing(&config.logging.format, &config.logging.level, cli.verbose)?;

    tracing::info!("rozklad starting");

    match cli.command {
        Commands::Parse(args) => {
            args.apply(&mut config);
            config.validate()?;
            tracing::info!(
                input = %config.input.documents_dir.display(),
                output = %config.output.groups_dir.display(),
                group_into_folders = %config.output.group_into_folders,
                "Starting parse command"
            );
            commands::parse(&config)?;
        }

        Commands::Teachers { input, output } => {
            if let Some(dir) = input {
                config.output.groups_dir = dir;
            }
            if let Some(dir) = output {
                config.output.teachers_dir = dir;
            }
            config.validate()?;
            tracing::info!(
                input = %config.output.groups_dir.display(),
                output = %config.output.teachers_dir.display(),
                "Starting teachers command"
            );
            commands::teachers(&config)?;
        }

        Commands::Run {
            parse,
            teachers_output,
        } => {
            parse.apply(&mut config);
            if let Some(dir) = teachers_output {
                config.output.teachers_dir = dir;
            }
            config.validate()?;
            tracing::info!(
                input = %config.input.documents_dir.display(),
                groups = %config.output.groups_dir.display(),
                teachers = %config.output.teachers_dir.display(),
                "Starting run command"
            );
            commands::parse(&config)?;
            commands::teachers(&config)?;
        }
    }

    tracing::info!("rozklad completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("rozklad=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("rozklad={level},warn"))?
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

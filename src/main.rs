//! Skill Resolver - deterministic config and knowledge resolution for Claude Code skills.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use skill_resolver::commands::{self, CommandError, ResolveConfigArgs};
use skill_resolver::diagnostics::TracingSink;

#[derive(Parser)]
#[command(
    name = "skill-resolver",
    about = "Resolve effective configuration and knowledge for Claude Code skills",
    version
)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short = 'v', long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve BASE_PATH, skill settings and tickets config as JSON.
    ResolveConfig {
        /// Working directory used to derive the project name.
        cwd: String,
        /// Skill setting names to extract.
        settings: Vec<String>,
        /// Global config file (defaults to ~/.claude/global-config.yaml).
        #[arg(long)]
        global_config: Option<PathBuf>,
    },
    /// Load the knowledge registered for a workflow as JSON.
    ResolveKnowledge {
        /// Path to the knowledge-refs.md document.
        #[arg(long)]
        refs: PathBuf,
        /// Workflow section name (e.g. /design).
        #[arg(long, allow_hyphen_values = true)]
        workflow: String,
        /// Base path for relative knowledge references.
        #[arg(long)]
        base: PathBuf,
    },
    /// Print the worktree-stable project name for a directory.
    ProjectName {
        /// Directory to identify.
        cwd: PathBuf,
    },
}

fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

async fn run(command: Commands) -> Result<String, CommandError> {
    let sink = TracingSink;
    match command {
        Commands::ResolveConfig {
            cwd,
            settings,
            global_config,
        } => {
            let args = ResolveConfigArgs {
                cwd,
                settings,
                global_config,
            };
            commands::resolve_config(&args, &sink).await
        }
        Commands::ResolveKnowledge {
            refs,
            workflow,
            base,
        } => commands::resolve_knowledge(&refs, &workflow, &base, &sink).await,
        Commands::ProjectName { cwd } => commands::project_name(&cwd, &sink).await,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = u8::from(err.use_stderr());
            let _ = err.print();
            return ExitCode::from(code);
        }
    };
    init_tracing(cli.verbose);

    match run(cli.command).await {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Command failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

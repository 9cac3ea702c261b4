pub mod args;
pub mod commands;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Legal document generation CLI
#[derive(Parser, Debug)]
#[command(
    name = "hukuk",
    about = "Legal document generation client - submit a case, review the AI legal analysis, download the document",
    version,
    author,
    long_about = None
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Hide the progress spinner and success messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Markdown format
    Markdown,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a document and show its legal analysis
    #[command(alias = "g")]
    Generate(args::GenerateArgs),

    /// Render a saved analysis response
    #[command(alias = "r")]
    Render(args::RenderArgs),

    /// Download a generated document
    #[command(alias = "d")]
    Download(args::DownloadArgs),

    /// List known case categories
    Categories,

    /// Manage configuration
    #[command(alias = "c")]
    Config(args::ConfigArgs),

    /// Show version information
    Version,

    /// Generate shell completion scripts
    Completions {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Generate shell completion scripts
    fn generate_completions(shell: Shell) {
        use clap::CommandFactory;
        use clap_complete::generate;
        use std::io;

        let mut cmd = Self::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut io::stdout());
    }

    /// Run the CLI application
    pub async fn run() -> crate::error::Result<()> {
        let cli = Self::parse();

        // Set up logging
        let default_filter = if cli.verbose { "debug" } else { "warn" };
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

        let result = match cli.command {
            Commands::Generate(args) => commands::generate::execute(args, cli.format, cli.quiet, cli.verbose).await,
            Commands::Render(args) => commands::render::execute(args, cli.format),
            Commands::Download(args) => commands::download::execute(args, cli.quiet, cli.verbose).await,
            Commands::Categories => commands::categories::execute(cli.format),
            Commands::Config(args) => commands::config::execute(args),
            Commands::Version => {
                commands::version::execute();
                Ok(())
            }
            Commands::Completions { shell } => {
                Self::generate_completions(shell);
                Ok(())
            }
        };

        // Handle errors with better messaging
        if let Err(e) = &result {
            use crate::error::HukukError;
            match e {
                HukukError::Http { status, detail } => {
                    eprintln!("Error: request failed with status {}", status);
                    if let Some(detail) = detail.as_ref().filter(|_| cli.verbose) {
                        eprintln!("Detail: {}", detail);
                    }
                }
                HukukError::Network(err) => {
                    eprintln!("Network error: {}", err);
                }
                HukukError::Parse(msg) => {
                    eprintln!("Error parsing response: {}", msg);
                    if !cli.verbose {
                        eprintln!("\nRun with --verbose for more details.");
                    }
                }
                _ => {
                    eprintln!("Error: {}", e);
                }
            }
            if let Some(hint) = e.hint() {
                eprintln!("\nHint: {}", hint);
            }
            if e.is_user_correctable() {
                eprintln!("Run the command with --help to see its options.");
            }
        }
        result
    }
}

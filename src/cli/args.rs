use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Which form control submits the request
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TriggerArg {
    /// The "Belge Oluştur" button
    Button,
    /// The form's own submit event
    Submit,
}

/// Generate command arguments
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Document template name (e.g. dava_dilekce, ihtarname)
    #[arg(short, long)]
    pub template: Option<String>,

    /// Case category code (e.g. borçlar_hukuku, aile_hukuku)
    #[arg(short, long)]
    pub category: Option<String>,

    /// Case description
    #[arg(short, long)]
    pub description: Option<String>,

    /// Template field as KEY=VALUE (repeatable)
    #[arg(short = 'F', long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,

    /// Form snapshot file (YAML or JSON) with element values and field containers
    #[arg(long, value_name = "FILE")]
    pub form: Option<PathBuf>,

    /// Suggest a category from the template and description when none is given
    #[arg(long)]
    pub suggest_category: bool,

    /// Entry point reported to the service
    #[arg(long, value_enum, default_value = "submit")]
    pub trigger: TriggerArg,

    /// Service root URL, overrides the configuration
    #[arg(long, env = "HUKUK_BASE_URL")]
    pub base_url: Option<String>,

    /// Save the raw service response as JSON
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,
}

/// Render command arguments
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Saved service response (JSON)
    pub file: PathBuf,

    /// Category the request was submitted with
    #[arg(short, long, default_value = "")]
    pub category: String,

    /// Case description the request was submitted with
    #[arg(short, long, default_value = "")]
    pub description: String,
}

/// Download command arguments
#[derive(Args, Debug)]
pub struct DownloadArgs {
    /// Document id returned by generate
    pub id: String,

    /// Output path; defaults to the file name sent by the service
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Service root URL, overrides the configuration
    #[arg(long, env = "HUKUK_BASE_URL")]
    pub base_url: Option<String>,
}

/// Config command arguments
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.base_url)
        key: String,

        /// Configuration value
        value: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key
        key: String,
    },

    /// List all configuration values
    List,

    /// Show configuration file path
    Path,

    /// Initialize configuration
    Init,
}

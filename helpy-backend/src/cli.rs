use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "helpy-backend", version, about = "Helpy job and helper matching service")]
pub struct CliArgs {
    /// Path to configuration file (.toml, .yaml or .json).
    #[arg(short = 'c', long = "config-path", env = "HELPY_CONFIG_PATH")]
    pub config_path: Option<String>,
}

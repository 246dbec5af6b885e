use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "agents-md-setup")]
#[command(version, about, long_about = None)]
pub struct SetupCli {
    /// Template language (en/ja); prompts interactively when omitted
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Directory containing the templates and AGENTS.md (default: current directory)
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Memory root path (skips the interactive path prompt)
    #[arg(long = "memory-path")]
    pub memory_path: Option<String>,

    /// Answer yes to every confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Print the final summary as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage configuration
    Config(ConfigArgs),

    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
#[command(name = "agents-md-lang")]
#[command(version, about, long_about = None)]
pub struct SwitcherCli {
    /// Language to switch to (en/ja); shows the current language when omitted
    pub lang: Option<String>,

    /// Directory containing the templates and AGENTS.md (default: current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

#[derive(ValueEnum, Clone, Debug)]
#[allow(clippy::enum_variant_names)]
pub enum Shell {
    /// Bash shell
    Bash,
    /// Zsh shell
    Zsh,
    /// Fish shell
    Fish,
    /// PowerShell
    #[value(name = "powershell")]
    PowerShell,
    /// Elvish shell
    Elvish,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Get a configuration value
    Get {
        /// Configuration key (language, template_en, template_ja, primary, wip, mirror)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// List all configuration values
    List,

    /// Reset configuration to defaults
    Reset,

    /// Show configuration file path
    Path,

    /// Show the configured files resolved against --dir
    Files,
}

//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// `kiproj <NAME>` creates a project; the subcommands manage configuration
/// and shell integration. A project cannot be named after a subcommand.
#[derive(Debug, Parser)]
#[command(
    name    = "kiproj",
    bin_name = "kiproj",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Create a KiCad project with git and shared libraries",
    long_about = "kiproj creates a KiCad project directory in the current \
                  directory, copies the project templates into it, and sets \
                  up a git repository with the shared libraries linked as \
                  submodules. If any step fails, the directory is removed again.",
    after_help = "EXAMPLES:\n\
        \x20 kiproj blinky\n\
        \x20 kiproj blinky --dry-run\n\
        \x20 kiproj blinky --no-submodules --templates-dir ./my-templates\n\
        \x20 kiproj completions bash > ~/.local/share/bash-completion/completions/kiproj",
    arg_required_else_help = true,
    args_conflicts_with_subcommands = true,
)]
pub struct Cli {
    /// Flags available on every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Project creation arguments (used when no subcommand is given).
    #[command(flatten)]
    pub create: CreateArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 kiproj init                 # default location\n\
            \x20 kiproj init --force         # overwrite an existing file\n\
            \x20 kiproj -c ./kiproj.toml init"
    )]
    Init(InitArgs),

    /// Inspect the active configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kiproj config get vcs.program\n\
            \x20 kiproj config list\n\
            \x20 kiproj config path"
    )]
    Config(ConfigCommands),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kiproj completions bash > ~/.local/share/bash-completion/completions/kiproj\n\
            \x20 kiproj completions zsh  > ~/.zfunc/_kiproj\n\
            \x20 kiproj completions fish > ~/.config/fish/completions/kiproj.fish"
    )]
    Completions(CompletionsArgs),
}

// ── create ────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Args)]
pub struct CreateArgs {
    /// Name of the project directory to create in the current directory.
    #[arg(value_name = "NAME", help = "Project name")]
    pub name: Option<String>,

    /// Preview what would be created without writing any files.
    #[arg(long = "dry-run", help = "Show what would be created without creating")]
    pub dry_run: bool,

    /// Read templates from a directory instead of the built-in set.
    #[arg(
        long = "templates-dir",
        value_name = "DIR",
        help = "Directory holding the project templates"
    )]
    pub templates_dir: Option<PathBuf>,

    /// Do not link any library submodules.
    #[arg(long = "no-submodules", help = "Skip linking library submodules")]
    pub no_submodules: bool,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `vcs.program`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path of the configuration file in use.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_name_creates_a_project() {
        let cli = Cli::parse_from(["kiproj", "blinky"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.create.name.as_deref(), Some("blinky"));
        assert!(!cli.create.dry_run);
    }

    #[test]
    fn create_flags_parse() {
        let cli = Cli::parse_from([
            "kiproj",
            "blinky",
            "--dry-run",
            "--no-submodules",
            "--templates-dir",
            "/opt/templates",
        ]);
        assert!(cli.create.dry_run);
        assert!(cli.create.no_submodules);
        assert_eq!(
            cli.create.templates_dir,
            Some(PathBuf::from("/opt/templates"))
        );
    }

    #[test]
    fn subcommand_wins_over_name() {
        let cli = Cli::parse_from(["kiproj", "config", "path"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config(ConfigCommands::Path))
        ));
        assert!(cli.create.name.is_none());
    }

    #[test]
    fn global_flags_work_after_subcommand() {
        let cli = Cli::parse_from(["kiproj", "init", "--force", "-c", "/tmp/k.toml"]);
        assert!(matches!(cli.command, Some(Commands::Init(InitArgs { force: true }))));
        assert_eq!(cli.global.config, Some(PathBuf::from("/tmp/k.toml")));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["kiproj", "--quiet", "--verbose", "blinky"]);
        assert!(result.is_err());
    }
}

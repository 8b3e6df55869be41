//! Error handling for the kiproj CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use kiproj_core::error::KiprojError;

pub use kiproj_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// No project name and no subcommand.
    #[error("No project name given")]
    MissingProjectName,

    /// Project name validation failed.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// `--templates-dir` or `templates.dir` points at nothing.
    #[error("Templates directory not found: {path}")]
    TemplatesDirNotFound { path: PathBuf },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error from project creation. Rollback has already happened.
    #[error("Project creation failed: {0}")]
    Core(#[from] KiprojError),

    // ── System errors ──────────────────────────────────────────────────────
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingProjectName => vec![
                "Pass the project name: kiproj <NAME>".into(),
                "Use --help for usage information".into(),
            ],

            Self::InvalidProjectName { name, reason } => vec![
                format!("Project name '{}' is invalid: {}", name, reason),
                "The name becomes a directory and the KiCad file names".into(),
                "Examples: blinky, motor-driver, sensor_board_v2".into(),
            ],

            Self::TemplatesDirNotFound { path } => vec![
                format!("'{}' is not a directory", path.display()),
                "Omit --templates-dir to use the built-in templates".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                format!(
                    "Check your config file at {}",
                    crate::config::AppConfig::config_path().display()
                ),
                "Use 'kiproj init --force' to write a fresh default config".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Check available disk space".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingProjectName => ErrorCategory::UserError,
            Self::InvalidProjectName { .. } => ErrorCategory::UserError,
            Self::TemplatesDirNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Conflict => ErrorCategory::AlreadyExists,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::External => ErrorCategory::External,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | External tool |  5   |
    /// | Internal      |  1   |
    /// | Exists        |  6   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::AlreadyExists => 6,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::External => 5,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));
        output.push_str(&format!("  {}\n", self.to_string().red()));

        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`], no ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::AlreadyExists => tracing::warn!("Already exists: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("{}", self),
            ErrorCategory::External => tracing::error!("External tool failed: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error.
    UserError,
    /// The project root already exists; nothing on disk was touched.
    AlreadyExists,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// An external program (git) failed or is missing.
    External,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for anyhow::Result<T> {
    /// Configuration plumbing reports through `anyhow`; its context chain
    /// becomes the message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: format!("{}: {e:#}", f().into()),
            source: Some(e.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kiproj_core::application::ApplicationError;
    use kiproj_core::domain::TemplateAsset;
    use std::io;

    fn core(err: ApplicationError) -> CliError {
        CliError::Core(err.into())
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn existing_project_has_its_own_exit_code() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/demo"),
        });
        assert_eq!(err.category(), ErrorCategory::AlreadyExists);
        assert_eq!(err.exit_code(), 6);
        assert_ne!(err.exit_code(), CliError::MissingProjectName.exit_code());
    }

    #[test]
    fn missing_template_is_not_found() {
        let err = core(ApplicationError::TemplateMissing {
            asset: TemplateAsset::SymbolLibTable,
            source_location: "/srv/templates".into(),
        });
        assert_eq!(err.exit_code(), 3);
        assert_eq!(
            CliError::TemplatesDirNotFound {
                path: PathBuf::from("/nope")
            }
            .exit_code(),
            3
        );
    }

    #[test]
    fn git_failures_are_external() {
        let failed = core(ApplicationError::VcsFailed {
            command: "git init".into(),
            reason: "fatal".into(),
        });
        let missing = core(ApplicationError::VcsUnavailable {
            program: "git".into(),
            reason: "not found".into(),
        });
        assert_eq!(failed.exit_code(), 5);
        assert_eq!(missing.exit_code(), 5);
    }

    #[test]
    fn filesystem_failure_is_internal() {
        let err = core(ApplicationError::FilesystemError {
            path: PathBuf::from("/tmp/demo"),
            reason: "disk full".into(),
        });
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn configuration_and_input_codes() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        assert_eq!(CliError::MissingProjectName.exit_code(), 2);
        assert_eq!(
            CliError::InvalidProjectName {
                name: ".x".into(),
                reason: "r".into()
            }
            .exit_code(),
            2
        );
    }

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn core_suggestions_pass_through() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/demo"),
        });
        assert!(
            err.suggestions()
                .iter()
                .any(|s| s.contains("Nothing was changed"))
        );
    }

    #[test]
    fn invalid_name_suggestions_non_empty() {
        let err = CliError::InvalidProjectName {
            name: ".hidden".into(),
            reason: "starts with '.'".into(),
        };
        assert!(!err.suggestions().is_empty());
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = CliError::MissingProjectName;
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "reading cwd".into(),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: gone"));
        assert!(!s.contains("--verbose"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }

    #[test]
    fn into_cli_anyhow_is_configuration() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("bad key"));
        let cli = result.with_cli_context(|| "loading config").unwrap_err();
        assert_eq!(cli.exit_code(), 4);
        assert!(cli.to_string().contains("bad key"));
    }

    #[test]
    fn configuration_message_is_prefixed_once() {
        let result: anyhow::Result<()> =
            Err(anyhow::anyhow!("expected `=`").context("could not be read"));
        let cli = result
            .with_cli_context(|| "/etc/kiproj/config.toml")
            .unwrap_err();
        let rendered = cli.format_plain(false);

        assert_eq!(rendered.matches("Configuration error").count(), 1);
        assert!(rendered.contains(
            "Configuration error: /etc/kiproj/config.toml: could not be read: expected `=`"
        ));
    }
}

//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only receives the values it needs
//! (the submodule list, a template provider, a git program).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `KIPROJ__<SECTION>__<KEY>`, e.g.
//!    `KIPROJ__VCS__PROGRAM=/usr/local/bin/git`
//! 3. Config file (`--config`, `$KIPROJ_CONFIG`, or [`AppConfig::config_path`])
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use kiproj_core::domain::SubmoduleSpec;

const ENV_PREFIX: &str = "KIPROJ";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Libraries linked into `hardware/includes` of every new project.
    pub submodules: Vec<SubmoduleSpec>,
    /// Template settings.
    pub templates: TemplateConfig,
    /// Version control settings.
    pub vcs: VcsConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory to read templates from instead of the built-in set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VcsConfig {
    /// git executable, by name on `PATH` or absolute.
    pub program: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            submodules: SubmoduleSpec::defaults(),
            templates: TemplateConfig::default(),
            vcs: VcsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            program: "git".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration on top of the built-in defaults.
    ///
    /// `config_file` is the path given via `--config`; it must exist. Without
    /// it the platform default location is read if present.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let file = match config_file {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::from(Self::config_path())
                .format(FileFormat::Toml)
                .required(false),
        };

        let config: Self = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .context("could not be read")?
            .try_deserialize()
            .context("has an invalid value")?;

        config.validate()?;
        debug!(
            submodules = config.submodules.len(),
            vcs = %config.vcs.program,
            "Configuration loaded"
        );
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        SubmoduleSpec::validate_all(&self.submodules).context("Invalid submodule list")?;
        if self.vcs.program.trim().is_empty() {
            anyhow::bail!("vcs.program must not be empty");
        }
        Ok(())
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.kiproj.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("org", "kiproj", "kiproj")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".kiproj.toml"))
    }

    /// The file that `load` reads: the explicit one, or the default.
    pub fn active_path(config_file: Option<&Path>) -> PathBuf {
        config_file
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::config_path)
    }

    /// Render as TOML, the format `kiproj init` writes.
    pub fn to_toml(&self) -> anyhow::Result<String> {
        toml::to_string_pretty(self).context("Failed to serialise configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_link_the_builtin_libraries() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.submodules, SubmoduleSpec::defaults());
        assert_eq!(cfg.vcs.program, "git");
        assert!(cfg.templates.dir.is_none());
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn file_overrides_defaults() {
        let file = write_config(
            r#"
            [vcs]
            program = "/opt/git/bin/git"

            [templates]
            dir = "/srv/kicad-templates"

            [[submodules]]
            relative_path = "Parts.pretty"
            source_url = "https://example.com/parts.git"
            "#,
        );

        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(cfg.vcs.program, "/opt/git/bin/git");
        assert_eq!(cfg.templates.dir, Some(PathBuf::from("/srv/kicad-templates")));
        assert_eq!(
            cfg.submodules,
            vec![SubmoduleSpec::new(
                "Parts.pretty",
                "https://example.com/parts.git"
            )]
        );
        assert!(!cfg.output.no_color);
    }

    #[test]
    fn empty_submodule_list_is_allowed() {
        let file = write_config("submodules = []\n");
        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert!(cfg.submodules.is_empty());
    }

    #[test]
    fn escaping_submodule_path_is_rejected() {
        let file = write_config(
            r#"
            [[submodules]]
            relative_path = "../outside"
            source_url = "https://example.com/x.git"
            "#,
        );
        let err = AppConfig::load(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("Invalid submodule list"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("nope.toml"))).is_err());
    }

    #[test]
    fn default_config_survives_a_toml_round_trip() {
        let toml = AppConfig::default().to_toml().unwrap();
        let file = write_config(&toml);
        assert_eq!(AppConfig::load(Some(file.path())).unwrap(), AppConfig::default());
    }

    #[test]
    fn active_path_prefers_explicit_file() {
        let explicit = Path::new("/tmp/kiproj.toml");
        assert_eq!(AppConfig::active_path(Some(explicit)), explicit);
        assert_eq!(AppConfig::active_path(None), AppConfig::config_path());
    }
}

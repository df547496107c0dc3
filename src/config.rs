//! Configuration for maven-prs.
//!
//! Loaded from `~/.maven-prs/config.toml` when present. Every setting is
//! optional, and most can be overridden from the environment or the command
//! line. Resolution order, first non-empty wins:
//!
//! - YAML include file: `--yaml` → `MAVEN_PRS_YAML` → `yaml-path`
//! - GitHub CLI program: `MAVEN_PRS_GH` → `gh` → `gh` on `PATH`

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

/// Environment variable naming the YAML include file.
pub const YAML_ENV: &str = "MAVEN_PRS_YAML";

/// Environment variable naming the `gh` program.
pub const GH_ENV: &str = "MAVEN_PRS_GH";

/// maven-prs configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// The jQAssistant YAML file whose include list mirrors the repository list.
    /// Archived repositories are pruned from it.
    pub yaml_path: Option<PathBuf>,

    /// Path to the `gh` program.
    pub gh: Option<PathBuf>,
}

impl Config {
    /// Load config from `~/.maven-prs/config.toml`.
    /// A missing file yields the defaults; an unreadable or invalid one is an error.
    pub fn load() -> Result<Self, String> {
        let Some(path) = Self::path() else {
            return Ok(Self::default());
        };

        let contents = match fs::read_to_string(&path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };

        Self::from_toml(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.maven-prs/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".maven-prs").join("config.toml"))
    }

    pub fn from_toml(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Resolve the YAML include file, if any.
    pub fn yaml_path(&self, explicit: Option<&Path>) -> Option<PathBuf> {
        self.yaml_path_with(explicit, env::var_os(YAML_ENV).map(PathBuf::from))
    }

    /// Resolve the `gh` program.
    pub fn gh_program(&self) -> PathBuf {
        self.gh_program_with(env::var_os(GH_ENV).map(PathBuf::from))
    }

    fn yaml_path_with(&self, explicit: Option<&Path>, from_env: Option<PathBuf>) -> Option<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .into_iter()
            .chain(from_env)
            .chain(self.yaml_path.clone())
            .find(|p| !p.as_os_str().is_empty())
    }

    fn gh_program_with(&self, from_env: Option<PathBuf>) -> PathBuf {
        from_env
            .into_iter()
            .chain(self.gh.clone())
            .find(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from("gh"))
    }
}

//! Configuration loading and management.

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "readme-survey.toml";

/// Prefix for environment overrides, e.g. `README_SURVEY_OUTPUT__FORMAT=json`.
pub const ENV_PREFIX: &str = "README_SURVEY_";

/// Trusted image hosts, from NuGet Gallery's `Trusted-Image-Domains.json`.
pub const DEFAULT_TRUSTED_IMAGE_HOSTS: &[&str] = &[
    "api.bintray.com",
    "api.codacy.com",
    "app.codacy.com",
    "api.codeclimate.com",
    "api.dependabot.com",
    "api.travis-ci.com",
    "api.travis-ci.org",
    "app.fossa.io",
    "badge.fury.io",
    "badgen.net",
    "badges.gitter.im",
    "bettercodehub.com",
    "buildstats.info",
    "ci.appveyor.com",
    "circleci.com",
    "codecov.io",
    "codefactor.io",
    "coveralls.io",
    "gitlab.com",
    "img.shields.io",
    "isitmaintained.com",
    "opencollective.com",
    "snyk.io",
    "sonarcloud.io",
    "raw.github.com",
    "raw.githubusercontent.com",
    "user-images.githubusercontent.com",
    "camo.githubusercontent.com",
];

/// Code fence labels that mean C#.
pub const DEFAULT_CSHARP_FENCE_ALIASES: &[&str] = &["c#", "cs", "csharp"];

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Classification policy.
    pub policy: PolicyConfig,
    /// Corpus layout.
    pub corpus: CorpusConfig,
    /// Output configuration.
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from an explicit file path.
    ///
    /// Errors if the file does not exist. Env vars with the `README_SURVEY_`
    /// prefix override file values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::config(format!(
                "config file not found: {}",
                path.display()
            )));
        }
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file_exact(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| Error::config(e.to_string()))
    }

    /// Load configuration from `readme-survey.toml` in `dir`.
    ///
    /// A missing file is silently skipped (defaults are used).
    pub fn load_default(dir: impl AsRef<Path>) -> Result<Self> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(dir.as_ref().join(CONFIG_FILE_NAME)))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| Error::config(e.to_string()))
    }
}

/// Classification policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Image hosts that are never reported as disallowed.
    pub trusted_image_hosts: Vec<String>,
    /// Fence labels flagged as C#.
    pub csharp_fence_aliases: Vec<String>,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            trusted_image_hosts: DEFAULT_TRUSTED_IMAGE_HOSTS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            csharp_fence_aliases: DEFAULT_CSHARP_FENCE_ALIASES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Corpus layout, as written by the README downloader.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Manifest file name, relative to the corpus root.
    pub manifest: String,
    /// README file name inside `<owner>/<name>/`.
    pub readme: String,
    /// Marker file recording that a repository has no README.
    pub not_found_marker: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            manifest: "repositories.json".to_string(),
            readme: "README.md".to_string(),
            not_found_marker: "_._".to_string(),
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Run summary format.
    pub format: OutputFormat,
    /// Show a progress bar on a TTY.
    pub progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            progress: true,
        }
    }
}

/// Run summary format.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// JSON format.
    Json,
    /// Markdown format.
    Markdown,
}

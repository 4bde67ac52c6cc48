//! Mirror configuration
//!
//! A configuration is an ordered list of sources and an ordered list of
//! profiles. Two file formats are accepted, chosen by extension:
//!
//! - `.toml`: `[[source]]` and `[[profile]]` tables
//! - anything else: the line-oriented `bamrc` format (see [`bamrc`])
//!
//! Both formats go through the same validation, so a loaded
//! [`MirrorConfig`] always has unique names, resolvable targets and
//! compilable collapse patterns.

pub mod bamrc;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use bam_output::GlobPattern;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "bamrc";

/// A named location to back up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub name: String,
    /// Path handed to rsync. May contain glob wildcards.
    pub path: String,
    /// Patterns passed to rsync as `--exclude=<pattern>`.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Patterns used to collapse runs in the change log.
    #[serde(default)]
    pub collapse: Vec<String>,
}

impl Source {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            exclude: Vec::new(),
            collapse: Vec::new(),
        }
    }
}

/// One source mapped into a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Name of a declared [`Source`].
    pub source: String,
    /// Destination path relative to the profile root.
    pub path: String,
}

/// A destination root and the sources mirrored into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Destination root, typically a mount point.
    pub destination: String,
    #[serde(default)]
    pub targets: Vec<Target>,
}

impl Profile {
    pub fn new(destination: impl Into<String>) -> Self {
        Self {
            destination: destination.into(),
            targets: Vec::new(),
        }
    }

    /// Full destination of a target: `<destination>/<target path>`.
    pub fn target_destination(&self, target: &Target) -> String {
        format!("{}/{}", self.destination.trim_end_matches('/'), target.path)
    }

    /// Whether the destination root currently exists as a directory.
    pub fn is_available(&self) -> bool {
        Path::new(&self.destination).is_dir()
    }
}

/// Parsed mirror configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorConfig {
    #[serde(default, rename = "source")]
    pub sources: Vec<Source>,
    #[serde(default, rename = "profile")]
    pub profiles: Vec<Profile>,
}

impl MirrorConfig {
    /// Load and validate a configuration file.
    ///
    /// The format is chosen from the extension: `.toml` is TOML, anything
    /// else is `bamrc`.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

        let is_toml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("toml"));

        tracing::debug!(?path, toml = is_toml, "Loading config");
        let config = if is_toml {
            Self::parse_toml(&content, path)?
        } else {
            bamrc::parse(&content, path)?
        };
        config.validate()?;

        tracing::info!(
            sources = config.sources.len(),
            profiles = config.profiles.len(),
            "Loaded config from {}",
            path.display()
        );
        Ok(config)
    }

    /// Parse TOML content without validating it.
    pub fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigToml {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Look up a source by name.
    pub fn source(&self, name: &str) -> Option<&Source> {
        self.sources.iter().find(|s| s.name == name)
    }

    /// Check names, target references and collapse patterns.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for source in &self.sources {
            if !names.insert(source.name.as_str()) {
                return Err(Error::InvalidConfig {
                    message: format!("duplicate source '{}'", source.name),
                });
            }
            for pattern in &source.collapse {
                GlobPattern::new(pattern.as_str())?;
            }
        }

        let mut destinations = HashSet::new();
        for profile in &self.profiles {
            if !destinations.insert(profile.destination.as_str()) {
                return Err(Error::InvalidConfig {
                    message: format!("duplicate profile '{}'", profile.destination),
                });
            }
            for target in &profile.targets {
                if self.source(&target.source).is_none() {
                    return Err(Error::UnknownSource {
                        name: target.source.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Resolve the configuration file to use when none is given explicitly.
///
/// Prefers `./bamrc`, then `<config dir>/bam/bamrc`. When neither exists
/// the working-directory path is returned so that loading reports it.
pub fn locate(cwd: &Path) -> PathBuf {
    let local = cwd.join(CONFIG_FILE_NAME);
    if local.is_file() {
        return local;
    }
    if let Some(global) = dirs::config_dir().map(|d| d.join("bam").join(CONFIG_FILE_NAME)) {
        if global.is_file() {
            tracing::debug!(?global, "Using user config");
            return global;
        }
    }
    local
}

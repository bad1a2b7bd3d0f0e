//! vcdeps.toml parsing and settings resolution
//!
//! Settings come from three layers, highest precedence first: command line
//! options, the `vcdeps.toml` configuration file, built-in defaults.
//!
//! ```toml
//! [vcpkg]
//! root = "C:/dev/vcpkg"
//! repository = "https://github.com/Microsoft/vcpkg"
//! branch = "master"
//!
//! [output]
//! dir = "deps"
//!
//! [dependencies]
//! packages = ["bullet3", "glm", "ffmpeg", "openal-soft", "sdl2"]
//!
//! [build]
//! triplets = ["x64-windows", "x64-windows-static"]
//! keep_going = false
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use super::triplet::{Arch, Linkage, Triplet};
use crate::error::{hints, VcdepsError};

/// Default configuration file name, looked up in the current directory
pub const CONFIG_FILE_NAME: &str = "vcdeps.toml";

/// Upstream vcpkg repository
pub const DEFAULT_REPOSITORY: &str = "https://github.com/Microsoft/vcpkg";

/// Branch tracked by `vcpkg update`
pub const DEFAULT_BRANCH: &str = "master";

/// Packages the engine links against
pub const DEFAULT_PACKAGES: &[&str] = &["bullet3", "glm", "ffmpeg", "openal-soft", "sdl2"];

/// Root of vcdeps.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub vcpkg: VcpkgSection,

    #[serde(default)]
    pub output: OutputSection,

    #[serde(default)]
    pub dependencies: DependenciesSection,

    #[serde(default)]
    pub build: BuildSection,

    /// Directory relative paths in this file are resolved against
    #[serde(skip)]
    pub base_dir: PathBuf,
}

/// [vcpkg] section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VcpkgSection {
    pub root: Option<PathBuf>,
    pub repository: Option<String>,
    pub branch: Option<String>,
}

/// [output] section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputSection {
    pub dir: Option<PathBuf>,
}

/// [dependencies] section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DependenciesSection {
    pub packages: Option<Vec<String>>,
}

/// [build] section
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildSection {
    pub triplets: Option<Vec<Triplet>>,
    #[serde(default)]
    pub keep_going: bool,
}

impl FileConfig {
    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        let mut config = Self::parse(&content)?;
        config.base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Ok(config)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(|e| {
            VcdepsError::config_error_with_hint(
                format!("Failed to parse {}", CONFIG_FILE_NAME),
                Some(e.into()),
                hints::invalid_config(),
            )
        })?;

        if let Some(packages) = &mut config.dependencies.packages {
            if packages.is_empty() {
                return Err(VcdepsError::config_error_with_hint(
                    "[dependencies] packages must not be empty",
                    None,
                    hints::invalid_config(),
                )
                .into());
            }
            // A blank name would reach vcpkg as an empty argument
            for (index, package) in packages.iter_mut().enumerate() {
                let trimmed = package.trim();
                if trimmed.is_empty() {
                    return Err(VcdepsError::config_error_with_hint(
                        format!("[dependencies] packages[{}] is blank", index),
                        None,
                        hints::invalid_config(),
                    )
                    .into());
                }
                if trimmed.len() != package.len() {
                    *package = trimmed.to_string();
                }
            }
        }
        if let Some(triplets) = &config.build.triplets {
            if triplets.is_empty() {
                return Err(VcdepsError::config_error_with_hint(
                    "[build] triplets must not be empty",
                    None,
                    hints::invalid_config(),
                )
                .into());
            }
        }

        Ok(config)
    }

    /// Load an explicitly requested file, or `vcdeps.toml` in `cwd` if present
    pub fn discover(explicit: Option<&Path>, cwd: &Path) -> Result<Option<Self>> {
        match explicit {
            Some(path) => {
                let path = cwd.join(path);
                if !path.is_file() {
                    return Err(VcdepsError::config_error(format!(
                        "configuration file {} does not exist",
                        path.display()
                    ))
                    .into());
                }
                Self::load_from_path(&path).map(Some)
            }
            None => {
                let path = cwd.join(CONFIG_FILE_NAME);
                if path.is_file() {
                    Self::load_from_path(&path).map(Some)
                } else {
                    Ok(None)
                }
            }
        }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        self.base_dir.join(path)
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub vcpkg_root: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub packages: Vec<String>,
    pub archs: Vec<Arch>,
    pub linkages: Vec<Linkage>,
    pub triplets: Vec<Triplet>,
    pub keep_going: bool,
    pub verbose: bool,
}

/// Environment-derived fallbacks
#[derive(Debug, Clone)]
pub struct Defaults {
    /// Working directory relative paths are resolved against
    pub cwd: PathBuf,
    /// Directory of a `vcpkg` executable found on PATH
    pub vcpkg_on_path: Option<PathBuf>,
}

impl Defaults {
    /// Inspect the current process environment
    pub fn detect() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        let vcpkg_on_path = which::which("vcpkg")
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Ok(Self { cwd, vcpkg_on_path })
    }
}

/// Process-wide configuration, resolved once and passed to every action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// vcpkg checkout
    pub vcpkg_root: PathBuf,
    /// Copy destination root; each triplet gets a subfolder
    pub output_dir: PathBuf,
    /// Repository cloned by `vcpkg install`
    pub repository: String,
    /// Branch cloned and tracked by `vcpkg update`
    pub branch: String,
    /// Packages passed to vcpkg
    pub packages: Vec<String>,
    /// Selected triplets, in processing order
    pub triplets: Vec<Triplet>,
    /// Continue with remaining triplets after a failure
    pub keep_going: bool,
    pub verbose: bool,
}

impl Settings {
    /// Merge command line overrides, the optional config file and defaults
    pub fn resolve(overrides: Overrides, file: Option<FileConfig>, defaults: &Defaults) -> Self {
        let file = file.unwrap_or_default();
        let cwd = &defaults.cwd;

        let vcpkg_root = overrides
            .vcpkg_root
            .map(|p| cwd.join(p))
            .or_else(|| file.vcpkg.root.as_deref().map(|p| cwd.join(file.resolve_path(p))))
            .or_else(|| defaults.vcpkg_on_path.clone())
            .unwrap_or_else(|| cwd.join("vcpkg"));

        let output_dir = overrides
            .output
            .map(|p| cwd.join(p))
            .or_else(|| file.output.dir.as_deref().map(|p| cwd.join(file.resolve_path(p))))
            .unwrap_or_else(|| cwd.clone());

        let packages = if !overrides.packages.is_empty() {
            overrides.packages
        } else if let Some(packages) = file.dependencies.packages {
            packages
        } else {
            DEFAULT_PACKAGES.iter().map(|s| s.to_string()).collect()
        };

        let triplets = if !overrides.triplets.is_empty() {
            dedup(overrides.triplets)
        } else if !overrides.archs.is_empty() || !overrides.linkages.is_empty() {
            let archs = if overrides.archs.is_empty() {
                vec![Arch::X86, Arch::X64]
            } else {
                overrides.archs
            };
            let linkages = if overrides.linkages.is_empty() {
                vec![Linkage::Dynamic, Linkage::Static]
            } else {
                overrides.linkages
            };
            Triplet::combinations(&archs, &linkages)
        } else if let Some(triplets) = file.build.triplets {
            dedup(triplets)
        } else {
            Triplet::ALL.to_vec()
        };

        Self {
            vcpkg_root,
            output_dir,
            repository: file
                .vcpkg
                .repository
                .unwrap_or_else(|| DEFAULT_REPOSITORY.to_string()),
            branch: file
                .vcpkg
                .branch
                .unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            packages,
            triplets,
            keep_going: overrides.keep_going || file.build.keep_going,
            verbose: overrides.verbose,
        }
    }

    /// Destination folder for one triplet
    pub fn triplet_output_dir(&self, triplet: &Triplet) -> PathBuf {
        self.output_dir.join(triplet.to_string())
    }
}

fn dedup(triplets: Vec<Triplet>) -> Vec<Triplet> {
    let mut unique = Vec::with_capacity(triplets.len());
    for triplet in triplets {
        if !unique.contains(&triplet) {
            unique.push(triplet);
        }
    }
    unique
}

//! Error types and helpers for user-friendly error messages
//!
//! Every failure the tool can report maps onto one of these variants, each
//! carrying a hint the user can act on.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::Triplet;

/// Errors surfaced to the terminal with an actionable hint
#[derive(Error, Debug)]
pub enum VcdepsError {
    /// Configuration file or option errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<anyhow::Error>,
        hint: Option<String>,
    },

    /// Tool/executable not found on PATH
    #[error("Missing tool: {tool}")]
    MissingTool {
        tool: String,
        required_for: String,
        hint: String,
    },

    /// `git clone` of the vcpkg repository failed
    #[error("Failed to clone {repository} (exit code {exit_code})")]
    Clone {
        repository: String,
        exit_code: i32,
        hint: String,
    },

    /// vcpkg bootstrap script failed
    #[error("vcpkg bootstrap failed (exit code {exit_code})")]
    Bootstrap { exit_code: i32, hint: String },

    /// The vcpkg executable does not exist yet
    #[error("vcpkg is not bootstrapped: {} not found", .executable.display())]
    NotBootstrapped { executable: PathBuf },

    /// A vcpkg or git subprocess exited unsuccessfully
    #[error("{action} failed for {target} (exit code {exit_code})")]
    BuildFailure {
        action: String,
        target: String,
        exit_code: i32,
        hint: Option<String>,
    },

    /// The installed tree for a triplet does not exist
    #[error("Copy source missing for {triplet}: {} does not exist", .source_dir.display())]
    CopySourceMissing {
        triplet: Triplet,
        source_dir: PathBuf,
    },

    /// Filesystem failure while copying artifacts
    #[error("Failed to copy {triplet} artifacts into {}", .destination.display())]
    Copy {
        triplet: Triplet,
        destination: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// One or more triplets failed under `--keep-going`
    #[error("{action} failed for {} triplet(s): {}", .failed.len(), join_triplets(.failed))]
    TripletFailures {
        action: String,
        failed: Vec<Triplet>,
        diagnostics: Vec<String>,
    },
}

fn join_triplets(triplets: &[Triplet]) -> String {
    triplets
        .iter()
        .map(Triplet::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl VcdepsError {
    /// Create a configuration error
    pub fn config_error(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: None,
        }
    }

    /// Create a configuration error with source and hint
    pub fn config_error_with_hint(
        message: impl Into<String>,
        source: Option<anyhow::Error>,
        hint: impl Into<String>,
    ) -> Self {
        Self::Config {
            message: message.into(),
            source,
            hint: Some(hint.into()),
        }
    }

    /// Create a missing tool error
    pub fn missing_tool(
        tool: impl Into<String>,
        required_for: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self::MissingTool {
            tool: tool.into(),
            required_for: required_for.into(),
            hint: hint.into(),
        }
    }

    /// Create a build failure for a vcpkg action on one target
    pub fn build_failure(
        action: impl Into<String>,
        target: impl Into<String>,
        exit_code: i32,
    ) -> Self {
        Self::BuildFailure {
            action: action.into(),
            target: target.into(),
            exit_code,
            hint: None,
        }
    }

    /// Create a build failure with a hint
    pub fn build_failure_with_hint(
        action: impl Into<String>,
        target: impl Into<String>,
        exit_code: i32,
        hint: impl Into<String>,
    ) -> Self {
        Self::BuildFailure {
            action: action.into(),
            target: target.into(),
            exit_code,
            hint: Some(hint.into()),
        }
    }

    fn hint(&self) -> Option<String> {
        match self {
            VcdepsError::Config { hint, .. } | VcdepsError::BuildFailure { hint, .. } => {
                hint.clone()
            }
            VcdepsError::MissingTool {
                hint, required_for, ..
            } => Some(format!("Required for {}.\n{}", required_for, hint)),
            VcdepsError::Clone { hint, .. } | VcdepsError::Bootstrap { hint, .. } => {
                Some(hint.clone())
            }
            VcdepsError::NotBootstrapped { .. } => Some(hints::not_bootstrapped().to_string()),
            VcdepsError::CopySourceMissing { triplet, .. } => {
                Some(hints::copy_source_missing(triplet))
            }
            VcdepsError::Copy { .. } => Some(hints::copy_destination().to_string()),
            VcdepsError::TripletFailures { .. } => None,
        }
    }

    /// Display error with formatting and hints
    pub fn display_with_hints(&self) {
        use console::style;

        eprintln!("\n{} {}", style("ERROR:").red().bold(), self);

        if let VcdepsError::Copy { source, .. } | VcdepsError::Config { source: Some(source), .. } =
            self
        {
            for cause in source.chain() {
                eprintln!("  caused by: {}", cause);
            }
        }

        if let Some(hint) = self.hint() {
            eprintln!("\n{} {}", style("HINT:").yellow().bold(), hint);
        }

        if let VcdepsError::TripletFailures { diagnostics, .. } = self {
            if !diagnostics.is_empty() {
                eprintln!("\n{}", style("DIAGNOSTICS:").cyan().bold());
                for diag in diagnostics {
                    eprintln!("  • {}", diag);
                }
            }
        }

        eprintln!();
    }
}

/// Common error hints
pub mod hints {
    use crate::config::Triplet;

    /// Get hint for missing Git
    pub fn git() -> &'static str {
        "Install Git from https://git-scm.com/ or use your package manager:\n\
         • macOS: brew install git\n\
         • Ubuntu: sudo apt install git\n\
         • Windows: winget install Git.Git"
    }

    /// Get hint for a failed clone
    pub fn clone() -> &'static str {
        "Check your network connection and that the repository URL is reachable.\n\
         The URL and branch can be changed in the [vcpkg] section of vcdeps.toml."
    }

    /// Get hint for a failed bootstrap
    pub fn bootstrap() -> &'static str {
        "The bootstrap script compiles vcpkg itself and needs a working C++ toolchain:\n\
         • Windows: install Visual Studio with the 'Desktop development with C++' workload\n\
         • Linux/macOS: install a C++ compiler, curl, zip, unzip and tar"
    }

    /// Get hint for a missing vcpkg executable
    pub fn not_bootstrapped() -> &'static str {
        "Run: vcdeps vcpkg install\n\
         Or point --vcpkg-root at an existing, bootstrapped vcpkg checkout."
    }

    /// Get hint for a failed `vcpkg install`
    pub fn vcpkg_install() -> &'static str {
        "Scroll up for vcpkg's own build log. Common causes:\n\
         • A port failed to compile (check buildtrees/<port>/*.log in the vcpkg checkout)\n\
         • The checkout is outdated: run vcdeps vcpkg update"
    }

    /// Get hint for copying before building
    pub fn copy_source_missing(triplet: &Triplet) -> String {
        format!(
            "Nothing has been built for {triplet} yet.\n\
             Run: vcdeps deps build --triplet {triplet}"
        )
    }

    /// Get hint for an unwritable destination
    pub fn copy_destination() -> &'static str {
        "Check that the output directory is writable (-o/--output or [output] dir in vcdeps.toml)."
    }

    /// Get hint for an invalid vcdeps.toml
    pub fn invalid_config() -> &'static str {
        "vcdeps.toml is invalid. Common issues:\n\
         • Invalid TOML syntax (check quotes, brackets, commas)\n\
         • Unknown triplet in [build] triplets\n\
         • Empty [dependencies] packages list or a blank package name"
    }
}

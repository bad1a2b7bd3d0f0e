//! Local vcpkg checkout: cloning, bootstrapping and package commands
//!
//! All process launches go through a [`ProcessRunner`]; this module only
//! decides what to run and in which directory.

pub mod listing;

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::Triplet;
use crate::error::{hints, VcdepsError};
use crate::exec::{Invocation, ProcessRunner};
use crate::utils::{paths, terminal};

pub use listing::{parse_list_output, InstalledPackages};

/// vcpkg executable name on this host
pub fn executable_name() -> &'static str {
    if cfg!(windows) {
        "vcpkg.exe"
    } else {
        "vcpkg"
    }
}

/// Bootstrap script name on this host
pub fn bootstrap_script_name() -> &'static str {
    if cfg!(windows) {
        "bootstrap-vcpkg.bat"
    } else {
        "bootstrap-vcpkg.sh"
    }
}

/// What `bootstrap` had to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BootstrapOutcome {
    pub cloned: bool,
    pub bootstrapped: bool,
}

impl BootstrapOutcome {
    pub fn was_noop(&self) -> bool {
        !self.cloned && !self.bootstrapped
    }
}

/// A vcpkg checkout driven through a process runner
pub struct Vcpkg<R> {
    root: PathBuf,
    repository: String,
    branch: String,
    runner: R,
}

impl<R: ProcessRunner> Vcpkg<R> {
    pub fn new(
        root: impl Into<PathBuf>,
        repository: impl Into<String>,
        branch: impl Into<String>,
        runner: R,
    ) -> Self {
        Self {
            root: root.into(),
            repository: repository.into(),
            branch: branch.into(),
            runner,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn exe_path(&self) -> PathBuf {
        self.root.join(executable_name())
    }

    pub fn bootstrap_script(&self) -> PathBuf {
        self.root.join(bootstrap_script_name())
    }

    /// `installed/` directory holding one tree per triplet
    pub fn installed_root(&self) -> PathBuf {
        self.root.join("installed")
    }

    pub fn is_bootstrapped(&self) -> bool {
        self.exe_path().is_file()
    }

    /// Clone the checkout if absent, then build the executable if absent
    pub fn bootstrap(&self) -> Result<BootstrapOutcome> {
        let mut outcome = BootstrapOutcome {
            cloned: false,
            bootstrapped: false,
        };

        if self.root.exists() {
            terminal::print_info(&format!(
                "vcpkg directory {} exists, skipping git clone",
                self.root.display()
            ));
        } else {
            terminal::print_info(&format!(
                "Cloning {} ({}) into {}",
                self.repository,
                self.branch,
                self.root.display()
            ));
            self.clone_checkout()?;
            outcome.cloned = true;
        }

        if self.is_bootstrapped() {
            terminal::print_info("vcpkg executable exists, skipping bootstrap");
        } else {
            terminal::print_info("Running vcpkg bootstrap script");
            self.run_bootstrap_script()?;
            outcome.bootstrapped = true;
        }

        Ok(outcome)
    }

    fn clone_checkout(&self) -> Result<()> {
        let parent = match self.root.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        paths::ensure_dir(&parent)?;

        let invocation = Invocation::new("git")
            .args(["clone", "--depth", "1", "--branch"])
            .arg(self.branch.as_str())
            .arg("--")
            .arg(self.repository.as_str())
            .arg(self.root.to_string_lossy())
            .current_dir(parent);
        let result = self.runner.run(&invocation)?;
        if !result.success {
            return Err(VcdepsError::Clone {
                repository: self.repository.clone(),
                exit_code: result.exit_code,
                hint: hints::clone().to_string(),
            }
            .into());
        }
        Ok(())
    }

    fn run_bootstrap_script(&self) -> Result<()> {
        let invocation = Invocation::new(self.bootstrap_script()).current_dir(&self.root);
        let result = self.runner.run(&invocation)?;
        if !result.success {
            return Err(VcdepsError::Bootstrap {
                exit_code: result.exit_code,
                hint: hints::bootstrap().to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Bootstrap if needed, then fast-forward the checkout to the tracked
    /// branch and rebuild the executable
    pub fn update(&self) -> Result<()> {
        self.bootstrap()?;

        terminal::print_info(&format!("Updating vcpkg to origin/{}", self.branch));
        let steps: [Vec<String>; 4] = [
            vec!["fetch".into(), "origin".into()],
            vec!["reset".into(), "--hard".into(), "HEAD".into()],
            vec!["checkout".into(), self.branch.clone()],
            vec!["merge".into(), format!("origin/{}", self.branch)],
        ];
        for args in steps {
            let step = format!("git {}", args.join(" "));
            let invocation = Invocation::new("git").args(args).current_dir(&self.root);
            let result = self.runner.run(&invocation)?;
            if !result.success {
                return Err(
                    VcdepsError::build_failure(step, "vcpkg update", result.exit_code).into(),
                );
            }
        }

        self.run_bootstrap_script()
    }

    fn require_bootstrapped(&self) -> Result<()> {
        if !self.is_bootstrapped() {
            return Err(VcdepsError::NotBootstrapped {
                executable: self.exe_path(),
            }
            .into());
        }
        Ok(())
    }

    /// `vcpkg install <packages...> --triplet <triplet>`
    pub fn install(&self, packages: &[String], triplet: &Triplet) -> Result<()> {
        self.package_command("install", packages, triplet)
    }

    /// `vcpkg remove <packages...> --triplet <triplet>`
    pub fn remove(&self, packages: &[String], triplet: &Triplet) -> Result<()> {
        self.package_command("remove", packages, triplet)
    }

    fn package_command(&self, verb: &str, packages: &[String], triplet: &Triplet) -> Result<()> {
        self.require_bootstrapped()?;

        let invocation = Invocation::new(self.exe_path())
            .arg(verb)
            .args(packages.iter().map(String::as_str))
            .arg("--triplet")
            .arg(triplet.to_string())
            .current_dir(&self.root);
        let result = self.runner.run(&invocation)?;
        if !result.success {
            let action = format!("vcpkg {}", verb);
            return Err(if verb == "install" {
                VcdepsError::build_failure_with_hint(
                    action,
                    triplet.to_string(),
                    result.exit_code,
                    hints::vcpkg_install(),
                )
            } else {
                VcdepsError::build_failure(action, triplet.to_string(), result.exit_code)
            }
            .into());
        }
        Ok(())
    }

    /// Installed packages as reported by `vcpkg list`
    pub fn list_installed(&self) -> Result<InstalledPackages> {
        self.require_bootstrapped()?;

        let invocation = Invocation::new(self.exe_path())
            .arg("list")
            .current_dir(&self.root)
            .capture_output();
        let result = self.runner.run(&invocation)?;
        if !result.success {
            let stderr = result.stderr.trim();
            if !stderr.is_empty() {
                terminal::print_warning(stderr);
            }
            return Err(
                VcdepsError::build_failure("vcpkg list", "installed packages", result.exit_code)
                    .into(),
            );
        }
        Ok(parse_list_output(&result.stdout))
    }
}

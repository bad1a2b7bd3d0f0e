//! `vcdeps vcpkg <action>`

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::exec::SystemRunner;
use crate::utils::terminal;
use crate::vcpkg::{InstalledPackages, Vcpkg};

/// Administrate the vcpkg checkout
#[derive(Args, Debug)]
pub struct VcpkgCommand {
    #[command(subcommand)]
    pub action: VcpkgAction,
}

#[derive(Subcommand, Debug)]
pub enum VcpkgAction {
    /// Clone and bootstrap vcpkg if needed
    Install,

    /// Update the checkout to the tracked branch and rebuild vcpkg
    Update,

    /// List packages installed in the checkout
    #[command(alias = "list_installed")]
    ListInstalled {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl VcpkgCommand {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let vcpkg = Vcpkg::new(
            &settings.vcpkg_root,
            settings.repository.as_str(),
            settings.branch.as_str(),
            SystemRunner::new(settings.verbose),
        );

        match self.action {
            VcpkgAction::Install => {
                let outcome = vcpkg.bootstrap()?;
                if outcome.was_noop() {
                    terminal::print_success(&format!(
                        "vcpkg is already set up in {}",
                        vcpkg.root().display()
                    ));
                } else {
                    terminal::print_success(&format!(
                        "vcpkg is ready: {}",
                        vcpkg.exe_path().display()
                    ));
                }
                Ok(())
            }
            VcpkgAction::Update => {
                vcpkg.update()?;
                terminal::print_success("vcpkg updated");
                Ok(())
            }
            VcpkgAction::ListInstalled { json } => {
                let spinner = terminal::create_spinner("Querying installed packages...");
                let installed = vcpkg.list_installed();
                spinner.finish_and_clear();
                let installed = installed?;

                if json {
                    let rendered = serde_json::to_string_pretty(&installed)
                        .context("Failed to serialize installed packages")?;
                    println!("{}", rendered);
                } else {
                    print!("{}", render_installed(&installed));
                }
                Ok(())
            }
        }
    }
}

/// One `- name (triplet version, ...)` line per package
fn render_installed(installed: &InstalledPackages) -> String {
    let mut out = String::new();
    for (name, variants) in installed {
        let variants = variants
            .iter()
            .map(|v| format!("{} {}", v.triplet, v.version))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("- {} ({})\n", name, variants));
    }
    out
}

//! `vcdeps deps <action>`

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::config::Settings;
use crate::deps::{build, copy};
use crate::exec::SystemRunner;
use crate::utils::{paths, terminal};
use crate::vcpkg::Vcpkg;

/// Build, copy and clean dependencies
#[derive(Args, Debug)]
pub struct DepsCommand {
    #[command(subcommand)]
    pub action: DepsAction,
}

#[derive(Subcommand, Debug)]
pub enum DepsAction {
    /// Build dependencies with vcpkg for the selected triplets
    Build,

    /// Remove built dependencies from vcpkg for the selected triplets
    Rmbuild,

    /// Copy built dependencies into <output>/<triplet>
    Copy,

    /// Delete <output>/<triplet> folders
    Rmcopy,
}

impl DepsCommand {
    pub fn execute(self, settings: &Settings) -> Result<()> {
        let triplets = settings
            .triplets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>();
        terminal::print_info(&format!("triplets: {}", triplets.join(", ")));

        let vcpkg = Vcpkg::new(
            &settings.vcpkg_root,
            settings.repository.as_str(),
            settings.branch.as_str(),
            SystemRunner::new(settings.verbose),
        );

        match self.action {
            DepsAction::Build => build::build_all(&vcpkg, settings),
            DepsAction::Rmbuild => build::remove_all(&vcpkg, settings),
            DepsAction::Copy => copy::copy_all(&vcpkg.installed_root(), settings),
            DepsAction::Rmcopy => {
                let reclaimed = copy::remove_all(settings)?;
                terminal::print_success(&format!(
                    "Reclaimed {}",
                    paths::format_size(reclaimed)
                ));
                Ok(())
            }
        }
    }
}

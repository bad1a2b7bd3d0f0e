//! `deps build` / `deps rmbuild`

use anyhow::Result;

use super::for_each_triplet;
use crate::config::Settings;
use crate::exec::ProcessRunner;
use crate::utils::terminal;
use crate::vcpkg::Vcpkg;

/// Install the configured packages for every selected triplet
pub fn build_all<R: ProcessRunner>(vcpkg: &Vcpkg<R>, settings: &Settings) -> Result<()> {
    for_each_triplet(settings, "vcpkg install", |triplet| {
        terminal::print_section(&format!("Building {}", triplet));
        terminal::print_info(&format!("Packages: {}", settings.packages.join(", ")));
        vcpkg.install(&settings.packages, triplet)?;
        terminal::print_success(&format!("Built {}", triplet));
        Ok(())
    })
}

/// Remove the configured packages for every selected triplet
pub fn remove_all<R: ProcessRunner>(vcpkg: &Vcpkg<R>, settings: &Settings) -> Result<()> {
    for_each_triplet(settings, "vcpkg remove", |triplet| {
        terminal::print_section(&format!("Removing {}", triplet));
        vcpkg.remove(&settings.packages, triplet)?;
        terminal::print_success(&format!("Removed packages for {}", triplet));
        Ok(())
    })
}

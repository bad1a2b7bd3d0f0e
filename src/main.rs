//! vcdeps - vcpkg dependency helper
//!
//! Clones and bootstraps vcpkg, builds the engine's third-party libraries for
//! each Windows triplet and copies the installed trees into per-triplet
//! folders for the engine build.
//!
//! ## Architecture
//!
//! ```text
//! cli → commands/ → deps/ → vcpkg/ → exec/ → vcpkg, git (subprocesses)
//! ```

mod cli;
mod commands;
mod config;
mod deps;
mod error;
mod exec;
mod utils;
mod vcpkg;

use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use error::VcdepsError;
use utils::terminal;

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<VcdepsError>() {
                Some(vcdeps_err) => vcdeps_err.display_with_hints(),
                None => terminal::print_error(&format!("{:#}", err)),
            }
            ExitCode::FAILURE
        }
    }
}

//! CLI argument parsing using clap derive macros

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::commands::{deps::DepsCommand, vcpkg::VcpkgCommand};
use crate::config::{Arch, Defaults, FileConfig, Linkage, Overrides, Settings, Triplet};

/// vcdeps - vcpkg dependency helper
///
/// Sets up vcpkg, builds the engine's Windows dependencies for each triplet
/// and copies them into per-triplet folders.
#[derive(Parser, Debug)]
#[command(name = "vcdeps")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(flatten)]
    pub folders: FolderArgs,

    #[command(flatten)]
    pub selection: SelectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Folders and configuration file
#[derive(Args, Debug, Default)]
#[command(next_help_heading = "Folders")]
pub struct FolderArgs {
    /// vcpkg directory [default: vcpkg on PATH, else ./vcpkg]
    #[arg(short = 't', long, global = true, env = "VCDEPS_VCPKG_ROOT", value_name = "DIR")]
    pub vcpkg_root: Option<PathBuf>,

    /// Output directory [default: current directory]
    #[arg(short, long, global = true, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Configuration file [default: ./vcdeps.toml if present]
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Which packages and triplets to act on
#[derive(Args, Debug, Default)]
#[command(next_help_heading = "Selection")]
pub struct SelectionArgs {
    /// Dependencies, comma separated [default: all configured dependencies]
    #[arg(short = 'w', long, global = true, value_delimiter = ',', value_name = "PACKAGES")]
    pub packages: Vec<String>,

    /// Architectures, comma separated [default: x86,x64]
    #[arg(short, long, global = true, value_enum, value_delimiter = ',')]
    pub arch: Vec<Arch>,

    /// Linkages, comma separated [default: dynamic,static]
    #[arg(short, long, global = true, value_enum, value_delimiter = ',')]
    pub linkage: Vec<Linkage>,

    /// Explicit triplet(s), overrides --arch/--linkage
    /// [possible values: x86-windows, x86-windows-static, x64-windows, x64-windows-static]
    #[arg(long, global = true, value_delimiter = ',', value_name = "NAME")]
    pub triplet: Vec<Triplet>,

    /// Continue with the remaining triplets after a failure
    #[arg(long, global = true)]
    pub keep_going: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Administrate vcpkg
    Vcpkg(VcpkgCommand),

    /// Dependency commands
    Deps(DepsCommand),
}

impl Cli {
    /// Command line values as settings overrides
    fn overrides(&self) -> Overrides {
        Overrides {
            vcpkg_root: self.folders.vcpkg_root.clone(),
            output: self.folders.output.clone(),
            packages: self
                .selection
                .packages
                .iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
            archs: self.selection.arch.clone(),
            linkages: self.selection.linkage.clone(),
            triplets: self.selection.triplet.clone(),
            keep_going: self.selection.keep_going,
            verbose: self.verbose,
        }
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        // Set up terminal colors
        if self.no_color {
            console::set_colors_enabled(false);
            console::set_colors_enabled_stderr(false);
        }

        let defaults = Defaults::detect()?;
        let file = FileConfig::discover(self.folders.config.as_deref(), &defaults.cwd)?;
        let settings = Settings::resolve(self.overrides(), file, &defaults);

        match self.command {
            Commands::Vcpkg(cmd) => cmd.execute(&settings),
            Commands::Deps(cmd) => cmd.execute(&settings),
        }
    }
}

//! Process execution seam
//!
//! Everything that starts an external program goes through [`ProcessRunner`],
//! so actions can be exercised with a recording runner instead of vcpkg.

pub mod subprocess;

use anyhow::Result;

pub use subprocess::{CommandResult, Invocation};

use crate::error::{hints, VcdepsError};
use crate::utils::terminal;

/// Runs external programs synchronously
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        (**self).run(invocation)
    }
}

/// Runs programs on the host
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner {
    pub verbose: bool,
}

impl SystemRunner {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, invocation: &Invocation) -> Result<CommandResult> {
        // Bare names are looked up on PATH so a missing tool gets a hint
        let program = &invocation.program;
        if program.components().count() == 1 {
            let name = program.to_string_lossy().into_owned();
            if !subprocess::command_exists(&name) {
                let hint = match name.as_str() {
                    "git" => hints::git(),
                    _ => "Install this tool and ensure it's in your PATH",
                };
                return Err(VcdepsError::missing_tool(name, "vcpkg setup", hint).into());
            }
        }

        if self.verbose {
            terminal::print_command(&invocation.display());
        }

        let result = subprocess::run_command(
            program,
            &invocation.args,
            invocation.cwd.as_deref(),
            !invocation.capture,
        )?;

        if self.verbose {
            terminal::print_command(&format!(
                "exit code {} after {:.1}s",
                result.exit_code,
                result.duration.as_secs_f64()
            ));
        }
        Ok(result)
    }
}

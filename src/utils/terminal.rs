//! Console output
//!
//! Status lines and results go to stdout. Warnings, errors and indicatif bars
//! go to stderr, so `vcdeps vcpkg list-installed --json` stays machine-readable.

use std::fmt::Display;
use std::time::Duration;

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};

const RULE_WIDTH: usize = 60;

fn tag(label: &'static str) -> StyledObject<String> {
    style(format!("[{label}]")).bold()
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", tag("error").red(), message);
}

pub fn print_warning(message: &str) {
    eprintln!("{} {}", tag("warn").yellow(), message);
}

pub fn print_success(message: &str) {
    println!("{} {}", tag("done").green(), message);
}

pub fn print_info(message: &str) {
    println!("{} {}", tag("vcdeps").cyan(), message);
}

/// Echo a command line before it runs (verbose mode)
pub fn print_command(command_line: impl Display) {
    println!("{} {}", style("$").dim(), style(command_line).dim());
}

/// `==== title ====` banner printed once per triplet
pub fn print_section(title: &str) {
    let padded = format!(" {title} ");
    let rule = "=".repeat(RULE_WIDTH.saturating_sub(padded.len()) / 2);
    println!("\n{}{}{}", rule, style(padded).bold(), rule);
}

/// Spinner for a single blocking query
pub fn create_spinner(message: &str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message.to_string());
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner:.cyan} {msg} ({elapsed})") {
        spinner.set_style(spinner_style.tick_strings(&["-", "\\", "|", "/", "-"]));
    }
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}

/// File-count progress bar for copying one triplet
pub fn create_progress_bar(files: u64, triplet: &str) -> ProgressBar {
    let bar = ProgressBar::new(files).with_prefix(triplet.to_string());
    if let Ok(bar_style) =
        ProgressStyle::with_template("{prefix:>20.cyan} [{bar:30.green}] {pos}/{len} files")
    {
        bar.set_style(bar_style.progress_chars("#>."));
    }
    bar
}

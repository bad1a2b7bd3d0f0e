//! `deps copy` / `deps rmcopy`
//!
//! Copies `<vcpkg>/installed/<triplet>` into `<output>/<triplet>`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::{fixes, for_each_triplet};
use crate::config::{Settings, Triplet};
use crate::error::VcdepsError;
use crate::utils::{paths, terminal};

/// vcpkg bookkeeping files that must not end up in the output tree
const BOOKKEEPING_FILES: &[&str] = &["CONTROL", "BUILD_INFO"];

/// Summary of one triplet copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyReport {
    pub destination: PathBuf,
    pub files: u64,
    pub fixed: Vec<&'static str>,
}

/// Copy one triplet's installed tree and apply every post-copy fix
pub fn copy_triplet(
    installed_root: &Path,
    settings: &Settings,
    triplet: &Triplet,
) -> Result<CopyReport> {
    let source = installed_root.join(triplet.to_string());
    if !source.is_dir() {
        return Err(VcdepsError::CopySourceMissing {
            triplet: *triplet,
            source_dir: source,
        }
        .into());
    }

    let destination = settings.triplet_output_dir(triplet);
    terminal::print_info(&format!(
        "copy: src={} dst={}",
        source.display(),
        destination.display()
    ));

    let wrap = |source: anyhow::Error| VcdepsError::Copy {
        triplet: *triplet,
        destination: destination.clone(),
        source,
    };

    let progress = terminal::create_progress_bar(paths::count_files(&source), &triplet.to_string());
    let files = paths::copy_tree(&source, &destination, |_| progress.inc(1)).map_err(wrap)?;
    progress.finish_and_clear();

    // The whole installed tree is copied, so every fix runs regardless of
    // the package selection.
    let mut fixed = Vec::new();
    for fix in fixes::all() {
        if fix.apply(&destination).map_err(wrap)? > 0 {
            terminal::print_info(&format!("fix for \"{}\" applied", fix.package));
            fixed.push(fix.package);
        }
    }

    for name in BOOKKEEPING_FILES {
        let path = destination.join(name);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                let err = anyhow::Error::new(e).context(format!("Failed to remove {}", path.display()));
                return Err(wrap(err).into());
            }
        }
    }

    Ok(CopyReport {
        destination,
        files,
        fixed,
    })
}

/// Copy every selected triplet
pub fn copy_all(installed_root: &Path, settings: &Settings) -> Result<()> {
    for_each_triplet(settings, "copy", |triplet| {
        let report = copy_triplet(installed_root, settings, triplet)?;
        let mut message = format!(
            "Copied {} files into {}",
            report.files,
            report.destination.display()
        );
        if !report.fixed.is_empty() {
            message.push_str(&format!(" (fixes: {})", report.fixed.join(", ")));
        }
        terminal::print_success(&message);
        Ok(())
    })
}

/// Delete every selected triplet's output folder. Returns the bytes reclaimed.
pub fn remove_all(settings: &Settings) -> Result<u64> {
    let mut reclaimed = 0;

    for triplet in &settings.triplets {
        let dir = settings.triplet_output_dir(triplet);
        if !dir.exists() {
            terminal::print_info(&format!("{} does not exist", dir.display()));
            continue;
        }

        let size = paths::dir_size(&dir);
        fs::remove_dir_all(&dir)
            .with_context(|| format!("Failed to remove {}", dir.display()))?;
        reclaimed += size;
        terminal::print_success(&format!(
            "Removed {} ({})",
            dir.display(),
            paths::format_size(size)
        ));
    }

    Ok(reclaimed)
}

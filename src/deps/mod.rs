//! Per-triplet dependency actions
//!
//! Triplets are processed one after another. By default the first failure
//! stops the run; with `keep_going` the remaining triplets still run and the
//! failures are reported together at the end.

pub mod build;
pub mod copy;
pub mod fixes;

use anyhow::Result;

use crate::config::{Settings, Triplet};
use crate::error::VcdepsError;
use crate::utils::terminal;

/// Run `action` for every selected triplet under the configured failure policy
pub fn for_each_triplet<F>(settings: &Settings, action_name: &str, mut action: F) -> Result<()>
where
    F: FnMut(&Triplet) -> Result<()>,
{
    let mut failed = Vec::new();
    let mut diagnostics = Vec::new();

    for triplet in &settings.triplets {
        if let Err(err) = action(triplet) {
            if !settings.keep_going {
                return Err(err);
            }
            terminal::print_warning(&format!("{} failed for {}: {}", action_name, triplet, err));
            failed.push(*triplet);
            diagnostics.push(format!("{}: {:#}", triplet, err));
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(VcdepsError::TripletFailures {
            action: action_name.to_string(),
            failed,
            diagnostics,
        }
        .into())
    }
}

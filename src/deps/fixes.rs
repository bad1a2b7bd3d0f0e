//! Post-copy fixes
//!
//! Some ports suffix their debug import libraries; the engine's build expects
//! the release names in `debug/lib` as well.

use std::fs;
use std::io;
use std::path::Path;

use anyhow::{Context, Result};

/// Debug library renames for one package
#[derive(Debug, Clone, Copy)]
pub struct CopyFix {
    pub package: &'static str,
    /// `(from, to)` file names inside `debug/lib`
    pub renames: &'static [(&'static str, &'static str)],
}

const FIXES: &[CopyFix] = &[
    CopyFix {
        package: "bullet3",
        renames: &[
            ("BulletCollision_Debug.lib", "BulletCollision.lib"),
            ("BulletDynamics_Debug.lib", "BulletDynamics.lib"),
            ("BulletSoftBody_Debug.lib", "BulletSoftBody.lib"),
            ("LinearMath_Debug.lib", "LinearMath.lib"),
        ],
    },
    CopyFix {
        package: "sdl2",
        renames: &[("SDL2d.lib", "SDL2.lib"), ("SDL2maind.lib", "SDL2main.lib")],
    },
];

/// Every registered fix
pub fn all() -> &'static [CopyFix] {
    FIXES
}

impl CopyFix {
    /// Apply the renames under `dest`. Returns how many files were renamed;
    /// zero means the fix was already applied.
    pub fn apply(&self, dest: &Path) -> Result<usize> {
        let lib_dir = dest.join("debug").join("lib");
        let mut renamed = 0;

        for (from, to) in self.renames {
            let source = lib_dir.join(from);
            let target = lib_dir.join(to);
            match fs::rename(&source, &target) {
                Ok(()) => renamed += 1,
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(e).with_context(|| {
                        format!(
                            "Failed to rename {} to {}",
                            source.display(),
                            target.display()
                        )
                    })
                }
            }
        }

        Ok(renamed)
    }
}

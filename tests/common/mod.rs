//! Shared testing utilities for vcdeps CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Name of the vcpkg executable the binary looks for on this host.
pub const VCPKG_EXE: &str = if cfg!(windows) { "vcpkg.exe" } else { "vcpkg" };

/// Fake vcpkg: logs its arguments, and for `install` creates
/// `installed/<triplet>` with one header per package. `list` prints two
/// rows and a feature row. Exits with 1 when the triplet is listed in
/// `fail_triplets`.
#[cfg(unix)]
const FAKE_VCPKG: &str = r#"#!/bin/sh
here="$(cd "$(dirname "$0")" && pwd)"
echo "$@" >> "$here/calls.log"
triplet=""
prev=""
for a in "$@"; do
  if [ "$prev" = "--triplet" ]; then triplet="$a"; fi
  prev="$a"
done
if [ -f "$here/fail_triplets" ] && grep -qx "$triplet" "$here/fail_triplets"; then
  echo "error: building for $triplet failed" >&2
  exit 1
fi
if [ "$1" = "list" ]; then
  echo "glm:x64-windows                 1.0.1#2     OpenGL Mathematics (GLM)"
  echo "sdl2:x86-windows-static         2.30.0      Simple DirectMedia Layer is a cross-platform..."
  echo "sdl2[vulkan]:x86-windows-static             Vulkan functionality for SDL"
  exit 0
fi
if [ "$1" = "install" ]; then
  mkdir -p "$here/installed/$triplet/include" "$here/installed/$triplet/debug/lib"
  for a in "$@"; do
    case "$a" in
      install|--triplet|"$triplet") ;;
      *) echo "$triplet" > "$here/installed/$triplet/include/$a.h" ;;
    esac
  done
  touch "$here/installed/$triplet/debug/lib/SDL2d.lib"
  touch "$here/installed/$triplet/BUILD_INFO"
fi
exit 0
"#;

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Directory the CLI runs in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Location of the vcpkg checkout used by the tests.
    pub fn vcpkg_root(&self) -> PathBuf {
        self.root.path().join("vcpkg")
    }

    /// Location of the copy output.
    pub fn output_dir(&self) -> PathBuf {
        self.root.path().join("out")
    }

    /// Build a command for the compiled `vcdeps` binary, pointed at this context's folders.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("vcdeps").expect("Failed to locate vcdeps binary");
        cmd.current_dir(&self.work_dir)
            .env_remove("VCDEPS_VCPKG_ROOT")
            .arg("--no-color")
            .arg("-t")
            .arg(self.vcpkg_root())
            .arg("-o")
            .arg(self.output_dir());
        cmd
    }

    /// Create a checkout whose executable exists but does nothing.
    pub fn install_inert_vcpkg(&self) {
        let root = self.vcpkg_root();
        fs::create_dir_all(&root).unwrap();
        fs::write(root.join(VCPKG_EXE), "").unwrap();
    }

    /// Create a checkout with the recording fake vcpkg.
    #[cfg(unix)]
    pub fn install_fake_vcpkg(&self) {
        use std::os::unix::fs::PermissionsExt;

        let root = self.vcpkg_root();
        fs::create_dir_all(&root).unwrap();
        let exe = root.join(VCPKG_EXE);
        fs::write(&exe, FAKE_VCPKG).unwrap();
        fs::set_permissions(&exe, fs::Permissions::from_mode(0o755)).unwrap();
    }

    /// Make the fake vcpkg fail for these triplets.
    pub fn fail_triplets(&self, triplets: &[&str]) {
        let mut content = triplets.join("\n");
        content.push('\n');
        fs::write(self.vcpkg_root().join("fail_triplets"), content).unwrap();
    }

    /// Argument lines recorded by the fake vcpkg.
    pub fn vcpkg_calls(&self) -> Vec<String> {
        fs::read_to_string(self.vcpkg_root().join("calls.log"))
            .map(|s| s.lines().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Sorted names of the folders under the output directory.
    pub fn output_folders(&self) -> Vec<String> {
        let mut names: Vec<String> = match fs::read_dir(self.output_dir()) {
            Ok(entries) => entries
                .flatten()
                .filter(|e| e.path().is_dir())
                .map(|e| e.file_name().to_string_lossy().to_string())
                .collect(),
            Err(_) => Vec::new(),
        };
        names.sort();
        names
    }

    /// Write `vcdeps.toml` into the work directory.
    pub fn write_config(&self, content: &str) {
        fs::write(self.work_dir.join("vcdeps.toml"), content).unwrap();
    }
}

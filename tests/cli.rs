mod common;

use common::TestContext;
use predicates::prelude::*;
use std::fs;

#[test]
fn help_lists_commands() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("-h")
        .assert()
        .success()
        .stdout(predicate::str::contains("vcpkg"))
        .stdout(predicate::str::contains("deps"));
}

#[test]
fn unknown_verb_prints_usage_and_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["deps", "frobnicate"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));

    ctx.cli()
        .arg("frobnicate")
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_action_fails() {
    let ctx = TestContext::new();

    ctx.cli().assert().failure().code(2);
    ctx.cli().arg("vcpkg").assert().failure().code(2);
}

#[test]
fn unknown_triplet_is_a_usage_error() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["deps", "build", "--triplet", "arm64-windows"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("x64-windows-static"));
}

#[test]
fn vcpkg_install_is_noop_when_bootstrapped() {
    let ctx = TestContext::new();
    ctx.install_inert_vcpkg();

    for _ in 0..2 {
        ctx.cli()
            .args(["vcpkg", "install"])
            .assert()
            .success()
            .stdout(predicate::str::contains("skipping git clone"))
            .stdout(predicate::str::contains("skipping bootstrap"))
            .stdout(predicate::str::contains("already set up"));
    }

    let entries: Vec<_> = fs::read_dir(ctx.vcpkg_root()).unwrap().collect();
    assert_eq!(entries.len(), 1, "no files should have been added to the checkout");
}

#[test]
fn build_without_bootstrap_fails_with_hint() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["deps", "build"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("not bootstrapped"))
        .stderr(predicate::str::contains("vcdeps vcpkg install"));
}

#[test]
fn copy_before_build_reports_missing_source() {
    let ctx = TestContext::new();
    ctx.install_inert_vcpkg();

    ctx.cli()
        .args(["deps", "copy", "--triplet", "x64-windows-static"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("source missing"))
        .stderr(predicate::str::contains("deps build --triplet x64-windows-static"));

    assert!(!ctx.output_dir().join("x64-windows-static").exists());
}

#[test]
fn rmcopy_without_output_succeeds() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["deps", "rmcopy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("does not exist"));
}

#[test]
fn invalid_config_file_fails() {
    let ctx = TestContext::new();
    ctx.install_inert_vcpkg();
    ctx.write_config("[build]\ntriplets = [\"arm64-windows\"]\n");

    ctx.cli()
        .args(["deps", "copy"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn blank_package_in_config_fails() {
    let ctx = TestContext::new();
    ctx.install_inert_vcpkg();
    ctx.write_config("[dependencies]\npackages = [\"glm\", \" \"]\n");

    ctx.cli()
        .args(["deps", "build"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("packages[1] is blank"));
}

#[test]
fn vcpkg_install_without_git_reports_missing_tool() {
    let ctx = TestContext::new();

    ctx.cli()
        .env("PATH", "")
        .args(["vcpkg", "install"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Missing tool: git"))
        .stderr(predicate::str::contains("git-scm.com"));

    assert!(!ctx.vcpkg_root().exists());
}

#[test]
fn missing_explicit_config_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["--config", "nope.toml", "deps", "rmcopy"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("nope.toml"));
}

#[cfg(unix)]
mod with_fake_vcpkg {
    use super::*;

    #[test]
    fn build_single_triplet_passes_triplet_and_all_packages() {
        let ctx = TestContext::new();
        ctx.install_fake_vcpkg();

        ctx.cli()
            .args(["deps", "build", "--triplet", "x64-windows-static"])
            .assert()
            .success();

        assert_eq!(
            ctx.vcpkg_calls(),
            vec!["install bullet3 glm ffmpeg openal-soft sdl2 --triplet x64-windows-static"]
        );
    }

    #[test]
    fn build_then_copy_populates_one_folder_per_triplet() {
        let ctx = TestContext::new();
        ctx.install_fake_vcpkg();

        ctx.cli().args(["deps", "build"]).assert().success();
        ctx.cli().args(["deps", "copy"]).assert().success();

        assert_eq!(
            ctx.output_folders(),
            vec![
                "x64-windows",
                "x64-windows-static",
                "x86-windows",
                "x86-windows-static"
            ]
        );
        for triplet in ["x86-windows", "x86-windows-static", "x64-windows", "x64-windows-static"] {
            let dest = ctx.output_dir().join(triplet);
            let header = fs::read_to_string(dest.join("include/glm.h")).unwrap();
            assert_eq!(header.trim(), triplet);
            assert!(dest.join("debug/lib/SDL2.lib").is_file(), "sdl2 fix applied");
            assert!(!dest.join("BUILD_INFO").exists());
        }
    }

    #[test]
    fn rmcopy_removes_copied_folders() {
        let ctx = TestContext::new();
        ctx.install_fake_vcpkg();

        ctx.cli()
            .args(["--triplet", "x86-windows", "deps", "build"])
            .assert()
            .success();
        ctx.cli()
            .args(["--triplet", "x86-windows", "deps", "copy"])
            .assert()
            .success();
        assert_eq!(ctx.output_folders(), vec!["x86-windows"]);

        ctx.cli()
            .args(["--triplet", "x86-windows", "deps", "rmcopy"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Removed"));
        assert!(ctx.output_folders().is_empty());
    }

    #[test]
    fn failed_triplet_stops_the_run_by_default() {
        let ctx = TestContext::new();
        ctx.install_fake_vcpkg();
        ctx.fail_triplets(&["x86-windows-static"]);

        ctx.cli()
            .args(["deps", "build"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("x86-windows-static"));

        assert_eq!(ctx.vcpkg_calls().len(), 2);
    }

    #[test]
    fn keep_going_attempts_every_triplet() {
        let ctx = TestContext::new();
        ctx.install_fake_vcpkg();
        ctx.fail_triplets(&["x86-windows-static"]);

        ctx.cli()
            .args(["deps", "build", "--keep-going"])
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("failed for 1 triplet(s): x86-windows-static"));

        assert_eq!(ctx.vcpkg_calls().len(), 4);
    }

    #[test]
    fn config_file_selects_packages_and_triplets() {
        let ctx = TestContext::new();
        ctx.install_fake_vcpkg();
        ctx.write_config(
            r#"
[dependencies]
packages = ["glm", "sdl2"]

[build]
triplets = ["x64-windows"]
"#,
        );

        ctx.cli().args(["deps", "build"]).assert().success();

        assert_eq!(
            ctx.vcpkg_calls(),
            vec!["install glm sdl2 --triplet x64-windows"]
        );
    }

    #[test]
    fn packages_flag_overrides_defaults_for_rmbuild() {
        let ctx = TestContext::new();
        ctx.install_fake_vcpkg();

        ctx.cli()
            .args(["-w", "ffmpeg", "-a", "x64", "-l", "dynamic", "deps", "rmbuild"])
            .assert()
            .success();

        assert_eq!(
            ctx.vcpkg_calls(),
            vec!["remove ffmpeg --triplet x64-windows"]
        );
    }

    #[test]
    fn list_installed_prints_packages() {
        let ctx = TestContext::new();
        ctx.install_fake_vcpkg();

        ctx.cli()
            .args(["vcpkg", "list-installed"])
            .assert()
            .success()
            .stdout(predicate::str::contains("- glm (x64-windows 1.0.1#2)"))
            .stdout(predicate::str::contains("- sdl2 (x86-windows-static 2.30.0)"))
            .stdout(predicate::str::contains("vulkan").not());
        assert_eq!(ctx.vcpkg_calls(), vec!["list"]);
    }

    #[test]
    fn list_installed_json_is_keyed_by_package() {
        let ctx = TestContext::new();
        ctx.install_fake_vcpkg();

        let output = ctx
            .cli()
            .args(["vcpkg", "list_installed", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());

        let listing: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(
            listing,
            serde_json::json!({
                "glm": [{ "triplet": "x64-windows", "version": "1.0.1#2" }],
                "sdl2": [{ "triplet": "x86-windows-static", "version": "2.30.0" }]
            })
        );
    }

    #[test]
    fn verbose_echoes_vcpkg_command_and_exit_code() {
        let ctx = TestContext::new();
        ctx.install_fake_vcpkg();

        ctx.cli()
            .args(["-v", "deps", "build", "--triplet", "x64-windows"])
            .assert()
            .success()
            .stdout(predicate::str::contains(
                "install bullet3 glm ffmpeg openal-soft sdl2 --triplet x64-windows",
            ))
            .stdout(predicate::str::contains("$ "))
            .stdout(predicate::str::contains("exit code 0 after"));
    }

    #[test]
    fn copy_fixes_sdl2_even_when_not_selected() {
        let ctx = TestContext::new();
        ctx.install_fake_vcpkg();

        ctx.cli()
            .args(["-w", "glm", "--triplet", "x86-windows", "deps", "build"])
            .assert()
            .success();
        ctx.cli()
            .args(["-w", "glm", "--triplet", "x86-windows", "deps", "copy"])
            .assert()
            .success()
            .stdout(predicate::str::contains("fixes: sdl2"));

        let lib_dir = ctx.output_dir().join("x86-windows/debug/lib");
        assert!(lib_dir.join("SDL2.lib").is_file());
        assert!(!lib_dir.join("SDL2d.lib").exists());
    }
}

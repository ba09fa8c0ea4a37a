//! Integration tests for `solbuild build`
//!
//! - Builds every context in catalog order
//! - `--context` and `--configuration` narrow the selection
//! - Conflicting or unknown selections fail before conversion
//! - `--packs` installs missing packs before conversion
//! - The first failing context stops the build
//! - `--output` relocates the index and the build directories

#![cfg(unix)]

mod common;

use common::{stderr, stdout, TestProject};

fn build(project: &TestProject, extra: &[&str]) -> std::process::Output {
    let solution = project.solution();
    let mut args = vec!["build", solution.to_str().unwrap()];
    args.extend_from_slice(extra);
    project.run(&args)
}

#[test]
fn test_build_all_contexts() {
    let project = TestProject::with_solution();
    let output = build(&project, &[]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let calls = project.calls();
    assert!(calls[0].starts_with("csolution list contexts"));
    assert!(calls[0].ends_with("--yml-order"));
    assert!(calls[1].starts_with("csolution convert"));

    let builds = project.calls_of("cbuildgen");
    assert_eq!(builds.len(), 3);
    for (call, context) in builds.iter().zip(common::CONTEXTS) {
        assert!(call.contains(&format!("{context}.cprj")), "{call}");
    }

    let out = stdout(&output);
    assert_eq!(out.lines().filter(|l| l.starts_with("====")).count(), 3);
    for context in common::CONTEXTS {
        assert!(out.contains(&format!("Processing context: \"{context}\"")));
        assert!(out.contains(&format!("cbuildgen: built {context}.cprj")));
    }
    assert!(out.contains("csolution: converted"));
    assert!(out.contains("Built 3 of 3 context(s)"));
}

#[test]
fn test_quiet_build_prints_nothing() {
    let project = TestProject::with_solution();
    let output = project.run(&["--quiet", "build", project.solution().to_str().unwrap()]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "");
    assert_eq!(project.calls_of("cbuildgen").len(), 3);
}

#[test]
fn test_output_with_dir_overrides_warns() {
    let project = TestProject::with_solution();
    project.create_file("generated/Sol.cbuild-idx.yml", common::INDEX);
    let generated = project.path().join("generated");
    let output = build(
        &project,
        &[
            "-v",
            "--context",
            "App.Debug+Board",
            "--output",
            generated.to_str().unwrap(),
            "--intdir",
            "/ignored",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let err = stderr(&output);
    assert!(err.contains(&format!(
        "output files are generated under: \"{}\"",
        generated.display()
    )));
    assert!(err.contains("Options --outdir and --intdir shall be ignored."));
}

#[test]
fn test_output_alone_does_not_warn() {
    let project = TestProject::with_solution();
    project.create_file("generated/Sol.cbuild-idx.yml", common::INDEX);
    let generated = project.path().join("generated");
    let output = build(
        &project,
        &["--context", "App.Debug+Board", "--output", generated.to_str().unwrap()],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(!stderr(&output).contains("shall be ignored"));
}

#[test]
fn test_build_single_context_paths() {
    let project = TestProject::with_solution();
    let output = build(&project, &["--context", "Lib.Debug+Board"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let convert = &project.calls_of("csolution")[1];
    assert!(convert.contains("--context=Lib.Debug+Board"));

    let builds = project.calls_of("cbuildgen");
    assert_eq!(builds.len(), 1);
    let root = project.path();
    let descriptor = root.join("Lib").join("Lib.Debug+Board.cprj");
    assert!(builds[0].contains(&descriptor.display().to_string()));
    assert!(builds[0].contains(&format!(
        "--outdir={}",
        root.join("Lib/out/Lib/Debug/Board").display()
    )));
    assert!(builds[0].contains(&format!(
        "--intdir={}",
        root.join("Lib/tmp/Lib/Debug/Board").display()
    )));
}

#[test]
fn test_build_by_configuration() {
    let project = TestProject::with_solution();
    let output = build(&project, &["--configuration", ".Debug+Board"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let convert = &project.calls_of("csolution")[1];
    assert!(convert.contains("--context=*.Debug+Board"));

    let builds = project.calls_of("cbuildgen");
    assert_eq!(builds.len(), 2);
    assert!(builds[0].contains("App.Debug+Board.cprj"));
    assert!(builds[1].contains("Lib.Debug+Board.cprj"));
}

#[test]
fn test_context_and_configuration_conflict() {
    let project = TestProject::with_solution();
    let output = build(
        &project,
        &["--context", "App.Debug+Board", "--configuration", ".Debug+Board"],
    );
    assert!(!output.status.success());
    assert!(project.calls().is_empty());
}

#[test]
fn test_unknown_context_lists_available() {
    let project = TestProject::with_solution();
    let output = build(&project, &["--context", "Other+Board"]);
    assert!(!output.status.success());

    let err = stderr(&output);
    assert!(err.contains("Other+Board"));
    assert!(err.contains("App.Release+Board"));
    assert!(!project.calls().iter().any(|c| c.contains("convert")));
}

#[test]
fn test_malformed_context_rejected() {
    let project = TestProject::with_solution();
    let output = build(&project, &["--context", "App.Debug"]);
    assert!(!output.status.success());
    assert!(project.calls_of("cbuildgen").is_empty());
}

#[test]
fn test_fail_fast() {
    let project = TestProject::with_solution();
    let solution = project.solution();
    let output = project
        .command()
        .env("FAKE_BUILD_FAIL", "App.Release+Board")
        .args(["build", solution.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("error processing"));

    let builds = project.calls_of("cbuildgen");
    assert_eq!(builds.len(), 2);
    assert!(builds[1].contains("App.Release+Board.cprj"));
}

#[test]
fn test_conversion_failure_builds_nothing() {
    let project = TestProject::with_solution();
    let solution = project.solution();
    let output = project
        .command()
        .env("FAKE_CSOLUTION_FAIL", "convert")
        .args(["build", solution.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(stderr(&output).contains("csolution error"));
    assert!(project.calls_of("cbuildgen").is_empty());
}

#[test]
fn test_packs_installed_before_convert() {
    let project = TestProject::with_solution();
    let solution = project.solution();
    let output = project
        .command()
        .env("FAKE_MISSING_PACKS", "ARM::CMSIS@5.9.0\nARM::V2M_MPS2_CMSDK_BSP@1.8.0\n")
        .args(["build", solution.to_str().unwrap(), "--packs"])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let calls = project.calls();
    let installs: Vec<usize> = calls
        .iter()
        .enumerate()
        .filter(|(_, c)| c.starts_with("cpackget pack add"))
        .map(|(i, _)| i)
        .collect();
    let convert = calls.iter().position(|c| c.contains("convert")).unwrap();
    assert_eq!(installs.len(), 2);
    assert!(installs.iter().all(|&i| i < convert));
    assert!(calls[installs[0]]
        .contains("ARM::CMSIS@5.9.0 --force-reinstall --agree-embedded-license"));
}

#[test]
fn test_no_missing_packs_skips_cpackget() {
    let project = TestProject::with_solution();
    project.remove_tool("cpackget");
    let output = build(&project, &["--packs"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(project.calls().iter().any(|c| c.contains("list packs")));
}

#[test]
fn test_missing_compiler_tool() {
    let project = TestProject::with_solution();
    project.remove_tool("csolution");
    let output = build(&project, &[]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("csolution"));
}

#[test]
fn test_output_relocates_index_and_dirs() {
    let project = TestProject::with_solution();
    project.create_file("generated/Sol.cbuild-idx.yml", common::INDEX);
    let generated = project.path().join("generated");
    let output = build(
        &project,
        &[
            "--context",
            "App.Debug+Board",
            "--output",
            generated.to_str().unwrap(),
            "--outdir",
            "/ignored",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let convert = &project.calls_of("csolution")[1];
    assert!(convert.contains(&format!("--output={}", generated.display())));

    let builds = project.calls_of("cbuildgen");
    assert!(builds[0].contains(&format!(
        "--outdir={}",
        generated.join("App/out/App/Debug/Board").display()
    )));
    assert!(!builds[0].contains("/ignored"));
}

#[test]
fn test_flags_forwarded_to_convert() {
    let project = TestProject::with_solution();
    let output = build(
        &project,
        &["--no-schema-check", "--no-update-rte", "--load", "latest"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let convert = &project.calls_of("csolution")[1];
    assert!(convert.contains("--load=latest"));
    assert!(convert.contains("--no-check-schema"));
    assert!(convert.contains("--no-update-rte"));
}

#[test]
fn test_compiler_root_points_at_etc() {
    let project = TestProject::with_solution();
    let output = build(&project, &["--context", "App.Debug+Board"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let etc = project.bin.path().parent().unwrap().join("etc");
    let builds = project.calls_of("cbuildgen");
    assert!(builds[0].ends_with(&format!("root={}", etc.display())));
}

#[test]
fn test_missing_solution_file() {
    let project = TestProject::new();
    let output = project.run(&["build", "Nope.csolution.yml"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("Solution file not found"));
    assert!(project.calls().is_empty());
}

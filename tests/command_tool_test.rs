use libdeps_patcher::adapters::command_tool::default_args;
use libdeps_patcher::{
    ensure_patched, CommandPatchTool, PatchApplicator, PatchJob, PatchOutcome, PatchTool,
    PatcherError,
};
use std::fs;
use std::process::Command;
use tempfile::TempDir;

const FONTS_PATCH: &str = "\
--- lv_conf.h
+++ lv_conf.h
@@ -1,3 +1,3 @@
 A
-B
+B2
 C
";

fn patch_available() -> bool {
    Command::new("patch").arg("--version").output().is_ok()
}

fn setup(target_content: &str) -> (TempDir, PatchJob) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("TTGO TWatch Library");
    fs::create_dir_all(root.join("src")).unwrap();
    fs::write(root.join("src/lv_conf.h"), target_content).unwrap();
    let patch = temp_dir.path().join("1-ttgo-t-watch-select-fonts.patch");
    fs::write(&patch, FONTS_PATCH).unwrap();

    let job = PatchJob::new(root, "src/lv_conf.h", patch, ".patching-done");
    (temp_dir, job)
}

#[test]
fn test_gnu_patch_applies_unified_diff_once() {
    if !patch_available() {
        eprintln!("skipping: `patch` is not installed");
        return;
    }

    let (_temp_dir, job) = setup("A\nB\nC\n");
    let applicator = PatchApplicator::new(CommandPatchTool::default());

    assert_eq!(applicator.ensure_patched(&job).unwrap(), PatchOutcome::Applied);
    assert_eq!(fs::read_to_string(job.target_path()).unwrap(), "A\nB2\nC\n");
    assert!(job.marker_path().is_file());

    assert_eq!(
        applicator.ensure_patched(&job).unwrap(),
        PatchOutcome::AlreadyPatched
    );
    assert_eq!(fs::read_to_string(job.target_path()).unwrap(), "A\nB2\nC\n");
}

#[test]
fn test_gnu_patch_rejection_leaves_no_marker() {
    if !patch_available() {
        eprintln!("skipping: `patch` is not installed");
        return;
    }

    let (_temp_dir, job) = setup("X\nY\nZ\n");
    // --batch: 不詢問，hunk 不符就失敗
    let tool = CommandPatchTool::new(
        "patch",
        vec![
            "--batch".to_string(),
            "--no-backup-if-mismatch".to_string(),
            "-r".to_string(),
            "-".to_string(),
            "{original}".to_string(),
            "{patch}".to_string(),
        ],
    );

    let err = ensure_patched(
        &tool,
        &job.dependency_root,
        &job.target,
        &job.patch_file,
        &job.marker,
    )
    .unwrap_err();

    assert!(matches!(err, PatcherError::PatchApplicationError { .. }));
    assert!(!job.marker_path().exists());
}

#[cfg(unix)]
#[test]
fn test_non_zero_exit_is_application_error() {
    let (_temp_dir, job) = setup("A\nB\nC\n");
    let tool = CommandPatchTool::new("false", default_args());

    let err = tool
        .apply(&job.target_path(), &job.patch_file)
        .unwrap_err();

    match err {
        PatcherError::PatchApplicationError {
            program, status, ..
        } => {
            assert_eq!(program, "false");
            assert_eq!(status, Some(1));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_program_leaves_no_marker() {
    let (_temp_dir, job) = setup("A\nB\nC\n");
    let tool = CommandPatchTool::new("libdeps-patcher-missing-tool", default_args());
    let applicator = PatchApplicator::new(tool);

    let err = applicator.ensure_patched(&job).unwrap_err();

    assert!(matches!(err, PatcherError::ToolLaunchError { .. }));
    assert!(!job.marker_path().exists());
    assert_eq!(
        fs::read_to_string(job.target_path()).unwrap(),
        "A\nB\nC\n"
    );
}

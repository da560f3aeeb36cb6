//! Integration tests for the `pnot` CLI.
//!
//! Each test writes a command script to a temp directory, runs `pnot` as a
//! subprocess on it, and verifies the full stdout transcript.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Get the path to the built `pnot` binary.
fn pnot_bin() -> PathBuf {
    // cargo test builds to target/debug/
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("pnot");
    path
}

/// Run `pnot` on a script file containing `commands`, returning stdout.
fn run_script(commands: &str) -> String {
    let tmp = tempfile::TempDir::new().unwrap();
    let script = tmp.path().join("commands.txt");
    fs::write(&script, commands).unwrap();

    let output = Command::new(pnot_bin())
        .arg(&script)
        .output()
        .expect("failed to run pnot");
    assert!(
        output.status.success(),
        "pnot failed:\nstdout: {}\nstderr: {}",
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr),
    );
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Feed `commands` to `pnot` over stdin instead of a script file.
fn run_stdin(commands: &str) -> String {
    let mut child = Command::new(pnot_bin())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn pnot");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(commands.as_bytes())
        .unwrap();
    let output = child.wait_with_output().expect("failed to wait for pnot");
    assert!(output.status.success());
    String::from_utf8_lossy(&output.stdout).to_string()
}

// ---------------------------------------------------------------------------
// Mutations and rendering
// ---------------------------------------------------------------------------

#[test]
fn test_add_assign_show() {
    let out = run_script(
        "\
add Essay HI
add Draft
add Outline
assign 2 1
assign 3 2
show
quit
",
    );
    assert_eq!(
        out,
        "\
added 1: Essay
added 2: Draft
added 3: Outline
assigned Draft to Essay
assigned Outline to Draft
- [ ] Essay [HI]
  - [ ] Draft
    - [ ] Outline
"
    );
}

#[test]
fn test_attributes_render_in_order() {
    let out = run_script(
        "\
add Essay
tag 1 writing
tag 1 uni
change-date 1 2024-05-01
change-priority 1 HI
show
",
    );
    assert!(out.ends_with("- [ ] Essay [HI]: (uni, writing) --> 2024-05-01\n"));
}

#[test]
fn test_toggle_cascades_and_counts() {
    let out = run_script(
        "\
add Essay
add Draft
add Outline
assign 2 1
assign 3 2
toggle 1
show
",
    );
    assert!(out.contains("toggled Essay and 2 subtasks\n"));
    assert!(out.ends_with(
        "\
- [x] Essay
  - [x] Draft
    - [x] Outline
"
    ));
}

#[test]
fn test_delete_then_restore_detaches_from_deleted_parent() {
    let out = run_script(
        "\
add Essay
add Draft
assign 2 1
toggle 2
delete 1
restore 2
show
",
    );
    assert_eq!(
        out,
        "\
added 1: Essay
added 2: Draft
assigned Draft to Essay
toggled Draft and 0 subtasks
deleted Essay and 1 subtasks
restored Draft and 0 subtasks
- [x] Draft
"
    );
}

#[test]
fn test_siblings_sort_by_priority_then_id() {
    let out = run_script(
        "\
add zebra
add apple HI
add mango LO
add peach MD
show
",
    );
    assert!(out.ends_with(
        "\
- [ ] apple [HI]
- [ ] peach [MD]
- [ ] mango [LO]
- [ ] zebra
"
    ));
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

#[test]
fn test_todo_keeps_done_parent_with_open_child() {
    let out = run_script(
        "\
add Essay
add Draft
assign 2 1
toggle 1
toggle 2
todo
",
    );
    assert!(out.ends_with(
        "\
- [x] Essay
  - [ ] Draft
"
    ));
}

#[test]
fn test_find_is_strict_about_done_parents() {
    let out = run_script(
        "\
add Essay
add Draft
assign 2 1
toggle 1
find Draft
find Essay
",
    );
    assert!(out.contains("No tasks found.\n"));
    assert!(out.ends_with("- [x] Essay\n"));
}

#[test]
fn test_date_windows() {
    let out = run_script(
        "\
add Early 2024-05-01
add Edge 2024-05-07
add Late 2024-05-08
upcoming 2024-05-01
before 2024-05-01
between 2024-05-07 2024-05-08
",
    );
    assert!(out.ends_with(
        "\
- [ ] Early: --> 2024-05-01
- [ ] Edge: --> 2024-05-07
- [ ] Early: --> 2024-05-01
- [ ] Edge: --> 2024-05-07
- [ ] Late: --> 2024-05-08
"
    ));
}

#[test]
fn test_tagged_with_expands_subtree() {
    let out = run_script(
        "\
add Essay
add Draft
assign 2 1
tag 1 uni
tagged-with uni
",
    );
    assert!(out.ends_with(
        "\
- [ ] Essay: (uni)
  - [ ] Draft
"
    ));
}

#[test]
fn test_duplicates_report() {
    let out = run_script(
        "\
add Report 2024-05-01
add Report 2024-05-01
add Report 2024-06-01
duplicates
delete 2
duplicates
",
    );
    // Task 3 conflicts on the deadline and pairs with nobody; deleting
    // task 2 does not remove it from the report.
    assert!(out.contains("Found 2 duplicates: 1, 2\n"));
    assert!(out.ends_with("Found 2 duplicates: 1, 2\n"));
}

#[test]
fn test_lists_flow() {
    let out = run_script(
        "\
add-list uni
add Essay
add Chores
assign 1 uni
assign 2 uni
list uni
delete 1
list uni
restore 1
list uni
",
    );
    assert_eq!(
        out,
        "\
added list uni
added 1: Essay
added 2: Chores
assigned Essay to list uni
assigned Chores to list uni
- [ ] Essay
- [ ] Chores
deleted Essay and 0 subtasks
- [ ] Chores
restored Essay and 0 subtasks
- [ ] Essay
- [ ] Chores
"
    );
}

// ---------------------------------------------------------------------------
// Shell behavior
// ---------------------------------------------------------------------------

#[test]
fn test_errors_print_and_loop_continues() {
    let out = run_script(
        "\
toggle 5
assign 1 1
frobnicate
add Essay
assign 1 1
tag 1 uni
tag 1 uni
",
    );
    assert_eq!(
        out,
        "\
Error, task with ID 5 does not exist
Error, task with ID 1 does not exist
Error, unknown command: frobnicate
added 1: Essay
Error, assigning task 1 under task 1 would create a cycle
tagged Essay with uni
Error, tag uni is already present
"
    );
}

#[test]
fn test_quit_is_silent_and_stops() {
    let out = run_script(
        "\
add Essay
quit
add Never
",
    );
    assert_eq!(out, "added 1: Essay\n");
}

#[test]
fn test_blank_lines_are_skipped() {
    let out = run_script("\n\n   \nadd Essay\n\n");
    assert_eq!(out, "added 1: Essay\n");
}

#[test]
fn test_stdin_mode_matches_script_mode() {
    let commands = "add Essay\nshow\nquit\n";
    assert_eq!(run_stdin(commands), run_script(commands));
}

#[test]
fn test_missing_script_file_fails() {
    let tmp = tempfile::TempDir::new().unwrap();
    let missing = tmp.path().join("nope.txt");
    let output = Command::new(pnot_bin())
        .arg(&missing)
        .output()
        .expect("failed to run pnot");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cannot open"));
}

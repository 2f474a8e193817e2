use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn run_cli(args: &[&str]) -> std::process::Output {
    let exe = assert_cmd::cargo_bin!("lockstep-cli");
    Command::new(exe)
        .args(args)
        .output()
        .expect("run lockstep-cli")
}

#[test]
fn cli_shows_a_loaded_graph() {
    let path = fixture("square.json");
    let output = run_cli(&["show", path.to_string_lossy().as_ref()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("A at (100, 100)"));
    assert!(stdout.contains("D at (300, 300)"));
    assert!(stdout.contains("A--B (1)"));
    assert!(stdout.contains("C--D (6)"));
}

#[test]
fn cli_runs_prims_to_completion() {
    let path = fixture("square.json");
    let output = run_cli(&["run", "prims", "--start", "A", path.to_string_lossy().as_ref()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("step 1: node B, edge A--B (1)"));
    assert!(stdout.contains("Finished after 3 steps"));
    assert!(stdout.contains("spanning tree weight: 6"));
}

#[test]
fn cli_runs_kruskals_to_completion() {
    let path = fixture("square.json");
    let output = run_cli(&["run", "kruskals", path.to_string_lossy().as_ref()]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Finished after 3 steps"));
    assert!(stdout.contains("spanning tree weight: 6"));
}

#[test]
fn cli_runs_depth_first_and_prints_the_visit_order() {
    let path = fixture("square.json");
    let output = run_cli(&[
        "run",
        "depth-first",
        "--start",
        "A",
        path.to_string_lossy().as_ref(),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("visit order: A -> B -> C -> D"));
}

#[test]
fn cli_runs_dijkstras_and_prints_the_record_table() {
    let path = fixture("square.json");
    let output = run_cli(&[
        "run",
        "dijkstras",
        "--start",
        "A",
        "--end",
        "D",
        path.to_string_lossy().as_ref(),
    ]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Finished after 3 steps"));
    assert!(stdout.contains("node        rank  distance  candidates"));
    // D is finalized fourth at distance 3 (the direct edge).
    let d_row = stdout
        .lines()
        .find(|line| line.starts_with('D'))
        .expect("table row for D");
    let columns: Vec<&str> = d_row.split_whitespace().collect();
    assert_eq!(columns, vec!["D", "4", "3", "3"]);
}

#[test]
fn cli_steps_interactively_on_stdin_commands() {
    let path = fixture("square.json");
    let exe = assert_cmd::cargo_bin!("lockstep-cli");
    let mut child = Command::new(exe)
        .args([
            "run",
            "prims",
            "--start",
            "A",
            "--interactive",
            path.to_string_lossy().as_ref(),
        ])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("spawn lockstep-cli");

    child
        .stdin
        .as_mut()
        .expect("stdin piped")
        .write_all(b"n\np\nn\nq\n")
        .expect("write commands");
    let output = child.wait_with_output().expect("wait for lockstep-cli");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("step 1: node B, edge A--B (1)"));
    assert!(stdout.contains("retreated to step 0"));
}

#[test]
fn cli_rejects_unknown_algorithms_with_a_usage_error() {
    let path = fixture("square.json");
    let output = run_cli(&["run", "bogosort", path.to_string_lossy().as_ref()]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_requires_start_and_end_for_dijkstras() {
    let path = fixture("square.json");
    let output = run_cli(&[
        "run",
        "dijkstras",
        "--start",
        "A",
        path.to_string_lossy().as_ref(),
    ]);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn cli_reports_missing_files_on_stderr() {
    let output = run_cli(&["show", "no-such-graph.json"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(!output.stderr.is_empty());
}

#[test]
fn cli_reports_unknown_node_names() {
    let path = fixture("square.json");
    let output = run_cli(&["run", "prims", "--start", "Z", path.to_string_lossy().as_ref()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("No node named `Z`"));
}

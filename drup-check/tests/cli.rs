//! Run the `drup-check` binary on small inputs.

use std::{
    fs,
    io::Write,
    path::PathBuf,
    process::{Command, Output, Stdio},
    sync::atomic::{AtomicUsize, Ordering},
};

const FORMULA: &str = "p cnf 2 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n";

/// Write `contents` to a fresh file in the temporary directory.
fn temporary_file(name: &str, contents: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let path = std::env::temp_dir().join(format!(
        "drup-check-{}-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst),
        name
    ));
    fs::write(&path, contents).unwrap();
    path
}

fn drup_check(formula: &str, proof: &str, extra_args: &[&str]) -> Output {
    let formula_path = temporary_file("formula.cnf", formula);
    let proof_path = temporary_file("proof.drup", proof);
    let output = Command::new(env!("CARGO_BIN_EXE_drup-check"))
        .arg(&formula_path)
        .arg(&proof_path)
        .args(extra_args)
        .output()
        .unwrap();
    let _ = fs::remove_file(&formula_path);
    let _ = fs::remove_file(&proof_path);
    output
}

fn solution_line(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout)
        .lines()
        .find(|line| line.starts_with("s "))
        .unwrap_or_default()
        .to_string()
}

#[test]
fn valid_proof() {
    let output = drup_check(FORMULA, "2 0\nd -1 2 0\n0\n", &[]);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(solution_line(&output), "s VERIFIED");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("parsing formula"));
    assert!(!stdout.contains("parsing proof"));
}

#[test]
fn proof_from_standard_input() {
    let formula_path = temporary_file("formula.cnf", FORMULA);
    let mut child = Command::new(env!("CARGO_BIN_EXE_drup-check"))
        .arg(&formula_path)
        .arg("-")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"2 0\nd -1 2 0\n0\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let _ = fs::remove_file(&formula_path);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(solution_line(&output), "s VERIFIED");
}

#[test]
fn unjustified_addition() {
    let output = drup_check(FORMULA, "3 0\n2 0\n0\n", &["-v"]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(solution_line(&output), "s NOT VERIFIED");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(":1 addition not RUP-justified: 3 0"));
    assert!(stdout.contains("c failing model: -3"));
}

#[test]
fn missing_empty_clause() {
    let output = drup_check(FORMULA, "", &[]);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(solution_line(&output), "s NOT VERIFIED");
}

#[test]
fn rejection_report() {
    let report_path = temporary_file("report.toml", "");
    let output = drup_check(
        FORMULA,
        "2 0\nd 1 -2 0\nd 1 -2 0\n0\n",
        &["--report", report_path.to_str().unwrap()],
    );
    assert_eq!(output.status.code(), Some(1));
    let report = fs::read_to_string(&report_path).unwrap();
    let _ = fs::remove_file(&report_path);
    assert!(report.contains("proof_step = 3"));
    assert!(report.contains("line = 3"));
    assert!(report.contains("deletion of clause never present"));
}

#[test]
fn malformed_formula() {
    let output = drup_check("p cnf 2 1\n1 x 0\n", "0\n", &[]);
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(solution_line(&output), "");
}

#[test]
fn missing_proof_file() {
    let formula_path = temporary_file("formula.cnf", FORMULA);
    let output = Command::new(env!("CARGO_BIN_EXE_drup-check"))
        .arg(&formula_path)
        .arg(std::env::temp_dir().join("drup-check-this-file-does-not-exist"))
        .output()
        .unwrap();
    let _ = fs::remove_file(&formula_path);
    assert_eq!(output.status.code(), Some(2));
}

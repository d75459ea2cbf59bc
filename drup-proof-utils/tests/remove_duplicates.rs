//! Run the `drat-remove-duplicates` binary on small inputs.

use std::{
    fs,
    path::PathBuf,
    process::Command,
    sync::atomic::{AtomicUsize, Ordering},
};

/// Write `contents` to a fresh file in the temporary directory.
fn temporary_file(name: &str, contents: &str) -> PathBuf {
    static COUNTER: AtomicUsize = AtomicUsize::new(0);
    let path = std::env::temp_dir().join(format!(
        "drat-remove-duplicates-{}-{}-{}",
        std::process::id(),
        COUNTER.fetch_add(1, Ordering::SeqCst),
        name
    ));
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn redundant_steps_are_dropped() {
    let formula = temporary_file("dropped.cnf", "p cnf 2 1\n1 2 0\n");
    let proof = temporary_file("dropped.drup", "1 2 0\nd 1 2 0\n2 0\nd 2 1 0\n");
    let output = Command::new(env!("CARGO_BIN_EXE_drat-remove-duplicates"))
        .arg(&formula)
        .arg(&proof)
        .output()
        .unwrap();
    let _ = fs::remove_file(&formula);
    let _ = fs::remove_file(&proof);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "2 0\nd 1 2 0\n");
}

#[test]
fn pivot_stays_first() {
    let formula = temporary_file("pivot.cnf", "p cnf 3 2\n1 2 0\n1 2 0\n");
    let proof = temporary_file("pivot.drup", "3 -1 0\n-1 3 0\nd 2 1 0\n");
    let output = Command::new(env!("CARGO_BIN_EXE_drat-remove-duplicates"))
        .arg(&formula)
        .arg(&proof)
        .output()
        .unwrap();
    let _ = fs::remove_file(&formula);
    let _ = fs::remove_file(&proof);
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(String::from_utf8_lossy(&output.stdout), "3 -1 0\nd 2 1 0\n");
}

#[test]
fn output_file_and_underflow() {
    let formula = temporary_file("underflow.cnf", "p cnf 2 1\n1 2 0\n");
    let proof = temporary_file("underflow.drup", "d 1 2 0\nd 1 2 0\n");
    let compacted = temporary_file("underflow.out", "");
    let output = Command::new(env!("CARGO_BIN_EXE_drat-remove-duplicates"))
        .arg(&formula)
        .arg(&proof)
        .arg(&compacted)
        .output()
        .unwrap();
    let written = fs::read_to_string(&compacted).unwrap();
    let _ = fs::remove_file(&formula);
    let _ = fs::remove_file(&proof);
    let _ = fs::remove_file(&compacted);
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(written, "d 1 2 0\n");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(":2 more deletions than additions of clause: 1 2 0"));
    assert!(stdout.contains("emitted deletions"));
}

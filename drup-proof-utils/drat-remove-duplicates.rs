//! Remove duplicate additions and premature deletions from a clausal proof.

use clap::Arg;
use drup_common::{
    compactor::Compactor,
    die,
    output::{install_signal_handler, print_key_value},
    parser::{open_file_for_writing, parse_files},
    warn,
};

/// Run `drat-remove-duplicates`.
fn main() {
    std::process::exit(run());
}

/// Run `drat-remove-duplicates`, returning its exit code.
fn run() -> i32 {
    install_signal_handler();
    let matches = clap::App::new("drat-remove-duplicates")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "
Remove redundant steps from a clausal proof. An addition is dropped if the
clause is already present, a deletion is dropped unless it removes the last
copy of its clause. The remaining steps are written to <OUTPUT>."
                .trim(),
        )
        .arg(
            Arg::with_name("INPUT")
                .required(true)
                .help("input formula file in DIMACS format"),
        )
        .arg(
            Arg::with_name("PROOF")
                .required(true)
                .help("input proof file in DRUP format"),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .default_value("-")
                .help("file for the output proof"),
        )
        .get_matches();
    let formula_filename = matches.value_of("INPUT").unwrap();
    let proof_filename = matches.value_of("PROOF").unwrap();
    let output_filename = matches.value_of("OUTPUT").unwrap();
    let (formula, proof) = parse_files(formula_filename, proof_filename, false)
        .unwrap_or_else(|err| die!("{}", err));
    let mut output = open_file_for_writing(output_filename).unwrap_or_else(|err| die!("{}", err));
    let mut compactor = Compactor::new(&formula);
    let result = compactor.compact(&proof, &mut output);
    drop(output);
    // Keep stdout a valid proof.
    if output_filename != "-" {
        let statistics = compactor.statistics;
        print_key_value("emitted additions", statistics.emitted_additions);
        print_key_value("suppressed additions", statistics.suppressed_additions);
        print_key_value("emitted deletions", statistics.emitted_deletions);
        print_key_value("suppressed deletions", statistics.suppressed_deletions);
    }
    match result {
        Ok(_) => 0,
        Err(failure) => {
            match failure.line {
                Some(line) => warn!("{}:{} {}", proof_filename, line, failure.error),
                None => warn!("{}", failure.error),
            }
            1
        }
    }
}

//! Forward DRUP proof checker for certifying SAT solvers' unsatisfiability results

use clap::{Arg, ArgMatches};
use drup_common::{
    checker::{Checker, Verdict},
    config, die,
    error::Failure,
    output::{install_signal_handler, print_solution, Timer},
    parser::{open_file_for_writing, parse_files, print_memory_usage},
    puts,
    report::RejectionReport,
    warn,
};

/// Run `drup-check`.
fn main() {
    std::process::exit(run_frontend());
}

/// Run `drup-check`, returning its exit code.
///
/// This is a separate function because `std::process::exit` does not
/// call destructors.
fn run_frontend() -> i32 {
    install_signal_handler();
    let mut app = clap::App::new("drup-check")
    .version(env!("CARGO_PKG_VERSION"))
    .about(env!("CARGO_PKG_DESCRIPTION"))
    .after_help(
        "Input files may be compressed - supported file extensions are: zst, gz, bz2, xz and lz4.
Use \"-\" as proof file to read the proof from standard input.
Exit status is 0 if the proof is verified, 1 if it is rejected and 2 on malformed input."
        )
    .arg(Arg::with_name("INPUT").required(true).help("input file in DIMACS format"))
    .arg(Arg::with_name("PROOF").required(true).help("proof file in DRUP format"))
    .arg(Arg::with_name("MEMORY_USAGE_BREAKDOWN").short("m").long("memory-breakdown")
         .help("Output detailed memory usage metrics.").hidden(true))
    .arg(Arg::with_name("REPORT_FILE").takes_value(true).short("S").long("report")
         .help("Write a report explaining the rejection to this file."))
    ;

    if config::ENABLE_LOGGING {
        app = app.arg(
            Arg::with_name("v")
                .short("v")
                .multiple(true)
                .help("Verbose output. Print a line for each proof step, twice for justifications."),
        );
    }

    let flags = Flags::new(app.get_matches());
    let timer = Timer::name("total time");
    let (formula, proof) = parse_files(
        &flags.formula_filename,
        &flags.proof_filename,
        flags.memory_usage_breakdown,
    )
    .unwrap_or_else(|err| die!("{}", err));
    if flags.memory_usage_breakdown {
        print_memory_usage(&formula, &proof);
    }
    let mut checker = Checker::new(&formula, flags.verbosity);
    let verdict = checker.run(&proof);
    checker.print_statistics();
    drop(timer);
    if flags.memory_usage_breakdown {
        checker.print_memory_usage();
    }
    if let Verdict::Failed(failure) = &verdict {
        explain_rejection(&flags, failure);
        if let Some(filename) = &flags.report_filename {
            write_report(filename, failure)
                .unwrap_or_else(|err| die!("Failed to write rejection report: {}", err));
        }
    }
    print_solution(if verdict.is_verified() {
        "VERIFIED"
    } else {
        "NOT VERIFIED"
    });
    verdict.exit_code()
}

/// Parsed arguments. See `drup-check --help`.
#[derive(Debug)]
pub struct Flags {
    /// Number of `-v` flags
    pub verbosity: u64,
    pub memory_usage_breakdown: bool,
    /// Input formula
    pub formula_filename: String,
    /// Input proof
    pub proof_filename: String,
    /// Present when we want to write a rejection report
    pub report_filename: Option<String>,
}

impl Flags {
    /// Create a flags instance from commandline arguments.
    pub fn new(matches: ArgMatches) -> Flags {
        Flags {
            verbosity: matches.occurrences_of("v"),
            memory_usage_breakdown: matches.is_present("MEMORY_USAGE_BREAKDOWN"),
            formula_filename: matches.value_of("INPUT").unwrap().to_string(),
            proof_filename: matches.value_of("PROOF").unwrap().to_string(),
            report_filename: matches.value_of("REPORT_FILE").map(String::from),
        }
    }
}

/// Print a comment locating the failure in the proof file.
fn explain_rejection(flags: &Flags, failure: &Failure) {
    match failure.line {
        Some(line) => warn!("{}:{} {}", flags.proof_filename, line, failure.error),
        None => warn!("{}", failure.error),
    }
    if flags.verbosity >= 1 && !failure.failing_model.is_empty() {
        puts!("c failing model:");
        for literal in &failure.failing_model {
            puts!(" {}", literal);
        }
        puts!("\n");
    }
}

/// Write the TOML rejection report.
fn write_report(filename: &str, failure: &Failure) -> drup_common::error::Result<()> {
    let mut file = open_file_for_writing(filename)?;
    RejectionReport::from_failure(failure).write(&mut file)
}

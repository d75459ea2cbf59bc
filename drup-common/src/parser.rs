//! DIMACS and DRUP parser

use crate::{
    clause::{Clause, ProofRecord},
    error::Result,
    input::Input,
    literal::{Literal, Variable},
    memory::{format_memory_usage, HeapSpace},
    output::{print_key_value, Timer},
};
use std::{
    cmp,
    fs::File,
    io::{self, BufReader, BufWriter, Read, StdinLock, Write},
};

/// The `p cnf` line of a formula
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct Header {
    pub maxvar: Variable,
    pub number_of_clauses: u64,
}

/// A parsed DIMACS formula
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct Formula {
    /// The clauses, in file order
    pub clauses: Vec<Clause>,
    /// The header, if the file has one
    pub header: Option<Header>,
    /// The highest variable that occurs in some clause
    pub maxvar: Variable,
}

impl Formula {
    /// Describe where the clauses disagree with the header.
    pub fn header_mismatches(&self) -> Vec<String> {
        let mut mismatches = Vec::new();
        if let Some(header) = self.header {
            if header.number_of_clauses != self.clauses.len() as u64 {
                mismatches.push(format!(
                    "header declares {} clauses but the formula has {}",
                    header.number_of_clauses,
                    self.clauses.len()
                ));
            }
            if self.maxvar > header.maxvar {
                mismatches.push(format!(
                    "variable {} exceeds the declared maximum {}",
                    self.maxvar, header.maxvar
                ));
            }
        }
        mismatches
    }
}

impl HeapSpace for Formula {
    fn heap_space(&self) -> usize {
        self.clauses.heap_space()
    }
}

/// Parse a formula and a proof file.
///
/// A proof file name of `-` reads the proof from stdin. Disagreements
/// between the formula and its header are printed as warnings.
pub fn parse_files(
    formula_file: &str,
    proof_file: &str,
    verbose: bool,
) -> Result<(Formula, Vec<ProofRecord>)> {
    let formula = {
        let _timer = Timer::name_if("parsing formula", verbose);
        parse_formula(read_compressed_file(formula_file)?)?
    };
    for mismatch in formula.header_mismatches() {
        warn!("{}", mismatch);
    }
    let stdin = io::stdin();
    let proof = {
        let _timer = Timer::name_if("parsing proof", verbose);
        parse_proof(read_compressed_file_or_stdin(proof_file, stdin.lock())?)?
    };
    Ok((formula, proof))
}

/// Print the memory usage of the parsed inputs.
pub fn print_memory_usage(formula: &Formula, proof: &[ProofRecord]) {
    let usages = vec![
        ("formula", formula.heap_space()),
        ("proof", proof.iter().map(HeapSpace::heap_space).sum::<usize>()),
    ];
    let total = usages.iter().map(|pair| pair.1).sum();
    print_key_value("parser memory (MB)", format_memory_usage(total));
    for (name, usage) in usages {
        print_key_value(&format!("memory-{}", name), format_memory_usage(usage));
    }
}

/// Open a file for reading.
pub fn open_file(filename: &str) -> Result<File> {
    File::open(filename).map_err(|err| {
        io::Error::new(err.kind(), format!("cannot open file {}: {}", filename, err)).into()
    })
}

/// Open a file for writing; `-` means stdout.
pub fn open_file_for_writing(filename: &str) -> Result<BufWriter<Box<dyn Write>>> {
    let writer: Box<dyn Write> = match filename {
        "-" => Box::new(io::stdout()),
        filename => Box::new(File::create(filename).map_err(|err| {
            io::Error::new(
                err.kind(),
                format!("cannot open file {} for writing: {}", filename, err),
            )
        })?),
    };
    Ok(BufWriter::new(writer))
}

/// File extension of Zstandard archives.
const ZSTD: &str = ".zst";
/// File extension of Gzip archives.
const GZIP: &str = ".gz";
/// File extension of Bzip2 archives.
const BZIP2: &str = ".bz2";
/// File extension of XZ archives.
const XZ: &str = ".xz";
/// File extension of LZ4 archives.
const LZ4: &str = ".lz4";

/// Strip the compression format off a filename.
///
/// If the filename ends with a known archive extension,
/// return the filname without extension and the extension.
/// Otherwise return the unmodified filename and the empty string.
fn compression_format_by_extension(filename: &str) -> (&str, &str) {
    for extension in &[ZSTD, GZIP, BZIP2, LZ4, XZ] {
        if filename.ends_with(extension) {
            return (&filename[0..filename.len() - extension.len()], *extension);
        }
    }
    (filename, "")
}

/// Return an [Input](../input/struct.Input.html) to read from a possibly compressed file.
///
/// If the filename is "-", returns an [Input](../input/struct.Input.html) reading data from stdin.
pub fn read_compressed_file_or_stdin<'a>(
    filename: &'a str,
    stdin: StdinLock<'a>,
) -> Result<Input<'a>> {
    match filename {
        "-" => Ok(Input::new(Box::new(stdin.bytes().map(panic_on_error)))),
        filename => read_compressed_file(filename),
    }
}

/// Return an [Input](../input/struct.Input.html) to read from a possibly compressed file.
///
/// If the file is compressed it is transparently uncompressed.
pub fn read_compressed_file<'a>(filename: &str) -> Result<Input<'a>> {
    let file = open_file(filename)?;
    Ok(Input::new(read_from_compressed_file(file, filename)?))
}

/// Return an Iterator to read from a possibly compressed file.
fn read_from_compressed_file(
    file: File,
    filename: &str,
) -> Result<Box<dyn Iterator<Item = u8>>> {
    let (_basename, compression_format) = compression_format_by_extension(filename);
    let bytes: Box<dyn Iterator<Item = u8>> = match compression_format {
        ZSTD => Box::new(
            zstd::stream::read::Decoder::new(file)?
                .bytes()
                .map(panic_on_error),
        ),
        GZIP => Box::new(flate2::read::GzDecoder::new(file).bytes().map(panic_on_error)),
        BZIP2 => Box::new(bzip2::read::BzDecoder::new(file).bytes().map(panic_on_error)),
        XZ => Box::new(xz2::read::XzDecoder::new(file).bytes().map(panic_on_error)),
        LZ4 => Box::new(lz4::Decoder::new(file)?.bytes().map(panic_on_error)),
        _ => Box::new(BufReader::new(file).bytes().map(panic_on_error)),
    };
    Ok(bytes)
}

/// Unwraps a result, exiting on error.
///
/// Read errors surface in the middle of a byte stream, where the parser
/// cannot report them.
pub fn panic_on_error<T>(result: io::Result<T>) -> T {
    result.unwrap_or_else(|error| die!("{}", error))
}

/// Parse the literals of a clause up to the terminating zero, which must
/// end the line. The literals are returned in input order.
fn parse_clause(input: &mut Input) -> Result<Vec<Literal>> {
    let mut literals = Vec::new();
    loop {
        input.skip_blanks();
        if input.at_end_of_line() {
            return Err(input.error(Input::TERMINATOR));
        }
        let value = input.parse_dec32()?;
        if value == 0 {
            input.finish_line()?;
            return Ok(literals);
        }
        literals.push(Literal::new(value));
    }
}

/// Parse a DIMACS header, `p cnf <maxvar> <clauses>`.
fn parse_formula_header(input: &mut Input) -> Result<Header> {
    input.expect(b"p", Input::P_CNF)?;
    input.skip_some_blanks()?;
    input.expect(b"cnf", Input::P_CNF)?;
    input.skip_some_blanks()?;
    let maxvar = input.parse_unsigned()?;
    if maxvar > i32::max_value() as u64 {
        return Err(input.error(Input::OVERFLOW));
    }
    input.skip_some_blanks()?;
    let number_of_clauses = input.parse_unsigned()?;
    input.finish_line()?;
    Ok(Header {
        maxvar: Variable::new(maxvar as u32),
        number_of_clauses,
    })
}

/// Parse a DIMACS formula.
///
/// Comment lines start with `c`; at most one `p cnf` header is allowed.
/// Every other non-blank line holds exactly one clause.
pub fn parse_formula(mut input: Input) -> Result<Formula> {
    let mut formula = Formula::default();
    loop {
        input.skip_any_whitespace();
        match input.peek() {
            None => break,
            Some(b'c') => input.skip_line(),
            Some(b'p') => {
                if formula.header.is_some() {
                    return Err(input.error(Input::DUPLICATE_HEADER));
                }
                formula.header = Some(parse_formula_header(&mut input)?);
            }
            Some(_) => {
                let clause = Clause::new(parse_clause(&mut input)?);
                if let Some(last) = clause.literals().last() {
                    formula.maxvar = cmp::max(formula.maxvar, last.variable());
                }
                formula.clauses.push(clause);
            }
        }
    }
    formula.clauses.shrink_to_fit();
    Ok(formula)
}

/// Parse a DRUP proof.
///
/// Lines starting with `d` and a blank are deletions, comment lines start
/// with `c`, every other non-blank line is an addition.
pub fn parse_proof(mut input: Input) -> Result<Vec<ProofRecord>> {
    let mut proof = Vec::new();
    loop {
        input.skip_any_whitespace();
        let line = input.line();
        match input.peek() {
            None => break,
            Some(b'c') => input.skip_line(),
            Some(b'd') => {
                input.next();
                input.skip_some_blanks().map_err(|_| input.error(Input::DRAT))?;
                proof.push(ProofRecord::parsed(true, parse_clause(&mut input)?, line));
            }
            Some(c) if Input::is_digit_or_dash(c) => {
                proof.push(ProofRecord::parsed(false, parse_clause(&mut input)?, line));
            }
            Some(_) => return Err(input.error(Input::DRAT)),
        }
    }
    proof.shrink_to_fit();
    Ok(proof)
}

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{event, span, Level};

use super::document::Document;
use super::types::{IoAction, IoFailed, IoTarget, LineNumber, ParseFailure};
use super::validator::validate;


/// Where the source comes from and where the document goes.  `None`
/// means standard input or standard output.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
}

/// Parse a complete program held in memory.
///
/// # Errors
///
/// Returns the first failure found in the program.
pub fn parse_source(source: &str) -> Result<Document, ParseFailure> {
    let span = span!(Level::DEBUG, "parse_source", bytes = source.len());
    let _enter = span.enter();
    validate(source)
}

/// The line (counting from 1) containing byte offset `pos`.
fn line_of_offset(bytes: &[u8], pos: usize) -> LineNumber {
    1 + bytes[..pos].iter().filter(|b| **b == b'\n').count()
}

/// Read and parse a complete program from `reader`.  `target` only
/// serves to describe the reader in error messages.
///
/// # Errors
///
/// Fails if reading fails, if the input is not UTF-8, or if the
/// program is invalid.
pub fn parse_reader<R: Read>(mut reader: R, target: IoTarget) -> Result<Document, ParseFailure> {
    let mut bytes: Vec<u8> = Vec::new();
    if let Err(error) = reader.read_to_end(&mut bytes) {
        return Err(ParseFailure::Io(IoFailed {
            action: IoAction::Read,
            target,
            error,
        }));
    }
    event!(Level::DEBUG, "read {} bytes from {target}", bytes.len());
    match std::str::from_utf8(&bytes) {
        Ok(source) => parse_source(source),
        Err(e) => Err(ParseFailure::Lexical {
            line: line_of_offset(&bytes, e.valid_up_to()),
            msg: format!("input is not valid UTF-8: {e}"),
        }),
    }
}

/// Read and parse the program in the file `input_file`.
///
/// # Errors
///
/// See [`parse_reader`]; also fails if the file cannot be opened.
pub fn parse_file(input_file: &Path) -> Result<Document, ParseFailure> {
    let target = IoTarget::File(input_file.to_path_buf());
    let input = OpenOptions::new()
        .read(true)
        .open(input_file)
        .map_err(|error| {
            ParseFailure::Io(IoFailed {
                action: IoAction::Read,
                target: target.clone(),
                error,
            })
        })?;
    parse_reader(input, target)
}

/// Write `document` to `writer`.
///
/// # Errors
///
/// Fails if writing fails.
pub fn write_document<W: Write>(
    document: &Document,
    writer: &mut W,
    target: IoTarget,
) -> Result<(), ParseFailure> {
    document.write_to(writer).map_err(|error| {
        ParseFailure::Io(IoFailed {
            action: IoAction::Write,
            target,
            error,
        })
    })
}

/// Write `document` to the file `output_file`, replacing any
/// existing content.
///
/// # Errors
///
/// Fails if the file cannot be created or written.
pub fn write_document_to_file(document: &Document, output_file: &Path) -> Result<(), ParseFailure> {
    let target = IoTarget::File(output_file.to_path_buf());
    let file = File::create(output_file).map_err(|error| {
        ParseFailure::Io(IoFailed {
            action: IoAction::Write,
            target: target.clone(),
            error,
        })
    })?;
    write_document(document, &mut BufWriter::new(file), target)
}

/// Parse a program and write its document, as directed by
/// `options`.  Nothing is written unless the whole program is valid.
///
/// # Errors
///
/// Returns the first failure; see [`ParseFailure::exit_status`] for
/// how these map to exit codes.
pub fn parse_and_emit(options: &Options) -> Result<Document, ParseFailure> {
    let document = match options.input.as_deref() {
        Some(path) => parse_file(path)?,
        None => parse_reader(io::stdin().lock(), IoTarget::Stdin)?,
    };
    event!(
        Level::INFO,
        "validated {} instructions",
        document.instructions().len()
    );
    match options.output.as_deref() {
        Some(path) => write_document_to_file(&document, path)?,
        None => write_document(&document, &mut io::stdout().lock(), IoTarget::Stdout)?,
    }
    Ok(document)
}
